//! Constants used throughout the ER core crate.
//!
//! Path names, defaults and retry bounds live here so that the stores, the service and the
//! binaries agree on them.

/// Default directory for patient data storage when no explicit directory is configured.
pub const DEFAULT_PATIENT_DATA_DIR: &str = "patient_data";

/// Default listen address for the REST API.
pub const DEFAULT_REST_ADDR: &str = "0.0.0.0:3000";

/// Directory name, under the patient data directory, holding the sharded patient records.
pub const PATIENTS_DIR_NAME: &str = "patients";

/// Filename for a single patient record.
pub const PATIENT_YAML_FILENAME: &str = "patient.yaml";

/// Suffix for the scratch file written before a record is atomically renamed into place.
pub const TEMP_FILE_SUFFIX: &str = "tmp";

/// Attempts made to allocate an unused patient identifier before giving up.
pub const MAX_ID_ALLOCATION_ATTEMPTS: usize = 5;

/// Attempts made by auto-treat to re-select when its chosen patient was taken concurrently.
pub const MAX_TREAT_ATTEMPTS: usize = 5;

/// Longest patient name accepted at admission.
pub const MAX_NAME_LEN: usize = 200;

/// Longest search term accepted by name search.
pub const MAX_SEARCH_TERM_LEN: usize = 200;
