//! Core runtime configuration.
//!
//! Configuration is resolved once at process startup and then passed into core services, so
//! request handling never reads process-wide environment variables. The `*_from_env_value`
//! helpers take the raw (optional) string so binaries decide where values come from.

use crate::repositories::{files::FileStore, memory::InMemoryStore, PatientStore};
use crate::{PatientError, PatientResult};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::Arc;

/// Which [`PatientStore`] implementation backs the service.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum StoreBackend {
    /// Records live in process memory and are lost on exit.
    Memory,
    /// One YAML file per patient under the patient data directory.
    #[default]
    Files,
}

impl FromStr for StoreBackend {
    type Err = PatientError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "memory" => Ok(StoreBackend::Memory),
            "files" => Ok(StoreBackend::Files),
            other => Err(PatientError::InvalidInput(format!(
                "unknown store backend '{other}' (expected 'memory' or 'files')"
            ))),
        }
    }
}

/// Core configuration resolved at startup.
#[derive(Clone, Debug)]
pub struct CoreConfig {
    patient_data_dir: PathBuf,
    store_backend: StoreBackend,
    seed_sample_data: bool,
}

impl CoreConfig {
    /// Create a new `CoreConfig`.
    ///
    /// # Errors
    ///
    /// Returns `PatientError::InvalidInput` if the file backend is selected with an empty
    /// patient data directory.
    pub fn new(
        patient_data_dir: PathBuf,
        store_backend: StoreBackend,
        seed_sample_data: bool,
    ) -> PatientResult<Self> {
        if store_backend == StoreBackend::Files && patient_data_dir.as_os_str().is_empty() {
            return Err(PatientError::InvalidInput(
                "patient_data_dir cannot be empty for the files backend".into(),
            ));
        }

        Ok(Self {
            patient_data_dir,
            store_backend,
            seed_sample_data,
        })
    }

    pub fn patient_data_dir(&self) -> &Path {
        &self.patient_data_dir
    }

    pub fn store_backend(&self) -> StoreBackend {
        self.store_backend
    }

    pub fn seed_sample_data(&self) -> bool {
        self.seed_sample_data
    }

    /// Opens the configured store.
    ///
    /// # Errors
    ///
    /// Returns a `PatientError` if the file store directory cannot be created.
    pub fn open_store(&self) -> PatientResult<Arc<dyn PatientStore>> {
        Ok(match self.store_backend {
            StoreBackend::Memory => Arc::new(InMemoryStore::new()),
            StoreBackend::Files => Arc::new(FileStore::open(&self.patient_data_dir)?),
        })
    }
}

/// Parse the store backend from an optional string value.
///
/// If `value` is `None` or empty/whitespace, returns the default backend ([`StoreBackend::Files`]).
pub fn store_backend_from_env_value(value: Option<String>) -> PatientResult<StoreBackend> {
    let value = value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty());
    let parsed = value.map(|v| v.parse::<StoreBackend>()).transpose()?;

    Ok(parsed.unwrap_or_default())
}

/// Parse a boolean switch from an optional string value.
///
/// Accepts `true`/`false`, `1`/`0`, `yes`/`no` (case-insensitive). `None` or empty means `false`.
pub fn flag_from_env_value(name: &str, value: Option<String>) -> PatientResult<bool> {
    let Some(value) = value.map(|v| v.trim().to_ascii_lowercase()) else {
        return Ok(false);
    };
    match value.as_str() {
        "" | "false" | "0" | "no" => Ok(false),
        "true" | "1" | "yes" => Ok(true),
        other => Err(PatientError::InvalidInput(format!(
            "{name} must be true or false, got '{other}'"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_backend_defaults_to_files() {
        assert_eq!(
            store_backend_from_env_value(None).unwrap(),
            StoreBackend::Files
        );
        assert_eq!(
            store_backend_from_env_value(Some("   ".into())).unwrap(),
            StoreBackend::Files
        );
    }

    #[test]
    fn test_store_backend_parses_known_values() {
        assert_eq!(
            store_backend_from_env_value(Some("Memory".into())).unwrap(),
            StoreBackend::Memory
        );
        assert_eq!(
            store_backend_from_env_value(Some("files".into())).unwrap(),
            StoreBackend::Files
        );
        assert!(store_backend_from_env_value(Some("mongo".into())).is_err());
    }

    #[test]
    fn test_flag_from_env_value() {
        assert!(!flag_from_env_value("ER_SEED_SAMPLE_DATA", None).unwrap());
        assert!(flag_from_env_value("ER_SEED_SAMPLE_DATA", Some("TRUE".into())).unwrap());
        assert!(flag_from_env_value("ER_SEED_SAMPLE_DATA", Some("1".into())).unwrap());
        assert!(!flag_from_env_value("ER_SEED_SAMPLE_DATA", Some("no".into())).unwrap());

        let err = flag_from_env_value("ER_SEED_SAMPLE_DATA", Some("maybe".into())).unwrap_err();
        assert!(err.to_string().contains("ER_SEED_SAMPLE_DATA"));
    }

    #[test]
    fn test_files_backend_requires_data_dir() {
        assert!(CoreConfig::new(PathBuf::new(), StoreBackend::Files, false).is_err());
        assert!(CoreConfig::new(PathBuf::new(), StoreBackend::Memory, false).is_ok());
    }

    #[test]
    fn test_open_store_files_creates_directory() {
        let tmp = tempfile::TempDir::new().unwrap();
        let cfg = CoreConfig::new(tmp.path().join("data"), StoreBackend::Files, false).unwrap();

        let store = cfg.open_store().unwrap();

        assert_eq!(store.count(crate::StatusFilter::Any).unwrap(), 0);
        assert!(tmp.path().join("data").join("patients").is_dir());
    }
}
