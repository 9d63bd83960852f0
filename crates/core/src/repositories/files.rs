//! File-backed patient store.
//!
//! ## Storage Layout
//!
//! Each patient is a single YAML document in a sharded directory tree:
//!
//! ```text
//! <patient_data_dir>/
//!   patients/
//!     <s1>/
//!       <s2>/
//!         <uuid>/
//!           patient.yaml
//! ```
//!
//! where `s1` and `s2` are the first four hex characters of the patient identifier.
//!
//! Writes are atomic per record (scratch file + rename). Mutations are serialised by a
//! store-wide mutex, which is what makes [`PatientStore::update`] a conditional update: the
//! mutator sees the latest stored version and nobody else can write in between.

use super::helpers::{list_sharded_dirs, write_atomic};
use super::{Mutator, PatientStore, StatusFilter};
use crate::constants::{PATIENTS_DIR_NAME, PATIENT_YAML_FILENAME};
use crate::error::{PatientError, PatientResult};
use crate::patient::{Patient, PatientId};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

#[derive(Debug)]
pub struct FileStore {
    patients_dir: PathBuf,
    write_lock: Mutex<()>,
}

impl FileStore {
    /// Opens (creating if needed) the store under `patient_data_dir`.
    ///
    /// # Errors
    ///
    /// Returns `PatientError::StorageDirCreation` if the patients directory cannot be created.
    pub fn open(patient_data_dir: &Path) -> PatientResult<Self> {
        let patients_dir = patient_data_dir.join(PATIENTS_DIR_NAME);
        fs::create_dir_all(&patients_dir).map_err(PatientError::StorageDirCreation)?;

        Ok(Self {
            patients_dir,
            write_lock: Mutex::new(()),
        })
    }

    pub fn patients_dir(&self) -> &Path {
        &self.patients_dir
    }

    fn lock(&self) -> PatientResult<MutexGuard<'_, ()>> {
        self.write_lock.lock().map_err(|_| PatientError::LockPoisoned)
    }

    fn record_path(&self, id: &PatientId) -> PathBuf {
        id.sharded_dir(&self.patients_dir).join(PATIENT_YAML_FILENAME)
    }

    fn read_record(path: &Path) -> PatientResult<Option<Patient>> {
        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(PatientError::FileRead(e)),
        };
        serde_yaml::from_str(&contents)
            .map(Some)
            .map_err(PatientError::YamlDeserialization)
    }

    fn write_record(&self, patient: &Patient) -> PatientResult<()> {
        let yaml = serde_yaml::to_string(patient).map_err(PatientError::YamlSerialization)?;
        write_atomic(&self.record_path(patient.id()), &yaml)
    }
}

impl PatientStore for FileStore {
    fn insert(&self, patient: Patient) -> PatientResult<PatientId> {
        let _guard = self.lock()?;
        let id = patient.id().clone();
        if self.record_path(&id).exists() {
            return Err(PatientError::DuplicateId(id));
        }
        self.write_record(&patient)?;
        Ok(id)
    }

    fn get(&self, id: &PatientId) -> PatientResult<Option<Patient>> {
        Self::read_record(&self.record_path(id))
    }

    fn scan(&self, filter: StatusFilter) -> PatientResult<Vec<Patient>> {
        let mut patients = Vec::new();

        for dir in list_sharded_dirs(&self.patients_dir)? {
            let path = dir.join(PATIENT_YAML_FILENAME);
            match Self::read_record(&path) {
                Ok(Some(patient)) => {
                    if filter.matches(&patient) {
                        patients.push(patient);
                    }
                }
                Ok(None) => {}
                Err(PatientError::YamlDeserialization(e)) => {
                    tracing::warn!("failed to parse {}: {}", path.display(), e);
                }
                Err(e) => return Err(e),
            }
        }

        Ok(patients)
    }

    fn update(&self, id: &PatientId, mutator: Mutator<'_>) -> PatientResult<Patient> {
        let _guard = self.lock()?;
        let mut working = Self::read_record(&self.record_path(id))?
            .ok_or_else(|| PatientError::NotFound(id.clone()))?;

        mutator(&mut working)?;

        self.write_record(&working)?;
        Ok(working)
    }

    fn delete(&self, id: &PatientId) -> PatientResult<()> {
        let _guard = self.lock()?;
        if !self.record_path(id).is_file() {
            return Err(PatientError::NotFound(id.clone()));
        }
        fs::remove_dir_all(id.sharded_dir(&self.patients_dir)).map_err(PatientError::FileDelete)
    }
}
