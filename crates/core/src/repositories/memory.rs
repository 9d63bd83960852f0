//! In-process patient store.

use super::{Mutator, PatientStore, StatusFilter};
use crate::error::{PatientError, PatientResult};
use crate::patient::{Patient, PatientId};
use std::collections::BTreeMap;
use std::sync::RwLock;

/// Patient store held entirely in memory, keyed by identifier.
///
/// Nothing survives a restart. Updates take the write lock for the whole read-mutate-write
/// cycle, so two concurrent treatments of one patient cannot both succeed.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    records: RwLock<BTreeMap<PatientId, Patient>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PatientStore for InMemoryStore {
    fn insert(&self, patient: Patient) -> PatientResult<PatientId> {
        let mut records = self.records.write().map_err(|_| PatientError::LockPoisoned)?;
        let id = patient.id().clone();
        if records.contains_key(&id) {
            return Err(PatientError::DuplicateId(id));
        }
        records.insert(id.clone(), patient);
        Ok(id)
    }

    fn get(&self, id: &PatientId) -> PatientResult<Option<Patient>> {
        let records = self.records.read().map_err(|_| PatientError::LockPoisoned)?;
        Ok(records.get(id).cloned())
    }

    fn scan(&self, filter: StatusFilter) -> PatientResult<Vec<Patient>> {
        let records = self.records.read().map_err(|_| PatientError::LockPoisoned)?;
        Ok(records
            .values()
            .filter(|p| filter.matches(p))
            .cloned()
            .collect())
    }

    fn update(&self, id: &PatientId, mutator: Mutator<'_>) -> PatientResult<Patient> {
        let mut records = self.records.write().map_err(|_| PatientError::LockPoisoned)?;
        let current = records
            .get(id)
            .ok_or_else(|| PatientError::NotFound(id.clone()))?;

        let mut working = current.clone();
        mutator(&mut working)?;

        records.insert(id.clone(), working.clone());
        Ok(working)
    }

    fn delete(&self, id: &PatientId) -> PatientResult<()> {
        let mut records = self.records.write().map_err(|_| PatientError::LockPoisoned)?;
        records
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| PatientError::NotFound(id.clone()))
    }
}
