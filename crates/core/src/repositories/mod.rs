//! Patient record stores.
//!
//! The service layer talks to storage only through [`PatientStore`], so the same triage logic
//! runs against the in-memory store (tests, development) and the file-backed store.
//!
//! Stores own the persisted state. Every method works on a snapshot or a single record; the
//! one mutation primitive, [`PatientStore::update`], applies a caller-supplied mutator under
//! the store's write lock and persists the result only if the mutator succeeds.

use crate::error::PatientResult;
use crate::patient::{Patient, PatientId, PatientStatus};

pub mod files;
pub(crate) mod helpers;
pub mod memory;

/// Which records a scan or count should return.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StatusFilter {
    /// Every record, whatever its status.
    Any,
    /// Waiting and emergency patients.
    Active,
    /// Records with exactly this status.
    Only(PatientStatus),
}

impl StatusFilter {
    pub fn matches(self, patient: &Patient) -> bool {
        match self {
            StatusFilter::Any => true,
            StatusFilter::Active => patient.is_active(),
            StatusFilter::Only(status) => patient.status() == status,
        }
    }
}

/// Mutation applied to a working copy of a record inside [`PatientStore::update`].
pub type Mutator<'a> = &'a mut dyn FnMut(&mut Patient) -> PatientResult<()>;

/// Durable keyed storage of patient records.
pub trait PatientStore: Send + Sync {
    /// Stores a new record.
    ///
    /// # Errors
    ///
    /// Returns [`crate::PatientError::DuplicateId`] if a record with the same id exists.
    fn insert(&self, patient: Patient) -> PatientResult<PatientId>;

    /// Point lookup. `Ok(None)` when the id is unknown.
    fn get(&self, id: &PatientId) -> PatientResult<Option<Patient>>;

    /// All records matching `filter`, in store iteration order.
    fn scan(&self, filter: StatusFilter) -> PatientResult<Vec<Patient>>;

    /// Atomically applies `mutator` to the record with `id` and returns the stored result.
    ///
    /// If the mutator fails, its error is returned and the stored record is unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`crate::PatientError::NotFound`] if the id is unknown, or the mutator's error.
    fn update(&self, id: &PatientId, mutator: Mutator<'_>) -> PatientResult<Patient>;

    /// Removes a record in any state.
    ///
    /// # Errors
    ///
    /// Returns [`crate::PatientError::NotFound`] if the id is unknown.
    fn delete(&self, id: &PatientId) -> PatientResult<()>;

    fn count(&self, filter: StatusFilter) -> PatientResult<usize> {
        Ok(self.scan(filter)?.len())
    }

    /// Case-insensitive substring match on the patient name, across all statuses.
    fn find_by_name(&self, needle: &str) -> PatientResult<Vec<Patient>> {
        let needle = needle.to_lowercase();
        Ok(self
            .scan(StatusFilter::Any)?
            .into_iter()
            .filter(|p| p.name().as_str().to_lowercase().contains(&needle))
            .collect())
    }
}
