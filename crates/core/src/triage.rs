//! Triage service: admissions, queue views and treatment.
//!
//! [`TriageService`] is the only entry point the API and CLI use. It holds an explicit handle to
//! a [`PatientStore`] and keeps no other state; each call reads what it needs from the store,
//! applies the priority policy, and writes any change back through a single store update.

use crate::constants::{MAX_ID_ALLOCATION_ATTEMPTS, MAX_TREAT_ATTEMPTS};
use crate::error::{PatientError, PatientResult};
use crate::patient::{Patient, PatientId, PatientStatus};
use crate::repositories::{PatientStore, StatusFilter};
use crate::validation::{
    parse_patient_id, validate_patient_name, validate_search_term, validate_severity,
};
use crate::views::{self, PatientStats};
use chrono::{Duration, Utc};
use er_types::{NonEmptyText, Severity};
use std::sync::Arc;

#[derive(Clone)]
pub struct TriageService {
    store: Arc<dyn PatientStore>,
}

impl TriageService {
    pub fn new(store: Arc<dyn PatientStore>) -> Self {
        Self { store }
    }

    /// Admits a patient through the regular route with a triaged severity.
    ///
    /// # Errors
    ///
    /// Returns a validation error if `name` is empty or `severity` is outside 1..=10; nothing
    /// is stored in that case. Store failures are propagated.
    pub fn admit_regular(&self, name: &str, severity: i64) -> PatientResult<Patient> {
        let name = validate_patient_name(name)?;
        let severity = validate_severity(severity)?;

        let patient = self.insert_with_fresh_id(|id| {
            Patient::admit(id, name.clone(), severity, Utc::now())
        })?;
        tracing::info!(
            "admitted patient {} at severity {}",
            patient.id(),
            patient.severity()
        );
        Ok(patient)
    }

    /// Admits a patient through the emergency route.
    ///
    /// Severity is always [`Severity::EMERGENCY`]; there is no way to pass one in.
    ///
    /// # Errors
    ///
    /// Returns a validation error if `name` is empty. Store failures are propagated.
    pub fn admit_emergency(&self, name: &str) -> PatientResult<Patient> {
        let name = validate_patient_name(name)?;

        let patient = self.insert_with_fresh_id(|id| {
            Patient::admit_emergency(id, name.clone(), Utc::now())
        })?;
        tracing::info!("admitted emergency patient {}", patient.id());
        Ok(patient)
    }

    fn insert_with_fresh_id(&self, build: impl Fn(PatientId) -> Patient) -> PatientResult<Patient> {
        for _attempt in 0..MAX_ID_ALLOCATION_ATTEMPTS {
            let patient = build(PatientId::new());
            match self.store.insert(patient.clone()) {
                Ok(_) => return Ok(patient),
                Err(PatientError::DuplicateId(id)) => {
                    tracing::warn!("patient id {} already in use, allocating another", id);
                }
                Err(e) => return Err(e),
            }
        }
        Err(PatientError::IdAllocation(MAX_ID_ALLOCATION_ATTEMPTS))
    }

    /// Looks up a single patient.
    ///
    /// # Errors
    ///
    /// Returns `PatientError::InvalidId` for a malformed id and `PatientError::NotFound` if no
    /// record has that id.
    pub fn get_patient(&self, id: &str) -> PatientResult<Patient> {
        let id = parse_patient_id(id)?;
        self.store
            .get(&id)?
            .ok_or(PatientError::NotFound(id))
    }

    /// Waiting and emergency patients in treatment order.
    pub fn list_active(&self) -> PatientResult<Vec<Patient>> {
        Ok(views::active_queue(self.store.scan(StatusFilter::Active)?))
    }

    /// Treated patients, most recently treated first.
    pub fn list_treated(&self) -> PatientResult<Vec<Patient>> {
        Ok(views::treated_history(
            self.store
                .scan(StatusFilter::Only(PatientStatus::Treated))?,
        ))
    }

    /// Active patients in treatment order, followed by the treated history.
    pub fn list_all(&self) -> PatientResult<Vec<Patient>> {
        Ok(views::all_patients(self.store.scan(StatusFilter::Any)?))
    }

    /// Regular (non-emergency) patients still waiting, in treatment order.
    pub fn list_waiting_only(&self) -> PatientResult<Vec<Patient>> {
        self.list_with_status(PatientStatus::Waiting)
    }

    /// Emergency patients still waiting, in treatment order.
    pub fn list_emergency_only(&self) -> PatientResult<Vec<Patient>> {
        self.list_with_status(PatientStatus::Emergency)
    }

    fn list_with_status(&self, status: PatientStatus) -> PatientResult<Vec<Patient>> {
        Ok(views::with_status(
            self.store.scan(StatusFilter::Only(status))?,
            status,
        ))
    }

    /// The patient who would be treated next. `Ok(None)` when nobody is waiting.
    pub fn get_next(&self) -> PatientResult<Option<Patient>> {
        let active = self.store.scan(StatusFilter::Active)?;
        Ok(views::next_patient(&active).cloned())
    }

    /// Treats a specific patient.
    ///
    /// # Errors
    ///
    /// Returns:
    /// - `PatientError::InvalidId` for a malformed id,
    /// - `PatientError::NotFound` if the id is unknown,
    /// - `PatientError::AlreadyTreated` if the patient was already treated (the original
    ///   treatment time is kept).
    pub fn treat_by_id(&self, id: &str) -> PatientResult<Patient> {
        let id = parse_patient_id(id)?;
        let now = Utc::now();

        match self
            .store
            .update(&id, &mut |p: &mut Patient| p.mark_treated(now))
        {
            Ok(patient) => {
                tracing::info!("treated patient {}", patient.id());
                Ok(patient)
            }
            Err(e @ PatientError::AlreadyTreated(_)) => {
                tracing::warn!("rejected repeat treatment of patient {}", id);
                Err(e)
            }
            Err(e) => Err(e),
        }
    }

    /// Treats whoever is at the head of the active queue.
    ///
    /// Returns `Ok(None)` when there are no active patients. If the chosen patient is treated
    /// or removed by someone else between selection and update, the queue is read again.
    ///
    /// # Errors
    ///
    /// Returns `PatientError::TreatmentContention` if that keeps happening for
    /// [`MAX_TREAT_ATTEMPTS`] rounds. Store failures are propagated.
    pub fn auto_treat_next(&self) -> PatientResult<Option<Patient>> {
        for _attempt in 0..MAX_TREAT_ATTEMPTS {
            let active = self.store.scan(StatusFilter::Active)?;
            let Some(candidate) = views::next_patient(&active) else {
                tracing::info!("auto-treat found no patients waiting");
                return Ok(None);
            };

            let now = Utc::now();
            match self
                .store
                .update(candidate.id(), &mut |p: &mut Patient| p.mark_treated(now))
            {
                Ok(patient) => {
                    tracing::info!(
                        "auto-treated patient {} ({}, severity {})",
                        patient.id(),
                        candidate.status(),
                        patient.severity()
                    );
                    return Ok(Some(patient));
                }
                Err(PatientError::AlreadyTreated(id) | PatientError::NotFound(id)) => {
                    tracing::warn!("patient {} was taken concurrently, reselecting", id);
                }
                Err(e) => return Err(e),
            }
        }
        Err(PatientError::TreatmentContention(MAX_TREAT_ATTEMPTS))
    }

    /// Replaces the severity of a patient still in the queue.
    ///
    /// # Errors
    ///
    /// Returns `PatientError::InvalidSeverity` (checked before the store is touched),
    /// `PatientError::InvalidId`, `PatientError::NotFound`, or `PatientError::AlreadyTreated`
    /// for a treated patient.
    pub fn revise_severity(&self, id: &str, severity: i64) -> PatientResult<Patient> {
        let severity = validate_severity(severity)?;
        let id = parse_patient_id(id)?;

        let patient = self
            .store
            .update(&id, &mut |p: &mut Patient| p.revise_severity(severity))?;
        tracing::info!("revised severity of patient {} to {}", id, severity);
        Ok(patient)
    }

    /// Removes a patient record in any state.
    ///
    /// # Errors
    ///
    /// Returns `PatientError::InvalidId` or `PatientError::NotFound`.
    pub fn delete_by_id(&self, id: &str) -> PatientResult<()> {
        let id = parse_patient_id(id)?;
        self.store.delete(&id)?;
        tracing::info!("deleted patient {}", id);
        Ok(())
    }

    /// Case-insensitive name search across all statuses, in store order.
    pub fn search_by_name(&self, name: &str) -> PatientResult<Vec<Patient>> {
        let term = validate_search_term(name)?;
        self.store.find_by_name(term)
    }

    pub fn get_statistics(&self) -> PatientResult<PatientStats> {
        let snapshot = self.store.scan(StatusFilter::Any)?;
        Ok(PatientStats::from_snapshot(&snapshot))
    }

    /// Populates an empty store with a small demonstration department.
    ///
    /// Does nothing if any record already exists. Returns the number of records inserted.
    pub fn seed_sample_data(&self) -> PatientResult<usize> {
        if self.store.count(StatusFilter::Any)? > 0 {
            return Ok(0);
        }

        let now = Utc::now();
        let samples = [
            ("John Doe", 3, PatientStatus::Waiting, 30, None),
            ("Jane Smith", 5, PatientStatus::Waiting, 15, None),
            ("Emergency Patient 1", 10, PatientStatus::Emergency, 10, None),
            ("Treated Patient", 4, PatientStatus::Treated, 45, Some(5)),
        ];

        for &(name, severity, status, arrived_ago, treated_ago) in &samples {
            let patient = Patient::from_parts(
                PatientId::new(),
                NonEmptyText::new(name)?,
                Severity::new(severity)?,
                status,
                now - Duration::minutes(arrived_ago),
                treated_ago.map(|m| now - Duration::minutes(m)),
            )?;
            self.store.insert(patient)?;
        }

        tracing::info!("seeded {} sample patients", samples.len());
        Ok(samples.len())
    }
}
