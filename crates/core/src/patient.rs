//! The patient record and its lifecycle.
//!
//! A [`Patient`] is created by an admission, may have its severity revised while it is still
//! waiting, and moves into [`PatientStatus::Treated`] exactly once. Fields are private so the
//! lifecycle rules below cannot be bypassed:
//!
//! - `severity` is always within 1..=10 (guaranteed by [`Severity`]).
//! - `treated_time` is present if and only if the status is `Treated`, and is never earlier
//!   than `arrival_time`.
//! - `Treated` is terminal: neither treatment nor severity revision applies to it again.
//!
//! The serialised form is a flat camelCase document (`id`, `name`, `severity`, `status`,
//! `arrivalTime`, `treatedTime`). Deserialisation goes through [`Patient::from_parts`], so a
//! stored record that breaks an invariant is rejected instead of loaded.

use crate::error::{PatientError, PatientResult};
use chrono::{DateTime, Utc};
use er_types::{NonEmptyText, Severity};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier assigned to a patient at admission.
pub type PatientId = er_uuid::ShardableUuid;

/// Where a patient currently sits in the department's workflow.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PatientStatus {
    /// Admitted through the regular route and awaiting treatment.
    Waiting,
    /// Admitted through the emergency route and awaiting treatment.
    Emergency,
    /// Treatment has been given. Terminal.
    Treated,
}

impl PatientStatus {
    /// Waiting and emergency patients are still in the queue.
    pub fn is_active(self) -> bool {
        !matches!(self, PatientStatus::Treated)
    }

    /// Wire representation, as used by the REST API and stored records.
    pub fn as_str(self) -> &'static str {
        match self {
            PatientStatus::Waiting => "WAITING",
            PatientStatus::Emergency => "EMERGENCY",
            PatientStatus::Treated => "TREATED",
        }
    }
}

impl fmt::Display for PatientStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "StoredPatient", into = "StoredPatient")]
pub struct Patient {
    id: PatientId,
    name: NonEmptyText,
    severity: Severity,
    status: PatientStatus,
    arrival_time: DateTime<Utc>,
    treated_time: Option<DateTime<Utc>>,
}

impl Patient {
    /// A regular admission: waiting, at the triaged severity.
    pub fn admit(
        id: PatientId,
        name: NonEmptyText,
        severity: Severity,
        arrival_time: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            name,
            severity,
            status: PatientStatus::Waiting,
            arrival_time,
            treated_time: None,
        }
    }

    /// An emergency admission. Severity is fixed at [`Severity::EMERGENCY`] regardless of any
    /// score the caller may have had in mind.
    pub fn admit_emergency(id: PatientId, name: NonEmptyText, arrival_time: DateTime<Utc>) -> Self {
        Self {
            id,
            name,
            severity: Severity::EMERGENCY,
            status: PatientStatus::Emergency,
            arrival_time,
            treated_time: None,
        }
    }

    /// Rebuilds a patient from its individual fields, checking the lifecycle invariants.
    ///
    /// Used when loading stored records and when seeding sample data.
    ///
    /// # Errors
    ///
    /// Returns [`PatientError::InvalidRecord`] if:
    /// - `treated_time` is set while `status` is not `Treated`,
    /// - `treated_time` is missing while `status` is `Treated`,
    /// - `treated_time` is earlier than `arrival_time`.
    pub fn from_parts(
        id: PatientId,
        name: NonEmptyText,
        severity: Severity,
        status: PatientStatus,
        arrival_time: DateTime<Utc>,
        treated_time: Option<DateTime<Utc>>,
    ) -> PatientResult<Self> {
        match (status, treated_time) {
            (PatientStatus::Treated, None) => {
                return Err(PatientError::InvalidRecord(format!(
                    "patient {id} is treated but has no treatedTime"
                )));
            }
            (PatientStatus::Treated, Some(treated)) if treated < arrival_time => {
                return Err(PatientError::InvalidRecord(format!(
                    "patient {id} was treated before arriving"
                )));
            }
            (PatientStatus::Waiting | PatientStatus::Emergency, Some(_)) => {
                return Err(PatientError::InvalidRecord(format!(
                    "patient {id} is {status} but has a treatedTime"
                )));
            }
            _ => {}
        }

        Ok(Self {
            id,
            name,
            severity,
            status,
            arrival_time,
            treated_time,
        })
    }

    pub fn id(&self) -> &PatientId {
        &self.id
    }

    pub fn name(&self) -> &NonEmptyText {
        &self.name
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }

    pub fn status(&self) -> PatientStatus {
        self.status
    }

    pub fn arrival_time(&self) -> DateTime<Utc> {
        self.arrival_time
    }

    pub fn treated_time(&self) -> Option<DateTime<Utc>> {
        self.treated_time
    }

    pub fn is_active(&self) -> bool {
        self.status.is_active()
    }

    /// Moves the patient into `Treated`, stamping the treatment time.
    ///
    /// Status and timestamp change together or not at all. A clock reading earlier than the
    /// arrival time is raised to the arrival time so the record stays consistent.
    ///
    /// # Errors
    ///
    /// Returns [`PatientError::AlreadyTreated`] if the patient is already treated; the existing
    /// `treated_time` is left untouched.
    pub fn mark_treated(&mut self, now: DateTime<Utc>) -> PatientResult<()> {
        if !self.is_active() {
            return Err(PatientError::AlreadyTreated(self.id.clone()));
        }
        self.status = PatientStatus::Treated;
        self.treated_time = Some(now.max(self.arrival_time));
        Ok(())
    }

    /// Replaces the severity of a patient who is still in the queue.
    ///
    /// # Errors
    ///
    /// Returns [`PatientError::AlreadyTreated`] if the patient is already treated.
    pub fn revise_severity(&mut self, severity: Severity) -> PatientResult<()> {
        if !self.is_active() {
            return Err(PatientError::AlreadyTreated(self.id.clone()));
        }
        self.severity = severity;
        Ok(())
    }
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredPatient {
    id: PatientId,
    name: NonEmptyText,
    severity: Severity,
    status: PatientStatus,
    arrival_time: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    treated_time: Option<DateTime<Utc>>,
}

impl TryFrom<StoredPatient> for Patient {
    type Error = PatientError;

    fn try_from(stored: StoredPatient) -> Result<Self, Self::Error> {
        Patient::from_parts(
            stored.id,
            stored.name,
            stored.severity,
            stored.status,
            stored.arrival_time,
            stored.treated_time,
        )
    }
}

impl From<Patient> for StoredPatient {
    fn from(patient: Patient) -> Self {
        Self {
            id: patient.id,
            name: patient.name,
            severity: patient.severity,
            status: patient.status,
            arrival_time: patient.arrival_time,
            treated_time: patient.treated_time,
        }
    }
}
