//! Read-only queue views composed from a store snapshot.
//!
//! Each view takes the records returned by a store scan and applies the priority policy from
//! [`crate::priority`]; none of them keep state between calls.

use crate::patient::{Patient, PatientStatus};
use crate::priority::{highest_priority, sort_by_priority, sort_treated};

/// Waiting and emergency patients, in treatment order.
pub fn active_queue(snapshot: Vec<Patient>) -> Vec<Patient> {
    let mut active: Vec<Patient> = snapshot.into_iter().filter(Patient::is_active).collect();
    sort_by_priority(&mut active);
    active
}

/// Treated patients, most recently treated first.
pub fn treated_history(snapshot: Vec<Patient>) -> Vec<Patient> {
    let mut treated: Vec<Patient> = snapshot
        .into_iter()
        .filter(|p| p.status() == PatientStatus::Treated)
        .collect();
    sort_treated(&mut treated);
    treated
}

/// The active queue followed by the treated history.
///
/// Treated patients always come after active ones, whatever their timestamps.
pub fn all_patients(snapshot: Vec<Patient>) -> Vec<Patient> {
    let (mut active, mut treated): (Vec<Patient>, Vec<Patient>) =
        snapshot.into_iter().partition(Patient::is_active);
    sort_by_priority(&mut active);
    sort_treated(&mut treated);
    active.extend(treated);
    active
}

/// Patients with exactly `status`, in treatment order.
///
/// Used for the waiting-only and emergency-only views.
pub fn with_status(snapshot: Vec<Patient>, status: PatientStatus) -> Vec<Patient> {
    let mut subset: Vec<Patient> = snapshot
        .into_iter()
        .filter(|p| p.status() == status)
        .collect();
    sort_by_priority(&mut subset);
    subset
}

/// The patient who should be treated next, if anyone is waiting.
pub fn next_patient(snapshot: &[Patient]) -> Option<&Patient> {
    highest_priority(snapshot.iter().filter(|p| p.is_active()))
}

/// Department-wide counts.
#[derive(Clone, Debug, PartialEq)]
pub struct PatientStats {
    pub total: usize,
    pub waiting: usize,
    pub emergency: usize,
    pub treated: usize,
    /// `waiting + emergency`.
    pub active: usize,
    /// Arithmetic mean severity over active patients; `0.0` when nobody is waiting.
    pub average_severity: f64,
}

impl PatientStats {
    pub fn from_snapshot(snapshot: &[Patient]) -> Self {
        let mut waiting = 0;
        let mut emergency = 0;
        let mut treated = 0;
        let mut severity_sum: u64 = 0;

        for patient in snapshot {
            match patient.status() {
                PatientStatus::Waiting => waiting += 1,
                PatientStatus::Emergency => emergency += 1,
                PatientStatus::Treated => treated += 1,
            }
            if patient.is_active() {
                severity_sum += u64::from(patient.severity().value());
            }
        }

        let active = waiting + emergency;
        let average_severity = if active == 0 {
            0.0
        } else {
            severity_sum as f64 / active as f64
        };

        Self {
            total: snapshot.len(),
            waiting,
            emergency,
            treated,
            active,
            average_severity,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::patient::PatientId;
    use chrono::{DateTime, Duration, TimeZone, Utc};
    use er_types::{NonEmptyText, Severity};

    fn at(minutes: i64) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 1, 8, 0, 0).unwrap() + Duration::minutes(minutes)
    }

    fn active(status: PatientStatus, severity: i64, arrived: i64) -> Patient {
        Patient::from_parts(
            PatientId::new(),
            NonEmptyText::new("Active Patient").unwrap(),
            Severity::new(severity).unwrap(),
            status,
            at(arrived),
            None,
        )
        .unwrap()
    }

    fn treated(severity: i64, treated_at: i64) -> Patient {
        Patient::from_parts(
            PatientId::new(),
            NonEmptyText::new("Treated Patient").unwrap(),
            Severity::new(severity).unwrap(),
            PatientStatus::Treated,
            at(-60),
            Some(at(treated_at)),
        )
        .unwrap()
    }

    #[test]
    fn test_all_patients_puts_treated_after_active() {
        // Treated long after the waiting patient arrived, still listed last.
        let late_treated = treated(9, 500);
        let early_treated = treated(2, 100);
        let waiting = active(PatientStatus::Waiting, 1, 0);
        let emergency = active(PatientStatus::Emergency, 10, 10);

        let view = all_patients(vec![
            late_treated.clone(),
            waiting.clone(),
            early_treated.clone(),
            emergency.clone(),
        ]);

        assert_eq!(view, vec![emergency, waiting, late_treated, early_treated]);
    }

    #[test]
    fn test_active_queue_drops_treated() {
        let w = active(PatientStatus::Waiting, 6, 0);
        let view = active_queue(vec![treated(10, 5), w.clone()]);

        assert_eq!(view, vec![w]);
    }

    #[test]
    fn test_filtered_views_equal_filtering_sorted_active() {
        let snapshot = vec![
            active(PatientStatus::Waiting, 3, 0),
            active(PatientStatus::Emergency, 10, 5),
            active(PatientStatus::Waiting, 8, 1),
            active(PatientStatus::Emergency, 10, 2),
            active(PatientStatus::Waiting, 8, 0),
            treated(7, 30),
        ];

        let sorted_active = active_queue(snapshot.clone());
        for status in [PatientStatus::Waiting, PatientStatus::Emergency] {
            let expected: Vec<Patient> = sorted_active
                .iter()
                .filter(|p| p.status() == status)
                .cloned()
                .collect();

            assert_eq!(with_status(snapshot.clone(), status), expected);
        }
    }

    #[test]
    fn test_next_patient_ignores_treated_records() {
        let snapshot = vec![treated(10, 5), active(PatientStatus::Waiting, 2, 0)];
        let next = next_patient(&snapshot).unwrap();

        assert_eq!(next.status(), PatientStatus::Waiting);
        assert!(next_patient(&[treated(3, 1)]).is_none());
    }

    #[test]
    fn test_stats_average_over_active_only() {
        let snapshot = vec![
            active(PatientStatus::Waiting, 4, 0),
            active(PatientStatus::Emergency, 6, 1),
            treated(10, 2),
        ];
        let stats = PatientStats::from_snapshot(&snapshot);

        assert_eq!(stats.total, 3);
        assert_eq!(stats.waiting, 1);
        assert_eq!(stats.emergency, 1);
        assert_eq!(stats.treated, 1);
        assert_eq!(stats.active, 2);
        assert_eq!(stats.average_severity, 5.0);
    }

    #[test]
    fn test_stats_empty_active_set_averages_zero() {
        let stats = PatientStats::from_snapshot(&[treated(8, 1)]);
        assert_eq!(stats.active, 0);
        assert_eq!(stats.average_severity, 0.0);

        let empty = PatientStats::from_snapshot(&[]);
        assert_eq!(empty.total, 0);
        assert_eq!(empty.average_severity, 0.0);
    }
}
