//! Treatment priority policy.
//!
//! [`compare_priority`] is the one ordering used for every queue view and for choosing the next
//! patient to treat. For two patients still in the queue:
//!
//! 1. Emergency admissions come before everyone else, whatever the severities or wait times.
//! 2. Within the same tier, higher severity comes first.
//! 3. Equal tier and severity: earlier arrival comes first.
//! 4. Anything still tied is ordered by identifier, so the result is a strict total order.
//!
//! Identifiers are random, so step 4 is repeatable but says nothing about who was admitted
//! first. Two patients tied on arrival time to the nanosecond are ordered by id, not by the
//! order in which they were stored.
//!
//! Treated patients form their own history view ordered by [`compare_treated`].

use crate::patient::{Patient, PatientStatus};
use std::cmp::Ordering;

fn tier(status: PatientStatus) -> u8 {
    match status {
        PatientStatus::Emergency => 0,
        PatientStatus::Waiting => 1,
        PatientStatus::Treated => 2,
    }
}

/// Orders `a` before `b` (returns `Less`) when `a` should be treated first.
pub fn compare_priority(a: &Patient, b: &Patient) -> Ordering {
    tier(a.status())
        .cmp(&tier(b.status()))
        .then_with(|| b.severity().cmp(&a.severity()))
        .then_with(|| a.arrival_time().cmp(&b.arrival_time()))
        .then_with(|| a.id().cmp(b.id()))
}

/// Most recently treated first.
pub fn compare_treated(a: &Patient, b: &Patient) -> Ordering {
    b.treated_time().cmp(&a.treated_time())
}

pub fn sort_by_priority(patients: &mut [Patient]) {
    patients.sort_by(compare_priority);
}

/// Stable, so records treated at the same instant keep their input order.
pub fn sort_treated(patients: &mut [Patient]) {
    patients.sort_by(compare_treated);
}

/// Picks the patient to treat next from a set of active patients.
///
/// Returns `None` for an empty input.
pub fn highest_priority<'a, I>(patients: I) -> Option<&'a Patient>
where
    I: IntoIterator<Item = &'a Patient>,
{
    patients
        .into_iter()
        .min_by(|a, b| compare_priority(a, b))
}
