//! # ER Core
//!
//! Core business logic for the emergency-room patient tracker.
//!
//! This crate owns the patient model, the treatment-priority policy and patient storage:
//! - Admission (regular and emergency), treatment and severity revision
//! - Priority-ordered queue views and department statistics
//! - In-memory and sharded YAML file stores behind [`PatientStore`]
//!
//! **No API concerns**: HTTP servers, request DTOs and command-line parsing belong in
//! `api-rest`, `api-shared` and `cli`.

pub mod config;
pub mod constants;
pub mod error;
pub mod patient;
pub mod priority;
pub mod repositories;
pub mod triage;
pub mod validation;
pub mod views;

pub use config::{CoreConfig, StoreBackend};
pub use constants::{DEFAULT_PATIENT_DATA_DIR, DEFAULT_REST_ADDR};
pub use error::{PatientError, PatientErrorKind, PatientResult};
pub use patient::{Patient, PatientId, PatientStatus};
pub use repositories::{files::FileStore, memory::InMemoryStore, PatientStore, StatusFilter};
pub use triage::TriageService;
pub use views::PatientStats;

pub use er_types::{NonEmptyText, Severity};
