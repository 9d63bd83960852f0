use crate::patient::PatientId;

#[derive(Debug, thiserror::Error)]
pub enum PatientError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("invalid name: {0}")]
    InvalidName(#[from] er_types::TextError),
    #[error("invalid severity: {0}")]
    InvalidSeverity(#[from] er_types::SeverityError),
    #[error("invalid patient id: {0}")]
    InvalidId(#[from] er_uuid::UuidError),

    #[error("patient not found: {0}")]
    NotFound(PatientId),
    #[error("patient {0} has already been treated")]
    AlreadyTreated(PatientId),

    #[error("patient id already in use: {0}")]
    DuplicateId(PatientId),
    #[error("failed to allocate a unique patient id after {0} attempts")]
    IdAllocation(usize),
    #[error("next patient kept being taken by concurrent treatment after {0} attempts")]
    TreatmentContention(usize),
    #[error("invalid patient record: {0}")]
    InvalidRecord(String),
    #[error("failed to create storage directory: {0}")]
    StorageDirCreation(std::io::Error),
    #[error("failed to write patient file: {0}")]
    FileWrite(std::io::Error),
    #[error("failed to read patient file: {0}")]
    FileRead(std::io::Error),
    #[error("failed to delete patient record: {0}")]
    FileDelete(std::io::Error),
    #[error("failed to serialize YAML: {0}")]
    YamlSerialization(serde_yaml::Error),
    #[error("failed to deserialize YAML: {0}")]
    YamlDeserialization(serde_yaml::Error),
    #[error("patient store lock poisoned")]
    LockPoisoned,
}

/// Coarse classification of [`PatientError`] used by the API surfaces.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PatientErrorKind {
    /// Malformed input; nothing was changed.
    Validation,
    /// The identifier does not resolve to a record.
    NotFound,
    /// The record is already `Treated` and the operation would alter a terminal record.
    AlreadyTreated,
    /// The underlying store failed or is unusable.
    Store,
}

impl PatientError {
    pub fn kind(&self) -> PatientErrorKind {
        match self {
            PatientError::InvalidInput(_)
            | PatientError::InvalidName(_)
            | PatientError::InvalidSeverity(_)
            | PatientError::InvalidId(_) => PatientErrorKind::Validation,
            PatientError::NotFound(_) => PatientErrorKind::NotFound,
            PatientError::AlreadyTreated(_) => PatientErrorKind::AlreadyTreated,
            PatientError::DuplicateId(_)
            | PatientError::IdAllocation(_)
            | PatientError::TreatmentContention(_)
            | PatientError::InvalidRecord(_)
            | PatientError::StorageDirCreation(_)
            | PatientError::FileWrite(_)
            | PatientError::FileRead(_)
            | PatientError::FileDelete(_)
            | PatientError::YamlSerialization(_)
            | PatientError::YamlDeserialization(_)
            | PatientError::LockPoisoned => PatientErrorKind::Store,
        }
    }
}

pub type PatientResult<T> = std::result::Result<T, PatientError>;
