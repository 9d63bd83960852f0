//! Validated primitive types shared across the ER tracking crates.
//!
//! Values of these types can only be constructed through checked constructors, so once a
//! `NonEmptyText` or `Severity` exists the caller can rely on its invariant.

/// Errors that can occur when creating validated text types.
#[derive(Debug, thiserror::Error)]
pub enum TextError {
    /// The input text was empty or contained only whitespace
    #[error("Text cannot be empty")]
    Empty,
}

/// Errors that can occur when creating a [`Severity`].
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SeverityError {
    /// The score fell outside the clinical scale.
    #[error("severity must be between {min} and {max}, got {value}", min = Severity::MIN, max = Severity::MAX)]
    OutOfRange { value: i64 },
}

/// A string type that guarantees non-empty content.
///
/// This type wraps a `String` and ensures it contains at least one non-whitespace character.
/// The input is automatically trimmed of leading and trailing whitespace during construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NonEmptyText(String);

impl NonEmptyText {
    /// Creates a new `NonEmptyText` from the given input.
    ///
    /// The input is trimmed of leading and trailing whitespace. If the trimmed
    /// result is empty, an error is returned.
    ///
    /// # Arguments
    ///
    /// * `input` - Any type that can be converted to a string reference
    ///
    /// # Returns
    ///
    /// Returns `Ok(NonEmptyText)` if the trimmed input is non-empty,
    /// or `Err(TextError::Empty)` if it's empty or contains only whitespace.
    pub fn new(input: impl AsRef<str>) -> Result<Self, TextError> {
        let trimmed = input.as_ref().trim();
        if trimmed.is_empty() {
            return Err(TextError::Empty);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the inner string as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for NonEmptyText {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for NonEmptyText {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl serde::Serialize for NonEmptyText {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> serde::Deserialize<'de> for NonEmptyText {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        NonEmptyText::new(&s).map_err(serde::de::Error::custom)
    }
}

/// Clinical urgency score on the 1 to 10 scale used at triage.
///
/// Higher is more urgent. Emergency admissions are always scored at [`Severity::EMERGENCY`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Severity(u8);

impl Severity {
    /// Lowest score accepted.
    pub const MIN: u8 = 1;

    /// Highest score accepted.
    pub const MAX: u8 = 10;

    /// Fixed score assigned to emergency admissions.
    pub const EMERGENCY: Severity = Severity(Self::MAX);

    /// Creates a `Severity` from an untrusted integer.
    ///
    /// The value is never clamped: anything outside `MIN..=MAX` is rejected so that callers
    /// see the mistake rather than a silently altered score.
    ///
    /// # Errors
    ///
    /// Returns [`SeverityError::OutOfRange`] if `value` is not in `1..=10`.
    pub fn new(value: i64) -> Result<Self, SeverityError> {
        if (i64::from(Self::MIN)..=i64::from(Self::MAX)).contains(&value) {
            Ok(Self(value as u8))
        } else {
            Err(SeverityError::OutOfRange { value })
        }
    }

    /// Returns the numeric score.
    pub fn value(self) -> u8 {
        self.0
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl serde::Serialize for Severity {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_u8(self.0)
    }
}

impl<'de> serde::Deserialize<'de> for Severity {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value = i64::deserialize(deserializer)?;
        Severity::new(value).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_empty_text_trims_input() {
        let text = NonEmptyText::new("  Jane Smith  ").unwrap();
        assert_eq!(text.as_str(), "Jane Smith");
    }

    #[test]
    fn test_non_empty_text_rejects_whitespace() {
        assert!(matches!(NonEmptyText::new("   "), Err(TextError::Empty)));
        assert!(matches!(NonEmptyText::new(""), Err(TextError::Empty)));
    }

    #[test]
    fn test_severity_accepts_scale_bounds() {
        assert_eq!(Severity::new(1).unwrap().value(), 1);
        assert_eq!(Severity::new(10).unwrap().value(), 10);
        assert_eq!(Severity::EMERGENCY.value(), 10);
    }

    #[test]
    fn test_severity_rejects_out_of_range() {
        assert_eq!(
            Severity::new(0),
            Err(SeverityError::OutOfRange { value: 0 })
        );
        assert_eq!(
            Severity::new(11),
            Err(SeverityError::OutOfRange { value: 11 })
        );
        assert!(Severity::new(-3).is_err());
        assert!(Severity::new(i64::MAX).is_err());
    }

    #[test]
    fn test_severity_error_message_names_bounds() {
        let err = Severity::new(11).unwrap_err();
        assert_eq!(err.to_string(), "severity must be between 1 and 10, got 11");
    }

    #[test]
    fn test_severity_deserialize_validates() {
        let ok: Severity = serde_json::from_str("7").unwrap();
        assert_eq!(ok.value(), 7);

        let err = serde_json::from_str::<Severity>("42");
        assert!(err.is_err());
    }
}
