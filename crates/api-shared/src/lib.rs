//! # API Shared
//!
//! Wire types and shared services for the ER tracker APIs.
//!
//! Contains:
//! - Request and response bodies (`serde` + `utoipa::ToSchema`), in the camelCase JSON form
//!   existing clients expect
//! - Shared services like `HealthService`
//!
//! These types carry plain strings and numbers only. Validation happens in `er-core`.

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

pub mod health;

pub use health::HealthService;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct HealthRes {
    pub ok: bool,
    pub message: String,
}

/// Liveness body served at `/api/test`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct TestRes {
    pub status: String,
    /// Server time, RFC 3339.
    pub time: String,
    pub message: String,
}

/// A patient record as returned by every endpoint.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PatientRes {
    #[schema(example = "550e8400e29b41d4a716446655440000")]
    pub id: String,
    pub name: String,
    #[schema(minimum = 1, maximum = 10)]
    pub severity: u8,
    /// `WAITING`, `EMERGENCY` or `TREATED`.
    #[schema(example = "WAITING")]
    pub status: String,
    /// RFC 3339.
    pub arrival_time: String,
    /// RFC 3339; absent until the patient has been treated.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub treated_time: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct AdmitPatientReq {
    pub name: String,
    pub severity: i64,
}

/// Emergency admissions always get the top severity. A `severity` field sent by older
/// clients is accepted and ignored.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct AdmitEmergencyReq {
    pub name: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ReviseSeverityReq {
    pub severity: i64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StatsRes {
    pub total: usize,
    pub waiting: usize,
    pub emergency: usize,
    pub treated: usize,
    pub active: usize,
    pub average_severity: f64,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ErrorRes {
    pub error: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct MessageRes {
    pub message: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SearchQuery {
    /// Case-insensitive fragment of the patient name. Empty matches everyone.
    #[serde(default)]
    pub name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_patient_res_uses_camel_case_and_omits_missing_treated_time() {
        let res = PatientRes {
            id: "550e8400e29b41d4a716446655440000".into(),
            name: "John Doe".into(),
            severity: 3,
            status: "WAITING".into(),
            arrival_time: "2026-03-01T08:00:00.000Z".into(),
            treated_time: None,
        };

        let json = serde_json::to_value(&res).unwrap();

        assert_eq!(json["arrivalTime"], "2026-03-01T08:00:00.000Z");
        assert!(json.get("treatedTime").is_none());
    }

    #[test]
    fn test_emergency_request_ignores_severity() {
        let req: AdmitEmergencyReq =
            serde_json::from_str(r#"{"name":"Jane","severity":2}"#).unwrap();
        assert_eq!(req.name, "Jane");
    }

    #[test]
    fn test_stats_res_field_names() {
        let json = serde_json::to_value(StatsRes {
            total: 2,
            waiting: 1,
            emergency: 1,
            treated: 0,
            active: 2,
            average_severity: 6.5,
        })
        .unwrap();
        assert_eq!(json["averageSeverity"], 6.5);
    }
}
