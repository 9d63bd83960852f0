use crate::{HealthRes, TestRes};

/// Health reporting shared by every API surface.
#[derive(Clone)]
pub struct HealthService;

impl HealthService {
    pub fn check_health() -> HealthRes {
        HealthRes {
            ok: true,
            message: "ER tracker is alive".into(),
        }
    }

    /// Body for the `/api/test` check. `now` is supplied by the caller as RFC 3339 so this
    /// crate stays free of clock handling.
    pub fn backend_status(now: String) -> TestRes {
        TestRes {
            status: "ok".into(),
            time: now,
            message: "Backend is working!".into(),
        }
    }
}
