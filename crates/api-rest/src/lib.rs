//! # API REST
//!
//! REST API for the ER tracker.
//!
//! Handles:
//! - HTTP endpoints with axum under `/api`
//! - OpenAPI/Swagger documentation
//! - REST-specific concerns (JSON bodies, status codes, CORS)
//!
//! Every handler is a thin adapter over [`TriageService`]. Uses `api-shared` for wire types.

#![warn(rust_2018_idioms)]

use api_shared::{
    AdmitEmergencyReq, AdmitPatientReq, ErrorRes, HealthRes, HealthService, MessageRes,
    PatientRes, ReviseSeverityReq, SearchQuery, StatsRes, TestRes,
};
use axum::{
    extract::{rejection::JsonRejection, FromRequest, Path as AxumPath, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post, put},
    Router,
};
use chrono::{DateTime, SecondsFormat, Utc};
use er_core::{Patient, PatientError, PatientErrorKind, PatientStats, TriageService};
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Application state shared by all handlers.
#[derive(Clone)]
pub struct AppState {
    triage: TriageService,
}

impl AppState {
    pub fn new(triage: TriageService) -> Self {
        Self { triage }
    }
}

type ApiError = (StatusCode, Json<ErrorRes>);
type ApiResult<T> = Result<Json<T>, ApiError>;

/// JSON request body whose rejections use the `{"error": ...}` shape with status 400.
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(BodyRejection))]
struct JsonBody<T>(T);

struct BodyRejection(ApiError);

impl From<JsonRejection> for BodyRejection {
    fn from(rejection: JsonRejection) -> Self {
        Self(error_body(StatusCode::BAD_REQUEST, rejection.body_text()))
    }
}

impl IntoResponse for BodyRejection {
    fn into_response(self) -> Response {
        self.0.into_response()
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health,
        api_test,
        list_all,
        list_active,
        list_treated,
        admit_patient,
        get_patient,
        revise_severity,
        delete_patient,
        treat_patient,
        treat_next,
        admit_emergency,
        list_emergency,
        list_waiting,
        next_patient,
        search,
        stats,
    ),
    components(schemas(
        HealthRes,
        TestRes,
        PatientRes,
        AdmitPatientReq,
        AdmitEmergencyReq,
        ReviseSeverityReq,
        StatsRes,
        ErrorRes,
        MessageRes,
    ))
)]
pub struct ApiDoc;

/// Builds the REST application: API routes, Swagger UI and permissive CORS.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/test", get(api_test))
        .route("/api/patients", get(list_all).post(admit_patient))
        .route("/api/patients/all", get(list_all))
        .route("/api/patients/active", get(list_active))
        .route("/api/patients/treated", get(list_treated))
        .route(
            "/api/patients/:id",
            get(get_patient).put(revise_severity).delete(delete_patient),
        )
        .route("/api/patients/:id/treat", put(treat_patient))
        .route("/api/treat", post(treat_next))
        .route("/api/emergency", get(list_emergency).post(admit_emergency))
        .route("/api/waiting", get(list_waiting))
        .route("/api/next", get(next_patient))
        .route("/api/search", get(search))
        .route("/api/stats", get(stats))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Binds `addr` and serves [`router`] until the server stops.
///
/// # Errors
///
/// Returns an error if the address cannot be bound or the server fails while running.
pub async fn serve(addr: &str, state: AppState) -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("++ ER REST API listening on {}", listener.local_addr()?);
    axum::serve(listener, router(state)).await?;
    Ok(())
}

fn timestamp(t: DateTime<Utc>) -> String {
    t.to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn patient_res(patient: &Patient) -> PatientRes {
    PatientRes {
        id: patient.id().to_string(),
        name: patient.name().to_string(),
        severity: patient.severity().value(),
        status: patient.status().as_str().to_string(),
        arrival_time: timestamp(patient.arrival_time()),
        treated_time: patient.treated_time().map(timestamp),
    }
}

fn patient_list(patients: Vec<Patient>) -> Json<Vec<PatientRes>> {
    Json(patients.iter().map(patient_res).collect())
}

fn stats_res(stats: PatientStats) -> StatsRes {
    StatsRes {
        total: stats.total,
        waiting: stats.waiting,
        emergency: stats.emergency,
        treated: stats.treated,
        active: stats.active,
        average_severity: stats.average_severity,
    }
}

fn error_body(status: StatusCode, message: impl Into<String>) -> ApiError {
    (
        status,
        Json(ErrorRes {
            error: message.into(),
        }),
    )
}

/// Maps a core error onto an HTTP status. Store failures are logged and not echoed back.
fn api_error(context: &str, e: PatientError) -> ApiError {
    match e.kind() {
        PatientErrorKind::Validation => error_body(StatusCode::BAD_REQUEST, e.to_string()),
        PatientErrorKind::NotFound => error_body(StatusCode::NOT_FOUND, "Patient not found"),
        PatientErrorKind::AlreadyTreated => error_body(StatusCode::CONFLICT, e.to_string()),
        PatientErrorKind::Store => {
            tracing::error!("{} error: {:?}", context, e);
            error_body(StatusCode::INTERNAL_SERVER_ERROR, "Internal error")
        }
    }
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Health check response", body = HealthRes)
    )
)]
#[axum::debug_handler]
async fn health(State(_state): State<AppState>) -> Json<HealthRes> {
    Json(HealthService::check_health())
}

#[utoipa::path(
    get,
    path = "/api/test",
    responses(
        (status = 200, description = "Backend liveness check", body = TestRes)
    )
)]
#[axum::debug_handler]
async fn api_test(State(_state): State<AppState>) -> Json<TestRes> {
    Json(HealthService::backend_status(timestamp(Utc::now())))
}

#[utoipa::path(
    get,
    path = "/api/patients/all",
    responses(
        (status = 200, description = "Active patients in treatment order, then treated patients newest first", body = [PatientRes]),
        (status = 500, description = "Internal server error", body = ErrorRes)
    )
)]
/// Lists every patient. Also served at `GET /api/patients`.
#[axum::debug_handler]
async fn list_all(State(state): State<AppState>) -> ApiResult<Vec<PatientRes>> {
    state
        .triage
        .list_all()
        .map(patient_list)
        .map_err(|e| api_error("List all patients", e))
}

#[utoipa::path(
    get,
    path = "/api/patients/active",
    responses(
        (status = 200, description = "Waiting and emergency patients in treatment order", body = [PatientRes]),
        (status = 500, description = "Internal server error", body = ErrorRes)
    )
)]
#[axum::debug_handler]
async fn list_active(State(state): State<AppState>) -> ApiResult<Vec<PatientRes>> {
    state
        .triage
        .list_active()
        .map(patient_list)
        .map_err(|e| api_error("List active patients", e))
}

#[utoipa::path(
    get,
    path = "/api/patients/treated",
    responses(
        (status = 200, description = "Treated patients, most recent first", body = [PatientRes]),
        (status = 500, description = "Internal server error", body = ErrorRes)
    )
)]
#[axum::debug_handler]
async fn list_treated(State(state): State<AppState>) -> ApiResult<Vec<PatientRes>> {
    state
        .triage
        .list_treated()
        .map(patient_list)
        .map_err(|e| api_error("List treated patients", e))
}

#[utoipa::path(
    post,
    path = "/api/patients",
    request_body = AdmitPatientReq,
    responses(
        (status = 200, description = "Patient admitted", body = PatientRes),
        (status = 400, description = "Invalid name or severity", body = ErrorRes),
        (status = 500, description = "Internal server error", body = ErrorRes)
    )
)]
/// Admits a patient through the regular route.
#[axum::debug_handler]
async fn admit_patient(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<AdmitPatientReq>,
) -> ApiResult<PatientRes> {
    state
        .triage
        .admit_regular(&req.name, req.severity)
        .map(|p| Json(patient_res(&p)))
        .map_err(|e| api_error("Admit patient", e))
}

#[utoipa::path(
    get,
    path = "/api/patients/{id}",
    params(("id" = String, Path, description = "Patient identifier")),
    responses(
        (status = 200, description = "Patient record", body = PatientRes),
        (status = 400, description = "Malformed identifier", body = ErrorRes),
        (status = 404, description = "Patient not found", body = ErrorRes)
    )
)]
#[axum::debug_handler]
async fn get_patient(
    State(state): State<AppState>,
    AxumPath(id): AxumPath<String>,
) -> ApiResult<PatientRes> {
    state
        .triage
        .get_patient(&id)
        .map(|p| Json(patient_res(&p)))
        .map_err(|e| api_error("Get patient", e))
}

#[utoipa::path(
    put,
    path = "/api/patients/{id}",
    params(("id" = String, Path, description = "Patient identifier")),
    request_body = ReviseSeverityReq,
    responses(
        (status = 200, description = "Severity revised", body = PatientRes),
        (status = 400, description = "Invalid severity or identifier", body = ErrorRes),
        (status = 404, description = "Patient not found", body = ErrorRes),
        (status = 409, description = "Patient already treated", body = ErrorRes)
    )
)]
/// Revises the severity of a waiting or emergency patient.
#[axum::debug_handler]
async fn revise_severity(
    State(state): State<AppState>,
    AxumPath(id): AxumPath<String>,
    JsonBody(req): JsonBody<ReviseSeverityReq>,
) -> ApiResult<PatientRes> {
    state
        .triage
        .revise_severity(&id, req.severity)
        .map(|p| Json(patient_res(&p)))
        .map_err(|e| api_error("Revise severity", e))
}

#[utoipa::path(
    delete,
    path = "/api/patients/{id}",
    params(("id" = String, Path, description = "Patient identifier")),
    responses(
        (status = 200, description = "Patient deleted", body = MessageRes),
        (status = 400, description = "Malformed identifier", body = ErrorRes),
        (status = 404, description = "Patient not found", body = ErrorRes)
    )
)]
#[axum::debug_handler]
async fn delete_patient(
    State(state): State<AppState>,
    AxumPath(id): AxumPath<String>,
) -> ApiResult<MessageRes> {
    state
        .triage
        .delete_by_id(&id)
        .map(|()| {
            Json(MessageRes {
                message: "Patient deleted".into(),
            })
        })
        .map_err(|e| api_error("Delete patient", e))
}

#[utoipa::path(
    put,
    path = "/api/patients/{id}/treat",
    params(("id" = String, Path, description = "Patient identifier")),
    responses(
        (status = 200, description = "Patient treated", body = PatientRes),
        (status = 400, description = "Malformed identifier", body = ErrorRes),
        (status = 404, description = "Patient not found", body = ErrorRes),
        (status = 409, description = "Patient already treated", body = ErrorRes)
    )
)]
#[axum::debug_handler]
async fn treat_patient(
    State(state): State<AppState>,
    AxumPath(id): AxumPath<String>,
) -> ApiResult<PatientRes> {
    state
        .triage
        .treat_by_id(&id)
        .map(|p| Json(patient_res(&p)))
        .map_err(|e| api_error("Treat patient", e))
}

#[utoipa::path(
    post,
    path = "/api/treat",
    responses(
        (status = 200, description = "Highest-priority patient treated", body = PatientRes),
        (status = 404, description = "No patients waiting for treatment", body = ErrorRes),
        (status = 500, description = "Internal server error", body = ErrorRes)
    )
)]
/// Treats the patient at the head of the active queue.
#[axum::debug_handler]
async fn treat_next(State(state): State<AppState>) -> ApiResult<PatientRes> {
    match state.triage.auto_treat_next() {
        Ok(Some(p)) => Ok(Json(patient_res(&p))),
        Ok(None) => Err(error_body(
            StatusCode::NOT_FOUND,
            "No patients waiting for treatment",
        )),
        Err(e) => Err(api_error("Treat next patient", e)),
    }
}

#[utoipa::path(
    post,
    path = "/api/emergency",
    request_body = AdmitEmergencyReq,
    responses(
        (status = 200, description = "Emergency patient admitted at severity 10", body = PatientRes),
        (status = 400, description = "Invalid name", body = ErrorRes),
        (status = 500, description = "Internal server error", body = ErrorRes)
    )
)]
#[axum::debug_handler]
async fn admit_emergency(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<AdmitEmergencyReq>,
) -> ApiResult<PatientRes> {
    state
        .triage
        .admit_emergency(&req.name)
        .map(|p| Json(patient_res(&p)))
        .map_err(|e| api_error("Admit emergency patient", e))
}

#[utoipa::path(
    get,
    path = "/api/emergency",
    responses(
        (status = 200, description = "Emergency patients still waiting", body = [PatientRes]),
        (status = 500, description = "Internal server error", body = ErrorRes)
    )
)]
#[axum::debug_handler]
async fn list_emergency(State(state): State<AppState>) -> ApiResult<Vec<PatientRes>> {
    state
        .triage
        .list_emergency_only()
        .map(patient_list)
        .map_err(|e| api_error("List emergency patients", e))
}

#[utoipa::path(
    get,
    path = "/api/waiting",
    responses(
        (status = 200, description = "Regular patients still waiting", body = [PatientRes]),
        (status = 500, description = "Internal server error", body = ErrorRes)
    )
)]
#[axum::debug_handler]
async fn list_waiting(State(state): State<AppState>) -> ApiResult<Vec<PatientRes>> {
    state
        .triage
        .list_waiting_only()
        .map(patient_list)
        .map_err(|e| api_error("List waiting patients", e))
}

#[utoipa::path(
    get,
    path = "/api/next",
    responses(
        (status = 200, description = "Next patient to treat, or an empty object when nobody is waiting", body = PatientRes),
        (status = 500, description = "Internal server error", body = ErrorRes)
    )
)]
#[axum::debug_handler]
async fn next_patient(State(state): State<AppState>) -> Result<Response, ApiError> {
    match state.triage.get_next() {
        Ok(Some(p)) => Ok(Json(patient_res(&p)).into_response()),
        Ok(None) => Ok(Json(serde_json::json!({})).into_response()),
        Err(e) => Err(api_error("Get next patient", e)),
    }
}

#[utoipa::path(
    get,
    path = "/api/search",
    params(SearchQuery),
    responses(
        (status = 200, description = "Patients whose name contains the term", body = [PatientRes]),
        (status = 400, description = "Search term too long", body = ErrorRes),
        (status = 500, description = "Internal server error", body = ErrorRes)
    )
)]
#[axum::debug_handler]
async fn search(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> ApiResult<Vec<PatientRes>> {
    state
        .triage
        .search_by_name(&query.name)
        .map(patient_list)
        .map_err(|e| api_error("Search patients", e))
}

#[utoipa::path(
    get,
    path = "/api/stats",
    responses(
        (status = 200, description = "Department statistics", body = StatsRes),
        (status = 500, description = "Internal server error", body = ErrorRes)
    )
)]
#[axum::debug_handler]
async fn stats(State(state): State<AppState>) -> ApiResult<StatsRes> {
    state
        .triage
        .get_statistics()
        .map(|s| Json(stats_res(s)))
        .map_err(|e| api_error("Get statistics", e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Method, Request};
    use er_core::InMemoryStore;
    use http_body_util::BodyExt;
    use serde_json::{json, Value};
    use std::sync::Arc;
    use tower::ServiceExt;

    fn app() -> (Router, TriageService) {
        let triage = TriageService::new(Arc::new(InMemoryStore::new()));
        (router(AppState::new(triage.clone())), triage)
    }

    async fn call(app: Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let mut req = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(v) => {
                req = req.header("content-type", "application/json");
                Body::from(v.to_string())
            }
            None => Body::empty(),
        };

        let res = app.oneshot(req.body(body).unwrap()).await.unwrap();
        let status = res.status();
        let bytes = res.into_body().collect().await.unwrap().to_bytes();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }

    #[tokio::test]
    async fn test_health_and_backend_status() {
        let (app, _) = app();

        let (status, body) = call(app.clone(), Method::GET, "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["ok"], true);

        let (status, body) = call(app, Method::GET, "/api/test", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn test_admit_and_fetch_patient() {
        let (app, _) = app();

        let (status, created) = call(
            app.clone(),
            Method::POST,
            "/api/patients",
            Some(json!({"name": "John Doe", "severity": 4})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(created["status"], "WAITING");
        assert_eq!(created["severity"], 4);
        assert!(created.get("treatedTime").is_none());

        let uri = format!("/api/patients/{}", created["id"].as_str().unwrap());
        let (status, fetched) = call(app, Method::GET, &uri, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(fetched, created);
    }

    #[tokio::test]
    async fn test_admit_rejects_bad_input() {
        let (app, triage) = app();

        let (status, body) = call(
            app.clone(),
            Method::POST,
            "/api/patients",
            Some(json!({"name": "John Doe", "severity": 11})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().contains("severity"));

        let (status, _) = call(
            app,
            Method::POST,
            "/api/patients",
            Some(json!({"name": "  ", "severity": 3})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(triage.get_statistics().unwrap().total, 0);
    }

    #[tokio::test]
    async fn test_emergency_admission_ignores_body_severity() {
        let (app, _) = app();

        let (status, body) = call(
            app.clone(),
            Method::POST,
            "/api/emergency",
            Some(json!({"name": "Jane Smith", "severity": 2})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["severity"], 10);
        assert_eq!(body["status"], "EMERGENCY");

        let (_, list) = call(app, Method::GET, "/api/emergency", None).await;
        assert_eq!(list.as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_treat_next_and_empty_queue() {
        let (app, triage) = app();
        triage.admit_regular("John Doe", 3).unwrap();
        let emergency = triage.admit_emergency("Jane Smith").unwrap();

        let (status, treated) = call(app.clone(), Method::POST, "/api/treat", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(treated["id"], emergency.id().to_string());
        assert_eq!(treated["status"], "TREATED");
        assert!(treated["treatedTime"].is_string());

        call(app.clone(), Method::POST, "/api/treat", None).await;
        let (status, body) = call(app.clone(), Method::POST, "/api/treat", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "No patients waiting for treatment");

        let (status, next) = call(app, Method::GET, "/api/next", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(next, json!({}));
    }

    #[tokio::test]
    async fn test_treat_by_id_status_codes() {
        let (app, triage) = app();
        let patient = triage.admit_regular("John Doe", 3).unwrap();
        let uri = format!("/api/patients/{}/treat", patient.id());

        let (status, _) = call(app.clone(), Method::PUT, &uri, None).await;
        assert_eq!(status, StatusCode::OK);

        let (status, _) = call(app.clone(), Method::PUT, &uri, None).await;
        assert_eq!(status, StatusCode::CONFLICT);

        let (status, _) = call(app.clone(), Method::PUT, "/api/patients/nope/treat", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let missing = format!("/api/patients/{}/treat", er_core::PatientId::new());
        let (status, body) = call(app, Method::PUT, &missing, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "Patient not found");
    }

    #[tokio::test]
    async fn test_malformed_bodies_get_json_bad_request() {
        let (app, triage) = app();
        let patient = triage.admit_regular("John Doe", 3).unwrap();
        let uri = format!("/api/patients/{}", patient.id());

        let cases = [
            (Method::POST, "/api/patients".to_string(), json!({"name": "X"})),
            (Method::POST, "/api/patients".to_string(), json!({"name": "X", "severity": "5"})),
            (Method::PUT, uri.clone(), json!({})),
            (Method::POST, "/api/emergency".to_string(), json!({"severity": 2})),
        ];
        for (method, path, body) in cases {
            let (status, res) = call(app.clone(), method, &path, Some(body)).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "{path}");
            assert!(res["error"].is_string(), "{path}");
        }

        assert_eq!(triage.get_patient(&patient.id().to_string()).unwrap(), patient);
        assert_eq!(triage.get_statistics().unwrap().total, 1);
    }

    #[tokio::test]
    async fn test_body_without_content_type_is_bad_request() {
        let (app, _) = app();
        let req = Request::builder()
            .method(Method::POST)
            .uri("/api/emergency")
            .body(Body::from(r#"{"name":"Jane Smith"}"#))
            .unwrap();

        let res = app.oneshot(req).await.unwrap();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let bytes = res.into_body().collect().await.unwrap().to_bytes();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert!(body["error"].is_string());
    }

    #[tokio::test]
    async fn test_revise_and_delete() {
        let (app, triage) = app();
        let patient = triage.admit_regular("John Doe", 3).unwrap();
        let uri = format!("/api/patients/{}", patient.id());

        let (status, body) = call(
            app.clone(),
            Method::PUT,
            &uri,
            Some(json!({"severity": 8})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["severity"], 8);

        let (status, _) = call(app.clone(), Method::PUT, &uri, Some(json!({"severity": 0}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, body) = call(app.clone(), Method::DELETE, &uri, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Patient deleted");

        let (status, _) = call(app, Method::GET, &uri, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_list_views_search_and_stats() {
        let (app, triage) = app();
        triage.seed_sample_data().unwrap();

        let (_, active) = call(app.clone(), Method::GET, "/api/patients/active", None).await;
        let names: Vec<&str> = active
            .as_array()
            .unwrap()
            .iter()
            .map(|p| p["name"].as_str().unwrap())
            .collect();
        assert_eq!(names, vec!["Emergency Patient 1", "Jane Smith", "John Doe"]);

        let (_, all) = call(app.clone(), Method::GET, "/api/patients", None).await;
        assert_eq!(all.as_array().unwrap().len(), 4);
        assert_eq!(all[3]["status"], "TREATED");

        let (_, treated) = call(app.clone(), Method::GET, "/api/patients/treated", None).await;
        assert_eq!(treated.as_array().unwrap().len(), 1);

        let (_, waiting) = call(app.clone(), Method::GET, "/api/waiting", None).await;
        assert_eq!(waiting[0]["name"], "Jane Smith");

        let (_, found) = call(app.clone(), Method::GET, "/api/search?name=JANE", None).await;
        assert_eq!(found.as_array().unwrap().len(), 1);

        let (_, stats) = call(app, Method::GET, "/api/stats", None).await;
        assert_eq!(stats["total"], 4);
        assert_eq!(stats["active"], 3);
        assert_eq!(stats["treated"], 1);
        assert_eq!(stats["averageSeverity"], 6.0);
    }
}
