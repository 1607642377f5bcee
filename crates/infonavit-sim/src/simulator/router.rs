use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, patch, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::error::Category;
use serde_json::{json, Value};

use super::domain::{PropertyType, SimulationInputs};
use super::repository::{LeadPublisher, SessionId, SessionStore, SessionStoreError};
use super::service::{SimulationService, SimulationServiceError};
use super::session::SessionView;
use super::submission::SubmissionError;

/// Body for `PATCH /fields`; `value` may be a string, number, or boolean.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FieldUpdateRequest {
    pub field: String,
    #[serde(default)]
    pub value: Value,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchParams {
    #[serde(default, alias = "property_type")]
    pub property_type: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    pub session_id: SessionId,
    #[serde(flatten)]
    pub view: SessionView,
}

/// Router builder exposing the simulator over HTTP.
pub fn simulation_router<S, L>(service: Arc<SimulationService<S, L>>) -> Router
where
    S: SessionStore + 'static,
    L: LeadPublisher + 'static,
{
    Router::new()
        .route(
            "/api/v1/simulations/calculate",
            post(calculate_handler::<S, L>),
        )
        .route("/api/v1/simulations", post(create_handler::<S, L>))
        .route(
            "/api/v1/simulations/:session_id",
            get(session_handler::<S, L>),
        )
        .route(
            "/api/v1/simulations/:session_id/fields",
            patch(field_handler::<S, L>),
        )
        .route(
            "/api/v1/simulations/:session_id/advance",
            post(advance_handler::<S, L>),
        )
        .route(
            "/api/v1/simulations/:session_id/retreat",
            post(retreat_handler::<S, L>),
        )
        .route(
            "/api/v1/simulations/:session_id/search",
            get(search_handler::<S, L>),
        )
        .route(
            "/api/v1/simulations/:session_id/submit",
            post(submit_handler::<S, L>),
        )
        .with_state(service)
}

pub(crate) async fn calculate_handler<S, L>(
    State(service): State<Arc<SimulationService<S, L>>>,
    Json(inputs): Json<SimulationInputs>,
) -> Response
where
    S: SessionStore + 'static,
    L: LeadPublisher + 'static,
{
    let results = service.calculate(&inputs);
    (StatusCode::OK, Json(results)).into_response()
}

/// An empty body opens a blank session; anything else must be valid `SimulationInputs`.
pub(crate) async fn create_handler<S, L>(
    State(service): State<Arc<SimulationService<S, L>>>,
    body: Bytes,
) -> Response
where
    S: SessionStore + 'static,
    L: LeadPublisher + 'static,
{
    let inputs = match initial_inputs(&body) {
        Ok(inputs) => inputs,
        Err(rejection) => return rejection,
    };

    match service.create(inputs) {
        Ok((session_id, view)) => (
            StatusCode::CREATED,
            Json(SessionResponse { session_id, view }),
        )
            .into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn session_handler<S, L>(
    State(service): State<Arc<SimulationService<S, L>>>,
    Path(session_id): Path<String>,
) -> Response
where
    S: SessionStore + 'static,
    L: LeadPublisher + 'static,
{
    let id = SessionId(session_id);
    session_response(service.get(&id), id)
}

pub(crate) async fn field_handler<S, L>(
    State(service): State<Arc<SimulationService<S, L>>>,
    Path(session_id): Path<String>,
    Json(request): Json<FieldUpdateRequest>,
) -> Response
where
    S: SessionStore + 'static,
    L: LeadPublisher + 'static,
{
    let id = SessionId(session_id);
    let raw = raw_field_value(&request.value);
    session_response(service.set_field(&id, &request.field, &raw), id)
}

pub(crate) async fn advance_handler<S, L>(
    State(service): State<Arc<SimulationService<S, L>>>,
    Path(session_id): Path<String>,
) -> Response
where
    S: SessionStore + 'static,
    L: LeadPublisher + 'static,
{
    let id = SessionId(session_id);
    session_response(service.advance(&id), id)
}

pub(crate) async fn retreat_handler<S, L>(
    State(service): State<Arc<SimulationService<S, L>>>,
    Path(session_id): Path<String>,
) -> Response
where
    S: SessionStore + 'static,
    L: LeadPublisher + 'static,
{
    let id = SessionId(session_id);
    session_response(service.retreat(&id), id)
}

pub(crate) async fn search_handler<S, L>(
    State(service): State<Arc<SimulationService<S, L>>>,
    Path(session_id): Path<String>,
    Query(params): Query<SearchParams>,
) -> Response
where
    S: SessionStore + 'static,
    L: LeadPublisher + 'static,
{
    let property_type = match params.property_type.as_deref() {
        None => None,
        Some(raw) => match PropertyType::parse(raw) {
            Some(parsed) => Some(parsed),
            None => {
                let payload = json!({
                    "error": format!("unknown property type '{raw}'"),
                });
                return (StatusCode::BAD_REQUEST, Json(payload)).into_response();
            }
        },
    };

    match service.search(&SessionId(session_id), property_type) {
        Ok(query) => (StatusCode::OK, Json(query)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn submit_handler<S, L>(
    State(service): State<Arc<SimulationService<S, L>>>,
    Path(session_id): Path<String>,
) -> Response
where
    S: SessionStore + 'static,
    L: LeadPublisher + 'static,
{
    match service.submit(&SessionId(session_id)) {
        Ok(record) => (StatusCode::ACCEPTED, Json(record)).into_response(),
        Err(err) => error_response(err),
    }
}

fn initial_inputs(body: &[u8]) -> Result<Option<SimulationInputs>, Response> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(None);
    }

    serde_json::from_slice(body).map(Some).map_err(|err| {
        let status = match err.classify() {
            Category::Data => StatusCode::UNPROCESSABLE_ENTITY,
            Category::Io | Category::Syntax | Category::Eof => StatusCode::BAD_REQUEST,
        };
        let payload = json!({ "error": format!("invalid simulation inputs: {err}") });
        (status, Json(payload)).into_response()
    })
}

fn session_response(
    result: Result<SessionView, SimulationServiceError>,
    session_id: SessionId,
) -> Response {
    match result {
        Ok(view) => (StatusCode::OK, Json(SessionResponse { session_id, view })).into_response(),
        Err(err) => error_response(err),
    }
}

fn error_response(err: SimulationServiceError) -> Response {
    match err {
        SimulationServiceError::Field(error) => {
            let payload = json!({ "error": error.to_string() });
            (StatusCode::UNPROCESSABLE_ENTITY, Json(payload)).into_response()
        }
        SimulationServiceError::Store(SessionStoreError::NotFound) => {
            let payload = json!({ "error": "simulation session not found" });
            (StatusCode::NOT_FOUND, Json(payload)).into_response()
        }
        SimulationServiceError::Store(error @ SessionStoreError::Full { .. }) => {
            let payload = json!({ "error": error.to_string() });
            (StatusCode::SERVICE_UNAVAILABLE, Json(payload)).into_response()
        }
        SimulationServiceError::Submission(SubmissionError::Incomplete(issues)) => {
            let messages: Vec<&'static str> = issues.iter().map(|issue| issue.message()).collect();
            let payload = json!({
                "error": "submission incomplete",
                "issues": issues,
                "messages": messages,
            });
            (StatusCode::UNPROCESSABLE_ENTITY, Json(payload)).into_response()
        }
        other => {
            let payload = json!({ "error": other.to_string() });
            (StatusCode::INTERNAL_SERVER_ERROR, Json(payload)).into_response()
        }
    }
}

fn raw_field_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(text) => text.clone(),
        Value::Bool(flag) => flag.to_string(),
        Value::Number(number) => number.to_string(),
        other => other.to_string(),
    }
}
