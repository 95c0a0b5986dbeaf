//! JSON handlers for schedules and the `set_options` RPC.

use std::str::FromStr;

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use daywindow_app::ports::{DeviceGateway, ScheduleRepository, UpdatePublisher};
use daywindow_domain::error::{DayWindowError, NotFoundError};
use daywindow_domain::id::ScheduleId;
use daywindow_domain::options::{OptionsPatch, ScheduleOptions};
use daywindow_domain::schedule::Schedule;
use daywindow_domain::state::ScheduleState;

use crate::error::ApiError;
use crate::state::AppState;

/// Request body for creating a schedule.
#[derive(Deserialize)]
pub struct CreateScheduleRequest {
    pub name: String,
    pub targets: Vec<String>,
    pub options: Option<ScheduleOptions>,
}

/// Response body of the `set_options` RPC: the resulting full options map.
#[derive(Serialize, Deserialize)]
pub struct SetOptionsResponse {
    pub ok: bool,
    pub options: ScheduleOptions,
}

/// Possible responses from the list endpoint.
pub enum ListResponse {
    Ok(Json<Vec<Schedule>>),
}

impl IntoResponse for ListResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from the get endpoint.
pub enum GetResponse {
    Ok(Json<Schedule>),
}

impl IntoResponse for GetResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from the create endpoint.
pub enum CreateResponse {
    Created(Json<Schedule>),
}

impl IntoResponse for CreateResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Created(json) => (StatusCode::CREATED, json).into_response(),
        }
    }
}

/// Possible responses from the delete endpoint.
pub enum DeleteResponse {
    NoContent,
}

impl IntoResponse for DeleteResponse {
    fn into_response(self) -> Response {
        match self {
            Self::NoContent => StatusCode::NO_CONTENT.into_response(),
        }
    }
}

/// Parse a path id; an unparsable id behaves like an unknown schedule.
fn parse_id(id: &str) -> Result<ScheduleId, ApiError> {
    ScheduleId::from_str(id).map_err(|_| {
        ApiError::from(DayWindowError::from(NotFoundError {
            entity: "Schedule",
            id: id.to_string(),
        }))
    })
}

/// `GET /api/schedules` — list all schedules.
pub async fn list<R, G, P>(
    State(state): State<AppState<R, G, P>>,
) -> Result<ListResponse, ApiError>
where
    R: ScheduleRepository + Send + Sync + 'static,
    G: DeviceGateway + Send + Sync + 'static,
    P: UpdatePublisher + Send + Sync + 'static,
{
    let schedules = state.schedule_service.list_schedules().await?;
    Ok(ListResponse::Ok(Json(schedules)))
}

/// `GET /api/schedules/{id}` — get a schedule by id.
pub async fn get<R, G, P>(
    State(state): State<AppState<R, G, P>>,
    Path(id): Path<String>,
) -> Result<GetResponse, ApiError>
where
    R: ScheduleRepository + Send + Sync + 'static,
    G: DeviceGateway + Send + Sync + 'static,
    P: UpdatePublisher + Send + Sync + 'static,
{
    let schedule_id = parse_id(&id)?;
    let schedule = state.schedule_service.get_schedule(schedule_id).await?;
    Ok(GetResponse::Ok(Json(schedule)))
}

/// `GET /api/schedules/{id}/state` — the derived state snapshot.
pub async fn state<R, G, P>(
    State(state): State<AppState<R, G, P>>,
    Path(id): Path<String>,
) -> Result<Json<ScheduleState>, ApiError>
where
    R: ScheduleRepository + Send + Sync + 'static,
    G: DeviceGateway + Send + Sync + 'static,
    P: UpdatePublisher + Send + Sync + 'static,
{
    let schedule_id = parse_id(&id)?;
    let snapshot = state.schedule_service.state_of(schedule_id)?;
    Ok(Json(ScheduleState::clone(&snapshot)))
}

/// `POST /api/schedules` — create a new schedule and start its runner.
pub async fn create<R, G, P>(
    State(state): State<AppState<R, G, P>>,
    Json(req): Json<CreateScheduleRequest>,
) -> Result<CreateResponse, ApiError>
where
    R: ScheduleRepository + Send + Sync + 'static,
    G: DeviceGateway + Send + Sync + 'static,
    P: UpdatePublisher + Send + Sync + 'static,
{
    let mut builder = Schedule::builder().name(req.name).targets(req.targets);
    if let Some(options) = req.options {
        builder = builder.options(options);
    }
    let schedule = builder.build()?;

    let created = state.schedule_service.create_schedule(schedule).await?;
    Ok(CreateResponse::Created(Json(created)))
}

/// `POST /api/schedules/{id}/options` — the `set_options` RPC.
///
/// Merges the provided fields into the persisted options, reloads the
/// runner, and responds with the resulting full options map. Unknown ids
/// answer `404 not_found`.
pub async fn set_options<R, G, P>(
    State(state): State<AppState<R, G, P>>,
    Path(id): Path<String>,
    Json(patch): Json<OptionsPatch>,
) -> Result<Json<SetOptionsResponse>, ApiError>
where
    R: ScheduleRepository + Send + Sync + 'static,
    G: DeviceGateway + Send + Sync + 'static,
    P: UpdatePublisher + Send + Sync + 'static,
{
    let schedule_id = parse_id(&id)?;
    let options = state
        .schedule_service
        .set_options(schedule_id, &patch)
        .await?;
    Ok(Json(SetOptionsResponse { ok: true, options }))
}

/// `DELETE /api/schedules/{id}` — stop the runner and remove the schedule.
pub async fn delete<R, G, P>(
    State(state): State<AppState<R, G, P>>,
    Path(id): Path<String>,
) -> Result<DeleteResponse, ApiError>
where
    R: ScheduleRepository + Send + Sync + 'static,
    G: DeviceGateway + Send + Sync + 'static,
    P: UpdatePublisher + Send + Sync + 'static,
{
    let schedule_id = parse_id(&id)?;
    state.schedule_service.remove_schedule(schedule_id).await?;
    Ok(DeleteResponse::NoContent)
}
