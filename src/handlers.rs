// handlers.rs
//
// Thin adapters from the HTTP surface to the poll service. No
// validation or authorization happens here.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::error::AppError;
use crate::identity::Caller;
use crate::models::{OptionTally, Poll, PollInput, PollView, VoteRequest};
use crate::service::PollService;

pub async fn list_own_polls(
    State(service): State<PollService>,
    caller: Caller,
) -> Result<Json<Vec<Poll>>, AppError> {
    Ok(Json(service.list_own_polls(&caller).await?))
}

pub async fn create_poll(
    State(service): State<PollService>,
    caller: Caller,
    Json(input): Json<PollInput>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let id = service
        .create_poll(&caller, &input.question, &input.options)
        .await?;
    Ok((StatusCode::CREATED, Json(json!({ "id": id }))))
}

pub async fn get_poll(
    State(service): State<PollService>,
    caller: Caller,
    Path(id): Path<Uuid>,
) -> Result<Json<PollView>, AppError> {
    let (poll, can_edit) = service.get_poll(&caller, id).await?;
    Ok(Json(PollView { poll, can_edit }))
}

pub async fn update_poll(
    State(service): State<PollService>,
    caller: Caller,
    Path(id): Path<Uuid>,
    Json(input): Json<PollInput>,
) -> Result<Json<Value>, AppError> {
    service
        .update_poll(&caller, id, &input.question, &input.options)
        .await?;
    Ok(Json(json!({ "status": "poll updated" })))
}

pub async fn delete_poll(
    State(service): State<PollService>,
    caller: Caller,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    service.delete_poll(&caller, id).await?;
    Ok(Json(json!({ "status": "poll deleted" })))
}

pub async fn cast_vote(
    State(service): State<PollService>,
    caller: Caller,
    Path(id): Path<Uuid>,
    Json(vote): Json<VoteRequest>,
) -> Result<Json<Value>, AppError> {
    service.cast_vote(&caller, id, vote.option_index).await?;
    Ok(Json(json!({ "status": "vote recorded" })))
}

pub async fn get_results(
    State(service): State<PollService>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<OptionTally>>, AppError> {
    Ok(Json(service.get_results(id).await?))
}

pub async fn list_all_polls(
    State(service): State<PollService>,
    caller: Caller,
) -> Result<Json<Vec<Poll>>, AppError> {
    Ok(Json(service.list_all_polls(&caller).await?))
}
