use axum::extract::{Path, State};
use axum::response::Redirect;
use axum::Json;
use uuid::Uuid;

use service::toy_service::{self, ToyInput};

use crate::auth::{CurrentUser, ServerState};
use crate::errors::ApiError;

pub async fn index(
    State(state): State<ServerState>,
    _user: CurrentUser,
) -> Result<Json<Vec<models::toy::Model>>, ApiError> {
    let toys = toy_service::list_toys(&state.db).await?;
    Ok(Json(toys))
}

pub async fn detail(
    State(state): State<ServerState>,
    _user: CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<Json<models::toy::Model>, ApiError> {
    let toy = toy_service::get_toy(&state.db, id).await?;
    Ok(Json(toy))
}

pub async fn create(
    State(state): State<ServerState>,
    _user: CurrentUser,
    Json(input): Json<ToyInput>,
) -> Result<Redirect, ApiError> {
    let created = toy_service::create_toy(&state.db, &input).await?;
    Ok(Redirect::to(&format!("/toys/{}", created.id)))
}

pub async fn update(
    State(state): State<ServerState>,
    _user: CurrentUser,
    Path(id): Path<Uuid>,
    Json(input): Json<ToyInput>,
) -> Result<Redirect, ApiError> {
    let updated = toy_service::update_toy(&state.db, id, &input).await?;
    Ok(Redirect::to(&format!("/toys/{}", updated.id)))
}

pub async fn remove(
    State(state): State<ServerState>,
    _user: CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<Redirect, ApiError> {
    toy_service::delete_toy(&state.db, id).await?;
    Ok(Redirect::to("/toys"))
}
