use axum::extract::{Multipart, Path, State};
use axum::response::Redirect;
use axum::Json;
use tracing::debug;
use uuid::Uuid;

use service::cat_service::{self, CatDetail, CatInput, CatUpdate};
use service::errors::ServiceError;
use service::feeding_service::{self, FeedingInput};
use service::photo::UploadedFile;
use service::{assoc_service, toy_service};

use crate::auth::{CurrentUser, ServerState};
use crate::errors::ApiError;

fn detail_redirect(id: Uuid) -> Redirect {
    Redirect::to(&format!("/cats/{}", id))
}

/// The index is scoped to the requester's own cats.
pub async fn index(
    State(state): State<ServerState>,
    user: CurrentUser,
) -> Result<Json<Vec<models::cat::Model>>, ApiError> {
    let cats = cat_service::list_cats_for_owner(&state.db, user.id).await?;
    Ok(Json(cats))
}

/// Detail is visible to any signed-in user, not just the owner.
pub async fn detail(
    State(state): State<ServerState>,
    _user: CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<Json<CatDetail>, ApiError> {
    let detail = cat_service::cat_detail(&state.db, id).await?;
    Ok(Json(detail))
}

/// The owner is always the requester; nothing in the payload can say
/// otherwise.
pub async fn create(
    State(state): State<ServerState>,
    user: CurrentUser,
    Json(input): Json<CatInput>,
) -> Result<Redirect, ApiError> {
    let created = cat_service::create_cat(&state.db, user.id, &input).await?;
    Ok(detail_redirect(created.id))
}

pub async fn update(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<Uuid>,
    Json(update): Json<CatUpdate>,
) -> Result<Redirect, ApiError> {
    let updated = cat_service::update_cat(&state.db, id, user.id, &update).await?;
    Ok(detail_redirect(updated.id))
}

pub async fn remove(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<Redirect, ApiError> {
    cat_service::delete_cat(&state.db, id, user.id).await?;
    Ok(Redirect::to("/cats"))
}

/// A malformed submission is dropped without surfacing an error; the
/// response is the detail redirect either way. Only a missing cat or a
/// database fault breaks the flow.
pub async fn add_feeding(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<Uuid>,
    Json(input): Json<FeedingInput>,
) -> Result<Redirect, ApiError> {
    cat_service::get_owned_cat(&state.db, id, user.id).await?;
    match feeding_service::record_feeding(&state.db, id, &input).await {
        Ok(_) => {}
        Err(ServiceError::Validation(reason)) => {
            debug!(cat_id = %id, %reason, "feeding submission discarded");
        }
        Err(e) => return Err(e.into()),
    }
    Ok(detail_redirect(id))
}

/// Multipart upload. Missing file is a no-op; a failed upload is logged
/// by the ingestor and the redirect still happens.
pub async fn add_photo(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<Uuid>,
    mut multipart: Multipart,
) -> Result<Redirect, ApiError> {
    cat_service::get_owned_cat(&state.db, id, user.id).await?;

    let mut file = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::Validation(e.to_string()))?
    {
        if field.name() != Some("photo_file") {
            continue;
        }
        let filename = field.file_name().map(str::to_string);
        let bytes = field
            .bytes()
            .await
            .map_err(|e| ApiError::Validation(e.to_string()))?;
        if let Some(filename) = filename {
            file = Some(UploadedFile { filename, bytes: bytes.to_vec() });
        }
    }

    state.ingestor.ingest(&state.db, id, file).await?;
    Ok(detail_redirect(id))
}

pub async fn assoc_toy(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path((id, toy_id)): Path<(Uuid, Uuid)>,
) -> Result<Redirect, ApiError> {
    cat_service::get_owned_cat(&state.db, id, user.id).await?;
    toy_service::get_toy(&state.db, toy_id).await?;
    assoc_service::associate(&state.db, id, toy_id).await?;
    Ok(detail_redirect(id))
}

pub async fn unassoc_toy(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path((id, toy_id)): Path<(Uuid, Uuid)>,
) -> Result<Redirect, ApiError> {
    cat_service::get_owned_cat(&state.db, id, user.id).await?;
    toy_service::get_toy(&state.db, toy_id).await?;
    assoc_service::dissociate(&state.db, id, toy_id).await?;
    Ok(detail_redirect(id))
}
