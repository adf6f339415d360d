use axum::{extract::Path, http::StatusCode, Json};
use contracts::domain::a001_room_type::aggregate::{RoomType, RoomTypeDto};
use serde_json::json;

use crate::domain::a001_room_type;
use crate::domain::a001_room_type::error::RoomTypeError;
use crate::shared::api_error::{from_anyhow, ApiError};

fn map_err(e: anyhow::Error) -> ApiError {
    from_anyhow::<RoomTypeError>(e)
}

/// GET /api/rooms
pub async fn list_available() -> Result<Json<Vec<RoomType>>, ApiError> {
    a001_room_type::service::list_available()
        .await
        .map(Json)
        .map_err(map_err)
}

/// GET /api/room_type
pub async fn list_all() -> Result<Json<Vec<RoomType>>, ApiError> {
    a001_room_type::service::list_all()
        .await
        .map(Json)
        .map_err(map_err)
}

/// GET /api/room_type/:id
pub async fn get_by_id(Path(id): Path<i64>) -> Result<Json<RoomType>, ApiError> {
    a001_room_type::service::get_by_id(id)
        .await
        .map(Json)
        .map_err(map_err)
}

/// POST /api/room_type
///
/// Updates when `id` names an existing room type, creates otherwise.
pub async fn upsert(Json(dto): Json<RoomTypeDto>) -> Result<Json<serde_json::Value>, ApiError> {
    let existing_id = match dto.id {
        Some(id) => a001_room_type::repository::get_by_id(id)
            .await
            .map_err(ApiError::internal)?
            .map(|room| room.id),
        None => None,
    };

    let id = match existing_id {
        Some(id) => {
            a001_room_type::service::update(dto).await.map_err(map_err)?;
            id
        }
        None => a001_room_type::service::create(dto).await.map_err(map_err)?,
    };

    Ok(Json(json!({ "id": id })))
}

/// DELETE /api/room_type/:id
pub async fn delete(Path(id): Path<i64>) -> Result<StatusCode, ApiError> {
    a001_room_type::service::delete(id).await.map_err(map_err)?;
    Ok(StatusCode::OK)
}

/// POST /api/room_type/testdata
pub async fn insert_test_data() -> Result<StatusCode, ApiError> {
    a001_room_type::service::insert_test_data()
        .await
        .map_err(map_err)?;
    Ok(StatusCode::OK)
}
