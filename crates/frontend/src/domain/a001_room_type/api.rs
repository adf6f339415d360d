use contracts::domain::a001_room_type::aggregate::{RoomType, RoomTypeDto};
use serde::Deserialize;

use crate::shared::api_utils::{get_json, send_empty, send_json, Method};

#[derive(Deserialize)]
struct SavedId {
    id: i64,
}

pub async fn fetch_all() -> Result<Vec<RoomType>, String> {
    get_json("/api/room_type").await
}

pub async fn fetch_by_id(id: i64) -> Result<RoomType, String> {
    get_json(&format!("/api/room_type/{}", id)).await
}

/// Create or update; returns the stored id
pub async fn save(dto: &RoomTypeDto) -> Result<i64, String> {
    let saved: SavedId = send_json(Method::Post, "/api/room_type", dto).await?;
    Ok(saved.id)
}

pub async fn delete(id: i64) -> Result<(), String> {
    send_empty(Method::Delete, &format!("/api/room_type/{}", id)).await
}

pub async fn insert_test_data() -> Result<(), String> {
    send_empty(Method::Post, "/api/room_type/testdata").await
}
