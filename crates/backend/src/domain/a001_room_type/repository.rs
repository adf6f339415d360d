use chrono::Utc;
use contracts::domain::a001_room_type::aggregate::{Availability, RoomType};
use contracts::domain::common::{AggregateRoot, EntityMetadata};
use sea_orm::entity::prelude::*;
use sea_orm::{DatabaseTransaction, QueryOrder, QuerySelect, Set};
use serde::{Deserialize, Serialize};

use crate::shared::data::db::get_connection;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "a001_room_type")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: i64,
    pub name: String,
    pub adults: i64,
    pub children: i64,
    pub guests: i64,
    pub description: String,
    pub size_json: String,
    pub amenities_json: String,
    pub available_rooms: i64,
    pub availability_status: String,
    pub pricing_json: String,
    pub package_name: Option<String>,
    pub refund_policy: Option<String>,
    pub banner_image: String,
    pub check_in_date: Option<String>,
    pub check_out_date: Option<String>,
    pub room_numbers_json: String,
    pub is_deleted: bool,
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
    pub updated_at: Option<chrono::DateTime<chrono::Utc>>,
    pub version: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Decode a JSON column, logging and defaulting on corrupt content
fn decode_json<T: serde::de::DeserializeOwned + Default>(id: i64, column: &str, raw: &str) -> T {
    serde_json::from_str(raw).unwrap_or_else(|e| {
        tracing::warn!(
            "{} {}: bad {} ({}), using default",
            RoomType::full_name(),
            id,
            column,
            e
        );
        T::default()
    })
}

impl From<Model> for RoomType {
    fn from(m: Model) -> Self {
        let metadata = EntityMetadata {
            created_at: m.created_at.unwrap_or_else(Utc::now),
            updated_at: m.updated_at.unwrap_or_else(Utc::now),
            is_deleted: m.is_deleted,
            version: m.version,
        };
        RoomType {
            id: m.id,
            name: m.name,
            adults: m.adults,
            children: m.children,
            guests: m.guests,
            description: m.description,
            size: decode_json(m.id, "size_json", &m.size_json),
            amenities: decode_json(m.id, "amenities_json", &m.amenities_json),
            availability: Availability {
                available_rooms: m.available_rooms,
                status: m.availability_status,
            },
            pricing: decode_json(m.id, "pricing_json", &m.pricing_json),
            package_name: m.package_name,
            refund_policy: m.refund_policy,
            banner_image: m.banner_image,
            check_in_date: m.check_in_date,
            check_out_date: m.check_out_date,
            room_numbers: decode_json(m.id, "room_numbers_json", &m.room_numbers_json),
            metadata,
        }
    }
}

fn to_active(aggregate: &RoomType) -> anyhow::Result<ActiveModel> {
    Ok(ActiveModel {
        id: Set(aggregate.id),
        name: Set(aggregate.name.clone()),
        adults: Set(aggregate.adults),
        children: Set(aggregate.children),
        guests: Set(aggregate.guests),
        description: Set(aggregate.description.clone()),
        size_json: Set(serde_json::to_string(&aggregate.size)?),
        amenities_json: Set(serde_json::to_string(&aggregate.amenities)?),
        available_rooms: Set(aggregate.availability.available_rooms),
        availability_status: Set(aggregate.availability.status.clone()),
        pricing_json: Set(serde_json::to_string(&aggregate.pricing)?),
        package_name: Set(aggregate.package_name.clone()),
        refund_policy: Set(aggregate.refund_policy.clone()),
        banner_image: Set(aggregate.banner_image.clone()),
        check_in_date: Set(aggregate.check_in_date.clone()),
        check_out_date: Set(aggregate.check_out_date.clone()),
        room_numbers_json: Set(serde_json::to_string(&aggregate.room_numbers)?),
        is_deleted: Set(aggregate.metadata().is_deleted),
        created_at: Set(Some(aggregate.metadata().created_at)),
        updated_at: Set(Some(aggregate.metadata().updated_at)),
        version: Set(aggregate.metadata().version),
    })
}

fn conn() -> &'static DatabaseConnection {
    get_connection()
}

async fn find_active<C: ConnectionTrait>(db: &C, id: i64) -> anyhow::Result<Option<RoomType>> {
    let result = Entity::find_by_id(id)
        .filter(Column::IsDeleted.eq(false))
        .one(db)
        .await?;
    Ok(result.map(Into::into))
}

async fn save<C: ConnectionTrait>(db: &C, aggregate: &RoomType) -> anyhow::Result<()> {
    let mut active = to_active(aggregate)?;
    active.created_at = sea_orm::ActiveValue::NotSet;
    active.update(db).await?;
    Ok(())
}

pub async fn list_all() -> anyhow::Result<Vec<RoomType>> {
    let items = Entity::find()
        .filter(Column::IsDeleted.eq(false))
        .order_by_asc(Column::Id)
        .all(conn())
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    Ok(items)
}

/// Room types with at least one free room
pub async fn list_available() -> anyhow::Result<Vec<RoomType>> {
    let items = Entity::find()
        .filter(Column::IsDeleted.eq(false))
        .filter(Column::AvailableRooms.gt(0))
        .order_by_asc(Column::Id)
        .all(conn())
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    Ok(items)
}

pub async fn get_by_id(id: i64) -> anyhow::Result<Option<RoomType>> {
    find_active(conn(), id).await
}

pub async fn get_by_id_txn(txn: &DatabaseTransaction, id: i64) -> anyhow::Result<Option<RoomType>> {
    find_active(txn, id).await
}

/// Whether the id is taken, soft-deleted rows included
pub async fn id_exists(id: i64) -> anyhow::Result<bool> {
    Ok(Entity::find_by_id(id).one(conn()).await?.is_some())
}

/// Highest id ever allocated, soft-deleted rows included
pub async fn max_id() -> anyhow::Result<Option<i64>> {
    let max: Option<Option<i64>> = Entity::find()
        .select_only()
        .column_as(Column::Id.max(), "max_id")
        .into_tuple()
        .one(conn())
        .await?;
    Ok(max.flatten())
}

pub async fn insert(aggregate: &RoomType) -> anyhow::Result<i64> {
    to_active(aggregate)?.insert(conn()).await?;
    Ok(aggregate.id)
}

pub async fn update(aggregate: &RoomType) -> anyhow::Result<()> {
    save(conn(), aggregate).await
}

pub async fn update_txn(txn: &DatabaseTransaction, aggregate: &RoomType) -> anyhow::Result<()> {
    save(txn, aggregate).await
}

pub async fn soft_delete(id: i64) -> anyhow::Result<bool> {
    use sea_orm::sea_query::Expr;
    let result = Entity::update_many()
        .col_expr(Column::IsDeleted, Expr::value(true))
        .col_expr(Column::UpdatedAt, Expr::value(Utc::now()))
        .filter(Column::Id.eq(id))
        .filter(Column::IsDeleted.eq(false))
        .exec(conn())
        .await?;
    Ok(result.rows_affected > 0)
}
