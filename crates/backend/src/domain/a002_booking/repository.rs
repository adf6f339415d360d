use chrono::Utc;
use contracts::domain::a002_booking::aggregate::Booking;
use contracts::domain::common::{AggregateRoot, EntityMetadata};
use sea_orm::entity::prelude::*;
use sea_orm::{DatabaseTransaction, QueryOrder, QuerySelect, Set};
use serde::{Deserialize, Serialize};

use crate::shared::data::db::get_connection;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "a002_booking")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub booking_id: i64,
    pub room_id: i64,
    pub room_no: Option<i64>,
    pub room_name: String,
    pub total_price: f64,
    pub currency: String,
    pub booking_date: String,
    pub status: String,
    pub check_in_date: Option<String>,
    pub check_out_date: Option<String>,
    pub user_name: String,
    pub email: String,
    pub is_deleted: bool,
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
    pub updated_at: Option<chrono::DateTime<chrono::Utc>>,
    pub version: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Booking {
    fn from(m: Model) -> Self {
        let metadata = EntityMetadata {
            created_at: m.created_at.unwrap_or_else(Utc::now),
            updated_at: m.updated_at.unwrap_or_else(Utc::now),
            is_deleted: m.is_deleted,
            version: m.version,
        };
        Booking {
            booking_id: m.booking_id,
            room_id: m.room_id,
            room_no: m.room_no,
            room_name: m.room_name,
            total_price: m.total_price,
            currency: m.currency,
            booking_date: m.booking_date,
            status: m.status,
            check_in_date: m.check_in_date,
            check_out_date: m.check_out_date,
            user_name: m.user_name,
            email: m.email,
            metadata,
        }
    }
}

fn to_active(aggregate: &Booking) -> ActiveModel {
    ActiveModel {
        booking_id: Set(aggregate.booking_id),
        room_id: Set(aggregate.room_id),
        room_no: Set(aggregate.room_no),
        room_name: Set(aggregate.room_name.clone()),
        total_price: Set(aggregate.total_price),
        currency: Set(aggregate.currency.clone()),
        booking_date: Set(aggregate.booking_date.clone()),
        status: Set(aggregate.status.clone()),
        check_in_date: Set(aggregate.check_in_date.clone()),
        check_out_date: Set(aggregate.check_out_date.clone()),
        user_name: Set(aggregate.user_name.clone()),
        email: Set(aggregate.email.clone()),
        is_deleted: Set(aggregate.metadata().is_deleted),
        created_at: Set(Some(aggregate.metadata().created_at)),
        updated_at: Set(Some(aggregate.metadata().updated_at)),
        version: Set(aggregate.metadata().version),
    }
}

fn conn() -> &'static DatabaseConnection {
    get_connection()
}

async fn find<C: ConnectionTrait>(db: &C, id: i64) -> anyhow::Result<Option<Booking>> {
    let result = Entity::find_by_id(id).one(db).await?;
    Ok(result.map(Into::into))
}

async fn save<C: ConnectionTrait>(db: &C, aggregate: &Booking) -> anyhow::Result<()> {
    let mut active = to_active(aggregate);
    active.created_at = sea_orm::ActiveValue::NotSet;
    active.update(db).await?;
    Ok(())
}

/// All bookings ordered by id
pub async fn list_all() -> anyhow::Result<Vec<Booking>> {
    let items = Entity::find()
        .order_by_asc(Column::BookingId)
        .all(conn())
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    Ok(items)
}

/// Bookings that hold a physical room, for the room-allocation check
pub async fn list_with_room_txn(txn: &DatabaseTransaction) -> anyhow::Result<Vec<Booking>> {
    let items = Entity::find()
        .filter(Column::RoomNo.is_not_null())
        .order_by_asc(Column::BookingId)
        .all(txn)
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    Ok(items)
}

pub async fn get_by_id(id: i64) -> anyhow::Result<Option<Booking>> {
    find(conn(), id).await
}

pub async fn get_by_id_txn(txn: &DatabaseTransaction, id: i64) -> anyhow::Result<Option<Booking>> {
    find(txn, id).await
}

pub async fn max_id_txn(txn: &DatabaseTransaction) -> anyhow::Result<Option<i64>> {
    let max: Option<Option<i64>> = Entity::find()
        .select_only()
        .column_as(Column::BookingId.max(), "max_id")
        .into_tuple()
        .one(txn)
        .await?;
    Ok(max.flatten())
}

pub async fn insert_txn(txn: &DatabaseTransaction, aggregate: &Booking) -> anyhow::Result<i64> {
    to_active(aggregate).insert(txn).await?;
    Ok(aggregate.booking_id)
}

pub async fn update(aggregate: &Booking) -> anyhow::Result<()> {
    save(conn(), aggregate).await
}

pub async fn update_txn(txn: &DatabaseTransaction, aggregate: &Booking) -> anyhow::Result<()> {
    save(txn, aggregate).await
}

pub async fn delete_txn(txn: &DatabaseTransaction, id: i64) -> anyhow::Result<bool> {
    let result = Entity::delete_by_id(id).exec(txn).await?;
    Ok(result.rows_affected > 0)
}
