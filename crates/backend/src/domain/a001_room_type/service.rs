use contracts::dashboards::d100_availability_calendar::RoomNumberEntry;
use contracts::domain::a001_room_type::aggregate::{
    Availability, Pricing, RoomSize, RoomType, RoomTypeDto,
};
use contracts::domain::common::{AggregateId, AggregateRoot};

use super::error::RoomTypeError;
use super::repository;

/// Next id after the highest allocated one, 1 on an empty table
pub fn next_id(max_id: Option<i64>) -> i64 {
    max_id.map_or(1, |max| max + 1)
}

/// Create a new room type; `dto.id` is honored when set
pub async fn create(dto: RoomTypeDto) -> anyhow::Result<i64> {
    let id = match dto.id {
        Some(id) => {
            if repository::id_exists(id).await? {
                return Err(RoomTypeError::Conflict("Room ID already exists.".into()).into());
            }
            id
        }
        None => next_id(repository::max_id().await?),
    };

    let mut aggregate = RoomType::new_for_insert(id, &dto);
    aggregate.validate().map_err(RoomTypeError::Validation)?;
    aggregate.before_write();

    let id = repository::insert(&aggregate).await?;
    tracing::info!(
        "{} {} '{}' created",
        RoomType::element_name(),
        aggregate.id().as_string(),
        aggregate.name
    );
    Ok(id)
}

pub async fn update(dto: RoomTypeDto) -> anyhow::Result<()> {
    let id = dto
        .id
        .ok_or_else(|| RoomTypeError::Validation("Missing room type id".into()))?;

    let mut aggregate = repository::get_by_id(id)
        .await?
        .ok_or(RoomTypeError::NotFound)?;

    aggregate.update(&dto);
    aggregate.validate().map_err(RoomTypeError::Validation)?;
    aggregate.before_write();

    repository::update(&aggregate).await
}

pub async fn delete(id: i64) -> anyhow::Result<()> {
    if !repository::soft_delete(id).await? {
        return Err(RoomTypeError::NotFound.into());
    }
    tracing::info!("{} {} deleted", RoomType::element_name(), id.as_string());
    Ok(())
}

pub async fn get_by_id(id: i64) -> anyhow::Result<RoomType> {
    Ok(repository::get_by_id(id)
        .await?
        .ok_or(RoomTypeError::NotFound)?)
}

pub async fn list_all() -> anyhow::Result<Vec<RoomType>> {
    repository::list_all().await
}

/// Room types a guest can still book
pub async fn list_available() -> anyhow::Result<Vec<RoomType>> {
    repository::list_available().await
}

fn sample(
    name: &str,
    guests: (i64, i64),
    area: f64,
    base_price: f64,
    rooms: &[i64],
    amenities: &[&str],
) -> RoomTypeDto {
    let tax_price = (base_price * 0.12).round();
    RoomTypeDto {
        id: None,
        name: name.to_string(),
        adults: guests.0,
        children: guests.1,
        guests: guests.0 + guests.1,
        description: format!("{} with {} sq ft of space", name, area),
        size: RoomSize {
            area,
            unit: "sqft".into(),
        },
        amenities: amenities.iter().map(|a| a.to_string()).collect(),
        availability: Availability {
            available_rooms: rooms.len() as i64,
            status: "available".into(),
        },
        pricing: Pricing {
            base_price,
            tax_price,
            total_price: base_price + tax_price,
            ..Pricing::default()
        },
        package_name: None,
        refund_policy: Some("Free cancellation up to 24 hours before check-in".into()),
        banner_image: String::new(),
        room_numbers: rooms.iter().map(|n| RoomNumberEntry::Bare(*n)).collect(),
    }
}

/// Seed a few room types when none with the same name exist
pub async fn insert_test_data() -> anyhow::Result<()> {
    let data = vec![
        sample(
            "Standard Room",
            (2, 0),
            220.0,
            2500.0,
            &[101, 102, 103, 104],
            &["WiFi", "AC", "TV"],
        ),
        sample(
            "Deluxe Room",
            (2, 1),
            320.0,
            4000.0,
            &[201, 202, 203],
            &["WiFi", "AC", "TV", "Mini bar"],
        ),
        sample(
            "Family Suite",
            (4, 2),
            540.0,
            7500.0,
            &[301, 302],
            &["WiFi", "AC", "TV", "Kitchenette", "Balcony"],
        ),
    ];

    let existing: Vec<String> = list_all().await?.into_iter().map(|r| r.name).collect();
    for dto in data {
        if existing.iter().any(|name| name == &dto.name) {
            continue;
        }
        create(dto).await?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_id() {
        assert_eq!(next_id(None), 1);
        assert_eq!(next_id(Some(7)), 8);
    }

    #[test]
    fn test_sample_is_valid() {
        let dto = sample("Standard Room", (2, 1), 200.0, 1000.0, &[101, 102], &["WiFi"]);
        let room = RoomType::new_for_insert(1, &dto);
        assert!(room.validate().is_ok());
        assert_eq!(room.guests, 3);
        assert_eq!(room.availability.available_rooms, 2);
        assert_eq!(room.pricing.total_price, 1120.0);
        assert_eq!(room.declared_room_numbers(), vec![101, 102]);
    }
}
