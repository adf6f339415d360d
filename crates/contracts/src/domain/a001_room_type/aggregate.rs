use serde::{Deserialize, Serialize};

use crate::dashboards::d100_availability_calendar::room_directory::RoomNumberEntry;
use crate::domain::common::{AggregateRoot, EntityMetadata};

// ============================================================================
// Value objects
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomSize {
    pub area: f64,
    pub unit: String,
}

impl Default for RoomSize {
    fn default() -> Self {
        Self {
            area: 0.0,
            unit: "sqft".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Availability {
    pub available_rooms: i64,
    pub status: String,
}

impl Default for Availability {
    fn default() -> Self {
        Self {
            available_rooms: 0,
            status: "available".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pricing {
    pub base_price: f64,
    pub currency: String,
    pub tax_price: f64,
    pub total_price: f64,
    pub pricing_type: String,
}

impl Default for Pricing {
    fn default() -> Self {
        Self {
            base_price: 0.0,
            currency: "INR".to_string(),
            tax_price: 0.0,
            total_price: 0.0,
            pricing_type: "per_night".to_string(),
        }
    }
}

// ============================================================================
// Aggregate Root
// ============================================================================

/// Room type: a category of rooms sharing pricing, capacity and amenities,
/// owning a set of physical room numbers
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomType {
    pub id: i64,
    pub name: String,
    pub adults: i64,
    pub children: i64,
    pub guests: i64,
    #[serde(default)]
    pub description: String,
    pub size: RoomSize,
    #[serde(default)]
    pub amenities: Vec<String>,
    pub availability: Availability,
    pub pricing: Pricing,
    #[serde(default)]
    pub package_name: Option<String>,
    #[serde(default)]
    pub refund_policy: Option<String>,
    #[serde(default)]
    pub banner_image: String,
    #[serde(default)]
    pub check_in_date: Option<String>,
    #[serde(default)]
    pub check_out_date: Option<String>,
    #[serde(default)]
    pub room_numbers: Vec<RoomNumberEntry>,

    #[serde(flatten)]
    pub metadata: EntityMetadata,
}

impl RoomType {
    /// Build a new record from the form, `id` already allocated
    pub fn new_for_insert(id: i64, dto: &RoomTypeDto) -> Self {
        let mut aggregate = Self {
            id,
            name: String::new(),
            adults: 0,
            children: 0,
            guests: 0,
            description: String::new(),
            size: RoomSize::default(),
            amenities: Vec::new(),
            availability: Availability::default(),
            pricing: Pricing::default(),
            package_name: None,
            refund_policy: None,
            banner_image: String::new(),
            check_in_date: None,
            check_out_date: None,
            room_numbers: Vec::new(),
            metadata: EntityMetadata::new(),
        };
        aggregate.update(dto);
        aggregate
    }

    /// Copy editable fields from the form
    pub fn update(&mut self, dto: &RoomTypeDto) {
        self.name = dto.name.trim().to_string();
        self.adults = dto.adults;
        self.children = dto.children;
        self.guests = dto.guests;
        self.description = dto.description.clone();
        self.size = dto.size.clone();
        self.amenities = dto
            .amenities
            .iter()
            .map(|a| a.trim().to_string())
            .filter(|a| !a.is_empty())
            .collect();
        self.availability = dto.availability.clone();
        self.pricing = dto.pricing.clone();
        self.package_name = dto.package_name.clone().filter(|s| !s.trim().is_empty());
        self.refund_policy = dto.refund_policy.clone().filter(|s| !s.trim().is_empty());
        self.banner_image = dto.banner_image.clone();
        self.room_numbers = dto.room_numbers.clone();
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("Name must not be empty".into());
        }
        if self.adults < 0 || self.children < 0 || self.guests < 0 {
            return Err("Guest counts must not be negative".into());
        }
        if self.availability.available_rooms < 0 {
            return Err("Available rooms must not be negative".into());
        }
        let p = &self.pricing;
        if p.base_price < 0.0 || p.tax_price < 0.0 || p.total_price < 0.0 {
            return Err("Prices must not be negative".into());
        }
        if self.size.area < 0.0 {
            return Err("Room size must not be negative".into());
        }
        Ok(())
    }

    /// Hook before write
    pub fn before_write(&mut self) {
        self.metadata.touch();
    }

    /// Physical room numbers declared by this type, ascending and unique
    pub fn declared_room_numbers(&self) -> Vec<i64> {
        let mut numbers: Vec<i64> = self
            .room_numbers
            .iter()
            .filter_map(|e| e.number())
            .map(|n| n.value())
            .collect();
        numbers.sort_unstable();
        numbers.dedup();
        numbers
    }
}

impl AggregateRoot for RoomType {
    type Id = i64;

    fn id(&self) -> Self::Id {
        self.id
    }

    fn metadata(&self) -> &EntityMetadata {
        &self.metadata
    }

    fn aggregate_index() -> &'static str {
        "a001"
    }

    fn collection_name() -> &'static str {
        "room_type"
    }

    fn element_name() -> &'static str {
        "Room type"
    }

    fn list_name() -> &'static str {
        "Room types"
    }
}

// ============================================================================
// Forms / DTOs
// ============================================================================

/// Create/update form for a room type; `id: None` allocates the next id
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct RoomTypeDto {
    pub id: Option<i64>,
    pub name: String,
    pub adults: i64,
    pub children: i64,
    pub guests: i64,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub size: RoomSize,
    #[serde(default)]
    pub amenities: Vec<String>,
    #[serde(default)]
    pub availability: Availability,
    #[serde(default)]
    pub pricing: Pricing,
    #[serde(default)]
    pub package_name: Option<String>,
    #[serde(default)]
    pub refund_policy: Option<String>,
    #[serde(default)]
    pub banner_image: String,
    #[serde(default)]
    pub room_numbers: Vec<RoomNumberEntry>,
}

impl From<&RoomType> for RoomTypeDto {
    fn from(r: &RoomType) -> Self {
        Self {
            id: Some(r.id),
            name: r.name.clone(),
            adults: r.adults,
            children: r.children,
            guests: r.guests,
            description: r.description.clone(),
            size: r.size.clone(),
            amenities: r.amenities.clone(),
            availability: r.availability.clone(),
            pricing: r.pricing.clone(),
            package_name: r.package_name.clone(),
            refund_policy: r.refund_policy.clone(),
            banner_image: r.banner_image.clone(),
            room_numbers: r.room_numbers.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dto(name: &str) -> RoomTypeDto {
        RoomTypeDto {
            name: name.to_string(),
            adults: 2,
            guests: 2,
            availability: Availability {
                available_rooms: 3,
                status: "available".into(),
            },
            room_numbers: vec![
                RoomNumberEntry::Bare(102),
                RoomNumberEntry::Detailed {
                    room_no: 101,
                    status: "clean".into(),
                },
                RoomNumberEntry::Bare(102),
            ],
            ..Default::default()
        }
    }

    #[test]
    fn test_validate_rejects_empty_name() {
        let room = RoomType::new_for_insert(1, &dto("   "));
        assert!(room.validate().is_err());
        let room = RoomType::new_for_insert(1, &dto("Deluxe"));
        assert!(room.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_negative_prices() {
        let mut room = RoomType::new_for_insert(1, &dto("Deluxe"));
        room.pricing.tax_price = -1.0;
        assert!(room.validate().is_err());
    }

    #[test]
    fn test_declared_room_numbers_sorted_unique() {
        let room = RoomType::new_for_insert(1, &dto("Deluxe"));
        assert_eq!(room.declared_room_numbers(), vec![101, 102]);
    }

    #[test]
    fn test_deserializes_original_payload_without_room_numbers() {
        let json = r#"{
            "id": 7, "name": "Suite", "adults": 2, "children": 1, "guests": 3,
            "size": {"area": 420.0, "unit": "sqft"},
            "amenities": ["WiFi", "AC"],
            "availability": {"available_rooms": 4, "status": "available"},
            "pricing": {"base_price": 100.0, "currency": "INR", "tax_price": 12.0,
                        "total_price": 112.0, "pricing_type": "per_night"}
        }"#;
        let room: RoomType = serde_json::from_str(json).unwrap();
        assert_eq!(room.id, 7);
        assert!(room.room_numbers.is_empty());
        assert_eq!(room.description, "");
        assert_eq!(room.package_name, None);
    }
}
