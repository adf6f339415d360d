use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::common::{AggregateRoot, EntityMetadata};

/// Wire date format of check-in/check-out fields
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse a `YYYY-MM-DD` calendar date, tolerating surrounding whitespace
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).ok()
}

// ============================================================================
// Status
// ============================================================================

/// Booking status as understood by the dashboard
///
/// Only `confirmed` and `cancelled` have fixed meaning; any other text is
/// carried through unchanged and counts as "not cancelled".
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum BookingStatus {
    Confirmed,
    Cancelled,
    Other(String),
}

impl BookingStatus {
    pub const CONFIRMED: &'static str = "confirmed";
    pub const CANCELLED: &'static str = "cancelled";

    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            Self::CONFIRMED => BookingStatus::Confirmed,
            Self::CANCELLED => BookingStatus::Cancelled,
            _ => BookingStatus::Other(value.trim().to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            BookingStatus::Confirmed => Self::CONFIRMED,
            BookingStatus::Cancelled => Self::CANCELLED,
            BookingStatus::Other(s) => s,
        }
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, BookingStatus::Cancelled)
    }
}

// ============================================================================
// Aggregate Root
// ============================================================================

/// Reservation of one room for a contiguous date range
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Booking {
    pub booking_id: i64,
    /// Room type the booking was made against
    pub room_id: i64,
    /// Physical room occupied by the stay
    #[serde(default)]
    pub room_no: Option<i64>,
    pub room_name: String,
    pub total_price: f64,
    pub currency: String,
    pub booking_date: String,
    pub status: String,
    #[serde(default)]
    pub check_in_date: Option<String>,
    #[serde(default)]
    pub check_out_date: Option<String>,
    /// Guest display name
    pub user_name: String,
    pub email: String,

    #[serde(flatten)]
    pub metadata: EntityMetadata,
}

impl Booking {
    pub fn status(&self) -> BookingStatus {
        BookingStatus::parse(&self.status)
    }

    pub fn is_cancelled(&self) -> bool {
        self.status().is_cancelled()
    }

    /// Parsed stay dates; `None` when either date is missing or malformed
    pub fn stay_dates(&self) -> Option<(NaiveDate, NaiveDate)> {
        let check_in = parse_date(self.check_in_date.as_deref()?)?;
        let check_out = parse_date(self.check_out_date.as_deref()?)?;
        Some((check_in, check_out))
    }

    /// First whitespace-delimited token of the guest name
    pub fn guest_short_name(&self) -> Option<&str> {
        self.user_name.split_whitespace().next()
    }

    /// Copy editable fields from the dashboard form
    pub fn update(&mut self, dto: &BookingDto) {
        self.room_no = dto.room_no;
        self.check_in_date = Some(dto.check_in_date.trim().to_string());
        self.check_out_date = Some(dto.check_out_date.trim().to_string());
        self.user_name = dto.user_name.trim().to_string();
        self.email = dto.email.trim().to_string();
        self.status = BookingStatus::parse(&dto.status).as_str().to_string();
    }

    pub fn validate(&self) -> Result<(), String> {
        validate_stay(
            self.check_in_date.as_deref().unwrap_or_default(),
            self.check_out_date.as_deref().unwrap_or_default(),
        )?;
        validate_guest(&self.user_name, &self.email)?;
        if self.status.trim().is_empty() {
            return Err("Status must not be empty".into());
        }
        Ok(())
    }

    pub fn before_write(&mut self) {
        self.metadata.touch();
    }
}

/// Dates must parse and check-in must not be after check-out
pub fn validate_stay(check_in: &str, check_out: &str) -> Result<(), String> {
    let check_in_date =
        parse_date(check_in).ok_or_else(|| format!("Invalid check-in date: '{}'", check_in))?;
    let check_out_date =
        parse_date(check_out).ok_or_else(|| format!("Invalid check-out date: '{}'", check_out))?;
    if check_in_date > check_out_date {
        return Err("Check-in date must not be after check-out date".into());
    }
    Ok(())
}

pub fn validate_guest(user_name: &str, email: &str) -> Result<(), String> {
    if user_name.trim().is_empty() {
        return Err("Guest name must not be empty".into());
    }
    if !email.contains('@') {
        return Err(format!("Invalid email: '{}'", email));
    }
    Ok(())
}

impl AggregateRoot for Booking {
    type Id = i64;

    fn id(&self) -> Self::Id {
        self.booking_id
    }

    fn metadata(&self) -> &EntityMetadata {
        &self.metadata
    }

    fn aggregate_index() -> &'static str {
        "a002"
    }

    fn collection_name() -> &'static str {
        "booking"
    }

    fn element_name() -> &'static str {
        "Booking"
    }

    fn list_name() -> &'static str {
        "Bookings"
    }
}

// ============================================================================
// Requests / DTOs
// ============================================================================

/// Guest-facing booking request for `POST /api/rooms/:id/book`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingRequest {
    pub check_in_date: String,
    pub check_out_date: String,
    pub user_name: String,
    pub email: String,
    /// Preferred physical room; the lowest room of the type when absent
    #[serde(default)]
    pub room_no: Option<i64>,
}

impl BookingRequest {
    pub fn validate(&self) -> Result<(), String> {
        validate_stay(&self.check_in_date, &self.check_out_date)?;
        validate_guest(&self.user_name, &self.email)
    }

    pub fn stay_dates(&self) -> Option<(NaiveDate, NaiveDate)> {
        Some((parse_date(&self.check_in_date)?, parse_date(&self.check_out_date)?))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingResponse {
    pub message: String,
    pub booking: Booking,
}

impl BookingResponse {
    pub fn booked(booking: Booking) -> Self {
        Self {
            message: "Room booked successfully!".to_string(),
            booking,
        }
    }
}

/// Plain `{"message": ...}` acknowledgement
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn cancelled() -> Self {
        Self {
            message: "Booking cancelled successfully!".to_string(),
        }
    }
}

/// Dashboard edit form for an existing booking
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct BookingDto {
    pub booking_id: Option<i64>,
    pub room_id: i64,
    #[serde(default)]
    pub room_no: Option<i64>,
    pub check_in_date: String,
    pub check_out_date: String,
    pub user_name: String,
    pub email: String,
    pub status: String,
}

impl From<&Booking> for BookingDto {
    fn from(b: &Booking) -> Self {
        Self {
            booking_id: Some(b.booking_id),
            room_id: b.room_id,
            room_no: b.room_no,
            check_in_date: b.check_in_date.clone().unwrap_or_default(),
            check_out_date: b.check_out_date.clone().unwrap_or_default(),
            user_name: b.user_name.clone(),
            email: b.email.clone(),
            status: b.status.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn booking(check_in: &str, check_out: &str) -> Booking {
        Booking {
            booking_id: 1,
            room_id: 1,
            room_no: Some(101),
            room_name: "Deluxe".into(),
            total_price: 112.0,
            currency: "INR".into(),
            booking_date: "2024-03-01".into(),
            status: "confirmed".into(),
            check_in_date: Some(check_in.into()),
            check_out_date: Some(check_out.into()),
            user_name: "Asha Rao".into(),
            email: "asha@example.com".into(),
            metadata: EntityMetadata::new(),
        }
    }

    #[test]
    fn test_status_parse() {
        assert_eq!(BookingStatus::parse("confirmed"), BookingStatus::Confirmed);
        assert_eq!(BookingStatus::parse(" Cancelled "), BookingStatus::Cancelled);
        assert_eq!(
            BookingStatus::parse("pending"),
            BookingStatus::Other("pending".into())
        );
        assert!(!BookingStatus::parse("checked_in").is_cancelled());
    }

    #[test]
    fn test_stay_dates() {
        let b = booking("2024-03-10", "2024-03-12");
        assert_eq!(
            b.stay_dates(),
            Some((
                NaiveDate::from_ymd_opt(2024, 3, 10).unwrap(),
                NaiveDate::from_ymd_opt(2024, 3, 12).unwrap()
            ))
        );
        assert_eq!(booking("", "2024-03-12").stay_dates(), None);
        assert_eq!(booking("2024-3-1x", "2024-03-12").stay_dates(), None);
    }

    #[test]
    fn test_guest_short_name() {
        let mut b = booking("2024-03-10", "2024-03-12");
        assert_eq!(b.guest_short_name(), Some("Asha"));
        b.user_name = "   ".into();
        assert_eq!(b.guest_short_name(), None);
    }

    #[test]
    fn test_validate() {
        assert!(booking("2024-03-10", "2024-03-12").validate().is_ok());
        assert!(booking("2024-03-10", "2024-03-10").validate().is_ok());
        assert!(booking("2024-03-12", "2024-03-10").validate().is_err());
        assert!(booking("nope", "2024-03-10").validate().is_err());

        let mut b = booking("2024-03-10", "2024-03-12");
        b.email = "no-at-sign".into();
        assert!(b.validate().is_err());
    }

    #[test]
    fn test_update_normalizes_status() {
        let mut b = booking("2024-03-10", "2024-03-12");
        let mut dto = BookingDto::from(&b);
        dto.status = "CANCELLED".into();
        dto.user_name = "  Ravi Kumar ".into();
        b.update(&dto);
        assert_eq!(b.status, "cancelled");
        assert_eq!(b.user_name, "Ravi Kumar");
    }

    #[test]
    fn test_deserializes_original_payload() {
        let json = r#"{
            "booking_id": 3, "room_id": 2, "room_name": "Suite", "total_price": 250.0,
            "currency": "INR", "booking_date": "2024-03-01", "status": "confirmed",
            "check_in_date": "2024-03-10", "check_out_date": "2024-03-12",
            "user_name": "Asha Rao", "email": "asha@example.com"
        }"#;
        let b: Booking = serde_json::from_str(json).unwrap();
        assert_eq!(b.room_no, None);
        assert_eq!(b.status(), BookingStatus::Confirmed);
    }
}
