//! Dashboard sections and their `?tab=` query encoding

use contracts::domain::a001_room_type::aggregate::RoomType;
use contracts::domain::a002_booking::aggregate::Booking;
use contracts::domain::common::AggregateRoot;
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    RoomTypes,
    Bookings,
    #[default]
    Calendar,
}

impl Tab {
    pub const ALL: [Tab; 3] = [Tab::RoomTypes, Tab::Bookings, Tab::Calendar];

    pub fn key(&self) -> &'static str {
        match self {
            Tab::RoomTypes => "a001_room_type",
            Tab::Bookings => "a002_booking",
            Tab::Calendar => "d100_availability_calendar",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Tab::RoomTypes => RoomType::list_name(),
            Tab::Bookings => Booking::list_name(),
            Tab::Calendar => "Availability",
        }
    }

    pub fn icon_name(&self) -> &'static str {
        match self {
            Tab::RoomTypes => "bed",
            Tab::Bookings => "bookings",
            Tab::Calendar => "calendar",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|tab| tab.key() == key)
    }
}

/// Tab named by a location search string; unknown or missing keys give the default
pub fn tab_from_query(search: &str) -> Tab {
    let params: HashMap<String, String> =
        serde_qs::from_str(search.trim_start_matches('?')).unwrap_or_default();
    params
        .get("tab")
        .and_then(|key| Tab::from_key(key))
        .unwrap_or_default()
}

/// Search string selecting `tab`, leading `?` included
pub fn query_for(tab: Tab) -> String {
    let query = serde_qs::to_string(&HashMap::from([("tab".to_string(), tab.key().to_string())]))
        .unwrap_or_default();
    format!("?{}", query)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aggregate_keys_match_table_names() {
        assert_eq!(Tab::RoomTypes.key(), RoomType::full_name());
        assert_eq!(Tab::Bookings.key(), Booking::full_name());
    }

    #[test]
    fn test_from_key() {
        for tab in Tab::ALL {
            assert_eq!(Tab::from_key(tab.key()), Some(tab));
        }
        assert_eq!(Tab::from_key("a999_unknown"), None);
    }

    #[test]
    fn test_tab_from_query() {
        assert_eq!(tab_from_query("?tab=a002_booking"), Tab::Bookings);
        assert_eq!(tab_from_query("tab=a001_room_type&x=1"), Tab::RoomTypes);
        assert_eq!(tab_from_query(""), Tab::Calendar);
        assert_eq!(tab_from_query("?tab=nope"), Tab::Calendar);
    }

    #[test]
    fn test_query_for() {
        assert_eq!(query_for(Tab::Bookings), "?tab=a002_booking");
        assert_eq!(tab_from_query(&query_for(Tab::RoomTypes)), Tab::RoomTypes);
    }
}
