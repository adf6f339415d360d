//! Room directory: resolves the physical room numbers declared across room types
//!
//! Room numbers arrive in two shapes, a bare integer or a record carrying
//! `room_no` plus a per-room status. Both are resolved once, at ingestion,
//! into [`RoomNumber`]; entries of any other shape are kept verbatim so the
//! record still round-trips, and are skipped when the directory is built.

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeSet;
use std::fmt;

use crate::domain::a001_room_type::aggregate::RoomType;

/// Physical room identifier, unique across the property
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoomNumber(pub i64);

impl RoomNumber {
    pub fn value(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for RoomNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One entry of a room type's `room_numbers` list, as stored on the wire
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RoomNumberEntry {
    Bare(i64),
    Detailed {
        room_no: i64,
        #[serde(default, deserialize_with = "status_text")]
        status: String,
    },
    Unrecognized(serde_json::Value),
}

/// Any status value is accepted; null reads as empty, non-strings as their JSON text
fn status_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::Null => String::new(),
        serde_json::Value::String(s) => s,
        other => other.to_string(),
    })
}

impl RoomNumberEntry {
    /// Canonical room number, `None` for unrecognized shapes
    pub fn number(&self) -> Option<RoomNumber> {
        match self {
            RoomNumberEntry::Bare(n) => Some(RoomNumber(*n)),
            RoomNumberEntry::Detailed { room_no, .. } => Some(RoomNumber(*room_no)),
            RoomNumberEntry::Unrecognized(_) => None,
        }
    }

    /// Per-room housekeeping status if the entry carries one
    pub fn status(&self) -> Option<&str> {
        match self {
            RoomNumberEntry::Detailed { status, .. } if !status.is_empty() => Some(status),
            _ => None,
        }
    }
}

/// Flatten room numbers from entries into a deduplicated ascending sequence
pub fn collect_room_numbers<'a, I>(entries: I) -> Vec<RoomNumber>
where
    I: IntoIterator<Item = &'a RoomNumberEntry>,
{
    entries
        .into_iter()
        .filter_map(RoomNumberEntry::number)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Distinct room numbers across all room types, ascending
pub fn rooms_from_room_types(room_types: &[RoomType]) -> Vec<RoomNumber> {
    collect_room_numbers(room_types.iter().flat_map(|rt| rt.room_numbers.iter()))
}

/// Count of entries skipped because their shape was not recognized
pub fn unrecognized_entries(room_types: &[RoomType]) -> usize {
    room_types
        .iter()
        .flat_map(|rt| rt.room_numbers.iter())
        .filter(|e| e.number().is_none())
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_accepts_both_shapes() {
        let entries: Vec<RoomNumberEntry> =
            serde_json::from_str(r#"[101, {"room_no": 102, "status": "dirty"}, {"room_no": 103}]"#)
                .unwrap();
        assert_eq!(entries[0], RoomNumberEntry::Bare(101));
        assert_eq!(entries[1].number(), Some(RoomNumber(102)));
        assert_eq!(entries[1].status(), Some("dirty"));
        assert_eq!(entries[2].number(), Some(RoomNumber(103)));
        assert_eq!(entries[2].status(), None);
    }

    #[test]
    fn test_numeric_room_no_survives_odd_status() {
        let entries: Vec<RoomNumberEntry> = serde_json::from_str(
            r#"[{"room_no": 102, "status": null}, {"room_no": 103, "status": 1}]"#,
        )
        .unwrap();
        assert_eq!(
            collect_room_numbers(&entries),
            vec![RoomNumber(102), RoomNumber(103)]
        );
        assert_eq!(entries[0].status(), None);
        assert_eq!(entries[1].status(), Some("1"));
    }

    #[test]
    fn test_unrecognized_entries_are_kept_but_skipped() {
        let entries: Vec<RoomNumberEntry> =
            serde_json::from_str(r#"["101", {"room": 5}, {"room_no": "7"}, null, 104]"#).unwrap();
        assert_eq!(entries.len(), 5);
        assert!(matches!(entries[0], RoomNumberEntry::Unrecognized(_)));
        assert!(matches!(entries[2], RoomNumberEntry::Unrecognized(_)));
        assert_eq!(collect_room_numbers(&entries), vec![RoomNumber(104)]);
    }

    #[test]
    fn test_collect_deduplicates_and_sorts() {
        let a = vec![
            RoomNumberEntry::Bare(205),
            RoomNumberEntry::Bare(101),
            RoomNumberEntry::Detailed {
                room_no: 150,
                status: "clean".into(),
            },
        ];
        let b = vec![RoomNumberEntry::Bare(101), RoomNumberEntry::Bare(99)];
        let forward = collect_room_numbers(a.iter().chain(b.iter()));
        let backward = collect_room_numbers(b.iter().chain(a.iter()));
        let expected: Vec<RoomNumber> = [99, 101, 150, 205].into_iter().map(RoomNumber).collect();
        assert_eq!(forward, expected);
        assert_eq!(backward, expected);
    }

    #[test]
    fn test_empty_directory() {
        assert!(rooms_from_room_types(&[]).is_empty());
    }
}
