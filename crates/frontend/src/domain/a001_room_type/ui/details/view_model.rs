use contracts::dashboards::d100_availability_calendar::room_directory::RoomNumberEntry;
use contracts::domain::a001_room_type::aggregate::RoomTypeDto;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::domain::a001_room_type::api;

/// Comma separated text, blanks dropped
pub fn split_list(text: &str) -> Vec<String> {
    text.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

/// Room numbers typed as "101, 102"; keeps the per-room status of entries that survive
///
/// Entries the form cannot show (unrecognized shapes) are carried over unchanged.
pub fn parse_room_numbers(text: &str, previous: &[RoomNumberEntry]) -> Result<Vec<RoomNumberEntry>, String> {
    let mut entries = split_list(text)
        .into_iter()
        .map(|token| {
            let number: i64 = token
                .parse()
                .map_err(|_| format!("Invalid room number: '{}'", token))?;
            let kept = previous
                .iter()
                .find(|e| e.number().map(|n| n.value()) == Some(number))
                .cloned();
            Ok(kept.unwrap_or(RoomNumberEntry::Bare(number)))
        })
        .collect::<Result<Vec<_>, String>>()?;
    entries.extend(previous.iter().filter(|e| e.number().is_none()).cloned());
    Ok(entries)
}

pub fn format_room_numbers(entries: &[RoomNumberEntry]) -> String {
    entries
        .iter()
        .filter_map(|e| e.number())
        .map(|n| n.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

#[derive(Clone, Copy)]
pub struct RoomTypeDetailsViewModel {
    pub form: RwSignal<RoomTypeDto>,
    pub amenities_text: RwSignal<String>,
    pub room_numbers_text: RwSignal<String>,
    pub error: RwSignal<Option<String>>,
    pub saving: RwSignal<bool>,
}

impl RoomTypeDetailsViewModel {
    pub fn new() -> Self {
        Self {
            form: RwSignal::new(RoomTypeDto::default()),
            amenities_text: RwSignal::new(String::new()),
            room_numbers_text: RwSignal::new(String::new()),
            error: RwSignal::new(None),
            saving: RwSignal::new(false),
        }
    }

    pub fn is_edit_mode(&self) -> bool {
        self.form.get().id.is_some()
    }

    pub fn load_if_needed(&self, id: Option<i64>) {
        let Some(id) = id else { return };
        let this = *self;
        spawn_local(async move {
            match api::fetch_by_id(id).await {
                Ok(room) => {
                    let dto = RoomTypeDto::from(&room);
                    this.amenities_text.set(dto.amenities.join(", "));
                    this.room_numbers_text
                        .set(format_room_numbers(&dto.room_numbers));
                    this.form.set(dto);
                }
                Err(e) => this.error.set(Some(format!("Failed to load: {}", e))),
            }
        });
    }

    /// Collect text fields into the dto; error message when invalid
    fn build_dto(&self) -> Result<RoomTypeDto, String> {
        let mut dto = self.form.get_untracked();
        if dto.name.trim().is_empty() {
            return Err("Name is required".into());
        }
        dto.amenities = split_list(&self.amenities_text.get_untracked());
        dto.room_numbers =
            parse_room_numbers(&self.room_numbers_text.get_untracked(), &dto.room_numbers)?;
        Ok(dto)
    }

    pub fn save_command(&self, on_saved: Callback<()>) {
        let dto = match self.build_dto() {
            Ok(dto) => dto,
            Err(e) => {
                self.error.set(Some(e));
                return;
            }
        };
        let this = *self;
        this.saving.set(true);
        spawn_local(async move {
            match api::save(&dto).await {
                Ok(id) => {
                    log::info!("Room type {} saved", id);
                    on_saved.run(());
                }
                Err(e) => this.error.set(Some(e)),
            }
            this.saving.set(false);
        });
    }
}

impl Default for RoomTypeDetailsViewModel {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_list() {
        assert_eq!(split_list(" WiFi, ,AC ,"), vec!["WiFi", "AC"]);
        assert!(split_list("").is_empty());
    }

    #[test]
    fn test_parse_room_numbers_keeps_status() {
        let previous = vec![RoomNumberEntry::Detailed {
            room_no: 101,
            status: "dirty".into(),
        }];
        let parsed = parse_room_numbers("101, 102", &previous).unwrap();
        assert_eq!(parsed[0], previous[0]);
        assert_eq!(parsed[1], RoomNumberEntry::Bare(102));
        assert!(parse_room_numbers("101, 1o2", &previous).is_err());
    }

    #[test]
    fn test_parse_room_numbers_carries_unrecognized_entries() {
        let odd = RoomNumberEntry::Unrecognized(serde_json::json!({"room": 5}));
        let previous = vec![RoomNumberEntry::Bare(101), odd.clone()];
        let text = format_room_numbers(&previous);
        assert_eq!(text, "101");
        let parsed = parse_room_numbers(&text, &previous).unwrap();
        assert_eq!(parsed, previous);
    }

    #[test]
    fn test_format_room_numbers() {
        let entries = vec![
            RoomNumberEntry::Bare(101),
            RoomNumberEntry::Unrecognized(serde_json::json!("x")),
            RoomNumberEntry::Detailed {
                room_no: 102,
                status: String::new(),
            },
        ];
        assert_eq!(format_room_numbers(&entries), "101, 102");
    }
}
