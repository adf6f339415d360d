use contracts::domain::a001_room_type::aggregate::RoomType;
use contracts::domain::a002_booking::aggregate::{
    validate_guest, validate_stay, BookingDto, BookingRequest,
};
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::domain::a001_room_type::api as room_type_api;
use crate::domain::a002_booking::api;

/// Optional room number field; blank means "let the server pick"
pub fn parse_room_no(text: &str) -> Result<Option<i64>, String> {
    let text = text.trim();
    if text.is_empty() {
        return Ok(None);
    }
    text.parse()
        .map(Some)
        .map_err(|_| format!("Invalid room number: '{}'", text))
}

/// Form check run before any request is sent
pub fn validate_form(dto: &BookingDto) -> Result<(), String> {
    validate_stay(&dto.check_in_date, &dto.check_out_date)?;
    validate_guest(&dto.user_name, &dto.email)
}

#[derive(Clone, Copy)]
pub struct BookingDetailsViewModel {
    pub form: RwSignal<BookingDto>,
    pub room_no_text: RwSignal<String>,
    pub room_types: RwSignal<Vec<RoomType>>,
    pub error: RwSignal<Option<String>>,
    pub saving: RwSignal<bool>,
}

impl BookingDetailsViewModel {
    pub fn new() -> Self {
        Self {
            form: RwSignal::new(BookingDto {
                status: "confirmed".to_string(),
                ..Default::default()
            }),
            room_no_text: RwSignal::new(String::new()),
            room_types: RwSignal::new(Vec::new()),
            error: RwSignal::new(None),
            saving: RwSignal::new(false),
        }
    }

    pub fn is_edit_mode(&self) -> bool {
        self.form.get().booking_id.is_some()
    }

    /// Room numbers declared by the selected room type
    pub fn declared_rooms(&self) -> Vec<i64> {
        let room_id = self.form.get().room_id;
        self.room_types
            .get()
            .iter()
            .find(|rt| rt.id == room_id)
            .map(|rt| rt.declared_room_numbers())
            .unwrap_or_default()
    }

    pub fn load(&self, id: Option<i64>) {
        let this = *self;
        spawn_local(async move {
            match room_type_api::fetch_all().await {
                Ok(room_types) => {
                    if id.is_none() {
                        if let Some(first) = room_types.first() {
                            let first_id = first.id;
                            this.form.update(|f| f.room_id = first_id);
                        }
                    }
                    this.room_types.set(room_types);
                }
                Err(e) => this.error.set(Some(e)),
            }

            if let Some(id) = id {
                match api::fetch_by_id(id).await {
                    Ok(booking) => {
                        this.room_no_text
                            .set(booking.room_no.map(|n| n.to_string()).unwrap_or_default());
                        this.form.set(BookingDto::from(&booking));
                    }
                    Err(e) => this.error.set(Some(format!("Failed to load: {}", e))),
                }
            }
        });
    }

    pub fn save_command(&self, on_saved: Callback<()>) {
        let mut dto = self.form.get_untracked();
        let prepared = parse_room_no(&self.room_no_text.get_untracked()).and_then(|room_no| {
            dto.room_no = room_no;
            validate_form(&dto)
        });
        if let Err(e) = prepared {
            self.error.set(Some(e));
            return;
        }

        let this = *self;
        this.saving.set(true);
        spawn_local(async move {
            let result = if dto.booking_id.is_some() {
                api::update(&dto).await.map(|b| b.booking_id)
            } else {
                let request = BookingRequest {
                    check_in_date: dto.check_in_date.clone(),
                    check_out_date: dto.check_out_date.clone(),
                    user_name: dto.user_name.clone(),
                    email: dto.email.clone(),
                    room_no: dto.room_no,
                };
                api::book_room(dto.room_id, &request)
                    .await
                    .map(|r| r.booking.booking_id)
            };
            match result {
                Ok(id) => {
                    log::info!("Booking {} saved", id);
                    on_saved.run(());
                }
                Err(e) => this.error.set(Some(e)),
            }
            this.saving.set(false);
        });
    }
}

impl Default for BookingDetailsViewModel {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_room_no() {
        assert_eq!(parse_room_no("  "), Ok(None));
        assert_eq!(parse_room_no(" 204 "), Ok(Some(204)));
        assert!(parse_room_no("20a").is_err());
    }

    #[test]
    fn test_validate_form() {
        let mut dto = BookingDto {
            check_in_date: "2024-03-10".into(),
            check_out_date: "2024-03-12".into(),
            user_name: "Asha Rao".into(),
            email: "asha@example.com".into(),
            status: "confirmed".into(),
            ..Default::default()
        };
        assert!(validate_form(&dto).is_ok());
        dto.check_out_date = "2024-03-09".into();
        assert!(validate_form(&dto).is_err());
    }
}
