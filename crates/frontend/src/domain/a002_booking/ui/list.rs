use contracts::domain::a002_booking::aggregate::{Booking, BookingStatus};
use contracts::domain::common::AggregateRoot;
use leptos::prelude::*;
use leptos::task::spawn_local;
use std::cmp::Ordering;

use super::details::BookingDetails;
use crate::domain::a002_booking::api;
use crate::shared::date_utils::{format_date, nights};
use crate::shared::icons::icon;
use crate::shared::list_utils::{
    contains_ci, create_sort_toggle, filter_list, get_sort_indicator, sort_list, SearchInput,
    Searchable, Sortable,
};

#[derive(Clone, Debug)]
pub struct BookingRow {
    pub booking_id: i64,
    pub room_name: String,
    pub room_no: String,
    pub guest: String,
    pub email: String,
    pub check_in: String,
    pub check_out: String,
    pub nights: Option<i64>,
    pub total_price: f64,
    pub price: String,
    pub status: String,
    pub status_kind: BookingStatus,
    pub is_cancelled: bool,
}

impl From<Booking> for BookingRow {
    fn from(b: Booking) -> Self {
        let check_in = b.check_in_date.clone().unwrap_or_default();
        let check_out = b.check_out_date.clone().unwrap_or_default();
        Self {
            booking_id: b.booking_id,
            is_cancelled: b.is_cancelled(),
            status_kind: b.status(),
            room_no: b.room_no.map(|n| n.to_string()).unwrap_or_else(|| "-".to_string()),
            nights: nights(&check_in, &check_out),
            check_in,
            check_out,
            price: format!("{:.2} {}", b.total_price, b.currency),
            total_price: b.total_price,
            room_name: b.room_name,
            guest: b.user_name,
            email: b.email,
            status: b.status,
        }
    }
}

impl Searchable for BookingRow {
    fn matches_filter(&self, filter: &str) -> bool {
        contains_ci(&self.guest, filter)
            || contains_ci(&self.email, filter)
            || contains_ci(&self.room_name, filter)
            || contains_ci(&self.room_no, filter)
    }
}

impl Sortable for BookingRow {
    fn compare_by_field(&self, other: &Self, field: &str) -> Ordering {
        match field {
            "guest" => self.guest.to_lowercase().cmp(&other.guest.to_lowercase()),
            "room" => self.room_no.cmp(&other.room_no),
            // ISO dates order lexically
            "check_in" => self.check_in.cmp(&other.check_in),
            "price" => self
                .total_price
                .partial_cmp(&other.total_price)
                .unwrap_or(Ordering::Equal),
            "status" => self.status.cmp(&other.status),
            _ => self.booking_id.cmp(&other.booking_id),
        }
    }
}

/// Status filter of the list; empty key shows everything
pub fn status_matches(row: &BookingRow, status_filter: &str) -> bool {
    match status_filter {
        "" => true,
        BookingStatus::CANCELLED => row.status_kind == BookingStatus::Cancelled,
        BookingStatus::CONFIRMED => row.status_kind == BookingStatus::Confirmed,
        other => row.status.eq_ignore_ascii_case(other),
    }
}

#[component]
#[allow(non_snake_case)]
pub fn BookingList() -> impl IntoView {
    let (items, set_items) = signal::<Vec<BookingRow>>(Vec::new());
    let (error, set_error) = signal::<Option<String>>(None);
    let (notice, set_notice) = signal::<Option<String>>(None);
    let (filter, set_filter) = signal(String::new());
    let (status_filter, set_status_filter) = signal(String::new());
    let (sort_field, set_sort_field) = signal("check_in".to_string());
    let (sort_ascending, set_sort_ascending) = signal(false);
    // Some(None) opens a new booking, Some(Some(id)) edits
    let (editing, set_editing) = signal::<Option<Option<i64>>>(None);

    let fetch = move || {
        spawn_local(async move {
            match api::fetch_all().await {
                Ok(v) => {
                    set_items.set(v.into_iter().map(Into::into).collect());
                    set_error.set(None);
                }
                Err(e) => set_error.set(Some(e)),
            }
        });
    };

    let visible = move || {
        let status = status_filter.get();
        let mut rows: Vec<BookingRow> = filter_list(items.get(), &filter.get())
            .into_iter()
            .filter(|row| status_matches(row, &status))
            .collect();
        sort_list(&mut rows, &sort_field.get(), sort_ascending.get());
        rows
    };

    let confirm = |message: String| {
        web_sys::window()
            .and_then(|w| w.confirm_with_message(&message).ok())
            .unwrap_or(false)
    };

    let cancel_row = move |id: i64| {
        if !confirm(format!("Cancel booking #{}?", id)) {
            return;
        }
        spawn_local(async move {
            match api::cancel(id).await {
                Ok(message) => {
                    set_notice.set(Some(message));
                    fetch();
                }
                Err(e) => set_error.set(Some(e)),
            }
        });
    };

    let delete_row = move |id: i64| {
        if !confirm(format!("Delete booking #{} permanently?", id)) {
            return;
        }
        spawn_local(async move {
            match api::delete(id).await {
                Ok(()) => fetch(),
                Err(e) => set_error.set(Some(e)),
            }
        });
    };

    let on_saved = Callback::new(move |_| {
        set_editing.set(None);
        fetch();
    });
    let on_close = Callback::new(move |_| set_editing.set(None));

    fetch();

    view! {
        <div class="page">
            <div class="header">
                <div class="header__content">
                    <h1 class="header__title">{Booking::list_name()}</h1>
                </div>
                <div class="header__actions">
                    <SearchInput
                        value=filter
                        on_change=move |v: String| set_filter.set(v)
                        placeholder="Guest, email or room..."
                    />
                    <select
                        class="select"
                        prop:value=move || status_filter.get()
                        on:change=move |ev| set_status_filter.set(event_target_value(&ev))
                    >
                        <option value="">"All statuses"</option>
                        <option value={BookingStatus::CONFIRMED}>"Active"</option>
                        <option value={BookingStatus::CANCELLED}>"Cancelled"</option>
                    </select>
                    <button class="button button--primary" on:click=move |_| set_editing.set(Some(None))>
                        {icon("plus")}
                        "New booking"
                    </button>
                    <button class="button button--secondary" on:click=move |_| fetch()>
                        {icon("refresh")}
                        "Refresh"
                    </button>
                </div>
            </div>

            {move || error.get().map(|e| view! { <div class="error-message">{e}</div> })}
            {move || notice.get().map(|n| view! { <div class="info-message">{n}</div> })}

            <div class="table-wrapper">
                <table class="table">
                    <thead>
                        <tr>
                            <th class="table__sortable" on:click=create_sort_toggle("id", sort_field, set_sort_field, set_sort_ascending)>
                                {move || format!("#{}", get_sort_indicator(&sort_field.get(), "id", sort_ascending.get()))}
                            </th>
                            <th class="table__sortable" on:click=create_sort_toggle("guest", sort_field, set_sort_field, set_sort_ascending)>
                                {move || format!("Guest{}", get_sort_indicator(&sort_field.get(), "guest", sort_ascending.get()))}
                            </th>
                            <th>"Room type"</th>
                            <th class="table__sortable" on:click=create_sort_toggle("room", sort_field, set_sort_field, set_sort_ascending)>
                                {move || format!("Room{}", get_sort_indicator(&sort_field.get(), "room", sort_ascending.get()))}
                            </th>
                            <th class="table__sortable" on:click=create_sort_toggle("check_in", sort_field, set_sort_field, set_sort_ascending)>
                                {move || format!("Stay{}", get_sort_indicator(&sort_field.get(), "check_in", sort_ascending.get()))}
                            </th>
                            <th class="table__sortable" on:click=create_sort_toggle("price", sort_field, set_sort_field, set_sort_ascending)>
                                {move || format!("Price{}", get_sort_indicator(&sort_field.get(), "price", sort_ascending.get()))}
                            </th>
                            <th class="table__sortable" on:click=create_sort_toggle("status", sort_field, set_sort_field, set_sort_ascending)>
                                {move || format!("Status{}", get_sort_indicator(&sort_field.get(), "status", sort_ascending.get()))}
                            </th>
                            <th></th>
                        </tr>
                    </thead>
                    <tbody>
                        <For
                            each=visible
                            key=|row| (row.booking_id, row.status.clone())
                            children=move |row: BookingRow| {
                                let id = row.booking_id;
                                let cancelled = row.is_cancelled;
                                let stay = format!(
                                    "{} - {}{}",
                                    format_date(&row.check_in),
                                    format_date(&row.check_out),
                                    row.nights.map(|n| format!(" ({}n)", n)).unwrap_or_default()
                                );
                                view! {
                                    <tr class:table__row--muted=cancelled>
                                        <td>{id}</td>
                                        <td>
                                            <div>{row.guest}</div>
                                            <div class="table__subtext">{row.email}</div>
                                        </td>
                                        <td>{row.room_name}</td>
                                        <td>{row.room_no}</td>
                                        <td>{stay}</td>
                                        <td>{row.price}</td>
                                        <td>
                                            <span class="badge" class:badge--cancelled=cancelled>{row.status}</span>
                                        </td>
                                        <td class="table__actions">
                                            <button class="button button--icon" title="Edit" on:click=move |_| set_editing.set(Some(Some(id)))>
                                                {icon("edit")}
                                            </button>
                                            <Show when=move || !cancelled>
                                                <button class="button button--icon" title="Cancel booking" on:click=move |_| cancel_row(id)>
                                                    {icon("cancel")}
                                                </button>
                                            </Show>
                                            <button class="button button--icon" title="Delete" on:click=move |_| delete_row(id)>
                                                {icon("delete")}
                                            </button>
                                        </td>
                                    </tr>
                                }
                            }
                        />
                    </tbody>
                </table>
            </div>

            {move || editing.get().map(|id| view! {
                <BookingDetails id=id on_saved=on_saved on_close=on_close />
            })}
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::domain::common::EntityMetadata;

    fn booking(id: i64, guest: &str, status: &str, check_in: &str) -> Booking {
        Booking {
            booking_id: id,
            room_id: 1,
            room_no: Some(101),
            room_name: "Deluxe".into(),
            total_price: 112.0,
            currency: "INR".into(),
            booking_date: "2024-03-01".into(),
            status: status.into(),
            check_in_date: Some(check_in.into()),
            check_out_date: Some("2024-03-20".into()),
            user_name: guest.into(),
            email: format!("{}@example.com", guest.to_lowercase()),
            metadata: EntityMetadata::new(),
        }
    }

    #[test]
    fn test_row_from_booking() {
        let row = BookingRow::from(booking(1, "Asha", "confirmed", "2024-03-18"));
        assert_eq!(row.nights, Some(2));
        assert_eq!(row.price, "112.00 INR");
        assert_eq!(row.room_no, "101");
        assert!(!row.is_cancelled);
    }

    #[test]
    fn test_status_filter() {
        let active = BookingRow::from(booking(1, "Asha", "confirmed", "2024-03-18"));
        let other = BookingRow::from(booking(2, "Ravi", "checked_in", "2024-03-18"));
        let cancelled = BookingRow::from(booking(3, "Mira", "Cancelled", "2024-03-18"));
        assert!(status_matches(&active, ""));
        assert!(status_matches(&active, BookingStatus::CONFIRMED));
        assert!(!status_matches(&other, BookingStatus::CONFIRMED));
        assert!(!status_matches(&other, BookingStatus::CANCELLED));
        assert!(status_matches(&other, "checked_in"));
        assert!(!status_matches(&cancelled, BookingStatus::CONFIRMED));
        assert!(status_matches(&cancelled, BookingStatus::CANCELLED));
    }

    #[test]
    fn test_search_and_sort() {
        let mut rows: Vec<BookingRow> = vec![
            booking(1, "Asha", "confirmed", "2024-03-18").into(),
            booking(2, "Ravi", "confirmed", "2024-03-02").into(),
        ];
        assert_eq!(filter_list(rows.clone(), "ravi@").len(), 1);
        sort_list(&mut rows, "check_in", true);
        assert_eq!(rows[0].booking_id, 2);
    }
}
