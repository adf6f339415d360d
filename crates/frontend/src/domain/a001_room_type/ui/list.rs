use contracts::domain::a001_room_type::aggregate::RoomType;
use contracts::domain::common::AggregateRoot;
use leptos::prelude::*;
use leptos::task::spawn_local;
use std::cmp::Ordering;

use super::details::view_model::format_room_numbers;
use super::details::RoomTypeDetails;
use crate::domain::a001_room_type::api;
use crate::shared::icons::icon;
use crate::shared::list_utils::{
    contains_ci, create_sort_toggle, filter_list, get_sort_indicator, sort_list, SearchInput,
    Searchable, Sortable,
};

#[derive(Clone, Debug)]
pub struct RoomTypeRow {
    pub id: i64,
    pub name: String,
    pub guests: i64,
    pub size: String,
    pub amenities: String,
    pub rooms: String,
    pub available_rooms: i64,
    pub status: String,
    pub total_price: f64,
    pub price: String,
}

impl From<RoomType> for RoomTypeRow {
    fn from(r: RoomType) -> Self {
        Self {
            id: r.id,
            guests: r.guests,
            size: format!("{} {}", r.size.area, r.size.unit),
            amenities: r.amenities.join(", "),
            rooms: format_room_numbers(&r.room_numbers),
            available_rooms: r.availability.available_rooms,
            status: r.availability.status,
            total_price: r.pricing.total_price,
            price: format!("{:.2} {}", r.pricing.total_price, r.pricing.currency),
            name: r.name,
        }
    }
}

impl Searchable for RoomTypeRow {
    fn matches_filter(&self, filter: &str) -> bool {
        contains_ci(&self.name, filter)
            || contains_ci(&self.amenities, filter)
            || contains_ci(&self.rooms, filter)
    }
}

impl Sortable for RoomTypeRow {
    fn compare_by_field(&self, other: &Self, field: &str) -> Ordering {
        match field {
            "name" => self.name.to_lowercase().cmp(&other.name.to_lowercase()),
            "guests" => self.guests.cmp(&other.guests),
            "available" => self.available_rooms.cmp(&other.available_rooms),
            "price" => self
                .total_price
                .partial_cmp(&other.total_price)
                .unwrap_or(Ordering::Equal),
            _ => self.id.cmp(&other.id),
        }
    }
}

#[component]
#[allow(non_snake_case)]
pub fn RoomTypeList() -> impl IntoView {
    let (items, set_items) = signal::<Vec<RoomTypeRow>>(Vec::new());
    let (error, set_error) = signal::<Option<String>>(None);
    let (filter, set_filter) = signal(String::new());
    let (sort_field, set_sort_field) = signal("id".to_string());
    let (sort_ascending, set_sort_ascending) = signal(true);
    // Some(None) is the create dialog, Some(Some(id)) edits
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
        let mut rows = filter_list(items.get(), &filter.get());
        sort_list(&mut rows, &sort_field.get(), sort_ascending.get());
        rows
    };

    let delete_row = move |row: RoomTypeRow| {
        let confirmed = web_sys::window()
            .and_then(|w| {
                w.confirm_with_message(&format!("Delete room type '{}'?", row.name))
                    .ok()
            })
            .unwrap_or(false);
        if !confirmed {
            return;
        }
        spawn_local(async move {
            match api::delete(row.id).await {
                Ok(()) => fetch(),
                Err(e) => set_error.set(Some(e)),
            }
        });
    };

    let load_test_data = move |_| {
        spawn_local(async move {
            match api::insert_test_data().await {
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
                    <h1 class="header__title">{RoomType::list_name()}</h1>
                </div>
                <div class="header__actions">
                    <SearchInput
                        value=filter
                        on_change=move |v: String| set_filter.set(v)
                        placeholder="Name, amenity or room..."
                    />
                    <button class="button button--primary" on:click=move |_| set_editing.set(Some(None))>
                        {icon("plus")}
                        "New room type"
                    </button>
                    <button class="button button--secondary" on:click=move |_| fetch()>
                        {icon("refresh")}
                        "Refresh"
                    </button>
                    <button class="button button--secondary" on:click=load_test_data>
                        "Load sample data"
                    </button>
                </div>
            </div>

            {move || error.get().map(|e| view! { <div class="error-message">{e}</div> })}

            <div class="table-wrapper">
                <table class="table">
                    <thead>
                        <tr>
                            <th class="table__sortable" on:click=create_sort_toggle("id", sort_field, set_sort_field, set_sort_ascending)>
                                {move || format!("ID{}", get_sort_indicator(&sort_field.get(), "id", sort_ascending.get()))}
                            </th>
                            <th class="table__sortable" on:click=create_sort_toggle("name", sort_field, set_sort_field, set_sort_ascending)>
                                {move || format!("Name{}", get_sort_indicator(&sort_field.get(), "name", sort_ascending.get()))}
                            </th>
                            <th class="table__sortable" on:click=create_sort_toggle("guests", sort_field, set_sort_field, set_sort_ascending)>
                                {move || format!("Guests{}", get_sort_indicator(&sort_field.get(), "guests", sort_ascending.get()))}
                            </th>
                            <th>"Size"</th>
                            <th>"Amenities"</th>
                            <th>"Rooms"</th>
                            <th class="table__sortable" on:click=create_sort_toggle("available", sort_field, set_sort_field, set_sort_ascending)>
                                {move || format!("Available{}", get_sort_indicator(&sort_field.get(), "available", sort_ascending.get()))}
                            </th>
                            <th class="table__sortable" on:click=create_sort_toggle("price", sort_field, set_sort_field, set_sort_ascending)>
                                {move || format!("Price{}", get_sort_indicator(&sort_field.get(), "price", sort_ascending.get()))}
                            </th>
                            <th></th>
                        </tr>
                    </thead>
                    <tbody>
                        <For
                            each=visible
                            key=|row| row.id
                            children=move |row: RoomTypeRow| {
                                let id = row.id;
                                let for_delete = row.clone();
                                view! {
                                    <tr>
                                        <td>{row.id}</td>
                                        <td>{row.name}</td>
                                        <td>{row.guests}</td>
                                        <td>{row.size}</td>
                                        <td>{row.amenities}</td>
                                        <td>{row.rooms}</td>
                                        <td>{row.available_rooms} " (" {row.status} ")"</td>
                                        <td>{row.price}</td>
                                        <td class="table__actions">
                                            <button class="button button--icon" title="Edit" on:click=move |_| set_editing.set(Some(Some(id)))>
                                                {icon("edit")}
                                            </button>
                                            <button class="button button--icon" title="Delete" on:click=move |_| delete_row(for_delete.clone())>
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
                <RoomTypeDetails id=id on_saved=on_saved on_close=on_close />
            })}
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(id: i64, name: &str, rooms: &str, total_price: f64) -> RoomTypeRow {
        RoomTypeRow {
            id,
            name: name.into(),
            guests: 2,
            size: "300 sqft".into(),
            amenities: "WiFi, AC".into(),
            rooms: rooms.into(),
            available_rooms: 1,
            status: "available".into(),
            total_price,
            price: format!("{:.2} INR", total_price),
        }
    }

    #[test]
    fn test_search_covers_rooms_and_amenities() {
        let r = row(1, "Deluxe", "201, 202", 150.0);
        assert!(r.matches_filter("deluxe"));
        assert!(r.matches_filter("wifi"));
        assert!(r.matches_filter("202"));
        assert!(!r.matches_filter("suite"));
    }

    #[test]
    fn test_sort_by_price() {
        let mut rows = vec![row(1, "A", "", 300.0), row(2, "B", "", 100.0)];
        sort_list(&mut rows, "price", true);
        assert_eq!(rows[0].id, 2);
    }
}
