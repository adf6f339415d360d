use contracts::dashboards::d100_availability_calendar::{
    CalendarCell, CalendarContext, CellStatus, MonthView, OccupancySummary,
};
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::dashboards::d100_availability_calendar::api;
use crate::shared::components::month_navigator::MonthNavigator;
use crate::shared::components::stat_card::StatCard;
use crate::shared::date_utils::today;
use crate::shared::icons::icon;

/// CSS classes of one grid cell
pub fn cell_class(cell: &CalendarCell) -> String {
    let mut class = format!("calendar-cell calendar-cell--{}", cell.status.as_str());
    if cell.is_checkout_day {
        class.push_str(" calendar-cell--checkout");
    }
    if cell.guest_label.is_some() {
        class.push_str(" calendar-cell--check-in");
    }
    class
}

/// Hover text of one grid cell
pub fn cell_title(room: i64, cell: &CalendarCell) -> String {
    let date = cell.date.format("%d.%m.%Y");
    match (cell.status, cell.booking_id) {
        (CellStatus::Occupied, Some(id)) => format!("Room {} · {} · booking #{}", room, date, id),
        (status, _) => format!("Room {} · {} · {}", room, date, status.as_str()),
    }
}

#[component]
pub fn AvailabilityDashboard() -> impl IntoView {
    let context = RwSignal::new(CalendarContext::new(MonthView::containing(today())));
    let (loading, set_loading) = signal(false);
    let (error, set_error) = signal(None::<String>);

    let load = move || {
        set_loading.set(true);
        set_error.set(None);
        spawn_local(async move {
            match api::fetch_snapshot().await {
                Ok((room_types, bookings)) => {
                    log::debug!(
                        "Calendar snapshot: {} room types, {} bookings",
                        room_types.len(),
                        bookings.len()
                    );
                    context.update(|c| c.refresh(&room_types, bookings));
                }
                Err(e) => set_error.set(Some(e)),
            }
            set_loading.set(false);
        });
    };

    Effect::new(move |_| load());

    let grid = Memo::new(move |_| context.with(|c| c.grid(today())));
    let summary = Memo::new(move |_| grid.with(OccupancySummary::from_grid));
    let month = Signal::derive(move || grid.with(|g| g.view));

    let on_previous = Callback::new(move |_| context.update(|c| c.previous_month(today())));
    let on_today = Callback::new(move |_| context.update(|c| c.jump_to_today(today())));
    let on_next = Callback::new(move |_| context.update(|c| c.next_month(today())));

    view! {
        <div class="page calendar-page">
            <div class="header">
                <div class="header__content">
                    <h1 class="header__title">"Availability"</h1>
                </div>
                <div class="header__actions">
                    <MonthNavigator
                        month=month
                        on_previous=on_previous
                        on_today=on_today
                        on_next=on_next
                    />
                    <button
                        class="button button--secondary"
                        disabled=move || loading.get()
                        on:click=move |_| load()
                    >
                        {icon("refresh")}
                        {move || if loading.get() { "Loading..." } else { "Refresh" }}
                    </button>
                </div>
            </div>

            {move || error.get().map(|e| view! { <div class="error-message">{e}</div> })}

            <div class="stat-cards">
                <StatCard
                    label="Occupied"
                    icon_name="bed"
                    value=Signal::derive(move || summary.get().occupied.to_string())
                    modifier="stat-card--occupied"
                />
                <StatCard
                    label="Available"
                    icon_name="calendar"
                    value=Signal::derive(move || summary.get().available.to_string())
                    modifier="stat-card--available"
                />
                <StatCard
                    label="Occupancy"
                    icon_name="bookings"
                    value=Signal::derive(move || summary.get().rate_label())
                />
            </div>

            {move || {
                let skipped = grid.with(|g| g.skipped_booking_ids.clone());
                (!skipped.is_empty()).then(|| {
                    let ids: Vec<String> = skipped.iter().map(|id| format!("#{}", id)).collect();
                    view! {
                        <div class="warning-box">
                            "Bookings with unreadable dates are not shown: " {ids.join(", ")}
                        </div>
                    }
                })
            }}

            <Show
                when=move || grid.with(|g| !g.rows.is_empty())
                fallback=|| view! {
                    <div class="empty-state">"No room numbers are declared on any room type."</div>
                }
            >
                <div class="calendar-grid-wrapper">
                    <table class="calendar-grid">
                        <thead>
                            <tr>
                                <th class="calendar-grid__room-header">"Room"</th>
                                {move || grid.with(|g| g.columns.iter().map(|col| {
                                    let is_today = col.is_today;
                                    let day = col.day;
                                    let weekday = col.weekday.clone();
                                    view! {
                                        <th class="calendar-grid__day" class:calendar-grid__day--today=is_today>
                                            <div class="calendar-grid__weekday">{weekday}</div>
                                            <div>{day}</div>
                                        </th>
                                    }
                                }).collect_view())}
                            </tr>
                        </thead>
                        <tbody>
                            {move || grid.with(|g| g.rows.iter().map(|row| {
                                let room = row.room.value();
                                let cells = row.cells.iter().map(|cell| {
                                    let class = cell_class(cell);
                                    let title = cell_title(room, cell);
                                    let label = cell.guest_label.clone().unwrap_or_default();
                                    view! {
                                        <td class=class title=title>{label}</td>
                                    }
                                }).collect_view();
                                view! {
                                    <tr>
                                        <th class="calendar-grid__room">{room}</th>
                                        {cells}
                                    </tr>
                                }
                            }).collect_view())}
                        </tbody>
                    </table>
                </div>
            </Show>

            <div class="calendar-legend">
                <span class="calendar-cell calendar-cell--available">"Available"</span>
                <span class="calendar-cell calendar-cell--occupied">"Occupied"</span>
                <span class="calendar-cell calendar-cell--past">"Past"</span>
                <span class="calendar-cell calendar-cell--occupied calendar-cell--checkout">"Check-out"</span>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn cell(status: CellStatus, guest: Option<&str>, checkout: bool) -> CalendarCell {
        CalendarCell {
            date: NaiveDate::from_ymd_opt(2024, 3, 10).unwrap(),
            status,
            guest_label: guest.map(str::to_string),
            is_checkout_day: checkout,
            booking_id: (status == CellStatus::Occupied).then_some(7),
        }
    }

    #[test]
    fn test_cell_class() {
        assert_eq!(
            cell_class(&cell(CellStatus::Available, None, false)),
            "calendar-cell calendar-cell--available"
        );
        assert_eq!(
            cell_class(&cell(CellStatus::Occupied, Some("Asha"), true)),
            "calendar-cell calendar-cell--occupied calendar-cell--checkout calendar-cell--check-in"
        );
    }

    #[test]
    fn test_cell_title() {
        assert_eq!(
            cell_title(101, &cell(CellStatus::Occupied, None, false)),
            "Room 101 · 10.03.2024 · booking #7"
        );
        assert_eq!(
            cell_title(101, &cell(CellStatus::Past, None, false)),
            "Room 101 · 10.03.2024 · past"
        );
    }
}
