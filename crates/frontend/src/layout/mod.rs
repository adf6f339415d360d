pub mod global_context;
pub mod header;
pub mod tabs;

use leptos::prelude::*;

use crate::dashboards::d100_availability_calendar::ui::dashboard::AvailabilityDashboard;
use crate::domain::a001_room_type::ui::list::RoomTypeList;
use crate::domain::a002_booking::ui::list::BookingList;
use global_context::AppGlobalContext;
use header::TopHeader;
use tabs::Tab;

#[component]
pub fn MainLayout() -> impl IntoView {
    let ctx =
        leptos::context::use_context::<AppGlobalContext>().expect("AppGlobalContext not found");
    ctx.init_router_integration();

    view! {
        <div class="app-shell">
            <TopHeader />
            <main class="app-shell__content">
                {move || match ctx.active.get() {
                    Tab::RoomTypes => view! { <RoomTypeList /> }.into_any(),
                    Tab::Bookings => view! { <BookingList /> }.into_any(),
                    Tab::Calendar => view! { <AvailabilityDashboard /> }.into_any(),
                }}
            </main>
        </div>
    }
}
