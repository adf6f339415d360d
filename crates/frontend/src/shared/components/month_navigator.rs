use contracts::dashboards::d100_availability_calendar::MonthView;
use leptos::prelude::*;

use crate::shared::icons::icon;

/// Previous / Today / Next month buttons around the displayed month title
#[component]
pub fn MonthNavigator(
    #[prop(into)] month: Signal<MonthView>,
    on_previous: Callback<()>,
    on_today: Callback<()>,
    on_next: Callback<()>,
) -> impl IntoView {
    view! {
        <div class="month-navigator">
            <button
                class="button button--icon"
                title="Previous month"
                on:click=move |_| on_previous.run(())
            >
                {icon("chevron-left")}
            </button>
            <button
                class="button button--secondary"
                title="Current month"
                on:click=move |_| on_today.run(())
            >
                "Today"
            </button>
            <button
                class="button button--icon"
                title="Next month"
                on:click=move |_| on_next.run(())
            >
                {icon("chevron-right")}
            </button>
            <span class="month-navigator__title">{move || month.get().title()}</span>
        </div>
    }
}
