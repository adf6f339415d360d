use leptos::prelude::*;

use crate::shared::icons::icon;

/// Small labelled figure for dashboard headers
#[component]
pub fn StatCard(
    label: &'static str,
    icon_name: &'static str,
    #[prop(into)] value: Signal<String>,
    /// Modifier class, e.g. "stat-card--occupied"
    #[prop(optional)]
    modifier: &'static str,
) -> impl IntoView {
    view! {
        <div class=format!("stat-card {}", modifier)>
            <div class="stat-card__icon">{icon(icon_name)}</div>
            <div class="stat-card__body">
                <div class="stat-card__label">{label}</div>
                <div class="stat-card__value">{move || value.get()}</div>
            </div>
        </div>
    }
}
