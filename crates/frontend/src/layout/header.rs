use leptos::prelude::*;
use leptos::task::spawn_local;

use super::global_context::AppGlobalContext;
use super::tabs::Tab;
use crate::shared::icons::icon;
use crate::system::auth::context::{do_logout, use_auth};

/// Brand, section tabs and the signed-in user
#[component]
pub fn TopHeader() -> impl IntoView {
    let ctx =
        leptos::context::use_context::<AppGlobalContext>().expect("AppGlobalContext not found");
    let (auth_state, _) = use_auth();

    let logout = move |_| {
        spawn_local(do_logout());
    };

    view! {
        <div class="top-header">
            <div class="top-header__brand">
                <span class="top-header__title">"RoomDesk"</span>
            </div>

            <nav class="top-header__tabs">
                {Tab::ALL
                    .into_iter()
                    .map(|tab| {
                        view! {
                            <button
                                class="top-header__tab"
                                class:top-header__tab--active=move || ctx.active.get() == tab
                                on:click=move |_| ctx.activate_tab(tab)
                            >
                                {icon(tab.icon_name())}
                                <span>{tab.label()}</span>
                            </button>
                        }
                    })
                    .collect_view()}
            </nav>

            <div class="top-header__actions">
                <div class="top-header__user">
                    {icon("user")}
                    <span>
                        {move || auth_state.get().user_info
                            .map(|u| u.display_name().to_string())
                            .unwrap_or_else(|| "Guest".to_string())}
                    </span>
                </div>

                <button class="top-header__icon-btn" on:click=logout title="Sign out">
                    {icon("logout")}
                </button>
            </div>
        </div>
    }
}
