use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::system::auth::{api, context};

/// Both fields filled and no request in flight
fn can_submit(username: &str, password: &str, busy: bool) -> bool {
    !busy && !username.trim().is_empty() && !password.is_empty()
}

#[component]
pub fn LoginPage() -> impl IntoView {
    let username = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let error = RwSignal::new(None::<String>);
    let busy = RwSignal::new(false);
    let (_, set_auth_state) = context::use_auth();

    let submit_enabled =
        Memo::new(move |_| can_submit(&username.get(), &password.get(), busy.get()));

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if !submit_enabled.get_untracked() {
            return;
        }
        busy.set(true);
        error.set(None);

        let (user, pass) = (username.get_untracked(), password.get_untracked());
        spawn_local(async move {
            match api::login(user.trim().to_string(), pass).await {
                Ok(response) => {
                    log::info!("Signed in as {}", response.user.username);
                    context::start_session(set_auth_state, response);
                }
                Err(e) => {
                    password.set(String::new());
                    error.set(Some(e));
                }
            }
            busy.set(false);
        });
    };

    view! {
        <div class="login-container">
            <form class="login-box" on:submit=on_submit>
                <h1>"RoomDesk"</h1>
                <p class="login-box__subtitle">"Staff sign in"</p>

                {move || error.get().map(|e| view! { <div class="error-message">{e}</div> })}

                <div class="form-group">
                    <label for="username">"Username"</label>
                    <input
                        type="text"
                        id="username"
                        autocomplete="username"
                        prop:value=move || username.get()
                        on:input=move |ev| username.set(event_target_value(&ev))
                        disabled=move || busy.get()
                    />
                </div>

                <div class="form-group">
                    <label for="password">"Password"</label>
                    <input
                        type="password"
                        id="password"
                        autocomplete="current-password"
                        prop:value=move || password.get()
                        on:input=move |ev| password.set(event_target_value(&ev))
                        disabled=move || busy.get()
                    />
                </div>

                <button
                    type="submit"
                    class="button button--primary"
                    disabled=move || !submit_enabled.get()
                >
                    {move || if busy.get() { "Signing in..." } else { "Sign in" }}
                </button>
            </form>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_can_submit() {
        assert!(can_submit("admin", "admin", false));
        assert!(!can_submit("admin", "admin", true));
        assert!(!can_submit("  ", "admin", false));
        assert!(!can_submit("admin", "", false));
    }
}
