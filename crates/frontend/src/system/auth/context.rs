use contracts::system::auth::{LoginResponse, UserInfo};
use leptos::prelude::*;
use leptos::task::spawn_local;
use std::cell::Cell;

use super::{api, storage};

#[derive(Clone, Debug, Default)]
pub struct AuthState {
    pub access_token: Option<String>,
    pub user_info: Option<UserInfo>,
}

thread_local! {
    // Setter of the mounted AuthProvider, reachable from the API layer
    static SESSION: Cell<Option<WriteSignal<AuthState>>> = const { Cell::new(None) };
}

/// Validate the stored access token, refreshing it once when rejected
async fn restore_session() -> Option<AuthState> {
    let access_token = storage::get_access_token()?;
    if let Ok(user_info) = api::get_current_user(&access_token).await {
        return Some(AuthState {
            access_token: Some(access_token),
            user_info: Some(user_info),
        });
    }

    let refreshed = match storage::get_refresh_token() {
        Some(refresh_token) => api::refresh_token(refresh_token).await.ok(),
        None => None,
    };
    let Some(refreshed) = refreshed else {
        storage::clear_tokens();
        return None;
    };

    storage::save_access_token(&refreshed.access_token);
    let user_info = api::get_current_user(&refreshed.access_token).await.ok()?;
    Some(AuthState {
        access_token: Some(refreshed.access_token),
        user_info: Some(user_info),
    })
}

#[component]
pub fn AuthProvider(children: ChildrenFn) -> impl IntoView {
    // A stored token shows the dashboard at once; restore_session confirms it
    let (auth_state, set_auth_state) = signal(AuthState {
        access_token: storage::get_access_token(),
        user_info: None,
    });
    SESSION.with(|s| s.set(Some(set_auth_state)));

    Effect::new(move |_| {
        spawn_local(async move {
            match restore_session().await {
                Some(state) => {
                    log::info!(
                        "Session restored for {}",
                        state
                            .user_info
                            .as_ref()
                            .map(|u| u.username.as_str())
                            .unwrap_or("?")
                    );
                    set_auth_state.set(state);
                }
                None => set_auth_state.set(AuthState::default()),
            }
        });
    });

    provide_context(auth_state);
    provide_context(set_auth_state);

    children()
}

pub fn use_auth() -> (ReadSignal<AuthState>, WriteSignal<AuthState>) {
    let auth_state =
        use_context::<ReadSignal<AuthState>>().expect("AuthProvider not found in component tree");
    let set_auth_state =
        use_context::<WriteSignal<AuthState>>().expect("AuthProvider not found in component tree");

    (auth_state, set_auth_state)
}

/// Store tokens of a successful login and switch to the signed-in state
pub fn start_session(set_auth_state: WriteSignal<AuthState>, response: LoginResponse) {
    storage::save_access_token(&response.access_token);
    storage::save_refresh_token(&response.refresh_token);
    set_auth_state.set(AuthState {
        access_token: Some(response.access_token),
        user_info: Some(response.user),
    });
}

/// Keep the in-memory token in step with a refreshed one
pub fn update_access_token(token: &str) {
    if let Some(set_auth_state) = SESSION.with(Cell::get) {
        let token = token.to_string();
        set_auth_state.update(|state| state.access_token = Some(token));
    }
}

/// Drop tokens and return to the login page
pub fn end_session() {
    storage::clear_tokens();
    if let Some(set_auth_state) = SESSION.with(Cell::get) {
        set_auth_state.set(AuthState::default());
    }
}

/// Revoke the refresh token on the server, then end the session
pub async fn do_logout() {
    if let Some(refresh_token) = storage::get_refresh_token() {
        if let Err(e) = api::logout(refresh_token).await {
            log::warn!("Logout request failed: {}", e);
        }
    }
    end_session();
}
