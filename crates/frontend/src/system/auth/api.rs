//! Auth endpoints; these run before a session exists, so they bypass the
//! retrying client in `shared::api_utils`

use contracts::system::auth::{
    LoginRequest, LoginResponse, RefreshRequest, RefreshResponse, UserInfo,
};
use gloo_net::http::{Request, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::shared::api_utils::{api_url, error_message};

async fn post<B: Serialize>(path: &str, body: &B) -> Result<Response, String> {
    Request::post(&api_url(path))
        .json(body)
        .map_err(|e| format!("Failed to serialize request: {}", e))?
        .send()
        .await
        .map_err(|e| format!("Failed to send request: {}", e))
}

async fn parse<T: DeserializeOwned>(response: Response) -> Result<T, String> {
    if !response.ok() {
        let status = response.status();
        return Err(error_message(status, &response.text().await.unwrap_or_default()));
    }
    response
        .json::<T>()
        .await
        .map_err(|e| format!("Failed to parse response: {}", e))
}

pub async fn login(username: String, password: String) -> Result<LoginResponse, String> {
    let response = post("/api/system/auth/login", &LoginRequest { username, password }).await?;
    if response.status() == 401 {
        return Err("Invalid username or password".to_string());
    }
    parse(response).await
}

/// New access token for a stored refresh token
pub async fn refresh_token(refresh_token: String) -> Result<RefreshResponse, String> {
    parse(post("/api/system/auth/refresh", &RefreshRequest { refresh_token }).await?).await
}

/// Revoke the refresh token on the server
pub async fn logout(refresh_token: String) -> Result<(), String> {
    let response = post("/api/system/auth/logout", &RefreshRequest { refresh_token }).await?;
    if response.ok() {
        Ok(())
    } else {
        Err(format!("Logout failed: {}", response.status()))
    }
}

pub async fn get_current_user(access_token: &str) -> Result<UserInfo, String> {
    let response = Request::get(&api_url("/api/system/auth/me"))
        .header("Authorization", &format!("Bearer {}", access_token))
        .send()
        .await
        .map_err(|e| format!("Failed to send request: {}", e))?;
    parse(response).await
}
