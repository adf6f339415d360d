//! API utilities for frontend-backend communication
//!
//! Dashboard endpoints need the bearer token; requests answered with 401 are
//! retried once after refreshing the access token.

use contracts::shared::api_error::ApiErrorBody;
use gloo_net::http::{Request, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::system::auth::{api as auth_api, context as auth_context, storage};

/// Base URL for API requests: the page host on port 3000
pub fn api_base() -> String {
    let window = match web_sys::window() {
        Some(w) => w,
        None => return String::new(),
    };
    let location = window.location();
    let protocol = location.protocol().unwrap_or_else(|_| "http:".to_string());
    let hostname = location
        .hostname()
        .unwrap_or_else(|_| "127.0.0.1".to_string());
    format!("{}//{}:3000", protocol, hostname)
}

/// Full API URL from a path starting with "/api/"
pub fn api_url(path: &str) -> String {
    format!("{}{}", api_base(), path)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

/// User-facing message for a failed response
///
/// Prefers the `detail` field of the backend error body.
pub fn error_message(status: u16, body: &str) -> String {
    match serde_json::from_str::<ApiErrorBody>(body) {
        Ok(err) if !err.detail.is_empty() => err.detail,
        _ => match status {
            401 => "Session expired, please log in again".to_string(),
            403 => "Access denied".to_string(),
            404 => "Not found".to_string(),
            _ => format!("HTTP error: {}", status),
        },
    }
}

fn builder(method: Method, url: &str) -> RequestBuilder {
    match method {
        Method::Get => Request::get(url),
        Method::Post => Request::post(url),
        Method::Put => Request::put(url),
        Method::Delete => Request::delete(url),
    }
}

async fn send_once(
    method: Method,
    url: &str,
    body: Option<&str>,
    token: Option<&str>,
) -> Result<Response, String> {
    let mut request = builder(method, url).header("Accept", "application/json");
    if let Some(token) = token {
        request = request.header("Authorization", &format!("Bearer {}", token));
    }
    let request = match body {
        Some(json) => request
            .header("Content-Type", "application/json")
            .body(json.to_string()),
        None => request.build(),
    }
    .map_err(|e| format!("Failed to build request: {}", e))?;

    request
        .send()
        .await
        .map_err(|e| format!("Failed to send request: {}", e))
}

/// Send with the stored token; one refresh-and-retry on 401
async fn send(method: Method, path: &str, body: Option<String>) -> Result<Response, String> {
    let url = api_url(path);
    let token = storage::get_access_token();
    let response = send_once(method, &url, body.as_deref(), token.as_deref()).await?;
    if response.status() != 401 {
        return Ok(response);
    }

    let Some(refresh_token) = storage::get_refresh_token() else {
        auth_context::end_session();
        return Ok(response);
    };
    match auth_api::refresh_token(refresh_token).await {
        Ok(refreshed) => {
            storage::save_access_token(&refreshed.access_token);
            auth_context::update_access_token(&refreshed.access_token);
            send_once(method, &url, body.as_deref(), Some(&refreshed.access_token)).await
        }
        Err(e) => {
            log::warn!("Token refresh failed: {}", e);
            auth_context::end_session();
            Ok(response)
        }
    }
}

async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, String> {
    if !response.ok() {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        return Err(error_message(status, &body));
    }
    response
        .json::<T>()
        .await
        .map_err(|e| format!("Failed to parse response: {}", e))
}

pub async fn get_json<T: DeserializeOwned>(path: &str) -> Result<T, String> {
    request_json(Method::Get, path).await
}

/// Bodyless request answered with JSON
pub async fn request_json<T: DeserializeOwned>(method: Method, path: &str) -> Result<T, String> {
    read_json(send(method, path, None).await?).await
}

pub async fn send_json<B, T>(method: Method, path: &str, body: &B) -> Result<T, String>
where
    B: Serialize,
    T: DeserializeOwned,
{
    let json =
        serde_json::to_string(body).map_err(|e| format!("Failed to serialize request: {}", e))?;
    read_json(send(method, path, Some(json)).await?).await
}

/// Request whose response body is ignored
pub async fn send_empty(method: Method, path: &str) -> Result<(), String> {
    let response = send(method, path, None).await?;
    if response.ok() {
        Ok(())
    } else {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        Err(error_message(status, &body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_message_prefers_detail() {
        assert_eq!(
            error_message(400, r#"{"detail":"Room is fully booked"}"#),
            "Room is fully booked"
        );
        assert_eq!(error_message(404, ""), "Not found");
        assert_eq!(error_message(500, "oops"), "HTTP error: 500");
        assert_eq!(
            error_message(401, ""),
            "Session expired, please log in again"
        );
    }
}
