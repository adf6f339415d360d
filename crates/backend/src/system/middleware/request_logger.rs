use axum::body::to_bytes;
use axum::body::Body;
use axum::http::Request;
use axum::middleware::Next;
use axum::response::Response;
use chrono::Local;

use crate::shared::format::format_number;

/// ANSI color of the timestamp: cyan for 2xx, yellow otherwise
fn status_color(status: u16) -> &'static str {
    if (200..300).contains(&status) {
        "36"
    } else {
        "33"
    }
}

/// One console line per request: local time, duration, body size, status, method, path
pub async fn request_logger(req: Request<Body>, next: Next) -> Response {
    let start = std::time::Instant::now();
    let method = req.method().clone();
    let uri = req.uri().clone();

    let response = next.run(req).await;
    let (parts, body) = response.into_parts();

    // buffer the body to learn its real size
    let (bytes, size_label) = match to_bytes(body, usize::MAX).await {
        Ok(b) => {
            let label = format_number(b.len());
            (Some(b), label)
        }
        Err(_) => (None, "error".to_string()),
    };

    let status = parts.status.as_u16();
    println!(
        "\x1b[{}m{}\x1b[0m | {:>5}ms | {:>12} | {} {:>6} {}",
        status_color(status),
        Local::now().format("%H:%M:%S"),
        start.elapsed().as_millis(),
        size_label,
        status,
        method,
        uri.path()
    );

    match bytes {
        Some(b) => Response::from_parts(parts, Body::from(b)),
        None => Response::from_parts(parts, Body::default()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_color() {
        assert_eq!(status_color(200), "36");
        assert_eq!(status_color(201), "36");
        assert_eq!(status_color(404), "33");
        assert_eq!(status_color(500), "33");
    }
}
