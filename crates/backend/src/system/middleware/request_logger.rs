use axum::body::to_bytes;
use axum::body::Body;
use axum::http::Request;
use axum::middleware::Next;
use axum::response::Response;
use chrono::Utc;

use crate::shared::format::format_bytes;

/// HTTP request logging middleware
///
/// One console line per request:
/// timestamp (IST) | duration (ms) | response size | status | method | path
pub async fn request_logger(req: Request<Body>, next: Next) -> Response {
    let start = std::time::Instant::now();
    let method = req.method().clone();
    let uri = req.uri().clone();

    let response = next.run(req).await;
    let (parts, body) = response.into_parts();

    // Read the body back to know the real response size
    let bytes = match to_bytes(body, usize::MAX).await {
        Ok(b) => b,
        Err(_) => {
            let duration = start.elapsed();
            let timestamp = ist_now();
            println!(
                "\x1b[33m{}\x1b[0m | {:>5}ms | {:>10} | {} {:>6} {}",
                timestamp.format("%H:%M:%S"),
                duration.as_millis(),
                "error",
                parts.status.as_u16(),
                method,
                uri.path()
            );
            return Response::from_parts(parts, Body::default());
        }
    };

    let size = bytes.len();
    let duration = start.elapsed();
    let timestamp = ist_now();

    // Cyan for 200, yellow for everything else
    let color_code = if parts.status.as_u16() == 200 {
        "36"
    } else {
        "33"
    };

    println!(
        "\x1b[{}m{}\x1b[0m | {:>5}ms | {:>10} | {} {:>6} {}",
        color_code,
        timestamp.format("%H:%M:%S"),
        duration.as_millis(),
        format_bytes(size),
        parts.status.as_u16(),
        method,
        uri.path()
    );

    Response::from_parts(parts, Body::from(bytes))
}

/// Console timestamps in showroom time (IST, UTC+5:30)
fn ist_now() -> chrono::DateTime<Utc> {
    Utc::now() + chrono::Duration::minutes(5 * 60 + 30)
}
