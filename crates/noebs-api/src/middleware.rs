//! API Middleware

use axum::{
    extract::{MatchedPath, Request},
    middleware::Next,
    response::Response,
};
use std::time::{Duration, Instant};

/// Requests slower than this are logged at warn level
pub const SLOW_REQUEST_THRESHOLD: Duration = Duration::from_secs(1);

/// Route label for requests no route matched
const UNMATCHED_ROUTE: &str = "unmatched";

/// Request timing middleware
///
/// Records `noebs_http_request_duration_seconds` by method, route template
/// and status. The raw URI is never a label.
pub async fn timing_middleware(req: Request, next: Next) -> Response {
    let start = Instant::now();
    let method = req.method().to_string();
    let route = route_label(&req);

    let response = next.run(req).await;

    let elapsed = start.elapsed();
    let status = response.status().as_u16();

    metrics::histogram!(
        "noebs_http_request_duration_seconds",
        "method" => method.clone(),
        "route" => route.clone(),
        "status" => status.to_string()
    )
    .record(elapsed.as_secs_f64());

    if elapsed > SLOW_REQUEST_THRESHOLD {
        tracing::warn!(
            method = %method,
            route = %route,
            status,
            elapsed_ms = elapsed.as_millis(),
            "Slow request detected"
        );
    } else {
        tracing::debug!(
            method = %method,
            route = %route,
            status,
            elapsed_ms = elapsed.as_millis(),
            "Request completed"
        );
    }

    response
}

/// Route template the request matched, e.g. `/ebs/*all`
fn route_label(req: &Request) -> String {
    req.extensions()
        .get::<MatchedPath>()
        .map(|path| path.as_str().to_owned())
        .unwrap_or_else(|| UNMATCHED_ROUTE.to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, http::StatusCode, routing::post, Router};
    use tower::ServiceExt;

    async fn label_echo(req: Request, next: Next) -> Response {
        let label = route_label(&req);
        let mut response = next.run(req).await;
        response.headers_mut().insert("x-route", label.parse().unwrap());
        response
    }

    fn router() -> Router {
        Router::new()
            .route("/ebs/*all", post(|| async { StatusCode::ACCEPTED }))
            .fallback(|| async { StatusCode::NOT_FOUND })
            .layer(axum::middleware::from_fn(timing_middleware))
            .layer(axum::middleware::from_fn(label_echo))
    }

    fn post_to(uri: &str) -> Request {
        axum::http::Request::builder()
            .method("POST")
            .uri(uri)
            .body(Body::empty())
            .unwrap()
    }

    #[tokio::test]
    async fn test_label_is_route_template() {
        let response = router()
            .oneshot(post_to("/ebs/cardTransfer?PAN=5061234567890123"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::ACCEPTED);
        assert_eq!(response.headers()["x-route"], "/ebs/*all");
    }

    #[tokio::test]
    async fn test_unmatched_request_label() {
        let response = router().oneshot(post_to("/nowhere")).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(response.headers()["x-route"], UNMATCHED_ROUTE);
    }
}
