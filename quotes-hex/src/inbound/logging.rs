//! Request logging middleware.

use std::convert::Infallible;

use axum::{body::Body, extract::State, http::Request, middleware::Next, response::Response};

use crate::LoggingInterceptor;

/// Returns the request target as received: path plus query string.
fn request_url(request: &Request<Body>) -> String {
    request
        .uri()
        .path_and_query()
        .map(|pq| pq.as_str().to_string())
        .unwrap_or_else(|| request.uri().path().to_string())
}

/// Logging middleware.
///
/// Routes every request through [`LoggingInterceptor::intercept`]. Axum
/// handlers always produce a response, so every request that reaches a
/// route yields exactly one line.
pub async fn logging_middleware(
    State(interceptor): State<LoggingInterceptor>,
    request: Request<Body>,
    next: Next,
) -> Response {
    let method = request.method().to_string();
    let url = request_url(&request);

    let Ok(response) = interceptor
        .intercept(&method, &url, async move {
            Ok::<_, Infallible>(next.run(request).await)
        })
        .await;

    response
}
