//! `/api/*` forwarder
//!
//! Requests under `/api` are passed to the backend origin unchanged: same
//! method, path, query, headers and body. Nothing is inspected or rewritten
//! beyond dropping hop-by-hop headers.

use axum::{
    body::Body,
    extract::State,
    http::{Request, Response, StatusCode},
    response::IntoResponse,
};
use bytes::Bytes;

use super::state::AppState;

/// Forward one request to `{backend.url}{path}?{query}`
pub async fn forward(
    State(state): State<AppState>,
    req: Request<Body>,
) -> Result<Response<Body>, ForwardError> {
    let method = req.method().clone();
    let uri = req.uri().clone();
    let headers = req.headers().clone();

    let body_bytes: Bytes = axum::body::to_bytes(req.into_body(), usize::MAX)
        .await
        .map_err(|e| ForwardError::BodyRead(e.to_string()))?;

    let forward_url = format!("{}{}", state.config.backend.url, uri.path());
    let forward_url = match uri.query() {
        Some(query) if !query.is_empty() => format!("{}?{}", forward_url, query),
        _ => forward_url,
    };

    tracing::debug!("Forwarding {} {} -> {}", method, uri, forward_url);

    let forward_method = reqwest::Method::from_bytes(method.as_str().as_bytes())
        .map_err(|e| ForwardError::Upstream(format!("Invalid HTTP method: {}", e)))?;

    let mut forward_req = state
        .client
        .http()
        .request(forward_method, &forward_url)
        .body(body_bytes);

    for (key, value) in headers.iter() {
        if key == "host" || key == "connection" || key == "transfer-encoding" {
            continue;
        }
        forward_req = forward_req.header(key.as_str(), value.as_bytes().to_vec());
    }

    let response = forward_req
        .send()
        .await
        .map_err(|e| ForwardError::Upstream(e.to_string()))?;

    let status = response.status();
    let response_headers = response.headers().clone();
    let response_body: Bytes = response
        .bytes()
        .await
        .map_err(|e| ForwardError::Upstream(e.to_string()))?;

    let mut builder = Response::builder().status(status.as_u16());
    for (key, value) in response_headers.iter() {
        if key == "transfer-encoding" || key == "connection" || key == "content-length" {
            continue;
        }
        builder = builder.header(key.as_str(), value.as_bytes().to_vec());
    }

    builder
        .body(Body::from(response_body))
        .map_err(|e| ForwardError::ResponseBuild(e.to_string()))
}

/// Errors that can occur while forwarding
#[derive(Debug)]
pub enum ForwardError {
    BodyRead(String),
    Upstream(String),
    ResponseBuild(String),
}

impl IntoResponse for ForwardError {
    fn into_response(self) -> Response<Body> {
        let (status, message) = match self {
            ForwardError::BodyRead(msg) => (StatusCode::BAD_REQUEST, msg),
            ForwardError::Upstream(msg) => (StatusCode::BAD_GATEWAY, msg),
            ForwardError::ResponseBuild(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        tracing::error!("Forward error: {} - {}", status, message);

        (status, message).into_response()
    }
}
