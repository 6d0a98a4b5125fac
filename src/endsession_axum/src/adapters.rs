//! Axum implementations of the endpoint transport traits.
//!
//! The traits are defined in `endsession_core`; they are implemented here on
//! newtype wrappers to stay clear of the orphan rule:
//!
//! ```text
//! ┌────────────────────────────────────────────┐
//! │  endsession_core::EndpointRequest (trait)  │
//! └────────────────┬───────────────────────────┘
//!                  │
//!                  ▼
//! ┌────────────────────────────────────────────┐
//! │  AxumEndpointRequest(axum::Request, ..)    │
//! │  impl EndpointRequest for .. { }           │
//! └────────────────────────────────────────────┘
//! ```

use async_trait::async_trait;
use axum::body::Body;
use axum::extract::Request;
use axum::http::header::CONTENT_TYPE;
use axum::http::{HeaderMap, HeaderName, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use endsession_core::{EndpointRequest, EndpointResponse, TransportError};
use tokio_util::sync::CancellationToken;

/// Axum request seen through [`EndpointRequest`].
///
/// Reading the form body buffers it (up to `body_limit` bytes) and puts it back, so
/// the request can still be handed to the next handler.
pub struct AxumEndpointRequest {
    request: Request,
    body_limit: usize,
    cancellation: CancellationToken,
}

impl AxumEndpointRequest {
    pub fn new(request: Request, body_limit: usize, cancellation: CancellationToken) -> Self {
        Self {
            request,
            body_limit,
            cancellation,
        }
    }

    pub fn into_inner(self) -> Request {
        self.request
    }
}

#[async_trait]
impl EndpointRequest for AxumEndpointRequest {
    fn method(&self) -> &str {
        self.request.method().as_str()
    }

    fn header(&self, name: &str) -> Option<&str> {
        self.request.headers().get(name)?.to_str().ok()
    }

    fn query(&self) -> Option<&str> {
        self.request.uri().query()
    }

    async fn read_form_body(&mut self) -> Result<Vec<u8>, TransportError> {
        let body = std::mem::take(self.request.body_mut());
        let bytes = axum::body::to_bytes(body, self.body_limit)
            .await
            .map_err(|e| TransportError::Body(e.to_string()))?;

        *self.request.body_mut() = Body::from(bytes.clone());
        Ok(bytes.to_vec())
    }

    fn cancellation(&self) -> &CancellationToken {
        &self.cancellation
    }
}

/// Buffered response written through [`EndpointResponse`].
///
/// Nothing reaches the client until it is turned into an axum [`Response`].
#[derive(Debug, Default)]
pub struct AxumEndpointResponse {
    status: Option<StatusCode>,
    headers: HeaderMap,
    body: Option<String>,
}

impl AxumEndpointResponse {
    pub fn new() -> Self {
        Self::default()
    }

    /// Status written so far, if any.
    pub fn status(&self) -> Option<StatusCode> {
        self.status
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }
}

impl EndpointResponse for AxumEndpointResponse {
    fn set_status(&mut self, code: u16) {
        match StatusCode::from_u16(code) {
            Ok(status) => self.status = Some(status),
            Err(_) => tracing::warn!(code, "Ignoring invalid status code"),
        }
    }

    fn set_header(&mut self, name: &str, value: &str) {
        let (Ok(name), Ok(value)) = (
            HeaderName::from_bytes(name.as_bytes()),
            HeaderValue::from_str(value),
        ) else {
            tracing::warn!(name, "Ignoring invalid response header");
            return;
        };

        self.headers.insert(name, value);
    }

    fn write_body(&mut self, content_type: &str, body: String) {
        self.set_header(CONTENT_TYPE.as_str(), content_type);
        self.body = Some(body);
    }
}

impl IntoResponse for AxumEndpointResponse {
    fn into_response(self) -> Response {
        let status = self.status.unwrap_or(StatusCode::OK);
        let body = self.body.map(Body::from).unwrap_or_else(Body::empty);

        (status, self.headers, body).into_response()
    }
}
