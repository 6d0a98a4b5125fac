//! HTTP abstraction traits for the logout endpoint.
//!
//! The pipeline never touches a web framework directly. Host crates implement
//! [`EndpointRequest`] and [`EndpointResponse`] on newtype wrappers of their own
//! request/response types (see `endsession_axum`), and the pipeline is generic over
//! those traits.
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │  endsession_core: EndpointRequest/Response   │
//! └──────────────┬───────────────────────────────┘
//!                │
//!                ▼
//! ┌──────────────────────────────────────────────┐
//! │  endsession_axum: AxumEndpointRequest(..)    │
//! │  impl EndpointRequest for AxumEndpointRequest│
//! └──────────────┬───────────────────────────────┘
//!                │
//!                ▼
//! ┌──────────────────────────────────────────────┐
//! │  LogoutUseCase is generic over the traits    │
//! └──────────────────────────────────────────────┘
//! ```

use async_trait::async_trait;
use thiserror::Error;
use tokio_util::sync::CancellationToken;

pub const JSON_CONTENT_TYPE: &str = "application/json;charset=UTF-8";

/// Failures of the host transport while reading a request.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("Failed to read the request body: {0}")]
    Body(String),
}

/// Readable side of an HTTP call.
///
/// Header lookup should be case-insensitive. The cancellation token must be
/// cancelled when the underlying connection goes away.
#[async_trait]
pub trait EndpointRequest: Send {
    /// HTTP method (GET, POST, ...)
    fn method(&self) -> &str;

    /// Header value by name, `None` if absent or not valid UTF-8.
    fn header(&self, name: &str) -> Option<&str>;

    fn content_type(&self) -> Option<&str> {
        self.header("content-type")
    }

    /// Raw query string, without the leading `?`.
    fn query(&self) -> Option<&str>;

    /// Buffer the complete request body.
    ///
    /// Suspends until the body has been fully received.
    async fn read_form_body(&mut self) -> Result<Vec<u8>, TransportError>;

    fn cancellation(&self) -> &CancellationToken;
}

/// Writable side of an HTTP call.
///
/// Writes are buffered by the implementor until the host sends the response, so a
/// call aborted after partial writes never reaches the client half-written.
pub trait EndpointResponse: Send {
    fn set_status(&mut self, code: u16);

    fn set_header(&mut self, name: &str, value: &str);

    /// Replace the response body.
    fn write_body(&mut self, content_type: &str, body: String);

    fn write_json(&mut self, body: &serde_json::Value) {
        self.write_body(JSON_CONTENT_TYPE, body.to_string());
    }

    /// Issue a `302 Found` redirect to `location`.
    fn redirect(&mut self, location: &str) {
        self.set_status(302);
        self.set_header("location", location);
    }
}
