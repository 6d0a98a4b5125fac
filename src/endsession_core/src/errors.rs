//! Protocol error codes and unrecoverable endpoint faults.

use thiserror::Error;

use crate::http_abstraction::TransportError;
use crate::stages::Stage;

pub const INVALID_REQUEST: &str = "invalid_request";
pub const SERVER_ERROR: &str = "server_error";

/// Fixed `error_description` values produced by the endpoint itself.
pub mod descriptions {
    pub const MISSING_CONTENT_TYPE: &str = "The mandatory 'Content-Type' header must be specified.";
    pub const INVALID_CONTENT_TYPE: &str = "The specified 'Content-Type' header is not valid.";
    pub const INVALID_HTTP_METHOD: &str = "The specified HTTP method is not valid.";
    pub const INVALID_FORM_BODY: &str = "The request body is not a valid form payload.";
    pub const INVALID_QUERY_STRING: &str = "The request query string is not valid.";
    pub const LOGOUT_REQUEST_REJECTED: &str =
        "The logout request was rejected by the authorization server.";
}

pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Faults that abort an endpoint call.
///
/// None of these are protocol errors: they are never rendered to the client as
/// `error`/`error_description` and the host decides how to fail the call.
#[derive(Debug, Error)]
pub enum EndpointError {
    #[error("The endpoint call was cancelled")]
    Cancelled,

    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    #[error("The {stage} hook failed: {source}")]
    Provider {
        stage: Stage,
        #[source]
        source: BoxError,
    },

    #[error("A redirect was requested but no logout request was extracted")]
    RequestNotExtracted,

    #[error("Failed to render the response: {0}")]
    Render(String),
}
