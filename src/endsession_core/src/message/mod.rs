//! Protocol message model.
//!
//! Every OpenID Connect message, inbound or outbound, is a [`ParameterBag`].
//! [`ProtocolRequest`] and [`ProtocolResponse`] wrap a bag and expose the
//! well-known parameters as accessors that read and write the bag directly, so
//! the typed view and the raw entries never disagree.

pub mod bag;
pub mod parameter;
pub mod request;
pub mod response;

pub use bag::ParameterBag;
pub use parameter::{FromParameter, ParameterError, ParameterValue};
pub use request::ProtocolRequest;
pub use response::ProtocolResponse;

/// Well-known OpenID Connect parameter names used by the logout flow.
pub mod parameters {
    pub const CLIENT_ID: &str = "client_id";
    pub const ERROR: &str = "error";
    pub const ERROR_DESCRIPTION: &str = "error_description";
    pub const ERROR_URI: &str = "error_uri";
    pub const ID_TOKEN_HINT: &str = "id_token_hint";
    pub const LOGOUT_HINT: &str = "logout_hint";
    pub const POST_LOGOUT_REDIRECT_URI: &str = "post_logout_redirect_uri";
    pub const STATE: &str = "state";
    pub const UI_LOCALES: &str = "ui_locales";
}

/// Kind of protocol message a bag represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageType {
    LogoutRequest,
    LogoutResponse,
}

impl std::fmt::Display for MessageType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MessageType::LogoutRequest => write!(f, "logout_request"),
            MessageType::LogoutResponse => write!(f, "logout_response"),
        }
    }
}
