pub mod domain;
pub mod errors;
pub mod http_abstraction;
pub mod message;
pub mod ports;
pub mod stages;
pub mod strategies;

// Re-export commonly used types for convenience
pub use domain::client::RegisteredClient;

pub use errors::{BoxError, EndpointError};

pub use message::{
    FromParameter, MessageType, ParameterBag, ParameterError, ParameterValue, ProtocolRequest,
    ProtocolResponse,
};

pub use ports::repositories::{ClientStore, ClientStoreError};

pub use stages::{
    ApplyLogoutResponseContext, EndpointResult, ExtractLogoutRequestContext,
    HandleLogoutRequestContext, Rejection, Stage, StageAction, StageOutcome,
    ValidateLogoutRequestContext,
};

pub use strategies::provider::LogoutProvider;

pub use http_abstraction::{EndpointRequest, EndpointResponse, TransportError};
