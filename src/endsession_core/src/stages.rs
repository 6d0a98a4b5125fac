//! Pipeline stages, their contexts, and the outcome contract shared by all of them.
//!
//! Every provider hook receives a stage-specific context and returns a
//! [`StageOutcome`]. Because the outcome is a return value rather than a set of
//! flags on the context, a hook resolves to exactly one outcome.

use tokio_util::sync::CancellationToken;

use crate::errors::INVALID_REQUEST;
use crate::http_abstraction::EndpointResponse;
use crate::message::{ProtocolRequest, ProtocolResponse};

/// The four extension points of the logout pipeline, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Extract,
    Validate,
    Handle,
    Apply,
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Stage::Extract => write!(f, "extract"),
            Stage::Validate => write!(f, "validate"),
            Stage::Handle => write!(f, "handle"),
            Stage::Apply => write!(f, "apply"),
        }
    }
}

/// Protocol error raised by policy code.
///
/// A missing or empty `error` code is reported as `invalid_request`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Rejection {
    pub error: Option<String>,
    pub description: Option<String>,
    pub uri: Option<String>,
}

impl Rejection {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: Some(error.into()),
            ..Self::default()
        }
    }

    pub fn invalid_request(description: impl Into<String>) -> Self {
        Self::new(INVALID_REQUEST).with_description(description)
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_uri(mut self, uri: impl Into<String>) -> Self {
        self.uri = Some(uri.into());
        self
    }

    /// Error response carrying this rejection's fields.
    pub fn into_response(self) -> ProtocolResponse {
        let error = self
            .error
            .filter(|error| !error.is_empty())
            .unwrap_or_else(|| INVALID_REQUEST.to_string());

        ProtocolResponse::error_response(error, self.description, self.uri)
    }
}

/// What a stage resolved to.
#[derive(Debug, Clone, PartialEq)]
pub enum StageOutcome {
    /// Nothing decided, move on to the next stage.
    Continue,
    /// Policy code produced the complete HTTP response itself.
    Handled,
    /// Policy code defers the call to whatever runs next in the host.
    Skipped,
    /// Policy code refused the request with a protocol error.
    Rejected(Rejection),
}

impl StageOutcome {
    pub fn reject(error: impl Into<String>, description: impl Into<String>) -> Self {
        StageOutcome::Rejected(Rejection::new(error).with_description(description))
    }

    pub fn action(self) -> StageAction {
        match self {
            StageOutcome::Handled => StageAction::Return(EndpointResult::Handled),
            StageOutcome::Skipped => StageAction::Return(EndpointResult::NotHandled),
            StageOutcome::Rejected(rejection) => StageAction::Dispatch(rejection.into_response()),
            StageOutcome::Continue => StageAction::Continue,
        }
    }
}

/// Final answer of an endpoint call to its host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndpointResult {
    /// The HTTP response is complete; the host must not run anything else.
    Handled,
    /// The host should continue with its next handler.
    NotHandled,
}

/// What the orchestrator does after a stage.
#[derive(Debug, PartialEq)]
pub enum StageAction {
    Continue,
    Return(EndpointResult),
    Dispatch(ProtocolResponse),
}

/// Context of the Extract stage. The hook may rewrite the decoded request.
pub struct ExtractLogoutRequestContext<'a> {
    pub request: &'a mut ProtocolRequest,
    pub transport: &'a mut dyn EndpointResponse,
    pub cancellation: &'a CancellationToken,
}

impl<'a> ExtractLogoutRequestContext<'a> {
    pub fn new(
        request: &'a mut ProtocolRequest,
        transport: &'a mut dyn EndpointResponse,
        cancellation: &'a CancellationToken,
    ) -> Self {
        Self {
            request,
            transport,
            cancellation,
        }
    }
}

/// Context of the Validate stage.
///
/// `post_logout_redirect_uri` starts empty. A hook approves a redirect target by
/// setting it; the value is only persisted when the stage continues.
pub struct ValidateLogoutRequestContext<'a> {
    pub request: &'a ProtocolRequest,
    pub post_logout_redirect_uri: Option<String>,
    pub transport: &'a mut dyn EndpointResponse,
    pub cancellation: &'a CancellationToken,
}

impl<'a> ValidateLogoutRequestContext<'a> {
    pub fn new(
        request: &'a ProtocolRequest,
        transport: &'a mut dyn EndpointResponse,
        cancellation: &'a CancellationToken,
    ) -> Self {
        Self {
            request,
            post_logout_redirect_uri: None,
            transport,
            cancellation,
        }
    }
}

/// Context of the Handle stage.
pub struct HandleLogoutRequestContext<'a> {
    pub request: &'a ProtocolRequest,
    pub transport: &'a mut dyn EndpointResponse,
    pub cancellation: &'a CancellationToken,
}

impl<'a> HandleLogoutRequestContext<'a> {
    pub fn new(
        request: &'a ProtocolRequest,
        transport: &'a mut dyn EndpointResponse,
        cancellation: &'a CancellationToken,
    ) -> Self {
        Self {
            request,
            transport,
            cancellation,
        }
    }
}

/// Context of the Apply stage.
///
/// `request` is `None` when decoding failed before a request could be built.
/// `post_logout_redirect_uri` is seeded with the request's validated target and is
/// the URI delivery will redirect to.
pub struct ApplyLogoutResponseContext<'a> {
    pub request: Option<&'a ProtocolRequest>,
    pub response: &'a mut ProtocolResponse,
    pub post_logout_redirect_uri: Option<String>,
    pub transport: &'a mut dyn EndpointResponse,
    pub cancellation: &'a CancellationToken,
}

impl<'a> ApplyLogoutResponseContext<'a> {
    pub fn new(
        request: Option<&'a ProtocolRequest>,
        response: &'a mut ProtocolResponse,
        transport: &'a mut dyn EndpointResponse,
        cancellation: &'a CancellationToken,
    ) -> Self {
        let post_logout_redirect_uri = request
            .and_then(ProtocolRequest::validated_post_logout_redirect_uri)
            .map(str::to_string);

        Self {
            request,
            response,
            post_logout_redirect_uri,
            transport,
            cancellation,
        }
    }
}
