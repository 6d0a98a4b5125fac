//! Axum routing for the logout endpoint.
//!
//! The pipeline runs as a route layer ([`logout_endpoint`]) in front of the handler
//! that completes a logout ([`sign_out`], or one supplied by the application).

pub mod logout;
pub mod sign_out;

use std::sync::Arc;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{MethodRouter, any};
use axum::{Json, Router, middleware};
use endsession_application::LogoutUseCase;
use endsession_core::{EndpointError, LogoutProvider};
use thiserror::Error;

pub use logout::{LogoutCall, logout_endpoint};
pub use sign_out::sign_out;

/// State shared by the logout middleware and its completion handler.
pub struct LogoutState<P>
where
    P: LogoutProvider,
{
    pub use_case: Arc<LogoutUseCase<P>>,
    pub max_form_body_bytes: usize,
}

impl<P> LogoutState<P>
where
    P: LogoutProvider,
{
    pub fn new(use_case: Arc<LogoutUseCase<P>>, max_form_body_bytes: usize) -> Self {
        Self {
            use_case,
            max_form_body_bytes,
        }
    }
}

impl<P> Clone for LogoutState<P>
where
    P: LogoutProvider,
{
    fn clone(&self) -> Self {
        Self {
            use_case: Arc::clone(&self.use_case),
            max_form_body_bytes: self.max_form_body_bytes,
        }
    }
}

/// Router serving the logout endpoint on `path` with the default [`sign_out`]
/// handler.
pub fn logout_routes<P>(path: &str, state: LogoutState<P>) -> Router
where
    P: LogoutProvider,
{
    with_logout_endpoint(any(sign_out::<P>), path, state)
}

/// Router serving the logout endpoint on `path`, completing logouts with `handler`.
///
/// `handler` receives the [`LogoutCall`] as a request extension.
pub fn with_logout_endpoint<P>(
    handler: MethodRouter<LogoutState<P>>,
    path: &str,
    state: LogoutState<P>,
) -> Router
where
    P: LogoutProvider,
{
    Router::new()
        .route(path, handler)
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            logout_endpoint::<P>,
        ))
        .with_state(state)
}

/// Errors of the logout routes that cannot be answered with a protocol message
#[derive(Debug, Error)]
pub enum LogoutRouteError {
    #[error("Logout endpoint failed: {0}")]
    Endpoint(#[from] EndpointError),
    #[error("Logout handler reached without a logout call")]
    MissingLogoutCall,
    #[error("Failed to render the logout error page: {0}")]
    Template(#[from] askama::Error),
}

impl IntoResponse for LogoutRouteError {
    fn into_response(self) -> Response {
        tracing::error!(error = %self, "Logout request failed");

        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(serde_json::json!({ "message": "Internal server error" })),
        )
            .into_response()
    }
}
