//! Axum integration for the logout endpoint.
//!
//! This crate hosts the framework-agnostic pipeline of `endsession_application` on
//! Axum.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────┐
//! │  endsession_core: transport traits       │
//! └──────────────┬───────────────────────────┘
//!                │
//!                ▼
//! ┌──────────────────────────────────────────┐
//! │  endsession_axum: Axum implementations   │
//! │  - AxumEndpointRequest newtype wrapper   │
//! │  - AxumEndpointResponse                  │
//! │  - logout middleware + sign_out handler  │
//! └──────────────────────────────────────────┘
//! ```
//!
//! # Usage
//!
//! ```ignore
//! use endsession_axum::{LogoutState, logout_routes};
//!
//! let state = LogoutState::new(Arc::new(use_case), 64 * 1024);
//! let app = Router::new().merge(logout_routes("/connect/logout", state));
//! ```

pub mod adapters;
pub mod routes;

// Re-export for convenience
pub use adapters::{AxumEndpointRequest, AxumEndpointResponse};
pub use routes::{
    LogoutCall, LogoutRouteError, LogoutState, logout_endpoint, logout_routes, sign_out,
    with_logout_endpoint,
};
