//! # Endsession - OpenID Connect Logout Endpoint Library
//!
//! This is a facade crate that re-exports all public APIs from the logout endpoint components.
//! Use this crate to get access to all logout functionality in one place.
//!
//! ## Usage
//!
//! Add to your `Cargo.toml`:
//! ```toml
//! [dependencies]
//! endsession = { path = "../endsession" }
//! ```
//!
//! ## Structure
//!
//! - **Protocol messages**: `ParameterBag`, `ProtocolRequest`, `ProtocolResponse`
//! - **Pipeline contract**: `LogoutProvider`, stage contexts, `StageOutcome`
//! - **Use cases**: `LogoutUseCase`
//! - **Adapters**: `HashMapClientStore`, `ClientRegistryProvider`, `ServiceSettings`
//! - **Axum host**: `logout_routes`, `logout_endpoint`, `sign_out`
//! - **Service**: `LogoutService` - The main entry point for the logout service

// ============================================================================
// Protocol Model
// ============================================================================

/// Protocol messages, stages and transport traits
pub mod core {
    pub use endsession_core::*;
}

// Re-export most commonly used core types at the root level
pub use endsession_core::{
    EndpointError, EndpointRequest, EndpointResponse, EndpointResult, MessageType, ParameterBag,
    ParameterValue, ProtocolRequest, ProtocolResponse, Rejection, Stage, StageOutcome,
};

// ============================================================================
// Provider Contract and Ports
// ============================================================================

/// Extension points of the logout pipeline
pub mod providers {
    pub use endsession_core::{
        ApplyLogoutResponseContext, ExtractLogoutRequestContext, HandleLogoutRequestContext,
        LogoutProvider, ValidateLogoutRequestContext,
    };
}

// Re-export the provider contract and the client registry port at root level
pub use endsession_core::{ClientStore, ClientStoreError, LogoutProvider, RegisteredClient};

// ============================================================================
// Use Cases (Application Layer)
// ============================================================================

/// Application use cases
pub mod use_cases {
    pub use endsession_application::*;
}

// Re-export use cases at root level
pub use endsession_application::{LogoutOptions, LogoutTransaction, LogoutUseCase};

// ============================================================================
// Adapters (Infrastructure)
// ============================================================================

/// Infrastructure adapters
pub mod adapters {
    /// Persistence implementations
    pub mod persistence {
        pub use endsession_adapters::persistence::*;
    }

    /// Reference logout policies
    pub mod providers {
        pub use endsession_adapters::providers::*;
    }

    /// Configuration
    pub mod config {
        pub use endsession_adapters::config::*;
    }

    /// Axum host
    pub mod axum {
        pub use endsession_axum::*;
    }
}

// Re-export commonly used adapters at root level
pub use endsession_adapters::{ClientRegistryProvider, HashMapClientStore, ServiceSettings};
pub use endsession_axum::{LogoutCall, LogoutState, logout_routes};

// ============================================================================
// Logout Service (Main Entry Point)
// ============================================================================

/// Main logout service
pub use endsession_service::LogoutService;

// ============================================================================
// Re-export common external dependencies
// ============================================================================

/// Re-export async-trait for implementing provider and store traits
pub use async_trait::async_trait;

/// Re-export the cancellation token observed by provider hooks
pub use tokio_util::sync::CancellationToken;

pub use http;
