use std::sync::Arc;

use axum::{Json, Router, response::IntoResponse, routing::get};
use endsession_adapters::{
    ClientRegistryProvider, HashMapClientStore, LogoutSettings, ServiceSettings,
};
use endsession_application::LogoutUseCase;
use endsession_axum::{LogoutState, logout_routes};
use endsession_core::LogoutProvider;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use crate::tracing::{make_span_with_request_id, on_request, on_response};

/// Logout service exposing the OpenID Connect end-session endpoint
pub struct LogoutService {
    router: Router,
}

impl LogoutService {
    /// Create a new LogoutService around a logout use case
    ///
    /// # Arguments
    /// * `use_case` - The logout pipeline, with its provider and options
    /// * `settings` - Route path and body limit of the logout endpoint
    pub fn new<P>(use_case: Arc<LogoutUseCase<P>>, settings: &LogoutSettings) -> Self
    where
        P: LogoutProvider,
    {
        let state = LogoutState::new(use_case, settings.max_form_body_bytes);

        let router = Router::new()
            .route("/health", get(health))
            .merge(logout_routes(&settings.path, state));

        Self { router }
    }

    /// Create the service from settings, with the configured clients as registry
    pub fn from_settings(settings: &ServiceSettings) -> Self {
        let client_store = HashMapClientStore::with_clients(settings.registered_clients());
        let provider = ClientRegistryProvider::new(client_store);
        let use_case = LogoutUseCase::new(provider, settings.logout_options());

        tracing::debug!(
            clients = settings.clients.len(),
            path = %settings.logout.path,
            "Logout service configured"
        );

        Self::new(Arc::new(use_case), &settings.logout)
    }

    fn with_trace_layer(mut self) -> Self {
        self.router = self.router.layer(
            TraceLayer::new_for_http()
                .make_span_with(make_span_with_request_id)
                .on_request(on_request)
                .on_response(on_response),
        );
        self
    }

    /// Convert the LogoutService into a router that can be mounted on another router
    pub fn as_router(self) -> Router {
        self.with_trace_layer().router
    }

    /// Run the logout service as a standalone server
    ///
    /// # Arguments
    /// * `listener` - TCP listener to bind the server to
    pub async fn run_standalone(self, listener: TcpListener) -> Result<(), std::io::Error> {
        let router = self.as_router();

        tracing::info!("Logout service listening on {}", listener.local_addr()?);

        axum_server::Server::<std::net::SocketAddr>::from_listener(listener)
            .serve(router.into_make_service())
            .await
    }
}

async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}
