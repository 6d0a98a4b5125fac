//! Axum middleware running the logout pipeline in front of the logout route.

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use endsession_application::LogoutTransaction;
use endsession_core::{EndpointResult, LogoutProvider};
use tokio_util::sync::CancellationToken;

use crate::adapters::{AxumEndpointRequest, AxumEndpointResponse};
use crate::routes::{LogoutRouteError, LogoutState};

/// Logout call handed to the next handler when the pipeline does not handle it.
///
/// Available as a request extension; see [`super::sign_out`].
#[derive(Debug, Clone)]
pub struct LogoutCall {
    pub transaction: LogoutTransaction,
    pub cancellation: CancellationToken,
}

/// Logout endpoint middleware, for `axum::middleware::from_fn_with_state`.
///
/// Runs the pipeline on every call. A handled call is answered here. Otherwise the
/// request moves on with a [`LogoutCall`] extension, and a status the pipeline
/// already decided on (400 for error pass-through) overrides the one of the
/// downstream response.
#[tracing::instrument(name = "Logout", skip_all)]
pub async fn logout_endpoint<P>(
    State(state): State<LogoutState<P>>,
    request: Request,
    next: Next,
) -> Response
where
    P: LogoutProvider,
{
    // Dropping this future (client gone) cancels provider work.
    let cancellation = CancellationToken::new();
    let _guard = cancellation.clone().drop_guard();

    let mut http = AxumEndpointRequest::new(
        request,
        state.max_form_body_bytes,
        cancellation.clone(),
    );
    let mut transport = AxumEndpointResponse::new();
    let mut transaction = LogoutTransaction::default();

    let result = state
        .use_case
        .execute(&mut http, &mut transport, &mut transaction)
        .await;

    match result {
        Ok(EndpointResult::Handled) => transport.into_response(),
        Ok(EndpointResult::NotHandled) => {
            let mut request = http.into_inner();
            request.extensions_mut().insert(LogoutCall {
                transaction,
                cancellation,
            });

            let mut response = next.run(request).await;
            if let Some(status) = transport.status() {
                *response.status_mut() = status;
            }
            response
        }
        Err(e) => LogoutRouteError::from(e).into_response(),
    }
}
