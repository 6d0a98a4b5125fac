use endsession_core::errors::descriptions;
use endsession_core::{
    EndpointError, EndpointRequest, EndpointResponse, EndpointResult,
    ExtractLogoutRequestContext, HandleLogoutRequestContext, LogoutProvider, ProtocolRequest,
    ProtocolResponse, Rejection, Stage, StageAction, ValidateLogoutRequestContext,
};
use tokio_util::sync::CancellationToken;

use crate::pipeline::run_stage;
use crate::use_cases::decode::{DecodedRequest, decode_logout_request};
use crate::use_cases::dispatch::dispatch;

/// Host-level switches of the logout endpoint.
#[derive(Debug, Clone, Default)]
pub struct LogoutOptions {
    /// Leave error responses to the application's own error pages instead of
    /// rendering them inline.
    pub enable_error_passthrough: bool,
}

/// Per-call state of a logout request.
///
/// `request` is set once the Extract stage has continued and `response` once a
/// response has been dispatched. Hosts forward both to their next handler when the
/// call is not handled.
#[derive(Debug, Clone, Default)]
pub struct LogoutTransaction {
    pub request: Option<ProtocolRequest>,
    pub response: Option<ProtocolResponse>,
}

enum Flow {
    Done(EndpointResult),
    Dispatch(ProtocolResponse),
}

/// Logout use case - runs the OpenID Connect end-session pipeline.
pub struct LogoutUseCase<P>
where
    P: LogoutProvider,
{
    provider: P,
    options: LogoutOptions,
}

impl<P> LogoutUseCase<P>
where
    P: LogoutProvider,
{
    pub fn new(provider: P, options: LogoutOptions) -> Self {
        Self { provider, options }
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    pub fn options(&self) -> &LogoutOptions {
        &self.options
    }

    /// Execute the logout endpoint for one HTTP call.
    ///
    /// # Arguments
    /// * `http` - The incoming HTTP request
    /// * `transport` - Where the HTTP response is written
    /// * `transaction` - Receives the resolved request and dispatched response
    ///
    /// # Returns
    /// Whether the host must stop (`Handled`) or continue with its next handler
    /// (`NotHandled`), or an `EndpointError` if the call has to be aborted.
    #[tracing::instrument(name = "LogoutUseCase::execute", skip_all)]
    pub async fn execute<R>(
        &self,
        http: &mut R,
        transport: &mut dyn EndpointResponse,
        transaction: &mut LogoutTransaction,
    ) -> Result<EndpointResult, EndpointError>
    where
        R: EndpointRequest + ?Sized,
    {
        let cancellation = http.cancellation().clone();

        match self
            .process(http, &mut *transport, transaction, &cancellation)
            .await?
        {
            Flow::Done(result) => Ok(result),
            Flow::Dispatch(response) => {
                dispatch(
                    &self.provider,
                    &self.options,
                    transaction,
                    response,
                    transport,
                    &cancellation,
                )
                .await
            }
        }
    }

    /// Complete a logout the host has accepted, delivering `response`.
    ///
    /// This is how a successful logout is answered: the Handle stage skips, the
    /// host terminates the session in its own handler, then signs out through here
    /// with the transaction it was handed. Only the Apply stage and delivery run.
    #[tracing::instrument(name = "LogoutUseCase::sign_out", skip_all)]
    pub async fn sign_out(
        &self,
        transaction: &mut LogoutTransaction,
        response: ProtocolResponse,
        transport: &mut dyn EndpointResponse,
        cancellation: &CancellationToken,
    ) -> Result<EndpointResult, EndpointError> {
        dispatch(
            &self.provider,
            &self.options,
            transaction,
            response,
            transport,
            cancellation,
        )
        .await
    }

    async fn process<R>(
        &self,
        http: &mut R,
        transport: &mut dyn EndpointResponse,
        transaction: &mut LogoutTransaction,
        cancellation: &CancellationToken,
    ) -> Result<Flow, EndpointError>
    where
        R: EndpointRequest + ?Sized,
    {
        let mut request = match decode_logout_request(http, cancellation).await? {
            DecodedRequest::Request(request) => request,
            DecodedRequest::Malformed(rejection) => {
                tracing::info!(
                    error_description = rejection.description.as_deref(),
                    "Malformed logout request"
                );
                return Ok(Flow::Dispatch(rejection.into_response()));
            }
        };

        let mut context =
            ExtractLogoutRequestContext::new(&mut request, &mut *transport, cancellation);
        let outcome = run_stage(
            Stage::Extract,
            cancellation,
            self.provider.extract_logout_request(&mut context),
        )
        .await?;
        if let Some(flow) = resolve(outcome.action()) {
            return Ok(flow);
        }

        let request = transaction.request.insert(request);

        let mut context = ValidateLogoutRequestContext::new(request, &mut *transport, cancellation);
        let outcome = run_stage(
            Stage::Validate,
            cancellation,
            self.provider.validate_logout_request(&mut context),
        )
        .await?;
        let validated_uri = context.post_logout_redirect_uri;
        if let Some(flow) = resolve(outcome.action()) {
            return Ok(flow);
        }
        request.set_validated_post_logout_redirect_uri(validated_uri);

        let mut context = HandleLogoutRequestContext::new(request, &mut *transport, cancellation);
        let outcome = run_stage(
            Stage::Handle,
            cancellation,
            self.provider.handle_logout_request(&mut context),
        )
        .await?;
        if let Some(flow) = resolve(outcome.action()) {
            return Ok(flow);
        }

        // Nothing claimed the request, so it cannot be answered with a success.
        tracing::info!("No provider handled the logout request");
        Ok(Flow::Dispatch(
            Rejection::invalid_request(descriptions::LOGOUT_REQUEST_REJECTED).into_response(),
        ))
    }
}

fn resolve(action: StageAction) -> Option<Flow> {
    match action {
        StageAction::Continue => None,
        StageAction::Return(result) => Some(Flow::Done(result)),
        StageAction::Dispatch(response) => Some(Flow::Dispatch(response)),
    }
}
