//! Delivery of the final logout response.

use endsession_core::{
    ApplyLogoutResponseContext, EndpointError, EndpointResponse, EndpointResult, LogoutProvider,
    MessageType, ProtocolRequest, ProtocolResponse, Stage, StageOutcome,
};
use tokio_util::sync::CancellationToken;

use crate::pipeline::run_stage;
use crate::use_cases::logout::{LogoutOptions, LogoutTransaction};

/// Run the Apply stage and deliver `response` through exactly one mechanism.
///
/// Error responses get a 400 and are either rendered inline as JSON or left to the
/// host's error pages. Success responses redirect to the resolved post-logout
/// redirect URI, or finish without touching the transport when there is none.
pub(crate) async fn dispatch<P>(
    provider: &P,
    options: &LogoutOptions,
    transaction: &mut LogoutTransaction,
    mut response: ProtocolResponse,
    transport: &mut dyn EndpointResponse,
    cancellation: &CancellationToken,
) -> Result<EndpointResult, EndpointError>
where
    P: LogoutProvider,
{
    response.set_message_type(MessageType::LogoutResponse);

    let mut context = ApplyLogoutResponseContext::new(
        transaction.request.as_ref(),
        &mut response,
        &mut *transport,
        cancellation,
    );
    let outcome = run_stage(
        Stage::Apply,
        cancellation,
        provider.apply_logout_response(&mut context),
    )
    .await?;
    let post_logout_redirect_uri = context.post_logout_redirect_uri;

    let result = match outcome {
        StageOutcome::Handled => Ok(EndpointResult::Handled),
        StageOutcome::Skipped => Ok(EndpointResult::NotHandled),
        StageOutcome::Rejected(rejection) => {
            response = rejection.into_response();
            response.set_message_type(MessageType::LogoutResponse);
            deliver(
                transaction.request.as_ref(),
                &mut response,
                post_logout_redirect_uri,
                options,
                transport,
            )
        }
        StageOutcome::Continue => deliver(
            transaction.request.as_ref(),
            &mut response,
            post_logout_redirect_uri,
            options,
            transport,
        ),
    };

    transaction.response = Some(response);
    result
}

fn deliver(
    request: Option<&ProtocolRequest>,
    response: &mut ProtocolResponse,
    post_logout_redirect_uri: Option<String>,
    options: &LogoutOptions,
    transport: &mut dyn EndpointResponse,
) -> Result<EndpointResult, EndpointError> {
    if response.is_error() {
        transport.set_status(400);

        if options.enable_error_passthrough {
            tracing::info!(
                error = response.error(),
                "Logout error response left to the application error pages"
            );
            return Ok(EndpointResult::NotHandled);
        }

        let body = serde_json::to_value(response.parameters())
            .map_err(|e| EndpointError::Render(e.to_string()))?;
        transport.write_json(&body);

        tracing::info!(
            error = response.error(),
            error_description = response.error_description(),
            "Logout error response returned"
        );
        return Ok(EndpointResult::Handled);
    }

    let Some(post_logout_redirect_uri) =
        post_logout_redirect_uri.filter(|uri| !uri.is_empty())
    else {
        tracing::debug!("Logout completed without a post-logout redirect");
        return Ok(EndpointResult::Handled);
    };

    let Some(request) = request else {
        tracing::error!(
            post_logout_redirect_uri,
            "A post-logout redirect was resolved but no logout request was extracted"
        );
        return Err(EndpointError::RequestNotExtracted);
    };

    // Logout responses echo the request state unless the provider chose one.
    if response.state().is_none_or(str::is_empty) {
        if let Some(state) = request.state() {
            response.set_state(Some(state.to_string()));
        }
    }

    let location = append_query(
        &post_logout_redirect_uri,
        &response.parameters().to_query_pairs(),
    )?;

    tracing::info!(location, "Redirecting to the post-logout redirect URI");
    transport.redirect(&location);

    Ok(EndpointResult::Handled)
}

/// Append URL-encoded `pairs` to `uri`, keeping any existing query and fragment.
fn append_query(uri: &str, pairs: &[(String, String)]) -> Result<String, EndpointError> {
    if pairs.is_empty() {
        return Ok(uri.to_string());
    }

    let query =
        serde_urlencoded::to_string(pairs).map_err(|e| EndpointError::Render(e.to_string()))?;

    let (base, fragment) = match uri.split_once('#') {
        Some((base, fragment)) => (base, Some(fragment)),
        None => (uri, None),
    };

    let separator = if !base.contains('?') {
        "?"
    } else if base.ends_with('?') || base.ends_with('&') {
        ""
    } else {
        "&"
    };

    let mut location = format!("{base}{separator}{query}");
    if let Some(fragment) = fragment {
        location.push('#');
        location.push_str(fragment);
    }

    Ok(location)
}
