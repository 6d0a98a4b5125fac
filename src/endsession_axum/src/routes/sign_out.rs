use askama::Template;
use axum::Extension;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use endsession_core::{EndpointResult, LogoutProvider, ProtocolResponse};

use crate::adapters::AxumEndpointResponse;
use crate::routes::logout::LogoutCall;
use crate::routes::{LogoutRouteError, LogoutState};

#[derive(Template)]
#[template(path = "logout_error.html")]
struct LogoutErrorPage<'a> {
    error: &'a str,
    description: Option<&'a str>,
    uri: Option<&'a str>,
}

/// Default completion handler of the logout route.
///
/// Runs behind [`super::logout_endpoint`]. A pass-through error response is
/// rendered as an HTML page; otherwise the session is considered terminated and
/// the logout is completed, which redirects to the approved post-logout redirect
/// URI when there is one.
#[tracing::instrument(name = "SignOut", skip_all)]
pub async fn sign_out<P>(
    State(state): State<LogoutState<P>>,
    call: Option<Extension<LogoutCall>>,
) -> Response
where
    P: LogoutProvider,
{
    let Some(Extension(mut call)) = call else {
        return LogoutRouteError::MissingLogoutCall.into_response();
    };

    if let Some(response) = error_response(call.transaction.response.as_ref()) {
        return render_error_page(response);
    }

    let mut transport = AxumEndpointResponse::new();
    let result = state
        .use_case
        .sign_out(
            &mut call.transaction,
            ProtocolResponse::new(),
            &mut transport,
            &call.cancellation,
        )
        .await;

    match result {
        Ok(EndpointResult::Handled) => transport.into_response(),
        Ok(EndpointResult::NotHandled) => match error_response(call.transaction.response.as_ref()) {
            Some(response) => render_error_page(response),
            None => StatusCode::NO_CONTENT.into_response(),
        },
        Err(e) => LogoutRouteError::from(e).into_response(),
    }
}

fn error_response(response: Option<&ProtocolResponse>) -> Option<&ProtocolResponse> {
    response.filter(|response| response.is_error())
}

fn render_error_page(response: &ProtocolResponse) -> Response {
    let page = LogoutErrorPage {
        error: response.error().unwrap_or_default(),
        description: response.error_description(),
        uri: response.error_uri(),
    };

    match page.render() {
        Ok(html) => (StatusCode::BAD_REQUEST, Html(html)).into_response(),
        Err(e) => LogoutRouteError::from(e).into_response(),
    }
}
