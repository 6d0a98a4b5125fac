//! Turns a raw HTTP call into a logout request message.

use endsession_core::errors::descriptions;
use endsession_core::{
    EndpointError, EndpointRequest, MessageType, ParameterBag, ProtocolRequest, Rejection,
};
use tokio_util::sync::CancellationToken;

const FORM_URLENCODED: &str = "application/x-www-form-urlencoded";

enum Carrier {
    QueryString,
    FormBody,
}

/// Result of decoding an HTTP call.
#[derive(Debug, PartialEq)]
pub enum DecodedRequest {
    Request(ProtocolRequest),
    /// The call cannot carry a logout request; answer with this protocol error.
    Malformed(Rejection),
}

/// Decode a logout request from its HTTP transport.
///
/// GET requests are read from the query string. POST requests must carry an
/// `application/x-www-form-urlencoded` body (a `charset` parameter is allowed).
/// Every other method is malformed.
///
/// # Errors
///
/// Returns [`EndpointError::Cancelled`] if the call is cancelled while the body is
/// being read, and [`EndpointError::Transport`] if the host fails to deliver it.
pub async fn decode_logout_request<R>(
    http: &mut R,
    cancellation: &CancellationToken,
) -> Result<DecodedRequest, EndpointError>
where
    R: EndpointRequest + ?Sized,
{
    let carrier = match http.method() {
        "GET" => Carrier::QueryString,
        "POST" => Carrier::FormBody,
        method => {
            tracing::debug!(method, "Unsupported HTTP method");
            return Ok(malformed(descriptions::INVALID_HTTP_METHOD));
        }
    };

    let parameters = match carrier {
        Carrier::QueryString => {
            match ParameterBag::from_urlencoded(http.query().unwrap_or_default()) {
                Ok(parameters) => parameters,
                Err(e) => {
                    tracing::debug!(error = %e, "Invalid query string");
                    return Ok(malformed(descriptions::INVALID_QUERY_STRING));
                }
            }
        }
        Carrier::FormBody => {
            let Some(content_type) = http
                .content_type()
                .filter(|content_type| !content_type.trim().is_empty())
            else {
                return Ok(malformed(descriptions::MISSING_CONTENT_TYPE));
            };

            if !is_form_content_type(content_type) {
                tracing::debug!(content_type, "Unsupported content type");
                return Ok(malformed(descriptions::INVALID_CONTENT_TYPE));
            }

            let body = tokio::select! {
                biased;
                _ = cancellation.cancelled() => return Err(EndpointError::Cancelled),
                body = http.read_form_body() => body?,
            };

            let Ok(body) = std::str::from_utf8(&body) else {
                return Ok(malformed(descriptions::INVALID_FORM_BODY));
            };

            match ParameterBag::from_urlencoded(body) {
                Ok(parameters) => parameters,
                Err(e) => {
                    tracing::debug!(error = %e, "Invalid form body");
                    return Ok(malformed(descriptions::INVALID_FORM_BODY));
                }
            }
        }
    };

    tracing::debug!(parameters = parameters.len(), "Logout request decoded");

    Ok(DecodedRequest::Request(ProtocolRequest::new(
        MessageType::LogoutRequest,
        parameters,
    )))
}

fn malformed(description: &str) -> DecodedRequest {
    DecodedRequest::Malformed(Rejection::invalid_request(description))
}

fn is_form_content_type(content_type: &str) -> bool {
    content_type
        .trim_start()
        .get(..FORM_URLENCODED.len())
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case(FORM_URLENCODED))
}
