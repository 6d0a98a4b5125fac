use async_trait::async_trait;
use endsession_core::errors::INVALID_REQUEST;
use endsession_core::{
    ClientStore, ClientStoreError, HandleLogoutRequestContext, LogoutProvider, StageOutcome,
    ValidateLogoutRequestContext,
};

pub const INVALID_POST_LOGOUT_REDIRECT_URI: &str =
    "The specified 'post_logout_redirect_uri' is invalid.";
pub const INVALID_CLIENT_ID: &str = "The specified 'client_id' is invalid.";

/// Error types for the client registry provider
#[derive(Debug, thiserror::Error)]
pub enum ClientRegistryError {
    #[error("Client store error: {0}")]
    ClientStoreError(#[from] ClientStoreError),
}

/// Logout policy backed by the registry of relying parties.
///
/// Validate accepts a `post_logout_redirect_uri` only if it is an absolute URI
/// registered by some client, or by the client named in `client_id` when one is
/// given. Handle skips, leaving session termination to the host's next handler,
/// which completes the logout through `LogoutUseCase::sign_out`.
#[derive(Clone)]
pub struct ClientRegistryProvider<C>
where
    C: ClientStore,
{
    client_store: C,
}

impl<C> ClientRegistryProvider<C>
where
    C: ClientStore,
{
    pub fn new(client_store: C) -> Self {
        Self { client_store }
    }

    pub fn client_store(&self) -> &C {
        &self.client_store
    }

    /// Why `uri` may not be used for this logout, if it may not.
    async fn registration_error(
        &self,
        client_id: Option<&str>,
        uri: &str,
    ) -> Result<Option<&'static str>, ClientRegistryError> {
        let Some(client_id) = client_id else {
            let clients = self.client_store.find_by_post_logout_redirect_uri(uri).await?;
            return Ok(clients
                .is_empty()
                .then_some(INVALID_POST_LOGOUT_REDIRECT_URI));
        };

        match self.client_store.get_client(client_id).await {
            Ok(client) if client.allows_post_logout_redirect_uri(uri) => Ok(None),
            Ok(_) => Ok(Some(INVALID_POST_LOGOUT_REDIRECT_URI)),
            Err(ClientStoreError::ClientNotFound) => Ok(Some(INVALID_CLIENT_ID)),
            Err(e) => Err(e.into()),
        }
    }
}

#[async_trait]
impl<C> LogoutProvider for ClientRegistryProvider<C>
where
    C: ClientStore + 'static,
{
    type Error = ClientRegistryError;

    #[tracing::instrument(name = "ClientRegistryProvider::validate", skip_all)]
    async fn validate_logout_request(
        &self,
        context: &mut ValidateLogoutRequestContext<'_>,
    ) -> Result<StageOutcome, Self::Error> {
        let client_id = context.request.client_id().filter(|id| !id.is_empty());

        let Some(uri) = context
            .request
            .post_logout_redirect_uri()
            .filter(|uri| !uri.is_empty())
        else {
            return Ok(StageOutcome::Continue);
        };

        if !is_absolute_uri(uri) {
            tracing::debug!(uri, "Post-logout redirect URI is not absolute");
            return Ok(StageOutcome::reject(
                INVALID_REQUEST,
                INVALID_POST_LOGOUT_REDIRECT_URI,
            ));
        }

        if let Some(description) = self.registration_error(client_id, uri).await? {
            tracing::debug!(uri, client_id, "Post-logout redirect URI is not registered");
            return Ok(StageOutcome::reject(INVALID_REQUEST, description));
        }

        context.post_logout_redirect_uri = Some(uri.to_string());
        Ok(StageOutcome::Continue)
    }

    async fn handle_logout_request(
        &self,
        _context: &mut HandleLogoutRequestContext<'_>,
    ) -> Result<StageOutcome, Self::Error> {
        Ok(StageOutcome::Skipped)
    }
}

/// Absolute URI with a scheme and an authority, and without a fragment.
fn is_absolute_uri(uri: &str) -> bool {
    if uri.contains('#') {
        return false;
    }

    uri.parse::<http::Uri>()
        .is_ok_and(|uri| uri.scheme().is_some() && uri.authority().is_some())
}
