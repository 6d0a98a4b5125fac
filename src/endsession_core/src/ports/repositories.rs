use async_trait::async_trait;
use thiserror::Error;

use crate::domain::client::RegisteredClient;

// ClientStore port trait and errors
#[derive(Debug, Error)]
pub enum ClientStoreError {
    #[error("Client already exists")]
    ClientAlreadyExists,
    #[error("Client not found")]
    ClientNotFound,
    #[error("Unexpected error {0}")]
    UnexpectedError(String),
}

impl PartialEq for ClientStoreError {
    fn eq(&self, other: &Self) -> bool {
        matches!(
            (self, other),
            (Self::ClientAlreadyExists, Self::ClientAlreadyExists)
                | (Self::ClientNotFound, Self::ClientNotFound)
                | (Self::UnexpectedError(_), Self::UnexpectedError(_))
        )
    }
}

#[async_trait]
pub trait ClientStore: Send + Sync {
    async fn add_client(&self, client: RegisteredClient) -> Result<(), ClientStoreError>;
    async fn get_client(&self, client_id: &str) -> Result<RegisteredClient, ClientStoreError>;
    /// Every client that registered `uri` as a post-logout redirect URI.
    async fn find_by_post_logout_redirect_uri(
        &self,
        uri: &str,
    ) -> Result<Vec<RegisteredClient>, ClientStoreError>;
}
