use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use endsession_core::{ClientStore, ClientStoreError, RegisteredClient};

#[derive(Default, Clone)]
pub struct HashMapClientStore {
    clients: Arc<RwLock<HashMap<String, RegisteredClient>>>,
}

impl HashMapClientStore {
    pub fn new() -> Self {
        Self {
            clients: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Store seeded with `clients`; a later duplicate `client_id` replaces an earlier one.
    pub fn with_clients(clients: impl IntoIterator<Item = RegisteredClient>) -> Self {
        let clients = clients
            .into_iter()
            .map(|client| (client.client_id().to_string(), client))
            .collect();

        Self {
            clients: Arc::new(RwLock::new(clients)),
        }
    }
}

#[async_trait::async_trait]
impl ClientStore for HashMapClientStore {
    async fn add_client(&self, client: RegisteredClient) -> Result<(), ClientStoreError> {
        let mut clients = self.clients.write().await;
        if clients.contains_key(client.client_id()) {
            return Err(ClientStoreError::ClientAlreadyExists);
        }
        clients.insert(client.client_id().to_string(), client);
        Ok(())
    }

    async fn get_client(&self, client_id: &str) -> Result<RegisteredClient, ClientStoreError> {
        let clients = self.clients.read().await;
        clients
            .get(client_id)
            .cloned()
            .ok_or(ClientStoreError::ClientNotFound)
    }

    async fn find_by_post_logout_redirect_uri(
        &self,
        uri: &str,
    ) -> Result<Vec<RegisteredClient>, ClientStoreError> {
        let clients = self.clients.read().await;
        Ok(clients
            .values()
            .filter(|client| client.allows_post_logout_redirect_uri(uri))
            .cloned()
            .collect())
    }
}
