use serde::{Deserialize, Serialize};

/// Relying party known to the authorization server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisteredClient {
    client_id: String,
    post_logout_redirect_uris: Vec<String>,
}

impl RegisteredClient {
    pub fn new(client_id: impl Into<String>, post_logout_redirect_uris: Vec<String>) -> Self {
        Self {
            client_id: client_id.into(),
            post_logout_redirect_uris,
        }
    }

    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    pub fn post_logout_redirect_uris(&self) -> &[String] {
        &self.post_logout_redirect_uris
    }

    /// Redirect URIs are compared by simple string comparison, as required by
    /// OpenID Connect RP-Initiated Logout.
    pub fn allows_post_logout_redirect_uri(&self, uri: &str) -> bool {
        self.post_logout_redirect_uris
            .iter()
            .any(|registered| registered == uri)
    }
}
