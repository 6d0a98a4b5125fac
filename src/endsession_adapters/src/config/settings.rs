use ::config::{Config, ConfigBuilder, ConfigError, Environment, File, FileFormat};
use ::config::builder::DefaultState;
use endsession_application::LogoutOptions;
use endsession_core::RegisteredClient;
use serde::Deserialize;

use super::constants::{CONFIG_FILE, env, prod};

/// Settings of the logout service.
///
/// Sources, later ones winning: built-in defaults, the optional `config/base.json`
/// file, then `ENDSESSION__*` environment variables (a `.env` file is honoured), e.g.
/// `ENDSESSION__LOGOUT__ENABLE_ERROR_PASSTHROUGH=true`.
#[derive(Debug, Clone, Deserialize)]
pub struct ServiceSettings {
    pub application: ApplicationSettings,
    pub logout: LogoutSettings,
    #[serde(default)]
    pub clients: Vec<ClientSettings>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApplicationSettings {
    pub address: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LogoutSettings {
    /// Route the logout endpoint is mounted on.
    pub path: String,
    pub enable_error_passthrough: bool,
    pub max_form_body_bytes: usize,
}

/// A relying party registered through configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ClientSettings {
    pub client_id: String,
    #[serde(default)]
    pub post_logout_redirect_uris: Vec<String>,
}

impl ServiceSettings {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        Self::builder()?
            .add_source(File::with_name(CONFIG_FILE).required(false))
            .add_source(
                Environment::with_prefix(env::ENV_PREFIX)
                    .prefix_separator(env::ENV_SEPARATOR)
                    .separator(env::ENV_SEPARATOR)
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }

    /// Settings from a JSON document layered over the defaults, ignoring the
    /// environment.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Self::builder()?
            .add_source(File::from_str(json, FileFormat::Json))
            .build()?
            .try_deserialize()
    }

    fn builder() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        Config::builder()
            .set_default("application.address", prod::APP_ADDRESS)?
            .set_default("logout.path", prod::LOGOUT_PATH)?
            .set_default("logout.enable_error_passthrough", false)?
            .set_default("logout.max_form_body_bytes", prod::MAX_FORM_BODY_BYTES as i64)
    }

    pub fn logout_options(&self) -> LogoutOptions {
        LogoutOptions {
            enable_error_passthrough: self.logout.enable_error_passthrough,
        }
    }

    pub fn registered_clients(&self) -> Vec<RegisteredClient> {
        self.clients
            .iter()
            .map(|client| {
                RegisteredClient::new(
                    client.client_id.clone(),
                    client.post_logout_redirect_uris.clone(),
                )
            })
            .collect()
    }
}
