pub mod config;
pub mod persistence;
pub mod providers;

pub use config::{ClientSettings, LogoutSettings, ServiceSettings};
pub use persistence::hashmap_client_store::HashMapClientStore;
pub use providers::client_registry_provider::{ClientRegistryError, ClientRegistryProvider};
