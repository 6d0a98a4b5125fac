pub mod client_registry_provider;
