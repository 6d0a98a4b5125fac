pub mod hashmap_client_store;
