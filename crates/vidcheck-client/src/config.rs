//! Client configuration
//!
//! Loaded from environment variables (a `.env` file is honoured), with CLI
//! flags layered on top by the binary.

use std::path::PathBuf;

use crate::network::api::DEFAULT_BASE_URL;
use crate::state::LocalStorage;

#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub api_url: String,
    pub storage: StorageLocation,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageLocation {
    InMemory,
    File(PathBuf),
}

impl ClientConfig {
    pub fn load() -> Self {
        if let Err(e) = dotenvy::dotenv() {
            tracing::trace!("No .env file loaded: {}", e);
        }

        let api_url =
            std::env::var("VIDCHECK_API_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());

        let in_memory = std::env::var("VIDCHECK_IN_MEMORY_STORAGE")
            .map(|v| matches!(v.as_str(), "1" | "true" | "yes"))
            .unwrap_or(false);

        let storage = if in_memory {
            StorageLocation::InMemory
        } else {
            match std::env::var("VIDCHECK_STORAGE_PATH") {
                Ok(path) => StorageLocation::File(PathBuf::from(path)),
                Err(_) => match LocalStorage::default_path() {
                    Some(path) => StorageLocation::File(path),
                    None => {
                        tracing::warn!("Could not determine data directory, storage will not persist");
                        StorageLocation::InMemory
                    }
                },
            }
        };

        Self { api_url, storage }
    }

    pub fn open_storage(&self) -> LocalStorage {
        match &self.storage {
            StorageLocation::InMemory => LocalStorage::in_memory(),
            StorageLocation::File(path) => LocalStorage::open(path),
        }
    }
}
