use serde_json::{Map, Value};
use vidcheck_protocol::UserResponse;

use super::storage::LocalStorage;

pub const TOKEN_KEY: &str = "token";
pub const USER_INFO_KEY: &str = "userInfo";
/// Backend session cookies, kept so a later process can refresh or log out
pub const COOKIES_KEY: &str = "cookies";

/// Session accessor over local storage
///
/// Reads never fail: a missing or corrupt `userInfo` reads as an empty object.
#[derive(Debug, Clone)]
pub struct AuthService {
    storage: LocalStorage,
}

impl AuthService {
    pub fn new(storage: LocalStorage) -> Self {
        Self { storage }
    }

    pub fn storage(&self) -> &LocalStorage {
        &self.storage
    }

    pub fn get_user_details(&self) -> Value {
        let Some(raw) = self.storage.get_item(USER_INFO_KEY) else {
            return Value::Object(Map::new());
        };

        match serde_json::from_str(&raw) {
            Ok(value) => value,
            Err(e) => {
                tracing::debug!("Ignoring malformed userInfo: {}", e);
                Value::Object(Map::new())
            }
        }
    }

    /// Stored profile, if it parses as a full user record
    pub fn get_user(&self) -> Option<UserResponse> {
        serde_json::from_value(self.get_user_details()).ok()
    }

    pub fn get_token(&self) -> Option<String> {
        self.storage.get_item(TOKEN_KEY)
    }

    pub fn set_data_in_local_storage(&self, key: &str, data: &str) {
        self.storage.set_item(key, data);
    }

    // Wipes unrelated keys too, not only the session ones
    pub fn clear_storage(&self) {
        self.storage.clear();
    }

    pub fn is_logged_in(&self) -> bool {
        self.get_token().is_some()
    }

    pub fn store_login(&self, token: &str, user: &Value) {
        self.set_data_in_local_storage(TOKEN_KEY, token);
        self.set_data_in_local_storage(USER_INFO_KEY, &user.to_string());
    }
}

impl Default for AuthService {
    fn default() -> Self {
        Self::new(LocalStorage::in_memory())
    }
}
