pub mod auth;
pub mod storage;

pub use auth::{AuthService, COOKIES_KEY, TOKEN_KEY, USER_INFO_KEY};
pub use storage::LocalStorage;
