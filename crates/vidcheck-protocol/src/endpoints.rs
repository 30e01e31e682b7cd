//! REST paths exposed by the backend, relative to the API origin.

pub const LOGIN: &str = "api/auth/login";
pub const SIGNUP: &str = "api/auth/signup";
pub const LOGOUT: &str = "api/auth/logout";
pub const REFRESH: &str = "api/auth/refresh";
pub const ME: &str = "api/users/me";
pub const HEALTH: &str = "api/healthchecker";

pub const CHECKS_START: &str = "api/checks/start";
pub const CHECKS_STATUS: &str = "api/checks/status";
pub const CHECKS_LIST: &str = "api/checks/checks";
pub const CHECKS_IGNORE: &str = "api/checks/ignore";
pub const CHECKS_DOWNLOAD: &str = "api/checks/download";

/// Captcha image for a client-generated token
pub fn captcha(token: &str) -> String {
    format!("api/captcha/{}", token)
}
