use serde::{Deserialize, Serialize};

/// Default avatar sent with every signup form
pub const DEFAULT_PHOTO: &str = "default.png";

/// Login form payload
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Signup form payload
///
/// Field names follow the backend's schema, hence the camelCase confirm and
/// captcha fields.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    pub email: String,
    pub name: String,
    pub photo: String,
    pub password: String,
    pub password_confirm: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub captcha_token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub captcha_code: Option<String>,
}

impl SignupRequest {
    pub fn new(email: &str, name: &str, password: &str, password_confirm: &str) -> Self {
        Self {
            email: email.to_string(),
            name: name.to_string(),
            photo: DEFAULT_PHOTO.to_string(),
            password: password.to_string(),
            password_confirm: password_confirm.to_string(),
            captcha_token: None,
            captcha_code: None,
        }
    }

    pub fn with_captcha(mut self, token: &str, code: &str) -> Self {
        self.captcha_token = Some(token.to_string());
        self.captcha_code = Some(code.to_string());
        self
    }
}

/// Body of `POST /api/checks/ignore`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IgnoreVideoRequest {
    pub video_id: String,
}

/// Body of `POST /api/checks/download`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DownloadVideoRequest {
    pub video_id: String,
    pub platform: String,
}
