//! Client-side captcha challenge tokens
//!
//! The token is generated here and handed to the backend twice: once in the
//! image URL, once in the signup form. The backend consumes it on first use.

use uuid::Uuid;
use vidcheck_protocol::endpoints;

use crate::network::api::{ApiService, Result};

/// Name of the hidden signup field carrying the token
pub const TOKEN_FIELD: &str = "captchaToken";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptchaChallenge {
    token: Uuid,
}

impl CaptchaChallenge {
    pub fn new() -> Self {
        Self {
            token: Uuid::new_v4(),
        }
    }

    /// Lowercase hyphenated form, as the backend's path pattern expects
    pub fn token(&self) -> String {
        self.token.hyphenated().to_string()
    }

    pub fn image_path(&self) -> String {
        format!("/{}", endpoints::captcha(&self.token()))
    }

    pub fn image_url(&self, api: &ApiService) -> String {
        api.url(&self.image_path())
    }

    pub fn form_field(&self) -> (&'static str, String) {
        (TOKEN_FIELD, self.token())
    }

    /// Fetch the PNG the backend renders for this token
    pub async fn fetch_image(&self, api: &ApiService) -> Result<Vec<u8>> {
        tracing::debug!("Fetching captcha image for {}", self.token);
        api.get_bytes(&self.image_path()).await
    }
}

impl Default for CaptchaChallenge {
    fn default() -> Self {
        Self::new()
    }
}
