pub mod api;
pub mod errors;

pub use api::{ApiError, ApiService};
pub use errors::{ExceptionTag, FailureClass, FailureContext, classify, handle_error};

use crate::error::{ClientError, Result};
use crate::state::{AuthService, COOKIES_KEY, TOKEN_KEY};
use serde_json::Value;
use vidcheck_protocol::{
    CheckJobResponse, CheckList, DownloadVideoRequest, HealthResponse, IgnoreVideoRequest,
    LoginRequest, LoginResponse, RefreshResponse, ResultResponse, SignupRequest, StatusResponse,
    UserResponse, endpoints,
};

/// Typed operations against the backend, keeping the session store current
#[derive(Debug, Clone)]
pub struct NetworkClient {
    api: ApiService,
    auth: AuthService,
}

impl NetworkClient {
    /// Cookies saved by an earlier session are loaded into the service's jar
    pub fn new(api: ApiService, auth: AuthService) -> Self {
        if let Some(cookies) = auth.storage().get_item(COOKIES_KEY) {
            api.restore_cookies(&cookies);
        }
        Self { api, auth }
    }

    pub fn api(&self) -> &ApiService {
        &self.api
    }

    pub fn auth(&self) -> &AuthService {
        &self.auth
    }

    /// Persist the jar so a later run can reuse the backend session
    ///
    /// An empty jar is stored as an empty string, dropping expired cookies.
    pub fn save_cookies(&self) {
        let cookies = self.api.cookie_header().unwrap_or_default();
        self.auth.set_data_in_local_storage(COOKIES_KEY, &cookies);
    }

    fn require_token(&self) -> Result<String> {
        self.auth.get_token().ok_or(ClientError::NotAuthenticated)
    }

    // Auth

    pub async fn login(&self, request: &LoginRequest) -> Result<UserResponse> {
        let response: LoginResponse = self.api.post_json(endpoints::LOGIN, request, None).await?;

        // Get user info
        let user: Value = self
            .api
            .get_json(endpoints::ME, Some(response.access_token.as_str()))
            .await?;

        self.auth.store_login(&response.access_token, &user);
        self.save_cookies();
        tracing::info!("Logged in as {}", request.username);

        Ok(serde_json::from_value(user)?)
    }

    pub async fn signup(&self, request: &SignupRequest) -> Result<UserResponse> {
        let user = self.api.post_json(endpoints::SIGNUP, request, None).await?;
        tracing::info!("Signed up {}", request.email);
        Ok(user)
    }

    /// Local storage is wiped even when the backend rejects the request
    pub async fn logout(&self) -> Result<StatusResponse> {
        let token = self.auth.get_token();
        let response: api::Result<StatusResponse> =
            self.api.get_json(endpoints::LOGOUT, token.as_deref()).await;
        self.auth.clear_storage();
        Ok(response?)
    }

    /// The refresh token travels only as a cookie
    pub async fn refresh(&self) -> Result<String> {
        let response: RefreshResponse = self.api.get_json(endpoints::REFRESH, None).await?;
        self.auth
            .set_data_in_local_storage(TOKEN_KEY, &response.access_token);
        self.save_cookies();
        Ok(response.access_token)
    }

    pub async fn me(&self) -> Result<UserResponse> {
        let token = self.require_token()?;
        Ok(self.api.get_json(endpoints::ME, Some(token.as_str())).await?)
    }

    pub async fn health(&self) -> Result<HealthResponse> {
        Ok(self.api.get_json(endpoints::HEALTH, None).await?)
    }

    // Checks

    pub async fn start_check(&self) -> Result<CheckJobResponse> {
        let token = self.auth.get_token();
        Ok(self.api.post_empty(endpoints::CHECKS_START, token.as_deref()).await?)
    }

    /// Background worker state; its shape is owned by the backend
    pub async fn check_status(&self) -> Result<Value> {
        let token = self.auth.get_token();
        Ok(self.api.get_json(endpoints::CHECKS_STATUS, token.as_deref()).await?)
    }

    pub async fn pending_checks(&self) -> Result<CheckList> {
        let token = self.auth.get_token();
        Ok(self.api.get_json(endpoints::CHECKS_LIST, token.as_deref()).await?)
    }

    pub async fn ignore_video(&self, video_id: &str) -> Result<ResultResponse> {
        let token = self.auth.get_token();
        let body = IgnoreVideoRequest {
            video_id: video_id.to_string(),
        };
        Ok(self
            .api
            .post_json(endpoints::CHECKS_IGNORE, &body, token.as_deref())
            .await?)
    }

    pub async fn download_video(&self, video_id: &str, platform: &str) -> Result<ResultResponse> {
        let token = self.auth.get_token();
        let body = DownloadVideoRequest {
            video_id: video_id.to_string(),
            platform: platform.to_string(),
        };
        Ok(self
            .api
            .post_json(endpoints::CHECKS_DOWNLOAD, &body, token.as_deref())
            .await?)
    }
}
