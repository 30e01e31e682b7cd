use std::sync::Arc;

use reqwest::cookie::{CookieStore, Jar};
use reqwest::{Client, RequestBuilder, Response, StatusCode, Url};
use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;
use thiserror::Error;
use vidcheck_protocol::ErrorBody;

/// API origin used when nothing else is configured
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000/";

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Request failed with status {status}: {body}")]
    Status { status: StatusCode, body: String },

    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Failed to decode response with status {status}: {source}")]
    Decode {
        status: StatusCode,
        #[source]
        source: serde_json::Error,
    },
}

impl ApiError {
    /// The backend's structured error, when a non-2xx body carries one
    pub fn error_body(&self) -> Option<ErrorBody> {
        match self {
            ApiError::Status { body, .. } => serde_json::from_str(body).ok(),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, ApiError>;

/// Pass-through HTTP wrapper against a fixed base URL
///
/// Every call resolves to the raw response body. Non-2xx answers come back as
/// [`ApiError::Status`] carrying the body untouched; nothing is retried.
/// Clones share one cookie jar, so the session cookies the backend sets on
/// login are sent by every handle built from the same service.
#[derive(Debug, Clone)]
pub struct ApiService {
    client: Client,
    base_url: String,
    cookies: Arc<Jar>,
}

impl ApiService {
    pub fn new(base_url: &str) -> Result<Self> {
        let cookies = Arc::new(Jar::default());
        let client = Client::builder().cookie_provider(cookies.clone()).build()?;

        Ok(Self {
            client,
            base_url: base_url.to_string(),
            cookies,
        })
    }

    /// Absolute URL for `path`, joined with exactly one slash
    pub fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    /// Cookies held for the API origin, as a `Cookie` header value
    pub fn cookie_header(&self) -> Option<String> {
        let url = Url::parse(&self.base_url).ok()?;
        let header = self.cookies.cookies(&url)?;
        header.to_str().ok().map(str::to_string)
    }

    /// Seed the jar from a value previously returned by [`Self::cookie_header`]
    pub fn restore_cookies(&self, header: &str) {
        let url = match Url::parse(&self.base_url) {
            Ok(url) => url,
            Err(e) => {
                tracing::warn!("Cannot restore cookies for {}: {}", self.base_url, e);
                return;
            }
        };

        for pair in header.split(';').map(str::trim).filter(|p| !p.is_empty()) {
            self.cookies.add_cookie_str(pair, &url);
        }
    }

    pub async fn get(&self, path: &str) -> Result<Value> {
        self.get_json(path, None).await
    }

    pub async fn post<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<Value> {
        self.post_json(path, body, None).await
    }

    pub async fn put<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<Value> {
        let request = self.client.put(self.url(path)).json(body);
        decode(send(request, None).await?).await
    }

    pub async fn get_json<T: DeserializeOwned>(&self, path: &str, token: Option<&str>) -> Result<T> {
        let request = self.client.get(self.url(path));
        decode(send(request, token).await?).await
    }

    pub async fn post_json<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
        token: Option<&str>,
    ) -> Result<T> {
        let request = self.client.post(self.url(path)).json(body);
        decode(send(request, token).await?).await
    }

    /// POST without a body
    pub async fn post_empty<T: DeserializeOwned>(&self, path: &str, token: Option<&str>) -> Result<T> {
        let request = self.client.post(self.url(path));
        decode(send(request, token).await?).await
    }

    /// Binary body, e.g. a captcha PNG
    pub async fn get_bytes(&self, path: &str) -> Result<Vec<u8>> {
        let response = send(self.client.get(self.url(path)), None).await?;
        Ok(response.bytes().await?.to_vec())
    }
}

async fn send(mut request: RequestBuilder, token: Option<&str>) -> Result<Response> {
    if let Some(token) = token {
        request = request.header("Authorization", format!("Bearer {}", token));
    }

    let response = request.send().await?;

    if !response.status().is_success() {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        tracing::debug!("Request failed with status {}: {}", status, body);
        return Err(ApiError::Status { status, body });
    }

    Ok(response)
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T> {
    let status = response.status();
    let bytes = response.bytes().await?;
    // Empty bodies decode as JSON null so `Value` callers still succeed
    let bytes: &[u8] = if bytes.is_empty() { b"null" } else { &bytes };
    serde_json::from_slice(bytes).map_err(|source| ApiError::Decode { status, source })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_joins_with_single_slash() {
        let api = ApiService::new("http://localhost:8000/").unwrap();
        assert_eq!(api.url("api/auth/login"), "http://localhost:8000/api/auth/login");
        assert_eq!(api.url("/api/auth/login"), "http://localhost:8000/api/auth/login");

        let api = ApiService::new("http://localhost:8000").unwrap();
        assert_eq!(api.url("api/users/me"), "http://localhost:8000/api/users/me");
    }

    #[test]
    fn test_error_body_parses_backend_shape() {
        let err = ApiError::Status {
            status: StatusCode::CONFLICT,
            body: r#"{"code":409,"message":"Account already exist","detail":"Account already exist"}"#
                .to_string(),
        };

        let body = err.error_body().unwrap();
        assert_eq!(body.code, 409);
        assert_eq!(body.detail, "Account already exist");
    }

    #[test]
    fn test_error_body_absent_for_plain_text() {
        let err = ApiError::Status {
            status: StatusCode::BAD_GATEWAY,
            body: "upstream down".to_string(),
        };
        assert!(err.error_body().is_none());
    }

    #[test]
    fn test_cookies_restore_into_fresh_jar() {
        let api = ApiService::new("http://localhost:8000/").unwrap();
        assert_eq!(api.cookie_header(), None);

        api.restore_cookies("access_token=A; refresh_token=R");

        let fresh = ApiService::new("http://localhost:8000/").unwrap();
        fresh.restore_cookies(&api.cookie_header().unwrap());

        let header = fresh.cookie_header().unwrap();
        assert!(header.contains("access_token=A"));
        assert!(header.contains("refresh_token=R"));
    }

    #[test]
    fn test_clones_share_cookie_jar() {
        let api = ApiService::new("http://localhost:8000/").unwrap();
        let other = api.clone();

        api.restore_cookies("access_token=A");
        assert_eq!(other.cookie_header().as_deref(), Some("access_token=A"));
    }
}
