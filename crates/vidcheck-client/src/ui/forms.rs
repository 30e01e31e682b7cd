//! Login, signup and logout form handlers
//!
//! Each handler issues exactly one request. Success mutates the page, failure
//! goes through the shared classifier. Nothing is retried or deduplicated, so
//! a double submit sends two requests.

use std::time::Duration;

use serde_json::Value;
use vidcheck_protocol::{LoginRequest, SignupRequest, endpoints};

use super::page::PageState;
use crate::network::{ApiService, FailureClass, FailureContext, handle_error};

/// Delay before the page reloads after a successful login
pub const LOGIN_RELOAD_DELAY: Duration = Duration::from_millis(3);

/// Field values of the login form
#[derive(Debug, Clone, Default)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

/// Field values of the signup form
#[derive(Debug, Clone, Default)]
pub struct SignupForm {
    pub email: String,
    pub name: String,
    pub password: String,
    pub repeat_password: String,
    pub captcha_token: Option<String>,
    pub captcha_code: Option<String>,
}

impl From<&LoginForm> for LoginRequest {
    fn from(form: &LoginForm) -> Self {
        LoginRequest {
            username: form.email.clone(),
            password: form.password.clone(),
        }
    }
}

impl From<&SignupForm> for SignupRequest {
    fn from(form: &SignupForm) -> Self {
        let mut request =
            SignupRequest::new(&form.email, &form.name, &form.password, &form.repeat_password);
        request.captcha_token = form.captcha_token.clone();
        request.captcha_code = form.captcha_code.clone();
        request
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum FormOutcome {
    Success(Value),
    Failed(FailureClass),
}

impl FormOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, FormOutcome::Success(_))
    }
}

#[derive(Debug, Clone)]
pub struct AuthForms {
    api: ApiService,
    page: PageState,
}

impl AuthForms {
    pub fn new(api: ApiService, page: PageState) -> Self {
        Self { api, page }
    }

    pub fn page(&self) -> &PageState {
        &self.page
    }

    pub async fn handle_login_clicked(&self, form: &LoginForm) -> FormOutcome {
        let payload = LoginRequest::from(form);

        match self.api.post(endpoints::LOGIN, &payload).await {
            Ok(response) => {
                tracing::info!("success: {}", response);
                self.page.hide_login_form().await;
                self.page.request_reload(LOGIN_RELOAD_DELAY).await;
                FormOutcome::Success(response)
            }
            Err(e) => FormOutcome::Failed(handle_error(&FailureContext::from(&e))),
        }
    }

    pub async fn handle_signup_clicked(&self, form: &SignupForm) -> FormOutcome {
        let payload = SignupRequest::from(form);

        match self.api.post(endpoints::SIGNUP, &payload).await {
            Ok(response) => {
                tracing::info!("success: {}", response);
                self.page.hide_signup_form().await;
                self.page.request_reload(Duration::ZERO).await;
                FormOutcome::Success(response)
            }
            Err(e) => FormOutcome::Failed(handle_error(&FailureContext::from(&e))),
        }
    }

    pub async fn handle_logout_clicked(&self) -> FormOutcome {
        match self.api.get(endpoints::LOGOUT).await {
            Ok(response) => {
                tracing::info!("success: {}", response);
                self.page.request_reload(Duration::ZERO).await;
                FormOutcome::Success(response)
            }
            Err(e) => FormOutcome::Failed(handle_error(&FailureContext::from(&e))),
        }
    }
}
