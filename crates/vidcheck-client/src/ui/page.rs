use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

/// Visible state the form handlers mutate
#[derive(Debug, Clone)]
pub struct PageState {
    inner: Arc<RwLock<PageStateInner>>,
}

#[derive(Debug)]
struct PageStateInner {
    login_form_visible: bool,
    signup_form_visible: bool,
    /// Set when a handler asks for the page to be reloaded
    pending_reload: Option<Duration>,
}

impl Default for PageStateInner {
    fn default() -> Self {
        Self {
            login_form_visible: true,
            signup_form_visible: true,
            pending_reload: None,
        }
    }
}

impl PageState {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(PageStateInner::default())),
        }
    }

    pub async fn hide_login_form(&self) {
        self.inner.write().await.login_form_visible = false;
    }

    pub async fn hide_signup_form(&self) {
        self.inner.write().await.signup_form_visible = false;
    }

    pub async fn request_reload(&self, after: Duration) {
        self.inner.write().await.pending_reload = Some(after);
    }

    /// Consume a pending reload, restoring the freshly-loaded page
    pub async fn take_reload(&self) -> Option<Duration> {
        let mut state = self.inner.write().await;
        let reload = state.pending_reload.take();
        if reload.is_some() {
            state.login_form_visible = true;
            state.signup_form_visible = true;
        }
        reload
    }

    pub async fn is_login_form_visible(&self) -> bool {
        self.inner.read().await.login_form_visible
    }

    pub async fn is_signup_form_visible(&self) -> bool {
        self.inner.read().await.signup_form_visible
    }
}

impl Default for PageState {
    fn default() -> Self {
        Self::new()
    }
}
