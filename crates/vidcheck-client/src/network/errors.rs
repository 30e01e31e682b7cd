//! Failure classification shared by the form handlers
//!
//! Classification is observational only: it picks a log line and never
//! changes what the caller does next.

use std::fmt;

use super::api::ApiError;

/// Transport-level failure tag, reported when no usable HTTP status exists
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExceptionTag {
    ParserError,
    Timeout,
    Abort,
}

/// Everything the classifier looks at for one failed request
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FailureContext {
    /// `Some(0)` means the server could not be reached at all
    pub status: Option<u16>,
    pub exception: Option<ExceptionTag>,
    pub response_text: String,
}

impl FailureContext {
    pub fn status(status: u16) -> Self {
        Self {
            status: Some(status),
            ..Default::default()
        }
    }

    pub fn exception(tag: ExceptionTag) -> Self {
        Self {
            exception: Some(tag),
            ..Default::default()
        }
    }
}

impl From<&ApiError> for FailureContext {
    fn from(err: &ApiError) -> Self {
        match err {
            ApiError::Status { status, body } => Self {
                status: Some(status.as_u16()),
                exception: None,
                response_text: body.clone(),
            },
            ApiError::Decode { status, .. } => Self {
                status: Some(status.as_u16()),
                exception: Some(ExceptionTag::ParserError),
                response_text: String::new(),
            },
            ApiError::Transport(e) if e.is_connect() => Self::status(0),
            // ApiService sets no timeout; reached when the caller's client or proxy enforces one
            ApiError::Transport(e) if e.is_timeout() => Self::exception(ExceptionTag::Timeout),
            ApiError::Transport(e) if e.is_decode() => Self {
                status: e.status().map(|s| s.as_u16()),
                exception: Some(ExceptionTag::ParserError),
                response_text: String::new(),
            },
            ApiError::Transport(e) => Self {
                status: e.status().map(|s| s.as_u16()),
                exception: None,
                response_text: e.to_string(),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureClass {
    NetworkUnreachable,
    NotFound,
    ServerError,
    MalformedResponse,
    Timeout,
    Cancelled,
    Generic(String),
}

impl fmt::Display for FailureClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureClass::NetworkUnreachable => write!(f, "Not connect. Verify Network."),
            FailureClass::NotFound => write!(f, "Requested page not found. [404]"),
            FailureClass::ServerError => write!(f, "Internal Server Error [500]."),
            FailureClass::MalformedResponse => write!(f, "Requested JSON parse failed."),
            FailureClass::Timeout => write!(f, "Time out error."),
            FailureClass::Cancelled => write!(f, "Ajax request aborted."),
            FailureClass::Generic(text) => write!(f, "Uncaught Error. {}", text),
        }
    }
}

/// Status branches win over exception tags; the first match decides
pub fn classify(ctx: &FailureContext) -> FailureClass {
    match (ctx.status, ctx.exception) {
        (Some(0), _) => FailureClass::NetworkUnreachable,
        (Some(404), _) => FailureClass::NotFound,
        (Some(500), _) => FailureClass::ServerError,
        (_, Some(ExceptionTag::ParserError)) => FailureClass::MalformedResponse,
        (_, Some(ExceptionTag::Timeout)) => FailureClass::Timeout,
        (_, Some(ExceptionTag::Abort)) => FailureClass::Cancelled,
        _ => FailureClass::Generic(ctx.response_text.clone()),
    }
}

/// Classify and log a failure
pub fn handle_error(ctx: &FailureContext) -> FailureClass {
    let class = classify(ctx);
    match &class {
        FailureClass::Generic(_) => tracing::error!("{}", class),
        _ => tracing::warn!("{}", class),
    }
    class
}
