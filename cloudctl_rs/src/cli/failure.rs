//! Failure kinds a command invocation can end with.
//!
//! Handlers return `Err(Failure)`; the dispatcher maps each kind to exactly
//! one user-facing behavior (see `Dispatcher::failure_action`).

use thiserror::Error;

/// Raw API response body plus its content type, when the server sent one.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ResponseBody {
    pub text: String,
    pub content_type: Option<String>,
}

impl ResponseBody {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            content_type: None,
        }
    }

    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    /// Media type is `text/plain`, parameters ignored.
    pub fn is_plain_text(&self) -> bool {
        self.content_type.as_deref().is_some_and(|ct| {
            ct.split(';')
                .next()
                .is_some_and(|media| media.trim().eq_ignore_ascii_case("text/plain"))
        })
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Failure {
    #[error("`{name}` is not a command")]
    UnknownCommand {
        name: String,
        suggestion: Option<String>,
    },

    #[error("Authentication failure")]
    Authentication,

    #[error("{message}")]
    NotFound {
        message: String,
        body: Option<ResponseBody>,
    },

    /// Local project configuration is invalid.
    #[error("{0}")]
    Project(String),

    #[error("request timed out")]
    Timeout,

    #[error("{message}")]
    Api { message: String, body: ResponseBody },

    /// Local, non-API command failure.
    #[error("{0}")]
    Command(String),

    #[error("{0}")]
    OptionParse(String),
}

/// Result type returned by command handlers.
pub type CommandResult = Result<(), Failure>;

impl Failure {
    pub fn not_found(message: impl Into<String>) -> Self {
        Failure::NotFound {
            message: message.into(),
            body: None,
        }
    }

    pub fn not_found_with_body(message: impl Into<String>, body: ResponseBody) -> Self {
        Failure::NotFound {
            message: message.into(),
            body: Some(body),
        }
    }

    pub fn api(message: impl Into<String>, body: ResponseBody) -> Self {
        Failure::Api {
            message: message.into(),
            body,
        }
    }

    pub fn command(message: impl Into<String>) -> Self {
        Failure::Command(message.into())
    }

    pub fn project(message: impl Into<String>) -> Self {
        Failure::Project(message.into())
    }

    /// Short label used in logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Failure::UnknownCommand { .. } => "unknown-command",
            Failure::Authentication => "authentication",
            Failure::NotFound { .. } => "not-found",
            Failure::Project(_) => "project",
            Failure::Timeout => "timeout",
            Failure::Api { .. } => "api",
            Failure::Command(_) => "command",
            Failure::OptionParse(_) => "option-parse",
        }
    }
}
