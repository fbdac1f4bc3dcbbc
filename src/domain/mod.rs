use serde_json::Value;
use thiserror::Error;

pub mod auth;
pub mod todo;
pub mod ui;

#[cfg(test)]
pub(crate) mod test_util;

/// The body of a failed API response, decoded defensively since the API does not
/// promise a fixed error schema
#[derive(Debug, Clone, PartialEq)]
pub enum ErrorBody {
    /// A JSON object carrying a non-empty `message` string
    Message(String),
    /// Any other JSON value
    Json(Value),
    /// A body that could not be parsed as JSON
    Text(String),
}

impl ErrorBody {
    /// Decodes raw response bytes into an [ErrorBody]
    pub fn decode(raw: &[u8]) -> Self {
        let Ok(value) = serde_json::from_slice::<Value>(raw) else {
            return Self::Text(String::from_utf8_lossy(raw).into_owned());
        };

        match value.get("message").and_then(Value::as_str) {
            Some(message) if !message.is_empty() => Self::Message(message.to_owned()),
            _ => Self::Json(value),
        }
    }

    /// Produces the string shown to the user: the structured message if there is one,
    /// otherwise the body itself
    pub fn user_message(&self) -> String {
        match self {
            Self::Message(message) | Self::Text(message) => message.clone(),
            Self::Json(Value::String(body)) => body.clone(),
            Self::Json(body) => body.to_string(),
        }
    }
}

/// The single failure kind for calls to the task API
#[derive(Error, Debug)]
pub enum RequestError {
    #[error("the API rejected the request with status {status}: {}", .body.user_message())]
    Rejected { status: u16, body: ErrorBody },
    #[error("the request could not be completed: {0:#}")]
    Transport(anyhow::Error),
}

impl RequestError {
    /// Human-readable message for the error collaborator. Every failure goes through here.
    pub fn user_message(&self) -> String {
        match self {
            Self::Rejected { body, .. } => body.user_message(),
            Self::Transport(cause) => format!("{cause:#}"),
        }
    }
}

impl From<anyhow::Error> for RequestError {
    fn from(value: anyhow::Error) -> Self {
        Self::Transport(value)
    }
}


/// Terminal state of a mutation. Failures have already been reported to the user by the
/// time this is returned, so callers only branch on it.
#[derive(Debug, PartialEq, Eq)]
pub enum MutationOutcome<T> {
    Succeeded(T),
    Failed { message: String },
}

impl<T> MutationOutcome<T> {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Succeeded(_))
    }

    /// Returns the data the server sent back, if the mutation succeeded
    pub fn into_data(self) -> Option<T> {
        match self {
            Self::Succeeded(data) => Some(data),
            Self::Failed { .. } => None,
        }
    }
}

/// Sends the message for [err] to the error collaborator and turns it into a failed outcome
fn report_failure<T>(
    err: RequestError,
    errors: &impl ui::driven_ports::ErrorReporter,
) -> MutationOutcome<T> {
    let message = err.user_message();
    errors.report(&message);

    MutationOutcome::Failed { message }
}
