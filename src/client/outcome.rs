use reqwest::StatusCode;
use serde_json::Value;

use super::ClientError;

/// What a REST reply amounts to, decided once from status, content type and
/// body.
#[derive(Debug)]
pub enum ResponseOutcome {
    Success(Option<Value>),
    Failure(ClientError),
}

impl ResponseOutcome {
    /// Reads must come back as JSON.
    pub fn for_read(url: &str, status: StatusCode, body: &str) -> Self {
        if !status.is_success() {
            return Self::Failure(ClientError::status(status, body));
        }
        match serde_json::from_str(body) {
            Ok(value) => Self::Success(Some(value)),
            Err(err) => Self::Failure(ClientError::parse(url, err)),
        }
    }

    /// Any 2xx write reply is a success: empty, non-JSON and JSON bodies
    /// alike. Unparseable JSON is logged and dropped.
    pub fn for_write(status: StatusCode, content_type: Option<&str>, body: &str) -> Self {
        if !status.is_success() {
            return Self::Failure(ClientError::status(status, body));
        }
        if !content_type.is_some_and(is_json) {
            return Self::Success(None);
        }
        if body.trim().is_empty() {
            return Self::Success(None);
        }
        match serde_json::from_str(body) {
            Ok(value) => Self::Success(Some(value)),
            Err(err) => {
                tracing::debug!(error = %err, "write reply claimed JSON but did not parse");
                Self::Success(None)
            }
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    pub fn into_result(self) -> Result<Option<Value>, ClientError> {
        match self {
            Self::Success(value) => Ok(value),
            Self::Failure(err) => Err(err),
        }
    }
}

fn is_json(content_type: &str) -> bool {
    let content_type = content_type.to_ascii_lowercase();
    content_type.contains("application/json") || content_type.contains("+json")
}
