use reqwest::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    /// The request never produced a response.
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The REST layer answered with a non-2xx status.
    #[error("API Error ({}): {body}", .status.as_u16())]
    Status { status: StatusCode, body: String },

    #[error("invalid JSON from {url}: {source}")]
    Parse {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("{resource} records cannot be {action}: no key column")]
    Unsupported {
        resource: &'static str,
        action: &'static str,
    },
}

impl ClientError {
    pub fn transport(url: &str, source: reqwest::Error) -> Self {
        Self::Transport {
            url: url.to_string(),
            source,
        }
    }

    /// Uses the body text when there is any, the status reason otherwise.
    pub fn status(status: StatusCode, body: &str) -> Self {
        let body = match body.trim() {
            "" => status.canonical_reason().unwrap_or("Unknown Status").to_string(),
            text => text.to_string(),
        };
        Self::Status { status, body }
    }

    pub fn parse(url: &str, source: serde_json::Error) -> Self {
        Self::Parse {
            url: url.to_string(),
            source,
        }
    }

    pub fn status_code(&self) -> Option<StatusCode> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_message_prefers_body_text() {
        let err = ClientError::status(StatusCode::CONFLICT, "duplicate key value\n");
        assert_eq!(err.to_string(), "API Error (409): duplicate key value");
    }

    #[test]
    fn status_message_falls_back_to_reason() {
        let err = ClientError::status(StatusCode::INTERNAL_SERVER_ERROR, "   ");
        assert_eq!(err.to_string(), "API Error (500): Internal Server Error");
        assert_eq!(err.status_code(), Some(StatusCode::INTERNAL_SERVER_ERROR));
    }
}
