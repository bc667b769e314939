use reqwest::StatusCode;
use serde::Deserialize;

/// Every failure the request gateway can report
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("API returned {status}: {message}")]
    Api { status: StatusCode, message: String },

    #[error("unexpected response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },
}

impl GatewayError {
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            GatewayError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(StatusCode::UNAUTHORIZED)
    }

    /// Build an `Api` error from a non-2xx response body
    pub fn from_response(status: StatusCode, body: &str) -> Self {
        GatewayError::Api {
            status,
            message: extract_message(status, body),
        }
    }
}

#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
    error: Option<String>,
}

fn extract_message(status: StatusCode, body: &str) -> String {
    if let Ok(parsed) = serde_json::from_str::<ErrorBody>(body) {
        if let Some(message) = parsed.message.or(parsed.error) {
            return message;
        }
    }

    let trimmed = body.trim();
    if !trimmed.is_empty() {
        return trimmed.to_string();
    }

    status
        .canonical_reason()
        .unwrap_or("Unknown error")
        .to_string()
}
