//! Backend client error types

use reqwest::StatusCode;

/// Errors that can occur while talking to the scoring backend
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The request never produced a response (connect, timeout, body read)
    #[error("request to {path} failed: {source}")]
    Transport {
        path: String,
        #[source]
        source: reqwest::Error,
    },

    /// The backend answered with a non-success status
    #[error("backend returned {status} for {path}: {body}")]
    Status {
        path: String,
        status: StatusCode,
        body: String,
    },

    /// The body was not the JSON shape we expected
    #[error("could not decode response from {path}: {source}")]
    Decode {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    /// The backend answered successfully but with no data
    #[error("backend returned no data for {path}")]
    Empty { path: String },
}

impl ClientError {
    /// Short message suitable for showing to a user
    pub fn user_message(&self) -> String {
        match self {
            ClientError::Transport { .. } => "The scoring backend could not be reached.".to_string(),
            ClientError::Status { status, body, .. } => {
                let body = body.trim().trim_matches('"');
                if body.is_empty() {
                    format!("The scoring backend answered {}.", status)
                } else {
                    format!("The scoring backend answered {}: {}", status, body)
                }
            }
            ClientError::Decode { .. } => {
                "The scoring backend sent a response that could not be read.".to_string()
            }
            ClientError::Empty { .. } => "The scoring backend returned no data.".to_string(),
        }
    }
}
