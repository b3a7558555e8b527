use thiserror::Error;

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    #[error("auth endpoint returned {status}: {body}")]
    Rejected { status: u16, body: String },

    #[error("no persisted session to restore")]
    EmptySession,

    #[error("persisted session is malformed: {0}")]
    InvalidSession(#[from] serde_json::Error),

    #[error("session token is not a valid header value")]
    InvalidToken(#[from] reqwest::header::InvalidHeaderValue),

    #[error("missing client environment key: {0}")]
    MissingKey(String),

    #[error("failed to read client environment: {0}")]
    Env(#[from] dotenvy::Error),
}
