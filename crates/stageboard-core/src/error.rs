use thiserror::Error;

#[derive(Debug, Error)]
pub enum StageboardError {
    #[error("not initialized: run 'stageboard init'")]
    NotInitialized,

    #[error("unsupported niche: {0}")]
    UnsupportedNiche(String),

    #[error("invalid status: {0}")]
    InvalidStatus(String),

    #[error("invalid window: {0}")]
    InvalidWindow(String),

    #[error("unknown stage '{stage}' for niche '{niche}'")]
    UnknownStage { stage: String, niche: String },

    #[error("item not found: {0}")]
    ItemNotFound(String),

    #[error("item already exists: {0}")]
    ItemExists(String),

    #[error("item {id} belongs to niche '{expected}', not '{got}'")]
    NicheMismatch {
        id: String,
        expected: String,
        got: String,
    },

    #[error("a drag is already in flight for item {0}")]
    DragInFlight(String),

    #[error("no drag in flight")]
    NoDragInFlight,

    #[error("store responded with {status}: {body}")]
    Http { status: u16, body: String },

    #[error("transport error: {0}")]
    Transport(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl From<reqwest::Error> for StageboardError {
    fn from(err: reqwest::Error) -> Self {
        StageboardError::Transport(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, StageboardError>;
