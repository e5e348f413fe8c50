use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PathError {
    #[error("path is empty")]
    Empty,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TreeError {
    #[error("no such folder: {0}")]
    NotFound(String),
    #[error("parent folder missing for: {0}")]
    MissingParent(String),
    #[error("path already exists: {0}")]
    Duplicate(String),
    #[error(transparent)]
    Path(#[from] PathError),
}

#[derive(Debug, Error)]
pub enum SaveError {
    #[error("save does not exist: {0}")]
    NotFound(String),
    #[error("save data corrupted: {0}")]
    Corrupted(String),
    #[error("storage unavailable: {0}")]
    Storage(String),
    #[error("could not encode save: {0}")]
    Encode(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid config: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("Scene is not defined: {0}")]
    UnknownScene(String),
}
