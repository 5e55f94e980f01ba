use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Request failed: {0}")]
    Transport(String),
    #[error("{message}")]
    Api { status: u16, message: String },
    #[error("Malformed response: {0}")]
    Decode(String),
    #[error("Row not found")]
    NotFound,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Config parse error: {0}")]
    Parse(#[from] toml::de::Error),
}

#[derive(Debug, Error)]
pub enum SpeechError {
    #[error("Speech engine failed to start: {0}")]
    Spawn(#[from] std::io::Error),
    #[error("Nothing to read on this page")]
    EmptyText,
}
