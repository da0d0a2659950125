use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProtocolError {
    #[error("Unexpected envelope status: {0}")]
    Status(String),

    #[error("Envelope carries no data")]
    MissingData,

    #[error("Envelope data lacks field `{0}`")]
    MissingField(&'static str),

    #[error("Malformed response body: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("Media error: {0}")]
    Media(#[from] MediaError),
}

#[derive(Error, Debug)]
pub enum MediaError {
    #[error("Invalid base host: {0}")]
    InvalidHost(String),

    #[error("Cannot resolve media path `{path}`: {reason}")]
    InvalidPath { path: String, reason: String },
}
