use thiserror::Error;

#[derive(Error, Debug)]
pub enum SessionError {
    #[error("Sign-in rejected: {message}")]
    SignInFailed { message: String },

    #[error("Not authenticated")]
    NotAuthenticated,

    #[error("Identity confirmation failed: {0}")]
    IdentityRejected(String),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Session storage unavailable: {0}")]
    StorageUnavailable(String),

    #[error("Serialization failed: {0}")]
    SerializationFailed(String),
}

pub type Result<T> = std::result::Result<T, SessionError>;
