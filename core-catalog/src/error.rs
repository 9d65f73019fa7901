use thiserror::Error;

/// Recorded when an operation is rejected locally because no credential is
/// present.
pub const MISSING_CREDENTIAL_MESSAGE: &str = "Jeton d'authentification manquant";

/// Generic fallback when the server supplies no readable message.
pub const GENERIC_FAILURE_MESSAGE: &str = "Erreur de communication avec le serveur";

/// Failure taxonomy of the synchronizer.
///
/// All variants are non-fatal: collection state stays consistent, `pending`
/// always resolves to false, and the operation can simply be retried by the
/// operator.
#[derive(Error, Debug)]
pub enum CatalogError {
    /// No credential at call time; rejected locally, no request sent.
    #[error("Jeton d'authentification manquant")]
    MissingCredential,

    /// Application-level failure: success indicator false, or an HTTP
    /// failure whose body carried a server message.
    #[error("{message}")]
    Api { message: String },

    /// Transport failure (or undecodable response) without a server message.
    #[error("Erreur de communication avec le serveur")]
    Transport,

    /// Payload could not be encoded; nothing was sent.
    #[error("Encodage de la requête impossible: {0}")]
    Encoding(String),
}

impl CatalogError {
    /// The human-readable message recorded as the collection's `last_error`.
    pub fn user_message(&self) -> String {
        match self {
            CatalogError::MissingCredential => MISSING_CREDENTIAL_MESSAGE.to_string(),
            CatalogError::Api { message } => message.clone(),
            CatalogError::Transport | CatalogError::Encoding(_) => {
                GENERIC_FAILURE_MESSAGE.to_string()
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, CatalogError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_messages() {
        assert_eq!(
            CatalogError::MissingCredential.user_message(),
            MISSING_CREDENTIAL_MESSAGE
        );
        assert_eq!(
            CatalogError::Api {
                message: "Token invalide".to_string()
            }
            .user_message(),
            "Token invalide"
        );
        assert_eq!(
            CatalogError::Transport.user_message(),
            GENERIC_FAILURE_MESSAGE
        );
    }
}
