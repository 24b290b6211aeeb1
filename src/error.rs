use thiserror::Error;

#[derive(Error, Debug)]
pub enum CosmosError {
    #[error("Chave de API não configurada.")]
    Unconfigured,

    #[error("Generative service request failed: {0}")]
    Service(String),

    #[error("Generative service returned HTTP {status}: {body}")]
    HttpStatus { status: u16, body: String },

    #[error("Generative service returned no content")]
    EmptyResponse,

    #[error("Malformed response from generative service: {0}")]
    MalformedResponse(String),

    #[error("As estrelas estão nubladas agora. Tente novamente em breve.")]
    DreamReading,

    #[error("Não foi possível ler as estrelas agora.")]
    StarMapReading,

    #[error("Houve uma interferência na transmissão estelar. Tente novamente.")]
    ChatTransmission,

    #[error("Dream description is empty")]
    EmptyDream,

    #[error("Unknown ritual task: {0}")]
    InvalidTask(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to register signal handler: {0}")]
    SignalHandler(String),

    #[error("Terminal error: {0}")]
    Terminal(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<reqwest::Error> for CosmosError {
    fn from(err: reqwest::Error) -> Self {
        CosmosError::Service(err.to_string())
    }
}

impl CosmosError {
    /// Whether this error is the degraded "no credential" condition rather than a real failure.
    pub fn is_unconfigured(&self) -> bool {
        matches!(self, CosmosError::Unconfigured)
    }
}

pub type Result<T> = std::result::Result<T, CosmosError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_facing_messages_are_portuguese() {
        assert_eq!(
            CosmosError::DreamReading.to_string(),
            "As estrelas estão nubladas agora. Tente novamente em breve."
        );
        assert_eq!(
            CosmosError::StarMapReading.to_string(),
            "Não foi possível ler as estrelas agora."
        );
        assert_eq!(
            CosmosError::Unconfigured.to_string(),
            "Chave de API não configurada."
        );
    }

    #[test]
    fn test_is_unconfigured() {
        assert!(CosmosError::Unconfigured.is_unconfigured());
        assert!(!CosmosError::EmptyResponse.is_unconfigured());
    }

    #[test]
    fn test_http_status_display_includes_code() {
        let err = CosmosError::HttpStatus {
            status: 403,
            body: "forbidden".to_string(),
        };
        assert!(err.to_string().contains("403"));
        assert!(err.to_string().contains("forbidden"));
    }

    #[test]
    fn test_io_error_converts() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: CosmosError = io.into();
        assert!(err.to_string().contains("IO error"));
    }
}
