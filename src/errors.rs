/*!
 * Error types for the babelcache library.
 *
 * Provider-level errors and validator rejections stay inside the
 * orchestrator. Only `TranslationError` and `StorageError` cross the
 * public boundary.
 */

use thiserror::Error;

/// Errors produced by a single provider call
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ProviderError {
    /// Error when sending the request failed
    #[error("API request failed: {0}")]
    RequestFailed(String),

    /// The connect or read timeout elapsed
    #[error("Request timed out: {0}")]
    Timeout(String),

    /// Non-2xx transport status
    #[error("HTTP error: {status}")]
    HttpStatus {
        /// HTTP status code
        status: u16,
    },

    /// Response body was empty
    #[error("Empty response from server")]
    EmptyBody,

    /// Error when parsing an API response fails
    #[error("Failed to parse API response: {0}")]
    ParseError(String),

    /// Transport succeeded but the provider reported an error in its payload
    #[error("API responded with error: {status} - {message}")]
    ApiStatus {
        /// Status reported inside the payload
        status: i64,
        /// Error detail from the API
        message: String,
    },
}

/// Why the validator refused a structurally valid provider response
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    #[error("translation is blank")]
    Blank,

    #[error("translation echoes the input")]
    EchoesInput,

    #[error("translation contains error marker '{0}'")]
    ErrorMarker(&'static str),
}

/// Persistence failures
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StorageError {
    /// Failure reported by the storage engine
    #[error("Storage backend error: {0}")]
    Backend(String),

    /// No record with the given id
    #[error("Translation record {0} not found")]
    NotFound(i64),

    /// The blocking storage task panicked or was cancelled
    #[error("Storage task failed: {0}")]
    TaskFailed(String),
}

impl From<anyhow::Error> for StorageError {
    fn from(error: anyhow::Error) -> Self {
        Self::Backend(format!("{:#}", error))
    }
}

impl From<rusqlite::Error> for StorageError {
    fn from(error: rusqlite::Error) -> Self {
        Self::Backend(error.to_string())
    }
}

/// Terminal failures of a translation request
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TranslationError {
    /// Input was blank after trimming
    #[error("Input text is empty")]
    EmptyInput,

    /// Input exceeds the configured character limit
    #[error("Input text is too long ({len} characters, maximum {max})")]
    InputTooLong {
        len: usize,
        max: usize,
    },

    /// Every provider in the chain failed or was rejected
    #[error("All translation services failed after {attempts} attempt(s)")]
    AllProvidersFailed {
        /// Number of providers tried
        attempts: usize,
    },

    /// Storage failure on a non-translation operation
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// The detached translation task panicked or was aborted
    #[error("Translation task failed: {0}")]
    TaskFailed(String),
}

impl TranslationError {
    /// Single human-readable line for presentation glue
    pub fn user_message(&self) -> String {
        match self {
            Self::EmptyInput => "Enter some text to translate".to_string(),
            Self::InputTooLong { max, .. } => {
                format!("Text is too long (maximum {} characters)", max)
            }
            Self::AllProvidersFailed { .. } => {
                "Translation services are temporarily unavailable".to_string()
            }
            Self::Storage(_) => "Could not access translation history".to_string(),
            Self::TaskFailed(_) => "Translation was interrupted, please try again".to_string(),
        }
    }
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Invalid configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Error from translation
    #[error("Translation error: {0}")]
    Translation(#[from] TranslationError),

    /// Error from storage
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}
