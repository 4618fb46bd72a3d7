//! Error types for the Versus core library.
//!
//! Uses `thiserror` for public API error types with structured variants
//! covering input contracts, external collaborators, rating imports and
//! configuration.

/// Top-level error type for the Versus core library.
#[derive(Debug, thiserror::Error)]
pub enum VersusError {
    #[error("Contract violation: {0}")]
    Contract(#[from] ContractError),

    #[error("Collaborator error: {0}")]
    Collaborator(#[from] CollaboratorError),

    #[error("Rating error: {0}")]
    Rating(#[from] RatingError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// A sentence or request reached the core without satisfying the
/// preconditions the upstream filtering stage is responsible for.
#[derive(Debug, thiserror::Error)]
pub enum ContractError {
    #[error("Entity '{entity}' does not occur in sentence: {sentence}")]
    EntityNotFound { entity: String, sentence: String },

    #[error("No positive or negative marker between the entities in sentence: {sentence}")]
    NoPolarityMarker { sentence: String },

    #[error("Sentence has no relevance score: {sentence}")]
    UnknownSentence { sentence: String },

    #[error("Entity name must not be empty")]
    EmptyEntityName,

    #[error("Weight '{value}' for aspect '{aspect}' is not an integer")]
    InvalidWeight { aspect: String, value: String },

    #[error("Aspect name '{aspect}' is reserved for a result bucket")]
    ReservedAspectName { aspect: String },
}

/// Failures reported by the ports the core consumes.
#[derive(Debug, thiserror::Error)]
pub enum CollaboratorError {
    #[error("{collaborator} failed: {message}")]
    Failed {
        collaborator: String,
        message: String,
    },

    #[error("{collaborator} returned malformed data: {message}")]
    Malformed {
        collaborator: String,
        message: String,
    },
}

impl CollaboratorError {
    pub fn failed(collaborator: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Failed {
            collaborator: collaborator.into(),
            message: message.into(),
        }
    }

    pub fn malformed(collaborator: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Malformed {
            collaborator: collaborator.into(),
            message: message.into(),
        }
    }
}

/// Errors from reading raw rating exports.
#[derive(Debug, thiserror::Error)]
pub enum RatingError {
    #[error("Line {line}: expected 'aspect;rating;objectA;objectB', got '{content}'")]
    MalformedRecord { line: usize, content: String },

    #[error("Line {line}: rating '{value}' is not an integer")]
    InvalidRating { line: usize, value: String },
}

/// Errors from the configuration system.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid configuration: {message}")]
    Invalid { message: String },

    #[error("Marker '{marker}' appears in both the {first} and {second} lists")]
    OverlappingMarkers {
        marker: String,
        first: String,
        second: String,
    },
}

/// A type alias for results using the top-level `VersusError`.
pub type Result<T> = std::result::Result<T, VersusError>;
