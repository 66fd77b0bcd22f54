use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum CoreError {
    #[error("Capture failed: {0}")]
    CaptureFailed(String),

    #[error("Analysis failed: {0}")]
    AnalysisFailed(String),

    #[error("External service error: {0}")]
    ExternalServiceError(String),

    #[error("Speech synthesis failed: {0}")]
    SynthesisFailed(String),

    #[error("An analysis is already in progress")]
    AnalysisInProgress,

    #[error("Invalid meal result: {0}")]
    InvalidMealResult(String),

    #[error("Invalid daily limit: {0}")]
    InvalidLimit(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Not found")]
    NotFound,

    #[error("Internal server error")]
    InternalServerError,
}
