/// Convenience result type used across studioseq.
pub type SeqResult<T> = Result<T, SeqError>;

/// Top-level error type for sequencing, rendering, and encoding.
#[derive(thiserror::Error, Debug)]
pub enum SeqError {
    /// Invalid sequence definition, motion constants, or options.
    #[error("validation error: {0}")]
    Validation(String),

    /// Scheduling failure (bad frame index or count).
    #[error("schedule error: {0}")]
    Schedule(String),

    /// Rasterization or compositing failure.
    #[error("render error: {0}")]
    Render(String),

    /// Frame sink failure.
    #[error("encode error: {0}")]
    Encode(String),

    /// JSON (de)serialization failure.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl SeqError {
    /// Build a [`SeqError::Validation`].
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`SeqError::Schedule`].
    pub fn schedule(msg: impl Into<String>) -> Self {
        Self::Schedule(msg.into())
    }

    /// Build a [`SeqError::Render`].
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`SeqError::Encode`].
    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }

    /// Build a [`SeqError::Serde`].
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
