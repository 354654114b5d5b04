use thiserror::Error;

pub type AdapterResult<T> = Result<T, AdapterError>;

#[derive(Debug, Error)]
pub enum AdapterError {
    /// Failure surfaced by the wrapped charting engine.
    #[error("engine error: {0}")]
    Engine(String),

    #[error("invalid data: {0}")]
    InvalidData(String),
}
