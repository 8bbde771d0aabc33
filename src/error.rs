use thiserror::Error;

/// Errors raised while talking to the container runtime.
#[derive(Debug, Error)]
pub enum RuntimeError {
    /// The engine could not be reached at all (socket missing, daemon down).
    #[error("container runtime unavailable: {0}")]
    Unavailable(String),

    /// The engine answered, but the request failed.
    #[error("docker error: {0}")]
    Api(#[from] bollard::errors::Error),

    /// The local async runtime could not be created.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
