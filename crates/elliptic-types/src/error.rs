use thiserror::Error;

#[derive(Error, Debug)]
pub enum EllipticError {
    #[error("Domain error in {function}: {message}")]
    Domain {
        function: &'static str,
        message: String,
    },

    #[error("{form} did not converge within {iterations} iterations")]
    ConvergenceFailed {
        form: &'static str,
        iterations: usize,
    },

    #[error("Shape mismatch: expected length {expected}, got {got}")]
    ShapeMismatch { expected: usize, got: usize },

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl EllipticError {
    /// Shorthand for a [`EllipticError::Domain`] raised by `function`.
    pub fn domain(function: &'static str, message: impl Into<String>) -> Self {
        EllipticError::Domain {
            function,
            message: message.into(),
        }
    }

    /// True for errors caused by arguments outside the supported domain.
    pub fn is_domain(&self) -> bool {
        matches!(self, EllipticError::Domain { .. })
    }
}

pub type EllipticResult<T> = Result<T, EllipticError>;
