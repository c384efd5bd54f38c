use thiserror::Error;

/// Failures raised while fetching or aggregating price data.
#[derive(Debug, Error)]
pub enum Error {
    /// Any failure talking to the upstream price source: transport, status, or body.
    #[error("failed to fetch series {series_id}: {message}")]
    Fetch { series_id: String, message: String },

    /// A latest-value request came back with no observations.
    #[error("no observations returned for series {series_id}")]
    EmptySeries { series_id: String },

    #[error("configuration error: {0}")]
    Config(String),
}

impl Error {
    pub fn fetch(series_id: &str, message: impl Into<String>) -> Self {
        Error::Fetch {
            series_id: series_id.to_string(),
            message: message.into(),
        }
    }
}

#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }
}

impl From<Error> for AppError {
    fn from(err: Error) -> Self {
        let exit_code = match err {
            Error::Config(_) => 2,
            Error::Fetch { .. } | Error::EmptySeries { .. } => 4,
        };
        AppError::new(exit_code, err.to_string())
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}
