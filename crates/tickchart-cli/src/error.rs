use thiserror::Error;
use tickchart_core::{ChartError, Notification};

/// CLI-level error categories mapped to exit codes.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Chart(#[from] ChartError),

    #[error(transparent)]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[cfg(feature = "gui")]
    #[error("chart window failed: {0}")]
    Window(String),
}

impl CliError {
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::Chart(ChartError::Validation(_)) => 2,
            Self::Chart(ChartError::NoData { .. }) => 3,
            Self::Chart(ChartError::Retrieval(_)) => 4,
            Self::Chart(ChartError::Render(_) | ChartError::Surface(_)) => 5,
            Self::Serialization(_) => 6,
            #[cfg(feature = "gui")]
            Self::Window(_) => 7,
            Self::Io(_) => 10,
        }
    }

    /// Line printed after `error: `.
    pub fn notice(&self) -> String {
        match self {
            Self::Chart(error) => Notification::from(error).to_string(),
            other => other.to_string(),
        }
    }
}
