use thiserror::Error;

use crate::data_source::{SourceError, SourceErrorKind};
use crate::domain::Exchange;
use crate::render::RenderError;
use crate::surface::SurfaceError;

/// Validation errors raised before any data is requested.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("symbol cannot be empty")]
    EmptySymbol,
    #[error("symbol length {len} exceeds max {max}")]
    SymbolTooLong { len: usize, max: usize },
    #[error("symbol contains whitespace {ch:?} at index {index}")]
    SymbolInvalidChar { ch: char, index: usize },
    #[error("ticker '{ticker}' is listed on {listed}, not {selected}")]
    ForeignSuffix {
        ticker: String,
        listed: Exchange,
        selected: Exchange,
    },

    #[error("invalid exchange '{value}', expected one of NASDAQ, NSE, BSE, None")]
    InvalidExchange { value: String },

    #[error("date must be YYYY-MM-DD: '{value}'")]
    InvalidDate { value: String },
    #[error("start date {start} must be before end date {end}")]
    InvalidRange { start: String, end: String },

    #[error("bar dates must be strictly increasing (offending bar at index {index})")]
    UnorderedBars { index: usize },
}

/// Top-level error for a chart request, from form validation to display.
#[derive(Debug, Error)]
pub enum ChartError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("no data found for ticker '{symbol}' between {start} and {end}")]
    NoData {
        symbol: String,
        start: String,
        end: String,
    },

    #[error("failed to load data: {0}")]
    Retrieval(SourceError),

    #[error(transparent)]
    Render(#[from] RenderError),

    #[error(transparent)]
    Surface(#[from] SurfaceError),
}

impl ChartError {
    /// Maps a loader failure onto the chart error taxonomy.
    ///
    /// Empty provider results keep their own category so the user can tell
    /// "nothing traded in this range" apart from a broken request.
    pub fn from_source(error: SourceError, symbol: &str, start: &str, end: &str) -> Self {
        match error.kind() {
            SourceErrorKind::NoData => Self::NoData {
                symbol: symbol.to_owned(),
                start: start.to_owned(),
                end: end.to_owned(),
            },
            _ => Self::Retrieval(error),
        }
    }

    /// Short heading shown above the user-facing message.
    pub const fn title(&self) -> &'static str {
        match self {
            Self::Validation(ValidationError::InvalidDate { .. }) => "Invalid Date",
            Self::Validation(ValidationError::InvalidRange { .. }) => "Invalid Range",
            Self::Validation(ValidationError::InvalidExchange { .. }) => "Invalid Exchange",
            Self::Validation(_) => "Invalid Ticker",
            Self::NoData { .. } => "No Data",
            Self::Retrieval(_) => "Error",
            Self::Render(_) | Self::Surface(_) => "Plot Error",
        }
    }

    pub fn user_message(&self) -> String {
        match self {
            Self::Validation(ValidationError::InvalidDate { .. }) => {
                String::from("Please enter dates in YYYY-MM-DD format.")
            }
            Self::Validation(ValidationError::InvalidRange { .. }) => {
                String::from("Start date must be before end date.")
            }
            Self::NoData { symbol, .. } => {
                format!("No data found for ticker '{symbol}' in the given range.")
            }
            Self::Retrieval(error) => format!("Failed to load data: {}", error.message()),
            Self::Render(error) => format!("Error drawing chart: {error}"),
            Self::Surface(error) => format!("Error drawing chart: {error}"),
            Self::Validation(error) => error.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_data_source_errors_keep_their_own_category() {
        let error = ChartError::from_source(
            SourceError::no_data("empty chart"),
            "AAPL",
            "2024-01-01",
            "2024-02-01",
        );
        assert!(matches!(error, ChartError::NoData { .. }));
        assert_eq!(error.title(), "No Data");
    }

    #[test]
    fn network_errors_surface_cause() {
        let error = ChartError::from_source(
            SourceError::network("connection reset"),
            "AAPL",
            "2024-01-01",
            "2024-02-01",
        );
        assert_eq!(error.title(), "Error");
        assert!(error.user_message().contains("connection reset"));
    }

    #[test]
    fn date_and_range_errors_have_distinct_titles() {
        let date = ChartError::from(ValidationError::InvalidDate {
            value: String::from("2024/01/01"),
        });
        let range = ChartError::from(ValidationError::InvalidRange {
            start: String::from("2024-06-01"),
            end: String::from("2024-01-01"),
        });
        assert_ne!(date.title(), range.title());
        assert_ne!(date.user_message(), range.user_message());
    }
}
