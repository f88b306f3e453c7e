//! Data source trait and request/error types.
//!
//! A [`DataSource`] turns a [`HistoryRequest`] into a date-ordered
//! [`PriceSeries`]. The chart session only depends on this contract, so the
//! network adapter and the file fixture are interchangeable.
//!
//! # Example
//!
//! ```rust,ignore
//! use tickchart_core::{DataSource, DateRange, HistoryRequest, Symbol, TradingDate, YahooAdapter};
//!
//! async fn fetch(adapter: &YahooAdapter) -> Result<(), Box<dyn std::error::Error>> {
//!     let range = DateRange::new(
//!         TradingDate::parse("2023-01-01")?,
//!         TradingDate::parse("2024-01-01")?,
//!     )?;
//!     let series = adapter
//!         .daily_bars(HistoryRequest::new(Symbol::parse("AAPL")?, range))
//!         .await?;
//!     println!("{} bars", series.len());
//!     Ok(())
//! }
//! ```

use std::fmt::{Display, Formatter};
use std::future::Future;
use std::pin::Pin;

use crate::{DateRange, PriceSeries, Symbol};

/// Loader-level error classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceErrorKind {
    /// The provider does not know the ticker.
    InvalidSymbol,
    /// The request was valid but returned no rows.
    NoData,
    /// Transport failure or unexpected upstream status.
    Network,
    /// The request could not be sent as given.
    InvalidRequest,
    /// Malformed provider payload or local I/O failure.
    Internal,
}

/// Structured loader error carried up to the request boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceError {
    kind: SourceErrorKind,
    message: String,
}

impl SourceError {
    fn new(kind: SourceErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn invalid_symbol(message: impl Into<String>) -> Self {
        Self::new(SourceErrorKind::InvalidSymbol, message)
    }

    pub fn no_data(message: impl Into<String>) -> Self {
        Self::new(SourceErrorKind::NoData, message)
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::new(SourceErrorKind::Network, message)
    }

    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::new(SourceErrorKind::InvalidRequest, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(SourceErrorKind::Internal, message)
    }

    pub const fn kind(&self) -> SourceErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub const fn code(&self) -> &'static str {
        match self.kind {
            SourceErrorKind::InvalidSymbol => "source.invalid_symbol",
            SourceErrorKind::NoData => "source.no_data",
            SourceErrorKind::Network => "source.network",
            SourceErrorKind::InvalidRequest => "source.invalid_request",
            SourceErrorKind::Internal => "source.internal",
        }
    }
}

impl Display for SourceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.message, self.code())
    }
}

impl std::error::Error for SourceError {}

/// Request payload for daily history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryRequest {
    /// Provider ticker, exchange suffix included.
    pub symbol: Symbol,
    pub range: DateRange,
}

impl HistoryRequest {
    pub fn new(symbol: Symbol, range: DateRange) -> Self {
        Self { symbol, range }
    }
}

/// Daily price history provider.
///
/// Implementations return bars inside `[range.start, range.end)` in strictly
/// increasing date order, or [`SourceErrorKind::NoData`] when there are none.
pub trait DataSource: Send + Sync {
    /// Short provider name used in logs.
    fn name(&self) -> &'static str;

    fn daily_bars<'a>(
        &'a self,
        req: HistoryRequest,
    ) -> Pin<Box<dyn Future<Output = Result<PriceSeries, SourceError>> + Send + 'a>>;
}

impl<T: DataSource + ?Sized> DataSource for Box<T> {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn daily_bars<'a>(
        &'a self,
        req: HistoryRequest,
    ) -> Pin<Box<dyn Future<Output = Result<PriceSeries, SourceError>> + Send + 'a>> {
        (**self).daily_bars(req)
    }
}
