//! User-facing chart request and its validation.

use serde::{Deserialize, Serialize};

use crate::data_source::HistoryRequest;
use crate::{DateRange, Exchange, Symbol, TradingDate, ValidationError};

/// Raw form fields as typed by the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartForm {
    pub ticker: String,
    pub exchange: String,
    pub start: String,
    pub end: String,
}

impl Default for ChartForm {
    fn default() -> Self {
        Self {
            ticker: String::from("AAPL"),
            exchange: String::from("NASDAQ"),
            start: String::from("2023-01-01"),
            end: String::from("2024-01-01"),
        }
    }
}

impl ChartForm {
    pub fn new(
        ticker: impl Into<String>,
        exchange: impl Into<String>,
        start: impl Into<String>,
        end: impl Into<String>,
    ) -> Self {
        Self {
            ticker: ticker.into(),
            exchange: exchange.into(),
            start: start.into(),
            end: end.into(),
        }
    }

    /// Validate every field. Dates are checked before the ticker so a
    /// malformed date is reported as such even when other fields are off.
    pub fn validate(&self) -> Result<ChartRequest, ValidationError> {
        let start = TradingDate::parse(&self.start)?;
        let end = TradingDate::parse(&self.end)?;
        let range = DateRange::new(start, end)?;
        let exchange = self.exchange.parse::<Exchange>()?;
        let ticker = Symbol::parse(&self.ticker)?;
        check_listing(&ticker, exchange)?;

        Ok(ChartRequest {
            ticker,
            exchange,
            range,
        })
    }
}

/// A ticker already carrying another exchange's suffix would otherwise be
/// suffixed twice (`TCS.BO` on NSE becoming `TCS.BO.NS`). `None` passes any
/// provider symbol through as typed.
fn check_listing(ticker: &Symbol, selected: Exchange) -> Result<(), ValidationError> {
    if selected == Exchange::None {
        return Ok(());
    }

    match Exchange::ALL
        .into_iter()
        .find(|&listed| listed != selected && ticker.has_suffix(listed.suffix()))
    {
        Some(listed) => Err(ValidationError::ForeignSuffix {
            ticker: ticker.to_string(),
            listed,
            selected,
        }),
        None => Ok(()),
    }
}

/// A validated chart request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartRequest {
    pub ticker: Symbol,
    pub exchange: Exchange,
    pub range: DateRange,
}

impl ChartRequest {
    /// Ticker as the provider knows it, exchange suffix included.
    pub fn provider_symbol(&self) -> Symbol {
        self.ticker.with_suffix(self.exchange.suffix())
    }

    pub fn history_request(&self) -> HistoryRequest {
        HistoryRequest::new(self.provider_symbol(), self.range)
    }
}
