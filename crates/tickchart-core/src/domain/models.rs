use serde::{Deserialize, Serialize};

use crate::{Symbol, TradingDate, ValidationError};

/// One trading day's open/high/low/close summary.
///
/// Prices are taken as delivered. Bars that break the usual
/// `low <= open, close <= high` ordering are kept and drawn as-is.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceBar {
    pub date: TradingDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
}

impl PriceBar {
    pub const fn new(date: TradingDate, open: f64, high: f64, low: f64, close: f64) -> Self {
        Self {
            date,
            open,
            high,
            low,
            close,
        }
    }

    /// Whether `low <= min(open, close) <= max(open, close) <= high` holds.
    pub fn is_consistent(&self) -> bool {
        let body_low = self.open.min(self.close);
        let body_high = self.open.max(self.close);
        self.low <= body_low && body_high <= self.high
    }
}

/// Half-open `[start, end)` calendar range with `start < end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    start: TradingDate,
    end: TradingDate,
}

impl DateRange {
    pub fn new(start: TradingDate, end: TradingDate) -> Result<Self, ValidationError> {
        if start >= end {
            return Err(ValidationError::InvalidRange {
                start: start.format_iso(),
                end: end.format_iso(),
            });
        }
        Ok(Self { start, end })
    }

    pub const fn start(&self) -> TradingDate {
        self.start
    }

    pub const fn end(&self) -> TradingDate {
        self.end
    }

    pub fn contains(&self, date: TradingDate) -> bool {
        self.start <= date && date < self.end
    }
}

/// Daily bars for one ticker, strictly increasing by date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceSeries {
    pub symbol: Symbol,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    bars: Vec<PriceBar>,
}

impl PriceSeries {
    /// Build a series from bars already in strictly increasing date order.
    pub fn new(symbol: Symbol, bars: Vec<PriceBar>) -> Result<Self, ValidationError> {
        if let Some(index) = bars
            .windows(2)
            .position(|pair| pair[0].date >= pair[1].date)
        {
            return Err(ValidationError::UnorderedBars { index: index + 1 });
        }

        Ok(Self {
            symbol,
            currency: None,
            bars,
        })
    }

    /// Sort bars by date; when a date repeats, the last occurrence wins.
    pub fn from_unsorted(symbol: Symbol, mut bars: Vec<PriceBar>) -> Self {
        bars.reverse();
        bars.sort_by_key(|bar| bar.date);
        bars.dedup_by_key(|bar| bar.date);

        Self {
            symbol,
            currency: None,
            bars,
        }
    }

    pub fn with_currency(mut self, currency: Option<String>) -> Self {
        self.currency = currency;
        self
    }

    pub fn bars(&self) -> &[PriceBar] {
        &self.bars
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    pub fn first_date(&self) -> Option<TradingDate> {
        self.bars.first().map(|bar| bar.date)
    }

    pub fn last_date(&self) -> Option<TradingDate> {
        self.bars.last().map(|bar| bar.date)
    }

    /// Number of bars breaking the high/low envelope.
    pub fn inconsistent_bars(&self) -> usize {
        self.bars.iter().filter(|bar| !bar.is_consistent()).count()
    }
}
