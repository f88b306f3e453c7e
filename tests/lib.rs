// Shared helpers for the tickchart integration tests
pub use tickchart_core::{ChartForm, PriceBar, TradingDate};

pub fn date(value: &str) -> TradingDate {
    TradingDate::parse(value).expect("valid date")
}

pub fn bar(day: &str, open: f64, high: f64, low: f64, close: f64) -> PriceBar {
    PriceBar::new(date(day), open, high, low, close)
}

pub fn form(ticker: &str, exchange: &str, start: &str, end: &str) -> ChartForm {
    ChartForm::new(ticker, exchange, start, end)
}
