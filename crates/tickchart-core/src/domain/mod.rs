//! # Domain Models
//!
//! Plain value types shared by the loader, the renderer and the session.
//!
//! | Type | Description |
//! |------|-------------|
//! | [`Symbol`] | Normalized ticker |
//! | [`Exchange`] | Exchange selector and its provider suffix |
//! | [`TradingDate`] | Day-granularity calendar date (`YYYY-MM-DD`) |
//! | [`DateRange`] | Half-open `[start, end)` request range |
//! | [`PriceBar`] | One day's open/high/low/close |
//! | [`PriceSeries`] | Date-ordered bars for one ticker |
//!
//! Request-facing types validate on construction. Price values are not
//! checked for financial sanity; a bar with `high < low` is still a bar.

mod date;
mod exchange;
mod models;
mod symbol;

pub use date::TradingDate;
pub use exchange::Exchange;
pub use models::{DateRange, PriceBar, PriceSeries};
pub use symbol::Symbol;
