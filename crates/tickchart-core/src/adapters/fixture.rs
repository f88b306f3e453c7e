use std::future::Future;
use std::path::Path;
use std::pin::Pin;

use tracing::debug;

use crate::data_source::{DataSource, HistoryRequest, SourceError};
use crate::{PriceBar, PriceSeries};

/// Serves daily bars from memory, typically loaded from a JSON file.
///
/// The file holds an array of `{"date", "open", "high", "low", "close"}`
/// objects in any order.
#[derive(Debug, Clone, Default)]
pub struct FixtureSource {
    bars: Vec<PriceBar>,
    currency: Option<String>,
}

impl FixtureSource {
    pub fn new(bars: Vec<PriceBar>) -> Self {
        Self {
            bars,
            currency: None,
        }
    }

    pub fn with_currency(mut self, currency: impl Into<String>) -> Self {
        self.currency = Some(currency.into());
        self
    }

    pub fn from_json(json: &str) -> Result<Self, SourceError> {
        let bars: Vec<PriceBar> = serde_json::from_str(json)
            .map_err(|e| SourceError::internal(format!("invalid bar file: {e}")))?;
        Ok(Self::new(bars))
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, SourceError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| {
            SourceError::internal(format!("failed to read '{}': {e}", path.display()))
        })?;
        Self::from_json(&json)
    }
}

impl DataSource for FixtureSource {
    fn name(&self) -> &'static str {
        "fixture"
    }

    fn daily_bars<'a>(
        &'a self,
        req: HistoryRequest,
    ) -> Pin<Box<dyn Future<Output = Result<PriceSeries, SourceError>> + Send + 'a>> {
        Box::pin(async move {
            let bars: Vec<PriceBar> = self
                .bars
                .iter()
                .filter(|bar| req.range.contains(bar.date))
                .copied()
                .collect();

            debug!(symbol = %req.symbol, bars = bars.len(), "serving fixture bars");

            if bars.is_empty() {
                return Err(SourceError::no_data(format!(
                    "no fixture bars between {} and {}",
                    req.range.start(),
                    req.range.end()
                )));
            }

            Ok(PriceSeries::from_unsorted(req.symbol, bars).with_currency(self.currency.clone()))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_source::SourceErrorKind;
    use crate::{DateRange, Symbol, TradingDate};

    const BARS: &str = r#"[
        {"date":"2024-01-03","open":104.0,"high":106.0,"low":103.0,"close":105.0},
        {"date":"2024-01-01","open":100.0,"high":105.0,"low":99.0,"close":104.0},
        {"date":"2024-01-02","open":104.0,"high":104.0,"low":98.0,"close":99.0}
    ]"#;

    fn request(start: &str, end: &str) -> HistoryRequest {
        let range = DateRange::new(
            TradingDate::parse(start).expect("start"),
            TradingDate::parse(end).expect("end"),
        )
        .expect("range");
        HistoryRequest::new(Symbol::parse("AAPL").expect("symbol"), range)
    }

    #[tokio::test]
    async fn filters_to_half_open_range_in_date_order() {
        let source = FixtureSource::from_json(BARS).expect("fixture");
        let series = source
            .daily_bars(request("2024-01-01", "2024-01-03"))
            .await
            .expect("bars");
        let dates: Vec<String> = series.bars().iter().map(|b| b.date.format_iso()).collect();
        assert_eq!(dates, ["2024-01-01", "2024-01-02"]);
    }

    #[tokio::test]
    async fn range_without_bars_is_no_data() {
        let source = FixtureSource::from_json(BARS).expect("fixture");
        let err = source
            .daily_bars(request("2023-01-01", "2023-02-01"))
            .await
            .expect_err("must fail");
        assert_eq!(err.kind(), SourceErrorKind::NoData);
    }

    #[test]
    fn rejects_malformed_files() {
        let err = FixtureSource::from_json(r#"[{"date":"01/02/2024"}]"#).expect_err("must fail");
        assert_eq!(err.kind(), SourceErrorKind::Internal);
    }
}
