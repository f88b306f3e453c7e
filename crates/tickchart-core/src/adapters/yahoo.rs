use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use serde::Deserialize;
use tracing::{debug, warn};

use crate::config::LoaderConfig;
use crate::data_source::{DataSource, HistoryRequest, SourceError};
use crate::http_client::{HttpClient, HttpRequest, ReqwestHttpClient};
use crate::{PriceBar, PriceSeries, TradingDate};

const REFERER: &str = "https://finance.yahoo.com/";

/// Yahoo Finance chart endpoint adapter for daily bars.
#[derive(Clone)]
pub struct YahooAdapter {
    http_client: Arc<dyn HttpClient>,
    config: LoaderConfig,
}

impl Default for YahooAdapter {
    fn default() -> Self {
        Self::new(LoaderConfig::default())
    }
}

impl YahooAdapter {
    pub fn new(config: LoaderConfig) -> Self {
        Self::with_http_client(Arc::new(ReqwestHttpClient::new()), config)
    }

    pub fn with_http_client(http_client: Arc<dyn HttpClient>, config: LoaderConfig) -> Self {
        Self {
            http_client,
            config,
        }
    }

    pub fn config(&self) -> &LoaderConfig {
        &self.config
    }

    fn chart_url(&self, req: &HistoryRequest) -> String {
        format!(
            "{}/v8/finance/chart/{}?period1={}&period2={}&interval=1d&events=history&includeAdjustedClose=true",
            self.config.base_url,
            urlencoding::encode(req.symbol.as_str()),
            req.range.start().unix_midnight(),
            req.range.end().unix_midnight(),
        )
    }

    async fn fetch_daily_bars(&self, req: &HistoryRequest) -> Result<PriceSeries, SourceError> {
        let url = self.chart_url(req);
        debug!(
            symbol = %req.symbol,
            start = %req.range.start(),
            end = %req.range.end(),
            "fetching daily bars from yahoo"
        );

        let request = HttpRequest::get(url)
            .with_header("referer", REFERER)
            .with_timeout_ms(self.config.timeout_ms);

        let response = self.http_client.execute(request).await.map_err(|e| {
            SourceError::network(format!("yahoo transport error: {}", e.message()))
        })?;

        if !response.is_success() {
            return Err(classify_failure(response.status, &response.body, req));
        }

        parse_chart(&response.body, req, self.config.adjust_prices)
    }
}

impl DataSource for YahooAdapter {
    fn name(&self) -> &'static str {
        "yahoo"
    }

    fn daily_bars<'a>(
        &'a self,
        req: HistoryRequest,
    ) -> Pin<Box<dyn Future<Output = Result<PriceSeries, SourceError>> + Send + 'a>> {
        Box::pin(async move { self.fetch_daily_bars(&req).await })
    }
}

/// Map a non-2xx chart response onto the loader error taxonomy.
fn classify_failure(status: u16, body: &str, req: &HistoryRequest) -> SourceError {
    let api_error = serde_json::from_str::<YahooChartResponse>(body)
        .ok()
        .and_then(|parsed| parsed.chart.error);

    match api_error {
        Some(error) => classify_api_error(error, Some(status), req),
        None if status == 404 => {
            SourceError::invalid_symbol(format!("ticker '{}' not found", req.symbol))
        }
        None => SourceError::network(format!("yahoo returned status {status}")),
    }
}

/// Map the `chart.error` object onto the loader error taxonomy, whatever
/// HTTP status it arrived with.
fn classify_api_error(
    error: YahooChartError,
    status: Option<u16>,
    req: &HistoryRequest,
) -> SourceError {
    if error.code.eq_ignore_ascii_case("Not Found") {
        return SourceError::invalid_symbol(format!(
            "ticker '{}' not found: {}",
            req.symbol, error.description
        ));
    }
    if error.description.contains("Data doesn't exist") {
        return SourceError::no_data(error.description);
    }

    match status {
        Some(status) => SourceError::network(format!(
            "yahoo returned status {status}: {} ({})",
            error.description, error.code
        )),
        None => SourceError::network(format!(
            "yahoo chart API error: {} ({})",
            error.description, error.code
        )),
    }
}

/// Parse a chart payload into a series restricted to the requested range.
pub(crate) fn parse_chart(
    body: &str,
    req: &HistoryRequest,
    adjust_prices: bool,
) -> Result<PriceSeries, SourceError> {
    let chart_response: YahooChartResponse = serde_json::from_str(body)
        .map_err(|e| SourceError::internal(format!("failed to parse yahoo chart: {e}")))?;

    if let Some(error) = chart_response.chart.error {
        return Err(classify_api_error(error, None, req));
    }

    let result = chart_response
        .chart
        .result
        .and_then(|results| results.into_iter().next())
        .ok_or_else(|| SourceError::no_data(format!("no chart data for '{}'", req.symbol)))?;

    let timestamps = result.timestamp.unwrap_or_default();
    let quote = result.indicators.quote.into_iter().next().unwrap_or_default();
    let adjusted = result
        .indicators
        .adjclose
        .and_then(|series| series.into_iter().next())
        .map(|series| series.adjclose);

    let utc_offset = result.meta.gmtoffset.unwrap_or(0);
    let mut bars = Vec::with_capacity(timestamps.len());
    let mut incomplete = 0usize;

    for (i, &ts_value) in timestamps.iter().enumerate() {
        let Some(date) = TradingDate::from_unix_timestamp(ts_value, utc_offset) else {
            return Err(SourceError::internal(format!(
                "invalid timestamp {ts_value} in yahoo chart"
            )));
        };

        if !req.range.contains(date) {
            continue;
        }

        let (Some(open), Some(high), Some(low), Some(close)) = (
            value_at(&quote.open, i),
            value_at(&quote.high, i),
            value_at(&quote.low, i),
            value_at(&quote.close, i),
        ) else {
            incomplete += 1;
            continue;
        };

        let factor = match (adjust_prices, adjusted.as_deref()) {
            (true, Some(adjclose)) => adjustment_factor(value_at(adjclose, i), close),
            _ => 1.0,
        };

        bars.push(PriceBar::new(
            date,
            open * factor,
            high * factor,
            low * factor,
            close * factor,
        ));
    }

    if incomplete > 0 {
        warn!(symbol = %req.symbol, rows = incomplete, "dropped rows with missing prices");
    }

    if bars.is_empty() {
        return Err(SourceError::no_data(format!(
            "no daily bars for '{}' between {} and {}",
            req.symbol,
            req.range.start(),
            req.range.end()
        )));
    }

    Ok(PriceSeries::from_unsorted(req.symbol.clone(), bars).with_currency(result.meta.currency))
}

fn value_at(values: &[Option<f64>], index: usize) -> Option<f64> {
    values.get(index).copied().flatten()
}

fn adjustment_factor(adjclose: Option<f64>, close: f64) -> f64 {
    match adjclose {
        Some(adjclose) if adjclose.is_finite() && close.is_finite() && close != 0.0 => {
            adjclose / close
        }
        _ => 1.0,
    }
}

#[derive(Debug, Clone, Deserialize)]
struct YahooChartResponse {
    chart: YahooChartData,
}

#[derive(Debug, Clone, Deserialize)]
struct YahooChartData {
    #[serde(default)]
    result: Option<Vec<YahooChartResult>>,
    #[serde(default)]
    error: Option<YahooChartError>,
}

#[derive(Debug, Clone, Deserialize)]
struct YahooChartError {
    #[serde(default)]
    code: String,
    #[serde(default)]
    description: String,
}

#[derive(Debug, Clone, Deserialize)]
struct YahooChartResult {
    #[serde(default)]
    meta: YahooChartMeta,
    #[serde(default)]
    timestamp: Option<Vec<i64>>,
    indicators: YahooChartIndicators,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct YahooChartMeta {
    #[serde(default)]
    currency: Option<String>,
    #[serde(default)]
    gmtoffset: Option<i64>,
}

#[derive(Debug, Clone, Deserialize)]
struct YahooChartIndicators {
    #[serde(default)]
    quote: Vec<YahooChartQuote>,
    #[serde(default)]
    adjclose: Option<Vec<YahooAdjClose>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct YahooChartQuote {
    #[serde(default)]
    open: Vec<Option<f64>>,
    #[serde(default)]
    high: Vec<Option<f64>>,
    #[serde(default)]
    low: Vec<Option<f64>>,
    #[serde(default)]
    close: Vec<Option<f64>>,
}

#[derive(Debug, Clone, Deserialize)]
struct YahooAdjClose {
    #[serde(default)]
    adjclose: Vec<Option<f64>>,
}
