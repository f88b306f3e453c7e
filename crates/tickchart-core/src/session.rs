//! # Chart session
//!
//! The presentation-side owner of the "current chart". A session runs one
//! request at a time through validate -> load -> render -> present and only
//! replaces its current chart once every stage has succeeded. On failure the
//! previous chart, if any, stays exactly as it was.

use std::fmt::{Display, Formatter};

use tracing::{info, warn};

use crate::data_source::DataSource;
use crate::error::ChartError;
use crate::render::{CandlestickRenderer, RenderedChart};
use crate::request::{ChartForm, ChartRequest};
use crate::surface::DisplaySurface;
use crate::PriceSeries;

/// User-visible failure notice produced at the request boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub title: &'static str,
    pub message: String,
}

impl From<&ChartError> for Notification {
    fn from(error: &ChartError) -> Self {
        Self {
            title: error.title(),
            message: error.user_message(),
        }
    }
}

impl Display for Notification {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.title, self.message)
    }
}

/// The series and chart from the last successful request.
#[derive(Debug, Clone, PartialEq)]
pub struct CurrentChart {
    pub request: ChartRequest,
    pub series: PriceSeries,
    pub chart: RenderedChart,
}

/// Drives chart requests against a data source and a display surface.
pub struct ChartSession<S, D> {
    source: S,
    surface: D,
    renderer: CandlestickRenderer,
    current: Option<CurrentChart>,
}

impl<S, D> ChartSession<S, D>
where
    S: DataSource,
    D: DisplaySurface,
{
    pub fn new(source: S, surface: D) -> Self {
        Self::with_renderer(source, surface, CandlestickRenderer::default())
    }

    pub fn with_renderer(source: S, surface: D, renderer: CandlestickRenderer) -> Self {
        Self {
            source,
            surface,
            renderer,
            current: None,
        }
    }

    pub fn current(&self) -> Option<&CurrentChart> {
        self.current.as_ref()
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn surface(&self) -> &D {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut D {
        &mut self.surface
    }

    /// Run one request end to end.
    ///
    /// Validation happens before the data source is touched. `&mut self`
    /// keeps a second request from starting while this one is in flight.
    pub async fn load(&mut self, form: &ChartForm) -> Result<&CurrentChart, ChartError> {
        let request = form.validate()?;
        let history = request.history_request();
        let symbol = history.symbol.to_string();
        let start = history.range.start().format_iso();
        let end = history.range.end().format_iso();

        let series = self
            .source
            .daily_bars(history)
            .await
            .map_err(|error| ChartError::from_source(error, &symbol, &start, &end))?;

        if series.is_empty() {
            return Err(ChartError::NoData { symbol, start, end });
        }

        let inconsistent = series.inconsistent_bars();
        if inconsistent > 0 {
            warn!(
                symbol = %series.symbol,
                bars = inconsistent,
                "bars fall outside their high/low range; drawing them as-is"
            );
        }

        let chart = self.renderer.render(&series)?;
        self.surface.present(&chart)?;

        info!(
            source = self.source.name(),
            symbol = %series.symbol,
            bars = series.len(),
            "chart replaced"
        );

        Ok(self.current.insert(CurrentChart {
            request,
            series,
            chart,
        }))
    }

    /// Like [`load`](Self::load), with failures turned into a notification.
    pub async fn submit(&mut self, form: &ChartForm) -> Result<&CurrentChart, Notification> {
        match self.load(form).await {
            Ok(current) => Ok(current),
            Err(error) => {
                warn!(error = %error, "chart request failed");
                Err(Notification::from(&error))
            }
        }
    }
}
