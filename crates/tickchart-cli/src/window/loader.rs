//! Runs chart loads off the UI thread.

use std::sync::Arc;

use eframe::egui;
use tickchart_core::{ChartForm, ChartSession, DataSource, WindowSurface};
use tokio::runtime::Handle;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::sync::Mutex;
use tracing::debug;

use super::panel::{LoadOutcome, LoadedChart};

pub type WindowSession = ChartSession<Box<dyn DataSource>, WindowSurface>;

/// Owns the window's chart session and reports each load over a channel.
pub struct Loader {
    session: Arc<Mutex<WindowSession>>,
    runtime: Handle,
    sender: UnboundedSender<LoadOutcome>,
    outcomes: UnboundedReceiver<LoadOutcome>,
}

impl Loader {
    pub fn new(session: WindowSession, runtime: Handle) -> Self {
        let (sender, outcomes) = mpsc::unbounded_channel();
        Self {
            session: Arc::new(Mutex::new(session)),
            runtime,
            sender,
            outcomes,
        }
    }

    /// Load `form` in the background and wake `ctx` when done.
    pub fn spawn(&self, form: ChartForm, ctx: egui::Context) {
        let session = Arc::clone(&self.session);
        let sender = self.sender.clone();

        self.runtime.spawn(async move {
            let mut session = session.lock().await;
            debug!(ticker = %form.ticker, exchange = %form.exchange, "loading chart");
            let outcome = session.submit(&form).await.map(LoadedChart::from);
            // the window may have closed while the request was in flight
            let _ = sender.send(outcome);
            ctx.request_repaint();
        });
    }

    pub fn try_next(&mut self) -> Option<LoadOutcome> {
        self.outcomes.try_recv().ok()
    }
}

#[cfg(test)]
mod tests {
    use tickchart_core::{ChartView, FixtureSource, PriceBar, TradingDate};

    use super::*;

    fn loader(view: &ChartView) -> Loader {
        let bars = (2..=5)
            .map(|day| {
                let open = 100.0 + f64::from(day);
                PriceBar::new(
                    TradingDate::from_ymd(2024, 1, day).expect("date"),
                    open,
                    open + 2.0,
                    open - 2.0,
                    open + 1.0,
                )
            })
            .collect();
        let source: Box<dyn DataSource> = Box::new(FixtureSource::new(bars));
        let session = ChartSession::new(source, WindowSurface::new(view.clone()));
        Loader::new(session, Handle::current())
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn loads_report_back_and_fill_the_view() {
        let view = ChartView::default();
        let mut loader = loader(&view);

        loader.spawn(
            ChartForm::new("AAPL", "NASDAQ", "2024-01-01", "2024-02-01"),
            egui::Context::default(),
        );
        let outcome = loader.outcomes.recv().await.expect("outcome");

        let loaded = outcome.expect("loaded");
        assert_eq!(loaded.symbol, "AAPL");
        assert_eq!(loaded.candles, 4);
        assert_eq!(view.with_chart(|chart| chart.map(|chart| chart.candle_count())), Some(4));
        assert!(loader.try_next().is_none());
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn failed_loads_arrive_as_notices() {
        let view = ChartView::default();
        let mut loader = loader(&view);

        loader.spawn(
            ChartForm::new("AAPL", "NASDAQ", "2024-02-01", "2024-01-01"),
            egui::Context::default(),
        );
        let notice = loader
            .outcomes
            .recv()
            .await
            .expect("outcome")
            .expect_err("bad range");

        assert_eq!(notice.title, "Invalid Range");
        assert!(view.with_chart(|chart| chart.is_none()));
    }
}
