//! Form state behind the chart window.

use tickchart_core::{ChartForm, CurrentChart, Notification};

/// What a finished load reports back to the window.
pub type LoadOutcome = Result<LoadedChart, Notification>;

/// Summary of the chart a load put on screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedChart {
    pub symbol: String,
    pub candles: usize,
    pub first_date: String,
    pub last_date: String,
}

impl From<&CurrentChart> for LoadedChart {
    fn from(current: &CurrentChart) -> Self {
        Self {
            symbol: current.series.symbol.to_string(),
            candles: current.chart.candle_count(),
            first_date: current.chart.first_date.format_iso(),
            last_date: current.chart.last_date.format_iso(),
        }
    }
}

/// The editable form plus the state of the last load.
///
/// Only one load runs at a time: [`start_load`](Self::start_load) hands out
/// the form once and refuses until [`finish_load`](Self::finish_load).
#[derive(Debug, Clone, Default)]
pub struct FormPanel {
    pub form: ChartForm,
    loading: bool,
    loaded: Option<LoadedChart>,
    notice: Option<Notification>,
}

impl FormPanel {
    pub fn new(form: ChartForm) -> Self {
        Self {
            form,
            ..Self::default()
        }
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Whether the Load Chart trigger should be enabled.
    pub fn can_load(&self) -> bool {
        !self.loading
    }

    pub fn start_load(&mut self) -> Option<ChartForm> {
        if self.loading {
            return None;
        }
        self.loading = true;
        self.notice = None;
        Some(self.form.clone())
    }

    /// A failed load keeps the previous summary, as the window keeps the
    /// previous chart.
    pub fn finish_load(&mut self, outcome: LoadOutcome) {
        self.loading = false;
        match outcome {
            Ok(loaded) => self.loaded = Some(loaded),
            Err(notice) => self.notice = Some(notice),
        }
    }

    pub fn notice(&self) -> Option<&Notification> {
        self.notice.as_ref()
    }

    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }

    pub fn status_line(&self) -> String {
        match (&self.loaded, self.loading) {
            (_, true) => format!("Loading {}...", self.form.ticker.trim()),
            (Some(loaded), false) => format!(
                "{}: {} candles from {} to {}",
                loaded.symbol, loaded.candles, loaded.first_date, loaded.last_date
            ),
            (None, false) => String::from("No chart loaded"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loaded(symbol: &str) -> LoadedChart {
        LoadedChart {
            symbol: symbol.to_owned(),
            candles: 250,
            first_date: String::from("2023-01-03"),
            last_date: String::from("2023-12-29"),
        }
    }

    #[test]
    fn starts_with_the_default_form() {
        let panel = FormPanel::default();
        assert_eq!(panel.form, ChartForm::new("AAPL", "NASDAQ", "2023-01-01", "2024-01-01"));
        assert!(panel.can_load());
        assert_eq!(panel.status_line(), "No chart loaded");
    }

    #[test]
    fn trigger_is_disabled_while_a_load_runs() {
        let mut panel = FormPanel::default();

        let form = panel.start_load().expect("first load");
        assert_eq!(form.ticker, "AAPL");
        assert!(!panel.can_load());
        assert!(panel.start_load().is_none());
        assert_eq!(panel.status_line(), "Loading AAPL...");

        panel.finish_load(Ok(loaded("AAPL")));
        assert!(panel.can_load());
        assert_eq!(
            panel.status_line(),
            "AAPL: 250 candles from 2023-01-03 to 2023-12-29"
        );
    }

    #[test]
    fn failure_raises_a_notice_and_keeps_the_last_chart() {
        let mut panel = FormPanel::default();
        panel.start_load();
        panel.finish_load(Ok(loaded("AAPL")));

        panel.form.ticker = String::from("NOPE");
        panel.start_load();
        panel.finish_load(Err(Notification {
            title: "Error",
            message: String::from("Failed to load data: ticker 'NOPE' not found"),
        }));

        assert_eq!(panel.notice().map(|notice| notice.title), Some("Error"));
        assert!(panel.status_line().starts_with("AAPL: 250 candles"));

        panel.dismiss_notice();
        assert!(panel.notice().is_none());
    }

    #[test]
    fn a_new_load_clears_the_previous_notice() {
        let mut panel = FormPanel::default();
        panel.start_load();
        panel.finish_load(Err(Notification {
            title: "Invalid Date",
            message: String::from("Please enter dates in YYYY-MM-DD format."),
        }));

        panel.start_load();
        assert!(panel.notice().is_none());
    }
}
