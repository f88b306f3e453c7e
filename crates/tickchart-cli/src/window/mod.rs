//! Desktop chart window (`gui` feature).
//!
//! A form row with ticker, exchange and date fields above the current chart.
//! Loads run on the tokio runtime so the window keeps repainting, and the
//! Load Chart button stays disabled until the running load reports back.

mod app;
mod loader;
mod panel;

pub use app::TickchartApp;
