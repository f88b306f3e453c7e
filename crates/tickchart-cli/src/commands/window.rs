use eframe::egui;
use tokio::runtime::Handle;
use tracing::info;

use crate::cli::{Cli, WindowArgs};
use crate::error::CliError;
use crate::window::TickchartApp;

pub fn run(args: &WindowArgs, cli: &Cli, runtime: &Handle) -> Result<(), CliError> {
    let source = super::data_source(cli, &args.request)?;
    let form = args.request.form();
    let runtime = runtime.clone();

    info!(ticker = %form.ticker, exchange = %form.exchange, "opening chart window");
    eframe::run_native(
        "tickchart",
        native_options(),
        Box::new(move |cc| Ok(Box::new(TickchartApp::new(cc, source, form, runtime)))),
    )
    .map_err(|error| CliError::Window(error.to_string()))
}

fn native_options() -> eframe::NativeOptions {
    eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Stock Candlestick Chart")
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([720.0, 480.0]),
        ..Default::default()
    }
}
