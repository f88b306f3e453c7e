mod bars;
mod chart;
mod exchanges;
#[cfg(feature = "gui")]
mod window;

use tickchart_core::{ChartError, DataSource, FixtureSource, LoaderConfig, YahooAdapter};
use tracing::debug;

use crate::cli::{Cli, Command, RequestArgs};
use crate::error::CliError;

pub fn run(cli: &Cli) -> Result<(), CliError> {
    let runtime = tokio::runtime::Runtime::new()?;
    match &cli.command {
        Command::Chart(args) => runtime.block_on(chart::run(args, cli)),
        Command::Bars(args) => runtime.block_on(bars::run(args, cli)),
        Command::Exchanges => exchanges::run(cli),
        #[cfg(feature = "gui")]
        Command::Window(args) => window::run(args, cli, runtime.handle()),
    }
}

/// The bar file named by `--input`, otherwise Yahoo Finance.
fn data_source(cli: &Cli, args: &RequestArgs) -> Result<Box<dyn DataSource>, CliError> {
    if let Some(path) = &args.input {
        debug!(path = %path.display(), "reading bars from file");
        let fixture = FixtureSource::from_path(path).map_err(ChartError::Retrieval)?;
        return Ok(Box::new(fixture));
    }

    Ok(Box::new(YahooAdapter::new(loader_config(cli))))
}

fn loader_config(cli: &Cli) -> LoaderConfig {
    let config = LoaderConfig::from_env().with_adjust_prices(!cli.no_adjust);
    match cli.timeout_ms {
        Some(timeout_ms) => config.with_timeout_ms(timeout_ms),
        None => config,
    }
}
