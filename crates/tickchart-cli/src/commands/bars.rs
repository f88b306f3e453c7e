use tickchart_core::ChartError;
use tracing::info;

use crate::cli::{BarsArgs, Cli};
use crate::error::CliError;
use crate::output;

pub async fn run(args: &BarsArgs, cli: &Cli) -> Result<(), CliError> {
    let request = args
        .request
        .form()
        .validate()
        .map_err(ChartError::from)?;
    let source = super::data_source(cli, &args.request)?;

    let history = request.history_request();
    let symbol = history.symbol.to_string();
    let start = history.range.start().format_iso();
    let end = history.range.end().format_iso();

    let series = source
        .daily_bars(history)
        .await
        .map_err(|error| ChartError::from_source(error, &symbol, &start, &end))?;

    info!(source = source.name(), symbol = %symbol, bars = series.len(), "loaded bars");

    output::print_json(&series, cli.pretty)
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use crate::cli::Command;

    use super::*;

    #[tokio::test]
    async fn invalid_dates_fail_before_the_bar_file_is_opened() {
        let cli = Cli::try_parse_from([
            "tickchart",
            "bars",
            "AAPL",
            "--start",
            "2024-13-01",
            "--input",
            "/nonexistent/bars.json",
        ])
        .expect("parse");
        let Command::Bars(args) = &cli.command else {
            panic!("expected bars command");
        };

        let error = run(args, &cli).await.expect_err("invalid date");

        assert_eq!(error.exit_code(), 2);
        assert_eq!(
            error.notice(),
            "Invalid Date: Please enter dates in YYYY-MM-DD format."
        );
    }
}
