use serde::Serialize;
use tickchart_core::Exchange;

use crate::cli::Cli;
use crate::error::CliError;
use crate::output;

#[derive(Debug, Serialize)]
struct ExchangeRow {
    name: &'static str,
    suffix: &'static str,
}

fn rows() -> Vec<ExchangeRow> {
    Exchange::ALL
        .iter()
        .map(|exchange| ExchangeRow {
            name: exchange.as_str(),
            suffix: exchange.suffix(),
        })
        .collect()
}

pub fn run(cli: &Cli) -> Result<(), CliError> {
    output::print_json(&rows(), cli.pretty)
}
