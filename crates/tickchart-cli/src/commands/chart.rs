use std::path::Path;

use serde::Serialize;
use tickchart_core::{
    ChartError, ChartSession, CurrentChart, Direction, DisplaySurface, JsonSurface, SvgOptions, SvgSurface,
};

use crate::cli::{ChartArgs, ChartFormat, Cli};
use crate::error::CliError;
use crate::output;

/// What was drawn, printed after the chart file is written.
#[derive(Debug, Serialize)]
struct ChartSummary<'a> {
    symbol: &'a str,
    first_date: String,
    last_date: String,
    candles: usize,
    up: usize,
    down: usize,
    output: &'a Path,
}

impl<'a> ChartSummary<'a> {
    fn new(current: &'a CurrentChart, output: &'a Path) -> Self {
        let chart = &current.chart;
        Self {
            symbol: current.series.symbol.as_str(),
            first_date: chart.first_date.format_iso(),
            last_date: chart.last_date.format_iso(),
            candles: chart.candle_count(),
            up: chart.group(Direction::Up).count(),
            down: chart.group(Direction::Down).count(),
            output,
        }
    }
}

pub async fn run(args: &ChartArgs, cli: &Cli) -> Result<(), CliError> {
    let form = args.request.form();
    // reject bad input before touching the bar file or the network
    form.validate().map_err(ChartError::from)?;

    let source = super::data_source(cli, &args.request)?;
    let mut session = ChartSession::new(source, surface(args, cli.pretty));

    let current = session.load(&form).await?;
    output::print_json(&ChartSummary::new(current, &args.output), cli.pretty)
}

fn surface(args: &ChartArgs, pretty: bool) -> Box<dyn DisplaySurface> {
    match args.format {
        ChartFormat::Svg => Box::new(SvgSurface::new(
            &args.output,
            SvgOptions {
                width: args.width,
                height: args.height,
                ..SvgOptions::default()
            },
        )),
        ChartFormat::Json => Box::new(JsonSurface::new(&args.output, pretty)),
    }
}
