//! CLI argument definitions for tickchart.
//!
//! # Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `chart` | Fetch daily bars and draw a candlestick chart |
//! | `bars` | Fetch daily bars and print them as JSON |
//! | `exchanges` | List supported exchanges and their ticker suffixes |
//! | `window` | Open the chart form window (`gui` feature) |
//!
//! # Global Options
//!
//! | Option | Default | Description |
//! |--------|---------|-------------|
//! | `--pretty` | `false` | Pretty-print JSON output |
//! | `--verbose` | `false` | Log at debug level on stderr |
//! | `--timeout-ms` | `10000` | Provider request timeout in ms |
//! | `--no-adjust` | `false` | Keep raw prices instead of split/dividend adjusted ones |
//!
//! # Examples
//!
//! ```bash
//! # One year of Apple, written to chart.svg
//! tickchart chart AAPL --start 2023-01-01 --end 2024-01-01
//!
//! # Reliance Industries on the NSE
//! tickchart chart RELIANCE --exchange nse --output reliance.svg
//!
//! # Draw from a local bar file instead of the network
//! tickchart chart AAPL --input bars.json --format json --pretty
//!
//! # Desktop window, loading Infosys on the NSE at startup
//! tickchart window INFY --exchange nse
//! ```

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use tickchart_core::ChartForm;

/// Daily stock candlestick charts.
#[derive(Debug, Parser)]
#[command(
    name = "tickchart",
    author,
    version,
    about = "Daily stock candlestick charts",
    long_about = "tickchart fetches daily open/high/low/close prices for a ticker on NASDAQ, \
the NSE or the BSE and draws them as a candlestick chart.\n\
\n\
Use 'tickchart <command> --help' for command-specific help."
)]
pub struct Cli {
    /// Pretty-print JSON output with indentation.
    #[arg(long, global = true, default_value_t = false)]
    pub pretty: bool,

    /// Log at debug level. Otherwise `RUST_LOG` applies, defaulting to warn.
    #[arg(short, long, global = true, default_value_t = false)]
    pub verbose: bool,

    /// Provider request timeout in milliseconds.
    ///
    /// Overrides `TICKCHART_TIMEOUT_MS`.
    #[arg(long, global = true)]
    pub timeout_ms: Option<u64>,

    /// Do not scale prices by the provider's adjusted close.
    #[arg(long, global = true, default_value_t = false)]
    pub no_adjust: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fetch daily bars and draw them as a candlestick chart.
    ///
    /// On failure the output file is left as it was.
    ///
    /// # Examples
    ///
    ///   tickchart chart AAPL
    ///   tickchart chart TCS --exchange nse --start 2024-01-01 --end 2024-06-01
    ///   tickchart chart 500325 --exchange bse --output reliance.svg
    Chart(ChartArgs),

    /// Fetch daily bars and print them as JSON.
    ///
    /// # Examples
    ///
    ///   tickchart bars AAPL --start 2024-01-01 --end 2024-02-01 --pretty
    Bars(BarsArgs),

    /// List supported exchanges and their ticker suffixes.
    Exchanges,

    /// Open a window with the chart form and draw charts on screen.
    ///
    /// The given request is loaded as soon as the window opens. Later
    /// requests are made from the form.
    ///
    /// # Examples
    ///
    ///   tickchart window
    ///   tickchart window RELIANCE --exchange nse --start 2024-01-01
    #[cfg(feature = "gui")]
    Window(WindowArgs),
}

/// Ticker, exchange and date range shared by data commands.
#[derive(Debug, Clone, Args)]
pub struct RequestArgs {
    /// Ticker symbol without exchange suffix (e.g. AAPL, TCS, 500325).
    #[arg(default_value = "AAPL")]
    pub ticker: String,

    /// Exchange: NASDAQ, NSE, BSE or None (case-insensitive).
    #[arg(long, short = 'x', default_value = "NASDAQ")]
    pub exchange: String,

    /// First day to include, YYYY-MM-DD.
    #[arg(long, default_value = "2023-01-01")]
    pub start: String,

    /// Day after the last one to include, YYYY-MM-DD.
    #[arg(long, default_value = "2024-01-01")]
    pub end: String,

    /// Read bars from a JSON file instead of the network.
    ///
    /// The file holds an array of {"date","open","high","low","close"} objects.
    #[arg(long)]
    pub input: Option<PathBuf>,
}

impl RequestArgs {
    pub fn form(&self) -> ChartForm {
        ChartForm::new(
            self.ticker.as_str(),
            self.exchange.as_str(),
            self.start.as_str(),
            self.end.as_str(),
        )
    }
}

/// Arguments for the `chart` command.
#[derive(Debug, Args)]
pub struct ChartArgs {
    #[command(flatten)]
    pub request: RequestArgs,

    /// Where to write the chart.
    #[arg(long, short, default_value = "chart.svg")]
    pub output: PathBuf,

    /// Chart file format.
    #[arg(long, value_enum, default_value_t = ChartFormat::Svg)]
    pub format: ChartFormat,

    /// SVG canvas width in pixels.
    #[arg(long, default_value_t = 1200, value_parser = clap::value_parser!(u32).range(200..))]
    pub width: u32,

    /// SVG canvas height in pixels.
    #[arg(long, default_value_t = 600, value_parser = clap::value_parser!(u32).range(150..))]
    pub height: u32,
}

/// Arguments for the `bars` command.
#[derive(Debug, Args)]
pub struct BarsArgs {
    #[command(flatten)]
    pub request: RequestArgs,
}

/// Arguments for the `window` command.
#[cfg(feature = "gui")]
#[derive(Debug, Args)]
pub struct WindowArgs {
    #[command(flatten)]
    pub request: RequestArgs,
}

/// Chart output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ChartFormat {
    /// Standalone SVG document.
    Svg,
    /// Drawing primitives as JSON.
    Json,
}
