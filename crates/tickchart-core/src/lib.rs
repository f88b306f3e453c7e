//! # Tickchart Core
//!
//! Daily price loading and candlestick rendering.
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`adapters`] | Yahoo Finance chart adapter and file-backed fixture source |
//! | [`axis`] | Date and price tick placement |
//! | [`config`] | Loader configuration with environment overrides |
//! | [`data_source`] | Data source trait and request/error types |
//! | [`domain`] | Ticker, exchange, date and price bar types |
//! | [`error`] | Validation and request-level errors |
//! | [`http_client`] | HTTP client abstraction |
//! | [`render`] | OHLC to candlestick primitive transform |
//! | [`request`] | User form and validated chart request |
//! | [`session`] | Current-chart owner driving one request at a time |
//! | [`surface`] | SVG and JSON display surfaces |
//! | `window` | egui window surface and chart painter (`gui` feature) |
//!
//! ## Pipeline
//!
//! ```text
//! ┌─────────────┐   ┌──────────────┐   ┌──────────────┐   ┌────────────────┐
//! │ ChartForm   │──▶│ DataSource   │──▶│ Candlestick  │──▶│ DisplaySurface │
//! │ (validate)  │   │ (PriceSeries)│   │ Renderer     │   │ (svg/json/gui) │
//! └─────────────┘   └──────────────┘   └──────────────┘   └────────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use tickchart_core::{ChartForm, ChartSession, LoaderConfig, SvgOptions, SvgSurface, YahooAdapter};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() {
//!     let mut session = ChartSession::new(
//!         YahooAdapter::new(LoaderConfig::from_env()),
//!         SvgSurface::new("chart.svg", SvgOptions::default()),
//!     );
//!     let form = ChartForm::new("AAPL", "NASDAQ", "2023-01-01", "2024-01-01");
//!     match session.submit(&form).await {
//!         Ok(current) => println!("{} candles", current.chart.candle_count()),
//!         Err(notice) => eprintln!("{notice}"),
//!     }
//! }
//! ```

pub mod adapters;
pub mod axis;
pub mod config;
pub mod data_source;
pub mod domain;
pub mod error;
pub mod http_client;
pub mod render;
pub mod request;
pub mod session;
pub mod surface;
#[cfg(feature = "gui")]
pub mod window;

pub use adapters::{FixtureSource, YahooAdapter};

pub use config::LoaderConfig;

pub use data_source::{DataSource, HistoryRequest, SourceError, SourceErrorKind};

pub use domain::{DateRange, Exchange, PriceBar, PriceSeries, Symbol, TradingDate};

pub use error::{ChartError, ValidationError};

pub use http_client::{HttpClient, HttpError, HttpRequest, HttpResponse, ReqwestHttpClient};

pub use render::{
    render, CandleStyle, CandlestickRenderer, CandlestickShape, Color, Direction, Rect,
    RenderError, RenderedChart, SegmentKind,
};

pub use request::{ChartForm, ChartRequest};

pub use session::{ChartSession, CurrentChart, Notification};

pub use surface::{DisplaySurface, JsonSurface, SurfaceError, SvgOptions, SvgSurface};

#[cfg(feature = "gui")]
pub use window::{paint_chart, ChartView, WindowSurface};
