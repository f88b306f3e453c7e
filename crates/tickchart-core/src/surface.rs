//! Display surfaces that present a [`RenderedChart`].
//!
//! | Surface | Output |
//! |---------|--------|
//! | [`SvgSurface`] | Standalone SVG document with axes, grid and candles |
//! | [`JsonSurface`] | The chart's drawing primitives as JSON |
//!
//! File surfaces write to a sibling temporary file and rename it over the
//! target, so a failed redraw leaves the previous chart in place.

use std::fmt::Write as _;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

use crate::axis::{date_ticks, price_ticks};
use crate::render::{Rect, RenderedChart, SegmentKind};
use crate::TradingDate;

/// Failures while presenting a chart.
#[derive(Debug, Error)]
pub enum SurfaceError {
    #[error("failed to write chart to '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to encode chart: {0}")]
    Encode(String),
}

/// Something that can show a rendered chart.
pub trait DisplaySurface {
    fn present(&mut self, chart: &RenderedChart) -> Result<(), SurfaceError>;
}

impl<T: DisplaySurface + ?Sized> DisplaySurface for Box<T> {
    fn present(&mut self, chart: &RenderedChart) -> Result<(), SurfaceError> {
        (**self).present(chart)
    }
}

/// Canvas size and theme for SVG output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SvgOptions {
    pub width: u32,
    pub height: u32,
    pub background: String,
    pub foreground: String,
}

impl Default for SvgOptions {
    fn default() -> Self {
        Self {
            width: 1200,
            height: 600,
            background: String::from("#2b2b2b"),
            foreground: String::from("#ffffff"),
        }
    }
}

const MARGIN_LEFT: f64 = 80.0;
const MARGIN_RIGHT: f64 = 24.0;
const MARGIN_TOP: f64 = 56.0;
const MARGIN_BOTTOM: f64 = 96.0;
pub(crate) const MAX_DATE_TICKS: usize = 12;
pub(crate) const PRICE_TICK_TARGET: usize = 8;

/// Writes each presented chart as an SVG file.
#[derive(Debug, Clone)]
pub struct SvgSurface {
    path: PathBuf,
    options: SvgOptions,
}

impl SvgSurface {
    pub fn new(path: impl Into<PathBuf>, options: SvgOptions) -> Self {
        Self {
            path: path.into(),
            options,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl DisplaySurface for SvgSurface {
    fn present(&mut self, chart: &RenderedChart) -> Result<(), SurfaceError> {
        let document = svg_document(chart, &self.options);
        write_replacing(&self.path, document.as_bytes())?;
        debug!(path = %self.path.display(), bytes = document.len(), "wrote svg chart");
        Ok(())
    }
}

/// Writes each presented chart as JSON.
#[derive(Debug, Clone)]
pub struct JsonSurface {
    path: PathBuf,
    pretty: bool,
}

impl JsonSurface {
    pub fn new(path: impl Into<PathBuf>, pretty: bool) -> Self {
        Self {
            path: path.into(),
            pretty,
        }
    }
}

impl DisplaySurface for JsonSurface {
    fn present(&mut self, chart: &RenderedChart) -> Result<(), SurfaceError> {
        let payload = if self.pretty {
            serde_json::to_string_pretty(chart)
        } else {
            serde_json::to_string(chart)
        }
        .map_err(|e| SurfaceError::Encode(e.to_string()))?;

        write_replacing(&self.path, payload.as_bytes())?;
        debug!(path = %self.path.display(), "wrote chart json");
        Ok(())
    }
}

fn write_replacing(path: &Path, contents: &[u8]) -> Result<(), SurfaceError> {
    let io_error = |source: io::Error| SurfaceError::Io {
        path: path.to_path_buf(),
        source,
    };

    let mut staging = path.as_os_str().to_owned();
    staging.push(".tmp");
    let staging = PathBuf::from(staging);

    fs::write(&staging, contents).map_err(io_error)?;
    fs::rename(&staging, path).map_err(|source| {
        let _ = fs::remove_file(&staging);
        io_error(source)
    })
}

/// Maps chart coordinates onto a plot area in device units, y growing down.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Viewport {
    x_min: f64,
    x_max: f64,
    y_min: f64,
    y_max: f64,
    pub(crate) left: f64,
    pub(crate) top: f64,
    pub(crate) width: f64,
    pub(crate) height: f64,
}

/// A primitive placed on the plot area, top-left anchored.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Placement {
    pub(crate) x: f64,
    pub(crate) y: f64,
    pub(crate) width: f64,
    pub(crate) height: f64,
}

impl Viewport {
    fn new(chart: &RenderedChart, options: &SvgOptions) -> Self {
        Self::fit(
            chart,
            MARGIN_LEFT,
            MARGIN_TOP,
            f64::from(options.width) - MARGIN_LEFT - MARGIN_RIGHT,
            f64::from(options.height) - MARGIN_TOP - MARGIN_BOTTOM,
        )
    }

    /// One day of padding on each side of the first and last candle.
    pub(crate) fn fit(chart: &RenderedChart, left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            x_min: f64::from(chart.first_date.day_number()) - 1.0,
            x_max: f64::from(chart.last_date.day_number()) + 1.0,
            y_min: chart.price_min,
            y_max: chart.price_max,
            left,
            top,
            width: width.max(1.0),
            height: height.max(1.0),
        }
    }

    pub(crate) fn x(&self, value: f64) -> f64 {
        self.left + (value - self.x_min) / (self.x_max - self.x_min) * self.width
    }

    pub(crate) fn y(&self, value: f64) -> f64 {
        self.top + (self.y_max - value) / (self.y_max - self.y_min) * self.height
    }

    fn x_scale(&self) -> f64 {
        self.width / (self.x_max - self.x_min)
    }

    pub(crate) fn right(&self) -> f64 {
        self.left + self.width
    }

    pub(crate) fn bottom(&self) -> f64 {
        self.top + self.height
    }

    /// Where `rect` lands, or `None` when there is nothing to draw.
    ///
    /// Flat bodies keep a one unit hairline. Zero-length wicks are dropped.
    pub(crate) fn place(&self, rect: &Rect) -> Option<Placement> {
        if !(rect.bottom.is_finite() && rect.top.is_finite() && rect.x.is_finite()) {
            return None;
        }

        let y_top = self.y(rect.top.max(rect.bottom));
        let y_bottom = self.y(rect.top.min(rect.bottom));
        let mut height = y_bottom - y_top;
        let mut y = y_top;

        match rect.kind {
            SegmentKind::Body if height < 1.0 => {
                y -= (1.0 - height) / 2.0;
                height = 1.0;
            }
            SegmentKind::UpperWick | SegmentKind::LowerWick if height <= 0.0 => return None,
            _ => {}
        }

        let width = (rect.width * self.x_scale()).max(1.0);
        Some(Placement {
            x: self.x(rect.x) - width / 2.0,
            y,
            width,
            height,
        })
    }
}

/// Build a standalone SVG document for `chart`.
pub fn svg_document(chart: &RenderedChart, options: &SvgOptions) -> String {
    let view = Viewport::new(chart, options);
    let fg = escape(&options.foreground);
    let mut svg = String::new();

    // Writing into a String cannot fail.
    let _ = writeln!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}" font-family="Arial, sans-serif">"#,
        w = options.width,
        h = options.height,
    );
    let _ = writeln!(
        svg,
        r#"<rect x="0" y="0" width="{}" height="{}" fill="{}"/>"#,
        options.width,
        options.height,
        escape(&options.background)
    );

    write_price_axis(&mut svg, chart, &view, &fg);
    write_date_axis(&mut svg, chart, &view, &fg);

    let _ = writeln!(svg, r#"<g class="candles">"#);
    for rect in chart.primitives() {
        write_rect(&mut svg, rect, &view);
    }
    let _ = writeln!(svg, "</g>");

    let _ = writeln!(
        svg,
        r#"<rect x="{:.2}" y="{:.2}" width="{:.2}" height="{:.2}" fill="none" stroke="{fg}" stroke-opacity="0.6"/>"#,
        view.left, view.top, view.width, view.height
    );
    let _ = writeln!(
        svg,
        r#"<text x="{:.2}" y="32" fill="{fg}" font-size="16" font-weight="bold" text-anchor="middle">{}</text>"#,
        view.left + view.width / 2.0,
        escape(&chart.title)
    );
    let _ = writeln!(
        svg,
        r#"<text x="{:.2}" y="{:.2}" fill="{fg}" font-size="12" text-anchor="middle">{}</text>"#,
        view.left + view.width / 2.0,
        f64::from(options.height) - 12.0,
        escape(&chart.x_label)
    );
    let _ = writeln!(
        svg,
        r#"<text x="0" y="0" fill="{fg}" font-size="12" text-anchor="middle" transform="translate(18 {:.2}) rotate(-90)">{}</text>"#,
        view.top + view.height / 2.0,
        escape(&chart.y_label)
    );
    svg.push_str("</svg>\n");
    svg
}

fn write_price_axis(svg: &mut String, chart: &RenderedChart, view: &Viewport, fg: &str) {
    let _ = writeln!(svg, r#"<g class="price-axis">"#);
    for tick in price_ticks(chart.price_min, chart.price_max, PRICE_TICK_TARGET) {
        let y = view.y(tick);
        let _ = writeln!(
            svg,
            r#"<line x1="{:.2}" y1="{y:.2}" x2="{:.2}" y2="{y:.2}" stroke="{fg}" stroke-opacity="0.3"/>"#,
            view.left,
            view.right()
        );
        let _ = writeln!(
            svg,
            r#"<text x="{:.2}" y="{:.2}" fill="{fg}" font-size="11" text-anchor="end">{tick:.2}</text>"#,
            view.left - 6.0,
            y + 4.0
        );
    }
    let _ = writeln!(svg, "</g>");
}

fn write_date_axis(svg: &mut String, chart: &RenderedChart, view: &Viewport, fg: &str) {
    let _ = writeln!(svg, r#"<g class="date-axis">"#);
    for tick in date_ticks(chart.first_date, chart.last_date, MAX_DATE_TICKS) {
        let x = view.x(f64::from(tick.day_number()));
        let _ = writeln!(
            svg,
            r#"<line x1="{x:.2}" y1="{:.2}" x2="{x:.2}" y2="{:.2}" stroke="{fg}" stroke-opacity="0.3"/>"#,
            view.top,
            view.bottom()
        );
        write_date_label(svg, tick, x, view.bottom() + 14.0, fg);
    }
    let _ = writeln!(svg, "</g>");
}

fn write_date_label(svg: &mut String, date: TradingDate, x: f64, y: f64, fg: &str) {
    let _ = writeln!(
        svg,
        r#"<text x="0" y="0" fill="{fg}" font-size="11" text-anchor="end" transform="translate({x:.2} {y:.2}) rotate(-30)">{date}</text>"#
    );
}

fn write_rect(svg: &mut String, rect: &Rect, view: &Viewport) {
    let Some(placed) = view.place(rect) else {
        return;
    };

    let _ = writeln!(
        svg,
        r#"<rect x="{:.2}" y="{:.2}" width="{:.2}" height="{:.2}" fill="{}" fill-opacity="{}"/>"#,
        placed.x,
        placed.y,
        placed.width,
        placed.height,
        rect.color,
        rect.opacity
    );
}

fn escape(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            other => escaped.push(other),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::render;
    use crate::{PriceBar, PriceSeries, Symbol};

    fn sample_chart() -> RenderedChart {
        let bars = vec![
            PriceBar::new(TradingDate::parse("2024-01-31").expect("date"), 100.0, 105.0, 99.0, 104.0),
            PriceBar::new(TradingDate::parse("2024-02-01").expect("date"), 104.0, 104.0, 98.0, 99.0),
        ];
        let series = PriceSeries::new(Symbol::parse("AAPL").expect("symbol"), bars).expect("series");
        render(&series).expect("chart")
    }

    #[test]
    fn svg_contains_title_ticks_and_candles() {
        let svg = svg_document(&sample_chart(), &SvgOptions::default());
        assert!(svg.starts_with("<svg"));
        assert!(svg.contains("AAPL Stock Price"));
        assert!(svg.contains(">2024-02-01</text>"));
        assert!(svg.contains(r##"fill="#26a69a" fill-opacity="0.8""##));
        assert!(svg.contains(r##"fill="#ef5350" fill-opacity="1""##));
        assert!(svg.trim_end().ends_with("</svg>"));
    }

    #[test]
    fn zero_length_wicks_are_skipped() {
        let svg = svg_document(&sample_chart(), &SvgOptions::default());
        let candles = svg
            .split(r#"<g class="candles">"#)
            .nth(1)
            .and_then(|rest| rest.split("</g>").next())
            .expect("candle group");
        // Second bar's upper wick spans [104, 104].
        assert_eq!(candles.matches("<rect").count(), 5);
    }

    #[test]
    fn flat_bodies_keep_a_hairline_and_flat_wicks_vanish() {
        let chart = sample_chart();
        let view = Viewport::fit(&chart, 10.0, 20.0, 400.0, 200.0);
        let find = |kind: SegmentKind| {
            *chart
                .primitives()
                .iter()
                .find(|rect| rect.kind == kind)
                .expect("segment")
        };

        let mut body = find(SegmentKind::Body);
        body.top = body.bottom;
        let placed = view.place(&body).expect("hairline");
        assert_eq!(placed.height, 1.0);
        assert!(placed.x > view.left && placed.x + placed.width < view.right());

        let mut wick = find(SegmentKind::UpperWick);
        wick.top = wick.bottom;
        assert_eq!(view.place(&wick), None);
    }

    #[test]
    fn escapes_markup_in_labels() {
        assert_eq!(escape("A&B <x>"), "A&amp;B &lt;x&gt;");
    }

    #[test]
    fn svg_surface_replaces_existing_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("chart.svg");
        fs::write(&path, "stale").expect("seed file");

        let mut surface = SvgSurface::new(&path, SvgOptions::default());
        surface.present(&sample_chart()).expect("present");

        let written = fs::read_to_string(&path).expect("read back");
        assert!(written.starts_with("<svg"));
        assert!(!dir.path().join("chart.svg.tmp").exists());
    }

    #[test]
    fn json_surface_writes_primitives() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("chart.json");

        let mut surface = JsonSurface::new(&path, false);
        surface.present(&sample_chart()).expect("present");

        let value: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).expect("read back")).expect("json");
        assert_eq!(value["primitives"].as_array().map(Vec::len), Some(6));
    }

    #[test]
    fn missing_directory_is_an_io_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut surface = SvgSurface::new(dir.path().join("missing/chart.svg"), SvgOptions::default());
        let err = surface.present(&sample_chart()).expect_err("must fail");
        assert!(matches!(err, SurfaceError::Io { .. }));
    }
}
