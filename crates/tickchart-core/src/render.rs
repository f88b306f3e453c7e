//! # Candlestick rendering
//!
//! Turns a [`PriceSeries`] into a [`RenderedChart`]: three filled rectangles
//! per bar (body, upper wick, lower wick) on a day-valued horizontal axis and
//! a price-valued vertical axis.
//!
//! ```text
//!        │   upper wick  [body_high, high]
//!      ┌─┴─┐
//!      │   │ body        [min(open, close), max(open, close)]
//!      └─┬─┘
//!        │   lower wick  [low, body_low]
//! ```
//!
//! A bar closing at or above its open is [`Direction::Up`]. Every rectangle
//! depends only on its own bar, so output order follows input order and
//! nothing is carried between bars.

use std::fmt::{Display, Formatter};

use serde::Serialize;
use thiserror::Error;
use tracing::info;

use crate::{PriceBar, PriceSeries, TradingDate};

/// Renderer failures.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RenderError {
    #[error("no data available to chart")]
    EmptyData,
}

/// 24-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(into = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl Display for Color {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.hex())
    }
}

impl From<Color> for String {
    fn from(value: Color) -> Self {
        value.hex()
    }
}

pub const UP_COLOR: Color = Color::rgb(0x26, 0xa6, 0x9a);
pub const DOWN_COLOR: Color = Color::rgb(0xef, 0x53, 0x50);

/// Whether a bar closed at/above (`Up`) or below (`Down`) its open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Up,
    Down,
}

impl Direction {
    pub fn of(bar: &PriceBar) -> Self {
        if bar.close >= bar.open {
            Self::Up
        } else {
            Self::Down
        }
    }
}

/// Geometry of one candle, derived from a single bar.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CandlestickShape {
    pub date: TradingDate,
    pub direction: Direction,
    pub body_low: f64,
    pub body_high: f64,
    pub high: f64,
    pub low: f64,
}

impl CandlestickShape {
    pub fn from_bar(bar: &PriceBar) -> Self {
        Self {
            date: bar.date,
            direction: Direction::of(bar),
            body_low: bar.open.min(bar.close),
            body_high: bar.open.max(bar.close),
            high: bar.high,
            low: bar.low,
        }
    }

    pub const fn body(&self) -> (f64, f64) {
        (self.body_low, self.body_high)
    }

    pub const fn upper_wick(&self) -> (f64, f64) {
        (self.body_high, self.high)
    }

    pub const fn lower_wick(&self) -> (f64, f64) {
        (self.low, self.body_low)
    }

    /// Split bars into up and down groups, each in input order.
    pub fn partition(bars: &[PriceBar]) -> (Vec<&PriceBar>, Vec<&PriceBar>) {
        bars.iter()
            .partition(|bar| Direction::of(bar) == Direction::Up)
    }
}

/// Which part of a candle a rectangle draws.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SegmentKind {
    Body,
    UpperWick,
    LowerWick,
}

/// Filled rectangle centred on a date, spanning `[bottom, top]` in price.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Rect {
    pub kind: SegmentKind,
    pub direction: Direction,
    pub date: TradingDate,
    /// Horizontal centre in day units (see [`TradingDate::day_number`]).
    pub x: f64,
    pub width: f64,
    pub bottom: f64,
    pub top: f64,
    pub color: Color,
    pub opacity: f64,
}

impl Rect {
    pub fn height(&self) -> f64 {
        self.top - self.bottom
    }

    pub fn left(&self) -> f64 {
        self.x - self.width / 2.0
    }
}

/// Colors, widths and opacities used for candles.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CandleStyle {
    pub up_color: Color,
    pub down_color: Color,
    /// Body width as a fraction of one day.
    pub body_width: f64,
    /// Wick width as a fraction of one day.
    pub wick_width: f64,
    pub body_opacity: f64,
    pub wick_opacity: f64,
}

impl Default for CandleStyle {
    fn default() -> Self {
        Self {
            up_color: UP_COLOR,
            down_color: DOWN_COLOR,
            body_width: 0.6,
            wick_width: 0.05,
            body_opacity: 0.8,
            wick_opacity: 1.0,
        }
    }
}

impl CandleStyle {
    pub const fn color(&self, direction: Direction) -> Color {
        match direction {
            Direction::Up => self.up_color,
            Direction::Down => self.down_color,
        }
    }
}

/// Drawing instructions for one series, ready for a display surface.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderedChart {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub first_date: TradingDate,
    pub last_date: TradingDate,
    /// Padded price span covering every finite price in the series.
    pub price_min: f64,
    pub price_max: f64,
    primitives: Vec<Rect>,
}

impl RenderedChart {
    pub fn primitives(&self) -> &[Rect] {
        &self.primitives
    }

    /// Number of candles drawn.
    pub fn candle_count(&self) -> usize {
        self.primitives.len() / 3
    }

    /// `[body, upper wick, lower wick]` per candle, in date order.
    pub fn candles(&self) -> impl Iterator<Item = &[Rect]> {
        self.primitives.chunks_exact(3)
    }

    /// Candles of one direction, in date order.
    pub fn group(&self, direction: Direction) -> impl Iterator<Item = &[Rect]> {
        self.candles()
            .filter(move |candle| candle[0].direction == direction)
    }
}

/// Builds [`RenderedChart`]s with a fixed [`CandleStyle`].
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CandlestickRenderer {
    style: CandleStyle,
}

impl CandlestickRenderer {
    pub const fn new(style: CandleStyle) -> Self {
        Self { style }
    }

    pub const fn style(&self) -> &CandleStyle {
        &self.style
    }

    pub fn render(&self, series: &PriceSeries) -> Result<RenderedChart, RenderError> {
        let bars = series.bars();
        let (Some(first), Some(last)) = (bars.first(), bars.last()) else {
            return Err(RenderError::EmptyData);
        };

        let primitives: Vec<Rect> = bars
            .iter()
            .flat_map(|bar| self.candle(&CandlestickShape::from_bar(bar)))
            .collect();
        let (price_min, price_max) = price_span(bars);

        let chart = RenderedChart {
            title: format!("{} Stock Price", series.symbol),
            x_label: String::from("Date"),
            y_label: price_label(series.currency.as_deref()),
            first_date: first.date,
            last_date: last.date,
            price_min,
            price_max,
            primitives,
        };

        info!(
            symbol = %series.symbol,
            candles = chart.candle_count(),
            up = chart.group(Direction::Up).count(),
            down = chart.group(Direction::Down).count(),
            "rendered candlestick chart"
        );

        Ok(chart)
    }

    fn candle(&self, shape: &CandlestickShape) -> [Rect; 3] {
        let color = self.style.color(shape.direction);
        let rect = |kind, (bottom, top): (f64, f64), width, opacity| Rect {
            kind,
            direction: shape.direction,
            date: shape.date,
            x: f64::from(shape.date.day_number()),
            width,
            bottom,
            top,
            color,
            opacity,
        };

        [
            rect(
                SegmentKind::Body,
                shape.body(),
                self.style.body_width,
                self.style.body_opacity,
            ),
            rect(
                SegmentKind::UpperWick,
                shape.upper_wick(),
                self.style.wick_width,
                self.style.wick_opacity,
            ),
            rect(
                SegmentKind::LowerWick,
                shape.lower_wick(),
                self.style.wick_width,
                self.style.wick_opacity,
            ),
        ]
    }
}

/// Render with the default style.
pub fn render(series: &PriceSeries) -> Result<RenderedChart, RenderError> {
    CandlestickRenderer::default().render(series)
}

fn price_label(currency: Option<&str>) -> String {
    match currency {
        Some(code) if !code.eq_ignore_ascii_case("USD") => format!("Price ({code})"),
        _ => String::from("Price ($)"),
    }
}

fn price_span(bars: &[PriceBar]) -> (f64, f64) {
    let (min, max) = bars
        .iter()
        .flat_map(|bar| [bar.open, bar.high, bar.low, bar.close])
        .filter(|value| value.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(min, max), value| {
            (min.min(value), max.max(value))
        });

    if !min.is_finite() {
        return (0.0, 1.0);
    }

    let span = max - min;
    let pad = if span > 0.0 {
        span * 0.05
    } else {
        (min.abs() * 0.01).max(1.0)
    };
    (min - pad, max + pad)
}
