//! Native window surface painted with egui.
//!
//! [`WindowSurface`] is the [`DisplaySurface`] a chart session presents into.
//! It hands each chart to a shared [`ChartView`], which the window reads every
//! frame and draws with [`paint_chart`].

use std::sync::{Arc, Mutex, PoisonError};

use egui::{Align2, Color32, FontId, Painter, Pos2, Stroke, Vec2};
use tracing::debug;

use crate::axis::{date_ticks, price_ticks};
use crate::render::{Color, Rect, RenderedChart};
use crate::surface::{DisplaySurface, SurfaceError, Viewport, MAX_DATE_TICKS, PRICE_TICK_TARGET};

/// Window background, matching the SVG theme.
pub const BACKGROUND: Color32 = Color32::from_rgb(0x2b, 0x2b, 0x2b);
pub const FOREGROUND: Color32 = Color32::WHITE;

const MARGIN_LEFT: f32 = 72.0;
const MARGIN_RIGHT: f32 = 16.0;
const MARGIN_TOP: f32 = 48.0;
const MARGIN_BOTTOM: f32 = 56.0;

/// The chart a window is currently showing, shared with the surface that
/// fills it.
#[derive(Debug, Clone, Default)]
pub struct ChartView {
    shown: Arc<Mutex<Option<RenderedChart>>>,
}

impl ChartView {
    pub fn with_chart<R>(&self, f: impl FnOnce(Option<&RenderedChart>) -> R) -> R {
        let shown = self.shown.lock().unwrap_or_else(PoisonError::into_inner);
        f(shown.as_ref())
    }

    fn replace(&self, chart: RenderedChart) {
        *self.shown.lock().unwrap_or_else(PoisonError::into_inner) = Some(chart);
    }
}

/// Presents charts into a [`ChartView`] and wakes the window to repaint.
#[derive(Clone)]
pub struct WindowSurface {
    view: ChartView,
    ctx: Option<egui::Context>,
}

impl WindowSurface {
    pub fn new(view: ChartView) -> Self {
        Self { view, ctx: None }
    }

    /// Repaint `ctx` whenever a new chart arrives.
    pub fn with_context(mut self, ctx: egui::Context) -> Self {
        self.ctx = Some(ctx);
        self
    }

    pub fn view(&self) -> &ChartView {
        &self.view
    }
}

impl DisplaySurface for WindowSurface {
    fn present(&mut self, chart: &RenderedChart) -> Result<(), SurfaceError> {
        self.view.replace(chart.clone());
        if let Some(ctx) = &self.ctx {
            ctx.request_repaint();
        }
        debug!(candles = chart.candle_count(), "chart handed to window");
        Ok(())
    }
}

/// Paint `chart` into `area`: background, grid and labels, then one filled
/// rectangle per primitive.
pub fn paint_chart(painter: &Painter, area: egui::Rect, chart: &RenderedChart) {
    painter.rect_filled(area, 0.0, BACKGROUND);

    let view = plot_viewport(chart, area);
    let grid = Stroke::new(1.0, FOREGROUND.gamma_multiply(0.3));
    let label = FontId::proportional(11.0);
    let (left, right) = (view.left as f32, view.right() as f32);
    let (top, bottom) = (view.top as f32, view.bottom() as f32);

    for tick in price_ticks(chart.price_min, chart.price_max, PRICE_TICK_TARGET) {
        let y = view.y(tick) as f32;
        painter.line_segment([Pos2::new(left, y), Pos2::new(right, y)], grid);
        painter.text(
            Pos2::new(left - 6.0, y),
            Align2::RIGHT_CENTER,
            format!("{tick:.2}"),
            label.clone(),
            FOREGROUND,
        );
    }

    for tick in date_ticks(chart.first_date, chart.last_date, MAX_DATE_TICKS) {
        let x = view.x(f64::from(tick.day_number())) as f32;
        painter.line_segment([Pos2::new(x, top), Pos2::new(x, bottom)], grid);
        painter.text(
            Pos2::new(x, bottom + 6.0),
            Align2::CENTER_TOP,
            tick.format_iso(),
            label.clone(),
            FOREGROUND,
        );
    }

    for rect in chart.primitives() {
        if let Some(screen) = screen_rect(&view, rect) {
            painter.rect_filled(screen, 0.0, fill(rect.color, rect.opacity));
        }
    }

    let axis = Stroke::new(1.0, FOREGROUND.gamma_multiply(0.6));
    painter.line_segment([Pos2::new(left, top), Pos2::new(left, bottom)], axis);
    painter.line_segment([Pos2::new(left, bottom), Pos2::new(right, bottom)], axis);

    let centre = (left + right) / 2.0;
    painter.text(
        Pos2::new(centre, area.top() + MARGIN_TOP / 2.0),
        Align2::CENTER_CENTER,
        &chart.title,
        FontId::proportional(16.0),
        FOREGROUND,
    );
    painter.text(
        Pos2::new(centre, area.bottom() - 6.0),
        Align2::CENTER_BOTTOM,
        &chart.x_label,
        label.clone(),
        FOREGROUND,
    );
    painter.text(
        Pos2::new(area.left() + 6.0, top - 6.0),
        Align2::LEFT_BOTTOM,
        &chart.y_label,
        label,
        FOREGROUND,
    );
}

fn plot_viewport(chart: &RenderedChart, area: egui::Rect) -> Viewport {
    Viewport::fit(
        chart,
        f64::from(area.left() + MARGIN_LEFT),
        f64::from(area.top() + MARGIN_TOP),
        f64::from(area.width() - MARGIN_LEFT - MARGIN_RIGHT),
        f64::from(area.height() - MARGIN_TOP - MARGIN_BOTTOM),
    )
}

fn screen_rect(view: &Viewport, rect: &Rect) -> Option<egui::Rect> {
    view.place(rect).map(|placed| {
        egui::Rect::from_min_size(
            Pos2::new(placed.x as f32, placed.y as f32),
            Vec2::new(placed.width as f32, placed.height as f32),
        )
    })
}

fn fill(color: Color, opacity: f64) -> Color32 {
    let alpha = (opacity.clamp(0.0, 1.0) * 255.0).round() as u8;
    Color32::from_rgba_unmultiplied(color.r, color.g, color.b, alpha)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::{render, SegmentKind, UP_COLOR};
    use crate::{Direction, PriceBar, PriceSeries, Symbol, TradingDate};

    fn sample_chart() -> RenderedChart {
        let bars = vec![
            PriceBar::new(TradingDate::parse("2024-01-31").expect("date"), 100.0, 105.0, 99.0, 104.0),
            PriceBar::new(TradingDate::parse("2024-02-01").expect("date"), 104.0, 104.0, 98.0, 99.0),
        ];
        let series = PriceSeries::new(Symbol::parse("AAPL").expect("symbol"), bars).expect("series");
        render(&series).expect("chart")
    }

    fn area() -> egui::Rect {
        egui::Rect::from_min_size(Pos2::new(20.0, 10.0), Vec2::new(800.0, 400.0))
    }

    #[test]
    fn presenting_fills_the_shared_view() {
        let view = ChartView::default();
        let mut surface = WindowSurface::new(view.clone());
        assert!(view.with_chart(|chart| chart.is_none()));

        surface.present(&sample_chart()).expect("present");

        assert_eq!(view.with_chart(|chart| chart.map(RenderedChart::candle_count)), Some(2));
    }

    #[test]
    fn primitives_land_inside_the_plot_area() {
        let chart = sample_chart();
        let view = plot_viewport(&chart, area());
        let plot = egui::Rect::from_min_max(
            Pos2::new(view.left as f32, view.top as f32),
            Pos2::new(view.right() as f32, view.bottom() as f32),
        );

        let placed: Vec<_> = chart
            .primitives()
            .iter()
            .filter_map(|rect| screen_rect(&view, rect))
            .collect();

        assert_eq!(placed.len(), 5);
        assert!(placed.iter().all(|screen| plot.contains_rect(*screen)));
    }

    #[test]
    fn higher_prices_sit_higher_on_screen() {
        let chart = sample_chart();
        let view = plot_viewport(&chart, area());
        let body = |direction: Direction| {
            let rect = chart
                .primitives()
                .iter()
                .find(|rect| rect.kind == SegmentKind::Body && rect.direction == direction)
                .expect("body");
            screen_rect(&view, rect).expect("placed")
        };

        // up body spans 100..104, down body 99..104
        let (up, down) = (body(Direction::Up), body(Direction::Down));
        assert!((up.top() - down.top()).abs() < 1e-3);
        assert!(up.bottom() < down.bottom());
        assert!(up.center().x < down.center().x);
    }

    #[test]
    fn fill_carries_the_primitive_opacity() {
        assert_eq!(
            fill(UP_COLOR, 0.8),
            Color32::from_rgba_unmultiplied(0x26, 0xa6, 0x9a, 204)
        );
        assert_eq!(fill(UP_COLOR, 1.5).a(), 255);
    }

    #[test]
    fn painting_fills_one_rect_per_drawn_primitive() {
        let chart = sample_chart();
        let ctx = egui::Context::default();

        let output = ctx.run(egui::RawInput::default(), |ctx| {
            let painter = ctx.layer_painter(egui::LayerId::background());
            paint_chart(&painter, area(), &chart);
        });

        let rects = output
            .shapes
            .iter()
            .filter(|clipped| matches!(clipped.shape, egui::Shape::Rect(_)))
            .count();
        // background plus two bodies and the three wicks with length
        assert_eq!(rects, 6);
    }
}
