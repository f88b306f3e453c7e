//! Behavior tests for the OHLC to candlestick transform.

use tickchart_core::render::{DOWN_COLOR, UP_COLOR};
use tickchart_tests::bar;
use tickchart_core::{
    render, CandleStyle, CandlestickRenderer, Direction, PriceBar, PriceSeries, Rect,
    RenderError, SegmentKind, Symbol, TradingDate,
};

fn series(bars: Vec<PriceBar>) -> PriceSeries {
    PriceSeries::new(Symbol::parse("AAPL").expect("symbol"), bars).expect("ordered bars")
}

fn month_of_bars() -> Vec<PriceBar> {
    (1..=28)
        .map(|day| {
            let open = 100.0 + f64::from(day % 7);
            let step = if day % 3 == 0 { -2.5 } else { 1.5 };
            let close = open + step * f64::from(day % 2);
            PriceBar::new(
                TradingDate::from_ymd(2024, 2, day).expect("date"),
                open,
                open.max(close) + 1.0,
                open.min(close) - 1.0,
                close,
            )
        })
        .collect()
}

fn spans(rect: &Rect) -> (f64, f64) {
    (rect.bottom, rect.top)
}

// =============================================================================
// Shape of the output
// =============================================================================

#[test]
fn every_bar_becomes_a_body_upper_wick_lower_wick_triple_in_date_order() {
    // Given: four weeks of daily bars
    let bars = month_of_bars();
    let chart = render(&series(bars.clone())).expect("chart");

    // Then: exactly three primitives per bar, grouped per candle
    assert_eq!(chart.primitives().len(), 3 * bars.len());
    assert_eq!(chart.candle_count(), bars.len());

    for (candle, bar) in chart.candles().zip(&bars) {
        let kinds: Vec<SegmentKind> = candle.iter().map(|rect| rect.kind).collect();
        assert_eq!(
            kinds,
            [SegmentKind::Body, SegmentKind::UpperWick, SegmentKind::LowerWick]
        );
        assert!(candle.iter().all(|rect| rect.date == bar.date));
    }
}

#[test]
fn color_tracks_direction_and_ties_count_as_up() {
    let bars = vec![
        bar("2024-01-01", 100.0, 101.0, 99.0, 100.5),
        bar("2024-01-02", 100.0, 101.0, 99.0, 99.5),
        bar("2024-01-03", 100.0, 101.0, 99.0, 100.0),
    ];
    let chart = render(&series(bars)).expect("chart");
    let candles: Vec<&[Rect]> = chart.candles().collect();

    let expected = [
        (Direction::Up, UP_COLOR),
        (Direction::Down, DOWN_COLOR),
        (Direction::Up, UP_COLOR),
    ];
    for (candle, (direction, color)) in candles.iter().zip(expected) {
        for rect in candle.iter() {
            assert_eq!(rect.direction, direction);
            assert_eq!(rect.color, color);
        }
    }
}

#[test]
fn segments_span_body_and_wick_ranges() {
    for bar in month_of_bars() {
        let chart = render(&series(vec![bar])).expect("chart");
        let [body, upper, lower] = chart.primitives() else {
            panic!("expected three primitives");
        };
        let body_low = bar.open.min(bar.close);
        let body_high = bar.open.max(bar.close);

        assert_eq!(spans(body), (body_low, body_high));
        assert_eq!(spans(upper), (body_high, bar.high));
        assert_eq!(spans(lower), (bar.low, body_low));
    }
}

#[test]
fn empty_series_is_rejected_without_primitives() {
    let empty = PriceSeries::new(Symbol::parse("AAPL").expect("symbol"), Vec::new())
        .expect("empty series is structurally valid");

    let result = render(&empty);

    assert_eq!(result, Err(RenderError::EmptyData));
}

#[test]
fn permuted_then_resorted_input_renders_identically() {
    // Given: the same bars delivered in a scrambled order
    let bars = month_of_bars();
    let mut scrambled = bars.clone();
    scrambled.reverse();
    scrambled.rotate_left(5);

    // When: both are normalized by date and rendered
    let sorted = PriceSeries::from_unsorted(Symbol::parse("AAPL").expect("symbol"), scrambled);
    let original = render(&series(bars)).expect("chart");
    let resorted = render(&sorted).expect("chart");

    // Then: the primitive sets match
    assert_eq!(original.primitives(), resorted.primitives());
}

#[test]
fn horizontal_position_depends_only_on_the_bar_date() {
    let alone = render(&series(vec![bar("2024-03-05", 10.0, 12.0, 9.0, 11.0)])).expect("chart");
    let with_neighbors = render(&series(vec![
        bar("2024-03-04", 50.0, 55.0, 45.0, 46.0),
        bar("2024-03-05", 10.0, 12.0, 9.0, 11.0),
        bar("2024-03-06", 70.0, 80.0, 60.0, 79.0),
    ]))
    .expect("chart");

    let middle = with_neighbors.candles().nth(1).expect("middle candle");
    assert_eq!(alone.primitives(), middle);
}

// =============================================================================
// Worked example
// =============================================================================

#[test]
fn two_day_example_matches_expected_candles() {
    let chart = render(&series(vec![
        bar("2024-01-01", 100.0, 105.0, 99.0, 104.0),
        bar("2024-01-02", 104.0, 104.0, 98.0, 99.0),
    ]))
    .expect("chart");
    let candles: Vec<&[Rect]> = chart.candles().collect();

    // Day one closes higher.
    assert_eq!(candles[0][0].direction, Direction::Up);
    assert_eq!(spans(&candles[0][0]), (100.0, 104.0));
    assert_eq!(spans(&candles[0][1]), (104.0, 105.0));
    assert_eq!(spans(&candles[0][2]), (99.0, 100.0));

    // Day two closes lower and its upper wick has zero length.
    assert_eq!(candles[1][0].direction, Direction::Down);
    assert_eq!(spans(&candles[1][0]), (99.0, 104.0));
    assert_eq!(spans(&candles[1][1]), (104.0, 104.0));
    assert_eq!(candles[1][1].height(), 0.0);
    assert_eq!(spans(&candles[1][2]), (98.0, 99.0));

    // Consecutive days sit one unit apart on the horizontal axis.
    assert_eq!(candles[1][0].x - candles[0][0].x, 1.0);
}

#[test]
fn inconsistent_bars_are_drawn_without_complaint() {
    // high below the close, low above the open
    let chart = render(&series(vec![bar("2024-01-01", 100.0, 101.0, 102.0, 104.0)]))
        .expect("chart");
    let [_, upper, lower] = chart.primitives() else {
        panic!("expected three primitives");
    };
    assert_eq!(spans(upper), (104.0, 101.0));
    assert_eq!(spans(lower), (102.0, 100.0));
}

#[test]
fn custom_style_changes_widths_and_colors_only() {
    let style = CandleStyle {
        body_width: 0.8,
        wick_width: 0.1,
        ..CandleStyle::default()
    };
    let renderer = CandlestickRenderer::new(style);
    let input = series(vec![bar("2024-01-01", 100.0, 105.0, 99.0, 104.0)]);

    let styled = renderer.render(&input).expect("chart");
    let plain = render(&input).expect("chart");

    assert_eq!(styled.primitives()[0].width, 0.8);
    assert_eq!(styled.primitives()[1].width, 0.1);
    for (a, b) in styled.primitives().iter().zip(plain.primitives()) {
        assert_eq!(spans(a), spans(b));
        assert_eq!(a.x, b.x);
    }
}

#[test]
fn groups_split_candles_by_direction_in_date_order() {
    let chart = render(&series(vec![
        bar("2024-01-01", 10.0, 12.0, 9.0, 11.0),
        bar("2024-01-02", 11.0, 12.0, 9.0, 10.0),
        bar("2024-01-03", 10.0, 12.0, 9.0, 11.5),
    ]))
    .expect("chart");

    let up: Vec<String> = chart
        .group(Direction::Up)
        .map(|candle| candle[0].date.format_iso())
        .collect();
    let down = chart.group(Direction::Down).count();

    assert_eq!(up, ["2024-01-01", "2024-01-03"]);
    assert_eq!(down, 1);
}
