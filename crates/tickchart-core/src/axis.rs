//! Tick placement for the chart axes.

use crate::TradingDate;

/// Month-start dates within `[first, last]`, thinned so at most
/// `max_ticks` remain.
pub fn date_ticks(first: TradingDate, last: TradingDate, max_ticks: usize) -> Vec<TradingDate> {
    let mut months = Vec::new();
    let mut cursor = if first.is_month_start() {
        Some(first)
    } else {
        first.next_month_start()
    };

    while let Some(date) = cursor {
        if date > last {
            break;
        }
        months.push(date);
        cursor = date.next_month_start();
    }

    let max_ticks = max_ticks.max(1);
    if months.len() <= max_ticks {
        return months;
    }

    let stride = months.len().div_ceil(max_ticks);
    months.into_iter().step_by(stride).collect()
}

/// Evenly spaced price ticks on a 1/2/5 ladder covering `[min, max]`.
pub fn price_ticks(min: f64, max: f64, target: usize) -> Vec<f64> {
    if !(min.is_finite() && max.is_finite()) || max <= min || target == 0 {
        return Vec::new();
    }

    let step = nice_step((max - min) / target as f64);
    let first = (min / step).ceil() as i64;
    let last = (max / step).floor() as i64;

    (first..=last).map(|index| index as f64 * step).collect()
}

fn nice_step(raw: f64) -> f64 {
    let magnitude = 10f64.powf(raw.log10().floor());
    let normalized = raw / magnitude;
    let factor = if normalized <= 1.0 {
        1.0
    } else if normalized <= 2.0 {
        2.0
    } else if normalized <= 5.0 {
        5.0
    } else {
        10.0
    };
    factor * magnitude
}
