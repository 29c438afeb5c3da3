//! Linear scales mapping a data domain onto a pixel range, with "nice" tick generation.
use serde::{Deserialize, Serialize};

use crate::utils::fmt_fixed_grouped;

/// Upper bound on the power of ten used to bring tick steps to integers.
const MAX_INTEGER_SCALE: f64 = 1e15;

/// A linear mapping from a domain interval onto a range interval.
///
/// A zero-width domain maps every value onto the start of the range, so that degenerate inputs collapse instead of producing NaN coordinates.
///
/// ```
/// use rusty_snn_viz::scale::LinearScale;
///
/// let x = LinearScale::new([0.0, 100.0], [0.0, 890.0]);
/// assert_eq!(x.map(50.0), 445.0);
/// assert_eq!(x.invert(445.0), 50.0);
/// assert_eq!(x.ticks(5), vec![0.0, 20.0, 40.0, 60.0, 80.0, 100.0]);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearScale {
    domain: [f64; 2],
    range: [f64; 2],
}

impl LinearScale {
    pub fn new(domain: [f64; 2], range: [f64; 2]) -> Self {
        LinearScale { domain, range }
    }

    pub fn domain(&self) -> [f64; 2] {
        self.domain
    }

    pub fn range(&self) -> [f64; 2] {
        self.range
    }

    /// Returns the range sorted in increasing order.
    pub fn range_extent(&self) -> [f64; 2] {
        extent(self.range)
    }

    /// Returns a copy of the scale with another domain.
    pub fn with_domain(&self, domain: [f64; 2]) -> Self {
        LinearScale {
            domain,
            range: self.range,
        }
    }

    /// Map a domain value onto the range.
    pub fn map(&self, x: f64) -> f64 {
        let t = uninterpolate(self.domain[0], self.domain[1], x);
        interpolate(self.range[0], self.range[1], t)
    }

    /// Map a range value back onto the domain.
    pub fn invert(&self, y: f64) -> f64 {
        let t = uninterpolate(self.range[0], self.range[1], y);
        interpolate(self.domain[0], self.domain[1], t)
    }

    /// Returns approximately `count` evenly spaced round values within the domain.
    pub fn ticks(&self, count: usize) -> Vec<f64> {
        match tick_range(self.domain, count) {
            Some((start, stop, step)) => stepped_range(start, stop, step),
            None => vec![],
        }
    }

    /// Returns the number of decimals needed to tell the ticks apart.
    pub fn tick_precision(&self, count: usize) -> usize {
        match tick_range(self.domain, count) {
            Some((_, _, step)) => {
                let precision = -(step.log10() + 0.01).floor();
                precision.max(0.0) as usize
            }
            None => 0,
        }
    }

    /// Returns the ticks together with their labels.
    pub fn tick_labels(&self, count: usize) -> Vec<(f64, String)> {
        let precision = self.tick_precision(count);
        self.ticks(count)
            .into_iter()
            .map(|tick| (tick, fmt_fixed_grouped(tick, precision)))
            .collect()
    }
}

fn extent(interval: [f64; 2]) -> [f64; 2] {
    if interval[0] <= interval[1] {
        interval
    } else {
        [interval[1], interval[0]]
    }
}

fn uninterpolate(a: f64, b: f64, x: f64) -> f64 {
    let span = b - a;
    // A zero-width interval sends everything to its start.
    let span = if span == 0.0 { f64::INFINITY } else { span };
    (x - a) / span
}

fn interpolate(a: f64, b: f64, t: f64) -> f64 {
    a * (1.0 - t) + b * t
}

/// Returns the (start, inclusive stop, step) of the ticks over the domain, if any.
fn tick_range(domain: [f64; 2], count: usize) -> Option<(f64, f64, f64)> {
    let [lo, hi] = extent(domain);
    let span = hi - lo;
    if count == 0 || !span.is_finite() || span <= 0.0 {
        return None;
    }

    let m = count as f64;
    let mut step = 10_f64.powf((span / m).log10().floor());
    let err = m / span * step;
    if err <= 0.15 {
        step *= 10.0;
    } else if err <= 0.35 {
        step *= 5.0;
    } else if err <= 0.75 {
        step *= 2.0;
    }

    // Domains narrower than the smallest subnormal per tick underflow the step.
    if !step.is_finite() || step <= 0.0 {
        return None;
    }

    let start = (lo / step).ceil() * step;
    let stop = (hi / step).floor() * step + step * 0.5;
    if !start.is_finite() || !stop.is_finite() {
        return None;
    }
    Some((start, stop, step))
}

/// Values from start (inclusive) to stop (exclusive), computed in a space where the step is an integer.
fn stepped_range(start: f64, stop: f64, step: f64) -> Vec<f64> {
    let k = integer_scale(step.abs());
    let (start, stop, step) = (start * k, stop * k, step * k);

    let mut values = vec![];
    let mut i = 0.0;
    loop {
        let value = start + step * i;
        if value >= stop {
            break;
        }
        values.push(value / k);
        i += 1.0;
    }
    values
}

fn integer_scale(x: f64) -> f64 {
    let mut k = 1.0;
    while (x * k) % 1.0 != 0.0 && k < MAX_INTEGER_SCALE {
        k *= 10.0;
    }
    k
}
