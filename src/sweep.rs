//! Frequency response by sine sweep.
//!
//! Each swept frequency gets its own test tone, run through the filter from
//! a fresh start. The tallest output sample, in dB, is the response at that
//! frequency.

use crate::error::{Error, Result};
use crate::filter::FilterDesign;
use crate::signal::{self, Buffer};

use tracing::{debug, info, warn};

// fraction of a step forgiven when deciding whether `stop` is reached
const STEP_TOLERANCE: f64 = 1e-6;

/// The swept frequencies: `start, start + step, ...` up to and including
/// `stop`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SweepConfig {
    start: f64,
    stop: f64,
    step: f64,
    count: usize,
}

// `None` when the count does not fit in a usize
fn frequency_count(start: f64, stop: f64, step: f64) -> Option<usize> {
    if stop < start {
        return Some(0);
    }
    let steps = ((stop - start) / step + STEP_TOLERANCE).floor();
    if !(steps < usize::MAX as f64) {
        return None;
    }
    (steps as usize).checked_add(1)
}

impl SweepConfig {
    pub fn new(start: f64, stop: f64, step: f64) -> Result<Self> {
        if !(start.is_finite() && stop.is_finite() && step.is_finite()) {
            return Err(Error::InvalidSweep(format!(
                "non-finite bounds {} to {} by {}", start, stop, step)));
        }
        if step <= 0.0 {
            return Err(Error::InvalidSweep(format!(
                "step must be positive, got {}", step)));
        }
        let count = frequency_count(start, stop, step).ok_or_else(|| {
            Error::InvalidSweep(format!(
                "too many frequencies from {} to {} by {}", start, stop, step))
        })?;
        Ok(SweepConfig { start, stop, step, count })
    }

    pub fn start(&self) -> f64 {
        self.start
    }

    pub fn stop(&self) -> f64 {
        self.stop
    }

    pub fn step(&self) -> f64 {
        self.step
    }

    /// number of swept frequencies
    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Frequencies are computed from their index rather than by repeated
    /// addition, so drift does not build up over long sweeps.
    pub fn frequencies(&self) -> impl Iterator<Item=f64> {
        let SweepConfig { start, step, .. } = *self;
        (0..self.len()).map(move |i| start + i as f64 * step)
    }
}

impl Default for SweepConfig {
    /// 0.2e-3 to 0.01 in steps of 1e-5
    fn default() -> Self {
        SweepConfig {
            start: 0.2e-3,
            stop: 0.01,
            step: 1e-5,
            count: 981,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Point {
    pub frequency: f64,
    pub db: f64,
}

/// Response curve, in sweep order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Response {
    points: Vec<Point>,
}

impl Response {
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn frequencies(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.frequency).collect()
    }

    pub fn amplitudes(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.db).collect()
    }

    /// First swept frequency whose level is at or below `threshold` dB.
    pub fn bandwidth(&self, threshold: f64) -> Option<f64> {
        self.points.iter()
            .find(|p| p.db <= threshold)
            .map(|p| p.frequency)
    }

    fn push(&mut self, point: Point) {
        self.points.push(point);
    }
}

/// Largest absolute sample, or 0 for an empty buffer.
pub fn peak(signal: &Buffer<f64>) -> f64 {
    signal.iter().fold(0.0, |max, v| max.max(v.abs()))
}

/// `20·log10(amplitude)`. Silence maps to negative infinity.
pub fn decibels(amplitude: f64) -> f64 {
    if amplitude == 0.0 {
        std::f64::NEG_INFINITY
    } else {
        20.0 * amplitude.log10()
    }
}

/// Measure `filter` at every frequency in `config`.
///
/// `length` must be long enough for the filter to settle; the peak is taken
/// over the whole window, start-up transient included.
pub fn sweep<F>(filter: &F, config: &SweepConfig, length: usize,
                amplitude: f64, rate: f64) -> Response
where
    F: FilterDesign<f64>,
{
    let mut response = Response::default();
    for frequency in config.frequencies() {
        let tone = signal::generate(frequency, amplitude, rate, length);
        let output = filter.process(&tone);
        let level = peak(&output);
        let db = decibels(level);
        if db == std::f64::NEG_INFINITY {
            warn!(frequency, "filter output is silent");
        }
        debug!(frequency, level, db, "swept");
        response.push(Point { frequency, db });
    }
    info!(points = response.len(), start = config.start(),
          stop = config.stop(), "sweep finished");
    response
}
