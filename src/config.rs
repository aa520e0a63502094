//! Run configuration. Defaults reproduce the classic 2000-sample sweep over
//! 0.2e-3 .. 0.01 cycles per sample; a batch run reads its whole input
//! unless told how many samples to take.

use crate::error::Result;
use crate::filter::{AnyFilter, Fir, Iir};
use crate::io;
use crate::sweep::SweepConfig;

use std::path::PathBuf;

pub const DEFAULT_CUTOFF: f64 = 0.0026;
pub const DEFAULT_RATE: f64 = 1.0;
pub const DEFAULT_LENGTH: usize = 2000;
pub const DEFAULT_AMPLITUDE: f64 = 1.0;
pub const DEFAULT_THRESHOLD: f64 = -3.0;

#[derive(Clone, Debug, PartialEq)]
pub enum FilterChoice {
    /// coefficients from a raw file holding at least `taps` samples
    Fir { path: PathBuf, taps: usize },
    /// first-order low-pass
    Iir { cutoff: f64 },
}

impl FilterChoice {
    pub fn kind(&self) -> &'static str {
        match self {
            FilterChoice::Fir { .. } => "fir",
            FilterChoice::Iir { .. } => "iir",
        }
    }

    /// Load or derive the filter for signals at `rate`.
    pub fn build(&self, rate: f64) -> Result<AnyFilter> {
        Ok(match self {
            FilterChoice::Fir { path, taps } => {
                Fir::from(io::load_buffer(path, *taps, rate)?).into()
            },
            FilterChoice::Iir { cutoff } => Iir::lowpass(*cutoff, rate).into(),
        })
    }
}

impl Default for FilterChoice {
    fn default() -> Self {
        FilterChoice::Iir { cutoff: DEFAULT_CUTOFF }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct SweepSettings {
    pub range: SweepConfig,
    /// test tone length, in samples
    pub length: usize,
    pub amplitude: f64,
    /// level, in dB, that marks the bandwidth
    pub threshold: f64,
    pub plot: Option<PathBuf>,
}

impl Default for SweepSettings {
    fn default() -> Self {
        SweepSettings {
            range: SweepConfig::default(),
            length: DEFAULT_LENGTH,
            amplitude: DEFAULT_AMPLITUDE,
            threshold: DEFAULT_THRESHOLD,
            plot: None,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct BatchSettings {
    pub input: PathBuf,
    /// samples to read; `None` reads the whole file
    pub count: Option<usize>,
    /// read `input` as a wav file, taking the rate from its header
    pub wav: bool,
    /// also write the input signal next to the filtered one
    pub echo: bool,
    /// draw the filtered signal to this file
    pub plot: Option<PathBuf>,
    /// seconds of the filtered signal to draw; all of it if `None`
    pub plot_span: Option<f64>,
}

impl Default for BatchSettings {
    fn default() -> Self {
        BatchSettings {
            input: PathBuf::from("signal.bin"),
            count: None,
            wav: false,
            echo: false,
            plot: None,
            plot_span: None,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    Sweep(SweepSettings),
    Batch(BatchSettings),
}

#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    pub filter: FilterChoice,
    pub rate: f64,
    pub output_dir: PathBuf,
    pub command: Command,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            filter: FilterChoice::default(),
            rate: DEFAULT_RATE,
            output_dir: PathBuf::from("output"),
            command: Command::Sweep(SweepSettings::default()),
        }
    }
}
