pub mod error;
pub use error::{Error, Result};

pub mod signal;
pub use signal::{Buffer, Signal};

pub mod filter;
pub use filter::{AnyFilter, Filter, FilterDesign, Fir, Iir};

pub mod sweep;
pub use sweep::{Response, SweepConfig};

pub mod batch;

pub mod io;

pub mod plot;

pub mod config;
pub use config::Config;

pub mod cli;
