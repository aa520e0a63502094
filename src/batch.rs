use crate::filter::FilterDesign;
use crate::signal::Buffer;

use tracing::info;

/// Filter an entire externally supplied signal in one pass.
pub fn run<F>(filter: &F, signal: &Buffer<f64>) -> Buffer<f64>
where
    F: FilterDesign<f64>,
{
    let output = filter.process(signal);
    info!(samples = output.len(), rate = output.rate(), "batch filtered");
    output
}
