use crate::signal::{Buffer, Signal};

mod convolve;
pub use convolve::*;

mod simple;
pub use simple::*;

mod fir;
pub use fir::*;

mod iir;
pub use iir::*;

/// A running filter, fed one sample at a time.
pub trait Filter<A> {
    type Output;
    fn apply(&mut self, value: A) -> Self::Output;
}

/// A fixed filter description that can be run over any number of signals.
///
/// `design` starts a fresh running filter each time, so nothing carries over
/// from one `process` call to the next.
pub trait FilterDesign<A> {
    type Filter: Filter<A, Output=A>;
    fn design(&self) -> Self::Filter;

    /// Filter a whole buffer. The output has the input's length and rate.
    fn process(&self, signal: &Buffer<A>) -> Buffer<A>
    where
        A: Clone,
        Self: Sized,
    {
        signal.signal().filter(self).collect()
    }
}

/// Either of the real-valued filters, picked at runtime.
#[derive(Clone, Debug)]
pub enum AnyFilter {
    Fir(Fir<f64>),
    Iir(Iir),
}

impl AnyFilter {
    pub fn kind(&self) -> &'static str {
        match self {
            AnyFilter::Fir(_) => "fir",
            AnyFilter::Iir(_) => "iir",
        }
    }
}

impl From<Fir<f64>> for AnyFilter {
    fn from(fir: Fir<f64>) -> Self {
        AnyFilter::Fir(fir)
    }
}

impl From<Iir> for AnyFilter {
    fn from(iir: Iir) -> Self {
        AnyFilter::Iir(iir)
    }
}

#[derive(Clone, Debug)]
pub enum AnyState {
    Fir(FirState<f64, f64>),
    Iir(IirState<f64>),
}

impl Filter<f64> for AnyState {
    type Output = f64;
    fn apply(&mut self, value: f64) -> f64 {
        match self {
            AnyState::Fir(f) => f.apply(value),
            AnyState::Iir(f) => f.apply(value),
        }
    }
}

impl FilterDesign<f64> for AnyFilter {
    type Filter = AnyState;
    fn design(&self) -> Self::Filter {
        match self {
            AnyFilter::Fir(f) => AnyState::Fir(f.design()),
            AnyFilter::Iir(f) => AnyState::Iir(f.design()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signal;

    #[test]
    fn any_filter_matches_concrete() {
        let input = signal::generate(0.01, 1.0, 1.0, 300);

        let fir = Fir::new(vec![0.25, 0.5, 0.25]);
        let any = AnyFilter::from(fir.clone());
        assert_eq!(any.kind(), "fir");
        assert_eq!(any.process(&input), fir.process(&input));

        let iir = Iir::lowpass(0.0026, 1.0);
        let any = AnyFilter::from(iir);
        assert_eq!(any.kind(), "iir");
        assert_eq!(any.process(&input), iir.process(&input));
    }

    #[test]
    fn process_is_repeatable() {
        let input = signal::generate(0.003, 2.0, 1.0, 500);
        let iir = Iir::lowpass(0.0026, 1.0);
        let first = iir.process(&input);
        let second = iir.process(&input);
        assert_eq!(first, second);
        assert_eq!(first.len(), input.len());
        assert_eq!(first.rate(), input.rate());
    }
}
