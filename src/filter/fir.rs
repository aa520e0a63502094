use super::{Convolve, Filter, FilterDesign};
use crate::signal::Buffer;

use std::collections::VecDeque;
use std::sync::Arc;

/// Finite impulse response filter: causal convolution with a fixed set of
/// taps. Tap 0 weighs the newest sample.
#[derive(Clone, Debug, PartialEq)]
pub struct Fir<C> {
    coef: Arc<[C]>,
}

impl<C> Fir<C> {
    pub fn new(coef: Vec<C>) -> Self {
        Fir { coef: coef.into() }
    }

    pub fn taps(&self) -> usize {
        self.coef.len()
    }

    pub fn coefficients(&self) -> &[C] {
        &self.coef
    }
}

impl<C> From<Vec<C>> for Fir<C> {
    fn from(coef: Vec<C>) -> Self {
        Fir::new(coef)
    }
}

impl<C> From<Buffer<C>> for Fir<C> {
    fn from(coef: Buffer<C>) -> Self {
        Fir::new(coef.into_samples())
    }
}

#[derive(Clone, Debug)]
pub struct FirState<C, A> {
    coef: Arc<[C]>,
    // newest first, never longer than coef
    history: VecDeque<A>,
}

impl<C, A> Filter<A> for FirState<C, A> where A: Convolve<C> {
    type Output = A;
    fn apply(&mut self, value: A) -> A {
        self.history.push_front(value);
        if self.history.len() > self.coef.len() {
            self.history.pop_back();
        }

        // zip stops at min(n + 1, taps), so unseen samples never enter
        let mut accum = A::zero();
        for (c, v) in self.coef.iter().zip(self.history.iter()) {
            accum.accumulate(v, c);
        }
        accum
    }
}

impl<C, A> FilterDesign<A> for Fir<C> where A: Convolve<C> {
    type Filter = FirState<C, A>;
    fn design(&self) -> Self::Filter {
        FirState {
            coef: self.coef.clone(),
            history: VecDeque::with_capacity(self.coef.len() + 1),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signal::{self, Signal};

    fn impulse(len: usize) -> Buffer<f64> {
        signal::impulse(1.0).take_samples(len).collect()
    }

    #[test]
    fn impulse_response_is_coefficients() {
        let coef = vec![0.5, -0.25, 0.125, 2.0];
        let fir = Fir::new(coef.clone());
        let out = fir.process(&impulse(10));
        assert_eq!(out.len(), 10);
        assert_eq!(&out[..4], &coef[..]);
        assert!(out[4..].iter().all(|&v| v == 0.0));
    }

    #[test]
    fn identity_taps_pass_through() {
        let input = signal::generate(0.037, 1.5, 1.0, 257);
        let fir = Fir::new(vec![1.0, 0.0, 0.0, 0.0]);
        assert_eq!(fir.process(&input), input);
    }

    #[test]
    fn more_taps_than_samples() {
        let fir = Fir::new(vec![1.0; 50]);
        let input = Buffer::new(1.0, vec![1.0, 2.0, 3.0]);
        let out = fir.process(&input);
        assert_eq!(out.samples(), &[1.0, 3.0, 6.0]);
    }

    #[test]
    fn taps_independent_of_signal_length() {
        // moving sum of 3 over a longer signal
        let fir = Fir::new(vec![1.0, 1.0, 1.0]);
        let input = Buffer::new(1.0, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        let out = fir.process(&input);
        assert_eq!(out.samples(), &[1.0, 3.0, 6.0, 9.0, 12.0, 15.0]);
    }

    #[test]
    fn no_taps_gives_silence() {
        let fir: Fir<f64> = Fir::new(vec![]);
        let input = Buffer::new(1.0, vec![1.0, 2.0]);
        assert_eq!(fir.process(&input).samples(), &[0.0, 0.0]);
    }

    #[test]
    fn from_loaded_buffer() {
        let fir = Fir::from(Buffer::new(1.0, vec![0.1, 0.2]));
        assert_eq!(fir.taps(), 2);
        assert_eq!(fir.coefficients(), &[0.1, 0.2]);
    }
}
