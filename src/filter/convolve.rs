use std::ops::{AddAssign, Mul};
use num::Zero;

/// Multiply-accumulate of a sample by a coefficient.
pub trait Convolve<C>: Clone + Zero {
    fn accumulate(&mut self, sample: &Self, coef: &C);
}

impl<C, A> Convolve<C> for A
where
    C: Clone,
    A: Clone + Zero + AddAssign<A> + Mul<C, Output=A>,
{
    fn accumulate(&mut self, sample: &Self, coef: &C) {
        *self += sample.clone() * coef.clone();
    }
}
