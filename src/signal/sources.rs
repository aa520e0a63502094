use super::{Buffer, Signal};

use std::f64::consts::PI;

#[derive(Debug, Clone)]
pub struct FromIter<I> {
    iter: I,
    rate: f64,
}

impl<I> FromIter<I> {
    pub fn new(rate: f64, iter: I) -> Self {
        FromIter {
            iter,
            rate,
        }
    }
}

impl<I> Signal for FromIter<I> where I: Iterator {
    type Sample = I::Item;
    fn next(&mut self) -> Option<Self::Sample> {
        self.iter.next()
    }
    fn rate(&self) -> f64 {
        self.rate
    }
}

pub fn from_iter<I>(rate: f64, iter: I) -> FromIter<I>
where
    I: Iterator,
{
    FromIter::new(rate, iter)
}

/// A signal computed from the sample index alone.
pub fn from_index<F, A>(rate: f64, f: F) -> impl Signal<Sample=A>
where
    F: FnMut(usize) -> A,
{
    from_iter(rate, (0..).map(f))
}

pub fn constant<A>(rate: f64, value: A) -> impl Signal<Sample=A>
where
    A: Clone,
{
    from_iter(rate, std::iter::repeat(value))
}

pub fn impulse<A>(rate: f64) -> impl Signal<Sample=A>
where
    A: num::One + num::Zero,
{
    from_index(rate, |i| if i == 0 { A::one() } else { A::zero() })
}

/// `amplitude * sin(2π · frequency · i / rate)` for sample index `i`.
///
/// A frequency of zero gives silence.
pub fn sine(rate: f64, frequency: f64, amplitude: f64)
            -> impl Signal<Sample=f64>
{
    from_index(rate, move |i| {
        amplitude * (2.0 * PI * frequency * i as f64 / rate).sin()
    })
}

/// A finite sine test tone, `length` samples long.
pub fn generate(frequency: f64, amplitude: f64, rate: f64, length: usize)
                -> Buffer<f64>
{
    sine(rate, frequency, amplitude).take_samples(length).collect()
}
