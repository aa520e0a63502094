use super::sources::{from_iter, FromIter};

use std::ops::Deref;

/// A finite run of samples, with the rate they were taken at.
///
/// Buffers are never modified in place; filtering one produces a new buffer
/// of the same length and rate.
#[derive(Clone, Debug, PartialEq)]
pub struct Buffer<A> {
    rate: f64,
    samples: Vec<A>,
}

impl<A> Buffer<A> {
    pub fn new(rate: f64, samples: Vec<A>) -> Self {
        Buffer { rate, samples }
    }

    pub fn rate(&self) -> f64 {
        self.rate
    }

    pub fn samples(&self) -> &[A] {
        &self.samples
    }

    pub fn into_samples(self) -> Vec<A> {
        self.samples
    }

    /// replay the buffer as a signal
    pub fn signal(&self) -> FromIter<std::iter::Cloned<std::slice::Iter<'_, A>>>
    where
        A: Clone,
    {
        from_iter(self.rate, self.samples.iter().cloned())
    }
}

impl<A> Deref for Buffer<A> {
    type Target = [A];
    fn deref(&self) -> &[A] {
        &self.samples
    }
}

impl<A> From<Buffer<A>> for Vec<A> {
    fn from(buffer: Buffer<A>) -> Self {
        buffer.samples
    }
}
