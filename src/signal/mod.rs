use crate::filter::FilterDesign;

mod buffer;
pub use buffer::*;

mod sources;
pub use sources::*;

mod adapters;
pub use adapters::*;

/// A pull-based stream of samples at a fixed rate.
pub trait Signal {
    type Sample;
    fn next(&mut self) -> Option<Self::Sample>;
    fn rate(&self) -> f64;

    fn filter<F>(self, design: &F) -> Filter<Self, F::Filter>
    where
        F: FilterDesign<Self::Sample>,
        Self: Sized,
    {
        Filter::new(self, design)
    }

    fn iter(self) -> Iter<Self> where Self: Sized {
        Iter::new(self)
    }

    fn enumerate(self) -> Enumerate<Self> where Self: Sized {
        Enumerate::new(self)
    }

    fn map<F, A>(self, f: F) -> Map<Self, F>
    where
        F: FnMut(Self::Sample) -> A,
        Self: Sized,
    {
        Map::new(self, f)
    }

    /// Stop after `duration` seconds, rounded to the nearest sample.
    fn take(self, duration: f64) -> Take<Self>
    where
        Self: Sized,
    {
        let count = (self.rate() * duration).round() as usize;
        Take::new(self, count)
    }

    fn take_samples(self, count: usize) -> Take<Self>
    where
        Self: Sized,
    {
        Take::new(self, count)
    }

    /// Drain the signal into an owned buffer. Infinite signals never return,
    /// so bound them with `take_samples` first.
    fn collect(self) -> Buffer<Self::Sample>
    where
        Self: Sized,
    {
        let rate = self.rate();
        Buffer::new(rate, self.iter().collect())
    }
}
