use super::Signal;
use crate::filter::{self, Filter as _, FilterDesign as _};

/// Samples paired with their time in seconds, counted from the start.
#[derive(Debug, Clone)]
pub struct Enumerate<S> {
    signal: S,
    step: usize,
}

impl<S> Enumerate<S> where S: Signal {
    pub(super) fn new(signal: S) -> Self {
        Enumerate { signal, step: 0 }
    }
}

impl<S> Iterator for Enumerate<S> where S: Signal {
    type Item = (f64, S::Sample);
    fn next(&mut self) -> Option<Self::Item> {
        let v = self.signal.next()?;
        let t = self.step as f64 / self.signal.rate();
        self.step += 1;
        Some((t, v))
    }
}

#[derive(Debug, Clone)]
pub struct Filter<S, F> {
    signal: S,
    filter: F,
}

impl<S, F> Filter<S, F>
where
    S: Signal,
    F: filter::Filter<S::Sample>,
{
    pub(super) fn new<D>(signal: S, design: &D) -> Self
    where
        D: filter::FilterDesign<S::Sample, Filter=F>,
    {
        Filter {
            filter: design.design(),
            signal,
        }
    }
}

impl<S, F> Signal for Filter<S, F>
where
    S: Signal,
    F: filter::Filter<S::Sample>,
{
    type Sample = F::Output;
    fn next(&mut self) -> Option<Self::Sample> {
        let filter = &mut self.filter;
        self.signal.next().map(|v| filter.apply(v))
    }
    fn rate(&self) -> f64 {
        self.signal.rate()
    }
}

#[derive(Debug, Clone)]
pub struct Iter<S> {
    signal: S,
}

impl<S> Iter<S> where S: Signal {
    pub(super) fn new(signal: S) -> Self {
        Iter { signal }
    }
}

impl<S> Iterator for Iter<S> where S: Signal {
    type Item = S::Sample;
    fn next(&mut self) -> Option<Self::Item> {
        self.signal.next()
    }
}

#[derive(Clone, Debug)]
pub struct Map<S, F> {
    signal: S,
    f: F,
}

impl<S, F> Map<S, F> {
    pub(super) fn new(signal: S, f: F) -> Self {
        Map { signal, f }
    }
}

impl<S, F, A> Signal for Map<S, F>
where
    F: FnMut(S::Sample) -> A,
    S: Signal,
{
    type Sample = A;
    fn next(&mut self) -> Option<Self::Sample> {
        self.signal.next().map(&mut self.f)
    }
    fn rate(&self) -> f64 {
        self.signal.rate()
    }
}

#[derive(Clone, Debug)]
pub struct Take<S> {
    signal: S,
    remaining: usize,
}

impl<S> Take<S> where S: Signal {
    pub(super) fn new(signal: S, count: usize) -> Self {
        Take {
            signal,
            remaining: count,
        }
    }
}

impl<S> Signal for Take<S> where S: Signal {
    type Sample = S::Sample;
    fn next(&mut self) -> Option<Self::Sample> {
        if self.remaining > 0 {
            self.remaining -= 1;
            self.signal.next()
        } else {
            None
        }
    }
    fn rate(&self) -> f64 {
        self.signal.rate()
    }
}

#[cfg(test)]
mod tests {
    use crate::signal::{self, Signal};

    #[test]
    fn map_keeps_rate() {
        let doubled = signal::from_iter(4.0, vec![1.0, -2.0].into_iter())
            .map(|v| v * 2.0)
            .collect();
        assert_eq!(doubled.rate(), 4.0);
        assert_eq!(doubled.samples(), &[2.0, -4.0]);
    }

    #[test]
    fn take_counts_seconds() {
        let half = signal::constant(10.0, 1.0).take(0.5).collect();
        assert_eq!(half.len(), 5);
        // rounded to the nearest sample
        assert_eq!(signal::constant(10.0, 1.0).take(0.26).collect().len(), 3);
        assert_eq!(signal::constant(10.0, 1.0).take(-1.0).collect().len(), 0);
    }

    #[test]
    fn enumerate_in_seconds() {
        let pairs: Vec<(f64, f64)> =
            signal::from_iter(2.0, vec![5.0, 6.0, 7.0].into_iter())
            .enumerate()
            .collect();
        assert_eq!(pairs, vec![(0.0, 5.0), (0.5, 6.0), (1.0, 7.0)]);
    }
}
