use super::{Filter, FilterDesign};

/// Passes every sample through untouched.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Identity;

impl<A> Filter<A> for Identity {
    type Output = A;
    fn apply(&mut self, value: A) -> Self::Output {
        value
    }
}

impl<A> FilterDesign<A> for Identity {
    type Filter = Identity;
    fn design(&self) -> Self::Filter {
        Identity
    }
}
