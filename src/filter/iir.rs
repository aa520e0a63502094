use super::{Convolve, Filter, FilterDesign};

use std::f64::consts::PI;

/// Coefficients of `y[i] = b0·x[i] + b1·x[i-1] - a1·y[i-1]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct IirCoefficients {
    pub b0: f64,
    pub b1: f64,
    pub a1: f64,
}

/// First-order recursive low-pass.
///
/// The first two output samples are always zero; the recurrence only runs
/// from the third sample on.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Iir {
    coef: IirCoefficients,
}

impl Iir {
    /// Bilinear transform of an RC low-pass with the given cutoff.
    ///
    /// The feedback gain stays inside (-0.5, 1) for any positive cutoff.
    pub fn lowpass(cutoff: f64, rate: f64) -> Self {
        let omega = 2.0 * PI * cutoff / rate;
        let b = omega / (2.0 + omega);
        Iir {
            coef: IirCoefficients {
                b0: b,
                b1: b,
                a1: (omega - 1.0) / (omega + 2.0),
            },
        }
    }

    pub fn from_coefficients(coef: IirCoefficients) -> Self {
        Iir { coef }
    }

    pub fn coefficients(&self) -> IirCoefficients {
        self.coef
    }

    /// steady-state gain for a constant input
    pub fn dc_gain(&self) -> f64 {
        (self.coef.b0 + self.coef.b1) / (1.0 + self.coef.a1)
    }
}

#[derive(Clone, Debug)]
pub struct IirState<A> {
    b0: f64,
    b1: f64,
    na1: f64,

    // state
    seen: usize,
    x1: A,
    y1: A,
}

impl<A> Filter<A> for IirState<A> where A: Convolve<f64> {
    type Output = A;
    fn apply(&mut self, value: A) -> A {
        let out = if self.seen < 2 {
            self.seen += 1;
            A::zero()
        } else {
            let mut out = A::zero();
            out.accumulate(&value, &self.b0);
            out.accumulate(&self.x1, &self.b1);
            out.accumulate(&self.y1, &self.na1);
            out
        };

        self.x1 = value;
        self.y1 = out.clone();
        out
    }
}

impl<A> FilterDesign<A> for Iir where A: Convolve<f64> {
    type Filter = IirState<A>;
    fn design(&self) -> Self::Filter {
        IirState {
            b0: self.coef.b0,
            b1: self.coef.b1,
            na1: -self.coef.a1,

            seen: 0,
            x1: A::zero(),
            y1: A::zero(),
        }
    }
}
