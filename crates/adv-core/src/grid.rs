//! Space-time discretization of a one-dimensional domain.

use crate::error::{AdvError, AdvResult};
use crate::numeric::{Real, ensure_positive};
use crate::units::{Length, Time};

/// Immutable description of the discretization.
///
/// `nx` spatial nodes span `[0, length]` inclusive of both ends, so the spacing
/// is `length / (nx - 1)`. `nt` counts time levels including `t = 0`.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct GridSpec {
    length: Real,
    nx: usize,
    nt: usize,
    dt: Real,
    dx: Real,
}

impl GridSpec {
    pub fn new(length: Real, nx: usize, nt: usize, dt: Real) -> AdvResult<Self> {
        let length = ensure_positive(length, "length must be positive")?;
        let dt = ensure_positive(dt, "dt must be positive")?;
        if nx < 2 {
            return Err(AdvError::InvalidArg {
                what: "nx must be at least 2",
            });
        }
        if nt < 1 {
            return Err(AdvError::InvalidArg {
                what: "nt must be at least 1",
            });
        }
        let dx = length / (nx - 1) as Real;
        if !(dx > 0.0) {
            return Err(AdvError::Invariant {
                what: "dx must be positive",
            });
        }
        Ok(Self {
            length,
            nx,
            nt,
            dt,
            dx,
        })
    }

    /// Build a grid from dimensioned length and time step (SI base units).
    pub fn from_quantities(length: Length, nx: usize, nt: usize, dt: Time) -> AdvResult<Self> {
        use uom::si::length::meter;
        use uom::si::time::second;
        Self::new(length.get::<meter>(), nx, nt, dt.get::<second>())
    }

    pub fn length(&self) -> Real {
        self.length
    }

    pub fn nx(&self) -> usize {
        self.nx
    }

    pub fn nt(&self) -> usize {
        self.nt
    }

    pub fn dt(&self) -> Real {
        self.dt
    }

    pub fn dx(&self) -> Real {
        self.dx
    }

    /// Number of time steps taken after the initial level.
    pub fn steps(&self) -> usize {
        self.nt - 1
    }

    /// Simulated time at the final level.
    pub fn t_end(&self) -> Real {
        self.steps() as Real * self.dt
    }

    /// Position of node `i`.
    #[inline]
    pub fn x(&self, i: usize) -> Real {
        i as Real * self.dx
    }

    pub fn node_positions(&self) -> Vec<Real> {
        (0..self.nx).map(|i| self.x(i)).collect()
    }
}
