//! Linear map applier: closed-form 2×2 matrix exponential and the per-step map.
//!
//! Method
//! - Split `A = s·I + B` with `s = tr(A)/2` and traceless `B`, for which
//!   `B² = q²·I` holds with `q² = s² − det(A)`. Then
//!   - `q² > ε`:  `exp(A) = e^s (cosh(q)·I + sinh(q)/q · B)`
//!   - `q² < −ε`: `exp(A) = e^s (cos(w)·I + sin(w)/w · B)`, `w = √(−q²)`
//!   - `|q²| ≤ ε`: truncated series `f0 = 1 + q²/2 + q⁴/24`,
//!     `f1 = 1 + q²/6 + q⁴/120`.
//!
//! Accuracy
//! - Away from the branch window (`ε = 1e-9`) the formulas are exact up to
//!   rounding. Inside the window the truncation error is of order `q⁶/5040`,
//!   i.e. below 1e-27 relative, so consumers may assume at least 1e-9
//!   relative accuracy everywhere.

use nalgebra::{Matrix2, Vector2};

use crate::geom2::Polygon;

/// Branch window for the repeated-eigenvalue series.
const EXPM_EPS: f64 = 1e-9;

/// Matrix exponential of a 2×2 real matrix.
pub fn expm2(a: &Matrix2<f64>) -> Matrix2<f64> {
    let s = a.trace() * 0.5;
    let b = a - Matrix2::identity() * s;
    let q2 = s * s - a.determinant();
    let (f0, f1) = if q2 > EXPM_EPS {
        let q = q2.sqrt();
        (q.cosh(), q.sinh() / q)
    } else if q2 < -EXPM_EPS {
        let w = (-q2).sqrt();
        (w.cos(), w.sin() / w)
    } else {
        (
            1.0 + q2 / 2.0 + q2 * q2 / 24.0,
            1.0 + q2 / 6.0 + q2 * q2 / 120.0,
        )
    };
    (Matrix2::identity() * f0 + b * f1) * s.exp()
}

/// The cached linear map of one time step, `exp(A·r)`.
///
/// Computed once per flowpipe build; the flow matrix and step size are
/// constant across steps, so the exponential is step-invariant.
#[derive(Clone, Debug)]
pub struct StepMap {
    m: Matrix2<f64>,
}

impl StepMap {
    pub fn new(flow: &Matrix2<f64>, step_size: f64) -> Self {
        Self {
            m: expm2(&(flow * step_size)),
        }
    }

    #[inline]
    pub fn matrix(&self) -> &Matrix2<f64> {
        &self.m
    }

    /// Map a single point through one time step.
    #[inline]
    pub fn apply(&self, p: Vector2<f64>) -> Vector2<f64> {
        self.m * p
    }

    /// Map every vertex, returning the raw transformed point set.
    ///
    /// A linear map preserves convexity but not necessarily vertex order
    /// (a reflection flips it), so callers re-hull before treating the
    /// result as a `Polygon`.
    pub fn map_vertices(&self, poly: &Polygon) -> Vec<Vector2<f64>> {
        poly.vertices().iter().map(|v| self.m * v).collect()
    }
}
