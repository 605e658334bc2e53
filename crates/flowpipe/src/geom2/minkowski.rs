//! Minkowski sums and the bloating shape.
//!
//! The sum of two convex polygons is computed by merging their edge-vector
//! sequences sorted by polar angle, O(|P| + |Q|). Both vertex lists are
//! rotated to start at the lexicographic (y, x) minimum, after which the edge
//! angles are strictly ascending in [0, 2π) and a plain two-way merge
//! accumulates vertex sums.

use nalgebra::Vector2;

use crate::error::FlowpipeError;

use super::cfg::{DEDUP_EPS, PARALLEL_EPS};
use super::hull::convex_hull;
use super::types::Polygon;

/// Per-step error shape added to the mapped region.
///
/// A single distinct point is a valid zero-extent shape: inflating by it is a
/// plain translation and must not require ≥3 vertices.
#[derive(Clone, Debug)]
pub enum Bloating {
    Point(Vector2<f64>),
    Hull(Polygon),
}

impl Bloating {
    /// Build the bloating shape from a point collection.
    ///
    /// Empty input is a configuration error; one distinct point is the
    /// degenerate translation case; anything else must form a proper polygon
    /// (collinear sets fail as `DegenerateInput`).
    pub fn from_points(points: &[Vector2<f64>]) -> Result<Self, FlowpipeError> {
        if points.is_empty() {
            return Err(FlowpipeError::config("bloating shape needs at least 1 point"));
        }
        let all_coincident = points
            .iter()
            .all(|p| (p - points[0]).norm() < DEDUP_EPS);
        if all_coincident {
            return Ok(Bloating::Point(points[0]));
        }
        Ok(Bloating::Hull(convex_hull(points)?))
    }

    /// Minkowski-add this shape to `p`.
    pub fn inflate(&self, p: &Polygon) -> Result<Polygon, FlowpipeError> {
        match self {
            Bloating::Point(t) => Ok(p.translate(*t)),
            Bloating::Hull(q) => minkowski_sum(p, q),
        }
    }
}

/// Index of the bottom-most (then left-most) vertex.
fn min_yx_index(verts: &[Vector2<f64>]) -> usize {
    let mut best = 0;
    for (i, v) in verts.iter().enumerate().skip(1) {
        let b = verts[best];
        if v.y < b.y || (v.y == b.y && v.x < b.x) {
            best = i;
        }
    }
    best
}

/// Polar angle of an edge vector mapped to [0, 2π).
#[inline]
fn edge_angle(e: Vector2<f64>) -> f64 {
    let a = e.y.atan2(e.x);
    if a < 0.0 {
        a + std::f64::consts::TAU
    } else {
        a
    }
}

/// Minkowski sum `{p + q : p ∈ P, q ∈ Q}` of two convex polygons.
///
/// Both inputs are re-validated at the boundary; a violated invariant yields
/// `InvalidPolygon` rather than a silently wrong sum. The merged vertex list
/// is re-normalized through the hull builder, which also collapses vertex
/// pairs produced by near-parallel edges.
pub fn minkowski_sum(p: &Polygon, q: &Polygon) -> Result<Polygon, FlowpipeError> {
    p.check_convex()?;
    q.check_convex()?;

    let pa = rotated_to_min(p.vertices());
    let pb = rotated_to_min(q.vertices());
    let n = pa.len();
    let m = pb.len();

    let mut i = 0;
    let mut j = 0;
    let mut sums: Vec<Vector2<f64>> = Vec::with_capacity(n + m);
    while i < n || j < m {
        sums.push(pa[i % n] + pb[j % m]);
        if i >= n {
            j += 1;
            continue;
        }
        if j >= m {
            i += 1;
            continue;
        }
        let aa = edge_angle(pa[(i + 1) % n] - pa[i]);
        let ab = edge_angle(pb[(j + 1) % m] - pb[j]);
        if (aa - ab).abs() <= PARALLEL_EPS {
            i += 1;
            j += 1;
        } else if aa < ab {
            i += 1;
        } else {
            j += 1;
        }
    }
    convex_hull(&sums)
}

fn rotated_to_min(verts: &[Vector2<f64>]) -> Vec<Vector2<f64>> {
    let k = min_yx_index(verts);
    let mut out = Vec::with_capacity(verts.len());
    out.extend_from_slice(&verts[k..]);
    out.extend_from_slice(&verts[..k]);
    out
}
