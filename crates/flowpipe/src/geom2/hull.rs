//! Convex hull builder (Andrew’s monotone chain).

use nalgebra::Vector2;

use crate::error::FlowpipeError;

use super::cfg::DEDUP_EPS;
use super::types::Polygon;

#[inline]
fn cross(a: Vector2<f64>, b: Vector2<f64>, c: Vector2<f64>) -> f64 {
    let ab = b - a;
    let ac = c - a;
    ab.x * ac.y - ab.y * ac.x
}

/// Convex hull of a point set, O(n log n), returned in CCW order.
///
/// Duplicates are allowed and removed. Collinear boundary points are dropped
/// (only the extreme points are kept), so the result never carries
/// near-zero-length edges into later Minkowski merges. Fewer than 3 distinct
/// points or an all-collinear set yields `DegenerateInput`.
pub fn convex_hull(points: &[Vector2<f64>]) -> Result<Polygon, FlowpipeError> {
    let mut pts: Vec<_> = points.to_vec();
    pts.sort_by(|a, b| {
        match a.x.partial_cmp(&b.x).unwrap_or(std::cmp::Ordering::Equal) {
            std::cmp::Ordering::Equal => a.y.partial_cmp(&b.y).unwrap_or(std::cmp::Ordering::Equal),
            o => o,
        }
    });
    pts.dedup_by(|a, b| (*a - *b).norm() < DEDUP_EPS);
    if pts.len() < 3 {
        return Err(FlowpipeError::degenerate(format!(
            "{} distinct points, need at least 3",
            pts.len()
        )));
    }
    // cross <= 0 pops collinear points along with right turns.
    let mut lower: Vec<Vector2<f64>> = Vec::with_capacity(pts.len());
    for p in &pts {
        while lower.len() >= 2 && cross(lower[lower.len() - 2], lower[lower.len() - 1], *p) <= 0.0 {
            lower.pop();
        }
        lower.push(*p);
    }
    let mut upper: Vec<Vector2<f64>> = Vec::with_capacity(pts.len());
    for p in pts.iter().rev() {
        while upper.len() >= 2 && cross(upper[upper.len() - 2], upper[upper.len() - 1], *p) <= 0.0 {
            upper.pop();
        }
        upper.push(*p);
    }
    lower.pop();
    upper.pop();
    let mut hull = lower;
    hull.extend(upper);
    if hull.len() < 3 {
        return Err(FlowpipeError::degenerate(format!(
            "all {} distinct points are collinear",
            pts.len()
        )));
    }
    Ok(Polygon::from_hull_vertices(hull))
}
