//! The strict polygon type.
//!
//! `Polygon` holds ≥3 distinct vertices in counter-clockwise order with every
//! consecutive triple making a strict left turn (no collinear-redundant
//! vertices, non-zero area). The vertex list is private; arbitrary point sets
//! must pass through `convex_hull`, which restores the invariant.

use nalgebra::Vector2;

use crate::error::FlowpipeError;

/// Convex polygon in vertex representation (CCW, strictly convex).
#[derive(Clone, Debug, PartialEq)]
pub struct Polygon {
    verts: Vec<Vector2<f64>>,
}

impl Polygon {
    /// Wrap a vertex list the hull builder has already normalized.
    pub(crate) fn from_hull_vertices(verts: Vec<Vector2<f64>>) -> Self {
        debug_assert!(verts.len() >= 3);
        Self { verts }
    }

    /// Vertices in CCW order.
    #[inline]
    pub fn vertices(&self) -> &[Vector2<f64>] {
        &self.verts
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.verts.len()
    }

    /// Signed area via the shoelace formula. Positive for CCW order.
    pub fn area(&self) -> f64 {
        let n = self.verts.len();
        let mut acc = 0.0;
        for i in 0..n {
            let p = self.verts[i];
            let q = self.verts[(i + 1) % n];
            acc += p.x * q.y - q.x * p.y;
        }
        acc * 0.5
    }

    /// Area centroid (assumes the invariant holds, so the area is non-zero).
    pub fn centroid(&self) -> Vector2<f64> {
        let n = self.verts.len();
        let mut a = 0.0;
        let mut cx = 0.0;
        let mut cy = 0.0;
        for i in 0..n {
            let p = self.verts[i];
            let q = self.verts[(i + 1) % n];
            let cross = p.x * q.y - q.x * p.y;
            a += cross;
            cx += (p.x + q.x) * cross;
            cy += (p.y + q.y) * cross;
        }
        a *= 0.5;
        Vector2::new(cx / (6.0 * a), cy / (6.0 * a))
    }

    /// Translate every vertex by `t`. Translation preserves the invariant.
    pub fn translate(&self, t: Vector2<f64>) -> Polygon {
        Polygon {
            verts: self.verts.iter().map(|v| v + t).collect(),
        }
    }

    /// Point membership with a signed distance slack: `eps > 0` is permissive
    /// (accepts points up to `eps` outside), `eps < 0` is strict (requires
    /// `|eps|` clearance from every edge).
    pub fn contains_eps(&self, p: Vector2<f64>, eps: f64) -> bool {
        let n = self.verts.len();
        for i in 0..n {
            let a = self.verts[i];
            let b = self.verts[(i + 1) % n];
            let edge = b - a;
            let signed = edge.x * (p.y - a.y) - edge.y * (p.x - a.x);
            if signed < -eps * edge.norm() {
                return false;
            }
        }
        true
    }

    /// Re-validate the invariant at a component boundary.
    ///
    /// Safe construction makes violations unreachable; this exists so a
    /// corrupted value is caught where it enters instead of propagating
    /// silently through later geometry.
    pub fn check_convex(&self) -> Result<(), FlowpipeError> {
        let n = self.verts.len();
        if n < 3 {
            return Err(FlowpipeError::polygon(format!(
                "{} vertices, need at least 3",
                n
            )));
        }
        for i in 0..n {
            let a = self.verts[i];
            let b = self.verts[(i + 1) % n];
            let c = self.verts[(i + 2) % n];
            let cross = (b.x - a.x) * (c.y - a.y) - (b.y - a.y) * (c.x - a.x);
            // Strict-zero rule, matching the hull chains' pop condition: any
            // absolute threshold would reject valid polygons whose cross
            // products are small only because the shape itself is small.
            if cross <= 0.0 {
                return Err(FlowpipeError::polygon(format!(
                    "vertex triple {} is not a strict left turn (cross = {:e})",
                    i, cross
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::vector;

    fn unit_square() -> Polygon {
        Polygon::from_hull_vertices(vec![
            vector![0.0, 0.0],
            vector![1.0, 0.0],
            vector![1.0, 1.0],
            vector![0.0, 1.0],
        ])
    }

    #[test]
    fn area_and_centroid_of_square() {
        let sq = unit_square();
        assert!((sq.area() - 1.0).abs() < 1e-12);
        let c = sq.centroid();
        assert!((c - vector![0.5, 0.5]).norm() < 1e-12);
    }

    #[test]
    fn contains_eps_sign_convention() {
        let sq = unit_square();
        assert!(sq.contains_eps(vector![0.5, 0.5], 0.0));
        // On the boundary: accepted permissively, rejected strictly.
        assert!(sq.contains_eps(vector![1.0, 0.5], 1e-9));
        assert!(!sq.contains_eps(vector![1.0, 0.5], -1e-9));
        // Slightly outside: accepted only with enough positive slack.
        assert!(!sq.contains_eps(vector![1.0 + 1e-6, 0.5], 1e-9));
        assert!(sq.contains_eps(vector![1.0 + 1e-6, 0.5], 1e-3));
    }

    #[test]
    fn translate_moves_all_vertices() {
        let sq = unit_square();
        let moved = sq.translate(vector![2.0, -1.0]);
        assert!((moved.vertices()[0] - vector![2.0, -1.0]).norm() < 1e-12);
        assert!((moved.area() - sq.area()).abs() < 1e-12);
    }

    #[test]
    fn check_convex_rejects_cw_and_collinear() {
        let sq = unit_square();
        assert!(sq.check_convex().is_ok());

        let cw = Polygon::from_hull_vertices(vec![
            vector![0.0, 0.0],
            vector![0.0, 1.0],
            vector![1.0, 1.0],
            vector![1.0, 0.0],
        ]);
        assert!(cw.check_convex().is_err());

        let collinear = Polygon::from_hull_vertices(vec![
            vector![0.0, 0.0],
            vector![1.0, 0.0],
            vector![2.0, 0.0],
        ]);
        assert!(collinear.check_convex().is_err());
    }
}
