//! 2D vertex-representation geometry.
//!
//! Purpose
//! - Provide a single strict `Polygon` type (CCW, strictly convex, non-zero
//!   area) plus the two operations the flowpipe loop composes: convex hull
//!   and Minkowski sum.
//!
//! Why strict-only
//! - Arbitrary point sets enter through `convex_hull`, which restores the
//!   invariant; downstream code never has to reason about unordered or
//!   collinear vertex lists.

pub mod rand;

mod cfg;
mod hull;
mod minkowski;
mod types;

pub use hull::convex_hull;
pub use minkowski::{minkowski_sum, Bloating};
pub use types::Polygon;
