//! Flowpipe over-approximation for 2D linear dynamics.
//!
//! Given an initial convex region, a flow matrix `A` (for `dx/dt = A·x`), and
//! a bloating shape bounding the per-step discretization error, the crate
//! produces an ordered sequence of convex polygons whose union conservatively
//! covers every trajectory over the simulated horizon.
//!
//! Layout
//! - `geom2`: vertex-representation polygons, convex hull, Minkowski sums.
//! - `flow`: closed-form 2×2 matrix exponential and the per-step linear map.
//! - `reach`: the flowpipe construction loop and the `approx` entry point.
//!
//! The core performs no I/O and holds no global state; every invocation is
//! independent and all values are immutable once constructed.

pub mod error;
pub mod flow;
pub mod geom2;
pub mod reach;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use error::FlowpipeError;
pub use nalgebra::{Matrix2 as Mat2, Vector2 as Vec2};

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::error::FlowpipeError;
    pub use crate::flow::{expm2, StepMap};
    pub use crate::geom2::rand::{draw_polygon_radial, RadialCfg, ReplayToken, VertexCount};
    pub use crate::geom2::{convex_hull, minkowski_sum, Bloating, Polygon};
    pub use crate::reach::{
        approx, approx_with_sink, build_flowpipe, Flowpipe, ReachCfg, RenderSink,
    };
    pub use nalgebra::{Matrix2 as Mat2, Vector2 as Vec2};
}
