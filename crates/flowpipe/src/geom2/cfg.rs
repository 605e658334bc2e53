//! Tolerance defaults for 2D geometry (internal).
//!
//! Policy
//! - Defaults are fixed constants to avoid “tolerance juggling” during normal
//!   development. Adjustments are rare; if needed later we can make these
//!   configurable behind a small `Config` without changing call sites broadly.

/// Adjacent-point dedup distance used by the hull builder.
pub(crate) const DEDUP_EPS: f64 = 1e-12;
/// Polar-angle window within which two edges count as parallel during the
/// Minkowski edge merge.
pub(crate) const PARALLEL_EPS: f64 = 1e-12;
