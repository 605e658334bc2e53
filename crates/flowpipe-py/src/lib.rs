//! PyO3 bindings for selected `flowpipe` functions.
//!
//! Notes
//! - Keep bindings thin and predictable; conversions use simple tuples so
//!   Python callers can pass plain lists of pairs.
//! - All core errors map to `ValueError` with the crate's display message.

use nalgebra::{Matrix2, Vector2};
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

use flowpipe::geom2::{self, Bloating};
use flowpipe::reach::{self, Flowpipe, ReachCfg};

fn to_points(pairs: &[(f64, f64)]) -> Vec<Vector2<f64>> {
    pairs.iter().map(|&(x, y)| Vector2::new(x, y)).collect()
}

fn from_points(points: &[Vector2<f64>]) -> Vec<(f64, f64)> {
    points.iter().map(|v| (v.x, v.y)).collect()
}

/// Convex hull of a 2D point set, returned in CCW order.
#[pyfunction]
fn convex_hull(points: Vec<(f64, f64)>) -> PyResult<Vec<(f64, f64)>> {
    let hull = geom2::convex_hull(&to_points(&points))
        .map_err(|err| PyValueError::new_err(err.to_string()))?;
    Ok(from_points(hull.vertices()))
}

/// Minkowski sum of two convex polygons given as vertex lists.
#[pyfunction]
fn minkowski_sum(p: Vec<(f64, f64)>, q: Vec<(f64, f64)>) -> PyResult<Vec<(f64, f64)>> {
    let hp = geom2::convex_hull(&to_points(&p))
        .map_err(|err| PyValueError::new_err(err.to_string()))?;
    let hq = geom2::convex_hull(&to_points(&q))
        .map_err(|err| PyValueError::new_err(err.to_string()))?;
    let sum = geom2::minkowski_sum(&hp, &hq)
        .map_err(|err| PyValueError::new_err(err.to_string()))?;
    Ok(from_points(sum.vertices()))
}

/// Assemble the named polytope list for a finished run: the hulled initial
/// region, the bloating shape when it is a proper polygon, and one entry per
/// segment. Mirrors the result records the CLI emits.
fn named_records(pipe: &Flowpipe, bloating: &Bloating) -> Vec<(String, Vec<(f64, f64)>)> {
    let mut records = Vec::with_capacity(pipe.len() + 2);
    records.push((
        "initial region".to_string(),
        from_points(pipe.initial().vertices()),
    ));
    if let Bloating::Hull(poly) = bloating {
        records.push(("bloating".to_string(), from_points(poly.vertices())));
    }
    for (i, seg) in pipe.segments().iter().enumerate() {
        records.push((format!("segment {i}"), from_points(seg.vertices())));
    }
    records
}

/// Approximate the flowpipe of `dx/dt = flow · x` from an initial region.
///
/// Returns a list of `(name, vertices)` pairs, CCW order each: the initial
/// region, the bloating shape when polygonal, and one entry per step.
#[pyfunction]
#[pyo3(signature = (initial, flow, bloating, step_size=None, steps=None))]
fn approx(
    initial: Vec<(f64, f64)>,
    flow: ((f64, f64), (f64, f64)),
    bloating: Vec<(f64, f64)>,
    step_size: Option<f64>,
    steps: Option<usize>,
) -> PyResult<Vec<(String, Vec<(f64, f64)>)>> {
    let defaults = ReachCfg::default();
    let cfg = ReachCfg {
        step_size: step_size.unwrap_or(defaults.step_size),
        steps: steps.unwrap_or(defaults.steps),
    };
    let m = Matrix2::new(flow.0 .0, flow.0 .1, flow.1 .0, flow.1 .1);
    let pts = to_points(&initial);
    let bloat_pts = to_points(&bloating);
    let pipe = reach::approx(&pts, &m, &bloat_pts, &cfg)
        .map_err(|err| PyValueError::new_err(err.to_string()))?;
    let shape = Bloating::from_points(&bloat_pts)
        .map_err(|err| PyValueError::new_err(err.to_string()))?;
    Ok(named_records(&pipe, &shape))
}

#[pymodule]
fn flowpipe_native(_py: Python, m: &PyModule) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(convex_hull, m)?)?;
    m.add_function(wrap_pyfunction!(minkowski_sum, m)?)?;
    m.add_function(wrap_pyfunction!(approx, m)?)?;
    Ok(())
}
