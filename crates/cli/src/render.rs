//! SVG rendering collaborator.
//!
//! Translates the named shape records into a standalone SVG document: one
//! filled translucent polygon path per shape ("M x,y L x,y … Z"), a text
//! label anchored near each shape's first vertex, and a viewBox derived from
//! the union bounding box. `SvgRenderer` adapts this to the core's
//! `RenderSink` trait; its I/O failures are logged, never propagated into
//! the computed flowpipe.

use std::fmt::Write as _;
use std::fs;
use std::path::PathBuf;

use flowpipe::geom2::Bloating;
use flowpipe::reach::{Flowpipe, RenderSink};

use crate::model::{flowpipe_shapes, ShapeRecord};

/// Deterministic fill palette, cycled across shapes.
const PALETTE: [(u8, u8, u8); 6] = [
    (31, 119, 180),
    (255, 127, 14),
    (44, 160, 44),
    (214, 39, 40),
    (148, 103, 189),
    (140, 86, 75),
];

/// Render shape records to an SVG document string.
///
/// The y axis is flipped during formatting so the figure reads in standard
/// mathematical orientation.
pub fn render_shapes(shapes: &[ShapeRecord]) -> String {
    let (min, max) = bounding_box(shapes);
    let width = (max[0] - min[0]).max(1e-6);
    let height = (max[1] - min[1]).max(1e-6);
    let pad_x = width * 0.05;
    let pad_y = height * 0.05;
    let flip = |y: f64| min[1] + max[1] - y;
    let font = (width.max(height) * 0.02).max(1e-3);

    let mut svg = String::new();
    let _ = writeln!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="{} {} {} {}">"#,
        min[0] - pad_x,
        min[1] - pad_y,
        width + 2.0 * pad_x,
        height + 2.0 * pad_y,
    );
    for (i, shape) in shapes.iter().enumerate() {
        if shape.vertices.is_empty() {
            continue;
        }
        let (r, g, b) = PALETTE[i % PALETTE.len()];
        let mut path = String::new();
        for (k, v) in shape.vertices.iter().enumerate() {
            let cmd = if k == 0 { 'M' } else { 'L' };
            let _ = write!(path, "{} {},{} ", cmd, v[0], flip(v[1]));
        }
        path.push('Z');
        let _ = writeln!(
            svg,
            r#"  <path d="{path}" fill="rgba({r},{g},{b},0.2)" stroke="rgb({r},{g},{b})" stroke-width="{sw}"/>"#,
            sw = font * 0.1,
        );
        // Label slightly below the first vertex, as the original plot did.
        let anchor = shape.vertices[0];
        let _ = writeln!(
            svg,
            r#"  <text x="{}" y="{}" font-size="{font}">{}</text>"#,
            anchor[0],
            flip(anchor[1] - font),
            shape.name,
        );
    }
    svg.push_str("</svg>\n");
    svg
}

fn bounding_box(shapes: &[ShapeRecord]) -> ([f64; 2], [f64; 2]) {
    let mut min = [f64::INFINITY; 2];
    let mut max = [f64::NEG_INFINITY; 2];
    for shape in shapes {
        for v in &shape.vertices {
            for axis in 0..2 {
                min[axis] = min[axis].min(v[axis]);
                max[axis] = max[axis].max(v[axis]);
            }
        }
    }
    if min[0] > max[0] {
        ([0.0, 0.0], [1.0, 1.0])
    } else {
        (min, max)
    }
}

/// `RenderSink` writing the figure to a fixed path.
pub struct SvgRenderer {
    out: PathBuf,
    bloating: Option<Bloating>,
}

impl SvgRenderer {
    pub fn new(out: PathBuf, bloating: Option<Bloating>) -> Self {
        Self { out, bloating }
    }
}

impl RenderSink for SvgRenderer {
    fn render(&mut self, flowpipe: &Flowpipe) {
        let shapes = flowpipe_shapes(flowpipe, self.bloating.as_ref());
        let svg = render_shapes(&shapes);
        match fs::write(&self.out, svg) {
            Ok(()) => tracing::info!(out = %self.out.display(), "figure written"),
            Err(err) => {
                // The flowpipe is already computed; a failed figure must not
                // suppress it.
                tracing::warn!(out = %self.out.display(), error = %err, "figure write failed");
            }
        }
    }
}
