//! JSON model and result documents.
//!
//! The model file is the caller-facing input: initial region, flow matrix,
//! bloating shape, and optional step overrides. The result file echoes the
//! model and lists named shape records (the original tool emitted a list of
//! named polytopes for its plot; the records reproduce that).

use flowpipe::geom2::Bloating;
use flowpipe::reach::{Flowpipe, ReachCfg};
use flowpipe::{Mat2, Vec2};
use serde::{Deserialize, Serialize};

/// Input document for one approximation run.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ModelDoc {
    /// Initial region as a V-representation, `[[x, y], ...]`.
    pub initial: Vec<[f64; 2]>,
    /// Flow matrix rows, `[[a, b], [c, d]]` for `dx/dt = A·x`.
    pub flow: [[f64; 2]; 2],
    /// Bloating shape as a V-representation.
    pub bloating: Vec<[f64; 2]>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub step_size: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub steps: Option<usize>,
}

impl ModelDoc {
    pub fn reach_cfg(&self) -> ReachCfg {
        let defaults = ReachCfg::default();
        ReachCfg {
            step_size: self.step_size.unwrap_or(defaults.step_size),
            steps: self.steps.unwrap_or(defaults.steps),
        }
    }

    pub fn initial_points(&self) -> Vec<Vec2<f64>> {
        self.initial.iter().map(|&[x, y]| Vec2::new(x, y)).collect()
    }

    pub fn flow_matrix(&self) -> Mat2<f64> {
        Mat2::new(
            self.flow[0][0],
            self.flow[0][1],
            self.flow[1][0],
            self.flow[1][1],
        )
    }

    pub fn bloating_points(&self) -> Vec<Vec2<f64>> {
        self.bloating.iter().map(|&[x, y]| Vec2::new(x, y)).collect()
    }
}

/// One named polygon in the result document.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ShapeRecord {
    pub name: String,
    pub vertices: Vec<[f64; 2]>,
}

impl ShapeRecord {
    fn from_vertices(name: impl Into<String>, verts: &[Vec2<f64>]) -> Self {
        Self {
            name: name.into(),
            vertices: verts.iter().map(|v| [v.x, v.y]).collect(),
        }
    }
}

/// Output document: the model echo plus the named shapes.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ResultDoc {
    pub model: ModelDoc,
    pub shapes: Vec<ShapeRecord>,
}

/// Named shape records for a finished run: the hulled initial region, the
/// bloating shape when it is a proper polygon, and one record per segment.
pub fn flowpipe_shapes(flowpipe: &Flowpipe, bloating: Option<&Bloating>) -> Vec<ShapeRecord> {
    let mut shapes = Vec::with_capacity(flowpipe.len() + 2);
    shapes.push(ShapeRecord::from_vertices(
        "initial region",
        flowpipe.initial().vertices(),
    ));
    if let Some(Bloating::Hull(poly)) = bloating {
        shapes.push(ShapeRecord::from_vertices("bloating", poly.vertices()));
    }
    for (i, seg) in flowpipe.segments().iter().enumerate() {
        shapes.push(ShapeRecord::from_vertices(
            format!("segment {i}"),
            seg.vertices(),
        ));
    }
    shapes
}

/// Assemble the result document for a finished run.
pub fn result_doc(model: &ModelDoc, flowpipe: &Flowpipe, bloating: &Bloating) -> ResultDoc {
    ResultDoc {
        model: model.clone(),
        shapes: flowpipe_shapes(flowpipe, Some(bloating)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flowpipe::reach::approx;

    fn demo_model() -> ModelDoc {
        ModelDoc {
            initial: vec![[1.0, 1.0], [2.0, 1.0], [3.0, 2.0], [1.0, 2.0]],
            flow: [[1.0, 4.0], [-1.0, 3.0]],
            bloating: vec![[0.0, 1.0], [1.0, 0.0], [-1.0, 0.0], [0.0, -1.0]],
            step_size: Some(1.0),
            steps: Some(5),
        }
    }

    #[test]
    fn model_round_trips_through_json() {
        let model = demo_model();
        let json = serde_json::to_string(&model).unwrap();
        let back: ModelDoc = serde_json::from_str(&json).unwrap();
        assert_eq!(back, model);
    }

    #[test]
    fn missing_optionals_fall_back_to_defaults() {
        let json = r#"{
            "initial": [[0.0, 0.0], [1.0, 0.0], [0.0, 1.0]],
            "flow": [[0.0, 0.0], [0.0, 0.0]],
            "bloating": [[0.0, 0.0]]
        }"#;
        let model: ModelDoc = serde_json::from_str(json).unwrap();
        let cfg = model.reach_cfg();
        assert_eq!(cfg, ReachCfg::default());
    }

    #[test]
    fn result_doc_lists_named_shapes_in_order() {
        let model = demo_model();
        let cfg = model.reach_cfg();
        let pipe = approx(
            &model.initial_points(),
            &model.flow_matrix(),
            &model.bloating_points(),
            &cfg,
        )
        .unwrap();
        let shape = Bloating::from_points(&model.bloating_points()).unwrap();
        let doc = result_doc(&model, &pipe, &shape);
        // initial + bloating + 5 segments
        assert_eq!(doc.shapes.len(), 7);
        assert_eq!(doc.shapes[0].name, "initial region");
        assert_eq!(doc.shapes[1].name, "bloating");
        assert_eq!(doc.shapes[2].name, "segment 0");
        assert_eq!(doc.shapes[6].name, "segment 4");
        for record in &doc.shapes {
            assert!(record.vertices.len() >= 3);
        }
    }

    #[test]
    fn point_bloating_is_omitted_from_shapes() {
        let mut model = demo_model();
        model.bloating = vec![[0.0, 0.0]];
        let cfg = model.reach_cfg();
        let pipe = approx(
            &model.initial_points(),
            &model.flow_matrix(),
            &model.bloating_points(),
            &cfg,
        )
        .unwrap();
        let shape = Bloating::from_points(&model.bloating_points()).unwrap();
        let doc = result_doc(&model, &pipe, &shape);
        assert!(doc.shapes.iter().all(|s| s.name != "bloating"));
        assert_eq!(doc.shapes.len(), 6);
    }
}
