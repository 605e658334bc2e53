//! Flowpipe construction and the approximation entry point.
//!
//! The builder carries a single piece of state between steps, the frontier
//! polygon `X_i`. Each step maps the frontier through `exp(A·r)`, re-hulls,
//! inflates by the bloating shape, and emits one segment polygon. The first
//! segment additionally hulls in the initial region so the slab swept between
//! start and end of the first interval stays covered.

use nalgebra::{Matrix2, Vector2};

use crate::error::FlowpipeError;
use crate::flow::StepMap;
use crate::geom2::{convex_hull, Bloating, Polygon};

/// Step configuration for one approximation run.
///
/// `steps` is a required, caller-visible parameter: the number of flowpipe
/// segments produced. Defaults are `step_size = 1.0` and `steps = 10`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ReachCfg {
    /// Time elapsed per iteration. Must be finite and positive.
    pub step_size: f64,
    /// Number of flowpipe segments to produce. Zero yields an empty flowpipe.
    pub steps: usize,
}

impl Default for ReachCfg {
    fn default() -> Self {
        Self {
            step_size: 1.0,
            steps: 10,
        }
    }
}

impl ReachCfg {
    pub fn validate(&self) -> Result<(), FlowpipeError> {
        if !self.step_size.is_finite() || self.step_size <= 0.0 {
            return Err(FlowpipeError::config(format!(
                "step size must be finite and positive, got {}",
                self.step_size
            )));
        }
        Ok(())
    }
}

/// Ordered sequence of segment polygons, one per time interval `[i·r, (i+1)·r]`.
#[derive(Clone, Debug)]
pub struct Flowpipe {
    initial: Polygon,
    segments: Vec<Polygon>,
}

impl Flowpipe {
    /// The hulled initial region `X_0`.
    pub fn initial(&self) -> &Polygon {
        &self.initial
    }

    pub fn segments(&self) -> &[Polygon] {
        &self.segments
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

/// Rendering collaborator. Implementations display or persist a flowpipe;
/// their failure modes are their own (log, ignore), never the core's: the
/// infallible signature guarantees a sink cannot suppress the computed
/// result.
pub trait RenderSink {
    fn render(&mut self, flowpipe: &Flowpipe);
}

/// Build the flowpipe for a validated initial region.
///
/// The bloating shape is Minkowski-added once per step at fixed magnitude,
/// never scaled by the step size. Errors from sub-components abort the whole
/// build tagged with the offending step index; partial flowpipes are never
/// returned.
pub fn build_flowpipe(
    initial: &Polygon,
    flow: &Matrix2<f64>,
    bloating: &Bloating,
    cfg: &ReachCfg,
) -> Result<Flowpipe, FlowpipeError> {
    cfg.validate()?;
    let step = StepMap::new(flow, cfg.step_size);
    let mut frontier = initial.clone();
    let mut segments = Vec::with_capacity(cfg.steps);
    for i in 0..cfg.steps {
        let mapped = convex_hull(&step.map_vertices(&frontier)).map_err(|e| e.at_step(i))?;
        let inflated = bloating.inflate(&mapped).map_err(|e| e.at_step(i))?;
        let segment = if i == 0 {
            // First slab: cover everything between X_0 and Z_0.
            let mut union = frontier.vertices().to_vec();
            union.extend_from_slice(inflated.vertices());
            convex_hull(&union).map_err(|e| e.at_step(i))?
        } else {
            inflated.clone()
        };
        segments.push(segment);
        frontier = inflated;
    }
    Ok(Flowpipe {
        initial: initial.clone(),
        segments,
    })
}

fn validate_inputs(
    initial: &[Vector2<f64>],
    bloating: &[Vector2<f64>],
    cfg: &ReachCfg,
) -> Result<(), FlowpipeError> {
    if initial.len() < 3 {
        return Err(FlowpipeError::config(format!(
            "initial region needs at least 3 points, got {}",
            initial.len()
        )));
    }
    if bloating.is_empty() {
        return Err(FlowpipeError::config("bloating shape needs at least 1 point"));
    }
    cfg.validate()
}

/// Approximation entry point: validate, hull the inputs, build the flowpipe.
pub fn approx(
    initial: &[Vector2<f64>],
    flow: &Matrix2<f64>,
    bloating: &[Vector2<f64>],
    cfg: &ReachCfg,
) -> Result<Flowpipe, FlowpipeError> {
    validate_inputs(initial, bloating, cfg)?;
    let region = convex_hull(initial)?;
    let shape = Bloating::from_points(bloating)?;
    build_flowpipe(&region, flow, &shape, cfg)
}

/// Like [`approx`], but hands the finished flowpipe to a rendering sink.
/// The flowpipe is returned regardless of what the sink does with it.
pub fn approx_with_sink(
    initial: &[Vector2<f64>],
    flow: &Matrix2<f64>,
    bloating: &[Vector2<f64>],
    cfg: &ReachCfg,
    sink: &mut dyn RenderSink,
) -> Result<Flowpipe, FlowpipeError> {
    let flowpipe = approx(initial, flow, bloating, cfg)?;
    sink.render(&flowpipe);
    Ok(flowpipe)
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::{matrix, vector};

    fn scenario_initial() -> Vec<Vector2<f64>> {
        vec![
            vector![1.0, 1.0],
            vector![2.0, 1.0],
            vector![3.0, 2.0],
            vector![1.0, 2.0],
        ]
    }

    fn scenario_flow() -> Matrix2<f64> {
        matrix![1.0, 4.0; -1.0, 3.0]
    }

    fn scenario_bloating() -> Vec<Vector2<f64>> {
        vec![
            vector![0.0, 1.0],
            vector![1.0, 0.0],
            vector![-1.0, 0.0],
            vector![0.0, -1.0],
        ]
    }

    #[test]
    fn end_to_end_scenario_produces_five_convex_segments() {
        let cfg = ReachCfg {
            step_size: 1.0,
            steps: 5,
        };
        let pipe = approx(
            &scenario_initial(),
            &scenario_flow(),
            &scenario_bloating(),
            &cfg,
        )
        .unwrap();
        assert_eq!(pipe.len(), 5);
        for seg in pipe.segments() {
            assert!(seg.check_convex().is_ok());
            assert!(seg.area() > 0.0);
        }
        // The first segment hulls in the initial region.
        for v in pipe.initial().vertices() {
            assert!(pipe.segments()[0].contains_eps(*v, 1e-9));
        }
    }

    #[test]
    fn segments_contain_the_mapped_previous_frontier() {
        // From step 1 on, segment i equals the frontier entering step i+1, so
        // its exactly-mapped vertices must land strictly inside segment i+1
        // (the bloating diamond holds the origin in its interior).
        let cfg = ReachCfg {
            step_size: 1.0,
            steps: 5,
        };
        let pipe = approx(
            &scenario_initial(),
            &scenario_flow(),
            &scenario_bloating(),
            &cfg,
        )
        .unwrap();
        let step = StepMap::new(&scenario_flow(), cfg.step_size);
        for i in 1..pipe.len() - 1 {
            let current = &pipe.segments()[i];
            let next = &pipe.segments()[i + 1];
            for v in current.vertices() {
                assert!(
                    next.contains_eps(step.apply(*v), -1e-9),
                    "mapped vertex of segment {} escapes segment {}",
                    i,
                    i + 1
                );
            }
            // Interior samples stay inside as well.
            let c = current.centroid();
            for v in current.vertices() {
                let mid = (c + v) * 0.5;
                assert!(next.contains_eps(step.apply(mid), -1e-9));
            }
        }
    }

    #[test]
    fn zero_steps_returns_empty_flowpipe() {
        let cfg = ReachCfg {
            step_size: 1.0,
            steps: 0,
        };
        let pipe = approx(
            &scenario_initial(),
            &scenario_flow(),
            &scenario_bloating(),
            &cfg,
        )
        .unwrap();
        assert!(pipe.is_empty());
        assert_eq!(pipe.len(), 0);
        // The initial region is still recorded.
        assert!(pipe.initial().check_convex().is_ok());
    }

    #[test]
    fn collinear_initial_region_is_rejected() {
        let collinear = vec![vector![0.0, 0.0], vector![1.0, 1.0], vector![2.0, 2.0]];
        let err = approx(
            &collinear,
            &scenario_flow(),
            &scenario_bloating(),
            &ReachCfg::default(),
        )
        .unwrap_err();
        assert!(matches!(err, FlowpipeError::DegenerateInput { .. }));
    }

    #[test]
    fn bad_configs_are_rejected() {
        let few = vec![vector![0.0, 0.0], vector![1.0, 0.0]];
        assert!(matches!(
            approx(&few, &scenario_flow(), &scenario_bloating(), &ReachCfg::default()),
            Err(FlowpipeError::InvalidConfig { .. })
        ));
        assert!(matches!(
            approx(&scenario_initial(), &scenario_flow(), &[], &ReachCfg::default()),
            Err(FlowpipeError::InvalidConfig { .. })
        ));
        for bad in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let cfg = ReachCfg {
                step_size: bad,
                steps: 3,
            };
            assert!(matches!(
                approx(&scenario_initial(), &scenario_flow(), &scenario_bloating(), &cfg),
                Err(FlowpipeError::InvalidConfig { .. })
            ));
        }
    }

    #[test]
    fn sub_micro_bloating_shape_runs_the_whole_pipeline() {
        // A tiny but non-degenerate diamond must survive the defensive
        // polygon checks inside the Minkowski step.
        let r = 5e-7;
        let bloating = vec![
            vector![0.0, r],
            vector![r, 0.0],
            vector![-r, 0.0],
            vector![0.0, -r],
        ];
        let cfg = ReachCfg {
            step_size: 1.0,
            steps: 3,
        };
        let pipe = approx(&scenario_initial(), &scenario_flow(), &bloating, &cfg).unwrap();
        assert_eq!(pipe.len(), 3);
        for seg in pipe.segments() {
            assert!(seg.check_convex().is_ok());
        }
    }

    #[test]
    fn point_bloating_runs_the_whole_pipeline() {
        let cfg = ReachCfg {
            step_size: 0.5,
            steps: 4,
        };
        let pipe = approx(
            &scenario_initial(),
            &scenario_flow(),
            &[vector![0.0, 0.0]],
            &cfg,
        )
        .unwrap();
        assert_eq!(pipe.len(), 4);
    }

    struct CountingSink {
        calls: usize,
        last_len: usize,
    }
    impl RenderSink for CountingSink {
        fn render(&mut self, flowpipe: &Flowpipe) {
            self.calls += 1;
            self.last_len = flowpipe.len();
        }
    }

    #[test]
    fn sink_is_invoked_and_result_still_returned() {
        let mut sink = CountingSink {
            calls: 0,
            last_len: 0,
        };
        let cfg = ReachCfg {
            step_size: 1.0,
            steps: 3,
        };
        let pipe = approx_with_sink(
            &scenario_initial(),
            &scenario_flow(),
            &scenario_bloating(),
            &cfg,
            &mut sink,
        )
        .unwrap();
        assert_eq!(sink.calls, 1);
        assert_eq!(sink.last_len, 3);
        assert_eq!(pipe.len(), 3);
    }

    #[test]
    fn sink_is_not_invoked_on_failure() {
        let mut sink = CountingSink {
            calls: 0,
            last_len: 0,
        };
        let collinear = vec![vector![0.0, 0.0], vector![1.0, 1.0], vector![2.0, 2.0]];
        let res = approx_with_sink(
            &collinear,
            &scenario_flow(),
            &scenario_bloating(),
            &ReachCfg::default(),
            &mut sink,
        );
        assert!(res.is_err());
        assert_eq!(sink.calls, 0);
    }

    #[test]
    fn identity_flow_keeps_growing_only_by_bloating() {
        // A = 0 maps every region to itself; each segment is the previous
        // frontier inflated by the diamond, so areas strictly increase.
        let cfg = ReachCfg {
            step_size: 1.0,
            steps: 4,
        };
        let pipe = approx(
            &scenario_initial(),
            &Matrix2::zeros(),
            &scenario_bloating(),
            &cfg,
        )
        .unwrap();
        let mut last = pipe.initial().area();
        for seg in pipe.segments() {
            let a = seg.area();
            assert!(a > last);
            last = a;
        }
    }
}
