//! Flowpipe timing probe for a damped spiral.
//!
//! Purpose
//! - Provide a reproducible, code-backed data point for “how long does a
//!   40-step flowpipe take, and how do segment sizes evolve?”
//!
//! Why this flow
//! - `[[-0.1, -1], [1, -0.1]]` has eigenvalues `-0.1 ± i`: trajectories
//!   spiral inward, so bloating growth and contraction compete visibly in
//!   the per-segment areas.

use std::time::Instant;

use flowpipe::prelude::*;
use nalgebra::{matrix, vector};

fn main() {
    let initial = vec![
        vector![1.0, 1.0],
        vector![2.0, 1.0],
        vector![3.0, 2.0],
        vector![1.0, 2.0],
    ];
    let flow = matrix![-0.1, -1.0; 1.0, -0.1];
    let bloating = vec![
        vector![0.0, 0.05],
        vector![0.05, 0.0],
        vector![-0.05, 0.0],
        vector![0.0, -0.05],
    ];
    let cfg = ReachCfg {
        step_size: 0.2,
        steps: 40,
    };

    let start = Instant::now();
    let pipe = approx(&initial, &flow, &bloating, &cfg).expect("flowpipe build succeeds");
    let elapsed = start.elapsed().as_secs_f64() * 1e3;

    println!(
        "flow=damped_spiral step_size={} steps={} initial_area={:.6}",
        cfg.step_size,
        cfg.steps,
        pipe.initial().area()
    );
    for (i, seg) in pipe.segments().iter().enumerate() {
        println!(
            "segment={i} vertices={} area={:.6}",
            seg.vertex_count(),
            seg.area()
        );
    }
    println!("build_time_ms={elapsed:.3}");
}
