use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use flowpipe::geom2::Bloating;
use flowpipe::reach::{approx, approx_with_sink};
use serde_json::json;
use tracing_subscriber::fmt::SubscriberBuilder;

mod model;
mod provenance;
mod render;

use model::{result_doc, ModelDoc, ResultDoc};
use render::SvgRenderer;

#[derive(Parser)]
#[command(name = "cli")]
#[command(about = "Flowpipe approximation runner")]
struct Cmd {
    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand)]
enum Action {
    /// Approximate a flowpipe from a model file and write the result JSON
    Run {
        #[arg(long)]
        model: PathBuf,
        #[arg(long)]
        out: PathBuf,
        /// Also render the flowpipe to an SVG figure
        #[arg(long)]
        plot: Option<PathBuf>,
    },
    /// Render a result JSON to an SVG figure
    Figure {
        #[arg(long)]
        from: PathBuf,
        #[arg(long)]
        out: PathBuf,
    },
    /// Print a small provenance JSON block
    Report,
}

fn main() -> Result<()> {
    SubscriberBuilder::default().with_target(false).init();
    let cmd = Cmd::parse();
    match cmd.action {
        Action::Run { model, out, plot } => run(&model, &out, plot.as_deref()),
        Action::Figure { from, out } => figure(&from, &out),
        Action::Report => report(),
    }
}

fn run(model_path: &Path, out: &Path, plot: Option<&Path>) -> Result<()> {
    tracing::info!(model = %model_path.display(), out = %out.display(), "run");
    let raw = fs::read_to_string(model_path)
        .with_context(|| format!("reading model {}", model_path.display()))?;
    let model: ModelDoc = serde_json::from_str(&raw)
        .with_context(|| format!("parsing model {}", model_path.display()))?;

    let initial = model.initial_points();
    let flow = model.flow_matrix();
    let bloat_pts = model.bloating_points();
    let cfg = model.reach_cfg();

    let bloating = Bloating::from_points(&bloat_pts)
        .context("bloating shape construction failed")?;
    let pipe = if let Some(figure_out) = plot {
        let mut sink = SvgRenderer::new(figure_out.to_path_buf(), Some(bloating.clone()));
        approx_with_sink(&initial, &flow, &bloat_pts, &cfg, &mut sink)
    } else {
        approx(&initial, &flow, &bloat_pts, &cfg)
    }
    .context("flowpipe approximation failed")?;
    tracing::info!(
        segments = pipe.len(),
        step_size = cfg.step_size,
        "flowpipe built"
    );

    let doc = result_doc(&model, &pipe, &bloating);
    write_json(out, &doc)?;
    provenance::write_sidecar(
        out,
        json!({
            "model": model_path.to_string_lossy(),
            "step_size": cfg.step_size,
            "steps": cfg.steps,
            "plot": plot.map(|p| p.to_string_lossy().into_owned()),
        }),
    )?;
    Ok(())
}

fn figure(from: &Path, out: &Path) -> Result<()> {
    tracing::info!(from = %from.display(), out = %out.display(), "figure");
    let raw = fs::read_to_string(from)
        .with_context(|| format!("reading result {}", from.display()))?;
    let doc: ResultDoc = serde_json::from_str(&raw)
        .with_context(|| format!("parsing result {}", from.display()))?;
    let svg = render::render_shapes(&doc.shapes);
    if let Some(parent) = out.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(out, svg).with_context(|| format!("writing {}", out.display()))?;
    provenance::write_sidecar(
        out,
        json!({
            "from": from.to_string_lossy(),
            "shapes": doc.shapes.len(),
        }),
    )?;
    Ok(())
}

fn report() -> Result<()> {
    let obj = json!({
        "code_rev": provenance::current_git_rev(),
        "params": {},
        "outputs": []
    });
    println!("{}", serde_json::to_string_pretty(&obj)?);
    Ok(())
}

fn write_json(out: &Path, doc: &ResultDoc) -> Result<()> {
    if let Some(parent) = out.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(out, serde_json::to_vec_pretty(doc)?)
        .with_context(|| format!("writing {}", out.display()))?;
    Ok(())
}
