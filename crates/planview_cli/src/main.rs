//! planview CLI
//!
//! Inspect SVG floor plans and render single pan/zoom frames to PNG.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use planview_core::{Point, Size, ViewTransform};
use planview_svg::{DrawContext, PixmapCanvas, SvgPlan};
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod config;

use config::PlanviewConfig;

#[derive(Parser)]
#[command(name = "planview")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Inspect and render SVG floor plans", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Config file (defaults to ./planview.toml when present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the natural size of a plan
    Info {
        /// SVG plan file
        plan: PathBuf,
    },

    /// Render one frame of a plan to PNG
    Render(RenderArgs),
}

#[derive(Args)]
struct RenderArgs {
    /// SVG plan file
    plan: PathBuf,

    /// Output PNG path
    #[arg(short, long)]
    output: PathBuf,

    /// Uniform scale (zoom factor when --zoom-at is given)
    #[arg(short, long, default_value = "1.0")]
    scale: f32,

    /// Horizontal translation in pixels
    #[arg(long, default_value = "0.0", allow_hyphen_values = true)]
    translate_x: f32,

    /// Vertical translation in pixels
    #[arg(long, default_value = "0.0", allow_hyphen_values = true)]
    translate_y: f32,

    /// Zoom by --scale around this screen point, given as X,Y
    #[arg(long, value_parser = parse_point, conflicts_with = "fit")]
    zoom_at: Option<Point>,

    /// Fit the whole plan into the output, centered
    #[arg(long)]
    fit: bool,

    /// Output width in pixels (overrides the config file)
    #[arg(long)]
    width: Option<u32>,

    /// Output height in pixels (overrides the config file)
    #[arg(long)]
    height: Option<u32>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    let config = match &cli.config {
        Some(path) => PlanviewConfig::load(path)?,
        None => PlanviewConfig::load_from_dir(Path::new("."))?,
    };

    match cli.command {
        Commands::Info { plan } => cmd_info(&config, &plan),
        Commands::Render(args) => cmd_render(&config, &args),
    }
}

fn open_plan(config: &PlanviewConfig, path: &Path) -> Result<SvgPlan> {
    SvgPlan::open_with(path, &config.plan_options())
        .with_context(|| format!("Failed to open plan {}", path.display()))
}

fn cmd_info(config: &PlanviewConfig, path: &Path) -> Result<()> {
    let plan = open_plan(config, path)?;
    let size = plan.dimensions();

    println!("{}", path.display());
    println!("  width:  {}", size.width);
    println!("  height: {}", size.height);

    Ok(())
}

fn cmd_render(config: &PlanviewConfig, args: &RenderArgs) -> Result<()> {
    let plan = open_plan(config, &args.plan)?;

    let width = args.width.unwrap_or(config.viewport.width);
    let height = args.height.unwrap_or(config.viewport.height);
    let mut canvas = PixmapCanvas::new(width, height)?;
    canvas.clear(config.background_color()?)?;

    let view = frame_view(args, plan.dimensions(), canvas.viewport());
    info!(
        "Rendering {} at scale {} translate ({}, {})",
        args.plan.display(),
        view.scale,
        view.translate_x,
        view.translate_y
    );

    plan.render(&mut canvas, &view)?;
    canvas
        .save_png(&args.output)
        .with_context(|| format!("Failed to write {}", args.output.display()))?;

    info!("Wrote {}x{} frame to {}", width, height, args.output.display());
    Ok(())
}

/// Resolve the view transform for a single frame
fn frame_view(args: &RenderArgs, content: Size, viewport: Size) -> ViewTransform {
    if args.fit {
        return ViewTransform::fit(content, viewport);
    }

    let base = ViewTransform::new(1.0, args.translate_x, args.translate_y);
    match args.zoom_at {
        Some(pivot) => base.zoom_about(pivot, args.scale),
        None => ViewTransform::new(args.scale, args.translate_x, args.translate_y),
    }
}

fn parse_point(s: &str) -> Result<Point, String> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| format!("expected X,Y but got '{s}'"))?;
    let x = x.trim().parse::<f32>().map_err(|e| format!("bad X '{x}': {e}"))?;
    let y = y.trim().parse::<f32>().map_err(|e| format!("bad Y '{y}': {e}"))?;
    Ok(Point::new(x, y))
}
