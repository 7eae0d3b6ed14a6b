use std::time::Instant;

use asterfield_common::{FieldConfig, Rect};
use asterfield_input::ControlState;
use asterfield_kernel::Simulation;
use asterfield_render::RecordingPainter;
use asterfield_tools::{FieldInspector, FrameTimer, draw_debug_overlay};
use clap::{Args, Parser, Subcommand, ValueEnum};
use glam::Vec2;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "asterfield-cli", about = "Headless tools for the asteroid field")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print version and crate info
    Info,
    /// Run the simulation headless and report the final frame
    Run {
        #[command(flatten)]
        field: FieldArgs,
        /// Number of ticks to simulate
        #[arg(short, long, default_value = "120")]
        ticks: u64,
        /// Hold thrust for the whole run
        #[arg(long)]
        thrust: bool,
        /// Hold a turn for the whole run
        #[arg(long, value_enum)]
        turn: Option<Turn>,
        /// Print every draw call of the final frame
        #[arg(long)]
        dump: bool,
        /// Print the summary as JSON
        #[arg(long)]
        json: bool,
    },
    /// Query the grid for asteroids touching a world rectangle
    Query {
        #[command(flatten)]
        field: FieldArgs,
        #[arg(long)]
        x: f32,
        #[arg(long)]
        y: f32,
        #[arg(long)]
        width: f32,
        #[arg(long)]
        height: f32,
        /// List every hit
        #[arg(short, long)]
        list: bool,
    },
}

/// Overrides applied on top of the default field.
#[derive(Args)]
struct FieldArgs {
    /// RNG seed for field generation
    #[arg(short, long)]
    seed: Option<u64>,
    /// Number of asteroids to generate
    #[arg(long)]
    asteroids: Option<usize>,
    /// Number of stars to generate
    #[arg(long)]
    stars: Option<usize>,
}

impl FieldArgs {
    fn into_config(self) -> FieldConfig {
        let mut config = FieldConfig::default();
        if let Some(seed) = self.seed {
            config.seed = seed;
        }
        if let Some(n) = self.asteroids {
            config.asteroid_count = n;
        }
        if let Some(n) = self.stars {
            config.star_count = n;
        }
        config
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum Turn {
    Left,
    Right,
}

const TICK_DT: f32 = 1.0 / 60.0;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    match cli.command {
        Commands::Info => {
            println!("asterfield-cli v{}", env!("CARGO_PKG_VERSION"));
            println!("common: {}", asterfield_common::crate_info());
            println!("grid: {}", asterfield_grid::crate_info());
            println!("camera: {}", asterfield_camera::crate_info());
            println!("starfield: {}", asterfield_starfield::crate_info());
            println!("render: {}", asterfield_render::crate_info());
            println!("input: {}", asterfield_input::crate_info());
            println!("kernel: {}", asterfield_kernel::crate_info());
            println!("tools: {}", asterfield_tools::crate_info());
        }
        Commands::Run {
            field,
            ticks,
            thrust,
            turn,
            dump,
            json,
        } => {
            let mut sim = Simulation::new(field.into_config())?;
            let controls = ControlState {
                thrust,
                rotate_left: matches!(turn, Some(Turn::Left)),
                rotate_right: matches!(turn, Some(Turn::Right)),
                toggle_debug: false,
            };

            let mut timer = FrameTimer::default();
            for _ in 0..ticks {
                let start = Instant::now();
                sim.tick(&controls, TICK_DT);
                timer.record(start.elapsed());
            }
            tracing::info!(
                ticks,
                avg_us = timer.average().as_micros() as u64,
                max_us = timer.max().as_micros() as u64,
                "run finished"
            );

            let mut painter = RecordingPainter::new();
            sim.render(&mut painter);
            draw_debug_overlay(&sim, timer.fps(), &mut painter);

            let summary = FieldInspector::summary(&sim);
            if json {
                println!("{}", serde_json::to_string_pretty(&summary)?);
            } else {
                println!("{summary}");
                println!(
                    "Frame: {} commands, {} draw calls, tick avg {:?} (min {:?}, max {:?})",
                    sim.commands().len(),
                    painter.len(),
                    timer.average(),
                    timer.min(),
                    timer.max()
                );
            }
            if dump {
                print!("{painter}");
            }
        }
        Commands::Query {
            field,
            x,
            y,
            width,
            height,
            list,
        } => {
            let sim = Simulation::new(field.into_config())?;
            let rect = Rect::from_origin_size(Vec2::new(x, y), Vec2::new(width, height));
            let grid = sim.grid();

            match grid.cell_range(&rect) {
                Some((lo, hi)) => println!(
                    "Scanned cells ({}, {})..=({}, {}) of {}x{}",
                    lo.x,
                    lo.y,
                    hi.x,
                    hi.y,
                    grid.columns(),
                    grid.rows()
                ),
                None => println!("Rectangle misses the grid"),
            }

            let hits = grid.query_visible(&rect);
            println!("Hits: {} of {}", hits.len(), sim.total_asteroids());
            if list {
                for a in &hits {
                    println!(
                        "  ({:.1}, {:.1}) size={:.0} layer={} rot={:.1}",
                        a.position.x, a.position.y, a.size.x, a.layer, a.rotation
                    );
                }
            }
        }
    }

    Ok(())
}
