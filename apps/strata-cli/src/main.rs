mod config;
mod runner;

use anyhow::Context;
use clap::{Parser, Subcommand};
use glam::Vec3;
use std::path::PathBuf;
use strata_common::Time;
use strata_render::RenderView;
use tracing_subscriber::EnvFilter;

use crate::config::Scenario;
use crate::runner::Simulation;

#[derive(Parser)]
#[command(name = "strata-cli", about = "Run entity and render-sync scenarios")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print engine version and crate info
    Info,
    /// Run the built-in demo scenario
    Demo {
        /// Simulated seconds
        #[arg(short, long, default_value = "8")]
        until: f64,
        /// Seconds between rendered frames
        #[arg(short, long, default_value = "2")]
        step: f64,
    },
    /// Run a scenario file
    Run {
        /// YAML scenario file
        scenario: PathBuf,
        #[arg(short, long, default_value = "10")]
        until: f64,
        #[arg(short, long, default_value = "1")]
        step: f64,
        /// Camera zoom for the text renderer
        #[arg(long, default_value = "1")]
        zoom: f32,
        /// Write the animation registry to this JSON file after loading
        #[arg(long)]
        save_assets: Option<PathBuf>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    match cli.command {
        Commands::Info => {
            println!("strata-cli v{}", env!("CARGO_PKG_VERSION"));
            println!("gamestate: {}", strata_gamestate::crate_info());
            println!("render: {}", strata_render::crate_info());
            println!("assets: {}", strata_assets::crate_info());
        }
        Commands::Demo { until, step } => {
            let scenario = Scenario::demo()?;
            run(&scenario, until, step, RenderView::default())?;
        }
        Commands::Run {
            scenario,
            until,
            step,
            zoom,
            save_assets,
        } => {
            let scenario = Scenario::load(&scenario)?;
            if let Some(path) = save_assets {
                let sim = Simulation::from_scenario(&scenario)?;
                sim.stage()
                    .assets()
                    .save(&path)
                    .with_context(|| format!("saving assets to {}", path.display()))?;
                println!("Saved {} animations to {}", sim.stage().assets().len(), path.display());
            }
            let view = RenderView {
                camera: Vec3::ZERO,
                zoom,
            };
            run(&scenario, until, step, view)?;
        }
    }

    Ok(())
}

fn run(scenario: &Scenario, until: f64, step: f64, view: RenderView) -> anyhow::Result<()> {
    if !(step > 0.0) {
        anyhow::bail!("step must be positive, got {step}");
    }
    if !until.is_finite() {
        anyhow::bail!("until must be a finite number of seconds, got {until}");
    }
    let mut sim = Simulation::from_scenario(scenario)?;
    let mut now = Time::ZERO;
    loop {
        let applied = sim.step(now)?;
        tracing::debug!(time = %now, applied, "frame");
        print!("{}", sim.render(&view));
        if now.as_secs() >= until {
            break;
        }
        now = Time::from_secs((now.as_secs() + step).min(until));
    }
    println!(
        "Done: {} entities, {} render objects",
        sim.state().entity_count(),
        sim.stage().object_count()
    );
    for id in sim.state().entities().keys() {
        let rendered = if sim.stage().object(*id).is_some() { "rendered" } else { "hidden" };
        println!("  {id} {} ({rendered})", sim.name(*id).unwrap_or("?"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn run_rejects_bad_clock_arguments() {
        let scenario = Scenario::demo().unwrap();
        let view = RenderView::default();
        assert!(run(&scenario, f64::NAN, 1.0, view).is_err());
        assert!(run(&scenario, f64::INFINITY, 1.0, view).is_err());
        assert!(run(&scenario, 2.0, 0.0, view).is_err());
        assert!(run(&scenario, 2.0, 1.0, view).is_ok());
    }
}
