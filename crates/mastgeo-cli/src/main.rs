//! mastgeo CLI - antenna side/facing classification
//!
//! Reads a JSON scene of posed antennas and pipes, runs a classification
//! pass and prints the labels a host would store.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use mastgeo_kernel::{classify, classify_with_debug, ClassifierSettings, FixtureKind};
use tracing::info;
use tracing_subscriber::EnvFilter;

mod report;
mod scene;

use scene::Scene;

#[derive(Parser)]
#[command(name = "mastgeo")]
#[command(about = "Classify antenna facing and side labels around pipes", long_about = None)]
struct Cli {
    /// Log debug output to stderr when RUST_LOG is unset
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a classification pass over a scene
    Classify {
        /// Scene JSON file
        scene: PathBuf,
        /// Settings TOML file
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Override the proximity threshold
        #[arg(long)]
        threshold: Option<f64>,
        /// Override the power iteration count
        #[arg(long)]
        iterations: Option<usize>,
        /// Print the full report as JSON
        #[arg(long)]
        json: bool,
        /// Include debug geometry (JSON output only)
        #[arg(long)]
        debug_geometry: bool,
    },
    /// Print plumb angles of the fixtures in a scene
    Plumb {
        /// Scene JSON file
        scene: PathBuf,
        /// Only this fixture
        #[arg(long)]
        id: Option<String>,
    },
    /// Print the default settings as TOML
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Classify {
            scene,
            config,
            threshold,
            iterations,
            json,
            debug_geometry,
        } => {
            let settings = load_settings(config.as_deref(), threshold, iterations)?;
            run_classify(&scene, &settings, json, debug_geometry)?;
        }
        Commands::Plumb { scene, id } => {
            run_plumb(&scene, id.as_deref())?;
        }
        Commands::Config => {
            print!("{}", ClassifierSettings::default().to_toml_string()?);
        }
    }

    Ok(())
}

fn init_tracing(verbose: bool) {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter(std::env::var("RUST_LOG").ok().as_deref(), verbose))
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// `RUST_LOG` when set and valid, otherwise `debug` under `-v` and `info`.
fn env_filter(rust_log: Option<&str>, verbose: bool) -> EnvFilter {
    let fallback = if verbose { "debug" } else { "info" };
    rust_log
        .filter(|directives| !directives.trim().is_empty())
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new(fallback))
}

fn load_settings(
    config: Option<&Path>,
    threshold: Option<f64>,
    iterations: Option<usize>,
) -> Result<ClassifierSettings> {
    let mut settings = match config {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            ClassifierSettings::from_toml_str(&text)
                .with_context(|| format!("invalid settings in {}", path.display()))?
        }
        None => ClassifierSettings::default(),
    };
    if let Some(t) = threshold {
        settings.proximity_threshold = t;
    }
    if let Some(n) = iterations {
        settings.iterations = n;
    }
    settings.validate()?;
    Ok(settings)
}

fn run_classify(path: &Path, settings: &ClassifierSettings, json: bool, debug_geometry: bool) -> Result<()> {
    let scene = Scene::load(path)?;
    info!(
        antennas = scene.count(FixtureKind::Antenna),
        pipes = scene.count(FixtureKind::Pipe),
        "loaded {}",
        path.display()
    );

    let pass = if debug_geometry {
        classify_with_debug(&scene.fixtures, settings)
    } else {
        classify(&scene.fixtures, settings)
    }
    .with_context(|| format!("classification of {} failed", path.display()))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&pass)?);
    } else {
        print!("{}", report::PassReport(&pass));
    }
    Ok(())
}

fn run_plumb(path: &Path, id: Option<&str>) -> Result<()> {
    let scene = Scene::load(path)?;
    match id {
        Some(id) => {
            let fixture = scene
                .find(id)
                .with_context(|| format!("no fixture {id} in {}", path.display()))?;
            print!("{}", report::PlumbReport(vec![fixture]));
        }
        None => print!("{}", report::PlumbReport(scene.fixtures.iter().collect())),
    }
    Ok(())
}
