#![deny(unsafe_code)]
//! `folio`: headless runner for the portfolio animations.
//!
//! Subcommands:
//! - `list` - print available engines
//! - `schema <engine>` - print an engine's parameter schema
//! - `render <engine>` - replay N frames, write a PNG or SVG snapshot
//! - `trace <engine>` - replay N frames, one JSON line of state per frame
//! - `chart` - write the SVG bar chart

mod error;
mod replay;

use clap::{Args, Parser, Subcommand};
use error::CliError;
use folio_core::{Engine, Seed};
use folio_engines::bar_chart::BarChart;
use folio_engines::snapshot::write_scene;
use folio_engines::EngineKind;
use replay::replay;
use std::fs;
use std::path::{Path, PathBuf};
use std::process;

#[derive(Parser)]
#[command(name = "folio", about = "Portfolio animation engines, headless")]
struct Cli {
    /// Output as JSON instead of human-readable text.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

/// What to run: either spelled out on the command line or loaded from a
/// seed file.
#[derive(Args)]
struct RunArgs {
    /// Engine name (`rocket` or `particles`).
    #[arg(required_unless_present = "seed_file")]
    engine: Option<String>,

    /// Viewport width (the canvas width for `particles`).
    #[arg(short = 'W', long, default_value_t = 800)]
    width: usize,

    /// Viewport height.
    #[arg(short = 'H', long, default_value_t = 600)]
    height: usize,

    /// Number of frames to run.
    #[arg(short, long, default_value_t = 300)]
    steps: usize,

    /// PRNG seed for deterministic output.
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Engine parameters as a JSON object.
    #[arg(long, default_value = "{}")]
    params: String,

    /// Replay file; overrides every other run option.
    #[arg(long)]
    seed_file: Option<PathBuf>,
}

impl RunArgs {
    fn to_seed(&self) -> Result<Seed, CliError> {
        if let Some(path) = &self.seed_file {
            let seed = load_seed(path)?;
            if let Some(engine) = &self.engine {
                if *engine != seed.engine {
                    return Err(CliError::Input(format!(
                        "engine {engine:?} does not match seed file engine {:?}",
                        seed.engine
                    )));
                }
            }
            return Ok(seed);
        }
        let engine = self
            .engine
            .as_deref()
            .ok_or_else(|| CliError::Input("missing engine name".into()))?;
        let mut seed = Seed::new(engine, self.width, self.height, self.seed);
        seed.params =
            serde_json::from_str(&self.params).map_err(|e| CliError::bad_json("--params", e))?;
        seed.steps = self.steps;
        Ok(seed)
    }
}

#[derive(Subcommand)]
enum Command {
    /// List available engines.
    List,
    /// Print an engine's parameter schema.
    Schema {
        engine: String,
    },
    /// Replay an engine and write a snapshot of the final frame.
    Render {
        #[command(flatten)]
        run: RunArgs,

        /// Output path; `.png` or `.svg`.
        #[arg(short, long, default_value = "output.png")]
        output: PathBuf,
    },
    /// Replay an engine, printing its state after every frame as JSON lines.
    Trace {
        #[command(flatten)]
        run: RunArgs,
    },
    /// Write the SVG bar chart.
    Chart {
        /// Chart data as JSON (`{"title", "y_label", "bars": [{label, value, color}]}`).
        #[arg(long)]
        data: Option<PathBuf>,

        /// Width of the hosting container; the chart is capped at 800.
        #[arg(short = 'W', long, default_value_t = 840.0)]
        width: f64,

        #[arg(short, long, default_value = "chart.svg")]
        output: PathBuf,
    },
}

fn load_seed(path: &Path) -> Result<Seed, CliError> {
    let text = fs::read_to_string(path)
        .map_err(|e| CliError::Io(format!("reading {}: {e}", path.display())))?;
    serde_json::from_str(&text).map_err(|e| CliError::bad_json(&path.display().to_string(), e))
}

fn load_chart(path: Option<&Path>) -> Result<BarChart, CliError> {
    let Some(path) = path else {
        return Ok(BarChart::desktop_share());
    };
    let text = fs::read_to_string(path)
        .map_err(|e| CliError::Io(format!("reading {}: {e}", path.display())))?;
    serde_json::from_str(&text).map_err(|e| CliError::bad_json(&path.display().to_string(), e))
}

fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Command::List => {
            let engines = EngineKind::list_engines();
            if cli.json {
                let info = serde_json::json!({ "engines": engines });
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                println!("Engines:");
                for name in engines {
                    println!("  {name}");
                }
            }
        }
        Command::Schema { engine } => {
            let eng = EngineKind::from_name(&engine, 800, 600, 0, &serde_json::json!({}))?;
            println!("{}", serde_json::to_string_pretty(&eng.param_schema())?);
        }
        Command::Render { run, output } => {
            let seed = run.to_seed()?;
            let eng = replay::<_, CliError>(&seed, |_, _| Ok(()))?;
            write_scene(&eng.scene(), &output)?;

            if cli.json {
                let info = serde_json::json!({
                    "seed": seed,
                    "params": eng.params(),
                    "output": output.display().to_string(),
                });
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                eprintln!(
                    "rendered {} ({}x{}, {} steps, seed {}) -> {}",
                    seed.engine,
                    seed.width,
                    seed.height,
                    seed.steps,
                    seed.seed,
                    output.display()
                );
            }
        }
        Command::Trace { run } => {
            let seed = run.to_seed()?;
            replay(&seed, |step, eng| {
                let line = serde_json::json!({ "step": step, "state": eng.state() });
                println!("{}", serde_json::to_string(&line)?);
                Ok::<(), CliError>(())
            })?;
            if !cli.json {
                eprintln!("traced {} for {} steps", seed.engine, seed.steps);
            }
        }
        Command::Chart {
            data,
            width,
            output,
        } => {
            let chart = load_chart(data.as_deref())?;
            let svg = chart.render_svg(width)?;
            fs::write(&output, svg)
                .map_err(|e| CliError::Io(format!("writing {}: {e}", output.display())))?;

            if cli.json {
                let info = serde_json::json!({
                    "bars": chart.bars.len(),
                    "container_width": width,
                    "output": output.display().to_string(),
                });
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                eprintln!("chart ({} bars) -> {}", chart.bars.len(), output.display());
            }
        }
    }

    Ok(())
}

fn main() {
    let cli = Cli::parse();
    let json_mode = cli.json;
    if let Err(e) = run(cli) {
        if json_mode {
            let j = serde_json::json!({"error": e.to_string(), "exit_code": e.exit_code()});
            eprintln!("{}", serde_json::to_string_pretty(&j).unwrap_or_default());
        } else {
            eprintln!("error: {e}");
        }
        process::exit(e.exit_code());
    }
}
