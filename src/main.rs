use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use dimcalc::calc_engine::Calculator;
use dimcalc::units::UnitRegistry;

mod session;

#[cfg(feature = "line")]
mod line_mode;
#[cfg(feature = "tui")]
mod render_help;
#[cfg(feature = "tui")]
mod tui_mode;

#[derive(Parser, Debug)]
#[command(name = "dimcalc", version)]
#[command(about = "Calculator for expressions with physical units")]
struct Args {
    /// Expression to evaluate; starts the interactive calculator when omitted
    expression: Option<String>,

    /// Unit to show the result in (e.g. km, degF)
    #[arg(short = 't', long = "to", value_name = "UNIT")]
    to: Option<String>,

    /// Print every evaluation step
    #[arg(short, long)]
    details: bool,

    /// JSON file with extra unit definitions
    #[arg(long, value_name = "FILE")]
    units: Option<PathBuf>,

    /// List the known units and exit
    #[arg(long)]
    list_units: bool,
}

fn init_tracing() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    // Only when RUST_LOG is set, so the interactive screens stay clean.
    if std::env::var("RUST_LOG").is_ok() {
        tracing_subscriber::registry()
            .with(fmt::layer().with_writer(std::io::stderr).with_target(true))
            .with(EnvFilter::from_default_env())
            .init();
    }
}

fn load_registry(extra: Option<&PathBuf>) -> Result<UnitRegistry> {
    let mut registry = UnitRegistry::default();
    if let Some(path) = extra {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let count = registry
            .extend_from_json(&json)
            .with_context(|| format!("failed to load units from {}", path.display()))?;
        tracing::info!(count, path = %path.display(), "loaded extra units");
    }
    Ok(registry)
}

fn main() -> Result<()> {
    init_tracing();
    let args = Args::parse();
    let registry = load_registry(args.units.as_ref())?;

    if args.list_units {
        for line in session::unit_listing(&registry) {
            println!("{}", line);
        }
        return Ok(());
    }

    let calc = Calculator::new(&registry);
    match args.expression {
        Some(expression) => {
            let outcome = session::run(&calc, &expression, args.to.as_deref(), args.details);
            println!("{}", outcome.summary());
            for (i, step) in outcome.steps.iter().enumerate() {
                println!("  Step {}: {} = {}", i + 1, step.operation, step.result);
            }
            if outcome.result.is_err() {
                std::process::exit(1);
            }
            Ok(())
        }
        None => run_interactive(calc),
    }
}

#[cfg(feature = "tui")]
fn run_interactive(calc: Calculator<'_>) -> Result<()> {
    tui_mode::run_tui(calc)
}

#[cfg(all(feature = "line", not(feature = "tui")))]
fn run_interactive(calc: Calculator<'_>) -> Result<()> {
    line_mode::run_line(calc)
}

#[cfg(not(any(feature = "tui", feature = "line")))]
fn run_interactive(_calc: Calculator<'_>) -> Result<()> {
    anyhow::bail!("built without an interactive mode; pass an expression or enable the `tui` or `line` feature")
}
