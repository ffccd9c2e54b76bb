use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;
use widget_data::{bundled_data_dir, load_data_dir};

/// Load and validate every data file in a widgets data directory.
///
/// The directory may contain:
/// - policies/*.toml: payroll policies, each naming a bracket CSV
/// - personas/*.toml: chat personas
/// - quiz/*.toml: personality quizzes
#[derive(Parser, Debug)]
#[command(name = "widget-data-check")]
#[command(version, about, long_about = None)]
struct Args {
    /// Data directory to check (defaults to the bundled data)
    dir: Option<PathBuf>,

    /// Print each loaded item
    #[arg(short, long, default_value_t = false)]
    verbose: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let args = Args::parse();
    let dir = args.dir.unwrap_or_else(bundled_data_dir);

    println!("Checking data in: {}", dir.display());

    let data = load_data_dir(&dir)
        .with_context(|| format!("Failed to load data from: {}", dir.display()))?;

    if args.verbose {
        for policy in &data.policies {
            println!(
                "  policy  {} ({}), {} brackets",
                policy.name,
                policy.year,
                policy.brackets.len()
            );
        }
        for persona in &data.personas {
            println!(
                "  persona {} ({}), {} rules",
                persona.id,
                persona.name,
                persona.rules.len()
            );
        }
        for quiz in &data.quizzes {
            println!(
                "  quiz    {}, {} questions, {} types",
                quiz.title,
                quiz.questions.len(),
                quiz.types.len()
            );
        }
    }

    println!(
        "OK: {} policies, {} personas, {} quizzes.",
        data.policies.len(),
        data.personas.len(),
        data.quizzes.len()
    );

    Ok(())
}
