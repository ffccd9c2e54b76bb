use std::io;
use std::path::PathBuf;

use anyhow::Context;
use clap::{Args, Parser, Subcommand, ValueEnum};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rust_decimal::Decimal;
use tracing::debug;

use widget_cli::utils::parse_amount;
use widget_cli::{app, logging};
use widget_core::{EstimateInput, PeriodBasis, SeveranceHandling, TaxMode, presets};

// ─── CLI definition ──────────────────────────────────────────────────────────

/// Small everyday widgets: a Korean paycheck estimator, a persona chat and a
/// dating-style personality quiz.
#[derive(Debug, Parser)]
#[command(name = "widgets", version)]
struct Cli {
    /// Log filter: a level ("warn", "debug", ...) or a full RUST_LOG directive.
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Also append log records to this file.
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    /// Hide log output on stderr (file logging is unaffected).
    #[arg(long, short, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Estimate monthly take-home pay.
    Pay(PayArgs),
    /// Chat with a persona, one line per turn, until EOF or /quit.
    Chat(ChatArgs),
    /// Take the personality quiz.
    Quiz(QuizArgs),
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum BasisArg {
    Annual,
    Monthly,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum SeveranceArg {
    Separate,
    Included,
}

#[derive(Debug, Args)]
struct PayArgs {
    /// Salary; separators and units are ignored ("50,000,000원" works).
    #[arg(value_parser = parse_amount, default_value = "50000000")]
    amount: Decimal,

    /// Whether the amount is an annual salary or a monthly wage.
    #[arg(long, value_enum, default_value_t = BasisArg::Annual)]
    basis: BasisArg,

    /// Whether an annual salary already includes severance.
    #[arg(long, value_enum, default_value_t = SeveranceArg::Separate)]
    severance: SeveranceArg,

    /// Monthly non-taxable allowance.
    #[arg(long, value_parser = parse_amount, default_value = "200000")]
    non_taxable: Decimal,

    /// Dependents including yourself (1 to 20).
    #[arg(long, default_value_t = 1)]
    dependents: u32,

    /// Children eligible for the child deduction (0 to 20).
    #[arg(long, default_value_t = 0)]
    children: u32,

    /// Use this monthly income tax instead of estimating it.
    #[arg(long, value_parser = parse_amount)]
    manual_tax: Option<Decimal>,

    /// Built-in policy name or a policy TOML file.
    #[arg(long, default_value = presets::ANNUAL_2025)]
    policy: String,

    /// Also print annual take-home pay.
    #[arg(long)]
    annual: bool,

    /// Estimate every row of this CSV and print the results as CSV.
    #[arg(long)]
    batch: Option<PathBuf>,
}

#[derive(Debug, Args)]
struct ChatArgs {
    /// Bundled persona name or a persona TOML file.
    #[arg(long, default_value = "haru")]
    persona: String,

    /// Seed for reproducible replies.
    #[arg(long)]
    seed: Option<u64>,
}

#[derive(Debug, Args)]
struct QuizArgs {
    /// Bundled quiz name or a quiz TOML file.
    #[arg(long, default_value = "dating")]
    quiz: String,

    /// Comma-separated 0-based choices, one per question. Without this the
    /// quiz is interactive.
    #[arg(long, value_delimiter = ',')]
    answers: Option<Vec<usize>>,
}

impl PayArgs {
    fn to_input(&self) -> EstimateInput {
        EstimateInput {
            gross_amount: self.amount,
            period_basis: match self.basis {
                BasisArg::Annual => PeriodBasis::Annual,
                BasisArg::Monthly => PeriodBasis::Monthly,
            },
            severance: match self.severance {
                SeveranceArg::Separate => SeveranceHandling::Separate,
                SeveranceArg::Included => SeveranceHandling::IncludedInAnnual,
            },
            non_taxable_monthly: self.non_taxable,
            dependents: self.dependents,
            children: self.children,
            tax_mode: self
                .manual_tax
                .map_or(TaxMode::BracketEstimate, TaxMode::ManualOverride),
        }
    }
}

// ─── commands ────────────────────────────────────────────────────────────────

fn pay(args: PayArgs) -> anyhow::Result<()> {
    let policy = app::resolve_policy(&args.policy)?;
    debug!(policy = %policy.name, year = policy.year, "policy resolved");

    match &args.batch {
        Some(path) => {
            app::run_batch(&policy, path, io::stdout().lock())?;
        }
        None => println!("{}", app::pay_report(&policy, args.to_input(), args.annual)),
    }
    Ok(())
}

fn chat(args: ChatArgs) -> anyhow::Result<()> {
    let persona = app::resolve_persona(&args.persona)?;
    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let turns = app::run_chat(&persona, io::stdin().lock(), io::stdout().lock(), &mut rng)?;
    debug!(turns, persona = %persona.id, "chat finished");
    Ok(())
}

fn quiz(args: QuizArgs) -> anyhow::Result<()> {
    let quiz = app::resolve_quiz(&args.quiz)?;

    match &args.answers {
        Some(answers) => app::run_quiz_scripted(&quiz, answers, io::stdout().lock()),
        None => {
            app::run_quiz_interactive(&quiz, io::stdin().lock(), io::stdout().lock())?;
            Ok(())
        }
    }
}

// ─── entry point ─────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
    logging::init_logging();

    let cli = Cli::parse();

    if let Some(level) = &cli.log_level {
        logging::set_log_level(level)?;
    }
    if let Some(path) = &cli.log_file {
        logging::enable_file_logging(path)
            .with_context(|| format!("--log-file {}", path.display()))?;
    }
    if cli.quiet {
        logging::set_console_enabled(false)?;
    }

    match cli.command {
        Command::Pay(args) => pay(args),
        Command::Chat(args) => chat(args),
        Command::Quiz(args) => quiz(args),
    }
}
