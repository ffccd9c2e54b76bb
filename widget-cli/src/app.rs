//! Command handlers behind the `widgets` binary.

use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use rand::Rng;
use tracing::{debug, info};
use widget_core::chat::ChatSession;
use widget_core::quiz::QuizSession;
use widget_core::{
    EstimateInput, EstimateResult, PayrollPolicy, PersonalityType, Persona, Quiz, QuizError,
    presets,
};
use widget_data::{bundled_data_dir, load_persona, load_policy, load_quiz};

use crate::batch;
use crate::summary::{render_annual_net, render_summary};

/// Typing this in a chat ends the session.
pub const CHAT_QUIT: &str = "/quit";

/// A preset name, or a path to a policy file.
pub fn resolve_policy(name_or_path: &str) -> Result<PayrollPolicy> {
    if let Some(policy) = presets::by_name(name_or_path) {
        debug!(preset = name_or_path, "using built-in policy");
        return Ok(policy);
    }

    let path = Path::new(name_or_path);
    if !path.exists() {
        bail!(
            "unknown policy '{name_or_path}': not a preset ({}) and no such file",
            presets::PRESET_NAMES.join(", ")
        );
    }
    load_policy(path).with_context(|| format!("Failed to load policy: {}", path.display()))
}

/// An existing file, or the name of a file in the bundled `subdir`.
fn bundled_or_path(
    name_or_path: &str,
    subdir: &str,
) -> PathBuf {
    let path = PathBuf::from(name_or_path);
    if path.exists() {
        path
    } else {
        bundled_data_dir()
            .join(subdir)
            .join(format!("{name_or_path}.toml"))
    }
}

pub fn resolve_persona(name_or_path: &str) -> Result<Persona> {
    let path = bundled_or_path(name_or_path, "personas");
    load_persona(&path).with_context(|| format!("Failed to load persona '{name_or_path}'"))
}

pub fn resolve_quiz(name_or_path: &str) -> Result<Quiz> {
    let path = bundled_or_path(name_or_path, "quiz");
    load_quiz(&path).with_context(|| format!("Failed to load quiz '{name_or_path}'"))
}

// ─── pay ─────────────────────────────────────────────────────────────────────

/// Estimates one paycheck and renders the summary.
pub fn pay_report(
    policy: &PayrollPolicy,
    input: EstimateInput,
    show_annual: bool,
) -> String {
    let input = input.sanitized();
    let result = policy.estimator().estimate(&input);
    info!(
        policy = %policy.name,
        net_monthly = %result.net_monthly,
        "estimate complete"
    );

    let mut report = render_summary(&input, &result);
    if show_annual {
        report.push('\n');
        report.push_str(&render_annual_net(&result));
    }
    report
}

/// Estimates every row of a batch CSV and writes the results as CSV.
pub fn run_batch<W: Write>(
    policy: &PayrollPolicy,
    path: &Path,
    output: W,
) -> Result<usize> {
    let inputs = batch::load_from_file(path)
        .with_context(|| format!("Failed to load batch file: {}", path.display()))?;

    let estimator = policy.estimator();
    let estimates: Vec<(EstimateInput, EstimateResult)> = inputs
        .into_iter()
        .map(|input| {
            let result = estimator.estimate(&input);
            (input, result)
        })
        .collect();

    batch::write_results(output, &estimates).context("Failed to write batch results")?;
    info!(rows = estimates.len(), "batch complete");
    Ok(estimates.len())
}

// ─── chat ────────────────────────────────────────────────────────────────────

/// Runs a line-by-line chat until EOF or [`CHAT_QUIT`]. Returns the number
/// of turns answered.
pub fn run_chat<I, O, R>(
    persona: &Persona,
    input: I,
    mut output: O,
    rng: &mut R,
) -> Result<usize>
where
    I: BufRead,
    O: Write,
    R: Rng + ?Sized,
{
    let mut session = ChatSession::new(persona);
    if let Some(greeting) = session.greeting() {
        writeln!(output, "{}: {greeting}", persona.name)?;
    }

    let mut turns = 0;
    for line in input.lines() {
        let line = line.context("Failed to read chat input")?;
        let utterance = line.trim();
        if utterance == CHAT_QUIT {
            break;
        }
        if utterance.is_empty() {
            continue;
        }

        let selection = session.respond(utterance, rng);
        writeln!(output, "{}: {}", persona.name, selection.response)?;
        turns += 1;
    }

    output.flush()?;
    Ok(turns)
}

// ─── quiz ────────────────────────────────────────────────────────────────────

fn write_question<O: Write>(
    output: &mut O,
    quiz: &Quiz,
    session: &QuizSession<'_>,
    index: usize,
) -> Result<()> {
    let (answered, total) = session.progress();
    let question = &quiz.questions[index];
    writeln!(output, "[{}/{}] {}", answered + 1, total, question.prompt)?;
    for (i, choice) in question.choices.iter().enumerate() {
        writeln!(output, "  {}. {}", i + 1, choice.text)?;
    }
    Ok(())
}

/// Prints a result profile.
pub fn write_result<O: Write>(
    output: &mut O,
    result: &PersonalityType,
) -> Result<()> {
    writeln!(output, "당신의 연애 유형: {}", result.name)?;
    writeln!(output, "{}", result.summary)?;
    if !result.pros.is_empty() {
        writeln!(output, "장점:")?;
        for pro in &result.pros {
            writeln!(output, "  - {pro}")?;
        }
    }
    if !result.cons.is_empty() {
        writeln!(output, "단점: {}", result.cons)?;
    }
    if !result.opening_lines.is_empty() {
        writeln!(output, "추천 첫마디:")?;
        for line in &result.opening_lines {
            writeln!(output, "  - {line}")?;
        }
    }
    if !result.date_courses.is_empty() {
        writeln!(output, "추천 데이트 코스:")?;
        for course in &result.date_courses {
            writeln!(output, "  - {course}")?;
        }
    }
    Ok(())
}

/// Answers every question from `answers` (0-based choice indexes), printing
/// each reaction, then the result.
pub fn run_quiz_scripted<O: Write>(
    quiz: &Quiz,
    answers: &[usize],
    mut output: O,
) -> Result<()> {
    let mut session = QuizSession::new(quiz);

    for &choice in answers {
        let question = session.current_question();
        let reaction = session
            .answer(choice)
            .with_context(|| format!("Answer {choice} rejected at question {question:?}"))?;
        writeln!(output, "{reaction}")?;
    }

    match session.result() {
        Some(result) => write_result(&mut output, result),
        None => {
            let (answered, total) = session.progress();
            bail!("quiz incomplete: {answered} of {total} questions answered")
        }
    }
}

/// Interactive quiz on a line-based terminal.
///
/// Each line is a 1-based choice number, `b` to go back, `r` to restart or
/// `q` to quit. Returns `true` when a result was shown.
pub fn run_quiz_interactive<I, O>(
    quiz: &Quiz,
    input: I,
    mut output: O,
) -> Result<bool>
where
    I: BufRead,
    O: Write,
{
    let mut session = QuizSession::new(quiz);
    let mut lines = input.lines();

    writeln!(output, "{}", quiz.title)?;
    while let Some(index) = session.current_question() {
        write_question(&mut output, quiz, &session, index)?;
        output.flush()?;

        let Some(line) = lines.next() else {
            return Ok(false);
        };
        let line = line.context("Failed to read quiz input")?;

        match line.trim() {
            "q" => return Ok(false),
            "b" => {
                if !session.go_back() {
                    writeln!(output, "첫 번째 질문이에요.")?;
                }
            }
            "r" => session.restart(),
            other => match other.parse::<usize>() {
                Ok(number) if number >= 1 => match session.answer(number - 1) {
                    Ok(reaction) => writeln!(output, "{reaction}")?,
                    Err(QuizError::ChoiceOutOfRange { available, .. }) => {
                        writeln!(output, "1부터 {available} 사이의 번호를 입력해 주세요.")?
                    }
                    Err(e) => return Err(e.into()),
                },
                _ => writeln!(output, "번호, b(뒤로), r(처음부터), q(종료) 중 하나를 입력해 주세요.")?,
            },
        }
    }

    if let Some(result) = session.result() {
        write_result(&mut output, result)?;
    }
    Ok(true)
}
