//! Integration tests that load the shipped data directory.

use std::path::PathBuf;

use pretty_assertions::assert_eq;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rust_decimal_macros::dec;
use widget_core::calculations::common::round_won;
use widget_core::chat::{ChatSession, SelectionKind};
use widget_core::quiz::QuizSession;
use widget_core::{EstimateInput, presets};
use widget_data::{bundled_data_dir, load_data_dir, load_persona, load_policy, load_quiz};

fn data_file(relative: &str) -> PathBuf {
    bundled_data_dir().join(relative)
}

#[test]
fn test_load_entire_data_dir() {
    let data = load_data_dir(&bundled_data_dir()).expect("Failed to load data dir");

    assert_eq!(data.policies.len(), 2);
    assert_eq!(data.personas.len(), 2);
    assert_eq!(data.quizzes.len(), 1);
}

#[test]
fn test_policy_files_match_presets() {
    let annual = load_policy(&data_file("policies/annual_2025.toml")).expect("annual policy");
    let monthly =
        load_policy(&data_file("policies/monthly_simplified.toml")).expect("monthly policy");

    assert_eq!(annual, presets::annual_2025());
    assert_eq!(monthly, presets::monthly_simplified());
}

#[test]
fn test_monthly_policy_reference_estimate() {
    let policy =
        load_policy(&data_file("policies/monthly_simplified.toml")).expect("monthly policy");

    let result = policy.estimator().estimate(&EstimateInput::default());

    assert_eq!(round_won(result.gross_monthly), dec!(4166667));
    assert_eq!(round_won(result.taxable_monthly), dec!(3966667));
    assert_eq!(round_won(result.pension_monthly), dec!(188417));
    assert_eq!(round_won(result.health_monthly), dec!(142602));
    assert_eq!(round_won(result.long_term_care_monthly), dec!(18738));
    assert_eq!(round_won(result.employment_monthly), dec!(35700));
    assert_eq!(round_won(result.income_tax_monthly), dec!(177000));
    assert_eq!(round_won(result.local_income_tax_monthly), dec!(17700));
    assert_eq!(round_won(result.total_deduction_monthly), dec!(580156));
    assert_eq!(round_won(result.net_monthly), dec!(3586510));
}

#[test]
fn test_haru_persona_conversation() {
    let persona = load_persona(&data_file("personas/haru.toml")).expect("haru persona");
    let mut session = ChatSession::new(&persona);
    let mut rng = StdRng::seed_from_u64(7);

    let hello = session.respond("안녕하세요", &mut rng);
    assert_eq!(hello.response, "안녕! 반가워. 오늘 기분은 어때?");

    // The greeting is still in the window, but the weighted rule wins.
    let tired = session.respond("오늘 너무 피곤해", &mut rng);
    assert_eq!(
        tired.response,
        "많이 힘들었구나. 오늘은 일찍 푹 쉬는 건 어때?"
    );
    assert!(matches!(tired.kind, SelectionKind::Rule { index: 1, score: 2 }));
}

#[test]
fn test_haru_changes_topic_on_second_miss_at_default_threshold() {
    let persona = load_persona(&data_file("personas/haru.toml")).expect("haru persona");
    let mut session = ChatSession::new(&persona);
    let mut rng = StdRng::seed_from_u64(1);

    let first = session.respond("zzz", &mut rng);
    let second = session.respond("qqq", &mut rng);

    assert_eq!(first.kind, SelectionKind::Fallback);
    assert!(persona.fallback_responses.contains(&first.response));
    assert_eq!(second.kind, SelectionKind::TopicChange);
    assert!(persona.topic_change_responses.contains(&second.response));
    assert_eq!(session.state().consecutive_fallbacks(), 0);
}

#[test]
fn test_minjun_changes_topic_on_third_consecutive_miss() {
    let persona = load_persona(&data_file("personas/minjun.toml")).expect("minjun persona");
    let mut session = ChatSession::new(&persona);
    let mut rng = StdRng::seed_from_u64(5);

    let kinds: Vec<_> = ["zzz", "qqq", "xxx", "www"]
        .into_iter()
        .map(|text| session.respond(text, &mut rng).kind)
        .collect();

    assert_eq!(persona.threshold(), 3);
    assert_eq!(
        kinds,
        vec![
            SelectionKind::Fallback,
            SelectionKind::Fallback,
            SelectionKind::TopicChange,
            SelectionKind::Fallback,
        ]
    );
    assert_eq!(session.state().consecutive_fallbacks(), 1);
}

#[test]
fn test_dating_quiz_paths() {
    let quiz = load_quiz(&data_file("quiz/dating.toml")).expect("dating quiz");
    assert_eq!(quiz.types.len(), 6);
    assert_eq!(quiz.questions.len(), 10);

    let expected = [(0, "typeA"), (1, "typeB"), (2, "typeF")];
    for (choice, key) in expected {
        let mut session = QuizSession::new(&quiz);
        for _ in 0..quiz.questions.len() {
            session.answer(choice).expect("valid answer");
        }

        let result = session.result().expect("quiz finished");
        assert_eq!(result.key, key, "always choosing {choice}");
    }
}
