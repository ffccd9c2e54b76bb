//! TOML data files.
//!
//! | File | Directory | Model |
//! |------|-----------|-------|
//! | policy | `policies/` | [`PayrollPolicy`], brackets read from the CSV it names |
//! | persona | `personas/` | [`Persona`] |
//! | quiz | `quiz/` | [`Quiz`] |

use std::fs::{self, File};
use std::path::{Path, PathBuf};

use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::{debug, info};
use widget_core::calculations::TaxEstimationStrategy;
use widget_core::{PayrollPolicy, Persona, Quiz, RateTable};

use crate::{BracketLoader, DataLoadError};

/// On-disk shape of a policy. `brackets` is resolved against the policy
/// file's directory.
#[derive(Debug, Clone, Deserialize)]
pub struct PolicyFile {
    pub name: String,
    pub year: i32,
    pub brackets: PathBuf,
    pub rates: RateTable,
    #[serde(default)]
    pub strategy: TaxEstimationStrategy,
}

/// Every data file found under one directory.
#[derive(Debug, Clone, Default)]
pub struct DataSet {
    pub policies: Vec<PayrollPolicy>,
    pub personas: Vec<Persona>,
    pub quizzes: Vec<Quiz>,
}

/// The data directory shipped with this crate.
pub fn bundled_data_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("data")
}

fn read_to_string(path: &Path) -> Result<String, DataLoadError> {
    fs::read_to_string(path).map_err(|source| DataLoadError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn parse_toml<T: DeserializeOwned>(
    text: &str,
    path: &Path,
) -> Result<T, DataLoadError> {
    toml::from_str(text).map_err(|source| DataLoadError::Toml {
        path: path.to_path_buf(),
        source,
    })
}

/// Loads a policy file and the bracket CSV it points to.
pub fn load_policy(path: &Path) -> Result<PayrollPolicy, DataLoadError> {
    let file: PolicyFile = parse_toml(&read_to_string(path)?, path)?;

    file.rates
        .validate()
        .map_err(|source| DataLoadError::Rates {
            path: path.to_path_buf(),
            source,
        })?;

    let csv_path = path
        .parent()
        .unwrap_or_else(|| Path::new("."))
        .join(&file.brackets);
    let reader = File::open(&csv_path).map_err(|source| DataLoadError::Io {
        path: csv_path.clone(),
        source,
    })?;
    let brackets = BracketLoader::load(reader).map_err(|source| DataLoadError::Brackets {
        path: csv_path.clone(),
        source,
    })?;

    info!(
        policy = %file.name,
        year = file.year,
        brackets = brackets.len(),
        "loaded payroll policy"
    );

    Ok(PayrollPolicy {
        name: file.name,
        year: file.year,
        rates: file.rates,
        brackets,
        strategy: file.strategy,
    })
}

/// Parses and validates persona TOML. `path` is only used in errors.
pub fn parse_persona(
    text: &str,
    path: &Path,
) -> Result<Persona, DataLoadError> {
    let persona: Persona = parse_toml(text, path)?;
    persona.validate().map_err(|source| DataLoadError::Persona {
        path: path.to_path_buf(),
        source,
    })
}

pub fn load_persona(path: &Path) -> Result<Persona, DataLoadError> {
    let persona = parse_persona(&read_to_string(path)?, path)?;
    info!(persona = %persona.id, rules = persona.rules.len(), "loaded persona");
    Ok(persona)
}

/// Parses and validates quiz TOML. `path` is only used in errors.
pub fn parse_quiz(
    text: &str,
    path: &Path,
) -> Result<Quiz, DataLoadError> {
    let quiz: Quiz = parse_toml(text, path)?;
    quiz.validate().map_err(|source| DataLoadError::Quiz {
        path: path.to_path_buf(),
        source,
    })
}

pub fn load_quiz(path: &Path) -> Result<Quiz, DataLoadError> {
    let quiz = parse_quiz(&read_to_string(path)?, path)?;
    info!(
        quiz = %quiz.title,
        questions = quiz.questions.len(),
        "loaded quiz"
    );
    Ok(quiz)
}

/// `*.toml` files directly inside `dir`, sorted by name. A missing
/// directory yields nothing.
fn toml_files(dir: &Path) -> Result<Vec<PathBuf>, DataLoadError> {
    if !dir.is_dir() {
        debug!(dir = %dir.display(), "data directory absent, skipping");
        return Ok(Vec::new());
    }

    let entries = fs::read_dir(dir).map_err(|source| DataLoadError::Io {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|source| DataLoadError::Io {
            path: dir.to_path_buf(),
            source,
        })?;
        let path = entry.path();
        if path.extension().is_some_and(|ext| ext == "toml") {
            files.push(path);
        }
    }
    files.sort();

    Ok(files)
}

/// Loads every policy, persona and quiz under `dir`.
pub fn load_data_dir(dir: &Path) -> Result<DataSet, DataLoadError> {
    let mut data = DataSet::default();

    for path in toml_files(&dir.join("policies"))? {
        data.policies.push(load_policy(&path)?);
    }
    for path in toml_files(&dir.join("personas"))? {
        data.personas.push(load_persona(&path)?);
    }
    for path in toml_files(&dir.join("quiz"))? {
        data.quizzes.push(load_quiz(&path)?);
    }

    Ok(data)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use widget_core::{PersonaError, QuizError};

    use super::*;

    const INLINE: &str = "inline.toml";

    #[test]
    fn parse_persona_normalizes_keywords() {
        let text = r#"
id = "test"
name = "테스트"

[[rules]]
keywords = ["  HELLO ", "안녕"]
response = "hi"
"#;

        let persona = parse_persona(text, Path::new(INLINE)).unwrap();

        assert_eq!(persona.rules[0].keywords, vec!["hello", "안녕"]);
        assert_eq!(persona.rules[0].weight, 1);
        assert!(persona.fallback_responses.is_empty());
    }

    #[test]
    fn parse_persona_reports_validation_error_with_path() {
        let text = r#"
id = "broken"
name = "broken"

[[rules]]
keywords = ["a"]
response = "b"
weight = 0
"#;

        let err = parse_persona(text, Path::new(INLINE)).unwrap_err();

        let DataLoadError::Persona { path, source } = &err else {
            panic!("Expected Persona error, got: {:?}", err);
        };
        assert_eq!(path.as_path(), Path::new(INLINE));
        assert_eq!(
            source,
            &PersonaError::ZeroWeight {
                persona: "broken".to_string(),
                rule: 0,
            }
        );
        assert!(err.to_string().contains("inline.toml"));
    }

    #[test]
    fn parse_persona_rejects_malformed_toml() {
        let err = parse_persona("id = ", Path::new(INLINE)).unwrap_err();

        assert!(matches!(err, DataLoadError::Toml { .. }));
    }

    #[test]
    fn parse_quiz_rejects_unknown_score_key() {
        let text = r#"
title = "t"

[[types]]
key = "typeA"
name = "A"
summary = "a"

[[questions]]
prompt = "q"

[[questions.choices]]
text = "c"
reaction = "r"
scores = { typeB = 1 }
"#;

        let err = parse_quiz(text, Path::new(INLINE)).unwrap_err();

        let DataLoadError::Quiz { source, .. } = err else {
            panic!("Expected Quiz error");
        };
        assert_eq!(
            source,
            QuizError::UnknownType {
                question: 0,
                choice: 0,
                key: "typeB".to_string(),
            }
        );
    }

    #[test]
    fn load_policy_reports_missing_file() {
        let err = load_policy(Path::new("/nonexistent/policy.toml")).unwrap_err();

        assert!(matches!(err, DataLoadError::Io { .. }));
    }

    #[test]
    fn toml_files_of_missing_dir_is_empty() {
        let files = toml_files(Path::new("/nonexistent/widgets")).unwrap();

        assert!(files.is_empty());
    }
}
