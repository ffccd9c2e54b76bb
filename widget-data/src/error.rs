use std::path::PathBuf;

use thiserror::Error;
use widget_core::{PersonaError, QuizError, RateTableError};

use crate::BracketLoaderError;

/// Errors raised while reading a data file, tagged with the file involved.
#[derive(Debug, Error)]
pub enum DataLoadError {
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {}: {source}", .path.display())]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("bad bracket file {}: {source}", .path.display())]
    Brackets {
        path: PathBuf,
        #[source]
        source: BracketLoaderError,
    },

    #[error("bad rates in {}: {source}", .path.display())]
    Rates {
        path: PathBuf,
        #[source]
        source: RateTableError,
    },

    #[error("bad persona in {}: {source}", .path.display())]
    Persona {
        path: PathBuf,
        #[source]
        source: PersonaError,
    },

    #[error("bad quiz in {}: {source}", .path.display())]
    Quiz {
        path: PathBuf,
        #[source]
        source: QuizError,
    },
}
