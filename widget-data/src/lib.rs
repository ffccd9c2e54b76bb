//! Loaders for the CSV and TOML files that configure the widgets.

mod bracket_loader;
mod config;
mod error;

pub use bracket_loader::{BracketLoader, BracketLoaderError, BracketRecord};
pub use config::{
    DataSet, PolicyFile, bundled_data_dir, load_data_dir, load_persona, load_policy, load_quiz,
    parse_persona, parse_quiz,
};
pub use error::DataLoadError;
