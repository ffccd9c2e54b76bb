pub mod calculations;
pub mod chat;
pub mod models;
pub mod presets;
pub mod quiz;

pub use models::*;
