//! Configuration module.

mod project;
mod settings;

pub use project::*;
pub use settings::*;
