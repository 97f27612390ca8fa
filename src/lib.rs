pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use adapters::openai::OpenAiTextGenerator;
pub use config::{cli::LocalStorage, CliConfig, FileConfig};
pub use core::engine::GeneratorEngine;
pub use domain::model::{Mode, Puzzle};
pub use utils::error::{GenError, Result};
