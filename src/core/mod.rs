pub mod assembler;
pub mod clues;
pub mod engine;
pub mod grid;
pub mod numbering;
pub mod placement;
pub mod themes;
pub mod words;

pub use crate::domain::model::{ClueMap, Grid, Mode, Orientation, PlacementEntry, Puzzle};
pub use crate::domain::ports::{GeneratorConfig, Storage, TextGenerator};
pub use crate::utils::error::Result;
