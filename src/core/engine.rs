use crate::core::assembler::PuzzleAssembler;
use crate::core::themes;
use crate::domain::model::{Mode, Puzzle};
use crate::domain::ports::{GeneratorConfig, Storage, TextGenerator};
use crate::utils::error::Result;
use chrono::{Local, NaiveDate};

/// Name of the convenience artifact holding whatever was generated last,
/// regardless of mode.
pub const LATEST_ARTIFACT: &str = "latest_crossword.json";

/// Runs the generation pipeline for one mode and persists the artifact.
/// Each run is stateless and independent; a failed run writes nothing, so
/// the previous day's artifact stays untouched.
pub struct GeneratorEngine<'a, G: TextGenerator, S: Storage, C: GeneratorConfig> {
    provider: &'a G,
    storage: &'a S,
    config: &'a C,
}

impl<'a, G: TextGenerator, S: Storage, C: GeneratorConfig> GeneratorEngine<'a, G, S, C> {
    pub fn new(provider: &'a G, storage: &'a S, config: &'a C) -> Self {
        Self {
            provider,
            storage,
            config,
        }
    }

    /// One full generation run keyed to today's date.
    pub async fn run(&self, mode: Mode, theme_override: Option<&str>) -> Result<String> {
        self.run_for_date(mode, Local::now().date_naive(), theme_override)
            .await
    }

    /// Date-explicit variant so rotation stays a pure function of the
    /// calendar day.
    pub async fn run_for_date(
        &self,
        mode: Mode,
        date: NaiveDate,
        theme_override: Option<&str>,
    ) -> Result<String> {
        let theme = themes::select(self.config.theme_catalog(), date, theme_override)?;
        tracing::info!("Generating {} puzzle with theme '{}'", mode.label(), theme);

        let assembler = PuzzleAssembler::new(self.provider, self.config);
        let puzzle = assembler.assemble(&theme).await?;

        self.persist(mode, &puzzle).await?;
        tracing::info!(
            "{} puzzle stored: {} placed words, {} across / {} down clues",
            mode.label(),
            puzzle.placed_words.len(),
            puzzle.clues_across.len(),
            puzzle.clues_down.len()
        );

        Ok(mode.artifact_name().to_string())
    }

    /// Sequential independent runs, one per requested mode. The first
    /// failure aborts; earlier successful artifacts are already persisted.
    pub async fn run_all(&self, modes: &[Mode], theme_override: Option<&str>) -> Result<Vec<String>> {
        let mut artifacts = Vec::with_capacity(modes.len());
        for mode in modes {
            artifacts.push(self.run(*mode, theme_override).await?);
        }
        Ok(artifacts)
    }

    async fn persist(&self, mode: Mode, puzzle: &Puzzle) -> Result<()> {
        let json = serde_json::to_vec_pretty(puzzle)?;
        self.storage.write_file(mode.artifact_name(), &json).await?;
        self.storage.write_file(LATEST_ARTIFACT, &json).await?;
        Ok(())
    }
}
