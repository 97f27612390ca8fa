use crate::core::clues::ClueSource;
use crate::core::words::WordSource;
use crate::core::{grid, numbering, placement};
use crate::domain::model::{ClueMap, Dimensions, PlacementEntry, Puzzle, GRID_SIZE};
use crate::domain::ports::{GeneratorConfig, TextGenerator};
use crate::utils::error::{GenError, Result};
use crate::utils::retry::RetryPolicy;
use std::time::Duration;

/// Composes the full pipeline for one theme: words, placement, grid,
/// clues, numbering. Owns the retry policy for both provider calls; the
/// sources themselves perform exactly one round-trip per call.
pub struct PuzzleAssembler<'a, G: TextGenerator, C: GeneratorConfig> {
    provider: &'a G,
    config: &'a C,
    policy: RetryPolicy,
}

impl<'a, G: TextGenerator, C: GeneratorConfig> PuzzleAssembler<'a, G, C> {
    pub fn new(provider: &'a G, config: &'a C) -> Self {
        let policy = RetryPolicy::new(
            config.retry_attempts(),
            Duration::from_millis(config.retry_delay_ms()),
        );
        Self {
            provider,
            config,
            policy,
        }
    }

    pub async fn assemble(&self, theme: &str) -> Result<Puzzle> {
        let min_placed = self.config.min_placed_words();
        let mut last_placed = 0;

        // When placement comes up short the whole word set is re-fetched
        // with a larger request; committed placements are never reworked.
        for round in 0..=self.config.pipeline_retries() {
            let words = self.acquire_words(theme, round).await?;
            let placements = placement::place(&words, GRID_SIZE);
            tracing::info!(
                "Placed {} of {} candidates for theme '{}'",
                placements.len(),
                words.len(),
                theme
            );

            if placements.len() >= min_placed {
                return self.finish(theme, words, placements).await;
            }

            last_placed = placements.len();
            tracing::warn!(
                "Only {} words placed (need {}), refetching a larger candidate set",
                placements.len(),
                min_placed
            );
        }

        Err(GenError::PlacementExhausted {
            placed: last_placed,
            needed: min_placed,
        })
    }

    async fn acquire_words(&self, theme: &str, round: u32) -> Result<Vec<String>> {
        let source = WordSource::new(
            self.provider,
            self.config.min_usable_words(),
            self.config.max_output_tokens(),
        );
        let base = self.config.words_requested();
        let step = self.config.word_count_step();

        self.policy
            .run("word acquisition", |attempt| {
                let count = base + (round as usize + attempt as usize) * step;
                let source = &source;
                async move { source.fetch_candidates(theme, count).await }
            })
            .await
    }

    async fn finish(
        &self,
        theme: &str,
        words: Vec<String>,
        placements: Vec<PlacementEntry>,
    ) -> Result<Puzzle> {
        let rendered = grid::render(&placements, GRID_SIZE)?;

        let placed_words: Vec<String> = placements.iter().map(|p| p.word.clone()).collect();
        let clues = self.acquire_clues(&placed_words).await;

        let (clues_across, clues_down) = numbering::index(&placements, &rendered, &clues);

        Ok(Puzzle {
            theme: theme.to_string(),
            words_sent: words,
            dimensions: Dimensions::default(),
            placed_words: placements,
            grid: rendered,
            clues,
            clues_across,
            clues_down,
        })
    }

    /// Clue failures never roll back placement: a puzzle with thin clue
    /// coverage beats no puzzle at all, so after the retry budget we fall
    /// back to empty lists for every placed word.
    async fn acquire_clues(&self, placed_words: &[String]) -> ClueMap {
        let source = ClueSource::new(self.provider, self.config.max_output_tokens());

        let result = self
            .policy
            .run("clue acquisition", |_attempt| {
                let source = &source;
                async move { source.fetch_clues(placed_words).await }
            })
            .await;

        match result {
            Ok(map) => map,
            Err(e) => {
                tracing::warn!("Clue acquisition failed ({}); assembling without clues", e);
                placed_words
                    .iter()
                    .map(|w| (w.clone(), Vec::new()))
                    .collect()
            }
        }
    }
}
