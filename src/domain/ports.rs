use crate::utils::error::Result;
use async_trait::async_trait;

/// The language-model capability behind word and clue acquisition. All
/// parsing of the returned free-form text happens on our side of this
/// boundary, so providers can be swapped without touching placement logic.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate_text(&self, prompt: &str, max_output_tokens: usize) -> Result<String>;
}

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait GeneratorConfig: Send + Sync {
    /// How many candidate words to request from the provider on the first
    /// attempt. Deliberately oversupplied relative to what a 5x5 grid holds.
    fn words_requested(&self) -> usize;

    /// Extra words requested per retry attempt.
    fn word_count_step(&self) -> usize;

    /// Minimum candidates that must survive filtering for a fetch to count.
    fn min_usable_words(&self) -> usize;

    /// Minimum placed words for a puzzle to be a valid product.
    fn min_placed_words(&self) -> usize;

    /// Provider round-trip retry budget.
    fn retry_attempts(&self) -> u32;

    fn retry_delay_ms(&self) -> u64;

    /// Whole-pipeline retries when placement comes up short.
    fn pipeline_retries(&self) -> u32;

    fn request_timeout_secs(&self) -> u64;

    fn max_output_tokens(&self) -> usize;

    fn theme_catalog(&self) -> &[String];

    fn output_path(&self) -> &str;

    fn api_base(&self) -> &str;

    fn model(&self) -> &str;
}
