use crate::core::themes;
use crate::domain::ports::GeneratorConfig;
use crate::utils::error::Result;
use crate::utils::validation::{
    validate_non_empty_list, validate_non_empty_string, validate_positive_number, validate_range,
    validate_url, Validate,
};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// File-based configuration for unattended (scheduled) runs. Every field
/// is optional; omitted values fall back to the same defaults the CLI
/// flags carry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileConfig {
    pub provider: Option<ProviderSection>,
    pub generation: Option<GenerationSection>,
    pub output: Option<OutputSection>,
    pub themes: Option<Vec<String>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderSection {
    pub api_base: Option<String>,
    pub model: Option<String>,
    pub request_timeout_secs: Option<u64>,
    pub max_output_tokens: Option<usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationSection {
    pub words_requested: Option<usize>,
    pub word_count_step: Option<usize>,
    pub min_usable_words: Option<usize>,
    pub min_placed_words: Option<usize>,
    pub retry_attempts: Option<u32>,
    pub retry_delay_ms: Option<u64>,
    pub pipeline_retries: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputSection {
    pub path: Option<String>,
}

/// `FileConfig` with every fallback applied, ready to drive a run.
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub api_base: String,
    pub model: String,
    pub request_timeout_secs: u64,
    pub max_output_tokens: usize,
    pub words_requested: usize,
    pub word_count_step: usize,
    pub min_usable_words: usize,
    pub min_placed_words: usize,
    pub retry_attempts: u32,
    pub retry_delay_ms: u64,
    pub pipeline_retries: u32,
    pub output_path: String,
    pub themes: Vec<String>,
}

impl FileConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    pub fn from_str(content: &str) -> Result<Self> {
        let config: FileConfig = toml::from_str(content)?;
        Ok(config)
    }

    pub fn resolve(self) -> ResolvedConfig {
        let provider = self.provider.unwrap_or(ProviderSection {
            api_base: None,
            model: None,
            request_timeout_secs: None,
            max_output_tokens: None,
        });
        let generation = self.generation.unwrap_or(GenerationSection {
            words_requested: None,
            word_count_step: None,
            min_usable_words: None,
            min_placed_words: None,
            retry_attempts: None,
            retry_delay_ms: None,
            pipeline_retries: None,
        });

        ResolvedConfig {
            api_base: provider
                .api_base
                .unwrap_or_else(|| "https://api.openai.com".to_string()),
            model: provider.model.unwrap_or_else(|| "gpt-4o-mini".to_string()),
            request_timeout_secs: provider.request_timeout_secs.unwrap_or(30),
            max_output_tokens: provider.max_output_tokens.unwrap_or(1500),
            words_requested: generation.words_requested.unwrap_or(16),
            word_count_step: generation.word_count_step.unwrap_or(4),
            min_usable_words: generation.min_usable_words.unwrap_or(6),
            min_placed_words: generation.min_placed_words.unwrap_or(4),
            retry_attempts: generation.retry_attempts.unwrap_or(3),
            retry_delay_ms: generation.retry_delay_ms.unwrap_or(500),
            pipeline_retries: generation.pipeline_retries.unwrap_or(2),
            output_path: self
                .output
                .and_then(|o| o.path)
                .unwrap_or_else(|| "./output".to_string()),
            themes: self.themes.unwrap_or_else(themes::default_catalog),
        }
    }
}

impl GeneratorConfig for ResolvedConfig {
    fn words_requested(&self) -> usize {
        self.words_requested
    }

    fn word_count_step(&self) -> usize {
        self.word_count_step
    }

    fn min_usable_words(&self) -> usize {
        self.min_usable_words
    }

    fn min_placed_words(&self) -> usize {
        self.min_placed_words
    }

    fn retry_attempts(&self) -> u32 {
        self.retry_attempts
    }

    fn retry_delay_ms(&self) -> u64 {
        self.retry_delay_ms
    }

    fn pipeline_retries(&self) -> u32 {
        self.pipeline_retries
    }

    fn request_timeout_secs(&self) -> u64 {
        self.request_timeout_secs
    }

    fn max_output_tokens(&self) -> usize {
        self.max_output_tokens
    }

    fn theme_catalog(&self) -> &[String] {
        &self.themes
    }

    fn output_path(&self) -> &str {
        &self.output_path
    }

    fn api_base(&self) -> &str {
        &self.api_base
    }

    fn model(&self) -> &str {
        &self.model
    }
}

impl Validate for ResolvedConfig {
    fn validate(&self) -> Result<()> {
        validate_url("provider.api_base", &self.api_base)?;
        validate_non_empty_string("provider.model", &self.model)?;
        validate_non_empty_list("themes", &self.themes)?;
        validate_positive_number("generation.words_requested", self.words_requested, 1)?;
        validate_positive_number("generation.min_usable_words", self.min_usable_words, 1)?;
        validate_positive_number("generation.min_placed_words", self.min_placed_words, 2)?;
        validate_range("generation.retry_attempts", self.retry_attempts, 1, 10)?;
        validate_range(
            "provider.request_timeout_secs",
            self.request_timeout_secs,
            1,
            300,
        )?;
        Ok(())
    }
}
