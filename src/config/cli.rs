use crate::core::themes;
use crate::domain::model::Mode;
use crate::domain::ports::{GeneratorConfig, Storage};
use crate::utils::error::Result;
use crate::utils::validation::{
    validate_non_empty_list, validate_positive_number, validate_range, validate_url, Validate,
};
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "crosswars-gen")]
#[command(about = "Generates the daily 5x5 themed crossword puzzles")]
pub struct CliConfig {
    #[arg(long, value_enum, help = "Generate only this mode (default: both)")]
    pub mode: Option<Mode>,

    #[arg(long, help = "Theme override, bypassing the daily rotation")]
    pub theme: Option<String>,

    #[arg(long, help = "Path to a TOML config file")]
    pub config: Option<String>,

    #[arg(long, default_value = "./output")]
    pub output_path: String,

    #[arg(long, value_delimiter = ',', help = "Theme rotation catalog")]
    pub themes: Vec<String>,

    #[arg(long, default_value = "https://api.openai.com")]
    pub api_base: String,

    #[arg(long, help = "Provider API key (falls back to OPENAI_API_KEY)")]
    pub api_key: Option<String>,

    #[arg(long, default_value = "gpt-4o-mini")]
    pub model: String,

    #[arg(long, default_value = "16")]
    pub words_requested: usize,

    #[arg(long, default_value = "4")]
    pub word_count_step: usize,

    #[arg(long, default_value = "6")]
    pub min_usable_words: usize,

    #[arg(long, default_value = "4")]
    pub min_placed_words: usize,

    #[arg(long, default_value = "3")]
    pub retry_attempts: u32,

    #[arg(long, default_value = "500")]
    pub retry_delay_ms: u64,

    #[arg(long, default_value = "2")]
    pub pipeline_retries: u32,

    #[arg(long, default_value = "30")]
    pub request_timeout_secs: u64,

    #[arg(long, default_value = "1500")]
    pub max_output_tokens: usize,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl CliConfig {
    /// Fills the built-in theme catalog when none was given on the command
    /// line; clap's default_value does not compose with value_delimiter
    /// lists.
    pub fn with_default_themes(mut self) -> Self {
        if self.themes.is_empty() {
            self.themes = themes::default_catalog();
        }
        self
    }

    pub fn modes(&self) -> Vec<Mode> {
        match self.mode {
            Some(mode) => vec![mode],
            None => vec![Mode::Solo, Mode::Battle],
        }
    }
}

impl GeneratorConfig for CliConfig {
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

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_url("api_base", &self.api_base)?;
        validate_non_empty_list("themes", &self.themes)?;
        validate_positive_number("words_requested", self.words_requested, 1)?;
        validate_positive_number("min_usable_words", self.min_usable_words, 1)?;
        validate_positive_number("min_placed_words", self.min_placed_words, 2)?;
        validate_range("retry_attempts", self.retry_attempts, 1, 10)?;
        validate_range("request_timeout_secs", self.request_timeout_secs, 1, 300)?;
        validate_positive_number("max_output_tokens", self.max_output_tokens, 100)?;
        Ok(())
    }
}

/// Filesystem-backed artifact storage rooted at a base directory.
#[derive(Debug, Clone)]
pub struct LocalStorage {
    base_path: String,
}

impl LocalStorage {
    pub fn new(base_path: String) -> Self {
        Self { base_path }
    }
}

impl Storage for LocalStorage {
    async fn read_file(&self, path: &str) -> Result<Vec<u8>> {
        let full_path = Path::new(&self.base_path).join(path);
        let data = fs::read(full_path)?;
        Ok(data)
    }

    async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
        let full_path = Path::new(&self.base_path).join(path);

        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent)?;
        }

        fs::write(full_path, data)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_config() -> CliConfig {
        CliConfig::parse_from(["crosswars-gen"]).with_default_themes()
    }

    #[test]
    fn test_defaults_validate() {
        assert!(base_config().validate().is_ok());
    }

    #[test]
    fn test_empty_theme_catalog_fails_validation() {
        let config = CliConfig::parse_from(["crosswars-gen"]);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_bad_api_base_fails_validation() {
        let mut config = base_config();
        config.api_base = "not-a-url".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_modes_default_to_both() {
        let config = base_config();
        assert_eq!(config.modes(), vec![Mode::Solo, Mode::Battle]);

        let solo_only = CliConfig::parse_from(["crosswars-gen", "--mode", "solo"]);
        assert_eq!(solo_only.modes(), vec![Mode::Solo]);
    }

    #[tokio::test]
    async fn test_local_storage_round_trip() {
        let dir = tempfile::TempDir::new().unwrap();
        let storage = LocalStorage::new(dir.path().to_str().unwrap().to_string());

        storage.write_file("solo_play.json", b"{}").await.unwrap();
        let data = storage.read_file("solo_play.json").await.unwrap();
        assert_eq!(data, b"{}");
    }
}
