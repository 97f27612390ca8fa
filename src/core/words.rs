use crate::domain::ports::TextGenerator;
use crate::utils::error::{GenError, Result};
use regex::Regex;
use std::collections::HashSet;
use std::sync::OnceLock;

pub const MIN_WORD_LEN: usize = 3;
pub const MAX_WORD_LEN: usize = 5;

/// Fetches and sanitizes candidate words for a theme. Performs exactly one
/// provider round-trip per call; the retry budget lives with the assembler.
pub struct WordSource<'a, G: TextGenerator> {
    provider: &'a G,
    min_usable: usize,
    max_output_tokens: usize,
}

impl<'a, G: TextGenerator> WordSource<'a, G> {
    pub fn new(provider: &'a G, min_usable: usize, max_output_tokens: usize) -> Self {
        Self {
            provider,
            min_usable,
            max_output_tokens,
        }
    }

    pub async fn fetch_candidates(&self, theme: &str, count_requested: usize) -> Result<Vec<String>> {
        let prompt = word_prompt(theme, count_requested);
        tracing::debug!("Requesting {} candidate words for theme '{}'", count_requested, theme);

        let raw = self
            .provider
            .generate_text(&prompt, self.max_output_tokens)
            .await?;

        let parsed = parse_word_list(&raw);
        let filtered = filter_candidates(parsed);
        tracing::debug!("{} candidates survived filtering", filtered.len());

        if filtered.len() < self.min_usable {
            return Err(GenError::InsufficientWords {
                got: filtered.len(),
                needed: self.min_usable,
            });
        }

        Ok(filtered.into_iter().take(count_requested).collect())
    }
}

fn word_prompt(theme: &str, count: usize) -> String {
    format!(
        "Return a JSON array (e.g. [\"ATOM\",\"STAR\",\"RAIN\"]) of up to {count} \
         single-word terms related to the theme \"{theme}\".\n\
         IMPORTANT RULES:\n\
         - ALL words must be 3 to 5 letters long\n\
         - Prefer words with common letters like A, E, I, O, R, S, T, N\n\
         - Use simple, common words that are easy to crossword\n\
         - Return ONLY the JSON array with no commentary or explanations"
    )
}

/// Pulls a word list out of free-form provider text. Tries strict JSON
/// first, then a JSON array embedded in surrounding prose, then falls back
/// to splitting on separators and stripping non-letters.
pub fn parse_word_list(raw: &str) -> Vec<String> {
    let text = raw.trim();

    if let Some(words) = parse_json_words(text) {
        return words;
    }

    static ARRAY_RE: OnceLock<Regex> = OnceLock::new();
    let re = ARRAY_RE.get_or_init(|| Regex::new(r"(?s)(\[.*\])").expect("static regex"));
    if let Some(caps) = re.captures(text) {
        if let Some(words) = parse_json_words(&caps[1]) {
            return words;
        }
    }

    static SPLIT_RE: OnceLock<Regex> = OnceLock::new();
    let split = SPLIT_RE.get_or_init(|| Regex::new(r"[,\n\r;]+").expect("static regex"));
    split
        .split(text)
        .map(|token| {
            token
                .chars()
                .filter(|c| c.is_ascii_alphabetic())
                .collect::<String>()
        })
        .filter(|token| !token.is_empty())
        .collect()
}

fn parse_json_words(text: &str) -> Option<Vec<String>> {
    let value: serde_json::Value = serde_json::from_str(text).ok()?;
    let items = value.as_array()?;
    Some(
        items
            .iter()
            .filter_map(|item| match item {
                serde_json::Value::String(s) => Some(s.trim().to_string()),
                _ => None,
            })
            .collect(),
    )
}

/// The acceptance policy for raw candidates, applied in order: alphabetic
/// only, uppercased, length 3..=5, de-duplicated preserving first-seen
/// order. Idempotent: filtering an already-filtered list changes nothing.
pub fn filter_candidates(raw: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut accepted = Vec::new();

    for word in raw {
        if word.is_empty() || !word.chars().all(|c| c.is_ascii_alphabetic()) {
            continue;
        }
        let upper = word.to_ascii_uppercase();
        if upper.len() < MIN_WORD_LEN || upper.len() > MAX_WORD_LEN {
            continue;
        }
        if seen.insert(upper.clone()) {
            accepted.push(upper);
        }
    }

    accepted
}
