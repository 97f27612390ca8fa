use crate::domain::model::ClueMap;
use crate::domain::ports::TextGenerator;
use crate::utils::error::Result;
use regex::Regex;
use std::sync::OnceLock;

/// Fetches clue texts for an accepted word list. The provider is
/// best-effort per word: words it skipped come back with an empty clue
/// list, which downstream treats as valid (thin) coverage, not a failure.
pub struct ClueSource<'a, G: TextGenerator> {
    provider: &'a G,
    max_output_tokens: usize,
}

impl<'a, G: TextGenerator> ClueSource<'a, G> {
    pub fn new(provider: &'a G, max_output_tokens: usize) -> Self {
        Self {
            provider,
            max_output_tokens,
        }
    }

    pub async fn fetch_clues(&self, words: &[String]) -> Result<ClueMap> {
        let prompt = clue_prompt(words);
        tracing::debug!("Requesting clues for {} words", words.len());

        let raw = self
            .provider
            .generate_text(&prompt, self.max_output_tokens)
            .await?;

        Ok(parse_clue_map(&raw, words))
    }
}

fn clue_prompt(words: &[String]) -> String {
    format!(
        "Write one short crossword clue for each of these words: {}.\n\
         Return ONLY a JSON object mapping each word to an array of clue \
         strings, e.g. {{\"SEA\": [\"Large body of salt water\"]}}. \
         No commentary.",
        words.join(", ")
    )
}

/// Extracts a word -> clues mapping from provider text. Every requested
/// word is present in the result; unmatched or unparsable words map to an
/// empty list rather than failing the run.
pub fn parse_clue_map(raw: &str, words: &[String]) -> ClueMap {
    let text = raw.trim();

    let parsed = parse_json_object(text).or_else(|| {
        static OBJECT_RE: OnceLock<Regex> = OnceLock::new();
        let re = OBJECT_RE.get_or_init(|| Regex::new(r"(?s)(\{.*\})").expect("static regex"));
        re.captures(text)
            .and_then(|caps| parse_json_object(&caps[1]))
    });

    let mut map = ClueMap::new();
    for word in words {
        let clues = parsed
            .as_ref()
            .and_then(|obj| lookup_word(obj, word))
            .unwrap_or_default();
        map.insert(word.clone(), clues);
    }

    if parsed.is_none() {
        tracing::warn!("Clue response was not parsable; continuing with empty clue coverage");
    }

    map
}

fn parse_json_object(text: &str) -> Option<serde_json::Map<String, serde_json::Value>> {
    match serde_json::from_str::<serde_json::Value>(text).ok()? {
        serde_json::Value::Object(obj) => Some(obj),
        _ => None,
    }
}

fn lookup_word(
    obj: &serde_json::Map<String, serde_json::Value>,
    word: &str,
) -> Option<Vec<String>> {
    let value = obj
        .iter()
        .find(|(key, _)| key.eq_ignore_ascii_case(word))
        .map(|(_, v)| v)?;

    match value {
        serde_json::Value::String(s) if !s.trim().is_empty() => Some(vec![s.trim().to_string()]),
        serde_json::Value::Array(items) => Some(
            items
                .iter()
                .filter_map(|item| item.as_str())
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect(),
        ),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::GenError;
    use async_trait::async_trait;

    struct CannedProvider {
        response: Result<String>,
    }

    #[async_trait]
    impl TextGenerator for CannedProvider {
        async fn generate_text(&self, _prompt: &str, _max_output_tokens: usize) -> Result<String> {
            match &self.response {
                Ok(s) => Ok(s.clone()),
                Err(_) => Err(GenError::ProviderUnavailable {
                    reason: "down".to_string(),
                }),
            }
        }
    }

    fn words(list: &[&str]) -> Vec<String> {
        list.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn test_parse_strict_json_object() {
        let raw = r#"{"SEA": ["Salty expanse"], "BOAT": ["Floats on water", "Rowed craft"]}"#;
        let map = parse_clue_map(raw, &words(&["SEA", "BOAT"]));
        assert_eq!(map["SEA"], vec!["Salty expanse"]);
        assert_eq!(map["BOAT"].len(), 2);
    }

    #[test]
    fn test_parse_object_embedded_in_prose() {
        let raw = "Here you go:\n{\"SEA\": [\"Salty expanse\"]}\nHave fun!";
        let map = parse_clue_map(raw, &words(&["SEA"]));
        assert_eq!(map["SEA"], vec!["Salty expanse"]);
    }

    #[test]
    fn test_missing_words_get_empty_lists() {
        let raw = r#"{"SEA": ["Salty expanse"]}"#;
        let map = parse_clue_map(raw, &words(&["SEA", "BOAT"]));
        assert_eq!(map["SEA"], vec!["Salty expanse"]);
        assert!(map["BOAT"].is_empty());
    }

    #[test]
    fn test_keys_match_case_insensitively() {
        let raw = r#"{"sea": "Salty expanse"}"#;
        let map = parse_clue_map(raw, &words(&["SEA"]));
        assert_eq!(map["SEA"], vec!["Salty expanse"]);
    }

    #[test]
    fn test_unparsable_response_degrades_to_empty_coverage() {
        let map = parse_clue_map("no json here at all", &words(&["SEA", "BOAT"]));
        assert_eq!(map.len(), 2);
        assert!(map.values().all(|clues| clues.is_empty()));
    }

    #[tokio::test]
    async fn test_fetch_propagates_provider_unavailable() {
        let provider = CannedProvider {
            response: Err(GenError::ProviderUnavailable {
                reason: "down".to_string(),
            }),
        };
        let source = ClueSource::new(&provider, 1000);
        let err = source.fetch_clues(&words(&["SEA"])).await.unwrap_err();
        assert!(matches!(err, GenError::ProviderUnavailable { .. }));
    }
}
