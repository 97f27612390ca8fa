use crate::utils::error::{GenError, Result};
use chrono::{Datelike, NaiveDate};

/// Built-in rotation catalog, used when no catalog is configured. Order
/// matters: the day-of-year rotation indexes into it.
pub const DEFAULT_THEMES: &[&str] = &[
    "Ocean",
    "Space",
    "Music",
    "Sports",
    "Food",
    "Animals",
    "Technology",
    "Weather",
    "Travel",
    "Movies",
    "Nature",
    "History",
    "Science",
    "Mythology",
];

pub fn default_catalog() -> Vec<String> {
    DEFAULT_THEMES.iter().map(|s| s.to_string()).collect()
}

/// Picks the theme for one generation run. An explicit override (manual or
/// test invocations) wins after trimming; otherwise the catalog rotates by
/// day of year, so repeated runs on the same date always get the same theme.
pub fn select(catalog: &[String], date: NaiveDate, override_theme: Option<&str>) -> Result<String> {
    if let Some(raw) = override_theme {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(GenError::InvalidConfigValue {
                field: "theme".to_string(),
                value: raw.to_string(),
                reason: "Theme override cannot be empty".to_string(),
            });
        }
        return Ok(trimmed.to_string());
    }

    // Emptiness is rejected by config validation at startup; reaching this
    // with an empty catalog means that check was bypassed.
    if catalog.is_empty() {
        return Err(GenError::MissingConfig {
            field: "themes".to_string(),
        });
    }

    let index = date.ordinal() as usize % catalog.len();
    Ok(catalog[index].clone())
}
