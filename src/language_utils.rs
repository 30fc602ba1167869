/*!
 * Language utilities for the configured pane pair.
 *
 * Wire codes are uppercase ISO 639-1, optionally with a regional variant
 * suffix ("EN", "KO", "EN-US", "PT-BR"). This module validates and
 * normalizes codes into that shape and resolves display names.
 */

use anyhow::{Result, anyhow};
use isolang::Language;

/// Normalize a language code to the uppercase wire format
///
/// The base code (before any regional suffix) must be a valid ISO 639-1
/// code; the suffix is kept verbatim apart from casing.
pub fn normalize_code(code: &str) -> Result<String> {
    let trimmed = code.trim();
    if trimmed.is_empty() {
        return Err(anyhow!("Language code is empty"));
    }

    let base = trimmed.split('-').next().unwrap_or(trimmed);
    if Language::from_639_1(&base.to_lowercase()).is_none() {
        return Err(anyhow!("Invalid language code: {}", code));
    }

    Ok(trimmed.to_uppercase())
}

/// Get the English display name for a language code
pub fn get_language_name(code: &str) -> Result<String> {
    let normalized = normalize_code(code)?;
    let base = normalized.split('-').next().unwrap_or(&normalized);

    Language::from_639_1(&base.to_lowercase())
        .map(|lang| lang.to_name().to_string())
        .ok_or_else(|| anyhow!("Unknown language code: {}", code))
}

/// Check whether two language codes refer to the same base language
pub fn language_codes_match(a: &str, b: &str) -> bool {
    let base = |code: &str| {
        code.trim()
            .split('-')
            .next()
            .unwrap_or("")
            .to_lowercase()
    };
    !base(a).is_empty() && base(a) == base(b)
}
