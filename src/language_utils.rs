use anyhow::{Result, anyhow};
use isolang::Language;

/// Locale utilities for Qt-style language codes
///
/// Qt Linguist catalogs identify languages with locale codes such as
/// `en_US`, `de_DE` or plain `cs`. This module validates those codes and
/// produces human-readable names, using ISO 639 data for the language part.
/// Split a locale code into its language part and optional region part
///
/// Accepts both `language_REGION` (underscore) and `language-REGION`
/// (hyphen) forms. The language part is lowercased, the region uppercased.
pub fn split_locale(code: &str) -> Result<(String, Option<String>)> {
    let trimmed = code.trim();
    if trimmed.is_empty() {
        return Err(anyhow!("Empty locale code"));
    }

    let mut parts = trimmed.splitn(2, ['_', '-']);
    let language = parts.next().unwrap_or_default().to_lowercase();
    let region = parts.next().map(|r| r.to_uppercase());

    if language.is_empty() {
        return Err(anyhow!("Locale code has no language part: {}", code));
    }

    Ok((language, region))
}

/// Look up the ISO language for the language part of a locale code
fn language_of(code: &str) -> Result<Language> {
    let (language, _) = split_locale(code)?;

    let lang = match language.len() {
        2 => Language::from_639_1(&language),
        3 => Language::from_639_3(&language),
        _ => None,
    };

    lang.ok_or_else(|| anyhow!("Invalid language code in locale: {}", code))
}

/// Validate a locale code, returning its normalized `language_REGION` form
pub fn validate_locale(code: &str) -> Result<String> {
    let (_, region) = split_locale(code)?;
    let lang = language_of(code)?;

    // Normalize the language part to its two-letter form when one exists
    let language = lang.to_639_1()
        .map(|c| c.to_string())
        .unwrap_or_else(|| lang.to_639_3().to_string());

    match region {
        Some(region) => Ok(format!("{}_{}", language, region)),
        None => Ok(language),
    }
}

/// Check if two locale codes refer to the same language
///
/// Region parts are ignored: `en_US` and `en_GB` match.
pub fn locales_match(code1: &str, code2: &str) -> bool {
    match (language_of(code1), language_of(code2)) {
        (Ok(lang1), Ok(lang2)) => lang1 == lang2,
        _ => false,
    }
}

/// Get a display name for a locale code, e.g. "English (US)" for en_US
pub fn locale_display_name(code: &str) -> Result<String> {
    let (_, region) = split_locale(code)?;
    let lang = language_of(code)?;

    match region {
        Some(region) => Ok(format!("{} ({})", lang.to_name(), region)),
        None => Ok(lang.to_name().to_string()),
    }
}
