/*!
 * Batch response decoding.
 *
 * Backends answer a batch request with a single block of text. This module
 * turns that raw text into an ordered list of per-unit strings aligned 1:1
 * with the batch's input order, tolerating the formatting noise a
 * non-deterministic text-generation backend produces.
 */

use log::{debug, error};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::errors::DecodeError;

// @const: Numbered entry pattern, e.g. "#3: translated text"
static NUMBERED_ENTRY_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^#(\d+)\s*:\s*(.*)$").unwrap()
});

/// Decode a raw batch response into exactly `expected_count` translations
///
/// Primary strategy: lines in the `#N: text` format are placed at position
/// `N - 1`, with skipped ordinals padded by empty placeholders so the list
/// stays dense and index-aligned. Fallback: if that does not yield exactly
/// `expected_count` entries, the first `expected_count` non-blank lines that
/// do not look like numbered entries are taken in file order instead.
///
/// The result is validated: exact length and no blank entries. A violation
/// is a decode error, which callers treat like a backend failure.
pub fn decode_batch_response(raw: &str, expected_count: usize) -> Result<Vec<String>, DecodeError> {
    let lines: Vec<&str> = raw.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();

    let mut results: Vec<String> = Vec::with_capacity(expected_count);

    for line in &lines {
        if let Some(captures) = NUMBERED_ENTRY_REGEX.captures(line) {
            let ordinal: usize = match captures[1].parse() {
                Ok(n) => n,
                Err(_) => continue,
            };
            if ordinal < 1 || ordinal > expected_count {
                continue;
            }

            // Position-faithful placement: entry #N lands at index N-1 even
            // when ordinals arrive out of order or repeat
            if results.len() < ordinal {
                results.resize(ordinal, String::new());
            }
            results[ordinal - 1] = captures[2].trim().to_string();
        }
    }

    // Fall back to plain lines when the numbered format didn't pan out
    if results.len() != expected_count {
        debug!("Numbered decode yielded {} of {} entries, trying plain-line fallback",
               results.len(), expected_count);
        results = lines.iter()
            .filter(|line| !NUMBERED_ENTRY_REGEX.is_match(line))
            .take(expected_count)
            .map(|line| line.to_string())
            .collect();
    }

    if results.len() != expected_count {
        error!("Expected {} translations, got {}", expected_count, results.len());
        return Err(DecodeError::WrongCount {
            expected: expected_count,
            actual: results.len(),
        });
    }

    if let Some(index) = results.iter().position(|entry| entry.is_empty()) {
        error!("Empty translation received for entry #{}", index + 1);
        return Err(DecodeError::EmptyEntry { index });
    }

    Ok(results)
}
