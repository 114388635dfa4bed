/*!
 * Prompt assembly for batch translation requests.
 *
 * Every backend sends the same two-part prompt: a system prompt built from
 * the configured template plus fixed quality guidelines, and a user prompt
 * listing the batch entries in the numbered `#N:` format the response
 * decoder expects back.
 */

use crate::language_utils;
use crate::providers::BatchItem;

/// Quality guidelines appended to every system prompt
const TRANSLATION_GUIDELINES: &str = "\
- Maintain consistent terminology throughout the interface
- Preserve any technical terms or proper nouns
- Keep the same level of formality as the source text
- Ensure translations fit the UI context (length, formatting)
- Preserve any placeholders or special characters
- Maintain the same tone and style as the original";

/// Extra instructions for specific target locales
fn language_notes(target_language: &str) -> Option<&'static str> {
    match target_language {
        "de_DE" => Some(
            "Use the formal 'Sie' form for user instructions and messages. \
             Use standard German computing terminology and keep noun capitalization \
             consistent with German grammar rules.",
        ),
        "es_ES" => Some(
            "Use neutral Spanish with the formal 'usted' form for user instructions \
             and messages. Translate technical terms consistently across the interface.",
        ),
        "fr_FR" => Some(
            "Use the formal 'vous' form for user instructions and messages. \
             Follow French punctuation rules and standard French computing terminology.",
        ),
        "cs_CZ" => Some(
            "Use the formal 'vy' form for user instructions and messages. \
             Use standard Czech computing terminology, keep proper diacritics, and \
             capitalize only the first word of a sentence and proper nouns.",
        ),
        _ => None,
    }
}

/// Build the system prompt from the configured template
///
/// The template's `{source_language}` and `{target_language}` placeholders are
/// replaced with display names when the locale is recognized, otherwise with
/// the raw code.
pub fn build_system_prompt(template: &str, source_language: &str, target_language: &str) -> String {
    let source_name = language_utils::locale_display_name(source_language)
        .unwrap_or_else(|_| source_language.to_string());
    let target_name = language_utils::locale_display_name(target_language)
        .unwrap_or_else(|_| target_language.to_string());

    let mut prompt = template
        .replace("{source_language}", &source_name)
        .replace("{target_language}", &target_name);

    prompt.push_str("\n\nTranslation guidelines:\n");
    prompt.push_str(TRANSLATION_GUIDELINES);

    if let Some(notes) = language_notes(target_language) {
        prompt.push_str("\n\nTarget language notes:\n");
        prompt.push_str(notes);
    }

    prompt
}

/// Build the user prompt listing a batch in numbered `#N:` form
pub fn build_batch_prompt(items: &[BatchItem]) -> String {
    let mut prompt = String::from("Texts to translate:\n\n");

    for (i, item) in items.iter().enumerate() {
        prompt.push_str(&format!("#{}: {}", i + 1, item.text));
        if !item.context.is_empty() {
            prompt.push_str(&format!("\nContext: {}", item.context));
        }
        prompt.push_str("\n\n");
    }

    prompt.push_str(
        "Respond with one translation per line, numbered #1, #2, etc. \
         Only provide the translations, no explanations.",
    );

    prompt
}
