/*!
 * Tests for locale utility functions
 */

use tslate::language_utils::{locale_display_name, locales_match, split_locale, validate_locale};

/// Test splitting locale codes into language and region parts
#[test]
fn test_split_locale_withVariousForms_shouldSplitCorrectly() {
    assert_eq!(split_locale("en_US").unwrap(), ("en".to_string(), Some("US".to_string())));
    assert_eq!(split_locale("de-de").unwrap(), ("de".to_string(), Some("DE".to_string())));
    assert_eq!(split_locale("cs").unwrap(), ("cs".to_string(), None));
    assert_eq!(split_locale(" FR_fr ").unwrap(), ("fr".to_string(), Some("FR".to_string())));

    assert!(split_locale("").is_err());
    assert!(split_locale("   ").is_err());
}

/// Test locale validation and normalization
#[test]
fn test_validate_locale_withValidCodes_shouldNormalize() {
    assert_eq!(validate_locale("en_US").unwrap(), "en_US");
    assert_eq!(validate_locale("EN_us").unwrap(), "en_US");
    assert_eq!(validate_locale("de").unwrap(), "de");
    // Three-letter codes normalize to their two-letter form
    assert_eq!(validate_locale("deu_DE").unwrap(), "de_DE");

    assert!(validate_locale("xx_XX").is_err());
    assert!(validate_locale("123").is_err());
    assert!(validate_locale("toolong_US").is_err());
}

/// Test language matching across regions and code forms
#[test]
fn test_locales_match_withSameLanguage_shouldIgnoreRegion() {
    assert!(locales_match("en_US", "en_GB"));
    assert!(locales_match("en", "eng"));
    assert!(locales_match("de_DE", "deu"));

    assert!(!locales_match("en_US", "de_DE"));
    assert!(!locales_match("en", "xx"));
}

/// Test human-readable locale names
#[test]
fn test_locale_display_name_withKnownLocales_shouldFormatName() {
    assert_eq!(locale_display_name("en_US").unwrap(), "English (US)");
    assert_eq!(locale_display_name("de").unwrap(), "German");
    assert_eq!(locale_display_name("cs_CZ").unwrap(), "Czech (CZ)");

    assert!(locale_display_name("zz_ZZ").is_err());
}
