/*!
 * Tests for language reference data
 */

use babelcache::language_utils::{
    find_by_code, get_language_name, supported_languages, validate_language_code, LanguagePair,
};

#[test]
fn test_supportedLanguages_shouldOfferTenInDisplayOrder() {
    let codes: Vec<&str> = supported_languages().iter().map(|l| l.code).collect();
    assert_eq!(codes, vec!["ru", "en", "es", "fr", "de", "it", "ja", "ko", "zh", "ar"]);
}

#[test]
fn test_findByCode_shouldIgnoreCase() {
    assert_eq!(find_by_code("ZH").map(|l| l.display_name), Some("Chinese"));
    assert!(find_by_code("pt").is_none());
}

#[test]
fn test_validateLanguageCode_shouldNormalize() {
    assert_eq!(validate_language_code(" FR ").unwrap(), "fr");
    assert!(validate_language_code("fra").is_err());
    assert!(validate_language_code("").is_err());
}

#[test]
fn test_getLanguageName_withIsoCodeOutsideTable_shouldStillResolve() {
    assert_eq!(get_language_name("pt").unwrap(), "Portuguese");
}

#[test]
fn test_languagePair_defaultAndSwap() {
    let pair = LanguagePair::default();
    assert_eq!(pair, LanguagePair::new("ru", "en"));
    assert_eq!(pair.swapped().swapped(), pair);
}
