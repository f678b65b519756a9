/*!
 * Tests for input normalization, post-processing and output validation
 */

use babelcache::errors::Rejection;
use babelcache::translation::TextNormalizer;
use babelcache::validation::ResultValidator;

#[test]
fn test_normalize_withNewlinesAndPadding_shouldCollapseToSingleSpaces() {
    assert_eq!(TextNormalizer::normalize("  hi\n\nthere  "), "hi there");
    assert_eq!(TextNormalizer::normalize("\u{00A0}Привет,\n  мир!"), "Привет, мир!");
}

#[test]
fn test_postprocess_shouldRestoreMissingTerminalMark() {
    assert_eq!(TextNormalizer::postprocess("Hola", "Hello!"), "Hola!");
    assert_eq!(TextNormalizer::postprocess("¿Cómo estás", "How are you?"), "¿Cómo estás?");
    assert_eq!(TextNormalizer::postprocess("Adiós", "Bye."), "Adiós.");
}

#[test]
fn test_postprocess_withMarkPresent_shouldNotDuplicate() {
    assert_eq!(TextNormalizer::postprocess("Hola!", "Hello!"), "Hola!");
    assert_eq!(TextNormalizer::postprocess("你好！", "Hello!"), "你好！");
}

#[test]
fn test_validator_shouldRejectEachFailureKind() {
    let validator = ResultValidator::new();

    assert_eq!(validator.check("  ", "Hello"), Err(Rejection::Blank));
    assert_eq!(validator.check("HELLO", "hello"), Err(Rejection::EchoesInput));
    assert_eq!(
        validator.check("Quota exceeded, try tomorrow", "Hello"),
        Err(Rejection::ErrorMarker("QUOTA EXCEEDED"))
    );
    assert_eq!(validator.check("Page not found", "Hello"), Err(Rejection::ErrorMarker("NOT FOUND")));
    assert_eq!(validator.check("Hola", "Hello"), Ok(()));
}
