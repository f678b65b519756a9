/*!
 * Text cleanup before and after translation.
 *
 * `normalize` prepares user input for the providers and produces the text
 * stored as the history key. `postprocess` repairs the accepted
 * provider output against that normalized input.
 */

use once_cell::sync::Lazy;
use regex::Regex;

/// Any run of whitespace, newlines included
static WHITESPACE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("Invalid whitespace regex"));

/// Sentence-final marks carried over from the original, with their full-width forms
const TERMINAL_MARKS: [(char, char); 3] = [('.', '。'), ('?', '？'), ('!', '！')];

/// Pure text cleanup and punctuation repair
pub struct TextNormalizer;

impl TextNormalizer {
    /// Trim and collapse every whitespace run to a single space
    pub fn normalize(raw: &str) -> String {
        WHITESPACE_RUN.replace_all(raw.trim(), " ").into_owned()
    }

    /// Strip one layer of surrounding quotes and restore the original's final mark
    pub fn postprocess(translated: &str, original: &str) -> String {
        let mut result = Self::strip_quotes(translated.trim()).trim().to_string();

        if let Some(last) = original.trim_end().chars().last() {
            if let Some(&(mark, full_width)) = TERMINAL_MARKS.iter().find(|(m, _)| *m == last) {
                if !result.is_empty() && !result.ends_with(mark) && !result.ends_with(full_width) {
                    result.push(mark);
                }
            }
        }

        result
    }

    fn strip_quotes(text: &str) -> &str {
        for quote in ['"', '\''] {
            if text.len() >= 2 && text.starts_with(quote) && text.ends_with(quote) {
                return &text[1..text.len() - 1];
            }
        }
        text
    }
}
