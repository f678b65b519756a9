/*!
 * Error-marker detection for provider output.
 *
 * Some free translation APIs answer with HTTP 200 and put their error
 * message where the translation should be ("MYMEMORY WARNING: YOU USED
 * ALL AVAILABLE FREE TRANSLATIONS...", "QUERY LENGTH LIMIT EXCEEDED").
 */

/// Markers that identify an error message disguised as a translation
pub const ERROR_MARKERS: [&str; 4] = ["QUOTA EXCEEDED", "ERROR", "FAILED", "NOT FOUND"];

/// Return the first error marker contained in `text`, case-insensitively
pub fn find_error_marker(text: &str) -> Option<&'static str> {
    let upper = text.to_uppercase();
    ERROR_MARKERS.iter().copied().find(|marker| upper.contains(marker))
}
