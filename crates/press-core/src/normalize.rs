//! Comparison-key normalization.
//!
//! The store re-encodes titles on its side: straight quotes come back as
//! curly-quote entities, ampersands as `&amp;`, and so on. Matching a local
//! title or term name against a remote one therefore goes through one shared
//! normalization rule. Identity resolution and taxonomy resolution both use
//! this function and nothing else; a second, slightly different rule at
//! either call site would silently break duplicate detection.

/// Reduce a display string to a stable comparison key.
///
/// Decodes HTML entities, lowercases, and strips everything that is not an
/// ASCII alphanumeric. Strings that differ only in case, punctuation,
/// whitespace, or entity encoding normalize identically:
///
/// ```
/// use press_core::normalize_key;
///
/// assert_eq!(normalize_key("AI &amp; Automation"), "aiautomation");
/// assert_eq!(normalize_key("AI & Automation"), "aiautomation");
/// ```
pub fn normalize_key(text: &str) -> String {
    html_escape::decode_html_entities(text)
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .map(|c| c.to_ascii_lowercase())
        .collect()
}
