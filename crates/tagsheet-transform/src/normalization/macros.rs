//! Macro dialect table.
//!
//! Vendors spell the same serve-time placeholders in many ways. Each entry of
//! [`MACRO_DIALECT`] maps one spelling to its canonical `%%NAME%%` macro.
//! Entries are applied in table order, case-insensitively, and every entry
//! may match any number of times. Passes over the table repeat until the text
//! stops changing: a canonical macro ends in `%`, which can complete a
//! `%REPLACE-TIMESTAMP-MACRO%` token that follows it.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::{NoExpand, Regex};

/// Canonical cachebuster macro.
pub const CANONICAL_CACHEBUSTER: &str = "%%CACHEBUSTER%%";

/// One placeholder spelling and its canonical replacement.
#[derive(Debug, Clone, Copy)]
pub struct MacroPattern {
    /// Representative spelling, used for listings.
    pub token: &'static str,
    /// Regex source, matched case-insensitively.
    pub pattern: &'static str,
    /// Canonical macro the spelling becomes.
    pub canonical: &'static str,
}

const fn entry(token: &'static str, pattern: &'static str, canonical: &'static str) -> MacroPattern {
    MacroPattern {
        token,
        pattern,
        canonical,
    }
}

/// Placeholder spellings, in application order.
pub const MACRO_DIALECT: &[MacroPattern] = &[
    entry("[timestamp]", r"\[timestamp\]", CANONICAL_CACHEBUSTER),
    entry("[ord]", r"\[ord\]", CANONICAL_CACHEBUSTER),
    entry("[correlator]", r"\[correlator\]", CANONICAL_CACHEBUSTER),
    entry("[cachebuster]", r"\[cachebuster\]", CANONICAL_CACHEBUSTER),
    entry("[random]", r"\[random\]", "%%RANDOM%%"),
    entry("[campaignid]", r"\[campaignid\]", "%%CAMPAIGN_ID%%"),
    entry("[device]", r"\[device\]", "%%DEVICE%%"),
    entry("[placement]", r"\[placement\]", "%%PLACEMENT%%"),
    entry("[user_id]", r"\[user_id\]", "%%USER_ID%%"),
    entry("[gdid]", r"\[gdid\]", "%%GDID%%"),
    entry("[adid]", r"\[adid\]", "%%AD_ID%%"),
    entry(
        "[INSERT_CACHEBUSTER_HERE]",
        r"[\[{]?INSERT_CACHE(?:BUSTER|BREAKER)_HERE[\]}]?",
        CANONICAL_CACHEBUSTER,
    ),
    entry(
        "INSERT CACHEBUSTER",
        r"[\[{]?INSERT CACHE(?:BUSTER|BREAKER)[\]}]?",
        CANONICAL_CACHEBUSTER,
    ),
    entry(
        "%REPLACE-TIMESTAMP-MACRO%",
        "%REPLACE-TIMESTAMP-MACRO%",
        CANONICAL_CACHEBUSTER,
    ),
];

static COMPILED_DIALECT: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    MACRO_DIALECT
        .iter()
        .map(|entry| {
            Regex::new(&format!("(?i){}", entry.pattern)).expect("Invalid macro dialect regex")
        })
        .collect()
});

/// Returns the macro dialect table.
pub fn macro_dialect() -> &'static [MacroPattern] {
    MACRO_DIALECT
}

/// Rewrites every known placeholder spelling into its canonical macro.
///
/// ```
/// use tagsheet_transform::normalization::canonicalize_macros;
///
/// assert_eq!(
///     canonicalize_macros("https://a.com/ad;ord=[TimeStamp];dc=[device]"),
///     "https://a.com/ad;ord=%%CACHEBUSTER%%;dc=%%DEVICE%%"
/// );
/// ```
pub fn canonicalize_macros(tag: &str) -> String {
    let mut current = tag.to_string();
    // Every rewrite consumes spelling text no canonical macro contains.
    while let Some(rewritten) = canonicalize_pass(&current) {
        current = rewritten;
    }
    current
}

/// One pass over the table; `None` when no entry matched.
fn canonicalize_pass(tag: &str) -> Option<String> {
    let mut current: Option<String> = None;
    for (entry, regex) in MACRO_DIALECT.iter().zip(COMPILED_DIALECT.iter()) {
        let text = current.as_deref().unwrap_or(tag);
        let rewritten = match regex.replace_all(text, NoExpand(entry.canonical)) {
            Cow::Borrowed(_) => continue,
            Cow::Owned(rewritten) => rewritten,
        };
        current = Some(rewritten);
    }
    current
}
