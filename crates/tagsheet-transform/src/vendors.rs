//! Vendor rule table.
//!
//! Each [`VendorRule`] pairs a host predicate with a rewrite and the notes it
//! records. Rules are independent: every rule whose predicate holds is
//! applied, in table order, to the progressively rewritten tag.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use tracing::trace;

use tagsheet_model::{NormalizationContext, TagNote, TagNotes};

use crate::normalization::CANONICAL_CACHEBUSTER;

/// Extra condition a rule needs besides a host match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleGate {
    Always,
    KidsCompliance,
}

impl RuleGate {
    fn is_open(self, ctx: &NormalizationContext) -> bool {
        match self {
            Self::Always => true,
            Self::KidsCompliance => ctx.apply_kids_compliance,
        }
    }
}

impl fmt::Display for RuleGate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Always => f.write_str("always"),
            Self::KidsCompliance => f.write_str("kids compliance"),
        }
    }
}

/// One vendor-specific pass.
#[derive(Clone, Copy)]
pub struct VendorRule {
    pub vendor: &'static str,
    /// Lower-case host fragments; any one matching triggers the rule.
    pub hosts: &'static [&'static str],
    pub gate: RuleGate,
    /// Notes the rule may record.
    pub notes: &'static [TagNote],
    rewrite: fn(String, &mut TagNotes) -> String,
}

impl VendorRule {
    /// Whether the rule fires for a tag (already lower-cased) under `ctx`.
    pub fn matches(&self, lowered_tag: &str, ctx: &NormalizationContext) -> bool {
        self.gate.is_open(ctx) && self.hosts.iter().any(|host| lowered_tag.contains(host))
    }

    pub fn apply(&self, tag: String, notes: &mut TagNotes) -> String {
        (self.rewrite)(tag, notes)
    }
}

impl fmt::Debug for VendorRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VendorRule")
            .field("vendor", &self.vendor)
            .field("hosts", &self.hosts)
            .field("gate", &self.gate)
            .finish_non_exhaustive()
    }
}

const VENDOR_RULES: &[VendorRule] = &[
    VendorRule {
        vendor: "Nielsen",
        hosts: &["imrworldwide.com"],
        gate: RuleGate::Always,
        notes: &[TagNote::NielsenTagCleaned],
        rewrite: clean_nielsen,
    },
    VendorRule {
        vendor: "Flashtalking",
        hosts: &["servedby.flashtalking.com"],
        gate: RuleGate::Always,
        notes: &[TagNote::FlashtalkingMacrosUpdated],
        rewrite: clean_flashtalking,
    },
    VendorRule {
        vendor: "Google Campaign Manager",
        hosts: &["doubleclick.net", "dcm.net"],
        gate: RuleGate::KidsCompliance,
        notes: &[TagNote::KidsComplianceApplied],
        rewrite: apply_kids_compliance,
    },
    VendorRule {
        vendor: "Extreme Reach",
        hosts: &["extremereach.io"],
        gate: RuleGate::Always,
        notes: &[TagNote::ExtremeReachMacrosUpdated],
        rewrite: note_extreme_reach,
    },
    VendorRule {
        vendor: "Sizmek",
        hosts: &["serving-sys.com", "mediamind.com", "sizmek.com"],
        gate: RuleGate::Always,
        notes: &[TagNote::SizmekCaretEncoded, TagNote::SizmekTagCleaned],
        rewrite: clean_sizmek,
    },
];

/// Returns the vendor rule table in application order.
pub fn vendor_rules() -> &'static [VendorRule] {
    VENDOR_RULES
}

/// Applies every matching vendor rule to `tag`, recording notes.
pub fn apply_vendor_rules(
    mut tag: String,
    ctx: &NormalizationContext,
    notes: &mut TagNotes,
) -> String {
    for rule in VENDOR_RULES {
        if rule.matches(&tag.to_ascii_lowercase(), ctx) {
            trace!(vendor = rule.vendor, "vendor rule applied");
            tag = rule.apply(tag, notes);
        }
    }
    tag
}

static FLASHTALKING_CACHEBUSTER_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\[CACHEBUSTER\]").expect("Invalid Flashtalking cachebuster regex")
});

/// `tag_for_child_directed_treatment=<value>`, value running to `;`, `&`, `?` or end.
static CHILD_DIRECTED_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(\btag_for_child_directed_treatment=)[^;&?]*")
        .expect("Invalid child-directed treatment regex")
});

/// `tfua=<value>`, value running to `;`, `&`, `?` or end.
static TFUA_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(\btfua=)[^;&?]*").expect("Invalid tfua regex"));

fn clean_nielsen(tag: String, notes: &mut TagNotes) -> String {
    notes.insert(TagNote::NielsenTagCleaned);
    tag.trim_matches('"').to_string()
}

fn clean_flashtalking(tag: String, notes: &mut TagNotes) -> String {
    notes.insert(TagNote::FlashtalkingMacrosUpdated);
    FLASHTALKING_CACHEBUSTER_REGEX
        .replace_all(&tag, CANONICAL_CACHEBUSTER)
        .into_owned()
}

fn apply_kids_compliance(tag: String, notes: &mut TagNotes) -> String {
    notes.insert(TagNote::KidsComplianceApplied);
    let tag = CHILD_DIRECTED_REGEX.replace_all(&tag, "${1}1");
    TFUA_REGEX.replace_all(&tag, "${1}1").into_owned()
}

fn note_extreme_reach(tag: String, notes: &mut TagNotes) -> String {
    notes.insert(TagNote::ExtremeReachMacrosUpdated);
    tag
}

fn clean_sizmek(tag: String, notes: &mut TagNotes) -> String {
    notes.insert(TagNote::SizmekTagCleaned);
    if tag.contains('^') {
        notes.insert(TagNote::SizmekCaretEncoded);
        tag.replace('^', "%5E")
    } else {
        tag
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kids() -> NormalizationContext {
        NormalizationContext::new().with_kids_compliance(true)
    }

    #[test]
    fn kids_rule_is_gated() {
        let rule = VENDOR_RULES
            .iter()
            .find(|rule| rule.gate == RuleGate::KidsCompliance)
            .expect("kids rule");
        assert!(rule.matches("https://ad.doubleclick.net/x", &kids()));
        assert!(!rule.matches("https://ad.doubleclick.net/x", &NormalizationContext::new()));
    }

    #[test]
    fn kids_rewrite_stops_at_delimiters() {
        let mut notes = TagNotes::new();
        let tag = "https://ad.doubleclick.net/ddm/pfadx/N1.x;tag_for_child_directed_treatment=0;tfua=;ord=1?x=tfua=abc&y=2";
        let out = apply_vendor_rules(tag.to_string(), &kids(), &mut notes);
        assert_eq!(
            out,
            "https://ad.doubleclick.net/ddm/pfadx/N1.x;tag_for_child_directed_treatment=1;tfua=1;ord=1?x=tfua=1&y=2"
        );
        assert!(notes.contains(TagNote::KidsComplianceApplied));
    }

    #[test]
    fn kids_rewrite_keeps_lookalike_parameters() {
        let mut notes = TagNotes::new();
        let out = apply_vendor_rules(
            "https://x.dcm.net/a?xtfua=0&tfua=0".to_string(),
            &kids(),
            &mut notes,
        );
        assert_eq!(out, "https://x.dcm.net/a?xtfua=0&tfua=1");
    }

    #[test]
    fn host_match_is_case_insensitive() {
        let mut notes = TagNotes::new();
        apply_vendor_rules(
            "https://SECURE-GL.IMRWORLDWIDE.COM/cgi-bin/m".to_string(),
            &NormalizationContext::new(),
            &mut notes,
        );
        assert!(notes.contains(TagNote::NielsenTagCleaned));
    }

    #[test]
    fn nielsen_strips_every_wrapping_quote() {
        let mut notes = TagNotes::new();
        let out = apply_vendor_rules(
            "\"\"https://secure-gl.imrworldwide.com/cgi-bin/m?ci=1\"".to_string(),
            &NormalizationContext::new(),
            &mut notes,
        );
        assert_eq!(out, "https://secure-gl.imrworldwide.com/cgi-bin/m?ci=1");
    }

    #[test]
    fn sizmek_without_caret_only_notes_cleaning() {
        let mut notes = TagNotes::new();
        let out = apply_vendor_rules(
            "https://bs.serving-sys.com/Serving?cn=display".to_string(),
            &NormalizationContext::new(),
            &mut notes,
        );
        assert_eq!(out, "https://bs.serving-sys.com/Serving?cn=display");
        assert!(notes.contains(TagNote::SizmekTagCleaned));
        assert!(!notes.contains(TagNote::SizmekCaretEncoded));
    }

    #[test]
    fn declared_notes_cover_recorded_notes() {
        let ctx = kids();
        for rule in VENDOR_RULES {
            let tag = format!("https://{}/a^b?tfua=0", rule.hosts[0]);
            let mut notes = TagNotes::new();
            let _ = rule.apply(tag.clone(), &mut notes);
            assert!(rule.matches(&tag, &ctx), "{} should match its own host", rule.vendor);
            for note in notes.iter() {
                assert!(rule.notes.contains(&note), "{} recorded {note}", rule.vendor);
            }
        }
    }
}
