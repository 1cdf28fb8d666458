//! The tag cleaning pipeline.

use tracing::trace;

use tagsheet_model::{CellValue, NormalizationContext, TagNote, TagNotes};

use crate::normalization::{canonicalize_macros, decode_vast, unwrap_img};
use crate::vendors::apply_vendor_rules;

/// Result of cleaning one tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CleanedTag {
    pub cleaned_tag: String,
    pub notes: TagNotes,
}

/// Cleans one raw tag.
///
/// Stages run in a fixed order: HTML image unwrap, VAST percent-decoding,
/// macro canonicalization, then the vendor rule table. Unwrapping repeats
/// until no `<img>` wrapper is left, and runs again on decoded text, since a
/// VAST tag may carry a percent-encoded wrapper. When no stage records a note
/// the result carries [`TagNote::MacrosUpdated`]. Never fails; any string,
/// including the empty one, yields a cleaned tag.
///
/// ```
/// use tagsheet_model::{NormalizationContext, TagNote};
/// use tagsheet_transform::clean;
///
/// let cleaned = clean("http://x.com/ad?cb=[timestamp]", &NormalizationContext::new());
/// assert_eq!(cleaned.cleaned_tag, "http://x.com/ad?cb=%%CACHEBUSTER%%");
/// assert_eq!(cleaned.notes.to_string(), TagNote::MacrosUpdated.as_str());
/// ```
pub fn clean(raw_tag: &str, ctx: &NormalizationContext) -> CleanedTag {
    let mut notes = TagNotes::new();

    let mut tag = unwrap_all(raw_tag.to_string(), &mut notes);

    if let Some(decoded) = decode_vast(&tag) {
        trace!("decoded VAST wrapper");
        tag = unwrap_all(decoded, &mut notes);
    }

    let tag = canonicalize_macros(&tag);
    let cleaned_tag = apply_vendor_rules(tag, ctx, &mut notes);

    if notes.is_empty() {
        notes.insert(TagNote::MacrosUpdated);
    }

    CleanedTag { cleaned_tag, notes }
}

/// Strips nested `<img>` wrappers; each `src` is shorter than its wrapper.
fn unwrap_all(mut tag: String, notes: &mut TagNotes) -> String {
    while let Some(src) = unwrap_img(&tag) {
        notes.insert(TagNote::HtmlImgWrapperRemoved);
        tag = src;
    }
    tag
}

/// Cleans a tag cell. Missing cells clean as the empty string.
pub fn clean_cell(cell: &CellValue, ctx: &NormalizationContext) -> CleanedTag {
    match cell {
        CellValue::Text(text) => clean(text, ctx),
        other => clean(&other.to_string(), ctx),
    }
}
