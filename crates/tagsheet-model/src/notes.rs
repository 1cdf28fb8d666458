//! Change notes attached to a cleaned tag.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Serialize, Serializer};

/// Separator used when a note set is serialized into a single cell.
pub const NOTE_SEPARATOR: &str = "; ";

/// A human-readable note describing one change made to a tag.
///
/// Variants are declared in pipeline stage order; that order is also the
/// serialized order of a [`TagNotes`] set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TagNote {
    HtmlImgWrapperRemoved,
    NielsenTagCleaned,
    FlashtalkingMacrosUpdated,
    KidsComplianceApplied,
    ExtremeReachMacrosUpdated,
    SizmekCaretEncoded,
    SizmekTagCleaned,
    /// Default note when no other stage fired.
    MacrosUpdated,
}

impl TagNote {
    pub const ALL: [TagNote; 8] = [
        Self::HtmlImgWrapperRemoved,
        Self::NielsenTagCleaned,
        Self::FlashtalkingMacrosUpdated,
        Self::KidsComplianceApplied,
        Self::ExtremeReachMacrosUpdated,
        Self::SizmekCaretEncoded,
        Self::SizmekTagCleaned,
        Self::MacrosUpdated,
    ];

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::HtmlImgWrapperRemoved => "HTML img wrapper removed",
            Self::NielsenTagCleaned => "Nielsen tag cleaned",
            Self::FlashtalkingMacrosUpdated => "Flashtalking macros updated",
            Self::KidsComplianceApplied => "Kids compliance applied",
            Self::ExtremeReachMacrosUpdated => "Extreme Reach macros updated",
            Self::SizmekCaretEncoded => "Replaced ^ with %5E for Sizmek compliance",
            Self::SizmekTagCleaned => "Sizmek tag cleaned",
            Self::MacrosUpdated => "Macros updated",
        }
    }
}

impl fmt::Display for TagNote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for TagNote {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// The distinct notes collected while cleaning one tag.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct TagNotes(BTreeSet<TagNote>);

impl TagNotes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a note; returns false when it was already present.
    pub fn insert(&mut self, note: TagNote) -> bool {
        self.0.insert(note)
    }

    pub fn contains(&self, note: TagNote) -> bool {
        self.0.contains(&note)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = TagNote> + '_ {
        self.0.iter().copied()
    }
}

impl FromIterator<TagNote> for TagNotes {
    fn from_iter<I: IntoIterator<Item = TagNote>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl fmt::Display for TagNotes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, note) in self.0.iter().enumerate() {
            if idx > 0 {
                f.write_str(NOTE_SEPARATOR)?;
            }
            f.write_str(note.as_str())?;
        }
        Ok(())
    }
}
