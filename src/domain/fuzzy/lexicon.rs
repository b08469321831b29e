//! Linguistic lexicon mapping judgment labels to picture-fuzzy values.
//!
//! Two scales share one table: importance labels (used when judging
//! criteria) and performance labels (used when judging alternatives).
//! Lookups are lenient: a label that is not in the table resolves to
//! [`PictureFuzzyValue::NEUTRAL_DEFAULT`] instead of failing.

use once_cell::sync::Lazy;
use std::collections::HashMap;

use super::PictureFuzzyValue;

/// Canonical labels and their values, in scale order.
const ENTRIES: &[(&str, PictureFuzzyValue)] = &[
    // Importance scale
    ("Very Important", PictureFuzzyValue::new(0.90, 0.05, 0.05)),
    ("Important", PictureFuzzyValue::new(0.75, 0.10, 0.10)),
    ("Moderately Important", PictureFuzzyValue::new(0.50, 0.25, 0.20)),
    ("Unimportant", PictureFuzzyValue::new(0.25, 0.60, 0.10)),
    ("Not Important At All", PictureFuzzyValue::new(0.10, 0.80, 0.10)),
    // Performance scale
    ("Very Good", PictureFuzzyValue::new(0.90, 0.05, 0.05)),
    ("Good", PictureFuzzyValue::new(0.75, 0.10, 0.10)),
    ("Fair", PictureFuzzyValue::new(0.50, 0.30, 0.20)),
    ("Poor", PictureFuzzyValue::new(0.25, 0.60, 0.10)),
    ("Very Poor", PictureFuzzyValue::new(0.10, 0.80, 0.10)),
];

/// Process-wide lexicon keyed by normalized label.
static LEXICON: Lazy<HashMap<String, PictureFuzzyValue>> = Lazy::new(|| {
    ENTRIES
        .iter()
        .map(|(label, value)| (normalize_label(label), *value))
        .collect()
});

/// Read-only access to the linguistic lexicon.
pub struct Lexicon;

impl Lexicon {
    /// Resolves a label to its picture-fuzzy value.
    ///
    /// Unknown labels fall back to `(0.5, 0.3, 0.2)`. Use [`Lexicon::get`] to
    /// tell the two cases apart.
    pub fn resolve(label: &str) -> PictureFuzzyValue {
        Self::get(label).unwrap_or(PictureFuzzyValue::NEUTRAL_DEFAULT)
    }

    /// Looks up a label, returning `None` when it is not in the lexicon.
    pub fn get(label: &str) -> Option<PictureFuzzyValue> {
        LEXICON.get(&normalize_label(label)).copied()
    }

    /// Returns true if the label is a known lexicon entry.
    pub fn contains(label: &str) -> bool {
        Self::get(label).is_some()
    }

    /// Canonical labels in scale order.
    pub fn labels() -> impl Iterator<Item = &'static str> {
        ENTRIES.iter().map(|(label, _)| *label)
    }
}

/// Normalizes a label for lookup: trims, collapses inner whitespace, and
/// title-cases each word ("  very   IMPORTANT " -> "Very Important").
pub fn normalize_label(label: &str) -> String {
    label
        .split_whitespace()
        .map(title_case_word)
        .collect::<Vec<_>>()
        .join(" ")
}

fn title_case_word(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}
