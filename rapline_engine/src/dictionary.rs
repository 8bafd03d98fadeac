// Rhyme dictionary aggregated across many tracks.
//
// Families from different tracks that share a phonetic tail describe the same
// rhyme, so they are merged into one entry: the distinct tail spans seen for
// that key (first-seen order) and the highest complexity any of those
// families reached. Rhymes confirmed by an external verifier are added as
// their own entries keyed by the tail pair, since they usually have no shared
// phonetic tail (puns, foreign words). Puns are rated 5, other verified
// rhymes 4.
//
// `entries()` lists only entries with two or more variants, verified rhymes
// first, then by variant count and complexity, both descending. Ties keep
// insertion order.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::extract::ExtractionResult;
use crate::family::{MAX_COMPLEXITY, RhymeFamily};
use crate::verify::{VerdictKind, VerifiedRhyme};

/// One rhyme pattern and every spelling of it that was seen.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DictionaryEntry {
    /// Phonetic tail for rule-based entries, verdict kind for verified ones.
    pub key: String,
    pub variants: Vec<String>,
    pub complexity: u8,
    pub verified: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
}

#[derive(Clone, Debug, Default)]
pub struct RhymeDictionary {
    index: FxHashMap<String, usize>,
    entries: Vec<DictionaryEntry>,
}

impl RhymeDictionary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge every family of one extraction result.
    pub fn add_result(&mut self, result: &ExtractionResult) {
        for family in &result.families {
            self.add_family(family);
        }
    }

    pub fn add_family(&mut self, family: &RhymeFamily) {
        let slot = self.slot_for(&family.phonetic_tail, || DictionaryEntry {
            key: family.phonetic_tail.clone(),
            variants: Vec::new(),
            complexity: family.complexity,
            verified: false,
            explanation: None,
        });
        let entry = &mut self.entries[slot];

        for unit in &family.units {
            if !entry.variants.contains(&unit.text_span) {
                entry.variants.push(unit.text_span.clone());
            }
        }
        entry.complexity = entry.complexity.max(family.complexity);
    }

    /// Add a verified rhyme. A pair already present is left as is.
    pub fn add_verified(&mut self, rhyme: &VerifiedRhyme) {
        let map_key = format!("verified:{}\u{0}{}", rhyme.tail_a, rhyme.tail_b);
        self.slot_for(&map_key, || DictionaryEntry {
            key: kind_label(rhyme.kind).to_string(),
            variants: vec![rhyme.tail_a.clone(), rhyme.tail_b.clone()],
            complexity: if rhyme.kind == VerdictKind::Pun {
                MAX_COMPLEXITY
            } else {
                MAX_COMPLEXITY - 1
            },
            verified: true,
            explanation: rhyme.explanation.clone(),
        });
    }

    fn slot_for(&mut self, key: &str, make: impl FnOnce() -> DictionaryEntry) -> usize {
        if let Some(&slot) = self.index.get(key) {
            return slot;
        }
        self.entries.push(make());
        let slot = self.entries.len() - 1;
        self.index.insert(key.to_string(), slot);
        slot
    }

    /// Number of distinct keys, including single-variant ones.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries with at least two variants, strongest first.
    pub fn entries(&self) -> Vec<&DictionaryEntry> {
        let mut out: Vec<&DictionaryEntry> = self
            .entries
            .iter()
            .filter(|e| e.variants.len() >= 2)
            .collect();
        out.sort_by(|a, b| {
            b.verified
                .cmp(&a.verified)
                .then_with(|| b.variants.len().cmp(&a.variants.len()))
                .then_with(|| b.complexity.cmp(&a.complexity))
        });
        out
    }
}

fn kind_label(kind: VerdictKind) -> &'static str {
    match kind {
        VerdictKind::Exact => "exact",
        VerdictKind::Slant => "slant",
        VerdictKind::Assonance => "assonance",
        VerdictKind::Pun => "pun",
        VerdictKind::NotRhyme => "none",
    }
}
