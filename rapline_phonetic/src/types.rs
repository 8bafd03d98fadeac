// Core phonetic types shared by the scorer and the engine crate.
//
// The type hierarchy is:
// - `Transliteration`: full (with softness markers) and simplified phonetic
//   strings produced in one pass by `transliterate.rs`
// - `MatchType`: strength of a rhyme match (exact, slant, assonance, consonance)
// - `PhoneticAnalysis`: everything derived from one phrase, for callers that
//   want a single call instead of composing the transliterator helpers
// - `RhymeComparison`: similarity verdict for a pair of phrases
//
// All types serialize with serde so the engine's output can be handed to
// persistence or presentation collaborators unchanged.

use serde::{Deserialize, Serialize};

/// Output of a single transliteration pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transliteration {
    /// Transcription including `'` softness markers.
    pub full: String,
    /// Same transcription with every softness marker stripped.
    pub simplified: String,
}

/// Strength of a phonetic match, strongest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchType {
    /// Similarity ≥ 0.95.
    Exact,
    /// Similarity ≥ 0.70.
    Slant,
    /// Similarity ≥ 0.50.
    Assonance,
    /// Similarity ≥ 0.30.
    Consonance,
}

impl MatchType {
    /// Lower bound of the similarity band for this match type.
    pub fn min_similarity(self) -> f64 {
        match self {
            MatchType::Exact => 0.95,
            MatchType::Slant => 0.70,
            MatchType::Assonance => 0.50,
            MatchType::Consonance => 0.30,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            MatchType::Exact => "exact",
            MatchType::Slant => "slant",
            MatchType::Assonance => "assonance",
            MatchType::Consonance => "consonance",
        }
    }
}

/// Rule-based phonetic breakdown of a phrase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhoneticAnalysis {
    /// Input as given.
    pub original: String,
    /// Reduced transcription with softness markers.
    pub phonetic_full: String,
    /// Reduced transcription without softness markers.
    pub simplified: String,
    /// Last two syllables of the simplified transcription.
    pub phonetic_tail: String,
    /// Number of Cyrillic vowel letters.
    pub syllable_count: usize,
    /// True for phrases the rule tables are likely to mishear (foreign words,
    /// numerals, hyphen chains, short multi-word phrases that may be puns).
    pub needs_review: bool,
}

/// Rhyme verdict for two phrases.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RhymeComparison {
    pub similarity: f64,
    pub match_type: Option<MatchType>,
    pub is_rhyme: bool,
    pub analysis_a: PhoneticAnalysis,
    pub analysis_b: PhoneticAnalysis,
}
