// Phonetic layer for the Rapline rhyme engine.
//
// Turns Russian lyric fragments into an approximate phonetic transcription and
// scores how well two transcriptions rhyme. Pure functions only; no I/O, no
// shared state. The engine crate (`rapline_engine`) builds on this for line
// segmentation, linking and family clustering.
//
// Architecture:
// - `phonemes.rs`: Fixed tables (letters, iotation, devoicing, reduction,
//   consonant groups, similarity weights)
// - `transliterate.rs`: One-pass grapheme-to-phoneme conversion and phonetic
//   tail extraction
// - `similarity.rs`: Right-aligned weighted similarity and match classification
// - `syllables.rs`: Orthographic syllable counting and splitting
// - `types.rs`: `Transliteration`, `MatchType`, `PhoneticAnalysis`,
//   `RhymeComparison`
// - `lib.rs` (this file): `analyze()` and `compare()` convenience entry points
//
// Stress is never looked up. Reduction is a blanket substitution over every
// vowel, and the similarity thresholds were tuned against that output.

pub mod phonemes;
pub mod similarity;
pub mod syllables;
pub mod transliterate;
pub mod types;

pub use similarity::{RHYME_THRESHOLD, are_rhyming, classify_match, phonetic_similarity};
pub use syllables::{count_syllables, last_syllables, rhyme_tail, split_into_syllables};
pub use transliterate::{
    DEFAULT_TAIL_SYLLABLES, phonetic_tail, phonetic_tail_with, simplified_transliterate,
    transliterate,
};
pub use types::{MatchType, PhoneticAnalysis, RhymeComparison, Transliteration};

/// Rule-based phonetic analysis of a phrase.
pub fn analyze(text: &str) -> PhoneticAnalysis {
    let normalized = text.trim().to_lowercase();
    let t = transliterate(&normalized, true);

    PhoneticAnalysis {
        original: text.to_string(),
        phonetic_full: t.full,
        simplified: t.simplified,
        phonetic_tail: phonetic_tail(&normalized, DEFAULT_TAIL_SYLLABLES),
        syllable_count: count_syllables(&normalized),
        needs_review: needs_review(&normalized),
    }
}

/// Compare two phrases by their phonetic tails.
pub fn compare(text_a: &str, text_b: &str) -> RhymeComparison {
    let analysis_a = analyze(text_a);
    let analysis_b = analyze(text_b);
    let similarity = phonetic_similarity(&analysis_a.phonetic_tail, &analysis_b.phonetic_tail);

    RhymeComparison {
        similarity,
        match_type: classify_match(similarity),
        is_rhyme: similarity >= RHYME_THRESHOLD,
        analysis_a,
        analysis_b,
    }
}

/// Whether the letter tables are likely to mishear `text`: Latin script,
/// numerals, chained hyphens, or a short multi-word phrase that may hide a
/// homophone.
fn needs_review(text: &str) -> bool {
    if text.chars().any(|c| c.is_ascii_alphabetic() || c.is_ascii_digit()) {
        return true;
    }
    if text.matches('-').count() > 1 {
        return true;
    }
    let words: Vec<&str> = text.split_whitespace().collect();
    (2..=4).contains(&words.len()) && words.concat().chars().count() <= 15
}
