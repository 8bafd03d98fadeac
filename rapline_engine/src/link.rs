// Rhyme units and sliding-window linking.
//
// A `RhymeUnit` is the rhyme-bearing fragment of one lyric line: the line's
// tail, where that tail sits in the clean line, and its phonetic tail. Lines
// whose tail is too short, or whose phonetic tail comes out too short, yield
// no unit.
//
// `link_units()` compares every unit with the `window_size` units before it
// (O(n × window)). Pairs at or above `link_threshold` become `RhymeLink`s.
// Below that, a pair may be kept as a `RhymeCandidate` for an external
// verifier when it clears `candidate_threshold` and looks like something the
// rule tables could have missed: adjacent lines (which nearly always rhyme in
// rap), Latin script, or hyphenated word play.
//
// Units are indexed by their position in the unit list for one track. Links
// never cross tracks because each track is linked on its own.
//
// See also: `family.rs` for grouping, `verify.rs` for what happens to
// candidates.

use rapline_phonetic::{MatchType, classify_match, phonetic_similarity, phonetic_tail_with};
use serde::{Deserialize, Serialize};

use crate::config::RhymeConfig;
use crate::segment::Line;

/// Rhyme-bearing fragment of one lyric line.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RhymeUnit {
    /// Position of the line within its section.
    pub line_index: usize,
    /// Position of the line within its track.
    pub global_line_index: usize,
    /// Clean line text.
    pub text: String,
    /// The tail words, single-spaced.
    pub text_span: String,
    /// Character offset within `text` where the tail starts.
    pub char_start: usize,
    /// Character offset within `text` one past the tail's last word. Whitespace
    /// inside `char_start..char_end` is kept as written in `text`.
    pub char_end: usize,
    pub phonetic_tail: String,
    /// Name of the owning section.
    pub section: String,
}

impl RhymeUnit {
    /// Build a unit from a line, or `None` if the line carries too little
    /// material to rhyme with.
    pub fn from_line(line: &Line, section: &str, config: &RhymeConfig) -> Option<Self> {
        let span = &line.tail;
        if span.chars().count() < config.min_tail_length {
            return None;
        }

        let phonetic_tail =
            phonetic_tail_with(span, config.tail_syllables, config.apply_reduction);
        if phonetic_tail.chars().count() < config.min_phonetic_tail_length {
            return None;
        }

        Some(Self {
            line_index: line.index,
            global_line_index: line.global_index,
            text: line.clean_text.clone(),
            text_span: span.clone(),
            char_start: line.tail_start,
            char_end: line.tail_end,
            phonetic_tail,
            section: section.to_string(),
        })
    }
}

/// A rhyme between an earlier and a later unit of the same track.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RhymeLink {
    /// Index of the earlier unit.
    pub unit_a: usize,
    /// Index of the later unit.
    pub unit_b: usize,
    pub match_type: MatchType,
    pub similarity: f64,
    /// `unit_b - unit_a`, counted in units.
    pub distance: usize,
}

/// A pair the rules scored too low to link but that may still rhyme.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RhymeCandidate {
    pub unit_a: usize,
    pub unit_b: usize,
    pub line_a: String,
    pub line_b: String,
    pub tail_a: String,
    pub tail_b: String,
    pub phonetic_a: String,
    pub phonetic_b: String,
    pub distance: usize,
    /// Similarity the rules assigned.
    pub rule_similarity: f64,
}

/// Output of `link_units()`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Linkage {
    pub links: Vec<RhymeLink>,
    /// Always empty when candidate collection is off.
    pub candidates: Vec<RhymeCandidate>,
}

/// Compare each unit against the units in its look-back window.
pub fn link_units(units: &[RhymeUnit], config: &RhymeConfig) -> Linkage {
    let mut linkage = Linkage::default();

    for (i, later) in units.iter().enumerate() {
        let start = i.saturating_sub(config.window_size);
        for (j, earlier) in (start..i).zip(&units[start..i]) {
            let similarity = phonetic_similarity(&later.phonetic_tail, &earlier.phonetic_tail);

            if similarity >= config.link_threshold {
                if let Some(match_type) = classify_match(similarity) {
                    tracing::trace!(
                        a = j,
                        b = i,
                        similarity,
                        kind = match_type.as_str(),
                        "rhyme link"
                    );
                    linkage.links.push(RhymeLink {
                        unit_a: j,
                        unit_b: i,
                        match_type,
                        similarity,
                        distance: i - j,
                    });
                }
            } else if config.collect_candidates
                && similarity >= config.candidate_threshold
                && linkage.candidates.len() < config.max_candidates
                && is_worth_verifying(earlier, later, i - j)
            {
                linkage.candidates.push(RhymeCandidate {
                    unit_a: j,
                    unit_b: i,
                    line_a: earlier.text.clone(),
                    line_b: later.text.clone(),
                    tail_a: earlier.text_span.clone(),
                    tail_b: later.text_span.clone(),
                    phonetic_a: earlier.phonetic_tail.clone(),
                    phonetic_b: later.phonetic_tail.clone(),
                    distance: i - j,
                    rule_similarity: similarity,
                });
            }
        }
    }

    linkage
}

/// Adjacent lines, foreign words and hyphen play are where the letter tables
/// most often miss a rhyme.
fn is_worth_verifying(a: &RhymeUnit, b: &RhymeUnit, distance: usize) -> bool {
    let has_latin = |s: &str| s.chars().any(|c| c.is_ascii_alphabetic());
    distance == 1
        || has_latin(&a.text_span)
        || has_latin(&b.text_span)
        || a.text_span.contains('-')
        || b.text_span.contains('-')
}
