// Data-driven extraction configuration.
//
// Every tunable number the engine uses lives in `RhymeConfig`: the look-back
// window, similarity thresholds, tail sizes, candidate limits and verifier
// batching. The engine never hard-codes these; every entry point takes a
// `&RhymeConfig`. Each field has a serde default, so a JSON file only needs
// to name the values it overrides.
//
// See also: `link.rs` (window and thresholds), `segment.rs` (`tail_words`),
// `verify.rs` (batch size and verdict confidence), `main.rs` (loading from
// `--config`).
//
// A config is plain data with no interior state. Two extractions with equal
// configs over equal text produce equal results.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// All tunable extraction parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RhymeConfig {
    /// How many earlier units each unit is compared against.
    pub window_size: usize,
    /// Similarity at or above which a pair becomes a link.
    pub link_threshold: f64,
    /// Lowest similarity at which a non-linking pair may become a candidate.
    pub candidate_threshold: f64,
    /// Minimum tail length in characters for a line to yield a unit.
    pub min_tail_length: usize,
    /// Minimum phonetic tail length in characters for a line to yield a unit.
    pub min_phonetic_tail_length: usize,
    /// Cap on candidates collected per track.
    pub max_candidates: usize,
    /// Number of trailing words taken as a line's tail.
    pub tail_words: usize,
    /// Number of trailing syllables in a phonetic tail.
    pub tail_syllables: usize,
    /// Collapse unstressed-looking vowels (о→a, е→i, я→i).
    pub apply_reduction: bool,
    /// Whether extraction returns verifier candidates at all.
    pub collect_candidates: bool,
    /// Minimum verdict confidence for a verified rhyme to be kept.
    pub verdict_min_confidence: f64,
    /// Candidates per verifier call.
    pub verifier_batch_size: usize,
}

impl Default for RhymeConfig {
    fn default() -> Self {
        Self {
            window_size: 4,
            link_threshold: 0.7,
            candidate_threshold: 0.3,
            min_tail_length: 3,
            min_phonetic_tail_length: 2,
            max_candidates: 50,
            tail_words: 3,
            tail_syllables: 2,
            apply_reduction: true,
            collect_candidates: false,
            verdict_min_confidence: 0.7,
            verifier_batch_size: 10,
        }
    }
}

impl RhymeConfig {
    /// Parse a (possibly partial) JSON config and validate it.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: RhymeConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the engine cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("window_size", self.window_size),
            ("tail_words", self.tail_words),
            ("tail_syllables", self.tail_syllables),
            ("verifier_batch_size", self.verifier_batch_size),
        ];
        for (name, value) in positive {
            if value == 0 {
                return Err(ConfigError::Invalid(format!("{name} must be at least 1")));
            }
        }

        let unit_range = [
            ("link_threshold", self.link_threshold),
            ("candidate_threshold", self.candidate_threshold),
            ("verdict_min_confidence", self.verdict_min_confidence),
        ];
        for (name, value) in unit_range {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::Invalid(format!(
                    "{name} must be within [0, 1], got {value}"
                )));
            }
        }

        if self.candidate_threshold > self.link_threshold {
            return Err(ConfigError::Invalid(format!(
                "candidate_threshold ({}) exceeds link_threshold ({})",
                self.candidate_threshold, self.link_threshold
            )));
        }
        Ok(())
    }
}
