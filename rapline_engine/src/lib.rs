// Rapline rhyme extraction engine.
//
// Takes raw lyric text and finds which lines rhyme, using the approximate
// phonetics from `rapline_phonetic` instead of spelling, so that slant,
// assonant and multisyllabic rap rhymes are found as well as exact ones.
//
// Data flows strictly downward:
//   text → tracks/sections/lines (segment) → rhyme units (link)
//        → links within a sliding window (link) → families (family)
//
// Module map:
// - `segment.rs`: Track/section/line parsing and tail extraction
// - `link.rs`: `RhymeUnit` construction, window linking, verifier candidates
// - `family.rs`: Grouping by exact phonetic tail, complexity scoring
// - `extract.rs`: Per-track and per-section pipeline, `ExtractionResult`
// - `verify.rs`: `RhymeVerifier` seam, batching, verdict parsing
// - `dictionary.rs`: Cross-track aggregation of families and verified rhymes
// - `config.rs`: `RhymeConfig`, every tunable number in one place
// - `error.rs`: `ConfigError` and `VerifyError`
//
// Extraction never fails and never does I/O. Tracks share no state, so
// `extract_all()` processes them in parallel with rayon and returns results
// in input order. Identical (text, config) inputs give identical outputs.

pub mod config;
pub mod dictionary;
pub mod error;
pub mod extract;
pub mod family;
pub mod link;
pub mod segment;
pub mod verify;

use rayon::prelude::*;

pub use config::RhymeConfig;
pub use dictionary::{DictionaryEntry, RhymeDictionary};
pub use error::{ConfigError, VerifyError};
pub use extract::{ExtractionResult, TrackRhymes, extract_section, extract_track};
pub use family::RhymeFamily;
pub use link::{RhymeCandidate, RhymeLink, RhymeUnit};
pub use segment::{
    Line, Section, SectionKind, Track, extract_tail, parse_single_track, parse_tracks, tail_range,
};
pub use verify::{RhymeVerifier, Verdict, VerdictKind, VerifiedRhyme, verify_candidates};

/// Parse `text` and extract rhymes from every track, in parallel.
pub fn extract_all(text: &str, config: &RhymeConfig) -> Vec<TrackRhymes> {
    let tracks = parse_tracks(text, config);
    extract_tracks(&tracks, config)
}

/// Extract rhymes from already-parsed tracks, in parallel.
pub fn extract_tracks(tracks: &[Track], config: &RhymeConfig) -> Vec<TrackRhymes> {
    tracks
        .par_iter()
        .map(|track| TrackRhymes {
            title: track.title.clone(),
            result: extract_track(track, config),
        })
        .collect()
}
