// Per-track extraction pipeline.
//
// `extract_track()` runs the three stages over one track in order:
//   1. build a `RhymeUnit` for every qualifying line, section by section
//   2. link units within the look-back window (see `link.rs`)
//   3. group units into families (see `family.rs`)
// Linking needs the complete unit list and grouping needs the complete link
// list, so nothing is streamed.
//
// `extract_section()` runs the same pipeline over a single section, with
// global line indices re-based from a caller-supplied offset, for callers
// that process a long track piecewise.
//
// Extraction is a pure function of (track, config). The parallel fan-out over
// many tracks lives in `lib.rs`.

use serde::{Deserialize, Serialize};

use crate::config::RhymeConfig;
use crate::family::{RhymeFamily, group_families};
use crate::link::{RhymeCandidate, RhymeLink, RhymeUnit, link_units};
use crate::segment::{Section, Track};

/// Everything extracted from one track.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ExtractionResult {
    pub units: Vec<RhymeUnit>,
    pub links: Vec<RhymeLink>,
    pub families: Vec<RhymeFamily>,
    /// Present only when candidate collection is enabled.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub candidates: Option<Vec<RhymeCandidate>>,
}

/// Extraction result labelled with its track title.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TrackRhymes {
    pub title: String,
    #[serde(flatten)]
    pub result: ExtractionResult,
}

pub fn extract_track(track: &Track, config: &RhymeConfig) -> ExtractionResult {
    let units: Vec<RhymeUnit> = track
        .sections
        .iter()
        .flat_map(|section| {
            section
                .lines
                .iter()
                .filter_map(move |line| RhymeUnit::from_line(line, &section.name, config))
        })
        .collect();

    let result = run_pipeline(units, config);
    tracing::debug!(
        track = %track.title,
        units = result.units.len(),
        links = result.links.len(),
        families = result.families.len(),
        "extracted track"
    );
    result
}

/// Extract from one section on its own. Unit global indices count from
/// `global_offset` in section order.
pub fn extract_section(
    section: &Section,
    global_offset: usize,
    config: &RhymeConfig,
) -> ExtractionResult {
    let units: Vec<RhymeUnit> = section
        .lines
        .iter()
        .enumerate()
        .filter_map(|(i, line)| {
            let mut unit = RhymeUnit::from_line(line, &section.name, config)?;
            unit.global_line_index = global_offset + i;
            Some(unit)
        })
        .collect();

    run_pipeline(units, config)
}

fn run_pipeline(units: Vec<RhymeUnit>, config: &RhymeConfig) -> ExtractionResult {
    let linkage = link_units(&units, config);
    let families = group_families(&units, &linkage.links);

    ExtractionResult {
        units,
        links: linkage.links,
        families,
        candidates: config.collect_candidates.then_some(linkage.candidates),
    }
}
