// Rhyme families: units grouped by identical phonetic tail.
//
// A family is every unit in a track whose phonetic tail is exactly the same
// string, provided there are at least two of them. Grouping is by key, not by
// following links: two units that each link to a third but not to each other
// do not end up together unless their tails are equal. Chains of weak
// similarity therefore never merge unrelated rhymes.
//
// Keys are visited in first-seen order (an `FxHashMap` index into an ordered
// `Vec`), so the output is deterministic. Families are then stably sorted by
// complexity, highest first.
//
// Complexity scores how elaborate a rhyme is, on a 1-5 scale:
//   1
//   + 0.5 × floor(average phonetic tail length / 2)   (rough syllable count)
//   + 1 if any intra-family link is a slant rhyme
//   + 1 if the family has more than two members
// rounded and clamped.

use rapline_phonetic::MatchType;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::link::{RhymeLink, RhymeUnit};

pub const MIN_COMPLEXITY: u8 = 1;
pub const MAX_COMPLEXITY: u8 = 5;

/// Units sharing one phonetic tail.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RhymeFamily {
    /// The shared phonetic tail.
    pub phonetic_tail: String,
    /// Longest tail span among the members; the first one wins ties.
    pub pattern_text: String,
    /// Indices into the track's unit list, ascending.
    pub unit_indices: Vec<usize>,
    pub units: Vec<RhymeUnit>,
    /// Links whose endpoints are both members.
    pub links: Vec<RhymeLink>,
    pub complexity: u8,
}

/// Group units into families and order them by complexity.
pub fn group_families(units: &[RhymeUnit], links: &[RhymeLink]) -> Vec<RhymeFamily> {
    let mut index: FxHashMap<&str, usize> = FxHashMap::default();
    let mut groups: Vec<(&str, Vec<usize>)> = Vec::new();

    for (i, unit) in units.iter().enumerate() {
        let key = unit.phonetic_tail.as_str();
        let slot = *index.entry(key).or_insert_with(|| {
            groups.push((key, Vec::new()));
            groups.len() - 1
        });
        groups[slot].1.push(i);
    }

    let mut families: Vec<RhymeFamily> = groups
        .into_iter()
        .filter(|(_, members)| members.len() >= 2)
        .map(|(key, members)| build_family(key, members, units, links))
        .collect();

    families.sort_by(|a, b| b.complexity.cmp(&a.complexity));
    families
}

fn build_family(
    key: &str,
    members: Vec<usize>,
    units: &[RhymeUnit],
    links: &[RhymeLink],
) -> RhymeFamily {
    let family_units: Vec<RhymeUnit> = members.iter().map(|&i| units[i].clone()).collect();

    let family_links: Vec<RhymeLink> = links
        .iter()
        .filter(|l| members.contains(&l.unit_a) && members.contains(&l.unit_b))
        .cloned()
        .collect();

    let mut pattern = &family_units[0].text_span;
    for unit in &family_units[1..] {
        if unit.text_span.chars().count() > pattern.chars().count() {
            pattern = &unit.text_span;
        }
    }

    RhymeFamily {
        phonetic_tail: key.to_string(),
        pattern_text: pattern.clone(),
        complexity: complexity(&family_units, &family_links),
        unit_indices: members,
        units: family_units,
        links: family_links,
    }
}

/// Complexity score in `MIN_COMPLEXITY..=MAX_COMPLEXITY`.
pub fn complexity(units: &[RhymeUnit], links: &[RhymeLink]) -> u8 {
    if units.is_empty() {
        return MIN_COMPLEXITY;
    }

    let total_len: usize = units.iter().map(|u| u.phonetic_tail.chars().count()).sum();
    let avg_len = total_len as f64 / units.len() as f64;
    let syllables = (avg_len / 2.0).floor();

    let mut score = 1.0 + syllables * 0.5;
    if links.iter().any(|l| l.match_type == MatchType::Slant) {
        score += 1.0;
    }
    if units.len() > 2 {
        score += 1.0;
    }

    score
        .round()
        .clamp(f64::from(MIN_COMPLEXITY), f64::from(MAX_COMPLEXITY)) as u8
}
