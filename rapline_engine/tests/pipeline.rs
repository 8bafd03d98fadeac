// End-to-end tests for the extraction pipeline: raw multi-track text in,
// units/links/families out. Per-module behavior is covered by the unit tests
// next to each module; these check the properties that only show up when the
// stages run together.

use rapline_engine::{
    RhymeConfig, RhymeDictionary, RhymeVerifier, Verdict, VerdictKind, VerifyError,
    extract_all, extract_tail, parse_tracks, verify_candidates,
};
use rapline_phonetic::{phonetic_similarity, phonetic_tail};

const LA_SCALA: &str = "\
## Ла Скала
[Куплет 1]
Я вам ударом снёс пол-оскала
Мы не в Милане, но тут своя Ла Скала
Вода в ведре её не полоскала
После того как она меня поласкала, а
";

const OTHER_TRACK: &str = "\
## Другой
[Припев]
Я иду домой по тёмной дороге (эй)
Ноги несут меня сами по себе
Мама ждёт меня у старого порога
Я не верю больше никакой судьбе
";

const UNEVEN_SPACING: &str = "\
## Пробелы
[Куплет 1]
Я иду  домой по тёмной  дороге
Мама ждёт\tменя у  порога
";

#[test]
fn scenario_a_tail_of_plain_line() {
    assert_eq!(
        extract_tail("Я вам ударом снёс пол-оскала", 3),
        "ударом снёс пол-оскала"
    );
}

#[test]
fn scenario_b_tail_skips_dangling_particle() {
    assert_eq!(
        extract_tail("она меня поласкала, а", 3),
        "она меня поласкала"
    );
}

#[test]
fn scenario_c_equivalent_tails_form_one_family() {
    let tails: Vec<String> = ["пол-оскала", "Ла Скала", "полоскала", "поласкала"]
        .iter()
        .map(|t| phonetic_tail(t, 2))
        .collect();
    assert!(tails.iter().all(|t| t == "skala"));

    let results = extract_all(LA_SCALA, &RhymeConfig::default());
    assert_eq!(results.len(), 1);
    let families = &results[0].result.families;
    assert_eq!(families.len(), 1);
    assert!(families[0].units.len() >= 4);
    assert_eq!(families[0].phonetic_tail, "skala");
}

#[test]
fn scenario_d_similarity_anchors() {
    assert_eq!(phonetic_similarity("askala", "askala"), 1.0);
    assert!(phonetic_similarity("askala", "askalo") > 0.7);
    assert!(phonetic_similarity("askala", "moloko") < 0.5);
}

#[test]
fn scenario_e_tracks_are_independent() {
    let config = RhymeConfig::default();
    let alone = extract_all(LA_SCALA, &config);
    let together = extract_all(&format!("{OTHER_TRACK}\n{LA_SCALA}"), &config);

    assert_eq!(together.len(), 2);
    assert_eq!(together[0].title, "Другой");
    assert_eq!(together[1], alone[0]);
}

#[test]
fn extraction_is_deterministic() {
    let text = format!("{LA_SCALA}\n{OTHER_TRACK}");
    let config = RhymeConfig {
        collect_candidates: true,
        ..RhymeConfig::default()
    };
    assert_eq!(extract_all(&text, &config), extract_all(&text, &config));
}

#[test]
fn structural_invariants_hold() {
    let text = format!("{LA_SCALA}\n{OTHER_TRACK}");
    for window in [1, 2, 4, 8] {
        let config = RhymeConfig {
            window_size: window,
            ..RhymeConfig::default()
        };
        for track in extract_all(&text, &config) {
            let r = &track.result;
            for link in &r.links {
                assert!(link.distance >= 1 && link.distance <= window);
                assert!(link.unit_a < link.unit_b);
                assert!(link.unit_b < r.units.len());
                assert!(link.similarity >= config.link_threshold);
            }
            for family in &r.families {
                assert!(family.units.len() >= 2);
                assert!((1..=5).contains(&family.complexity));
                assert!(family
                    .units
                    .iter()
                    .all(|u| u.phonetic_tail == family.phonetic_tail));
                assert!(family.links.iter().all(|l| {
                    family.unit_indices.contains(&l.unit_a)
                        && family.unit_indices.contains(&l.unit_b)
                }));
            }
            for pair in r.families.windows(2) {
                assert!(pair[0].complexity >= pair[1].complexity);
            }
        }
    }
}

#[test]
fn units_point_at_their_span() {
    for text in [LA_SCALA, UNEVEN_SPACING] {
        let results = extract_all(text, &RhymeConfig::default());
        assert!(!results[0].result.units.is_empty());
        for unit in &results[0].result.units {
            let span: String = unit
                .text
                .chars()
                .skip(unit.char_start)
                .take(unit.char_end - unit.char_start)
                .collect();
            let words: Vec<&str> = span.split_whitespace().collect();
            assert_eq!(words.join(" "), unit.text_span);
            assert_eq!(unit.section, "Куплет 1");
        }
    }
}

#[test]
fn section_counters_and_adlibs() {
    let tracks = parse_tracks(OTHER_TRACK, &RhymeConfig::default());
    let line = &tracks[0].lines[0];
    assert_eq!(line.text, "Я иду домой по тёмной дороге (эй)");
    assert_eq!(line.clean_text, "Я иду домой по тёмной дороге");
    assert_eq!(line.tail, "по тёмной дороге");
}

struct ScriptedVerifier;

impl RhymeVerifier for ScriptedVerifier {
    fn verify(
        &self,
        batch: &[rapline_engine::RhymeCandidate],
    ) -> Result<Vec<Verdict>, VerifyError> {
        Ok(batch
            .iter()
            .map(|c| Verdict {
                tail_a: c.tail_a.clone(),
                tail_b: c.tail_b.clone(),
                is_rhyme: c.distance == 1,
                kind: VerdictKind::Slant,
                confidence: 0.8,
                explanation: None,
            })
            .collect())
    }
}

#[test]
fn candidates_flow_through_verifier_into_dictionary() {
    let text = "\
## Кандидаты
тёмная ночь
белая дорога
";
    let config = RhymeConfig {
        collect_candidates: true,
        ..RhymeConfig::default()
    };
    let results = extract_all(text, &config);
    let candidates = results[0].result.candidates.clone().unwrap_or_default();
    assert_eq!(candidates.len(), 1);

    let verified = verify_candidates(&ScriptedVerifier, &candidates, &config);
    assert_eq!(verified.len(), 1);

    let mut dictionary = RhymeDictionary::new();
    dictionary.add_result(&results[0].result);
    for rhyme in &verified {
        dictionary.add_verified(rhyme);
    }
    let entries = dictionary.entries();
    assert_eq!(entries.len(), 1);
    assert!(entries[0].verified);
    assert_eq!(entries[0].variants, vec!["тёмная ночь", "белая дорога"]);
}
