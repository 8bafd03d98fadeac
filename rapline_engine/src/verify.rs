// Seam for an external rhyme verifier.
//
// The rule tables miss puns, homophones and foreign words. Extraction can
// collect `RhymeCandidate`s for such pairs (see `link.rs`); a caller may then
// hand them to a `RhymeVerifier`, typically a language model behind some
// network client, and fold the verdicts back in. The engine never calls a
// verifier during extraction and never does I/O itself.
//
// `verify_candidates()` is the driver: it sends candidates in fixed-size
// batches, logs and skips batches that fail (no retries; retry policy belongs
// to the verifier), and keeps only verdicts that say "rhyme" with enough
// confidence.
//
// `parse_verdicts()` decodes the free-form text such collaborators tend to
// return: a JSON array somewhere in the response, one object per pair, with
// a 1-based `idx` pointing into the batch that was sent. `numbered_pairs()`
// renders a batch in the matching numbered form.

use serde::{Deserialize, Serialize};

use crate::config::RhymeConfig;
use crate::error::VerifyError;
use crate::link::RhymeCandidate;

/// What kind of rhyme a verifier says a pair is.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VerdictKind {
    Exact,
    Slant,
    Assonance,
    /// Word play: homophones, split words, names.
    Pun,
    #[serde(rename = "none")]
    NotRhyme,
}

/// A verifier's judgement on one candidate pair.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Verdict {
    pub tail_a: String,
    pub tail_b: String,
    pub is_rhyme: bool,
    pub kind: VerdictKind,
    /// In [0, 1].
    pub confidence: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
}

/// An accepted verdict.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct VerifiedRhyme {
    pub tail_a: String,
    pub tail_b: String,
    pub kind: VerdictKind,
    pub confidence: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
}

/// External judge for candidate pairs. One call per batch; verdicts may come
/// back in any order and may omit pairs.
pub trait RhymeVerifier {
    fn verify(&self, batch: &[RhymeCandidate]) -> Result<Vec<Verdict>, VerifyError>;
}

impl<F> RhymeVerifier for F
where
    F: Fn(&[RhymeCandidate]) -> Result<Vec<Verdict>, VerifyError>,
{
    fn verify(&self, batch: &[RhymeCandidate]) -> Result<Vec<Verdict>, VerifyError> {
        self(batch)
    }
}

/// Run `candidates` through `verifier` in batches and keep accepted verdicts.
pub fn verify_candidates<V: RhymeVerifier + ?Sized>(
    verifier: &V,
    candidates: &[RhymeCandidate],
    config: &RhymeConfig,
) -> Vec<VerifiedRhyme> {
    let mut verdicts = Vec::new();

    for (n, batch) in candidates
        .chunks(config.verifier_batch_size.max(1))
        .enumerate()
    {
        match verifier.verify(batch) {
            Ok(batch_verdicts) => verdicts.extend(batch_verdicts),
            Err(e) => {
                tracing::warn!(
                    batch = n,
                    size = batch.len(),
                    error = %e,
                    "verifier batch failed"
                );
            }
        }
    }

    let accepted = accept_verdicts(verdicts, config.verdict_min_confidence);
    tracing::debug!(
        candidates = candidates.len(),
        accepted = accepted.len(),
        "verified candidates"
    );
    accepted
}

/// Keep verdicts that call the pair a rhyme with at least `min_confidence`.
pub fn accept_verdicts(verdicts: Vec<Verdict>, min_confidence: f64) -> Vec<VerifiedRhyme> {
    verdicts
        .into_iter()
        .filter(|v| v.is_rhyme && v.confidence >= min_confidence)
        .map(|v| VerifiedRhyme {
            tail_a: v.tail_a,
            tail_b: v.tail_b,
            kind: v.kind,
            confidence: v.confidence,
            explanation: v.explanation,
        })
        .collect()
}

/// One numbered line per pair, `1. "tail a" / "tail b"`, matching the `idx`
/// that `parse_verdicts()` expects back.
pub fn numbered_pairs(batch: &[RhymeCandidate]) -> String {
    batch
        .iter()
        .enumerate()
        .map(|(i, c)| format!("{}. \"{}\" / \"{}\"", i + 1, c.tail_a, c.tail_b))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Wire shape of one verdict inside a verifier response.
#[derive(Deserialize)]
struct RawVerdict {
    idx: usize,
    #[serde(rename = "isRhyme")]
    is_rhyme: bool,
    #[serde(rename = "type")]
    kind: VerdictKind,
    confidence: f64,
    #[serde(default)]
    explanation: Option<String>,
}

/// Decode verdicts from a free-form response for `batch`.
///
/// The outermost `[...]` in the text must be a JSON array. Entries that do
/// not decode, point outside the batch, or carry a confidence outside [0, 1]
/// are dropped with a warning.
pub fn parse_verdicts(
    response: &str,
    batch: &[RhymeCandidate],
) -> Result<Vec<Verdict>, VerifyError> {
    let span = match (response.find('['), response.rfind(']')) {
        (Some(start), Some(end)) if start < end => &response[start..=end],
        _ => {
            return Err(VerifyError::MalformedResponse(
                "no JSON array in response".to_string(),
            ));
        }
    };

    let items: Vec<serde_json::Value> = serde_json::from_str(span)
        .map_err(|e| VerifyError::MalformedResponse(e.to_string()))?;

    let mut verdicts = Vec::with_capacity(items.len());
    for item in items {
        let raw: RawVerdict = match serde_json::from_value(item) {
            Ok(raw) => raw,
            Err(e) => {
                tracing::warn!(error = %e, "dropping undecodable verdict");
                continue;
            }
        };
        let Some(candidate) = raw.idx.checked_sub(1).and_then(|i| batch.get(i)) else {
            tracing::warn!(
                idx = raw.idx,
                batch = batch.len(),
                "dropping verdict for unknown pair"
            );
            continue;
        };
        if !(0.0..=1.0).contains(&raw.confidence) {
            tracing::warn!(
                idx = raw.idx,
                confidence = raw.confidence,
                "dropping verdict with bad confidence"
            );
            continue;
        }
        verdicts.push(Verdict {
            tail_a: candidate.tail_a.clone(),
            tail_b: candidate.tail_b.clone(),
            is_rhyme: raw.is_rhyme,
            kind: raw.kind,
            confidence: raw.confidence,
            explanation: raw.explanation,
        });
    }
    Ok(verdicts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    fn candidate(tail_a: &str, tail_b: &str) -> RhymeCandidate {
        RhymeCandidate {
            unit_a: 0,
            unit_b: 1,
            line_a: tail_a.to_string(),
            line_b: tail_b.to_string(),
            tail_a: tail_a.to_string(),
            tail_b: tail_b.to_string(),
            phonetic_a: String::new(),
            phonetic_b: String::new(),
            distance: 1,
            rule_similarity: 0.4,
        }
    }

    fn verdict(c: &RhymeCandidate, is_rhyme: bool, confidence: f64) -> Verdict {
        Verdict {
            tail_a: c.tail_a.clone(),
            tail_b: c.tail_b.clone(),
            is_rhyme,
            kind: if is_rhyme {
                VerdictKind::Pun
            } else {
                VerdictKind::NotRhyme
            },
            confidence,
            explanation: None,
        }
    }

    #[test]
    fn test_parse_verdicts_from_free_text() {
        let batch = vec![
            candidate("Вин Дизель", "вин дизель"),
            candidate("эманация", "Эма нация"),
        ];
        let response = r#"Sure! Here you go:
[
  {"idx": 2, "isRhyme": true, "type": "pun", "confidence": 0.9, "explanation": "split word"},
  {"idx": 1, "isRhyme": false, "type": "none", "confidence": 0.6}
]"#;
        let verdicts = parse_verdicts(response, &batch).unwrap();
        assert_eq!(verdicts.len(), 2);
        assert_eq!(verdicts[0].tail_a, "эманация");
        assert_eq!(verdicts[0].kind, VerdictKind::Pun);
        assert_eq!(verdicts[0].explanation.as_deref(), Some("split word"));
        assert_eq!(verdicts[1].tail_a, "Вин Дизель");
        assert_eq!(verdicts[1].kind, VerdictKind::NotRhyme);
    }

    #[test]
    fn test_parse_verdicts_drops_bad_entries() {
        let batch = vec![candidate("а", "б")];
        let response = r#"[
            {"idx": 0, "isRhyme": true, "type": "exact", "confidence": 0.9},
            {"idx": 2, "isRhyme": true, "type": "exact", "confidence": 0.9},
            {"idx": 1, "isRhyme": true, "type": "rhymey", "confidence": 0.9},
            {"idx": 1, "isRhyme": true, "type": "slant", "confidence": 1.7},
            {"idx": 1, "isRhyme": true, "type": "slant", "confidence": 0.8}
        ]"#;
        let verdicts = parse_verdicts(response, &batch).unwrap();
        assert_eq!(verdicts.len(), 1);
        assert_eq!(verdicts[0].kind, VerdictKind::Slant);
    }

    #[test]
    fn test_parse_verdicts_rejects_non_array() {
        let batch = vec![candidate("а", "б")];
        assert!(matches!(
            parse_verdicts("no idea", &batch),
            Err(VerifyError::MalformedResponse(_))
        ));
        assert!(matches!(
            parse_verdicts("] backwards [", &batch),
            Err(VerifyError::MalformedResponse(_))
        ));
        assert!(matches!(
            parse_verdicts("[not json]", &batch),
            Err(VerifyError::MalformedResponse(_))
        ));
    }

    #[test]
    fn test_accept_verdicts_filters() {
        let c = candidate("а", "б");
        let verdicts = vec![
            verdict(&c, true, 0.9),
            verdict(&c, true, 0.7),
            verdict(&c, true, 0.69),
            verdict(&c, false, 0.99),
        ];
        let accepted = accept_verdicts(verdicts, 0.7);
        assert_eq!(accepted.len(), 2);
        assert!(accepted.iter().all(|v| v.confidence >= 0.7));
    }

    #[test]
    fn test_verify_candidates_batches_and_skips_failures() {
        let candidates: Vec<RhymeCandidate> = (0..25)
            .map(|i| candidate(&format!("a{i}"), &format!("b{i}")))
            .collect();
        let calls = Cell::new(0);
        let verifier = |batch: &[RhymeCandidate]| -> Result<Vec<Verdict>, VerifyError> {
            calls.set(calls.get() + 1);
            if calls.get() == 2 {
                return Err(VerifyError::Unavailable("rate limited".into()));
            }
            Ok(batch.iter().map(|c| verdict(c, true, 0.9)).collect())
        };

        let accepted = verify_candidates(&verifier, &candidates, &RhymeConfig::default());
        // Batches of 10, 10, 5; the second one fails.
        assert_eq!(calls.get(), 3);
        assert_eq!(accepted.len(), 15);
        assert_eq!(accepted[10].tail_a, "a20");
    }

    #[test]
    fn test_numbered_pairs() {
        let batch = vec![candidate("раз", "два"), candidate("три", "четыре")];
        assert_eq!(
            numbered_pairs(&batch),
            "1. \"раз\" / \"два\"\n2. \"три\" / \"четыре\""
        );
    }
}
