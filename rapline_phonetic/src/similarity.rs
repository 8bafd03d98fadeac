// Phonetic similarity between two phonetic tails, and match classification.
//
// Rhyme lives at the end of a line, so the two tails are aligned at their
// right edges and compared position by position over the shorter length.
// Each position is one transcription character: multi-letter phonemes such
// as "sh" are compared letter by letter, which is why the sibilant group
// rarely fires.
//
// Score = max(0, matched − length_penalty × |len(a) − len(b)|) / possible,
// rounded to two decimals. `possible` grows for every compared position, so a
// vowel facing a consonant counts against the score without earning anything.
//
// The result is symmetric: which string is "shorter" only decides the loop
// bound, and every per-position test is itself symmetric.

use crate::phonemes::{SIMILARITY_WEIGHTS, is_vowel_phoneme, same_consonant_group};
use crate::types::MatchType;

/// Similarity at or above which two tails count as rhyming.
pub const RHYME_THRESHOLD: f64 = 0.7;

/// Similarity of two simplified phonetic tails in [0, 1].
pub fn phonetic_similarity(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }

    let (shorter, longer) = if a.len() <= b.len() { (&a, &b) } else { (&b, &a) };
    let w = SIMILARITY_WEIGHTS;

    let mut score = 0.0;
    let mut max_score = 0.0;

    for (ca, cb) in shorter.iter().rev().zip(longer.iter().rev()) {
        match (is_vowel_phoneme(*ca), is_vowel_phoneme(*cb)) {
            (true, true) => {
                max_score += w.vowel_match;
                if ca == cb {
                    score += w.vowel_match;
                }
            }
            (false, false) => {
                max_score += w.consonant_match;
                if ca == cb {
                    score += w.consonant_match;
                } else if chars_share_group(*ca, *cb) {
                    score += w.consonant_group;
                }
            }
            _ => max_score += w.consonant_match,
        }
    }

    if max_score == 0.0 {
        return 0.0;
    }

    let length_diff = (longer.len() - shorter.len()) as f64;
    let similarity = ((score - length_diff * w.length_penalty) / max_score).max(0.0);
    (similarity * 100.0).round() / 100.0
}

fn chars_share_group(a: char, b: char) -> bool {
    let mut buf_a = [0u8; 4];
    let mut buf_b = [0u8; 4];
    same_consonant_group(a.encode_utf8(&mut buf_a), b.encode_utf8(&mut buf_b))
}

/// Match type for a similarity score, or `None` below the consonance band.
pub fn classify_match(similarity: f64) -> Option<MatchType> {
    [
        MatchType::Exact,
        MatchType::Slant,
        MatchType::Assonance,
        MatchType::Consonance,
    ]
    .into_iter()
    .find(|t| similarity >= t.min_similarity())
}

/// Whether two phonetic tails reach `threshold`.
pub fn are_rhyming(tail_a: &str, tail_b: &str, threshold: f64) -> bool {
    phonetic_similarity(tail_a, tail_b) >= threshold
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identical_tails() {
        assert_eq!(phonetic_similarity("askala", "askala"), 1.0);
    }

    #[test]
    fn test_single_vowel_change_is_slant() {
        let s = phonetic_similarity("askala", "askalo");
        assert_eq!(s, 0.81);
        assert!(s > 0.7);
        assert_eq!(classify_match(s), Some(MatchType::Slant));
    }

    #[test]
    fn test_unrelated_tails() {
        assert!(phonetic_similarity("askala", "moloko") < 0.5);
    }

    #[test]
    fn test_empty_tail_scores_zero() {
        assert_eq!(phonetic_similarity("", "askala"), 0.0);
        assert_eq!(phonetic_similarity("askala", ""), 0.0);
        assert_eq!(phonetic_similarity("", ""), 0.0);
    }

    #[test]
    fn test_consonant_group_partial_credit() {
        // b/p share the labial group: 0.4 of a possible 0.8 at that position.
        let s = phonetic_similarity("aba", "apa");
        assert_eq!(s, 0.86);
        // k/l share nothing.
        assert_eq!(phonetic_similarity("aka", "ala"), 0.71);
    }

    #[test]
    fn test_length_penalty() {
        // "kala" aligned inside "skala" is a perfect match minus one char.
        assert_eq!(phonetic_similarity("kala", "skala"), 0.97);
    }

    #[test]
    fn test_symmetry_and_self_identity() {
        let samples = [
            "skala", "askala", "moloko", "laka", "a dam", "upal", "ji", "zhy", "na-ra", "kat",
        ];
        for a in samples {
            assert_eq!(phonetic_similarity(a, a), 1.0, "self-identity for '{a}'");
            for b in samples {
                assert_eq!(
                    phonetic_similarity(a, b),
                    phonetic_similarity(b, a),
                    "symmetry for '{a}' / '{b}'"
                );
                let s = phonetic_similarity(a, b);
                assert!((0.0..=1.0).contains(&s));
            }
        }
    }

    #[test]
    fn test_symmetry_and_self_identity_over_lyric_tails() {
        use crate::transliterate::{phonetic_tail, simplified_transliterate};

        let lines = [
            "Я вам ударом снёс пол-оскала",
            "Мы не в Милане, но тут своя Ла Скала",
            "Вода в ведре её не полоскала",
            "После того как она меня поласкала, а",
            "Я иду домой по тёмной дороге",
            "Ноги несут меня сами по себе",
            "Мама ждёт меня у старого порога",
            "Я не верю больше никакой судьбе",
            "ПОДЪЁМ В ШЕСТЬ, ОБЪЁМ В ПЯТЬ",
            "Съел и вышел в ночь",
            "Эй, йоу, это хип-хоп",
            "Флоу как у Eminem, но по-русски",
            "Тёмная ночь, белая дорога",
            "Щёлкнул затвор, и щека в крови",
            "Жжёт изнутри, жизнь на износ",
            "Юла кружится, в ушах шум",
            "Вьюга завьюжила дворы",
            "Район спит, только я не сплю",
            "Хлеб да соль, кровь и пот",
            "Чё-то там про деньги, чё-то там про славу",
            "Ёлки-палки, лес густой",
            "Быть или не быть, вот в чём вопрос",
            "Зря ты так, брат",
            "Бит качает, зал кричит",
            "Цепь на шее, цель в прицеле",
            "Fresh, fly, и всё ещё живой",
            "А",
            "",
        ];

        let mut tails: Vec<String> = Vec::new();
        for line in lines {
            for syllables in 1..=3 {
                tails.push(phonetic_tail(line, syllables));
            }
            tails.push(simplified_transliterate(line));
        }

        for a in &tails {
            if !a.is_empty() {
                assert_eq!(phonetic_similarity(a, a), 1.0, "self-identity for '{a}'");
            }
            for b in &tails {
                let s = phonetic_similarity(a, b);
                assert_eq!(s, phonetic_similarity(b, a), "symmetry for '{a}' / '{b}'");
                assert!((0.0..=1.0).contains(&s), "'{a}' / '{b}' scored {s}");
            }
        }
    }

    #[test]
    fn test_classify_bands() {
        assert_eq!(classify_match(1.0), Some(MatchType::Exact));
        assert_eq!(classify_match(0.95), Some(MatchType::Exact));
        assert_eq!(classify_match(0.94), Some(MatchType::Slant));
        assert_eq!(classify_match(0.7), Some(MatchType::Slant));
        assert_eq!(classify_match(0.69), Some(MatchType::Assonance));
        assert_eq!(classify_match(0.5), Some(MatchType::Assonance));
        assert_eq!(classify_match(0.3), Some(MatchType::Consonance));
        assert_eq!(classify_match(0.29), None);
    }

    #[test]
    fn test_are_rhyming() {
        assert!(are_rhyming("skala", "skala", RHYME_THRESHOLD));
        assert!(!are_rhyming("skala", "moloko", RHYME_THRESHOLD));
    }
}
