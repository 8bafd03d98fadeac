// Orthographic syllable helpers.
//
// These work on Cyrillic spelling rather than on the transcription, so they
// are only approximations: a boundary is placed before a single consonant
// that sits between two vowels, and consonant clusters stay with the
// preceding syllable. Good enough for syllable counts and display, not for
// scoring (scoring uses `transliterate::phonetic_tail`).

use crate::phonemes::is_vowel_letter;

/// Number of vowel letters in `word`.
pub fn count_syllables(word: &str) -> usize {
    word.to_lowercase()
        .chars()
        .filter(|c| is_vowel_letter(*c))
        .count()
}

/// Split a word into orthographic syllables.
pub fn split_into_syllables(word: &str) -> Vec<String> {
    let chars: Vec<char> = word.to_lowercase().chars().collect();
    let mut syllables = Vec::new();
    let mut current = String::new();

    for (i, &c) in chars.iter().enumerate() {
        current.push(c);
        if !is_vowel_letter(c) {
            continue;
        }
        let next = chars.get(i + 1).copied();
        let after_next = chars.get(i + 2).copied();
        let boundary = matches!(
            (next, after_next),
            (Some(n), Some(a)) if !is_vowel_letter(n) && is_vowel_letter(a)
        );
        if boundary {
            syllables.push(std::mem::take(&mut current));
        }
    }

    if !current.is_empty() {
        syllables.push(current);
    }
    syllables
}

/// Last `count` orthographic syllables of `word`, joined.
pub fn last_syllables(word: &str, count: usize) -> String {
    let syllables = split_into_syllables(word);
    let skip = syllables.len().saturating_sub(count);
    syllables[skip..].concat()
}

/// Rhyming part of a word: from the stressed position when known, otherwise
/// from the last vowel letter. `stress` is a character index.
pub fn rhyme_tail(word: &str, stress: Option<usize>) -> String {
    let chars: Vec<char> = word.to_lowercase().chars().collect();

    if let Some(idx) = stress {
        return chars.iter().skip(idx).collect();
    }

    match chars.iter().rposition(|c| is_vowel_letter(*c)) {
        Some(idx) => chars[idx..].iter().collect(),
        None => chars.into_iter().collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_count_syllables() {
        assert_eq!(count_syllables("молоко"), 3);
        assert_eq!(count_syllables("Ла Скала"), 3);
        assert_eq!(count_syllables("вск"), 0);
    }

    #[test]
    fn test_split_simple_cv() {
        assert_eq!(split_into_syllables("молоко"), vec!["мо", "ло", "ко"]);
    }

    #[test]
    fn test_split_keeps_cluster_with_previous() {
        // "ск" is a cluster, so the first boundary comes after "оска".
        assert_eq!(split_into_syllables("оскала"), vec!["оска", "ла"]);
        assert_eq!(split_into_syllables("кот"), vec!["кот"]);
    }

    #[test]
    fn test_last_syllables() {
        assert_eq!(last_syllables("молоко", 2), "локо");
        assert_eq!(last_syllables("молоко", 10), "молоко");
    }

    #[test]
    fn test_rhyme_tail() {
        assert_eq!(rhyme_tail("кошка", None), "а");
        assert_eq!(rhyme_tail("кошка", Some(1)), "ошка");
        assert_eq!(rhyme_tail("вск", None), "вск");
    }
}
