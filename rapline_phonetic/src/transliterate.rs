// Grapheme-to-phoneme transliteration and phonetic tail extraction.
//
// `transliterate()` walks the lower-cased input once and emits two strings at
// the same time: `full` keeps `'` softness markers, `simplified` drops them.
// Three context rules sit on top of the letter table in `phonemes.rs`:
//
// 1. Iotated vowels (е ё ю я и) get a `j` glide at the start of a word, after
//    another vowel, or after the soft sign. Elsewhere they contribute the
//    bare vowel and the consonant before them is marked soft. The hard sign
//    is silent and licenses neither.
// 2. Voiced consonants in the devoicing table turn voiceless when the next
//    character is absent, whitespace, or a hyphen.
// 3. With reduction on, о/е/я collapse to their reduced phoneme everywhere.
//    There is no stress model, so this is a blanket substitution.
//
// Whitespace and hyphens pass through as word boundaries; anything else that
// is not a Cyrillic letter (Latin, digits, punctuation) is dropped.
//
// `phonetic_tail()` cuts the simplified transcription down to its last N
// syllables, which is the unit the scorer and the family clusterer compare.

use crate::phonemes::{
    HARD_SIGN, SOFT_SIGN, SOFTNESS_MARKER, devoiced, is_cyrillic_letter, is_iotated,
    is_vowel_letter, is_vowel_phoneme, letter_phoneme, reduced,
};
use crate::types::Transliteration;

/// Default number of trailing syllables in a phonetic tail.
pub const DEFAULT_TAIL_SYLLABLES: usize = 2;

/// Characters that separate words in both the source text and the
/// transcription.
pub fn is_word_boundary(c: char) -> bool {
    c.is_whitespace() || c == '-'
}

/// Transliterate a phrase into full and simplified phonetic strings.
pub fn transliterate(text: &str, apply_reduction: bool) -> Transliteration {
    let normalized = text.trim().to_lowercase();
    let chars: Vec<char> = normalized.chars().collect();

    let mut full = String::with_capacity(chars.len() * 2);
    let mut simplified = String::with_capacity(chars.len() * 2);

    for (i, &c) in chars.iter().enumerate() {
        let prev = i.checked_sub(1).map(|p| chars[p]);
        let next = chars.get(i + 1).copied();

        if !is_cyrillic_letter(c) {
            if is_word_boundary(c) {
                full.push(c);
                simplified.push(c);
            }
            continue;
        }

        if c == SOFT_SIGN {
            full.push(SOFTNESS_MARKER);
            continue;
        }
        if c == HARD_SIGN {
            continue;
        }

        if is_vowel_letter(c) {
            let phoneme = vowel_phoneme(c, prev, apply_reduction);
            full.push_str(&phoneme);
            simplified.push_str(&phoneme);
            continue;
        }

        let letter = match next {
            None => devoiced(c).unwrap_or(c),
            Some(n) if is_word_boundary(n) => devoiced(c).unwrap_or(c),
            Some(_) => c,
        };
        let phoneme = letter_phoneme(letter).unwrap_or_default();
        full.push_str(phoneme);
        simplified.push_str(phoneme);
        if next.is_some_and(is_iotated) {
            full.push(SOFTNESS_MARKER);
        }
    }

    Transliteration { full, simplified }
}

/// Phoneme for a vowel letter given the character before it.
fn vowel_phoneme(letter: char, prev: Option<char>, apply_reduction: bool) -> String {
    if let Some(r) = reduced(letter).filter(|_| apply_reduction) {
        return r.to_string();
    }
    let bare = letter_phoneme(letter).unwrap_or_default();
    if is_iotated(letter) && takes_glide(prev) {
        format!("j{bare}")
    } else {
        bare.to_string()
    }
}

/// An iotated vowel is pronounced with its glide when nothing consonantal
/// precedes it within the word.
fn takes_glide(prev: Option<char>) -> bool {
    match prev {
        None => true,
        Some(p) => is_vowel_letter(p) || p == SOFT_SIGN || !is_cyrillic_letter(p),
    }
}

/// Simplified transcription with reduction on, for quick comparisons.
pub fn simplified_transliterate(text: &str) -> String {
    transliterate(text, true).simplified
}

/// Last `syllables` syllables of the reduced, simplified transcription.
pub fn phonetic_tail(text: &str, syllables: usize) -> String {
    phonetic_tail_with(text, syllables, true)
}

/// Last `syllables` syllables of the simplified transcription.
///
/// Counts vowel phonemes from the end; at the N-th vowel, extends left over
/// the consonant onset of that syllable (stopping at a vowel or a word
/// boundary). Returns an empty string when the phrase has fewer than N vowels.
pub fn phonetic_tail_with(text: &str, syllables: usize, apply_reduction: bool) -> String {
    let simplified: Vec<char> = transliterate(text, apply_reduction)
        .simplified
        .chars()
        .collect();

    let mut vowels = 0;
    for i in (0..simplified.len()).rev() {
        if !is_vowel_phoneme(simplified[i]) {
            continue;
        }
        vowels += 1;
        if vowels >= syllables {
            let mut start = i;
            while start > 0
                && !is_vowel_phoneme(simplified[start - 1])
                && !is_word_boundary(simplified[start - 1])
            {
                start -= 1;
            }
            return simplified[start..].iter().collect();
        }
    }

    String::new()
}
