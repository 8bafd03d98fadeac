// Fixed phoneme tables: letter-to-phoneme map, iotation, devoicing, vowel
// reduction, consonant articulation groups, and similarity weights.
//
// Every table here is a plain `const` so the transliterator and scorer stay
// pure functions of their input. The scoring thresholds downstream were tuned
// against exactly these tables, so entries should not be "completed" casually:
// the devoicing set in particular is a deliberate subset, and extending it
// changes which lines rhyme.
//
// Used by `transliterate.rs` (letters, iotation, devoicing, reduction) and
// `similarity.rs` (vowel phonemes, consonant groups, weights).

/// Cyrillic vowel letters.
pub const VOWEL_LETTERS: &[char] = &['а', 'е', 'ё', 'и', 'о', 'у', 'ы', 'э', 'ю', 'я'];

/// Vowel phoneme characters as they appear in a simplified transcription.
pub const VOWEL_PHONEMES: &[char] = &['a', 'e', 'i', 'o', 'u', 'y'];

pub const SOFT_SIGN: char = 'ь';
pub const HARD_SIGN: char = 'ъ';

/// Marker appended to a consonant phoneme in the full transcription when the
/// consonant is palatalized.
pub const SOFTNESS_MARKER: char = '\'';

/// Base phoneme for each lower-case Cyrillic letter.
///
/// Iotated vowels map to their bare vowel here; the glide is added by the
/// transliterator depending on context. The soft sign is handled separately.
pub fn letter_phoneme(letter: char) -> Option<&'static str> {
    let phoneme = match letter {
        'а' => "a",
        'б' => "b",
        'в' => "v",
        'г' => "g",
        'д' => "d",
        'е' => "e",
        'ё' => "o",
        'ж' => "zh",
        'з' => "z",
        'и' => "i",
        'й' => "j",
        'к' => "k",
        'л' => "l",
        'м' => "m",
        'н' => "n",
        'о' => "o",
        'п' => "p",
        'р' => "r",
        'с' => "s",
        'т' => "t",
        'у' => "u",
        'ф' => "f",
        'х' => "h",
        'ц' => "ts",
        'ч' => "ch",
        'ш' => "sh",
        'щ' => "sch",
        'ъ' => "",
        'ы' => "y",
        'э' => "e",
        'ю' => "u",
        'я' => "a",
        _ => return None,
    };
    Some(phoneme)
}

/// Vowel letters that carry a leading glide in some positions.
pub const IOTATED_VOWELS: &[char] = &['е', 'ё', 'ю', 'я', 'и'];

/// Voiced consonant letter and the voiceless letter it turns into at the end
/// of a word.
pub const DEVOICING: &[(char, char)] = &[
    ('б', 'п'),
    ('в', 'ф'),
    ('г', 'к'),
    ('д', 'т'),
    ('ж', 'ш'),
    ('з', 'с'),
];

/// Vowel letter and the phoneme it collapses to when reduction is on.
/// Applied to every occurrence since stress position is unknown.
pub const VOWEL_REDUCTION: &[(char, &str)] = &[('о', "a"), ('е', "i"), ('я', "i")];

/// A named articulatory group of consonant phonemes.
#[derive(Debug, Clone, Copy)]
pub struct ConsonantGroup {
    pub label: &'static str,
    pub phonemes: &'static [&'static str],
}

/// Consonant groups used for partial credit in slant rhymes. A phoneme may
/// sit in more than one group (m, n, l are both place and manner members).
pub const CONSONANT_GROUPS: &[ConsonantGroup] = &[
    ConsonantGroup {
        label: "labial",
        phonemes: &["b", "p", "v", "f", "m"],
    },
    ConsonantGroup {
        label: "dental",
        phonemes: &["d", "t", "z", "s", "n", "l"],
    },
    ConsonantGroup {
        label: "velar",
        phonemes: &["g", "k", "h"],
    },
    ConsonantGroup {
        label: "sibilant",
        phonemes: &["zh", "sh", "ch", "sch", "ts"],
    },
    ConsonantGroup {
        label: "sonorant",
        phonemes: &["m", "n", "l", "r", "j"],
    },
];

/// Scoring weights for `phonetic_similarity`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimilarityWeights {
    /// Credit (and denominator share) for an aligned vowel pair.
    pub vowel_match: f64,
    /// Credit for identical consonants; also the denominator share for
    /// consonant and mixed pairs.
    pub consonant_match: f64,
    /// Partial credit for two consonants from the same group.
    pub consonant_group: f64,
    /// Subtracted per character of length difference.
    pub length_penalty: f64,
}

pub const SIMILARITY_WEIGHTS: SimilarityWeights = SimilarityWeights {
    vowel_match: 1.0,
    consonant_match: 0.8,
    consonant_group: 0.4,
    length_penalty: 0.1,
};

pub fn is_vowel_letter(c: char) -> bool {
    VOWEL_LETTERS.contains(&c)
}

pub fn is_vowel_phoneme(c: char) -> bool {
    VOWEL_PHONEMES.contains(&c)
}

pub fn is_iotated(c: char) -> bool {
    IOTATED_VOWELS.contains(&c)
}

/// Lower-case Cyrillic letter recognized by the letter table (including the
/// soft sign).
pub fn is_cyrillic_letter(c: char) -> bool {
    c == SOFT_SIGN || letter_phoneme(c).is_some()
}

/// Voiceless counterpart of a voiced letter, if it devoices.
pub fn devoiced(letter: char) -> Option<char> {
    DEVOICING
        .iter()
        .find(|(voiced, _)| *voiced == letter)
        .map(|(_, voiceless)| *voiceless)
}

/// Reduced phoneme for a vowel letter, if the letter reduces.
pub fn reduced(letter: char) -> Option<&'static str> {
    VOWEL_REDUCTION
        .iter()
        .find(|(vowel, _)| *vowel == letter)
        .map(|(_, phoneme)| *phoneme)
}

/// Whether two consonant phonemes share an articulatory group.
pub fn same_consonant_group(a: &str, b: &str) -> bool {
    CONSONANT_GROUPS
        .iter()
        .any(|g| g.phonemes.contains(&a) && g.phonemes.contains(&b))
}
