// Lyric segmentation: raw text into tracks, sections and lines.
//
// Input is plain text with light markup:
// - `## Title` starts a new track.
// - A section header (`[Куплет 1]`, `Припев:`, `[Hook]`, ...) starts a new
//   section. Known headers map to a `SectionKind`; any other fully bracketed
//   line, or a single Cyrillic word with an optional number and a trailing
//   colon, becomes an `Unknown` section.
// - Every other non-blank line inside a track is a lyric line. Parenthesised
//   and bracketed ad-libs are stripped to form `clean_text`, and the last few
//   words of the clean text become the line's `tail`.
//
// Content before the first title marker has nowhere to go and is dropped. A
// lyric line seen before any section header opens an implicit `Unknown`
// section. Lines whose tail comes out empty (pure ad-lib lines) are dropped
// without advancing the line counters.
//
// See also: `link.rs`, which turns each line's tail into a `RhymeUnit`.

use std::ops::Range;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::config::RhymeConfig;

/// Punctuation stripped from the end of a line before picking its tail.
const TRAILING_PUNCTUATION: [char; 6] = ['.', ',', '!', '?', ':', ';'];

/// Words of at most this many characters are treated as particles or
/// prepositions when choosing a tail.
const SHORT_WORD_CHARS: usize = 2;

static TITLE_RE: LazyLock<Regex> = LazyLock::new(|| compile(r"^##\s+(.+)$"));

static REMARK_RE: LazyLock<Regex> = LazyLock::new(|| compile(r"\s*[(\[][^)\]]*[)\]]\s*"));

static SECTION_RES: LazyLock<Vec<(SectionKind, Regex)>> = LazyLock::new(|| {
    [
        (SectionKind::Verse, r"^\[?(куплет|verse|куп\.?)\s*\d*\]?:?$"),
        (
            SectionKind::Chorus,
            r"^\[?(припев|chorus|хор|ref|refrain)\s*\d*\]?:?$",
        ),
        (SectionKind::Intro, r"^\[?(интро|intro|вступление)\]?:?$"),
        (SectionKind::Outro, r"^\[?(аутро|outro|концовка)\]?:?$"),
        (SectionKind::Bridge, r"^\[?(бридж|bridge|переход)\]?:?$"),
        (SectionKind::Hook, r"^\[?(хук|hook)\]?:?$"),
        (SectionKind::Unknown, r"^\[.*\]$"),
        (SectionKind::Unknown, r"^[А-Яа-я]+\s*\d*:$"),
    ]
    .into_iter()
    .map(|(kind, pattern)| {
        let pattern = match kind {
            SectionKind::Unknown => pattern.to_string(),
            _ => format!("(?i){pattern}"),
        };
        (kind, compile(&pattern))
    })
    .collect()
});

/// Patterns are literals; a failure here is caught by the tests below.
fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).expect("static segmenter pattern must compile")
}

/// Kind of a lyric section, as named by its header.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionKind {
    Verse,
    Chorus,
    Intro,
    Outro,
    Bridge,
    Hook,
    Unknown,
}

/// One lyric line.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Line {
    /// Position within the owning section.
    pub index: usize,
    /// Position within the owning track.
    pub global_index: usize,
    /// Line as written, ad-libs included.
    pub text: String,
    /// Line with ad-libs removed.
    pub clean_text: String,
    /// Trailing words of `clean_text` that carry the rhyme, single-spaced.
    pub tail: String,
    /// Character offset in `clean_text` where the tail's first word starts.
    pub tail_start: usize,
    /// Character offset in `clean_text` one past the tail's last word. The
    /// region may hold runs of whitespace that `tail` collapses.
    pub tail_end: usize,
}

impl Line {
    /// Build a line from its trimmed text, or `None` when no words are left
    /// once ad-libs and trailing punctuation are removed.
    pub fn new(index: usize, global_index: usize, text: &str, tail_words: usize) -> Option<Self> {
        let clean_text = clean_line(text);
        let range = tail_range(&clean_text, tail_words)?;
        let tail = join_words(&clean_text[range.clone()]);
        let tail_start = clean_text[..range.start].chars().count();
        let tail_end = tail_start + clean_text[range].chars().count();

        Some(Self {
            index,
            global_index,
            text: text.to_string(),
            clean_text,
            tail,
            tail_start,
            tail_end,
        })
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    pub kind: SectionKind,
    /// Header text with square brackets removed, e.g. "Куплет 1".
    pub name: String,
    pub lines: Vec<Line>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Track {
    pub title: String,
    pub sections: Vec<Section>,
    /// Every line of every section, in track order.
    pub lines: Vec<Line>,
}

impl Track {
    fn new(title: &str) -> Self {
        Self {
            title: title.to_string(),
            sections: Vec::new(),
            lines: Vec::new(),
        }
    }
}

/// Classify a trimmed line as a section header, if it is one.
pub fn detect_section_kind(line: &str) -> Option<SectionKind> {
    SECTION_RES
        .iter()
        .find(|(_, re)| re.is_match(line))
        .map(|(kind, _)| *kind)
}

/// Strip parenthesised and bracketed ad-libs from a line.
pub fn clean_line(text: &str) -> String {
    REMARK_RE.replace_all(text, " ").trim().to_string()
}

/// The last `max_words` words of a line, the part that carries the rhyme.
///
/// Trailing punctuation is ignored. A one- or two-letter word cut off from the
/// rest of the line by punctuation ("..., а") is a dangling particle and is
/// dropped before choosing. Otherwise, when the line ends in such a short
/// word, one more word is taken so the tail still has some substance.
pub fn extract_tail(text: &str, max_words: usize) -> String {
    tail_range(text, max_words)
        .map(|range| join_words(&text[range]))
        .unwrap_or_default()
}

/// Byte range of the tail within `text`, from the start of its first word to
/// the end of its last word, trailing punctuation excluded. See
/// `extract_tail()` for how the words are chosen.
pub fn tail_range(text: &str, max_words: usize) -> Option<Range<usize>> {
    let mut words = word_ranges(text);
    strip_last_word(text, &mut words);

    while let [.., prev, last] = words.as_slice() {
        if !is_short_word(&text[last.clone()])
            || !text[prev.clone()].ends_with(TRAILING_PUNCTUATION)
        {
            break;
        }
        words.pop();
        strip_last_word(text, &mut words);
    }

    let last = words.last()?;
    let take = if is_short_word(&text[last.clone()]) {
        max_words + 1
    } else {
        max_words
    };
    let first = words.get(words.len().saturating_sub(take))?;
    Some(first.start..last.end)
}

/// Byte ranges of the whitespace-separated words of `text`.
fn word_ranges(text: &str) -> Vec<Range<usize>> {
    let mut words = Vec::new();
    let mut start = None;
    for (i, c) in text.char_indices() {
        match (c.is_whitespace(), start) {
            (true, Some(s)) => {
                words.push(s..i);
                start = None;
            }
            (false, None) => start = Some(i),
            _ => {}
        }
    }
    if let Some(s) = start {
        words.push(s..text.len());
    }
    words
}

/// Trim trailing punctuation off the last word, dropping it if nothing is left.
fn strip_last_word(text: &str, words: &mut Vec<Range<usize>>) {
    let Some(last) = words.last_mut() else {
        return;
    };
    last.end = last.start + text[last.clone()].trim_end_matches(TRAILING_PUNCTUATION).len();
    if Range::is_empty(last) {
        words.pop();
    }
}

fn is_short_word(word: &str) -> bool {
    word.chars().count() <= SHORT_WORD_CHARS
}

fn join_words(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Split lyric text into tracks.
pub fn parse_tracks(text: &str, config: &RhymeConfig) -> Vec<Track> {
    let mut tracks = Vec::new();
    let mut track: Option<Track> = None;
    let mut section: Option<Section> = None;
    let mut global_index = 0;
    let mut section_index = 0;

    for raw in text.lines() {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            continue;
        }

        if let Some(caps) = TITLE_RE.captures(trimmed) {
            close_section(&mut track, &mut section);
            tracks.extend(track.take());
            track = Some(Track::new(&caps[1]));
            global_index = 0;
            section_index = 0;
            continue;
        }

        if let Some(kind) = detect_section_kind(trimmed) {
            close_section(&mut track, &mut section);
            section = Some(Section {
                kind,
                name: trimmed.replace(['[', ']'], ""),
                lines: Vec::new(),
            });
            section_index = 0;
            continue;
        }

        let Some(current_track) = track.as_mut() else {
            continue;
        };
        let current_section = section.get_or_insert_with(|| Section {
            kind: SectionKind::Unknown,
            name: "Unknown".to_string(),
            lines: Vec::new(),
        });

        let Some(line) = Line::new(section_index, global_index, trimmed, config.tail_words) else {
            continue;
        };
        current_section.lines.push(line.clone());
        current_track.lines.push(line);
        section_index += 1;
        global_index += 1;
    }

    close_section(&mut track, &mut section);
    tracks.extend(track);

    tracing::debug!(tracks = tracks.len(), "segmented lyric text");
    tracks
}

/// Parse `text` as a single track titled `title`. Title markers inside `text`
/// are not expected; if present, only the first track is returned.
pub fn parse_single_track(text: &str, title: &str, config: &RhymeConfig) -> Track {
    parse_tracks(&format!("## {title}\n{text}"), config)
        .into_iter()
        .next()
        .unwrap_or_else(|| Track::new(title))
}

/// Attach the open section to the open track. A section with no track is
/// discarded.
fn close_section(track: &mut Option<Track>, section: &mut Option<Section>) {
    if let (Some(t), Some(s)) = (track.as_mut(), section.take()) {
        t.sections.push(s);
    }
}
