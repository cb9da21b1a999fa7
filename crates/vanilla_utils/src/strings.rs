//! String transforms: casing, slugs, HTML escaping and padding.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

const ELLIPSIS: &str = "...";

static WHITESPACE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid regex"));
static NON_SLUG_CHARS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^A-Za-z0-9_\-]+").expect("valid regex"));
static DASH_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\-\-+").expect("valid regex"));
static HTML_TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]*>").expect("valid regex"));

/// Entity table shared by [`escape_html`] and [`unescape_html`].
const HTML_ENTITIES: [(char, &str); 6] = [
    ('&', "&amp;"),
    ('<', "&lt;"),
    ('>', "&gt;"),
    ('"', "&quot;"),
    ('\'', "&#39;"),
    ('/', "&#x2F;"),
];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
/// Side(s) of a string that [`pad`] fills.
pub enum PadSide {
    /// Fill before the text.
    #[default]
    Left,
    /// Fill after the text.
    Right,
    /// Split the fill, with the smaller half on the left.
    Both,
}

/// Uppercases the first character and leaves the rest untouched.
pub fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Cuts `text` to `length` characters and appends `...` when it was longer.
///
/// The ellipsis is not counted toward `length`.
pub fn truncate(text: &str, length: usize) -> String {
    match text.char_indices().nth(length) {
        Some((cut, _)) => format!("{}{ELLIPSIS}", &text[..cut]),
        None => text.to_string(),
    }
}

/// Converts text into a URL-friendly slug.
///
/// Lowercases, trims, turns whitespace runs into single dashes, drops everything that is not a
/// word character or dash, then collapses repeated dashes.
pub fn slugify(text: &str) -> String {
    let lowered = text.to_lowercase();
    let dashed = WHITESPACE_RUN.replace_all(lowered.trim(), "-");
    let cleaned = NON_SLUG_CHARS.replace_all(&dashed, "");
    DASH_RUN.replace_all(&cleaned, "-").into_owned()
}

/// Splits text into words on separators and lower-to-upper case transitions.
fn words(text: &str) -> Vec<String> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut prev_lower_or_digit = false;
    for ch in text.chars() {
        if !ch.is_alphanumeric() {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            prev_lower_or_digit = false;
            continue;
        }
        if ch.is_uppercase() && prev_lower_or_digit && !current.is_empty() {
            words.push(std::mem::take(&mut current));
        }
        prev_lower_or_digit = ch.is_lowercase() || ch.is_numeric();
        current.push(ch);
    }
    if !current.is_empty() {
        words.push(current);
    }
    words
}

/// `hello world` / `hello-world` / `hello_world` → `helloWorld`.
pub fn camel_case(text: &str) -> String {
    words(text)
        .iter()
        .enumerate()
        .map(|(index, word)| {
            let lowered = word.to_lowercase();
            if index == 0 {
                lowered
            } else {
                capitalize(&lowered)
            }
        })
        .collect()
}

/// `helloWorld` / `Hello World` → `hello_world`.
pub fn snake_case(text: &str) -> String {
    join_lowercase(text, "_")
}

/// `helloWorld` / `Hello World` → `hello-world`.
pub fn kebab_case(text: &str) -> String {
    join_lowercase(text, "-")
}

fn join_lowercase(text: &str, separator: &str) -> String {
    words(text)
        .iter()
        .map(|word| word.to_lowercase())
        .collect::<Vec<_>>()
        .join(separator)
}

/// Escapes `& < > " ' /` with their HTML entities.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match HTML_ENTITIES.iter().find(|(raw, _)| *raw == ch) {
            Some((_, entity)) => escaped.push_str(entity),
            None => escaped.push(ch),
        }
    }
    escaped
}

/// Reverses [`escape_html`] for the same six entities; other entities are left alone.
pub fn unescape_html(text: &str) -> String {
    let mut unescaped = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(start) = rest.find('&') {
        unescaped.push_str(&rest[..start]);
        let tail = &rest[start..];
        match HTML_ENTITIES
            .iter()
            .find(|(_, entity)| tail.starts_with(entity))
        {
            Some((raw, entity)) => {
                unescaped.push(*raw);
                rest = &tail[entity.len()..];
            }
            None => {
                unescaped.push('&');
                rest = &tail[1..];
            }
        }
    }
    unescaped.push_str(rest);
    unescaped
}

/// Removes anything shaped like a tag.
///
/// This is a regex strip, not an HTML parser; malformed markup and comments containing `>` are
/// not handled safely.
pub fn strip_html(text: &str) -> String {
    HTML_TAG.replace_all(text, "").into_owned()
}

/// Pads `text` with `fill` up to `length` characters.
pub fn pad(text: &str, length: usize, fill: char, side: PadSide) -> String {
    let missing = length.saturating_sub(text.chars().count());
    let (left, right) = match side {
        PadSide::Left => (missing, 0),
        PadSide::Right => (0, missing),
        PadSide::Both => (missing / 2, missing - missing / 2),
    };
    let mut padded = String::with_capacity(text.len() + missing * fill.len_utf8());
    padded.extend(std::iter::repeat(fill).take(left));
    padded.push_str(text);
    padded.extend(std::iter::repeat(fill).take(right));
    padded
}
