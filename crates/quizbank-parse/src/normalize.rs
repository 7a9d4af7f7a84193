//! Text cleanup for pdftotext output.

use regex::Regex;
use std::sync::OnceLock;

fn hyphen_break_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"-\s+").expect("Invalid hyphen regex"))
}

fn whitespace_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\s+").expect("Invalid whitespace regex"))
}

fn non_key_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[^a-z0-9 ]+").expect("Invalid key regex"))
}

/// Strip trailing newlines and soft hyphens from a raw line.
///
/// Leading whitespace is kept; the classifiers rely on it.
pub fn clean_line(raw: &str) -> String {
    raw.trim_end_matches('\n').replace('\u{00AD}', "")
}

/// Repair line-wrap hyphenation, straighten quotes and collapse whitespace.
pub fn normalize_text(s: &str) -> String {
    // Hyphen repair has to see the original whitespace
    let s = hyphen_break_regex().replace_all(s, "");
    let s = s
        .replace(['\u{2018}', '\u{2019}'], "'")
        .replace(['\u{201C}', '\u{201D}'], "\"");
    whitespace_regex().replace_all(&s, " ").trim().to_string()
}

/// Fuzzy join key: lowercase alphanumerics separated by single spaces.
pub fn keyify(s: &str) -> String {
    let lowered = normalize_text(s).to_lowercase();
    let stripped = non_key_regex().replace_all(&lowered, " ");
    whitespace_regex().replace_all(&stripped, " ").trim().to_string()
}

/// Join wrapped question fragments.
///
/// A fragment following text that ends in `-` is glued on with the hyphen
/// removed, since the word was split across the line break.
pub fn join_fragments<I, S>(fragments: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut text = String::new();
    for fragment in fragments {
        let fragment = fragment.as_ref().trim();
        if fragment.is_empty() {
            continue;
        }
        if text.ends_with('-') {
            text.pop();
        } else if !text.is_empty() {
            text.push(' ');
        }
        text.push_str(fragment);
    }
    normalize_text(&text)
}

/// Space-join buffered lines and normalize the result.
pub fn join_lines<S: AsRef<str>>(lines: &[S]) -> String {
    let joined: Vec<&str> = lines.iter().map(AsRef::as_ref).collect();
    normalize_text(&joined.join(" "))
}
