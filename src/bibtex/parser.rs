//! Record splitting and field extraction.

use regex::Regex;
use std::sync::OnceLock;

/// Character that opens every BibTeX record
pub const RECORD_MARKER: char = '@';

/// A marker followed by an entry type and the opening brace, e.g. `@article{`
fn record_start() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"@[A-Za-z]+\s*\{").expect("valid record-start regex"))
}

/// Split raw BibTeX into record fragments.
///
/// Fragments do not include the leading `@`. Anything before the first record
/// is discarded, as are fragments that are empty or whitespace-only.
pub fn split_records(raw: &str) -> Vec<&str> {
    let starts: Vec<usize> = record_start().find_iter(raw).map(|m| m.start()).collect();

    starts
        .iter()
        .enumerate()
        .map(|(i, &start)| {
            let end = starts
                .get(i + 1)
                .map(|&next| fragment_end(raw, next))
                .unwrap_or(raw.len());
            &raw[start + RECORD_MARKER.len_utf8()..end]
        })
        .filter(|fragment| !fragment.trim().is_empty())
        .collect()
}

/// End of the fragment preceding the marker at `next`.
///
/// A marker that opens its line ends the fragment at that line's start;
/// a marker sharing a line with earlier text ends it at the marker.
fn fragment_end(raw: &str, next: usize) -> usize {
    let line_start = raw[..next].rfind('\n').map(|i| i + 1).unwrap_or(0);
    if raw[line_start..next].trim().is_empty() {
        line_start
    } else {
        next
    }
}

/// Extract the citation key from a record's opening declaration.
///
/// `@inproceedings{DBLP:conf/x/Y24, title=...` yields `DBLP:conf/x/Y24`.
pub fn extract_key(record: &str) -> Option<String> {
    let first_line = record.lines().next()?;
    let (_, after_brace) = first_line.split_once('{')?;
    let key = after_brace
        .split(|c| c == ',' || c == '}')
        .next()
        .unwrap_or_default()
        .trim();

    if key.is_empty() {
        None
    } else {
        Some(key.to_string())
    }
}

/// Extract the publication year from the first parsable `year` field.
///
/// Lines are scanned in order and the field name is matched
/// case-insensitively. A candidate that fails to parse is skipped.
pub fn extract_year(record: &str) -> Option<i32> {
    record.lines().find_map(|line| {
        let (name, rest) = line.split_once('=')?;
        if !field_name(name).eq_ignore_ascii_case("year") {
            return None;
        }
        let value = rest.split('=').next().unwrap_or_default();
        value
            .trim_matches(|c: char| c.is_whitespace() || matches!(c, ',' | '{' | '}' | '"'))
            .parse::<i32>()
            .ok()
    })
}

/// Last token before `=`, so `@misc{k, year` still reads as `year`
fn field_name(before_eq: &str) -> &str {
    before_eq
        .trim_end()
        .rsplit(|c: char| c == ',' || c == '{' || c.is_whitespace())
        .next()
        .unwrap_or_default()
}
