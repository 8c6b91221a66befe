//! Splitting of collection annotations into items and `key: value` entries.
//!
//! Two policies exist. [`Brackets::Positional`] strips the first and last
//! character of the annotation whatever they are, then splits on `,`. This is
//! the compatible behaviour: `"(a, b)"` works, while `"a, b"` silently loses
//! its first and last character. [`Brackets::Strict`] parses the annotation
//! with the grammar in `annotation.pest` and refuses anything that is not
//! enclosed in `[...]` (sequences) or `[...]` / `{...}` (mappings).

use pest::Parser;
use pest_derive::Parser;
use serde::{Deserialize, Serialize};

#[derive(Parser)]
#[grammar = "annotation.pest"]
struct AnnotationParser;

/// How the outer brackets of a collection annotation are handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Brackets {
    #[default]
    Positional,
    Strict,
}

/// Items of a sequence annotation, each trimmed.
///
/// Returns `None` when the envelope is unacceptable under the policy. An empty
/// vector is only possible under [`Brackets::Strict`] (`"[]"`).
pub fn sequence_items(text: &str, brackets: Brackets) -> Option<Vec<&str>> {
    match brackets {
        Brackets::Positional => Some(strip_envelope(text)?.split(',').map(str::trim).collect()),
        Brackets::Strict => strict_items(Rule::sequence, text),
    }
}

/// Candidate entries of a mapping annotation, each still unsplit.
pub fn mapping_entries(text: &str, brackets: Brackets) -> Option<Vec<&str>> {
    match brackets {
        Brackets::Positional => Some(strip_envelope(text)?.split(',').collect()),
        Brackets::Strict => strict_items(Rule::mapping, text),
    }
}

/// Splits an entry into trimmed key and value; exactly one `:` is required.
pub fn split_pair(entry: &str) -> Option<(&str, &str)> {
    let mut parts = entry.split(':');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(key), Some(value), None) => Some((key.trim(), value.trim())),
        _ => None,
    }
}

fn strip_envelope(text: &str) -> Option<&str> {
    let mut chars = text.chars();
    chars.next()?;
    chars.next_back()?;
    Some(chars.as_str())
}

fn strict_items(rule: Rule, text: &str) -> Option<Vec<&str>> {
    let pairs = AnnotationParser::parse(rule, text).ok()?;
    let items: Vec<&str> = pairs
        .flatten()
        .filter(|pair| matches!(pair.as_rule(), Rule::list_item | Rule::brace_item))
        .map(|pair| pair.as_str().trim())
        .collect();
    // "[]" yields one empty item; treat it as no items at all
    if items.len() == 1 && items[0].is_empty() {
        return Some(Vec::new());
    }
    Some(items)
}
