//! Text-scanning primitives over markdown-flavored free text.
//!
//! Everything here is regex-based and total: absence of a match yields
//! "zero items found", never an error. The extractors are composable
//! predicates, each independently testable, rather than one monolithic
//! scan.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Preview length for item text surfaced in messages. Display only;
/// never affects evaluation.
pub const MAX_ITEM_PREVIEW_LENGTH: usize = 80;

static ISSUE_REFERENCE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)(?:closes|fixes|resolves)\s+#(\d+)").unwrap());

static CHECKLIST_ITEM: Lazy<Regex> = Lazy::new(|| Regex::new(r"- \[([ xX])\] (.+)").unwrap());

// Non-greedy up to the first closing `~~`: an embedded single `~` must
// not close the span.
static DESCOPED_LABEL: Lazy<Regex> = Lazy::new(|| Regex::new(r"^~~(.+?)~~").unwrap());

static MARKDOWN_LINK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[[^\]]+\]\(https?://[^)]+\)").unwrap());

static PARENTHESIZED_URL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\([^)]*https?://[^)]+\)").unwrap());

static TRAILING_BARE_URL: Lazy<Regex> = Lazy::new(|| Regex::new(r"https?://\S+\s*$").unwrap());

/// A single markdown checklist item (`- [ ]` / `- [x]`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChecklistItem {
    /// Item text after the checkbox marker, to end of line.
    pub text: String,
    pub checked: bool,
    /// True only for unchecked items whose label is struck through.
    pub descoped: bool,
    pub has_evidence: bool,
}

impl ChecklistItem {
    /// The struck-through label of a descoped item, without the tildes.
    pub fn descoped_label(&self) -> Option<&str> {
        if !self.descoped {
            return None;
        }
        DESCOPED_LABEL
            .captures(&self.text)
            .map(|c| c.get(1).unwrap().as_str())
    }
}

/// Extract the first closing-keyword issue reference (`Closes #N`,
/// `Fixes #N`, `Resolves #N`, case-insensitive) from a body.
pub fn find_issue_reference(body: &str) -> Option<u64> {
    ISSUE_REFERENCE
        .captures(body)
        .and_then(|c| c.get(1).unwrap().as_str().parse().ok())
}

/// Extract all checklist items from a body, in source order.
///
/// An unchecked item is descoped when its text starts with a `~~...~~`
/// span. A checked item is never descoped.
pub fn extract_checklist_items(body: &str) -> Vec<ChecklistItem> {
    body.lines()
        .filter_map(|line| CHECKLIST_ITEM.captures(line))
        .map(|caps| {
            let checked = caps.get(1).unwrap().as_str() != " ";
            let text = caps.get(2).unwrap().as_str().to_string();
            let descoped = !checked && DESCOPED_LABEL.is_match(&text);
            let has_evidence = has_evidence_link(&text);
            ChecklistItem {
                text,
                checked,
                descoped,
                has_evidence,
            }
        })
        .collect()
}

/// True if the text carries an evidence link: a markdown link with an
/// http(s) target, any parenthesized http(s) URL, or a bare http(s) URL
/// at end of line. Three independent ORs; order does not affect the
/// result.
pub fn has_evidence_link(text: &str) -> bool {
    MARKDOWN_LINK.is_match(text)
        || PARENTHESIZED_URL.is_match(text)
        || TRAILING_BARE_URL.is_match(text)
}

/// Previews (truncated text) of checked items lacking an evidence link.
pub fn checked_items_without_evidence(body: &str) -> Vec<String> {
    extract_checklist_items(body)
        .into_iter()
        .filter(|item| item.checked && !item.has_evidence)
        .map(|item| preview(&item.text).to_string())
        .collect()
}

/// Truncate item text to [`MAX_ITEM_PREVIEW_LENGTH`] characters for
/// display, respecting char boundaries.
pub fn preview(text: &str) -> &str {
    match text.char_indices().nth(MAX_ITEM_PREVIEW_LENGTH) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
