//! Structural fact extraction for markdown-like documents.
//!
//! Extraction is a sequence of independent scanning functions over raw text,
//! one per structural fact. Each scanner is pure and deterministic; a failure
//! in one scanner never aborts the others, and [`extract_facts`] always
//! returns whatever was successfully extracted alongside an error marker.
//!
//! Headings are matched line-by-line and code-block contents are *not*
//! excluded from the scan. A fenced block containing `# not a heading`
//! therefore produces a heading fact. Downstream visualizations depend on
//! this, so the scan must stay line-based rather than move to a full
//! markdown parser.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::NotegraphError;

/// Lines beginning with 1-6 `#` characters followed by whitespace and text.
static HEADING_RE: Lazy<Result<Regex, regex::Error>> =
    Lazy::new(|| Regex::new(r"(?m)^(#{1,6})\s+(.+)$"));

/// `[[target]]` or `[[target|alias]]`.
static WIKI_LINK_RE: Lazy<Result<Regex, regex::Error>> =
    Lazy::new(|| Regex::new(r"\[\[([^\]]+)\]\]"));

/// `[text](path)`.
static MD_LINK_RE: Lazy<Result<Regex, regex::Error>> =
    Lazy::new(|| Regex::new(r"\[[^\]]*\]\(([^)]+)\)"));

/// `#tag` occurrences. A `#` followed by whitespace never matches, so
/// heading markers are not double counted as tags.
static TAG_RE: Lazy<Result<Regex, regex::Error>> = Lazy::new(|| Regex::new(r"#(\w+)"));

/// `scheme://` prefix, used to exclude absolute URLs from markdown links.
static URL_SCHEME_RE: Lazy<Result<Regex, regex::Error>> =
    Lazy::new(|| Regex::new(r"^[a-zA-Z][a-zA-Z0-9+.-]*://"));

fn pattern(
    cell: &'static Lazy<Result<Regex, regex::Error>>,
) -> Result<&'static Regex, NotegraphError> {
    cell.as_ref()
        .map_err(|e| NotegraphError::Internal(format!("Regex parse failed: {e}")))
}

/// A heading fact: markdown depth and trimmed text, in document order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Heading {
    pub level: u8,
    pub text: String,
}

/// Structural facts extracted from a single document.
///
/// All lists preserve document order. `error` is the parse-error marker: when
/// set, the remaining fields still hold whatever was extracted before the
/// failure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DocumentFacts {
    pub headings: Vec<Heading>,
    pub wiki_links: Vec<String>,
    pub md_links: Vec<String>,
    pub tags: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Scan for headings: lines starting with 1-6 `#` characters followed by
/// whitespace and text.
pub fn scan_headings(text: &str) -> Result<Vec<Heading>, NotegraphError> {
    let re = pattern(&HEADING_RE)?;
    Ok(re
        .captures_iter(text)
        .filter_map(|caps| {
            let hashes = caps.get(1)?.as_str();
            let body = caps.get(2)?.as_str().trim();
            if body.is_empty() {
                return None;
            }
            Some(Heading {
                level: hashes.len() as u8,
                text: body.to_string(),
            })
        })
        .collect())
}

/// Scan for wiki-style link targets. The alias in `[[target|alias]]` is
/// display-only and discarded.
pub fn scan_wiki_links(text: &str) -> Result<Vec<String>, NotegraphError> {
    let re = pattern(&WIKI_LINK_RE)?;
    Ok(re
        .captures_iter(text)
        .filter_map(|caps| {
            let inner = caps.get(1)?.as_str();
            let target = inner.split('|').next().unwrap_or(inner).trim();
            if target.is_empty() {
                None
            } else {
                Some(target.to_string())
            }
        })
        .collect())
}

/// Scan for relative markdown link targets.
///
/// Absolute URLs (any `scheme://` prefix) and anchor-only fragments are
/// skipped; a trailing `#anchor` is stripped from what remains.
pub fn scan_md_links(text: &str) -> Result<Vec<String>, NotegraphError> {
    let re = pattern(&MD_LINK_RE)?;
    let scheme = pattern(&URL_SCHEME_RE)?;
    Ok(re
        .captures_iter(text)
        .filter_map(|caps| {
            let raw = caps.get(1)?.as_str().trim();
            if raw.is_empty() || raw.starts_with('#') || scheme.is_match(raw) {
                return None;
            }
            let target = raw.split('#').next().unwrap_or(raw).trim();
            if target.is_empty() {
                None
            } else {
                Some(target.to_string())
            }
        })
        .collect())
}

/// Scan for `#tag` occurrences (word characters, length >= 1).
pub fn scan_tags(text: &str) -> Result<Vec<String>, NotegraphError> {
    let re = pattern(&TAG_RE)?;
    Ok(re
        .captures_iter(text)
        .filter_map(|caps| Some(caps.get(1)?.as_str().to_string()))
        .collect())
}

/// Extract all structural facts from a document.
///
/// Never fails: each scanner runs independently, and the first scanner error
/// is recorded as the parse-error marker while the remaining facts are kept.
pub fn extract_facts(text: &str) -> DocumentFacts {
    let mut facts = DocumentFacts::default();
    let mut record = |err: NotegraphError, facts: &mut DocumentFacts| {
        tracing::warn!("Structural extraction failed: {err}");
        if facts.error.is_none() {
            facts.error = Some(err.to_string());
        }
    };

    match scan_headings(text) {
        Ok(headings) => facts.headings = headings,
        Err(e) => record(e, &mut facts),
    }
    match scan_wiki_links(text) {
        Ok(links) => facts.wiki_links = links,
        Err(e) => record(e, &mut facts),
    }
    match scan_md_links(text) {
        Ok(links) => facts.md_links = links,
        Err(e) => record(e, &mut facts),
    }
    match scan_tags(text) {
        Ok(tags) => facts.tags = tags,
        Err(e) => record(e, &mut facts),
    }

    facts
}
