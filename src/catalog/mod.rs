// Term catalog — the classified term and pattern lists the rules consult.
//
// Two tiers: a minimal built-in critical list that is always available, and
// the full catalog loaded from a JSON document at startup. Any failure to
// read or parse the document drops us to the built-in tier instead of
// failing startup. Once built, the catalog is read-only and shared freely.

pub mod builtin;
pub mod schema;

use std::path::Path;

use anyhow::{Context, Result};
use regex_lite::{Regex, RegexBuilder};
use serde::Serialize;
use tracing::{info, warn};

use crate::text::normalize;
use builtin::FALLBACK_CRITICAL;
use schema::CatalogDocument;

/// Compiled, normalized term lists.
#[derive(Debug, Clone)]
pub struct TermCatalog {
    critical: Vec<String>,
    high: Vec<String>,
    medium: Vec<String>,
    book_whitelist: Vec<String>,
    book_titles_whitelist: Vec<String>,
    troll_patterns: Vec<Regex>,
    spam_patterns: Vec<Regex>,
    off_topic_keywords: Vec<String>,
    /// True when the critical tier came from the built-in list
    degraded: bool,
}

/// List sizes, for operators checking what actually loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CatalogSummary {
    pub critical: usize,
    pub high: usize,
    pub medium: usize,
    pub book_whitelist: usize,
    pub book_titles_whitelist: usize,
    pub troll_patterns: usize,
    pub spam_patterns: usize,
    pub off_topic_keywords: usize,
    pub degraded: bool,
}

impl TermCatalog {
    /// Load the catalog document at `path`, falling back to the built-in
    /// critical list if it can't be read or parsed. Never fails.
    pub fn load(path: &Path) -> Self {
        let loaded = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read term catalog {}", path.display()))
            .and_then(|raw| Self::from_json_str(&raw));

        match loaded {
            Ok(catalog) => {
                info!(
                    path = %path.display(),
                    critical = catalog.critical.len(),
                    high = catalog.high.len(),
                    medium = catalog.medium.len(),
                    "Loaded term catalog"
                );
                catalog
            }
            Err(e) => {
                warn!(
                    path = %path.display(),
                    error = format!("{e:#}"),
                    "Term catalog unavailable, running on built-in critical terms only"
                );
                Self::builtin()
            }
        }
    }

    /// Parse a catalog document. Unlike `load`, this reports malformed JSON.
    pub fn from_json_str(raw: &str) -> Result<Self> {
        let doc: CatalogDocument =
            serde_json::from_str(raw).context("Term catalog is not a valid catalog document")?;
        Ok(Self::from_document(doc))
    }

    /// Build from an already-parsed document.
    ///
    /// A document with no usable critical terms still gets the built-in ones,
    /// so the critical tier is never empty.
    pub fn from_document(doc: CatalogDocument) -> Self {
        let mut critical = normalize_terms(&doc.critical);
        let degraded = critical.is_empty();
        if degraded {
            warn!("Term catalog has no critical terms, substituting built-in list");
            critical = builtin_critical();
        }

        Self {
            critical,
            high: normalize_terms(&doc.high),
            medium: normalize_terms(&doc.medium),
            book_whitelist: lowercase_phrases(&doc.book_whitelist),
            book_titles_whitelist: lowercase_phrases(&doc.book_titles_whitelist),
            troll_patterns: compile_patterns("troll_patterns", &doc.troll_patterns),
            spam_patterns: compile_patterns("spam_patterns", &doc.spam_patterns),
            off_topic_keywords: normalize_terms(&doc.off_topic_keywords),
            degraded,
        }
    }

    /// The fallback catalog: built-in critical terms, everything else empty.
    pub fn builtin() -> Self {
        Self {
            critical: builtin_critical(),
            high: Vec::new(),
            medium: Vec::new(),
            book_whitelist: Vec::new(),
            book_titles_whitelist: Vec::new(),
            troll_patterns: Vec::new(),
            spam_patterns: Vec::new(),
            off_topic_keywords: Vec::new(),
            degraded: true,
        }
    }

    pub fn critical(&self) -> &[String] {
        &self.critical
    }

    pub fn high(&self) -> &[String] {
        &self.high
    }

    pub fn medium(&self) -> &[String] {
        &self.medium
    }

    pub fn book_whitelist(&self) -> &[String] {
        &self.book_whitelist
    }

    pub fn book_titles_whitelist(&self) -> &[String] {
        &self.book_titles_whitelist
    }

    pub fn troll_patterns(&self) -> &[Regex] {
        &self.troll_patterns
    }

    pub fn spam_patterns(&self) -> &[Regex] {
        &self.spam_patterns
    }

    pub fn off_topic_keywords(&self) -> &[String] {
        &self.off_topic_keywords
    }

    pub fn is_degraded(&self) -> bool {
        self.degraded
    }

    pub fn summary(&self) -> CatalogSummary {
        CatalogSummary {
            critical: self.critical.len(),
            high: self.high.len(),
            medium: self.medium.len(),
            book_whitelist: self.book_whitelist.len(),
            book_titles_whitelist: self.book_titles_whitelist.len(),
            troll_patterns: self.troll_patterns.len(),
            spam_patterns: self.spam_patterns.len(),
            off_topic_keywords: self.off_topic_keywords.len(),
            degraded: self.degraded,
        }
    }
}

fn builtin_critical() -> Vec<String> {
    normalize_terms(FALLBACK_CRITICAL)
}

/// Run terms through the same normalizer as the text they're matched
/// against. Terms that normalize to nothing are dropped, duplicates removed.
fn normalize_terms<S: AsRef<str>>(terms: &[S]) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(terms.len());
    for term in terms {
        let normalized = normalize(term.as_ref());
        if !normalized.is_empty() && !out.contains(&normalized) {
            out.push(normalized);
        }
    }
    out
}

fn lowercase_phrases(phrases: &[String]) -> Vec<String> {
    phrases
        .iter()
        .map(|p| p.trim().to_lowercase())
        .filter(|p| !p.is_empty())
        .collect()
}

/// Compile a pattern set case-insensitively. One bad pattern disables the
/// whole set, since a half-loaded set is harder to reason about than none.
fn compile_patterns(set: &str, patterns: &[String]) -> Vec<Regex> {
    let compiled: Result<Vec<Regex>> = patterns
        .iter()
        .map(|p| {
            RegexBuilder::new(p)
                .case_insensitive(true)
                .build()
                .with_context(|| format!("Invalid pattern {p:?}"))
        })
        .collect();

    match compiled {
        Ok(regexes) => regexes,
        Err(e) => {
            warn!(
                set,
                error = format!("{e:#}"),
                "Pattern set failed to compile, disabling it"
            );
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_is_never_empty() {
        let catalog = TermCatalog::builtin();
        assert!(!catalog.critical().is_empty());
        assert!(catalog.is_degraded());
    }

    #[test]
    fn terms_are_normalized_and_deduplicated() {
        let terms = normalize_terms(&["K1LL", "kill", "  ", "Idiot"]);
        assert_eq!(terms, vec!["kill", "idiot"]);
    }

    #[test]
    fn one_bad_pattern_drops_the_set() {
        let patterns = vec![r"\bok\b".to_string(), "(unclosed".to_string()];
        assert!(compile_patterns("test", &patterns).is_empty());
    }
}
