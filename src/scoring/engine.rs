// Scoring engine — runs the rule pipeline over one piece of text.
//
// The engine owns a shared, read-only term catalog and the ordered list of
// rules. Scoring is synchronous and allocation-light; the only per-call work
// is normalizing the text once and evaluating context once, then handing the
// same ScanInput to every rule.

use std::sync::Arc;

use tracing::debug;

use super::rules::{default_rules, Flow, Rule, ScanInput};
use crate::catalog::TermCatalog;
use crate::models::RuleResult;
use crate::text::context::ContextSignals;
use crate::text::normalize;

/// Default cap on how much of a text gets scored. Fuzzy matching is
/// quadratic in word length times catalog size, so unbounded input is a
/// latency problem.
pub const DEFAULT_MAX_INPUT_CHARS: usize = 5000;

/// Scores at or above this are blocked outright.
pub const BLOCK_SCORE: i32 = 75;

pub struct ScoringEngine {
    catalog: Arc<TermCatalog>,
    rules: Vec<Box<dyn Rule>>,
    max_input_chars: usize,
}

impl ScoringEngine {
    /// Engine with the standard rule pipeline.
    pub fn new(catalog: Arc<TermCatalog>) -> Self {
        Self::with_rules(catalog, default_rules())
    }

    /// Engine with a custom rule list, run in the given order.
    pub fn with_rules(catalog: Arc<TermCatalog>, rules: Vec<Box<dyn Rule>>) -> Self {
        Self {
            catalog,
            rules,
            max_input_chars: DEFAULT_MAX_INPUT_CHARS,
        }
    }

    /// Change the input length cap. Zero is treated as "no cap".
    pub fn max_input_chars(mut self, max: usize) -> Self {
        self.max_input_chars = max;
        self
    }

    pub fn catalog(&self) -> &TermCatalog {
        &self.catalog
    }

    /// Run every rule in order and return the clamped result.
    pub fn score(&self, text: &str) -> RuleResult {
        let raw = clip_chars(text, self.max_input_chars);
        if raw.trim().is_empty() {
            return RuleResult::clean();
        }

        let lower = raw.to_lowercase();
        let normalized = normalize(raw);
        let input = ScanInput {
            raw,
            lower: &lower,
            normalized: &normalized,
            signals: ContextSignals::detect(&lower, &self.catalog),
            catalog: &self.catalog,
        };

        let mut result = RuleResult::clean();
        for rule in &self.rules {
            if rule.apply(&input, &mut result) == Flow::Halt {
                debug!(rule = rule.name(), "Rule halted the pipeline");
                break;
            }
        }

        result.score = result.score.clamp(0, 100);
        if result.score >= BLOCK_SCORE {
            result.should_block = true;
        }
        result
    }
}

/// The first `max` chars of `text`, split on a char boundary.
fn clip_chars(text: &str, max: usize) -> &str {
    if max == 0 {
        return text;
    }
    match text.char_indices().nth(max) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
