// The individual scoring rules, in pipeline order.
//
// Each rule looks at one kind of evidence and adds points to the running
// result. The first rule to fire sets the category and severity; later ones
// only add to the score. The critical rule can halt the pipeline outright.

use crate::catalog::TermCatalog;
use crate::models::{Category, RuleResult, Severity};
use crate::text::context::ContextSignals;
use crate::text::matcher::contains_term;

/// Everything a rule may look at for one piece of text.
pub struct ScanInput<'a> {
    /// Original text (after length clipping)
    pub raw: &'a str,
    /// `raw` lowercased, for pattern and URL checks
    pub lower: &'a str,
    /// Output of the text normalizer, for term checks
    pub normalized: &'a str,
    pub signals: ContextSignals,
    pub catalog: &'a TermCatalog,
}

/// Whether the pipeline should keep going after a rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Halt,
}

/// One stage of the scoring pipeline.
pub trait Rule: Send + Sync {
    /// Short identifier used in debug logs.
    fn name(&self) -> &'static str;

    fn apply(&self, input: &ScanInput<'_>, result: &mut RuleResult) -> Flow;
}

/// The standard pipeline, in the order it must run.
pub fn default_rules() -> Vec<Box<dyn Rule>> {
    vec![
        Box::new(CriticalTerms),
        Box::new(HighTerms),
        Box::new(MediumTerms),
        Box::new(TrollPatterns),
        Box::new(SpamPatterns),
        Box::new(UrlFlood),
        Box::new(OffTopicKeywords),
        Box::new(Shouting),
        Box::new(RepeatedCharacters),
    ]
}

fn add(result: &mut RuleResult, points: i32) {
    result.score = result.score.saturating_add(points);
}

/// Any critical term: score 100, block, stop.
pub struct CriticalTerms;

impl Rule for CriticalTerms {
    fn name(&self) -> &'static str {
        "critical_terms"
    }

    fn apply(&self, input: &ScanInput<'_>, result: &mut RuleResult) -> Flow {
        let Some(term) = input
            .catalog
            .critical()
            .iter()
            .find(|term| contains_term(input.normalized, term))
        else {
            return Flow::Continue;
        };

        *result = RuleResult {
            score: 100,
            category: Category::Toxic,
            severity: Severity::Critical,
            matched_terms: vec![term.clone()],
            should_block: true,
        };
        Flow::Halt
    }
}

/// High-severity terms, weighted by context. Skipped entirely when the text
/// is about a whitelisted book.
pub struct HighTerms;

impl Rule for HighTerms {
    fn name(&self) -> &'static str {
        "high_terms"
    }

    fn apply(&self, input: &ScanInput<'_>, result: &mut RuleResult) -> Flow {
        let signals = input.signals;
        if signals.book_context {
            return Flow::Continue;
        }

        for term in input.catalog.high() {
            if !contains_term(input.normalized, term) {
                continue;
            }
            let points = if signals.self_deprecating && signals.banter {
                continue;
            } else if signals.banter {
                15
            } else if signals.targeted_attack {
                80
            } else {
                40
            };
            add(result, points);
            result.record(term);
            result.classify(Category::Toxic, Severity::High);
        }
        Flow::Continue
    }
}

pub struct MediumTerms;

impl Rule for MediumTerms {
    fn name(&self) -> &'static str {
        "medium_terms"
    }

    fn apply(&self, input: &ScanInput<'_>, result: &mut RuleResult) -> Flow {
        if input.signals.banter {
            return Flow::Continue;
        }

        let points = if input.signals.targeted_attack { 40 } else { 25 };
        for term in input.catalog.medium() {
            if contains_term(input.normalized, term) {
                add(result, points);
                result.record(term);
                result.classify(Category::Toxic, Severity::Medium);
            }
        }
        Flow::Continue
    }
}

pub struct TrollPatterns;

impl Rule for TrollPatterns {
    fn name(&self) -> &'static str {
        "troll_patterns"
    }

    fn apply(&self, input: &ScanInput<'_>, result: &mut RuleResult) -> Flow {
        for pattern in input.catalog.troll_patterns() {
            if let Some(m) = pattern.find(input.raw) {
                add(result, 30);
                result.record(&m.as_str().to_lowercase());
                result.classify(Category::Toxic, Severity::Medium);
            }
        }
        Flow::Continue
    }
}

pub struct SpamPatterns;

impl Rule for SpamPatterns {
    fn name(&self) -> &'static str {
        "spam_patterns"
    }

    fn apply(&self, input: &ScanInput<'_>, result: &mut RuleResult) -> Flow {
        for pattern in input.catalog.spam_patterns() {
            if let Some(m) = pattern.find(input.raw) {
                add(result, 35);
                result.record(&m.as_str().to_lowercase());
                result.classify(Category::Spam, Severity::Medium);
            }
        }
        Flow::Continue
    }
}

/// Links above this count are scored as spam.
const MAX_FREE_URLS: usize = 2;

/// Count `http://` and `https://` occurrences.
pub fn count_urls(lower: &str) -> usize {
    lower.matches("http://").count() + lower.matches("https://").count()
}

/// More than two links: 10 points per link.
pub struct UrlFlood;

impl Rule for UrlFlood {
    fn name(&self) -> &'static str {
        "url_flood"
    }

    fn apply(&self, input: &ScanInput<'_>, result: &mut RuleResult) -> Flow {
        let urls = count_urls(input.lower);
        if urls > MAX_FREE_URLS {
            let points = i32::try_from(urls.saturating_mul(10)).unwrap_or(i32::MAX);
            add(result, points);
            result.classify(Category::Spam, Severity::Low);
        }
        Flow::Continue
    }
}

pub struct OffTopicKeywords;

impl Rule for OffTopicKeywords {
    fn name(&self) -> &'static str {
        "off_topic_keywords"
    }

    fn apply(&self, input: &ScanInput<'_>, result: &mut RuleResult) -> Flow {
        for keyword in input.catalog.off_topic_keywords() {
            if input.normalized.contains(keyword.as_str()) {
                add(result, 10);
                result.record(keyword);
                result.classify(Category::OffTopic, Severity::Low);
            }
        }
        Flow::Continue
    }
}

/// Texts at or below this many chars are never treated as shouting.
const SHOUTING_MIN_CHARS: usize = 20;

/// Uppercase chars over *all* chars, spaces and punctuation included.
pub fn uppercase_ratio(raw: &str) -> f64 {
    let total = raw.chars().count();
    if total == 0 {
        return 0.0;
    }
    let upper = raw.chars().filter(|c| c.is_uppercase()).count();
    upper as f64 / total as f64
}

pub struct Shouting;

impl Rule for Shouting {
    fn name(&self) -> &'static str {
        "shouting"
    }

    fn apply(&self, input: &ScanInput<'_>, result: &mut RuleResult) -> Flow {
        if input.raw.chars().count() > SHOUTING_MIN_CHARS && uppercase_ratio(input.raw) > 0.5 {
            add(result, 15);
        }
        Flow::Continue
    }
}

/// Length of the longest run of one repeated character.
pub fn longest_run(raw: &str) -> usize {
    let mut longest = 0;
    let mut current = 0;
    let mut prev: Option<char> = None;

    for c in raw.chars() {
        if Some(c) == prev {
            current += 1;
        } else {
            prev = Some(c);
            current = 1;
        }
        longest = longest.max(current);
    }
    longest
}

pub struct RepeatedCharacters;

impl Rule for RepeatedCharacters {
    fn name(&self) -> &'static str {
        "repeated_characters"
    }

    fn apply(&self, input: &ScanInput<'_>, result: &mut RuleResult) -> Flow {
        if longest_run(input.raw) >= 5 {
            add(result, 10);
        }
        Flow::Continue
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pipeline_order_is_fixed() {
        let names: Vec<&str> = default_rules().iter().map(|r| r.name()).collect();
        assert_eq!(
            names,
            vec![
                "critical_terms",
                "high_terms",
                "medium_terms",
                "troll_patterns",
                "spam_patterns",
                "url_flood",
                "off_topic_keywords",
                "shouting",
                "repeated_characters",
            ]
        );
    }

    #[test]
    fn longest_run_counts_chars() {
        assert_eq!(longest_run(""), 0);
        assert_eq!(longest_run("abc"), 1);
        assert_eq!(longest_run("nooooo"), 5);
    }

    #[test]
    fn uppercase_ratio_counts_spaces() {
        // 8 uppercase out of 9 chars, the space counts too
        assert!((uppercase_ratio("STOP THAT") - 8.0 / 9.0).abs() < 1e-9);
        assert!((uppercase_ratio("AB cd") - 0.4).abs() < 1e-9);
    }

    #[test]
    fn url_counting() {
        assert_eq!(count_urls("see https://a.io and http://b.io"), 2);
        assert_eq!(count_urls("no links"), 0);
    }
}
