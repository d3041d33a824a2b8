// Data models — the request/response types that flow through the engine.
//
// These are kept separate from the scoring code so callers (HTTP handlers,
// queue consumers, the CLI) can depend on them without pulling in the rules.

use serde::{Deserialize, Serialize};

/// Reputation assumed when the caller doesn't supply one.
pub const DEFAULT_REPUTATION: i32 = 50;

/// What kind of problem the content has, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Category {
    Clean,
    Toxic,
    Spam,
    OffTopic,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Clean => "CLEAN",
            Category::Toxic => "TOXIC",
            Category::Spam => "SPAM",
            Category::OffTopic => "OFF_TOPIC",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// How bad the worst finding is. Ordered so `Low < Critical`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Low => "LOW",
            Severity::Medium => "MEDIUM",
            Severity::High => "HIGH",
            Severity::Critical => "CRITICAL",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The final, actionable outcome for a piece of content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Decision {
    Approve,
    Flag,
    Block,
}

impl Decision {
    pub fn as_str(&self) -> &'static str {
        match self {
            Decision::Approve => "APPROVE",
            Decision::Flag => "FLAG",
            Decision::Block => "BLOCK",
        }
    }
}

impl std::fmt::Display for Decision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A piece of content submitted for moderation.
///
/// `text` may be missing entirely (a JSON `null`); that is treated the same
/// as an empty string, not as an error.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModerationRequest {
    #[serde(default)]
    pub text: Option<String>,
    /// Submitter reputation, expected 0-100. Defaults to 50 when absent.
    #[serde(default)]
    pub user_reputation: Option<i32>,
}

impl ModerationRequest {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            user_reputation: None,
        }
    }

    pub fn with_reputation(mut self, reputation: i32) -> Self {
        self.user_reputation = Some(reputation);
        self
    }

    /// Reputation with the default applied.
    pub fn reputation(&self) -> i32 {
        self.user_reputation.unwrap_or(DEFAULT_REPUTATION)
    }
}

/// Output of the rule pipeline, before the decision policy runs.
#[derive(Debug, Clone, PartialEq)]
pub struct RuleResult {
    /// Clamped to 0-100 once the pipeline finishes
    pub score: i32,
    pub category: Category,
    pub severity: Severity,
    /// Terms and pattern matches in the order they fired, without duplicates
    pub matched_terms: Vec<String>,
    pub should_block: bool,
}

impl RuleResult {
    /// A result with nothing found.
    pub fn clean() -> Self {
        Self {
            score: 0,
            category: Category::Clean,
            severity: Severity::Low,
            matched_terms: Vec::new(),
            should_block: false,
        }
    }

    /// Set category and severity, but only the first time something fires.
    pub fn classify(&mut self, category: Category, severity: Severity) {
        if self.category == Category::Clean {
            self.category = category;
            self.severity = severity;
        }
    }

    /// Record a matched term, keeping first-seen order.
    pub fn record(&mut self, term: &str) {
        if !self.matched_terms.iter().any(|t| t == term) {
            self.matched_terms.push(term.to_string());
        }
    }
}

impl Default for RuleResult {
    fn default() -> Self {
        Self::clean()
    }
}

/// The response handed back to the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModerationResponse {
    pub decision: Decision,
    pub category: Category,
    pub severity: Severity,
    pub score: i32,
    /// `None` (serialized as null) when nothing matched
    pub matched_terms: Option<Vec<String>>,
    pub reason: String,
    /// Whether an external review classifier decided this request
    pub ai_used: bool,
    pub processing_time_ms: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_only_applies_once() {
        let mut result = RuleResult::clean();
        result.classify(Category::Toxic, Severity::High);
        result.classify(Category::Spam, Severity::Low);
        assert_eq!(result.category, Category::Toxic);
        assert_eq!(result.severity, Severity::High);
    }

    #[test]
    fn record_deduplicates_in_order() {
        let mut result = RuleResult::clean();
        result.record("idiot");
        result.record("stupid");
        result.record("idiot");
        assert_eq!(result.matched_terms, vec!["idiot", "stupid"]);
    }

    #[test]
    fn request_defaults_reputation() {
        let req: ModerationRequest = serde_json::from_str(r#"{"text": "hi"}"#).unwrap();
        assert_eq!(req.reputation(), 50);
        let req: ModerationRequest =
            serde_json::from_str(r#"{"text": null, "userReputation": 90}"#).unwrap();
        assert_eq!(req.text, None);
        assert_eq!(req.reputation(), 90);
    }

    #[test]
    fn enums_serialize_screaming_snake() {
        assert_eq!(
            serde_json::to_string(&Category::OffTopic).unwrap(),
            "\"OFF_TOPIC\""
        );
        assert_eq!(serde_json::to_string(&Decision::Flag).unwrap(), "\"FLAG\"");
    }
}
