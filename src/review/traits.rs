// Review classifier trait — the hook for a second opinion on flagged text.
//
// The rule engine is confident at both ends of the score range and unsure in
// the middle. Anything it flags can be handed to an external classifier (an
// LLM, a hosted toxicity API) through this trait. No such classifier ships
// with this crate; NoopClassifier is the default and always abstains.

use anyhow::Result;
use async_trait::async_trait;

/// What an external classifier thinks of a flagged text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewVerdict {
    /// Confidently fine; overrides FLAG with APPROVE
    Approve,
    /// Confidently abusive; overrides FLAG with BLOCK
    Block,
    /// No opinion; the text stays flagged for a human
    Abstain,
}

/// Trait for classifying texts the rule engine couldn't decide. Async
/// because real implementations call out over HTTP.
#[async_trait]
pub trait ReviewClassifier: Send + Sync {
    async fn review(&self, text: &str) -> Result<ReviewVerdict>;
}

/// Classifier used when no external service is configured.
pub struct NoopClassifier;

#[async_trait]
impl ReviewClassifier for NoopClassifier {
    async fn review(&self, _text: &str) -> Result<ReviewVerdict> {
        Ok(ReviewVerdict::Abstain)
    }
}
