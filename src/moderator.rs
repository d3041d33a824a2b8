// Moderator — the entry point callers actually use.
//
// Given a request, this:
// 1. Scores the text through the rule pipeline
// 2. Applies the reputation-adjusted decision policy
// 3. Packages the result as a ModerationResponse
//
// moderate() never fails: empty input is clean, catalog problems were
// already absorbed at load time, and no rule can error. The async
// moderate_with_review() adds an optional second opinion for FLAG results.

use std::sync::Arc;
use std::time::{Duration, Instant};

use tracing::{debug, warn};

use crate::catalog::TermCatalog;
use crate::config::{Config, DEFAULT_REVIEW_TIMEOUT_MS};
use crate::models::{Decision, ModerationRequest, ModerationResponse, RuleResult, DEFAULT_REPUTATION};
use crate::review::{ReviewClassifier, ReviewVerdict};
use crate::scoring::engine::ScoringEngine;
use crate::scoring::policy::{self, DecisionThresholds};

pub const REASON_REVIEW_APPROVED: &str = "cleared by review classifier";
pub const REASON_REVIEW_BLOCKED: &str = "blocked by review classifier";

/// Stateless content moderator. Cheap to clone and safe to share across
/// threads; the catalog inside is read-only.
#[derive(Clone)]
pub struct Moderator {
    engine: Arc<ScoringEngine>,
    thresholds: DecisionThresholds,
    review_timeout: Duration,
}

impl Moderator {
    /// Moderator over the given catalog with default thresholds.
    pub fn new(catalog: TermCatalog) -> Self {
        Self::from_engine(ScoringEngine::new(Arc::new(catalog)))
    }

    /// Moderator over a pre-built engine (custom rules or input cap).
    pub fn from_engine(engine: ScoringEngine) -> Self {
        Self {
            engine: Arc::new(engine),
            thresholds: DecisionThresholds::default(),
            review_timeout: Duration::from_millis(DEFAULT_REVIEW_TIMEOUT_MS),
        }
    }

    /// Load the catalog named in `config` (falling back to built-in terms if
    /// it can't be read) and apply the configured limits. Calling this again
    /// is how the catalog gets reloaded.
    pub fn from_config(config: &Config) -> Self {
        let catalog = TermCatalog::load(&config.catalog_path);
        let engine = ScoringEngine::new(Arc::new(catalog)).max_input_chars(config.max_input_chars);
        Self::from_engine(engine).review_timeout(config.review_timeout)
    }

    pub fn thresholds(mut self, thresholds: DecisionThresholds) -> Self {
        self.thresholds = thresholds;
        self
    }

    pub fn review_timeout(mut self, timeout: Duration) -> Self {
        self.review_timeout = timeout;
        self
    }

    pub fn catalog(&self) -> &TermCatalog {
        self.engine.catalog()
    }

    /// Whether we're running on the built-in critical terms only.
    pub fn is_degraded(&self) -> bool {
        self.catalog().is_degraded()
    }

    /// Raw rule result, without the decision policy.
    pub fn score(&self, text: &str) -> RuleResult {
        self.engine.score(text)
    }

    /// Moderate a single request.
    pub fn moderate(&self, request: &ModerationRequest) -> ModerationResponse {
        let started = Instant::now();
        let text = request.text.as_deref().unwrap_or("");
        let reputation = request.reputation();

        let result = self.engine.score(text);
        let (decision, reason) = policy::decide(&result, reputation, &self.thresholds);

        debug!(
            decision = decision.as_str(),
            category = result.category.as_str(),
            score = result.score,
            reputation,
            "Moderated text"
        );

        ModerationResponse {
            decision,
            category: result.category,
            severity: result.severity,
            score: result.score,
            matched_terms: (!result.matched_terms.is_empty()).then_some(result.matched_terms),
            reason: reason.to_string(),
            ai_used: false,
            processing_time_ms: elapsed_ms(started),
        }
    }

    /// Moderate, and if the result is FLAG, ask `classifier` for a second
    /// opinion. Classifier errors, timeouts and abstentions leave the FLAG in
    /// place; this never fails either.
    pub async fn moderate_with_review(
        &self,
        request: &ModerationRequest,
        classifier: &dyn ReviewClassifier,
    ) -> ModerationResponse {
        let started = Instant::now();
        let mut response = self.moderate(request);
        if response.decision != Decision::Flag {
            return response;
        }

        let text = request.text.as_deref().unwrap_or("");
        match tokio::time::timeout(self.review_timeout, classifier.review(text)).await {
            Ok(Ok(ReviewVerdict::Approve)) => {
                response.decision = Decision::Approve;
                response.reason = REASON_REVIEW_APPROVED.to_string();
                response.ai_used = true;
            }
            Ok(Ok(ReviewVerdict::Block)) => {
                response.decision = Decision::Block;
                response.reason = REASON_REVIEW_BLOCKED.to_string();
                response.ai_used = true;
            }
            Ok(Ok(ReviewVerdict::Abstain)) => {
                debug!(score = response.score, "Review classifier abstained");
            }
            Ok(Err(e)) => {
                warn!(error = format!("{e:#}"), "Review classifier failed, keeping FLAG");
            }
            Err(_) => {
                let timeout_ms = u64::try_from(self.review_timeout.as_millis()).unwrap_or(u64::MAX);
                warn!(timeout_ms, "Review classifier timed out, keeping FLAG");
            }
        }

        response.processing_time_ms = elapsed_ms(started);
        response
    }

    /// True if the text would be blocked at neutral reputation.
    pub fn should_block(&self, text: &str) -> bool {
        let result = self.engine.score(text);
        result.should_block || result.score >= self.thresholds.block_score
    }

    /// True if the text falls in the human-review band (25 <= score < 75).
    pub fn needs_review(&self, text: &str) -> bool {
        let result = self.engine.score(text);
        let floor = self.thresholds.approve_threshold(DEFAULT_REPUTATION);
        f64::from(result.score) >= floor && result.score < self.thresholds.block_score
    }
}

fn elapsed_ms(started: Instant) -> u64 {
    u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX)
}
