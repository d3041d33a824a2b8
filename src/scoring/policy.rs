// Decision policy — turns a rule score into APPROVE / FLAG / BLOCK.
//
// Reputation only moves the approve line, and only a little: a trusted
// submitter (100) gets approved up to 30, a brand-new or penalized one (0)
// only up to 20. The block line is fixed. Everything between the two lines
// goes to human review.

use crate::models::{Decision, RuleResult};

use super::engine::BLOCK_SCORE;

pub const REASON_GUIDELINES: &str = "violates community guidelines";
pub const REASON_MULTIPLE: &str = "multiple policy violations detected";
pub const REASON_CLEAN: &str = "content appears clean";
pub const REASON_REVIEW: &str = "flagged for human review";

/// Configurable thresholds for the decision policy.
#[derive(Debug, Clone, PartialEq)]
pub struct DecisionThresholds {
    /// Approve line at neutral reputation (default 25.0)
    pub approve_base: f64,
    /// How far reputation can move the approve line, end to end (default 10.0).
    /// Reputation 0..=100 maps to a factor of -0.5..=+0.5 of this span.
    pub reputation_span: f64,
    /// Scores at or above this are blocked (default 75)
    pub block_score: i32,
}

impl Default for DecisionThresholds {
    fn default() -> Self {
        Self {
            approve_base: 25.0,
            reputation_span: 10.0,
            block_score: BLOCK_SCORE,
        }
    }
}

impl DecisionThresholds {
    /// Approve line for a submitter. Reputation outside 0-100 is clamped.
    pub fn approve_threshold(&self, reputation: i32) -> f64 {
        let factor = (f64::from(reputation.clamp(0, 100)) - 50.0) / 100.0;
        self.approve_base + factor * self.reputation_span
    }
}

/// Decide what to do with a scored text.
///
/// Returns the decision and the human-readable reason.
pub fn decide(
    result: &RuleResult,
    reputation: i32,
    thresholds: &DecisionThresholds,
) -> (Decision, &'static str) {
    if result.should_block {
        (Decision::Block, REASON_GUIDELINES)
    } else if result.score >= thresholds.block_score {
        (Decision::Block, REASON_MULTIPLE)
    } else if f64::from(result.score) <= thresholds.approve_threshold(reputation) {
        (Decision::Approve, REASON_CLEAN)
    } else {
        (Decision::Flag, REASON_REVIEW)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scored(score: i32) -> RuleResult {
        RuleResult {
            score,
            ..RuleResult::clean()
        }
    }

    #[test]
    fn neutral_threshold_is_25() {
        let t = DecisionThresholds::default();
        assert!((t.approve_threshold(50) - 25.0).abs() < 1e-9);
    }

    #[test]
    fn reputation_range_is_20_to_30() {
        let t = DecisionThresholds::default();
        assert!((t.approve_threshold(0) - 20.0).abs() < 1e-9);
        assert!((t.approve_threshold(100) - 30.0).abs() < 1e-9);
    }

    #[test]
    fn out_of_range_reputation_is_clamped() {
        let t = DecisionThresholds::default();
        assert!((t.approve_threshold(-40) - 20.0).abs() < 1e-9);
        assert!((t.approve_threshold(500) - 30.0).abs() < 1e-9);
    }

    #[test]
    fn should_block_wins_over_low_score() {
        let t = DecisionThresholds::default();
        let result = RuleResult {
            should_block: true,
            ..scored(10)
        };
        assert_eq!(decide(&result, 50, &t), (Decision::Block, REASON_GUIDELINES));
    }

    #[test]
    fn high_reputation_approves_more() {
        let t = DecisionThresholds::default();
        assert_eq!(decide(&scored(28), 50, &t).0, Decision::Flag);
        assert_eq!(decide(&scored(28), 100, &t).0, Decision::Approve);
        assert_eq!(decide(&scored(22), 0, &t).0, Decision::Flag);
    }
}
