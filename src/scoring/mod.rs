// Scoring — the ordered rule pipeline and the decision policy on top of it.
//
// rules:  one struct per rule, each adding points for one kind of evidence
// engine: normalizes once, runs the rules in order, clamps the score
// policy: score + reputation -> APPROVE / FLAG / BLOCK

pub mod engine;
pub mod policy;
pub mod rules;
