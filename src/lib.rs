// Cinder: rule-based content moderation for user-generated text
//
// This is the library root. Each module corresponds to a stage of the
// moderation pipeline, from the term catalog up to the Moderator façade.

pub mod catalog;
pub mod config;
pub mod models;
pub mod moderator;
pub mod output;
pub mod review;
pub mod scoring;
pub mod text;

pub use catalog::TermCatalog;
pub use models::{Category, Decision, ModerationRequest, ModerationResponse, RuleResult, Severity};
pub use moderator::Moderator;
