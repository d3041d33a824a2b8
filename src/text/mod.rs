// Text analysis — normalization, fuzzy term matching, and context signals.
//
// Everything here is a pure function of its input (plus the read-only term
// catalog for book whitelists), so it can run inline on any thread.

pub mod context;
pub mod matcher;
pub mod normalize;

pub use normalize::normalize;
