// Review hook — trait-based seam for an external classifier.
//
// Only texts that land in the FLAG zone are ever sent out. The rest of the
// pipeline never waits on the network.

pub mod traits;

pub use traits::{NoopClassifier, ReviewClassifier, ReviewVerdict};
