// On-disk shape of the term catalog document.
//
// Every list is optional so a partial document (say, only `critical` and
// `spam_patterns`) still loads; missing lists are just empty.

use serde::{Deserialize, Serialize};

/// The JSON term catalog as written by trust-and-safety staff.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogDocument {
    /// Instant block, no context considered
    #[serde(default)]
    pub critical: Vec<String>,
    #[serde(default)]
    pub high: Vec<String>,
    #[serde(default)]
    pub medium: Vec<String>,
    /// Phrases that mark a book discussion ("killed it", "a killer plot twist")
    #[serde(default)]
    pub book_whitelist: Vec<String>,
    /// Titles whose wording would otherwise trip a term ("To Kill a Mockingbird")
    #[serde(default)]
    pub book_titles_whitelist: Vec<String>,
    /// Regexes, compiled case-insensitively
    #[serde(default)]
    pub troll_patterns: Vec<String>,
    /// Regexes, compiled case-insensitively
    #[serde(default)]
    pub spam_patterns: Vec<String>,
    #[serde(default)]
    pub off_topic_keywords: Vec<String>,
}
