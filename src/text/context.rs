// Context detection — signals that soften or harden a term hit.
//
// All predicates take the raw text lowercased, not the normalized form:
// emoji, apostrophes and "f***" are exactly what the normalizer throws away.

use std::sync::OnceLock;

use regex_lite::Regex;

use crate::catalog::TermCatalog;

/// Emoji and emoticons that signal joking intent. Matched as substrings.
const BANTER_SYMBOLS: &[&str] = &["😂", "🤣", "😜", "😉", "😆", "😄", "😝", "😛", ";)"];

/// Words that signal joking intent. Matched on word boundaries so "lol"
/// doesn't fire inside "lollipop".
const BANTER_WORDS: &str = r"\b(lol|lmao|lmfao|rofl|haha+|hehe+|jk|j/k|just kidding|just joking|no offense|no offence|kidding|joking)\b";

const SELF_REFERENCE: &str = r"\b(i|i'm|im|me|myself)\b";

const SELF_INSULT: &str = r"\b(idiot|stupid|dumb|moron|fool)\b";

/// Second-person attack shapes.
const ATTACK_PATTERNS: &[&str] = &[
    r"\byou\s+are\s+(a\s+|an\s+|such\s+an?\s+|so\s+|the\s+)?(real\s+|total\s+|complete\s+|fucking\s+)?(idiot|stupid|dumb|moron|fool|loser|pathetic|worthless|trash|garbage|ugly|retard|clown|joke)",
    r"\byou'?re\s+(a\s+|an\s+|such\s+an?\s+|so\s+|the\s+)?(real\s+|total\s+|complete\s+|fucking\s+)?(idiot|stupid|dumb|moron|fool|loser|pathetic|worthless|trash|garbage|ugly|retard|clown|joke)",
    r"\bur\s+(a\s+|an\s+|such\s+an?\s+|so\s+)?(idiot|stupid|dumb|moron|fool|loser|pathetic|worthless|trash|garbage|ugly)",
    r"\bgo\s+die\b",
    r"\bkill\s+yourself\b",
    r"\bf[u\*]+c?k?\s+(you|u)\b",
    r"\bfuck\s+(you|u)\b",
    r"\bnobody\s+(likes|wants|cares\s+about)\s+you\b",
];

fn banter_words() -> &'static Option<Regex> {
    static RE: OnceLock<Option<Regex>> = OnceLock::new();
    RE.get_or_init(|| Regex::new(BANTER_WORDS).ok())
}

fn self_reference() -> &'static Option<Regex> {
    static RE: OnceLock<Option<Regex>> = OnceLock::new();
    RE.get_or_init(|| Regex::new(SELF_REFERENCE).ok())
}

fn self_insult() -> &'static Option<Regex> {
    static RE: OnceLock<Option<Regex>> = OnceLock::new();
    RE.get_or_init(|| Regex::new(SELF_INSULT).ok())
}

fn attack_patterns() -> &'static [Regex] {
    static PATTERNS: OnceLock<Vec<Regex>> = OnceLock::new();
    PATTERNS.get_or_init(|| {
        ATTACK_PATTERNS
            .iter()
            .filter_map(|p| Regex::new(p).ok())
            .collect()
    })
}

fn matches(re: &Option<Regex>, text: &str) -> bool {
    re.as_ref().is_some_and(|re| re.is_match(text))
}

/// Mitigating and aggravating context for one piece of text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ContextSignals {
    pub book_context: bool,
    pub banter: bool,
    pub self_deprecating: bool,
    pub targeted_attack: bool,
}

impl ContextSignals {
    /// Evaluate all four predicates at once. `lower` must already be lowercased.
    pub fn detect(lower: &str, catalog: &TermCatalog) -> Self {
        Self {
            book_context: is_book_context(lower, catalog),
            banter: is_friendly_banter(lower),
            self_deprecating: is_self_deprecating(lower),
            targeted_attack: is_targeted_attack(lower),
        }
    }
}

/// The text quotes a whitelisted phrase or names a whitelisted title
/// ("To Kill a Mockingbird").
pub fn is_book_context(lower: &str, catalog: &TermCatalog) -> bool {
    catalog
        .book_whitelist()
        .iter()
        .chain(catalog.book_titles_whitelist())
        .any(|phrase| !phrase.is_empty() && lower.contains(phrase.as_str()))
}

pub fn is_friendly_banter(lower: &str) -> bool {
    BANTER_SYMBOLS.iter().any(|s| lower.contains(s)) || matches(banter_words(), lower)
}

/// Needs both halves: "i'm such an idiot" yes, "what an idiot" no.
pub fn is_self_deprecating(lower: &str) -> bool {
    matches(self_reference(), lower) && matches(self_insult(), lower)
}

pub fn is_targeted_attack(lower: &str) -> bool {
    attack_patterns().iter().any(|re| re.is_match(lower))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_static_patterns_compile() {
        assert!(banter_words().is_some());
        assert!(self_reference().is_some());
        assert!(self_insult().is_some());
        assert_eq!(attack_patterns().len(), ATTACK_PATTERNS.len());
    }

    #[test]
    fn lol_needs_word_boundary() {
        assert!(is_friendly_banter("that was great lol"));
        assert!(!is_friendly_banter("bought a lollipop"));
    }
}
