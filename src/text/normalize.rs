// Text normalizer — canonicalizes raw user text for term matching.
//
// Obfuscated abuse ("k i l l", "k1ll", Cyrillic "кіll", "k\u{200B}ill") all
// need to land on the same string as the plain spelling. The stages run in
// a fixed order and each one assumes the previous ones already ran:
//
//   1. NFKD decomposition, combining marks dropped
//   2. strip zero-width / invisible / control characters
//   3. homoglyphs -> Latin (before case folding, so both cases are mapped)
//   4. lowercase
//   5. leet-speak digits and symbols -> letters
//   6. join single letters separated by whitespace
//   7. squeeze runs of 3+ identical characters down to 2
//   8. anything outside [a-z0-9 ] becomes a space
//   9. collapse whitespace and trim
//
// Stage 8 can expose new spaced-out letters ("k.i.l.l" -> "k i l l"), so
// stages 6 and 7 run once more on its output. That keeps the whole thing
// idempotent.

use std::collections::HashMap;
use std::sync::OnceLock;

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Cyrillic and Greek letters that render like Latin ones.
const HOMOGLYPHS: &[(char, char)] = &[
    // Cyrillic lowercase
    ('а', 'a'),
    ('в', 'b'),
    ('е', 'e'),
    ('к', 'k'),
    ('м', 'm'),
    ('н', 'h'),
    ('о', 'o'),
    ('р', 'p'),
    ('с', 'c'),
    ('т', 't'),
    ('у', 'y'),
    ('х', 'x'),
    ('і', 'i'),
    ('ј', 'j'),
    ('ѕ', 's'),
    ('ԁ', 'd'),
    ('ԛ', 'q'),
    ('ԝ', 'w'),
    ('һ', 'h'),
    // Cyrillic uppercase
    ('А', 'A'),
    ('В', 'B'),
    ('Е', 'E'),
    ('К', 'K'),
    ('М', 'M'),
    ('Н', 'H'),
    ('О', 'O'),
    ('Р', 'P'),
    ('С', 'C'),
    ('Т', 'T'),
    ('У', 'Y'),
    ('Х', 'X'),
    ('І', 'I'),
    ('Ј', 'J'),
    ('Ѕ', 'S'),
    // Greek lowercase
    ('α', 'a'),
    ('ε', 'e'),
    ('ι', 'i'),
    ('κ', 'k'),
    ('ν', 'v'),
    ('ο', 'o'),
    ('ρ', 'p'),
    ('τ', 't'),
    ('υ', 'u'),
    ('χ', 'x'),
    // Greek uppercase
    ('Α', 'A'),
    ('Β', 'B'),
    ('Ε', 'E'),
    ('Ζ', 'Z'),
    ('Η', 'H'),
    ('Ι', 'I'),
    ('Κ', 'K'),
    ('Μ', 'M'),
    ('Ν', 'N'),
    ('Ο', 'O'),
    ('Ρ', 'P'),
    ('Τ', 'T'),
    ('Υ', 'Y'),
    ('Χ', 'X'),
];

/// Digit/symbol substitutions applied after lowercasing.
const LEET: &[(char, char)] = &[
    ('4', 'a'),
    ('3', 'e'),
    ('1', 'i'),
    ('0', 'o'),
    ('5', 's'),
    ('7', 't'),
    ('@', 'a'),
    ('$', 's'),
];

/// Whether `c` is something the leet stage can produce ("4" -> "a").
pub(crate) fn is_leet_target(c: char) -> bool {
    LEET.iter().any(|(_, to)| *to == c)
}

fn homoglyph_table() -> &'static HashMap<char, char> {
    static TABLE: OnceLock<HashMap<char, char>> = OnceLock::new();
    TABLE.get_or_init(|| HOMOGLYPHS.iter().copied().collect())
}

/// Normalize `text` into lowercase ASCII words separated by single spaces.
pub fn normalize(text: &str) -> String {
    let decomposed = decompose(text);
    let visible = strip_invisible(&decomposed);
    let latin = replace_homoglyphs(&visible);
    let lower = latin.to_lowercase();
    let unleeted = replace_leet(&lower);
    let joined = join_spaced_letters(&unleeted);
    let squeezed = squeeze_repeats(&joined);
    let ascii = replace_non_alphanumeric(&squeezed);
    let ascii = squeeze_repeats(&join_spaced_letters(&ascii));
    collapse_whitespace(&ascii)
}

/// Stage 1: compatibility decomposition, then drop the accents it split off.
fn decompose(text: &str) -> String {
    text.nfkd().filter(|c| !is_combining_mark(*c)).collect()
}

/// Characters that render as nothing and get used to split words.
fn is_invisible(c: char) -> bool {
    matches!(
        c,
        '\u{00AD}'
            | '\u{034F}'
            | '\u{061C}'
            | '\u{115F}'
            | '\u{1160}'
            | '\u{17B4}'
            | '\u{17B5}'
            | '\u{180B}'..='\u{180E}'
            | '\u{200B}'..='\u{200F}'
            | '\u{202A}'..='\u{202E}'
            | '\u{2060}'..='\u{2064}'
            | '\u{2066}'..='\u{206F}'
            | '\u{3164}'
            | '\u{FE00}'..='\u{FE0F}'
            | '\u{FEFF}'
            | '\u{FFA0}'
    ) || (c.is_control() && !c.is_whitespace())
}

/// Stage 2
fn strip_invisible(text: &str) -> String {
    text.chars().filter(|c| !is_invisible(*c)).collect()
}

/// Stage 3
fn replace_homoglyphs(text: &str) -> String {
    let table = homoglyph_table();
    text.chars()
        .map(|c| table.get(&c).copied().unwrap_or(c))
        .collect()
}

/// Stage 5
fn replace_leet(text: &str) -> String {
    text.chars()
        .map(|c| {
            LEET.iter()
                .find(|(from, _)| *from == c)
                .map(|(_, to)| *to)
                .unwrap_or(c)
        })
        .collect()
}

fn is_single_letter(token: &str) -> bool {
    let mut chars = token.chars();
    matches!((chars.next(), chars.next()), (Some(c), None) if c.is_alphabetic())
}

/// Stage 6: "k i l l you" -> "kill you". A lone single letter ("a book")
/// is left alone; only runs of two or more are joined.
fn join_spaced_letters(text: &str) -> String {
    let mut words: Vec<String> = Vec::new();
    let mut run = String::new();

    for token in text.split_whitespace() {
        if is_single_letter(token) {
            run.push_str(token);
            continue;
        }
        if !run.is_empty() {
            words.push(std::mem::take(&mut run));
        }
        words.push(token.to_string());
    }
    if !run.is_empty() {
        words.push(run);
    }

    words.join(" ")
}

/// Stage 7: "soooo" -> "soo".
fn squeeze_repeats(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut prev: Option<char> = None;
    let mut count = 0;

    for c in text.chars() {
        if Some(c) == prev {
            count += 1;
        } else {
            prev = Some(c);
            count = 1;
        }
        if count <= 2 {
            out.push(c);
        }
    }
    out
}

/// Stage 8
fn replace_non_alphanumeric(text: &str) -> String {
    text.chars()
        .map(|c| match c {
            'a'..='z' | '0'..='9' | ' ' => c,
            _ => ' ',
        })
        .collect()
}

/// Stage 9
fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn squeeze_keeps_pairs() {
        assert_eq!(squeeze_repeats("good"), "good");
        assert_eq!(squeeze_repeats("sooooo"), "soo");
    }

    #[test]
    fn join_needs_two_letters() {
        assert_eq!(join_spaced_letters("a book"), "a book");
        assert_eq!(join_spaced_letters("k i l l it"), "kill it");
    }

    #[test]
    fn invisible_detection() {
        assert!(is_invisible('\u{200B}'));
        assert!(is_invisible('\u{FEFF}'));
        assert!(!is_invisible('\n'));
        assert!(!is_invisible('a'));
    }
}
