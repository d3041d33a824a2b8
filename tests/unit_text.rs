// Unit tests for the text layer.
//
// Tests the normalizer against the obfuscation tricks it exists to undo
// (spacing, leetspeak, homoglyphs, zero-width chars, full-width forms),
// the approximate matcher's thresholds, and the four context predicates.

use cinder::text::context::{
    is_book_context, is_friendly_banter, is_self_deprecating, is_targeted_attack, ContextSignals,
};
use cinder::text::matcher::{contains_term, levenshtein, similarity, SIMILARITY_THRESHOLD};
use cinder::text::normalize;
use cinder::TermCatalog;

fn catalog() -> TermCatalog {
    TermCatalog::from_json_str(include_str!("../data/terms.json")).unwrap()
}

// ============================================================
// normalize — obfuscation handling
// ============================================================

#[test]
fn normalize_lowercases_and_strips_punctuation() {
    assert_eq!(normalize("Great Book, Highly Recommend!"), "great book highly recommend");
}

#[test]
fn normalize_joins_spaced_letters() {
    assert_eq!(normalize("k i l l y o u r s e l f"), "killyourself");
    assert_eq!(normalize("a b c d"), "abcd");
}

#[test]
fn normalize_keeps_lone_single_letters() {
    assert_eq!(normalize("I am a fan"), "i am a fan");
}

#[test]
fn normalize_joins_letters_split_by_punctuation() {
    assert_eq!(normalize("s.t.u.p.i.d"), "stupid");
}

#[test]
fn normalize_undoes_leetspeak() {
    assert_eq!(normalize("H3LL0 W0RLD"), "hello world");
    assert_eq!(normalize("i will k1ll you"), "i will kill you");
}

#[test]
fn normalize_undoes_cyrillic_homoglyphs() {
    // Cyrillic і (U+0456) and о (U+043E)
    assert_eq!(normalize("k\u{0456}ll y\u{043E}urself"), "kill yourself");
}

#[test]
fn normalize_strips_zero_width_chars() {
    assert_eq!(normalize("k\u{200B}ill"), "kill");
    assert_eq!(normalize("i\u{FEFF}diot"), "idiot");
}

#[test]
fn normalize_folds_compatibility_forms() {
    assert_eq!(normalize("Ｋｉｌｌ ｙｏｕｒｓｅｌｆ"), "kill yourself");
    assert_eq!(normalize("ℌello"), "hello");
}

#[test]
fn normalize_drops_accents() {
    assert_eq!(normalize("café"), "cafe");
}

#[test]
fn normalize_squeezes_long_runs_to_two() {
    assert_eq!(normalize("heeeello"), "heello");
    assert_eq!(normalize("Heyyyyyy great read"), "heyy great read");
}

#[test]
fn normalize_collapses_whitespace() {
    assert_eq!(normalize("  hello   \t world \n"), "hello world");
}

#[test]
fn normalize_empty_and_symbol_only_inputs() {
    assert_eq!(normalize(""), "");
    assert_eq!(normalize("   "), "");
    assert_eq!(normalize("!!!"), "");
}

#[test]
fn normalize_is_idempotent() {
    let samples = [
        "k i l l y o u r s e l f",
        "k.i.l.l y.o.u.r.s.e.l.f",
        "H3LL0 W0RLD",
        "x y z hello",
        "it’s a b-c d",
        "Ｋｉｌｌ ｙｏｕｒｓｅｌｆ",
        "heeeello wooorld!!!",
        "1 2 3 4",
        "café au lait",
        "you're such an idiot lol 😂",
        "",
    ];
    for sample in samples {
        let once = normalize(sample);
        assert_eq!(normalize(&once), once, "not idempotent for {sample:?}");
    }
}

// ============================================================
// levenshtein / similarity
// ============================================================

#[test]
fn levenshtein_classic_pair() {
    assert_eq!(levenshtein("kitten", "sitting"), 3);
}

#[test]
fn levenshtein_against_empty_is_length() {
    assert_eq!(levenshtein("", "abc"), 3);
    assert_eq!(levenshtein("abc", ""), 3);
}

#[test]
fn levenshtein_counts_chars_not_bytes() {
    assert_eq!(levenshtein("café", "cafe"), 1);
}

#[test]
fn similarity_is_normalized_by_longer_string() {
    assert!((similarity("kill", "skill") - 0.8).abs() < 1e-9);
    assert!((similarity("", "") - 1.0).abs() < 1e-9);
}

#[test]
fn threshold_is_085() {
    assert!((SIMILARITY_THRESHOLD - 0.85).abs() < 1e-9);
}

// ============================================================
// contains_term
// ============================================================

#[test]
fn contains_exact_substring() {
    assert!(contains_term("you are an idiot", "idiot"));
}

#[test]
fn contains_fuzzy_single_word() {
    // 1 edit over 7 chars: similarity 0.857
    assert!(contains_term("you are stuupid", "stupid"));
}

#[test]
fn rejects_distant_word() {
    // transposition costs 2 edits over 5 chars: similarity 0.6
    assert!(!contains_term("you are an idoit", "idiot"));
}

#[test]
fn contains_fuzzy_multi_word_phrase() {
    assert!(contains_term("just kall yourself already", "kill yourself"));
}

#[test]
fn phrase_window_rejects_real_words() {
    assert!(!contains_term("i hope you like it", "i hope you die"));
    assert!(!contains_term("i hope you did well", "i hope you die"));
    assert!(!contains_term("i will tell you when it ships", "i will kill you"));
    assert!(!contains_term("i will bill you tomorrow", "i will kill you"));
}

#[test]
fn contains_joined_phrase() {
    assert!(contains_term("killyourself", "kill yourself"));
}

#[test]
fn empty_term_or_text_never_matches() {
    assert!(!contains_term("", "kill"));
    assert!(!contains_term("hello", ""));
}

#[test]
fn substring_match_is_not_word_bounded() {
    assert!(contains_term("great skills", "kill"));
}

// ============================================================
// Context predicates
// ============================================================

#[test]
fn book_title_is_book_context() {
    let catalog = catalog();
    assert!(is_book_context("i loved to kill a mockingbird", &catalog));
    assert!(!is_book_context("i want to kill the author", &catalog));
}

#[test]
fn book_phrase_is_book_context() {
    assert!(is_book_context("the author killed it with this one", &catalog()));
}

#[test]
fn empty_catalog_has_no_book_context() {
    assert!(!is_book_context("to kill a mockingbird", &TermCatalog::builtin()));
}

#[test]
fn banter_from_words_and_emoji() {
    assert!(is_friendly_banter("you got me haha"));
    assert!(is_friendly_banter("just kidding"));
    assert!(is_friendly_banter("nice one 😂"));
    assert!(is_friendly_banter("sure ;)"));
    assert!(!is_friendly_banter("this is a serious complaint"));
}

#[test]
fn banter_word_needs_boundary() {
    assert!(!is_friendly_banter("bought a lollipop"));
}

#[test]
fn self_deprecation_needs_both_halves() {
    assert!(is_self_deprecating("i'm such an idiot"));
    assert!(is_self_deprecating("i am so dumb"));
    assert!(!is_self_deprecating("what an idiot"));
    assert!(!is_self_deprecating("i loved it"));
}

#[test]
fn targeted_attack_shapes() {
    assert!(is_targeted_attack("you are stupid"));
    assert!(is_targeted_attack("you're such an idiot"));
    assert!(is_targeted_attack("ur a loser"));
    assert!(is_targeted_attack("just go die"));
    assert!(is_targeted_attack("nobody likes you"));
    assert!(!is_targeted_attack("this book is stupid"));
}

#[test]
fn signals_detect_all_at_once() {
    let signals = ContextSignals::detect("you're such an idiot lol 😂", &catalog());
    assert_eq!(
        signals,
        ContextSignals {
            book_context: false,
            banter: true,
            self_deprecating: false,
            targeted_attack: true,
        }
    );
}
