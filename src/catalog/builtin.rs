// Built-in safety net for when the catalog document can't be loaded.
//
// Only the critical tier is carried here. Everything else degrades to empty,
// but the worst content is still blocked.

pub const FALLBACK_CRITICAL: &[&str] = &[
    "kill yourself",
    "hang yourself",
    "i will kill you",
    "i hope you die",
    "i will rape you",
    "child porn",
];
