//! Prerequisite text matcher

use std::sync::LazyLock;

use regex::Regex;

/// Canonical label, also used as the search endpoint query
pub const PREREQ_LABEL: &str = "Mathematics 31A";

// The catalog mostly writes "Mathematics 31A"; the shorter spellings
// turn up occasionally. Case-sensitive on purpose: "31a" is not a course.
static PREREQ_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(?:Mathematics|Math\.?|MATH)\s+31A\b").expect("prerequisite pattern is valid")
});

/// Does `text` mention Mathematics 31A?
pub fn mentions_math_31a(text: &str) -> bool {
    !text.is_empty() && PREREQ_RE.is_match(text)
}
