//! Forbidden-term matching and rewriting
//!
//! Detection is plain case-insensitive substring containment: partial-word
//! hits are an accepted tradeoff for simplicity. Regex is reserved for the
//! replacement path.

pub mod rewrite;
pub mod terms;

pub use rewrite::{MatchError, replace_term};
pub use terms::{find_all_matches, find_first_match, normalize_terms};
