//! Term replacement

use regex::{NoExpand, RegexBuilder};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum MatchError {
    #[error("failed to build replacement pattern for term {term:?}")]
    Pattern {
        term: String,
        #[source]
        source: regex::Error,
    },
}

/// Replace every case-insensitive occurrence of `term` in `content`.
///
/// The term is escaped so regex metacharacters match literally, and the
/// replacement text is inserted verbatim (no `$` group expansion).
pub fn replace_term(content: &str, term: &str, replacement: &str) -> Result<String, MatchError> {
    let pattern = RegexBuilder::new(&regex::escape(term))
        .case_insensitive(true)
        .build()
        .map_err(|source| MatchError::Pattern {
            term: term.to_string(),
            source,
        })?;

    Ok(pattern.replace_all(content, NoExpand(replacement)).into_owned())
}
