use serde::{Deserialize, Serialize};

/// Outcome of one cleaning pass over a single URL.
///
/// `cleaned` is derived only from `original` and the compiled-in parameter
/// denylist; the input string is carried through untouched so callers can
/// show a before/after comparison.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct CleanResult {
    pub original: String,
    pub cleaned: String,
    pub removed_count: usize,
}
