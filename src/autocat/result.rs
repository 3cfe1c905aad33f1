use std::fmt;

/// Outcome of categorizing one game.
///
/// `Success` covers the no-match case: a scheme that assigns nothing
/// still succeeded. `NotInDatabase` is recoverable (refresh the database
/// and retry that game). `Failure` means the game id is not in the bound
/// game list; the caller should stop the batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategorizeResult {
    Success,
    NotInDatabase,
    Failure,
}

impl fmt::Display for CategorizeResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CategorizeResult::Success => write!(f, "success"),
            CategorizeResult::NotInDatabase => write!(f, "not in database"),
            CategorizeResult::Failure => write!(f, "failure"),
        }
    }
}
