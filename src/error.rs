use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    LockPoisoned(&'static str),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::LockPoisoned(operation) => {
                write!(f, "store lock poisoned during {}", operation)
            }
        }
    }
}

impl std::error::Error for StoreError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AutoCatError {
    NotBound { autocat: String },
    Store(StoreError),
}

impl fmt::Display for AutoCatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AutoCatError::NotBound { autocat } => {
                write!(f, "autocat {} used outside a pre_process window", autocat)
            }
            AutoCatError::Store(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for AutoCatError {}

impl From<StoreError> for AutoCatError {
    fn from(err: StoreError) -> Self {
        AutoCatError::Store(err)
    }
}
