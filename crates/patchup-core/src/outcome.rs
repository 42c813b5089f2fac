use std::fmt;

/// How a single workflow run ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Git ran and succeeded
    Completed,
    /// The user declined (or interrupted) the confirmation prompt
    Declined,
    /// Git failed; the failure was already reported to the user
    Failed { error: String },
}

impl Outcome {
    pub fn failed(error: impl ToString) -> Self {
        Self::Failed {
            error: error.to_string(),
        }
    }

    pub fn is_completed(&self) -> bool {
        matches!(self, Self::Completed)
    }

    pub fn is_declined(&self) -> bool {
        matches!(self, Self::Declined)
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Completed => write!(f, "completed"),
            Self::Declined => write!(f, "declined"),
            Self::Failed { error } => write!(f, "failed: {}", error),
        }
    }
}
