use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RankError {
    /// A role definition has no synonyms.
    EmptyRole(String),
    /// A role definition contains a blank synonym.
    EmptySynonym { role: String },
    /// A whole-word synonym failed to compile into a pattern.
    Pattern { role: String, synonym: String, message: String },
    /// The priority list is empty.
    NoRoles,
    /// A priority list names a label missing from the taxonomy.
    UnknownRole(String),
    /// A priority list names the same label twice.
    DuplicateRole(String),
}

impl fmt::Display for RankError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyRole(role) => write!(f, "role '{role}' has no synonyms"),
            Self::EmptySynonym { role } => write!(f, "role '{role}': blank synonym"),
            Self::Pattern { role, synonym, message } => {
                write!(f, "role '{role}', synonym '{synonym}': {message}")
            }
            Self::NoRoles => write!(f, "at least one role must be selected"),
            Self::UnknownRole(role) => write!(f, "unknown role: {role}"),
            Self::DuplicateRole(role) => write!(f, "role '{role}' selected more than once"),
        }
    }
}

impl std::error::Error for RankError {}

/// Failure reported by a [`ContactSource`](crate::source::ContactSource).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceError {
    /// Upstream answered with a non-success status.
    Http { status: u16, message: String },
    /// Upstream kept answering 429 after all retries.
    RateLimited,
    /// Connection, timeout or TLS failure.
    Network(String),
    /// Response body was not the expected shape.
    Parse(String),
}

impl SourceError {
    /// HTTP status associated with the failure, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            Self::RateLimited => Some(429),
            Self::Network(_) | Self::Parse(_) => None,
        }
    }
}

impl fmt::Display for SourceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Http { status, message } => write!(f, "HTTP {status}: {message}"),
            Self::RateLimited => write!(f, "rate limited"),
            Self::Network(msg) => write!(f, "network error: {msg}"),
            Self::Parse(msg) => write!(f, "parse error: {msg}"),
        }
    }
}

impl std::error::Error for SourceError {}

/// Why a selection came back empty. Neither case is fatal to a batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectError {
    /// Candidates existed but none matched a selected role.
    NoRankedMatch,
    /// The skip offset consumed every ranked candidate.
    ExhaustedBySkip { skip: usize, available: usize },
}

impl fmt::Display for SelectError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoRankedMatch => write!(f, "No matching titles found"),
            Self::ExhaustedBySkip { .. } => write!(f, "Skipped all available contacts"),
        }
    }
}

impl std::error::Error for SelectError {}
