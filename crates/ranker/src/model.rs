use serde::Deserialize;

// ---------------------------------------------------------------------------
// Input
// ---------------------------------------------------------------------------

/// A person record as returned by the search collaborator.
///
/// Every field is optional: upstream records are frequently partial.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RawContact {
    pub id: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub name: Option<String>,
    pub label: Option<String>,
    pub title: Option<String>,
    pub email: Option<String>,
    pub email_status: Option<String>,
}

impl RawContact {
    /// Display-name source: `name`, falling back to `label` when `name` is
    /// absent or empty.
    pub fn display_name(&self) -> Option<&str> {
        self.name
            .as_deref()
            .filter(|n| !n.is_empty())
            .or(self.label.as_deref())
    }
}

/// Result of a reveal lookup for a single candidate.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RevealedContact {
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub display_name: Option<String>,
}

// ---------------------------------------------------------------------------
// Scoring
// ---------------------------------------------------------------------------

/// Priority position of the first role whose synonym matched a title.
///
/// Variant order matters: every `Ranked` value sorts before `Unranked`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Rank {
    Ranked(usize),
    Unranked,
}

impl Rank {
    pub fn is_ranked(&self) -> bool {
        matches!(self, Self::Ranked(_))
    }
}

impl std::fmt::Display for Rank {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Ranked(i) => write!(f, "{i}"),
            Self::Unranked => write!(f, "unranked"),
        }
    }
}

/// A candidate with normalized names and its rank against a priority list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoredCandidate {
    pub id: Option<String>,
    pub first: String,
    pub last: String,
    pub full: String,
    pub title: String,
    pub email: Option<String>,
    pub rank: Rank,
}

// ---------------------------------------------------------------------------
// Selection
// ---------------------------------------------------------------------------

/// Rotation offset and result cap for one search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectionWindow {
    pub skip: usize,
    pub limit: usize,
}

impl SelectionWindow {
    pub fn new(skip: usize, limit: usize) -> Self {
        Self { skip, limit }
    }
}

// ---------------------------------------------------------------------------
// Output
// ---------------------------------------------------------------------------

/// How person names are laid out in shaped rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NameFormat {
    /// `First Name_i` + `Last Name_i`
    #[default]
    Separate,
    /// `Name_i`
    Combined,
}

/// Outcome of processing one organization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrgStatus {
    Success,
    NoMatches,
    Failed(String),
}

impl std::fmt::Display for OrgStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Success => write!(f, "Success"),
            Self::NoMatches => write!(f, "No Matches"),
            Self::Failed(msg) => write!(f, "{msg}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrgReport {
    pub domain: String,
    pub status: OrgStatus,
    pub contacts: Vec<ScoredCandidate>,
}

impl OrgReport {
    pub fn failed(domain: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            domain: domain.into(),
            status: OrgStatus::Failed(reason.into()),
            contacts: Vec::new(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == OrgStatus::Success
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
