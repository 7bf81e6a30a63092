//! Role taxonomy: canonical role labels and the synonyms that identify them
//! inside free-text job titles.
//!
//! The taxonomy is built once at startup and passed explicitly to the
//! scorer. Whole-word patterns for short synonyms are compiled here so that
//! scoring never compiles a regex.

use regex::Regex;
use serde::Deserialize;

use crate::error::RankError;

/// Synonyms at or below this many characters must match as whole words.
///
/// Short acronyms ("md", "vp", "cfo") collide with substrings of longer
/// words ("admin", "mvp"); longer phrases are specific enough for plain
/// substring matching. The cutoff is a heuristic and can be overridden via
/// [`RoleTaxonomy::new`].
pub const DEFAULT_WHOLE_WORD_MAX_LEN: usize = 4;

const BUILTIN_ROLES: &[(&str, &[&str])] = &[
    ("Owner", &["owner", "co-owner", "proprietor", "sole proprietor"]),
    ("Founder", &["founder", "co-founder", "founding partner"]),
    ("CEO", &["ceo", "c.e.o.", "chief executive officer", "chief executive"]),
    (
        "COO",
        &["coo", "c.o.o.", "chief operating officer", "vp of operations", "head of operations"],
    ),
    (
        "CFO",
        &[
            "cfo",
            "c.f.o.",
            "chief financial officer",
            "vp of finance",
            "head of finance",
            "finance director",
        ],
    ),
    (
        "CMO",
        &["cmo", "c.m.o.", "chief marketing officer", "vp of marketing", "head of marketing"],
    ),
    (
        "CIO/CTO",
        &[
            "cio",
            "c.i.o.",
            "cto",
            "c.t.o.",
            "chief investment officer",
            "chief technology officer",
            "chief information officer",
        ],
    ),
    ("President", &["president", "executive director"]),
    ("Managing Director", &["managing director", "md", "m.d."]),
    ("Managing Partner", &["managing partner"]),
    ("Partner", &["partner", "general partner"]),
    ("Vice President", &["vice president", "vp", "v.p."]),
    ("Principal", &["principal"]),
    ("Head", &["head of"]),
    ("Director", &["director"]),
];

// ---------------------------------------------------------------------------
// Definitions
// ---------------------------------------------------------------------------

/// Uncompiled role definition, as written in code or settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RoleDefinition {
    pub label: String,
    pub synonyms: Vec<String>,
}

impl RoleDefinition {
    pub fn new(label: impl Into<String>, synonyms: &[&str]) -> Self {
        Self {
            label: label.into(),
            synonyms: synonyms.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// The built-in role definitions, highest-seniority first.
pub fn builtin_definitions() -> Vec<RoleDefinition> {
    BUILTIN_ROLES
        .iter()
        .map(|(label, synonyms)| RoleDefinition::new(*label, synonyms))
        .collect()
}

/// Apply overrides on top of `base`: an override whose label already exists
/// replaces that role's synonyms in place; any other override is appended.
pub fn merge_definitions(
    mut base: Vec<RoleDefinition>,
    overrides: impl IntoIterator<Item = RoleDefinition>,
) -> Vec<RoleDefinition> {
    for def in overrides {
        match base.iter_mut().find(|b| b.label == def.label) {
            Some(existing) => existing.synonyms = def.synonyms,
            None => base.push(def),
        }
    }
    base
}

// ---------------------------------------------------------------------------
// Compiled taxonomy
// ---------------------------------------------------------------------------

/// A lower-cased synonym plus its whole-word pattern when it is short.
#[derive(Debug, Clone)]
pub struct Synonym {
    text: String,
    whole_word: Option<Regex>,
}

impl Synonym {
    fn compile(role: &str, raw: &str, whole_word_max_len: usize) -> Result<Self, RankError> {
        let text = raw.trim().to_lowercase();
        if text.is_empty() {
            return Err(RankError::EmptySynonym { role: role.to_string() });
        }

        let whole_word = if text.chars().count() <= whole_word_max_len {
            let pattern = format!(r"\b{}\b", regex::escape(&text));
            let re = Regex::new(&pattern).map_err(|e| RankError::Pattern {
                role: role.to_string(),
                synonym: text.clone(),
                message: e.to_string(),
            })?;
            Some(re)
        } else {
            None
        };

        Ok(Self { text, whole_word })
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Test an already lower-cased title.
    pub fn matches(&self, lowered_title: &str) -> bool {
        match &self.whole_word {
            Some(re) => re.is_match(lowered_title),
            None => lowered_title.contains(&self.text),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Role {
    label: String,
    synonyms: Vec<Synonym>,
}

impl Role {
    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn synonyms(&self) -> &[Synonym] {
        &self.synonyms
    }
}

/// Immutable label → synonyms mapping, in definition order.
#[derive(Debug, Clone)]
pub struct RoleTaxonomy {
    roles: Vec<Role>,
}

impl RoleTaxonomy {
    pub fn new(
        definitions: Vec<RoleDefinition>,
        whole_word_max_len: usize,
    ) -> Result<Self, RankError> {
        let mut roles = Vec::with_capacity(definitions.len());
        for def in definitions {
            if def.synonyms.is_empty() {
                return Err(RankError::EmptyRole(def.label));
            }
            let synonyms = def
                .synonyms
                .iter()
                .map(|s| Synonym::compile(&def.label, s, whole_word_max_len))
                .collect::<Result<Vec<_>, _>>()?;
            roles.push(Role { label: def.label, synonyms });
        }
        Ok(Self { roles })
    }

    /// The built-in taxonomy with the default whole-word cutoff.
    pub fn builtin() -> Result<Self, RankError> {
        Self::new(builtin_definitions(), DEFAULT_WHOLE_WORD_MAX_LEN)
    }

    pub fn roles(&self) -> &[Role] {
        &self.roles
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.roles.iter().map(|r| r.label.as_str())
    }

    pub fn get(&self, label: &str) -> Option<&Role> {
        self.roles.iter().find(|r| r.label == label)
    }

    pub fn synonyms_for(&self, label: &str) -> Option<&[Synonym]> {
        self.get(label).map(Role::synonyms)
    }

    /// Flattened synonyms of the selected roles, in priority order.
    /// This is the title filter handed to the search collaborator.
    pub fn search_terms(&self, priority: &RolePriorityList) -> Vec<String> {
        priority
            .labels()
            .iter()
            .filter_map(|label| self.synonyms_for(label))
            .flat_map(|syns| syns.iter().map(|s| s.as_str().to_string()))
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Priority list
// ---------------------------------------------------------------------------

/// Caller-chosen role order; index 0 is the highest priority.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RolePriorityList {
    labels: Vec<String>,
}

impl RolePriorityList {
    /// Validate `labels` against `taxonomy`: non-empty, all known, no repeats.
    pub fn new<I, S>(labels: I, taxonomy: &RoleTaxonomy) -> Result<Self, RankError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut out: Vec<String> = Vec::new();
        for label in labels {
            let label = label.into();
            if taxonomy.get(&label).is_none() {
                return Err(RankError::UnknownRole(label));
            }
            if out.contains(&label) {
                return Err(RankError::DuplicateRole(label));
            }
            out.push(label);
        }
        if out.is_empty() {
            return Err(RankError::NoRoles);
        }
        Ok(Self { labels: out })
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_has_every_role_in_order() {
        let tax = RoleTaxonomy::builtin().unwrap();
        let labels: Vec<&str> = tax.labels().collect();
        assert_eq!(labels.len(), 15);
        assert_eq!(labels[0], "Owner");
        assert_eq!(labels[8], "Managing Director");
        assert_eq!(labels[14], "Director");
    }

    #[test]
    fn short_synonyms_match_whole_words_only() {
        let tax = RoleTaxonomy::builtin().unwrap();
        let md = tax.synonyms_for("Managing Director").unwrap();
        assert!(md[0].matches("senior managing directors")); // "managing director"
        assert!(md[1].matches("md, europe")); // "md"
        assert!(!md[1].matches("admin"));
        assert!(!md[2].matches("founder, m.d.")); // "m.d." is exactly 4 chars
        let ceo = tax.synonyms_for("CEO").unwrap();
        assert!(ceo[1].matches("xc.e.o.x")); // "c.e.o." is 6 chars
    }

    #[test]
    fn whole_word_cutoff_is_tunable() {
        let defs = vec![RoleDefinition::new("Owner", &["owner"])];
        let tax = RoleTaxonomy::new(defs.clone(), 5).unwrap();
        assert!(!tax.synonyms_for("Owner").unwrap()[0].matches("co-owners"));
        let tax = RoleTaxonomy::new(defs, 4).unwrap();
        assert!(tax.synonyms_for("Owner").unwrap()[0].matches("co-owners"));
    }

    #[test]
    fn synonyms_are_normalized() {
        let defs = vec![RoleDefinition::new("CEO", &["  CEO "])];
        let tax = RoleTaxonomy::new(defs, 4).unwrap();
        assert_eq!(tax.synonyms_for("CEO").unwrap()[0].as_str(), "ceo");
    }

    #[test]
    fn reject_role_without_synonyms() {
        let defs = vec![RoleDefinition { label: "Ghost".into(), synonyms: vec![] }];
        let err = RoleTaxonomy::new(defs, 4).unwrap_err();
        assert_eq!(err, RankError::EmptyRole("Ghost".into()));
    }

    #[test]
    fn reject_blank_synonym() {
        let defs = vec![RoleDefinition::new("CEO", &["ceo", "  "])];
        let err = RoleTaxonomy::new(defs, 4).unwrap_err();
        assert!(err.to_string().contains("blank synonym"));
    }

    #[test]
    fn shared_synonym_across_labels_is_allowed() {
        let defs = vec![
            RoleDefinition::new("Managing Director", &["md"]),
            RoleDefinition::new("Medical Director", &["md"]),
        ];
        assert!(RoleTaxonomy::new(defs, 4).is_ok());
    }

    #[test]
    fn merge_replaces_and_appends() {
        let merged = merge_definitions(
            builtin_definitions(),
            vec![
                RoleDefinition::new("Head", &["head of", "lead"]),
                RoleDefinition::new("Chief of Staff", &["chief of staff"]),
            ],
        );
        assert_eq!(merged.len(), 16);
        let head = merged.iter().find(|d| d.label == "Head").unwrap();
        assert_eq!(head.synonyms, vec!["head of", "lead"]);
        assert_eq!(merged.last().unwrap().label, "Chief of Staff");
        // replaced roles keep their position
        assert_eq!(merged[13].label, "Head");
    }

    #[test]
    fn priority_list_validation() {
        let tax = RoleTaxonomy::builtin().unwrap();
        assert_eq!(
            RolePriorityList::new(Vec::<String>::new(), &tax).unwrap_err(),
            RankError::NoRoles
        );
        assert_eq!(
            RolePriorityList::new(["CEO", "Janitor"], &tax).unwrap_err(),
            RankError::UnknownRole("Janitor".into())
        );
        assert_eq!(
            RolePriorityList::new(["CEO", "CFO", "CEO"], &tax).unwrap_err(),
            RankError::DuplicateRole("CEO".into())
        );
        let list = RolePriorityList::new(["CFO", "CEO"], &tax).unwrap();
        assert_eq!(list.labels(), &["CFO".to_string(), "CEO".to_string()]);
    }

    #[test]
    fn search_terms_follow_priority_order() {
        let tax = RoleTaxonomy::builtin().unwrap();
        let list = RolePriorityList::new(["Partner", "Owner"], &tax).unwrap();
        assert_eq!(
            tax.search_terms(&list),
            vec![
                "partner",
                "general partner",
                "owner",
                "co-owner",
                "proprietor",
                "sole proprietor"
            ]
        );
    }
}
