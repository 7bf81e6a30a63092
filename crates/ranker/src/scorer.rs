use crate::model::Rank;
use crate::taxonomy::{Role, RolePriorityList, RoleTaxonomy};

/// Ranks job titles against a priority list.
///
/// Roles are checked in priority order and the first role with any matching
/// synonym wins, even if a lower-priority role would also match.
#[derive(Debug, Clone)]
pub struct TitleScorer<'a> {
    roles: Vec<&'a Role>,
}

impl<'a> TitleScorer<'a> {
    pub fn new(taxonomy: &'a RoleTaxonomy, priority: &RolePriorityList) -> Self {
        let roles = priority
            .labels()
            .iter()
            .filter_map(|label| taxonomy.get(label))
            .collect();
        Self { roles }
    }

    pub fn score(&self, title: Option<&str>) -> Rank {
        let title = match title {
            Some(t) if !t.trim().is_empty() => t.to_lowercase(),
            _ => return Rank::Unranked,
        };

        for (index, role) in self.roles.iter().enumerate() {
            if let Some(syn) = role.synonyms().iter().find(|s| s.matches(&title)) {
                log::debug!(
                    "title {:?} matched role {:?} via {:?} (rank {})",
                    title,
                    role.label(),
                    syn.as_str(),
                    index
                );
                return Rank::Ranked(index);
            }
        }
        Rank::Unranked
    }
}

/// One-shot scoring without keeping a scorer around.
pub fn score(title: Option<&str>, taxonomy: &RoleTaxonomy, priority: &RolePriorityList) -> Rank {
    TitleScorer::new(taxonomy, priority).score(title)
}
