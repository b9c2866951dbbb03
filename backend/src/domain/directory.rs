//! Pure directory filtering over the in-memory association set.
//!
//! Filtering is recomputed from the full set on every request: a
//! case-insensitive substring match of the free-text query against name OR
//! description, ANDed with an exact category match. The working set is
//! small, so the O(n) scan needs no index or debouncing.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::association::{Association, AssociationCategory};

/// Category predicate for directory browsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    /// Sentinel matching every category.
    #[default]
    All,
    /// Exact category match.
    Only(AssociationCategory),
}

impl CategoryFilter {
    /// Whether the given association satisfies this category predicate.
    #[must_use]
    pub fn matches(self, association: &Association) -> bool {
        match self {
            Self::All => true,
            Self::Only(category) => association.category() == category,
        }
    }
}

/// Combined free-text and category filter.
///
/// Both predicates are ANDed. An empty query matches everything.
#[derive(Debug, Clone, Default)]
pub struct DirectoryFilter {
    /// Free-text query matched against name or description.
    pub query: String,
    /// Category predicate.
    pub category: CategoryFilter,
}

impl DirectoryFilter {
    /// Whether the association matches both predicates.
    #[must_use]
    pub fn matches(&self, association: &Association) -> bool {
        self.matches_text(association) && self.category.matches(association)
    }

    fn matches_text(&self, association: &Association) -> bool {
        let needle = self.query.trim().to_lowercase();
        if needle.is_empty() {
            return true;
        }
        association.name().to_lowercase().contains(&needle)
            || association.description().to_lowercase().contains(&needle)
    }
}

/// Distinguishes the two empty outcomes of a directory browse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum EmptyState {
    /// No associations exist at all.
    NoAssociations,
    /// Associations exist but none match the current filter.
    NoMatches,
}

impl EmptyState {
    /// Derive the empty state from total and matched counts, if any.
    #[must_use]
    pub fn derive(total: usize, matched: usize) -> Option<Self> {
        if total == 0 {
            Some(Self::NoAssociations)
        } else if matched == 0 {
            Some(Self::NoMatches)
        } else {
            None
        }
    }
}

/// Result of a directory browse: the filtered associations plus enough
/// context to render the correct empty-state message.
#[derive(Debug, Clone)]
pub struct DirectoryView {
    /// Total number of associations before filtering.
    pub total: usize,
    /// Associations matching the filter, in creation-time descending order.
    pub associations: Vec<Association>,
    /// Set when the filtered list is empty.
    pub empty_state: Option<EmptyState>,
}

/// Apply the filter to the full association set.
///
/// Pure and idempotent: re-applying the same filter to its own output is a
/// no-op. Input order is preserved.
#[must_use]
pub fn filter_associations(
    associations: &[Association],
    filter: &DirectoryFilter,
) -> Vec<Association> {
    associations
        .iter()
        .filter(|association| filter.matches(association))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::association::AssociationDraft;
    use chrono::Utc;
    use rstest::rstest;

    fn association(name: &str, description: &str, category: AssociationCategory) -> Association {
        Association::new(AssociationDraft {
            id: format!("assoc-{name}"),
            name: name.to_owned(),
            description: description.to_owned(),
            category,
            member_count: 5,
            members: vec!["u1".to_owned()],
            banner_image: None,
            logo_image: None,
            created_at: Utc::now(),
            updated_at: None,
        })
        .expect("valid association")
    }

    fn sample_set() -> Vec<Association> {
        vec![
            association("Chess Club", "Weekly blitz nights", AssociationCategory::Social),
            association("Debate Society", "Argue better", AssociationCategory::Academic),
            association("Trail Runners", "Sunday chess-free runs", AssociationCategory::Sports),
        ]
    }

    #[rstest]
    #[case("chess", CategoryFilter::All, 2)]
    #[case("CHESS", CategoryFilter::All, 2)]
    #[case("chess", CategoryFilter::Only(AssociationCategory::Social), 1)]
    #[case("", CategoryFilter::Only(AssociationCategory::Academic), 1)]
    #[case("", CategoryFilter::All, 3)]
    #[case("robotics", CategoryFilter::All, 0)]
    fn filtering_is_the_conjunction_of_both_predicates(
        #[case] query: &str,
        #[case] category: CategoryFilter,
        #[case] expected: usize,
    ) {
        let filter = DirectoryFilter {
            query: query.to_owned(),
            category,
        };
        assert_eq!(filter_associations(&sample_set(), &filter).len(), expected);
    }

    #[rstest]
    fn filtering_matches_description_as_well_as_name() {
        let filter = DirectoryFilter {
            query: "blitz".to_owned(),
            category: CategoryFilter::All,
        };
        let matched = filter_associations(&sample_set(), &filter);
        assert_eq!(matched.len(), 1);
        assert_eq!(matched.first().map(Association::name), Some("Chess Club"));
    }

    #[rstest]
    fn filtering_is_idempotent() {
        let filter = DirectoryFilter {
            query: "chess".to_owned(),
            category: CategoryFilter::All,
        };
        let once = filter_associations(&sample_set(), &filter);
        let twice = filter_associations(&once, &filter);
        assert_eq!(once, twice);
    }

    #[rstest]
    #[case(0, 0, Some(EmptyState::NoAssociations))]
    #[case(3, 0, Some(EmptyState::NoMatches))]
    #[case(3, 2, None)]
    fn empty_state_distinguishes_no_data_from_no_matches(
        #[case] total: usize,
        #[case] matched: usize,
        #[case] expected: Option<EmptyState>,
    ) {
        assert_eq!(EmptyState::derive(total, matched), expected);
    }

    #[rstest]
    fn chess_club_scenario_matches_and_misses() {
        let set = vec![association("Chess Club", "", AssociationCategory::Social)];

        let hit = DirectoryFilter {
            query: "chess".to_owned(),
            category: CategoryFilter::All,
        };
        assert_eq!(filter_associations(&set, &hit).len(), 1);

        let miss = DirectoryFilter {
            query: "robotics".to_owned(),
            category: CategoryFilter::All,
        };
        let matched = filter_associations(&set, &miss);
        assert!(matched.is_empty());
        assert_eq!(
            EmptyState::derive(set.len(), matched.len()),
            Some(EmptyState::NoMatches)
        );
    }
}
