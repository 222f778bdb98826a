//! Faceted narrowing of the idea list.
//!
//! Criteria are applied in the caller's order as a conjunction, so the
//! resulting set does not depend on that order; only the order of
//! [`IdeaFilter::selected`] does. Selectable values are always taken from the
//! unfiltered collection so that a user can broaden one facet after narrowing
//! another.

use serde::{Deserialize, Serialize};

use crate::domain::idea::Idea;
use crate::domain::types::{CategoryId, Rating, UserId};

/// Criteria an idea list can be narrowed by.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum FacetKind {
    Author,
    Category,
    Rating,
}

impl FacetKind {
    /// Order used by the idea list when the caller does not supply one.
    pub const DEFAULT_ORDER: [FacetKind; 3] = [Self::Author, Self::Category, Self::Rating];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Author => "author",
            Self::Category => "category",
            Self::Rating => "rating",
        }
    }
}

/// One applied criterion.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(tag = "facet", content = "value", rename_all = "snake_case")]
pub enum FacetCriterion {
    Author(UserId),
    /// Membership: the idea is linked to this category.
    Category(CategoryId),
    Rating(Rating),
}

impl FacetCriterion {
    pub fn kind(&self) -> FacetKind {
        match self {
            Self::Author(_) => FacetKind::Author,
            Self::Category(_) => FacetKind::Category,
            Self::Rating(_) => FacetKind::Rating,
        }
    }

    pub fn matches(&self, idea: &Idea) -> bool {
        match self {
            Self::Author(author_id) => idea.author_id == Some(*author_id),
            Self::Category(category_id) => idea.category_ids.contains(category_id),
            Self::Rating(rating) => idea.rating == Some(*rating),
        }
    }
}

/// A criterion as reported back to the presentation layer.
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
#[serde(tag = "facet", rename_all = "snake_case")]
pub enum SelectedFacet {
    Author { id: UserId },
    Category { id: CategoryId },
    Rating { value: Rating, label: &'static str },
}

impl From<FacetCriterion> for SelectedFacet {
    fn from(criterion: FacetCriterion) -> Self {
        match criterion {
            FacetCriterion::Author(id) => Self::Author { id },
            FacetCriterion::Category(id) => Self::Category { id },
            FacetCriterion::Rating(value) => Self::Rating {
                value,
                label: value.label(),
            },
        }
    }
}

/// Cleaned, optional filter values keyed by facet.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FacetValues {
    pub author: Option<UserId>,
    pub category: Option<CategoryId>,
    pub rating: Option<Rating>,
}

impl FacetValues {
    fn criterion(&self, kind: FacetKind) -> Option<FacetCriterion> {
        match kind {
            FacetKind::Author => self.author.map(FacetCriterion::Author),
            FacetKind::Category => self.category.map(FacetCriterion::Category),
            FacetKind::Rating => self.rating.map(FacetCriterion::Rating),
        }
    }
}

/// Ordered list of applied criteria, at most one per facet.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct IdeaFilter {
    criteria: Vec<FacetCriterion>,
}

impl IdeaFilter {
    /// Keeps the criteria present in `values`, in `order`. Facets repeated in
    /// `order` are applied once.
    pub fn from_order(order: &[FacetKind], values: FacetValues) -> Self {
        let mut criteria: Vec<FacetCriterion> = Vec::new();
        for kind in order {
            if criteria.iter().any(|c| c.kind() == *kind) {
                continue;
            }
            if let Some(criterion) = values.criterion(*kind) {
                criteria.push(criterion);
            }
        }
        Self { criteria }
    }

    pub fn criteria(&self) -> &[FacetCriterion] {
        &self.criteria
    }

    pub fn is_empty(&self) -> bool {
        self.criteria.is_empty()
    }

    pub fn matches(&self, idea: &Idea) -> bool {
        self.criteria.iter().all(|criterion| criterion.matches(idea))
    }

    /// Applied values in application order.
    pub fn selected(&self) -> Vec<SelectedFacet> {
        self.criteria.iter().copied().map(SelectedFacet::from).collect()
    }
}

/// Distinct values present in the unfiltered collection, ascending.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FacetOptions {
    pub authors: Vec<UserId>,
    pub categories: Vec<CategoryId>,
    pub ratings: Vec<Rating>,
}

impl FacetOptions {
    /// Collects the options from an in-memory collection.
    pub fn collect<'a>(ideas: impl IntoIterator<Item = &'a Idea>) -> Self {
        let mut options = Self::default();
        for idea in ideas {
            options.authors.extend(idea.author_id);
            options.categories.extend(idea.category_ids.iter().copied());
            options.ratings.extend(idea.rating);
        }
        options.authors.sort();
        options.authors.dedup();
        options.categories.sort();
        options.categories.dedup();
        options.ratings.sort();
        options.ratings.dedup();
        options
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::domain::types::{IdeaContent, IdeaId, IdeaTitle};
    use chrono::DateTime;

    pub(crate) fn sample_idea(id: i32, author: i32, categories: &[i32], rating: i32) -> Idea {
        Idea {
            id: IdeaId::new(id).unwrap(),
            author_id: Some(UserId::new(author).unwrap()),
            title: IdeaTitle::new(format!("Idea {id}")).unwrap(),
            content: IdeaContent::new("Content").unwrap(),
            rating: Some(Rating::new(rating).unwrap()),
            category_ids: categories
                .iter()
                .map(|c| CategoryId::new(*c).unwrap())
                .collect(),
            created_at: DateTime::from_timestamp(i64::from(id), 0)
                .unwrap()
                .naive_utc(),
            updated_at: DateTime::from_timestamp(i64::from(id), 0)
                .unwrap()
                .naive_utc(),
        }
    }

    fn scenario() -> Vec<Idea> {
        vec![
            sample_idea(1, 1, &[1], 3),
            sample_idea(2, 1, &[2], 5),
            sample_idea(3, 2, &[1], 3),
        ]
    }

    #[test]
    fn category_filter_keeps_members_and_reports_selection() {
        let ideas = scenario();
        let filter = IdeaFilter::from_order(
            &FacetKind::DEFAULT_ORDER,
            FacetValues {
                category: Some(CategoryId::new(1).unwrap()),
                ..Default::default()
            },
        );

        let ids: Vec<i32> = ideas
            .iter()
            .filter(|idea| filter.matches(idea))
            .map(|idea| idea.id.get())
            .collect();
        assert_eq!(ids, vec![1, 3]);
        assert_eq!(
            filter.selected(),
            vec![SelectedFacet::Category {
                id: CategoryId::new(1).unwrap()
            }]
        );

        let options = FacetOptions::collect(&ideas);
        assert_eq!(
            options.authors,
            vec![UserId::new(1).unwrap(), UserId::new(2).unwrap()]
        );
        assert_eq!(
            options.ratings,
            vec![Rating::new(3).unwrap(), Rating::new(5).unwrap()]
        );
    }

    #[test]
    fn selected_order_follows_requested_order() {
        let values = FacetValues {
            author: Some(UserId::new(1).unwrap()),
            category: None,
            rating: Some(Rating::new(3).unwrap()),
        };
        let filter = IdeaFilter::from_order(&[FacetKind::Rating, FacetKind::Author], values);
        assert_eq!(
            filter.selected(),
            vec![
                SelectedFacet::Rating {
                    value: Rating::new(3).unwrap(),
                    label: "★★★☆☆"
                },
                SelectedFacet::Author {
                    id: UserId::new(1).unwrap()
                },
            ]
        );
    }

    #[test]
    fn result_does_not_depend_on_order() {
        let ideas = scenario();
        let values = FacetValues {
            author: Some(UserId::new(1).unwrap()),
            category: Some(CategoryId::new(1).unwrap()),
            rating: Some(Rating::new(3).unwrap()),
        };
        let forward = IdeaFilter::from_order(&FacetKind::DEFAULT_ORDER, values);
        let backward = IdeaFilter::from_order(
            &[FacetKind::Rating, FacetKind::Category, FacetKind::Author],
            values,
        );
        let pick = |filter: &IdeaFilter| -> Vec<i32> {
            ideas
                .iter()
                .filter(|idea| filter.matches(idea))
                .map(|idea| idea.id.get())
                .collect()
        };
        assert_eq!(pick(&forward), vec![1]);
        assert_eq!(pick(&forward), pick(&backward));
    }

    #[test]
    fn empty_values_apply_no_criteria() {
        let filter = IdeaFilter::from_order(&FacetKind::DEFAULT_ORDER, FacetValues::default());
        assert!(filter.is_empty());
        assert!(filter.selected().is_empty());
    }
}
