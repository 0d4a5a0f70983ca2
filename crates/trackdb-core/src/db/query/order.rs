//! Module: query::order
//! Responsibility: sort requests, the closed set of sortable issue fields,
//! and the row comparator every store shares.

use crate::{
    model::issue::fields,
    traits::FieldValues,
    value::{Value, canonical_cmp},
};
use serde::{Deserialize, Serialize};
use std::{cmp::Ordering, fmt, str::FromStr};
use thiserror::Error as ThisError;

///
/// OrderDirection
///

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderDirection {
    #[default]
    Asc,
    Desc,
}

impl OrderDirection {
    /// Apply this direction to an ascending ordering.
    #[must_use]
    pub const fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Self::Asc => ordering,
            Self::Desc => ordering.reverse(),
        }
    }
}

///
/// SortSpec
///
/// A single caller-supplied `(field, direction)` pair. The field name is
/// unchecked until planning resolves it to a `SortField`.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(deny_unknown_fields)]
pub struct SortSpec {
    pub field: String,
    pub direction: OrderDirection,
}

impl SortSpec {
    #[must_use]
    pub fn new(field: impl Into<String>, direction: OrderDirection) -> Self {
        Self {
            field: field.into(),
            direction,
        }
    }

    #[must_use]
    pub fn asc(field: impl Into<String>) -> Self {
        Self::new(field, OrderDirection::Asc)
    }

    #[must_use]
    pub fn desc(field: impl Into<String>) -> Self {
        Self::new(field, OrderDirection::Desc)
    }
}

impl Default for SortSpec {
    /// Newest issues first.
    fn default() -> Self {
        Self::desc(SortField::CreatedAt.wire_name())
    }
}

///
/// UnknownSortField
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
#[error("unknown sort field '{field}'")]
pub struct UnknownSortField {
    pub field: String,
}

///
/// SortField
///
/// Closed set of issue attributes a caller may sort by. Accepts the
/// camelCase wire name and the snake_case field name.
///

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum SortField {
    CreatedAt,
    UpdatedAt,
    Title,
    Identifier,
    Status,
    Priority,
    DueDate,
    Estimate,
    SortOrder,
}

impl SortField {
    pub const ALL: [Self; 9] = [
        Self::CreatedAt,
        Self::UpdatedAt,
        Self::Title,
        Self::Identifier,
        Self::Status,
        Self::Priority,
        Self::DueDate,
        Self::Estimate,
        Self::SortOrder,
    ];

    /// Name of the entity field this sort reads.
    #[must_use]
    pub const fn field_name(self) -> &'static str {
        match self {
            Self::CreatedAt => fields::CREATED_AT,
            Self::UpdatedAt => fields::UPDATED_AT,
            Self::Title => fields::TITLE,
            Self::Identifier => fields::IDENTIFIER,
            Self::Status => fields::STATUS,
            Self::Priority => fields::PRIORITY,
            Self::DueDate => fields::DUE_DATE,
            Self::Estimate => fields::ESTIMATE,
            Self::SortOrder => fields::SORT_ORDER,
        }
    }

    /// Name used on the request boundary.
    #[must_use]
    pub const fn wire_name(self) -> &'static str {
        match self {
            Self::CreatedAt => "createdAt",
            Self::UpdatedAt => "updatedAt",
            Self::Title => "title",
            Self::Identifier => "identifier",
            Self::Status => "status",
            Self::Priority => "priority",
            Self::DueDate => "dueDate",
            Self::Estimate => "estimate",
            Self::SortOrder => "sortOrder",
        }
    }
}

impl fmt::Display for SortField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_name())
    }
}

impl FromStr for SortField {
    type Err = UnknownSortField;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|field| field.wire_name() == s || field.field_name() == s)
            .ok_or_else(|| UnknownSortField {
                field: s.to_string(),
            })
    }
}

///
/// OrderSpec
///
/// Resolved ordering handed to stores: the requested key first, then
/// tie-break keys. Every key names an entity field.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct OrderSpec {
    pub fields: Vec<(String, OrderDirection)>,
}

impl OrderSpec {
    /// Order by `field`, breaking ties by creation time and then primary key,
    /// both ascending. Tie-break keys already covered by `field` are skipped.
    #[must_use]
    pub fn with_tie_breaks(field: SortField, direction: OrderDirection) -> Self {
        let mut fields = vec![(field.field_name().to_string(), direction)];

        for tie_break in [fields::CREATED_AT, fields::ID] {
            if fields.iter().all(|(name, _)| name != tie_break) {
                fields.push((tie_break.to_string(), OrderDirection::Asc));
            }
        }

        Self { fields }
    }

    /// Compare two rows under this ordering. A field a row does not expose
    /// compares as `Null`.
    #[must_use]
    pub fn compare<R: FieldValues + ?Sized>(&self, left: &R, right: &R) -> Ordering {
        for (field, direction) in &self.fields {
            let a = left.get_value(field).unwrap_or(Value::Null);
            let b = right.get_value(field).unwrap_or(Value::Null);

            let ordering = direction.apply(canonical_cmp(&a, &b));
            if ordering != Ordering::Equal {
                return ordering;
            }
        }

        Ordering::Equal
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        model::issue::{IssuePriority, IssueStatus},
        test_support::IssueFixture,
    };

    #[test]
    fn sort_field_accepts_wire_and_field_names() {
        assert_eq!("createdAt".parse(), Ok(SortField::CreatedAt));
        assert_eq!("created_at".parse(), Ok(SortField::CreatedAt));
        assert_eq!("sortOrder".parse(), Ok(SortField::SortOrder));
        assert_eq!(
            "colour".parse::<SortField>(),
            Err(UnknownSortField {
                field: "colour".to_string(),
            })
        );
    }

    #[test]
    fn unknown_sort_field_names_the_field() {
        let err = "colour".parse::<SortField>().expect_err("unknown field");

        assert_eq!(err.to_string(), "unknown sort field 'colour'");
    }

    #[test]
    fn tie_breaks_skip_duplicates() {
        let order = OrderSpec::with_tie_breaks(SortField::CreatedAt, OrderDirection::Desc);

        assert_eq!(
            order.fields,
            vec![
                ("created_at".to_string(), OrderDirection::Desc),
                ("id".to_string(), OrderDirection::Asc),
            ]
        );
    }

    #[test]
    fn priority_sorts_by_urgency_then_creation() {
        let mut issues = vec![
            IssueFixture::new(1, "a").priority(IssuePriority::Low).build(),
            IssueFixture::new(2, "b").priority(IssuePriority::Urgent).build(),
            IssueFixture::new(3, "c").priority(IssuePriority::Low).build(),
            IssueFixture::new(4, "d").priority(IssuePriority::None).build(),
        ];
        let order = OrderSpec::with_tie_breaks(SortField::Priority, OrderDirection::Desc);
        issues.sort_by(|a, b| order.compare(a, b));

        let numbers: Vec<_> = issues.iter().map(|i| i.identifier.as_str()).collect();
        assert_eq!(numbers, vec!["ENG-2", "ENG-1", "ENG-3", "ENG-4"]);
    }

    #[test]
    fn status_sorts_in_workflow_order() {
        let mut issues = vec![
            IssueFixture::new(1, "a").status(IssueStatus::Done).build(),
            IssueFixture::new(2, "b").status(IssueStatus::Backlog).build(),
            IssueFixture::new(3, "c").status(IssueStatus::InProgress).build(),
        ];
        let order = OrderSpec::with_tie_breaks(SortField::Status, OrderDirection::Asc);
        issues.sort_by(|a, b| order.compare(a, b));

        let statuses: Vec<_> = issues.iter().map(|i| i.status).collect();
        assert_eq!(
            statuses,
            vec![IssueStatus::Backlog, IssueStatus::InProgress, IssueStatus::Done]
        );
    }

    #[test]
    fn missing_due_dates_sort_last_ascending_and_first_descending() {
        let issues = vec![
            IssueFixture::new(1, "a").build(),
            IssueFixture::new(2, "b").due(50).build(),
            IssueFixture::new(3, "c").due(10).build(),
        ];

        let mut asc = issues.clone();
        let order = OrderSpec::with_tie_breaks(SortField::DueDate, OrderDirection::Asc);
        asc.sort_by(|a, b| order.compare(a, b));
        let asc_ids: Vec<_> = asc.iter().map(|i| i.identifier.as_str()).collect();
        assert_eq!(asc_ids, vec!["ENG-3", "ENG-2", "ENG-1"]);

        let mut desc = issues;
        let order = OrderSpec::with_tie_breaks(SortField::DueDate, OrderDirection::Desc);
        desc.sort_by(|a, b| order.compare(a, b));
        let desc_ids: Vec<_> = desc.iter().map(|i| i.identifier.as_str()).collect();
        assert_eq!(desc_ids, vec!["ENG-1", "ENG-2", "ENG-3"]);
    }

    #[test]
    fn fractional_ranks_sort_between_whole_ones() {
        let mut issues = vec![
            IssueFixture::new(1, "a").rank(2.0).build(),
            IssueFixture::new(2, "b").rank(1.0).build(),
            IssueFixture::new(3, "dropped between").rank(1.5).build(),
        ];
        let order = OrderSpec::with_tie_breaks(SortField::SortOrder, OrderDirection::Asc);
        issues.sort_by(|a, b| order.compare(a, b));

        let titles: Vec<_> = issues.iter().map(|i| i.title.as_str()).collect();
        assert_eq!(titles, vec!["b", "dropped between", "a"]);
    }

    #[test]
    fn equal_keys_fall_back_to_creation_then_id() {
        let issues = vec![
            IssueFixture::new(3, "same").created_at(5).estimate(2).build(),
            IssueFixture::new(1, "same").created_at(9).estimate(2).build(),
            IssueFixture::new(2, "same").created_at(5).estimate(2).build(),
        ];
        let order = OrderSpec::with_tie_breaks(SortField::Estimate, OrderDirection::Desc);

        let mut sorted = issues;
        sorted.sort_by(|a, b| order.compare(a, b));
        let order_ids: Vec<_> = sorted.iter().map(|i| i.identifier.as_str()).collect();

        assert_eq!(order_ids, vec!["ENG-2", "ENG-3", "ENG-1"]);
    }

    #[test]
    fn sort_spec_wire_shape() {
        let spec: SortSpec =
            serde_json::from_str(r#"{"field":"createdAt","direction":"desc"}"#).expect("valid");

        assert_eq!(spec, SortSpec::default());
        assert!(serde_json::from_str::<SortSpec>(r#"{"field":"title","direction":"up"}"#).is_err());
    }
}
