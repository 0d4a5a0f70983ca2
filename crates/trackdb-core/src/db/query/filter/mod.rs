//! Module: query::filter
//! Responsibility: declarative issue filters and their compilation into a
//! predicate tree.
//! Does not own: predicate evaluation or store access.


use crate::{
    db::query::predicate::{Predicate, normalize},
    model::issue::{IssuePriority, IssueStatus, fields},
    traits::FieldValue,
    types::{CycleId, LabelId, ProjectId, UserId},
    value::Value,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

///
/// FilterAxis
///
/// One independent dimension of filtering. Every axis is handled
/// exhaustively when a filter is compiled; adding an axis means adding a
/// variant here.
///

#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum FilterAxis {
    Status,
    Priority,
    Assignee,
    Creator,
    Label,
    Project,
    Cycle,
    Archived,
    Search,
}

impl FilterAxis {
    pub const ALL: [Self; 9] = [
        Self::Status,
        Self::Priority,
        Self::Assignee,
        Self::Creator,
        Self::Label,
        Self::Project,
        Self::Cycle,
        Self::Archived,
        Self::Search,
    ];
}

///
/// FilterSpec
///
/// Optional constraints over the issue collection. `None` means the axis
/// is unconstrained. `Some` of an empty set is kept distinct on the wire
/// but constrains nothing, the same as `None`.
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default, deny_unknown_fields, rename_all = "camelCase")]
pub struct FilterSpec {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<BTreeSet<IssueStatus>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<BTreeSet<IssuePriority>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub assignee_ids: Option<BTreeSet<UserId>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub creator_ids: Option<BTreeSet<UserId>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub label_ids: Option<BTreeSet<LabelId>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_ids: Option<BTreeSet<ProjectId>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub cycle_ids: Option<BTreeSet<CycleId>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub archived: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
}

impl FilterSpec {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    //
    // Fluent setters
    //

    #[must_use]
    pub fn status(mut self, values: impl IntoIterator<Item = IssueStatus>) -> Self {
        self.status = Some(values.into_iter().collect());
        self
    }

    #[must_use]
    pub fn priority(mut self, values: impl IntoIterator<Item = IssuePriority>) -> Self {
        self.priority = Some(values.into_iter().collect());
        self
    }

    #[must_use]
    pub fn assignees(mut self, ids: impl IntoIterator<Item = UserId>) -> Self {
        self.assignee_ids = Some(ids.into_iter().collect());
        self
    }

    #[must_use]
    pub fn creators(mut self, ids: impl IntoIterator<Item = UserId>) -> Self {
        self.creator_ids = Some(ids.into_iter().collect());
        self
    }

    #[must_use]
    pub fn labels(mut self, ids: impl IntoIterator<Item = LabelId>) -> Self {
        self.label_ids = Some(ids.into_iter().collect());
        self
    }

    #[must_use]
    pub fn projects(mut self, ids: impl IntoIterator<Item = ProjectId>) -> Self {
        self.project_ids = Some(ids.into_iter().collect());
        self
    }

    #[must_use]
    pub fn cycles(mut self, ids: impl IntoIterator<Item = CycleId>) -> Self {
        self.cycle_ids = Some(ids.into_iter().collect());
        self
    }

    #[must_use]
    pub const fn archived(mut self, archived: bool) -> Self {
        self.archived = Some(archived);
        self
    }

    #[must_use]
    pub fn search(mut self, text: impl Into<String>) -> Self {
        self.search = Some(text.into());
        self
    }

    //
    // Compilation
    //

    /// Axes that will contribute a predicate.
    #[must_use]
    pub fn active_axes(&self) -> Vec<FilterAxis> {
        FilterAxis::ALL
            .into_iter()
            .filter(|axis| self.axis_predicate(*axis).is_some())
            .collect()
    }

    /// Atomic predicate for one axis, or `None` when the axis is unset.
    #[must_use]
    pub fn axis_predicate(&self, axis: FilterAxis) -> Option<Predicate> {
        match axis {
            FilterAxis::Status => membership(fields::STATUS, self.status.as_ref()),
            FilterAxis::Priority => membership(fields::PRIORITY, self.priority.as_ref()),
            FilterAxis::Assignee => membership(fields::ASSIGNEE_ID, self.assignee_ids.as_ref()),
            FilterAxis::Creator => membership(fields::CREATOR_ID, self.creator_ids.as_ref()),
            FilterAxis::Label => self
                .label_ids
                .as_ref()
                .filter(|set| !set.is_empty())
                .map(|set| Predicate::any_in(fields::LABEL_IDS, literals(set))),
            FilterAxis::Project => membership(fields::PROJECT_ID, self.project_ids.as_ref()),
            FilterAxis::Cycle => membership(fields::CYCLE_ID, self.cycle_ids.as_ref()),
            FilterAxis::Archived => self
                .archived
                .map(|archived| Predicate::eq(fields::ARCHIVED, Value::Bool(archived))),
            FilterAxis::Search => self
                .search
                .as_deref()
                .filter(|text| !text.trim().is_empty())
                .map(|text| {
                    Predicate::or(vec![
                        Predicate::text_contains_ci(fields::TITLE, text),
                        Predicate::text_contains_ci(fields::IDENTIFIER, text),
                    ])
                }),
        }
    }

    /// Compose every active axis with AND into one normalized predicate.
    /// With no active axis the result is `Predicate::True`.
    #[must_use]
    pub fn to_predicate(&self) -> Predicate {
        let atoms = FilterAxis::ALL
            .into_iter()
            .filter_map(|axis| self.axis_predicate(axis))
            .collect();

        normalize(&Predicate::And(atoms))
    }
}

fn membership<T: FieldValue>(field: &str, set: Option<&BTreeSet<T>>) -> Option<Predicate> {
    set.filter(|set| !set.is_empty())
        .map(|set| Predicate::in_(field, literals(set)))
}

fn literals<T: FieldValue>(set: &BTreeSet<T>) -> Vec<Value> {
    set.iter().map(FieldValue::to_value).collect()
}
