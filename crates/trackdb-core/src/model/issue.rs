use crate::{
    traits::{EntityKind, FieldValue, FieldValues, Path},
    types::{CycleId, Float64, IssueId, LabelId, ProjectId, TeamId, Timestamp, UserId},
    value::{Value, ValueEnum},
};
use serde::{Deserialize, Serialize};
use std::{collections::BTreeSet, fmt, str::FromStr};
use thiserror::Error as ThisError;

///
/// Field names
///
/// Stable names under which `Issue` exposes its fields to predicates
/// and orderings.
///

pub mod fields {
    pub const ID: &str = "id";
    pub const TEAM_ID: &str = "team_id";
    pub const PROJECT_ID: &str = "project_id";
    pub const CYCLE_ID: &str = "cycle_id";
    pub const IDENTIFIER: &str = "identifier";
    pub const TITLE: &str = "title";
    pub const DESCRIPTION: &str = "description";
    pub const STATUS: &str = "status";
    pub const PRIORITY: &str = "priority";
    pub const ASSIGNEE_ID: &str = "assignee_id";
    pub const CREATOR_ID: &str = "creator_id";
    pub const PARENT_ID: &str = "parent_id";
    pub const LABEL_IDS: &str = "label_ids";
    pub const DUE_DATE: &str = "due_date";
    pub const ESTIMATE: &str = "estimate";
    pub const SORT_ORDER: &str = "sort_order";
    pub const ARCHIVED: &str = "archived";
    pub const CREATED_AT: &str = "created_at";
    pub const UPDATED_AT: &str = "updated_at";
}

///
/// UnknownVariant
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
#[error("unknown {kind} '{value}'")]
pub struct UnknownVariant {
    pub kind: &'static str,
    pub value: String,
}

///
/// closed_enum
///
/// Declares a wire-labelled enum whose variants lower to `Value::Enum`
/// carrying their declaration rank.
///

macro_rules! closed_enum {
    (
        $(#[$meta:meta])*
        $name:ident, $kind:literal {
            $( $(#[$vmeta:meta])* $variant:ident => $label:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(
            Clone, Copy, Debug, Default, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd,
            Serialize,
        )]
        #[serde(rename_all = "snake_case")]
        pub enum $name {
            $( $(#[$vmeta])* $variant ),+
        }

        impl $name {
            pub const ALL: &'static [Self] = &[$(Self::$variant),+];

            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $label),+
                }
            }

            /// Declaration position, used for workflow ordering.
            #[must_use]
            pub const fn rank(self) -> u32 {
                self as u32
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = UnknownVariant;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($label => Ok(Self::$variant),)+
                    _ => Err(UnknownVariant {
                        kind: $kind,
                        value: s.to_string(),
                    }),
                }
            }
        }

        impl FieldValue for $name {
            fn to_value(&self) -> Value {
                Value::Enum(ValueEnum::new(self.as_str(), self.rank()))
            }
        }
    };
}

closed_enum!(
    /// Workflow state of an issue.
    IssueStatus, "status" {
        #[default]
        Backlog => "backlog",
        Todo => "todo",
        InProgress => "in_progress",
        Done => "done",
        Cancelled => "cancelled",
    }
);

closed_enum!(
    /// Urgency of an issue, lowest first.
    IssuePriority, "priority" {
        #[default]
        None => "none",
        Low => "low",
        Medium => "medium",
        High => "high",
        Urgent => "urgent",
    }
);

///
/// Issue
///
/// The tracked item. Labels are flattened from the issue/label join so a
/// single row carries everything a filter can ask about.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Issue {
    pub id: IssueId,
    pub team_id: TeamId,
    pub project_id: Option<ProjectId>,
    pub cycle_id: Option<CycleId>,
    pub identifier: String,
    pub title: String,
    pub description: Option<String>,
    pub status: IssueStatus,
    pub priority: IssuePriority,
    pub assignee_id: Option<UserId>,
    pub creator_id: UserId,
    pub parent_id: Option<IssueId>,
    pub label_ids: BTreeSet<LabelId>,
    pub due_date: Option<Timestamp>,
    pub estimate: Option<u32>,
    /// Manual board rank. Fractional so a drop between two rows can take
    /// the midpoint.
    pub sort_order: Float64,
    pub archived: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Issue {
    /// Build an issue with schema defaults: backlog, no priority, unassigned,
    /// unarchived, and `updated_at == created_at`.
    #[must_use]
    pub fn new(
        id: IssueId,
        team_id: TeamId,
        identifier: impl Into<String>,
        title: impl Into<String>,
        creator_id: UserId,
        created_at: Timestamp,
    ) -> Self {
        Self {
            id,
            team_id,
            project_id: None,
            cycle_id: None,
            identifier: identifier.into(),
            title: title.into(),
            description: None,
            status: IssueStatus::default(),
            priority: IssuePriority::default(),
            assignee_id: None,
            creator_id,
            parent_id: None,
            label_ids: BTreeSet::new(),
            due_date: None,
            estimate: None,
            sort_order: Float64::default(),
            archived: false,
            created_at,
            updated_at: created_at,
        }
    }
}

impl Path for Issue {
    const PATH: &'static str = "trackdb::issue";
}

impl EntityKind for Issue {
    type Key = IssueId;

    const PRIMARY_KEY: &'static str = fields::ID;

    fn key(&self) -> Self::Key {
        self.id
    }
}

impl FieldValues for Issue {
    fn get_value(&self, field: &str) -> Option<Value> {
        let value = match field {
            fields::ID => self.id.to_value(),
            fields::TEAM_ID => self.team_id.to_value(),
            fields::PROJECT_ID => self.project_id.to_value(),
            fields::CYCLE_ID => self.cycle_id.to_value(),
            fields::IDENTIFIER => self.identifier.to_value(),
            fields::TITLE => self.title.to_value(),
            fields::DESCRIPTION => self.description.to_value(),
            fields::STATUS => self.status.to_value(),
            fields::PRIORITY => self.priority.to_value(),
            fields::ASSIGNEE_ID => self.assignee_id.to_value(),
            fields::CREATOR_ID => self.creator_id.to_value(),
            fields::PARENT_ID => self.parent_id.to_value(),
            fields::LABEL_IDS => Value::from_list(self.label_ids.iter().copied()),
            fields::DUE_DATE => self.due_date.to_value(),
            fields::ESTIMATE => self.estimate.to_value(),
            fields::SORT_ORDER => self.sort_order.to_value(),
            fields::ARCHIVED => self.archived.to_value(),
            fields::CREATED_AT => self.created_at.to_value(),
            fields::UPDATED_AT => self.updated_at.to_value(),
            _ => return None,
        };

        Some(value)
    }
}
