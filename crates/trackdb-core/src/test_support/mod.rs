//! Shared fixtures for unit tests.

use crate::{
    model::issue::{Issue, IssuePriority, IssueStatus},
    types::{CycleId, Float64, IssueId, LabelId, ProjectId, TeamId, Timestamp, UserId},
};

pub(crate) const TEAM: TeamId = TeamId::from_u128(0xAA);
pub(crate) const CREATOR: UserId = UserId::from_u128(0xC0);

///
/// IssueFixture
///
/// Terse builder over `Issue::new` so tests only spell the fields they
/// care about.
///

pub(crate) struct IssueFixture(Issue);

impl IssueFixture {
    /// Issue `n` with identifier `ENG-n` created at `n` seconds.
    pub(crate) fn new(n: u128, title: &str) -> Self {
        let seconds = u64::try_from(n).unwrap_or(u64::MAX);

        Self(Issue::new(
            IssueId::from_u128(n),
            TEAM,
            format!("ENG-{n}"),
            title,
            CREATOR,
            Timestamp::from_seconds(seconds),
        ))
    }

    pub(crate) fn status(mut self, status: IssueStatus) -> Self {
        self.0.status = status;
        self
    }

    pub(crate) fn priority(mut self, priority: IssuePriority) -> Self {
        self.0.priority = priority;
        self
    }

    pub(crate) fn assignee(mut self, user: u128) -> Self {
        self.0.assignee_id = Some(UserId::from_u128(user));
        self
    }

    pub(crate) fn creator(mut self, user: u128) -> Self {
        self.0.creator_id = UserId::from_u128(user);
        self
    }

    pub(crate) fn label(mut self, label: u128) -> Self {
        self.0.label_ids.insert(LabelId::from_u128(label));
        self
    }

    pub(crate) fn project(mut self, project: u128) -> Self {
        self.0.project_id = Some(ProjectId::from_u128(project));
        self
    }

    pub(crate) fn cycle(mut self, cycle: u128) -> Self {
        self.0.cycle_id = Some(CycleId::from_u128(cycle));
        self
    }

    pub(crate) fn archived(mut self) -> Self {
        self.0.archived = true;
        self
    }

    pub(crate) fn created_at(mut self, seconds: u64) -> Self {
        self.0.created_at = Timestamp::from_seconds(seconds);
        self
    }

    pub(crate) fn due(mut self, seconds: u64) -> Self {
        self.0.due_date = Some(Timestamp::from_seconds(seconds));
        self
    }

    pub(crate) fn estimate(mut self, points: u32) -> Self {
        self.0.estimate = Some(points);
        self
    }

    pub(crate) fn rank(mut self, sort_order: f64) -> Self {
        self.0.sort_order = Float64::try_new(sort_order).unwrap_or_default();
        self
    }

    pub(crate) fn build(self) -> Issue {
        self.0
    }
}

/// Five issues with statuses [backlog, todo, todo, done, in_progress],
/// created one second apart in that order.
pub(crate) fn five_statuses() -> Vec<Issue> {
    [
        IssueStatus::Backlog,
        IssueStatus::Todo,
        IssueStatus::Todo,
        IssueStatus::Done,
        IssueStatus::InProgress,
    ]
    .into_iter()
    .zip(1u128..)
    .map(|(status, n)| {
        IssueFixture::new(n, &format!("issue {n}"))
            .status(status)
            .build()
    })
    .collect()
}

/// `count` plain issues numbered from 1.
pub(crate) fn numbered(count: u128) -> Vec<Issue> {
    (1..=count)
        .map(|n| IssueFixture::new(n, &format!("issue {n}")).build())
        .collect()
}

/// Ids of the given issues, in order.
pub(crate) fn ids(issues: &[Issue]) -> Vec<IssueId> {
    issues.iter().map(|issue| issue.id).collect()
}
