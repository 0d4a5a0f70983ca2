mod float;
mod id;
mod timestamp;

pub use float::Float64;
pub use id::{CycleId, IssueId, LabelId, ProjectId, TeamId, UserId};
pub use timestamp::Timestamp;
