use derive_more::{Display, FromStr};
use serde::{Deserialize, Serialize};

///
/// Timestamp
/// (in milliseconds since the unix epoch)
///

#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    Deserialize,
    Display,
    Eq,
    FromStr,
    Hash,
    Ord,
    PartialEq,
    PartialOrd,
    Serialize,
)]
#[repr(transparent)]
#[serde(transparent)]
pub struct Timestamp(u64);

impl Timestamp {
    pub const EPOCH: Self = Self(u64::MIN);
    pub const MAX: Self = Self(u64::MAX);

    /// Construct from milliseconds.
    #[must_use]
    pub const fn from_millis(ms: u64) -> Self {
        Self(ms)
    }

    /// Construct from seconds, saturating on overflow.
    #[must_use]
    pub const fn from_seconds(secs: u64) -> Self {
        Self(secs.saturating_mul(1_000))
    }

    #[must_use]
    pub const fn as_millis(self) -> u64 {
        self.0
    }
}
