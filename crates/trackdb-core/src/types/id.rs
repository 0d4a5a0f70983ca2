use crate::{traits::FieldValue, value::Value};
use derive_more::{Display, FromStr};
use serde::{Deserialize, Serialize};
use ulid::Ulid;

///
/// ulid_id
///
/// Declares a typed ULID identifier so ids from different tables can
/// never be compared or filtered against each other by accident.
///

macro_rules! ulid_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Clone,
            Copy,
            Debug,
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
        pub struct $name(Ulid);

        impl $name {
            #[must_use]
            pub const fn nil() -> Self {
                Self(Ulid::nil())
            }

            #[must_use]
            pub const fn from_u128(n: u128) -> Self {
                Self(Ulid(n))
            }

            #[must_use]
            pub const fn from_parts(timestamp_ms: u64, random: u128) -> Self {
                Self(Ulid::from_parts(timestamp_ms, random))
            }

            #[must_use]
            pub const fn as_ulid(self) -> Ulid {
                self.0
            }
        }

        impl From<Ulid> for $name {
            fn from(ulid: Ulid) -> Self {
                Self(ulid)
            }
        }

        impl FieldValue for $name {
            fn to_value(&self) -> Value {
                Value::Ulid(self.0)
            }
        }
    };
}

ulid_id!(
    /// Primary key of an issue.
    IssueId
);
ulid_id!(TeamId);
ulid_id!(ProjectId);
ulid_id!(CycleId);
ulid_id!(LabelId);
ulid_id!(
    /// Assignee or creator of an issue.
    UserId
);
