use crate::db::query::{PageError, PlanError};
use std::fmt;
use thiserror::Error as ThisError;

///
/// Error
///
/// Public error returned by query entrypoints. Caller-input problems are
/// `Plan`; failures of the runtime or a store are `Internal`.
///

#[derive(Debug, ThisError)]
pub enum Error {
    #[error("{0}")]
    Plan(#[from] PlanError),

    #[error("{0}")]
    Internal(#[from] InternalError),
}

impl Error {
    /// True when the request itself was invalid and retrying it unchanged
    /// cannot succeed.
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(self, Self::Plan(_))
    }

    #[must_use]
    pub const fn class(&self) -> ErrorClass {
        match self {
            Self::Plan(_) => ErrorClass::Validation,
            Self::Internal(err) => err.class,
        }
    }

    #[must_use]
    pub const fn origin(&self) -> ErrorOrigin {
        match self {
            Self::Plan(_) => ErrorOrigin::Query,
            Self::Internal(err) => err.origin,
        }
    }
}

impl From<PageError> for Error {
    fn from(err: PageError) -> Self {
        Self::Plan(err.into())
    }
}

///
/// InternalError
///
/// Structured runtime error with a stable internal classification.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
#[error("{message}")]
pub struct InternalError {
    pub class: ErrorClass,
    pub origin: ErrorOrigin,
    pub message: String,
}

impl InternalError {
    pub fn new(class: ErrorClass, origin: ErrorOrigin, message: impl Into<String>) -> Self {
        Self {
            class,
            origin,
            message: message.into(),
        }
    }

    /// Construct a store-origin internal error.
    pub fn store_internal(message: impl Into<String>) -> Self {
        Self::new(ErrorClass::Internal, ErrorOrigin::Store, message)
    }

    /// Construct an executor-origin invariant violation.
    pub(crate) fn executor_invariant(message: impl Into<String>) -> Self {
        Self::new(
            ErrorClass::InvariantViolation,
            ErrorOrigin::Executor,
            message,
        )
    }

    #[must_use]
    pub fn display_with_class(&self) -> String {
        format!("{}:{}: {}", self.origin, self.class, self.message)
    }
}

///
/// ErrorClass
/// Error taxonomy for runtime classification.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorClass {
    Validation,
    Internal,
    Unsupported,
    InvariantViolation,
}

impl fmt::Display for ErrorClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Validation => "validation",
            Self::Internal => "internal",
            Self::Unsupported => "unsupported",
            Self::InvariantViolation => "invariant_violation",
        };
        write!(f, "{label}")
    }
}

///
/// ErrorOrigin
/// Layer that raised the error.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorOrigin {
    Query,
    Store,
    Executor,
}

impl fmt::Display for ErrorOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Query => "query",
            Self::Store => "store",
            Self::Executor => "executor",
        };
        write!(f, "{label}")
    }
}
