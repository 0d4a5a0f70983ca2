//! Module: query::predicate
//! Responsibility: predicate tree, in-process evaluation, and canonical
//! normalization.
//! Does not own: filter-spec compilation or store access.

mod ast;
mod eval;
mod normalize;


pub use ast::{CompareOp, ComparePredicate, Predicate};
pub use eval::{FieldPresence, Row, eval};
pub use normalize::normalize;
