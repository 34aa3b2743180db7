//! Replacing free occurrences of a variable with a term.
//!
//! [`checked::CheckedSubstitution`] refuses to capture variables,
//! [`unchecked::UnsafeSubstitution`] ignores the problem and
//! [`renaming::CountingSubstitution`] renames binders out of the way.

use crate::term::Term;

pub mod checked;
pub mod renaming;
pub mod unchecked;

pub trait Substitution<V>: Sized {
    /// Substitution of `variable` with `value`.
    fn from_substitution(variable: V, value: Term<V>) -> Self;
}
