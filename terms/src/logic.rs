//! Church booleans.

use crate::{apply, lambda, var, StringTerm};

pub fn tru() -> StringTerm {
    lambda(&["x", "y"], var("x"))
}

pub fn fls() -> StringTerm {
    lambda(&["x", "y"], var("y"))
}

pub fn and() -> StringTerm {
    lambda(&["p", "q"], apply(var("p"), [var("q"), var("p")]))
}

pub fn or() -> StringTerm {
    lambda(&["p", "q"], apply(var("p"), [var("p"), var("q")]))
}

pub fn not() -> StringTerm {
    lambda(&["p"], apply(var("p"), [fls(), tru()]))
}

/// Evaluates to the second argument if the first is [`tru`], otherwise to
/// the third.
pub fn if_then_else() -> StringTerm {
    lambda(&["p", "a", "b"], apply(var("p"), [var("a"), var("b")]))
}
