//! Well known terms of the untyped lambda calculus.
//!
//! Every function returns a fresh term over `String` names.

pub mod arithmetic;
pub mod combinators;
pub mod logic;
pub mod pairs;

use untyped::Term;

pub type StringTerm = Term<String>;

pub(crate) fn var(name: &str) -> StringTerm {
    Term::variable(name.to_string())
}

/// `λnames.body`, the first name outermost.
pub(crate) fn lambda(names: &[&str], body: StringTerm) -> StringTerm {
    names
        .iter()
        .rev()
        .fold(body, |body, name| Term::abstraction(name.to_string(), body))
}

/// `(((function a) b) c)`
pub(crate) fn apply(
    function: StringTerm,
    arguments: impl IntoIterator<Item = StringTerm>,
) -> StringTerm {
    arguments
        .into_iter()
        .fold(function, |function, argument| {
            Term::application(function, argument)
        })
}
