//! Random terms for property tests.

use proptest::prelude::*;

use crate::term::Term;

const NAMES: [&str; 4] = ["a", "b", "x", "x1"];

fn name() -> impl Strategy<Value = String> {
    prop::sample::select(NAMES.to_vec()).prop_map(String::from)
}

/// Small terms over a handful of names, so that names collide often.
pub fn terms() -> impl Strategy<Value = Term<String>> {
    name()
        .prop_map(Term::variable)
        .prop_recursive(6, 48, 2, |inner| {
            prop_oneof![
                (name(), inner.clone()).prop_map(|(name, body)| Term::abstraction(name, body)),
                (inner.clone(), inner).prop_map(|(lhs, rhs)| Term::application(lhs, rhs)),
            ]
        })
}
