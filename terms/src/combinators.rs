use crate::{apply, lambda, var, StringTerm};

/// Fixed point combinator.
pub fn y() -> StringTerm {
    let half = lambda(&["x"], apply(var("g"), [apply(var("x"), [var("x")])]));
    lambda(&["g"], apply(half.clone(), [half]))
}

pub fn s() -> StringTerm {
    lambda(
        &["x", "y", "z"],
        apply(var("x"), [var("z"), apply(var("y"), [var("z")])]),
    )
}

pub fn k() -> StringTerm {
    lambda(&["x", "y"], var("x"))
}

pub fn i() -> StringTerm {
    lambda(&["x"], var("x"))
}

pub fn b() -> StringTerm {
    lambda(
        &["x", "y", "z"],
        apply(var("x"), [apply(var("y"), [var("z")])]),
    )
}

pub fn c() -> StringTerm {
    lambda(&["x", "y", "z"], apply(var("x"), [var("z"), var("y")]))
}

pub fn w() -> StringTerm {
    lambda(&["x", "y"], apply(var("x"), [var("y"), var("y")]))
}

pub fn delta() -> StringTerm {
    lambda(&["x"], apply(var("x"), [var("x")]))
}

/// Has no normal form.
pub fn omega() -> StringTerm {
    apply(delta(), [delta()])
}
