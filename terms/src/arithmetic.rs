//! Church numerals.

use crate::{
    apply, lambda,
    logic::{fls, tru},
    var, StringTerm,
};

/// `λf.λx.(f (f … x))` with `n` applications of `f`.
pub fn number(n: usize) -> StringTerm {
    let body = (0..n).fold(var("x"), |body, _| apply(var("f"), [body]));
    lambda(&["f", "x"], body)
}

pub fn is_zero() -> StringTerm {
    lambda(&["n"], apply(var("n"), [lambda(&["x"], fls()), tru()]))
}

pub fn successor() -> StringTerm {
    lambda(
        &["n", "f", "x"],
        apply(var("f"), [apply(var("n"), [var("f"), var("x")])]),
    )
}

/// Zero is its own predecessor.
pub fn predecessor() -> StringTerm {
    lambda(
        &["n", "f", "x"],
        apply(
            var("n"),
            [
                lambda(&["g", "h"], apply(var("h"), [apply(var("g"), [var("f")])])),
                lambda(&["u"], var("x")),
                lambda(&["u"], var("u")),
            ],
        ),
    )
}

pub fn add() -> StringTerm {
    lambda(
        &["m", "n", "f", "x"],
        apply(
            var("m"),
            [var("f"), apply(var("n"), [var("f"), var("x")])],
        ),
    )
}

/// Saturates at zero.
pub fn subtract() -> StringTerm {
    lambda(&["m", "n"], apply(var("n"), [predecessor(), var("m")]))
}

pub fn multiply() -> StringTerm {
    lambda(
        &["m", "n", "f"],
        apply(var("m"), [apply(var("n"), [var("f")])]),
    )
}

pub fn power() -> StringTerm {
    lambda(&["b", "e"], apply(var("e"), [var("b")]))
}
