use crate::{
    apply, lambda,
    logic::{fls, tru},
    var, StringTerm,
};

pub fn pair() -> StringTerm {
    lambda(&["x", "y", "f"], apply(var("f"), [var("x"), var("y")]))
}

pub fn first() -> StringTerm {
    lambda(&["p"], apply(var("p"), [tru()]))
}

pub fn second() -> StringTerm {
    lambda(&["p"], apply(var("p"), [fls()]))
}

/// The empty list.
pub fn nil() -> StringTerm {
    lambda(&["x"], tru())
}

/// Tests a list for [`nil`].
pub fn null() -> StringTerm {
    lambda(&["p"], apply(var("p"), [lambda(&["x", "y"], fls())]))
}
