use std::{fmt::Debug, hash::Hash};

/// Anything usable as a variable name.
pub trait Name: Clone + Eq + Hash + Debug + 'static {}
impl<T: Clone + Eq + Hash + Debug + 'static> Name for T {}

/// Names which can be made fresh by appending a number.
pub trait Numbered: Name {
    fn numbered(&self, number: usize) -> Self;
}

impl Numbered for String {
    fn numbered(&self, number: usize) -> Self {
        format!("{self}{number}")
    }
}

pub use std::collections::{HashMap, HashSet};
pub use std::rc::Rc;
