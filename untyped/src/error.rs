use std::fmt;

use thiserror::Error;

/// Invalid input while building a term.
#[derive(Debug, Error, PartialEq, Eq, Clone, Copy)]
pub enum ConstructionError {
    #[error("empty string representation")]
    EmptyName,
    #[error("invalid character: '{0}'")]
    InvalidCharacter(char),
    #[error("no variables to bind")]
    NoVariables,
    #[error("no arguments to apply abstraction to")]
    NoArguments,
}

/// The operation does not apply to a term of this shape.
#[derive(Debug, Error, PartialEq, Eq, Clone, Copy)]
pub enum PreconditionError {
    #[error("abstraction is not useless")]
    NotEtaReducible,
    #[error("can not perform reduction without known Abstraction")]
    NotRedex,
}

/// A free variable would have been bound.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct CollisionError<V> {
    pub message: String,
    pub collisions: Vec<V>,
}

impl<V> CollisionError<V> {
    pub fn new(message: impl Into<String>, collisions: Vec<V>) -> Self {
        Self {
            message: message.into(),
            collisions,
        }
    }
}

impl<V: fmt::Display> fmt::Display for CollisionError<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[collisions: ")?;
        if self.collisions.is_empty() {
            f.write_str("none")?;
        }
        for (i, name) in self.collisions.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            f.write_fmt(format_args!("{name}"))?;
        }
        f.write_fmt(format_args!("] {}", self.message))
    }
}

impl<V: fmt::Debug + fmt::Display> std::error::Error for CollisionError<V> {}

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum Error<V> {
    #[error(transparent)]
    Construction(#[from] ConstructionError),
    #[error(transparent)]
    Collision(#[from] CollisionError<V>),
    #[error(transparent)]
    Precondition(#[from] PreconditionError),
}
