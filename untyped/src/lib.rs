//! The untyped lambda calculus as a term rewriting library.
//!
//! ```
//! use untyped::{normalisation::BetaNormalisingVisitor, term::Term};
//!
//! let identity = Term::abstraction("x".to_string(), Term::variable("x".to_string()));
//! let term = Term::application(identity, Term::variable("y".to_string()));
//! assert_eq!(
//!     BetaNormalisingVisitor::new().skip_intermediate(&term),
//!     Term::variable("y".to_string())
//! );
//! ```

#[macro_use]
extern crate slog;

pub mod error;
pub mod normalisation;
pub mod prelude;
#[cfg(test)]
mod strategy;
pub mod substitution;
pub mod term;
pub mod visitor;
pub mod walking;

pub use error::{CollisionError, ConstructionError, Error, PreconditionError};
pub use term::{Abstraction, Application, Term, Variable};
