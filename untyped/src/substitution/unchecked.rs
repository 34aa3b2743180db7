use super::Substitution;
use crate::{
    prelude::*,
    term::{Abstraction, Application, Term, Variable},
    visitor::{Continuation, DeferrableVisitor, Visitor},
};

/// Substitution which lets free variables of the value be captured.
///
/// Only sound if the value is a variable not bound anywhere in the term,
/// which is how renaming uses it.
#[derive(Debug, Clone)]
pub struct UnsafeSubstitution<V> {
    pub variable: V,
    pub value: Term<V>,
}

impl<V> Substitution<V> for UnsafeSubstitution<V> {
    fn from_substitution(variable: V, value: Term<V>) -> Self {
        Self { variable, value }
    }
}

impl<V: Name> DeferrableVisitor<V> for UnsafeSubstitution<V> {
    fn defer_abstraction(
        &mut self,
        abstraction: &Abstraction<V>,
    ) -> (Abstraction<V>, Continuation) {
        if abstraction.bound == self.variable {
            (abstraction.clone(), Continuation::Halt)
        } else {
            (abstraction.clone(), Continuation::Descend)
        }
    }

    fn defer_application(
        &mut self,
        application: &Application<V>,
    ) -> (Application<V>, Continuation, Continuation) {
        (
            application.clone(),
            Continuation::Descend,
            Continuation::Descend,
        )
    }
}

impl<V: Name> Visitor<V> for UnsafeSubstitution<V> {
    type Output = Term<V>;

    fn visit_variable(&mut self, variable: &Variable<V>) -> Term<V> {
        if variable.name == self.variable {
            self.value.clone()
        } else {
            variable.clone().into()
        }
    }

    fn visit_abstraction(&mut self, abstraction: &Abstraction<V>) -> Term<V> {
        self.descend_abstraction(abstraction)
    }

    fn visit_application(&mut self, application: &Application<V>) -> Term<V> {
        self.descend_application(application)
    }
}
