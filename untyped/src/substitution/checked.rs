use std::ops::{Deref, DerefMut};

use super::Substitution;
use crate::{
    error::CollisionError,
    prelude::*,
    term::{Abstraction, Application, Term, Variable},
    visitor::Visitor,
};

/// Substitution failing with a [`CollisionError`] where a free variable of
/// the value would end up bound.
#[derive(Debug, Clone)]
pub struct CheckedSubstitution<V> {
    pub variable: V,
    pub value: Term<V>,
    /// Free variables of the value in order of first occurrence.
    free_variables: Vec<V>,
    bound_variables: HashMap<V, usize>,
}

impl<V: Name> CheckedSubstitution<V> {
    /// Variables bound at the current position, with how often each is bound.
    pub fn bound_variables(&self) -> &HashMap<V, usize> {
        &self.bound_variables
    }

    fn bind(&mut self, name: V) -> Binding<'_, V> {
        *self.bound_variables.entry(name.clone()).or_default() += 1;
        Binding {
            substitution: self,
            name,
        }
    }

    fn unbind(&mut self, name: &V) {
        if let Some(count) = self.bound_variables.get_mut(name) {
            *count -= 1;
            if *count == 0 {
                self.bound_variables.remove(name);
            }
        }
    }
}

impl<V: Name> Substitution<V> for CheckedSubstitution<V> {
    fn from_substitution(variable: V, value: Term<V>) -> Self {
        let free = value.free_variables();
        let mut free_variables = Vec::with_capacity(free.len());
        for term in &value {
            if let Term::Variable(occurrence) = term {
                if free.contains(&occurrence.name) && !free_variables.contains(&occurrence.name) {
                    free_variables.push(occurrence.name);
                }
            }
        }
        Self {
            variable,
            value,
            free_variables,
            bound_variables: HashMap::new(),
        }
    }
}

/// Keeps a name bound until dropped.
struct Binding<'a, V: Name> {
    substitution: &'a mut CheckedSubstitution<V>,
    name: V,
}

impl<V: Name> Deref for Binding<'_, V> {
    type Target = CheckedSubstitution<V>;

    fn deref(&self) -> &Self::Target {
        self.substitution
    }
}

impl<V: Name> DerefMut for Binding<'_, V> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.substitution
    }
}

impl<V: Name> Drop for Binding<'_, V> {
    fn drop(&mut self) {
        self.substitution.unbind(&self.name);
    }
}

impl<V: Name> Visitor<V> for CheckedSubstitution<V> {
    type Output = Result<Term<V>, CollisionError<V>>;

    fn visit_variable(&mut self, variable: &Variable<V>) -> Self::Output {
        if variable.name != self.variable {
            return Ok(variable.clone().into());
        }
        let collisions: Vec<V> = self
            .free_variables
            .iter()
            .filter(|name| self.bound_variables.contains_key(*name))
            .cloned()
            .collect();
        if collisions.is_empty() {
            Ok(self.value.clone())
        } else {
            Err(CollisionError::new(
                "free variables in value are bound in term",
                collisions,
            ))
        }
    }

    fn visit_abstraction(&mut self, abstraction: &Abstraction<V>) -> Self::Output {
        if abstraction.bound == self.variable {
            return Ok(abstraction.clone().into());
        }
        let mut scope = self.bind(abstraction.bound.clone());
        let body = abstraction.body.accept(&mut *scope)?;
        Ok(abstraction.with_body(body).into())
    }

    fn visit_application(&mut self, application: &Application<V>) -> Self::Output {
        let abstraction = application.abstraction.accept(self)?;
        let argument = application.argument.accept(self)?;
        Ok(Application::new(abstraction, argument).into())
    }
}
