use super::{unchecked::UnsafeSubstitution, Substitution};
use crate::{
    prelude::*,
    term::{Abstraction, Application, Term, TermRef, Variable},
    visitor::{Continuation, DeferrableVisitor, Visitor},
};

/// Substitution which renames bound variables instead of capturing free
/// variables of the value.
pub trait RenamingSubstitution<V>: DeferrableVisitor<V> + Sized {
    /// Returns `abstraction` with its bound variable renamed if it would
    /// capture a free variable of the value.
    fn prevent_collision(&self, abstraction: &Abstraction<V>) -> Abstraction<V>;

    /// Wraps the substitution so that visiting yields a [`Trace`].
    fn trace(self) -> TracingDecorator<Self> {
        TracingDecorator { substitution: self }
    }
}

/// Renames by appending the lowest number producing an unused name.
#[derive(Debug, Clone)]
pub struct CountingSubstitution<V> {
    pub variable: V,
    pub value: Term<V>,
    free_variables: Rc<HashSet<V>>,
}

impl<V: Numbered> Substitution<V> for CountingSubstitution<V> {
    fn from_substitution(variable: V, value: Term<V>) -> Self {
        let free_variables = Rc::new(value.free_variables());
        Self {
            variable,
            value,
            free_variables,
        }
    }
}

impl<V: Numbered> CountingSubstitution<V> {
    fn fresh_name(&self, abstraction: &Abstraction<V>) -> V {
        let mut used = abstraction.body.bound_variables();
        used.extend(abstraction.free_variables());
        used.extend(self.free_variables.iter().cloned());
        // renamed occurrences are visited again, so they must not become the
        // substituted variable
        if abstraction.body.free_variables().contains(&abstraction.bound) {
            used.insert(self.variable.clone());
        }
        let mut number = 1;
        loop {
            let name = abstraction.bound.numbered(number);
            if !used.contains(&name) {
                return name;
            }
            number += 1;
        }
    }
}

impl<V: Numbered> RenamingSubstitution<V> for CountingSubstitution<V> {
    fn prevent_collision(&self, abstraction: &Abstraction<V>) -> Abstraction<V> {
        if !self.free_variables.contains(&abstraction.bound) {
            return abstraction.clone();
        }
        let name = self.fresh_name(abstraction);
        let body = abstraction.body.accept(&mut UnsafeSubstitution::from_substitution(
            abstraction.bound.clone(),
            Term::variable(name.clone()),
        ));
        Abstraction::new(name, body)
    }
}

impl<V: Numbered> DeferrableVisitor<V> for CountingSubstitution<V> {
    fn defer_abstraction(
        &mut self,
        abstraction: &Abstraction<V>,
    ) -> (Abstraction<V>, Continuation) {
        if abstraction.bound == self.variable {
            (abstraction.clone(), Continuation::Halt)
        } else {
            (self.prevent_collision(abstraction), Continuation::Descend)
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

impl<V: Numbered> Visitor<V> for CountingSubstitution<V> {
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

/// Visitor turning a [`RenamingSubstitution`] into a [`Trace`].
#[derive(Debug, Clone)]
pub struct TracingDecorator<S> {
    pub substitution: S,
}

impl<V, S> Visitor<V> for TracingDecorator<S>
where
    V: Name,
    S: RenamingSubstitution<V> + Clone,
{
    type Output = Trace<V, S>;

    fn visit_variable(&mut self, variable: &Variable<V>) -> Self::Output {
        Trace::new(self.substitution.clone(), variable.clone().into())
    }

    fn visit_abstraction(&mut self, abstraction: &Abstraction<V>) -> Self::Output {
        Trace::new(self.substitution.clone(), abstraction.clone().into())
    }

    fn visit_application(&mut self, application: &Application<V>) -> Self::Output {
        Trace::new(self.substitution.clone(), application.clone().into())
    }
}

#[derive(Debug, Clone)]
enum Frame<V> {
    /// Inside the body of an abstraction.
    Abstraction { bound: V },
    /// Inside the left side of an application. `last` is the left side as
    /// shown by the most recent intermediate step.
    Left {
        last: TermRef<V>,
        argument: TermRef<V>,
        right: Continuation,
    },
    /// Inside the right side of an application whose left side is done.
    Right {
        step: TermRef<V>,
        abstraction: TermRef<V>,
    },
}

#[derive(Debug, Clone)]
enum Task<V> {
    Visit(Term<V>),
    Return(Term<V>),
    Finished(Term<V>),
}

/// Substitution performed one renaming at a time.
///
/// Yields the whole term after each alpha conversion. Free occurrences of the
/// substituted variable are only replaced in the final result, available
/// through [`Trace::finish`] or [`Trace::result`] once exhausted.
#[derive(Debug, Clone)]
pub struct Trace<V, S> {
    substitution: S,
    frames: Vec<Frame<V>>,
    task: Task<V>,
}

impl<V: Name, S: RenamingSubstitution<V>> Trace<V, S> {
    pub fn new(substitution: S, term: Term<V>) -> Self {
        Self {
            substitution,
            frames: Vec::new(),
            task: Task::Visit(term),
        }
    }

    /// The substituted term, if all steps have been taken.
    pub fn result(&self) -> Option<&Term<V>> {
        match &self.task {
            Task::Finished(term) => Some(term),
            _ => None,
        }
    }

    /// Skips the remaining steps.
    pub fn finish(mut self) -> Term<V> {
        loop {
            if let Task::Finished(term) = self.task {
                return term;
            }
            self.next();
        }
    }

    /// Places `term` into the surrounding context.
    fn wrap(&mut self, term: Term<V>) -> Term<V> {
        let mut term = term;
        for frame in self.frames.iter_mut().rev() {
            term = match frame {
                Frame::Abstraction { bound } => Term::abstraction(bound.clone(), term),
                Frame::Left { last, argument, .. } => {
                    let term = Rc::new(term);
                    *last = term.clone();
                    Term::application(term, argument.clone())
                }
                Frame::Right { step, .. } => Term::application(step.clone(), term),
            };
        }
        term
    }

    fn visit(&mut self, term: Term<V>) -> (Task<V>, Option<Term<V>>) {
        match term {
            Term::Variable(variable) => (
                Task::Return(self.substitution.visit_variable(&variable)),
                None,
            ),
            Term::Abstraction(abstraction) => {
                match self.substitution.defer_abstraction(&abstraction) {
                    (abstraction, Continuation::Halt) => (Task::Return(abstraction.into()), None),
                    (renamed, Continuation::Descend) => {
                        let step = (renamed.bound != abstraction.bound)
                            .then(|| self.wrap(renamed.clone().into()));
                        self.frames.push(Frame::Abstraction {
                            bound: renamed.bound,
                        });
                        (Task::Visit(renamed.body.as_ref().clone()), step)
                    }
                }
            }
            Term::Application(application) => {
                let (application, left, right) = self.substitution.defer_application(&application);
                self.frames.push(Frame::Left {
                    last: application.abstraction.clone(),
                    argument: application.argument.clone(),
                    right,
                });
                let abstraction = application.abstraction.as_ref().clone();
                match left {
                    Continuation::Halt => (Task::Return(abstraction), None),
                    Continuation::Descend => (Task::Visit(abstraction), None),
                }
            }
        }
    }

    fn ascend(&mut self, term: Term<V>) -> Task<V> {
        match self.frames.pop() {
            None => Task::Finished(term),
            Some(Frame::Abstraction { bound }) => Task::Return(Term::abstraction(bound, term)),
            Some(Frame::Left {
                last,
                argument,
                right,
            }) => {
                self.frames.push(Frame::Right {
                    step: last,
                    abstraction: term.into(),
                });
                let argument = argument.as_ref().clone();
                match right {
                    Continuation::Halt => Task::Return(argument),
                    Continuation::Descend => Task::Visit(argument),
                }
            }
            Some(Frame::Right { abstraction, .. }) => {
                Task::Return(Term::application(abstraction, term))
            }
        }
    }
}

impl<V: Name, S: RenamingSubstitution<V>> Iterator for Trace<V, S> {
    type Item = Term<V>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let (task, step) = match self.task.clone() {
                Task::Finished(_) => return None,
                Task::Visit(term) => self.visit(term),
                Task::Return(term) => (self.ascend(term), None),
            };
            self.task = task;
            if step.is_some() {
                return step;
            }
        }
    }
}
