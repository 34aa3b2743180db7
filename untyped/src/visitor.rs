//! Traversal protocols over [`Term`]s.
//!
//! A [`Visitor`] gets to see one node and decides by itself whether and how
//! to recurse. [`BottomUpVisitor`] and [`DeferrableVisitor`] provide the
//! recursion for the two common shapes of traversal; types implementing them
//! still implement [`Visitor`] by forwarding to the provided drivers.

use crate::term::{Abstraction, Application, Term, Variable};

pub trait Visitor<V> {
    type Output;

    fn visit_variable(&mut self, variable: &Variable<V>) -> Self::Output;
    fn visit_abstraction(&mut self, abstraction: &Abstraction<V>) -> Self::Output;
    fn visit_application(&mut self, application: &Application<V>) -> Self::Output;

    fn visit(&mut self, term: &Term<V>) -> Self::Output {
        term.accept(self)
    }
}

/// Visitor whose result for a node is computed from the results of its
/// children.
pub trait BottomUpVisitor<V> {
    type Output;

    fn visit_variable(&mut self, variable: &Variable<V>) -> Self::Output;
    fn ascend_abstraction(
        &mut self,
        abstraction: &Abstraction<V>,
        body: Self::Output,
    ) -> Self::Output;
    fn ascend_application(
        &mut self,
        application: &Application<V>,
        abstraction: Self::Output,
        argument: Self::Output,
    ) -> Self::Output;

    fn bottom_up(&mut self, term: &Term<V>) -> Self::Output {
        match term {
            Term::Variable(variable) => BottomUpVisitor::visit_variable(self, variable),
            Term::Abstraction(abstraction) => self.bottom_up_abstraction(abstraction),
            Term::Application(application) => self.bottom_up_application(application),
        }
    }

    fn bottom_up_abstraction(&mut self, abstraction: &Abstraction<V>) -> Self::Output {
        let body = self.bottom_up(&abstraction.body);
        self.ascend_abstraction(abstraction, body)
    }

    fn bottom_up_application(&mut self, application: &Application<V>) -> Self::Output {
        let abstraction = self.bottom_up(&application.abstraction);
        let argument = self.bottom_up(&application.argument);
        self.ascend_application(application, abstraction, argument)
    }
}

/// Whether a [`DeferrableVisitor`] continues into a child.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Continuation {
    Halt,
    Descend,
}

/// Visitor producing a new term which may rewrite a node before deciding
/// which of its children to descend into.
pub trait DeferrableVisitor<V>: Visitor<V, Output = Term<V>> {
    fn defer_abstraction(
        &mut self,
        abstraction: &Abstraction<V>,
    ) -> (Abstraction<V>, Continuation);

    fn defer_application(
        &mut self,
        application: &Application<V>,
    ) -> (Application<V>, Continuation, Continuation);

    fn descend_abstraction(&mut self, abstraction: &Abstraction<V>) -> Term<V>
    where
        V: Clone,
    {
        match self.defer_abstraction(abstraction) {
            (abstraction, Continuation::Halt) => abstraction.into(),
            (abstraction, Continuation::Descend) => {
                let body = abstraction.body.accept(self);
                abstraction.with_body(body).into()
            }
        }
    }

    fn descend_application(&mut self, application: &Application<V>) -> Term<V> {
        let (application, left, right) = self.defer_application(application);
        let abstraction = match left {
            Continuation::Halt => application.abstraction.clone(),
            Continuation::Descend => application.abstraction.accept(self).into(),
        };
        let argument = match right {
            Continuation::Halt => application.argument.clone(),
            Continuation::Descend => application.argument.accept(self).into(),
        };
        Application::new(abstraction, argument).into()
    }
}
