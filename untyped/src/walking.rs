use std::iter;

use crate::{
    prelude::*,
    term::{Abstraction, Application, Term, TermRef, Variable},
    visitor::{BottomUpVisitor, Visitor},
};

pub type Walk<V> = Box<dyn Iterator<Item = Term<V>>>;

/// Yields every subterm occurrence, children before parents and left before
/// right. Children are only walked once the iterator reaches them.
#[derive(Debug, Default, Clone, Copy)]
pub struct DepthFirstVisitor;

impl DepthFirstVisitor {
    fn deferred<V: Name>(child: TermRef<V>) -> Walk<V> {
        Box::new(
            iter::once(child)
                .flat_map(|child| BottomUpVisitor::<V>::bottom_up(&mut DepthFirstVisitor, &child)),
        )
    }
}

impl<V: Name> BottomUpVisitor<V> for DepthFirstVisitor {
    type Output = Walk<V>;

    fn visit_variable(&mut self, variable: &Variable<V>) -> Self::Output {
        Box::new(iter::once(Term::from(variable.clone())))
    }

    fn ascend_abstraction(
        &mut self,
        abstraction: &Abstraction<V>,
        body: Self::Output,
    ) -> Self::Output {
        Box::new(body.chain(iter::once(Term::from(abstraction.clone()))))
    }

    fn ascend_application(
        &mut self,
        application: &Application<V>,
        abstraction: Self::Output,
        argument: Self::Output,
    ) -> Self::Output {
        Box::new(
            abstraction
                .chain(argument)
                .chain(iter::once(Term::from(application.clone()))),
        )
    }

    fn bottom_up_abstraction(&mut self, abstraction: &Abstraction<V>) -> Self::Output {
        let body = Self::deferred(abstraction.body.clone());
        self.ascend_abstraction(abstraction, body)
    }

    fn bottom_up_application(&mut self, application: &Application<V>) -> Self::Output {
        let abstraction = Self::deferred(application.abstraction.clone());
        let argument = Self::deferred(application.argument.clone());
        self.ascend_application(application, abstraction, argument)
    }
}

impl<V: Name> Visitor<V> for DepthFirstVisitor {
    type Output = Walk<V>;

    fn visit_variable(&mut self, variable: &Variable<V>) -> Self::Output {
        BottomUpVisitor::visit_variable(self, variable)
    }

    fn visit_abstraction(&mut self, abstraction: &Abstraction<V>) -> Self::Output {
        self.bottom_up_abstraction(abstraction)
    }

    fn visit_application(&mut self, application: &Application<V>) -> Self::Output {
        self.bottom_up_application(application)
    }
}
