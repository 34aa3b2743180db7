//! Normal order reduction to beta normal form.
//!
//! Visiting a term with [`BetaNormalisingVisitor`] gives a [`Normalisation`],
//! an iterator over the conversions performed on the whole term. It is
//! infinite for terms without a normal form, so callers decide how many
//! steps to take.

use std::{fmt::Display, mem};

use slog::{Discard, Logger};

use crate::{
    prelude::*,
    substitution::{
        renaming::{CountingSubstitution, RenamingSubstitution, Trace},
        Substitution,
    },
    term::{Abstraction, Application, Term, TermRef, Variable},
    visitor::Visitor,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
pub enum Conversion {
    #[display(fmt = "alpha")]
    Alpha,
    #[display(fmt = "beta")]
    Beta,
}

pub type Step<V> = (Conversion, Term<V>);

#[derive(Clone)]
pub struct BetaNormalisingVisitor {
    logger: Logger,
}

impl Default for BetaNormalisingVisitor {
    fn default() -> Self {
        Self::with_logger(Logger::root(Discard, o!()))
    }
}

impl BetaNormalisingVisitor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_logger(logger: Logger) -> Self {
        Self { logger }
    }

    /// Takes every step and returns the beta normal form.
    ///
    /// Does not return if there is none.
    pub fn skip_intermediate<V: Numbered + Display>(&mut self, term: &Term<V>) -> Term<V> {
        self.visit(term)
            .last()
            .map_or_else(|| term.clone(), |(_, term)| term)
    }
}

impl<V: Numbered + Display> Visitor<V> for BetaNormalisingVisitor {
    type Output = Normalisation<V>;

    fn visit_variable(&mut self, variable: &Variable<V>) -> Self::Output {
        Normalisation::new(self.logger.clone(), variable.clone().into())
    }

    fn visit_abstraction(&mut self, abstraction: &Abstraction<V>) -> Self::Output {
        Normalisation::new(self.logger.clone(), abstraction.clone().into())
    }

    fn visit_application(&mut self, application: &Application<V>) -> Self::Output {
        Normalisation::new(self.logger.clone(), application.clone().into())
    }
}

#[derive(Debug, Clone)]
enum Frame<V> {
    /// Normalising the body of an abstraction.
    Abstraction { bound: V },
    /// Normalising the left side of an application, which was no redex.
    Head { head: Term<V>, argument: TermRef<V> },
    /// Normalising the argument after the left side is done.
    Argument { head: TermRef<V> },
}

#[derive(Debug, Clone)]
enum Activity<V> {
    Normalise(Term<V>),
    Reduce {
        bound: V,
        argument: TermRef<V>,
        trace: Trace<V, CountingSubstitution<V>>,
    },
    Complete,
}

/// Steps of a normal order reduction, each containing the whole term.
#[derive(Debug, Clone)]
pub struct Normalisation<V> {
    logger: Logger,
    frames: Vec<Frame<V>>,
    activity: Activity<V>,
}

impl<V: Numbered + Display> Normalisation<V> {
    fn new(logger: Logger, term: Term<V>) -> Self {
        Self {
            logger,
            frames: Vec::new(),
            activity: Activity::Normalise(term),
        }
    }

    fn reduce(abstraction: &Abstraction<V>, argument: TermRef<V>) -> Activity<V> {
        let mut substitution = CountingSubstitution::from_substitution(
            abstraction.bound.clone(),
            argument.as_ref().clone(),
        )
        .trace();
        Activity::Reduce {
            bound: abstraction.bound.clone(),
            argument,
            trace: abstraction.body.accept(&mut substitution),
        }
    }

    fn normalise(&mut self, term: Term<V>) -> Activity<V> {
        match term {
            Term::Variable(_) => Activity::Complete,
            Term::Abstraction(abstraction) => {
                self.frames.push(Frame::Abstraction {
                    bound: abstraction.bound,
                });
                Activity::Normalise(abstraction.body.as_ref().clone())
            }
            Term::Application(Application {
                abstraction,
                argument,
            }) => match abstraction.as_ref() {
                Term::Abstraction(abstraction) => Self::reduce(abstraction, argument),
                head => {
                    self.frames.push(Frame::Head {
                        head: head.clone(),
                        argument,
                    });
                    Activity::Normalise(head.clone())
                }
            },
        }
    }

    /// Leaves completed frames until there is an argument left to normalise.
    fn ascend(&mut self) -> Activity<V> {
        while let Some(frame) = self.frames.pop() {
            if let Frame::Head { head, argument } = frame {
                self.frames.push(Frame::Argument { head: head.into() });
                return Activity::Normalise(argument.as_ref().clone());
            }
        }
        Activity::Complete
    }

    /// Places `term` into the surrounding context.
    ///
    /// If the left side of an application became an abstraction, reducing
    /// that application replaces all work inside of it.
    fn emit(&mut self, conversion: Conversion, term: Term<V>) -> Step<V> {
        let mut term = term;
        let mut redex = None;
        for (index, frame) in self.frames.iter_mut().enumerate().rev() {
            term = match frame {
                Frame::Abstraction { bound } => Term::abstraction(bound.clone(), term),
                Frame::Head { head, argument } => {
                    if redex.is_none() {
                        if let Term::Abstraction(abstraction) = &term {
                            redex = Some((index, abstraction.clone(), argument.clone()));
                        }
                    }
                    *head = term.clone();
                    Term::application(term, argument.clone())
                }
                Frame::Argument { head } => Term::application(head.clone(), term),
            };
        }
        if let Some((index, abstraction, argument)) = redex {
            self.frames.truncate(index);
            self.activity = Self::reduce(&abstraction, argument);
        }
        match conversion {
            Conversion::Alpha => {
                debug!(self.logger, "alpha conversion"; "term" => %term);
            }
            Conversion::Beta => {
                debug!(self.logger, "beta reduction"; "term" => %term);
            }
        }
        (conversion, term)
    }
}

impl<V: Numbered + Display> Iterator for Normalisation<V> {
    type Item = Step<V>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            match mem::replace(&mut self.activity, Activity::Complete) {
                Activity::Normalise(term) => self.activity = self.normalise(term),
                Activity::Reduce {
                    bound,
                    argument,
                    mut trace,
                } => {
                    if let Some(body) = trace.next() {
                        let step = Term::application(
                            Term::abstraction(bound.clone(), body),
                            argument.clone(),
                        );
                        self.activity = Activity::Reduce {
                            bound,
                            argument,
                            trace,
                        };
                        return Some(self.emit(Conversion::Alpha, step));
                    }
                    let reduced = trace.finish();
                    self.activity = Activity::Normalise(reduced.clone());
                    return Some(self.emit(Conversion::Beta, reduced));
                }
                Activity::Complete => {
                    self.activity = self.ascend();
                    if let Activity::Complete = self.activity {
                        return None;
                    }
                }
            }
        }
    }
}
