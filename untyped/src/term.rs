use std::fmt::Display;

use crate::{
    error::{CollisionError, ConstructionError, Error, PreconditionError},
    prelude::*,
    substitution::{checked::CheckedSubstitution, Substitution},
    visitor::Visitor,
    walking::{DepthFirstVisitor, Walk},
};

pub type TermRef<V> = Rc<Term<V>>;

#[derive(PartialEq, Eq, Hash, Clone, Debug, derive_more::From, derive_more::Display)]
#[display(bound = "V: std::fmt::Display")]
pub enum Term<V> {
    /// `x`
    Variable(Variable<V>),
    /// `λx.t`
    Abstraction(Abstraction<V>),
    /// `(t t)`
    Application(Application<V>),
}

#[derive(PartialEq, Eq, Hash, Clone, Debug, derive_more::Display)]
#[display(bound = "V: std::fmt::Display")]
#[display(fmt = "{name}")]
pub struct Variable<V> {
    pub name: V,
}

#[derive(PartialEq, Eq, Hash, Clone, Debug, derive_more::Display)]
#[display(bound = "V: std::fmt::Display")]
#[display(fmt = "(λ{bound}.{body})")]
pub struct Abstraction<V> {
    pub bound: V,
    pub body: TermRef<V>,
}

#[derive(PartialEq, Eq, Hash, Clone, Debug, derive_more::Display)]
#[display(bound = "V: std::fmt::Display")]
#[display(fmt = "({abstraction} {argument})")]
pub struct Application<V> {
    pub abstraction: TermRef<V>,
    pub argument: TermRef<V>,
}

impl<V> Term<V> {
    pub fn variable(name: V) -> Self {
        Variable::new(name).into()
    }

    pub fn abstraction(bound: V, body: impl Into<TermRef<V>>) -> Self {
        Abstraction::new(bound, body).into()
    }

    pub fn application(
        abstraction: impl Into<TermRef<V>>,
        argument: impl Into<TermRef<V>>,
    ) -> Self {
        Application::new(abstraction, argument).into()
    }

    /// Calls the visitor method matching the shape of this term.
    pub fn accept<T: Visitor<V> + ?Sized>(&self, visitor: &mut T) -> T::Output {
        match self {
            Term::Variable(variable) => visitor.visit_variable(variable),
            Term::Abstraction(abstraction) => visitor.visit_abstraction(abstraction),
            Term::Application(application) => visitor.visit_application(application),
        }
    }

    /// Binds `names` around this term, the first name outermost.
    pub fn abstract_over(
        self,
        names: impl IntoIterator<Item = V>,
    ) -> Result<Term<V>, ConstructionError> {
        Abstraction::curried(names, self).map(Term::from)
    }

    /// Applies this term to every argument in turn.
    pub fn apply_to(
        self,
        arguments: impl IntoIterator<Item = Term<V>>,
    ) -> Result<Term<V>, ConstructionError> {
        Application::with_arguments(self, arguments).map(Term::from)
    }
}

impl<V: Name> Term<V> {
    pub fn free_variables(&self) -> HashSet<V> {
        match self {
            Term::Variable(variable) => variable.free_variables(),
            Term::Abstraction(abstraction) => abstraction.free_variables(),
            Term::Application(application) => application.free_variables(),
        }
    }

    pub fn bound_variables(&self) -> HashSet<V> {
        match self {
            Term::Variable(_) => HashSet::new(),
            Term::Abstraction(abstraction) => abstraction.bound_variables(),
            Term::Application(application) => application.bound_variables(),
        }
    }

    pub fn is_beta_normal_form(&self) -> bool {
        match self {
            Term::Variable(_) => true,
            Term::Abstraction(abstraction) => abstraction.is_beta_normal_form(),
            Term::Application(application) => application.is_beta_normal_form(),
        }
    }

    pub fn is_combinator(&self) -> bool {
        self.free_variables().is_empty()
    }

    /// Replaces every free occurrence of `variable` with `value`.
    ///
    /// Fails instead of letting a free variable of `value` become bound.
    pub fn substitute(&self, variable: V, value: Term<V>) -> Result<Term<V>, CollisionError<V>> {
        self.accept(&mut CheckedSubstitution::from_substitution(variable, value))
    }

    /// Subterms in depth first order, children before their parent.
    pub fn walk(&self) -> Walk<V> {
        self.accept(&mut DepthFirstVisitor)
    }
}

impl<'a, V: Name> IntoIterator for &'a Term<V> {
    type Item = Term<V>;
    type IntoIter = Walk<V>;

    fn into_iter(self) -> Self::IntoIter {
        self.walk()
    }
}

impl<V> Variable<V> {
    pub fn new(name: V) -> Self {
        Self { name }
    }
}

impl<V: Display> Variable<V> {
    /// Creates a variable whose name renders unambiguously.
    pub fn with_valid_name(name: V) -> Result<Self, ConstructionError> {
        let string = name.to_string();
        if string.is_empty() {
            return Err(ConstructionError::EmptyName);
        }
        if let Some(c) = string
            .chars()
            .find(|c| "().λ".contains(*c) || c.is_whitespace())
        {
            return Err(ConstructionError::InvalidCharacter(c));
        }
        Ok(Self::new(name))
    }
}

impl<V: Name> Variable<V> {
    pub fn free_variables(&self) -> HashSet<V> {
        HashSet::from([self.name.clone()])
    }
}

impl<V> Abstraction<V> {
    pub fn new(bound: V, body: impl Into<TermRef<V>>) -> Self {
        Self {
            bound,
            body: body.into(),
        }
    }

    pub fn curried(
        names: impl IntoIterator<Item = V>,
        body: impl Into<TermRef<V>>,
    ) -> Result<Self, ConstructionError> {
        let mut names: Vec<V> = names.into_iter().collect();
        let inner = names.pop().ok_or(ConstructionError::NoVariables)?;
        let mut term = Self::new(inner, body);
        while let Some(name) = names.pop() {
            term = Self::new(name, Term::from(term));
        }
        Ok(term)
    }

    pub fn with_bound(&self, bound: V) -> Self {
        Self::new(bound, self.body.clone())
    }

    pub fn with_body(&self, body: impl Into<TermRef<V>>) -> Self
    where
        V: Clone,
    {
        Self::new(self.bound.clone(), body)
    }
}

impl<V: Name> Abstraction<V> {
    pub fn free_variables(&self) -> HashSet<V> {
        let mut free = self.body.free_variables();
        free.remove(&self.bound);
        free
    }

    pub fn bound_variables(&self) -> HashSet<V> {
        let mut bound = self.body.bound_variables();
        bound.insert(self.bound.clone());
        bound
    }

    pub fn is_beta_normal_form(&self) -> bool {
        self.body.is_beta_normal_form()
    }

    /// Renames the bound variable.
    pub fn alpha_conversion(&self, new: V) -> Result<Self, CollisionError<V>> {
        if new == self.bound {
            return Ok(self.clone());
        }
        if self.body.free_variables().contains(&new) {
            return Err(CollisionError::new(
                "new variable would bind free variable in body",
                vec![new],
            ));
        }
        let body = self
            .body
            .substitute(self.bound.clone(), Term::variable(new.clone()))?;
        Ok(Self::new(new, body))
    }

    /// Turns `λx.(f x)` into `f` if `x` is not free in `f`.
    pub fn eta_reduction(&self) -> Result<Term<V>, PreconditionError> {
        if let Term::Application(Application {
            abstraction,
            argument,
        }) = self.body.as_ref()
        {
            if let Term::Variable(Variable { name }) = argument.as_ref() {
                if name == &self.bound && !abstraction.free_variables().contains(name) {
                    return Ok(abstraction.as_ref().clone());
                }
            }
        }
        Err(PreconditionError::NotEtaReducible)
    }
}

impl<V> Application<V> {
    pub fn new(abstraction: impl Into<TermRef<V>>, argument: impl Into<TermRef<V>>) -> Self {
        Self {
            abstraction: abstraction.into(),
            argument: argument.into(),
        }
    }

    pub fn with_arguments(
        abstraction: impl Into<TermRef<V>>,
        arguments: impl IntoIterator<Item = Term<V>>,
    ) -> Result<Self, ConstructionError> {
        let mut arguments = arguments.into_iter();
        let first = arguments.next().ok_or(ConstructionError::NoArguments)?;
        Ok(arguments.fold(Self::new(abstraction, first), |term, argument| {
            Self::new(Term::from(term), argument)
        }))
    }

    pub fn with_abstraction(&self, abstraction: impl Into<TermRef<V>>) -> Self {
        Self::new(abstraction, self.argument.clone())
    }

    pub fn with_argument(&self, argument: impl Into<TermRef<V>>) -> Self {
        Self::new(self.abstraction.clone(), argument)
    }

    pub fn is_redex(&self) -> bool {
        matches!(self.abstraction.as_ref(), Term::Abstraction(_))
    }
}

impl<V: Name> Application<V> {
    pub fn free_variables(&self) -> HashSet<V> {
        let mut free = self.abstraction.free_variables();
        free.extend(self.argument.free_variables());
        free
    }

    pub fn bound_variables(&self) -> HashSet<V> {
        let mut bound = self.abstraction.bound_variables();
        bound.extend(self.argument.bound_variables());
        bound
    }

    pub fn is_beta_normal_form(&self) -> bool {
        !self.is_redex()
            && self.abstraction.is_beta_normal_form()
            && self.argument.is_beta_normal_form()
    }

    /// Substitutes the argument into the body of the abstraction.
    pub fn beta_reduction(&self) -> Result<Term<V>, Error<V>> {
        match self.abstraction.as_ref() {
            Term::Abstraction(Abstraction { bound, body }) => Ok(body
                .substitute(bound.clone(), self.argument.as_ref().clone())?),
            _ => Err(PreconditionError::NotRedex.into()),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    macro_rules! var {
        ($n:expr) => {
            Term::variable($n)
        };
    }
    macro_rules! lambda {
        ($x:expr, $body: expr) => {
            Term::abstraction($x, $body)
        };
    }
    macro_rules! apply {
        ($lhs:expr, $rhs: expr) => {
            Term::application($lhs, $rhs)
        };
    }

    struct Wrapper(&'static str);

    impl std::fmt::Display for Wrapper {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            f.write_str(self.0)
        }
    }

    #[test]
    fn test_valid_name() {
        assert_eq!(Variable::with_valid_name(42), Ok(Variable::new(42)));
        assert_eq!(Variable::with_valid_name("test"), Ok(Variable::new("test")));
        for name in ["a b", ")a", "b(", " ", "λa.b", ""] {
            assert!(Variable::with_valid_name(name).is_err());
            assert!(Variable::with_valid_name(Wrapper(name)).is_err());
        }
        assert_eq!(
            Variable::with_valid_name("a.b").unwrap_err(),
            ConstructionError::InvalidCharacter('.')
        );
        assert_eq!(
            Variable::with_valid_name("").unwrap_err(),
            ConstructionError::EmptyName
        );
    }

    #[test]
    fn test_str() {
        assert_eq!(var!(42).to_string(), "42");
        assert_eq!(var!("test").to_string(), "test");
        assert_eq!(lambda!(4, var!(4)).to_string(), "(λ4.4)");
        assert_eq!(apply!(var!(1), var!(2)).to_string(), "(1 2)");
        assert_eq!(
            apply!(lambda!("x", apply!(var!("x"), var!("y"))), var!("z")).to_string(),
            "((λx.(x y)) z)"
        );
    }

    #[test]
    fn test_variable() {
        assert_eq!(var!(42).free_variables(), HashSet::from([42]));
        assert!(var!(42).bound_variables().is_empty());
        assert!(var!(42).is_beta_normal_form());
        assert!(!var!(42).is_combinator());
    }

    #[test]
    fn test_curried() {
        assert_eq!(
            Abstraction::curried([1, 2, 3], var!(3)),
            Ok(Abstraction::new(1, lambda!(2, lambda!(3, var!(3)))))
        );
        assert_eq!(
            Abstraction::curried([], var!(3)),
            Err(ConstructionError::NoVariables)
        );
        assert_eq!(
            var!("x").abstract_over(["x", "y"]),
            Ok(lambda!("x", lambda!("y", var!("x"))))
        );
    }

    #[test]
    fn test_abstraction_variables() {
        let combinator = lambda!(1, var!(1));
        assert!(combinator.is_combinator());
        assert!(combinator.free_variables().is_empty());
        assert!(lambda!(2, combinator.clone()).free_variables().is_empty());
        assert_eq!(lambda!(1, var!(2)).free_variables(), HashSet::from([2]));
        assert_eq!(combinator.bound_variables(), HashSet::from([1]));
        assert_eq!(
            lambda!(2, combinator.clone()).bound_variables(),
            HashSet::from([1, 2])
        );
        assert_eq!(lambda!(1, var!(2)).bound_variables(), HashSet::from([1]));
        // a name can be free and bound at the same time
        let both = apply!(var!(1), lambda!(1, var!(1)));
        assert_eq!(both.free_variables(), HashSet::from([1]));
        assert_eq!(both.bound_variables(), HashSet::from([1]));
    }

    #[test]
    fn test_abstraction_normal_form() {
        let combinator = lambda!(1, var!(1));
        assert!(combinator.is_beta_normal_form());
        assert!(!lambda!(1, apply!(combinator, var!(1))).is_beta_normal_form());
    }

    #[test]
    fn test_alpha_conversion() {
        let abstraction = Abstraction::new(1, lambda!(1, var!(1)));
        assert_eq!(abstraction.alpha_conversion(1), Ok(abstraction.clone()));
        assert_eq!(
            abstraction.alpha_conversion(2),
            Ok(Abstraction::new(2, lambda!(1, var!(1))))
        );
        assert_eq!(
            Abstraction::new(1, lambda!(2, apply!(var!(1), var!(2)))).alpha_conversion(3),
            Ok(Abstraction::new(3, lambda!(2, apply!(var!(3), var!(2)))))
        );
        assert_eq!(
            Abstraction::new(1, apply!(lambda!(2, apply!(var!(3), var!(4))), var!(1)))
                .alpha_conversion(2),
            Ok(Abstraction::new(
                2,
                apply!(lambda!(2, apply!(var!(3), var!(4))), var!(2))
            ))
        );
        assert_eq!(
            Abstraction::new(1, apply!(lambda!(2, apply!(var!(3), var!(2))), var!(1)))
                .alpha_conversion(2),
            Ok(Abstraction::new(
                2,
                apply!(lambda!(2, apply!(var!(3), var!(2))), var!(2))
            ))
        );
        assert_eq!(
            Abstraction::new(1, apply!(lambda!(1, apply!(var!(3), var!(1))), var!(1)))
                .alpha_conversion(2),
            Ok(Abstraction::new(
                2,
                apply!(lambda!(1, apply!(var!(3), var!(1))), var!(2))
            ))
        );
        assert!(Abstraction::new(1, lambda!(2, apply!(var!(1), var!(2))))
            .alpha_conversion(2)
            .is_err());
        assert_eq!(
            Abstraction::new(1, apply!(var!(2), var!(1))).alpha_conversion(2),
            Err(CollisionError::new(
                "new variable would bind free variable in body",
                vec![2]
            ))
        );
        assert!(
            Abstraction::new(1, lambda!(2, apply!(lambda!(2, var!(2)), var!(1))))
                .alpha_conversion(2)
                .is_err()
        );
    }

    #[test]
    fn test_eta_reduction() {
        assert_eq!(
            Abstraction::new(1, apply!(var!(2), var!(1))).eta_reduction(),
            Ok(var!(2))
        );
        for body in [
            var!(1),
            apply!(var!(2), var!(3)),
            apply!(var!(1), var!(1)),
        ] {
            assert_eq!(
                Abstraction::new(1, body).eta_reduction(),
                Err(PreconditionError::NotEtaReducible)
            );
        }
    }

    #[test]
    fn test_with_arguments() {
        let combinator = lambda!(1, var!(1));
        assert_eq!(
            Application::with_arguments(lambda!(2, combinator.clone()), [var!(3), var!(4)]),
            Ok(Application::new(
                apply!(lambda!(2, combinator.clone()), var!(3)),
                var!(4)
            ))
        );
        assert_eq!(
            Application::with_arguments(lambda!(2, combinator), []),
            Err(ConstructionError::NoArguments)
        );
    }

    #[test]
    fn test_application_variables() {
        assert_eq!(
            apply!(var!(1), var!(2)).free_variables(),
            HashSet::from([1, 2])
        );
        assert_eq!(apply!(var!(1), var!(1)).free_variables(), HashSet::from([1]));
        assert_eq!(
            apply!(lambda!(1, var!(1)), var!(2)).free_variables(),
            HashSet::from([2])
        );
        assert!(apply!(lambda!(1, var!(1)), lambda!(2, var!(2)))
            .free_variables()
            .is_empty());
        assert!(apply!(var!(1), var!(2)).bound_variables().is_empty());
        assert_eq!(
            apply!(lambda!(1, var!(1)), lambda!(2, var!(2))).bound_variables(),
            HashSet::from([1, 2])
        );
    }

    #[test]
    fn test_application_normal_form() {
        let combinator = lambda!(1, var!(1));
        assert!(apply!(var!(1), var!(2)).is_beta_normal_form());
        assert!(apply!(var!(3), combinator.clone()).is_beta_normal_form());
        assert!(!apply!(combinator.clone(), var!(3)).is_beta_normal_form());
        assert!(!apply!(var!(1), apply!(combinator, var!(3))).is_beta_normal_form());
    }

    #[test]
    fn test_beta_reduction() {
        assert_eq!(
            Application::new(lambda!(1, lambda!(2, var!(1))), var!(3)).beta_reduction(),
            Ok(lambda!(2, var!(3)))
        );
        assert_eq!(
            Application::new(lambda!(1, lambda!(1, var!(1))), var!(3)).beta_reduction(),
            Ok(lambda!(1, var!(1)))
        );
        assert_eq!(
            Application::new(lambda!(1, lambda!(2, var!(3))), var!(2)).beta_reduction(),
            Ok(lambda!(2, var!(3)))
        );
        assert_eq!(
            Application::new(var!(1), var!(2)).beta_reduction(),
            Err(Error::Precondition(PreconditionError::NotRedex))
        );
        assert!(matches!(
            Application::new(lambda!(1, lambda!(2, var!(1))), var!(2)).beta_reduction(),
            Err(Error::Collision(_))
        ));
    }

    #[test]
    fn test_replace() {
        let abstraction = Abstraction::new("x", var!("y"));
        assert_eq!(abstraction.with_bound("z"), Abstraction::new("z", var!("y")));
        assert_eq!(abstraction.with_body(var!("x")), Abstraction::new("x", var!("x")));
        let application = Application::new(var!("f"), var!("a"));
        assert_eq!(
            application.with_abstraction(var!("g")),
            Application::new(var!("g"), var!("a"))
        );
        assert_eq!(
            application.with_argument(var!("b")),
            Application::new(var!("f"), var!("b"))
        );
        assert!(!application.is_redex());
    }

    #[test]
    fn test_structural_equality() {
        let shared: TermRef<i32> = Rc::new(lambda!(3, var!(2)));
        assert_eq!(
            Term::application(shared.clone(), shared),
            apply!(lambda!(3, var!(2)), lambda!(3, var!(2)))
        );
        let mut set = HashSet::new();
        set.insert(lambda!(1, var!(1)));
        assert!(set.contains(&lambda!(1, var!(1))));
        assert!(!set.contains(&lambda!(2, var!(2))));
    }

    fn size<V>(term: &Term<V>) -> usize {
        match term {
            Term::Variable(_) => 1,
            Term::Abstraction(abstraction) => 1 + size(&abstraction.body),
            Term::Application(application) => {
                1 + size(&application.abstraction) + size(&application.argument)
            }
        }
    }

    mod properties {
        use super::*;
        use crate::strategy::terms;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn test_abstraction_free_variables(body in terms(), bound in "[abx]") {
                let mut expected = body.free_variables();
                expected.remove(&bound);
                let abstraction = Abstraction::new(bound.clone(), body.clone());
                prop_assert_eq!(abstraction.free_variables(), expected);
                prop_assert!(abstraction.bound_variables().contains(&bound));
            }

            #[test]
            fn test_alpha_conversion_noop(body in terms(), bound in "[abx]") {
                let abstraction = Abstraction::new(bound.clone(), body);
                prop_assert_eq!(abstraction.alpha_conversion(bound), Ok(abstraction.clone()));
            }

            #[test]
            fn test_alpha_conversion_fresh(body in terms(), bound in "[abx]") {
                let abstraction = Abstraction::new(bound, body);
                let converted = abstraction.alpha_conversion("fresh".to_string());
                prop_assert!(converted.is_ok());
                if let Ok(converted) = converted {
                    prop_assert_eq!(converted.free_variables(), abstraction.free_variables());
                }
            }

            #[test]
            fn test_walk_length(term in terms()) {
                let walk: Vec<_> = term.walk().collect();
                prop_assert_eq!(walk.len(), size(&term));
                prop_assert_eq!(walk.last(), Some(&term));
            }

            #[test]
            fn test_normal_form_has_no_redex(term in terms()) {
                let redex = term.walk().any(|subterm| match subterm {
                    Term::Application(application) => application.is_redex(),
                    _ => false,
                });
                prop_assert_eq!(term.is_beta_normal_form(), !redex);
            }
        }
    }
}
