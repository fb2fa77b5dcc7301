//! Assignments of metavariables.

use crate::{MetaId, Name, Term};
use std::fmt;
use std::rc::Rc;

type FnvHashMap<K, V> = im::hashmap::HashMap<K, V, fnv::FnvBuildHasher>;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Error {
    /// metavariable is already assigned
    AlreadyAssigned(MetaId),
    /// metavariable occurs in its own assignment
    Cyclic(MetaId),
}

/// Persistent map from metavariables to terms.
///
/// Assignments are never overwritten, and
/// no metavariable occurs in its own (instantiated) assignment.
///
/// Besides assignments, a substitution holds delayed abstractions:
/// a metavariable `?d` delayed to `?m` over locals `x1 ... xn`
/// stands for the assignment of `?m` with `x1 ... xn` abstracted,
/// once `?m` is assigned.
/// This lets a proof bind locals that occur in the proof of another goal.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Substitution {
    assigned: FnvHashMap<MetaId, Term>,
    delayed: FnvHashMap<MetaId, Delayed>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
struct Delayed {
    locals: Rc<[Name]>,
    meta: MetaId,
}

impl Substitution {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, m: &MetaId) -> Option<&Term> {
        self.assigned.get(m)
    }

    pub fn is_assigned(&self, m: &MetaId) -> bool {
        self.assigned.contains_key(m)
    }

    /// Number of assigned metavariables.
    pub fn len(&self) -> usize {
        self.assigned.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assigned.is_empty() && self.delayed.is_empty()
    }

    fn is_taken(&self, m: &MetaId) -> bool {
        self.is_assigned(m) || self.delayed.contains_key(m)
    }

    /// Return true if `m` occurs in the term, possibly through a delayed abstraction.
    fn mentions(&self, tm: &Term, m: &MetaId) -> bool {
        tm.any(
            &|t, _| match t {
                Term::Meta(n) => n == m || self.delayed.get(n).map_or(false, |d| &d.meta == m),
                _ => false,
            },
            0,
        )
    }

    /// Return a substitution extended by the assignment of `tm` to `m`.
    ///
    /// ~~~
    /// # use kosimp::{Name, Substitution, Term};
    /// # use kosimp::metavars::Error;
    /// let m = Name::new("m");
    /// let f = Term::constant("f");
    /// let s = Substitution::new().assign(m.clone(), f.clone())?;
    /// assert_eq!(s.get(&m), Some(&f));
    /// assert_eq!(s.assign(m.clone(), f), Err(Error::AlreadyAssigned(m.clone())));
    ///
    /// let cyclic = Term::app(Term::constant("g"), Term::Meta(m.clone()));
    /// assert_eq!(Substitution::new().assign(m.clone(), cyclic), Err(Error::Cyclic(m)));
    /// # Ok::<_, Error>(())
    /// ~~~
    pub fn assign(&self, m: MetaId, tm: Term) -> Result<Self, Error> {
        if self.is_taken(&m) {
            return Err(Error::AlreadyAssigned(m));
        }
        let tm = self.instantiate(tm);
        if self.mentions(&tm, &m) {
            return Err(Error::Cyclic(m));
        }
        Ok(Self {
            assigned: self.assigned.update(m, tm),
            ..self.clone()
        })
    }

    /// Return a substitution where `d` stands for
    /// the assignment of `m` with the locals `xs` abstracted.
    ///
    /// The last local of `xs` becomes the loose variable 0,
    /// so `?d` should occur directly under binders for `xs`.
    ///
    /// ~~~
    /// # use kosimp::{Binder, Name, Substitution, Term};
    /// # use kosimp::metavars::Error;
    /// let (d, m, x) = (Name::new("d"), Name::new("m"), Name::new("x"));
    /// let a = Term::constant("A");
    /// let lam = Term::lambda("x", a.clone(), Term::Meta(d.clone()));
    /// let s = Substitution::new().delay_abstraction(d, Vec::from([x]), m.clone())?;
    /// assert_eq!(s.instantiate(lam.clone()), lam);
    ///
    /// let f = Term::constant("f");
    /// let s = s.assign(m, Term::app(f.clone(), Term::local("x")))?;
    /// let expected = Term::lambda("x", a, Term::app(f, Term::BVar(0)));
    /// assert_eq!(s.instantiate(lam), expected);
    /// # Ok::<_, Error>(())
    /// ~~~
    pub fn delay_abstraction(&self, d: MetaId, xs: Vec<Name>, m: MetaId) -> Result<Self, Error> {
        if self.is_taken(&d) {
            return Err(Error::AlreadyAssigned(d));
        }
        if d == m || self.mentions(&self.instantiate(Term::Meta(m.clone())), &d) {
            return Err(Error::Cyclic(d));
        }
        let delayed = Delayed {
            locals: xs.into(),
            meta: m,
        };
        Ok(Self {
            delayed: self.delayed.update(d, delayed),
            ..self.clone()
        })
    }

    /// Replace all assigned metavariables in the term by their assignments.
    ///
    /// A delayed abstraction is replaced once its metavariable is assigned.
    pub fn instantiate(&self, tm: Term) -> Term {
        if self.is_empty() {
            return tm;
        }
        tm.replace(
            &|t, _k| match t {
                Term::Meta(m) => match self.get(m) {
                    Some(v) => Some(self.instantiate(v.clone())),
                    None => self.instantiate_delayed(m),
                },
                _ => None,
            },
            0,
        )
    }

    fn instantiate_delayed(&self, d: &MetaId) -> Option<Term> {
        let delayed = self.delayed.get(d)?;
        let v = self.get(&delayed.meta)?;
        Some(self.instantiate(v.clone()).abstract_locals(&delayed.locals))
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::AlreadyAssigned(m) => write!(f, "metavariable ?{} is already assigned", m),
            Self::Cyclic(m) => write!(f, "metavariable ?{} occurs in its assignment", m),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Name;

    #[test]
    fn instantiate_transitively() {
        let (m1, m2) = (Name::new("m1"), Name::new("m2"));
        let f = Term::constant("f");
        let s = Substitution::new()
            .assign(m1.clone(), Term::app(f.clone(), Term::Meta(m2.clone())))
            .unwrap()
            .assign(m2.clone(), Term::constant("a"))
            .unwrap();
        let tm = Term::Meta(m1);
        assert_eq!(s.instantiate(tm), Term::app(f, Term::constant("a")));
    }

    #[test]
    fn indirect_cycle() {
        let (m1, m2) = (Name::new("m1"), Name::new("m2"));
        let s = Substitution::new()
            .assign(m1.clone(), Term::Meta(m2.clone()))
            .unwrap();
        assert_eq!(s.assign(m2.clone(), Term::Meta(m1)), Err(Error::Cyclic(m2)));
    }

    #[test]
    fn delayed_cycle() {
        let (d, m) = (Name::new("d"), Name::new("m"));
        let s = Substitution::new().delay_abstraction(d.clone(), Vec::new(), m.clone()).unwrap();
        assert_eq!(s.assign(m.clone(), Term::Meta(d.clone())), Err(Error::Cyclic(m)));
        assert_eq!(s.assign(d.clone(), Term::constant("a")), Err(Error::AlreadyAssigned(d)));
        assert!(!s.is_empty());
        assert_eq!(s.len(), 0);
    }

    #[test]
    fn delayed_under_two_binders() {
        // λ x : A. λ y : A. ?d, where ?d abstracts x and y from ?m := g x y
        let (d, m) = (Name::new("d"), Name::new("m"));
        let (a, g) = (Term::constant("A"), Term::constant("g"));
        let xs = Vec::from([Name::new("x"), Name::new("y")]);
        let tm = Term::lambda("x", a.clone(), Term::lambda("y", a.clone(), Term::Meta(d.clone())));
        let s = Substitution::new()
            .delay_abstraction(d, xs, m.clone())
            .unwrap()
            .assign(m, g.clone().apps([Term::local("x"), Term::local("y")]))
            .unwrap();
        let body = g.apps([Term::BVar(1), Term::BVar(0)]);
        assert_eq!(s.instantiate(tm), Term::lambda("x", a.clone(), Term::lambda("y", a, body)));
    }
}
