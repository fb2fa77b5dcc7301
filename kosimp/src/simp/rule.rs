//! Rewrite rules obtained from lemmas.

use crate::term::Arg;
use crate::{Binder, Error, Name, Term};
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Relation {
    Eq,
    Iff,
}

/// Where a rule comes from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Origin {
    /// lemma given to the simplifier
    Lemma,
    /// simplification lemma of the environment
    Global,
    /// hypothesis of the goal
    Assumption,
}

/// Rewrite rule `lhs ⟶ rhs`, obtained from a proof of type
/// `Π (x1 : A1) ... (xn : An). lhs = rhs` (or `lhs ↔ rhs`).
///
/// The variables `x1, ..., xn` are the pattern variables of the rule.
/// In `lhs` and `rhs`, the variable `xi` is referred to by `BVar(n - i)`.
/// Pattern variables that do not occur in `lhs` are side conditions,
/// which have to be proved separately when applying the rule.
#[derive(Clone, Debug)]
pub struct Rule {
    pub name: Option<Name>,
    pub origin: Origin,
    pub ctx: Vec<Arg<Name, Term>>,
    pub lhs: Term,
    pub rhs: Term,
    pub relation: Relation,
    pub proof: Term,
}

impl Rule {
    /// Construct a rule from a proof and its type.
    ///
    /// ~~~
    /// # use kosimp::{Name, Term};
    /// # use kosimp::simp::{Origin, Rule};
    /// // h : Π x : A. f x = x
    /// let (f, ty) = (Term::constant("f"), Term::constant("A"));
    /// let eq = Term::mk_eq(ty.clone(), Term::app(f.clone(), Term::BVar(0)), Term::BVar(0));
    /// let rule = Rule::new(Some(Name::new("h")), Origin::Lemma, Term::local("h"), Term::pi("x", ty, eq))?;
    /// assert_eq!(rule.ctx.len(), 1);
    /// assert_eq!(rule.lhs, Term::app(f, Term::BVar(0)));
    /// assert_eq!(rule.side_conditions().count(), 0);
    /// # Ok::<_, kosimp::Error>(())
    /// ~~~
    pub fn new(name: Option<Name>, origin: Origin, proof: Term, ty: Term) -> Result<Self, Error> {
        let invalid = || Error::InvalidLemma(ty.clone());
        let mut ctx = Vec::new();
        let mut concl = &ty;
        while let Some((Binder::Pi, arg, body)) = concl.get_bind() {
            ctx.push(arg.clone());
            concl = body;
        }
        let (lhs, rhs, relation) = if let Some((_ty, l, r)) = concl.get_eq() {
            (l, r, Relation::Eq)
        } else {
            let (l, r) = concl.get_iff().ok_or_else(invalid)?;
            (l, r, Relation::Iff)
        };
        // a rule whose left-hand side is a pattern variable would match every term
        if matches!(lhs, Term::BVar(_)) {
            return Err(invalid());
        }
        Ok(Self {
            name,
            origin,
            lhs: lhs.clone(),
            rhs: rhs.clone(),
            ctx,
            relation,
            proof,
        })
    }

    /// Return true if the pattern variable `i` occurs in the left-hand side.
    pub fn in_lhs(&self, i: usize) -> bool {
        self.lhs.has_loose_bvar(self.ctx.len() - 1 - i)
    }

    /// Indices of the pattern variables that do not occur in the left-hand side.
    pub fn side_conditions(&self) -> impl Iterator<Item = usize> + '_ {
        (0..self.ctx.len()).filter(|i| !self.in_lhs(*i))
    }

    /// Return true if the proof of the rule is built from the local `x`.
    pub fn is_from_local(&self, x: &Name) -> bool {
        matches!(self.proof.head_args().0, Term::Local(y) if y == x)
    }

    /// Name of the rule, shown in traces.
    pub fn display_name(&self) -> Name {
        match &self.name {
            Some(n) => n.clone(),
            None => Name::from(format!("{}", self.proof)),
        }
    }
}

/// Restriction of the named rules that may be used.
///
/// A rule is allowed if its name is not excluded, and
/// if no names are included or the rule name is included.
/// Rules without a name are always allowed.
#[derive(Clone, Debug, Default)]
pub struct NameFilter {
    pub include: Vec<Name>,
    pub exclude: Vec<Name>,
}

impl NameFilter {
    pub fn new(include: Vec<Name>, exclude: Vec<Name>) -> Self {
        Self { include, exclude }
    }

    pub fn allows(&self, name: Option<&Name>) -> bool {
        match name {
            None => true,
            Some(n) => {
                !self.exclude.contains(n) && (self.include.is_empty() || self.include.contains(n))
            }
        }
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let rel = match self.relation {
            Relation::Eq => "=",
            Relation::Iff => "↔",
        };
        write!(f, "{}: {} {} {}", self.display_name(), self.lhs, rel, self.rhs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reject_variable_lhs() {
        // Π x : A. x = c
        let ty = Term::pi(
            "x",
            Term::constant("A"),
            Term::mk_eq(Term::constant("A"), Term::BVar(0), Term::constant("c")),
        );
        let r = Rule::new(None, Origin::Lemma, Term::local("h"), ty.clone());
        assert!(matches!(r, Err(Error::InvalidLemma(t)) if t == ty));
    }

    #[test]
    fn reject_non_equation() {
        let r = Rule::new(None, Origin::Lemma, Term::local("h"), Term::constant("P"));
        assert!(r.is_err());
    }

    #[test]
    fn conditional() {
        // Π (x : A) (h : p x). f x ↔ g x
        let (f, g, p) = (Term::constant("f"), Term::constant("g"), Term::constant("p"));
        let concl = Term::mk_iff(Term::app(f, Term::BVar(1)), Term::app(g, Term::BVar(1)));
        let ty = Term::pi(
            "x",
            Term::constant("A"),
            Term::pi("h", Term::app(p, Term::BVar(0)), concl),
        );
        let rule = Rule::new(None, Origin::Global, Term::constant("thm"), ty).unwrap();
        assert_eq!(rule.relation, Relation::Iff);
        assert!(rule.in_lhs(0));
        assert_eq!(rule.side_conditions().collect::<Vec<_>>(), [1]);
        assert!(!rule.is_from_local(&Name::new("thm")));
    }

    #[test]
    fn from_local() {
        // h a : f a = a
        let (f, a) = (Term::constant("f"), Term::constant("a"));
        let ty = Term::mk_eq(Term::constant("A"), Term::app(f, a.clone()), a.clone());
        let proof = Term::app(Term::local("h"), a);
        let rule = Rule::new(None, Origin::Lemma, proof, ty).unwrap();
        assert!(rule.is_from_local(&Name::new("h")));
        assert!(!rule.is_from_local(&Name::new("h2")));
    }

    #[test]
    fn filter() {
        let (a, b) = (Name::new("a"), Name::new("b"));
        let none = NameFilter::default();
        assert!(none.allows(Some(&a)) && none.allows(None));
        let only_a = NameFilter::new(Vec::from([a.clone()]), Vec::new());
        assert!(only_a.allows(Some(&a)) && !only_a.allows(Some(&b)));
        let not_a = NameFilter::new(Vec::new(), Vec::from([a.clone()]));
        assert!(!not_a.allows(Some(&a)) && not_a.allows(Some(&b)));
    }
}
