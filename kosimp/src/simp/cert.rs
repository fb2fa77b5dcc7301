//! Certificates justifying the rewrites of the simplifier.

use super::rule::Relation;
use crate::constants::*;
use crate::{Binder, Name, Term};
use std::rc::Rc;
use std::fmt;

/// Built-in reduction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Reduction {
    Beta,
    Eta,
    /// reduction of a `let`
    Zeta,
    Iota,
}

impl Reduction {
    pub fn name(self) -> Name {
        Name::new(match self {
            Self::Beta => "beta",
            Self::Eta => "eta",
            Self::Zeta => "zeta",
            Self::Iota => "iota",
        })
    }
}

/// Proof that a term `lhs` equals some term `rhs`.
///
/// Subterms that are left unchanged have no certificate,
/// which is why certificates of subterms are optional.
#[derive(Clone, Debug)]
pub enum Certificate {
    /// `lhs` reduces to `rhs`
    Defeq { kind: Reduction, lhs: Term },
    /// instance of a lemma
    Lemma { relation: Relation, proof: Term },
    Trans(Rc<Self>, Rc<Self>),
    /// `f a = g b`
    Congr {
        f: Term,
        a: Term,
        cf: Option<Rc<Self>>,
        ca: Option<Rc<Self>>,
    },
    /// `(b x : ty. body) = (b x : ty'. body')`, where
    /// `body` refers to the bound variable by the local `x`
    Bind {
        binder: Binder,
        x: Name,
        ty: Term,
        body: Term,
        cty: Option<Rc<Self>>,
        cbody: Option<Rc<Self>>,
    },
}

/// Compose two optional certificates.
pub fn trans(c1: Option<Rc<Certificate>>, c2: Option<Rc<Certificate>>) -> Option<Rc<Certificate>> {
    match (c1, c2) {
        (None, c) | (c, None) => c,
        (Some(c1), Some(c2)) => Some(Rc::new(Certificate::Trans(c1, c2))),
    }
}

fn refl(tm: Term) -> Term {
    Term::app(Term::constant(EQ_REFL), tm)
}

fn to_term_or_refl(c: &Option<Rc<Certificate>>, tm: &Term) -> Term {
    match c {
        Some(c) => c.to_term(),
        None => refl(tm.clone()),
    }
}

impl Certificate {
    /// Render the certificate as proof term of the equality.
    ///
    /// ~~~
    /// # use kosimp::Term;
    /// # use kosimp::simp::{Certificate, Relation};
    /// # use std::rc::Rc;
    /// let (f, a, h) = (Term::constant("f"), Term::constant("a"), Term::local("h"));
    /// let ca = Certificate::Lemma { relation: Relation::Eq, proof: h.clone() };
    /// let c = Certificate::Congr { f: f.clone(), a, cf: None, ca: Some(Rc::new(ca)) };
    /// let expected = Term::constant("congr_arg").apps([f, h]);
    /// assert_eq!(c.to_term(), expected);
    /// ~~~
    pub fn to_term(&self) -> Term {
        match self {
            Self::Defeq { lhs, .. } => refl(lhs.clone()),
            Self::Lemma { relation, proof } => match relation {
                Relation::Eq => proof.clone(),
                Relation::Iff => Term::app(Term::constant(PROPEXT), proof.clone()),
            },
            Self::Trans(c1, c2) => Term::constant(EQ_TRANS).apps([c1.to_term(), c2.to_term()]),
            Self::Congr { f, a, cf, ca } => match (cf, ca) {
                (Some(cf), Some(ca)) => Term::constant(CONGR).apps([cf.to_term(), ca.to_term()]),
                (Some(cf), None) => Term::constant(CONGR_FUN).apps([cf.to_term(), a.clone()]),
                (None, Some(ca)) => Term::constant(CONGR_ARG).apps([f.clone(), ca.to_term()]),
                (None, None) => refl(Term::app(f.clone(), a.clone())),
            },
            Self::Bind {
                binder,
                x,
                ty,
                body,
                cty,
                cbody,
            } => {
                let c = match binder {
                    Binder::Lambda => LAMBDA_CONGR,
                    Binder::Pi => PI_CONGR,
                    Binder::Let => LET_CONGR,
                };
                let pty = to_term_or_refl(cty, ty);
                let pbody = to_term_or_refl(cbody, body).abstract_local(x);
                let pbody = Term::lambda(x.clone(), ty.clone(), pbody);
                Term::constant(c).apps([pty, pbody])
            }
        }
    }
}

impl fmt::Display for Certificate {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.to_term().fmt(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lemma(h: &str) -> Option<Rc<Certificate>> {
        let proof = Term::local(h);
        Some(Rc::new(Certificate::Lemma {
            relation: Relation::Eq,
            proof,
        }))
    }

    #[test]
    fn trans_elides_refl() {
        assert!(trans(None, None).is_none());
        let c = trans(lemma("h"), None).unwrap();
        assert_eq!(c.to_term(), Term::local("h"));
        let c = trans(lemma("h1"), lemma("h2")).unwrap();
        let expected = Term::constant(EQ_TRANS).apps([Term::local("h1"), Term::local("h2")]);
        assert_eq!(c.to_term(), expected);
    }

    #[test]
    fn iff_uses_propext() {
        let c = Certificate::Lemma {
            relation: Relation::Iff,
            proof: Term::local("h"),
        };
        assert_eq!(c.to_term(), Term::app(Term::constant(PROPEXT), Term::local("h")));
    }

    #[test]
    fn binder_body_is_abstracted() {
        let x = Name::new("x");
        let ty = Term::constant("A");
        let h = Term::app(Term::local("h"), Term::local("x"));
        let cbody = Some(Rc::new(Certificate::Lemma {
            relation: Relation::Eq,
            proof: h,
        }));
        let body = Term::app(Term::constant("f"), Term::local("x"));
        let c = Certificate::Bind {
            binder: Binder::Lambda,
            x,
            ty: ty.clone(),
            body,
            cty: None,
            cbody,
        };
        let pbody = Term::lambda("x", ty.clone(), Term::app(Term::local("h"), Term::BVar(0)));
        let expected = Term::constant(LAMBDA_CONGR).apps([refl(ty), pbody]);
        assert_eq!(c.to_term(), expected);
    }
}
