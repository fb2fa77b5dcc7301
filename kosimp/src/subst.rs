//! Substitution, shifting and abstraction for terms.
//!
//! All operations here are total.
//! The argument `k` of the traversal functions is
//! the number of binders passed on the way to the current subterm.

use crate::{Comb, MetaId, Name, RTerm, Stack, Term};

impl RTerm {
    /// Replace the subterms of the term, sharing the unchanged parts.
    pub fn replace<F>(self, f: &F, k: usize) -> Self
    where
        F: Fn(&Term, usize) -> Option<Term>,
    {
        let sub = |tm: Term| tm.replace(f, k);
        match &*self {
            Comb::Appl(g, a) => {
                let g2 = sub(g.clone());
                let a2 = sub(a.clone());
                if !g.ptr_eq(&g2) || !a.ptr_eq(&a2) {
                    return Comb::Appl(g2, a2).into();
                }
            }
            Comb::Bind(b, arg, body) => {
                let arg2 = arg.clone().map_ty(sub);
                let body2 = body.clone().replace(f, k + 1);
                if !arg.ty.ptr_eq(&arg2.ty) || !body.ptr_eq(&body2) {
                    return Comb::Bind(*b, arg2, body2).into();
                }
            }
        };
        self
    }
}

impl Term {
    /// Replace every subterm for which `f` yields a term.
    ///
    /// Subterms of replaced terms are not visited.
    pub fn replace<F>(self, f: &F, k: usize) -> Self
    where
        F: Fn(&Term, usize) -> Option<Term>,
    {
        if let Some(tm) = f(&self, k) {
            return tm;
        }
        match self {
            Self::Comb(c) => Self::Comb(c.replace(f, k)),
            _ => self,
        }
    }

    /// Return true if `f` holds for some subterm.
    pub fn any<F>(&self, f: &F, k: usize) -> bool
    where
        F: Fn(&Term, usize) -> bool,
    {
        f(self, k)
            || match self {
                Self::Comb(c) => match &**c {
                    Comb::Appl(g, a) => g.any(f, k) || a.any(f, k),
                    Comb::Bind(_, arg, body) => arg.ty.any(f, k) || body.any(f, k + 1),
                },
                _ => false,
            }
    }

    pub fn apply_subst<S>(self, subst: &S, k: usize) -> Self
    where
        S: Fn(usize, usize) -> Term,
    {
        self.replace(
            &|tm, k| match tm {
                Self::BVar(n) if *n >= k => Some(subst(*n, k)),
                _ => None,
            },
            k,
        )
    }

    /// Substitute `u` for the loose variable 0, lowering all other loose variables.
    ///
    /// ~~~
    /// # use kosimp::Term;
    /// let (a, f) = (Term::constant("a"), Term::constant("f"));
    /// let body = Term::app(f.clone(), Term::BVar(0));
    /// assert_eq!(body.subst(&a), Term::app(f, a));
    /// ~~~
    pub fn subst(self, u: &Term) -> Self {
        self.apply_subst(&u.psubst_single(), 0)
    }

    fn psubst_single<'t>(&'t self) -> impl Fn(usize, usize) -> Term + 't {
        move |n: usize, k: usize| {
            if n == k {
                self.clone() << k
            } else {
                Term::BVar(n - 1)
            }
        }
    }

    /// Substitute the loose variable `i` by the `i`th element of the stack.
    pub fn psubst(self, args: &Stack<Term>) -> Self {
        if args.is_empty() {
            self
        } else {
            self.apply_subst(&psubst(args), 0)
        }
    }

    /// Lower all loose variables by `n`.
    ///
    /// The term must not contain loose variables smaller than `n`.
    pub fn unshift(self, n: usize) -> Self {
        if n == 0 {
            self
        } else {
            self.apply_subst(&|m, _k| Term::BVar(m - n), 0)
        }
    }

    /// Replace the local `x` by the loose variable 0, lifting all other loose variables.
    ///
    /// This is the inverse of `subst(&Term::Local(x))`
    /// if `x` does not occur in the original term.
    pub fn abstract_local(self, x: &Name) -> Self {
        self.abstract_locals(std::slice::from_ref(x))
    }

    /// Replace the locals `xs` by loose variables, lifting all other loose variables.
    ///
    /// The last local becomes the loose variable 0.
    pub fn abstract_locals(self, xs: &[Name]) -> Self {
        let n = xs.len();
        if n == 0 {
            return self;
        }
        self.replace(
            &|tm, k| match tm {
                Self::Local(y) => xs.iter().rposition(|x| x == y).map(|i| Self::BVar(k + n - 1 - i)),
                Self::BVar(m) if *m >= k => Some(Self::BVar(m + n)),
                _ => None,
            },
            0,
        )
    }

    fn any_loose(&self, f: &impl Fn(usize) -> bool) -> bool {
        self.any(&|tm, k| matches!(tm, Self::BVar(n) if *n >= k && f(n - k)), 0)
    }

    /// Return true if the loose variable `i` occurs in the term.
    pub fn has_loose_bvar(&self, i: usize) -> bool {
        self.any_loose(&|n| n == i)
    }

    /// Return true if some loose variable smaller than `n` occurs in the term.
    pub fn has_loose_bvars_below(&self, n: usize) -> bool {
        self.any_loose(&|m| m < n)
    }

    /// Return true if the term contains no loose variables.
    pub fn is_closed(&self) -> bool {
        !self.any_loose(&|_| true)
    }

    pub fn has_local(&self, x: &Name) -> bool {
        self.any(&|tm, _| matches!(tm, Self::Local(y) if y == x), 0)
    }

    pub fn has_meta(&self) -> bool {
        self.any(&|tm, _| matches!(tm, Self::Meta(_)), 0)
    }

    pub fn has_meta_id(&self, m: &MetaId) -> bool {
        self.any(&|tm, _| matches!(tm, Self::Meta(n) if n == m), 0)
    }
}

fn psubst(args: &Stack<Term>) -> impl Fn(usize, usize) -> Term + '_ {
    move |n: usize, k: usize| match args.get(n - k) {
        Some(arg) => arg.clone() << k,
        None => Term::BVar(n - args.len()),
    }
}

/// Definition of `<<` for terms, lifting all loose variables.
#[allow(clippy::suspicious_arithmetic_impl)]
impl std::ops::Shl<usize> for Term {
    type Output = Self;

    fn shl(self, rhs: usize) -> Self::Output {
        if rhs == 0 {
            self
        } else {
            self.apply_subst(&|n, _k| Term::BVar(n + rhs), 0)
        }
    }
}
