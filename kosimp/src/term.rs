//! Terms with de Bruijn indices, metavariables and local constants.

use crate::constants::{EQ, IFF};
use crate::{Name, RTerm};
use std::fmt::{self, Display};

/// De Bruijn variable.
pub type DeBruijn = usize;

/// Identifier of a metavariable.
pub type MetaId = Name;

/// Argument of a binder.
/// For example, the `x` and `A` in the term `λ x : A. t`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Arg<Id, Ty> {
    pub id: Id,
    pub ty: Ty,
}

impl<Id, Ty> Arg<Id, Ty> {
    pub fn map_ty<F, U>(self, f: F) -> Arg<Id, U>
    where
        F: FnOnce(Ty) -> U,
    {
        let ty = f(self.ty);
        Arg { id: self.id, ty }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Binder {
    Lambda,
    Pi,
    /// `let x : A := v; b` is encoded as `(let x : A. b) v`
    Let,
}

/// Combinator term.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Comb<Id, Tm> {
    Appl(Tm, Tm),
    Bind(Binder, Arg<Id, Tm>, Tm),
}

pub type TermC = Comb<Name, Term>;

/// Term.
///
/// Leaves are stored inline, whereas combinators are shared.
/// Terms that are structurally equal are equal and have the same hash,
/// regardless of sharing.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Term {
    /// global constant declared in the environment
    Const(Name),
    /// local constant declared in the context of a goal
    Local(Name),
    BVar(DeBruijn),
    Meta(MetaId),
    Comb(RTerm),
}

impl Term {
    pub fn constant(name: impl Into<Name>) -> Self {
        Self::Const(name.into())
    }

    pub fn local(name: impl Into<Name>) -> Self {
        Self::Local(name.into())
    }

    pub fn app(f: Self, a: Self) -> Self {
        Self::Comb(RTerm::new(Comb::Appl(f, a)))
    }

    /// Apply a sequence of arguments to the term, from left to right.
    pub fn apps(self, args: impl IntoIterator<Item = Self>) -> Self {
        args.into_iter().fold(self, Self::app)
    }

    /// Construct a binder, where `body` refers to the bound variable by `BVar(0)`.
    pub fn bind(binder: Binder, id: impl Into<Name>, ty: Self, body: Self) -> Self {
        let arg = Arg { id: id.into(), ty };
        Self::Comb(RTerm::new(Comb::Bind(binder, arg, body)))
    }

    pub fn lambda(id: impl Into<Name>, ty: Self, body: Self) -> Self {
        Self::bind(Binder::Lambda, id, ty, body)
    }

    pub fn pi(id: impl Into<Name>, ty: Self, body: Self) -> Self {
        Self::bind(Binder::Pi, id, ty, body)
    }

    /// `eq ty lhs rhs`
    pub fn mk_eq(ty: Self, lhs: Self, rhs: Self) -> Self {
        Self::constant(EQ).apps([ty, lhs, rhs])
    }

    /// `iff lhs rhs`
    pub fn mk_iff(lhs: Self, rhs: Self) -> Self {
        Self::constant(IFF).apps([lhs, rhs])
    }

    pub fn get_appl(&self) -> Option<(&Self, &Self)> {
        match self {
            Self::Comb(c) => match &**c {
                Comb::Appl(f, a) => Some((f, a)),
                _ => None,
            },
            _ => None,
        }
    }

    pub fn get_bind(&self) -> Option<(Binder, &Arg<Name, Self>, &Self)> {
        match self {
            Self::Comb(c) => match &**c {
                Comb::Bind(b, arg, body) => Some((*b, arg, body)),
                _ => None,
            },
            _ => None,
        }
    }

    /// Split an application `f a1 ... an` into `f` and `[a1, ..., an]`.
    pub fn head_args(&self) -> (&Self, Vec<&Self>) {
        let mut args = Vec::new();
        let mut head = self;
        while let Some((f, a)) = head.get_appl() {
            args.push(a);
            head = f;
        }
        args.reverse();
        (head, args)
    }

    pub fn get_const(&self) -> Option<&Name> {
        match self {
            Self::Const(c) => Some(c),
            _ => None,
        }
    }

    /// If the term is an application of the constant `name` to `n` arguments,
    /// return the arguments.
    pub fn get_const_app(&self, name: &str, n: usize) -> Option<Vec<&Self>> {
        let (head, args) = self.head_args();
        let c = head.get_const()?;
        (c.as_str() == name && args.len() == n).then_some(args)
    }

    /// For `eq A l r`, return `(A, l, r)`.
    pub fn get_eq(&self) -> Option<(&Self, &Self, &Self)> {
        let args = self.get_const_app(EQ, 3)?;
        Some((args[0], args[1], args[2]))
    }

    /// For `iff l r`, return `(l, r)`.
    pub fn get_iff(&self) -> Option<(&Self, &Self)> {
        let args = self.get_const_app(IFF, 2)?;
        Some((args[0], args[1]))
    }

    /// Compare the memory addresses of two terms.
    ///
    /// This is used to detect cheaply that a term was left unchanged.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Const(c1), Self::Const(c2)) => c1 == c2,
            (Self::Local(l1), Self::Local(l2)) => l1 == l2,
            (Self::BVar(v1), Self::BVar(v2)) => v1 == v2,
            (Self::Meta(m1), Self::Meta(m2)) => m1 == m2,
            (Self::Comb(c1), Self::Comb(c2)) => RTerm::ptr_eq(c1, c2),
            _ => false,
        }
    }
}

impl Display for Binder {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Lambda => write!(f, "λ"),
            Self::Pi => write!(f, "Π"),
            Self::Let => write!(f, "let"),
        }
    }
}

impl<Id: Display, Tm: Display> Display for Comb<Id, Tm> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Appl(head, arg) => write!(f, "({} {})", head, arg),
            Self::Bind(b, Arg { id, ty }, tm) => write!(f, "({} {} : {}. {})", b, id, ty, tm),
        }
    }
}

impl Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Const(c) | Self::Local(c) => c.fmt(f),
            Self::BVar(x) => write!(f, "β{}", x),
            Self::Meta(m) => write!(f, "?{}", m),
            Self::Comb(c) if matches!(**c, Comb::Appl(..)) => {
                let (head, args) = self.head_args();
                write!(f, "({}", head)?;
                for a in args {
                    write!(f, " {}", a)?;
                }
                write!(f, ")")
            }
            Self::Comb(c) => c.fmt(f),
        }
    }
}
