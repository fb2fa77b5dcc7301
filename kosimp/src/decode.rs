//! Encoding and decoding of tactic invocations as terms.
//!
//! A simplifier invocation is encoded as
//! `tactic.simp_tac lemmas include exclude pre_tac location`, where
//!
//! * `lemmas` is a list `expr_list.cons l1 (... expr_list.nil)`,
//! * `include` and `exclude` are lists
//!   `tactic.identifier_list.cons (tactic.identifier c1) (... tactic.identifier_list.nil)`
//!   whose identifiers are constants,
//! * `pre_tac` is `option.some tactic t` or `option.none tactic`, and
//! * `location` is `tactic.expr l` with `l` one of
//!   `tactic.location.goal`, `tactic.location.hyps ids` or `tactic.location.everywhere`.

use crate::location::Location;
use crate::tactic::Tactic;
use crate::{Name, Term};
use std::fmt;

pub const SIMP_TAC: &str = "tactic.simp_tac";

const EXPR_LIST_CONS: &str = "expr_list.cons";
const EXPR_LIST_NIL: &str = "expr_list.nil";
const ID_LIST_CONS: &str = "tactic.identifier_list.cons";
const ID_LIST_NIL: &str = "tactic.identifier_list.nil";
const IDENTIFIER: &str = "tactic.identifier";
const OPTION_SOME: &str = "option.some";
const OPTION_NONE: &str = "option.none";
const TACTIC: &str = "tactic";
const TACTIC_EXPR: &str = "tactic.expr";
const LOCATION_GOAL: &str = "tactic.location.goal";
const LOCATION_HYPS: &str = "tactic.location.hyps";
const LOCATION_EVERYWHERE: &str = "tactic.location.everywhere";

/// Number of arguments of a simplifier invocation.
pub const SIMP_ARITY: usize = 5;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Error {
    /// invocation does not have the right number of arguments
    ArgumentCount,
    /// argument at the given position (starting from 1) is malformed
    ArgumentShape(usize),
    /// head of an invocation is not a registered tactic
    UnknownTactic(Name),
}

/// Decoded arguments of a simplifier invocation.
#[derive(Clone, Debug)]
pub struct SimpArgs {
    pub lemmas: Vec<Term>,
    pub include: Vec<Name>,
    pub exclude: Vec<Name>,
    pub pre_tac: Option<Tactic>,
    pub location: Location,
}

fn get_list<'a, T>(
    mut tm: &'a Term,
    cons: &str,
    nil: &str,
    elem: impl Fn(&'a Term) -> Option<T>,
) -> Option<Vec<T>> {
    let mut elems = Vec::new();
    loop {
        if let Some(args) = tm.get_const_app(cons, 2) {
            elems.push(elem(args[0])?);
            tm = args[1];
        } else {
            return tm.get_const_app(nil, 0).map(|_| elems);
        }
    }
}

/// Decode a list of terms.
pub fn get_expr_list(tm: &Term) -> Option<Vec<Term>> {
    get_list(tm, EXPR_LIST_CONS, EXPR_LIST_NIL, |e| Some(e.clone()))
}

/// Decode a list of identifiers.
pub fn get_identifier_list(tm: &Term) -> Option<Vec<Name>> {
    let ident = |e: &Term| e.get_const_app(IDENTIFIER, 1)?[0].get_const().cloned();
    get_list(tm, ID_LIST_CONS, ID_LIST_NIL, ident)
}

/// Decode `option.some tactic t` to `Some(Some(t))` and `option.none tactic` to `Some(None)`.
fn get_option(tm: &Term) -> Option<Option<&Term>> {
    if let Some(args) = tm.get_const_app(OPTION_SOME, 2) {
        Some(Some(args[1]))
    } else {
        tm.get_const_app(OPTION_NONE, 1).map(|_| None)
    }
}

pub fn get_location(tm: &Term) -> Option<Location> {
    let loc = tm.get_const_app(TACTIC_EXPR, 1)?[0];
    if loc.get_const_app(LOCATION_GOAL, 0).is_some() {
        Some(Location::WholeGoal)
    } else if loc.get_const_app(LOCATION_EVERYWHERE, 0).is_some() {
        Some(Location::Everywhere)
    } else {
        let ids = loc.get_const_app(LOCATION_HYPS, 1)?[0];
        get_identifier_list(ids).map(Location::Hypotheses)
    }
}

/// Decode the arguments of a simplifier invocation.
///
/// The pre-tactic is decoded with `to_tactic`, whose errors are returned unchanged.
/// Arguments are checked from first to last, and
/// the first malformed argument determines the error.
pub fn decode_simp_args<F>(tm: &Term, to_tactic: F) -> Result<SimpArgs, Error>
where
    F: Fn(&Term) -> Result<Tactic, Error>,
{
    let (_head, args) = tm.head_args();
    if args.len() != SIMP_ARITY {
        return Err(Error::ArgumentCount);
    }
    let lemmas = get_expr_list(args[0]).ok_or(Error::ArgumentShape(1))?;
    let include = get_identifier_list(args[1]).ok_or(Error::ArgumentShape(2))?;
    let exclude = get_identifier_list(args[2]).ok_or(Error::ArgumentShape(3))?;
    let pre_tac = match get_option(args[3]).ok_or(Error::ArgumentShape(4))? {
        Some(t) => Some(to_tactic(t)?),
        None => None,
    };
    let location = get_location(args[4]).ok_or(Error::ArgumentShape(5))?;
    Ok(SimpArgs {
        lemmas,
        include,
        exclude,
        pre_tac,
        location,
    })
}

pub fn mk_expr_list(elems: impl IntoIterator<Item = Term>) -> Term {
    let elems: Vec<_> = elems.into_iter().collect();
    let cons = Term::constant(EXPR_LIST_CONS);
    let nil = Term::constant(EXPR_LIST_NIL);
    elems
        .into_iter()
        .rev()
        .fold(nil, |acc, e| cons.clone().apps([e, acc]))
}

pub fn mk_identifier_list<'a>(names: impl IntoIterator<Item = &'a Name>) -> Term {
    let names: Vec<_> = names.into_iter().collect();
    let cons = Term::constant(ID_LIST_CONS);
    let nil = Term::constant(ID_LIST_NIL);
    names.into_iter().rev().fold(nil, |acc, n| {
        let id = Term::app(Term::constant(IDENTIFIER), Term::Const(n.clone()));
        cons.clone().apps([id, acc])
    })
}

pub fn mk_location_expr(loc: &Location) -> Term {
    let loc = match loc {
        Location::WholeGoal => Term::constant(LOCATION_GOAL),
        Location::Everywhere => Term::constant(LOCATION_EVERYWHERE),
        Location::Hypotheses(hs) => Term::app(Term::constant(LOCATION_HYPS), mk_identifier_list(hs)),
    };
    Term::app(Term::constant(TACTIC_EXPR), loc)
}

/// Encode a simplifier invocation.
///
/// ~~~
/// # use kosimp::{Location, Name, Term};
/// # use kosimp::decode::{decode_simp_args, mk_simp_tactic_expr, Error};
/// let lemmas = [Term::local("h")];
/// let exclude = [Name::new("add_comm")];
/// let tm = mk_simp_tactic_expr(lemmas.clone(), &[], &exclude, None, &Location::Everywhere);
/// let args = decode_simp_args(&tm, |_| Err(Error::ArgumentShape(4)))?;
/// assert_eq!(args.lemmas, lemmas);
/// assert!(args.include.is_empty() && args.pre_tac.is_none());
/// assert_eq!(args.exclude, exclude);
/// assert_eq!(args.location, Location::Everywhere);
/// # Ok::<_, Error>(())
/// ~~~
pub fn mk_simp_tactic_expr(
    lemmas: impl IntoIterator<Item = Term>,
    include: &[Name],
    exclude: &[Name],
    pre_tac: Option<Term>,
    loc: &Location,
) -> Term {
    let tactic = Term::constant(TACTIC);
    let pre_tac = match pre_tac {
        Some(t) => Term::constant(OPTION_SOME).apps([tactic, t]),
        None => Term::app(Term::constant(OPTION_NONE), tactic),
    };
    Term::constant(SIMP_TAC).apps([
        mk_expr_list(lemmas),
        mk_identifier_list(include),
        mk_identifier_list(exclude),
        pre_tac,
        mk_location_expr(loc),
    ])
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::ArgumentCount => write!(f, "invalid tactic, incorrect number of arguments"),
            Self::ArgumentShape(k) => write!(f, "invalid tactic, invalid argument #{}", k),
            Self::UnknownTactic(n) => write!(f, "unknown tactic {}", n),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_tactic(_: &Term) -> Result<Tactic, Error> {
        Err(Error::UnknownTactic(Name::new("none")))
    }

    fn args() -> [Term; 5] {
        [
            mk_expr_list([Term::local("h")]),
            mk_identifier_list([]),
            mk_identifier_list([]),
            Term::app(Term::constant(OPTION_NONE), Term::constant(TACTIC)),
            mk_location_expr(&Location::WholeGoal),
        ]
    }

    #[test]
    fn shape_errors_are_positional() {
        let garbage = Term::constant("garbage");
        for k in 0..SIMP_ARITY {
            let mut a = args();
            a[k] = garbage.clone();
            let tm = Term::constant(SIMP_TAC).apps(a);
            let err = decode_simp_args(&tm, no_tactic).unwrap_err();
            assert_eq!(err, Error::ArgumentShape(k + 1));
        }
    }

    #[test]
    fn first_error_wins() {
        let garbage = Term::constant("garbage");
        let mut a = args();
        a[1] = garbage.clone();
        a[3] = garbage;
        let tm = Term::constant(SIMP_TAC).apps(a);
        assert_eq!(decode_simp_args(&tm, no_tactic).unwrap_err(), Error::ArgumentShape(2));
    }

    #[test]
    fn arity() {
        let [a1, a2, a3, a4, _] = args();
        let tm = Term::constant(SIMP_TAC).apps([a1, a2, a3, a4]);
        assert_eq!(decode_simp_args(&tm, no_tactic).unwrap_err(), Error::ArgumentCount);
    }

    #[test]
    fn hypotheses() {
        let hs = Vec::from([Name::new("h1"), Name::new("h2")]);
        let loc = Location::Hypotheses(hs);
        assert_eq!(get_location(&mk_location_expr(&loc)), Some(loc));
    }

    #[test]
    fn identifier_must_be_constant() {
        let cons = Term::constant(ID_LIST_CONS);
        let id = Term::app(Term::constant(IDENTIFIER), Term::local("x"));
        let tm = cons.apps([id, Term::constant(ID_LIST_NIL)]);
        assert_eq!(get_identifier_list(&tm), None);
    }

    #[test]
    fn inner_tactic_error_propagates() {
        let mut a = args();
        a[3] = Term::constant(OPTION_SOME).apps([Term::constant(TACTIC), Term::constant("t")]);
        let tm = Term::constant(SIMP_TAC).apps(a);
        let err = decode_simp_args(&tm, no_tactic).unwrap_err();
        assert_eq!(err, Error::UnknownTactic(Name::new("none")));
    }
}
