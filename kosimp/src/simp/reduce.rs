//! Built-in reductions at the root of a term.

use super::cert::Reduction;
use crate::{Binder, Environment, Term};

/// Reduce `(λ x : A. b) a` to `b[a/x]` and `(let x : A. b) v` to `b[v/x]`.
///
/// ~~~
/// # use kosimp::Term;
/// # use kosimp::simp::{reduce::beta, Reduction};
/// let (f, a) = (Term::constant("f"), Term::constant("a"));
/// let lam = Term::lambda("x", Term::constant("A"), Term::app(f.clone(), Term::BVar(0)));
/// let (kind, tm) = beta(&Term::app(lam, a.clone())).unwrap();
/// assert_eq!(kind, Reduction::Beta);
/// assert_eq!(tm, Term::app(f, a));
/// ~~~
pub fn beta(tm: &Term) -> Option<(Reduction, Term)> {
    let (f, a) = tm.get_appl()?;
    let (b, _arg, body) = f.get_bind()?;
    let kind = match b {
        Binder::Lambda => Reduction::Beta,
        Binder::Let => Reduction::Zeta,
        Binder::Pi => return None,
    };
    Some((kind, body.clone().subst(a)))
}

/// Reduce `λ x : A. f x` to `f` if `x` does not occur in `f`.
pub fn eta(tm: &Term) -> Option<Term> {
    let (b, _arg, body) = tm.get_bind()?;
    if b != Binder::Lambda {
        return None;
    }
    let (f, a) = body.get_appl()?;
    (*a == Term::BVar(0) && !f.has_loose_bvar(0)).then(|| f.clone().unshift(1))
}

/// Apply a term to arguments, substituting arguments for leading lambdas.
pub fn beta_apps(mut f: Term, args: Vec<Term>) -> Term {
    let mut args = args.into_iter();
    let mut rest = Vec::new();
    for a in args.by_ref() {
        match f.get_bind() {
            Some((Binder::Lambda, _, body)) => f = body.clone().subst(&a),
            _ => {
                rest.push(a);
                break;
            }
        }
    }
    f.apps(rest.into_iter().chain(args))
}

/// Reduce an application of a recursor to a constructor application.
///
/// For a recursor application `rec ps ms cs is (c qs fs) es`
/// with parameters `ps`, motives `ms`, minor premises `cs`, indices `is` and
/// extra arguments `es`, where the constructor `c` has the fields `fs`,
/// return `rhs ps ms cs fs es`, where `rhs` is the rule of the recursor for `c`.
pub fn iota(env: &Environment, tm: &Term) -> Option<Term> {
    let (head, args) = tm.head_args();
    let rec = env.get_recursor(head.get_const()?.as_str())?;
    let major_idx = rec.major_idx();
    let major = args.get(major_idx)?;
    let (ctor, ctor_args) = major.head_args();
    let rule = rec.rule(ctor.get_const()?)?;
    let fields_start = ctor_args.len().checked_sub(rule.num_fields)?;
    let pmm = rec.num_params + rec.num_motives + rec.num_minors;

    let rhs_args = args[..pmm]
        .iter()
        .chain(&ctor_args[fields_start..])
        .chain(&args[major_idx + 1..])
        .map(|a| (*a).clone());
    Some(beta_apps(rule.rhs.clone(), rhs_args.collect()))
}
