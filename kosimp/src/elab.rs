//! Bridge to an external elaborator.
//!
//! The elaborator resolves a raw term against the context of a goal.
//! This crate does not implement elaboration,
//! but calls it through an [`ElaborateFn`].

use crate::{Binder, Environment, Error, Goal, NameGenerator, Substitution, Term};
use std::rc::Rc;

/// Pair of terms that remain to be unified.
pub type Constraint = (Term, Term);

/// Elaborated term, updated substitution and residual constraints.
pub type Elaborated = (Term, Substitution, Vec<Constraint>);

/// Elaboration callback.
///
/// It takes the goal that the raw term is resolved against,
/// a name generator for fresh metavariables, the raw term,
/// an optional expected type, the current substitution, and
/// whether unassigned metavariables should be reported.
pub type ElaborateFn =
    Rc<dyn Fn(&Goal, NameGenerator, &Term, Option<&Term>, Substitution, bool) -> Result<Elaborated, Error>>;

/// Create an elaboration callback from a closure.
pub fn elaborate_fn<F>(f: F) -> ElaborateFn
where
    F: Fn(&Goal, NameGenerator, &Term, Option<&Term>, Substitution, bool) -> Result<Elaborated, Error>
        + 'static,
{
    Rc::new(f)
}

/// Elaborator that returns raw terms unchanged.
pub fn identity() -> ElaborateFn {
    elaborate_fn(|_goal, _ngen, tm, _expected, subst, _report| Ok((tm.clone(), subst, Vec::new())))
}

/// Elaborate lemmas against the goal, threading the substitution.
///
/// Every lemma is elaborated with its own child of `ngen`.
/// The elaborated lemmas are instantiated with the final substitution.
///
/// ~~~
/// # use kosimp::{Context, Goal, NameGenerator, Substitution, Term};
/// # use kosimp::elab::{elaborate_lemmas, identity};
/// let goal = Goal::new("g", Context::new(), Term::constant("P"));
/// let mut ngen = NameGenerator::default();
/// let lemmas = [Term::local("h1"), Term::local("h2")];
/// let (ls, _subst) = elaborate_lemmas(&identity(), &goal, &mut ngen, &lemmas, Substitution::new())?;
/// assert_eq!(ls, lemmas);
/// # Ok::<_, kosimp::Error>(())
/// ~~~
pub fn elaborate_lemmas(
    elab: &ElaborateFn,
    goal: &Goal,
    ngen: &mut NameGenerator,
    lemmas: &[Term],
    mut subst: Substitution,
) -> Result<(Vec<Term>, Substitution), Error> {
    let mut elaborated = Vec::with_capacity(lemmas.len());
    for l in lemmas {
        let report_unassigned = true;
        let (tm, s, cs) = elab(goal, ngen.mk_child(), l, None, subst, report_unassigned)?;
        if !cs.is_empty() {
            return Err(Error::UnresolvedConstraints(cs.len()));
        }
        debug!("elaborated lemma {} to {}", l, tm);
        elaborated.push(tm);
        subst = s;
    }
    let elaborated = elaborated.into_iter().map(|tm| subst.instantiate(tm)).collect();
    Ok((elaborated, subst))
}

/// Infer the type of an elaborated lemma.
///
/// Lemmas are references to hypotheses or global constants,
/// possibly applied to arguments.
pub fn infer_lemma_type(env: &Environment, goal: &Goal, tm: &Term) -> Result<Term, Error> {
    match tm {
        Term::Local(x) => goal
            .ctx
            .get(x.as_str())
            .map(|d| d.ty.clone())
            .ok_or_else(|| Error::UnknownHypothesis(x.clone())),
        Term::Const(c) => env
            .get_type(c.as_str())
            .cloned()
            .ok_or_else(|| crate::environment::Error::UnknownConstant(c.clone()).into()),
        _ => {
            let (f, a) = tm.get_appl().ok_or_else(|| Error::InvalidLemma(tm.clone()))?;
            match infer_lemma_type(env, goal, f)?.get_bind() {
                Some((Binder::Pi, _arg, body)) => Ok(body.clone().subst(a)),
                _ => Err(Error::InvalidLemma(tm.clone())),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Context, LocalDecl, Name};

    #[test]
    fn constraints_abort() {
        let elab = elaborate_fn(|_, _, tm, _, subst, _| {
            Ok((tm.clone(), subst, Vec::from([(tm.clone(), tm.clone())])))
        });
        let goal = Goal::new("g", Context::new(), Term::constant("P"));
        let mut ngen = NameGenerator::default();
        let r = elaborate_lemmas(&elab, &goal, &mut ngen, &[Term::local("h")], Substitution::new());
        assert_eq!(r, Err(Error::UnresolvedConstraints(1)));
    }

    #[test]
    fn substitution_is_threaded() {
        // every lemma assigns a fresh metavariable and is instantiated at the end
        let elab = elaborate_fn(|_, mut ngen, tm, _, subst, _| {
            let m = ngen.fresh();
            let subst = subst.assign(m.clone(), tm.clone())?;
            Ok((Term::Meta(m), subst, Vec::new()))
        });
        let goal = Goal::new("g", Context::new(), Term::constant("P"));
        let mut ngen = NameGenerator::new("n");
        let lemmas = [Term::local("h1"), Term::local("h2")];
        let (ls, subst) = elaborate_lemmas(&elab, &goal, &mut ngen, &lemmas, Substitution::new()).unwrap();
        assert_eq!(ls, lemmas);
        assert_eq!(subst.len(), 2);
    }

    #[test]
    fn infer_applied_hypothesis() {
        // h : Π x : A. f x = g x
        let (f, g) = (Term::constant("f"), Term::constant("g"));
        let eq = Term::mk_eq(
            Term::constant("B"),
            Term::app(f.clone(), Term::BVar(0)),
            Term::app(g.clone(), Term::BVar(0)),
        );
        let mut ctx = Context::new();
        ctx.push(LocalDecl::new("h", Term::pi("x", Term::constant("A"), eq)));
        let goal = Goal::new("g", ctx, Term::constant("P"));
        let a = Term::constant("a");
        let ty = infer_lemma_type(&Environment::new(), &goal, &Term::app(Term::local("h"), a.clone()));
        let expected = Term::mk_eq(Term::constant("B"), Term::app(f, a.clone()), Term::app(g, a));
        assert_eq!(ty, Ok(expected));

        let missing = infer_lemma_type(&Environment::new(), &goal, &Term::local("h2"));
        assert_eq!(missing, Err(Error::UnknownHypothesis(Name::new("h2"))));
    }
}
