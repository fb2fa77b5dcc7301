//! The simplification tactic.

use super::engine::Simplifier;
use super::rule::{NameFilter, Origin, Rule};
use super::SimpConfig;
use crate::decode::SimpArgs;
use crate::elab::{elaborate_lemmas, infer_lemma_type, ElaborateFn};
use crate::io_state::Diagnostic;
use crate::tactic::{now_tactic, refl_tactic, then, try_tactic, Tactic};
use crate::{Environment, Error, IoState, ProofState, Term};
use std::iter;

/// Create a tactic that simplifies the focused goal.
///
/// The tactic elaborates the lemmas in `args` against the focused goal,
/// simplifies the parts of the goal designated by the location, and
/// finally tries to close the goal by reflexivity.
/// It succeeds even if the goal is not closed.
///
/// If an error occurs, it is reported to the output of the `IoState`,
/// and the tactic fails without producing any proof state.
/// The absence of goals is only reported if the `IoState` is strict.
pub fn mk_simp_tactic(elab: ElaborateFn, args: SimpArgs) -> Tactic {
    Tactic::new(move |env, ios, s| {
        if s.goals().is_empty() {
            if ios.is_strict() {
                ios.report(Diagnostic::Error(Error::NoOpenGoals));
            }
            return Box::new(iter::empty());
        }
        match run(&elab, &args, env, ios, &s) {
            Ok(s) => post_tactic().call(env, ios, s),
            Err(e) => {
                debug!("simp failed: {}", e);
                ios.report(Diagnostic::Error(e));
                Box::new(iter::empty())
            }
        }
    })
}

fn post_tactic() -> Tactic {
    then(try_tactic(refl_tactic()), try_tactic(now_tactic()))
}

/// Rules from the simplification lemmas of the environment.
///
/// Lemmas that do not yield a rule are skipped.
fn global_rules(env: &Environment) -> impl Iterator<Item = Rule> + '_ {
    env.simp_lemmas().filter_map(move |n| {
        let ty = env.get_type(n.as_str())?.clone();
        let proof = Term::Const(n.clone());
        Rule::new(Some(n.clone()), Origin::Global, proof, ty)
            .map_err(|e| warn!("ignoring simplification lemma {}: {}", n, e))
            .ok()
    })
}

fn run(
    elab: &ElaborateFn,
    args: &SimpArgs,
    env: &Environment,
    ios: &IoState,
    s: &ProofState,
) -> Result<ProofState, Error> {
    let goal = s.focus().ok_or(Error::NoOpenGoals)?;
    let mut ngen = s.ngen().clone();
    let (lemmas, subst) = elaborate_lemmas(elab, goal, &mut ngen, &args.lemmas, s.subst().clone())?;

    let mut rules = Vec::with_capacity(lemmas.len());
    for l in lemmas {
        let ty = infer_lemma_type(env, goal, &l)?;
        let name = match &l {
            Term::Const(n) | Term::Local(n) => Some(n.clone()),
            _ => None,
        };
        rules.push(Rule::new(name, Origin::Lemma, l, ty)?);
    }
    rules.extend(global_rules(env));

    let cfg = SimpConfig::new(ios.options());
    let targets = args.location.resolve(goal)?;
    let filter = NameFilter::new(args.include.clone(), args.exclude.clone());
    debug!("simp with {} rules on {} targets", rules.len(), targets.len());

    let mut simp = Simplifier::new(env, ios, cfg, &goal.ctx, rules, filter)
        .with_discharger(args.pre_tac.clone(), subst.clone())
        .with_ngen(ngen.mk_child());
    let (new_goal, subst) = simp.simp_goal(goal, targets, subst)?;
    let goals = s.goals().update(0, new_goal);
    Ok(s.with(goals, subst, ngen))
}
