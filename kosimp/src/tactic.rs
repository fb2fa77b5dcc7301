//! Tactics and tactic combinators.
//!
//! A tactic maps a proof state to a lazy sequence of proof states,
//! ordered by preference.
//! An empty sequence means that the tactic failed.
//!
//! Calling a tactic does not run it:
//! the tactic body is only run once the first element of its sequence is demanded,
//! and consumers demand only as many elements as they need.
//!
//! ~~~
//! # use kosimp::{Environment, Goal, IoState, ProofState, Context, Term};
//! # use kosimp::tactic::{fail_tactic, id_tactic, now_tactic, or_else, then, try_tactic};
//! let (env, ios) = (Environment::new(), IoState::default());
//! let goal = Goal::new("g", Context::new(), Term::constant("P"));
//! let s = ProofState::from_goal(goal);
//!
//! // `now` fails because there is an open goal
//! assert!(now_tactic().call(&env, &ios, s.clone()).next().is_none());
//! // `try` recovers from the failure with the unchanged state
//! let s2 = try_tactic(now_tactic()).call(&env, &ios, s.clone()).next().unwrap();
//! assert!(s2.ptr_eq(&s));
//!
//! let t = then(or_else(fail_tactic(), id_tactic()), id_tactic());
//! assert_eq!(t.call(&env, &ios, s).count(), 1);
//! ~~~

use crate::constants::{EQ_REFL, IFF_REFL};
use crate::{Environment, IoState, ProofState, Term};
use std::rc::Rc;
use std::iter;

/// Lazy sequence of proof states.
pub type ProofStateSeq = Box<dyn Iterator<Item = ProofState>>;

type TacticFn = dyn Fn(&Environment, &IoState, ProofState) -> ProofStateSeq;

/// Shared tactic.
#[derive(Clone)]
pub struct Tactic(Rc<TacticFn>);

impl Tactic {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&Environment, &IoState, ProofState) -> ProofStateSeq + 'static,
    {
        Self(Rc::new(f))
    }

    /// Apply the tactic to a proof state.
    ///
    /// The tactic body is run only once the first proof state is demanded.
    pub fn call(&self, env: &Environment, ios: &IoState, s: ProofState) -> ProofStateSeq {
        let (f, env, ios) = (self.0.clone(), env.clone(), ios.clone());
        lazily(move || f(&env, &ios, s))
    }
}

impl std::fmt::Debug for Tactic {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "Tactic")
    }
}

/// Postpone the construction of a sequence until its first element is demanded.
pub fn lazily<F>(f: F) -> ProofStateSeq
where
    F: FnOnce() -> ProofStateSeq + 'static,
{
    Box::new(iter::once_with(f).flatten())
}

/// Succeed once with the unchanged proof state.
pub fn id_tactic() -> Tactic {
    Tactic::new(|_, _, s| Box::new(iter::once(s)))
}

/// Fail always.
pub fn fail_tactic() -> Tactic {
    Tactic::new(|_, _, _| Box::new(iter::empty()))
}

/// Succeed with the unchanged proof state if there are no goals, fail otherwise.
pub fn now_tactic() -> Tactic {
    Tactic::new(|_, _, s| match s.goals().is_empty() {
        true => Box::new(iter::once(s)),
        false => Box::new(iter::empty()),
    })
}

/// Run `t2` on every result of `t1`.
pub fn then(t1: Tactic, t2: Tactic) -> Tactic {
    Tactic::new(move |env, ios, s| {
        let (env, ios, t2) = (env.clone(), ios.clone(), t2.clone());
        Box::new(t1.call(&env, &ios, s).flat_map(move |s| t2.call(&env, &ios, s)))
    })
}

/// Return the results of `t1`, or if it fails, the results of `t2`.
pub fn or_else(t1: Tactic, t2: Tactic) -> Tactic {
    Tactic::new(move |env, ios, s| {
        let mut seq = t1.call(env, ios, s.clone()).peekable();
        if seq.peek().is_some() {
            Box::new(seq)
        } else {
            trace!("or_else: falling back to second alternative");
            t2.call(env, ios, s)
        }
    })
}

/// Return the results of `t`, or if it fails, the unchanged proof state.
pub fn try_tactic(t: Tactic) -> Tactic {
    or_else(t, id_tactic())
}

/// Close the focused goal if its target is `a = a` or `a ↔ a`.
///
/// ~~~
/// # use kosimp::{Environment, Goal, IoState, ProofState, Context, Name, Term};
/// # use kosimp::tactic::refl_tactic;
/// let (env, ios) = (Environment::new(), IoState::default());
/// let (a, ty) = (Term::constant("a"), Term::constant("A"));
/// let goal = Goal::new("g", Context::new(), Term::mk_eq(ty, a.clone(), a.clone()));
/// let s = refl_tactic().call(&env, &ios, ProofState::from_goal(goal)).next().unwrap();
/// assert!(s.goals().is_empty());
/// let proof = Term::app(Term::constant("eq.refl"), a);
/// assert_eq!(s.subst().get(&Name::new("g")), Some(&proof));
/// ~~~
pub fn refl_tactic() -> Tactic {
    Tactic::new(|_, _, s| Box::new(refl(&s).into_iter()))
}

fn refl(s: &ProofState) -> Option<ProofState> {
    let goal = s.focus()?;
    let target = s.subst().instantiate(goal.target.clone());
    if target.has_meta() {
        return None;
    }
    let proof = if let Some((_ty, l, r)) = target.get_eq() {
        (l == r).then(|| Term::app(Term::constant(EQ_REFL), l.clone()))
    } else {
        let (l, r) = target.get_iff()?;
        (l == r).then(|| Term::app(Term::constant(IFF_REFL), l.clone()))
    }?;
    let subst = s.subst().assign(goal.tag.clone(), proof).ok()?;
    trace!("refl: closed goal {}", goal.tag);
    Some(s.with(s.goals().skip(1), subst, s.ngen().clone()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Context, Goal};
    use std::cell::Cell;

    fn state() -> ProofState {
        let goal = Goal::new("g", Context::new(), Term::constant("P"));
        ProofState::from_goal(goal)
    }

    /// Tactic that succeeds twice and counts how often it was run.
    fn counting(runs: Rc<Cell<usize>>) -> Tactic {
        Tactic::new(move |_, _, s| {
            runs.set(runs.get() + 1);
            Box::new([s.clone(), s].into_iter())
        })
    }

    #[test]
    fn call_is_lazy() {
        let (env, ios) = (Environment::new(), IoState::default());
        let runs = Rc::new(Cell::new(0));
        let seq = then(counting(runs.clone()), counting(runs.clone())).call(&env, &ios, state());
        assert_eq!(runs.get(), 0);
        let mut seq = seq;
        seq.next();
        assert_eq!(runs.get(), 2);
        drop(seq);
        assert_eq!(runs.get(), 2);
    }

    #[test]
    fn then_order() {
        let (env, ios) = (Environment::new(), IoState::default());
        let runs = Rc::new(Cell::new(0));
        let t = then(counting(runs.clone()), counting(runs.clone()));
        let results: Vec<_> = t.call(&env, &ios, state()).collect();
        assert_eq!(results.len(), 4);
        // one run of the first tactic and one run of the second per result of the first
        assert_eq!(runs.get(), 3);
    }

    #[test]
    fn then_fails_if_second_fails() {
        let (env, ios) = (Environment::new(), IoState::default());
        let t = then(id_tactic(), fail_tactic());
        assert!(t.call(&env, &ios, state()).next().is_none());
    }

    #[test]
    fn refl_rejects_metas() {
        let (env, ios) = (Environment::new(), IoState::default());
        let m = Term::Meta("m".into());
        let target = Term::mk_eq(Term::constant("A"), m.clone(), m);
        let s = ProofState::from_goal(Goal::new("g", Context::new(), target));
        assert!(refl_tactic().call(&env, &ios, s).next().is_none());
    }

    #[test]
    fn refl_iff() {
        let (env, ios) = (Environment::new(), IoState::default());
        let p = Term::constant("p");
        let target = Term::mk_iff(p.clone(), p);
        let s = ProofState::from_goal(Goal::new("g", Context::new(), target));
        let s = refl_tactic().call(&env, &ios, s).next().unwrap();
        assert!(s.goals().is_empty());
    }
}
