//! Proof states, consisting of open goals, a substitution and a name generator.

use crate::{Goal, NameGenerator, Substitution};
use std::rc::Rc;
use std::fmt;

#[derive(Debug)]
struct State {
    goals: im::Vector<Goal>,
    subst: Substitution,
    ngen: NameGenerator,
}

/// Shared proof state.
///
/// The first goal is the focused one.
/// Cloning a proof state is cheap, and
/// a tactic that does not change a proof state
/// returns a proof state that is [`ProofState::ptr_eq`] to its input.
#[derive(Clone, Debug)]
pub struct ProofState(Rc<State>);

impl ProofState {
    pub fn new(goals: im::Vector<Goal>, subst: Substitution, ngen: NameGenerator) -> Self {
        Self(Rc::new(State { goals, subst, ngen }))
    }

    /// Create a proof state with a single goal.
    pub fn from_goal(goal: Goal) -> Self {
        Self::new(im::vector![goal], Substitution::new(), NameGenerator::default())
    }

    pub fn goals(&self) -> &im::Vector<Goal> {
        &self.0.goals
    }

    /// Return the focused goal.
    pub fn focus(&self) -> Option<&Goal> {
        self.0.goals.front()
    }

    pub fn subst(&self) -> &Substitution {
        &self.0.subst
    }

    pub fn ngen(&self) -> &NameGenerator {
        &self.0.ngen
    }

    /// Return a new proof state that shares nothing mutable with `self`.
    pub fn with(&self, goals: im::Vector<Goal>, subst: Substitution, ngen: NameGenerator) -> Self {
        Self::new(goals, subst, ngen)
    }

    /// Return a new proof state with the given goals.
    pub fn with_goals(&self, goals: im::Vector<Goal>) -> Self {
        self.with(goals, self.subst().clone(), self.ngen().clone())
    }

    /// Return true if both proof states are the same object.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Display for ProofState {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.goals().is_empty() {
            return write!(f, "no goals");
        }
        for (i, g) in self.goals().iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
                writeln!(f)?;
            }
            write!(f, "{}", g)?;
        }
        Ok(())
    }
}
