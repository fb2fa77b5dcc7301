//! Open proof obligations.

use crate::{Context, MetaId, Term};
use std::fmt;

/// Goal to prove `target` in the context `ctx`.
///
/// The goal is closed once its `tag` is assigned a proof in the substitution.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Goal {
    pub tag: MetaId,
    pub ctx: Context,
    pub target: Term,
}

impl Goal {
    pub fn new(tag: impl Into<MetaId>, ctx: Context, target: Term) -> Self {
        let tag = tag.into();
        Self { tag, ctx, target }
    }

    /// The metavariable standing for the proof of the goal.
    pub fn meta(&self) -> Term {
        Term::Meta(self.tag.clone())
    }
}

impl fmt::Display for Goal {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for decl in self.ctx.iter() {
            writeln!(f, "{}", decl)?;
        }
        write!(f, "⊢ {}", self.target)
    }
}
