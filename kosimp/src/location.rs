//! Parts of a goal that a tactic acts on.

use crate::{Error, Goal, Name, Term};
use std::fmt;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Location {
    /// target of the goal
    WholeGoal,
    /// types of the named hypotheses
    Hypotheses(Vec<Name>),
    /// target and all hypotheses
    Everywhere,
}

/// Part of a goal that a term was taken from.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Site {
    Target,
    Hypothesis(Name),
}

impl Location {
    /// Return the terms of the goal that the location designates.
    ///
    /// ~~~
    /// # use kosimp::{Context, Goal, LocalDecl, Location, Name, Site, Term};
    /// let mut ctx = Context::new();
    /// ctx.push(LocalDecl::new("h", Term::constant("P")));
    /// let goal = Goal::new("g", ctx, Term::constant("Q"));
    ///
    /// let sites = Location::Everywhere.resolve(&goal)?;
    /// let sites: Vec<_> = sites.into_iter().map(|(site, _)| site).collect();
    /// assert_eq!(sites, [Site::Target, Site::Hypothesis(Name::new("h"))]);
    ///
    /// let missing = Location::Hypotheses(vec![Name::new("nonexistent")]);
    /// assert!(missing.resolve(&goal).is_err());
    /// # Ok::<_, kosimp::Error>(())
    /// ~~~
    pub fn resolve(&self, goal: &Goal) -> Result<Vec<(Site, Term)>, Error> {
        let hyp = |d: &crate::LocalDecl| (Site::Hypothesis(d.name.clone()), d.ty.clone());
        match self {
            Self::WholeGoal => Ok(Vec::from([(Site::Target, goal.target.clone())])),
            Self::Hypotheses(names) => names
                .iter()
                .map(|name| {
                    let decl = goal.ctx.get(name.as_str());
                    decl.map(hyp)
                        .ok_or_else(|| Error::UnknownHypothesis(name.clone()))
                })
                .collect(),
            Self::Everywhere => {
                let target = (Site::Target, goal.target.clone());
                Ok(std::iter::once(target)
                    .chain(goal.ctx.iter().map(hyp))
                    .collect())
            }
        }
    }
}

impl fmt::Display for Site {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Target => write!(f, "target"),
            Self::Hypothesis(h) => write!(f, "hypothesis {}", h),
        }
    }
}
