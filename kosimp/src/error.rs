//! Common error type.

use crate::decode::Error as DecodeError;
use crate::environment::Error as EnvError;
use crate::metavars::Error as SubstError;
use crate::{Name, Term};
use std::fmt;

/// Common error type.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Error {
    Decode(DecodeError),
    Env(EnvError),
    Subst(SubstError),
    /// elaboration of a lemma left the given number of constraints
    UnresolvedConstraints(usize),
    /// elaboration callback failed
    Elaboration(String),
    UnknownHypothesis(Name),
    NoOpenGoals,
    /// lemma whose type is not an equation or an equivalence
    InvalidLemma(Term),
}

impl From<DecodeError> for Error {
    fn from(err: DecodeError) -> Self {
        Self::Decode(err)
    }
}

impl From<EnvError> for Error {
    fn from(err: EnvError) -> Self {
        Self::Env(err)
    }
}

impl From<SubstError> for Error {
    fn from(err: SubstError) -> Self {
        Self::Subst(err)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Decode(e) => e.fmt(f),
            Self::Env(e) => e.fmt(f),
            Self::Subst(e) => e.fmt(f),
            Self::UnresolvedConstraints(_) => write!(
                f,
                "invalid 'simp' tactic, fail to resolve generated constraints"
            ),
            Self::Elaboration(msg) => write!(f, "elaboration failed: {}", msg),
            Self::UnknownHypothesis(h) => write!(f, "unknown hypothesis {}", h),
            Self::NoOpenGoals => write!(f, "invalid tactic, there are no goals to be proved"),
            Self::InvalidLemma(ty) => {
                write!(f, "invalid simplification lemma, type {} is not an equation", ty)
            }
        }
    }
}
