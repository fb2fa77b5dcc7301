//! Pointers to shared terms.

use crate::term::TermC;
use std::rc::Rc;
use std::fmt;

/// Pointer to a shared combinator term.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct RTerm(Rc<TermC>);

impl RTerm {
    /// Create a term pointer from a term.
    pub fn new(tm: TermC) -> Self {
        Self(Rc::new(tm))
    }

    /// Compare the memory addresses of two term pointers.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl std::ops::Deref for RTerm {
    type Target = TermC;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<TermC> for RTerm {
    fn from(tm: TermC) -> Self {
        Self::new(tm)
    }
}

impl fmt::Display for RTerm {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        (**self).fmt(f)
    }
}
