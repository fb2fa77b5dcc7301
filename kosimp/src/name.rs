//! Shared names and generators of fresh names.

use std::rc::Rc;
use std::borrow::Borrow;
use std::fmt::{self, Display};

/// Immutable name that is cheap to clone.
///
/// Hierarchical names, such as `simp.max_steps`, are separated by dots.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Name(Rc<str>);

impl Name {
    pub fn new(s: &str) -> Self {
        Self(Rc::from(s))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Return the name `self.suffix`.
    ///
    /// ~~~
    /// # use kosimp::Name;
    /// assert_eq!(Name::new("simp").append("trace"), Name::new("simp.trace"));
    /// ~~~
    pub fn append(&self, suffix: impl Display) -> Self {
        Self(Rc::from(format!("{}.{}", self.0, suffix)))
    }
}

impl From<&str> for Name {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for Name {
    fn from(s: String) -> Self {
        Self(Rc::from(s))
    }
}

impl Borrow<str> for Name {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Generator of globally unique names.
///
/// All names produced by a generator start with its prefix.
/// A child generator obtains as prefix a fresh name of its parent,
/// which the parent never hands out again.
/// Therefore, names produced by different children (or by a child and its parent)
/// never collide, without any coordination between the generators.
///
/// ~~~
/// # use kosimp::NameGenerator;
/// let mut parent = NameGenerator::new("g");
/// let mut child1 = parent.mk_child();
/// let mut child2 = parent.mk_child();
/// assert_ne!(child1.fresh(), child2.fresh());
/// assert_eq!(child1.fresh().as_str(), "g.0.1");
/// assert_eq!(parent.fresh().as_str(), "g.2");
/// ~~~
#[derive(Clone, Debug)]
pub struct NameGenerator {
    prefix: Name,
    next: usize,
}

impl NameGenerator {
    pub fn new(prefix: impl Into<Name>) -> Self {
        Self {
            prefix: prefix.into(),
            next: 0,
        }
    }

    /// Produce a name that this generator has not produced before.
    pub fn fresh(&mut self) -> Name {
        let name = self.prefix.append(self.next);
        self.next += 1;
        name
    }

    /// Split off an independent generator.
    pub fn mk_child(&mut self) -> Self {
        Self::new(self.fresh())
    }
}

impl Default for NameGenerator {
    fn default() -> Self {
        Self::new("_ngen")
    }
}
