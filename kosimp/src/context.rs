//! Local contexts of goals.

use crate::{Name, Term};
use std::fmt;

/// Local declaration, such as a hypothesis `h : a = b` or a definition `x : A := v`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LocalDecl {
    pub name: Name,
    pub ty: Term,
    pub value: Option<Term>,
}

impl LocalDecl {
    pub fn new(name: impl Into<Name>, ty: Term) -> Self {
        let name = name.into();
        Self {
            name,
            ty,
            value: None,
        }
    }

    pub fn with_value(self, value: Term) -> Self {
        Self {
            value: Some(value),
            ..self
        }
    }
}

/// Ordered sequence of local declarations.
///
/// Contexts are persistent, so extending or modifying a context
/// leaves all other references to it unchanged.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Context(im::Vector<LocalDecl>);

impl Context {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, decl: LocalDecl) {
        self.0.push_back(decl)
    }

    /// Return the last declaration with the given name.
    ///
    /// ~~~
    /// # use kosimp::{Context, LocalDecl, Term};
    /// let mut ctx = Context::new();
    /// ctx.push(LocalDecl::new("x", Term::constant("A")));
    /// ctx.push(LocalDecl::new("x", Term::constant("B")));
    /// assert_eq!(ctx.get("x").unwrap().ty, Term::constant("B"));
    /// assert!(ctx.get("y").is_none());
    /// ~~~
    pub fn get(&self, name: &str) -> Option<&LocalDecl> {
        self.position(name).map(|i| &self.0[i])
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.0.iter().rposition(|d| d.name.as_str() == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    /// Return a context where the last declaration named `name` has the type `ty`
    /// and (if given) the value `value`.
    ///
    /// Return `None` if no such declaration exists.
    pub fn replace(&self, name: &str, ty: Term, value: Option<Term>) -> Option<Self> {
        let i = self.position(name)?;
        let mut decl = self.0[i].clone();
        decl.ty = ty;
        if value.is_some() {
            decl.value = value;
        }
        Some(Self(self.0.update(i, decl)))
    }

    pub fn iter(&self) -> impl Iterator<Item = &LocalDecl> + '_ {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<LocalDecl> for Context {
    fn from_iter<I: IntoIterator<Item = LocalDecl>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl fmt::Display for LocalDecl {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} : {}", self.name, self.ty)?;
        if let Some(v) = &self.value {
            write!(f, " := {}", v)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn replace_is_persistent() {
        let ctx: Context = [
            LocalDecl::new("h1", Term::constant("P")),
            LocalDecl::new("h2", Term::constant("Q")),
        ]
        .into_iter()
        .collect();
        let ctx2 = ctx.replace("h1", Term::constant("R"), None).unwrap();
        assert_eq!(ctx.get("h1").unwrap().ty, Term::constant("P"));
        assert_eq!(ctx2.get("h1").unwrap().ty, Term::constant("R"));
        assert_eq!(ctx2.get("h2"), ctx.get("h2"));
        assert!(ctx.replace("h3", Term::constant("R"), None).is_none());
    }
}
