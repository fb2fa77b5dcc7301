//! Maps from global constants to their declarations and recursors.

use crate::{Name, Term};
use std::rc::Rc;
use std::fmt;

/// Immutable HashMap for fast cloning of environments.
type FnvHashMap<K, V> = im::hashmap::HashMap<K, V, fnv::FnvBuildHasher>;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Error {
    Reintroduction(Name),
    UnknownConstant(Name),
}

/// Type and optional value of a global constant.
#[derive(Clone, Debug)]
pub struct Declaration {
    pub ty: Term,
    pub value: Option<Term>,
}

/// Reduction rule of a recursor for one constructor.
///
/// The right-hand side takes the parameters, motives and minor premises
/// of the recursor application, followed by the constructor fields.
#[derive(Clone, Debug)]
pub struct RecursorRule {
    pub ctor: Name,
    pub num_fields: usize,
    pub rhs: Term,
}

/// Recursor of an inductive type.
///
/// The arguments of a recursor application are, in this order,
/// parameters, motives, minor premises, indices and the major premise.
#[derive(Clone, Debug)]
pub struct Recursor {
    pub name: Name,
    pub num_params: usize,
    pub num_motives: usize,
    pub num_minors: usize,
    pub num_indices: usize,
    pub rules: Vec<RecursorRule>,
}

impl Recursor {
    /// Position of the major premise among the arguments.
    pub fn major_idx(&self) -> usize {
        self.num_params + self.num_motives + self.num_minors + self.num_indices
    }

    pub fn rule(&self, ctor: &Name) -> Option<&RecursorRule> {
        self.rules.iter().find(|r| &r.ctor == ctor)
    }
}

/// Immutable snapshot of global declarations.
///
/// Cloning an environment is cheap, and modifying a clone
/// leaves the original unchanged.
#[derive(Clone, Debug, Default)]
pub struct Environment {
    decls: FnvHashMap<Name, Rc<Declaration>>,
    recursors: FnvHashMap<Name, Rc<Recursor>>,
    simp_lemmas: im::Vector<Name>,
}

impl Environment {
    /// Construct an empty environment.
    ///
    /// ~~~
    /// # use kosimp::{Environment, Term};
    /// let mut env = Environment::new();
    /// env.declare("a", Term::constant("A"), None)?;
    /// assert!(env.declare("a", Term::constant("A"), None).is_err());
    /// assert_eq!(env.get("a").unwrap().ty, Term::constant("A"));
    /// # Ok::<_, kosimp::environment::Error>(())
    /// ~~~
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&Rc<Declaration>> {
        self.decls.get(name)
    }

    pub fn get_type(&self, name: &str) -> Option<&Term> {
        self.get(name).map(|d| &d.ty)
    }

    pub fn get_recursor(&self, name: &str) -> Option<&Rc<Recursor>> {
        self.recursors.get(name)
    }

    pub fn has_recursors(&self) -> bool {
        !self.recursors.is_empty()
    }

    /// Introduce a new constant.
    pub fn declare(&mut self, name: impl Into<Name>, ty: Term, value: Option<Term>) -> Result<(), Error> {
        let name = name.into();
        if self.decls.contains_key(&name) {
            return Err(Error::Reintroduction(name));
        }
        self.decls.insert(name, Rc::new(Declaration { ty, value }));
        Ok(())
    }

    /// Register the recursor of an already declared constant.
    pub fn add_recursor(&mut self, rec: Recursor) -> Result<(), Error> {
        if !self.decls.contains_key(&rec.name) {
            return Err(Error::UnknownConstant(rec.name));
        }
        if self.recursors.contains_key(&rec.name) {
            return Err(Error::Reintroduction(rec.name));
        }
        self.recursors.insert(rec.name.clone(), Rc::new(rec));
        Ok(())
    }

    /// Mark an already declared constant as global simplification lemma.
    pub fn add_simp_lemma(&mut self, name: impl Into<Name>) -> Result<(), Error> {
        let name = name.into();
        if !self.decls.contains_key(&name) {
            return Err(Error::UnknownConstant(name));
        }
        if !self.simp_lemmas.contains(&name) {
            self.simp_lemmas.push_back(name);
        }
        Ok(())
    }

    /// Global simplification lemmas in the order they were added.
    pub fn simp_lemmas(&self) -> impl Iterator<Item = &Name> + '_ {
        self.simp_lemmas.iter()
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Reintroduction(n) => write!(f, "constant {} is already declared", n),
            Self::UnknownConstant(n) => write!(f, "unknown constant {}", n),
        }
    }
}
