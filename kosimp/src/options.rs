//! Typed option store with default fallback.

use crate::Name;
use std::fmt;

type FnvHashMap<K, V> = im::hashmap::HashMap<K, V, fnv::FnvBuildHasher>;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum OptionValue {
    Bool(bool),
    Unsigned(usize),
}

impl From<bool> for OptionValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<usize> for OptionValue {
    fn from(n: usize) -> Self {
        Self::Unsigned(n)
    }
}

impl fmt::Display for OptionValue {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Bool(b) => b.fmt(f),
            Self::Unsigned(n) => n.fmt(f),
        }
    }
}

/// Declaration of an option, consisting of its name, default value and description.
#[derive(Clone, Debug)]
pub struct OptionDecl {
    pub name: Name,
    pub default: OptionValue,
    pub description: &'static str,
}

/// Persistent map from option names to values.
///
/// Lookups of options that are not set or that have a value of different type
/// yield the given default.
///
/// ~~~
/// # use kosimp::Options;
/// let opts = Options::new().set_bool("simp.trace", true);
/// assert!(opts.get_bool("simp.trace", false));
/// assert!(!opts.get_bool("simp.memoize", false));
/// assert_eq!(opts.get_unsigned("simp.trace", 7), 7);
/// ~~~
#[derive(Clone, Debug, Default)]
pub struct Options(FnvHashMap<Name, OptionValue>);

impl Options {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return options where `name` is set to `value`.
    pub fn update(&self, name: impl Into<Name>, value: OptionValue) -> Self {
        Self(self.0.update(name.into(), value))
    }

    pub fn set_bool(&self, name: impl Into<Name>, b: bool) -> Self {
        self.update(name, b.into())
    }

    pub fn set_unsigned(&self, name: impl Into<Name>, n: usize) -> Self {
        self.update(name, n.into())
    }

    pub fn get(&self, name: &str) -> Option<&OptionValue> {
        self.0.get(name)
    }

    pub fn get_bool(&self, name: &str, default: bool) -> bool {
        match self.get(name) {
            Some(OptionValue::Bool(b)) => *b,
            _ => default,
        }
    }

    pub fn get_unsigned(&self, name: &str, default: usize) -> usize {
        match self.get(name) {
            Some(OptionValue::Unsigned(n)) => *n,
            _ => default,
        }
    }
}

impl FromIterator<(Name, OptionValue)> for Options {
    fn from_iter<I: IntoIterator<Item = (Name, OptionValue)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
