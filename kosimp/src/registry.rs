//! Registration of tactics and options.
//!
//! A [`Registry`] maps the names of tactics to builders that
//! decode tactic invocations (encoded as terms) to tactics.
//! It also holds the declarations of the options that tactics read.
//!
//! ~~~
//! # use kosimp::{Registry, Term};
//! # use kosimp::decode::Error;
//! # use kosimp::elab::identity;
//! let reg = Registry::initialize();
//! let elab = identity();
//! let t = Term::app(Term::constant("tactic.try"), Term::constant("tactic.refl"));
//! assert!(reg.expr_to_tactic(&elab, &t).is_ok());
//!
//! let unknown = Term::constant("tactic.unknown");
//! assert!(matches!(reg.expr_to_tactic(&elab, &unknown), Err(Error::UnknownTactic(_))));
//! assert_eq!(reg.default_options().get_unsigned("simp.max_steps", 0), 10000);
//! ~~~

use crate::decode::{decode_simp_args, Error, SIMP_TAC};
use crate::elab::ElaborateFn;
use crate::options::{OptionDecl, Options};
use crate::simp::{self, mk_simp_tactic};
use crate::tactic::{self, Tactic};
use crate::{Name, Term};
use fnv::FnvHashMap;

/// Function that builds a tactic from an invocation.
pub type TacticBuilder = fn(&Registry, &ElaborateFn, &Term) -> Result<Tactic, Error>;

/// Tactics and options known to the system.
#[derive(Clone, Default)]
pub struct Registry {
    options: Vec<OptionDecl>,
    tactics: FnvHashMap<Name, TacticBuilder>,
}

/// Return the arguments of an invocation with exactly `n` arguments.
fn args_n(tm: &Term, n: usize) -> Result<Vec<&Term>, Error> {
    let (_head, args) = tm.head_args();
    if args.len() == n {
        Ok(args)
    } else {
        Err(Error::ArgumentCount)
    }
}

fn constant(tm: &Term, t: fn() -> Tactic) -> Result<Tactic, Error> {
    args_n(tm, 0).map(|_| t())
}

impl Registry {
    /// Create a registry without any tactics or options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry with the basic tactics, the simplifier and its options.
    pub fn initialize() -> Self {
        let mut reg = Self::new();
        reg.register_tactic("tactic.id", |_, _, tm| constant(tm, tactic::id_tactic));
        reg.register_tactic("tactic.fail", |_, _, tm| constant(tm, tactic::fail_tactic));
        reg.register_tactic("tactic.now", |_, _, tm| constant(tm, tactic::now_tactic));
        reg.register_tactic("tactic.refl", |_, _, tm| constant(tm, tactic::refl_tactic));
        reg.register_tactic("tactic.try", |reg, elab, tm| {
            let args = args_n(tm, 1)?;
            Ok(tactic::try_tactic(reg.expr_to_tactic(elab, args[0])?))
        });
        reg.register_tactic("tactic.and_then", |reg, elab, tm| {
            let args = args_n(tm, 2)?;
            let t1 = reg.expr_to_tactic(elab, args[0])?;
            let t2 = reg.expr_to_tactic(elab, args[1])?;
            Ok(tactic::then(t1, t2))
        });
        reg.register_tactic("tactic.or_else", |reg, elab, tm| {
            let args = args_n(tm, 2)?;
            let t1 = reg.expr_to_tactic(elab, args[0])?;
            let t2 = reg.expr_to_tactic(elab, args[1])?;
            Ok(tactic::or_else(t1, t2))
        });
        reg.register_tactic(SIMP_TAC, |reg, elab, tm| {
            let args = decode_simp_args(tm, |t| reg.expr_to_tactic(elab, t))?;
            Ok(mk_simp_tactic(elab.clone(), args))
        });
        simp::config::declarations()
            .into_iter()
            .for_each(|decl| reg.register_option(decl));
        reg
    }

    /// Bind a tactic name to a builder, replacing any previous binding.
    pub fn register_tactic(&mut self, name: impl Into<Name>, builder: TacticBuilder) {
        let name = name.into();
        if self.tactics.insert(name.clone(), builder).is_some() {
            warn!("tactic {} registered twice", name);
        }
    }

    pub fn register_option(&mut self, decl: OptionDecl) {
        self.options.push(decl)
    }

    pub fn option_decls(&self) -> &[OptionDecl] {
        &self.options
    }

    /// Options set to the defaults of all registered options.
    pub fn default_options(&self) -> Options {
        self.options
            .iter()
            .map(|d| (d.name.clone(), d.default.clone()))
            .collect()
    }

    /// Build a tactic from an invocation, dispatching on the head constant.
    pub fn expr_to_tactic(&self, elab: &ElaborateFn, tm: &Term) -> Result<Tactic, Error> {
        let (head, _args) = tm.head_args();
        let name = match head.get_const() {
            Some(c) => c,
            None => return Err(Error::UnknownTactic(Name::from(format!("{}", head)))),
        };
        let builder = self
            .tactics
            .get(name)
            .ok_or_else(|| Error::UnknownTactic(name.clone()))?;
        builder(self, elab, tm)
    }
}
