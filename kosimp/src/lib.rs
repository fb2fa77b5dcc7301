#![forbid(unsafe_code)]

//! Simplification tactic for interactive theorem proving.
//!
//! This library provides a framework of *tactics* that
//! transform proof states, and the *simplifier*,
//! a tactic that rewrites goals to normal form using
//! built-in reductions and equational lemmas.
//!
//! # Usage
//!
//! A proof state consists of a sequence of [`Goal`]s,
//! a [`Substitution`] of metavariables and a [`NameGenerator`].
//! Every goal has a tag, namely the metavariable that
//! is eventually assigned a proof of the goal.
//!
//! A [`Tactic`] maps a proof state to a lazy sequence of proof states.
//! Tactics are usually not constructed directly, but
//! decoded from invocations (which are terms) by a [`Registry`].
//! Whenever the simplifier rewrites a goal,
//! it assigns to the tag of the old goal a proof that
//! refers to the tag of the new goal.
//!
//! The following example simplifies the goal `p (f a)` to `p (f b)`
//! using a hypothesis `h : a = b`.
//! (By the way, this example, just as all other code examples in this library,
//! can be executed by running `cargo test`.)
//!
//! ~~~
//! # use kosimp::{Context, Environment, Goal, IoState, LocalDecl, Location, ProofState, Registry, Term};
//! # use kosimp::decode::mk_simp_tactic_expr;
//! # use kosimp::elab::identity;
//! let (p, f) = (Term::constant("p"), Term::constant("f"));
//! let (a, b) = (Term::constant("a"), Term::constant("b"));
//!
//! let mut ctx = Context::new();
//! let h = Term::mk_eq(Term::constant("A"), a.clone(), b.clone());
//! ctx.push(LocalDecl::new("h", h));
//! let target = Term::app(p.clone(), Term::app(f.clone(), a));
//! let state = ProofState::from_goal(Goal::new("g", ctx, target));
//!
//! // simp [h]
//! let lemmas = [Term::local("h")];
//! let invocation = mk_simp_tactic_expr(lemmas, &[], &[], None, &Location::WholeGoal);
//! let registry = Registry::initialize();
//! let simp = registry.expr_to_tactic(&identity(), &invocation)?;
//!
//! let (env, ios) = (Environment::new(), IoState::default());
//! let state = simp.call(&env, &ios, state).next().unwrap();
//! assert_eq!(state.goals()[0].target, Term::app(p, Term::app(f, b)));
//! # Ok::<_, kosimp::Error>(())
//! ~~~
//!
//! # Organisation
//!
//! * Terms are defined in [`term`] and manipulated in [`subst`].
//! * Proof states and tactics are defined in
//!   [`goal`], [`metavars`], [`proof_state`] and [`tactic`].
//! * Tactic invocations are decoded in [`decode`] and dispatched by the [`registry`].
//! * The simplifier is implemented in [`simp`].

extern crate lazy_st;
#[macro_use]
extern crate log;

pub mod constants;
pub mod context;
pub mod decode;
pub mod elab;
pub mod environment;
pub mod error;
pub mod goal;
pub mod io_state;
pub mod location;
pub mod metavars;
pub mod name;
pub mod options;
pub mod proof_state;
pub mod registry;
mod rterm;
pub mod simp;
mod stack;
pub mod subst;
pub mod tactic;
pub mod term;

pub use context::{Context, LocalDecl};
pub use environment::Environment;
pub use error::Error;
pub use goal::Goal;
pub use io_state::IoState;
pub use location::{Location, Site};
pub use metavars::Substitution;
pub use name::{Name, NameGenerator};
pub use options::Options;
pub use proof_state::ProofState;
pub use registry::Registry;
pub use rterm::RTerm;
pub use simp::SimpConfig;
pub use stack::Stack;
pub use tactic::Tactic;
pub use term::{Arg, Binder, Comb, DeBruijn, MetaId, Term};
