//! Simplification of goals by rewriting.

pub mod cert;
pub mod config;
pub mod engine;
pub mod matching;
pub mod reduce;
pub mod rule;
pub mod tactic;

pub use cert::{Certificate, Reduction};
pub use config::SimpConfig;
pub use engine::{Simp, Simplifier};
pub use rule::{NameFilter, Origin, Relation, Rule};
pub use tactic::mk_simp_tactic;
