//! Configuration of the simplifier.

use crate::options::{OptionDecl, OptionValue, Options};
use crate::Name;

pub const SINGLE_PASS: &str = "simp.single_pass";
pub const BOTTOM_UP: &str = "simp.bottom_up";
pub const BETA_ETA: &str = "simp.beta_eta";
pub const IOTA: &str = "simp.iota";
pub const MEMOIZE: &str = "simp.memoize";
pub const MAX_STEPS: &str = "simp.max_steps";
pub const TRACE: &str = "simp.trace";
pub const ASSUMPTIONS: &str = "simp.assumptions";

/// Snapshot of the simplifier options.
///
/// The snapshot is taken once per simplifier run,
/// so later changes to the options do not affect a running simplifier.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SimpConfig {
    pub single_pass: bool,
    pub bottom_up: bool,
    pub beta_eta: bool,
    pub iota: bool,
    pub memoize: bool,
    pub max_steps: usize,
    pub trace: bool,
    pub assumptions: bool,
}

impl Default for SimpConfig {
    fn default() -> Self {
        Self {
            single_pass: false,
            bottom_up: true,
            beta_eta: true,
            iota: true,
            memoize: true,
            max_steps: 10000,
            trace: false,
            assumptions: false,
        }
    }
}

impl SimpConfig {
    /// Read the configuration from the options, falling back to defaults.
    ///
    /// ~~~
    /// # use kosimp::{Options, SimpConfig};
    /// let opts = Options::new().set_unsigned("simp.max_steps", 0);
    /// let cfg = SimpConfig::new(&opts);
    /// assert_eq!(cfg.max_steps, 0);
    /// assert!(cfg.bottom_up && !cfg.single_pass);
    /// ~~~
    pub fn new(opts: &Options) -> Self {
        let d = Self::default();
        Self {
            single_pass: opts.get_bool(SINGLE_PASS, d.single_pass),
            bottom_up: opts.get_bool(BOTTOM_UP, d.bottom_up),
            beta_eta: opts.get_bool(BETA_ETA, d.beta_eta),
            iota: opts.get_bool(IOTA, d.iota),
            memoize: opts.get_bool(MEMOIZE, d.memoize),
            max_steps: opts.get_unsigned(MAX_STEPS, d.max_steps),
            trace: opts.get_bool(TRACE, d.trace),
            assumptions: opts.get_bool(ASSUMPTIONS, d.assumptions),
        }
    }
}

/// Declarations of all simplifier options.
pub fn declarations() -> Vec<OptionDecl> {
    let d = SimpConfig::default();
    let decl = |name: &str, default: OptionValue, description| OptionDecl {
        name: Name::new(name),
        default,
        description,
    };
    Vec::from([
        decl(
            SINGLE_PASS,
            d.single_pass.into(),
            "(simp tactic) if false then the simplifier keeps applying simplifications as long as possible",
        ),
        decl(
            BOTTOM_UP,
            d.bottom_up.into(),
            "(simp tactic) if true the simplifier uses a bottom up rewriting strategy, otherwise it uses top down",
        ),
        decl(
            BETA_ETA,
            d.beta_eta.into(),
            "(simp tactic) if true the simplifier applies beta and eta reduction",
        ),
        decl(
            IOTA,
            d.iota.into(),
            "(simp tactic) if true the simplifier applies iota reduction",
        ),
        decl(
            MEMOIZE,
            d.memoize.into(),
            "(simp tactic) if true the simplifier caches intermediate results",
        ),
        decl(
            MAX_STEPS,
            d.max_steps.into(),
            "(simp tactic) maximum number of steps that can be performed by the simplifier",
        ),
        decl(
            TRACE,
            d.trace.into(),
            "(simp tactic) if true the simplifier produces an execution trace for debugging purposes",
        ),
        decl(
            ASSUMPTIONS,
            d.assumptions.into(),
            "(simp tactic) if true assumptions/hypotheses are automatically used as rewriting rules",
        ),
    ])
}
