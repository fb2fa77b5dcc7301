//! Options and diagnostics output of tactics.

use crate::location::Site;
use crate::{Error, Name, Options, Term};
use std::rc::Rc;
use std::cell::RefCell;
use std::fmt;

/// Record of one rewrite step performed by the simplifier.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TraceRecord {
    /// name of the lemma or the reduction that was applied
    pub rule: Name,
    pub site: Site,
    pub before: Term,
    pub after: Term,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Diagnostic {
    Rewrite(TraceRecord),
    /// the simplifier stopped after the given number of steps
    StepLimit(usize),
    Error(Error),
}

/// Receiver of diagnostics.
pub trait Output {
    fn report(&self, diag: Diagnostic);
}

/// Output that collects all diagnostics.
#[derive(Debug, Default)]
pub struct Diagnostics(RefCell<Vec<Diagnostic>>);

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remove and return all diagnostics reported so far.
    pub fn take(&self) -> Vec<Diagnostic> {
        self.0.take()
    }
}

impl Output for Diagnostics {
    fn report(&self, diag: Diagnostic) {
        self.0.borrow_mut().push(diag)
    }
}

/// Output that passes diagnostics to the logger.
#[derive(Debug, Default)]
pub struct LogOutput;

impl Output for LogOutput {
    fn report(&self, diag: Diagnostic) {
        match diag {
            Diagnostic::Error(e) => error!("{}", e),
            d => info!("{}", d),
        }
    }
}

/// Options and output channel shared by all tactics of a run.
#[derive(Clone)]
pub struct IoState {
    options: Options,
    strict: bool,
    out: Rc<dyn Output>,
}

impl IoState {
    pub fn new(options: Options, out: Rc<dyn Output>) -> Self {
        Self {
            options,
            strict: false,
            out,
        }
    }

    /// Set whether tactics report failures that are otherwise silent,
    /// such as the absence of goals.
    pub fn with_strict(self, strict: bool) -> Self {
        Self { strict, ..self }
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    pub fn is_strict(&self) -> bool {
        self.strict
    }

    pub fn report(&self, diag: Diagnostic) {
        self.out.report(diag)
    }
}

impl Default for IoState {
    fn default() -> Self {
        Self::new(Options::new(), Rc::new(LogOutput))
    }
}

impl fmt::Display for TraceRecord {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let Self {
            rule,
            site,
            before,
            after,
        } = self;
        write!(f, "[{}] {}: {} ⟶ {}", rule, site, before, after)
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Rewrite(r) => r.fmt(f),
            Self::StepLimit(n) => write!(f, "simplifier stopped after {} steps", n),
            Self::Error(e) => e.fmt(f),
        }
    }
}
