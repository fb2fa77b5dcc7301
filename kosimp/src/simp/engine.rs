//! Rewriting of terms to normal form.
//!
//! The simplifier traverses a term and rewrites its subterms with
//! built-in reductions (beta, eta, zeta, iota) and rewrite rules.
//! At every node, built-in reductions are tried before rules, and
//! rules are tried in order, where the first matching rule wins.
//! Every rewrite is recorded in a [`Certificate`],
//! such that the result of simplifying a term `t` to `t'`
//! comes with a proof of `t = t'`.

use super::cert::{self, Certificate, Reduction};
use super::rule::{NameFilter, Origin, Rule};
use super::{matching, reduce, SimpConfig};
use crate::constants::{EQ_MP, EQ_MPR, EQ_REFL};
use crate::io_state::{Diagnostic, TraceRecord};
use crate::location::Site;
use crate::tactic::Tactic;
use crate::term::Arg;
use crate::{Binder, Context, Environment, Error, Goal, IoState, LocalDecl, Name};
use crate::{NameGenerator, ProofState, Stack, Substitution, Term};
use std::rc::Rc;
use fnv::{FnvHashMap, FnvHashSet};
use lazy_st::Thunk;

/// Simplified term together with a proof that it equals the original term.
///
/// If the term was left unchanged, there is no certificate.
#[derive(Clone, Debug)]
pub struct Simp {
    pub term: Term,
    pub cert: Option<Rc<Certificate>>,
}

impl Simp {
    pub fn refl(term: Term) -> Self {
        Self { term, cert: None }
    }

    pub fn is_refl(&self) -> bool {
        self.cert.is_none()
    }

    /// Given `self` for `t ⟶ u` and `other` for `u ⟶ v`, return `t ⟶ v`.
    pub fn trans(self, other: Self) -> Self {
        Self {
            term: other.term,
            cert: cert::trans(self.cert, other.cert),
        }
    }

    /// Proof of `original = self.term`.
    pub fn proof(&self, original: &Term) -> Term {
        match &self.cert {
            Some(c) => c.to_term(),
            None => Term::app(Term::constant(EQ_REFL), original.clone()),
        }
    }
}

/// Rules obtained from the hypotheses of a goal.
struct AssumptionRules {
    ctx: Context,
    filter: NameFilter,
}

impl lazy_st::Evaluate<Vec<Rule>> for AssumptionRules {
    fn evaluate(self) -> Vec<Rule> {
        let rules: Vec<_> = self
            .ctx
            .iter()
            .filter(|d| self.filter.allows(Some(&d.name)))
            .filter_map(|d| {
                let name = d.name.clone();
                let proof = Term::Local(name.clone());
                Rule::new(Some(name), Origin::Assumption, proof, d.ty.clone()).ok()
            })
            .collect();
        debug!("built {} rules from assumptions", rules.len());
        rules
    }
}

/// Simplifier for the terms of one goal.
///
/// The step budget is shared between all terms simplified by the same simplifier.
/// Memoised results are only reused for the same site and local context.
pub struct Simplifier<'a> {
    env: &'a Environment,
    ios: &'a IoState,
    cfg: SimpConfig,
    rules: Rc<[Rule]>,
    assumptions: Rc<Thunk<AssumptionRules, Vec<Rule>>>,
    discharger: Option<Tactic>,
    ctx: Context,
    subst: Substitution,
    ngen: NameGenerator,
    cache: FnvHashMap<Term, Simp>,
    steps: usize,
    exhausted: bool,
    site: Site,
}

impl<'a> Simplifier<'a> {
    /// Create a simplifier for terms in the context `ctx`.
    ///
    /// Only rules allowed by `filter` are used.
    /// If assumptions are enabled in the configuration,
    /// the hypotheses of `ctx` are used as further rules.
    pub fn new(
        env: &'a Environment,
        ios: &'a IoState,
        cfg: SimpConfig,
        ctx: &Context,
        rules: Vec<Rule>,
        filter: NameFilter,
    ) -> Self {
        let rules: Rc<[Rule]> = rules
            .into_iter()
            .filter(|r| filter.allows(r.name.as_ref()))
            .collect();
        let assumptions = AssumptionRules {
            ctx: ctx.clone(),
            filter,
        };
        Self {
            env,
            ios,
            cfg,
            rules,
            assumptions: Rc::new(Thunk::new(assumptions)),
            discharger: None,
            ctx: ctx.clone(),
            subst: Substitution::new(),
            ngen: NameGenerator::new("_simp"),
            cache: Default::default(),
            steps: 0,
            exhausted: false,
            site: Site::Target,
        }
    }

    /// Prove side conditions of rules with the given tactic,
    /// starting from the substitution `subst`.
    pub fn with_discharger(self, discharger: Option<Tactic>, subst: Substitution) -> Self {
        Self {
            discharger,
            subst,
            ..self
        }
    }

    /// Use the given generator for fresh locals and goal tags.
    pub fn with_ngen(self, ngen: NameGenerator) -> Self {
        Self { ngen, ..self }
    }

    /// Number of rewrite steps performed so far.
    pub fn steps(&self) -> usize {
        self.steps
    }

    /// Return true if the simplifier stopped because it reached the maximal number of steps.
    pub fn is_exhausted(&self) -> bool {
        self.exhausted
    }

    /// Simplify a term that was taken from the given site of the goal.
    ///
    /// Unless the simplifier runs in single-pass mode,
    /// the term is traversed until it does not change any more.
    pub fn simp(&mut self, site: Site, tm: &Term) -> Simp {
        // a hypothesis is not rewritten with itself, so rules depend on the site
        if self.site != site {
            self.cache.clear();
        }
        self.site = site;
        let mut seen = FnvHashSet::default();
        seen.insert(tm.clone());
        let mut r = Simp::refl(tm.clone());
        loop {
            let pass = self.visit(&r.term);
            let done = pass.is_refl()
                || self.cfg.single_pass
                || self.exhausted
                || !seen.insert(pass.term.clone());
            r = r.trans(pass);
            if done {
                return r;
            }
        }
    }

    /// Simplify the given terms of a goal.
    ///
    /// Return the goal with simplified target and hypotheses, and
    /// a substitution where the tag of the old goal is assigned a proof that
    /// refers to the tag of the new goal.
    /// If no term changed, return the goal and the substitution unchanged.
    pub fn simp_goal(
        &mut self,
        goal: &Goal,
        targets: Vec<(Site, Term)>,
        subst: Substitution,
    ) -> Result<(Goal, Substitution), Error> {
        let mut ctx = goal.ctx.clone();
        let mut target = None;
        let mut hyps = Vec::new();
        for (site, tm) in targets {
            let r = self.simp(site.clone(), &tm);
            if r.is_refl() {
                continue;
            }
            let proof = r.proof(&tm);
            match site {
                Site::Target => target = Some((r.term, proof)),
                Site::Hypothesis(h) => {
                    let value = ctx.get(h.as_str()).and_then(|d| d.value.clone());
                    let value = value.map(|v| Term::constant(EQ_MP).apps([proof.clone(), v]));
                    ctx = ctx
                        .replace(h.as_str(), r.term.clone(), value)
                        .ok_or_else(|| Error::UnknownHypothesis(h.clone()))?;
                    hyps.push((h, r.term, proof));
                }
            }
        }
        debug!("simplifier performed {} steps", self.steps);
        if target.is_none() && hyps.is_empty() {
            return Ok((goal.clone(), subst));
        }

        let tag = self.ngen.fresh();
        let new_target = match &target {
            Some((t, _)) => t.clone(),
            None => goal.target.clone(),
        };
        // the proof of the new goal refers to rewritten hypotheses by name,
        // so these are abstracted from it and bound to their transported old versions
        let (body, subst) = if hyps.is_empty() {
            (Term::Meta(tag.clone()), subst)
        } else {
            let d = self.ngen.fresh();
            let xs = hyps.iter().map(|(h, ..)| h.clone()).collect();
            let subst = subst.delay_abstraction(d.clone(), xs, tag.clone())?;
            (Term::Meta(d), subst)
        };
        let inner = hyps.into_iter().rev().fold(body, |acc, (h, ty, proof)| {
            let transported = Term::constant(EQ_MP).apps([proof, Term::Local(h.clone())]);
            Term::app(Term::bind(Binder::Let, h, ty, acc), transported)
        });
        let proof = match target {
            Some((_, p)) => Term::constant(EQ_MPR).apps([p, inner]),
            None => inner,
        };
        let subst = subst.assign(goal.tag.clone(), proof)?;
        Ok((Goal::new(tag, ctx, new_target), subst))
    }

    fn visit(&mut self, tm: &Term) -> Simp {
        if self.exhausted {
            return Simp::refl(tm.clone());
        }
        if self.cfg.memoize {
            if let Some(r) = self.cache.get(tm) {
                return r.clone();
            }
        }
        let r = if self.cfg.bottom_up {
            self.visit_bottom_up(tm)
        } else {
            self.visit_top_down(tm)
        };
        if self.cfg.memoize {
            self.cache.insert(tm.clone(), r.clone());
        }
        r
    }

    fn visit_bottom_up(&mut self, tm: &Term) -> Simp {
        let mut r = self.visit_children(tm);
        while let Some(step) = self.rewrite_top(&r.term) {
            r = r.trans(step);
            if self.cfg.single_pass {
                break;
            }
            let children = self.visit_children(&r.term);
            r = r.trans(children);
        }
        r
    }

    fn visit_top_down(&mut self, tm: &Term) -> Simp {
        let mut r = Simp::refl(tm.clone());
        while let Some(step) = self.rewrite_top(&r.term) {
            r = r.trans(step);
            if self.cfg.single_pass {
                break;
            }
        }
        let children = self.visit_children(&r.term);
        r.trans(children)
    }

    fn visit_children(&mut self, tm: &Term) -> Simp {
        if let Some((f, a)) = tm.get_appl() {
            let (rf, ra) = (self.visit(f), self.visit(a));
            if rf.is_refl() && ra.is_refl() {
                return Simp::refl(tm.clone());
            }
            let cert = Certificate::Congr {
                f: f.clone(),
                a: a.clone(),
                cf: rf.cert,
                ca: ra.cert,
            };
            let term = Term::app(rf.term, ra.term);
            Simp {
                term,
                cert: Some(Rc::new(cert)),
            }
        } else if let Some((binder, arg, body)) = tm.get_bind() {
            self.visit_binder(tm, binder, arg, body)
        } else {
            Simp::refl(tm.clone())
        }
    }

    /// Simplify the type and the body of a binder,
    /// where the body is opened with a fresh local.
    fn visit_binder(&mut self, tm: &Term, binder: Binder, arg: &Arg<Name, Term>, body: &Term) -> Simp {
        let rty = self.visit(&arg.ty);
        let x = self.ngen.fresh();
        let opened = body.clone().subst(&Term::Local(x.clone()));

        // results depend on the context, which the binder extends
        let (ctx, cache) = (self.ctx.clone(), std::mem::take(&mut self.cache));
        self.ctx.push(LocalDecl::new(x.clone(), arg.ty.clone()));
        let rbody = self.visit(&opened);
        self.ctx = ctx;
        self.cache = cache;

        if rty.is_refl() && rbody.is_refl() {
            return Simp::refl(tm.clone());
        }
        let new_body = rbody.term.abstract_local(&x);
        let term = Term::bind(binder, arg.id.clone(), rty.term, new_body);
        let cert = Certificate::Bind {
            binder,
            x,
            ty: arg.ty.clone(),
            body: opened,
            cty: rty.cert,
            cbody: rbody.cert,
        };
        Simp {
            term,
            cert: Some(Rc::new(cert)),
        }
    }

    /// Rewrite the root of the term once.
    fn rewrite_top(&mut self, tm: &Term) -> Option<Simp> {
        if self.steps >= self.cfg.max_steps {
            self.exhaust();
            return None;
        }
        if self.cfg.beta_eta {
            if let Some((kind, t)) = reduce::beta(tm) {
                return Some(self.reduced(kind, tm, t));
            }
            if let Some(t) = reduce::eta(tm) {
                return Some(self.reduced(Reduction::Eta, tm, t));
            }
        }
        if self.cfg.iota {
            if let Some(t) = reduce::iota(self.env, tm) {
                return Some(self.reduced(Reduction::Iota, tm, t));
            }
        }
        let rules = self.rules.clone();
        if let Some(r) = self.rewrite_with(&rules, tm) {
            return Some(r);
        }
        if self.cfg.assumptions {
            let assumptions = self.assumptions.clone();
            return self.rewrite_with(&assumptions, tm);
        }
        None
    }

    fn rewrite_with(&mut self, rules: &[Rule], tm: &Term) -> Option<Simp> {
        for rule in rules {
            // a hypothesis is never rewritten with itself
            if let Site::Hypothesis(h) = &self.site {
                if rule.is_from_local(h) {
                    continue;
                }
            }
            if let Some((rhs, cert)) = self.instantiate(rule, tm) {
                return Some(self.record(rule.display_name(), tm, rhs, cert));
            }
        }
        None
    }

    /// Match the rule against the term and
    /// return the instantiated right-hand side with its certificate.
    fn instantiate(&mut self, rule: &Rule, tm: &Term) -> Option<(Term, Certificate)> {
        let mut inst = vec![None; rule.ctx.len()];
        if !matching::matches(&rule.lhs, tm, 0, &mut inst) {
            return None;
        }
        for i in rule.side_conditions() {
            let known: Stack<Term> = inst[..i].iter().cloned().collect::<Option<_>>()?;
            let ty = rule.ctx[i].ty.clone().psubst(&known);
            inst[i] = Some(self.discharge(ty)?);
        }
        let args: Vec<Term> = inst.into_iter().collect::<Option<_>>()?;
        let rhs = rule.rhs.clone().psubst(&Stack::from(args.clone()));
        if rhs == *tm {
            return None;
        }
        let proof = rule.proof.clone().apps(args);
        let relation = rule.relation;
        Some((rhs, Certificate::Lemma { relation, proof }))
    }

    /// Prove a side condition with the discharger.
    fn discharge(&mut self, ty: Term) -> Option<Term> {
        let tac = self.discharger.clone()?;
        let tag = self.ngen.fresh();
        let goal = Goal::new(tag.clone(), self.ctx.clone(), ty);
        let s = ProofState::new(im::vector![goal], self.subst.clone(), self.ngen.mk_child());
        let s = tac.call(self.env, self.ios, s).next()?;
        if !s.goals().is_empty() {
            return None;
        }
        let proof = s.subst().instantiate(Term::Meta(tag));
        if proof.has_meta() {
            return None;
        }
        trace!("discharged side condition with {}", proof);
        Some(proof)
    }

    fn reduced(&mut self, kind: Reduction, before: &Term, after: Term) -> Simp {
        let lhs = before.clone();
        self.record(kind.name(), before, after, Certificate::Defeq { kind, lhs })
    }

    fn record(&mut self, rule: Name, before: &Term, after: Term, cert: Certificate) -> Simp {
        self.steps += 1;
        trace!("{} at {}: {} ⟶ {}", rule, self.site, before, after);
        if self.cfg.trace {
            self.ios.report(Diagnostic::Rewrite(TraceRecord {
                rule,
                site: self.site.clone(),
                before: before.clone(),
                after: after.clone(),
            }));
        }
        Simp {
            term: after,
            cert: Some(Rc::new(cert)),
        }
    }

    fn exhaust(&mut self) {
        if !self.exhausted {
            self.exhausted = true;
            debug!("simplifier stopped after {} steps", self.cfg.max_steps);
            if self.cfg.trace {
                self.ios.report(Diagnostic::StepLimit(self.cfg.max_steps));
            }
        }
    }
}
