use kosimp::decode::{mk_simp_tactic_expr, SimpArgs};
use kosimp::elab::{elaborate_fn, identity};
use kosimp::io_state::{Diagnostic, Diagnostics};
use kosimp::simp::mk_simp_tactic;
use kosimp::tactic::try_tactic;
use kosimp::{Context, Environment, Error, Goal, IoState, LocalDecl, Location, Name, Options};
use kosimp::{NameGenerator, ProofState, Registry, Substitution, Term};
use std::rc::Rc;

fn init() {
    let _ = env_logger::Builder::from_env("LOG").is_test(true).try_init();
}

fn c(s: &str) -> Term {
    Term::constant(s)
}

fn state() -> ProofState {
    let mut ctx = Context::new();
    ctx.push(LocalDecl::new("h", Term::mk_eq(c("A"), c("a"), c("b"))));
    ProofState::from_goal(Goal::new("g", ctx, Term::app(c("f"), c("a"))))
}

fn collecting() -> (Rc<Diagnostics>, IoState) {
    let out = Rc::new(Diagnostics::new());
    (out.clone(), IoState::new(Options::new(), out))
}

#[test]
fn unknown_hypothesis_fails_atomically() {
    init();
    let loc = Location::Hypotheses(Vec::from([Name::new("nonexistent")]));
    let tm = mk_simp_tactic_expr([Term::local("h")], &[], &[], None, &loc);
    let simp = Registry::initialize().expr_to_tactic(&identity(), &tm).unwrap();
    let env = Environment::new();
    let (out, ios) = collecting();
    let s = state();

    assert!(simp.call(&env, &ios, s.clone()).next().is_none());
    let err = Error::UnknownHypothesis(Name::new("nonexistent"));
    assert_eq!(out.take(), [Diagnostic::Error(err)]);

    // the original state is left untouched
    let s2 = try_tactic(simp).call(&env, &ios, s.clone()).next().unwrap();
    assert!(s2.ptr_eq(&s));
    assert!(s.subst().is_empty());
}

#[test]
fn elaboration_failure_is_reported() {
    init();
    let elab = elaborate_fn(|_, _, tm, _, _, _| Err(Error::Elaboration(format!("cannot elaborate {}", tm))));
    let args = SimpArgs {
        lemmas: Vec::from([Term::local("h")]),
        include: Vec::new(),
        exclude: Vec::new(),
        pre_tac: None,
        location: Location::WholeGoal,
    };
    let simp = mk_simp_tactic(elab, args);
    let env = Environment::new();
    let (out, ios) = collecting();
    assert!(simp.call(&env, &ios, state()).next().is_none());
    assert_eq!(out.take(), [Diagnostic::Error(Error::Elaboration("cannot elaborate h".into()))]);
}

#[test]
fn residual_constraints_abort() {
    init();
    let elab = elaborate_fn(|_, _, tm, _, subst, _| Ok((tm.clone(), subst, Vec::from([(c("x"), c("y"))]))));
    let tm = mk_simp_tactic_expr([Term::local("h")], &[], &[], None, &Location::WholeGoal);
    let simp = Registry::initialize().expr_to_tactic(&elab, &tm).unwrap();
    let (out, ios) = collecting();
    assert!(simp.call(&Environment::new(), &ios, state()).next().is_none());
    assert_eq!(out.take(), [Diagnostic::Error(Error::UnresolvedConstraints(1))]);
}

#[test]
fn no_goals() {
    init();
    let tm = mk_simp_tactic_expr(Vec::new(), &[], &[], None, &Location::WholeGoal);
    let simp = Registry::initialize().expr_to_tactic(&identity(), &tm).unwrap();
    let s = ProofState::new(im::Vector::new(), Substitution::new(), NameGenerator::default());
    let env = Environment::new();

    let (out, ios) = collecting();
    assert!(simp.call(&env, &ios, s.clone()).next().is_none());
    assert!(out.take().is_empty());

    let (out, ios) = collecting();
    let ios = ios.with_strict(true);
    assert!(simp.call(&env, &ios, s).next().is_none());
    assert_eq!(out.take(), [Diagnostic::Error(Error::NoOpenGoals)]);
}

#[test]
fn simp_is_lazy() {
    init();
    let loc = Location::Hypotheses(Vec::from([Name::new("nonexistent")]));
    let tm = mk_simp_tactic_expr(Vec::new(), &[], &[], None, &loc);
    let simp = Registry::initialize().expr_to_tactic(&identity(), &tm).unwrap();
    let (out, ios) = collecting();
    let seq = simp.call(&Environment::new(), &ios, state());
    // nothing has run yet
    assert!(out.take().is_empty());
    assert_eq!(seq.count(), 0);
    assert_eq!(out.take().len(), 1);
}

#[test]
fn registered_combinators() {
    init();
    let reg = Registry::initialize();
    let elab = identity();
    let env = Environment::new();
    let ios = IoState::default();
    let count = |tm: Term| {
        let t = reg.expr_to_tactic(&elab, &tm).unwrap();
        t.call(&env, &ios, state()).count()
    };
    let app2 = |f: &str, a: Term, b: Term| c(f).apps([a, b]);

    assert_eq!(count(c("tactic.id")), 1);
    assert_eq!(count(c("tactic.fail")), 0);
    assert_eq!(count(c("tactic.now")), 0);
    assert_eq!(count(Term::app(c("tactic.try"), c("tactic.fail"))), 1);
    assert_eq!(count(app2("tactic.or_else", c("tactic.fail"), c("tactic.id"))), 1);
    assert_eq!(count(app2("tactic.and_then", c("tactic.id"), c("tactic.fail"))), 0);

    // simp followed by refl closes `a = b` given `h : a = b`
    let mut ctx = Context::new();
    ctx.push(LocalDecl::new("h", Term::mk_eq(c("A"), c("a"), c("b"))));
    let goal = Goal::new("g", ctx, Term::mk_eq(c("A"), c("a"), c("b")));
    let simp = mk_simp_tactic_expr([Term::local("h")], &[], &[], None, &Location::WholeGoal);
    let t = reg.expr_to_tactic(&elab, &app2("tactic.and_then", simp, c("tactic.now"))).unwrap();
    let s = t.call(&env, &ios, ProofState::from_goal(goal)).next().unwrap();
    assert!(s.goals().is_empty());
    let proof = s.subst().instantiate(Term::Meta(Name::new("g")));
    assert!(!proof.has_meta());
}
