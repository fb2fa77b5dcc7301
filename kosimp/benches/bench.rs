use criterion::{criterion_group, criterion_main, Criterion};
use kosimp::decode::mk_simp_tactic_expr;
use kosimp::elab::identity;
use kosimp::{Context, Environment, Goal, IoState, LocalDecl, Location, ProofState, Registry, Term};

/// `f (f (... (f a)))` with `n` applications of `f`
fn tower(n: usize) -> Term {
    let f = Term::constant("f");
    (0..n).fold(Term::constant("a"), |acc, _| Term::app(f.clone(), acc))
}

/// `(λ x : A. x) ((λ x : A. x) (... a))` with `n` redexes
fn redexes(n: usize) -> Term {
    let id = Term::lambda("x", Term::constant("A"), Term::BVar(0));
    (0..n).fold(Term::constant("a"), |acc, _| Term::app(id.clone(), acc))
}

/// Run `simp [h]` with `h : a = b` on the given target.
fn simp(target: &Term) -> ProofState {
    let mut ctx = Context::new();
    let h = Term::mk_eq(Term::constant("A"), Term::constant("a"), Term::constant("b"));
    ctx.push(LocalDecl::new("h", h));
    let state = ProofState::from_goal(Goal::new("g", ctx, target.clone()));

    let invocation = mk_simp_tactic_expr([Term::local("h")], &[], &[], None, &Location::WholeGoal);
    let tactic = Registry::initialize()
        .expr_to_tactic(&identity(), &invocation)
        .unwrap();
    let (env, ios) = (Environment::new(), IoState::default());
    tactic.call(&env, &ios, state).next().unwrap()
}

pub fn criterion_benchmark(c: &mut Criterion) {
    let tower = tower(200);
    let redexes = redexes(200);
    let shared = Term::constant("g").apps([tower.clone(), tower.clone(), tower.clone()]);

    c.bench_function("tower", |b| b.iter(|| simp(&tower)));
    c.bench_function("beta", |b| b.iter(|| simp(&redexes)));
    c.bench_function("shared", |b| b.iter(|| simp(&shared)));
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
