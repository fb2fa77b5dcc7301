use kosimp::decode::{mk_expr_list, mk_identifier_list, mk_location_expr, mk_simp_tactic_expr, Error, SIMP_TAC};
use kosimp::elab::identity;
use kosimp::{Location, Name, Registry, Term};

fn c(s: &str) -> Term {
    Term::constant(s)
}

fn none() -> Term {
    Term::app(c("option.none"), c("tactic"))
}

#[test]
fn four_arguments() {
    let args = [
        mk_expr_list([Term::local("h")]),
        mk_identifier_list([]),
        mk_identifier_list([]),
        none(),
    ];
    let tm = c(SIMP_TAC).apps(args);
    let reg = Registry::initialize();
    assert_eq!(reg.expr_to_tactic(&identity(), &tm).unwrap_err(), Error::ArgumentCount);
}

#[test]
fn six_arguments() {
    let tm = mk_simp_tactic_expr(Vec::new(), &[], &[], None, &Location::WholeGoal);
    let tm = Term::app(tm, c("extra"));
    let reg = Registry::initialize();
    assert_eq!(reg.expr_to_tactic(&identity(), &tm).unwrap_err(), Error::ArgumentCount);
}

#[test]
fn malformed_location() {
    let args = [
        mk_expr_list([]),
        mk_identifier_list([]),
        mk_identifier_list([]),
        none(),
        Term::app(c("tactic.expr"), c("tactic.location.nowhere")),
    ];
    let tm = c(SIMP_TAC).apps(args);
    let reg = Registry::initialize();
    let err = reg.expr_to_tactic(&identity(), &tm).unwrap_err();
    assert_eq!(err, Error::ArgumentShape(5));
    assert_eq!(err.to_string(), "invalid tactic, invalid argument #5");
}

#[test]
fn nested_pre_tactic() {
    let reg = Registry::initialize();
    let loc = Location::Hypotheses(Vec::from([Name::new("h")]));

    let pre = Term::app(c("tactic.try"), c("tactic.refl"));
    let tm = mk_simp_tactic_expr([Term::local("h")], &[], &[], Some(pre), &loc);
    assert!(reg.expr_to_tactic(&identity(), &tm).is_ok());

    let pre = c("tactic.bogus");
    let tm = mk_simp_tactic_expr([Term::local("h")], &[], &[], Some(pre), &loc);
    let err = reg.expr_to_tactic(&identity(), &tm).unwrap_err();
    assert_eq!(err, Error::UnknownTactic(Name::new("tactic.bogus")));
}

#[test]
fn empty_registry() {
    let tm = mk_simp_tactic_expr(Vec::new(), &[], &[], None, &Location::Everywhere);
    let err = Registry::new().expr_to_tactic(&identity(), &tm).unwrap_err();
    assert_eq!(err, Error::UnknownTactic(Name::new(SIMP_TAC)));
}

#[test]
fn location_expressions() {
    let goal = mk_location_expr(&Location::WholeGoal);
    assert_eq!(goal, Term::app(c("tactic.expr"), c("tactic.location.goal")));
    let everywhere = mk_location_expr(&Location::Everywhere);
    assert_eq!(everywhere, Term::app(c("tactic.expr"), c("tactic.location.everywhere")));
}
