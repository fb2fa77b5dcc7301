//! First-order matching of rule left-hand sides.

use crate::{Comb, Term};

/// Match a pattern against a term, assigning pattern variables in `inst`.
///
/// The pattern is the left-hand side of a rule with `inst.len()` pattern variables,
/// where pattern variable `i` is referred to by
/// `BVar(k + inst.len() - 1 - i)` under `k` binders of the pattern.
/// Repeated occurrences of a pattern variable must match equal terms.
/// A pattern variable never matches a term that refers to a variable bound in the pattern.
///
/// ~~~
/// # use kosimp::Term;
/// # use kosimp::simp::matching::matches;
/// let (f, a, b) = (Term::constant("f"), Term::constant("a"), Term::constant("b"));
/// // f x x
/// let pat = f.clone().apps([Term::BVar(0), Term::BVar(0)]);
///
/// let mut inst = vec![None];
/// assert!(matches(&pat, &f.clone().apps([a.clone(), a.clone()]), 0, &mut inst));
/// assert_eq!(inst, [Some(a.clone())]);
///
/// let mut inst = vec![None];
/// assert!(!matches(&pat, &f.apps([a, b]), 0, &mut inst));
/// ~~~
pub fn matches(pat: &Term, tm: &Term, k: usize, inst: &mut [Option<Term>]) -> bool {
    match pat {
        Term::BVar(j) if *j >= k => {
            let i = match inst.len().checked_sub(j - k + 1) {
                Some(i) => i,
                None => return false,
            };
            if tm.has_loose_bvars_below(k) {
                return false;
            }
            let v = tm.clone().unshift(k);
            match &inst[i] {
                Some(w) => *w == v,
                None => {
                    inst[i] = Some(v);
                    true
                }
            }
        }
        Term::Comb(pc) => match (&**pc, tm) {
            (Comb::Appl(pf, pa), Term::Comb(c)) => match &**c {
                Comb::Appl(f, a) => matches(pf, f, k, inst) && matches(pa, a, k, inst),
                _ => false,
            },
            (Comb::Bind(pb, parg, pbody), Term::Comb(c)) => match &**c {
                Comb::Bind(b, arg, body) => {
                    pb == b && matches(&parg.ty, &arg.ty, k, inst) && matches(pbody, body, k + 1, inst)
                }
                _ => false,
            },
            _ => false,
        },
        _ => pat == tm,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn under_binder() {
        // pattern: λ y : A. f y x, where x is the only pattern variable
        let (f, ty) = (Term::constant("f"), Term::constant("A"));
        let pat = Term::lambda("y", ty.clone(), f.clone().apps([Term::BVar(0), Term::BVar(1)]));
        let c = Term::constant("c");
        let tm = Term::lambda("z", ty.clone(), f.clone().apps([Term::BVar(0), c.clone()]));
        let mut inst = Vec::from([None]);
        assert!(matches(&pat, &tm, 0, &mut inst));
        assert_eq!(inst, [Some(c)]);

        // x must not capture the bound variable
        let tm = Term::lambda("z", ty, f.apps([Term::BVar(0), Term::BVar(0)]));
        let mut inst = Vec::from([None]);
        assert!(!matches(&pat, &tm, 0, &mut inst));
    }

    #[test]
    fn constants_and_locals() {
        let mut inst: Vec<Option<Term>> = Vec::new();
        assert!(matches(&Term::local("a"), &Term::local("a"), 0, &mut inst));
        assert!(!matches(&Term::local("a"), &Term::constant("a"), 0, &mut inst));
    }
}
