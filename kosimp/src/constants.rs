//! Names of constants that the simplifier recognises or produces.
//!
//! Proof terms built from these constants omit implicit arguments,
//! such as the type argument of `eq.refl`.

/// `eq A a b`
pub const EQ: &str = "eq";
/// `iff a b`
pub const IFF: &str = "iff";

/// `eq.refl a : a = a`
pub const EQ_REFL: &str = "eq.refl";
/// `iff.refl a : a ↔ a`
pub const IFF_REFL: &str = "iff.refl";
/// `eq.trans (p : a = b) (q : b = c) : a = c`
pub const EQ_TRANS: &str = "eq.trans";
/// `eq.mp (p : a = b) (x : a) : b`
pub const EQ_MP: &str = "eq.mp";
/// `eq.mpr (p : a = b) (x : b) : a`
pub const EQ_MPR: &str = "eq.mpr";

/// `congr (p : f = g) (q : a = b) : f a = g b`
pub const CONGR: &str = "congr";
/// `congr_fun (p : f = g) a : f a = g a`
pub const CONGR_FUN: &str = "congr_fun";
/// `congr_arg f (q : a = b) : f a = f b`
pub const CONGR_ARG: &str = "congr_arg";
/// `propext (p : a ↔ b) : a = b`
pub const PROPEXT: &str = "propext";

/// `lambda_congr (p : A = A') (q : Π x, b x = b' x) : (λ x : A. b x) = (λ x : A'. b' x)`
pub const LAMBDA_CONGR: &str = "lambda_congr";
/// `pi_congr (p : A = A') (q : Π x, B x = B' x) : (Π x : A. B x) = (Π x : A'. B' x)`
pub const PI_CONGR: &str = "pi_congr";
/// Like `lambda_congr`, for `let` binders.
pub const LET_CONGR: &str = "let_congr";
