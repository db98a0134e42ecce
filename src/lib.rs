/*! cartesian-chase implements the categorical chase for constructing free
and weakly-free models of regular and cartesian theories.

A theory is a multi-sorted relational [signature](syntax::Signature)
together with a list of [embedded dependencies](syntax::Dependency); a
model-in-progress is an [instance](instance::Instance). Starting from a
caller-supplied seed, the [chase](chase) repeatedly detects triggers
(matches of a dependency's antecedent) and applies rewrite steps, minting
fresh witnesses for tuple-generating dependencies and quotienting elements
for equality-generating ones, until no trigger is active or a bound is
reached. Cartesian theories (every dependency demanding a unique witness)
yield genuine free models; general regular theories yield weakly-free
ones.

The crate is an executable companion to constructions from partial Horn
logic and categorical logic; it favors small, checkable models over
performance. */

pub mod chase;
pub mod instance;
pub mod syntax;
pub mod trace;

pub use syntax::Error;

#[cfg(test)]
mod test_prelude;
