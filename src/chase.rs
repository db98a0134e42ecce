//! Implements the categorical chase: the trigger-detection / rewrite loop
//! that computes free and weakly-free models of regular and cartesian
//! theories, together with its execution strategies.
//!
//! ## Background
//! The engine operates on [regular theories][RegularTheory]: finite lists
//! of [embedded dependencies][Dependency] over a multi-sorted relational
//! [signature][crate::syntax::Signature]. A dependency reads
//!
//! ∀ x̄ . φ(x̄) → ∃ ȳ . ψ(x̄, ȳ)
//!
//! where φ and ψ are conjunctions of relation and equality atoms. A
//! dependency with no existential block whose consequent consists only of
//! equalities is an *equality-generating dependency* (EGD, a quotienting
//! rule); every other dependency is a *tuple-generating dependency* (TGD, a
//! witness-introducing rule). When every dependency of a theory demands a
//! *unique* witness block the theory is *cartesian*, and the chase computes
//! a genuine free model rather than a merely weakly-free one.
//!
//! ## Chase Step
//! Given a theory and a working [`Instance`], one round proceeds as
//! follows:
//!
//! 1. Each dependency's antecedent is frozen into a minimal witnessing
//!    structure, one representative element per class of variables merged
//!    by equality atoms.
//!
//! 2. Every structure-preserving assignment from the frozen antecedent into
//!    the working instance yields a [`Trigger`]. Triggers are valid only
//!    for the instance they were computed against and are recomputed after
//!    every rewrite.
//!
//! 3. A trigger is *active* when it does not factor through existing
//!    witnesses: for an EGD, some consequent equation is violated; for a
//!    TGD, no assignment of existing elements to the existential block
//!    satisfies the consequent.
//!
//! 4. Firing a TGD trigger mints one fresh element per class of existential
//!    variables and unions the consequent tuples into the instance. Firing
//!    EGD triggers quotients the instance by a union-find over the
//!    violated equations.
//!
//! The *standard* strategy fires one trigger per round; the *parallel*
//! strategy fires every active trigger of a round against the same
//! pre-round snapshot. Parallelism is logical simultaneity within a round,
//! not concurrent execution.
//!
//! ## Termination
//! A theory whose free model is infinite never reaches a fixpoint, so every
//! entry point is bounded by a round or step cap and returns whatever
//! instance exists when the cap is hit. Capped output is possibly
//! incomplete; callers choose caps appropriate to the expected model size.
//! [`chase_to_colimit`] approximates the filtered colimit of a fair chase
//! sequence by unioning a bounded chain of parallel rounds, and
//! [`semi_naive_fast_parallel_chase`] bounds re-matching cost by firing
//! only triggers that involve data produced since the previous round.
//!
//! [the chase]: https://en.wikipedia.org/wiki/Chase_(algorithm)

pub mod edits;
pub mod fold;
mod frozen;
mod step;

use crate::instance::{Element, ElementAllocator, Instance};
use crate::syntax::{Atom, Dependency, DependencyClass, Error, RegularTheory};
use crate::trace;
use either::Either;
use itertools::Itertools;
use std::{
    collections::{BTreeMap, BTreeSet},
    fmt,
};
use tracing::{debug, info, span, Level};

use self::edits::Edit;
use self::frozen::FrozenFront;

pub use self::frozen::Environment;

/// Witnesses that a dependency's antecedent matches somewhere in the
/// current instance: the index of the dependency in its theory and an
/// assignment of the universal context to concrete elements.
///
/// A trigger is valid only for the instance it was computed against; the
/// engine recomputes triggers after every instance-changing step.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Trigger {
    /// Is the index of the matched dependency in its theory.
    pub dependency: usize,

    /// Maps every universally quantified variable to an element.
    pub environment: Environment,
}

impl fmt::Display for Trigger {
    fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
        let mapping = self
            .environment
            .iter()
            .map(|(variable, element)| format!("{} -> {}", variable, element))
            .join(", ");
        write!(f, "d#{} with {{{}}}", self.dependency, mapping)
    }
}

/// Tags the universal property a chased model enjoys; returned by
/// [`chase_to_colimit`] and the reflectors.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Freedom {
    /// The model is free: it exists and is unique up to isomorphism. Only
    /// cartesian theories earn this tag.
    Free,

    /// The model is weakly free: it exists, without the uniqueness
    /// guarantee.
    WeaklyFree,
}

impl fmt::Display for Freedom {
    fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
        match self {
            Freedom::Free => write!(f, "free"),
            Freedom::WeaklyFree => write!(f, "weakly-free"),
        }
    }
}

/// Is the result of a colimit-style chase: the model together with the
/// universal property callers may rely on.
#[derive(Clone, Debug)]
pub struct Reflection {
    /// Is the chased model.
    pub model: Instance,

    /// Tags which universal-model guarantee holds for `model`.
    pub freedom: Freedom,
}

/// Is the result of the semi-naïve chase: the final instance and the
/// number of generating rounds consumed after the initial seeding pass.
#[derive(Debug)]
pub struct SemiNaive {
    /// Is the final instance.
    pub instance: Instance,

    /// Counts the generating (TGD-phase) rounds that applied work.
    pub rounds: usize,
}

/// Options for [`chase_regular`].
#[derive(Clone, Copy, Debug)]
pub struct ChaseOptions {
    /// Fires every active trigger per round when set; one trigger per round
    /// otherwise. Defaults to false.
    pub parallel: bool,

    /// Caps how many consecutive rounds a single dependency may fire while
    /// another dependency has an active trigger. Defaults to 32.
    pub fairness_rounds: usize,

    /// Caps the number of rounds. Defaults to 256.
    pub max_steps: usize,
}

impl Default for ChaseOptions {
    fn default() -> Self {
        Self {
            parallel: false,
            fairness_rounds: 32,
            max_steps: 256,
        }
    }
}

/// Options for [`chase_to_colimit`].
#[derive(Clone, Copy, Debug)]
pub struct ColimitOptions {
    /// Caps the length of the recorded chain. Defaults to 32.
    pub rounds: usize,

    /// Caps the parallel steps taken between consecutive chain entries.
    /// Defaults to 1.
    pub max_steps_per_round: usize,
}

impl Default for ColimitOptions {
    fn default() -> Self {
        Self {
            rounds: 32,
            max_steps_per_round: 1,
        }
    }
}

/// Options for [`canonical_fast_parallel_chase`].
#[derive(Clone, Copy, Debug)]
pub struct FastChaseOptions {
    /// Caps the number of parallel rounds. Defaults to 128.
    pub max_rounds: usize,

    /// Runs the equality-satisfaction oracle every this many rounds.
    /// Defaults to 4.
    pub egd_check_every: usize,

    /// Enables the early exit taken when every EGD is satisfied and the
    /// instance stopped growing. Defaults to true.
    pub stop_when_finite: bool,
}

impl Default for FastChaseOptions {
    fn default() -> Self {
        Self {
            max_rounds: 128,
            egd_check_every: 4,
            stop_when_finite: true,
        }
    }
}

/// Options for [`core_chase`].
#[derive(Clone, Copy, Debug)]
pub struct CoreChaseOptions {
    /// Caps the number of step-then-fold rounds. Defaults to 64.
    pub max_rounds: usize,
}

impl Default for CoreChaseOptions {
    fn default() -> Self {
        Self { max_rounds: 64 }
    }
}

/// Options for [`semi_naive_fast_parallel_chase`].
#[derive(Clone, Copy, Debug)]
pub struct SemiNaiveOptions {
    /// Caps the number of generating rounds. Defaults to 256.
    pub max_rounds: usize,
}

impl Default for SemiNaiveOptions {
    fn default() -> Self {
        Self { max_rounds: 256 }
    }
}

/// Enumerates every trigger of `theory` against `instance`, active or not.
pub fn triggers_of(theory: &RegularTheory, instance: &Instance) -> Vec<Trigger> {
    theory
        .dependencies
        .iter()
        .enumerate()
        .flat_map(|(dependency, d)| {
            FrozenFront::freeze(d)
                .matches(instance)
                .into_iter()
                .map(move |environment| Trigger {
                    dependency,
                    environment,
                })
        })
        .collect()
}

/// Returns true if `trigger` does not factor through existing witnesses of
/// `instance`, that is, if firing it would oblige the instance to change.
pub fn is_trigger_active(
    theory: &RegularTheory,
    instance: &Instance,
    trigger: &Trigger,
) -> bool {
    let dependency = &theory.dependencies[trigger.dependency];
    !frozen::head_satisfied(dependency, &trigger.environment, instance)
}

/// Enumerates the active triggers of `theory` against `instance`.
pub fn active_triggers(theory: &RegularTheory, instance: &Instance) -> Vec<Trigger> {
    triggers_of(theory, instance)
        .into_iter()
        .filter(|trigger| is_trigger_active(theory, instance, trigger))
        .collect()
}

/// Returns true if no equality-generating dependency of `theory` has an
/// active trigger against `instance`.
pub fn egds_satisfied(theory: &RegularTheory, instance: &Instance) -> bool {
    theory
        .dependencies
        .iter()
        .filter(|dependency| dependency.class() == DependencyClass::Egd)
        .all(|dependency| {
            FrozenFront::freeze(dependency)
                .matches(instance)
                .iter()
                .all(|environment| frozen::head_satisfied(dependency, environment, instance))
        })
}

// The result of applying a batch of triggers: the rewritten instance, the
// quotient renaming it was pushed through, and the number of triggers
// fired.
struct RoundOutcome {
    instance: Instance,
    renaming: BTreeMap<Element, Element>,
    fired: usize,
}

// Applies every active trigger (optionally restricted to a dependency set)
// against the same pre-round snapshot: TGD triggers extend a shared working
// copy sequentially, then one union-find batch discharges every violated
// equation.
fn parallel_round(
    theory: &RegularTheory,
    instance: &Instance,
    allocator: &mut ElementAllocator,
    restrict: Option<&BTreeSet<usize>>,
) -> RoundOutcome {
    let triggers: Vec<Trigger> = active_triggers(theory, instance)
        .into_iter()
        .filter(|trigger| restrict.map_or(true, |set| set.contains(&trigger.dependency)))
        .collect();
    let fired = triggers.len();

    let (egds, tgds): (Vec<Trigger>, Vec<Trigger>) =
        triggers.into_iter().partition_map(|trigger| {
            match theory.dependencies[trigger.dependency].class() {
                DependencyClass::Egd => Either::Left(trigger),
                DependencyClass::Tgd => Either::Right(trigger),
            }
        });

    let mut working = instance.clone();
    let mut equations = Vec::new();
    for trigger in &tgds {
        let dependency = &theory.dependencies[trigger.dependency];
        equations.extend(step::apply_tgd(
            &mut working,
            dependency,
            &trigger.environment,
            allocator,
        ));
    }
    if !tgds.is_empty() {
        debug!(event = trace::EXTEND, instance_id = working.get_id(), fired = tgds.len() as u64);
    }
    for trigger in &egds {
        let dependency = &theory.dependencies[trigger.dependency];
        equations.extend(consequent_equations(dependency, &trigger.environment));
    }

    let (quotiented, renaming) = step::apply_egd_batch(&working, &equations);
    if !renaming.is_empty() {
        debug!(
            event = trace::QUOTIENT,
            instance_id = quotiented.get_id(),
            merged = renaming.len() as u64,
        );
    }
    RoundOutcome {
        instance: quotiented,
        renaming,
        fired,
    }
}

// Applies a single trigger, the unit of the standard strategy.
fn apply_trigger(
    theory: &RegularTheory,
    instance: &Instance,
    trigger: &Trigger,
    allocator: &mut ElementAllocator,
) -> (Instance, BTreeMap<Element, Element>) {
    let dependency = &theory.dependencies[trigger.dependency];
    let mut working = instance.clone();
    let equations = match dependency.class() {
        DependencyClass::Tgd => {
            step::apply_tgd(&mut working, dependency, &trigger.environment, allocator)
        }
        DependencyClass::Egd => consequent_equations(dependency, &trigger.environment),
    };
    if equations.is_empty() {
        (working, BTreeMap::new())
    } else {
        step::apply_egd_batch(&working, &equations)
    }
}

// Interprets the consequent equations of an EGD under a trigger's
// environment; ill-typed and trivially-satisfied equations are dropped.
fn consequent_equations(
    dependency: &Dependency,
    environment: &Environment,
) -> Vec<(Element, Element)> {
    dependency
        .rhs
        .iter()
        .filter_map(|atom| match atom {
            Atom::Equal { left, right } if !frozen::ill_typed(dependency, left, right) => {
                match (environment.get(left), environment.get(right)) {
                    (Some(&l), Some(&r)) if l != r => Some((l, r)),
                    _ => None,
                }
            }
            _ => None,
        })
        .collect()
}

/// Chases `seed` with the dependencies of `theory` until no trigger is
/// active or `max_steps` rounds have been taken, and returns the final
/// instance. The seed is never mutated.
///
/// With `parallel` unset this is the standard chase: one active trigger
/// fires per round, scanning dependencies first-found with a fairness cap
/// (see [`ChaseOptions::fairness_rounds`]). With `parallel` set, every
/// active trigger of a round fires against the same pre-round snapshot.
///
/// Capped output is possibly incomplete: a caller that must distinguish
/// "converged" from "capped" re-runs the chase on the result and checks
/// that nothing changes.
pub fn chase_regular(theory: &RegularTheory, seed: &Instance, options: &ChaseOptions) -> Instance {
    let mut allocator = ElementAllocator::above(seed);
    let mut instance = seed.clone();

    if options.parallel {
        for round in 0..options.max_steps {
            let round_span = span!(
                Level::TRACE,
                trace::CHASE_ROUND,
                instance_id = instance.get_id(),
                round = round as u64,
            );
            let _enter = round_span.enter();
            let outcome = parallel_round(theory, &instance, &mut allocator, None);
            if outcome.fired == 0 {
                info!(event = trace::FIXPOINT, round = round as u64, instance = %outcome.instance);
                return outcome.instance;
            }
            if outcome.instance.same_shape(&instance) {
                return outcome.instance;
            }
            instance = outcome.instance;
        }
        info!(event = trace::CAPPED, instance = %instance);
        return instance;
    }

    let mut last_fired: Option<usize> = None;
    let mut consecutive = 0;
    for round in 0..options.max_steps {
        let round_span = span!(
            Level::TRACE,
            trace::CHASE_ROUND,
            instance_id = instance.get_id(),
            round = round as u64,
        );
        let _enter = round_span.enter();

        let triggers = active_triggers(theory, &instance);
        if triggers.is_empty() {
            info!(event = trace::FIXPOINT, round = round as u64, instance = %instance);
            return instance;
        }
        let chosen = select_fair(&triggers, last_fired, consecutive, options.fairness_rounds);
        let trigger = &triggers[chosen];
        info!(
            event = trace::FIRE,
            dependency = trigger.dependency as u64,
            mapping = %trigger,
        );

        let (next, _renaming) = apply_trigger(theory, &instance, trigger, &mut allocator);
        if next.same_shape(&instance) {
            return next;
        }
        consecutive = if last_fired == Some(trigger.dependency) {
            consecutive + 1
        } else {
            1
        };
        last_fired = Some(trigger.dependency);
        instance = next;
    }
    info!(event = trace::CAPPED, instance = %instance);
    instance
}

// Triggers arrive in dependency order, so index 0 is the first-found
// trigger. A dependency that has fired `fairness_rounds` times in a row
// yields to the first trigger of any other dependency.
fn select_fair(
    triggers: &[Trigger],
    last_fired: Option<usize>,
    consecutive: usize,
    fairness_rounds: usize,
) -> usize {
    if let Some(last) = last_fired {
        if consecutive >= fairness_rounds {
            if let Some(other) = triggers.iter().position(|t| t.dependency != last) {
                return other;
            }
        }
    }
    0
}

// One link of a chase chain: the instance after the round and the quotient
// renaming the round pushed earlier elements through.
struct ChainLink {
    instance: Instance,
    renaming: BTreeMap<Element, Element>,
}

// Records the chain of a bounded fair run of the parallel chase, stopping
// early when two consecutive entries are structurally identical.
fn colimit_chain(
    theory: &RegularTheory,
    seed: &Instance,
    options: &ColimitOptions,
    allocator: &mut ElementAllocator,
) -> Vec<ChainLink> {
    let mut chain = vec![ChainLink {
        instance: seed.clone(),
        renaming: BTreeMap::new(),
    }];
    for _round in 0..options.rounds {
        let mut working = chain.last().expect("chain is never empty").instance.clone();
        let mut renaming: BTreeMap<Element, Element> = BTreeMap::new();
        for _step in 0..options.max_steps_per_round {
            let outcome = parallel_round(theory, &working, allocator, None);
            if outcome.fired == 0 {
                break;
            }
            for representative in renaming.values_mut() {
                if let Some(next) = outcome.renaming.get(representative) {
                    *representative = *next;
                }
            }
            for (from, to) in &outcome.renaming {
                renaming.entry(*from).or_insert(*to);
            }
            let changed = !outcome.instance.same_shape(&working);
            working = outcome.instance;
            if !changed {
                break;
            }
        }
        let stalled = working.same_shape(&chain.last().expect("chain is never empty").instance);
        chain.push(ChainLink {
            instance: working,
            renaming,
        });
        if stalled {
            break;
        }
    }
    chain
}

/// Approximates the filtered colimit of a fair chase sequence: runs up to
/// `rounds` parallel-chase rounds, records the instance after each into a
/// chain, and takes the pointwise union of the whole chain (pushing every
/// entry through the quotients of later rounds, so merged elements union
/// onto their representatives). Because the chase only adds elements and
/// tuples, this union is the colimit of the chain.
///
/// The result is tagged [`Freedom::Free`] when every dependency of the
/// theory is cartesian and [`Freedom::WeaklyFree`] otherwise.
pub fn chase_to_colimit(
    theory: &RegularTheory,
    seed: &Instance,
    options: &ColimitOptions,
) -> Reflection {
    let mut allocator = ElementAllocator::above(seed);
    let chain = colimit_chain(theory, seed, options, &mut allocator);

    let mut model = chain[0].instance.clone();
    for link in &chain[1..] {
        model = model.rename(&link.renaming);
        model.union_in_place(&link.instance);
    }

    let freedom = if theory.is_cartesian() {
        Freedom::Free
    } else {
        Freedom::WeaklyFree
    };
    info!(event = trace::MODEL, freedom = %freedom, instance = %model);
    Reflection { model, freedom }
}

/// Runs the core-chase strategy: each round applies one parallel chase step
/// and then folds the result, protecting every element of the seed so
/// caller-supplied data is never merged away. Stops at a fold fixpoint or
/// after `max_rounds` rounds.
pub fn core_chase(theory: &RegularTheory, seed: &Instance, options: &CoreChaseOptions) -> Instance {
    let mut allocator = ElementAllocator::above(seed);
    let mut instance = seed.clone();
    for round in 0..options.max_rounds {
        let (folded, _renaming) = fold::core_chase_round(
            |i| parallel_round(theory, i, &mut allocator, None).instance,
            &instance,
            fold::FoldKind::UnderSeed(seed),
        );
        if folded.same_shape(&instance) {
            info!(event = trace::FIXPOINT, round = round as u64, instance = %folded);
            return folded;
        }
        instance = folded;
    }
    info!(event = trace::CAPPED, instance = %instance);
    instance
}

/// Runs the canonical fast parallel chase: up to `max_rounds` parallel
/// rounds with an early-exit oracle. The run stops as soon as no trigger is
/// active; in addition, every `egd_check_every` rounds (when
/// `stop_when_finite` is set) it stops if every EGD is satisfied and the
/// instance has stopped growing.
pub fn canonical_fast_parallel_chase(
    theory: &RegularTheory,
    seed: &Instance,
    options: &FastChaseOptions,
) -> Instance {
    let mut allocator = ElementAllocator::above(seed);
    let mut instance = seed.clone();
    let mut previous_size = instance.size();
    for round in 0..options.max_rounds {
        let outcome = parallel_round(theory, &instance, &mut allocator, None);
        if outcome.fired == 0 {
            info!(event = trace::FIXPOINT, round = round as u64, instance = %outcome.instance);
            return outcome.instance;
        }
        instance = outcome.instance;

        let check_due =
            options.egd_check_every > 0 && (round + 1) % options.egd_check_every == 0;
        if options.stop_when_finite && check_due {
            let size = instance.size();
            if size == previous_size && egds_satisfied(theory, &instance) {
                info!(event = trace::FIXPOINT, round = round as u64, instance = %instance);
                return instance;
            }
            previous_size = size;
        }
    }
    info!(event = trace::CAPPED, instance = %instance);
    instance
}

// The settled image of one step: everything present before the step,
// pushed through the step's quotient, minus the representatives that
// absorbed a merge. Unsettling merge representatives is what lets
// equational progress re-expose triggers over old elements.
fn step_edit(before: &Instance, renaming: &BTreeMap<Element, Element>) -> Edit {
    let mut edit = Edit::settled(before).rename(renaming);
    edit.unsettle(renaming.values());
    edit
}

/// Runs the semi-naïve fast parallel chase (the incremental scheduling
/// algorithm): empty-front dependencies are fired once to seed required
/// facts, then generating (TGD) rounds and inner equality (EGD) rounds
/// alternate, each firing only triggers whose environments involve data
/// produced since the relevant previous round. Settled images are tracked
/// with [`Edit`]s, composed by union and pushed through quotients.
///
/// Returns the final instance and the number of generating rounds applied;
/// a theory whose dependencies are discharged by the seeding pass alone
/// reports zero rounds.
pub fn semi_naive_fast_parallel_chase(
    theory: &RegularTheory,
    seed: &Instance,
    options: &SemiNaiveOptions,
) -> SemiNaive {
    let mut allocator = ElementAllocator::above(seed);
    let mut instance = seed.clone();

    let seeding: BTreeSet<usize> = theory
        .dependencies
        .iter()
        .enumerate()
        .filter(|(_, dependency)| dependency.has_empty_front())
        .map(|(index, _)| index)
        .collect();
    if !seeding.is_empty() {
        instance = parallel_round(theory, &instance, &mut allocator, Some(&seeding)).instance;
    }

    let mut tgd_edit = Edit::empty();
    let mut egd_edit = Edit::empty();
    let mut first = true;
    let mut rounds = 0;

    while rounds < options.max_rounds {
        let new_tgds: Vec<Trigger> = active_triggers(theory, &instance)
            .into_iter()
            .filter(|t| theory.dependencies[t.dependency].class() == DependencyClass::Tgd)
            .filter(|t| {
                !tgd_edit.covers_trigger(&theory.dependencies[t.dependency], &t.environment)
            })
            .collect();
        if new_tgds.is_empty() && !first {
            break;
        }
        if !new_tgds.is_empty() {
            let touched: BTreeSet<usize> = new_tgds.iter().map(|t| t.dependency).collect();
            let before = instance.clone();
            let outcome = parallel_round(theory, &instance, &mut allocator, Some(&touched));
            let settled = step_edit(&before, &outcome.renaming);
            tgd_edit = tgd_edit.rename(&outcome.renaming).compose(&settled);
            instance = outcome.instance;
            rounds += 1;
        }

        // equational phase: merging elements can expose new generating
        // matches, so its edits advance the TGD tracker as well
        loop {
            let new_egds: Vec<Trigger> = active_triggers(theory, &instance)
                .into_iter()
                .filter(|t| theory.dependencies[t.dependency].class() == DependencyClass::Egd)
                .filter(|t| {
                    !egd_edit.covers_trigger(&theory.dependencies[t.dependency], &t.environment)
                })
                .collect();
            if new_egds.is_empty() {
                break;
            }
            let touched: BTreeSet<usize> = new_egds.iter().map(|t| t.dependency).collect();
            let before = instance.clone();
            let outcome = parallel_round(theory, &instance, &mut allocator, Some(&touched));
            let settled = step_edit(&before, &outcome.renaming);
            tgd_edit = tgd_edit.rename(&outcome.renaming).compose(&settled);
            egd_edit = settled;
            instance = outcome.instance;
        }

        first = false;
    }

    info!(event = trace::MODEL, rounds = rounds as u64, instance = %instance);
    SemiNaive { instance, rounds }
}

/// Constructs the free model over `seed`: the left adjoint to the
/// forgetful functor from models of a cartesian theory to instances,
/// computed as a bounded colimit chase (64 rounds of one step each).
///
/// Fails with [`Error::NonCartesianTheory`] unless every dependency of
/// `theory` demands a unique witness block. Uniqueness itself is enforced
/// equationally only where the theory spells it out; see
/// [`cartesian_to_regular`][crate::syntax::cartesian_to_regular] for the
/// expansion that adds explicit uniqueness dependencies.
pub fn free_reflect(theory: &RegularTheory, seed: &Instance) -> Result<Reflection, Error> {
    if let Some(index) = theory.dependencies.iter().position(|d| !d.unique) {
        return Err(Error::NonCartesianTheory { index });
    }
    Ok(chase_to_colimit(
        theory,
        seed,
        &ColimitOptions {
            rounds: 64,
            max_steps_per_round: 1,
        },
    ))
}

/// Constructs a weakly-free model over `seed`: the same computation as
/// [`free_reflect`] without the cartesian precondition, and therefore with
/// only the weaker universal property: the model exists but is not unique
/// up to isomorphism in general.
pub fn weakly_free_reflect(theory: &RegularTheory, seed: &Instance) -> Reflection {
    chase_to_colimit(
        theory,
        seed,
        &ColimitOptions {
            rounds: 64,
            max_steps_per_round: 1,
        },
    )
}
