//! Folds an instance to a canonical finite representative by merging
//! elements with identical relational participation.
//!
//! The pass groups the elements of each sort by a *local profile* (the set
//! of `(relation, argument position, co-arguments)` participation patterns
//! the element occurs in, with the element's own slots masked out) and
//! merges each group to one representative. This is a
//! congruence-closure-style canonicalization by one-hop relational
//! signature, not a graph-theoretic core computation: it is sound for
//! folding the redundant duplicates that repeated TGD firing introduces,
//! and the operation is named accordingly.

use crate::instance::{Element, Instance};
use crate::syntax::{Rel, Sort};
use crate::trace;
use std::collections::{BTreeMap, BTreeSet};
use tracing::debug;

/// Designates, per sort, the elements a fold pass must not merge away.
pub type Protected = BTreeMap<Sort, BTreeSet<Element>>;

/// Selects the reduction applied after a chase step in
/// [`core_chase_round`].
pub enum FoldKind<'a> {
    /// Folds with no protected elements.
    Plain,

    /// Protects every element of the given seed instance, so the reduction
    /// never erases or merges away caller-supplied data.
    UnderSeed(&'a Instance),
}

/// A local profile: every `(relation, argument position, masked tuple)`
/// participation of an element, where the element's own occurrences are
/// masked with `None`. Two elements share a profile exactly when swapping
/// one for the other preserves every tuple they occur in.
type Profile = Vec<(Rel, usize, Vec<Option<Element>>)>;

/// Folds `instance` by merging, within each sort, elements with identical
/// local profiles. Protected elements are never renamed; an unprotected
/// element whose group contains a protected one folds onto it. The pass is
/// iterated until no group shrinks, which makes the operation idempotent.
/// Returns the folded instance and the composite renaming from original
/// elements to their representatives.
pub fn fold_duplicates_by_local_profile(
    instance: &Instance,
    protected: &Protected,
) -> (Instance, BTreeMap<Element, Element>) {
    let mut result = instance.clone();
    let mut total: BTreeMap<Element, Element> = BTreeMap::new();
    loop {
        let renaming = fold_pass(&result, protected);
        if renaming.is_empty() {
            break;
        }
        result = result.rename(&renaming);
        for representative in total.values_mut() {
            if let Some(next) = renaming.get(representative) {
                *representative = *next;
            }
        }
        for (from, to) in renaming {
            total.entry(from).or_insert(to);
        }
    }
    if !total.is_empty() {
        debug!(event = trace::FOLD, merged = total.len() as u64);
    }
    (result, total)
}

/// Folds `instance` with no protected elements. This is the "core"
/// reduction of the chase literature, under its honest local-profile name;
/// see the module docs for what it does and does not compute.
pub fn reduce_to_core(instance: &Instance) -> (Instance, BTreeMap<Element, Element>) {
    fold_duplicates_by_local_profile(instance, &Protected::new())
}

/// Folds `instance` while protecting every element already present in
/// `seed`, so the reduction never erases caller-supplied data.
pub fn reduce_to_categorical_core_under(
    instance: &Instance,
    seed: &Instance,
) -> (Instance, BTreeMap<Element, Element>) {
    let protected: Protected = seed
        .carriers()
        .iter()
        .map(|(sort, carrier)| (sort.clone(), carrier.clone()))
        .collect();
    fold_duplicates_by_local_profile(instance, &protected)
}

/// Applies one caller-supplied chase step followed by one reduction pass,
/// composing the two into the core-chase strategy.
pub fn core_chase_round<F>(
    step: F,
    instance: &Instance,
    kind: FoldKind,
) -> (Instance, BTreeMap<Element, Element>)
where
    F: FnOnce(&Instance) -> Instance,
{
    let stepped = step(instance);
    match kind {
        FoldKind::Plain => reduce_to_core(&stepped),
        FoldKind::UnderSeed(seed) => reduce_to_categorical_core_under(&stepped, seed),
    }
}

// One grouping-and-merging pass; returns an empty renaming at a fixpoint.
fn fold_pass(instance: &Instance, protected: &Protected) -> BTreeMap<Element, Element> {
    let profiles = profiles(instance);
    let empty = Profile::new();
    let mut renaming = BTreeMap::new();
    for (sort, carrier) in instance.carriers() {
        let shielded = protected.get(sort);
        let is_protected =
            |element: &Element| shielded.map_or(false, |set| set.contains(element));

        let mut groups: BTreeMap<&Profile, Vec<Element>> = BTreeMap::new();
        for element in carrier {
            let profile = profiles.get(element).unwrap_or(&empty);
            groups.entry(profile).or_insert_with(Vec::new).push(*element);
        }

        for members in groups.values() {
            let representative = members
                .iter()
                .find(|element| is_protected(element))
                .copied()
                .unwrap_or(members[0]);
            for member in members {
                if *member != representative && !is_protected(member) {
                    renaming.insert(*member, representative);
                }
            }
        }
    }
    renaming
}

fn profiles(instance: &Instance) -> BTreeMap<Element, Profile> {
    let mut map: BTreeMap<Element, Profile> = BTreeMap::new();
    for (relation, table) in instance.relations() {
        for tuple in table.iter() {
            for (position, element) in tuple.iter().enumerate() {
                let masked: Vec<Option<Element>> = tuple
                    .iter()
                    .map(|other| if other == element { None } else { Some(*other) })
                    .collect();
                map.entry(*element)
                    .or_insert_with(Profile::new)
                    .push((relation.clone(), position, masked));
            }
        }
    }
    for profile in map.values_mut() {
        profile.sort();
    }
    map
}

#[cfg(test)]
mod test_fold {
    use super::*;
    use crate::instance::Instance;
    use crate::test_prelude::*;

    // two B-elements with identical e-edges from the same source
    fn duplicated_witnesses() -> Instance {
        let mut instance = Instance::empty(&graph_signature());
        instance.adjoin(&s("A"), e(0));
        instance.adjoin(&s("B"), e(1));
        instance.adjoin(&s("B"), e(2));
        instance.insert_fact(&r("e"), vec![e(0), e(1)]);
        instance.insert_fact(&r("e"), vec![e(0), e(2)]);
        instance
    }

    #[test]
    fn test_folds_duplicate_witnesses() {
        let (folded, renaming) = reduce_to_core(&duplicated_witnesses());
        assert_eq!(1, folded.carrier(&s("B")).unwrap().len());
        assert_eq!(1, folded.tuples(&r("e")).unwrap().len());
        assert_eq!(Some(&e(1)), renaming.get(&e(2)));
        assert_eq!(None, renaming.get(&e(1)));
    }

    #[test]
    fn test_fold_is_idempotent() {
        let (once, _) = reduce_to_core(&duplicated_witnesses());
        let (twice, renaming) = reduce_to_core(&once);
        assert!(renaming.is_empty());
        assert!(once.same_shape(&twice));
    }

    #[test]
    fn test_protected_elements_survive() {
        let mut seed = Instance::empty(&graph_signature());
        seed.adjoin(&s("B"), e(1));
        seed.adjoin(&s("B"), e(2));

        // both duplicates are seed data: neither may be merged away
        let mut instance = duplicated_witnesses();
        instance.adjoin(&s("B"), e(3));
        instance.insert_fact(&r("e"), vec![e(0), e(3)]);

        let (folded, renaming) = reduce_to_categorical_core_under(&instance, &seed);
        assert_eq!(2, folded.carrier(&s("B")).unwrap().len());
        assert!(folded.carrier(&s("B")).unwrap().contains(&e(1)));
        assert!(folded.carrier(&s("B")).unwrap().contains(&e(2)));
        // the fresh duplicate folds onto a protected representative
        assert_eq!(Some(&e(1)), renaming.get(&e(3)));
        assert_eq!(None, renaming.get(&e(1)));
        assert_eq!(None, renaming.get(&e(2)));
    }

    #[test]
    fn test_unrelated_profiles_do_not_merge() {
        let mut instance = Instance::empty(&graph_signature());
        instance.adjoin(&s("A"), e(0));
        instance.adjoin(&s("A"), e(1));
        instance.insert_fact(&r("R"), vec![e(0)]);

        let (folded, renaming) = reduce_to_core(&instance);
        assert_eq!(2, folded.carrier(&s("A")).unwrap().len());
        assert!(renaming.is_empty());
    }

    #[test]
    fn test_core_chase_round_composes_step_and_fold() {
        let instance = Instance::empty(&graph_signature());
        let (result, _) = core_chase_round(
            |i| {
                let mut stepped = i.clone();
                stepped.adjoin(&s("B"), e(0));
                stepped.adjoin(&s("B"), e(1));
                stepped
            },
            &instance,
            FoldKind::Plain,
        );
        // both fresh elements have the empty profile and fold together
        assert_eq!(1, result.carrier(&s("B")).unwrap().len());
    }
}
