//! Applies the two rewrite steps of the chase: witness introduction for
//! tuple-generating dependencies and union-find quotienting for
//! equality-generating dependencies.

use crate::chase::frozen::{ill_typed, Environment};
use crate::instance::{Element, ElementAllocator, Instance};
use crate::syntax::{Atom, Dependency, Sort, Var};
use crate::trace;
use petgraph::unionfind::UnionFind;
use std::collections::BTreeMap;
use tracing::{debug, warn};

/// Extends `working` in place with the consequent of a TGD trigger: mints
/// one fresh element per class of existential variables and unions the
/// consequent tuples into the relation tables. Equations between
/// universally quantified variables cannot be discharged by extension; they
/// are returned for the caller to quotient by.
pub(crate) fn apply_tgd(
    working: &mut Instance,
    dependency: &Dependency,
    environment: &Environment,
    allocator: &mut ElementAllocator,
) -> Vec<(Element, Element)> {
    let exists_index: BTreeMap<&Var, usize> = dependency
        .exists
        .iter()
        .enumerate()
        .map(|(i, (v, _))| (v, i))
        .collect();

    // classes of existential variables merged by consequent equations
    let mut classes = UnionFind::<usize>::new(dependency.exists.len());
    let mut bound: BTreeMap<usize, Element> = BTreeMap::new();
    let mut equations = Vec::new();
    for atom in &dependency.rhs {
        if let Atom::Equal { left, right } = atom {
            if ill_typed(dependency, left, right) {
                warn!(
                    "skipping ill-typed equality `{} = {}` in a dependency consequent",
                    left, right
                );
                continue;
            }
            match (
                exists_index.get(left).copied(),
                exists_index.get(right).copied(),
                environment.get(left).copied(),
                environment.get(right).copied(),
            ) {
                (Some(l), Some(r), _, _) => {
                    classes.union(l, r);
                }
                (Some(l), None, _, Some(element)) => {
                    bound.insert(l, element);
                }
                (None, Some(r), Some(element), _) => {
                    bound.insert(r, element);
                }
                (None, None, Some(l), Some(r)) => {
                    if l != r {
                        equations.push((l, r));
                    }
                }
                _ => (),
            }
        }
    }

    // resolve each class to a bound element or a fresh witness
    let mut witness_of: BTreeMap<usize, Element> = BTreeMap::new();
    for (index, (variable, sort)) in dependency.exists.iter().enumerate() {
        let root = classes.find(index);
        if witness_of.contains_key(&root) {
            continue;
        }
        let chosen = class_binding(&classes, &bound, dependency.exists.len(), root, &mut equations);
        let element = match chosen {
            Some(element) => element,
            None => {
                let fresh = allocator.fresh();
                debug!(
                    event = trace::WITNESS,
                    variable = %variable,
                    sort = %sort,
                    element = %fresh,
                );
                fresh
            }
        };
        witness_of.insert(root, element);
        adjoin_class(working, &classes, dependency, root, element);
    }

    // union the consequent tuples into the working instance
    for atom in &dependency.rhs {
        if let Atom::Rel { relation, args } = atom {
            let tuple: Option<Vec<Element>> = args
                .iter()
                .map(|variable| {
                    environment.get(variable).copied().or_else(|| {
                        exists_index
                            .get(variable)
                            .map(|&i| witness_of[&classes.find(i)])
                    })
                })
                .collect();
            match tuple {
                Some(tuple) => working.insert_fact(relation, tuple),
                None => warn!(
                    "skipping consequent atom `{}` with an unbound variable",
                    atom
                ),
            }
        }
    }

    equations
}

// A class is bound if any of its members was equated to a universally
// quantified element; two distinct bindings for one class induce an
// equation between the bound elements.
fn class_binding(
    classes: &UnionFind<usize>,
    bound: &BTreeMap<usize, Element>,
    count: usize,
    root: usize,
    equations: &mut Vec<(Element, Element)>,
) -> Option<Element> {
    let mut chosen: Option<Element> = None;
    for index in 0..count {
        if classes.find(index) != root {
            continue;
        }
        if let Some(&element) = bound.get(&index) {
            match chosen {
                None => chosen = Some(element),
                Some(existing) if existing != element => {
                    equations.push((existing, element));
                }
                _ => (),
            }
        }
    }
    chosen
}

// Adjoins `element` to the carrier of every sort named by the class of
// `root`; well-typed consequent equations keep those sorts equal, so this
// is a single carrier in practice.
fn adjoin_class(
    working: &mut Instance,
    classes: &UnionFind<usize>,
    dependency: &Dependency,
    root: usize,
    element: Element,
) {
    let mut adjoined: Option<&Sort> = None;
    for (index, (_, sort)) in dependency.exists.iter().enumerate() {
        if classes.find(index) == root && adjoined != Some(sort) {
            working.adjoin(sort, element);
            adjoined = Some(sort);
        }
    }
}

/// Quotients `instance` by a batch of equations: builds a per-sort
/// union-find seeded with the equations, maps every class to its least
/// element and rewrites every carrier and tuple. Equations whose sides live
/// in different carriers (or in none) are skipped. Returns the quotiented
/// instance together with the renaming that was applied.
pub(crate) fn apply_egd_batch(
    instance: &Instance,
    equations: &[(Element, Element)],
) -> (Instance, BTreeMap<Element, Element>) {
    if equations.is_empty() {
        return (instance.clone(), BTreeMap::new());
    }

    let mut by_sort: BTreeMap<&Sort, Vec<(Element, Element)>> = BTreeMap::new();
    for (left, right) in equations {
        match (instance.sort_of(*left), instance.sort_of(*right)) {
            (Some(l), Some(r)) if l == r => {
                by_sort.entry(l).or_insert_with(Vec::new).push((*left, *right));
            }
            _ => warn!(
                "skipping equation `{} = {}` across carriers",
                left, right
            ),
        }
    }

    let mut renaming: BTreeMap<Element, Element> = BTreeMap::new();
    for (sort, pairs) in by_sort {
        let carrier: Vec<Element> = instance
            .carrier(sort)
            .map(|c| c.iter().copied().collect())
            .unwrap_or_default();
        let index_of: BTreeMap<Element, usize> = carrier
            .iter()
            .enumerate()
            .map(|(i, e)| (*e, i))
            .collect();

        let mut classes = UnionFind::<usize>::new(carrier.len());
        for (left, right) in pairs {
            classes.union(index_of[&left], index_of[&right]);
        }

        // the representative of a class is its least element
        let mut least: BTreeMap<usize, Element> = BTreeMap::new();
        for (index, element) in carrier.iter().enumerate() {
            least.entry(classes.find(index)).or_insert(*element);
        }
        for (index, element) in carrier.iter().enumerate() {
            let representative = least[&classes.find(index)];
            if *element != representative {
                renaming.insert(*element, representative);
            }
        }
    }

    (instance.rename(&renaming), renaming)
}
