//! Freezes dependency fronts into minimal witnessing structures and
//! enumerates their matches (homomorphisms) into a working instance.
//!
//! A frozen front keeps one representative per equivalence class of context
//! variables, where classes are induced by the equality atoms of the
//! antecedent. Matching assigns an element to each representative and keeps
//! the assignments under which every antecedent relation atom is a fact of
//! the working instance. Matching is worst-case exponential in the number
//! of representatives; target theories and instances are small.

use crate::instance::{Element, Instance};
use crate::syntax::{Atom, Dependency, Rel, Sort, Var};
use petgraph::unionfind::UnionFind;
use std::collections::BTreeMap;
use tracing::warn;

/// Maps every universally quantified variable of a dependency to an element
/// of the instance a trigger was computed against.
pub type Environment = BTreeMap<Var, Element>;

/// Is the frozen antecedent of a dependency: class representatives to be
/// assigned, the representative of every context variable, and the relation
/// atoms rewritten to representatives.
pub(crate) struct FrozenFront {
    classes: Vec<(Var, Sort)>,
    rep_of: BTreeMap<Var, Var>,
    atoms: Vec<(Rel, Vec<Var>)>,

    /// Set when the antecedent mentions a variable outside the universal
    /// context; such a front matches nothing.
    unmatchable: bool,
}

impl FrozenFront {
    /// Freezes the antecedent of `dependency`, merging variables connected
    /// by well-typed equality atoms into one representative per class.
    /// Ill-typed equalities are skipped.
    pub(crate) fn freeze(dependency: &Dependency) -> Self {
        let context = &dependency.forall;
        let index_of: BTreeMap<&Var, usize> = context
            .iter()
            .enumerate()
            .map(|(i, (v, _))| (v, i))
            .collect();

        let mut classes = UnionFind::<usize>::new(context.len());
        let mut unmatchable = false;
        for atom in &dependency.lhs {
            if let Atom::Equal { left, right } = atom {
                match (index_of.get(left), index_of.get(right)) {
                    (Some(&l), Some(&r)) => {
                        if context[l].1 == context[r].1 {
                            classes.union(l, r);
                        } else {
                            warn!(
                                "skipping ill-typed equality `{} = {}` in a dependency front",
                                left, right
                            );
                        }
                    }
                    _ => unmatchable = true,
                }
            }
        }

        // the representative of a class is its least-index member
        let mut least: BTreeMap<usize, usize> = BTreeMap::new();
        for i in 0..context.len() {
            let root = classes.find(i);
            let entry = least.entry(root).or_insert(i);
            if i < *entry {
                *entry = i;
            }
        }
        let rep_of: BTreeMap<Var, Var> = context
            .iter()
            .enumerate()
            .map(|(i, (v, _))| (v.clone(), context[least[&classes.find(i)]].0.clone()))
            .collect();
        let representatives: Vec<(Var, Sort)> = least
            .values()
            .map(|&i| context[i].clone())
            .collect();

        let mut atoms = Vec::new();
        for atom in &dependency.lhs {
            if let Atom::Rel { relation, args } = atom {
                let mut rewritten = Vec::with_capacity(args.len());
                for arg in args {
                    match rep_of.get(arg) {
                        Some(rep) => rewritten.push(rep.clone()),
                        None => unmatchable = true,
                    }
                }
                atoms.push((relation.clone(), rewritten));
            }
        }

        Self {
            classes: representatives,
            rep_of,
            atoms,
            unmatchable,
        }
    }

    /// Enumerates every assignment of instance elements to the class
    /// representatives under which all frozen atoms are facts of
    /// `instance`, and expands each into an environment over the full
    /// universal context.
    pub(crate) fn matches(&self, instance: &Instance) -> Vec<Environment> {
        if self.unmatchable {
            return Vec::new();
        }

        let domains: Vec<Vec<Element>> = self
            .classes
            .iter()
            .map(|(_, sort)| {
                instance
                    .carrier(sort)
                    .map(|carrier| carrier.iter().copied().collect())
                    .unwrap_or_default()
            })
            .collect();
        if domains.iter().any(|domain| domain.is_empty()) && !self.classes.is_empty() {
            return Vec::new();
        }

        let radix: Vec<usize> = domains.iter().map(|domain| domain.len()).collect();
        let mut odometer: Vec<usize> = vec![0; self.classes.len()];
        let mut environments = Vec::new();

        // try all the assignments of representatives to elements
        // (notice the do-while pattern)
        while {
            let assignment: BTreeMap<&Var, Element> = self
                .classes
                .iter()
                .enumerate()
                .map(|(i, (v, _))| (v, domains[i][odometer[i]]))
                .collect();

            let holds = self.atoms.iter().all(|(relation, args)| {
                let tuple: Vec<Element> = args.iter().map(|v| assignment[v]).collect();
                instance.has_fact(relation, &tuple)
            });
            if holds {
                environments.push(
                    self.rep_of
                        .iter()
                        .map(|(v, rep)| (v.clone(), assignment[rep]))
                        .collect(),
                );
            }

            next_assignment(&mut odometer, &radix)
        } {}

        environments
    }
}

/// Returns true if the consequent of `dependency` already holds in
/// `instance` under `environment`, that is, if the trigger factorizes
/// through existing witnesses. For an EGD this checks the consequent
/// equations; for a TGD it searches for an assignment of existing elements
/// to the existential block satisfying every consequent atom.
pub(crate) fn head_satisfied(
    dependency: &Dependency,
    environment: &Environment,
    instance: &Instance,
) -> bool {
    let domains: Vec<Vec<Element>> = dependency
        .exists
        .iter()
        .map(|(_, sort)| {
            instance
                .carrier(sort)
                .map(|carrier| carrier.iter().copied().collect())
                .unwrap_or_default()
        })
        .collect();
    if domains.iter().any(|domain| domain.is_empty()) && !dependency.exists.is_empty() {
        return false;
    }

    let radix: Vec<usize> = domains.iter().map(|domain| domain.len()).collect();
    let mut odometer: Vec<usize> = vec![0; dependency.exists.len()];

    // do-while over candidate witness blocks; a single empty block when the
    // dependency has no existential variables
    let mut found = false;
    while {
        let lookup = |variable: &Var| -> Option<Element> {
            if let Some(element) = environment.get(variable) {
                return Some(*element);
            }
            dependency
                .exists
                .iter()
                .position(|(v, _)| v == variable)
                .map(|i| domains[i][odometer[i]])
        };

        let holds = dependency.rhs.iter().all(|atom| match atom {
            Atom::Rel { relation, args } => {
                let tuple: Option<Vec<Element>> = args.iter().map(&lookup).collect();
                match tuple {
                    Some(tuple) => instance.has_fact(relation, &tuple),
                    None => false,
                }
            }
            Atom::Equal { left, right } => match (lookup(left), lookup(right)) {
                (Some(l), Some(r)) => {
                    // equalities between distinct sorts are skipped, both
                    // here and at application time
                    if ill_typed(dependency, left, right) {
                        true
                    } else {
                        l == r
                    }
                }
                _ => true,
            },
        });

        if holds {
            found = true;
        }
        !found && next_assignment(&mut odometer, &radix)
    } {}

    found
}

pub(crate) fn ill_typed(dependency: &Dependency, left: &Var, right: &Var) -> bool {
    match (dependency.sort_of(left), dependency.sort_of(right)) {
        (Some(l), Some(r)) => l != r,
        _ => true,
    }
}

// Implements a counter to enumerate all assignments of elements to variable
// classes. Mutates `odometer` to the next assignment under the per-position
// domain sizes in `radix` and returns true if one exists.
fn next_assignment(odometer: &mut [usize], radix: &[usize]) -> bool {
    for (position, digit) in odometer.iter_mut().enumerate() {
        if *digit + 1 < radix[position] {
            *digit += 1;
            return true;
        } else {
            *digit = 0;
        }
    }
    false
}

#[cfg(test)]
mod test_frozen {
    use super::*;
    use crate::instance::Instance;
    use crate::syntax::Dependency;
    use crate::test_prelude::*;

    fn r_pair_dependency() -> Dependency {
        // R(x) ∧ R(y) ⇒ x = y
        Dependency::new(
            vec![(v("x"), s("A")), (v("y"), s("A"))],
            vec![Atom::rel("R", vec![v("x")]), Atom::rel("R", vec![v("y")])],
            vec![],
            vec![Atom::equal("x", "y")],
        )
    }

    #[test]
    fn test_matches_enumerates_all_assignments() {
        let mut instance = Instance::empty(&graph_signature());
        instance.adjoin(&s("A"), e(0));
        instance.adjoin(&s("A"), e(1));
        instance.insert_fact(&r("R"), vec![e(0)]);
        instance.insert_fact(&r("R"), vec![e(1)]);

        let front = FrozenFront::freeze(&r_pair_dependency());
        let environments = front.matches(&instance);
        assert_eq!(4, environments.len());
        for environment in &environments {
            assert_eq!(2, environment.len());
        }
    }

    #[test]
    fn test_matches_respects_facts() {
        let mut instance = Instance::empty(&graph_signature());
        instance.adjoin(&s("A"), e(0));
        instance.adjoin(&s("A"), e(1));
        instance.insert_fact(&r("R"), vec![e(1)]);

        let front = FrozenFront::freeze(&r_pair_dependency());
        let environments = front.matches(&instance);
        assert_eq!(1, environments.len());
        assert_eq!(Some(&e(1)), environments[0].get(&v("x")));
        assert_eq!(Some(&e(1)), environments[0].get(&v("y")));
    }

    #[test]
    fn test_equality_atoms_merge_variables() {
        // R(x) ∧ x = y ∧ e(y, z) has two classes: {x, y} and {z}
        let dependency = Dependency::new(
            vec![(v("x"), s("A")), (v("y"), s("A")), (v("z"), s("B"))],
            vec![
                Atom::rel("R", vec![v("x")]),
                Atom::equal("x", "y"),
                Atom::rel("e", vec![v("y"), v("z")]),
            ],
            vec![],
            vec![],
        );
        let mut instance = Instance::empty(&graph_signature());
        instance.adjoin(&s("A"), e(0));
        instance.adjoin(&s("A"), e(1));
        instance.adjoin(&s("B"), e(2));
        instance.insert_fact(&r("R"), vec![e(0)]);
        instance.insert_fact(&r("e"), vec![e(0), e(2)]);

        let front = FrozenFront::freeze(&dependency);
        let environments = front.matches(&instance);
        assert_eq!(1, environments.len());
        let environment = &environments[0];
        assert_eq!(environment.get(&v("x")), environment.get(&v("y")));
        assert_eq!(Some(&e(2)), environment.get(&v("z")));
    }

    #[test]
    fn test_unbound_antecedent_variable_matches_nothing() {
        let dependency = Dependency::new(
            vec![(v("x"), s("A"))],
            vec![Atom::rel("e", vec![v("x"), v("ghost")])],
            vec![],
            vec![],
        );
        let mut instance = Instance::empty(&graph_signature());
        instance.adjoin(&s("A"), e(0));

        let front = FrozenFront::freeze(&dependency);
        assert!(front.matches(&instance).is_empty());
    }

    #[test]
    fn test_head_satisfied_finds_existing_witness() {
        // x: A ⇒ ∃ y: B. e(x, y)
        let dependency = Dependency::new(
            vec![(v("x"), s("A"))],
            vec![],
            vec![(v("y"), s("B"))],
            vec![Atom::rel("e", vec![v("x"), v("y")])],
        );
        let mut instance = Instance::empty(&graph_signature());
        instance.adjoin(&s("A"), e(0));
        let environment: Environment = vec![(v("x"), e(0))].into_iter().collect();
        assert!(!head_satisfied(&dependency, &environment, &instance));

        instance.adjoin(&s("B"), e(1));
        assert!(!head_satisfied(&dependency, &environment, &instance));

        instance.insert_fact(&r("e"), vec![e(0), e(1)]);
        assert!(head_satisfied(&dependency, &environment, &instance));
    }

    #[test]
    fn test_head_satisfied_checks_equations() {
        let dependency = r_pair_dependency();
        let mut instance = Instance::empty(&graph_signature());
        instance.adjoin(&s("A"), e(0));
        instance.adjoin(&s("A"), e(1));

        let same: Environment = vec![(v("x"), e(0)), (v("y"), e(0))].into_iter().collect();
        assert!(head_satisfied(&dependency, &same, &instance));

        let different: Environment = vec![(v("x"), e(0)), (v("y"), e(1))].into_iter().collect();
        assert!(!head_satisfied(&dependency, &different, &instance));
    }
}
