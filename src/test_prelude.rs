use crate::instance::{Element, Instance};
use crate::syntax::{Arrow, Presentation, Rel, RelSig, Signature, Sort, Var};
use itertools::Itertools;
use std::collections::{BTreeMap, BTreeSet};

// Sorts
pub fn s(name: &str) -> Sort {
    Sort::from(name)
}

// Relations
pub fn r(name: &str) -> Rel {
    Rel::from(name)
}

// Variables
pub fn v(name: &str) -> Var {
    Var::from(name)
}

// Elements
pub fn e(index: u32) -> Element {
    Element::from(index)
}

/// Two sorts `A`, `B` with an edge relation `e: [A, B]` and a unary `R` on
/// `A`; the signature most tests are written against.
pub fn graph_signature() -> Signature {
    let mut signature = Signature::new();
    signature.add_sort(s("A"));
    signature.add_sort(s("B"));
    signature
        .add_relation(RelSig {
            symbol: r("e"),
            arity: vec![s("A"), s("B")],
        })
        .unwrap();
    signature
        .add_relation(RelSig {
            symbol: r("R"),
            arity: vec![s("A")],
        })
        .unwrap();
    signature
}

/// The one-arrow presentation: objects `A`, `B` and a generating arrow
/// `e: A -> B`.
pub fn arrow_presentation() -> Presentation {
    Presentation {
        objects: vec!["A".into(), "B".into()],
        arrows: vec![Arrow {
            name: "e".into(),
            src: "A".into(),
            dst: "B".into(),
        }],
        equations: vec![],
    }
}

/// Asserts that two instances are isomorphic: equal up to a sort-respecting
/// bijection of elements. Witness identity is not part of any chase
/// contract, so comparisons of chased results go through this helper.
pub fn assert_isomorphic(left: &Instance, right: &Instance) {
    assert!(
        isomorphic(left, right),
        "instances are not isomorphic:\n{}\n-- versus --\n{}",
        left,
        right
    );
}

fn isomorphic(left: &Instance, right: &Instance) -> bool {
    let sorts: Vec<Sort> = left
        .carriers()
        .keys()
        .chain(right.carriers().keys())
        .cloned()
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();
    for sort in &sorts {
        let l = left.carrier(sort).map_or(0, |c| c.len());
        let r = right.carrier(sort).map_or(0, |c| c.len());
        if l != r {
            return false;
        }
    }
    search(0, &sorts, BTreeMap::new(), left, right)
}

// brute-force search over per-sort bijections; fine for test-sized models
fn search(
    index: usize,
    sorts: &[Sort],
    mapping: BTreeMap<Element, Element>,
    left: &Instance,
    right: &Instance,
) -> bool {
    if index == sorts.len() {
        return relations_match(left, right, &mapping);
    }
    let sort = &sorts[index];
    let from: Vec<Element> = left
        .carrier(sort)
        .map(|c| c.iter().copied().collect())
        .unwrap_or_default();
    let to: Vec<Element> = right
        .carrier(sort)
        .map(|c| c.iter().copied().collect())
        .unwrap_or_default();
    if from.is_empty() {
        return search(index + 1, sorts, mapping, left, right);
    }
    for permutation in to.iter().copied().permutations(to.len()) {
        let mut extended = mapping.clone();
        for (a, b) in from.iter().zip(permutation) {
            extended.insert(*a, b);
        }
        if search(index + 1, sorts, extended, left, right) {
            return true;
        }
    }
    false
}

fn relations_match(
    left: &Instance,
    right: &Instance,
    mapping: &BTreeMap<Element, Element>,
) -> bool {
    let relations: BTreeSet<&Rel> = left
        .relations()
        .keys()
        .chain(right.relations().keys())
        .collect();
    relations.into_iter().all(|relation| {
        let mapped: BTreeSet<Vec<Element>> = left
            .tuples(relation)
            .map(|table| {
                table
                    .iter()
                    .map(|tuple| {
                        tuple
                            .iter()
                            .map(|element| mapping.get(element).copied().unwrap_or(*element))
                            .collect()
                    })
                    .collect()
            })
            .unwrap_or_default();
        let expected: BTreeSet<Vec<Element>> = right
            .tuples(relation)
            .map(|table| table.iter().cloned().collect())
            .unwrap_or_default();
        mapped == expected
    })
}
