//! Provides the semantic side of the chase: elements, carriers and relation
//! tables of a σ-structure, together with the allocator that mints fresh
//! witness elements.
//!
//! Instances are mutable-by-replacement: the chase never mutates a
//! caller-visible [`Instance`] in place. Every rewrite step clones the
//! current instance and returns the rewritten clone, so triggers computed
//! against one instance are never replayed against another.

use crate::syntax::{Rel, Signature, Sort};
use itertools::Itertools;
use std::{
    collections::{BTreeMap, BTreeSet},
    fmt,
};

/// Is a symbol representing an element of an instance. Elements are
/// identified by an index into a per-run arena; their identity carries no
/// meaning beyond one chase run.
#[derive(PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Hash)]
pub struct Element(pub u32);

impl Element {
    /// Returns the arena index of `self`.
    pub fn index(&self) -> u32 {
        self.0
    }
}

impl From<u32> for Element {
    fn from(index: u32) -> Self {
        Element(index)
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
        write!(f, "e#{}", self.0)
    }
}

impl fmt::Debug for Element {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self)
    }
}

/// Mints fresh witness elements for one chase run.
///
/// The allocator is a monotonic counter threaded through the chase loop, so
/// witness identity is deterministic for a given theory, seed and options.
/// Start it with [`ElementAllocator::above`] so fresh elements never collide
/// with the seed's.
#[derive(Clone, Debug, Default)]
pub struct ElementAllocator {
    next: u32,
}

impl ElementAllocator {
    /// Creates an allocator starting at index zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an allocator whose first element lies above every element of
    /// `instance`.
    pub fn above(instance: &Instance) -> Self {
        Self {
            next: instance.max_element_index().map_or(0, |i| i + 1),
        }
    }

    /// Returns a fresh element.
    pub fn fresh(&mut self) -> Element {
        let element = Element(self.next);
        self.next += 1;
        element
    }
}

/// Is a finite σ-structure: a duplicate-free carrier per sort and a set of
/// well-typed tuples per relation.
pub struct Instance {
    /// Is a unique identifier for this instance, used only by tracing.
    id: u64,

    /// Maps each sort to its carrier.
    carriers: BTreeMap<Sort, BTreeSet<Element>>,

    /// Maps each relation to its set of tuples.
    relations: BTreeMap<Rel, BTreeSet<Vec<Element>>>,
}

impl Instance {
    /// Creates the empty instance over `signature`, with one (empty)
    /// carrier per declared sort and one (empty) table per declared
    /// relation.
    pub fn empty(signature: &Signature) -> Self {
        Self {
            id: rand::random(),
            carriers: signature
                .sorts()
                .map(|s| (s.clone(), BTreeSet::new()))
                .collect(),
            relations: signature
                .relations()
                .map(|r| (r.symbol.clone(), BTreeSet::new()))
                .collect(),
        }
    }

    /// Returns the unique (per value, not per shape) identifier of `self`.
    pub fn get_id(&self) -> u64 {
        self.id
    }

    /// Adds `element` to the carrier of `sort`, creating the carrier if the
    /// sort was not declared. Adding an element twice is a no-op.
    pub fn adjoin(&mut self, sort: &Sort, element: Element) {
        self.carriers
            .entry(sort.clone())
            .or_insert_with(BTreeSet::new)
            .insert(element);
    }

    /// Adds `tuple` to the table of `relation`. No arity or sort checking
    /// is performed; malformed tuples surface as triggers that match
    /// nothing.
    pub fn insert_fact(&mut self, relation: &Rel, tuple: Vec<Element>) {
        self.relations
            .entry(relation.clone())
            .or_insert_with(BTreeSet::new)
            .insert(tuple);
    }

    /// Returns the carrier of `sort`, if present.
    pub fn carrier(&self, sort: &Sort) -> Option<&BTreeSet<Element>> {
        self.carriers.get(sort)
    }

    /// Returns the tuples of `relation`, if present.
    pub fn tuples(&self, relation: &Rel) -> Option<&BTreeSet<Vec<Element>>> {
        self.relations.get(relation)
    }

    /// Returns all carriers of `self`.
    pub fn carriers(&self) -> &BTreeMap<Sort, BTreeSet<Element>> {
        &self.carriers
    }

    /// Returns all relation tables of `self`.
    pub fn relations(&self) -> &BTreeMap<Rel, BTreeSet<Vec<Element>>> {
        &self.relations
    }

    /// Returns true if `tuple` is a fact of `relation` in `self`.
    pub fn has_fact(&self, relation: &Rel, tuple: &[Element]) -> bool {
        self.relations
            .get(relation)
            .map_or(false, |table| table.contains(tuple))
    }

    /// Returns the sort whose carrier contains `element`, if any.
    pub fn sort_of(&self, element: Element) -> Option<&Sort> {
        self.carriers
            .iter()
            .find(|(_, carrier)| carrier.contains(&element))
            .map(|(sort, _)| sort)
    }

    /// Returns the total number of elements and tuples, the growth measure
    /// used by early-termination oracles.
    pub fn size(&self) -> usize {
        let elements: usize = self.carriers.values().map(|c| c.len()).sum();
        let tuples: usize = self.relations.values().map(|t| t.len()).sum();
        elements + tuples
    }

    /// Returns the largest element index occurring in `self`.
    pub fn max_element_index(&self) -> Option<u32> {
        self.carriers
            .values()
            .flat_map(|carrier| carrier.iter())
            .map(|e| e.0)
            .max()
    }

    /// Compares the carriers and tables of `self` and `other` structurally,
    /// ignoring instance ids and empty entries. This is the change-detection
    /// oracle of the chase loop.
    pub fn same_shape(&self, other: &Instance) -> bool {
        let carriers = |i: &Instance| -> BTreeMap<Sort, BTreeSet<Element>> {
            i.carriers
                .iter()
                .filter(|(_, c)| !c.is_empty())
                .map(|(s, c)| (s.clone(), c.clone()))
                .collect()
        };
        let relations = |i: &Instance| -> BTreeMap<Rel, BTreeSet<Vec<Element>>> {
            i.relations
                .iter()
                .filter(|(_, t)| !t.is_empty())
                .map(|(r, t)| (r.clone(), t.clone()))
                .collect()
        };
        carriers(self) == carriers(other) && relations(self) == relations(other)
    }

    /// Returns true if every carrier and table of `self` is contained in
    /// the corresponding carrier and table of `other`.
    pub fn is_sub_instance_of(&self, other: &Instance) -> bool {
        self.carriers.iter().all(|(sort, carrier)| {
            carrier.is_empty()
                || other
                    .carriers
                    .get(sort)
                    .map_or(false, |c| carrier.is_subset(c))
        }) && self.relations.iter().all(|(relation, table)| {
            table.is_empty()
                || other
                    .relations
                    .get(relation)
                    .map_or(false, |t| table.is_subset(t))
        })
    }

    /// Unions the carriers and tables of `other` into `self` pointwise,
    /// deduplicating as it goes.
    pub fn union_in_place(&mut self, other: &Instance) {
        for (sort, carrier) in &other.carriers {
            let target = self
                .carriers
                .entry(sort.clone())
                .or_insert_with(BTreeSet::new);
            target.extend(carrier.iter().copied());
        }
        for (relation, table) in &other.relations {
            let target = self
                .relations
                .entry(relation.clone())
                .or_insert_with(BTreeSet::new);
            target.extend(table.iter().cloned());
        }
    }

    /// Rewrites every carrier and tuple of `self` through `renaming`
    /// (identity on elements the map does not mention) and returns the
    /// rewritten instance. Tuples that collide after rewriting are
    /// deduplicated by the table representation.
    pub fn rename(&self, renaming: &BTreeMap<Element, Element>) -> Instance {
        let map = |e: &Element| renaming.get(e).copied().unwrap_or(*e);
        Instance {
            id: rand::random(),
            carriers: self
                .carriers
                .iter()
                .map(|(sort, carrier)| (sort.clone(), carrier.iter().map(&map).collect()))
                .collect(),
            relations: self
                .relations
                .iter()
                .map(|(relation, table)| {
                    (
                        relation.clone(),
                        table
                            .iter()
                            .map(|tuple| tuple.iter().map(&map).collect())
                            .collect(),
                    )
                })
                .collect(),
        }
    }
}

impl Clone for Instance {
    fn clone(&self) -> Self {
        Self {
            // a clone is a new value as far as tracing is concerned
            id: rand::random(),
            carriers: self.carriers.clone(),
            relations: self.relations.clone(),
        }
    }
}

impl fmt::Display for Instance {
    fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
        let carriers = self
            .carriers
            .iter()
            .map(|(sort, carrier)| {
                format!(
                    "{} = {{{}}}",
                    sort,
                    carrier.iter().map(|e| e.to_string()).join(", ")
                )
            })
            .join("; ");
        let facts = self
            .relations
            .iter()
            .flat_map(|(relation, table)| {
                table
                    .iter()
                    .map(move |tuple| {
                        format!(
                            "{}({})",
                            relation,
                            tuple.iter().map(|e| e.to_string()).join(", ")
                        )
                    })
            })
            .join(", ");
        write!(f, "Carriers: {}\nFacts: {}", carriers, facts)
    }
}

impl fmt::Debug for Instance {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self)
    }
}
