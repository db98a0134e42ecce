//! Tracks the settled portion of an instance across incremental rounds.
//!
//! An [`Edit`] records the image of a rewrite step: the per-sort element
//! sets that were already present before the step was applied. The
//! semi-naïve scheduler uses edits to classify triggers as *old* (every
//! environment element settled by an earlier round) or *new*, and re-fires
//! only the new ones.

use crate::chase::frozen::Environment;
use crate::instance::{Element, Instance};
use crate::syntax::{Dependency, Sort};
use std::collections::{BTreeMap, BTreeSet};

/// Is the settled-element snapshot of a rewrite step.
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct Edit {
    image: BTreeMap<Sort, BTreeSet<Element>>,
}

impl Edit {
    /// Creates an edit that settles nothing: every trigger is new against
    /// it.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Creates the edit that settles everything currently in `instance`.
    pub fn settled(instance: &Instance) -> Self {
        Self {
            image: instance
                .carriers()
                .iter()
                .map(|(sort, carrier)| (sort.clone(), carrier.clone()))
                .collect(),
        }
    }

    /// Returns true if `element` is settled at `sort`.
    pub fn covers(&self, sort: &Sort, element: Element) -> bool {
        self.image
            .get(sort)
            .map_or(false, |settled| settled.contains(&element))
    }

    /// Returns true if every element of a trigger's environment is settled,
    /// that is, if the trigger acts on old data only. Triggers with an
    /// empty environment are vacuously old.
    pub fn covers_trigger(&self, dependency: &Dependency, environment: &Environment) -> bool {
        environment.iter().all(|(variable, element)| {
            dependency
                .sort_of(variable)
                .map_or(false, |sort| self.covers(sort, *element))
        })
    }

    /// Composes `self` with a `later` edit by unioning the settled images.
    /// Settled history is never discarded: an element settled by either
    /// edit stays settled in the composite.
    pub fn compose(&self, later: &Edit) -> Edit {
        let mut image = self.image.clone();
        for (sort, settled) in &later.image {
            image
                .entry(sort.clone())
                .or_insert_with(BTreeSet::new)
                .extend(settled.iter().copied());
        }
        Edit { image }
    }

    /// Removes elements from the settled image, marking them as new again.
    /// The incremental scheduler unsettles the representatives of merged
    /// classes, since a merge changes what is true of them.
    pub fn unsettle<'a>(&mut self, elements: impl IntoIterator<Item = &'a Element>) {
        for element in elements {
            for settled in self.image.values_mut() {
                settled.remove(element);
            }
        }
    }

    /// Pushes the settled image through the renaming of a quotient step, so
    /// that merged elements stay settled under their new names.
    pub fn rename(&self, renaming: &BTreeMap<Element, Element>) -> Edit {
        if renaming.is_empty() {
            return self.clone();
        }
        Edit {
            image: self
                .image
                .iter()
                .map(|(sort, settled)| {
                    (
                        sort.clone(),
                        settled
                            .iter()
                            .map(|e| renaming.get(e).copied().unwrap_or(*e))
                            .collect(),
                    )
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod test_edits {
    use super::*;
    use crate::instance::Instance;
    use crate::syntax::{Atom, Dependency};
    use crate::test_prelude::*;

    #[test]
    fn test_compose_unions_images() {
        let mut first = Instance::empty(&graph_signature());
        first.adjoin(&s("A"), e(0));
        let mut second = Instance::empty(&graph_signature());
        second.adjoin(&s("A"), e(1));

        let composed = Edit::settled(&first).compose(&Edit::settled(&second));
        assert!(composed.covers(&s("A"), e(0)));
        assert!(composed.covers(&s("A"), e(1)));
        assert!(!composed.covers(&s("B"), e(0)));
    }

    #[test]
    fn test_covers_trigger() {
        let dependency = Dependency::new(
            vec![(v("x"), s("A")), (v("y"), s("A"))],
            vec![Atom::rel("R", vec![v("x")]), Atom::rel("R", vec![v("y")])],
            vec![],
            vec![Atom::equal("x", "y")],
        );
        let mut settled = Instance::empty(&graph_signature());
        settled.adjoin(&s("A"), e(0));
        let edit = Edit::settled(&settled);

        let old = vec![(v("x"), e(0)), (v("y"), e(0))].into_iter().collect();
        assert!(edit.covers_trigger(&dependency, &old));

        let fresh = vec![(v("x"), e(0)), (v("y"), e(1))].into_iter().collect();
        assert!(!edit.covers_trigger(&dependency, &fresh));

        // empty environments are vacuously old
        let seeding = Dependency::new(vec![], vec![], vec![], vec![]);
        assert!(Edit::empty().covers_trigger(&seeding, &Environment::new()));
    }

    #[test]
    fn test_rename_follows_quotients() {
        let mut settled = Instance::empty(&graph_signature());
        settled.adjoin(&s("A"), e(1));
        let edit = Edit::settled(&settled);
        let renaming = vec![(e(1), e(0))].into_iter().collect();

        let renamed = edit.rename(&renaming);
        assert!(renamed.covers(&s("A"), e(0)));
        assert!(!renamed.covers(&s("A"), e(1)));
    }
}
