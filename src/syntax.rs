//! Defines the syntactic objects consumed by the chase: sorts, relation
//! symbols, typed variables, conjunctive atoms, embedded dependencies and
//! regular/cartesian theories.
//!
//! A [`RegularTheory`] is a [`Signature`] together with an ordered list of
//! [`Dependency`] values (embedded dependencies). The chase never inspects
//! where a theory came from; theory compilers such as
//! [`cartesian_from_presentation`] and [`totality_axioms_for`] are provided
//! here as the standard ways of producing one.
//!
//! [`cartesian_from_presentation`]: presentation::cartesian_from_presentation

pub mod presentation;

use std::{
    collections::{BTreeMap, BTreeSet},
    fmt,
};
use thiserror::Error;

pub use self::presentation::{cartesian_from_presentation, Arrow, PathEquation, Presentation};

/// Is the error type for constructing and validating theories, and for the
/// one hard precondition of the chase ([`free_reflect`] on a non-cartesian
/// theory).
///
/// [`free_reflect`]: crate::chase::free_reflect
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Is returned when a relation symbol is declared twice with different
    /// arities.
    #[error("inconsistent declarations for relation `{relation}`")]
    InconsistentRelation { relation: Rel },

    /// Is returned by validation when a relation arity mentions a sort that
    /// the signature does not declare.
    #[error("relation `{relation}` refers to undeclared sort `{sort}`")]
    UndeclaredSort { relation: Rel, sort: Sort },

    /// Is returned by validation when an atom applies a relation to the
    /// wrong number of arguments.
    #[error("arity mismatch for relation `{relation}`: expected {expected} arguments, found {found}")]
    ArityMismatch {
        relation: Rel,
        expected: usize,
        found: usize,
    },

    /// Is returned by validation when an atom mentions a variable that the
    /// dependency context does not bind.
    #[error("variable `{variable}` is not bound by the dependency context")]
    UnboundVariable { variable: Var },

    /// Is returned by validation when an equality atom equates variables of
    /// two different sorts. At chase time such atoms are skipped instead.
    #[error("equality between `{left}` and `{right}` relates distinct sorts")]
    IllTypedEquality { left: Var, right: Var },

    /// Is returned by [`free_reflect`] when some dependency of the input
    /// theory does not require a unique witness.
    ///
    /// [`free_reflect`]: crate::chase::free_reflect
    #[error("free reflection requires a cartesian theory; dependency {index} is not unique")]
    NonCartesianTheory { index: usize },

    /// Is returned when a presentation arrow refers to an undeclared object.
    #[error("arrow `{arrow}` refers to undeclared object `{object}`")]
    UndeclaredObject { arrow: String, object: String },

    /// Is returned when a path equation mentions an undeclared arrow.
    #[error("path equation `{equation}` mentions undeclared arrow `{arrow}`")]
    UndeclaredArrow { equation: String, arrow: String },

    /// Is returned when the arrows of a path equation do not compose, or the
    /// two paths fail to share their endpoints.
    #[error("path equation `{equation}` does not compose at arrow `{arrow}`")]
    IllComposedPath { equation: String, arrow: String },
}

/// Is a sort name of a multi-sorted signature.
#[derive(PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Debug)]
pub struct Sort(String);

impl Sort {
    /// Returns the name of `self`.
    pub fn name(&self) -> &str {
        &self.0
    }
}

impl<S: Into<String>> From<S> for Sort {
    fn from(name: S) -> Self {
        Self(name.into())
    }
}

impl fmt::Display for Sort {
    fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
        write!(f, "{}", self.0)
    }
}

/// Is a relation symbol. Relations are the only function-free primitive of
/// the language; (partial) functions enter the picture through their graph
/// relations (see [`totality_axioms_for`]).
#[derive(PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Debug)]
pub struct Rel(String);

impl Rel {
    /// Returns the name of `self`.
    pub fn name(&self) -> &str {
        &self.0
    }
}

impl<S: Into<String>> From<S> for Rel {
    fn from(name: S) -> Self {
        Self(name.into())
    }
}

impl fmt::Display for Rel {
    fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
        write!(f, "{}", self.0)
    }
}

/// Is a variable of a dependency context. A variable has no intrinsic sort;
/// it is typed by the `forall` or `exists` binding that introduces it.
#[derive(PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Debug)]
pub struct Var(String);

impl Var {
    /// Returns the name of `self`.
    pub fn name(&self) -> &str {
        &self.0
    }

    /// Returns a primed copy of `self`, used when a dependency needs a
    /// second, disjoint copy of a variable block (see
    /// [`cartesian_to_regular`]).
    pub fn primed(&self) -> Self {
        Self(format!("{}'", self.0))
    }
}

impl<S: Into<String>> From<S> for Var {
    fn from(name: S) -> Self {
        Self(name.into())
    }
}

impl fmt::Display for Var {
    fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
        write!(f, "{}", self.0)
    }
}

/// Contains the signature information for a relation: its symbol and its
/// arity as an ordered list of sorts.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct RelSig {
    /// Is the relation symbol.
    pub symbol: Rel,

    /// Is the arity of the relation, one sort per argument position.
    pub arity: Vec<Sort>,
}

impl fmt::Display for RelSig {
    fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
        let arity: Vec<String> = self.arity.iter().map(|s| s.to_string()).collect();
        write!(f, "{}: [{}]", self.symbol, arity.join(", "))
    }
}

/// Is the signature of a regular theory: a finite set of sorts and a finite
/// set of relation symbols with their arities. Immutable once constructed;
/// the builder methods are consumed before chasing starts.
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct Signature {
    sorts: BTreeSet<Sort>,
    relations: BTreeMap<Rel, RelSig>,
}

impl Signature {
    /// Creates an empty signature.
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares a sort. Re-declaring an existing sort is a no-op.
    pub fn add_sort(&mut self, sort: Sort) {
        self.sorts.insert(sort);
    }

    /// Declares a relation. Re-declaring a relation with the same arity is a
    /// no-op; redeclaring with a different arity is an error.
    pub fn add_relation(&mut self, relation: RelSig) -> Result<(), Error> {
        if let Some(existing) = self.relations.get(&relation.symbol) {
            if *existing != relation {
                return Err(Error::InconsistentRelation {
                    relation: relation.symbol,
                });
            }
        } else {
            self.relations.insert(relation.symbol.clone(), relation);
        }
        Ok(())
    }

    /// Returns true if `sort` is declared by `self`.
    pub fn has_sort(&self, sort: &Sort) -> bool {
        self.sorts.contains(sort)
    }

    /// Returns the declared sorts of `self`.
    pub fn sorts(&self) -> impl Iterator<Item = &Sort> {
        self.sorts.iter()
    }

    /// Returns the signature of `relation` if it is declared.
    pub fn relation(&self, relation: &Rel) -> Option<&RelSig> {
        self.relations.get(relation)
    }

    /// Returns the declared relations of `self`.
    pub fn relations(&self) -> impl Iterator<Item = &RelSig> {
        self.relations.values()
    }

    /// Unions `self` with `other`. On a relation-name clash the receiver's
    /// declaration wins; no further clash detection is performed.
    pub fn merge(mut self, other: Self) -> Self {
        for sort in other.sorts {
            self.sorts.insert(sort);
        }
        for (symbol, relation) in other.relations {
            self.relations.entry(symbol).or_insert(relation);
        }
        self
    }

    /// Checks that every relation arity refers to declared sorts.
    ///
    /// **Note**: the chase itself never validates its input; malformed
    /// signatures surface as triggers that match nothing. This check is an
    /// opt-in hardening pass for callers that want early failure.
    pub fn validate(&self) -> Result<(), Error> {
        for relation in self.relations.values() {
            for sort in &relation.arity {
                if !self.sorts.contains(sort) {
                    return Err(Error::UndeclaredSort {
                        relation: relation.symbol.clone(),
                        sort: sort.clone(),
                    });
                }
            }
        }
        Ok(())
    }
}

/// Is a positive atom appearing in the antecedent or consequent of a
/// dependency.
#[derive(PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Debug)]
pub enum Atom {
    /// Is a relational atom, applying a relation symbol to context
    /// variables.
    Rel { relation: Rel, args: Vec<Var> },

    /// Is an equality between two context variables.
    Equal { left: Var, right: Var },
}

impl Atom {
    /// Applies `relation` to a list of variables.
    pub fn rel(relation: impl Into<Rel>, args: Vec<Var>) -> Self {
        Self::Rel {
            relation: relation.into(),
            args,
        }
    }

    /// Equates two variables.
    pub fn equal(left: impl Into<Var>, right: impl Into<Var>) -> Self {
        Self::Equal {
            left: left.into(),
            right: right.into(),
        }
    }
}

impl fmt::Display for Atom {
    fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
        match self {
            Self::Rel { relation, args } => {
                let args: Vec<String> = args.iter().map(|v| v.to_string()).collect();
                write!(f, "{}({})", relation, args.join(", "))
            }
            Self::Equal { left, right } => write!(f, "{} = {}", left, right),
        }
    }
}

/// Classifies a [`Dependency`] by the kind of rewrite it performs when
/// triggered.
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum DependencyClass {
    /// A tuple-generating dependency: introduces witness elements and/or
    /// relation tuples.
    Tgd,

    /// An equality-generating dependency: merges (quotients) elements.
    Egd,
}

/// Is an embedded dependency, the unit of theory content.
///
/// Read as: for all `forall`-variables satisfying the conjunction `lhs`,
/// there exist `exists`-variables satisfying the conjunction `rhs`. When
/// `unique` is set the witness block is required to be unique, which is the
/// cartesian discipline that guarantees free models of finitely-presented
/// cartesian theories exist and are computable.
#[derive(PartialEq, Eq, Clone, Debug)]
pub struct Dependency {
    /// Is the universally quantified, typed context.
    pub forall: Vec<(Var, Sort)>,

    /// Is the antecedent, a conjunction of atoms over the `forall`
    /// variables.
    pub lhs: Vec<Atom>,

    /// Is the existentially quantified block of additional typed variables.
    pub exists: Vec<(Var, Sort)>,

    /// Is the consequent, a conjunction of atoms over the combined
    /// variables.
    pub rhs: Vec<Atom>,

    /// Requires the witness block to be unique when set.
    pub unique: bool,
}

impl Dependency {
    /// Creates a non-unique dependency.
    pub fn new(
        forall: Vec<(Var, Sort)>,
        lhs: Vec<Atom>,
        exists: Vec<(Var, Sort)>,
        rhs: Vec<Atom>,
    ) -> Self {
        Self {
            forall,
            lhs,
            exists,
            rhs,
            unique: false,
        }
    }

    /// Marks `self` as requiring a unique witness block.
    pub fn unique(mut self) -> Self {
        self.unique = true;
        self
    }

    /// Classifies `self` as an EGD (no existential block and a consequent
    /// consisting only of equalities) or a TGD (anything else).
    pub fn class(&self) -> DependencyClass {
        let equational = self
            .rhs
            .iter()
            .all(|atom| matches!(atom, Atom::Equal { .. }));
        if self.exists.is_empty() && equational {
            DependencyClass::Egd
        } else {
            DependencyClass::Tgd
        }
    }

    /// Returns true if `self` has an empty front (no universal context and
    /// no antecedent), so it is fired once, unconditionally.
    pub fn has_empty_front(&self) -> bool {
        self.forall.is_empty() && self.lhs.is_empty()
    }

    /// Returns the sort binding `variable`, searching the universal context
    /// first and the existential block second.
    pub fn sort_of(&self, variable: &Var) -> Option<&Sort> {
        self.forall
            .iter()
            .chain(self.exists.iter())
            .find(|(v, _)| v == variable)
            .map(|(_, sort)| sort)
    }

    fn validate(&self, signature: &Signature) -> Result<(), Error> {
        let atoms = self.lhs.iter().chain(self.rhs.iter());
        for atom in atoms {
            match atom {
                Atom::Rel { relation, args } => {
                    if let Some(sig) = signature.relation(relation) {
                        if sig.arity.len() != args.len() {
                            return Err(Error::ArityMismatch {
                                relation: relation.clone(),
                                expected: sig.arity.len(),
                                found: args.len(),
                            });
                        }
                    }
                    for variable in args {
                        if self.sort_of(variable).is_none() {
                            return Err(Error::UnboundVariable {
                                variable: variable.clone(),
                            });
                        }
                    }
                }
                Atom::Equal { left, right } => {
                    let left_sort =
                        self.sort_of(left)
                            .ok_or_else(|| Error::UnboundVariable {
                                variable: left.clone(),
                            })?;
                    let right_sort =
                        self.sort_of(right)
                            .ok_or_else(|| Error::UnboundVariable {
                                variable: right.clone(),
                            })?;
                    if left_sort != right_sort {
                        return Err(Error::IllTypedEquality {
                            left: left.clone(),
                            right: right.clone(),
                        });
                    }
                }
            }
        }
        Ok(())
    }
}

impl fmt::Display for Dependency {
    fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
        let lhs: Vec<String> = self.lhs.iter().map(|a| a.to_string()).collect();
        let rhs: Vec<String> = self.rhs.iter().map(|a| a.to_string()).collect();
        let exists: Vec<String> = self
            .exists
            .iter()
            .map(|(v, s)| format!("{}: {}", v, s))
            .collect();
        let quantifier = if self.exists.is_empty() {
            String::new()
        } else if self.unique {
            format!("∃! {} . ", exists.join(", "))
        } else {
            format!("∃ {} . ", exists.join(", "))
        };
        write!(f, "[{}] -> {}[{}]", lhs.join(", "), quantifier, rhs.join(", "))
    }
}

/// Is a signature together with an ordered list of dependencies: the input
/// of every chase entry point.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct RegularTheory {
    /// Is the signature the dependencies are written against.
    pub signature: Signature,

    /// Is the ordered list of dependencies of the theory.
    pub dependencies: Vec<Dependency>,
}

/// Is a regular theory in which every dependency requires a unique witness.
/// The distinction is semantic; the representation is shared.
pub type CartesianTheory = RegularTheory;

impl RegularTheory {
    /// Creates a theory from a signature and a list of dependencies.
    pub fn new(signature: Signature, dependencies: Vec<Dependency>) -> Self {
        Self {
            signature,
            dependencies,
        }
    }

    /// Returns true if every dependency of `self` requires a unique witness
    /// block, that is, if `self` is cartesian.
    pub fn is_cartesian(&self) -> bool {
        self.dependencies.iter().all(|d| d.unique)
    }

    /// Checks `self` for malformed arities, unbound variables and ill-typed
    /// equalities. Opt-in; see [`Signature::validate`].
    pub fn validate(&self) -> Result<(), Error> {
        self.signature.validate()?;
        for dependency in &self.dependencies {
            dependency.validate(&self.signature)?;
        }
        Ok(())
    }
}

impl fmt::Display for RegularTheory {
    fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
        for dependency in &self.dependencies {
            writeln!(f, "{}", dependency)?;
        }
        Ok(())
    }
}

/// Unions the sorts and relations of two theories (keeping `left`'s
/// declaration on a relation-name clash) and concatenates their axioms. No
/// cycle or clash detection is performed beyond the name dedup.
pub fn merge_theories(left: RegularTheory, right: RegularTheory) -> RegularTheory {
    let signature = left.signature.merge(right.signature);
    let mut dependencies = left.dependencies;
    dependencies.extend(right.dependencies);
    RegularTheory {
        signature,
        dependencies,
    }
}

/// Describes a (partial) function symbol by its graph relation: `graph` has
/// arity `inputs ++ [output]`.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct FunctionSymbol {
    /// Is the graph relation of the function.
    pub graph: Rel,

    /// Is the list of input sorts.
    pub inputs: Vec<Sort>,

    /// Is the output sort.
    pub output: Sort,
}

/// Emits one unique dependency per function symbol stating that for all
/// typed inputs there exists a unique output satisfying the symbol's graph
/// relation, the standard device for encoding a total function as a
/// cartesian dependency.
pub fn totality_axioms_for(symbols: &[FunctionSymbol]) -> Vec<Dependency> {
    symbols
        .iter()
        .map(|symbol| {
            let forall: Vec<(Var, Sort)> = symbol
                .inputs
                .iter()
                .enumerate()
                .map(|(i, sort)| (Var::from(format!("x{}", i)), sort.clone()))
                .collect();
            let output = Var::from("y");
            let mut args: Vec<Var> = forall.iter().map(|(v, _)| v.clone()).collect();
            args.push(output.clone());
            Dependency::new(
                forall,
                Vec::new(),
                vec![(output, symbol.output.clone())],
                vec![Atom::Rel {
                    relation: symbol.graph.clone(),
                    args,
                }],
            )
            .unique()
        })
        .collect()
}

/// Expands each unique dependency of a cartesian theory into a plain
/// existential dependency plus a uniqueness dependency comparing two witness
/// blocks. Used when a cartesian-only producer feeds a consumer that expects
/// a plain regular theory.
pub fn cartesian_to_regular(theory: &CartesianTheory) -> RegularTheory {
    let mut dependencies = Vec::new();
    for dependency in &theory.dependencies {
        if !dependency.unique {
            dependencies.push(dependency.clone());
            continue;
        }

        let mut existence = dependency.clone();
        existence.unique = false;
        dependencies.push(existence);

        if dependency.exists.is_empty() {
            continue; // no witness block to compare
        }

        let primed: BTreeMap<Var, Var> = dependency
            .exists
            .iter()
            .map(|(v, _)| (v.clone(), v.primed()))
            .collect();
        let rename = |variable: &Var| primed.get(variable).cloned().unwrap_or_else(|| variable.clone());

        let mut forall = dependency.forall.clone();
        forall.extend(dependency.exists.iter().cloned());
        forall.extend(
            dependency
                .exists
                .iter()
                .map(|(v, s)| (v.primed(), s.clone())),
        );

        let mut lhs = dependency.lhs.clone();
        lhs.extend(dependency.rhs.iter().cloned());
        lhs.extend(dependency.rhs.iter().map(|atom| match atom {
            Atom::Rel { relation, args } => Atom::Rel {
                relation: relation.clone(),
                args: args.iter().map(&rename).collect(),
            },
            Atom::Equal { left, right } => Atom::Equal {
                left: rename(left),
                right: rename(right),
            },
        }));

        let rhs = dependency
            .exists
            .iter()
            .map(|(v, _)| Atom::Equal {
                left: v.clone(),
                right: v.primed(),
            })
            .collect();

        dependencies.push(Dependency::new(forall, lhs, Vec::new(), rhs));
    }
    RegularTheory {
        signature: theory.signature.clone(),
        dependencies,
    }
}

#[cfg(test)]
mod test_syntax {
    use super::*;
    use crate::test_prelude::*;

    #[test]
    fn test_classify() {
        let egd = Dependency::new(
            vec![(v("x"), s("A")), (v("y"), s("A"))],
            vec![Atom::rel("R", vec![v("x")]), Atom::rel("R", vec![v("y")])],
            vec![],
            vec![Atom::equal("x", "y")],
        );
        assert_eq!(DependencyClass::Egd, egd.class());
        assert!(!egd.has_empty_front());

        let tgd = Dependency::new(
            vec![(v("x"), s("A"))],
            vec![],
            vec![(v("y"), s("B"))],
            vec![Atom::rel("e", vec![v("x"), v("y")])],
        );
        assert_eq!(DependencyClass::Tgd, tgd.class());

        let seeding = Dependency::new(
            vec![],
            vec![],
            vec![(v("x"), s("A"))],
            vec![Atom::rel("R", vec![v("x")])],
        );
        assert_eq!(DependencyClass::Tgd, seeding.class());
        assert!(seeding.has_empty_front());
    }

    #[test]
    fn test_signature_merge_is_left_biased() {
        let mut left = Signature::new();
        left.add_sort(s("A"));
        left.add_relation(RelSig {
            symbol: r("R"),
            arity: vec![s("A")],
        })
        .unwrap();

        let mut right = Signature::new();
        right.add_sort(s("B"));
        right
            .add_relation(RelSig {
                symbol: r("R"),
                arity: vec![s("B"), s("B")],
            })
            .unwrap();

        let merged = left.merge(right);
        assert!(merged.has_sort(&s("A")));
        assert!(merged.has_sort(&s("B")));
        assert_eq!(1, merged.relation(&r("R")).unwrap().arity.len());
    }

    #[test]
    fn test_signature_rejects_inconsistent_redeclaration() {
        let mut signature = Signature::new();
        signature.add_sort(s("A"));
        signature
            .add_relation(RelSig {
                symbol: r("R"),
                arity: vec![s("A")],
            })
            .unwrap();
        let clash = signature.add_relation(RelSig {
            symbol: r("R"),
            arity: vec![s("A"), s("A")],
        });
        assert_eq!(
            Err(Error::InconsistentRelation { relation: r("R") }),
            clash
        );
    }

    #[test]
    fn test_merge_theories_concatenates_axioms() {
        let left = RegularTheory::new(
            graph_signature(),
            totality_axioms_for(&[FunctionSymbol {
                graph: r("e"),
                inputs: vec![s("A")],
                output: s("B"),
            }]),
        );
        let right = RegularTheory::new(
            graph_signature(),
            vec![Dependency::new(
                vec![(v("x"), s("A")), (v("y"), s("A"))],
                vec![Atom::rel("R", vec![v("x")]), Atom::rel("R", vec![v("y")])],
                vec![],
                vec![Atom::equal("x", "y")],
            )],
        );
        let merged = merge_theories(left, right);
        assert_eq!(2, merged.dependencies.len());
        assert!(!merged.is_cartesian());
        merged.validate().unwrap();
    }

    #[test]
    fn test_totality_axioms() {
        let axioms = totality_axioms_for(&[FunctionSymbol {
            graph: r("f"),
            inputs: vec![s("A"), s("A")],
            output: s("B"),
        }]);
        assert_eq!(1, axioms.len());
        let axiom = &axioms[0];
        assert!(axiom.unique);
        assert_eq!(2, axiom.forall.len());
        assert_eq!(1, axiom.exists.len());
        assert_eq!(DependencyClass::Tgd, axiom.class());
        assert_eq!("[] -> ∃! y: B . [f(x0, x1, y)]", axiom.to_string());
    }

    #[test]
    fn test_cartesian_to_regular_expansion() {
        let theory = RegularTheory::new(
            graph_signature(),
            totality_axioms_for(&[FunctionSymbol {
                graph: r("e"),
                inputs: vec![s("A")],
                output: s("B"),
            }]),
        );
        assert!(theory.is_cartesian());

        let regular = cartesian_to_regular(&theory);
        assert_eq!(2, regular.dependencies.len());
        assert!(!regular.is_cartesian());

        // the uniqueness half compares two witness blocks
        let uniqueness = &regular.dependencies[1];
        assert_eq!(DependencyClass::Egd, uniqueness.class());
        assert_eq!(3, uniqueness.forall.len());
        assert_eq!(vec![Atom::equal("y", "y'")], uniqueness.rhs);
    }

    #[test]
    fn test_validate_catches_unbound_variable() {
        let mut signature = Signature::new();
        signature.add_sort(s("A"));
        signature
            .add_relation(RelSig {
                symbol: r("R"),
                arity: vec![s("A")],
            })
            .unwrap();
        let theory = RegularTheory::new(
            signature,
            vec![Dependency::new(
                vec![(v("x"), s("A"))],
                vec![Atom::rel("R", vec![v("z")])],
                vec![],
                vec![Atom::equal("x", "x")],
            )],
        );
        assert_eq!(
            Err(Error::UnboundVariable { variable: v("z") }),
            theory.validate()
        );
    }

    #[test]
    fn test_validate_catches_ill_typed_equality() {
        let theory = RegularTheory::new(
            graph_signature(),
            vec![Dependency::new(
                vec![(v("x"), s("A")), (v("y"), s("B"))],
                vec![],
                vec![],
                vec![Atom::equal("x", "y")],
            )],
        );
        assert_eq!(
            Err(Error::IllTypedEquality {
                left: v("x"),
                right: v("y")
            }),
            theory.validate()
        );
    }
}
