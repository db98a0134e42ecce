//! Compiles a graph-style category presentation into a cartesian theory.
//!
//! Objects become sorts, generating arrows become binary graph relations of
//! arity `[src, dst]`, and the theory gets one unique-witness dependency per
//! arrow (totality and functionality) plus one equality-generating
//! dependency per path equation.

use super::{Atom, CartesianTheory, Dependency, Error, Rel, RelSig, Signature, Sort, Var};

/// Is a generating arrow of a presentation.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Arrow {
    /// Is the arrow's name; it doubles as the name of its graph relation.
    pub name: String,

    /// Is the source object.
    pub src: String,

    /// Is the target object.
    pub dst: String,
}

/// Equates two composable paths of generating arrows. Paths are written in
/// diagrammatic order (first arrow first); an empty path denotes the
/// identity on the equation's starting object.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct PathEquation {
    /// Names the equation, used only for error reporting.
    pub name: String,

    /// Is the left path, a list of arrow names.
    pub lhs: Vec<String>,

    /// Is the right path, a list of arrow names.
    pub rhs: Vec<String>,
}

/// Is a graph-style presentation of a category: objects, generating arrows
/// and path equations.
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct Presentation {
    /// Is the list of objects.
    pub objects: Vec<String>,

    /// Is the list of generating arrows.
    pub arrows: Vec<Arrow>,

    /// Is the list of path equations.
    pub equations: Vec<PathEquation>,
}

/// Compiles `presentation` into a cartesian theory: sorts are the objects,
/// relations are the generating-arrow graphs, and the axioms are (a) one
/// unique dependency per arrow enforcing that its graph is total and
/// functional, and (b) one equality dependency per path equation, built by
/// chaining relation atoms along each path and equating the final
/// variables.
pub fn cartesian_from_presentation(
    presentation: &Presentation,
) -> Result<CartesianTheory, Error> {
    let mut signature = Signature::new();
    for object in &presentation.objects {
        signature.add_sort(Sort::from(object.as_str()));
    }
    for arrow in &presentation.arrows {
        for object in [&arrow.src, &arrow.dst] {
            if !signature.has_sort(&Sort::from(object.as_str())) {
                return Err(Error::UndeclaredObject {
                    arrow: arrow.name.clone(),
                    object: object.clone(),
                });
            }
        }
        signature.add_relation(RelSig {
            symbol: Rel::from(arrow.name.as_str()),
            arity: vec![Sort::from(arrow.src.as_str()), Sort::from(arrow.dst.as_str())],
        })?;
    }

    let mut dependencies = Vec::new();
    for arrow in &presentation.arrows {
        dependencies.push(
            Dependency::new(
                vec![(Var::from("x"), Sort::from(arrow.src.as_str()))],
                Vec::new(),
                vec![(Var::from("y"), Sort::from(arrow.dst.as_str()))],
                vec![Atom::rel(
                    arrow.name.as_str(),
                    vec![Var::from("x"), Var::from("y")],
                )],
            )
            .unique(),
        );
    }
    for equation in &presentation.equations {
        dependencies.push(compile_equation(presentation, equation)?);
    }

    Ok(CartesianTheory {
        signature,
        dependencies,
    })
}

/// Builds the equality dependency of one path equation: both paths are
/// chained through fresh universally quantified variables in the antecedent
/// and the consequent equates the two final variables.
fn compile_equation(
    presentation: &Presentation,
    equation: &PathEquation,
) -> Result<Dependency, Error> {
    let start = path_start(presentation, equation)?;
    let origin = Var::from("p0");

    let mut forall = vec![(origin.clone(), Sort::from(start.as_str()))];
    let mut lhs = Vec::new();
    let left_end = chain_path(presentation, equation, &equation.lhs, "p", &origin, &start, &mut forall, &mut lhs)?;
    let right_end = chain_path(presentation, equation, &equation.rhs, "q", &origin, &start, &mut forall, &mut lhs)?;

    let sort_of = |variable: &Var| {
        forall
            .iter()
            .find(|(v, _)| v == variable)
            .map(|(_, sort)| sort.clone())
    };
    if sort_of(&left_end) != sort_of(&right_end) {
        return Err(Error::IllComposedPath {
            equation: equation.name.clone(),
            arrow: equation
                .rhs
                .last()
                .or_else(|| equation.lhs.last())
                .cloned()
                .unwrap_or_else(|| String::from("(empty)")),
        });
    }

    Ok(Dependency::new(
        forall,
        lhs,
        Vec::new(),
        vec![Atom::Equal {
            left: left_end,
            right: right_end,
        }],
    )
    .unique())
}

/// Determines the starting object of an equation from the first arrow of
/// either path; an equation whose paths are both empty has no starting
/// object to anchor it and is rejected as ill-composed.
fn path_start(presentation: &Presentation, equation: &PathEquation) -> Result<String, Error> {
    let first = equation.lhs.first().or_else(|| equation.rhs.first());
    match first {
        Some(name) => Ok(lookup_arrow(presentation, equation, name)?.src.clone()),
        None => Err(Error::IllComposedPath {
            equation: equation.name.clone(),
            arrow: String::from("(empty)"),
        }),
    }
}

/// Chains the atoms of one path, appending fresh variables to `forall` and
/// atoms to `lhs`, and returns the path's final variable. Checks that each
/// arrow composes with the object reached so far.
#[allow(clippy::too_many_arguments)]
fn chain_path(
    presentation: &Presentation,
    equation: &PathEquation,
    path: &[String],
    prefix: &str,
    origin: &Var,
    start: &str,
    forall: &mut Vec<(Var, Sort)>,
    lhs: &mut Vec<Atom>,
) -> Result<Var, Error> {
    let mut at = start.to_owned();
    let mut current = origin.clone();
    for (index, name) in path.iter().enumerate() {
        let arrow = lookup_arrow(presentation, equation, name)?;
        if arrow.src != at {
            return Err(Error::IllComposedPath {
                equation: equation.name.clone(),
                arrow: name.clone(),
            });
        }
        let next = Var::from(format!("{}{}", prefix, index + 1));
        forall.push((next.clone(), Sort::from(arrow.dst.as_str())));
        lhs.push(Atom::rel(name.as_str(), vec![current, next.clone()]));
        at = arrow.dst.clone();
        current = next;
    }
    Ok(current)
}

fn lookup_arrow<'p>(
    presentation: &'p Presentation,
    equation: &PathEquation,
    name: &str,
) -> Result<&'p Arrow, Error> {
    presentation
        .arrows
        .iter()
        .find(|a| a.name == name)
        .ok_or_else(|| Error::UndeclaredArrow {
            equation: equation.name.clone(),
            arrow: name.to_owned(),
        })
}

#[cfg(test)]
mod test_presentation {
    use super::*;
    use crate::syntax::DependencyClass;
    use crate::test_prelude::*;

    #[test]
    fn test_single_arrow() {
        let theory = cartesian_from_presentation(&Presentation {
            objects: vec!["A".into(), "B".into()],
            arrows: vec![Arrow {
                name: "e".into(),
                src: "A".into(),
                dst: "B".into(),
            }],
            equations: vec![],
        })
        .unwrap();

        assert!(theory.is_cartesian());
        assert_eq!(1, theory.dependencies.len());
        assert_eq!(DependencyClass::Tgd, theory.dependencies[0].class());
        assert_eq!(
            vec![s("A"), s("B")],
            theory.signature.relation(&r("e")).unwrap().arity
        );
        theory.validate().unwrap();
    }

    #[test]
    fn test_commuting_square() {
        // f;h = g;k with A -f-> B -h-> D and A -g-> C -k-> D
        let theory = cartesian_from_presentation(&Presentation {
            objects: vec!["A".into(), "B".into(), "C".into(), "D".into()],
            arrows: vec![
                Arrow { name: "f".into(), src: "A".into(), dst: "B".into() },
                Arrow { name: "g".into(), src: "A".into(), dst: "C".into() },
                Arrow { name: "h".into(), src: "B".into(), dst: "D".into() },
                Arrow { name: "k".into(), src: "C".into(), dst: "D".into() },
            ],
            equations: vec![PathEquation {
                name: "square".into(),
                lhs: vec!["f".into(), "h".into()],
                rhs: vec!["g".into(), "k".into()],
            }],
        })
        .unwrap();

        assert_eq!(5, theory.dependencies.len());
        let square = &theory.dependencies[4];
        assert_eq!(DependencyClass::Egd, square.class());
        // p0 plus two chained variables per path
        assert_eq!(5, square.forall.len());
        assert_eq!(4, square.lhs.len());
        assert_eq!(vec![Atom::equal("p2", "q2")], square.rhs);
        theory.validate().unwrap();
    }

    #[test]
    fn test_idempotent_arrow_equation() {
        // e;e = e on a single object
        let theory = cartesian_from_presentation(&Presentation {
            objects: vec!["A".into()],
            arrows: vec![Arrow {
                name: "e".into(),
                src: "A".into(),
                dst: "A".into(),
            }],
            equations: vec![PathEquation {
                name: "idem".into(),
                lhs: vec!["e".into(), "e".into()],
                rhs: vec!["e".into()],
            }],
        })
        .unwrap();
        let idem = &theory.dependencies[1];
        assert_eq!(vec![Atom::equal("p2", "q1")], idem.rhs);
    }

    #[test]
    fn test_rejects_non_composing_path() {
        let result = cartesian_from_presentation(&Presentation {
            objects: vec!["A".into(), "B".into()],
            arrows: vec![
                Arrow { name: "f".into(), src: "A".into(), dst: "B".into() },
            ],
            equations: vec![PathEquation {
                name: "bad".into(),
                lhs: vec!["f".into(), "f".into()],
                rhs: vec!["f".into()],
            }],
        });
        assert_eq!(
            Err(Error::IllComposedPath {
                equation: "bad".into(),
                arrow: "f".into(),
            }),
            result
        );
    }

    #[test]
    fn test_rejects_undeclared_object() {
        let result = cartesian_from_presentation(&Presentation {
            objects: vec!["A".into()],
            arrows: vec![Arrow {
                name: "f".into(),
                src: "A".into(),
                dst: "X".into(),
            }],
            equations: vec![],
        });
        assert!(matches!(result, Err(Error::UndeclaredObject { .. })));
    }
}
