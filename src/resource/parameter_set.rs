//! Parameter-set resolution
//!
//! A command declares its mutually exclusive input shapes as [`ParameterSet`]s,
//! each tagged with a variant of a command-local enum. [`resolve`] picks the one
//! set whose required parameters are all bound and which accepts every bound
//! parameter, and hands back the tag so the caller can `match` on it.

use crate::error::{Error, Result};
use std::collections::BTreeSet;

/// One named combination of parameters
#[derive(Debug, Clone, Copy)]
pub struct ParameterSet<K: Copy> {
    pub kind: K,
    pub name: &'static str,
    pub required: &'static [&'static str],
    pub optional: &'static [&'static str],
}

impl<K: Copy> ParameterSet<K> {
    fn accepts(&self, name: &str) -> bool {
        self.required.iter().chain(self.optional).any(|p| *p == name)
    }

    fn matches(&self, bound: &BoundParameters) -> bool {
        self.required.iter().all(|r| bound.contains(r)) && bound.iter().all(|b| self.accepts(b))
    }

    /// True if this set requires everything `other` requires, and more
    fn is_more_specific_than(&self, other: &ParameterSet<K>) -> bool {
        self.required.len() > other.required.len()
            && other.required.iter().all(|r| self.required.contains(r))
    }
}

/// Names of the parameters the user actually supplied
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BoundParameters {
    names: BTreeSet<&'static str>,
}

impl BoundParameters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bind(mut self, name: &'static str) -> Self {
        self.names.insert(name);
        self
    }

    /// Bind `name` if the value was supplied
    pub fn bind_opt<T>(self, name: &'static str, value: &Option<T>) -> Self {
        self.bind_if(name, value.is_some())
    }

    /// Bind `name` if `present` (switch parameters)
    pub fn bind_if(self, name: &'static str, present: bool) -> Self {
        if present {
            self.bind(name)
        } else {
            self
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.names.iter().copied()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// Pick the single parameter set matching the bound parameters.
///
/// When several sets match, the one whose required parameters strictly
/// include every other candidate's wins; otherwise resolution fails rather
/// than picking arbitrarily.
pub fn resolve<'a, K: Copy>(
    sets: &'a [ParameterSet<K>],
    bound: &BoundParameters,
) -> Result<&'a ParameterSet<K>> {
    let candidates: Vec<&ParameterSet<K>> = sets.iter().filter(|s| s.matches(bound)).collect();

    let chosen = match candidates.as_slice() {
        [] => None,
        [only] => Some(*only),
        many => many.iter().copied().find(|c| {
            many.iter()
                .all(|o| std::ptr::eq(*c, *o) || c.is_more_specific_than(o))
        }),
    };

    match chosen {
        Some(set) => {
            tracing::debug!("Resolved parameter set '{}'", set.name);
            Ok(set)
        }
        None => {
            let names: Vec<&str> = bound.iter().collect();
            let detail = if candidates.is_empty() {
                format!("no parameter set accepts [{}]", names.join(", "))
            } else {
                let matched: Vec<&str> = candidates.iter().map(|c| c.name).collect();
                format!(
                    "[{}] matches more than one parameter set ({})",
                    names.join(", "),
                    matched.join(", ")
                )
            };
            Err(Error::AmbiguousOrMissingParameters(detail))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Shape {
        AB,
        AC,
        A,
    }

    const DISJOINT: &[ParameterSet<Shape>] = &[
        ParameterSet {
            kind: Shape::AB,
            name: "AB",
            required: &["A", "B"],
            optional: &[],
        },
        ParameterSet {
            kind: Shape::AC,
            name: "AC",
            required: &["A", "C"],
            optional: &[],
        },
    ];

    #[test]
    fn test_exact_match() {
        let bound = BoundParameters::new().bind("A").bind("B");
        assert_eq!(resolve(DISJOINT, &bound).unwrap().kind, Shape::AB);
    }

    #[test]
    fn test_conflicting_sets_fail() {
        let bound = BoundParameters::new().bind("A").bind("B").bind("C");
        assert!(matches!(
            resolve(DISJOINT, &bound),
            Err(Error::AmbiguousOrMissingParameters(_))
        ));
    }

    #[test]
    fn test_missing_required_fails() {
        let bound = BoundParameters::new().bind("A");
        assert!(matches!(
            resolve(DISJOINT, &bound),
            Err(Error::AmbiguousOrMissingParameters(_))
        ));
    }

    #[test]
    fn test_optional_overlap_resolves_to_more_specific() {
        let sets = &[
            ParameterSet {
                kind: Shape::A,
                name: "A",
                required: &["A"],
                optional: &["B", "C"],
            },
            ParameterSet {
                kind: Shape::AB,
                name: "AB",
                required: &["A", "B"],
                optional: &["C"],
            },
        ];
        let bound = BoundParameters::new().bind("A").bind("B");
        assert_eq!(resolve(sets, &bound).unwrap().kind, Shape::AB);

        let bound = BoundParameters::new().bind("A").bind("C");
        assert_eq!(resolve(sets, &bound).unwrap().kind, Shape::A);
    }

    #[test]
    fn test_equally_specific_overlap_is_ambiguous() {
        let sets = &[
            ParameterSet {
                kind: Shape::AB,
                name: "AB",
                required: &["A", "B"],
                optional: &["C"],
            },
            ParameterSet {
                kind: Shape::AC,
                name: "AC",
                required: &["A", "C"],
                optional: &["B"],
            },
        ];
        let bound = BoundParameters::new().bind("A").bind("B").bind("C");
        assert!(resolve(sets, &bound).is_err());
    }

    #[test]
    fn test_resolution_is_deterministic() {
        let bound = BoundParameters::new().bind("A").bind("C");
        let first = resolve(DISJOINT, &bound).unwrap().name;
        for _ in 0..10 {
            assert_eq!(resolve(DISJOINT, &bound).unwrap().name, first);
        }
    }
}
