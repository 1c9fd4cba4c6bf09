//! Dependency tracking for named expressions
//!
//! Builds a directed graph over a catalog: an edge `A -> B` means "B's
//! formula references A", so A must be resolvable before B. Cycle detection
//! and ordering use Kahn's in-degree reduction — the length of the produced
//! order against the node count is the authoritative cycle test.
//!
//! A leaf expression (formula equal to its own name) is a pure variable, not
//! a self-reference: the builder records the node but skips the self-edge.
//! A genuine self-reference such as `a: "a + 1"` keeps its edge and reads as
//! a one-node cycle.

use crate::error::EngineResult;
use crate::lexer::tokenize;
use crate::token::TokenKind;
use ahash::{AHashMap, AHashSet};
use formulify_core::Catalog;
use std::collections::VecDeque;

/// Dependency graph over a catalog of named expressions.
///
/// Nodes are expression names plus any name referenced by a formula, even if
/// the referenced name has no catalog entry (structural validation reports
/// those separately).
#[derive(Debug, Default)]
pub struct DependencyGraph {
    /// Node -> names whose formulas reference it (dependents)
    edges: AHashMap<String, AHashSet<String>>,
}

impl DependencyGraph {
    /// Build the graph for a catalog, tokenizing every formula.
    pub fn build(catalog: &Catalog) -> EngineResult<Self> {
        let mut edges: AHashMap<String, AHashSet<String>> = AHashMap::new();

        for expr in catalog.iter() {
            edges.entry(expr.name().to_string()).or_default();
        }

        for expr in catalog.iter() {
            if expr.is_leaf() {
                continue;
            }
            for token in tokenize(expr.formula())? {
                if token.kind == TokenKind::Ident {
                    edges
                        .entry(token.text)
                        .or_default()
                        .insert(expr.name().to_string());
                }
            }
        }

        Ok(Self { edges })
    }

    /// All node names, in no particular order
    pub fn nodes(&self) -> impl Iterator<Item = &str> {
        self.edges.keys().map(String::as_str)
    }

    /// Number of nodes in the graph
    pub fn node_count(&self) -> usize {
        self.edges.len()
    }

    /// Names whose formulas reference the given node
    pub fn dependents_of(&self, name: &str) -> impl Iterator<Item = &str> {
        self.edges
            .get(name)
            .into_iter()
            .flat_map(|set| set.iter().map(String::as_str))
    }

    /// Whether the graph contains a cycle.
    ///
    /// True exactly when Kahn's reduction cannot order every node.
    pub fn has_cycle(&self) -> bool {
        self.kahn_order().len() != self.edges.len()
    }

    /// A valid evaluation order: every name appears after all names its
    /// formula references.
    ///
    /// The order is valid but not canonical. Returns a sequence shorter than
    /// the node count when the graph is cyclic; use [`Self::has_cycle`] for
    /// the structural answer.
    pub fn topological_order(&self) -> Vec<String> {
        self.kahn_order()
    }

    /// Names with zero in-degree: expressions whose formulas reference
    /// nothing, i.e. leaves and constants. Sorted for deterministic output.
    pub fn independent_names(&self) -> Vec<String> {
        let in_degrees = self.in_degrees();
        let mut names: Vec<String> = in_degrees
            .into_iter()
            .filter(|(_, degree)| *degree == 0)
            .map(|(name, _)| name.to_string())
            .collect();
        names.sort_unstable();
        names
    }

    /// In-degree per node: how many other names its formula depends on.
    fn in_degrees(&self) -> AHashMap<&str, usize> {
        let mut in_degrees: AHashMap<&str, usize> = AHashMap::new();
        for node in self.edges.keys() {
            in_degrees.insert(node, 0);
        }
        for dependents in self.edges.values() {
            for dependent in dependents {
                if let Some(degree) = in_degrees.get_mut(dependent.as_str()) {
                    *degree += 1;
                }
            }
        }
        in_degrees
    }

    fn kahn_order(&self) -> Vec<String> {
        let mut in_degrees = self.in_degrees();

        let mut seeds: Vec<&str> = in_degrees
            .iter()
            .filter(|(_, degree)| **degree == 0)
            .map(|(name, _)| *name)
            .collect();
        seeds.sort_unstable();
        let mut queue: VecDeque<&str> = seeds.into();

        let mut order = Vec::with_capacity(self.edges.len());
        while let Some(node) = queue.pop_front() {
            order.push(node.to_string());

            if let Some(dependents) = self.edges.get(node) {
                for dependent in dependents {
                    if let Some(degree) = in_degrees.get_mut(dependent.as_str()) {
                        *degree -= 1;
                        if *degree == 0 {
                            queue.push_back(dependent.as_str());
                        }
                    }
                }
            }
        }

        order
    }
}

/// Transitive dependencies of one named expression: every name its formula
/// references, directly or through other catalog entries. Sorted.
///
/// References to names without a catalog entry are included (and simply have
/// nothing to recurse into); a visited set bounds the walk, so cyclic input
/// terminates rather than recursing forever.
pub fn dependencies_of(name: &str, catalog: &Catalog) -> EngineResult<Vec<String>> {
    let mut visited = AHashSet::new();
    let mut deps = AHashSet::new();
    collect_dependencies(name, catalog, &mut visited, &mut deps)?;

    let mut deps: Vec<String> = deps.into_iter().collect();
    deps.sort_unstable();
    Ok(deps)
}

fn collect_dependencies(
    name: &str,
    catalog: &Catalog,
    visited: &mut AHashSet<String>,
    deps: &mut AHashSet<String>,
) -> EngineResult<()> {
    if !visited.insert(name.to_string()) {
        return Ok(());
    }
    let Some(expr) = catalog.get(name) else {
        return Ok(());
    };
    if expr.is_leaf() {
        return Ok(());
    }

    for token in tokenize(expr.formula())? {
        if token.kind == TokenKind::Ident {
            deps.insert(token.text.clone());
            collect_dependencies(&token.text, catalog, visited, deps)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use formulify_core::NamedExpression;
    use pretty_assertions::assert_eq;

    fn catalog(entries: &[(&str, &str)]) -> Catalog {
        entries
            .iter()
            .map(|(name, formula)| NamedExpression::new(*name, *formula).unwrap())
            .collect()
    }

    #[test]
    fn test_isolated_names_are_nodes() {
        let graph = DependencyGraph::build(&catalog(&[("a", "1"), ("b", "2")])).unwrap();
        assert_eq!(graph.node_count(), 2);
        assert!(!graph.has_cycle());
    }

    #[test]
    fn test_edges_point_from_dependency_to_dependent() {
        let graph = DependencyGraph::build(&catalog(&[("a", "a"), ("b", "a * 2")])).unwrap();
        let dependents: Vec<&str> = graph.dependents_of("a").collect();
        assert_eq!(dependents, vec!["b"]);
    }

    #[test]
    fn test_referenced_but_undefined_name_becomes_node() {
        let graph = DependencyGraph::build(&catalog(&[("a", "ghost + 1")])).unwrap();
        assert_eq!(graph.node_count(), 2);
        assert!(graph.nodes().any(|n| n == "ghost"));
    }

    #[test]
    fn test_independent_names_with_no_cross_references() {
        let graph = DependencyGraph::build(&catalog(&[("a", "a"), ("b", "7"), ("c", "1 + 2")]))
            .unwrap();
        assert_eq!(graph.independent_names(), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_independent_names_excludes_dependents() {
        let graph = DependencyGraph::build(&catalog(&[("a", "a"), ("b", "a + 1")])).unwrap();
        assert_eq!(graph.independent_names(), vec!["a"]);
    }

    #[test]
    fn test_two_node_cycle() {
        let graph = DependencyGraph::build(&catalog(&[("a", "b"), ("b", "a")])).unwrap();
        assert!(graph.has_cycle());
        assert!(graph.topological_order().len() < graph.node_count());
    }

    #[test]
    fn test_chain_is_not_a_cycle() {
        let graph = DependencyGraph::build(&catalog(&[("a", "1"), ("b", "a")])).unwrap();
        assert!(!graph.has_cycle());
    }

    #[test]
    fn test_leaf_is_not_a_self_cycle() {
        let graph = DependencyGraph::build(&catalog(&[("a", "a")])).unwrap();
        assert!(!graph.has_cycle());
        assert_eq!(graph.independent_names(), vec!["a"]);
    }

    #[test]
    fn test_genuine_self_reference_is_a_cycle() {
        let graph = DependencyGraph::build(&catalog(&[("a", "a + 1")])).unwrap();
        assert!(graph.has_cycle());
    }

    #[test]
    fn test_topological_order_respects_dependencies() {
        let graph = DependencyGraph::build(&catalog(&[
            ("a", "a"),
            ("b", "b"),
            ("c", "a + b"),
            ("d", "1 + c - a * 2"),
        ]))
        .unwrap();

        let order = graph.topological_order();
        assert_eq!(order.len(), 4);
        let position = |name: &str| order.iter().position(|n| n == name).unwrap();
        assert!(position("a") < position("c"));
        assert!(position("b") < position("c"));
        assert!(position("c") < position("d"));
        assert!(position("a") < position("d"));
    }

    #[test]
    fn test_dependencies_of_is_transitive() {
        let cat = catalog(&[
            ("a", "a"),
            ("b", "b"),
            ("c", "a + b"),
            ("d", "1 + c - a * 2"),
        ]);
        assert_eq!(dependencies_of("d", &cat).unwrap(), vec!["a", "b", "c"]);
        assert_eq!(dependencies_of("a", &cat).unwrap(), Vec::<String>::new());
    }

    #[test]
    fn test_dependencies_of_terminates_on_cycle() {
        let cat = catalog(&[("a", "b"), ("b", "a")]);
        assert_eq!(dependencies_of("a", &cat).unwrap(), vec!["a", "b"]);
    }
}
