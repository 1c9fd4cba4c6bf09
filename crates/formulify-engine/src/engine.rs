//! Evaluation engine façade
//!
//! Ties the pipeline together: tokenize, convert to postfix with eager
//! identifier resolution, reduce. Two-phase contract: [`validate`] answers
//! the structural questions (undefined names, cycles) without touching any
//! numbers; [`evaluate`] resolves and computes, and deliberately does not
//! validate first. Callers that cannot trust their catalog run `validate`
//! before `evaluate` — recursive resolution alone only stops a cycle at the
//! recursion ceiling.

use crate::dependency::{dependencies_of, DependencyGraph};
use crate::error::{EngineError, EngineResult};
use crate::postfix::{evaluate_with_depth, ResolutionContext, VariableMap};
use formulify_core::Catalog;

/// Evaluate the named expression against variable overrides and a catalog.
///
/// Fails with [`EngineError::NotFound`] when `name` has no catalog entry.
pub fn evaluate(name: &str, variables: &VariableMap, catalog: &Catalog) -> EngineResult<f64> {
    let expr = catalog
        .get(name)
        .ok_or_else(|| EngineError::NotFound(name.to_string()))?;
    evaluate_formula(expr.formula(), variables, catalog)
}

/// Evaluate raw formula text against variable overrides and a catalog.
pub fn evaluate_formula(
    formula: &str,
    variables: &VariableMap,
    catalog: &Catalog,
) -> EngineResult<f64> {
    let context = ResolutionContext::new(variables, catalog);
    let result = evaluate_with_depth(formula, &context, 0);
    tracing::debug!(formula, ok = result.is_ok(), "evaluated formula");
    result
}

/// Structurally validate a catalog: every referenced name must have a
/// catalog entry, and the dependency graph must be acyclic.
///
/// Performs no numeric evaluation. When several names are undefined, the
/// lexicographically smallest is reported, so the error is deterministic.
pub fn validate(catalog: &Catalog) -> EngineResult<()> {
    let graph = DependencyGraph::build(catalog)?;

    let mut undefined: Vec<&str> = graph
        .nodes()
        .filter(|node| !catalog.contains(node))
        .collect();
    if !undefined.is_empty() {
        undefined.sort_unstable();
        return Err(EngineError::UndefinedName(undefined[0].to_string()));
    }

    if graph.has_cycle() {
        tracing::debug!("catalog validation found a cycle");
        return Err(EngineError::CyclicDependency);
    }

    tracing::debug!(expressions = catalog.len(), "catalog validated");
    Ok(())
}

/// Validation-only evaluation probe: check that the named expression
/// evaluates at all, without knowing real variable values.
///
/// Every leaf dependency (and the target itself, if it is a leaf) is bound
/// to the constant `1`. That default exists purely so the arithmetic can be
/// exercised; it is not part of the evaluation contract, and [`evaluate`]
/// never applies it.
pub fn probe(name: &str, catalog: &Catalog) -> EngineResult<f64> {
    let expr = catalog
        .get(name)
        .ok_or_else(|| EngineError::NotFound(name.to_string()))?;

    let mut variables = VariableMap::new();
    if expr.is_leaf() {
        variables.insert(expr.name().to_string(), 1.0);
    }

    for dep in dependencies_of(name, catalog)? {
        let Some(dep_expr) = catalog.get(&dep) else {
            return Err(EngineError::UndefinedName(dep));
        };
        if dep_expr.is_leaf() {
            variables.insert(dep, 1.0);
        }
    }

    evaluate_formula(expr.formula(), &variables, catalog)
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

    fn vars(entries: &[(&str, f64)]) -> VariableMap {
        entries
            .iter()
            .map(|(name, value)| (name.to_string(), *value))
            .collect()
    }

    #[test]
    fn test_evaluate_concrete_scenario() {
        let cat = catalog(&[
            ("a", "a"),
            ("b", "b"),
            ("c", "a + b"),
            ("d", "1 + c - a * 2"),
        ]);
        let overrides = vars(&[("a", 1.0), ("b", 2.0)]);

        // 1 + (1 + 2) - 1 * 2
        assert_eq!(evaluate("d", &overrides, &cat).unwrap(), 2.0);
    }

    #[test]
    fn test_evaluate_is_idempotent() {
        let cat = catalog(&[("a", "a"), ("b", "a * a + 0.1")]);
        let overrides = vars(&[("a", 3.7)]);

        let first = evaluate("b", &overrides, &cat).unwrap();
        let second = evaluate("b", &overrides, &cat).unwrap();
        assert_eq!(first.to_bits(), second.to_bits());
    }

    #[test]
    fn test_evaluate_missing_name() {
        let err = evaluate("ghost", &VariableMap::new(), &catalog(&[])).unwrap_err();
        assert_eq!(err, EngineError::NotFound("ghost".to_string()));
    }

    #[test]
    fn test_extra_variable_keys_are_ignored() {
        let cat = catalog(&[("a", "a"), ("b", "a + 1")]);
        let overrides = vars(&[("a", 2.0), ("unused", 99.0)]);
        assert_eq!(evaluate("b", &overrides, &cat).unwrap(), 3.0);
    }

    #[test]
    fn test_validate_accepts_chain() {
        assert!(validate(&catalog(&[("a", "1"), ("b", "a")])).is_ok());
    }

    #[test]
    fn test_validate_rejects_cycle() {
        let err = validate(&catalog(&[("a", "b"), ("b", "a")])).unwrap_err();
        assert_eq!(err, EngineError::CyclicDependency);
    }

    #[test]
    fn test_validate_rejects_undefined_name() {
        let err = validate(&catalog(&[("a", "ghost + 1")])).unwrap_err();
        assert_eq!(err, EngineError::UndefinedName("ghost".to_string()));
    }

    #[test]
    fn test_validate_does_not_evaluate() {
        // Structurally fine even though no variable values exist for the
        // leaves; validation must not care.
        assert!(validate(&catalog(&[("a", "a"), ("b", "a * 2")])).is_ok());
    }

    #[test]
    fn test_probe_binds_leaves_to_one() {
        let cat = catalog(&[
            ("a", "a"),
            ("b", "b"),
            ("c", "a + b"),
            ("d", "1 + c - a * 2"),
        ]);

        // 1 + (1 + 1) - 1 * 2
        assert_eq!(probe("d", &cat).unwrap(), 1.0);
        assert_eq!(probe("a", &cat).unwrap(), 1.0);
    }

    #[test]
    fn test_probe_reports_undefined_dependency() {
        let err = probe("a", &catalog(&[("a", "ghost + 1")])).unwrap_err();
        assert_eq!(err, EngineError::UndefinedName("ghost".to_string()));
    }

    #[test]
    fn test_probe_default_does_not_leak_into_evaluate() {
        let cat = catalog(&[("a", "a"), ("b", "a + 1")]);
        // Without an override, evaluating through the leaf must not quietly
        // become 1; resolution recurses into the leaf until the ceiling.
        let err = evaluate("b", &VariableMap::new(), &cat).unwrap_err();
        assert!(matches!(err, EngineError::RecursionLimit(_)));
    }
}
