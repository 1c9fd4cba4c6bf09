//! Formulify CLI - evaluate and validate expression catalogs

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use formulify_core::{Catalog, NamedExpression};
use formulify_engine::{evaluate_formula, probe, validate, DependencyGraph, VariableMap};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "formulify")]
#[command(author, version, about = "Evaluate and validate named-expression catalogs")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate formula text against a catalog and variable overrides
    Eval {
        /// Formula text, e.g. "1 + total * 2"
        formula: String,

        /// Catalog file (JSON object of name -> formula text)
        #[arg(short, long)]
        catalog: Option<PathBuf>,

        /// Variable override, NAME=VALUE (repeatable)
        #[arg(short, long = "var", value_name = "NAME=VALUE")]
        vars: Vec<String>,
    },

    /// Validate a catalog: undefined names, cycles, and a per-formula
    /// evaluation probe
    Check {
        /// Catalog file
        catalog: PathBuf,
    },

    /// Show independent names and a valid evaluation order for a catalog
    Deps {
        /// Catalog file
        catalog: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Eval {
            formula,
            catalog,
            vars,
        } => eval(&formula, catalog.as_deref(), &vars),
        Commands::Check { catalog } => check(&catalog),
        Commands::Deps { catalog } => deps(&catalog),
    }
}

fn eval(formula: &str, catalog_path: Option<&Path>, vars: &[String]) -> Result<()> {
    let catalog = match catalog_path {
        Some(path) => load_catalog(path)?,
        None => Catalog::new(),
    };
    let variables = parse_vars(vars)?;

    let value = evaluate_formula(formula, &variables, &catalog)
        .with_context(|| format!("Failed to evaluate '{formula}'"))?;
    println!("{value}");
    Ok(())
}

fn check(catalog_path: &Path) -> Result<()> {
    let catalog = load_catalog(catalog_path)?;

    validate(&catalog).context("Catalog failed structural validation")?;

    let mut names: Vec<&str> = catalog.names().collect();
    names.sort_unstable();
    for name in names {
        probe(name, &catalog).with_context(|| format!("Formula '{name}' does not evaluate"))?;
    }

    println!("ok: {} expressions", catalog.len());
    Ok(())
}

fn deps(catalog_path: &Path) -> Result<()> {
    let catalog = load_catalog(catalog_path)?;
    let graph = DependencyGraph::build(&catalog).context("Failed to build dependency graph")?;

    if graph.has_cycle() {
        eprintln!("Warning: catalog contains a cyclic dependency");
    }

    println!("independent: {}", graph.independent_names().join(", "));
    println!("order: {}", graph.topological_order().join(", "));
    Ok(())
}

/// Load a catalog from a JSON object of name -> formula text.
///
/// BTreeMap keeps error reporting deterministic for files with several bad
/// names.
fn load_catalog(path: &Path) -> Result<Catalog> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read '{}'", path.display()))?;

    let entries: BTreeMap<String, String> = serde_json::from_str(&contents)
        .with_context(|| format!("'{}' is not a JSON object of name -> formula", path.display()))?;

    let mut catalog = Catalog::new();
    for (name, formula) in entries {
        let expr = NamedExpression::new(name.clone(), formula)
            .with_context(|| format!("Invalid expression name '{name}'"))?;
        catalog.insert(expr);
    }
    Ok(catalog)
}

fn parse_vars(vars: &[String]) -> Result<VariableMap> {
    let mut variables = VariableMap::new();
    for var in vars {
        let Some((name, value)) = var.split_once('=') else {
            bail!("Variable override '{var}' is not NAME=VALUE");
        };
        let value: f64 = value
            .parse()
            .with_context(|| format!("Variable '{name}' has non-numeric value '{value}'"))?;
        variables.insert(name.to_string(), value);
    }
    Ok(variables)
}
