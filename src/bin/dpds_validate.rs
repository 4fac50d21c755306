//! DPDS Validate CLI - Run the descriptor engine over a JSON file
//!
//! Usage:
//!   cargo run --bin dpds-validate -- descriptor.json
//!   cargo run --bin dpds-validate -- descriptor.json --mode validate-and-generate --var env=prod
//!
//! Exit code 1 when the descriptor fails validation.

use anyhow::{Context, Result};
use clap::Parser;

use odm_registry::config::{init_tracing, CliConfig, OutputFormat};
use odm_registry::descriptor::{parse_bindings, parse_descriptor, run, substitute, to_pretty_json};

fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let cli = CliConfig::parse();
    let mode = cli.traversal_mode();
    tracing::info!(file = %cli.file.display(), mode = %mode, "starting descriptor run");

    let raw = std::fs::read_to_string(&cli.file)
        .with_context(|| format!("reading {}", cli.file.display()))?;

    let bindings = parse_bindings(&cli.vars);
    let substitution = substitute(&raw, &bindings);
    if !substitution.is_complete() {
        if cli.strict_variables {
            anyhow::bail!(
                "Unresolved descriptor variables: {}",
                substitution.unresolved.join(", ")
            );
        }
        tracing::warn!(unresolved = ?substitution.unresolved, "leaving variables unresolved");
    }

    let mut descriptor = parse_descriptor(&substitution.content)?;
    let report = run(descriptor.as_mut(), mode, cli.expected_fqn.as_deref())?;

    match cli.format {
        OutputFormat::Json => {
            let output = serde_json::json!({
                "mode": report.mode,
                "valid": report.is_valid(),
                "errors": &report.errors,
                "descriptor": &descriptor,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Text => {
            println!("Mode:        {}", report.mode);
            println!(
                "Validation:  {}",
                if report.is_valid() { "PASSED" } else { "FAILED" }
            );
            if report.is_valid() {
                if mode.generates() {
                    if let Some(doc) = &descriptor {
                        println!();
                        println!("{}", to_pretty_json(doc)?);
                    }
                }
            } else {
                println!();
                println!("Errors:");
                for err in &report.errors {
                    println!("  [{}] {}", err.kind, err);
                }
            }
        }
    }

    if !report.is_valid() {
        std::process::exit(1);
    }
    Ok(())
}
