//! Configuration for the `dpds-validate` binary.
//!
//! Every option can also come from the environment (or a `.env` file loaded
//! with dotenvy); flags win over environment values.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::descriptor::Mode;

/// Default log filter when `RUST_LOG` is not set
pub const DEFAULT_LOG_FILTER: &str = "odm_registry=info";

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ModeArg {
    Validate,
    ValidateAndGenerate,
    GenerateOnly,
}

impl From<ModeArg> for Mode {
    fn from(arg: ModeArg) -> Self {
        match arg {
            ModeArg::Validate => Mode::ValidateOnly,
            ModeArg::ValidateAndGenerate => Mode::ValidateAndGenerate,
            ModeArg::GenerateOnly => Mode::GenerateOnly,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Debug, Clone, Parser)]
#[command(name = "dpds-validate")]
#[command(about = "Validate data product descriptors and generate missing identity fields")]
pub struct CliConfig {
    /// Descriptor JSON file
    #[arg(env = "DPDS_DESCRIPTOR")]
    pub file: PathBuf,

    /// Traversal mode
    #[arg(long, value_enum, default_value = "validate", env = "DPDS_MODE")]
    pub mode: ModeArg,

    /// Expected data product FQN, cross-checked against info.fullyQualifiedName
    #[arg(long, env = "DPDS_EXPECTED_FQN")]
    pub expected_fqn: Option<String>,

    /// Template variable binding, `key=value` (repeatable)
    #[arg(long = "var", value_name = "KEY=VALUE")]
    pub vars: Vec<String>,

    /// Fail when the document still contains unbound `${...}` variables
    #[arg(long, env = "DPDS_STRICT_VARIABLES")]
    pub strict_variables: bool,

    /// Output format: text, json
    #[arg(long, value_enum, default_value = "text", env = "DPDS_FORMAT")]
    pub format: OutputFormat,
}

impl CliConfig {
    pub fn traversal_mode(&self) -> Mode {
        self.mode.into()
    }
}

/// Install the global tracing subscriber. `RUST_LOG` overrides the default filter.
pub fn init_tracing() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_LOG_FILTER.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = CliConfig::try_parse_from(["dpds-validate", "descriptor.json"]).unwrap();
        assert_eq!(config.file, PathBuf::from("descriptor.json"));
        assert_eq!(config.traversal_mode(), Mode::ValidateOnly);
        assert_eq!(config.format, OutputFormat::Text);
        assert!(config.vars.is_empty());
        assert!(!config.strict_variables);
    }

    #[test]
    fn test_all_flags() {
        let config = CliConfig::try_parse_from([
            "dpds-validate",
            "dp.json",
            "--mode",
            "validate-and-generate",
            "--expected-fqn",
            "urn:dpds:acme:dataproducts:orders:1",
            "--var",
            "env=prod",
            "--var",
            "region=eu",
            "--strict-variables",
            "--format",
            "json",
        ])
        .unwrap();
        assert_eq!(config.traversal_mode(), Mode::ValidateAndGenerate);
        assert_eq!(
            config.expected_fqn.as_deref(),
            Some("urn:dpds:acme:dataproducts:orders:1")
        );
        assert_eq!(config.vars, vec!["env=prod", "region=eu"]);
        assert!(config.strict_variables);
        assert_eq!(config.format, OutputFormat::Json);
    }

    #[test]
    fn test_unknown_mode_rejected() {
        assert!(
            CliConfig::try_parse_from(["dpds-validate", "dp.json", "--mode", "lenient"]).is_err()
        );
    }

    #[test]
    fn test_generate_only_mode() {
        let config =
            CliConfig::try_parse_from(["dpds-validate", "dp.json", "--mode", "generate-only"])
                .unwrap();
        assert_eq!(config.traversal_mode(), Mode::GenerateOnly);
    }
}
