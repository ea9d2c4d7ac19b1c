//! Rule descriptor CLI
//!
//! Usage:
//!   gherkin-rules export [--format json|yaml] [--output FILE]
//!   gherkin-rules list [--severity LEVEL] [--enabled-only] [--cross-file]
//!   gherkin-rules show <rule-key>

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use gherkin_lint::registry::{descriptor, export_descriptors, exported_rules, RuleDescriptor};
use gherkin_lint::{Severity, EXCLUDED_RULE};
use std::path::PathBuf;

/// Gherkin lint rules CLI
#[derive(Parser)]
#[command(name = "gherkin-rules")]
#[command(about = "Inspect and export the Gherkin lint rule descriptors")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Export rule descriptors with their defaults
    Export {
        /// Output format (json, yaml)
        #[arg(short, long, default_value = "json")]
        format: String,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// List rules
    List {
        /// Filter by severity
        #[arg(short, long)]
        severity: Option<String>,

        /// Show only rules enabled by default
        #[arg(long)]
        enabled_only: bool,

        /// Show only cross-file rules
        #[arg(long)]
        cross_file: bool,
    },

    /// Show rule details
    Show {
        /// Rule key
        rule_key: String,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Export { format, output } => cmd_export(&format, output.as_ref())?,
        Commands::List {
            severity,
            enabled_only,
            cross_file,
        } => cmd_list(severity.as_deref(), enabled_only, cross_file)?,
        Commands::Show { rule_key } => cmd_show(&rule_key)?,
    }

    Ok(())
}

fn cmd_export(format: &str, output: Option<&PathBuf>) -> anyhow::Result<()> {
    let rules = export_descriptors();
    let rendered = match format.to_lowercase().as_str() {
        "json" => serde_json::to_string_pretty(&rules)?,
        "yaml" | "yml" => serde_yaml::to_string(&rules)?,
        other => bail!("Unknown format: {}", other),
    };

    match output {
        Some(path) => {
            std::fs::write(path, rendered)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            eprintln!("Exported rules to {}", path.display());
        }
        None => println!("{}", rendered),
    }

    Ok(())
}

fn cmd_list(severity: Option<&str>, enabled_only: bool, cross_file: bool) -> anyhow::Result<()> {
    let severity = severity
        .map(|s| s.parse::<Severity>().map_err(anyhow::Error::msg))
        .transpose()?;

    let selected: Vec<&RuleDescriptor> = exported_rules()
        .filter(|rule| severity.map_or(true, |s| rule.severity == s))
        .filter(|rule| !enabled_only || rule.default_enabled)
        .filter(|rule| !cross_file || rule.is_cross_file())
        .collect();

    println!("{:<26} {:<12} {:<4} DESCRIPTION", "RULE", "SEVERITY", "ON");
    println!("{}", "-".repeat(80));
    for rule in selected {
        println!(
            "{:<26} {:<12} {:<4} {}",
            rule.key,
            rule.severity.to_string(),
            if rule.default_enabled { "yes" } else { "no" },
            rule.description
        );
    }

    Ok(())
}

fn cmd_show(rule_key: &str) -> anyhow::Result<()> {
    let Some(rule) = descriptor(rule_key) else {
        bail!("Unknown rule: {}", rule_key);
    };

    println!("Rule: {}", rule.key);
    println!("Description: {}", rule.description);
    println!("Severity: {}", rule.severity);
    println!("Enabled by default: {}", rule.default_enabled);
    println!("Cross-file: {}", rule.is_cross_file());
    if rule.key == EXCLUDED_RULE {
        println!("Status: never activated");
    }
    if !rule.properties.is_empty() {
        println!("Properties:");
        for property in rule.properties {
            println!(
                "  {} ({}, default \"{}\"): {}",
                property.name, property.kind, property.default, property.description
            );
        }
    }

    Ok(())
}
