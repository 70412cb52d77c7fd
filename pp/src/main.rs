use clap::Parser;
use colored::*;
use eyre::{Context, Result, eyre};
use serde::Serialize;
use std::io::Read;
use tracing::debug;

use promptpatterns::cli::{Cli, Command};
use promptpatterns::config::{Config, OutputFormat};
use promptpatterns::{Arity, Pattern, PatternInstance};

#[derive(Serialize)]
struct RenderOutput<'a> {
    #[serde(flatten)]
    instance: &'a PatternInstance,
    prompt: String,
}

#[derive(Serialize)]
struct PatternInfo {
    name: &'static str,
    arity: Arity,
    description: &'static str,
}

impl From<Pattern> for PatternInfo {
    fn from(pattern: Pattern) -> Self {
        Self {
            name: pattern.name(),
            arity: pattern.arity(),
            description: pattern.description(),
        }
    }
}

fn setup_logging(verbose: bool) -> Result<()> {
    let level = if verbose { tracing::Level::DEBUG } else { tracing::Level::INFO };

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .try_init()
        .map_err(|e| eyre!("Failed to install subscriber: {}", e))?;

    debug!("Logging initialized (verbose: {})", verbose);
    Ok(())
}

/// Lines from stdin, minus trailing blank lines
fn read_stdin_items() -> Result<Vec<String>> {
    let mut input = String::new();
    std::io::stdin()
        .read_to_string(&mut input)
        .context("Failed to read items from stdin")?;

    let mut items: Vec<String> = input.lines().map(str::to_string).collect();
    while items.last().is_some_and(|line| line.trim().is_empty()) {
        items.pop();
    }
    Ok(items)
}

fn describe_arity(arity: &Arity) -> String {
    match arity {
        Arity::Exactly(fields) => fields.join(", "),
        Arity::AtMost(max) => format!("up to {} keywords", max),
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.verbose).context("Failed to setup logging")?;

    let config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;
    let output = if cli.json { OutputFormat::Json } else { config.output };

    match cli.command {
        Command::Render { pattern, stdin, items } => {
            let name = pattern
                .or(config.default_pattern)
                .ok_or_else(|| eyre!("No pattern given and no default_pattern configured"))?;
            let items = if stdin { read_stdin_items()? } else { items };

            let pattern: Pattern = name.parse()?;
            let instance = PatternInstance::new(pattern, &items)?;
            debug!(pattern = %pattern, items = items.len(), "Validated render request");

            match output {
                OutputFormat::Text => println!("{}", instance),
                OutputFormat::Json => print_json(&RenderOutput {
                    instance: &instance,
                    prompt: instance.render(),
                })?,
            }
        }
        Command::List => {
            let patterns = promptpatterns::global_registry().patterns();
            match output {
                OutputFormat::Text => {
                    for pattern in patterns {
                        println!("{:<10} {}", pattern.name().cyan(), describe_arity(&pattern.arity()).dimmed());
                    }
                }
                OutputFormat::Json => print_json(&patterns.map(PatternInfo::from).collect::<Vec<_>>())?,
            }
        }
        Command::Show { pattern } => {
            let pattern: Pattern = pattern.parse()?;
            match output {
                OutputFormat::Text => {
                    println!("Pattern: {}", pattern.name().cyan());
                    println!("  {}", pattern.description());
                    match pattern.arity() {
                        Arity::Exactly(fields) => {
                            for (i, field) in fields.iter().enumerate() {
                                println!("  {}. {}", i + 1, field.yellow());
                            }
                        }
                        Arity::AtMost(max) => println!("  Keywords: up to {}", max.to_string().yellow()),
                    }
                }
                OutputFormat::Json => print_json(&PatternInfo::from(pattern))?,
            }
        }
    }

    Ok(())
}
