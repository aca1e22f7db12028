//! Trowel CLI - replay recorded gestures against a scenario.
//!
//! A scenario file describes a rendered page and the steps a user took on it.
//! The CLI builds the editor, executes the steps and prints what happened.

mod logger;

use anyhow::{Context, Result};
use api::{Command, CommandResult, Editor, EditorConfig, Query, QueryResult, Scenario};
use clap::{Parser, Subcommand};
use log::LevelFilter;
use std::path::{Path, PathBuf};

/// Trowel - headless drag, sort and resize engine
#[derive(Parser)]
#[command(name = "trowel")]
#[command(about = "Replay drag, sort and resize gestures against a page scenario")]
struct Cli {
    /// Editor configuration (JSON), replacing the scenario's own
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Append log output to this file
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run every step and print the resulting tree and events
    Replay {
        scenario: PathBuf,

        /// Print the final state as JSON
        #[arg(long)]
        json: bool,
    },

    /// Run every step, printing the placeholder after each one
    Inspect { scenario: PathBuf },

    /// Run every step, then answer a JSON query
    Query {
        scenario: PathBuf,

        /// JSON query, e.g. {"type": "children", "target": "root"}
        json: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logger::TrowelLogger::init(level(cli.verbose), cli.log_file.as_deref())?;

    match &cli.command {
        Commands::Replay { scenario, json } => replay(&cli, scenario, *json),
        Commands::Inspect { scenario } => inspect(&cli, scenario),
        Commands::Query { scenario, json } => query(&cli, scenario, json),
    }
}

fn level(verbose: u8) -> LevelFilter {
    match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

/// Loads and builds a scenario, honoring `--config`.
fn open(cli: &Cli, path: &Path) -> Result<(Scenario, Editor)> {
    let scenario = Scenario::load(path)
        .with_context(|| format!("failed to load scenario {}", path.display()))?;
    let editor = match &cli.config {
        Some(config) => {
            let config = EditorConfig::load(config)
                .with_context(|| format!("failed to load config {}", config.display()))?;
            scenario.build_with(config)
        }
        None => scenario.build(),
    }
    .with_context(|| format!("failed to build scenario {}", path.display()))?;
    Ok((scenario, editor))
}

fn replay(cli: &Cli, path: &Path, json: bool) -> Result<()> {
    let (scenario, mut editor) = open(cli, path)?;
    let results = editor.execute_all(scenario.steps.iter().cloned());
    let QueryResult::Tree { root } = editor.query(Query::Tree) else {
        anyhow::bail!("tree query failed");
    };

    if json {
        let output = serde_json::json!({
            "results": results,
            "tree": root,
            "events": editor.events(),
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    for (i, (step, result)) in scenario.steps.iter().zip(&results).enumerate() {
        println!("{:>3} {} -> {}", i + 1, step_name(step)?, describe(result));
    }
    println!();
    print!("{}", root.outline());
    println!();
    println!("{} event(s)", editor.events().len());
    for event in editor.events() {
        println!("  {}", serde_json::to_string(event)?);
    }
    Ok(())
}

fn inspect(cli: &Cli, path: &Path) -> Result<()> {
    let (scenario, mut editor) = open(cli, path)?;
    for (i, step) in scenario.steps.iter().enumerate() {
        let result = editor.execute(step.clone());
        println!("{:>3} {} -> {}", i + 1, step_name(step)?, describe(&result));
        if let QueryResult::Placeholder {
            placeholder,
            target,
            pos,
        } = editor.query(Query::Placeholder)
        {
            if placeholder.visible {
                println!(
                    "    placeholder at ({}, {}) in {}",
                    placeholder.left,
                    placeholder.top,
                    target.as_deref().unwrap_or("-")
                );
            }
            if let Some(pos) = pos {
                println!("    pos {} {:?}", pos.index_el, pos.method);
            }
        }
    }
    Ok(())
}

fn query(cli: &Cli, path: &Path, json: &str) -> Result<()> {
    let query: Query = serde_json::from_str(json).context("invalid query JSON")?;
    let (scenario, mut editor) = open(cli, path)?;
    editor.execute_all(scenario.steps.iter().cloned());
    let result = editor.query(query);
    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}

/// The `type` tag of a command.
fn step_name(step: &Command) -> Result<String> {
    let value = serde_json::to_value(step)?;
    Ok(value
        .get("type")
        .and_then(|tag| tag.as_str())
        .unwrap_or("command")
        .to_string())
}

fn describe(result: &CommandResult) -> String {
    match result {
        CommandResult::Success {
            cancelled: true, ..
        } => "cancelled".to_string(),
        CommandResult::Success { moved, .. } if !moved.is_empty() => {
            format!("moved {}", moved.join(", "))
        }
        CommandResult::Success { .. } => "ok".to_string(),
        CommandResult::Error { message } => format!("error: {message}"),
    }
}
