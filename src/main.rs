use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tokio_util::sync::CancellationToken;
use tracing::info;
use tracing_subscriber::EnvFilter;

use tessel_activity::{EvaluatorConfig, StandardCatalog, TemplateEvaluator};
use tessel_builder::WorkflowBuilder;
use tessel_config::WorkflowDef;
use tessel_runtime::{RunnerConfig, WorkflowRunner};

/// Tessel - assemble and run activity workflows
#[derive(Parser)]
#[command(name = "tessel")]
#[command(version, about, long_about = None)]
struct Cli {
  #[command(subcommand)]
  command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
  /// Assemble a workflow definition and print the resulting workflow type
  Build {
    /// Path to the workflow file (JSON)
    workflow_file: PathBuf,
  },

  /// Assemble and run a workflow, reading the input payload from stdin
  Run {
    /// Path to the workflow file (JSON)
    workflow_file: PathBuf,

    /// Fail on undefined variables in expressions
    #[arg(long)]
    strict: bool,

    /// Maximum number of activity executions
    #[arg(long, default_value_t = RunnerConfig::default().max_steps)]
    max_steps: usize,
  },
}

fn main() -> Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::from_default_env())
    .with_writer(io::stderr)
    .init();

  let cli = Cli::parse();

  match cli.command {
    Some(Commands::Build { workflow_file }) => build_workflow(&workflow_file)?,
    Some(Commands::Run {
      workflow_file,
      strict,
      max_steps,
    }) => {
      let rt = tokio::runtime::Runtime::new()?;
      rt.block_on(run_workflow(&workflow_file, strict, max_steps))?;
    }
    None => {
      println!("tessel - use --help to see available commands");
    }
  }

  Ok(())
}

fn catalog() -> Arc<StandardCatalog> {
  Arc::new(StandardCatalog::with_builtins())
}

fn load_definition(workflow_file: &Path) -> Result<WorkflowDef> {
  let content = std::fs::read_to_string(workflow_file)
    .with_context(|| format!("failed to read workflow file: {}", workflow_file.display()))?;

  serde_json::from_str(&content)
    .with_context(|| format!("failed to parse workflow file: {}", workflow_file.display()))
}

fn build_workflow(workflow_file: &Path) -> Result<()> {
  let def = load_definition(workflow_file)?;
  let workflow = WorkflowBuilder::new(catalog())
    .build_from(&def, |_| {})
    .context("failed to assemble workflow")?;

  println!("{}", serde_json::to_string_pretty(&workflow)?);
  Ok(())
}

async fn run_workflow(workflow_file: &Path, strict: bool, max_steps: usize) -> Result<()> {
  let def = load_definition(workflow_file)?;
  let catalog = catalog();
  let workflow = WorkflowBuilder::new(catalog.clone())
    .build_from(&def, |_| {})
    .context("failed to assemble workflow")?;

  info!(
    name = %workflow.name,
    activities = workflow.activities().len(),
    "workflow loaded"
  );

  let input = read_payload_from_stdin()?;

  let evaluator = TemplateEvaluator::new(EvaluatorConfig {
    strict_undefined: strict,
  });
  let runner = WorkflowRunner::new(catalog, Arc::new(evaluator), RunnerConfig { max_steps });

  let cancel = CancellationToken::new();
  let ctrl_c = cancel.clone();
  tokio::spawn(async move {
    if tokio::signal::ctrl_c().await.is_ok() {
      ctrl_c.cancel();
    }
  });

  let result = runner
    .run(&workflow, input, cancel)
    .await
    .context("workflow execution failed")?;

  eprintln!("Execution {}: {:?}", result.execution_id, result.status);
  eprintln!("Activities executed: {}", result.executed.len());

  println!("{}", serde_json::to_string_pretty(&result.output)?);
  Ok(())
}

fn read_payload_from_stdin() -> Result<serde_json::Map<String, serde_json::Value>> {
  use std::io::IsTerminal;

  if io::stdin().is_terminal() {
    return Ok(serde_json::Map::new());
  }

  let mut input = String::new();
  io::stdin()
    .read_to_string(&mut input)
    .context("failed to read payload from stdin")?;

  if input.trim().is_empty() {
    Ok(serde_json::Map::new())
  } else {
    serde_json::from_str(&input).context("payload on stdin must be a JSON object")
  }
}
