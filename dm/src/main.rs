//! docmcp - documentation tool server
//!
//! CLI entry point: serve a corpus over stdio, generate a standalone server,
//! or run a single query locally.

use std::fs;
use std::path::PathBuf;

use clap::Parser;
use colored::Colorize;
use eyre::{Context, Result, eyre};
use tracing::{debug, info};

use docmcp::cli::{Cli, Command, DocsArgs, LabelArgs};
use docmcp::codegen::{self, DocmcpDependency, GenerateOptions};
use docmcp::config::Config;
use docmcp::logging::{self, LogTarget};
use docmcp::{McpServer, ServerLabels, build_engine, loader};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load log level from config file early (before full config load)
    let config_log_level = Config::load_log_level(cli.config.as_ref());

    // Setup logging with priority: CLI > config > INFO default
    let level = cli.log_level.as_deref().or(config_log_level.as_deref());
    logging::setup_logging(level, LogTarget::File(logging::default_log_path())).context("Failed to setup logging")?;

    // Load configuration
    let config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;

    // Dispatch command
    debug!(command = ?cli.command, "main: dispatching command");
    match cli.command {
        Command::Serve { docs, labels } => {
            debug!("main: matched Serve command");
            cmd_serve(&config, &docs, &labels).await
        }
        Command::Generate {
            docs,
            labels,
            out,
            crate_name,
            crate_path,
            force,
        } => {
            debug!(out = %out.display(), ?crate_name, ?crate_path, force, "main: matched Generate command");
            cmd_generate(&config, &docs, &labels, out, crate_name, crate_path, force)
        }
        Command::List { docs } => {
            debug!("main: matched List command");
            cmd_list(&config, &docs)
        }
        Command::Get { docs, name } => {
            debug!(%name, "main: matched Get command");
            cmd_get(&config, &docs, &name)
        }
        Command::Search { docs, query } => {
            debug!(%query, "main: matched Search command");
            cmd_search(&config, &docs, &query)
        }
    }
}

/// Load the corpus named by the CLI, falling back to the config's `docs` section
fn load_corpus(config: &Config, docs: &DocsArgs) -> Result<Vec<(String, String)>> {
    debug!(?docs, "load_corpus: called");
    let patterns = if docs.docs.is_empty() {
        config.docs.patterns.clone()
    } else {
        docs.docs.clone()
    };
    let root = docs.root.clone().unwrap_or_else(|| config.docs.root.clone());

    let documents = loader::load_documents(&root, &patterns)?;
    if documents.is_empty() && !docs.allow_empty {
        return Err(eyre!(
            "No documents matched {:?} under {} (use --allow-empty to continue anyway)",
            patterns,
            root.display()
        ));
    }
    Ok(documents)
}

fn server_labels(config: &Config, labels: &LabelArgs) -> ServerLabels {
    ServerLabels::new(
        labels.name.clone().unwrap_or_else(|| config.server.name.clone()),
        labels.subject.clone().or_else(|| config.server.subject.clone()),
    )
}

/// Serve over stdio until EOF
async fn cmd_serve(config: &Config, docs: &DocsArgs, labels: &LabelArgs) -> Result<()> {
    debug!("cmd_serve: called");
    let documents = load_corpus(config, docs)?;
    let engine = build_engine(documents, config.search.clone())?;
    let labels = server_labels(config, labels);
    info!("Serving {} as {}", labels.documentation_phrase(), labels.name);
    McpServer::new(engine, labels).serve_stdio().await
}

/// Write a standalone server crate
fn cmd_generate(
    config: &Config,
    docs: &DocsArgs,
    labels: &LabelArgs,
    out: PathBuf,
    crate_name: Option<String>,
    crate_path: Option<PathBuf>,
    force: bool,
) -> Result<()> {
    debug!("cmd_generate: called");
    let documents = load_corpus(config, docs)?;
    let labels = server_labels(config, labels);

    let dependency = match crate_path {
        Some(path) => {
            let path = fs::canonicalize(&path).context(format!("Failed to resolve crate path {}", path.display()))?;
            DocmcpDependency::Path(path)
        }
        None => DocmcpDependency::default(),
    };
    let options = GenerateOptions {
        crate_name,
        dependency,
        search: config.search.clone(),
    };

    let project = codegen::generate(&documents, &labels, &options)?;
    codegen::write_project(&project, &out, force)?;

    println!(
        "{} Generated {} ({} documents) in {}",
        "✓".green(),
        project.crate_name.bold(),
        documents.len(),
        out.display()
    );
    Ok(())
}

fn cmd_list(config: &Config, docs: &DocsArgs) -> Result<()> {
    debug!("cmd_list: called");
    let engine = build_engine(load_corpus(config, docs)?, config.search.clone())?;
    println!("{}", engine.list_documents());
    Ok(())
}

fn cmd_get(config: &Config, docs: &DocsArgs, name: &str) -> Result<()> {
    debug!(%name, "cmd_get: called");
    let engine = build_engine(load_corpus(config, docs)?, config.search.clone())?;
    let content = engine.get_document(name)?;
    println!("{}", content);
    Ok(())
}

fn cmd_search(config: &Config, docs: &DocsArgs, query: &str) -> Result<()> {
    debug!(%query, "cmd_search: called");
    let engine = build_engine(load_corpus(config, docs)?, config.search.clone())?;
    println!("{}", engine.search_documents(query)?);
    Ok(())
}
