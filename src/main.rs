//! # Blockspan
//!
//! Answers selection queries over a block-based rich-text document.
//!
//! ## Quick Start
//!
//! ```bash
//! # Whole document: list blocks and check for any entity
//! cargo run -- document.json
//!
//! # Blocks a1..c3, looking for links
//! cargo run -- document.json --anchor a1 --focus c3 --entity-type LINK
//! ```

use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use blockspan_core::{
    AnyEntityStrategy, Config, CoreError, EntityChecker, EntityTypeStrategy, selected_blocks,
};
use blockspan_model::{BlockKey, EditorState, RawDocument, SelectionState, convert_from_raw};

/// Blockspan - selection queries for block-based documents
#[derive(Parser, Debug)]
#[command(name = "blockspan")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Raw JSON document
    #[arg(value_name = "DOCUMENT")]
    document: PathBuf,

    /// Block where the selection starts (default: first block)
    #[arg(long, value_name = "KEY")]
    anchor: Option<String>,

    /// Offset in the anchor block
    #[arg(long, value_name = "N", default_value_t = 0)]
    anchor_offset: usize,

    /// Block where the selection ends (default: last block)
    #[arg(long, value_name = "KEY")]
    focus: Option<String>,

    /// Offset in the focus block (default: end of block)
    #[arg(long, value_name = "N")]
    focus_offset: Option<usize>,

    /// Entity type to look for (default: from config, else any entity)
    #[arg(short, long, value_name = "TYPE")]
    entity_type: Option<String>,

    /// Config file (default: platform config dir)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Verbose logging
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

/// Result of one query.
#[derive(Debug, PartialEq)]
struct Report {
    blocks: Vec<BlockKey>,
    entity_type: Option<String>,
    contains: bool,
}

impl std::fmt::Display for Report {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for key in &self.blocks {
            writeln!(f, "{}", key)?;
        }
        write!(
            f,
            "contains {}: {}",
            self.entity_type.as_deref().unwrap_or("any entity"),
            self.contains
        )
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => Config::load_from(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => Config::load(),
    };

    // Initialize logging
    let log_level = match args.verbose {
        0 => config.logging.level()?,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_level(true)
                .with_writer(std::io::stderr),
        )
        .with(tracing_subscriber::filter::LevelFilter::from_level(
            log_level,
        ))
        .init();

    tracing::info!("Starting blockspan v{}", env!("CARGO_PKG_VERSION"));

    let report = run(&args, &config)?;
    println!("{}", report);

    Ok(())
}

/// Loads the document and runs both queries.
fn run(args: &Args, config: &Config) -> anyhow::Result<Report> {
    let raw = RawDocument::from_file(&args.document)
        .with_context(|| format!("Failed to read document {}", args.document.display()))?;
    let content = convert_from_raw(&raw).context("Invalid document")?;
    tracing::info!("Loaded {} block(s)", content.len());

    let anchor = args
        .anchor
        .as_deref()
        .map(BlockKey::from)
        .unwrap_or_else(|| content.first_block().key().clone());
    let focus = args
        .focus
        .as_deref()
        .map(BlockKey::from)
        .unwrap_or_else(|| content.last_block().key().clone());
    let focus_offset = match args.focus_offset {
        Some(offset) => offset,
        None => content
            .block_for_key(&focus)
            .map(|block| block.len())
            .ok_or_else(|| CoreError::UnknownBlock(focus.clone()))?,
    };

    let selection = SelectionState::new(anchor, args.anchor_offset, focus, focus_offset);
    let state = EditorState::with_selection(content, selection);
    let content = state.current_content();
    let selection = state.selection();

    let blocks = selected_blocks(content, &selection.anchor_key, &selection.focus_key)?
        .into_iter()
        .map(|block| block.key().clone())
        .collect();

    let entity_type = args
        .entity_type
        .clone()
        .or_else(|| config.query.default_entity_type.clone())
        .filter(|kind| !kind.is_empty());

    let contains = match &entity_type {
        Some(kind) => EntityChecker::new(EntityTypeStrategy::new(kind.as_str())).contains(&state, None)?,
        None => EntityChecker::new(AnyEntityStrategy).contains(&state, None)?,
    };

    Ok(Report {
        blocks,
        entity_type,
        contains,
    })
}
