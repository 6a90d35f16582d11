//! CLI binary for lore-graph: resolve, search, lint, and export relation panels.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use lore_core::config::LoreConfig;
use lore_core::index::NameIndex;
use lore_core::model::{Locale, LoreSnapshot};
use lore_nav::export::ExportFormat;
use lore_nav::lint::Severity;
use lore_nav::panel_cache::PanelCache;
use lore_nav::resolver::{RelationGraphResolver, RelationPanel, ResolverInput};
use lore_nav::search::SearchParams;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "lore", about = "Champion and lore-character relation graph")]
struct Cli {
    /// Content root directory (defaults to current directory)
    #[arg(short, long, global = true)]
    root: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write an empty snapshot to .lore/snapshot.json
    Init {
        /// Overwrite an existing snapshot
        #[arg(long)]
        force: bool,
    },

    /// Show snapshot statistics
    Info,

    /// Resolve and print the relation panel of one or more entities
    Relations {
        /// Focal entity display names
        #[arg(required = true)]
        names: Vec<String>,

        /// Note locale: en, pl (defaults to config)
        #[arg(short, long)]
        locale: Option<Locale>,

        /// Print panels as JSON
        #[arg(long)]
        json: bool,
    },

    /// Search champions and lore characters by name
    Search {
        /// Search query (partial names are fine)
        query: String,

        /// Maximum number of results (defaults to config)
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Check content for unmatched factions, unknown kinds, and name collisions
    Lint,

    /// Export one entity's relation panel as DOT (Graphviz) or Mermaid flowchart
    Export {
        /// Focal entity display name
        name: String,

        /// Output format: dot, mermaid
        #[arg(short, long, default_value = "dot")]
        format: ExportFormat,

        /// Note locale: en, pl (defaults to config)
        #[arg(short, long)]
        locale: Option<Locale>,
    },
}

fn get_content_root(cli: &Cli) -> Result<PathBuf> {
    match &cli.root {
        Some(p) => Ok(p.clone()),
        None => std::env::current_dir().context("failed to get current directory"),
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let content_root = get_content_root(&cli)?;
    let config = LoreConfig::load(&content_root)?;

    match cli.command {
        Commands::Init { force } => cmd_init(&content_root, force),
        Commands::Info => cmd_info(&content_root),
        Commands::Relations {
            names,
            locale,
            json,
        } => cmd_relations(
            &content_root,
            &config,
            &names,
            locale.unwrap_or(config.display.default_locale),
            json,
        ),
        Commands::Search { query, limit } => cmd_search(&content_root, &config, &query, limit),
        Commands::Lint => cmd_lint(&content_root),
        Commands::Export {
            name,
            format,
            locale,
        } => cmd_export(
            &content_root,
            &config,
            &name,
            format,
            locale.unwrap_or(config.display.default_locale),
        ),
    }
}

fn load_snapshot(content_root: &Path) -> Result<LoreSnapshot> {
    if !lore_core::storage::snapshot_exists(content_root) {
        anyhow::bail!("No snapshot found. Run `lore init` first.");
    }
    lore_core::storage::load(content_root)
}

fn cmd_init(content_root: &Path, force: bool) -> Result<()> {
    if lore_core::storage::snapshot_exists(content_root) && !force {
        anyhow::bail!(
            "snapshot already exists at {}. Use --force to overwrite.",
            lore_core::storage::snapshot_file(content_root).display()
        );
    }
    let snapshot = LoreSnapshot::new();
    lore_core::storage::save(content_root, &snapshot)?;
    eprintln!(
        "Wrote empty snapshot to {}",
        lore_core::storage::snapshot_file(content_root).display()
    );
    Ok(())
}

fn cmd_info(content_root: &Path) -> Result<()> {
    if !lore_core::storage::snapshot_exists(content_root) {
        eprintln!("No snapshot found. Run `lore init` first.");
        return Ok(());
    }

    let snapshot = lore_core::storage::load(content_root)?;

    println!("Snapshot v{}", snapshot.version);
    println!("Created: {}", snapshot.created_at);
    println!("Updated: {}", snapshot.updated_at);
    println!();
    println!("Champions: {}", snapshot.metadata.total_champions);
    println!(
        "Lore characters: {}",
        snapshot.metadata.total_lore_characters
    );
    println!("Curated entities: {}", snapshot.metadata.curated_entities);
    println!("Curated relations: {}", snapshot.metadata.total_relations);
    println!("Factions: {}", snapshot.metadata.total_factions);

    let factions = snapshot.faction_tags();
    if !factions.is_empty() {
        println!("\nFactions:");
        for tag in factions {
            let members = snapshot
                .champions
                .iter()
                .filter(|e| e.has_faction(tag))
                .count();
            println!("  {} ({} champions)", tag, members);
        }
    }

    Ok(())
}

fn cmd_relations(
    content_root: &Path,
    config: &LoreConfig,
    names: &[String],
    locale: Locale,
    json: bool,
) -> Result<()> {
    let snapshot = load_snapshot(content_root)?;
    let index = NameIndex::from_snapshot(&snapshot);
    let resolver = RelationGraphResolver::from_snapshot(&snapshot)
        .with_dense_threshold(config.display.dense_threshold);
    let mut cache = PanelCache::new(config.cache.capacity);

    let mut panels = Vec::new();
    let mut titles = Vec::new();
    for name in names {
        index.resolve(name)?;
        titles.push(lore_nav::lookup::find_focal(&snapshot, name)?.title.clone());
        let input = ResolverInput::from_snapshot(&snapshot, name, locale);
        panels.push(cache.get_or_resolve(&resolver, &input).clone());
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&panels)?);
    } else {
        for (i, (panel, title)) in panels.iter().zip(&titles).enumerate() {
            if i > 0 {
                println!();
            }
            print_panel(panel, title.as_deref());
        }
    }

    let (hits, misses) = cache.stats();
    tracing::debug!(hits, misses, "panel cache");
    Ok(())
}

fn print_panel(panel: &RelationPanel, title: Option<&str>) {
    match title {
        Some(title) => println!("{}, {} [{}]", panel.focal_name, title, panel.locale),
        None => println!("{} [{}]", panel.focal_name, panel.locale),
    }
    println!("  {} relations in {} groups", panel.len(), panel.groups.len());
    for group in &panel.groups {
        println!(
            "  {} ({}, {:?})",
            group.key,
            group.entries.len(),
            group.density
        );
        for relation in &group.entries {
            let target = match &relation.resolution.identifier {
                Some(id) => format!("{} <{}>", relation.target_name, id),
                None => format!("{} (unknown)", relation.target_name),
            };
            match &relation.note {
                Some(note) => println!(
                    "    {} {} [{}] {}",
                    relation.icon.as_str(),
                    target,
                    relation.category.label(),
                    note
                ),
                None => println!(
                    "    {} {} [{}]",
                    relation.icon.as_str(),
                    target,
                    relation.category.label()
                ),
            }
        }
    }
    if !panel.unmatched_factions.is_empty() {
        eprintln!(
            "  note: factions with no members: {}",
            panel.unmatched_factions.join(", ")
        );
    }
}

fn cmd_search(
    content_root: &Path,
    config: &LoreConfig,
    query: &str,
    limit: Option<usize>,
) -> Result<()> {
    let snapshot = load_snapshot(content_root)?;
    let params = SearchParams {
        query,
        limit: limit.unwrap_or(config.search.result_limit),
        min_similarity: config.search.min_similarity,
        kind_filter: None,
    };
    let hits = lore_nav::search::search_with_params(&snapshot, &params);

    if hits.is_empty() {
        println!("No results found for: {}", query);
        return Ok(());
    }

    for hit in &hits {
        let title = hit.title.as_deref().unwrap_or("");
        println!(
            "[{:.2}] {} <{}> {:?} {}",
            hit.score, hit.name, hit.id, hit.kind, title
        );
    }

    Ok(())
}

fn cmd_lint(content_root: &Path) -> Result<()> {
    let snapshot = load_snapshot(content_root)?;
    let report = lore_nav::lint::lint_snapshot(&snapshot);

    for finding in &report.findings {
        let level = match finding.severity() {
            Severity::Error => "ERROR",
            Severity::Warning => "WARN",
            Severity::Info => "INFO",
        };
        println!("{}: {}", level, finding.message());
    }

    if report.is_clean() {
        eprintln!("Content is clean. No issues found.");
        return Ok(());
    }

    eprintln!(
        "\n{} errors, {} warnings, {} info",
        report.count(Severity::Error),
        report.count(Severity::Warning),
        report.count(Severity::Info)
    );
    if report.has_errors() {
        anyhow::bail!("lint found {} errors", report.count(Severity::Error));
    }
    Ok(())
}

fn cmd_export(
    content_root: &Path,
    config: &LoreConfig,
    name: &str,
    format: ExportFormat,
    locale: Locale,
) -> Result<()> {
    let snapshot = load_snapshot(content_root)?;
    NameIndex::from_snapshot(&snapshot).resolve(name)?;
    let panel = lore_nav::resolver::resolve_for_snapshot(
        &snapshot,
        name,
        locale,
        config.display.dense_threshold,
    );
    print!("{}", lore_nav::export::export(&panel, format));
    Ok(())
}
