//! Command-line interface for catalog-api.
//!
//! With no subcommand the tool builds the JSON API (optionally into the
//! given directory). Subcommands query the catalog without writing files.

use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::config::{self, ResolvedConfig};
use crate::content::Sources;
use crate::core::{ApiBuilder, BuildOptions, BuildReport};
use crate::domain::{Difficulty, Resource, ResourceType};
use crate::library::{Catalog, SearchFilters, StatsMode};

/// catalog-api - build the static JSON API for the resource catalog
#[derive(Parser, Debug)]
#[command(name = "catalog-api")]
#[command(author, version, about, long_about = None)]
#[command(args_conflicts_with_subcommands = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    #[command(flatten)]
    pub build: BuildArgs,
}

/// Options for building the API tree
#[derive(Args, Debug, Clone, Default)]
pub struct BuildArgs {
    /// Output directory (default: <project root>/api). A directory named
    /// like a subcommand (build, config, tags, ...) must be written as ./name
    pub output_dir: Option<PathBuf>,

    /// Seed for placeholder stats (CATALOG_API_SEED is read when unset)
    #[arg(long, conflicts_with = "random")]
    pub seed: Option<u64>,

    /// Draw fresh placeholder stats instead of seeded ones
    #[arg(long)]
    pub random: bool,

    /// Pin the timestamp stamped into every file (RFC 3339)
    #[arg(long)]
    pub generated_at: Option<DateTime<Utc>>,

    /// JSON indent width
    #[arg(long)]
    pub indent: Option<usize>,

    /// Fail after writing if the catalog has warnings
    #[arg(long)]
    pub strict: bool,
}

impl BuildArgs {
    /// Layer flags over the resolved configuration
    pub fn apply(&self, config: &mut ResolvedConfig) {
        if let Some(dir) = &self.output_dir {
            config.output_dir = dir.clone();
        }
        if let Some(indent) = self.indent {
            config.indent = indent;
        }
        if self.random {
            config.stats_mode = StatsMode::Random;
        } else if let Some(seed) = self.seed {
            config.stats_mode = StatsMode::Seeded(seed);
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build the JSON API (same as running without a subcommand)
    Build(BuildArgs),

    /// Search the catalog
    Search {
        /// Search query (empty matches everything)
        #[arg(default_value = "")]
        query: String,

        /// Filter by resource type
        #[arg(short = 't', long = "type")]
        resource_type: Option<ResourceType>,

        /// Filter by difficulty
        #[arg(short, long)]
        difficulty: Option<Difficulty>,

        /// Filter by language
        #[arg(long)]
        language: Option<String>,

        /// Filter by framework
        #[arg(long)]
        framework: Option<String>,

        /// Filter by category id
        #[arg(short, long)]
        category: Option<String>,

        /// Match resources with any of these tags (repeatable)
        #[arg(long = "tag")]
        tags: Vec<String>,
    },

    /// Show details of a resource
    Show {
        /// Resource id or slug
        id: String,

        /// Show content and the full source record
        #[arg(short, long)]
        full: bool,
    },

    /// List ranked resources
    Top {
        /// Ranking to use
        #[arg(value_enum)]
        ranking: Ranking,

        /// Maximum number of resources to show
        #[arg(short, long, default_value = "10")]
        limit: usize,
    },

    /// Show a random sample of resources
    Sample {
        /// Number of resources
        #[arg(default_value = "3")]
        count: usize,
    },

    /// List all tags with usage counts
    Tags,

    /// Report catalog consistency problems (non-zero exit if any)
    Check,

    /// Show resolved configuration (debug)
    Config,
}

/// Ranked views of the catalog
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Ranking {
    /// Featured resources by votes
    Featured,

    /// Most copied
    Popular,

    /// Votes, copies and recency
    Trending,
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(self) -> Result<()> {
        match self.command {
            None => build_api(self.build).await,
            Some(Commands::Build(args)) => build_api(args).await,
            Some(Commands::Search {
                query,
                resource_type,
                difficulty,
                language,
                framework,
                category,
                tags,
            }) => {
                let filters = SearchFilters {
                    resource_type,
                    difficulty,
                    language,
                    framework,
                    category,
                    tags,
                };
                search_catalog(&query, &filters).await
            }
            Some(Commands::Show { id, full }) => show_resource(&id, full).await,
            Some(Commands::Top { ranking, limit }) => list_top(ranking, limit).await,
            Some(Commands::Sample { count }) => sample_catalog(count).await,
            Some(Commands::Tags) => list_tags().await,
            Some(Commands::Check) => check_catalog().await,
            Some(Commands::Config) => show_config(),
        }
    }
}

/// Load the catalog the configuration points at
pub async fn load_catalog(config: &ResolvedConfig) -> Result<Catalog> {
    let sources = match &config.content_dir {
        Some(dir) => Sources::load_dir(dir)
            .await
            .with_context(|| format!("Failed to load catalogs from {}", dir.display()))?,
        None => Sources::embedded()?,
    };

    Ok(Catalog::from_sources(&sources, config.stats_mode))
}

/// Build the JSON API
async fn build_api(args: BuildArgs) -> Result<()> {
    let mut cfg = config::config()?;
    args.apply(&mut cfg);

    run_build(&cfg, &args).await.map(|_| ())
}

/// Write the tree for `cfg` and print the summary. Under `--strict` any
/// warning fails the run, after the files are written.
pub async fn run_build(cfg: &ResolvedConfig, args: &BuildArgs) -> Result<BuildReport> {
    let catalog = load_catalog(cfg).await?;

    let options = BuildOptions {
        output_dir: cfg.output_dir.clone(),
        indent: cfg.indent,
        generated_at: args.generated_at.unwrap_or_else(Utc::now),
        api_name: cfg.api_name.clone(),
        api_version: cfg.api_version.clone(),
    };

    let report = ApiBuilder::new(options)
        .build(&catalog)
        .await
        .context("API build failed")?;

    write_summary(&mut io::stdout().lock(), &report, cfg)?;

    if args.strict && !report.warnings.is_empty() {
        anyhow::bail!(
            "{} warning(s) found and --strict is set",
            report.warnings.len()
        );
    }

    Ok(report)
}

/// Human-readable build summary: counts by type and by category, then warnings
pub fn write_summary(
    out: &mut impl Write,
    report: &BuildReport,
    cfg: &ResolvedConfig,
) -> io::Result<()> {
    writeln!(
        out,
        "Generated {} files in {}",
        report.files.len(),
        report.output_dir.display()
    )?;
    writeln!(out, "Stats mode: {}", cfg.stats_mode)?;
    writeln!(out)?;
    writeln!(out, "Resources: {}", report.stats.total_resources)?;
    writeln!(out, "Featured:  {}", report.stats.featured_count)?;
    writeln!(out)?;
    writeln!(out, "By type:")?;
    for (resource_type, count) in &report.stats.by_type {
        writeln!(out, "  {:<20} {:>4}", resource_type, count)?;
    }
    writeln!(out)?;
    writeln!(out, "By category:")?;
    for (category, count) in &report.stats.by_category {
        writeln!(out, "  {:<20} {:>4}", category, count)?;
    }

    if !report.warnings.is_empty() {
        writeln!(out)?;
        writeln!(out, "Warnings ({}):", report.warnings.len())?;
        for warning in &report.warnings {
            writeln!(out, "  - {}", warning)?;
        }
    }

    Ok(())
}

fn print_table<'a>(resources: impl IntoIterator<Item = &'a Resource>) {
    println!("{:<28} {:<16} {:>6} {:>6}  {:<40}", "ID", "TYPE", "VOTES", "COPIES", "TITLE");
    println!("{}", "-".repeat(100));

    for resource in resources {
        let title_truncated = if resource.title.chars().count() > 37 {
            format!("{}...", resource.title.chars().take(37).collect::<String>())
        } else {
            resource.title.clone()
        };
        println!(
            "{:<28} {:<16} {:>6} {:>6}  {:<40}",
            resource.id,
            resource.resource_type.to_string(),
            resource.stats.votes,
            resource.stats.copies,
            title_truncated
        );
    }
}

/// Search the catalog
async fn search_catalog(query: &str, filters: &SearchFilters) -> Result<()> {
    let catalog = load_catalog(&config::config()?).await?;
    let results = catalog.search(query, filters);

    if results.resources.is_empty() {
        println!("No results found for: \"{}\"", query);
        return Ok(());
    }

    println!(
        "Found {} result(s) for \"{}\":\n",
        results.resources.len(),
        query
    );
    print_table(results.resources.iter().copied());

    let names: Vec<&str> = results.categories.iter().map(|c| c.name.as_str()).collect();
    println!("\nCategories: {}", names.join(", "));

    Ok(())
}

/// Show details of a resource
async fn show_resource(id: &str, full: bool) -> Result<()> {
    let catalog = load_catalog(&config::config()?).await?;

    let resource = catalog
        .by_id(id)
        .or_else(|| catalog.by_slug(id))
        .ok_or_else(|| anyhow::anyhow!("Resource not found: {}", id))?;

    let category = catalog
        .category(&resource.category_id)
        .map(|c| c.name.as_str())
        .unwrap_or("(unknown)");

    println!("{}", "=".repeat(66));
    println!("  ID:          {}", resource.id);
    println!("  Title:       {}", resource.title);
    println!("  Slug:        {}", resource.slug);
    println!("  Tagline:     {}", resource.tagline);
    println!("  Type:        {}", resource.resource_type);
    println!("  Category:    {} ({})", category, resource.category_id);
    println!("  Difficulty:  {}", resource.difficulty);
    println!("  Author:      {}", resource.author.name);
    if let Some(url) = &resource.url {
        println!("  URL:         {}", url);
    }
    if !resource.tags.is_empty() {
        println!("  Tags:        {}", resource.tags.join(", "));
    }
    println!(
        "  Stats:       {} votes, {} copies{}",
        resource.stats.votes,
        resource.stats.copies,
        if resource.featured { ", featured" } else { "" }
    );
    println!("  Updated:     {}", resource.last_updated);
    println!("{}", "=".repeat(66));

    if full {
        if let Some(content) = &resource.content {
            println!("\n=== CONTENT ===\n");
            println!("{}", content);
        }
        if let Some(source) = catalog.source(&resource.id) {
            println!("\n=== SOURCE RECORD ===\n");
            println!("{}", serde_json::to_string_pretty(source)?);
        }
    } else {
        println!("\nUse --full to show content and the source record");
    }

    Ok(())
}

/// List ranked resources
async fn list_top(ranking: Ranking, limit: usize) -> Result<()> {
    let catalog = load_catalog(&config::config()?).await?;

    let items = match ranking {
        Ranking::Featured => catalog.featured(limit),
        Ranking::Popular => catalog.popular(limit),
        Ranking::Trending => catalog.trending(limit),
    };

    if items.is_empty() {
        println!("No resources to rank");
        return Ok(());
    }

    print_table(items);
    Ok(())
}

/// Show a random sample
async fn sample_catalog(count: usize) -> Result<()> {
    let catalog = load_catalog(&config::config()?).await?;
    print_table(catalog.random_sample_unseeded(count));
    Ok(())
}

/// List tags with counts
async fn list_tags() -> Result<()> {
    let catalog = load_catalog(&config::config()?).await?;

    for tag in catalog.all_tags() {
        println!("{:<24} {:>4}", tag, catalog.by_tag(&tag).len());
    }

    Ok(())
}

/// Report consistency problems
async fn check_catalog() -> Result<()> {
    run_check(&config::config()?).await
}

/// Print the catalog's warnings; any warning is an error
pub async fn run_check(cfg: &ResolvedConfig) -> Result<()> {
    let catalog = load_catalog(cfg).await?;
    let warnings = catalog.consistency_warnings();

    if warnings.is_empty() {
        println!("Catalog OK: {} resources, no warnings", catalog.len());
        return Ok(());
    }

    for warning in &warnings {
        println!("  - {}", warning);
    }
    anyhow::bail!("{} warning(s) found", warnings.len())
}

/// Show the resolved configuration (for debugging)
fn show_config() -> Result<()> {
    let cfg = config::config()?;

    println!("catalog-api configuration");
    println!();
    println!(
        "Config file:  {}",
        cfg.config_file
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "(none - using defaults)".to_string())
    );
    println!("Project root: {}", cfg.project_root.display());
    println!("Output:       {}", cfg.output_dir.display());
    println!("Indent:       {}", cfg.indent);
    println!("Stats mode:   {}", cfg.stats_mode);
    println!("API:          {} {}", cfg.api_name, cfg.api_version);
    println!(
        "Content:      {}",
        cfg.content_dir
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "(embedded)".to_string())
    );

    Ok(())
}
