//! SimplySetup CLI
//!
//! The `simplysetup` command runs the batch jobs behind the public site.
//!
//! ## Commands
//!
//! - `sitemap generate`: Write the sitemap files and index from the catalog
//! - `cin decode`: Show what a Corporate Identification Number encodes
//! - `cin resolve`: Look up company metadata for a CIN
//! - `catalog import`: Load a JSON catalog seed into the store
//! - `catalog stats`: Show row counts per catalog table

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use catalog_store::{CatalogSeed, SurrealCatalog, SurrealHandle};
use cin_resolver::{Cin, CompanyRecord, CompanyResolver};
use clap::{Parser, Subcommand, ValueEnum};
use simplysetup_core::{GenerationReport, SitemapConfig, SitemapGenerator};
use tracing::{info, Level};

#[derive(Parser)]
#[command(name = "simplysetup")]
#[command(author = "SimplySetup Engineering")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "SimplySetup catalog tooling: sitemaps and CIN lookups", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit JSON-formatted log lines
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Sitemap generation
    Sitemap {
        #[command(subcommand)]
        action: SitemapAction,
    },

    /// Corporate Identification Number tools
    Cin {
        #[command(subcommand)]
        action: CinAction,
    },

    /// Catalog maintenance
    Catalog {
        #[command(subcommand)]
        action: CatalogAction,
    },
}

#[derive(Subcommand)]
enum SitemapAction {
    /// Write every sitemap file plus sitemap.xml
    Generate {
        /// Directory to write into (default: ./public)
        #[arg(short, long, env = "SITEMAP_OUTPUT_DIR")]
        output_dir: Option<PathBuf>,

        /// Site origin used in <loc> (default: https://simplysetup.in)
        #[arg(short, long, env = "SITEMAP_BASE_URL")]
        base_url: Option<String>,

        /// URLs per company chunk, 1 to 50000 (default: 50000)
        #[arg(short, long, env = "SITEMAP_MAX_URLS")]
        max_urls: Option<usize>,
    },
}

#[derive(Subcommand)]
enum CinAction {
    /// Decode a CIN without any network access
    Decode {
        /// 21-character CIN
        cin: String,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        output: OutputFormat,
    },

    /// Resolve a CIN through the known table, KYC API and registry portal
    Resolve {
        /// 21-character CIN
        cin: String,
    },
}

#[derive(Subcommand)]
enum CatalogAction {
    /// Import a catalog seed file (JSON)
    Import {
        /// Path to the seed file
        file: PathBuf,
    },

    /// Show row counts per table
    Stats,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    simplysetup_core::init_tracing(cli.json, level);

    match cli.command {
        Commands::Sitemap { action } => match action {
            SitemapAction::Generate {
                output_dir,
                base_url,
                max_urls,
            } => {
                let config = sitemap_config(output_dir, base_url, max_urls)?;
                let report = cmd_sitemap_generate(config).await?;
                print_report(&report);
                Ok(())
            }
        },
        Commands::Cin { action } => match action {
            CinAction::Decode { cin, output } => cmd_cin_decode(&cin, output),
            CinAction::Resolve { cin } => {
                let resolver =
                    CompanyResolver::from_env().context("Failed to build CIN resolver")?;
                let record = cmd_cin_resolve(&resolver, &cin).await?;
                println!("{}", serde_json::to_string_pretty(&record)?);
                Ok(())
            }
        },
        Commands::Catalog { action } => {
            let handle = connect().await?;
            match action {
                CatalogAction::Import { file } => cmd_catalog_import(&handle, &file).await,
                CatalogAction::Stats => cmd_catalog_stats(&handle).await,
            }
        }
    }
}

/// Open the configured catalog database.
///
/// There is no in-memory fallback: an empty store would make `sitemap
/// generate` drop every company page and `catalog import` lose its rows.
async fn connect() -> Result<SurrealHandle> {
    SurrealHandle::setup_configured()
        .await
        .context("Failed to connect to catalog database")
}

/// Defaults with flag (or `SITEMAP_*` env) values applied, validated once.
fn sitemap_config(
    output_dir: Option<PathBuf>,
    base_url: Option<String>,
    max_urls: Option<usize>,
) -> Result<SitemapConfig> {
    let mut config = SitemapConfig::default();
    if let Some(dir) = output_dir {
        config = config.with_output_dir(dir);
    }
    if let Some(url) = base_url {
        config = config.with_base_url(url);
    }
    if let Some(limit) = max_urls {
        config = config.with_max_urls_per_file(limit);
    }
    config.validate().context("Invalid sitemap options")?;
    Ok(config)
}

/// Generate sitemaps from the configured catalog database
async fn cmd_sitemap_generate(config: SitemapConfig) -> Result<GenerationReport> {
    let handle = connect().await?;
    generate_sitemaps(Arc::new(handle), config).await
}

/// Generate sitemaps from the catalog behind `handle`
async fn generate_sitemaps(
    handle: Arc<SurrealHandle>,
    config: SitemapConfig,
) -> Result<GenerationReport> {
    info!(
        base_url = %config.base_url,
        output_dir = %config.output_dir.display(),
        "Generating sitemaps"
    );
    let store = Arc::new(SurrealCatalog::new(handle));
    SitemapGenerator::new(store, config)
        .generate()
        .await
        .context("Sitemap generation failed")
}

fn print_report(report: &GenerationReport) {
    for file in &report.files {
        println!("{:<32} {:>6} URLs", file.filename, file.url_count);
    }
    println!();
    println!("Index: {}", report.index_path.display());
    println!("Total: {} URLs in {} files", report.total_urls, report.files.len());
}

/// Print the fields encoded in a CIN
fn cmd_cin_decode(input: &str, output: OutputFormat) -> Result<()> {
    let cin = Cin::parse(input)?;
    let decoded = cin.decode();

    match output {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&decoded)?),
        OutputFormat::Text => {
            println!("CIN:                 {}", cin);
            println!("Listing:             {}", decoded.listing_status);
            println!(
                "Industry:            {} ({})",
                decoded.industry, decoded.industry_code
            );
            println!("State:               {} ({})", decoded.state, decoded.state_code);
            println!("Incorporated:        {}", decoded.incorporation_year);
            println!(
                "Entity type:         {} ({})",
                decoded.entity_type, decoded.entity_type_code
            );
            println!("Registration number: {}", decoded.registration_number);
        }
    }

    Ok(())
}

/// Resolve a CIN through the configured source chain
async fn cmd_cin_resolve(resolver: &CompanyResolver, input: &str) -> Result<CompanyRecord> {
    let record = resolver
        .resolve(input)
        .await
        .with_context(|| format!("Cannot resolve '{}'", input))?;

    if record.is_resolved() {
        info!(cin = %record.cin, source = ?record.source, "Company resolved");
    } else {
        info!(cin = %record.cin, "No source confirmed this company");
    }

    Ok(record)
}

/// Load a seed file into the store
async fn cmd_catalog_import(handle: &SurrealHandle, path: &Path) -> Result<()> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read seed file: {:?}", path))?;
    let seed: CatalogSeed = serde_json::from_str(&content)
        .with_context(|| format!("Invalid seed file: {:?}", path))?;

    let summary = handle
        .import_seed(&seed)
        .await
        .context("Catalog import failed")?;

    println!("Imported {} rows from {:?}", summary.total(), path);
    println!("  locations:  {}", summary.locations);
    println!("  areas:      {}", summary.areas);
    println!("  blog posts: {}", summary.blog_posts);
    println!("  workspaces: {}", summary.workspaces);
    println!("  companies:  {}", summary.companies);

    Ok(())
}

/// Print row counts per table
async fn cmd_catalog_stats(handle: &SurrealHandle) -> Result<()> {
    let stats = handle.stats().await.context("Failed to read catalog stats")?;

    println!("locations:  {}", stats.locations);
    println!("areas:      {}", stats.areas);
    println!("blog posts: {}", stats.blog_posts);
    println!("workspaces: {}", stats.workspaces);
    println!("companies:  {}", stats.companies);

    Ok(())
}
