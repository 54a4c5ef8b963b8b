//! Outclaw - skill package manager
//!
//! Usage:
//!   outclaw install <specifier>   # Fetch and install a skill
//!   outclaw list                  # Show installed skills
//!   outclaw search <term>         # Query the registry

use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use console::style;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use outclaw_core::commands::{
    InstallCommand, InstallOptions, InstallReport, SearchCommand, UninstallCommand,
};
use outclaw_core::context::AppContext;
use outclaw_core::registry::{SearchOptions, SearchPage, SearchSort};
use outclaw_core::skills::{CreateOptions, SkillInfo};
use outclaw_core::source;
use outclaw_core::types::Scope;

#[derive(Parser)]
#[command(name = "outclaw")]
#[command(about = "Skill package manager", version, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Install a skill from a repository, URL or the registry
    ///
    /// Accepted specifiers, first match wins:
    /// hosted:owner/repo, github.com URLs, http(s) URLs, ./local/paths,
    /// owner/repo[@ref][/subpath], registry UUIDs, registry slugs.
    Install {
        specifier: String,
        /// Install into the global workspace instead of the project
        #[arg(short = 'g', long)]
        global: bool,
        /// Replace an already installed skill
        #[arg(long, short)]
        force: bool,
        /// Output format
        #[arg(short = 'o', long, default_value = "table")]
        format: OutputFormat,
    },

    /// Remove an installed skill
    #[command(alias = "rm")]
    Uninstall {
        name: String,
        #[arg(short = 'g', long)]
        global: bool,
        #[arg(short = 'o', long, default_value = "table")]
        format: OutputFormat,
    },

    /// List installed skills
    #[command(alias = "ls")]
    List {
        #[arg(short = 'g', long)]
        global: bool,
        #[arg(short = 'o', long, default_value = "table")]
        format: OutputFormat,
    },

    /// Show one installed skill
    Info {
        name: String,
        #[arg(short = 'g', long)]
        global: bool,
        #[arg(short = 'o', long, default_value = "table")]
        format: OutputFormat,
    },

    /// Scaffold a new skill
    Init {
        name: String,
        /// One-line description (at least 10 characters)
        #[arg(long, short)]
        description: String,
        /// Semantic version for the header
        #[arg(long)]
        version: Option<String>,
        #[arg(short = 'g', long)]
        global: bool,
    },

    /// Search the remote registry
    Search {
        term: String,
        #[arg(long, short, default_value_t = 20)]
        limit: usize,
        /// Sort order (relevance, downloads, recent)
        #[arg(long, default_value = "relevance")]
        sort: String,
        /// Include community-published skills
        #[arg(long)]
        community: bool,
        #[arg(short = 'o', long, default_value = "table")]
        format: OutputFormat,
    },

    /// Show how a specifier is classified
    Resolve { specifier: String },
}

#[derive(Clone, Copy, ValueEnum, Default)]
enum OutputFormat {
    /// Human-readable table
    #[default]
    Table,
    /// Machine-readable JSON
    Json,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "outclaw=info,warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match run(cli.command).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{} {err:#}", style("error:").red().bold());
            ExitCode::FAILURE
        }
    }
}

async fn run(command: Commands) -> Result<()> {
    if let Commands::Resolve { specifier } = &command {
        return run_resolve(specifier);
    }

    let ctx = AppContext::from_env().context("Failed to load configuration")?;
    tracing::debug!(
        project = %ctx.project_root().display(),
        workspace = %ctx.settings().workspace_root().display(),
        "resolved context"
    );

    match command {
        Commands::Install {
            specifier,
            global,
            force,
            format,
        } => run_install(&ctx, &specifier, scope(global), force, format).await,
        Commands::Uninstall {
            name,
            global,
            format,
        } => run_uninstall(&ctx, &name, scope(global), format),
        Commands::List { global, format } => run_list(&ctx, scope(global), format),
        Commands::Info {
            name,
            global,
            format,
        } => run_info(&ctx, &name, scope(global), format),
        Commands::Init {
            name,
            description,
            version,
            global,
        } => run_init(&ctx, name, description, version, scope(global)),
        Commands::Search {
            term,
            limit,
            sort,
            community,
            format,
        } => {
            let options = SearchOptions {
                limit,
                sort: sort.parse::<SearchSort>()?,
                community,
            };
            run_search(&ctx, &term, &options, format).await
        }
        Commands::Resolve { .. } => Ok(()),
    }
}

fn scope(global: bool) -> Scope {
    if global { Scope::Global } else { Scope::Project }
}

async fn run_install(
    ctx: &AppContext,
    specifier: &str,
    scope: Scope,
    force: bool,
    format: OutputFormat,
) -> Result<()> {
    let specifier = specifier.trim();
    let cmd = InstallCommand::from_context(ctx, scope)?;
    let options = InstallOptions::new(specifier).with_force(force);
    let report = cmd
        .execute(&options)
        .await
        .with_context(|| format!("Failed to install '{specifier}'"))?;

    print_install_result(&report, scope, format)
}

fn print_install_result(report: &InstallReport, scope: Scope, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Table => {
            println!(
                "{} Installed skill '{}' ({scope})",
                style("✓").green(),
                report.name
            );
            println!("  {}", report.path.display());
            for warning in &report.warnings {
                println!("  {} {}", style("⚠").yellow(), warning);
            }
        }
        OutputFormat::Json => {
            let output = serde_json::json!({
                "name": report.name,
                "path": report.path,
                "scope": scope,
                "source": report.source,
                "registryId": report.registry_id,
                "warnings": report.warnings,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
    }
    Ok(())
}

fn run_uninstall(ctx: &AppContext, name: &str, scope: Scope, format: OutputFormat) -> Result<()> {
    let report = UninstallCommand::from_context(ctx, scope)
        .execute(name)
        .with_context(|| format!("Failed to uninstall '{name}'"))?;

    match format {
        OutputFormat::Table => {
            println!("{} Uninstalled skill '{}'", style("✓").green(), report.name);
            if !report.had_lock_entry {
                println!("  (no lock file entry was recorded)");
            }
        }
        OutputFormat::Json => {
            let output = serde_json::json!({
                "name": report.name,
                "path": report.path,
                "hadLockEntry": report.had_lock_entry,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
    }
    Ok(())
}

fn run_list(ctx: &AppContext, scope: Scope, format: OutputFormat) -> Result<()> {
    let manager = ctx.skill_manager(scope);
    let skills = manager.list()?;

    match format {
        OutputFormat::Table => {
            if skills.is_empty() {
                println!("No {scope} skills installed in {}", manager.skills_dir().display());
                return Ok(());
            }
            println!("{:<24} {:<10} Description", "Name", "Version");
            println!("{}", "-".repeat(70));
            for skill in &skills {
                println!(
                    "{:<24} {:<10} {}",
                    truncate(&skill.name, 24),
                    truncate(skill.version.as_deref().unwrap_or("-"), 10),
                    truncate(&skill.description, 34)
                );
            }
        }
        OutputFormat::Json => {
            let output: Vec<_> = skills.iter().map(skill_json).collect();
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
    }
    Ok(())
}

fn run_info(ctx: &AppContext, name: &str, scope: Scope, format: OutputFormat) -> Result<()> {
    let manager = ctx.skill_manager(scope);
    let skill = manager
        .get(name)
        .with_context(|| format!("Skill '{name}' is not installed in the {scope} scope"))?;
    let manifest = manager.manifest();
    let entry = manifest.get(name);

    match format {
        OutputFormat::Table => {
            println!("{}", style(&skill.name).bold());
            println!("  {}", skill.description);
            if let Some(version) = &skill.version {
                println!("  Version:  {version}");
            }
            if let Some(author) = &skill.frontmatter.author {
                println!("  Author:   {}", author.name());
            }
            if !skill.frontmatter.allowed_tools.is_empty() {
                println!("  Tools:    {}", skill.frontmatter.allowed_tools.join(", "));
            }
            println!("  Path:     {}", skill.path.display());
            match entry {
                Some(entry) => {
                    let origin = entry
                        .source
                        .url
                        .as_deref()
                        .or(entry.source.id.as_deref())
                        .unwrap_or("-");
                    println!(
                        "  Source:   {} {}",
                        serde_json::to_value(entry.source.kind)?
                            .as_str()
                            .unwrap_or("-"),
                        origin
                    );
                    println!("  Installed: {}", entry.installed_at.to_rfc3339());
                }
                None => println!("  Source:   (not recorded)"),
            }
        }
        OutputFormat::Json => {
            let mut output = skill_json(&skill);
            output["lock"] = serde_json::to_value(entry)?;
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
    }
    Ok(())
}

fn run_init(
    ctx: &AppContext,
    name: String,
    description: String,
    version: Option<String>,
    scope: Scope,
) -> Result<()> {
    let mut options = CreateOptions::new(&name, description);
    if let Some(version) = version {
        options = options.with_version(version);
    }

    let path = ctx
        .skill_manager(scope)
        .create(options)
        .with_context(|| format!("Failed to create skill '{name}'"))?;

    println!("{} Created skill '{name}'", style("✓").green());
    println!("  {}", path.display());
    Ok(())
}

async fn run_search(
    ctx: &AppContext,
    term: &str,
    options: &SearchOptions,
    format: OutputFormat,
) -> Result<()> {
    let page = SearchCommand::from_context(ctx)?
        .execute(term, options)
        .await
        .with_context(|| format!("Search for '{term}' failed"))?;

    match format {
        OutputFormat::Table => print_search_table(&page),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&page)?),
    }
    Ok(())
}

fn print_search_table(page: &SearchPage) {
    if page.items.is_empty() {
        println!("No skills found.");
        return;
    }

    println!("{:<24} {:<36} {:<10} Downloads", "Slug", "Id", "Version");
    println!("{}", "-".repeat(84));
    for item in &page.items {
        let downloads = item
            .downloads
            .map(|d| d.to_string())
            .unwrap_or_else(|| "-".to_string());
        println!(
            "{:<24} {:<36} {:<10} {}",
            truncate(&item.slug, 24),
            item.id,
            truncate(item.version.as_deref().unwrap_or("-"), 10),
            downloads
        );
    }
    println!("\nShowing {} of {} results", page.items.len(), page.total);
}

fn run_resolve(specifier: &str) -> Result<()> {
    let (rule, spec) = source::classify(specifier.trim());
    let output = serde_json::json!({
        "rule": rule,
        "specifier": spec,
    });
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn skill_json(skill: &SkillInfo) -> serde_json::Value {
    serde_json::json!({
        "name": skill.name,
        "description": skill.description,
        "version": skill.version,
        "path": skill.path,
        "frontmatter": skill.frontmatter,
    })
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let head: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{head}...")
    }
}
