mod cli;

use idforged::{
    config,
    metadata::{builtin_registry, MetadataResolver},
    processor::{CatalogProcessor, FileOutcome},
};
use idforged_parser::config::ExtractorConfig;
use idforged_parser::{Extraction, Extractor};

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands};
use serde::Serialize;
use std::path::Path;
use std::sync::Arc;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Respect RUST_LOG env var if set, otherwise use defaults based on verbose flag
    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| {
        if cli.verbose {
            "idforged=trace,idforged_parser=trace,reqwest=debug".to_string()
        } else {
            "idforged=info,warn".to_string()
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(&env_filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Identify { paths, json } => identify(&paths, json, cli.config.as_deref()),
        Commands::Resolve { file } => {
            let rt = tokio::runtime::Runtime::new()?;
            rt.block_on(resolve_file(&file, cli.config.as_deref()))
        }
        Commands::Scan { dir, dry_run } => {
            let rt = tokio::runtime::Runtime::new()?;
            rt.block_on(scan_dir(&dir, cli.config.as_deref(), dry_run))
        }
        Commands::Validate {
            config: config_path,
        } => {
            let path = config_path.or(cli.config);
            validate_config(path.as_deref())
        }
        Commands::Providers => list_providers(),
    }
}

#[derive(Serialize)]
struct IdentifyLine<'a> {
    path: &'a Path,
    extraction: Option<Extraction>,
}

fn identify(paths: &[std::path::PathBuf], json: bool, config_path: Option<&Path>) -> Result<()> {
    let config = config::load_config_or_default(config_path)?;
    let extractor = Extractor::new(
        ExtractorConfig::builder()
            .noise_tokens(config.resource.noise.iter().cloned())
            .build(),
    );

    for path in paths {
        let found = path
            .file_stem()
            .and_then(|stem| stem.to_str())
            .and_then(|stem| extractor.classify(stem));

        if json {
            let line = IdentifyLine {
                path,
                extraction: found,
            };
            println!("{}", serde_json::to_string(&line)?);
            continue;
        }

        match found {
            Some(found) => println!(
                "{}\t{}\t{}",
                path.display(),
                found.identifier,
                found.family
            ),
            None => println!("{}\t-\tno identifier", path.display()),
        }
    }

    Ok(())
}

/// Build a processor, failing fast on prioritized names nobody registered.
fn build_processor(config: config::Config) -> Result<CatalogProcessor> {
    let registry = Arc::new(builtin_registry()?);
    let resolver = MetadataResolver::new(registry);

    let unknown = resolver.check_priority(&config);
    if !unknown.is_empty() {
        anyhow::bail!("Unknown providers in priority list: {}", unknown.join(", "));
    }

    Ok(CatalogProcessor::new(resolver, Arc::new(config)))
}

async fn resolve_file(file: &Path, config_path: Option<&Path>) -> Result<()> {
    let config = config::load_config_or_default(config_path)?;
    let processor = build_processor(config)?;

    tracing::info!("Resolving file: {:?}", file);

    match processor.process_file(file).await? {
        FileOutcome::Resolved { metadata, .. } => {
            println!("{}", serde_json::to_string_pretty(&metadata)?);
            Ok(())
        }
        FileOutcome::NoIdentifier => {
            anyhow::bail!("No identifier found in filename: {:?}", file)
        }
        FileOutcome::Exhausted { identifier } => {
            anyhow::bail!("No provider returned usable metadata for {}", identifier)
        }
    }
}

async fn scan_dir(dir: &Path, config_path: Option<&Path>, dry_run: bool) -> Result<()> {
    let config = config::load_config_or_default(config_path)?;
    let processor = build_processor(config)?;

    let summary = processor.run(dir, dry_run).await?;

    if dry_run {
        println!("[DRY RUN] No files were moved");
    }
    println!("Files found:     {}", summary.files_found);
    println!("Resolved:        {}", summary.resolved);
    println!("No identifier:   {}", summary.no_identifier);
    println!("Exhausted:       {}", summary.exhausted);
    println!("Errors:          {}", summary.errors);
    println!("Moved to failed: {}", summary.moved);

    Ok(())
}

fn validate_config(path: Option<&Path>) -> Result<()> {
    let config = match path {
        Some(p) => {
            println!("Validating config: {:?}", p);
            config::load_config(p)?
        }
        None => {
            println!("No config file specified, using defaults");
            config::Config::default()
        }
    };

    let resolver = MetadataResolver::new(Arc::new(builtin_registry()?));
    let unknown = resolver.check_priority(&config);
    if !unknown.is_empty() {
        anyhow::bail!("Unknown providers in priority list: {}", unknown.join(", "));
    }

    println!("✓ Configuration is valid");
    println!("  Priority: {}", config.resolver.priority.join(" > "));
    println!("  Local records: {:?}", config.providers.local.dir);
    match &config.providers.remote.base_url {
        Some(url) => println!("  Remote: {}", url),
        None => println!("  Remote: not configured"),
    }
    println!("  Failed folder: {:?}", config.resource.failed_folder);
    println!("  Move failures: {}", config.resource.failed_move);

    Ok(())
}

fn list_providers() -> Result<()> {
    let registry = builtin_registry()?;
    for name in registry.names() {
        println!("{}: {}", name, registry.hook_names(&name).join(", "));
    }
    Ok(())
}
