//! Batch driver: extract, resolve, and route failures.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use idforged_common::Metadata;
use idforged_parser::config::ExtractorConfig;
use idforged_parser::{Extractor, Identifier};
use serde::Serialize;
use tracing::{debug, error, info, warn};

use crate::config::Config;
use crate::metadata::{MetadataResolver, ResolveError};
use crate::scanner;

/// What happened to one file.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum FileOutcome {
    Resolved {
        identifier: Identifier,
        metadata: Metadata,
    },
    /// No identifier could be extracted from the filename.
    NoIdentifier,
    /// Every provider was tried without an acceptable record.
    Exhausted { identifier: Identifier },
}

impl FileOutcome {
    pub fn is_failure(&self) -> bool {
        !matches!(self, FileOutcome::Resolved { .. })
    }
}

/// Counts for one scan.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ScanSummary {
    pub files_found: usize,
    pub resolved: usize,
    pub no_identifier: usize,
    pub exhausted: usize,
    /// Lookups aborted by a resolver error, such as an unregistered
    /// provider name. These files are left in place.
    pub errors: usize,
    pub moved: usize,
}

/// Runs files through extraction and resolution.
pub struct CatalogProcessor {
    resolver: MetadataResolver,
    extractor: Extractor,
    config: Arc<Config>,
}

impl CatalogProcessor {
    pub fn new(resolver: MetadataResolver, config: Arc<Config>) -> Self {
        let extractor = Extractor::new(
            ExtractorConfig::builder()
                .noise_tokens(config.resource.noise.iter().cloned())
                .build(),
        );
        Self {
            resolver,
            extractor,
            config,
        }
    }

    pub fn extractor(&self) -> &Extractor {
        &self.extractor
    }

    /// Identify and resolve a single file.
    pub async fn process_file(&self, path: &Path) -> Result<FileOutcome, ResolveError> {
        let Some(identifier) = self.extractor.extract_path(path) else {
            info!("No identifier in filename: {:?}", path);
            return Ok(FileOutcome::NoIdentifier);
        };

        let resolved = self
            .resolver
            .resolve(path, &identifier, &self.config)
            .await?;

        Ok(match resolved {
            Some(metadata) => FileOutcome::Resolved {
                identifier,
                metadata,
            },
            None => {
                info!(identifier = %identifier, "No provider returned usable metadata for {:?}", path);
                FileOutcome::Exhausted { identifier }
            }
        })
    }

    /// Process every candidate file under `root`, one at a time.
    ///
    /// Unless `dry_run` is set, failures are moved into the failed folder
    /// when `failed_move` is enabled. Move errors are logged and skipped.
    /// A resolver error ends the lookup for that file only.
    pub async fn run(&self, root: &Path, dry_run: bool) -> Result<ScanSummary> {
        let files = scanner::discover(root, &self.config.resource)?;
        let failed_dir = scanner::failed_dir(root, &self.config.resource);
        let mut summary = ScanSummary {
            files_found: files.len(),
            ..ScanSummary::default()
        };

        for file in files {
            let outcome = match self.process_file(&file).await {
                Ok(outcome) => outcome,
                Err(e) => {
                    error!("Lookup aborted for {:?}: {}", file, e);
                    summary.errors += 1;
                    continue;
                }
            };
            match &outcome {
                FileOutcome::Resolved { .. } => summary.resolved += 1,
                FileOutcome::NoIdentifier => summary.no_identifier += 1,
                FileOutcome::Exhausted { .. } => summary.exhausted += 1,
            }

            if !outcome.is_failure() || !self.config.resource.failed_move {
                continue;
            }
            if dry_run {
                info!("[DRY RUN] Would move {:?} to {:?}", file, failed_dir);
                continue;
            }
            match move_into(&file, &failed_dir).await {
                Ok(dest) => {
                    info!("Moved {:?} to {:?}", file, dest);
                    summary.moved += 1;
                }
                Err(e) => warn!("Failed to move {:?}: {:#}", file, e),
            }
        }

        info!(
            "Scan complete: {} found, {} resolved, {} without identifier, {} exhausted, {} errors",
            summary.files_found,
            summary.resolved,
            summary.no_identifier,
            summary.exhausted,
            summary.errors
        );
        Ok(summary)
    }
}

/// Move `file` into `dir`, creating it on demand. Never overwrites.
///
/// Falls back to copy-then-delete when a rename is refused, e.g. when `dir`
/// is on another filesystem.
async fn move_into(file: &Path, dir: &Path) -> Result<PathBuf> {
    let name = file
        .file_name()
        .ok_or_else(|| anyhow::anyhow!("Path has no file name: {:?}", file))?;
    let dest = dir.join(name);

    if tokio::fs::try_exists(&dest).await? {
        anyhow::bail!("Destination already exists: {:?}", dest);
    }

    tokio::fs::create_dir_all(dir).await?;
    if let Err(e) = tokio::fs::rename(file, &dest).await {
        debug!("Rename of {:?} failed ({}), copying instead", file, e);
        copy_then_remove(file, &dest).await?;
    }
    Ok(dest)
}

async fn copy_then_remove(file: &Path, dest: &Path) -> Result<()> {
    tokio::fs::copy(file, dest)
        .await
        .with_context(|| format!("Failed to copy {:?} to {:?}", file, dest))?;

    if let Err(e) = tokio::fs::remove_file(file).await {
        // Keep a single copy of the file.
        let _ = tokio::fs::remove_file(dest).await;
        return Err(e).with_context(|| format!("Failed to remove {:?} after copying", file));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::builtin_registry;
    use std::fs;
    use tempfile::TempDir;

    struct Fixture {
        library: TempDir,
        records: TempDir,
    }

    impl Fixture {
        fn new() -> Self {
            let fixture = Self {
                library: TempDir::new().unwrap(),
                records: TempDir::new().unwrap(),
            };
            fs::write(
                fixture.records.path().join("ABP-454.json"),
                r#"{"title": "Known", "number": "ABP-454"}"#,
            )
            .unwrap();
            fs::write(
                fixture.records.path().join("IPX-177.json"),
                r#"{"title": "null", "number": "IPX-177"}"#,
            )
            .unwrap();
            for name in ["ABP-454-cd1.mp4", "IPX-177.mp4", "holiday.mp4", "SSIS-001.mkv"] {
                fs::write(fixture.library.path().join(name), b"").unwrap();
            }
            fixture
        }

        fn processor(&self, failed_move: bool) -> CatalogProcessor {
            self.processor_with(&["local"], failed_move)
        }

        fn processor_with(&self, priority: &[&str], failed_move: bool) -> CatalogProcessor {
            let mut config = Config::default();
            config.resolver.priority = priority.iter().map(|p| p.to_string()).collect();
            config.providers.local.dir = self.records.path().to_path_buf();
            config.resource.failed_move = failed_move;
            config.resource.part_suffix = "-cd".into();

            let registry = Arc::new(builtin_registry().unwrap());
            CatalogProcessor::new(MetadataResolver::new(registry), Arc::new(config))
        }
    }

    #[tokio::test]
    async fn process_file_outcomes() {
        let fixture = Fixture::new();
        let processor = fixture.processor(false);
        let lib = fixture.library.path();

        let outcome = processor.process_file(&lib.join("ABP-454-cd1.mp4")).await.unwrap();
        match outcome {
            FileOutcome::Resolved {
                identifier,
                metadata,
            } => {
                assert_eq!(identifier.as_str(), "ABP-454");
                assert_eq!(metadata.title, "Known");
                assert_eq!(metadata.extra.part, "-cd1");
            }
            other => panic!("expected Resolved, got {other:?}"),
        }

        assert_eq!(
            processor.process_file(&lib.join("holiday.mp4")).await.unwrap(),
            FileOutcome::NoIdentifier
        );
        assert!(matches!(
            processor.process_file(&lib.join("IPX-177.mp4")).await.unwrap(),
            FileOutcome::Exhausted { identifier } if identifier.as_str() == "IPX-177"
        ));
    }

    #[tokio::test]
    async fn run_moves_failures_when_enabled() {
        let fixture = Fixture::new();
        let processor = fixture.processor(true);
        let lib = fixture.library.path();

        let summary = processor.run(lib, false).await.unwrap();
        assert_eq!(
            summary,
            ScanSummary {
                files_found: 4,
                resolved: 1,
                no_identifier: 1,
                exhausted: 2,
                errors: 0,
                moved: 3,
            }
        );
        assert!(lib.join("ABP-454-cd1.mp4").exists());
        assert!(lib.join("failed/IPX-177.mp4").exists());
        assert!(lib.join("failed/holiday.mp4").exists());
        assert!(lib.join("failed/SSIS-001.mkv").exists());

        // Moved files are not picked up again.
        let again = processor.run(lib, false).await.unwrap();
        assert_eq!(again.files_found, 1);
    }

    #[tokio::test]
    async fn dry_run_and_disabled_move_leave_files() {
        let fixture = Fixture::new();
        let lib = fixture.library.path();

        let summary = fixture.processor(true).run(lib, true).await.unwrap();
        assert_eq!(summary.moved, 0);
        assert!(lib.join("IPX-177.mp4").exists());

        let summary = fixture.processor(false).run(lib, false).await.unwrap();
        assert_eq!(summary.moved, 0);
        assert!(!lib.join("failed").exists());
    }

    #[tokio::test]
    async fn unknown_provider_fails_only_that_file() {
        let fixture = Fixture::new();
        let lib = fixture.library.path();
        let processor = fixture.processor_with(&["local", "ghost"], true);

        // ABP-454 resolves locally before "ghost" is reached; IPX-177 and
        // SSIS-001 fall through to it.
        let summary = processor.run(lib, false).await.unwrap();
        assert_eq!(
            summary,
            ScanSummary {
                files_found: 4,
                resolved: 1,
                no_identifier: 1,
                exhausted: 0,
                errors: 2,
                moved: 1,
            }
        );
        assert!(lib.join("failed/holiday.mp4").exists());
        assert!(lib.join("IPX-177.mp4").exists());
        assert!(lib.join("SSIS-001.mkv").exists());
    }

    #[tokio::test]
    async fn copy_fallback_moves_contents() {
        let fixture = Fixture::new();
        let lib = fixture.library.path();
        fs::write(lib.join("holiday.mp4"), b"frames").unwrap();
        fs::create_dir_all(lib.join("elsewhere")).unwrap();

        let dest = lib.join("elsewhere/holiday.mp4");
        copy_then_remove(&lib.join("holiday.mp4"), &dest).await.unwrap();
        assert!(!lib.join("holiday.mp4").exists());
        assert_eq!(fs::read(&dest).unwrap(), b"frames");
    }

    #[test]
    fn outcome_serializes_with_tag() {
        let outcome = FileOutcome::Exhausted {
            identifier: Identifier::new("IPX-177").unwrap(),
        };
        assert_eq!(
            serde_json::to_value(&outcome).unwrap(),
            serde_json::json!({"outcome": "exhausted", "identifier": "IPX-177"})
        );
        assert_eq!(
            serde_json::to_value(FileOutcome::NoIdentifier).unwrap(),
            serde_json::json!({"outcome": "no_identifier"})
        );
    }

    #[tokio::test]
    async fn existing_destination_is_not_overwritten() {
        let fixture = Fixture::new();
        let lib = fixture.library.path();
        fs::create_dir_all(lib.join("elsewhere")).unwrap();
        fs::write(lib.join("elsewhere/holiday.mp4"), b"original").unwrap();

        let err = move_into(&lib.join("holiday.mp4"), &lib.join("elsewhere"))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("already exists"));
        assert_eq!(fs::read(lib.join("elsewhere/holiday.mp4")).unwrap(), b"original");
    }
}
