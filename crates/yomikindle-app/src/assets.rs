use std::collections::HashSet;
use std::path::{Component, Path, PathBuf};

use anyhow::Context;
use yomikindle_config::assets::AssetsConfig;
use yomikindle_core::dictionary::DictionaryEntry;
use yomikindle_core::types::AssetPaths;

const DEFAULT_EXTENSION: &str = "jpg";

/// Unique image paths referenced by the entries, in first-seen order
pub fn collect_asset_paths(entries: &[DictionaryEntry]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut paths = Vec::new();
    for path in entries.iter().flat_map(|entry| entry.asset_paths()) {
        if !path.is_empty() && seen.insert(path) {
            paths.push(path.to_string());
        }
    }
    paths
}

/// Hands out `0.png`, `1.jpg`, ..., `a.gif`, keeping the source extension
#[derive(Debug, Default)]
pub struct FilenameGenerator {
    next: u64,
}

impl FilenameGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_name(&mut self, source: &str) -> String {
        let extension = Path::new(source)
            .extension()
            .and_then(|ext| ext.to_str())
            .filter(|ext| !ext.is_empty())
            .unwrap_or(DEFAULT_EXTENSION);
        let name = format!("{:x}.{extension}", self.next);
        self.next += 1;
        name
    }
}

/// Relative path made only of normal components, so joining it cannot escape the base
fn stays_inside(path: &str) -> bool {
    Path::new(path)
        .components()
        .all(|component| matches!(component, Component::Normal(_) | Component::CurDir))
}

struct PlannedCopy {
    original: String,
    source: PathBuf,
    destination: PathBuf,
    rewritten: String,
}

/// Copy every referenced image into the asset directory and return the remap table.
/// Missing sources are logged and left unmapped.
pub async fn copy_assets(
    input: &Path,
    output: &Path,
    entries: &[DictionaryEntry],
    config: &AssetsConfig,
) -> anyhow::Result<AssetPaths> {
    let mut asset_paths = AssetPaths::new();
    let originals = collect_asset_paths(entries);
    if originals.is_empty() {
        return Ok(asset_paths);
    }

    let asset_dir = output.join(&config.output_dir);
    tokio::fs::create_dir_all(&asset_dir)
        .await
        .with_context(|| format!("Failed to create {}", asset_dir.display()))?;

    let mut names = FilenameGenerator::new();
    let plan: Vec<PlannedCopy> = originals
        .into_iter()
        .filter(|original| {
            let contained = stays_inside(original);
            if !contained {
                tracing::warn!("Skipping asset {original}: path leaves the dictionary directory");
            }
            contained
        })
        .map(|original| {
            let name = names.next_name(&original);
            PlannedCopy {
                source: input.join(&original),
                destination: asset_dir.join(&name),
                rewritten: format!("{}/{name}", config.output_dir),
                original,
            }
        })
        .collect();

    if plan.is_empty() {
        return Ok(asset_paths);
    }

    let batch_size = config.batch_size.max(1);
    let batch_count = plan.len().div_ceil(batch_size);
    tracing::info!("Copying {} assets in {} batches", plan.len(), batch_count);

    for (i, batch) in plan.chunks(batch_size).enumerate() {
        let handles: Vec<_> = batch
            .iter()
            .map(|copy| {
                let source = copy.source.clone();
                let destination = copy.destination.clone();
                tokio::spawn(async move { tokio::fs::copy(&source, &destination).await })
            })
            .collect();

        for (copy, handle) in batch.iter().zip(handles) {
            match handle.await? {
                Ok(_) => asset_paths.insert(copy.original.clone(), copy.rewritten.clone()),
                Err(e) => tracing::warn!("Skipping asset {}: {e}", copy.source.display()),
            }
        }
        tracing::info!("Asset batch {}/{} done", i + 1, batch_count);
    }

    Ok(asset_paths)
}

/// Copy the cover image to `cover.<ext>` in the output root, returning its name
pub async fn copy_cover(cover: &Path, output: &Path) -> anyhow::Result<String> {
    let name = match cover.extension().and_then(|ext| ext.to_str()) {
        Some(extension) => format!("cover.{extension}"),
        None => "cover".to_string(),
    };
    tokio::fs::copy(cover, output.join(&name))
        .await
        .with_context(|| format!("Failed to copy cover image {}", cover.display()))?;
    tracing::info!("Copied cover image to {name}");
    Ok(name)
}
