use std::path::{Path, PathBuf};

use anyhow::Context;
use yomikindle_config::Config;
use yomikindle_core::dictionary::DictionaryEntry;
use yomikindle_dictionary::TermBankLoader;
use yomikindle_lang_japanese::{AssemblerOptions, KindleConverter, ReferenceDictionary};
use yomikindle_render::{PackageManifest, XhtmlOptions, render_documents};

use crate::assets;

/// Everything one conversion run needs
#[derive(Debug, Clone)]
pub struct Job {
    pub input: PathBuf,
    pub output: PathBuf,
    pub title: String,
    pub author: Option<String>,
    pub cover_image: Option<PathBuf>,
    /// Secondary dictionary for frequencies and alternate writings
    pub reference: Option<PathBuf>,
    /// Write the loaded and merged entries back out as a term bank
    pub dump_merged: Option<PathBuf>,
    pub config: Config,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Summary {
    pub entries: usize,
    pub documents: usize,
    pub assets: usize,
    pub package: PathBuf,
}

pub async fn run(job: Job) -> anyhow::Result<Summary> {
    let entries = load_entries(&job)?;

    tokio::fs::create_dir_all(&job.output)
        .await
        .with_context(|| format!("Failed to create {}", job.output.display()))?;

    if let Some(path) = &job.dump_merged {
        TermBankLoader::save_to_file(path, &entries)
            .with_context(|| format!("Failed to dump merged entries to {}", path.display()))?;
    }

    let cover = match &job.cover_image {
        Some(path) => Some(assets::copy_cover(path, &job.output).await?),
        None => None,
    };

    let asset_paths = assets::copy_assets(&job.input, &job.output, &entries, &job.config.assets).await?;

    let converter = KindleConverter::new(AssemblerOptions {
        first_line_as_headword: job.config.output.first_line_as_headword,
        size_unit: job.config.assets.size_unit.clone(),
    });
    tracing::info!("Converting {} entries", entries.len());
    let (kindle_entries, asset_paths) = tokio::task::spawn_blocking(move || {
        let converted = converter.convert(&entries, &asset_paths);
        (converted, asset_paths)
    })
    .await?;

    let output = &job.config.output;
    let xhtml = XhtmlOptions {
        index_name: output.index_name.clone(),
        headword_separator: output.headword_separator.clone(),
        pretty: output.pretty,
    };
    let documents = render_documents(&kindle_entries, output.entries_per_file, &xhtml)?;
    for (i, document) in documents.iter().enumerate() {
        write_file(&job.output.join(&document.filename), &document.content).await?;
        tracing::info!("Progress: {}/{}", i + 1, documents.len());
    }

    let manifest = PackageManifest::new(&job.title, &output.language, &output.index_name)
        .with_author(job.author.clone())
        .with_cover(cover)
        .with_documents(&documents)
        .with_resources(asset_paths.rewritten());
    let package = job.output.join(manifest.filename());
    write_file(&package, &manifest.render(output.pretty)?).await?;
    tracing::info!("Wrote {}", package.display());

    Ok(Summary {
        entries: kindle_entries.len(),
        documents: documents.len(),
        assets: asset_paths.len(),
        package,
    })
}

fn load_entries(job: &Job) -> anyhow::Result<Vec<DictionaryEntry>> {
    let entries = TermBankLoader::load_from_dir(&job.input)
        .with_context(|| format!("Failed to load dictionary {}", job.input.display()))?;

    let Some(reference_dir) = &job.reference else {
        return Ok(entries);
    };
    let reference = TermBankLoader::load_from_dir(reference_dir)
        .with_context(|| format!("Failed to load reference dictionary {}", reference_dir.display()))?;
    let reference = ReferenceDictionary::new(reference);
    tracing::info!("Merging with reference dictionary ({} entries)", reference.entry_count());
    Ok(reference.merge_into(entries))
}

async fn write_file(path: &Path, content: &str) -> anyhow::Result<()> {
    tokio::fs::write(path, content)
        .await
        .with_context(|| format!("Failed to write {}", path.display()))
}
