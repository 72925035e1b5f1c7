use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;
use yomikindle_config::Config;

pub mod assets;
pub mod pipeline;

#[cfg(test)]
mod tests {
    mod assets_tests;
    mod pipeline_tests;
}

use self::pipeline::Job;

#[derive(Parser)]
#[command(name = "yomikindle", about = "Convert a term-bank dictionary into Kindle dictionary sources")]
struct Cli {
    /// Unpacked dictionary directory
    #[arg(short, long)]
    input: PathBuf,
    /// Output directory
    #[arg(short, long)]
    output: PathBuf,
    /// Title of the dictionary
    #[arg(short, long)]
    title: String,
    #[arg(short, long)]
    author: Option<String>,
    /// Image for the cover
    #[arg(short = 'c', long)]
    cover_image: Option<PathBuf>,
    /// Reference dictionary for alternate writings and frequency
    #[arg(short = 'm', long)]
    main_dict: Option<PathBuf>,
    /// JSON config file
    #[arg(long)]
    config: Option<PathBuf>,
    /// Indent the generated files
    #[arg(long)]
    debug: bool,
    /// Write the merged entries as a term bank
    #[arg(long)]
    dump_merged: Option<PathBuf>,
    /// Log level
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level)))
        .init();

    let mut config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    config.apply_env();
    if cli.debug {
        config.output.pretty = true;
    }
    let reference = cli
        .main_dict
        .or_else(|| config.dictionary.reference_path.as_ref().map(PathBuf::from));

    let job = Job {
        input: cli.input,
        output: cli.output,
        title: cli.title,
        author: cli.author,
        cover_image: cli.cover_image,
        reference,
        dump_merged: cli.dump_merged,
        config,
    };

    let summary = pipeline::run(job).await?;
    tracing::info!(
        "Done: {} entries in {} documents, {} assets, package {}",
        summary.entries,
        summary.documents,
        summary.assets,
        summary.package.display()
    );
    Ok(())
}
