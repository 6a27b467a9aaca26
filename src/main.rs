use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{bail, Context};
use clap::Parser;
use log::{error, info};

use handscript::rendering::raster::write_pages;
use handscript::{AssetStore, DirectoryAssetStore, RenderConfig};

/// Render text as handwriting-style PNG pages
#[derive(Parser, Debug)]
#[command(name = "handscript", version, about)]
struct Cli {
    /// Asset directory holding bg.png, default.png and <code point>.png glyphs
    #[arg(short, long, default_value = "font")]
    assets: PathBuf,

    /// Read text from this file ("-" for stdin)
    #[arg(short, long, conflicts_with = "text")]
    input: Option<PathBuf>,

    /// Text to render
    #[arg(short, long)]
    text: Option<String>,

    /// Maximum characters per image (overrides the config file)
    #[arg(short = 'n', long)]
    chars_per_image: Option<usize>,

    /// JSON render configuration
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Directory the pages are written to
    #[arg(short, long, default_value = ".")]
    out_dir: PathBuf,

    /// Decode the whole asset directory before rendering
    #[arg(long)]
    eager: bool,

    /// Also print each page as a data URI
    #[arg(long)]
    data_uri: bool,
}

fn read_text(cli: &Cli) -> anyhow::Result<String> {
    if let Some(text) = &cli.text {
        return Ok(text.clone());
    }
    match &cli.input {
        Some(path) if path.as_os_str() != "-" => {
            fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))
        }
        _ => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf).context("reading stdin")?;
            Ok(buf)
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let mut config = match &cli.config {
        Some(path) => RenderConfig::from_json_file(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => RenderConfig::default(),
    };
    if let Some(n) = cli.chars_per_image {
        config.chars_per_chunk = n;
    }
    config.validate()?;

    let text = read_text(&cli)?;

    let directory = DirectoryAssetStore::new(&cli.assets);
    let store: Box<dyn AssetStore> = if cli.eager {
        Box::new(
            directory
                .load_all()
                .with_context(|| format!("loading assets from {}", cli.assets.display()))?,
        )
    } else {
        Box::new(directory)
    };

    let conversion = handscript::convert(&text, &*store, &config)?;
    for failure in &conversion.failures {
        error!("part {}: {}", failure.index + 1, failure.message);
    }

    let written = write_pages(&cli.out_dir, &conversion.pages)
        .with_context(|| format!("writing pages to {}", cli.out_dir.display()))?;
    for (path, page) in written.iter().zip(&conversion.pages) {
        info!("wrote {}", path.display());
        if cli.data_uri {
            println!("{}", page.encode_png()?.to_data_uri());
        }
    }

    println!(
        "{} of {} parts rendered, {} failed",
        conversion.succeeded(),
        conversion.chunk_count,
        conversion.failed()
    );

    if conversion.chunk_count > 0 && conversion.pages.is_empty() {
        bail!("no handwriting images could be generated");
    }
    Ok(())
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("handscript: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
