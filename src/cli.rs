//! Command line front end: rasterize, export and check sketch files.

use std::collections::BTreeMap;
use std::fmt;
use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use sketchkit_core::ParseError;
use sketchkit_designer::font_manager::list_font_families;
use sketchkit_designer::raster::{rasterize_text, scaled_size};
use sketchkit_designer::renderer::{render_document, RenderOptions};
use sketchkit_designer::serialization::{decode, decode_strict, encode};
use sketchkit_designer::svg_renderer::SvgSurface;
use sketchkit_designer::{CanvasMeta, Document, LocalStore};
use sketchkit_settings::config::{default_config_path, MAX_SCALE};
use sketchkit_settings::Config;

#[derive(Parser, Debug)]
#[command(name = "sketchkit")]
#[command(about = "Create, render, export and check SketchKit diagrams")]
#[command(version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("BUILD_DATE"), ")"))]
pub struct Cli {
    /// Configuration file (.toml or .json); defaults to the user config
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Rasterize a sketch to PNG. Malformed input writes the failure marker
    Render {
        /// Sketch file, or `-` for stdin
        input: PathBuf,
        /// Output PNG file
        #[arg(short, long)]
        output: PathBuf,
        /// Pixels per document unit
        #[arg(short, long)]
        scale: Option<f64>,
        /// Flatten curves into line segments before filling
        #[arg(long)]
        flatten: bool,
    },
    /// Export a sketch as SVG
    Svg {
        /// Sketch file, or `-` for stdin
        input: PathBuf,
        /// Output SVG file
        #[arg(short, long)]
        output: PathBuf,
        /// Pixels per document unit
        #[arg(short, long)]
        scale: Option<f64>,
    },
    /// Decode a sketch and summarize its shapes
    Check {
        /// Sketch file, or `-` for stdin
        input: PathBuf,
    },
    /// Write an empty sketch with the configured canvas size
    New {
        /// Output sketch file
        output: PathBuf,
    },
    /// List system font families usable as `render.font_family`
    Fonts,
    /// Manage named sketches in the local store
    Store {
        #[command(subcommand)]
        action: StoreAction,
    },
}

#[derive(Subcommand, Debug)]
pub enum StoreAction {
    /// List stored sketch names
    List,
    /// Store a sketch file under a name
    Put {
        name: String,
        /// Sketch file, or `-` for stdin
        input: PathBuf,
    },
    /// Write a stored sketch to a file, or `-` for stdout
    Get { name: String, output: PathBuf },
    /// Remove a stored sketch
    Delete { name: String },
}

/// Runs one command. `Ok(false)` means the command finished but the input
/// was malformed; the caller maps it to a failing exit status.
pub fn run(cli: &Cli) -> anyhow::Result<bool> {
    let config = load_config(cli.config.as_deref())?;
    match &cli.command {
        Command::Render {
            input,
            output,
            scale,
            flatten,
        } => {
            let text = read_input(input)?;
            render_png(&text, output, &config, *scale, *flatten)
        }
        Command::Svg {
            input,
            output,
            scale,
        } => {
            let text = read_input(input)?;
            export_svg(&text, output, &config, *scale)
        }
        Command::Check { input } => {
            let report = check(&read_input(input)?);
            println!("{}", report);
            Ok(report.error.is_none())
        }
        Command::New { output } => {
            new_sketch(output, &config)?;
            Ok(true)
        }
        Command::Fonts => {
            for family in list_font_families() {
                println!("{}", family);
            }
            Ok(true)
        }
        Command::Store { action } => {
            let mut store = open_store(&config)?;
            store_action(&mut store, action)?;
            Ok(true)
        }
    }
}

fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    match path {
        Some(path) => Config::load_from_file(path)
            .with_context(|| format!("Failed to load config: {}", path.display())),
        None => match default_config_path() {
            Ok(path) => Ok(Config::load_or_default(&path)?),
            Err(e) => {
                tracing::debug!("{}", e);
                Ok(Config::default())
            }
        },
    }
}

fn read_input(input: &Path) -> anyhow::Result<String> {
    if input.as_os_str() == "-" {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .context("Failed to read stdin")?;
        return Ok(text);
    }
    std::fs::read_to_string(input)
        .with_context(|| format!("Failed to read sketch: {}", input.display()))
}

fn effective_scale(config: &Config, scale: Option<f64>) -> anyhow::Result<f64> {
    let scale = scale.unwrap_or(config.render.scale);
    if !scale.is_finite() || scale <= 0.0 || scale > MAX_SCALE {
        bail!("Scale must be in (0, {}], got {}", MAX_SCALE, scale);
    }
    Ok(scale)
}

/// Rasterizes `text` into `output`. On malformed input the failure marker is
/// written instead of an image and `Ok(false)` is returned.
pub fn render_png(
    text: &str,
    output: &Path,
    config: &Config,
    scale: Option<f64>,
    flatten: bool,
) -> anyhow::Result<bool> {
    let mut options = config.raster_options()?;
    options.render.scale = effective_scale(config, scale)?;
    if flatten {
        options.native_curves = false;
    }

    let result = rasterize_text(text, &options);
    let ok = !result.is_failure();
    if !ok {
        tracing::warn!("Rendering failed, writing failure marker to {}", output.display());
    }
    std::fs::write(output, result.into_bytes())
        .with_context(|| format!("Failed to write image: {}", output.display()))?;
    Ok(ok)
}

/// Exports `text` as SVG. A malformed record keeps everything decoded before
/// it; the partial drawing is still written and `Ok(false)` is returned.
pub fn export_svg(
    text: &str,
    output: &Path,
    config: &Config,
    scale: Option<f64>,
) -> anyhow::Result<bool> {
    let scale = effective_scale(config, scale)?;
    let decoded = decode(text);
    if let Some(err) = &decoded.error {
        tracing::warn!("Exporting partial document: {}", err);
    }

    let (width, height) = scaled_size(&decoded.document, scale);
    let mut svg = SvgSurface::new(width, height).with_metrics(config.font_metrics()?);
    if !config.render.font_family.is_empty() {
        svg = svg.with_font_family(config.render.font_family.clone());
    }
    if config.render.transparent_background {
        svg = svg.with_background(None);
    }
    render_document(&mut svg, &decoded.document, &RenderOptions { scale });

    std::fs::write(output, svg.finish())
        .with_context(|| format!("Failed to write SVG: {}", output.display()))?;
    Ok(decoded.error.is_none())
}

/// Summary of a decoded sketch.
#[derive(Debug)]
pub struct CheckReport {
    pub meta: CanvasMeta,
    /// Shape counts keyed by record type name.
    pub counts: BTreeMap<&'static str, usize>,
    pub error: Option<ParseError>,
}

impl CheckReport {
    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }
}

impl fmt::Display for CheckReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "canvas {}x{}, {} shape(s)",
            self.meta.width,
            self.meta.height,
            self.total()
        )?;
        for (name, count) in &self.counts {
            write!(f, "\n  {:<10} {}", name, count)?;
        }
        if let Some(err) = &self.error {
            write!(f, "\nerror: {}", err)?;
        }
        Ok(())
    }
}

pub fn check(text: &str) -> CheckReport {
    let decoded = decode(text);
    let mut counts = BTreeMap::new();
    for shape in &decoded.document.shapes {
        *counts.entry(shape.shape_type().name()).or_insert(0) += 1;
    }
    CheckReport {
        meta: decoded.document.meta,
        counts,
        error: decoded.error,
    }
}

/// Writes an empty document sized by the `canvas` settings.
pub fn new_sketch(output: &Path, config: &Config) -> anyhow::Result<()> {
    let doc = Document::new(config.canvas_meta());
    std::fs::write(output, encode(&doc))
        .with_context(|| format!("Failed to write sketch: {}", output.display()))?;
    tracing::info!(
        "Created {}x{} sketch {}",
        doc.meta.width,
        doc.meta.height,
        output.display()
    );
    Ok(())
}

/// Opens the local store named by the `storage` settings.
pub fn open_store(config: &Config) -> anyhow::Result<LocalStore> {
    let path = config
        .storage
        .local_store_path()
        .context("No data directory for the local store; set storage.local_store")?;
    LocalStore::open(&path)
        .with_context(|| format!("Failed to open local store: {}", path.display()))
}

/// Runs one store action. Sketches are checked before they are stored.
pub fn store_action(store: &mut LocalStore, action: &StoreAction) -> anyhow::Result<()> {
    match action {
        StoreAction::List => {
            for name in store.list() {
                println!("{}", name);
            }
        }
        StoreAction::Put { name, input } => {
            let text = read_input(input)?;
            decode_strict(&text).with_context(|| format!("Refusing to store '{}'", name))?;
            store.save(name, &text)?;
        }
        StoreAction::Get { name, output } => {
            let text = store.load(name)?;
            if output.as_os_str() == "-" {
                println!("{}", text);
            } else {
                std::fs::write(output, text)
                    .with_context(|| format!("Failed to write sketch: {}", output.display()))?;
            }
        }
        StoreAction::Delete { name } => store.delete(name)?,
    }
    Ok(())
}
