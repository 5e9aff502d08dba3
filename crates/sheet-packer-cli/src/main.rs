use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{ArgAction, Parser, Subcommand};
use globset::{Glob, GlobSet, GlobSetBuilder};
use image::{ImageReader, RgbaImage};
use serde::Deserialize;
use sheet_packer_core::config::OverflowPolicy;
use sheet_packer_core::{
    ImageEditor, InputSprite, PackRun, PackerConfig, RgbaEditor, compute_trim_rect,
    pack_cropped_layout, pack_sprites,
};
use tracing::{error, info, warn};
use walkdir::WalkDir;

mod output;

use output::{ATLAS_IMAGE_FILE, resolve_output_dir, write_manifests};

#[derive(Parser, Debug)]
#[command(
    name = "sheet-packer",
    about = "Pack sprites into a single texture atlas with JSON and Lua manifests",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
    /// Show progress bars (disable with --no-progress or --quiet)
    #[arg(long, default_value_t = true, action=ArgAction::Set, global=true, help_heading = "Logging/UX")]
    progress: bool,
    /// Increase verbosity (-v, -vv)
    #[arg(short, long, action=ArgAction::Count, global=true, help_heading = "Logging/UX")]
    verbose: u8,
    /// Quiet mode (overrides verbose)
    #[arg(
        short,
        long,
        default_value_t = false,
        global = true,
        help_heading = "Logging/UX"
    )]
    quiet: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Pack sprites into an atlas image plus texturepack.json/.lua
    Pack(PackArgs),
    /// Layout-only: compute placements and write the manifests (no PNG)
    Layout(PackArgs),
}

#[derive(Parser, Debug, Clone)]
struct PackArgs {
    // Input/Output
    /// Input file or directory of sprite images
    #[arg(help_heading = "Input/Output")]
    input: PathBuf,
    /// Output directory (falls back to the home directory if it does not exist)
    #[arg(short, long, help_heading = "Input/Output")]
    out_dir: Option<PathBuf>,
    /// YAML config file path (overrides packing options)
    #[arg(long, help_heading = "Input/Output")]
    config: Option<PathBuf>,
    /// Include patterns (glob). If set, only files matching any pattern are considered
    #[arg(long, help_heading = "Input/Output")]
    include: Vec<String>,
    /// Exclude patterns (glob). Files matching any pattern will be ignored
    #[arg(long, help_heading = "Input/Output")]
    exclude: Vec<String>,
    /// Hidden sprite patterns (glob). Matching sprites are loaded but never packed
    #[arg(long, help_heading = "Input/Output")]
    hide: Vec<String>,

    // Layout
    /// Max atlas width
    #[arg(long, default_value_t = 512, help_heading = "Layout")]
    max_width: u32,
    /// Max atlas height
    #[arg(long, default_value_t = 512, help_heading = "Layout")]
    max_height: u32,
    /// Padding between sprites
    #[arg(long, default_value_t = 2, help_heading = "Layout")]
    padding: u32,
    /// Trim the finished atlas to its content
    #[arg(long, default_value_t = false, help_heading = "Layout")]
    autocrop: bool,
    /// What to do when a sprite does not fit: abort | emit_partial
    #[arg(long, default_value = "abort", help_heading = "Layout")]
    overflow: String,

    // Image Processing
    /// Crop each sprite to its opaque bounds
    #[arg(long, default_value_t = true, action=ArgAction::Set, help_heading = "Image Processing")]
    trim: bool,
    /// Trim alpha threshold (0..=255)
    #[arg(long, default_value_t = 0, help_heading = "Image Processing")]
    trim_threshold: u8,

    // Export
    /// Export packing stats (JSON) to this file
    #[arg(long, help_heading = "Export")]
    export_stats: Option<PathBuf>,
    /// Print the merged configuration (after CLI/YAML) and exit
    #[arg(long, default_value_t = false, help_heading = "Export")]
    print_config: bool,
    /// Output format for --print-config: json|yaml
    #[arg(long, default_value = "json", value_parser = ["json", "yaml"], help_heading = "Export")]
    print_config_format: String,
    /// Dry run: compute layout and stats but do not write files
    #[arg(long, default_value_t = false, help_heading = "Export")]
    dry_run: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing_with_level(cli.quiet, cli.verbose);
    match &cli.command {
        Commands::Pack(args) => run_pack(args, cli.progress && !cli.quiet, false),
        Commands::Layout(args) => run_pack(args, false, true),
    }
}

fn run_pack(args: &PackArgs, show_progress: bool, layout_only: bool) -> anyhow::Result<()> {
    let cfg = build_config(args)?;
    cfg.validate()?;

    if args.print_config {
        match args.print_config_format.as_str() {
            "yaml" => println!("{}", serde_yaml::to_string(&cfg)?),
            _ => println!("{}", serde_json::to_string_pretty(&cfg)?),
        }
        return Ok(());
    }

    let out_dir = resolve_output_dir(args.out_dir.as_deref());
    let paths = gather_paths(&args.input, &args.include, &args.exclude)?;
    let hidden = build_globset(&args.hide)?;
    let sprites = load_sprites_with_progress(&args.input, &paths, hidden.as_ref(), show_progress)?;
    info!(count = sprites.len(), out_dir = %out_dir.display(), "loaded sprites");

    if layout_only {
        let sized: Vec<InputSprite<(u32, u32)>> = sprites
            .into_iter()
            .map(|s| {
                let packed = packed_size(&s.source, &cfg);
                InputSprite {
                    name: s.name,
                    width: s.width,
                    height: s.height,
                    visible: s.visible,
                    source: packed,
                }
            })
            .collect();
        let run = pack_cropped_layout(sized, &cfg)?;
        return emit(&run, &cfg, args, &out_dir);
    }

    pack_atlas(sprites, &cfg, args, &out_dir)
}

/// Packs the pixels, writes the manifests, then the atlas image. Nothing is written
/// when the overflow policy rejects the run.
fn pack_atlas(
    sprites: Vec<InputSprite<RgbaImage>>,
    cfg: &PackerConfig,
    args: &PackArgs,
    out_dir: &Path,
) -> anyhow::Result<()> {
    let mut editor = RgbaEditor::new(cfg);
    let run = pack_sprites(&mut editor, sprites, cfg)?;
    emit(&run, cfg, args, out_dir)?;
    if !args.dry_run {
        let mut editor = editor.with_display_path(out_dir.join(ATLAS_IMAGE_FILE));
        editor.display(&run.canvas)?;
    }
    Ok(())
}

/// Applies the overflow policy, then writes manifests and stats.
fn emit<C>(
    run: &PackRun<C>,
    cfg: &PackerConfig,
    args: &PackArgs,
    out_dir: &Path,
) -> anyhow::Result<()> {
    let stats = run.stats();
    info!(
        placed = stats.placed,
        total = stats.total,
        width = run.width,
        height = run.height,
        occupancy = format!("{:.2}%", stats.occupancy * 100.0),
        "stats"
    );

    run.accept(cfg.overflow)?;
    if !run.outcome.is_complete() {
        warn!(
            placed = stats.placed,
            total = stats.total,
            "atlas is incomplete, manifests only list the sprites that fit"
        );
    }

    if !args.dry_run {
        write_manifests(out_dir, run.placements(), run.width, run.height)?;
    }

    if let Some(stats_path) = &args.export_stats {
        let value = serde_json::json!({
            "placed": stats.placed,
            "total": stats.total,
            "complete": run.outcome.is_complete(),
            "width": run.width,
            "height": run.height,
            "used_area": stats.used_area,
            "atlas_area": stats.atlas_area,
            "occupancy": stats.occupancy,
        });
        if !args.dry_run {
            fs::write(stats_path, serde_json::to_string_pretty(&value)?)
                .with_context(|| format!("write {}", stats_path.display()))?;
            info!(?stats_path, "stats exported");
        } else {
            println!("{}", stats.summary());
        }
    }
    Ok(())
}

/// Size a sprite is packed at, mirroring `RgbaEditor::crop_copy`.
fn packed_size(rgba: &RgbaImage, cfg: &PackerConfig) -> (u32, u32) {
    if cfg.trim {
        if let Some(r) = compute_trim_rect(rgba, cfg.trim_threshold) {
            return (r.width(), r.height());
        }
    }
    rgba.dimensions()
}

fn build_config(args: &PackArgs) -> anyhow::Result<PackerConfig> {
    let overflow: OverflowPolicy = args
        .overflow
        .parse()
        .map_err(|_| anyhow::anyhow!("unknown overflow policy: {}", args.overflow))?;
    let base = PackerConfig {
        max_width: args.max_width,
        max_height: args.max_height,
        padding: args.padding,
        autocrop: args.autocrop,
        trim: args.trim,
        trim_threshold: args.trim_threshold,
        overflow,
    };
    // Fields set in the config file override the matching flags
    match &args.config {
        Some(path) => {
            let file = fs::read_to_string(path)
                .with_context(|| format!("read config {}", path.display()))?;
            let y: YamlConfig = serde_yaml::from_str(&file)
                .with_context(|| format!("parse config {}", path.display()))?;
            y.into_packer_config(base)
        }
        None => Ok(base),
    }
}

#[derive(Debug, Deserialize, Default)]
struct YamlConfig {
    max_width: Option<u32>,
    max_height: Option<u32>,
    padding: Option<u32>,
    autocrop: Option<bool>,
    trim: Option<bool>,
    trim_threshold: Option<u8>,
    overflow: Option<String>,
}

impl YamlConfig {
    fn into_packer_config(self, mut cfg: PackerConfig) -> anyhow::Result<PackerConfig> {
        if let Some(v) = self.max_width {
            cfg.max_width = v;
        }
        if let Some(v) = self.max_height {
            cfg.max_height = v;
        }
        if let Some(v) = self.padding {
            cfg.padding = v;
        }
        if let Some(v) = self.autocrop {
            cfg.autocrop = v;
        }
        if let Some(v) = self.trim {
            cfg.trim = v;
        }
        if let Some(v) = self.trim_threshold {
            cfg.trim_threshold = v;
        }
        if let Some(v) = self.overflow {
            cfg.overflow = v
                .parse()
                .map_err(|_| anyhow::anyhow!("unknown overflow policy: {}", v))?;
        }
        Ok(cfg)
    }
}

fn build_globset(patterns: &[String]) -> anyhow::Result<Option<GlobSet>> {
    if patterns.is_empty() {
        return Ok(None);
    }
    let mut b = GlobSetBuilder::new();
    for pat in patterns {
        b.add(Glob::new(pat)?);
    }
    Ok(Some(b.build()?))
}

fn gather_paths(
    path: &Path,
    include: &[String],
    exclude: &[String],
) -> anyhow::Result<Vec<PathBuf>> {
    let inc_set = build_globset(include)?;
    let exc_set = build_globset(exclude)?;
    let mut list: Vec<PathBuf> = Vec::new();
    if path.is_file() {
        if !should_skip(path, inc_set.as_ref(), exc_set.as_ref()) && is_image(path) {
            list.push(path.to_path_buf());
        }
    } else {
        // Sorted walk so equal-area sprites keep a reproducible order.
        for entry in WalkDir::new(path)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let p = entry.path();
            if p.is_file() && !should_skip(p, inc_set.as_ref(), exc_set.as_ref()) && is_image(p) {
                list.push(p.to_path_buf());
            }
        }
    }
    Ok(list)
}

fn normalized(p: &Path) -> String {
    p.to_string_lossy().replace('\\', "/")
}

fn should_skip(p: &Path, include: Option<&GlobSet>, exclude: Option<&GlobSet>) -> bool {
    let s = normalized(p);
    if let Some(ex) = exclude {
        if ex.is_match(&s) {
            return true;
        }
    }
    if let Some(inc) = include {
        if !inc.is_match(&s) {
            return true;
        }
    }
    false
}

fn is_image(p: &Path) -> bool {
    matches!(
        p.extension()
            .and_then(|e| e.to_str())
            .map(|s| s.to_ascii_lowercase()),
        Some(ext) if matches!(ext.as_str(), "png" | "jpg" | "jpeg")
    )
}

/// Sprite name: path relative to the input root, without extension, `/`-separated.
fn sprite_name(root: &Path, p: &Path) -> String {
    let rel = p.strip_prefix(root).unwrap_or(p);
    let rel = if rel.as_os_str().is_empty() {
        p.file_name().map(Path::new).unwrap_or(p)
    } else {
        rel
    };
    normalized(&rel.with_extension(""))
}

fn load_sprites_with_progress(
    root: &Path,
    paths: &[PathBuf],
    hidden: Option<&GlobSet>,
    progress: bool,
) -> anyhow::Result<Vec<InputSprite<RgbaImage>>> {
    use indicatif::{ProgressBar, ProgressStyle};
    let bar = if progress {
        let b = ProgressBar::new(paths.len() as u64);
        b.set_style(ProgressStyle::with_template(
            "{spinner:.green} loading {pos}/{len} [{elapsed_precise}] {wide_msg}",
        )?);
        Some(b)
    } else {
        None
    };
    let mut list = Vec::with_capacity(paths.len());
    for p in paths {
        let msg = p.file_name().and_then(|s| s.to_str()).unwrap_or("");
        if let Some(b) = &bar {
            b.set_message(msg.to_string());
        }
        match load_image(p) {
            Ok(rgba) => {
                let (width, height) = rgba.dimensions();
                let visible = !hidden.is_some_and(|h| h.is_match(normalized(p)));
                list.push(InputSprite {
                    name: sprite_name(root, p),
                    width,
                    height,
                    visible,
                    source: rgba,
                });
            }
            Err(e) => {
                error!(?p, error = %e, "skip image");
            }
        }
        if let Some(b) = &bar {
            b.inc(1);
        }
    }
    if let Some(b) = &bar {
        b.finish_and_clear();
    }
    Ok(list)
}

fn load_image(p: &Path) -> anyhow::Result<RgbaImage> {
    let img = ImageReader::open(p)?.with_guessed_format()?.decode()?;
    Ok(img.to_rgba8())
}

fn init_tracing_with_level(quiet: bool, verbose: u8) {
    let level = if quiet {
        "error".to_string()
    } else {
        match verbose {
            0 => "info".into(),
            1 => "debug".into(),
            _ => "trace".into(),
        }
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(level)
        .with_target(false)
        .try_init();
}
