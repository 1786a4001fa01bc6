//! ase-rgba - Tool for inspecting and exporting Aseprite sprites.

use std::env;
use std::path::Path;

use anyhow::{Context, Result};
use aseprite_rgba::ase::{read_file, ByteCursor, FileHeader};
use aseprite_rgba::prelude::*;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

fn main() {
    let args: Vec<String> = env::args().collect();

    // Parse global flags
    let mut level = "info";
    let mut config_path: Option<String> = None;
    let mut filtered_args: Vec<&str> = Vec::new();
    let mut iter = args[1..].iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "-v" | "--verbose" => level = "debug",
            "-vv" | "--trace" => level = "trace",
            "-q" | "--quiet" => level = "error",
            "-c" | "--config" => config_path = iter.next().cloned(),
            "-V" | "--version" => {
                print_version();
                return;
            }
            _ => filtered_args.push(arg),
        }
    }
    init_logging(level);

    if filtered_args.is_empty() {
        print_help();
        return;
    }

    let opts = match load_options(config_path.as_deref()) {
        Ok(opts) => opts,
        Err(e) => {
            eprintln!("Error: {e:#}");
            std::process::exit(1);
        }
    };

    let result = match filtered_args[0] {
        "info" | "i" => with_file(&filtered_args, "info <file>", |f| cmd_info(f, &opts)),
        "tags" | "t" => with_file(&filtered_args, "tags <file>", |f| cmd_tags(f, &opts)),
        "layers" | "l" => with_file(&filtered_args, "layers <file>", |f| cmd_layers(f, &opts)),
        "export" | "e" => {
            if filtered_args.len() < 3 {
                eprintln!("Error: missing arguments");
                eprintln!("Usage: ase-rgba export <file> <out_dir>");
                std::process::exit(1);
            }
            cmd_export(filtered_args[1], filtered_args[2], &opts)
        }
        "help" | "h" | "-h" | "--help" => {
            print_help();
            Ok(())
        }
        // Default: if file exists, show info; otherwise error
        other => {
            if Path::new(other).exists() {
                cmd_info(other, &opts)
            } else {
                eprintln!("Unknown command: {other}");
                eprintln!();
                print_help();
                std::process::exit(1);
            }
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

fn init_logging(default_level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn load_options(path: Option<&str>) -> Result<DecodeOptions> {
    match path {
        Some(path) => {
            let opts = DecodeOptions::load(path).with_context(|| format!("loading {path}"))?;
            debug!("Decode options: {:?}", opts);
            Ok(opts)
        }
        None => Ok(DecodeOptions::default()),
    }
}

fn with_file(args: &[&str], usage: &str, run: impl FnOnce(&str) -> Result<()>) -> Result<()> {
    match args.get(1) {
        Some(&file) => run(file),
        None => {
            eprintln!("Error: missing file argument");
            eprintln!("Usage: ase-rgba {usage}");
            std::process::exit(1);
        }
    }
}

fn print_version() {
    let date = option_env!("ASE_RGBA_BUILD_DATE").unwrap_or("unknown");
    let time = option_env!("ASE_RGBA_BUILD_TIME").unwrap_or("unknown");
    println!("ase-rgba {} (built {} {})", env!("CARGO_PKG_VERSION"), date, time);
}

fn print_help() {
    println!("ase-rgba - Aseprite sprite toolkit");
    println!();
    println!("USAGE:");
    println!("    ase-rgba [OPTIONS] <COMMAND> [ARGS]");
    println!();
    println!("COMMANDS:");
    println!("    i, info   <file>              Show header and frame summary");
    println!("    t, tags   <file>              List animation tags");
    println!("    l, layers <file>              List layers with blend modes");
    println!("    e, export <file> <dir>        Write one PNG per frame (needs --features png)");
    println!("    h, help                       Show this help");
    println!();
    println!("OPTIONS:");
    println!("    -c, --config <json>  Load decode options from a JSON file");
    println!("    -v, --verbose        Show debug output");
    println!("    -vv, --trace         Show trace output (very verbose)");
    println!("    -q, --quiet          Only show errors");
    println!("    -V, --version        Show version and build date");
    println!();
    println!("EXAMPLES:");
    println!("    ase-rgba info player.aseprite");
    println!("    ase-rgba export player.aseprite out/");
    println!("    ase-rgba -c lenient.json info new_format.ase   # e.g. {{\"unknown_chunks\": \"skip\"}}");
    println!();
    println!("NOTES:");
    println!("    - Passing a file directly is equivalent to 'info'");
    println!("    - RUST_LOG overrides the verbosity flags");
}

fn cmd_info(path: &str, opts: &DecodeOptions) -> Result<()> {
    info!("Opening sprite: {}", path);

    let data = read_file(path).with_context(|| format!("reading {path}"))?;
    let header = FileHeader::read(&mut ByteCursor::new(&data))?;
    let sprite = decode_with(&data, opts).with_context(|| format!("decoding {path}"))?;
    debug!("Sprite decoded successfully");

    println!("Sprite: {}", path);
    println!("Size:   {}x{}", sprite.width(), sprite.height());
    println!("Depth:  {} bpp", header.depth);
    println!("Frames: {} ({} ms total)", sprite.frames().len(), sprite.duration());
    println!("Layers: {}", sprite.layers().len());
    println!("Tags:   {}", sprite.tags().len());
    println!();

    for (i, frame) in sprite.frames().iter().enumerate() {
        let opaque = frame.pixels.iter().filter(|p| p.a == 0xFF).count();
        let visible = frame.pixels.iter().filter(|p| p.a != 0).count();
        println!(
            "  [{:>3}] {:>5} ms  {} visible px ({} opaque)",
            i, frame.duration, visible, opaque
        );
    }
    Ok(())
}

fn cmd_tags(path: &str, opts: &DecodeOptions) -> Result<()> {
    let sprite = Sprite::open_with(path, opts).with_context(|| format!("decoding {path}"))?;
    if sprite.tags().is_empty() {
        println!("No tags");
        return Ok(());
    }
    for tag in sprite.tags() {
        let ms: u32 = sprite.frames()[tag.from as usize..=tag.to as usize]
            .iter()
            .map(|f| f.duration as u32)
            .sum();
        println!(
            "{:<20} frames {:>3}..={:<3} {:?} ({} ms)",
            tag.name, tag.from, tag.to, tag.direction, ms
        );
    }
    Ok(())
}

fn cmd_layers(path: &str, opts: &DecodeOptions) -> Result<()> {
    let sprite = Sprite::open_with(path, opts).with_context(|| format!("decoding {path}"))?;
    if sprite.layers().is_empty() {
        println!("No layers (cels paint over each other)");
        return Ok(());
    }
    for (i, layer) in sprite.layers().iter().enumerate() {
        let indent = "  ".repeat(layer.child_level as usize);
        let note = if layer.blend_mode.is_implemented() { "" } else { " [as Normal]" };
        println!(
            "[{:>2}] {}{}{} {:?}{} opacity {}{}",
            i,
            indent,
            layer.name,
            if layer.is_group() { "/" } else { "" },
            layer.blend_mode,
            note,
            layer.opacity,
            if layer.is_visible() { "" } else { " (hidden)" },
        );
    }
    Ok(())
}

#[cfg(feature = "png")]
fn cmd_export(path: &str, out_dir: &str, opts: &DecodeOptions) -> Result<()> {
    info!("Exporting {} -> {}", path, out_dir);

    let sprite = Sprite::open_with(path, opts).with_context(|| format!("decoding {path}"))?;
    std::fs::create_dir_all(out_dir).with_context(|| format!("creating {out_dir}"))?;

    let stem = Path::new(path)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("frame");
    for (i, frame) in sprite.frames().iter().enumerate() {
        let image = image::RgbaImage::from_raw(
            sprite.width() as u32,
            sprite.height() as u32,
            frame.as_bytes().to_vec(),
        )
        .context("frame raster does not match sprite size")?;
        let out = Path::new(out_dir).join(format!("{stem}_{i:03}.png"));
        image.save(&out).with_context(|| format!("writing {}", out.display()))?;
        debug!("Wrote {}", out.display());
    }
    println!("Exported {} frames to {}", sprite.frames().len(), out_dir);
    Ok(())
}

#[cfg(not(feature = "png"))]
fn cmd_export(_path: &str, _out_dir: &str, _opts: &DecodeOptions) -> Result<()> {
    anyhow::bail!("PNG export not available. Rebuild with: cargo build --features png")
}
