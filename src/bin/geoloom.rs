use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "geoloom", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a request JSON to a PNG.
    Render(RenderArgs),
    /// List the available pattern kinds and their parameters.
    Patterns,
}

#[derive(Parser, Debug)]
struct RenderArgs {
    /// Input render request JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Override the output canvas size (pixels, square).
    #[arg(long)]
    size: Option<u32>,

    /// Override the supersample factor.
    #[arg(long)]
    supersample: Option<u32>,

    /// Disable the glow pass regardless of the request.
    #[arg(long)]
    no_glow: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match cli.cmd {
        Command::Render(args) => cmd_render(args),
        Command::Patterns => cmd_patterns(),
    }
}

fn read_request_json(path: &Path) -> anyhow::Result<geoloom::RenderRequest> {
    let f = File::open(path).with_context(|| format!("open request '{}'", path.display()))?;
    let r = BufReader::new(f);
    let request: geoloom::RenderRequest =
        serde_json::from_reader(r).with_context(|| "parse render request JSON")?;
    Ok(request)
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let mut request = read_request_json(&args.in_path)?;
    if let Some(size) = args.size {
        request.size = size;
    }
    if let Some(supersample) = args.supersample {
        request.supersample = supersample;
    }
    if args.no_glow {
        request.glow = false;
    }
    request.validate()?;

    let img = geoloom::render(&request)?;

    if let Some(parent) = args.out.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }

    image::save_buffer_with_format(
        &args.out,
        &img.rgba,
        img.width,
        img.height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", args.out.display()))?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_patterns() -> anyhow::Result<()> {
    const PATTERNS: &[(&str, &str)] = &[
        ("flower_of_life", "radius, layers"),
        ("seed_of_life", "radius"),
        ("metatrons_cube", "radius"),
        ("sri_yantra", "radius"),
        ("vesica_piscis", "radius"),
        ("merkaba", "radius"),
        ("golden_spiral", "scale, iterations"),
        ("fibonacci_spiral", "scale, iterations"),
        ("torus", "radius, rings"),
        ("icosahedron", "radius"),
        ("tetrahedron_grid", "radius, layers"),
    ];
    for (kind, params) in PATTERNS {
        println!("{kind:18} {params}");
    }
    Ok(())
}
