use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use signature_cartridge::{CartridgeAssembler, CartridgeRequest, FontCache, SignaturePayload};

#[derive(Parser, Debug)]
#[command(name = "cartridge", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a cartridge request to an image file.
    Render(RenderArgs),
    /// Print the names selected by a wildcard pattern.
    Match(MatchArgs),
}

#[derive(Parser, Debug)]
struct RenderArgs {
    /// Cartridge request JSON.
    #[arg(long)]
    request: PathBuf,

    /// Output image path.
    #[arg(long)]
    out: PathBuf,

    /// Cartridge width, overriding the configured one.
    #[arg(long)]
    width: Option<u32>,

    /// Cartridge height, overriding the configured one.
    #[arg(long)]
    height: Option<u32>,

    /// Directory searched for `<name>.ttf` before the system fonts.
    #[arg(long)]
    font_dir: Option<PathBuf>,

    /// Signature image file, replacing the request's signature.
    #[arg(long)]
    signature_image: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct MatchArgs {
    /// Pattern with `*` and `?` wildcards, or a literal name.
    #[arg(long)]
    pattern: String,

    /// Candidate names.
    names: Vec<String>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match cli.cmd {
        Command::Render(args) => cmd_render(args),
        Command::Match(args) => cmd_match(args),
    }
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let json = std::fs::read_to_string(&args.request)
        .with_context(|| format!("read request '{}'", args.request.display()))?;
    let mut request: CartridgeRequest = serde_json::from_str(&json)
        .with_context(|| format!("parse request '{}'", args.request.display()))?;
    if let Some(path) = args.signature_image {
        request.signature = Some(SignaturePayload::File(path));
    }

    let fonts = match args.font_dir {
        Some(dir) => FontCache::with_directory(dir),
        None => FontCache::system(),
    };
    let assembler = CartridgeAssembler::new(fonts);
    let response = assembler
        .build_sized(request, args.width, args.height)
        .context("build cartridge")?;

    if let Some(parent) = args.out.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    std::fs::write(&args.out, response.resource.bytes())
        .with_context(|| format!("write cartridge '{}'", args.out.display()))?;

    eprintln!(
        "wrote {} ({}, {} bytes)",
        args.out.display(),
        response.content_type,
        response.resource.len()
    );
    Ok(())
}

fn cmd_match(args: MatchArgs) -> anyhow::Result<()> {
    for name in signature_cartridge::matcher::select(&args.pattern, &args.names) {
        println!("{name}");
    }
    Ok(())
}
