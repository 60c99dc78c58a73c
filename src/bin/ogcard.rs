use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};
use sha2::Digest as _;
use tracing_subscriber::EnvFilter;

use ogcard::{FontSource as _, OutputFormat};

#[derive(Parser, Debug)]
#[command(name = "ogcard", version, about = "Render Open Graph preview cards")]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a card described by an options JSON file.
    Render(RenderArgs),
    /// Print the family name and SHA-256 of every configured font.
    Fonts(FontArgs),
}

#[derive(Args, Debug)]
struct RenderArgs {
    /// Input options JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output image path.
    #[arg(long)]
    out: PathBuf,

    /// Output format; guessed from the output extension when omitted.
    #[arg(long)]
    format: Option<OutputFormat>,

    /// Directory image references are resolved against. Defaults to the
    /// directory holding the options file.
    #[arg(long)]
    assets: Option<PathBuf>,

    #[command(flatten)]
    fonts: FontArgs,
}

#[derive(Args, Debug)]
struct FontArgs {
    /// Font directory.
    #[arg(long, default_value = "fonts")]
    fonts: PathBuf,

    /// Primary text font file inside the font directory.
    #[arg(long)]
    text_font: Option<String>,

    /// Symbols font file inside the font directory.
    #[arg(long)]
    symbols_font: Option<String>,

    /// Emoji font file inside the font directory.
    #[arg(long)]
    emoji_font: Option<String>,
}

impl FontArgs {
    fn source(&self) -> ogcard::DirFontSource {
        let mut files = ogcard::FontFiles::default();
        if let Some(f) = &self.text_font {
            files.text = f.clone();
        }
        if let Some(f) = &self.symbols_font {
            files.symbols = f.clone();
        }
        if let Some(f) = &self.emoji_font {
            files.emoji = f.clone();
        }
        ogcard::DirFontSource::with_files(&self.fonts, files)
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Render(args) => cmd_render(args),
        Command::Fonts(args) => cmd_fonts(args),
    }
}

fn read_options_json(path: &Path) -> anyhow::Result<ogcard::Options> {
    let f = File::open(path).with_context(|| format!("open options '{}'", path.display()))?;
    let r = BufReader::new(f);
    let opts: ogcard::Options =
        serde_json::from_reader(r).with_context(|| "parse options JSON")?;
    Ok(opts)
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let opts = read_options_json(&args.in_path)?;
    opts.validate()?;

    let format = args
        .format
        .or_else(|| OutputFormat::from_path(&args.out))
        .unwrap_or_default();

    let assets_root = match &args.assets {
        Some(dir) => dir.clone(),
        None => args
            .in_path
            .parent()
            .unwrap_or_else(|| Path::new("."))
            .to_path_buf(),
    };

    let preview = ogcard::Preview::new(ogcard::FsResolver::new(assets_root), args.fonts.source());
    let card = preview.draw(&opts)?;
    let bytes = ogcard::encode(&card, format, opts.quality)
        .with_context(|| format!("encode {}", format.extension()))?;

    if let Some(parent) = args.out.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    std::fs::write(&args.out, bytes)
        .with_context(|| format!("write card '{}'", args.out.display()))?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_fonts(args: FontArgs) -> anyhow::Result<()> {
    let source = args.source();
    let face = ogcard::CompositeFace::load(&source, 16.0)
        .with_context(|| format!("load fonts from '{}'", source.root().display()))?;

    println!("font diagnostics:");
    for (role, family) in ogcard::FontRole::LOOKUP_ORDER.into_iter().zip(face.families()) {
        let bytes = source
            .read(role)
            .with_context(|| format!("read {role} font"))?;
        println!("  {role}:");
        println!("    file:    {}", source.path_for(role).display());
        println!("    family:  {family}");
        println!("    sha256:  {}", sha256_hex(&bytes));
    }
    Ok(())
}

fn sha256_hex(bytes: &[u8]) -> String {
    let digest = sha2::Sha256::digest(bytes);
    let mut out = String::with_capacity(digest.len() * 2);
    for b in digest {
        out.push_str(&format!("{:02x}", b));
    }
    out
}
