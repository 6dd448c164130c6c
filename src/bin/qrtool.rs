use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, ValueEnum};
use rust_qrgen::render::svg::to_svg_string;
use rust_qrgen::render::text::print_qr;
use rust_qrgen::{ECLevel, QRCode};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "qrtool",
    version,
    about = "Generate QR codes from text or URLs",
    after_help = "Examples:\n  qrtool \"https://google.com\" -p\n  qrtool \"hello world\" -o qr.svg\n  qrtool \"data\" -e low -b 4 -p"
)]
struct Cli {
    /// Text or URL to encode
    text: String,
    /// Error correction level
    #[arg(short, long, value_enum, default_value_t = Ecc::High)]
    ecc: Ecc,
    /// Border size in modules
    #[arg(short, long, default_value_t = 2)]
    border: u32,
    /// Output SVG file
    #[arg(short, long)]
    output: Option<PathBuf>,
    /// Print the QR code to the terminal
    #[arg(short, long)]
    print: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum Ecc {
    Low,
    Medium,
    Quartile,
    High,
}

impl From<Ecc> for ECLevel {
    fn from(ecc: Ecc) -> Self {
        match ecc {
            Ecc::Low => ECLevel::L,
            Ecc::Medium => ECLevel::M,
            Ecc::Quartile => ECLevel::Q,
            Ecc::High => ECLevel::H,
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    if std::env::args_os().len() <= 1 {
        Cli::command().print_help()?;
        std::process::exit(1);
    }
    let cli = Cli::parse();

    let qr = QRCode::encode_text(&cli.text, cli.ecc.into())
        .with_context(|| format!("failed to encode {} bytes of text", cli.text.len()))?;

    if cli.print || cli.output.is_none() {
        print_qr(&qr, cli.border).context("failed to write to stdout")?;
    }

    if let Some(path) = &cli.output {
        std::fs::write(path, to_svg_string(&qr, cli.border))
            .with_context(|| format!("failed to write {}", path.display()))?;
        println!("Saved SVG to {}", path.display());
    }

    Ok(())
}
