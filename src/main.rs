use std::fs;
use std::io::Write;
use std::path::PathBuf;

use clap::Parser;

use wathiq_report::assets::{default_resource_dir, resolve_assets};
use wathiq_report::error::{ReportError, Result};
use wathiq_report::pdf::render_pdf;
use wathiq_report::report::{build_document, parse_report};

#[derive(Parser)]
#[command(name = "wathiq-report")]
#[command(version, about = "Renders the Wathiq daily business report as an Arabic PDF", long_about = None)]
struct Cli {
    /// Path to the UTF-8 JSON report payload
    payload: PathBuf,

    /// Write the PDF to this file instead of standard output
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Directory holding the bundled report fonts (default: fonts/ next to
    /// the executable or the crate)
    #[arg(long)]
    fonts_dir: Option<PathBuf>,

    /// Directory holding the report logo (default: assets/ next to the
    /// executable or the crate)
    #[arg(long)]
    assets_dir: Option<PathBuf>,

    /// Emit the assembled HTML document instead of rendering a PDF
    #[arg(long)]
    html: bool,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(e) = run() {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    let fonts_dir = cli
        .fonts_dir
        .unwrap_or_else(|| default_resource_dir("fonts"));
    let assets_dir = cli
        .assets_dir
        .unwrap_or_else(|| default_resource_dir("assets"));

    let raw = fs::read_to_string(&cli.payload).map_err(|source| ReportError::PayloadRead {
        path: cli.payload.clone(),
        source,
    })?;
    let payload = serde_json::from_str(&raw).map_err(|source| ReportError::PayloadParse {
        path: cli.payload.clone(),
        source,
    })?;

    let document = parse_report(&payload)?;
    let resolved = resolve_assets(&fonts_dir, &assets_dir)?;
    let html = build_document(&document, &resolved)?;

    if cli.html {
        return write_output(cli.output.as_deref(), html.as_bytes());
    }

    let pdf_bytes = render_pdf(&html, &assets_dir)?;
    write_output(cli.output.as_deref(), &pdf_bytes)
}

fn write_output(output: Option<&std::path::Path>, bytes: &[u8]) -> Result<()> {
    match output {
        Some(path) => fs::write(path, bytes)?,
        None => {
            let stdout = std::io::stdout();
            let mut handle = stdout.lock();
            handle.write_all(bytes)?;
            handle.flush()?;
        }
    }
    Ok(())
}
