//! PDF redaction CLI.
//!
//! Runs the selected detectors over a document and writes a flattened,
//! image-only copy with every detected entity blacked out. The `scan`
//! subcommand reports what would be redacted without producing output.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

use tarja::{
    Detector, DocumentNumberDetector, EmailDetector, MupdfBackend, PdfAssembler, PhoneDetector,
    Session,
};

/// Rasterizing PDF redaction tool
///
/// Detects sensitive entities (CPF/CNPJ, email, phone) and burns opaque
/// boxes over them into flattened page images. The output contains no
/// text layer at all.
#[derive(Parser)]
#[command(name = "tarja")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Input PDF file path
    #[arg(short, long, value_name = "FILE")]
    input: Option<PathBuf>,

    /// Output PDF file path
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Redact CPF and CNPJ document numbers
    #[arg(long)]
    documents: bool,

    /// Redact email addresses
    #[arg(long)]
    email: bool,

    /// Redact phone numbers
    #[arg(long)]
    phone: bool,

    /// Display scale used for selection geometry
    #[arg(long, default_value_t = 1.5, value_name = "FACTOR")]
    scale: f32,

    /// Output scale for the flattened page images (print fidelity)
    #[arg(long = "print-scale", default_value_t = 2.0, value_name = "FACTOR")]
    print_scale: f32,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Report detected entities without writing an output document
    Scan {
        /// Input PDF file path
        #[arg(short, long, value_name = "FILE")]
        input: PathBuf,

        /// Scan for CPF and CNPJ document numbers
        #[arg(long)]
        documents: bool,

        /// Scan for email addresses
        #[arg(long)]
        email: bool,

        /// Scan for phone numbers
        #[arg(long)]
        phone: bool,

        /// Display scale used for selection geometry
        #[arg(long, default_value_t = 1.5, value_name = "FACTOR")]
        scale: f32,
    },
}

/// Builds the detector list from the category flags.
fn build_detectors(documents: bool, email: bool, phone: bool) -> Vec<Box<dyn Detector>> {
    let mut detectors: Vec<Box<dyn Detector>> = Vec::new();
    if documents {
        detectors.push(Box::new(DocumentNumberDetector::new()));
    }
    if email {
        detectors.push(Box::new(EmailDetector::new()));
    }
    if phone {
        detectors.push(Box::new(PhoneDetector::new()));
    }
    detectors
}

/// Command handler carrying the verbosity setting.
struct RedactionHandler {
    verbose: bool,
}

impl RedactionHandler {
    fn new(verbose: bool) -> Self {
        Self { verbose }
    }

    /// Loads the document and runs every requested detector.
    fn scan_session(
        &self,
        input: &Path,
        detectors: &[Box<dyn Detector>],
        scale: f32,
    ) -> Result<(MupdfBackend, Session)> {
        if !input.exists() {
            anyhow::bail!("Input file does not exist: {}", input.display());
        }

        let backend = MupdfBackend::open(input).with_context(|| "Failed to open document")?;
        let mut session = Session::load(&backend, scale).with_context(|| "Failed to load document")?;

        for detector in detectors {
            let found = session.run_detector(detector.as_ref());
            println!("  {}: {} found", detector.category().label(), found);
        }

        Ok((backend, session))
    }

    /// Full redaction run: scan, export, write.
    fn redact(
        &self,
        input: &Path,
        output: &Path,
        detectors: &[Box<dyn Detector>],
        scale: f32,
        print_scale: f32,
    ) -> Result<()> {
        if detectors.is_empty() {
            anyhow::bail!(
                "No detectors specified. Use --documents, --email, or --phone."
            );
        }

        if self.verbose {
            println!("Input:  {}", input.display());
            println!("Output: {}", output.display());
        }

        let (mut backend, session) = self.scan_session(input, detectors, scale)?;

        let total = session.selection_count();
        if total == 0 {
            println!("⚠ Nothing detected; no output written");
            return Ok(());
        }

        let verbose = self.verbose;
        let mut assembler = PdfAssembler::new();
        let bytes = session
            .export(&mut backend, &mut assembler, print_scale, |page, pages| {
                if verbose {
                    println!("  burning page {}/{}", page, pages);
                }
            })
            .with_context(|| "Export failed; no output was written")?;

        std::fs::write(output, &bytes)
            .with_context(|| format!("Failed to write to {}", output.display()))?;

        println!(
            "✓ Redacted {} item(s) across {} page(s) → {}",
            total,
            session.page_count(),
            output.display()
        );

        Ok(())
    }

    /// Scan-only mode.
    fn scan(&self, input: &Path, detectors: &[Box<dyn Detector>], scale: f32) -> Result<()> {
        if detectors.is_empty() {
            anyhow::bail!(
                "No detectors specified. Use --documents, --email, or --phone."
            );
        }

        let (_backend, session) = self.scan_session(input, detectors, scale)?;
        println!("Total: {} item(s) on {} page(s)", session.selection_count(), session.page_count());
        Ok(())
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let handler = RedactionHandler::new(cli.verbose);

    match &cli.command {
        Some(Commands::Scan {
            input,
            documents,
            email,
            phone,
            scale,
        }) => {
            let detectors = build_detectors(*documents, *email, *phone);
            handler.scan(input, &detectors, *scale)?;
        }
        None => {
            let input = cli
                .input
                .as_ref()
                .ok_or_else(|| anyhow::anyhow!("--input is required"))?;
            let output = cli
                .output
                .as_ref()
                .ok_or_else(|| anyhow::anyhow!("--output is required"))?;

            let detectors = build_detectors(cli.documents, cli.email, cli.phone);
            handler.redact(input, output, &detectors, cli.scale, cli.print_scale)?;
        }
    }

    Ok(())
}
