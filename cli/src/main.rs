//! pmstd CLI - standards document segmentation tool

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use pmstd::convert::DEFAULT_PDF_COMMAND;
use pmstd::render::{save_document, save_sections};
use pmstd::{
    BatchSummary, CommandConverter, ConverterRegistry, JsonFormat, MarkdownConverter,
    ProcessOptions, ProcessedDocument, Processor, StandardType,
};

type CliResult<T> = Result<T, Box<dyn std::error::Error>>;

#[derive(Parser)]
#[command(name = "pmstd")]
#[command(author = "PMPedia")]
#[command(version)]
#[command(
    about = "Segment PMBOK, PRINCE2 and ISO 21502 exports into structured JSON sections",
    long_about = None
)]
struct Cli {
    /// Input document (PDF or markdown export)
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,

    #[command(flatten)]
    output: OutputArgs,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Process one document and write its JSON artifacts
    Process {
        /// Input document
        #[arg(value_name = "FILE")]
        input: PathBuf,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Process every supported document in a directory
    Batch {
        /// Input directory
        #[arg(value_name = "DIR")]
        dir: PathBuf,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Show document structure without writing anything
    Info {
        /// Input document
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// External command used to export PDFs
        #[arg(long, env = "PMSTD_PDF_COMMAND", default_value = DEFAULT_PDF_COMMAND)]
        pdf_command: String,
    },

    /// Show version information
    Version,
}

#[derive(Args, Clone)]
struct OutputArgs {
    /// Directory for whole-document JSON files
    #[arg(
        short,
        long,
        value_name = "DIR",
        env = "PMSTD_OUTPUT_DIR",
        default_value = "data/processed"
    )]
    output: PathBuf,

    /// Directory for per-section JSON files
    #[arg(
        long,
        value_name = "DIR",
        env = "PMSTD_SECTIONS_DIR",
        default_value = "data/sections"
    )]
    sections_dir: PathBuf,

    /// Output compact JSON
    #[arg(long)]
    compact: bool,

    /// Classify sections in parallel
    #[arg(long)]
    parallel: bool,

    /// External command used to export PDFs
    #[arg(long, env = "PMSTD_PDF_COMMAND", default_value = DEFAULT_PDF_COMMAND)]
    pdf_command: String,
}

impl OutputArgs {
    fn format(&self) -> JsonFormat {
        if self.compact {
            JsonFormat::Compact
        } else {
            JsonFormat::Pretty
        }
    }

    fn processor(&self) -> CliResult<Processor> {
        let options = ProcessOptions::new().with_parallel(self.parallel);
        Ok(Processor::new(options)?)
    }
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Process { input, output }) => cmd_process(&input, &output),
        Some(Commands::Batch { dir, output }) => cmd_batch(&dir, &output),
        Some(Commands::Info { input, pdf_command }) => cmd_info(&input, &pdf_command),
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
        None => {
            // Default behavior: process if input is provided
            if let Some(input) = cli.input {
                cmd_process(&input, &cli.output)
            } else {
                println!("{}", "Usage: pmstd <FILE>".yellow());
                println!("       pmstd --help for more information");
                Ok(())
            }
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn converters(pdf_command: &str) -> CliResult<ConverterRegistry> {
    let mut registry = ConverterRegistry::new();
    registry.register(Arc::new(MarkdownConverter::new()));
    registry.register(Arc::new(CommandConverter::parse(pdf_command)?));
    Ok(registry)
}

fn spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap(),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

/// Write both artifacts and return the number of section files.
fn persist(
    doc: &ProcessedDocument,
    args: &OutputArgs,
    threshold: f64,
) -> CliResult<(PathBuf, usize)> {
    let doc_path = save_document(doc, &args.output, args.format())?;
    let sections = save_sections(doc, &args.sections_dir, threshold, args.format())?;
    Ok((doc_path, sections.len()))
}

fn cmd_process(input: &Path, args: &OutputArgs) -> CliResult<()> {
    let processor = args.processor()?;
    let registry = converters(&args.pdf_command)?;

    let pb = spinner(&format!("Processing {}...", input.display()));
    let doc = processor.process_file(input, &registry)?;
    pb.set_message("Saving JSON...");
    let (doc_path, section_files) =
        persist(&doc, args, processor.options().section_export_threshold)?;
    pb.finish_with_message("Done!");

    print_summary(&doc);

    println!("\n{}", "Output files:".green().bold());
    println!("  {} {}", "├─".dimmed(), doc_path.display());
    println!(
        "  {} {} section files in {}",
        "└─".dimmed(),
        section_files,
        args.sections_dir
            .join(doc.metadata.standard_type.slug())
            .display()
    );

    Ok(())
}

fn cmd_batch(dir: &Path, args: &OutputArgs) -> CliResult<()> {
    let processor = args.processor()?;
    let registry = converters(&args.pdf_command)?;

    let mut inputs: Vec<PathBuf> = fs::read_dir(dir)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.is_file() && registry.supports_path(path))
        .collect();
    inputs.sort();
    log::debug!("Found {} supported documents in {}", inputs.len(), dir.display());

    if inputs.is_empty() {
        println!("{} {}", "No supported documents in".yellow(), dir.display());
        return Ok(());
    }

    let pb = spinner(&format!("Processing {} documents...", inputs.len()));
    let entries = processor.process_batch(&inputs, &registry);
    pb.finish_and_clear();

    let pb = ProgressBar::new(entries.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap()
            .progress_chars("#>-"),
    );

    let mut lines = Vec::with_capacity(entries.len());
    let mut save_failures = 0;
    for entry in &entries {
        let name = entry
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        pb.set_message(name.clone());

        let line = match &entry.result {
            Ok(doc) => match persist(doc, args, processor.options().section_export_threshold) {
                Ok((_, section_files)) => format!(
                    "  {} {} ({} sections, {} saved)",
                    "✓".green(),
                    name,
                    doc.processing_stats.total_sections,
                    section_files
                ),
                Err(e) => {
                    save_failures += 1;
                    format!("  {} {}: {}", "✗".red(), name, e)
                }
            },
            Err(e) => format!("  {} {}: {}", "✗".red(), name, e),
        };
        lines.push(line);
        pb.inc(1);
    }
    pb.finish_and_clear();

    println!("{}", "Batch Results".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());
    for line in &lines {
        println!("{}", line);
    }

    let summary = BatchSummary::from_entries(&entries);
    println!();
    println!(
        "{} {}/{} documents processed successfully",
        "Done!".green().bold(),
        summary.successful - save_failures,
        summary.documents
    );
    println!(
        "{}: {} ({} valid)",
        "Sections".bold(),
        summary.total_sections,
        summary.valid_sections
    );

    Ok(())
}

fn cmd_info(input: &Path, pdf_command: &str) -> CliResult<()> {
    let processor = Processor::new(ProcessOptions::default())?;
    let doc = processor.process_file(input, &converters(pdf_command)?)?;

    print_summary(&doc);

    let profile = processor.profiles().profile_for(doc.metadata.standard_type);
    if !profile.key_identifiers.is_empty() {
        println!(
            "{}: {}",
            "Key identifiers".bold(),
            profile.key_identifiers.join(", ")
        );
    }

    println!();
    println!("{}", "Table of Contents".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());
    for entry in &doc.table_of_contents {
        let indent = "  ".repeat(entry.level.saturating_sub(1) as usize);
        println!("{}{} {}", indent, entry.title, entry.section_id.dimmed());
    }

    Ok(())
}

fn print_summary(doc: &ProcessedDocument) {
    let meta = &doc.metadata;
    let stats = &doc.processing_stats;

    println!("{}", "Document Information".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    if let Some(ref path) = meta.file_path {
        println!("{}: {}", "File".bold(), path.display());
    }
    println!("{}: {}", "Standard".bold(), meta.standard_type);
    println!("{}: {}", "Title".bold(), meta.title);
    println!("{}: {}", "Version".bold(), meta.version);
    println!("{}: {}", "Pages".bold(), meta.total_pages);
    println!("{}: {}", "Pattern".bold(), meta.organizational_pattern);

    if !meta.extraction_challenges.is_empty() {
        println!("{}:", "Challenges".bold());
        for challenge in &meta.extraction_challenges {
            println!("  {} {}", "-".dimmed(), challenge);
        }
    }

    println!();
    println!("{}", "Processing Statistics".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());
    println!("{}: {}", "Sections".bold(), stats.total_sections);
    println!("{}: {}", "Valid sections".bold(), stats.valid_sections);
    println!("{}: {}", "Skipped blocks".bold(), stats.skipped_blocks);
    println!("{}: {}", "Tables".bold(), stats.total_tables);
    println!("{}: {}", "Figures".bold(), stats.total_figures);
    println!("{}: {}", "Average quality".bold(), stats.average_quality_score);
    println!("{}: {}%", "Success rate".bold(), stats.success_rate);
}

fn cmd_version() {
    println!("{} {}", "pmstd".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("Project-management standards segmentation tool");
    println!();
    let standards: Vec<&str> = StandardType::ALL
        .iter()
        .filter(|s| **s != StandardType::Unknown)
        .map(StandardType::as_str)
        .collect();
    println!("Supported standards: {}", standards.join(", "));
    println!("License: MIT");
}
