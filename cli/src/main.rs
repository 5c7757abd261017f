//! pdfoutline CLI - PDF title and heading outline extraction tool

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use pdfoutline::batch::{run_batch, BatchEvent, BatchReport};
use pdfoutline::{ExtractOptions, Outliner, PageSelection};

#[derive(Parser)]
#[command(name = "pdfoutline")]
#[command(author = "iyulab")]
#[command(version)]
#[command(about = "Extract a PDF's title and heading outline as JSON", long_about = None)]
struct Cli {
    /// Input PDF file or directory of PDFs
    #[arg(value_name = "PATH")]
    input: Option<PathBuf>,

    /// Output file (for a PDF) or directory (for a folder)
    #[arg(value_name = "OUTPUT")]
    output: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract the outline of a single PDF
    Extract {
        /// Input PDF file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,

        /// Page range (e.g., "1-10", "1,3,5")
        #[arg(long)]
        pages: Option<String>,

        /// Treat unreadable pages as empty instead of failing
        #[arg(long)]
        lenient: bool,
    },

    /// Extract outlines for every PDF in a directory
    Batch {
        /// Directory holding the PDFs
        #[arg(value_name = "INPUT_DIR", env = "PDFOUTLINE_INPUT_DIR", default_value = "input")]
        input: PathBuf,

        /// Directory receiving one JSON file per PDF
        #[arg(value_name = "OUTPUT_DIR", env = "PDFOUTLINE_OUTPUT_DIR", default_value = "output")]
        output: PathBuf,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,

        /// Process documents one at a time
        #[arg(long)]
        sequential: bool,
    },

    /// Show how the outline was inferred
    Info {
        /// Input PDF file
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },

    /// Show version information
    Version,
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Extract {
            input,
            output,
            compact,
            pages,
            lenient,
        }) => cmd_extract(&input, output.as_deref(), compact, pages.as_deref(), lenient),
        Some(Commands::Batch {
            input,
            output,
            compact,
            sequential,
        }) => cmd_batch(&input, &output, compact, sequential),
        Some(Commands::Info { input }) => cmd_info(&input),
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
        None => match cli.input {
            Some(input) if input.is_dir() => {
                let output = cli.output.unwrap_or_else(|| PathBuf::from("output"));
                cmd_batch(&input, &output, false, false)
            }
            Some(input) => cmd_extract(&input, cli.output.as_deref(), false, None, false),
            None => {
                println!("{}", "Usage: pdfoutline <PATH> [OUTPUT]".yellow());
                println!("       pdfoutline --help for more information");
                Ok(())
            }
        },
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn cmd_extract(
    input: &Path,
    output: Option<&Path>,
    compact: bool,
    pages: Option<&str>,
    lenient: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let page_selection = match pages {
        Some(p) => PageSelection::parse(p)?,
        None => PageSelection::All,
    };

    let mut outliner = Outliner::new().with_pages(page_selection);
    if lenient {
        outliner = outliner.lenient();
    }
    if compact {
        outliner = outliner.compact();
    }

    let outline = outliner.extract_file(input)?;
    let json = outliner.to_json(&outline)?;

    if let Some(path) = output {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, &json)?;
        println!(
            "{} {} ({} headings)",
            "Saved to".green(),
            path.display(),
            outline.len()
        );
    } else {
        println!("{}", json);
    }

    Ok(())
}

fn cmd_batch(
    input: &Path,
    output: &Path,
    compact: bool,
    sequential: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut options = ExtractOptions::new();
    if sequential {
        options = options.sequential();
    }
    let mut outliner = Outliner::with_options(options);
    if compact {
        outliner = outliner.compact();
    }

    let pb = ProgressBar::new(0);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap()
            .progress_chars("#>-"),
    );

    let report = run_batch(input, output, &outliner, |event| match event {
        BatchEvent::Started { total } => pb.set_length(total as u64),
        BatchEvent::Succeeded { input, output, .. } => {
            pb.set_message(display_name(output));
            pb.println(format!(
                "{} {} -> {}",
                "✓".green(),
                display_name(input),
                display_name(output)
            ));
            pb.inc(1);
        }
        BatchEvent::Failed { input, error } => {
            pb.println(format!("{} {}: {}", "✗".red(), display_name(input), error));
            pb.inc(1);
        }
    })?;

    pb.finish_and_clear();
    print_report(&report);
    Ok(())
}

fn print_report(report: &BatchReport) {
    if report.total() == 0 {
        println!("{}", "No PDF files found in the input folder".yellow());
        return;
    }

    println!();
    println!("{}", "Batch Summary".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());
    println!("{}: {}", "Succeeded".bold(), report.succeeded.to_string().green());
    println!("{}: {}", "Failed".bold(), report.failed.len().to_string().red());
    for name in &report.failed {
        println!("  {} {}", "├─".dimmed(), name);
    }
    println!("{}: {}", "Output".bold(), report.output_dir.display());
}

fn cmd_info(input: &Path) -> Result<(), Box<dyn std::error::Error>> {
    // Lenient so a damaged page still lets the rest be inspected
    let outliner = Outliner::new().lenient();
    let analysis = outliner.analyze_file(input)?;

    println!("{}", "Document Outline".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());
    println!("{}: {}", "File".bold(), input.display());
    println!("{}: {}", "Title".bold(), analysis.outline.title);
    println!("{}: {}", "Pages".bold(), analysis.pages.len());
    println!("{}: {}", "Candidates".bold(), analysis.candidates.len());
    println!("{}: {}", "Headings".bold(), analysis.outline.len());

    println!();
    println!("{}", "Pages".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());
    for page in &analysis.pages {
        let body = match &page.profile {
            Some(profile) => format!("{}pt {}", profile.body_size, profile.body_font),
            None => "no text".dimmed().to_string(),
        };
        println!(
            "{:>4}  {}  lines {}, tables {}, candidates {}",
            page.page, body, page.lines, page.table_lines, page.candidates
        );
    }

    if !analysis.outline.is_empty() {
        println!();
        println!("{}", "Headings".cyan().bold());
        println!("{}", "─".repeat(40).dimmed());
        for entry in &analysis.outline.outline {
            let indent = "  ".repeat(entry.level.rank().unwrap_or(1).saturating_sub(1) as usize);
            println!(
                "{}{} {} {}",
                indent,
                entry.level.to_string().bold(),
                entry.text,
                format!("(p. {})", entry.page).dimmed()
            );
        }
    }

    Ok(())
}

fn cmd_version() {
    println!("{} {}", "pdfoutline".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("PDF title and heading outline extraction tool");
    println!();
    println!("License: MIT");
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}
