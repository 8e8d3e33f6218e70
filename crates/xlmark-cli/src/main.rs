//! xlmark CLI - spreadsheet to HTML/PDF conversion tool

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;
use xlmark::prelude::*;
use xlmark::{PdfEngineConfig, PaneInfo};

#[derive(Parser)]
#[command(name = "xlmark")]
#[command(author, version, about = "Render Excel workbooks as HTML or PDF")]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace); RUST_LOG takes precedence
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a sheet as HTML to stdout or a file
    Html {
        /// Input spreadsheet file (xls, xlsx)
        input: PathBuf,

        /// Output HTML file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Emit only the style block and table, without the document wrapper
        #[arg(long)]
        fragment: bool,

        /// Sheet index to convert (0-based, default: 0)
        #[arg(short, long, default_value = "0")]
        sheet: usize,

        /// Base stylesheet replacing the embedded one
        #[arg(long)]
        stylesheet: Option<PathBuf>,

        /// Add a row of column letters above the sheet
        #[arg(long)]
        column_headings: bool,
    },

    /// Render a sheet as HTML and convert it to PDF
    Pdf {
        /// Input spreadsheet file (xls, xlsx)
        input: PathBuf,

        /// Output PDF file
        #[arg(short, long)]
        output: PathBuf,

        /// HTML-to-PDF program (default: wkhtmltopdf on PATH)
        #[arg(long)]
        engine: Option<PathBuf>,

        /// Paper size: A2, A3, A4 or Letter
        #[arg(long, default_value = "A2")]
        page_size: PageSize,

        /// Sheet index to convert (0-based, default: 0)
        #[arg(short, long, default_value = "0")]
        sheet: usize,
    },

    /// Show information about a spreadsheet
    Info {
        /// Input spreadsheet file
        input: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Html {
            input,
            output,
            fragment,
            sheet,
            stylesheet,
            column_headings,
        } => {
            let mut config = RenderConfig::new()
                .with_full_document_wrapper(!fragment)
                .with_sheet_index(sheet)
                .with_column_headings(column_headings);
            if let Some(path) = stylesheet {
                config = config.with_base_stylesheet(path);
            }
            to_html(&input, output.as_deref(), config)
        }
        Commands::Pdf {
            input,
            output,
            engine,
            page_size,
            sheet,
        } => to_pdf(&input, &output, engine, page_size, sheet),
        Commands::Info { input } => show_info(&input),
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn to_html(input: &Path, output: Option<&Path>, config: RenderConfig) -> Result<()> {
    if let Some(output_path) = output {
        xlmark::convert_to_html(input, output_path, &config).with_context(|| {
            format!(
                "Failed to convert '{}' to '{}'",
                input.display(),
                output_path.display()
            )
        })?;
        eprintln!("Wrote '{}'", output_path.display());
        return Ok(());
    }

    let workbook = xlmark::open_workbook(input)
        .with_context(|| format!("Failed to open '{}'", input.display()))?;
    let stdout = io::stdout();
    HtmlConverter::with_config(&workbook, config)
        .convert(stdout.lock())
        .context("Failed to write HTML to stdout")?;
    io::stdout().flush().context("Failed to flush stdout")?;
    Ok(())
}

fn to_pdf(
    input: &Path,
    output: &Path,
    program: Option<PathBuf>,
    page: PageSize,
    sheet: usize,
) -> Result<()> {
    let engine = CommandPdfEngine::with_config(PdfEngineConfig {
        program,
        extra_args: Vec::new(),
    });
    let config = RenderConfig::new().with_sheet_index(sheet);

    xlmark::convert_to_pdf_sized(input, output, &engine, &config, page).with_context(|| {
        format!(
            "Failed to convert '{}' to '{}'",
            input.display(),
            output.display()
        )
    })?;
    eprintln!("Wrote {} PDF to '{}'", page, output.display());
    Ok(())
}

fn show_info(input: &Path) -> Result<()> {
    let workbook = xlmark::open_workbook(input)
        .with_context(|| format!("Failed to open '{}'", input.display()))?;

    println!("File: {}", input.display());
    println!("Color model: {:?}", workbook.color_model());
    println!("Styles: {}", workbook.styles().len());
    println!("Fonts: {}", workbook.fonts().len());
    println!("Sheets: {}", workbook.sheet_count());

    for (i, sheet) in workbook.sheets().enumerate() {
        println!();
        println!("  Sheet {}: \"{}\"", i, sheet.name());
        println!("    Rows: {}", sheet.row_count());

        let merged = sheet.merged_regions();
        if merged.is_empty() {
            println!("    Merged regions: none");
        } else {
            let ranges: Vec<String> = merged.iter().map(|r| r.to_string()).collect();
            println!("    Merged regions: {}", ranges.join(", "));
        }

        match sheet.pane() {
            Some(pane) => println!("    Pane: {}", describe_pane(pane)),
            None => println!("    Pane: none"),
        }
    }

    Ok(())
}

fn describe_pane(pane: &PaneInfo) -> String {
    format!(
        "{} at row {}, column {} (active pane {})",
        if pane.frozen { "frozen" } else { "split" },
        pane.split_row,
        pane.split_col,
        pane.active_pane
    )
}
