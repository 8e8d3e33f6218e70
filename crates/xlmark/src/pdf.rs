//! PDF stage: hand the rendered HTML to an external HTML-to-PDF engine
//!
//! The engine is a trait so callers can plug in their own renderer; the
//! bundled [`CommandPdfEngine`] pipes the document through a command-line
//! tool (`wkhtmltopdf` by default) over stdin/stdout.

use std::fmt;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::{Command, ExitStatus, Stdio};
use std::str::FromStr;

use thiserror::Error;

/// Program launched when no explicit engine path is configured
pub const DEFAULT_PDF_PROGRAM: &str = "wkhtmltopdf";

/// Errors from the PDF engine
#[derive(Debug, Error)]
pub enum PdfError {
    /// The engine executable could not be found
    #[error("PDF engine not found: {}", .0.display())]
    NotFound(PathBuf),

    /// The engine process could not be started
    #[error("Failed to start PDF engine: {0}")]
    Spawn(#[source] io::Error),

    /// The engine exited unsuccessfully
    #[error("PDF engine exited with {status}: {stderr}")]
    Failed { status: ExitStatus, stderr: String },

    /// The engine succeeded but produced no document
    #[error("PDF engine produced no output")]
    EmptyOutput,

    /// Unknown page size name
    #[error("Unknown page size: {0}")]
    UnknownPageSize(String),

    /// IO error while talking to the engine
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// Paper sizes supported by the PDF stage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PageSize {
    /// 420 × 594 mm, wide enough for most sheets without scaling
    #[default]
    A2,
    A3,
    A4,
    Letter,
}

impl PageSize {
    pub fn name(self) -> &'static str {
        match self {
            PageSize::A2 => "A2",
            PageSize::A3 => "A3",
            PageSize::A4 => "A4",
            PageSize::Letter => "Letter",
        }
    }

    /// Portrait width and height in millimetres
    pub fn dimensions_mm(self) -> (f64, f64) {
        match self {
            PageSize::A2 => (420.0, 594.0),
            PageSize::A3 => (297.0, 420.0),
            PageSize::A4 => (210.0, 297.0),
            PageSize::Letter => (215.9, 279.4),
        }
    }
}

impl fmt::Display for PageSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PageSize {
    type Err = PdfError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "a2" => Ok(PageSize::A2),
            "a3" => Ok(PageSize::A3),
            "a4" => Ok(PageSize::A4),
            "letter" => Ok(PageSize::Letter),
            _ => Err(PdfError::UnknownPageSize(s.to_string())),
        }
    }
}

/// Renders an HTML document to PDF bytes
pub trait PdfEngine {
    /// Render `html` on pages of size `page`, writing the PDF to `out`
    fn render(&self, html: &[u8], page: PageSize, out: &mut dyn Write) -> Result<(), PdfError>;
}

/// Configuration for [`CommandPdfEngine`]
#[derive(Debug, Clone, Default)]
pub struct PdfEngineConfig {
    /// Path to the engine executable (searched on `PATH` as
    /// [`DEFAULT_PDF_PROGRAM`] if `None`)
    pub program: Option<PathBuf>,
    /// Extra arguments placed before the input/output operands
    pub extra_args: Vec<String>,
}

/// A [`PdfEngine`] backed by an external process reading HTML on stdin and
/// writing PDF on stdout
#[derive(Debug, Clone, Default)]
pub struct CommandPdfEngine {
    config: PdfEngineConfig,
}

impl CommandPdfEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: PdfEngineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PdfEngineConfig {
        &self.config
    }

    fn program(&self) -> PathBuf {
        self.config
            .program
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_PDF_PROGRAM))
    }

    fn args(&self, page: PageSize) -> Vec<String> {
        let mut args = vec![
            "--page-size".to_string(),
            page.name().to_string(),
            "--quiet".to_string(),
        ];
        args.extend(self.config.extra_args.iter().cloned());
        args.push("-".to_string());
        args.push("-".to_string());
        args
    }
}

impl PdfEngine for CommandPdfEngine {
    fn render(&self, html: &[u8], page: PageSize, out: &mut dyn Write) -> Result<(), PdfError> {
        let program = self.program();
        let args = self.args(page);
        tracing::info!(program = %program.display(), ?args, "starting PDF engine");

        let mut child = Command::new(&program)
            .args(&args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| {
                if e.kind() == io::ErrorKind::NotFound {
                    PdfError::NotFound(program.clone())
                } else {
                    PdfError::Spawn(e)
                }
            })?;

        let mut stdin = child.stdin.take().ok_or_else(|| {
            PdfError::Io(io::Error::new(io::ErrorKind::BrokenPipe, "engine stdin unavailable"))
        })?;

        // stdin is fed from its own thread so a full stdout pipe cannot stall the engine
        let (output, fed) = std::thread::scope(|scope| {
            let feeder = scope.spawn(move || stdin.write_all(html));
            let output = child.wait_with_output();
            let fed = feeder.join().unwrap_or_else(|_| {
                Err(io::Error::new(io::ErrorKind::Other, "stdin writer panicked"))
            });
            (output, fed)
        });
        let output = output?;

        if !output.status.success() {
            return Err(PdfError::Failed {
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        if let Err(e) = fed {
            if e.kind() != io::ErrorKind::BrokenPipe {
                return Err(PdfError::Io(e));
            }
        }
        if output.stdout.is_empty() {
            return Err(PdfError::EmptyOutput);
        }

        tracing::debug!(bytes = output.stdout.len(), "PDF engine finished");
        out.write_all(&output.stdout)?;
        Ok(())
    }
}
