use colored::Colorize;
use serde::Serialize;
use std::path::Path;
use xml_indent::{Error, Violation};

/// What a finding is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FindingKind {
    Indent,
    Parse,
    Io,
}

/// One reported line: a violation, or a file that could not be checked.
#[derive(Debug, Clone, Serialize)]
pub struct Finding {
    pub file: String,
    pub line: usize,
    pub column: usize,
    pub message: String,
    pub kind: FindingKind,
}

impl Finding {
    pub fn from_violation(file: &Path, violation: Violation) -> Self {
        Self {
            file: file.display().to_string(),
            line: violation.line,
            column: violation.column,
            message: violation.message,
            kind: FindingKind::Indent,
        }
    }

    /// A file-level finding for a document that could not be checked.
    ///
    /// Returns `None` for errors that are not about the document itself.
    pub fn from_error(file: &Path, error: &Error) -> Option<Self> {
        let (line, column, message, kind) = match error {
            Error::XmlSyntax {
                message,
                line,
                column,
            } => (
                *line,
                *column,
                format!("XML parse error: {}", message),
                FindingKind::Parse,
            ),
            Error::Io { source, .. } => (0, 0, format!("I/O error: {}", source), FindingKind::Io),
            Error::UnbalancedEndElement { .. } | Error::InvalidIndentSize(_) => return None,
        };
        Some(Self {
            file: file.display().to_string(),
            line,
            column,
            message,
            kind,
        })
    }

    /// `path:line:col: message`
    pub fn to_plain(&self) -> String {
        format!("{}:{}:{}: {}", self.file, self.line, self.column, self.message)
    }
}

/// Totals for one run.
#[derive(Debug, Default)]
pub struct Summary {
    pub files: usize,
    pub files_with_findings: usize,
    pub violations: usize,
    pub unreadable: usize,
}

impl Summary {
    pub fn record(&mut self, findings: &[Finding]) {
        self.files += 1;
        if !findings.is_empty() {
            self.files_with_findings += 1;
        }
        for finding in findings {
            match finding.kind {
                FindingKind::Indent => self.violations += 1,
                FindingKind::Parse | FindingKind::Io => self.unreadable += 1,
            }
        }
    }

    pub fn is_clean(&self) -> bool {
        self.files_with_findings == 0
    }
}

pub fn print_summary(summary: &Summary) {
    println!("\n{}", "=== Summary ===".bold());
    println!("Files checked:       {}", summary.files);
    println!(
        "Files with findings: {} {}",
        summary.files_with_findings,
        if summary.is_clean() {
            "✓".green()
        } else {
            "✗".red()
        }
    );
    println!("Indent violations:   {}", summary.violations);
    if summary.unreadable > 0 {
        println!("Unchecked files:     {} {}", summary.unreadable, "✗".red());
    }
}
