//! Validation report types for structured error reporting.
//!
//! Relational, required-field and schema findings all share the same shape
//! so they can be aggregated into one report.

use std::fmt;

use serde::{Serialize, Serializer};

use crate::error::FdlError;

/// The result of validating a document.
#[derive(Clone, Debug, Default, Serialize)]
pub struct ValidationReport {
    /// All issues found during validation.
    pub issues: Vec<ValidationIssue>,
}

impl ValidationReport {
    pub fn new() -> Self {
        Self { issues: Vec::new() }
    }

    pub fn add(&mut self, issue: ValidationIssue) {
        self.issues.push(issue);
    }

    /// Returns the number of errors in the report.
    pub fn error_count(&self) -> usize {
        self.issues
            .iter()
            .filter(|i| i.severity == Severity::Error)
            .count()
    }

    /// Returns the number of warnings in the report.
    pub fn warning_count(&self) -> usize {
        self.issues
            .iter()
            .filter(|i| i.severity == Severity::Warning)
            .count()
    }

    /// Returns true if there are no errors.
    pub fn is_ok(&self) -> bool {
        self.error_count() == 0
    }

    /// Returns true if there are no issues at all.
    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }

    /// True if any issue carries `code`.
    pub fn has(&self, code: IssueCode) -> bool {
        self.issues.iter().any(|i| i.code == code)
    }

    /// Converts the report into `Err(FdlError::ValidationFailed)` if it
    /// holds any error.
    pub fn into_result(self) -> Result<(), FdlError> {
        if self.is_ok() {
            return Ok(());
        }
        Err(FdlError::ValidationFailed {
            error_count: self.error_count(),
            warning_count: self.warning_count(),
            report: self,
        })
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.issues.is_empty() {
            return writeln!(f, "Validation passed: no issues found");
        }

        writeln!(
            f,
            "Validation completed with {} error(s) and {} warning(s):",
            self.error_count(),
            self.warning_count()
        )?;
        writeln!(f)?;

        for issue in &self.issues {
            writeln!(f, "  {}", issue)?;
        }

        Ok(())
    }
}

/// A single validation issue (error or warning).
#[derive(Clone, Debug, Serialize)]
pub struct ValidationIssue {
    pub severity: Severity,

    /// A stable code for the issue type.
    pub code: IssueCode,

    /// A human-readable description of the issue.
    pub message: String,

    /// Where the issue occurred.
    #[serde(serialize_with = "serialize_display")]
    pub context: IssueContext,
}

impl ValidationIssue {
    pub fn new(
        severity: Severity,
        code: IssueCode,
        message: impl Into<String>,
        context: IssueContext,
    ) -> Self {
        Self {
            severity,
            code,
            message: message.into(),
            context,
        }
    }

    pub fn error(code: IssueCode, message: impl Into<String>, context: IssueContext) -> Self {
        Self::new(Severity::Error, code, message, context)
    }

    pub fn warning(code: IssueCode, message: impl Into<String>, context: IssueContext) -> Self {
        Self::new(Severity::Warning, code, message, context)
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let severity = match self.severity {
            Severity::Error => "ERROR",
            Severity::Warning => "WARN ",
        };
        write!(
            f,
            "[{}] {:?} in {}: {}",
            severity, self.code, self.context, self.message
        )
    }
}

fn serialize_display<T: fmt::Display, S: Serializer>(value: &T, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(value)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Suspicious but still a valid document.
    Warning,
    /// The document is invalid.
    Error,
}

/// A stable code identifying the type of validation issue.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueCode {
    // Identifier uniqueness
    DuplicateFramingIntentId,
    DuplicateContextLabel,
    DuplicateCanvasId,
    DuplicateFramingDecisionId,
    DuplicateCanvasTemplateId,

    // Relations
    /// A canvas's `source_canvas_id` is neither its own id nor another
    /// canvas in the same context.
    UnresolvedSourceCanvas,
    /// A framing decision references a framing intent that does not exist.
    UnresolvedFramingIntent,
    /// The header's `default_framing_intent` does not exist.
    UnresolvedDefaultFramingIntent,

    // Structure
    /// A required field is absent.
    MissingRequired,
    /// No schema validator exists for the document's version.
    UnsupportedSchemaVersion,
    /// A value has the wrong type or is not an allowed option.
    SchemaViolation,
    /// Dimensions are zero, negative or not finite.
    InvalidDimensions,
    /// The document uuid is not a valid uuid.
    InvalidUuid,
    /// Protection outside `[0, 1)`.
    InvalidProtection,
}

/// Where a validation issue occurred.
#[derive(Clone, Debug, PartialEq)]
pub enum IssueContext {
    Document,
    FramingIntent { id: String },
    Context { label: String },
    Canvas { context: String, id: String },
    FramingDecision { canvas: String, id: String },
    CanvasTemplate { id: String },
    /// A location in the mapping form, e.g. `contexts[0].canvases[1]`.
    Path(String),
}

impl fmt::Display for IssueContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IssueContext::Document => write!(f, "document"),
            IssueContext::FramingIntent { id } => write!(f, "framing intent {:?}", id),
            IssueContext::Context { label } => write!(f, "context {:?}", label),
            IssueContext::Canvas { context, id } => {
                write!(f, "canvas {:?} (context {:?})", id, context)
            }
            IssueContext::FramingDecision { canvas, id } => {
                write!(f, "framing decision {:?} (canvas {:?})", id, canvas)
            }
            IssueContext::CanvasTemplate { id } => write!(f, "canvas template {:?}", id),
            IssueContext::Path(path) => write!(f, "{}", path),
        }
    }
}
