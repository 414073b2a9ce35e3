//! Issue model shared between analyzers and the conflict engine
//!
//! Analyzers inspect source files and emit [`Issue`]s paired with proposed
//! fix operations. The conflict engine treats issues as read-only input: it
//! never re-inspects the source, it only uses the category, severity, and
//! message as priority signals.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Severity of a detected issue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
    Info,
}

/// Category of a detected issue
///
/// Categories map one-to-one onto the analyzers that produce them; the
/// engine only consults them when deriving fix difficulty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum IssueCategory {
    Lint,
    TypeSafety,
    HardcodedValue,
    Documentation,
    Complexity,
    SingleResponsibility,
    MixedConcerns,
    Size,
    CircularDependency,
    Composite,
    AgentAssisted,
    StructuralRefinement,
}

/// An immutable description of a detected problem
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    /// File the issue was detected in
    pub file: PathBuf,
    /// 1-based line number, if the issue is anchored to a line
    pub line: Option<u32>,
    /// Analyzer category that produced this issue
    pub category: IssueCategory,
    /// Severity of the issue
    pub severity: Severity,
    /// Human-readable description
    pub message: String,
}

impl Issue {
    /// Create a new issue without a line anchor
    pub fn new(
        file: impl Into<PathBuf>,
        category: IssueCategory,
        severity: Severity,
        message: impl Into<String>,
    ) -> Self {
        Self {
            file: file.into(),
            line: None,
            category,
            severity,
            message: message.into(),
        }
    }

    /// Anchor the issue to a 1-based line number
    pub fn with_line(mut self, line: u32) -> Self {
        self.line = Some(line);
        self
    }
}
