//! Priority scoring for fix operations
//!
//! Every operation gets a numeric importance score from three independent
//! signals: how risky the issue's fix is, how simple the edit action is, and
//! how narrow the edit's footprint is. Higher priority wins conflicts. The
//! score tables are configuration data owned by the calculator, and a caller
//! may inject a [`PriorityFn`] that fully replaces the formula.

use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::diagnostics::{Issue, IssueCategory};
use crate::fix::{FixAction, FixOperation};

/// Coarse risk classification of fixing an issue.
///
/// Difficulty is the dominant priority signal: a trivial fix always outranks
/// a risky one for the same action and range size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FixDifficulty {
    Trivial,
    Safe,
    Risky,
}

impl FixDifficulty {
    /// Derive difficulty from an issue's category and message keywords.
    pub fn classify(issue: &Issue) -> Self {
        let message = issue.message.to_ascii_lowercase();
        match issue.category {
            IssueCategory::Lint
                if message.contains("console")
                    || message.contains("debugger")
                    || message.contains("debug statement") =>
            {
                FixDifficulty::Trivial
            }
            IssueCategory::TypeSafety
                if message.contains("@ts-ignore")
                    || message.contains("@ts-expect-error")
                    || message.contains("suppression") =>
            {
                FixDifficulty::Safe
            }
            _ => FixDifficulty::Risky,
        }
    }

    /// Get a human-readable difficulty description
    pub fn describe(&self) -> &'static str {
        match self {
            FixDifficulty::Trivial => "trivial (mechanical removal, no semantic impact)",
            FixDifficulty::Safe => "safe (localized change, low semantic impact)",
            FixDifficulty::Risky => "risky (semantic change, requires review)",
        }
    }
}

impl std::fmt::Display for FixDifficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FixDifficulty::Trivial => write!(f, "trivial"),
            FixDifficulty::Safe => write!(f, "safe"),
            FixDifficulty::Risky => write!(f, "risky"),
        }
    }
}

/// Score tables for the default priority formula.
///
/// Injected at calculator construction so alternate scoring policies can be
/// expressed as data without touching the formula.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriorityTables {
    /// Score per fix difficulty
    pub trivial: i32,
    pub safe: i32,
    pub risky: i32,
    /// Score per action, favoring simple local edits over structural ones
    pub delete_line: i32,
    pub replace_line: i32,
    pub replace_range: i32,
    pub insert: i32,
    pub structural: i32,
    pub file_level: i32,
    /// Width of the specificity bonus: `max(0, width - range_size)`
    pub specificity_width: i32,
}

impl Default for PriorityTables {
    fn default() -> Self {
        Self {
            trivial: 100,
            safe: 50,
            risky: 10,
            delete_line: 30,
            replace_line: 25,
            replace_range: 20,
            insert: 15,
            structural: 10,
            file_level: 5,
            specificity_width: 20,
        }
    }
}

impl PriorityTables {
    /// Look up the difficulty component
    pub fn difficulty_score(&self, difficulty: FixDifficulty) -> i32 {
        match difficulty {
            FixDifficulty::Trivial => self.trivial,
            FixDifficulty::Safe => self.safe,
            FixDifficulty::Risky => self.risky,
        }
    }

    /// Look up the action component
    pub fn action_score(&self, action: FixAction) -> i32 {
        match action {
            FixAction::DeleteLine => self.delete_line,
            FixAction::ReplaceLine => self.replace_line,
            FixAction::ReplaceRange => self.replace_range,
            FixAction::InsertBefore | FixAction::InsertAfter => self.insert,
            FixAction::ExtractFunction | FixAction::WrapFunction => self.structural,
            FixAction::SplitFile | FixAction::MoveFile | FixAction::CreateBarrel => self.file_level,
        }
    }
}

/// Caller-supplied replacement for the default priority formula.
///
/// When injected, it fully overrides the formula; there is no blending.
pub trait PriorityFn: Send + Sync {
    fn priority(&self, issue: &Issue, operation: &FixOperation) -> i32;
}

impl<F> PriorityFn for F
where
    F: Fn(&Issue, &FixOperation) -> i32 + Send + Sync,
{
    fn priority(&self, issue: &Issue, operation: &FixOperation) -> i32 {
        self(issue, operation)
    }
}

/// Computes operation priorities from the configured tables, or from an
/// injected override function.
#[derive(Clone, Default)]
pub struct PriorityCalculator {
    tables: PriorityTables,
    override_fn: Option<Arc<dyn PriorityFn>>,
}

impl std::fmt::Debug for PriorityCalculator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PriorityCalculator")
            .field("tables", &self.tables)
            .field("override_fn", &self.override_fn.as_ref().map(|_| "<fn>"))
            .finish()
    }
}

impl PriorityCalculator {
    /// Create a calculator with custom score tables
    pub fn new(tables: PriorityTables) -> Self {
        Self {
            tables,
            override_fn: None,
        }
    }

    /// Replace the default formula with a caller-supplied function
    pub fn with_override(mut self, priority_fn: Arc<dyn PriorityFn>) -> Self {
        self.override_fn = Some(priority_fn);
        self
    }

    /// Compute the priority of one (issue, operation) pair.
    ///
    /// `difficulty_score + action_score + specificity_bonus`, where the bonus
    /// rewards edits that touch fewer lines. Ties are a defined behavior:
    /// equal-priority conflicts resolve by evaluation order, first index wins.
    pub fn priority(&self, issue: &Issue, operation: &FixOperation) -> i32 {
        if let Some(priority_fn) = &self.override_fn {
            return priority_fn.priority(issue, operation);
        }

        let difficulty = FixDifficulty::classify(issue);
        self.tables.difficulty_score(difficulty)
            + self.tables.action_score(operation.action)
            + self.specificity_bonus(operation)
    }

    /// `max(0, width - range_size)`; operations without an explicit line
    /// footprint count as touching a single line.
    fn specificity_bonus(&self, operation: &FixOperation) -> i32 {
        let range_size = operation
            .line_range()
            .map(|range| range.line_count() as i32)
            .unwrap_or(1);
        (self.tables.specificity_width - range_size).max(0)
    }
}
