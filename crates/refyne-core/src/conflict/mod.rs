//! Fix-operation conflict detection and resolution
//!
//! Analyzers emit fix operations independently, so overlapping edits are
//! common, and applying two overlapping edits verbatim corrupts the file.
//! This module takes a batch of (issue, operation) pairs and deterministically
//! partitions it into operations that are safe to apply together, operations
//! to skip (with reasons), and merged replacements.
//!
//! The engine is a pure decision function: it performs no I/O, never judges
//! an edit's content, and has no state between invocations. Concurrent
//! callers resolving different batches need no locking.
//!
//! Pipeline: raw edits -> normalized + prioritized edits -> pairwise
//! conflicts -> resolutions -> final partition.

pub mod classify;
pub mod priority;
pub mod range;
pub mod resolution;

pub use classify::ConflictKind;
pub use priority::{FixDifficulty, PriorityCalculator, PriorityFn, PriorityTables};
pub use range::LineRange;
pub use resolution::{Resolution, ResolutionAction, ResolutionStrategy};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, trace};

use crate::diagnostics::Issue;
use crate::error::RefyneError;
use crate::fix::FixOperation;
use crate::result::Result;

/// Options governing one conflict-resolution pass
#[derive(Clone, Default)]
pub struct ResolverOptions {
    /// Policy applied to classified conflicts
    pub strategy: ResolutionStrategy,
    /// Whether adjacency itself counts as a conflict (default: no)
    pub treat_adjacent_as_conflict: bool,
    /// Caller-supplied replacement for the default priority formula
    pub priority_fn: Option<Arc<dyn PriorityFn>>,
}

impl std::fmt::Debug for ResolverOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResolverOptions")
            .field("strategy", &self.strategy)
            .field("treat_adjacent_as_conflict", &self.treat_adjacent_as_conflict)
            .field("priority_fn", &self.priority_fn.as_ref().map(|_| "<fn>"))
            .finish()
    }
}

impl ResolverOptions {
    /// Create options for a named strategy
    pub fn new(strategy: ResolutionStrategy) -> Self {
        Self {
            strategy,
            ..Default::default()
        }
    }

    /// Options that drop both sides of every conflict
    pub fn skip_all_conflicts() -> Self {
        Self::new(ResolutionStrategy::SkipAllConflicts)
    }

    /// Options that merge compatible deletions
    pub fn merge_when_possible() -> Self {
        Self::new(ResolutionStrategy::MergeWhenPossible)
    }

    /// Treat adjacent ranges as conflicting
    pub fn with_adjacent_conflicts(mut self) -> Self {
        self.treat_adjacent_as_conflict = true;
        self
    }

    /// Inject a replacement priority function
    pub fn with_priority_fn(mut self, priority_fn: Arc<dyn PriorityFn>) -> Self {
        self.priority_fn = Some(priority_fn);
        self
    }
}

/// An (issue, operation) pair annotated with its batch position, computed
/// priority, and normalized line footprint.
///
/// Created once per batch and never mutated; the batch position gives stable
/// output ordering and excludes self-pairing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexedOperation {
    /// Position in the original batch
    pub index: usize,
    /// The issue this operation fixes
    pub issue: Issue,
    /// The proposed edit
    pub operation: FixOperation,
    /// Computed importance score; higher wins conflicts
    pub priority: i32,
    /// Normalized line footprint, `None` for file-level or line-less edits
    pub range: Option<LineRange>,
}

/// A classified, resolved interaction between two operations on one file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Conflict {
    pub kind: ConflictKind,
    /// The lower-indexed side
    pub first: IndexedOperation,
    /// The higher-indexed side
    pub second: IndexedOperation,
    pub resolution: Resolution,
}

impl Conflict {
    /// Human-readable one-liner for audit output
    pub fn describe(&self) -> String {
        format!(
            "{} conflict in {}: {} #{} vs {} #{} -> {}",
            self.kind,
            self.first.operation.file.display(),
            self.first.operation.action_name(),
            self.first.index,
            self.second.operation.action_name(),
            self.second.index,
            self.resolution.reason
        )
    }
}

/// An operation excluded from the applicable set, with every reason recorded
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedOperation {
    /// Position in the original batch
    pub index: usize,
    pub issue: Issue,
    pub operation: FixOperation,
    /// One entry per conflict that caused this skip
    pub reasons: Vec<String>,
    /// Batch indices of the operations this one conflicted with
    pub conflicted_with: Vec<usize>,
}

/// Summary counts for one resolution pass.
///
/// `applicable + skipped` may differ from `total` accounting-wise only via
/// `merged`: a merge collapses two inputs into one synthesized output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolutionStats {
    pub total: usize,
    pub applicable: usize,
    pub skipped: usize,
    pub merged: usize,
    pub conflicts: usize,
}

/// Terminal output of a conflict-resolution pass.
///
/// Constructed fresh on every invocation; the engine never persists it. The
/// file-apply stage must treat `applicable` plus `merged` as the complete,
/// non-overlapping edit set for each file, applied bottom-up within a file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConflictResolutionResult {
    /// Operations safe to hand to the file-writer, in batch order
    pub applicable: Vec<IndexedOperation>,
    /// Operations excluded from application, in batch order
    pub skipped: Vec<SkippedOperation>,
    /// Synthesized operations, each replacing two skipped originals
    pub merged: Vec<FixOperation>,
    /// Full diagnostic detail for every classified conflict
    pub conflicts: Vec<Conflict>,
    pub stats: ResolutionStats,
}

impl ConflictResolutionResult {
    /// Serialize the result for report output
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self)
            .map_err(|err| RefyneError::serialization_error(err.to_string()))
    }
}

/// Per-index skip bookkeeping while folding resolutions
#[derive(Default)]
struct SkipRecord {
    reasons: Vec<String>,
    conflicted_with: Vec<usize>,
}

impl SkipRecord {
    fn record(&mut self, reason: &str, other: usize) {
        self.reasons.push(reason.to_string());
        if !self.conflicted_with.contains(&other) {
            self.conflicted_with.push(other);
        }
    }
}

/// The batch orchestrator: groups operations by file, classifies every
/// candidate pair once, resolves each conflict under the configured policy,
/// and folds the resolutions into the final partition.
#[derive(Debug, Clone, Default)]
pub struct ConflictResolver {
    tables: PriorityTables,
}

impl ConflictResolver {
    /// Create a resolver with the default score tables
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a resolver with custom score tables
    pub fn with_tables(tables: PriorityTables) -> Self {
        Self { tables }
    }

    /// Resolve one batch of proposed fixes.
    ///
    /// Within each file the scan compares every unordered pair once, O(n²)
    /// per file. That is a deliberate trade-off favoring simplicity; an
    /// interval tree would cut it to O(n log n) without changing any
    /// classification or resolution contract.
    pub fn resolve(
        &self,
        batch: &[(Issue, FixOperation)],
        options: &ResolverOptions,
    ) -> ConflictResolutionResult {
        let mut calculator = PriorityCalculator::new(self.tables.clone());
        if let Some(priority_fn) = &options.priority_fn {
            calculator = calculator.with_override(Arc::clone(priority_fn));
        }

        let indexed: Vec<IndexedOperation> = batch
            .iter()
            .enumerate()
            .map(|(index, (issue, operation))| IndexedOperation {
                index,
                issue: issue.clone(),
                operation: operation.clone(),
                priority: calculator.priority(issue, operation),
                range: operation.line_range(),
            })
            .collect();

        debug!(
            total = indexed.len(),
            strategy = %options.strategy,
            "resolving fix batch"
        );

        // Insertion-ordered grouping keeps conflict enumeration, and with it
        // the whole result, deterministic across runs.
        let mut by_file: IndexMap<PathBuf, Vec<usize>> = IndexMap::new();
        for op in &indexed {
            by_file
                .entry(op.operation.file.clone())
                .or_default()
                .push(op.index);
        }

        let mut conflicts = Vec::new();
        for (file, members) in &by_file {
            for i in 0..members.len() {
                for j in (i + 1)..members.len() {
                    let a = &indexed[members[i]];
                    let b = &indexed[members[j]];
                    let Some(kind) = classify::classify_pair(a, b) else {
                        continue;
                    };
                    let resolution = resolution::resolve_conflict(
                        kind,
                        a,
                        b,
                        options.strategy,
                        options.treat_adjacent_as_conflict,
                    );
                    trace!(
                        file = %file.display(),
                        first = a.index,
                        second = b.index,
                        kind = %kind,
                        outcome = ?resolution.action,
                        "classified conflict"
                    );
                    conflicts.push(Conflict {
                        kind,
                        first: a.clone(),
                        second: b.clone(),
                        resolution,
                    });
                }
            }
        }

        self.partition(indexed, conflicts)
    }

    /// Fold resolutions into the applicable / skipped / merged partition,
    /// preserving original batch order in every output list.
    fn partition(
        &self,
        indexed: Vec<IndexedOperation>,
        conflicts: Vec<Conflict>,
    ) -> ConflictResolutionResult {
        let mut skips: BTreeMap<usize, SkipRecord> = BTreeMap::new();
        let mut merged: Vec<FixOperation> = Vec::new();

        for conflict in &conflicts {
            let first = conflict.first.index;
            let second = conflict.second.index;
            let resolution = &conflict.resolution;
            match resolution.action {
                ResolutionAction::Allow => {}
                ResolutionAction::KeepFirst => {
                    skips
                        .entry(second)
                        .or_default()
                        .record(&resolution.reason, first);
                }
                ResolutionAction::KeepSecond => {
                    skips
                        .entry(first)
                        .or_default()
                        .record(&resolution.reason, second);
                }
                ResolutionAction::SkipBoth => {
                    skips
                        .entry(first)
                        .or_default()
                        .record(&resolution.reason, second);
                    skips
                        .entry(second)
                        .or_default()
                        .record(&resolution.reason, first);
                }
                ResolutionAction::Merge => {
                    skips
                        .entry(first)
                        .or_default()
                        .record(&resolution.reason, second);
                    skips
                        .entry(second)
                        .or_default()
                        .record(&resolution.reason, first);
                    if let Some(op) = &resolution.merged {
                        merged.push(op.clone());
                    }
                }
            }
        }

        let mut applicable = Vec::new();
        let mut skipped = Vec::new();
        for op in indexed.into_iter() {
            match skips.remove(&op.index) {
                Some(record) => skipped.push(SkippedOperation {
                    index: op.index,
                    issue: op.issue,
                    operation: op.operation,
                    reasons: record.reasons,
                    conflicted_with: record.conflicted_with,
                }),
                None => applicable.push(op),
            }
        }

        let stats = ResolutionStats {
            total: applicable.len() + skipped.len(),
            applicable: applicable.len(),
            skipped: skipped.len(),
            merged: merged.len(),
            conflicts: conflicts.len(),
        };
        debug!(?stats, "fix batch resolved");

        ConflictResolutionResult {
            applicable,
            skipped,
            merged,
            conflicts,
            stats,
        }
    }
}
