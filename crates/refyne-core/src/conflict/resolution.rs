//! Conflict resolution policies
//!
//! Resolution is a function of the conflict kind and a configured policy.
//! Identical conflicts always dedup to the earlier operation; adjacency is
//! allowed through unless configured otherwise; everything else dispatches on
//! the policy. All outcomes carry a human-readable reason so the audit trail
//! explains why an otherwise-valid fix was not applied.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use super::classify::ConflictKind;
use super::IndexedOperation;
use crate::error::RefyneError;
use crate::fix::{FixAction, FixOperation};

/// Policy governing how classified conflicts are resolved
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ResolutionStrategy {
    /// Keep the higher-priority side of each conflict
    #[default]
    SkipLowerPriority,
    /// Drop both sides of every conflict
    SkipAllConflicts,
    /// Merge compatible deletions; otherwise keep the higher-priority side
    MergeWhenPossible,
}

impl std::fmt::Display for ResolutionStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ResolutionStrategy::SkipLowerPriority => "skip-lower-priority",
            ResolutionStrategy::SkipAllConflicts => "skip-all-conflicts",
            ResolutionStrategy::MergeWhenPossible => "merge-when-possible",
        };
        write!(f, "{name}")
    }
}

impl FromStr for ResolutionStrategy {
    type Err = RefyneError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "skip-lower-priority" => Ok(ResolutionStrategy::SkipLowerPriority),
            "skip-all-conflicts" => Ok(ResolutionStrategy::SkipAllConflicts),
            "merge-when-possible" => Ok(ResolutionStrategy::MergeWhenPossible),
            other => Err(RefyneError::config_error(format!(
                "unknown resolution strategy '{other}'"
            ))),
        }
    }
}

impl ResolutionStrategy {
    /// Parse a strategy name from configuration, falling back to
    /// `skip-all-conflicts` when the name is unrecognized.
    ///
    /// Fail safe: when in doubt, apply nothing rather than risk corrupting a
    /// file. Callers that want the parse error instead use [`FromStr`].
    pub fn from_config_name(name: &str) -> Self {
        name.parse().unwrap_or_else(|err| {
            tracing::warn!("{err}; falling back to skip-all-conflicts");
            ResolutionStrategy::SkipAllConflicts
        })
    }
}

/// The decided disposition of a conflict
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ResolutionAction {
    /// Keep the lower-indexed side, skip the other
    KeepFirst,
    /// Keep the higher-indexed side, skip the other
    KeepSecond,
    /// Skip both sides
    SkipBoth,
    /// Replace both sides with one synthesized operation
    Merge,
    /// Both sides proceed
    Allow,
}

/// The decided outcome for one conflict
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resolution {
    pub action: ResolutionAction,
    /// Human-readable explanation, surfaced in the skipped list
    pub reason: String,
    /// Batch index of the winning operation, where one side wins
    pub winner: Option<usize>,
    /// Batch index of the losing operation, where one side wins
    pub loser: Option<usize>,
    /// Synthesized replacement operation, for merges only
    pub merged: Option<FixOperation>,
}

/// Resolve one classified conflict under the configured policy.
///
/// `a` is always the lower batch index by construction of the pairwise scan,
/// which is what makes the equal-priority tie-break ("first wins")
/// deterministic. That tie-break is intended behavior, not an accident of
/// iteration order.
pub(crate) fn resolve_conflict(
    kind: ConflictKind,
    a: &IndexedOperation,
    b: &IndexedOperation,
    strategy: ResolutionStrategy,
    treat_adjacent_as_conflict: bool,
) -> Resolution {
    if kind == ConflictKind::Identical {
        return Resolution {
            action: ResolutionAction::KeepFirst,
            reason: format!(
                "duplicate {} fix at the same location; keeping the earlier operation",
                a.operation.action_name()
            ),
            winner: Some(a.index),
            loser: Some(b.index),
            merged: None,
        };
    }

    // Under merge-when-possible, compatible deletions merge even when their
    // ranges are merely adjacent; the adjacency allowance below only applies
    // to pairs that cannot merge.
    if strategy == ResolutionStrategy::MergeWhenPossible
        && let Some(resolution) = try_merge_deletes(a, b)
    {
        return resolution;
    }

    if kind == ConflictKind::Adjacent && !treat_adjacent_as_conflict {
        return Resolution {
            action: ResolutionAction::Allow,
            reason: "adjacent ranges do not share lines; both fixes can be applied".to_string(),
            winner: None,
            loser: None,
            merged: None,
        };
    }

    match strategy {
        ResolutionStrategy::SkipAllConflicts => Resolution {
            action: ResolutionAction::SkipBoth,
            reason: format!("{kind} conflict; skip-all-conflicts drops both fixes"),
            winner: None,
            loser: None,
            merged: None,
        },
        ResolutionStrategy::SkipLowerPriority | ResolutionStrategy::MergeWhenPossible => {
            keep_higher_priority(kind, a, b)
        }
    }
}

/// Keep the higher-priority side; ties favor the side encountered first.
fn keep_higher_priority(
    kind: ConflictKind,
    a: &IndexedOperation,
    b: &IndexedOperation,
) -> Resolution {
    let (action, winner, loser) = if b.priority > a.priority {
        (ResolutionAction::KeepSecond, b, a)
    } else {
        (ResolutionAction::KeepFirst, a, b)
    };
    Resolution {
        action,
        reason: format!(
            "{kind} conflict; higher-priority fix wins ({} vs {})",
            winner.priority, loser.priority
        ),
        winner: Some(winner.index),
        loser: Some(loser.index),
        merged: None,
    }
}

/// Merge two delete operations into one `replace-range` deleting the union
/// span, when their ranges are touching or overlapping.
///
/// Mergeable test: the union span may be at most one line larger than the sum
/// of the individual sizes. Anything wider would swallow untouched lines.
fn try_merge_deletes(a: &IndexedOperation, b: &IndexedOperation) -> Option<Resolution> {
    if a.operation.action != FixAction::DeleteLine || b.operation.action != FixAction::DeleteLine {
        return None;
    }
    let range_a = a.range?;
    let range_b = b.range?;
    let union = range_a.union(&range_b);
    if union.line_count() > range_a.line_count() + range_b.line_count() + 1 {
        return None;
    }

    let original_text = match (&a.operation.original_text, &b.operation.original_text) {
        (Some(first), Some(second)) => Some(format!("{first}\n{second}")),
        (Some(text), None) | (None, Some(text)) => Some(text.clone()),
        (None, None) => None,
    };
    let mut merged = FixOperation::new(FixAction::ReplaceRange, a.operation.file.clone())
        .at_line(union.start)
        .to_line(union.end)
        .with_replacement("");
    merged.original_text = original_text;

    Some(Resolution {
        action: ResolutionAction::Merge,
        reason: format!("merged two delete operations into one deletion of {union}"),
        winner: None,
        loser: None,
        merged: Some(merged),
    })
}
