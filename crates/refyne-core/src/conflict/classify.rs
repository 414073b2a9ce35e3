//! Pairwise conflict classification
//!
//! Given two indexed operations on the same file, decide whether their
//! ranges interact and, if so, which conflict category applies. The relation
//! checks run in a fixed order (identical, nested, overlap, adjacent) so
//! every pair lands in exactly one bucket or in none.

use serde::{Deserialize, Serialize};

use super::IndexedOperation;

/// Category of a detected conflict between two fix operations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ConflictKind {
    /// Same range, same action, same replacement: a true duplicate
    Identical,
    /// Ranges share lines (or same range with different intent)
    Overlap,
    /// One range fully contains the other
    Nested,
    /// Ranges touch without sharing a line
    Adjacent,
    /// Two insertions at the same point with no defined order
    InsertCollision,
}

impl std::fmt::Display for ConflictKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ConflictKind::Identical => "identical",
            ConflictKind::Overlap => "overlap",
            ConflictKind::Nested => "nested",
            ConflictKind::Adjacent => "adjacent",
            ConflictKind::InsertCollision => "insert-collision",
        };
        write!(f, "{name}")
    }
}

/// Classify a candidate pair, or return `None` when the operations cannot
/// conflict.
///
/// Operations on different files never conflict, independent of ranges.
/// Operations without a line footprint (file-level actions, or a missing
/// required line) never conflict with anything.
pub(crate) fn classify_pair(a: &IndexedOperation, b: &IndexedOperation) -> Option<ConflictKind> {
    if a.operation.file != b.operation.file {
        return None;
    }
    let range_a = a.range?;
    let range_b = b.range?;

    if range_a == range_b {
        // Two inserts at the same point cannot both be applied without an
        // explicit order, even when their content is identical.
        if a.operation.action.is_insert() && a.operation.action == b.operation.action {
            return Some(ConflictKind::InsertCollision);
        }
        if a.operation.action == b.operation.action
            && a.operation.replacement == b.operation.replacement
        {
            return Some(ConflictKind::Identical);
        }
        // Same location, different intent.
        return Some(ConflictKind::Overlap);
    }
    if range_a.contains(&range_b) || range_b.contains(&range_a) {
        return Some(ConflictKind::Nested);
    }
    if range_a.overlaps(&range_b) {
        return Some(ConflictKind::Overlap);
    }
    if range_a.is_adjacent_to(&range_b) {
        return Some(ConflictKind::Adjacent);
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conflict::IndexedOperation;
    use crate::diagnostics::{Issue, IssueCategory, Severity};
    use crate::fix::{FixAction, FixOperation};

    fn indexed(index: usize, operation: FixOperation) -> IndexedOperation {
        let issue = Issue::new(
            operation.file.clone(),
            IssueCategory::Lint,
            Severity::Warning,
            "test issue",
        );
        let range = operation.line_range();
        IndexedOperation {
            index,
            issue,
            operation,
            priority: 0,
            range,
        }
    }

    fn delete(file: &str, line: u32) -> FixOperation {
        FixOperation::new(FixAction::DeleteLine, file).at_line(line)
    }

    #[test]
    fn test_different_files_never_conflict() {
        let a = indexed(0, delete("src/a.ts", 5));
        let b = indexed(1, delete("src/b.ts", 5));
        assert_eq!(classify_pair(&a, &b), None);
    }

    #[test]
    fn test_rangeless_operations_never_conflict() {
        let a = indexed(0, FixOperation::new(FixAction::SplitFile, "src/a.ts"));
        let b = indexed(1, delete("src/a.ts", 5));
        assert_eq!(classify_pair(&a, &b), None);
        assert_eq!(classify_pair(&b, &a), None);

        let missing = indexed(2, FixOperation::new(FixAction::DeleteLine, "src/a.ts"));
        assert_eq!(classify_pair(&missing, &b), None);
    }

    #[test]
    fn test_true_duplicates_are_identical() {
        let a = indexed(
            0,
            FixOperation::new(FixAction::ReplaceLine, "src/a.ts")
                .at_line(5)
                .with_replacement("const x = 1;"),
        );
        let b = indexed(
            1,
            FixOperation::new(FixAction::ReplaceLine, "src/a.ts")
                .at_line(5)
                .with_replacement("const x = 1;"),
        );
        assert_eq!(classify_pair(&a, &b), Some(ConflictKind::Identical));
    }

    #[test]
    fn test_same_range_different_action_is_overlap() {
        // delete-line vs insert-after on the same line: same location,
        // different intent, never allowed through as-is.
        let a = indexed(0, delete("src/a.ts", 5));
        let b = indexed(
            1,
            FixOperation::new(FixAction::InsertAfter, "src/a.ts").at_line(5),
        );
        assert_eq!(classify_pair(&a, &b), Some(ConflictKind::Overlap));
    }

    #[test]
    fn test_same_range_different_replacement_is_overlap() {
        let a = indexed(
            0,
            FixOperation::new(FixAction::ReplaceLine, "src/a.ts")
                .at_line(5)
                .with_replacement("const x = 1;"),
        );
        let b = indexed(
            1,
            FixOperation::new(FixAction::ReplaceLine, "src/a.ts")
                .at_line(5)
                .with_replacement("let x = 1;"),
        );
        assert_eq!(classify_pair(&a, &b), Some(ConflictKind::Overlap));
    }

    #[test]
    fn test_inserts_at_same_point_collide() {
        let a = indexed(
            0,
            FixOperation::new(FixAction::InsertBefore, "src/a.ts")
                .at_line(5)
                .with_replacement("import a;"),
        );
        let b = indexed(
            1,
            FixOperation::new(FixAction::InsertBefore, "src/a.ts")
                .at_line(5)
                .with_replacement("import a;"),
        );
        assert_eq!(classify_pair(&a, &b), Some(ConflictKind::InsertCollision));
    }

    #[test]
    fn test_containment_is_nested() {
        let outer = indexed(
            0,
            FixOperation::new(FixAction::ReplaceRange, "src/a.ts")
                .at_line(10)
                .to_line(20),
        );
        let inner = indexed(
            1,
            FixOperation::new(FixAction::ReplaceLine, "src/a.ts").at_line(15),
        );
        assert_eq!(classify_pair(&outer, &inner), Some(ConflictKind::Nested));
        assert_eq!(classify_pair(&inner, &outer), Some(ConflictKind::Nested));
    }

    #[test]
    fn test_partial_overlap() {
        let a = indexed(
            0,
            FixOperation::new(FixAction::ReplaceRange, "src/a.ts")
                .at_line(1)
                .to_line(5),
        );
        let b = indexed(
            1,
            FixOperation::new(FixAction::ReplaceRange, "src/a.ts")
                .at_line(4)
                .to_line(8),
        );
        assert_eq!(classify_pair(&a, &b), Some(ConflictKind::Overlap));
    }

    #[test]
    fn test_touching_ranges_are_adjacent() {
        let a = indexed(0, delete("src/a.ts", 5));
        let b = indexed(1, delete("src/a.ts", 6));
        assert_eq!(classify_pair(&a, &b), Some(ConflictKind::Adjacent));
    }

    #[test]
    fn test_separated_ranges_do_not_conflict() {
        let a = indexed(0, delete("src/a.ts", 5));
        let b = indexed(1, delete("src/a.ts", 7));
        assert_eq!(classify_pair(&a, &b), None);
    }
}
