//! Fix operations: proposed, not-yet-applied source edits
//!
//! A [`FixOperation`] is the unit the conflict engine decides over. It is an
//! edit anchored to a line range in one file (or to the file as a whole for
//! structural actions). The engine never judges whether the edit's content is
//! correct; it only reasons about where the edit lands.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::conflict::LineRange;

/// The kind of edit a fix operation performs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FixAction {
    DeleteLine,
    ReplaceLine,
    ReplaceRange,
    InsertBefore,
    InsertAfter,
    ExtractFunction,
    WrapFunction,
    SplitFile,
    MoveFile,
    CreateBarrel,
}

impl FixAction {
    /// File-level actions have no line footprint
    pub fn is_file_level(self) -> bool {
        matches!(
            self,
            FixAction::SplitFile | FixAction::MoveFile | FixAction::CreateBarrel
        )
    }

    /// Insertion actions add text at a point rather than replacing a span
    pub fn is_insert(self) -> bool {
        matches!(self, FixAction::InsertBefore | FixAction::InsertAfter)
    }
}

/// A proposed edit tied to one detected issue
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FixOperation {
    /// Edit kind
    pub action: FixAction,
    /// Target file
    pub file: PathBuf,
    /// 1-based starting line; absent for file-level actions
    pub line: Option<u32>,
    /// 1-based ending line; only meaningful for range actions
    pub end_line: Option<u32>,
    /// The original text displaced by this edit
    pub original_text: Option<String>,
    /// The replacement text, where applicable
    pub replacement: Option<String>,
}

impl FixOperation {
    /// Create a new operation with no line anchor
    pub fn new(action: FixAction, file: impl Into<PathBuf>) -> Self {
        Self {
            action,
            file: file.into(),
            line: None,
            end_line: None,
            original_text: None,
            replacement: None,
        }
    }

    /// Set the 1-based starting line
    pub fn at_line(mut self, line: u32) -> Self {
        self.line = Some(line);
        self
    }

    /// Set the 1-based ending line (range actions)
    pub fn to_line(mut self, end_line: u32) -> Self {
        self.end_line = Some(end_line);
        self
    }

    /// Set the displaced original text
    pub fn with_original_text(mut self, text: impl Into<String>) -> Self {
        self.original_text = Some(text.into());
        self
    }

    /// Set the replacement text
    pub fn with_replacement(mut self, text: impl Into<String>) -> Self {
        self.replacement = Some(text.into());
        self
    }

    /// Kebab-case action tag, matching the serialized form
    pub fn action_name(&self) -> &'static str {
        match self.action {
            FixAction::DeleteLine => "delete-line",
            FixAction::ReplaceLine => "replace-line",
            FixAction::ReplaceRange => "replace-range",
            FixAction::InsertBefore => "insert-before",
            FixAction::InsertAfter => "insert-after",
            FixAction::ExtractFunction => "extract-function",
            FixAction::WrapFunction => "wrap-function",
            FixAction::SplitFile => "split-file",
            FixAction::MoveFile => "move-file",
            FixAction::CreateBarrel => "create-barrel",
        }
    }

    /// Normalize this operation into its line footprint.
    ///
    /// File-level actions have none. An operation whose required line is
    /// missing also yields `None` and is treated as non-conflicting: nothing
    /// can be proven about it, and silently dropping a fixable issue is worse
    /// than occasionally letting two unrelated-by-range edits through.
    pub fn line_range(&self) -> Option<LineRange> {
        if self.action.is_file_level() {
            return None;
        }
        let line = self.line?;
        match self.action {
            FixAction::ReplaceRange => Some(LineRange::new(line, self.end_line.unwrap_or(line))),
            _ => Some(LineRange::single(line)),
        }
    }
}
