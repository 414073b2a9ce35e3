//! Refyne Core
//!
//! Core engine for refyne, an automated code-quality tool for TypeScript
//! source trees. This crate provides the fix-operation conflict detection
//! and resolution engine: given a batch of independently-generated edits it
//! decides, deterministically, which can be applied together safely, which
//! must be dropped, and which can be merged into one.

pub mod conflict;
pub mod diagnostics;
pub mod error;
pub mod fix;
pub mod result;

// Re-export commonly used types
pub use conflict::{
    Conflict, ConflictKind, ConflictResolutionResult, ConflictResolver, FixDifficulty,
    IndexedOperation, LineRange, PriorityCalculator, PriorityFn, PriorityTables, Resolution,
    ResolutionAction, ResolutionStats, ResolutionStrategy, ResolverOptions, SkippedOperation,
};
pub use diagnostics::{Issue, IssueCategory, Severity};
pub use error::{ErrorKind, RefyneError};
pub use fix::{FixAction, FixOperation};
pub use result::Result;

/// Initialize the tracing subscriber for logging
pub fn init_tracing() {
    use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("refyne=info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_thread_ids(false)
                .with_file(true)
                .with_line_number(true),
        )
        .init();
}

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
