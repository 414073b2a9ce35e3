//! Result type alias for refyne operations

use crate::error::RefyneError;

/// Standard Result type for refyne operations
pub type Result<T> = std::result::Result<T, RefyneError>;
