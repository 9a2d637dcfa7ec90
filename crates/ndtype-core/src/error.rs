//! Core error types for ndtype-core.
//!
//! Uses `thiserror` for structured, matchable error variants.

use thiserror::Error;

/// Errors produced while assembling the modeled library surface.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A callable signature with this fullname is already registered.
    #[error("duplicate function signature: '{fullname}'")]
    DuplicateFunction { fullname: String },

    /// A ufunc typecode table for this fullname is already registered.
    #[error("duplicate ufunc table: '{fullname}'")]
    DuplicateUfunc { fullname: String },
}
