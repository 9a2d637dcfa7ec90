pub mod error;
pub mod exprs;
pub mod kind;
pub mod library;
pub mod rank;
pub mod types;

// Re-export commonly used types
pub use error::CoreError;
pub use exprs::{Expr, Span};
pub use kind::{dtype_name_kind, ElementKind, TypeCode};
pub use library::{Library, Param, Signature, UfuncSig};
pub use rank::{Rank, DIM_NAMES};
pub use types::{Marker, MarkerKind, Ty};
