//! Call-site shape and dtype inference for a generically-typed array
//! library.
//!
//! Given a call whose declared return type embeds placeholder markers,
//! the engine computes a concrete replacement type from the literal and
//! structural shape of the arguments: shape-tuple lengths, dtype name
//! literals, axis/keepdims reduction rules, indexing rank arithmetic, and
//! ufunc type promotion. See [`engine::Engine`] for the entry points.

pub mod bind;
pub mod constructor;
pub mod diagnostics;
pub mod engine;
pub mod indexing;
pub mod predicates;
pub mod registry;
pub mod surface;
pub mod typefunctions;

// Re-export the host-facing API
pub use bind::{bind_arguments, BoundArgs, BoundArgument, CallKind, CallSite};
pub use diagnostics::{Diagnostic, InferError};
pub use engine::{collapse_zero_rank, Engine};
pub use registry::{Handler, Registry, TfContext};
pub use surface::numpy_surface;
