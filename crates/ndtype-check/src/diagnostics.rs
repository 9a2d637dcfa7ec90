//! Inference errors and user-facing diagnostics.
//!
//! Two distinct failure channels, never mixed:
//!
//! - [`InferError`] -- contract violations: the rule set is incomplete for
//!   a library signature, or a handler hit an input its contract excludes.
//!   These propagate out of the engine as hard failures for the current
//!   call; the host falls back to the declared type and moves on. They are
//!   fixed by extending a rule, not by catching.
//! - [`Diagnostic`] -- conditions attributable to the user's source (an
//!   index expression needing more dimensions than the tag set can
//!   represent, an array construction the engine cannot type). Reported
//!   through the sink at the call's location; evaluation continues.
//!
//! Statically-undetermined results are neither: they flow as
//! `Unknown`/`Any` values and are a legitimate terminal answer.

use serde::{Deserialize, Serialize};

use ndtype_core::exprs::{Expr, Span};
use ndtype_core::types::{MarkerKind, Ty};

/// A user-facing diagnostic, reported at a source location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub message: String,
    pub span: Span,
}

impl Diagnostic {
    pub fn new(message: &str, span: Span) -> Diagnostic {
        Diagnostic {
            message: message.to_string(),
            span,
        }
    }
}

/// A contract violation inside the inference engine.
#[derive(Debug, Clone, Serialize, Deserialize, thiserror::Error)]
pub enum InferError {
    /// A handler required exactly one argument of a formal category and
    /// found zero or several.
    #[error("'{callee}': expected exactly one {role} argument, found {found}")]
    ParameterCardinality {
        callee: String,
        role: String,
        found: usize,
    },

    /// A handler required a formal parameter the signature does not declare.
    #[error("'{callee}' has no '{name}' parameter")]
    MissingFormal { callee: String, name: String },

    /// The dtype argument's expression is not a name, string, or attribute
    /// literal.
    #[error("cannot infer dtype from argument expression {expr:?}")]
    DtypeExpression { expr: Expr },

    /// The 1<->2 dimension toggle was applied to a rank outside {1, 2}.
    #[error("dimension toggle applied to rank {rank}; only ranks 1 and 2 are supported")]
    UnsupportedRank { rank: u8 },

    /// A reduction's axis argument is neither a scalar int nor a tuple.
    #[error("axis argument of '{callee}' is neither an int nor a tuple")]
    AxisShape { callee: String },

    /// No ufunc typecode table is registered for the callee.
    #[error("no ufunc typecode table registered for '{callee}'")]
    UnknownUfunc { callee: String },

    /// No entry of the callee's table accepts the operand codes.
    #[error("no ufunc signature of '{callee}' accepts operand codes '{codes}'")]
    NoMatchingSignature { callee: String, codes: String },

    /// A ufunc operand's element kind has no type code.
    #[error("ufunc operand type {ty} has no typecode")]
    UntrackedOperand { ty: Ty },

    /// The rewriter met a marker kind with no registered handler.
    #[error("no handler registered for marker {kind:?}")]
    UnhandledMarker { kind: MarkerKind },

    /// A callee was hooked at setup but its signature is gone.
    #[error("no signature recorded for hooked callee '{callee}'")]
    MissingSignature { callee: String },

    /// A method hook fired with a receiver that is not an array type.
    #[error("'{callee}' receiver is not an array type")]
    ReceiverNotArray { callee: String },
}
