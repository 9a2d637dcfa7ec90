//! The type-function registry and the type-tree rewriter.
//!
//! [`Registry`] maps each placeholder [`MarkerKind`] to its handler
//! function, built once at engine initialization and read-only afterwards.
//! [`Registry::rewrite`] walks a declared type exhaustively: marker
//! instances are replaced by their handler's result, generic positions
//! recurse, everything else reconstructs unchanged. The match over [`Ty`]
//! is total, so there is no "unexpected type shape" path at runtime.

use std::collections::HashMap;

use ndtype_core::library::Library;
use ndtype_core::types::{Marker, MarkerKind, Ty};

use crate::bind::BoundArgs;
use crate::diagnostics::InferError;
use crate::typefunctions;

/// Everything a type-function handler may consult: the callee's identity,
/// the bound arguments of the call, and the library surface (for ufunc
/// tables).
pub struct TfContext<'a> {
    pub callee: &'a str,
    pub bound: &'a BoundArgs,
    pub library: &'a Library,
}

/// A type-function handler: pure function of the marker instance (whose
/// generic arguments are its inputs) and the call context.
pub type Handler = fn(&Marker, &TfContext<'_>) -> Result<Ty, InferError>;

/// Marker-kind -> handler dispatch table.
pub struct Registry {
    handlers: HashMap<MarkerKind, Handler>,
}

impl Registry {
    /// Creates an empty registry.
    pub fn new() -> Registry {
        Registry {
            handlers: HashMap::new(),
        }
    }

    /// Creates a registry with every built-in type function installed.
    pub fn with_builtin_typefunctions() -> Registry {
        let mut registry = Registry::new();
        typefunctions::install(&mut registry);
        registry
    }

    /// Associates a marker kind with a handler. A later registration for
    /// the same kind replaces the earlier one.
    pub fn register(&mut self, kind: MarkerKind, handler: Handler) {
        self.handlers.insert(kind, handler);
    }

    /// Rewrites `ty`, replacing every registered marker instance with its
    /// handler's result and recursing into generic arguments.
    pub fn rewrite(&self, ty: &Ty, cx: &TfContext<'_>) -> Result<Ty, InferError> {
        match ty {
            Ty::Marker(marker) => {
                let handler = self
                    .handlers
                    .get(&marker.kind)
                    .ok_or(InferError::UnhandledMarker { kind: marker.kind })?;
                handler(marker, cx)
            }
            Ty::Array { elem, dim } => Ok(Ty::array(
                self.rewrite(elem, cx)?,
                self.rewrite(dim, cx)?,
            )),
            Ty::Tuple(items) => {
                let rewritten = items
                    .iter()
                    .map(|item| self.rewrite(item, cx))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(Ty::Tuple(rewritten))
            }
            Ty::List(elem) => Ok(Ty::list(self.rewrite(elem, cx)?)),
            Ty::Sequence(elem) => Ok(Ty::seq(self.rewrite(elem, cx)?)),
            Ty::Int
            | Ty::Bool
            | Ty::Float
            | Ty::None
            | Ty::Ellipsis
            | Ty::Slice
            | Ty::Dim(_)
            | Ty::ShapeLike
            | Ty::AxesLike
            | Ty::DtypeLike
            | Ty::Any => Ok(ty.clone()),
        }
    }
}

impl Default for Registry {
    fn default() -> Self {
        Registry::with_builtin_typefunctions()
    }
}
