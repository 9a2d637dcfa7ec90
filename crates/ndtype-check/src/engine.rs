//! The call-site engine.
//!
//! [`Engine::initialize`] is the single, explicit build step: it scans the
//! library surface for callables whose declared types embed placeholder
//! markers and indexes them as rewrite-hooked, then attaches the special
//! resolvers (indexing, array construction) by fullname. The resulting
//! engine is immutable; every entry point takes `&self`, so concurrent
//! dispatch needs no synchronization.
//!
//! Per call: bind arguments, dispatch to the hook, then collapse a
//! zero-rank array result to its bare element type. An unhooked callee
//! keeps its declared return type. A handler error is a hard stop for
//! that call only; the host keeps the declared type and moves on.

use std::collections::HashMap;

use ndtype_core::library::Library;
use ndtype_core::types::Ty;

use crate::bind::{bind_arguments, CallKind, CallSite};
use crate::constructor::resolve_constructor;
use crate::diagnostics::{Diagnostic, InferError};
use crate::indexing::resolve_getitem;
use crate::registry::{Registry, TfContext};

/// Element-access hooks, attached by fullname.
const GETITEM_HOOKS: [&str; 1] = ["numpy.ndarray.__getitem__"];

/// Array-constructor hooks, attached by fullname.
const CONSTRUCTOR_HOOKS: [&str; 3] = ["numpy.array", "numpy.asarray", "numpy.ascontiguousarray"];

/// How a hooked callee's replacement type is computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum HookKind {
    /// Rewrite the declared return type through the type-function registry.
    Rewrite,
    /// The indexing resolver.
    GetItem,
    /// The array-constructor resolver.
    Constructor,
}

/// The initialized inference engine. Build once, dispatch forever.
pub struct Engine {
    library: Library,
    registry: Registry,
    hooked: HashMap<String, HookKind>,
}

impl Engine {
    /// Builds the engine against a library surface: installs the built-in
    /// type functions and indexes every callable whose signature embeds a
    /// placeholder marker, plus the special-cased fullnames.
    pub fn initialize(library: Library) -> Engine {
        let registry = Registry::with_builtin_typefunctions();

        let mut hooked = HashMap::new();
        for sig in library.functions() {
            let has_marker =
                sig.ret.contains_marker() || sig.params.iter().any(|p| p.ty.contains_marker());
            if has_marker {
                hooked.insert(sig.fullname.clone(), HookKind::Rewrite);
            }
        }
        for name in GETITEM_HOOKS {
            if library.signature(name).is_some() {
                hooked.insert(name.to_string(), HookKind::GetItem);
            }
        }
        for name in CONSTRUCTOR_HOOKS {
            if library.signature(name).is_some() {
                hooked.insert(name.to_string(), HookKind::Constructor);
            }
        }

        Engine {
            library,
            registry,
            hooked,
        }
    }

    /// The library surface this engine was built against.
    pub fn library(&self) -> &Library {
        &self.library
    }

    /// Whether calls to `fullname` get a replacement type computed.
    pub fn hooks_callee(&self, fullname: &str) -> bool {
        self.hooked.contains_key(fullname)
    }

    /// The function-call hook: replacement type for a plain call.
    pub fn resolve_function_call(
        &self,
        site: &CallSite,
        sink: &mut Vec<Diagnostic>,
    ) -> Result<Ty, InferError> {
        self.resolve(site, CallKind::Function, sink)
    }

    /// The method-call hook: replacement type for a method call (the
    /// callee's first formal is the receiver).
    pub fn resolve_method_call(
        &self,
        site: &CallSite,
        sink: &mut Vec<Diagnostic>,
    ) -> Result<Ty, InferError> {
        self.resolve(site, CallKind::Method, sink)
    }

    fn resolve(
        &self,
        site: &CallSite,
        kind: CallKind,
        sink: &mut Vec<Diagnostic>,
    ) -> Result<Ty, InferError> {
        let Some(hook) = self.hooked.get(&site.callee) else {
            return Ok(site.default_return.clone());
        };
        let sig = self
            .library
            .signature(&site.callee)
            .ok_or_else(|| InferError::MissingSignature {
                callee: site.callee.clone(),
            })?;

        let bound = bind_arguments(sig, site, kind);

        let result = match hook {
            HookKind::Rewrite => {
                let cx = TfContext {
                    callee: &site.callee,
                    bound: &bound,
                    library: &self.library,
                };
                self.registry.rewrite(&site.default_return, &cx)?
            }
            HookKind::GetItem => resolve_getitem(site, &bound, sink)?,
            HookKind::Constructor => resolve_constructor(site, &bound, sink)?,
        };

        Ok(collapse_zero_rank(result))
    }
}

/// A zero-rank array is a scalar: collapse it to its bare element type.
pub fn collapse_zero_rank(ty: Ty) -> Ty {
    match ty {
        Ty::Array { elem, dim } if *dim == Ty::Dim(0) => *elem,
        other => other,
    }
}
