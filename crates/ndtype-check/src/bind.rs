//! Call sites and the argument binder.
//!
//! [`bind_arguments`] maps a call's actual arguments back to the callee's
//! formal parameter names. The result is an insertion-ordered map from
//! parameter name to an optional [`BoundArgument`]: a `None` value is the
//! explicit "not supplied" marker, so downstream handlers can distinguish
//! an absent argument from an absent formal. Binding never errors.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use ndtype_core::exprs::{Expr, Span};
use ndtype_core::library::Signature;
use ndtype_core::types::Ty;

/// Whether the call is a plain function call or a method call (whose first
/// formal, the receiver, is dropped before binding).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallKind {
    Function,
    Method,
}

/// Everything the host reports about one call expression. Ephemeral: one
/// per evaluated call.
///
/// `arg_types` and `args` hold one list per formal parameter, reflecting
/// the host's overload/variadic resolution; only the first match per
/// formal is used.
#[derive(Debug, Clone)]
pub struct CallSite {
    /// Fullname of the callee, e.g. `numpy.zeros`.
    pub callee: String,
    /// The declared return type at this call site, possibly containing
    /// placeholder markers.
    pub default_return: Ty,
    /// Resolved types of the actual arguments, one list per formal.
    pub arg_types: Vec<Vec<Ty>>,
    /// Source expressions of the actual arguments, one list per formal.
    pub args: Vec<Vec<Expr>>,
    /// Receiver type for method calls.
    pub self_ty: Option<Ty>,
    /// Location of the call expression, for diagnostics.
    pub span: Span,
}

/// One actual argument bound to its formal parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoundArgument {
    /// Formal parameter name.
    pub name: String,
    /// The formal's declared type.
    pub formal: Ty,
    /// The actual argument's resolved type.
    pub actual_ty: Ty,
    /// The actual argument's source expression.
    pub expr: Expr,
}

/// Parameter name -> bound argument (or `None` when nothing was supplied).
pub type BoundArgs = IndexMap<String, Option<BoundArgument>>;

/// Binds a call's actual arguments to the callee's formal parameters.
pub fn bind_arguments(sig: &Signature, site: &CallSite, kind: CallKind) -> BoundArgs {
    let formals = match kind {
        CallKind::Method if !sig.params.is_empty() => &sig.params[1..],
        _ => &sig.params[..],
    };

    let mut bound = BoundArgs::new();
    for (i, param) in formals.iter().enumerate() {
        let actual_ty = site.arg_types.get(i).and_then(|tys| tys.first());
        let expr = site.args.get(i).and_then(|exprs| exprs.first());

        let entry = match (actual_ty, expr) {
            (Some(ty), Some(expr)) => Some(BoundArgument {
                name: param.name.clone(),
                formal: param.ty.clone(),
                actual_ty: ty.clone(),
                expr: expr.clone(),
            }),
            _ => None,
        };
        bound.insert(param.name.clone(), entry);
    }

    bound
}
