//! Dtype inference type functions.
//!
//! Element kind from a dtype argument's literal: a bare name (`int`), a
//! string literal (`'int'`), or a dotted attribute (`np.int32`) all yield
//! a dtype-name string, classified through [`dtype_name_kind`]. When no
//! dtype argument was supplied, [`infer_dtype`] yields Any while
//! [`infer_dtype_with_default`] falls back to the marker's declared
//! default kind.

use ndtype_core::dtype_name_kind;
use ndtype_core::exprs::Expr;
use ndtype_core::kind::ElementKind;
use ndtype_core::types::{Marker, Ty};

use crate::bind::BoundArgument;
use crate::diagnostics::InferError;
use crate::predicates::is_dtype_like;
use crate::registry::TfContext;

/// Element kind from the dtype argument; Any when absent.
pub fn infer_dtype(_marker: &Marker, cx: &TfContext<'_>) -> Result<Ty, InferError> {
    match dtype_matches(cx)? {
        Some(arg) => dtype_of(arg),
        None => Ok(Ty::Any),
    }
}

/// Element kind from the dtype argument; the marker's first generic
/// argument (the declared default kind) when absent.
pub fn infer_dtype_with_default(marker: &Marker, cx: &TfContext<'_>) -> Result<Ty, InferError> {
    match dtype_matches(cx)? {
        Some(arg) => dtype_of(arg),
        None => Ok(marker.args.first().cloned().unwrap_or(Ty::Any)),
    }
}

/// The at-most-one bound argument whose formal is dtype-like.
fn dtype_matches<'a>(cx: &'a TfContext<'_>) -> Result<Option<&'a BoundArgument>, InferError> {
    let matches: Vec<&BoundArgument> = cx
        .bound
        .values()
        .flatten()
        .filter(|b| is_dtype_like(&b.formal))
        .collect();
    match matches.len() {
        0 => Ok(None),
        1 => Ok(Some(matches[0])),
        found => Err(InferError::ParameterCardinality {
            callee: cx.callee.to_string(),
            role: "dtype-like".to_string(),
            found,
        }),
    }
}

fn dtype_of(arg: &BoundArgument) -> Result<Ty, InferError> {
    let name = match &arg.expr {
        Expr::Name(name) | Expr::StrLit(name) | Expr::Attr(name) => name,
        other => {
            return Err(InferError::DtypeExpression {
                expr: other.clone(),
            })
        }
    };

    let kind = dtype_name_kind(name);
    if kind == ElementKind::Unknown {
        tracing::warn!(%name, "dtype name outside the tracked kinds");
    }
    Ok(kind.as_ty())
}
