//! Array-constructor calls.
//!
//! `array`-style constructors take an `object` argument and produce an
//! array whose element kind and rank come from that argument's structure:
//! an existing array passes through unchanged, a nested sequence of a
//! tracked kind becomes an array of that kind with rank equal to the
//! nesting depth, and anything else is reported as undeterminable.

use ndtype_core::kind::ElementKind;
use ndtype_core::rank::Rank;
use ndtype_core::types::Ty;

use crate::bind::{BoundArgs, CallSite};
use crate::diagnostics::{Diagnostic, InferError};
use crate::predicates::{
    is_ndsequence_of_bools, is_ndsequence_of_floats, is_ndsequence_of_ints, ndsequence_depth,
};

/// The constructor hook: result type of `array(object, ...)`.
pub fn resolve_constructor(
    site: &CallSite,
    bound: &BoundArgs,
    sink: &mut Vec<Diagnostic>,
) -> Result<Ty, InferError> {
    let object = bound
        .get("object")
        .and_then(|entry| entry.as_ref())
        .ok_or_else(|| InferError::MissingFormal {
            callee: site.callee.clone(),
            name: "object".to_string(),
        })?;

    let arg_ty = &object.actual_ty;

    if let Ty::Array { .. } = arg_ty {
        return Ok(arg_ty.clone());
    }

    let kind = if is_ndsequence_of_ints(arg_ty, true) {
        Some(ElementKind::Int)
    } else if is_ndsequence_of_bools(arg_ty) {
        Some(ElementKind::Bool)
    } else if is_ndsequence_of_floats(arg_ty) {
        Some(ElementKind::Float)
    } else {
        None
    };

    match (kind, ndsequence_depth(arg_ty)) {
        (Some(kind), Some(depth)) => {
            let dim = Rank::Known(depth).as_ty().unwrap_or(Ty::Any);
            Ok(Ty::array(kind.as_ty(), dim))
        }
        _ => {
            sink.push(Diagnostic::new("could not determine array type", site.span));
            Ok(Ty::array(Ty::Any, Ty::Any))
        }
    }
}
