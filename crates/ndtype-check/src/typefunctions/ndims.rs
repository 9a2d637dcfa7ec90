//! Rank inference type functions.
//!
//! Handlers that compute a result dimension tag: from a shape argument's
//! literal structure, from a fixed offset against an existing tag, from
//! axis/keepdims reduction rules, or from whether an axis argument was
//! supplied at all. Unresolvable inputs degrade to [`Ty::Any`]; inputs a
//! handler's contract excludes are hard errors.

use ndtype_core::exprs::Expr;
use ndtype_core::rank::Rank;
use ndtype_core::types::{Marker, Ty};

use crate::bind::{BoundArgs, BoundArgument};
use crate::diagnostics::InferError;
use crate::predicates::{is_axes_like, is_int, is_none, is_shape_like};
use crate::registry::TfContext;

/// Result rank from the literal structure of the shape argument.
///
/// Exactly one shape-like formal must be bound; anything else means the
/// library signature and this rule disagree.
pub fn infer_rank_from_shape(_marker: &Marker, cx: &TfContext<'_>) -> Result<Ty, InferError> {
    let matches: Vec<&BoundArgument> = cx
        .bound
        .values()
        .flatten()
        .filter(|b| is_shape_like(&b.formal))
        .collect();
    if matches.len() != 1 {
        return Err(InferError::ParameterCardinality {
            callee: cx.callee.to_string(),
            role: "shape-like".to_string(),
            found: matches.len(),
        });
    }

    // a shape literal longer than the tag set degrades to Any
    Ok(shape_rank(matches[0]).as_ty().unwrap_or(Ty::Any))
}

/// Rank of the array a shape argument describes: a bare (possibly negated)
/// integer literal is one-dimensional, a tuple or list literal contributes
/// its length.
fn shape_rank(arg: &BoundArgument) -> Rank {
    match &arg.expr {
        Expr::IntLit(_) | Expr::Neg(_) => Rank::Known(1),
        Expr::TupleLit(items) => match &arg.actual_ty {
            Ty::Tuple(tys) => Rank::from_len(tys.len()),
            _ => Rank::from_len(items.len()),
        },
        Expr::ListLit(items) => Rank::from_len(items.len()),
        other => {
            tracing::error!(expr = ?other, ty = %arg.actual_ty, "could not infer rank from shape argument");
            Rank::Unknown
        }
    }
}

/// Result rank = argument rank + 1.
pub fn raise_dim(marker: &Marker, _cx: &TfContext<'_>) -> Result<Ty, InferError> {
    Ok(offset_dim(marker, 1))
}

/// Result rank = argument rank - 1.
pub fn lower_dim(marker: &Marker, _cx: &TfContext<'_>) -> Result<Ty, InferError> {
    Ok(offset_dim(marker, -1))
}

/// Result rank = argument rank - 2.
pub fn lower_dim2(marker: &Marker, _cx: &TfContext<'_>) -> Result<Ty, InferError> {
    Ok(offset_dim(marker, -2))
}

fn offset_dim(marker: &Marker, delta: i32) -> Ty {
    let source = marker.args.first().map(Rank::of_ty).unwrap_or(Rank::Unknown);
    source.offset(delta).as_ty().unwrap_or(Ty::Any)
}

/// Rank 1 <-> 2 swap. Total only over those two ranks; an unknown source
/// propagates, any other concrete tag is a contract violation.
pub fn toggle_dims_12_21(marker: &Marker, _cx: &TfContext<'_>) -> Result<Ty, InferError> {
    let source = marker.args.first().map(Rank::of_ty).unwrap_or(Rank::Unknown);
    match source.known() {
        Some(1) => Ok(Ty::Dim(2)),
        Some(2) => Ok(Ty::Dim(1)),
        Some(rank) => Err(InferError::UnsupportedRank { rank }),
        None => Ok(Ty::Any),
    }
}

/// Statically-determined value of the `keepdims` argument.
enum Keepdims {
    True,
    False,
    Maybe,
}

fn keepdims_of(bound: &BoundArgs) -> Keepdims {
    match bound.get("keepdims").and_then(|entry| entry.as_ref()) {
        // absent means the library default, False
        None => Keepdims::False,
        Some(arg) => match arg.expr {
            Expr::BoolLit(true) => Keepdims::True,
            Expr::BoolLit(false) => Keepdims::False,
            _ => Keepdims::Maybe,
        },
    }
}

/// Result rank of a reduction over an operand of the marker's declared
/// rank, driven by the axis argument and `keepdims`.
pub fn infer_rank_reduction(marker: &Marker, cx: &TfContext<'_>) -> Result<Ty, InferError> {
    let matches: Vec<&BoundArgument> = cx
        .bound
        .values()
        .flatten()
        .filter(|b| is_axes_like(&b.formal))
        .collect();

    // no axis argument: full reduction to a scalar
    if matches.is_empty() {
        return Ok(Ty::Dim(0));
    }
    if matches.len() > 1 {
        return Err(InferError::ParameterCardinality {
            callee: cx.callee.to_string(),
            role: "axes-like".to_string(),
            found: matches.len(),
        });
    }

    let operand = marker.args.first().map(Rank::of_ty).unwrap_or(Rank::Unknown);
    let Some(operand_rank) = operand.known() else {
        return Ok(Ty::Any);
    };

    match keepdims_of(cx.bound) {
        Keepdims::True => Ok(Ty::Dim(operand_rank)),
        Keepdims::False => {
            let axis = matches[0];
            let reduced = match &axis.actual_ty {
                Ty::Int => 1,
                Ty::Tuple(items) => items.len() as i32,
                _ => {
                    return Err(InferError::AxisShape {
                        callee: cx.callee.to_string(),
                    })
                }
            };
            Ok(Rank::Known(operand_rank)
                .offset(-reduced)
                .as_ty()
                .unwrap_or(Ty::Any))
        }
        Keepdims::Maybe => Ok(Ty::Any),
    }
}

/// Picks the marker's first generic argument when the `axis` argument is
/// absent or None, its second when axis is a scalar int. Any other axis
/// shape degrades to Any.
pub fn infer_rank_if_axis_specified(marker: &Marker, cx: &TfContext<'_>) -> Result<Ty, InferError> {
    let Some(entry) = cx.bound.get("axis") else {
        return Err(InferError::MissingFormal {
            callee: cx.callee.to_string(),
            name: "axis".to_string(),
        });
    };

    let unspecified = marker.args.first().cloned().unwrap_or(Ty::Any);
    let specified = marker.args.get(1).cloned().unwrap_or(Ty::Any);

    match entry {
        None => Ok(unspecified),
        Some(arg) if is_none(&arg.actual_ty) => Ok(unspecified),
        Some(arg) if is_int(&arg.actual_ty) => Ok(specified),
        Some(arg) => {
            tracing::error!(callee = cx.callee, ty = %arg.actual_ty, "cannot infer result rank from axis argument");
            Ok(Ty::Any)
        }
    }
}

/// The greater of two rank tags; Any if either is not concrete.
pub fn largest_dim(marker: &Marker, _cx: &TfContext<'_>) -> Result<Ty, InferError> {
    let left = marker.args.first().map(Rank::of_ty).unwrap_or(Rank::Unknown);
    let right = marker.args.get(1).map(Rank::of_ty).unwrap_or(Rank::Unknown);
    match (left.known(), right.known()) {
        (Some(a), Some(b)) => Ok(Ty::Dim(a.max(b))),
        _ => Ok(Ty::Any),
    }
}
