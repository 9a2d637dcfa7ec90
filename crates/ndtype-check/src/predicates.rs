//! Type classification predicates.
//!
//! Pure, side-effect-free functions classifying a resolved type into the
//! semantic categories the inference handlers key on. Everything above in
//! the engine depends on this module; it depends only on the core model.
//!
//! The boolean/integer asymmetry is deliberate and mirrors the modeled
//! host's subtyping, where bool is a subclass of int: the `no_bools = true`
//! forms of the integer predicates refuse boolean elements, the
//! `no_bools = false` forms admit them. Scalar [`is_int`] is an exact
//! match and never admits bool.

use ndtype_core::rank::Rank;
use ndtype_core::types::Ty;

/// Nested sequences are tracked up to this depth.
const MAX_SEQUENCE_DEPTH: u8 = 3;

pub fn is_int(ty: &Ty) -> bool {
    matches!(ty, Ty::Int)
}

pub fn is_bool(ty: &Ty) -> bool {
    matches!(ty, Ty::Bool)
}

pub fn is_float(ty: &Ty) -> bool {
    matches!(ty, Ty::Float)
}

pub fn is_none(ty: &Ty) -> bool {
    matches!(ty, Ty::None)
}

pub fn is_ellipsis(ty: &Ty) -> bool {
    matches!(ty, Ty::Ellipsis)
}

pub fn is_slice(ty: &Ty) -> bool {
    matches!(ty, Ty::Slice)
}

pub fn is_any(ty: &Ty) -> bool {
    matches!(ty, Ty::Any)
}

pub fn is_tuple(ty: &Ty) -> bool {
    matches!(ty, Ty::Tuple(_))
}

pub fn is_shape_like(ty: &Ty) -> bool {
    matches!(ty, Ty::ShapeLike)
}

pub fn is_axes_like(ty: &Ty) -> bool {
    matches!(ty, Ty::AxesLike)
}

pub fn is_dtype_like(ty: &Ty) -> bool {
    matches!(ty, Ty::DtypeLike)
}

/// Exactly `list[int]`.
pub fn is_list_of_int(ty: &Ty) -> bool {
    matches!(ty, Ty::List(elem) if is_int(elem))
}

/// An element usable in basic indexing: integer, slice, None, or ellipsis.
fn is_basic_index_element(ty: &Ty) -> bool {
    is_int(ty) || is_slice(ty) || is_none(ty) || is_ellipsis(ty)
}

/// A fixed-length sequence whose every element is a basic index element.
pub fn is_basic_index_sequence(ty: &Ty) -> bool {
    match ty {
        Ty::Tuple(items) => items.iter().all(is_basic_index_element),
        Ty::List(elem) | Ty::Sequence(elem) => is_basic_index_element(elem),
        _ => false,
    }
}

/// Integer element check with the boolean refinement leak: bool elements
/// pass only when `no_bools` is false.
fn is_int_element(ty: &Ty, no_bools: bool) -> bool {
    is_int(ty) || (!no_bools && is_bool(ty))
}

/// An array whose elements are integers. With `no_bools = false`, boolean
/// arrays also match (bool is an int subclass in the modeled host).
pub fn is_ndarray_of_ints(ty: &Ty, no_bools: bool) -> bool {
    matches!(ty, Ty::Array { elem, .. } if is_int_element(elem, no_bools))
}

/// An array whose elements are booleans.
pub fn is_ndarray_of_bools(ty: &Ty) -> bool {
    matches!(ty, Ty::Array { elem, .. } if is_bool(elem))
}

/// The rank of an array type's dimension tag; Unknown for a non-array or
/// an untagged dimension argument.
pub fn ndarray_rank(ty: &Ty) -> Rank {
    match ty {
        Ty::Array { dim, .. } => Rank::of_ty(dim),
        _ => Rank::Unknown,
    }
}

/// Sequence-nesting check: `ty` is a sequence of `pred`-elements nested to
/// at most `depth_left` levels. Lists, `Sequence[...]`, and homogeneous
/// tuples all count as sequences in the modeled host.
fn is_ndsequence_of(ty: &Ty, depth_left: u8, pred: &dyn Fn(&Ty) -> bool) -> bool {
    if depth_left == 0 {
        return false;
    }
    match ty {
        Ty::List(elem) | Ty::Sequence(elem) => {
            pred(elem) || is_ndsequence_of(elem, depth_left - 1, pred)
        }
        Ty::Tuple(items) => {
            !items.is_empty()
                && (items.iter().all(|i| pred(i))
                    || items
                        .iter()
                        .all(|i| is_ndsequence_of(i, depth_left - 1, pred)))
        }
        _ => false,
    }
}

/// A sequence of integers nested 1 to 3 deep.
pub fn is_ndsequence_of_ints(ty: &Ty, no_bools: bool) -> bool {
    is_ndsequence_of(ty, MAX_SEQUENCE_DEPTH, &|t| is_int_element(t, no_bools))
}

/// A sequence of booleans nested 1 to 3 deep.
pub fn is_ndsequence_of_bools(ty: &Ty) -> bool {
    is_ndsequence_of(ty, MAX_SEQUENCE_DEPTH, &is_bool)
}

/// A sequence of floats nested 1 to 3 deep.
pub fn is_ndsequence_of_floats(ty: &Ty) -> bool {
    is_ndsequence_of(ty, MAX_SEQUENCE_DEPTH, &is_float)
}

/// Nesting depth of a sequence type, capped at the tracked bound; `None`
/// for a non-sequence.
pub fn ndsequence_depth(ty: &Ty) -> Option<u8> {
    match ty {
        Ty::List(elem) | Ty::Sequence(elem) => {
            let inner = ndsequence_depth(elem).unwrap_or(0);
            Some((1 + inner).min(MAX_SEQUENCE_DEPTH))
        }
        Ty::Tuple(items) if !items.is_empty() => {
            let inner = items
                .iter()
                .map(|i| ndsequence_depth(i).unwrap_or(0))
                .max()
                .unwrap_or(0);
            Some((1 + inner).min(MAX_SEQUENCE_DEPTH))
        }
        _ => None,
    }
}
