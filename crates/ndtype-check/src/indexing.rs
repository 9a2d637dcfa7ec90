//! Result rank of element-access expressions.
//!
//! Two tiers, tried in order. Basic indexing covers integers, slices,
//! ellipsis, None (newaxis), and tuples of those, with plain rank
//! arithmetic; [`basic_index_rank`] returns `None` when the index is not a
//! basic index, and the caller falls through to advanced indexing.
//! Advanced indexing covers integer and boolean arrays and nested
//! sequences, alone or mixed with basic elements inside a tuple, with
//! broadcast-style rank arithmetic; it is total and degrades to Unknown
//! for anything it cannot account for.
//!
//! Intermediate arithmetic is kept signed and unbounded ([`IndexRank`]);
//! only [`resolve_getitem`] converts the final rank to a dimension tag,
//! reporting "too many indices" when it does not fit.

use ndtype_core::rank::Rank;
use ndtype_core::types::Ty;

use crate::bind::{BoundArgs, BoundArgument, CallSite};
use crate::diagnostics::{Diagnostic, InferError};
use crate::predicates::{
    is_any, is_basic_index_sequence, is_ellipsis, is_int, is_list_of_int, is_ndarray_of_bools,
    is_ndarray_of_ints, is_ndsequence_of_bools, is_ndsequence_of_ints, is_none, is_slice,
    ndarray_rank, ndsequence_depth,
};

/// A resolved index rank before conversion to a dimension tag. `Known` may
/// be negative or exceed the tag bound; both are the caller's problem.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexRank {
    Known(i64),
    Unknown,
}

/// Basic-indexing rank arithmetic. Returns `None` when the index type is
/// not a basic index, signalling the caller to try advanced indexing.
pub fn basic_index_rank(input: i64, index: &Ty) -> Option<IndexRank> {
    if is_int(index) {
        return Some(IndexRank::Known(input - 1));
    }
    if is_slice(index) || is_ellipsis(index) {
        return Some(IndexRank::Known(input));
    }
    if is_none(index) {
        return Some(IndexRank::Known(input + 1));
    }
    if let Ty::Tuple(items) = index {
        if is_basic_index_sequence(index) {
            // fold per-element contributions (each against base rank 0)
            // onto the input rank
            let mut total = input;
            let mut unknown = false;
            for item in items {
                match basic_index_rank(0, item)? {
                    IndexRank::Known(delta) => total += delta,
                    IndexRank::Unknown => unknown = true,
                }
            }
            return Some(if unknown {
                IndexRank::Unknown
            } else {
                IndexRank::Known(total)
            });
        }
    }
    None
}

/// Advanced-indexing rank arithmetic. Total: unmatched shapes yield
/// Unknown, never an error.
pub fn advanced_index_rank(input: i64, index: &Ty) -> IndexRank {
    if is_ndarray_of_ints(index, true) {
        return match ndarray_rank(index).known() {
            Some(r) => IndexRank::Known(input + r as i64 - 1),
            None => IndexRank::Unknown,
        };
    }

    if is_ndarray_of_bools(index) {
        // a rank-R mask consumes R dimensions and collapses them into the
        // single nonzero-count axis
        return match ndarray_rank(index).known() {
            Some(r) => IndexRank::Known(1 + input - r as i64),
            None => IndexRank::Unknown,
        };
    }

    if is_list_of_int(index) {
        // a single fancy-index axis
        return IndexRank::Known(input);
    }

    if let Ty::Tuple(items) = index {
        if items.iter().any(is_any) {
            return IndexRank::Unknown;
        }
        let supported = items.iter().all(|i| {
            is_int(i)
                || is_slice(i)
                || is_ellipsis(i)
                || is_ndarray_of_ints(i, false)
                || is_ndsequence_of_ints(i, false)
                || is_ndarray_of_bools(i)
                || is_ndsequence_of_bools(i)
        });
        if supported {
            return advanced_tuple_rank(input, items);
        }
    }

    IndexRank::Unknown
}

/// Broadcast rank arithmetic for a tuple index mixing basic elements with
/// integer/boolean arrays and sequences.
fn advanced_tuple_rank(input: i64, items: &[Ty]) -> IndexRank {
    let n_int_arrays = items
        .iter()
        .filter(|i| is_ndarray_of_ints(i, true) || is_ndsequence_of_ints(i, true))
        .count() as i64;
    let n_slices = items.iter().filter(|i| is_slice(i)).count() as i64;
    let n_ints = items.iter().filter(|i| is_int(i)).count() as i64;

    // boolean arrays/sequences contribute their full dimensionality as
    // additional integer-array axes (as if replaced by their nonzero())
    let mut bool_array_dims = 0i64;
    for item in items.iter().filter(|i| is_ndarray_of_bools(i)) {
        match ndarray_rank(item).known() {
            Some(r) => bool_array_dims = bool_array_dims.max(r as i64),
            None => return IndexRank::Unknown,
        }
    }
    let bool_seq_dims = items
        .iter()
        .filter(|i| is_ndsequence_of_bools(i))
        .filter_map(|i| ndsequence_depth(i))
        .map(|d| d as i64)
        .max()
        .unwrap_or(0);
    let n_effective_int_arrays = n_int_arrays + bool_array_dims + bool_seq_dims;

    // broadcast rank among the integer arrays/sequences, default 1
    let mut broadcast = 1i64;
    for item in items.iter().filter(|i| is_ndarray_of_ints(i, true)) {
        match ndarray_rank(item).known() {
            Some(r) => broadcast = broadcast.max(r as i64),
            None => return IndexRank::Unknown,
        }
    }
    if let Some(depth) = items
        .iter()
        .filter(|i| is_ndsequence_of_ints(i, true))
        .filter_map(|i| ndsequence_depth(i))
        .map(|d| d as i64)
        .max()
    {
        broadcast = broadcast.max(depth);
    }

    // dimensions not accounted for by explicit indices are implicitly
    // trailing slices
    let needed = input - n_ints;
    let mut slices = n_slices;
    if n_effective_int_arrays + slices < needed {
        slices = needed - n_effective_int_arrays;
    }
    if n_effective_int_arrays + slices != needed {
        tracing::warn!(
            input,
            n_effective_int_arrays,
            slices,
            n_ints,
            "advanced index supplies more index dimensions than the array has"
        );
        return IndexRank::Unknown;
    }

    IndexRank::Known(broadcast + slices)
}

/// The `__getitem__` hook: result type of indexing the receiver array with
/// the single bound index argument.
pub fn resolve_getitem(
    site: &CallSite,
    bound: &BoundArgs,
    sink: &mut Vec<Diagnostic>,
) -> Result<Ty, InferError> {
    let (recv_elem, recv_dim) = match &site.self_ty {
        Some(Ty::Array { elem, dim }) => (elem.as_ref(), dim.as_ref()),
        _ => {
            return Err(InferError::ReceiverNotArray {
                callee: site.callee.clone(),
            })
        }
    };

    // the result's element type is the declared return's first argument
    let elem = match &site.default_return {
        Ty::Array { elem, .. } => (**elem).clone(),
        _ => recv_elem.clone(),
    };

    let Some(input) = Rank::of_ty(recv_dim).known() else {
        // receiver of unknown rank: keep the declared type
        return Ok(site.default_return.clone());
    };

    let supplied: Vec<&BoundArgument> = bound.values().flatten().collect();
    if supplied.len() != 1 {
        return Err(InferError::ParameterCardinality {
            callee: site.callee.clone(),
            role: "index".to_string(),
            found: supplied.len(),
        });
    }
    let index_ty = &supplied[0].actual_ty;

    let resolved = match basic_index_rank(input as i64, index_ty) {
        Some(rank) => rank,
        None => advanced_index_rank(input as i64, index_ty),
    };

    match resolved {
        IndexRank::Unknown => Ok(Ty::array(elem, Ty::Any)),
        IndexRank::Known(0) => Ok(elem),
        IndexRank::Known(n) if (1..=Rank::MAX as i64).contains(&n) => {
            Ok(Ty::array(elem, Ty::Dim(n as u8)))
        }
        IndexRank::Known(_) => {
            sink.push(Diagnostic::new("too many indices for array", site.span));
            Ok(site.default_return.clone())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndtype_core::exprs::{Expr, Span};
    use proptest::prelude::*;

    fn int_array(rank: u8) -> Ty {
        Ty::array(Ty::Int, Ty::Dim(rank))
    }

    fn bool_array(rank: u8) -> Ty {
        Ty::array(Ty::Bool, Ty::Dim(rank))
    }

    // -----------------------------------------------------------------------
    // basic indexing
    // -----------------------------------------------------------------------

    #[test]
    fn single_int_drops_one_dim() {
        assert_eq!(basic_index_rank(2, &Ty::Int), Some(IndexRank::Known(1)));
        assert_eq!(basic_index_rank(1, &Ty::Int), Some(IndexRank::Known(0)));
    }

    #[test]
    fn slice_and_ellipsis_preserve_rank() {
        assert_eq!(basic_index_rank(2, &Ty::Slice), Some(IndexRank::Known(2)));
        assert_eq!(basic_index_rank(3, &Ty::Ellipsis), Some(IndexRank::Known(3)));
    }

    #[test]
    fn newaxis_adds_one_dim() {
        assert_eq!(basic_index_rank(2, &Ty::None), Some(IndexRank::Known(3)));
    }

    #[test]
    fn tuple_contributions_compose_additively() {
        // b[0, 0] on a 2-D array
        let two_ints = Ty::Tuple(vec![Ty::Int, Ty::Int]);
        assert_eq!(basic_index_rank(2, &two_ints), Some(IndexRank::Known(0)));

        // b[..., 0] on a 2-D array
        let ellipsis_int = Ty::Tuple(vec![Ty::Ellipsis, Ty::Int]);
        assert_eq!(basic_index_rank(2, &ellipsis_int), Some(IndexRank::Known(1)));

        // b[:, None, 0] on a 2-D array
        let mixed = Ty::Tuple(vec![Ty::Slice, Ty::None, Ty::Int]);
        assert_eq!(basic_index_rank(2, &mixed), Some(IndexRank::Known(2)));
    }

    #[test]
    fn arrays_are_not_basic() {
        assert_eq!(basic_index_rank(2, &int_array(1)), None);
        assert_eq!(basic_index_rank(2, &Ty::list(Ty::Int)), None);
        let tuple_with_array = Ty::Tuple(vec![Ty::Int, int_array(1)]);
        assert_eq!(basic_index_rank(2, &tuple_with_array), None);
    }

    proptest! {
        // int always -1, slice/ellipsis always 0, None always +1, and the
        // contributions sum across a tuple
        #[test]
        fn basic_tuple_is_additive(
            elements in proptest::collection::vec(0usize..4, 0..5),
            input in 0i64..4,
        ) {
            let tys: Vec<Ty> = elements
                .iter()
                .map(|e| match e {
                    0 => Ty::Int,
                    1 => Ty::Slice,
                    2 => Ty::Ellipsis,
                    _ => Ty::None,
                })
                .collect();
            let expected: i64 = input
                + tys
                    .iter()
                    .map(|t| match t {
                        Ty::Int => -1,
                        Ty::None => 1,
                        _ => 0,
                    })
                    .sum::<i64>();

            let result = basic_index_rank(input, &Ty::Tuple(tys));
            prop_assert_eq!(result, Some(IndexRank::Known(expected)));
        }
    }

    // -----------------------------------------------------------------------
    // advanced indexing
    // -----------------------------------------------------------------------

    #[test]
    fn int_array_index_adds_its_rank_minus_one() {
        // b[a] where b is 2-D and a is a 1-D int array
        assert_eq!(advanced_index_rank(2, &int_array(1)), IndexRank::Known(2));
        assert_eq!(advanced_index_rank(2, &int_array(2)), IndexRank::Known(3));
    }

    #[test]
    fn bool_mask_collapses_consumed_dims() {
        // 2-D indexed by 1-D mask -> 2; 3-D by 1-D mask -> 3; 3-D by 3-D mask -> 1
        assert_eq!(advanced_index_rank(2, &bool_array(1)), IndexRank::Known(2));
        assert_eq!(advanced_index_rank(3, &bool_array(1)), IndexRank::Known(3));
        assert_eq!(advanced_index_rank(3, &bool_array(3)), IndexRank::Known(1));
    }

    #[test]
    fn bool_mask_of_unknown_rank_degrades() {
        let mask = Ty::array(Ty::Bool, Ty::Any);
        assert_eq!(advanced_index_rank(2, &mask), IndexRank::Unknown);
    }

    #[test]
    fn list_of_int_preserves_rank() {
        // b[[0, 1]] on a 2-D array
        assert_eq!(advanced_index_rank(2, &Ty::list(Ty::Int)), IndexRank::Known(2));
    }

    #[test]
    fn tuple_mixing_ints_and_int_arrays() {
        // a[1, 1, i1] on a 3-D array with i1 a 1-D int array
        let index = Ty::Tuple(vec![Ty::Int, Ty::Int, int_array(1)]);
        assert_eq!(advanced_index_rank(3, &index), IndexRank::Known(1));

        // a[1, i1, i1]
        let index = Ty::Tuple(vec![Ty::Int, int_array(1), int_array(1)]);
        assert_eq!(advanced_index_rank(3, &index), IndexRank::Known(1));

        // a[i1, i1, i1]
        let index = Ty::Tuple(vec![int_array(1), int_array(1), int_array(1)]);
        assert_eq!(advanced_index_rank(3, &index), IndexRank::Known(1));
    }

    #[test]
    fn tuple_with_single_int_sequence_fills_trailing_slices() {
        // a[(0, 1, 2),] on a 3-D array: one depth-1 int sequence, the two
        // remaining dimensions become implicit slices
        let index = Ty::Tuple(vec![Ty::Tuple(vec![Ty::Int, Ty::Int, Ty::Int])]);
        assert_eq!(advanced_index_rank(3, &index), IndexRank::Known(3));
    }

    #[test]
    fn tuple_broadcast_uses_max_int_array_rank() {
        // 2-D int array alongside an int: broadcast rank 2 plus one
        // implicit slice for the remaining dimension
        let index = Ty::Tuple(vec![int_array(2), Ty::Int]);
        assert_eq!(advanced_index_rank(3, &index), IndexRank::Known(3));
    }

    #[test]
    fn tuple_with_bool_array_counts_its_dims() {
        // 3-D indexed by (mask2d, int): the mask accounts for two
        // dimensions, the int for one; nothing left to slice
        let index = Ty::Tuple(vec![bool_array(2), Ty::Int]);
        assert_eq!(advanced_index_rank(3, &index), IndexRank::Known(1));
    }

    #[test]
    fn tuple_containing_any_degrades() {
        // tuple([1, 1, 1]) resolves as Tuple[Any, ...] in practice
        let index = Ty::Tuple(vec![Ty::Any, Ty::Int]);
        assert_eq!(advanced_index_rank(3, &index), IndexRank::Unknown);
    }

    #[test]
    fn over_accounted_tuple_degrades() {
        // more advanced indices than the array has dimensions
        let index = Ty::Tuple(vec![int_array(1), int_array(1), Ty::Slice]);
        assert_eq!(advanced_index_rank(1, &index), IndexRank::Unknown);
    }

    #[test]
    fn unsupported_index_type_degrades() {
        assert_eq!(advanced_index_rank(2, &Ty::Float), IndexRank::Unknown);
        assert_eq!(advanced_index_rank(2, &Ty::Any), IndexRank::Unknown);
    }

    proptest! {
        // mask of rank r against input of rank n always yields 1 + (n - r)
        #[test]
        fn mask_formula(n in 1u8..=4, r in 1u8..=4) {
            prop_assume!(r <= n);
            let result = advanced_index_rank(n as i64, &bool_array(r));
            prop_assert_eq!(result, IndexRank::Known(1 + (n as i64 - r as i64)));
        }
    }

    // -----------------------------------------------------------------------
    // resolve_getitem
    // -----------------------------------------------------------------------

    fn getitem_site(receiver: Ty, index_ty: Ty) -> (CallSite, BoundArgs) {
        let elem = match &receiver {
            Ty::Array { elem, .. } => (**elem).clone(),
            _ => Ty::Any,
        };
        let site = CallSite {
            callee: "numpy.ndarray.__getitem__".to_string(),
            default_return: Ty::array(elem, Ty::Any),
            arg_types: vec![vec![index_ty.clone()]],
            args: vec![vec![Expr::Opaque]],
            self_ty: Some(receiver),
            span: Span::new(1, 0),
        };
        let mut bound = BoundArgs::new();
        bound.insert(
            "index".to_string(),
            Some(BoundArgument {
                name: "index".to_string(),
                formal: Ty::Any,
                actual_ty: index_ty,
                expr: Expr::Opaque,
            }),
        );
        (site, bound)
    }

    #[test]
    fn getitem_chains_down_to_scalar() {
        let mut sink = Vec::new();

        // rank-2 float array indexed by an int -> rank-1 array
        let (site, bound) = getitem_site(Ty::array(Ty::Float, Ty::Dim(2)), Ty::Int);
        let result = resolve_getitem(&site, &bound, &mut sink).unwrap();
        assert_eq!(result, Ty::array(Ty::Float, Ty::Dim(1)));

        // indexing that again collapses to the bare element type
        let (site, bound) = getitem_site(Ty::array(Ty::Float, Ty::Dim(1)), Ty::Int);
        let result = resolve_getitem(&site, &bound, &mut sink).unwrap();
        assert_eq!(result, Ty::Float);
        assert!(sink.is_empty());
    }

    #[test]
    fn getitem_newaxis_beyond_tag_bound_reports_diagnostic() {
        let mut sink = Vec::new();
        let index = Ty::Tuple(vec![Ty::None, Ty::None, Ty::None]);
        let (site, bound) = getitem_site(Ty::array(Ty::Float, Ty::Dim(2)), index);

        let result = resolve_getitem(&site, &bound, &mut sink).unwrap();
        assert_eq!(result, site.default_return);
        assert_eq!(sink.len(), 1);
        assert_eq!(sink[0].message, "too many indices for array");
    }

    #[test]
    fn getitem_too_many_ints_reports_diagnostic() {
        let mut sink = Vec::new();
        let index = Ty::Tuple(vec![Ty::Int, Ty::Int, Ty::Int]);
        let (site, bound) = getitem_site(Ty::array(Ty::Float, Ty::Dim(2)), index);

        let result = resolve_getitem(&site, &bound, &mut sink).unwrap();
        assert_eq!(result, site.default_return);
        assert_eq!(sink.len(), 1);
    }

    #[test]
    fn getitem_unknown_receiver_rank_keeps_default() {
        let mut sink = Vec::new();
        let (site, bound) = getitem_site(Ty::array(Ty::Float, Ty::Any), Ty::Int);
        let result = resolve_getitem(&site, &bound, &mut sink).unwrap();
        assert_eq!(result, site.default_return);
    }

    #[test]
    fn getitem_unknown_index_keeps_elem_with_any_dim() {
        let mut sink = Vec::new();
        let (site, bound) = getitem_site(Ty::array(Ty::Float, Ty::Dim(2)), Ty::Any);
        let result = resolve_getitem(&site, &bound, &mut sink).unwrap();
        assert_eq!(result, Ty::array(Ty::Float, Ty::Any));
    }

    #[test]
    fn getitem_non_array_receiver_is_contract_violation() {
        let mut sink = Vec::new();
        let (mut site, bound) = getitem_site(Ty::array(Ty::Float, Ty::Dim(2)), Ty::Int);
        site.self_ty = Some(Ty::Int);
        let err = resolve_getitem(&site, &bound, &mut sink).unwrap_err();
        assert!(matches!(err, InferError::ReceiverNotArray { .. }));
    }
}
