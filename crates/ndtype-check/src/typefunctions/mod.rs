//! The built-in type functions.
//!
//! Each submodule holds the handlers for one family of placeholder
//! markers; [`install`] wires them all into a [`Registry`].

pub mod dtype;
pub mod ndims;
pub mod ufuncs;

use ndtype_core::types::MarkerKind;

use crate::registry::Registry;

/// Installs every built-in type-function handler.
pub fn install(registry: &mut Registry) {
    registry.register(MarkerKind::RaiseDim, ndims::raise_dim);
    registry.register(MarkerKind::LowerDim, ndims::lower_dim);
    registry.register(MarkerKind::LowerDim2, ndims::lower_dim2);
    registry.register(MarkerKind::ToggleDims1221, ndims::toggle_dims_12_21);
    registry.register(MarkerKind::InferRankFromShape, ndims::infer_rank_from_shape);
    registry.register(MarkerKind::InferRankReduction, ndims::infer_rank_reduction);
    registry.register(
        MarkerKind::InferRankIfAxisSpecified,
        ndims::infer_rank_if_axis_specified,
    );
    registry.register(MarkerKind::LargestDim, ndims::largest_dim);
    registry.register(MarkerKind::InferDtype, dtype::infer_dtype);
    registry.register(
        MarkerKind::InferDtypeWithDefault,
        dtype::infer_dtype_with_default,
    );
    registry.register(MarkerKind::UfuncCast, ufuncs::ufunc_cast);
}
