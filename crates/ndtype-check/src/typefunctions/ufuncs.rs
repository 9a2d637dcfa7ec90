//! Ufunc output-type resolution.
//!
//! An elementwise operation's output kind comes from its declared
//! signature table: each operand's element kind reduces to a single type
//! code, the table is scanned in declared order, and the first entry whose
//! every input safely accepts the corresponding operand wins. A missing
//! table or an unmatched operand tuple means the modeled surface and the
//! rule set disagree, which is a hard error.

use ndtype_core::kind::{ElementKind, TypeCode};
use ndtype_core::library::UfuncSig;
use ndtype_core::types::{Marker, Ty};

use crate::diagnostics::InferError;
use crate::registry::TfContext;

/// Element kind from the callee's ufunc signature table. The marker's
/// generic arguments are the operand types (output-buffer parameters are
/// never among them).
pub fn ufunc_cast(marker: &Marker, cx: &TfContext<'_>) -> Result<Ty, InferError> {
    let operands = marker
        .args
        .iter()
        .map(operand_code)
        .collect::<Result<Vec<_>, _>>()?;

    let table = cx
        .library
        .ufunc_signatures(cx.callee)
        .ok_or_else(|| InferError::UnknownUfunc {
            callee: cx.callee.to_string(),
        })?;

    let output = resolve_ufunc(cx.callee, table, &operands)?;
    Ok(output.kind().as_ty())
}

/// Reduces an operand type to its type code; arrays reduce to their
/// element's code.
fn operand_code(ty: &Ty) -> Result<TypeCode, InferError> {
    let scalar = match ty {
        Ty::Array { elem, .. } => elem,
        other => other,
    };
    ElementKind::of_ty(scalar)
        .type_code()
        .ok_or_else(|| InferError::UntrackedOperand { ty: ty.clone() })
}

/// Scans a ufunc signature table in declared order and returns the output
/// code of the first entry whose inputs all safely accept the operands.
pub fn resolve_ufunc(
    callee: &str,
    table: &[UfuncSig],
    operands: &[TypeCode],
) -> Result<TypeCode, InferError> {
    table
        .iter()
        .find(|sig| {
            sig.inputs.len() == operands.len()
                && operands
                    .iter()
                    .zip(sig.inputs.iter())
                    .all(|(operand, input)| operand.safe_casts_to(*input))
        })
        .map(|sig| sig.output)
        .ok_or_else(|| InferError::NoMatchingSignature {
            callee: callee.to_string(),
            codes: operands.iter().map(|c| c.as_char()).collect(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bind::BoundArgs;
    use ndtype_core::library::Library;
    use ndtype_core::types::MarkerKind;
    use proptest::prelude::*;

    fn arithmetic_table() -> Vec<UfuncSig> {
        vec![
            UfuncSig::new(&[TypeCode::Bool, TypeCode::Bool], TypeCode::Bool),
            UfuncSig::new(&[TypeCode::Int, TypeCode::Int], TypeCode::Int),
            UfuncSig::new(&[TypeCode::Float, TypeCode::Float], TypeCode::Float),
        ]
    }

    // -----------------------------------------------------------------------
    // resolve_ufunc
    // -----------------------------------------------------------------------

    #[test]
    fn exact_operand_codes_match_their_entry() {
        let table = arithmetic_table();
        assert_eq!(
            resolve_ufunc("numpy.add", &table, &[TypeCode::Int, TypeCode::Int]).unwrap(),
            TypeCode::Int
        );
        assert_eq!(
            resolve_ufunc("numpy.add", &table, &[TypeCode::Float, TypeCode::Float]).unwrap(),
            TypeCode::Float
        );
    }

    #[test]
    fn mixed_operands_pick_first_widening_entry() {
        let table = arithmetic_table();
        // bool + int: the bool entry rejects the int operand, the int entry
        // accepts both (bool widens to int)
        assert_eq!(
            resolve_ufunc("numpy.add", &table, &[TypeCode::Bool, TypeCode::Int]).unwrap(),
            TypeCode::Int
        );
        // int + float widens to float
        assert_eq!(
            resolve_ufunc("numpy.add", &table, &[TypeCode::Int, TypeCode::Float]).unwrap(),
            TypeCode::Float
        );
    }

    #[test]
    fn arity_mismatch_never_matches() {
        let table = arithmetic_table();
        let err = resolve_ufunc("numpy.add", &table, &[TypeCode::Int]).unwrap_err();
        assert!(matches!(err, InferError::NoMatchingSignature { .. }));
    }

    #[test]
    fn unmatched_operands_report_their_codes() {
        // a float-only table rejects nothing castable... except nothing:
        // float operands cannot narrow to int
        let table = vec![UfuncSig::new(&[TypeCode::Int, TypeCode::Int], TypeCode::Int)];
        let err =
            resolve_ufunc("numpy.add", &table, &[TypeCode::Float, TypeCode::Float]).unwrap_err();
        match err {
            InferError::NoMatchingSignature { codes, .. } => assert_eq!(codes, "dd"),
            other => panic!("expected NoMatchingSignature, got {:?}", other),
        }
    }

    proptest! {
        // resolution is deterministic and always the first compatible entry
        #[test]
        fn resolution_is_deterministic(
            a in prop_oneof![Just(TypeCode::Bool), Just(TypeCode::Int), Just(TypeCode::Float)],
            b in prop_oneof![Just(TypeCode::Bool), Just(TypeCode::Int), Just(TypeCode::Float)],
        ) {
            let table = arithmetic_table();
            let first = resolve_ufunc("numpy.add", &table, &[a, b]).unwrap();
            let second = resolve_ufunc("numpy.add", &table, &[a, b]).unwrap();
            prop_assert_eq!(first, second);

            let expected = table
                .iter()
                .find(|sig| a.safe_casts_to(sig.inputs[0]) && b.safe_casts_to(sig.inputs[1]))
                .unwrap()
                .output;
            prop_assert_eq!(first, expected);
        }
    }

    // -----------------------------------------------------------------------
    // ufunc_cast
    // -----------------------------------------------------------------------

    fn run_cast(marker: Marker, library: &Library) -> Result<Ty, InferError> {
        let bound = BoundArgs::new();
        let cx = TfContext {
            callee: "numpy.add",
            bound: &bound,
            library,
        };
        ufunc_cast(&marker, &cx)
    }

    fn add_library() -> Library {
        let mut lib = Library::new();
        lib.register_ufunc("numpy.add", arithmetic_table()).unwrap();
        lib
    }

    #[test]
    fn cast_reduces_array_operands_to_element_codes() {
        let lib = add_library();
        let marker = Marker::new(
            MarkerKind::UfuncCast,
            vec![Ty::array(Ty::Int, Ty::Dim(1)), Ty::Float],
        );
        let result = run_cast(marker, &lib).unwrap();
        assert_eq!(result, Ty::Float);
    }

    #[test]
    fn cast_without_table_is_contract_violation() {
        let lib = Library::new();
        let marker = Marker::new(MarkerKind::UfuncCast, vec![Ty::Int, Ty::Int]);
        let err = run_cast(marker, &lib).unwrap_err();
        assert!(matches!(err, InferError::UnknownUfunc { .. }));
    }

    #[test]
    fn cast_untracked_operand_is_contract_violation() {
        let lib = add_library();
        let marker = Marker::new(MarkerKind::UfuncCast, vec![Ty::Any, Ty::Int]);
        let err = run_cast(marker, &lib).unwrap_err();
        assert!(matches!(err, InferError::UntrackedOperand { .. }));
    }
}
