//! Element kinds and ufunc type codes.
//!
//! [`ElementKind`] is the tracked classification of array elements:
//! int, bool, float, or Unknown. [`TypeCode`] is the single-character code
//! used by ufunc signature tables, with the safe-cast order
//! bool -> int -> float.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::types::Ty;

/// Element kind of an array or scalar. Anything outside the tracked set
/// maps to `Unknown`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ElementKind {
    Int,
    Bool,
    Float,
    Unknown,
}

impl ElementKind {
    /// Classifies a resolved scalar type. Non-scalar and untracked types
    /// are `Unknown`.
    pub fn of_ty(ty: &Ty) -> ElementKind {
        match ty {
            Ty::Int => ElementKind::Int,
            Ty::Bool => ElementKind::Bool,
            Ty::Float => ElementKind::Float,
            _ => ElementKind::Unknown,
        }
    }

    /// Renders the kind as a resolved scalar type (`Unknown` -> [`Ty::Any`]).
    pub fn as_ty(self) -> Ty {
        match self {
            ElementKind::Int => Ty::Int,
            ElementKind::Bool => Ty::Bool,
            ElementKind::Float => Ty::Float,
            ElementKind::Unknown => Ty::Any,
        }
    }

    /// The ufunc type code for this kind, or `None` for `Unknown`.
    pub fn type_code(self) -> Option<TypeCode> {
        match self {
            ElementKind::Int => Some(TypeCode::Int),
            ElementKind::Bool => Some(TypeCode::Bool),
            ElementKind::Float => Some(TypeCode::Float),
            ElementKind::Unknown => None,
        }
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ElementKind::Int => "int",
            ElementKind::Bool => "bool",
            ElementKind::Float => "float",
            ElementKind::Unknown => "Any",
        };
        write!(f, "{}", s)
    }
}

/// Classifies a dtype name (bare name, string literal, or the last
/// component of a dotted attribute) into an element kind.
///
/// Covers the spellings the array library accepts for the tracked kinds,
/// including single-character codes. Note the code `'b'` is a signed byte
/// (int kind), while `"bool"` and `'?'` are bool kind.
pub fn dtype_name_kind(name: &str) -> ElementKind {
    match name {
        "bool" | "bool_" | "?" | "b1" => ElementKind::Bool,
        "b" | "h" | "i" | "l" | "q" | "p" | "int" | "int8" | "int16" | "int32" | "int64"
        | "intp" | "byte" | "short" | "long" | "longlong" => ElementKind::Int,
        "e" | "f" | "d" | "g" | "float" | "float16" | "float32" | "float64" | "half"
        | "single" | "double" | "longdouble" => ElementKind::Float,
        _ => ElementKind::Unknown,
    }
}

/// Single-character type code used in ufunc signature tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TypeCode {
    /// `?` -- boolean
    Bool,
    /// `l` -- default integer
    Int,
    /// `d` -- double-precision float
    Float,
}

impl TypeCode {
    /// The character the array library uses for this code.
    pub fn as_char(self) -> char {
        match self {
            TypeCode::Bool => '?',
            TypeCode::Int => 'l',
            TypeCode::Float => 'd',
        }
    }

    /// The element kind this code denotes.
    pub fn kind(self) -> ElementKind {
        match self {
            TypeCode::Bool => ElementKind::Bool,
            TypeCode::Int => ElementKind::Int,
            TypeCode::Float => ElementKind::Float,
        }
    }

    /// Position in the safe-cast chain bool -> int -> float.
    fn promotion_rank(self) -> u8 {
        match self {
            TypeCode::Bool => 0,
            TypeCode::Int => 1,
            TypeCode::Float => 2,
        }
    }

    /// Whether a value of this code can be safely widened to `to`.
    /// Reflexive; never narrows.
    pub fn safe_casts_to(self, to: TypeCode) -> bool {
        self.promotion_rank() <= to.promotion_rank()
    }
}

impl fmt::Display for TypeCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // -----------------------------------------------------------------------
    // ElementKind
    // -----------------------------------------------------------------------

    #[test]
    fn kind_roundtrips_through_ty() {
        for kind in [
            ElementKind::Int,
            ElementKind::Bool,
            ElementKind::Float,
            ElementKind::Unknown,
        ] {
            assert_eq!(ElementKind::of_ty(&kind.as_ty()), kind);
        }
    }

    #[test]
    fn bool_is_not_classified_as_int() {
        assert_eq!(ElementKind::of_ty(&Ty::Bool), ElementKind::Bool);
        assert_ne!(ElementKind::of_ty(&Ty::Bool), ElementKind::Int);
    }

    #[test]
    fn non_scalars_are_unknown() {
        assert_eq!(ElementKind::of_ty(&Ty::Slice), ElementKind::Unknown);
        assert_eq!(ElementKind::of_ty(&Ty::Any), ElementKind::Unknown);
    }

    // -----------------------------------------------------------------------
    // dtype_name_kind
    // -----------------------------------------------------------------------

    #[test]
    fn dtype_names_full_spellings() {
        assert_eq!(dtype_name_kind("int"), ElementKind::Int);
        assert_eq!(dtype_name_kind("int32"), ElementKind::Int);
        assert_eq!(dtype_name_kind("bool"), ElementKind::Bool);
        assert_eq!(dtype_name_kind("float"), ElementKind::Float);
        assert_eq!(dtype_name_kind("float64"), ElementKind::Float);
    }

    #[test]
    fn dtype_single_char_codes() {
        // 'b' is a signed byte, not bool
        assert_eq!(dtype_name_kind("b"), ElementKind::Int);
        assert_eq!(dtype_name_kind("?"), ElementKind::Bool);
        assert_eq!(dtype_name_kind("i"), ElementKind::Int);
        assert_eq!(dtype_name_kind("d"), ElementKind::Float);
    }

    #[test]
    fn untracked_dtype_names_are_unknown() {
        assert_eq!(dtype_name_kind("complex128"), ElementKind::Unknown);
        assert_eq!(dtype_name_kind("str"), ElementKind::Unknown);
        assert_eq!(dtype_name_kind(""), ElementKind::Unknown);
    }

    // -----------------------------------------------------------------------
    // TypeCode
    // -----------------------------------------------------------------------

    #[test]
    fn safe_cast_chain() {
        assert!(TypeCode::Bool.safe_casts_to(TypeCode::Bool));
        assert!(TypeCode::Bool.safe_casts_to(TypeCode::Int));
        assert!(TypeCode::Bool.safe_casts_to(TypeCode::Float));
        assert!(TypeCode::Int.safe_casts_to(TypeCode::Float));
    }

    #[test]
    fn safe_cast_never_narrows() {
        assert!(!TypeCode::Int.safe_casts_to(TypeCode::Bool));
        assert!(!TypeCode::Float.safe_casts_to(TypeCode::Int));
        assert!(!TypeCode::Float.safe_casts_to(TypeCode::Bool));
    }

    #[test]
    fn code_chars() {
        assert_eq!(TypeCode::Bool.as_char(), '?');
        assert_eq!(TypeCode::Int.as_char(), 'l');
        assert_eq!(TypeCode::Float.as_char(), 'd');
    }

    #[test]
    fn code_kind_roundtrip() {
        for code in [TypeCode::Bool, TypeCode::Int, TypeCode::Float] {
            assert_eq!(code.kind().type_code(), Some(code));
        }
        assert_eq!(ElementKind::Unknown.type_code(), None);
    }
}
