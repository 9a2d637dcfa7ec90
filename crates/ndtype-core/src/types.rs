//! The resolved-type model.
//!
//! [`Ty`] is the closed set of type shapes the supported array-library
//! surface produces: scalar kinds, index building blocks (None, ellipsis,
//! slice), nominal dimension tags, the generic array type, tuples, lists
//! and sequences, the formal-parameter marker aliases, placeholder markers,
//! and Any. Exhaustive matching over this enum is what makes the type-tree
//! rewriter total.
//!
//! Placeholder markers ([`Marker`]) are nominal tags embedded in declared
//! return types; they are never inhabited at runtime and exist only to
//! select an inference rule.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::rank::DIM_NAMES;

/// A resolved type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Ty {
    /// Scalar integer.
    Int,
    /// Scalar boolean. A refinement of integer for subtyping purposes, but
    /// a distinct kind for inference.
    Bool,
    /// Scalar float.
    Float,
    /// The None/null type (newaxis in index position).
    None,
    /// The ellipsis type.
    Ellipsis,
    /// A slice object.
    Slice,
    /// Nominal dimension tag (ZeroD, OneD, ...).
    Dim(u8),
    /// The generic array type, parameterized by element type and
    /// dimension tag. Either argument may be a marker or [`Ty::Any`].
    Array { elem: Box<Ty>, dim: Box<Ty> },
    /// Fixed-length heterogeneous tuple.
    Tuple(Vec<Ty>),
    /// `list[T]`.
    List(Box<Ty>),
    /// `Sequence[T]`.
    Sequence(Box<Ty>),
    /// Formal-parameter alias for shape arguments.
    ShapeLike,
    /// Formal-parameter alias for axis arguments.
    AxesLike,
    /// Formal-parameter alias for dtype arguments.
    DtypeLike,
    /// A placeholder marker instance in a declared type.
    Marker(Marker),
    /// Statically unknown.
    Any,
}

impl Ty {
    /// Builds an array type.
    pub fn array(elem: Ty, dim: Ty) -> Ty {
        Ty::Array {
            elem: Box::new(elem),
            dim: Box::new(dim),
        }
    }

    /// Builds a `list[T]`.
    pub fn list(elem: Ty) -> Ty {
        Ty::List(Box::new(elem))
    }

    /// Builds a `Sequence[T]`.
    pub fn seq(elem: Ty) -> Ty {
        Ty::Sequence(Box::new(elem))
    }

    /// Builds a marker instance.
    pub fn marker(kind: MarkerKind, args: Vec<Ty>) -> Ty {
        Ty::Marker(Marker { kind, args })
    }

    /// Whether any placeholder marker occurs anywhere in this type. Used
    /// at engine setup to decide which callables get hooked.
    pub fn contains_marker(&self) -> bool {
        match self {
            Ty::Marker(_) => true,
            Ty::Array { elem, dim } => elem.contains_marker() || dim.contains_marker(),
            Ty::Tuple(items) => items.iter().any(Ty::contains_marker),
            Ty::List(elem) | Ty::Sequence(elem) => elem.contains_marker(),
            Ty::Int
            | Ty::Bool
            | Ty::Float
            | Ty::None
            | Ty::Ellipsis
            | Ty::Slice
            | Ty::Dim(_)
            | Ty::ShapeLike
            | Ty::AxesLike
            | Ty::DtypeLike
            | Ty::Any => false,
        }
    }
}

impl fmt::Display for Ty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Ty::Int => write!(f, "int"),
            Ty::Bool => write!(f, "bool"),
            Ty::Float => write!(f, "float"),
            Ty::None => write!(f, "None"),
            Ty::Ellipsis => write!(f, "..."),
            Ty::Slice => write!(f, "slice"),
            Ty::Dim(n) => match DIM_NAMES.get(*n as usize) {
                Some(name) => write!(f, "{}", name),
                None => write!(f, "{}D", n),
            },
            Ty::Array { elem, dim } => write!(f, "ndarray[{}, {}]", elem, dim),
            Ty::Tuple(items) => {
                write!(f, "Tuple[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, "]")
            }
            Ty::List(elem) => write!(f, "list[{}]", elem),
            Ty::Sequence(elem) => write!(f, "Sequence[{}]", elem),
            Ty::ShapeLike => write!(f, "ShapeType"),
            Ty::AxesLike => write!(f, "AxesType"),
            Ty::DtypeLike => write!(f, "DtypeType"),
            Ty::Marker(m) => write!(f, "{}", m),
            Ty::Any => write!(f, "Any"),
        }
    }
}

/// A placeholder marker instance: the marker kind plus the generic
/// arguments the declared type applied it to. Handlers read their inputs
/// from `args`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Marker {
    pub kind: MarkerKind,
    pub args: Vec<Ty>,
}

impl Marker {
    pub fn new(kind: MarkerKind, args: Vec<Ty>) -> Marker {
        Marker { kind, args }
    }
}

impl fmt::Display for Marker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.kind)?;
        if !self.args.is_empty() {
            write!(f, "[")?;
            for (i, arg) in self.args.iter().enumerate() {
                if i > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{}", arg)?;
            }
            write!(f, "]")?;
        }
        Ok(())
    }
}

/// The closed set of placeholder marker kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MarkerKind {
    /// Result rank = argument rank + 1.
    RaiseDim,
    /// Result rank = argument rank - 1.
    LowerDim,
    /// Result rank = argument rank - 2.
    LowerDim2,
    /// Result rank swaps 1 <-> 2; total only over those two ranks.
    ToggleDims1221,
    /// Result rank from the literal structure of the shape argument.
    InferRankFromShape,
    /// Result rank from axis/keepdims reduction rules.
    InferRankReduction,
    /// Result rank chosen by whether an axis argument was supplied.
    InferRankIfAxisSpecified,
    /// Element kind from the dtype argument; Unknown when absent.
    InferDtype,
    /// Element kind from the dtype argument; declared default when absent.
    InferDtypeWithDefault,
    /// The greater of two rank tags (broadcast result rank).
    LargestDim,
    /// Element kind from the ufunc signature table.
    UfuncCast,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_scalars_and_tags() {
        assert_eq!(Ty::Int.to_string(), "int");
        assert_eq!(Ty::Dim(2).to_string(), "TwoD");
        assert_eq!(Ty::Any.to_string(), "Any");
    }

    #[test]
    fn display_array_and_containers() {
        let arr = Ty::array(Ty::Float, Ty::Dim(2));
        insta::assert_snapshot!(arr.to_string(), @"ndarray[float, TwoD]");

        let tup = Ty::Tuple(vec![Ty::Int, Ty::Slice]);
        insta::assert_snapshot!(tup.to_string(), @"Tuple[int, slice]");

        insta::assert_snapshot!(Ty::list(Ty::Int).to_string(), @"list[int]");
        insta::assert_snapshot!(Ty::seq(Ty::seq(Ty::Bool)).to_string(), @"Sequence[Sequence[bool]]");
    }

    #[test]
    fn display_markers() {
        let m = Ty::marker(MarkerKind::RaiseDim, vec![Ty::Dim(1)]);
        insta::assert_snapshot!(m.to_string(), @"RaiseDim[OneD]");

        let bare = Ty::marker(MarkerKind::InferRankFromShape, vec![]);
        insta::assert_snapshot!(bare.to_string(), @"InferRankFromShape");
    }

    #[test]
    fn contains_marker_finds_nested_occurrences() {
        let ty = Ty::array(
            Ty::marker(MarkerKind::InferDtype, vec![]),
            Ty::Dim(1),
        );
        assert!(ty.contains_marker());

        let deep = Ty::Tuple(vec![
            Ty::Int,
            Ty::seq(Ty::array(Ty::Float, Ty::marker(MarkerKind::LowerDim, vec![Ty::Any]))),
        ]);
        assert!(deep.contains_marker());
    }

    #[test]
    fn contains_marker_false_for_plain_types() {
        assert!(!Ty::array(Ty::Float, Ty::Dim(2)).contains_marker());
        assert!(!Ty::Tuple(vec![Ty::Int, Ty::Slice]).contains_marker());
        assert!(!Ty::ShapeLike.contains_marker());
    }

    #[test]
    fn serde_roundtrip_array_type() {
        let ty = Ty::array(Ty::Float, Ty::Dim(2));
        let json = serde_json::to_string(&ty).unwrap();
        let back: Ty = serde_json::from_str(&json).unwrap();
        assert_eq!(ty, back);
    }

    #[test]
    fn serde_roundtrip_marker() {
        let ty = Ty::marker(MarkerKind::InferDtypeWithDefault, vec![Ty::Float]);
        let json = serde_json::to_string(&ty).unwrap();
        let back: Ty = serde_json::from_str(&json).unwrap();
        assert_eq!(ty, back);
    }
}
