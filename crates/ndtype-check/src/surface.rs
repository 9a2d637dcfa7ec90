//! A modeled numpy-like library surface.
//!
//! The declared signatures the engine is initialized against: array
//! constructors and factories, shape manipulators, reductions, element
//! access, and a handful of ufuncs with their typecode tables (the
//! library's declared promotion rules restricted to the tracked kinds).
//! Placeholder markers embedded in the declared return types are what the
//! engine's setup scan keys on.

use ndtype_core::error::CoreError;
use ndtype_core::kind::TypeCode;
use ndtype_core::library::{Library, Signature, UfuncSig};
use ndtype_core::types::{MarkerKind, Ty};

fn any_array() -> Ty {
    Ty::array(Ty::Any, Ty::Any)
}

/// Builds the surface.
pub fn numpy_surface() -> Result<Library, CoreError> {
    let mut lib = Library::new();

    // factories: dtype from the dtype argument (default float), rank from
    // the shape literal
    for name in ["numpy.zeros", "numpy.ones", "numpy.empty"] {
        lib.register(Signature::new(
            name,
            vec![
                ("shape", Ty::ShapeLike),
                ("dtype", Ty::DtypeLike),
                ("order", Ty::Any),
            ],
            Ty::array(
                Ty::marker(MarkerKind::InferDtypeWithDefault, vec![Ty::Float]),
                Ty::marker(MarkerKind::InferRankFromShape, vec![]),
            ),
        ))?;
    }

    for name in ["numpy.empty_like", "numpy.zeros_like"] {
        lib.register(Signature::new(
            name,
            vec![("prototype", any_array()), ("dtype", Ty::DtypeLike)],
            Ty::array(
                Ty::marker(MarkerKind::InferDtypeWithDefault, vec![Ty::Float]),
                Ty::Any,
            ),
        ))?;
    }

    lib.register(Signature::new(
        "numpy.arange",
        vec![
            ("start", Ty::Any),
            ("stop", Ty::Any),
            ("step", Ty::Any),
            ("dtype", Ty::DtypeLike),
        ],
        Ty::array(
            Ty::marker(MarkerKind::InferDtypeWithDefault, vec![Ty::Int]),
            Ty::Dim(1),
        ),
    ))?;

    // shape manipulation
    lib.register(Signature::new(
        "numpy.reshape",
        vec![
            ("a", any_array()),
            ("newshape", Ty::ShapeLike),
            ("order", Ty::Any),
        ],
        Ty::array(Ty::Any, Ty::marker(MarkerKind::InferRankFromShape, vec![])),
    ))?;
    lib.register(Signature::new(
        "numpy.ndarray.reshape",
        vec![
            ("self", any_array()),
            ("shape", Ty::ShapeLike),
            ("order", Ty::Any),
        ],
        Ty::array(Ty::Any, Ty::marker(MarkerKind::InferRankFromShape, vec![])),
    ))?;
    lib.register(Signature::new(
        "numpy.expand_dims",
        vec![("a", any_array()), ("axis", Ty::Int)],
        Ty::array(Ty::Any, Ty::marker(MarkerKind::RaiseDim, vec![Ty::Any])),
    ))?;
    lib.register(Signature::new(
        "numpy.diagonal",
        vec![
            ("a", any_array()),
            ("offset", Ty::Int),
            ("axis1", Ty::Int),
            ("axis2", Ty::Int),
        ],
        Ty::array(Ty::Any, Ty::marker(MarkerKind::LowerDim, vec![Ty::Any])),
    ))?;
    lib.register(Signature::new(
        "numpy.trace",
        vec![
            ("a", any_array()),
            ("offset", Ty::Int),
            ("axis1", Ty::Int),
            ("axis2", Ty::Int),
        ],
        Ty::array(Ty::Any, Ty::marker(MarkerKind::LowerDim2, vec![Ty::Any])),
    ))?;
    lib.register(Signature::new(
        "numpy.diag",
        vec![("v", any_array()), ("k", Ty::Int)],
        Ty::array(Ty::Any, Ty::marker(MarkerKind::ToggleDims1221, vec![Ty::Any])),
    ))?;

    // casting
    lib.register(Signature::new(
        "numpy.ndarray.astype",
        vec![("self", any_array()), ("dtype", Ty::DtypeLike)],
        Ty::array(Ty::marker(MarkerKind::InferDtype, vec![]), Ty::Any),
    ))?;

    // reductions
    lib.register(Signature::new(
        "numpy.sum",
        vec![
            ("a", any_array()),
            ("axis", Ty::AxesLike),
            ("dtype", Ty::DtypeLike),
            ("keepdims", Ty::Bool),
        ],
        Ty::array(
            Ty::Any,
            Ty::marker(MarkerKind::InferRankReduction, vec![Ty::Any]),
        ),
    ))?;
    lib.register(Signature::new(
        "numpy.all",
        vec![
            ("a", any_array()),
            ("axis", Ty::AxesLike),
            ("keepdims", Ty::Bool),
        ],
        Ty::array(
            Ty::Bool,
            Ty::marker(MarkerKind::InferRankReduction, vec![Ty::Any]),
        ),
    ))?;
    lib.register(Signature::new(
        "numpy.cumsum",
        vec![("a", any_array()), ("axis", Ty::Any), ("dtype", Ty::DtypeLike)],
        Ty::array(
            Ty::Any,
            Ty::marker(
                MarkerKind::InferRankIfAxisSpecified,
                vec![Ty::Dim(1), Ty::Any],
            ),
        ),
    ))?;

    // element access and constructors: hooked by fullname, no marker needed
    lib.register(Signature::new(
        "numpy.ndarray.__getitem__",
        vec![("self", any_array()), ("index", Ty::Any)],
        any_array(),
    ))?;
    for name in ["numpy.array", "numpy.asarray", "numpy.ascontiguousarray"] {
        lib.register(Signature::new(
            name,
            vec![("object", Ty::Any), ("dtype", Ty::DtypeLike)],
            any_array(),
        ))?;
    }

    // ufuncs, with their declared typecode tables
    for name in ["numpy.add", "numpy.multiply"] {
        lib.register(binary_ufunc(name))?;
        lib.register_ufunc(
            name,
            vec![
                UfuncSig::new(&[TypeCode::Bool, TypeCode::Bool], TypeCode::Bool),
                UfuncSig::new(&[TypeCode::Int, TypeCode::Int], TypeCode::Int),
                UfuncSig::new(&[TypeCode::Float, TypeCode::Float], TypeCode::Float),
            ],
        )?;
    }
    // boolean subtract was removed from the library; the table starts at int
    lib.register(binary_ufunc("numpy.subtract"))?;
    lib.register_ufunc(
        "numpy.subtract",
        vec![
            UfuncSig::new(&[TypeCode::Int, TypeCode::Int], TypeCode::Int),
            UfuncSig::new(&[TypeCode::Float, TypeCode::Float], TypeCode::Float),
        ],
    )?;
    lib.register(binary_ufunc("numpy.equal"))?;
    lib.register_ufunc(
        "numpy.equal",
        vec![
            UfuncSig::new(&[TypeCode::Bool, TypeCode::Bool], TypeCode::Bool),
            UfuncSig::new(&[TypeCode::Int, TypeCode::Int], TypeCode::Bool),
            UfuncSig::new(&[TypeCode::Float, TypeCode::Float], TypeCode::Bool),
        ],
    )?;
    lib.register(Signature::new(
        "numpy.sqrt",
        vec![("x", Ty::Any)],
        Ty::array(Ty::marker(MarkerKind::UfuncCast, vec![Ty::Any]), Ty::Any),
    ))?;
    lib.register_ufunc(
        "numpy.sqrt",
        vec![UfuncSig::new(&[TypeCode::Float], TypeCode::Float)],
    )?;

    Ok(lib)
}

fn binary_ufunc(name: &str) -> Signature {
    Signature::new(
        name,
        vec![("x1", Ty::Any), ("x2", Ty::Any)],
        Ty::array(
            Ty::marker(MarkerKind::UfuncCast, vec![Ty::Any, Ty::Any]),
            Ty::marker(MarkerKind::LargestDim, vec![Ty::Any, Ty::Any]),
        ),
    )
}
