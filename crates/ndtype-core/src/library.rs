//! The modeled array-library surface.
//!
//! [`Library`] is the host environment the engine is initialized against:
//! the array library's callable signatures (whose declared types may embed
//! placeholder markers) and the per-ufunc typecode signature tables sourced
//! from the library's own declared promotion rules. Registration rejects
//! duplicates; lookups are by fullname. Built once, read-only afterwards.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::error::CoreError;
use crate::kind::TypeCode;
use crate::types::Ty;

/// A formal parameter: name plus declared type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Param {
    pub name: String,
    pub ty: Ty,
}

/// A callable's declared signature. For methods the first parameter is the
/// receiver (`self`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Signature {
    pub fullname: String,
    pub params: Vec<Param>,
    pub ret: Ty,
}

impl Signature {
    /// Builds a signature from `(name, type)` parameter pairs.
    pub fn new(fullname: &str, params: Vec<(&str, Ty)>, ret: Ty) -> Signature {
        Signature {
            fullname: fullname.to_string(),
            params: params
                .into_iter()
                .map(|(name, ty)| Param {
                    name: name.to_string(),
                    ty,
                })
                .collect(),
            ret,
        }
    }
}

/// One input->output entry of a ufunc's declared signature table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UfuncSig {
    /// Input codes, one per operand.
    pub inputs: SmallVec<[TypeCode; 2]>,
    /// Output code.
    pub output: TypeCode,
}

impl UfuncSig {
    pub fn new(inputs: &[TypeCode], output: TypeCode) -> UfuncSig {
        UfuncSig {
            inputs: SmallVec::from_slice(inputs),
            output,
        }
    }
}

/// The array-library surface: callable signatures plus ufunc tables.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Library {
    functions: IndexMap<String, Signature>,
    ufuncs: IndexMap<String, Vec<UfuncSig>>,
}

impl Library {
    pub fn new() -> Library {
        Library::default()
    }

    /// Registers a callable signature, rejecting duplicate fullnames.
    pub fn register(&mut self, sig: Signature) -> Result<(), CoreError> {
        if self.functions.contains_key(&sig.fullname) {
            return Err(CoreError::DuplicateFunction {
                fullname: sig.fullname,
            });
        }
        self.functions.insert(sig.fullname.clone(), sig);
        Ok(())
    }

    /// Registers a ufunc's typecode table, in the library's declared order.
    pub fn register_ufunc(&mut self, fullname: &str, sigs: Vec<UfuncSig>) -> Result<(), CoreError> {
        if self.ufuncs.contains_key(fullname) {
            return Err(CoreError::DuplicateUfunc {
                fullname: fullname.to_string(),
            });
        }
        self.ufuncs.insert(fullname.to_string(), sigs);
        Ok(())
    }

    /// Looks up a callable signature by fullname.
    pub fn signature(&self, fullname: &str) -> Option<&Signature> {
        self.functions.get(fullname)
    }

    /// Looks up a ufunc's typecode table by fullname.
    pub fn ufunc_signatures(&self, fullname: &str) -> Option<&[UfuncSig]> {
        self.ufuncs.get(fullname).map(Vec::as_slice)
    }

    /// All registered callable signatures, in registration order.
    pub fn functions(&self) -> impl Iterator<Item = &Signature> {
        self.functions.values()
    }
}
