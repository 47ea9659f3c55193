//! The ARI sum type.

use std::convert::Infallible;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::ControlFlow;

use crate::ari_type::AriType;
use crate::containers::{Ac, Am, ExecSet, RptSet, Tbl};
use crate::lit::{Lit, LitError, LitValue};
use crate::objpath::{ObjPath, ObjRef};
use crate::timecodec::Timespec;
use crate::visit::{visit, VisitCtx, Visitor};

/// An AMM Resource Identifier: a typed literal value or an object
/// reference.
///
/// ARIs are built bottom-up and treated as immutable once constructed;
/// codecs and comparators take shared references and never mutate.
///
/// # Examples
///
/// ```
/// use dtn_ari::{Ari, AriType};
///
/// let tagged = Ari::typed(AriType::Int, (-42i64).into()).unwrap();
/// let plain = Ari::from(true);
/// assert!(tagged.is_lit());
/// assert!(!plain.is_ref());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum Ari {
    /// A literal value.
    Lit(Lit),
    /// An object reference.
    Ref(ObjRef),
}

impl Ari {
    /// The undefined value.
    pub const UNDEFINED: Self = Self::Lit(Lit { ari_type: None, value: LitValue::Undefined });

    /// The untagged null value.
    pub const NULL: Self = Self::Lit(Lit { ari_type: None, value: LitValue::Null });

    /// Creates a tagged literal, checking the tag/value pairing.
    ///
    /// # Errors
    ///
    /// Returns [`LitError`] when the tag and value disagree; see
    /// [`Lit::typed`].
    pub fn typed(ari_type: AriType, value: LitValue) -> Result<Self, LitError> {
        Lit::typed(ari_type, value).map(Self::Lit)
    }

    /// Creates an untagged literal.
    ///
    /// # Errors
    ///
    /// Returns [`LitError`] for container values; see [`Lit::untyped`].
    pub fn untyped(value: LitValue) -> Result<Self, LitError> {
        Lit::untyped(value).map(Self::Lit)
    }

    /// Creates a TP literal from a DTN-relative time.
    #[must_use]
    pub const fn tp(value: Timespec) -> Self {
        Self::Lit(Lit { ari_type: Some(AriType::Tp), value: LitValue::Timespec(value) })
    }

    /// Creates a TD literal from a time span.
    #[must_use]
    pub const fn td(value: Timespec) -> Self {
        Self::Lit(Lit { ari_type: Some(AriType::Td), value: LitValue::Timespec(value) })
    }

    /// Returns true for the reference variant.
    #[must_use]
    pub const fn is_ref(&self) -> bool {
        matches!(self, Self::Ref(_))
    }

    /// Returns true for the literal variant.
    #[must_use]
    pub const fn is_lit(&self) -> bool {
        matches!(self, Self::Lit(_))
    }

    /// Returns true for the undefined value.
    #[must_use]
    pub const fn is_undefined(&self) -> bool {
        matches!(self, Self::Lit(Lit { value: LitValue::Undefined, .. }))
    }

    /// Returns the literal contents, if this is a literal.
    #[must_use]
    pub const fn as_lit(&self) -> Option<&Lit> {
        match self {
            Self::Lit(lit) => Some(lit),
            Self::Ref(_) => None,
        }
    }

    /// Returns the reference contents, if this is a reference.
    #[must_use]
    pub const fn as_objref(&self) -> Option<&ObjRef> {
        match self {
            Self::Ref(objref) => Some(objref),
            Self::Lit(_) => None,
        }
    }
}

impl Default for Ari {
    /// The undefined value.
    fn default() -> Self {
        Self::UNDEFINED
    }
}

impl From<Lit> for Ari {
    fn from(lit: Lit) -> Self {
        Self::Lit(lit)
    }
}

impl From<ObjRef> for Ari {
    fn from(objref: ObjRef) -> Self {
        Self::Ref(objref)
    }
}

impl From<ObjPath> for Ari {
    fn from(path: ObjPath) -> Self {
        Self::Ref(ObjRef::new(path))
    }
}

impl From<bool> for Ari {
    fn from(v: bool) -> Self {
        Self::Lit(Lit { ari_type: None, value: LitValue::Bool(v) })
    }
}

impl From<u64> for Ari {
    fn from(v: u64) -> Self {
        Self::Lit(Lit { ari_type: None, value: LitValue::Uint64(v) })
    }
}

impl From<i64> for Ari {
    fn from(v: i64) -> Self {
        Self::Lit(Lit { ari_type: None, value: LitValue::Int64(v) })
    }
}

impl From<f64> for Ari {
    fn from(v: f64) -> Self {
        Self::Lit(Lit { ari_type: None, value: LitValue::Float64(v) })
    }
}

impl From<&str> for Ari {
    fn from(v: &str) -> Self {
        Self::Lit(Lit { ari_type: None, value: LitValue::Tstr(v.to_string()) })
    }
}

impl From<String> for Ari {
    fn from(v: String) -> Self {
        Self::Lit(Lit { ari_type: None, value: LitValue::Tstr(v) })
    }
}

impl From<Vec<u8>> for Ari {
    fn from(v: Vec<u8>) -> Self {
        Self::Lit(Lit { ari_type: None, value: LitValue::Bstr(v) })
    }
}

impl From<Ac> for Ari {
    fn from(v: Ac) -> Self {
        Self::Lit(Lit { ari_type: Some(AriType::Ac), value: LitValue::Ac(v) })
    }
}

impl From<Am> for Ari {
    fn from(v: Am) -> Self {
        Self::Lit(Lit { ari_type: Some(AriType::Am), value: LitValue::Am(v) })
    }
}

impl From<Tbl> for Ari {
    fn from(v: Tbl) -> Self {
        Self::Lit(Lit { ari_type: Some(AriType::Tbl), value: LitValue::Tbl(v) })
    }
}

impl From<ExecSet> for Ari {
    fn from(v: ExecSet) -> Self {
        Self::Lit(Lit { ari_type: Some(AriType::ExecSet), value: LitValue::ExecSet(Box::new(v)) })
    }
}

impl From<RptSet> for Ari {
    fn from(v: RptSet) -> Self {
        Self::Lit(Lit { ari_type: Some(AriType::RptSet), value: LitValue::RptSet(Box::new(v)) })
    }
}

/// Bit pattern used for hashing a float: every NaN payload collapses to
/// the canonical NaN, and negative zero to positive zero, so equal values
/// hash alike.
fn canonical_f64_bits(value: f64) -> u64 {
    if value.is_nan() {
        f64::NAN.to_bits()
    } else if value == 0.0 {
        0
    } else {
        value.to_bits()
    }
}

/// Accumulates structure-dependent contributions by walking the tree.
struct HashVisitor<'a, H: Hasher> {
    state: &'a mut H,
}

impl<H: Hasher> Visitor for HashVisitor<'_, H> {
    type Break = Infallible;

    fn visit_objpath(&mut self, path: &ObjPath, _ctx: &VisitCtx<'_>) -> ControlFlow<Infallible> {
        path.hash(self.state);
        ControlFlow::Continue(())
    }

    fn visit_lit(&mut self, lit: &Lit, _ctx: &VisitCtx<'_>) -> ControlFlow<Infallible> {
        lit.ari_type.is_some().hash(self.state);
        if let Some(t) = lit.ari_type {
            t.code().hash(self.state);
        }
        if let LitValue::Tbl(tbl) = &lit.value {
            tbl.ncols.hash(self.state);
        }
        lit.prim_type().hash(self.state);
        match &lit.value {
            LitValue::Undefined | LitValue::Null => {}
            LitValue::Bool(v) => v.hash(self.state),
            LitValue::Uint64(v) => v.hash(self.state),
            LitValue::Int64(v) => v.hash(self.state),
            LitValue::Float64(v) => canonical_f64_bits(*v).hash(self.state),
            LitValue::Tstr(v) => v.hash(self.state),
            LitValue::Bstr(v) => v.hash(self.state),
            LitValue::Timespec(v) => v.hash(self.state),
            // container contents are visited separately
            LitValue::Ac(_)
            | LitValue::Am(_)
            | LitValue::Tbl(_)
            | LitValue::ExecSet(_)
            | LitValue::RptSet(_) => {}
        }
        ControlFlow::Continue(())
    }
}

impl Hash for Ari {
    fn hash<H: Hasher>(&self, state: &mut H) {
        let mut visitor = HashVisitor { state };
        // the hash visitor never breaks
        let _ = visit(self, &mut visitor);
    }
}

impl fmt::Display for Ari {
    /// The canonical text form with default encoder options.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = crate::text::encode(self, &crate::text::EncodeOptions::default())
            .map_err(|_| fmt::Error)?;
        write!(f, "{text}")
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Ari {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let text = crate::text::encode(self, &crate::text::EncodeOptions::default())
            .map_err(serde::ser::Error::custom)?;
        serializer.serialize_str(&text)
    }
}
