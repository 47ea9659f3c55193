//! Literal ARI values.

use std::cmp::Ordering;
use std::fmt;

use crate::ari_type::AriType;
use crate::containers::{Ac, Am, ExecSet, RptSet, Tbl};
use crate::timecodec::Timespec;

/// The primitive class of a literal value.
///
/// Container-carrying literals report [`PrimType::Other`]; their structure
/// lives in the value itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PrimType {
    /// The undefined value.
    Undefined,
    /// The null value.
    Null,
    /// A boolean.
    Bool,
    /// An unsigned 64-bit integer.
    Uint64,
    /// A signed 64-bit integer.
    Int64,
    /// An IEEE-754 binary64 value.
    Float64,
    /// A UTF-8 text string.
    Tstr,
    /// An opaque byte string.
    Bstr,
    /// A split-seconds time value.
    Timespec,
    /// A container handle.
    Other,
}

/// The value carried by a literal.
#[derive(Debug, Clone)]
pub enum LitValue {
    /// The undefined value, which matches only itself.
    Undefined,
    /// The null value.
    Null,
    /// A boolean.
    Bool(bool),
    /// An unsigned 64-bit integer.
    Uint64(u64),
    /// A signed 64-bit integer.
    Int64(i64),
    /// An IEEE-754 binary64 value.
    Float64(f64),
    /// A UTF-8 text string.
    Tstr(String),
    /// An opaque byte string.
    Bstr(Vec<u8>),
    /// A split-seconds time value, carried by TP and TD literals.
    Timespec(Timespec),
    /// An array container.
    Ac(Ac),
    /// A map container.
    Am(Am),
    /// A table container.
    Tbl(Tbl),
    /// An execution-set container.
    ExecSet(Box<ExecSet>),
    /// A report-set container.
    RptSet(Box<RptSet>),
}

impl LitValue {
    /// Returns the primitive class of this value.
    #[must_use]
    pub const fn prim_type(&self) -> PrimType {
        match self {
            Self::Undefined => PrimType::Undefined,
            Self::Null => PrimType::Null,
            Self::Bool(_) => PrimType::Bool,
            Self::Uint64(_) => PrimType::Uint64,
            Self::Int64(_) => PrimType::Int64,
            Self::Float64(_) => PrimType::Float64,
            Self::Tstr(_) => PrimType::Tstr,
            Self::Bstr(_) => PrimType::Bstr,
            Self::Timespec(_) => PrimType::Timespec,
            Self::Ac(_) | Self::Am(_) | Self::Tbl(_) | Self::ExecSet(_) | Self::RptSet(_) => {
                PrimType::Other
            }
        }
    }

    /// Variant rank used for the canonical ordering.
    const fn rank(&self) -> u8 {
        match self {
            Self::Undefined => 0,
            Self::Null => 1,
            Self::Bool(_) => 2,
            Self::Uint64(_) => 3,
            Self::Int64(_) => 4,
            Self::Float64(_) => 5,
            Self::Tstr(_) => 6,
            Self::Bstr(_) => 7,
            Self::Timespec(_) => 8,
            Self::Ac(_) => 9,
            Self::Am(_) => 10,
            Self::Tbl(_) => 11,
            Self::ExecSet(_) => 12,
            Self::RptSet(_) => 13,
        }
    }
}

impl PartialEq for LitValue {
    /// Structural equality with the float rule: two NaN values are equal,
    /// everything else compares by IEEE value.
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Undefined, Self::Undefined) | (Self::Null, Self::Null) => true,
            (Self::Bool(l), Self::Bool(r)) => l == r,
            (Self::Uint64(l), Self::Uint64(r)) => l == r,
            (Self::Int64(l), Self::Int64(r)) => l == r,
            (Self::Float64(l), Self::Float64(r)) => {
                if l.is_nan() || r.is_nan() {
                    l.is_nan() && r.is_nan()
                } else {
                    l == r
                }
            }
            (Self::Tstr(l), Self::Tstr(r)) => l == r,
            (Self::Bstr(l), Self::Bstr(r)) => l == r,
            (Self::Timespec(l), Self::Timespec(r)) => l == r,
            (Self::Ac(l), Self::Ac(r)) => l == r,
            (Self::Am(l), Self::Am(r)) => l == r,
            (Self::Tbl(l), Self::Tbl(r)) => l == r,
            (Self::ExecSet(l), Self::ExecSet(r)) => l == r,
            (Self::RptSet(l), Self::RptSet(r)) => l == r,
            _ => false,
        }
    }
}

impl Eq for LitValue {}

impl PartialOrd for LitValue {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for LitValue {
    /// A canonical total order consistent with equality: NaN collapses to
    /// a single point above all other floats, and `-0.0` orders equal to
    /// `0.0`.
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Bool(l), Self::Bool(r)) => l.cmp(r),
            (Self::Uint64(l), Self::Uint64(r)) => l.cmp(r),
            (Self::Int64(l), Self::Int64(r)) => l.cmp(r),
            (Self::Float64(l), Self::Float64(r)) => float_total_cmp(*l, *r),
            (Self::Tstr(l), Self::Tstr(r)) => l.cmp(r),
            (Self::Bstr(l), Self::Bstr(r)) => l.cmp(r),
            (Self::Timespec(l), Self::Timespec(r)) => l.cmp(r),
            (Self::Ac(l), Self::Ac(r)) => l.cmp(r),
            (Self::Am(l), Self::Am(r)) => l.cmp(r),
            (Self::Tbl(l), Self::Tbl(r)) => l.cmp(r),
            (Self::ExecSet(l), Self::ExecSet(r)) => l.cmp(r),
            (Self::RptSet(l), Self::RptSet(r)) => l.cmp(r),
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

fn float_total_cmp(left: f64, right: f64) -> Ordering {
    match (left.is_nan(), right.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        // neither side is NaN, so a full comparison exists
        (false, false) => left.partial_cmp(&right).unwrap_or(Ordering::Equal),
    }
}

impl From<bool> for LitValue {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<u64> for LitValue {
    fn from(v: u64) -> Self {
        Self::Uint64(v)
    }
}

impl From<i64> for LitValue {
    fn from(v: i64) -> Self {
        Self::Int64(v)
    }
}

impl From<f64> for LitValue {
    fn from(v: f64) -> Self {
        Self::Float64(v)
    }
}

impl From<&str> for LitValue {
    fn from(v: &str) -> Self {
        Self::Tstr(v.to_string())
    }
}

impl From<String> for LitValue {
    fn from(v: String) -> Self {
        Self::Tstr(v)
    }
}

impl From<Vec<u8>> for LitValue {
    fn from(v: Vec<u8>) -> Self {
        Self::Bstr(v)
    }
}

impl From<Timespec> for LitValue {
    fn from(v: Timespec) -> Self {
        Self::Timespec(v)
    }
}

/// A literal ARI: a primitive or container value with an optional type tag.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct Lit {
    /// The resolved type tag, if any.
    pub ari_type: Option<AriType>,
    /// The carried value.
    pub value: LitValue,
}

/// A literal whose type tag and value do not agree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LitError {
    /// The offending tag, if any.
    pub ari_type: Option<AriType>,
    /// The primitive class of the offered value.
    pub prim_type: PrimType,
}

impl fmt::Display for LitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.ari_type {
            Some(t) => write!(
                f,
                "literal value of class {:?} does not fit type tag {t}",
                self.prim_type
            ),
            None => write!(
                f,
                "literal value of class {:?} requires a container type tag",
                self.prim_type
            ),
        }
    }
}

impl std::error::Error for LitError {}

impl Lit {
    /// Creates an untagged literal.
    ///
    /// # Errors
    ///
    /// Returns [`LitError`] for container values, which always require
    /// their matching type tag.
    pub fn untyped(value: LitValue) -> Result<Self, LitError> {
        if value.prim_type() == PrimType::Other {
            return Err(LitError { ari_type: None, prim_type: PrimType::Other });
        }
        Ok(Self { ari_type: None, value })
    }

    /// Creates a tagged literal, checking the tag/value pairing.
    ///
    /// # Errors
    ///
    /// Returns [`LitError`] when a TP or TD tag is paired with anything
    /// but a timespec, a container tag with the wrong container, or a
    /// container value with a non-container tag.
    pub fn typed(ari_type: AriType, value: LitValue) -> Result<Self, LitError> {
        let ok = match ari_type {
            AriType::Tp | AriType::Td => matches!(value, LitValue::Timespec(_)),
            AriType::Ac => matches!(value, LitValue::Ac(_)),
            AriType::Am => matches!(value, LitValue::Am(_)),
            AriType::Tbl => matches!(value, LitValue::Tbl(_)),
            AriType::ExecSet => matches!(value, LitValue::ExecSet(_)),
            AriType::RptSet => matches!(value, LitValue::RptSet(_)),
            _ => value.prim_type() != PrimType::Other,
        };
        if ok {
            Ok(Self { ari_type: Some(ari_type), value })
        } else {
            Err(LitError { ari_type: Some(ari_type), prim_type: value.prim_type() })
        }
    }

    /// Returns the primitive class of the carried value.
    #[must_use]
    pub const fn prim_type(&self) -> PrimType {
        self.value.prim_type()
    }
}
