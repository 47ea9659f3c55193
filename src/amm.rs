//! Value production for managed-object descriptors.
//!
//! Constant and externally-defined-data descriptors populate a
//! [`ValProdCtx`] with an ARI value; EDD production then converts the
//! result to the descriptor's declared type. Produced values are logged at
//! debug level in their canonical text form; logging is best-effort and
//! never affects the produced value.

use std::fmt;

use tracing::debug;

use crate::ari::Ari;
use crate::ari_type::AriType;
use crate::lit::{Lit, LitValue, PrimType};
use crate::text::{encode, EncodeOptions};

/// Canonical text of a value for the debug log, tolerating malformed
/// trees.
fn render(ari: &Ari) -> String {
    encode(ari, &EncodeOptions::default()).unwrap_or_else(|_| "<unencodable>".to_string())
}

/// A value-production context: the mutable slot descriptors fill.
#[derive(Debug, Default)]
pub struct ValProdCtx {
    /// The produced value, undefined until production succeeds.
    pub value: Ari,
}

impl ValProdCtx {
    /// Creates a context holding the undefined value.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

/// A literal value that cannot be converted to the requested type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConvertError {
    /// The value's class has no conversion to the target type.
    Incompatible {
        /// The target type.
        target: AriType,
        /// The primitive class of the value, absent for references.
        prim_type: Option<PrimType>,
    },
    /// A numeric value outside the target type's range.
    OutOfRange {
        /// The target type.
        target: AriType,
    },
}

impl fmt::Display for ConvertError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Incompatible { target, prim_type } => match prim_type {
                Some(p) => write!(f, "cannot convert {p:?} value to type {target}"),
                None => write!(f, "cannot convert object reference to type {target}"),
            },
            Self::OutOfRange { target } => {
                write!(f, "numeric value out of range for type {target}")
            }
        }
    }
}

impl std::error::Error for ConvertError {}

/// Value production failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProduceError {
    /// The producer left the context undefined.
    Undefined,
    /// The produced value did not convert to the declared type.
    Convert(ConvertError),
}

impl fmt::Display for ProduceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Undefined => write!(f, "production yielded the undefined value"),
            Self::Convert(e) => write!(f, "produced value has the wrong type: {e}"),
        }
    }
}

impl std::error::Error for ProduceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Undefined => None,
            Self::Convert(e) => Some(e),
        }
    }
}

impl From<ConvertError> for ProduceError {
    fn from(e: ConvertError) -> Self {
        Self::Convert(e)
    }
}

/// A constant-object descriptor.
#[derive(Debug, Clone)]
pub struct ConstDesc {
    /// The constant value.
    value: Ari,
}

impl ConstDesc {
    /// Creates a descriptor around a constant value.
    #[must_use]
    pub const fn new(value: Ari) -> Self {
        Self { value }
    }

    /// Returns the constant value.
    #[must_use]
    pub const fn value(&self) -> &Ari {
        &self.value
    }

    /// Copies the constant into the production context.
    pub fn produce(&self, ctx: &mut ValProdCtx) {
        ctx.value = self.value.clone();
        debug!("production finished with value {}", render(&ctx.value));
    }
}

/// The callback an EDD descriptor uses to produce its value.
pub type Producer = Box<dyn Fn(&mut ValProdCtx) + Send + Sync>;

/// An externally-defined-data descriptor: a declared result type and a
/// producer callback.
pub struct EddDesc {
    type_obj: AriType,
    producer: Producer,
}

impl fmt::Debug for EddDesc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EddDesc")
            .field("type_obj", &self.type_obj)
            .finish_non_exhaustive()
    }
}

impl EddDesc {
    /// Creates a descriptor with a declared type and producer.
    #[must_use]
    pub fn new(type_obj: AriType, producer: Producer) -> Self {
        Self { type_obj, producer }
    }

    /// Returns the declared result type.
    #[must_use]
    pub const fn type_obj(&self) -> AriType {
        self.type_obj
    }

    /// Runs the producer and converts the result to the declared type.
    ///
    /// # Errors
    ///
    /// Returns [`ProduceError::Undefined`] when the producer leaves the
    /// context undefined, or a conversion error when the produced value
    /// does not fit the declared type.
    pub fn produce(&self, ctx: &mut ValProdCtx) -> Result<(), ProduceError> {
        (self.producer)(ctx);
        debug!("production finished with value {}", render(&ctx.value));

        if ctx.value.is_undefined() {
            return Err(ProduceError::Undefined);
        }

        // force the declared output type
        ctx.value = convert(&ctx.value, self.type_obj)?;
        Ok(())
    }
}

/// Converts a value to the given ARI type, retagging and range-checking
/// literals.
///
/// # Errors
///
/// Returns [`ConvertError`] when the value's class has no conversion to
/// `target` or a numeric value falls outside the target range.
pub fn convert(value: &Ari, target: AriType) -> Result<Ari, ConvertError> {
    let Some(lit) = value.as_lit() else {
        // references convert only to object types
        if target.is_literal() {
            return Err(ConvertError::Incompatible { target, prim_type: None });
        }
        return Ok(value.clone());
    };

    let incompatible = || ConvertError::Incompatible {
        target,
        prim_type: Some(lit.prim_type()),
    };

    let converted = match target {
        AriType::Literal => {
            // containers cannot shed their tag
            if lit.prim_type() == PrimType::Other {
                return Err(incompatible());
            }
            return Ok(Ari::Lit(Lit { ari_type: None, value: lit.value.clone() }));
        }
        AriType::Null => match lit.value {
            LitValue::Null => LitValue::Null,
            _ => return Err(incompatible()),
        },
        AriType::Bool => match lit.value {
            LitValue::Bool(v) => LitValue::Bool(v),
            _ => return Err(incompatible()),
        },
        AriType::Byte => LitValue::Uint64(convert_uint(lit, 0xFF, target)?),
        AriType::Uint => LitValue::Uint64(convert_uint(lit, u64::from(u32::MAX), target)?),
        AriType::Uvast => LitValue::Uint64(convert_uint(lit, u64::MAX, target)?),
        AriType::Int => {
            LitValue::Int64(convert_int(lit, i64::from(i32::MIN), i64::from(i32::MAX), target)?)
        }
        AriType::Vast => LitValue::Int64(convert_int(lit, i64::MIN, i64::MAX, target)?),
        AriType::Real32 => {
            let wide = as_float(lit).ok_or_else(incompatible)?;
            LitValue::Float64(f64::from(wide as f32))
        }
        AriType::Real64 => LitValue::Float64(as_float(lit).ok_or_else(incompatible)?),
        AriType::TextStr | AriType::Label => match &lit.value {
            LitValue::Tstr(s) => LitValue::Tstr(s.clone()),
            _ => return Err(incompatible()),
        },
        AriType::ByteStr | AriType::Cbor => match &lit.value {
            LitValue::Bstr(b) => LitValue::Bstr(b.clone()),
            _ => return Err(incompatible()),
        },
        AriType::AriType => match &lit.value {
            LitValue::Int64(code) if crate::ari_type::AriType::from_code(*code).is_some() => {
                LitValue::Int64(*code)
            }
            LitValue::Tstr(name) => match crate::ari_type::AriType::from_name(name) {
                Some(t) => LitValue::Int64(i64::from(t.code())),
                None => return Err(incompatible()),
            },
            _ => return Err(incompatible()),
        },
        AriType::Tp | AriType::Td => match lit.value {
            LitValue::Timespec(ts) => LitValue::Timespec(ts),
            _ => return Err(incompatible()),
        },
        AriType::Ac => match &lit.value {
            LitValue::Ac(v) => LitValue::Ac(v.clone()),
            _ => return Err(incompatible()),
        },
        AriType::Am => match &lit.value {
            LitValue::Am(v) => LitValue::Am(v.clone()),
            _ => return Err(incompatible()),
        },
        AriType::Tbl => match &lit.value {
            LitValue::Tbl(v) => LitValue::Tbl(v.clone()),
            _ => return Err(incompatible()),
        },
        AriType::ExecSet => match &lit.value {
            LitValue::ExecSet(v) => LitValue::ExecSet(v.clone()),
            _ => return Err(incompatible()),
        },
        AriType::RptSet => match &lit.value {
            LitValue::RptSet(v) => LitValue::RptSet(v.clone()),
            _ => return Err(incompatible()),
        },
        AriType::Object | AriType::Ident | AriType::Const | AriType::Ctrl => {
            return Err(incompatible());
        }
    };

    Ok(Ari::Lit(Lit { ari_type: Some(target), value: converted }))
}

fn is_numeric(lit: &Lit) -> bool {
    matches!(
        lit.value,
        LitValue::Uint64(_) | LitValue::Int64(_) | LitValue::Float64(_)
    )
}

/// Extracts an unsigned value no greater than `max`, accepting unsigned,
/// non-negative signed, and integral float inputs.
fn convert_uint(lit: &Lit, max: u64, target: AriType) -> Result<u64, ConvertError> {
    if !is_numeric(lit) {
        return Err(ConvertError::Incompatible { target, prim_type: Some(lit.prim_type()) });
    }
    let value = match lit.value {
        LitValue::Uint64(v) => Some(v),
        LitValue::Int64(v) => u64::try_from(v).ok(),
        LitValue::Float64(v) if v.fract() == 0.0 && v >= 0.0 && v <= max as f64 => Some(v as u64),
        _ => None,
    };
    value
        .filter(|v| *v <= max)
        .ok_or(ConvertError::OutOfRange { target })
}

/// Extracts a signed value within `[min, max]`.
fn convert_int(lit: &Lit, min: i64, max: i64, target: AriType) -> Result<i64, ConvertError> {
    if !is_numeric(lit) {
        return Err(ConvertError::Incompatible { target, prim_type: Some(lit.prim_type()) });
    }
    let value = match lit.value {
        LitValue::Int64(v) => Some(v),
        LitValue::Uint64(v) => i64::try_from(v).ok(),
        LitValue::Float64(v) if v.fract() == 0.0 && v >= min as f64 && v <= max as f64 => {
            Some(v as i64)
        }
        _ => None,
    };
    value
        .filter(|v| (min..=max).contains(v))
        .ok_or(ConvertError::OutOfRange { target })
}

fn as_float(lit: &Lit) -> Option<f64> {
    match lit.value {
        LitValue::Float64(v) => Some(v),
        LitValue::Uint64(v) => Some(v as f64),
        LitValue::Int64(v) => Some(v as f64),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn const_production_copies_value() {
        let desc = ConstDesc::new(Ari::from(42u64));
        let mut ctx = ValProdCtx::new();
        desc.produce(&mut ctx);
        assert_eq!(ctx.value, Ari::from(42u64));
    }

    #[test]
    fn edd_production_converts_to_declared_type() {
        let desc = EddDesc::new(
            AriType::Uint,
            Box::new(|ctx| ctx.value = Ari::from(7u64)),
        );
        let mut ctx = ValProdCtx::new();
        desc.produce(&mut ctx).unwrap();
        assert_eq!(
            ctx.value,
            Ari::typed(AriType::Uint, LitValue::Uint64(7)).unwrap()
        );
    }

    #[test]
    fn edd_production_rejects_undefined() {
        let desc = EddDesc::new(AriType::Uint, Box::new(|_ctx| {}));
        let mut ctx = ValProdCtx::new();
        assert_eq!(desc.produce(&mut ctx), Err(ProduceError::Undefined));
    }

    #[test]
    fn edd_production_rejects_wrong_type() {
        let desc = EddDesc::new(
            AriType::Uint,
            Box::new(|ctx| ctx.value = Ari::from("text")),
        );
        let mut ctx = ValProdCtx::new();
        assert!(matches!(
            desc.produce(&mut ctx),
            Err(ProduceError::Convert(ConvertError::Incompatible { .. }))
        ));
    }

    #[test]
    fn convert_checks_integer_ranges() {
        assert!(convert(&Ari::from(255u64), AriType::Byte).is_ok());
        assert!(matches!(
            convert(&Ari::from(256u64), AriType::Byte),
            Err(ConvertError::OutOfRange { target: AriType::Byte })
        ));
        assert!(convert(&Ari::from(-1i64), AriType::Int).is_ok());
        assert!(matches!(
            convert(&Ari::from(-1i64), AriType::Uint),
            Err(ConvertError::OutOfRange { .. })
        ));
    }

    #[test]
    fn convert_widens_to_floats() {
        let out = convert(&Ari::from(2u64), AriType::Real64).unwrap();
        assert_eq!(
            out,
            Ari::typed(AriType::Real64, LitValue::Float64(2.0)).unwrap()
        );
    }

    #[test]
    fn convert_resolves_aritype_names() {
        let out = convert(&Ari::from("TEXTSTR"), AriType::AriType).unwrap();
        assert_eq!(
            out,
            Ari::typed(AriType::AriType, LitValue::Int64(-10)).unwrap()
        );
    }

    #[test]
    fn convert_rejects_reference_to_literal() {
        let reference = Ari::from(crate::objpath::ObjPath::typed("ns1", AriType::Ctrl, 7));
        assert!(matches!(
            convert(&reference, AriType::Uint),
            Err(ConvertError::Incompatible { prim_type: None, .. })
        ));
        assert!(convert(&reference, AriType::Ctrl).is_ok());
    }

    #[test]
    fn convert_strips_tag_for_literal_target() {
        let tagged = Ari::typed(AriType::Uint, LitValue::Uint64(3)).unwrap();
        let out = convert(&tagged, AriType::Literal).unwrap();
        assert_eq!(out, Ari::from(3u64));
    }
}
