//! Convenient re-exports for common usage.
//!
//! ```rust
//! use dtn_ari::prelude::*;
//!
//! let ari = Ari::from(true);
//! let text = encode(&ari, &EncodeOptions::default()).unwrap();
//! assert_eq!(text, "ari:true");
//! ```

pub use crate::ari::Ari;
pub use crate::ari_type::AriType;
pub use crate::containers::{Ac, Am, ExecSet, Report, RptSet, Tbl};
pub use crate::idseg::IdSeg;
pub use crate::lit::{Lit, LitValue, PrimType};
pub use crate::objpath::{ObjPath, ObjRef, RefParams};
pub use crate::text::{
    encode, AriTypeForm, BstrForm, EncodeOptions, FloatForm, IntBase, SchemePrefix,
};
pub use crate::timecodec::Timespec;
pub use crate::visit::{translate, visit, Translator, VisitCtx, Visitor};
