//! Value model and canonical text codec for the `ari:` URI scheme.
//!
//! This crate implements the ARI (AMM Resource Identifier) data model used
//! by the DTN Management Architecture, together with its canonical text
//! encoder and the primitive codecs the encoder is built from.
//!
//! # Overview
//!
//! An ARI is a typed value or a typed object reference. Streams of ARIs
//! convey commands, reports, and parameters between managers and agents in
//! delay-tolerant networks. The text form is a URI:
//!
//! ```text
//! ari:/TEXTSTR/hello
//! ari://namespace/CTRL/object(param1,param2)
//! ```
//!
//! # Quick Start
//!
//! ```rust
//! use dtn_ari::text::{encode, EncodeOptions};
//! use dtn_ari::{Ari, AriType};
//!
//! // Build values bottom-up
//! let tagged = Ari::typed(AriType::Int, (-42i64).into()).unwrap();
//! assert_eq!(
//!     encode(&tagged, &EncodeOptions::default()).unwrap(),
//!     "ari:/INT/-42"
//! );
//!
//! // References carry an object path and optional parameters
//! use dtn_ari::ObjPath;
//! let reference = Ari::from(ObjPath::typed("ns1", AriType::Ctrl, 7));
//! assert_eq!(reference.to_string(), "ari://ns1/CTRL/7");
//! ```
//!
//! # Structure
//!
//! - [`Ari`], [`Lit`], [`ObjRef`] and the container types form the value
//!   model: an immutable tree built bottom-up by constructors that take
//!   ownership of their children.
//! - [`visit::visit`] and [`visit::translate`] walk and map trees;
//!   equality, ordering, and hashing are expressed over the same
//!   recursion shape.
//! - [`text::encode`] produces the canonical URI form, configured by an
//!   explicit [`text::EncodeOptions`] record.
//! - The primitive codec modules ([`percent`], [`escape`], [`base16`],
//!   [`base64`], [`numeric`], [`timecodec`]) are usable on their own and
//!   each round-trips its own output.
//!
//! # Concurrency
//!
//! Nothing here suspends or locks. ARI trees are safe to share between
//! threads as long as no thread mutates them; the encoder and the walkers
//! take shared references only.

#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]

pub mod amm;
mod ari;
mod ari_type;
pub mod base16;
pub mod base64;
pub mod constants;
mod containers;
mod error;
pub mod escape;
mod idseg;
mod lit;
pub mod numeric;
mod objpath;
pub mod percent;
pub mod prelude;
pub mod text;
pub mod timecodec;
pub mod visit;

pub use ari::Ari;
pub use ari_type::AriType;
pub use containers::{Ac, Am, ExecSet, Report, RptSet, Tbl};
pub use error::{
    Base16Error, Base64Error, EncodeError, EscapeError, FloatFormError, NumericError,
    PercentError, TimeError, TypeNameError,
};
pub use idseg::IdSeg;
pub use lit::{Lit, LitError, LitValue, PrimType};
pub use objpath::{ObjPath, ObjRef, RefParams};
pub use timecodec::Timespec;
