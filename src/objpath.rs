//! Object paths and typed object references.

use std::cmp::Ordering;

use crate::ari_type::AriType;
use crate::containers::{Ac, Am};
use crate::idseg::IdSeg;

/// The path of a managed-object reference: namespace, type, and object
/// segments.
///
/// When `ari_type` is set it is authoritative for type comparisons and the
/// `type_id` segment only records how the path was originally written;
/// otherwise `type_id` itself carries the type identity.
#[derive(Debug, Clone, Default, Eq)]
pub struct ObjPath {
    /// Namespace segment.
    pub ns_id: IdSeg,
    /// Type segment as written.
    pub type_id: IdSeg,
    /// Object segment.
    pub obj_id: IdSeg,
    /// The resolved ARI type, when the type segment matched the registry.
    pub ari_type: Option<AriType>,
}

impl ObjPath {
    /// Creates a path from raw segments with no resolved type.
    pub fn new(
        ns_id: impl Into<IdSeg>,
        type_id: impl Into<IdSeg>,
        obj_id: impl Into<IdSeg>,
    ) -> Self {
        Self {
            ns_id: ns_id.into(),
            type_id: type_id.into(),
            obj_id: obj_id.into(),
            ari_type: None,
        }
    }

    /// Creates a path whose type segment is a resolved ARI type; the
    /// segment records the canonical name.
    pub fn typed(ns_id: impl Into<IdSeg>, ari_type: AriType, obj_id: impl Into<IdSeg>) -> Self {
        Self {
            ns_id: ns_id.into(),
            type_id: IdSeg::from(ari_type.name()),
            obj_id: obj_id.into(),
            ari_type: Some(ari_type),
        }
    }

    /// The comparison key for the type position: the resolved type when
    /// present, the written segment otherwise.
    fn type_key(&self) -> TypeKey<'_> {
        match self.ari_type {
            Some(t) => TypeKey::Resolved(t),
            None => TypeKey::Seg(&self.type_id),
        }
    }
}

/// Comparison key for the type position of a path.
#[derive(PartialEq, Eq, PartialOrd, Ord)]
enum TypeKey<'a> {
    Resolved(AriType),
    Seg(&'a IdSeg),
}

impl PartialEq for ObjPath {
    fn eq(&self, other: &Self) -> bool {
        self.ns_id == other.ns_id
            && self.type_key() == other.type_key()
            && self.obj_id == other.obj_id
    }
}

impl PartialOrd for ObjPath {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ObjPath {
    fn cmp(&self, other: &Self) -> Ordering {
        self.ns_id
            .cmp(&other.ns_id)
            .then_with(|| self.type_key().cmp(&other.type_key()))
            .then_with(|| self.obj_id.cmp(&other.obj_id))
    }
}

impl std::hash::Hash for ObjPath {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.ns_id.hash(state);
        match self.ari_type {
            Some(t) => t.hash(state),
            None => self.type_id.hash(state),
        }
        self.obj_id.hash(state);
    }
}

/// Actual parameters attached to an object reference.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord)]
pub enum RefParams {
    /// No parameters.
    #[default]
    None,
    /// Positional parameters.
    Ac(Ac),
    /// Named parameters.
    Am(Am),
}

impl RefParams {
    /// Returns true when no parameters are attached.
    #[must_use]
    pub const fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }
}

/// An object reference: a path with optional actual parameters.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct ObjRef {
    /// The object path.
    pub path: ObjPath,
    /// Actual parameters.
    pub params: RefParams,
}

impl ObjRef {
    /// Creates a reference with no parameters.
    #[must_use]
    pub const fn new(path: ObjPath) -> Self {
        Self { path, params: RefParams::None }
    }

    /// Creates a reference with the given parameters.
    #[must_use]
    pub const fn with_params(path: ObjPath, params: RefParams) -> Self {
        Self { path, params }
    }
}

impl From<ObjPath> for ObjRef {
    fn from(path: ObjPath) -> Self {
        Self::new(path)
    }
}
