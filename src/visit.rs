//! Structural traversal over ARI trees.
//!
//! [`visit`] performs a pre-order walk, invoking visitor callbacks at each
//! node before descending into container children. [`translate`] is the
//! mirror-shaped map, producing an output tree from an input tree with
//! per-node mappers and structural recursion as the default.

use std::ops::ControlFlow;

use crate::ari::Ari;
use crate::containers::{Ac, Am, ExecSet, Report, RptSet, Tbl};
use crate::lit::{Lit, LitValue};
use crate::objpath::{ObjPath, ObjRef, RefParams};

/// Context handed to visitor callbacks.
#[derive(Debug, Clone, Copy, Default)]
pub struct VisitCtx<'a> {
    /// The enclosing ARI, absent at the root.
    pub parent: Option<&'a Ari>,
    /// True while visiting the key side of a map entry.
    pub is_map_key: bool,
}

/// Callbacks for [`visit`].
///
/// Every callback defaults to continuing the walk. Returning
/// `ControlFlow::Break` aborts the traversal; the first break value is
/// propagated to the caller.
pub trait Visitor {
    /// The abort value carried by `ControlFlow::Break`.
    type Break;

    /// Called for every node, before variant-specific callbacks.
    fn visit_ari(&mut self, ari: &Ari, ctx: &VisitCtx<'_>) -> ControlFlow<Self::Break> {
        let _ = (ari, ctx);
        ControlFlow::Continue(())
    }

    /// Called for every literal node.
    fn visit_lit(&mut self, lit: &Lit, ctx: &VisitCtx<'_>) -> ControlFlow<Self::Break> {
        let _ = (lit, ctx);
        ControlFlow::Continue(())
    }

    /// Called for every reference node.
    fn visit_ref(&mut self, objref: &ObjRef, ctx: &VisitCtx<'_>) -> ControlFlow<Self::Break> {
        let _ = (objref, ctx);
        ControlFlow::Continue(())
    }

    /// Called for the path of every reference node.
    fn visit_objpath(&mut self, path: &ObjPath, ctx: &VisitCtx<'_>) -> ControlFlow<Self::Break> {
        let _ = (path, ctx);
        ControlFlow::Continue(())
    }
}

/// Walks `ari` pre-order, dispatching to `visitor`.
///
/// At each node the callbacks run in order: `visit_ari`, then `visit_ref`
/// or `visit_lit` by variant, then for references `visit_objpath` followed
/// by descent into parameters, and for tagged literals descent into the
/// contained AC, AM, TBL, EXECSET, or RPTSET.
pub fn visit<V: Visitor>(ari: &Ari, visitor: &mut V) -> ControlFlow<V::Break> {
    visit_ari(ari, visitor, &VisitCtx { parent: None, is_map_key: false })
}

fn visit_ari<V: Visitor>(
    ari: &Ari,
    visitor: &mut V,
    ctx: &VisitCtx<'_>,
) -> ControlFlow<V::Break> {
    visitor.visit_ari(ari, ctx)?;

    let sub_ctx = VisitCtx { parent: Some(ari), is_map_key: false };

    match ari {
        Ari::Ref(objref) => {
            visitor.visit_ref(objref, &sub_ctx)?;
            visitor.visit_objpath(&objref.path, &sub_ctx)?;
            match &objref.params {
                RefParams::None => {}
                RefParams::Ac(ac) => visit_ac(ac, visitor, &sub_ctx)?,
                RefParams::Am(am) => visit_am(am, visitor, &sub_ctx)?,
            }
        }
        Ari::Lit(lit) => {
            visitor.visit_lit(lit, &sub_ctx)?;
            if lit.ari_type.is_some() {
                match &lit.value {
                    LitValue::Ac(ac) => visit_ac(ac, visitor, &sub_ctx)?,
                    LitValue::Am(am) => visit_am(am, visitor, &sub_ctx)?,
                    LitValue::Tbl(tbl) => visit_tbl(tbl, visitor, &sub_ctx)?,
                    LitValue::ExecSet(es) => visit_execset(es, visitor, &sub_ctx)?,
                    LitValue::RptSet(rs) => visit_rptset(rs, visitor, &sub_ctx)?,
                    _ => {}
                }
            }
        }
    }
    ControlFlow::Continue(())
}

fn visit_ac<V: Visitor>(ac: &Ac, visitor: &mut V, ctx: &VisitCtx<'_>) -> ControlFlow<V::Break> {
    for item in &ac.items {
        visit_ari(item, visitor, ctx)?;
    }
    ControlFlow::Continue(())
}

fn visit_am<V: Visitor>(am: &Am, visitor: &mut V, ctx: &VisitCtx<'_>) -> ControlFlow<V::Break> {
    let key_ctx = VisitCtx { is_map_key: true, ..*ctx };
    let val_ctx = VisitCtx { is_map_key: false, ..*ctx };
    for (key, value) in &am.items {
        visit_ari(key, visitor, &key_ctx)?;
        visit_ari(value, visitor, &val_ctx)?;
    }
    ControlFlow::Continue(())
}

fn visit_tbl<V: Visitor>(tbl: &Tbl, visitor: &mut V, ctx: &VisitCtx<'_>) -> ControlFlow<V::Break> {
    for item in &tbl.items {
        visit_ari(item, visitor, ctx)?;
    }
    ControlFlow::Continue(())
}

fn visit_execset<V: Visitor>(
    es: &ExecSet,
    visitor: &mut V,
    ctx: &VisitCtx<'_>,
) -> ControlFlow<V::Break> {
    // the nonce is header metadata and is not walked
    for target in &es.targets {
        visit_ari(target, visitor, ctx)?;
    }
    ControlFlow::Continue(())
}

fn visit_report<V: Visitor>(
    report: &Report,
    visitor: &mut V,
    ctx: &VisitCtx<'_>,
) -> ControlFlow<V::Break> {
    visit_ari(&report.reltime, visitor, ctx)?;
    visit_ari(&report.source, visitor, ctx)?;
    for item in &report.items {
        visit_ari(item, visitor, ctx)?;
    }
    ControlFlow::Continue(())
}

fn visit_rptset<V: Visitor>(
    rs: &RptSet,
    visitor: &mut V,
    ctx: &VisitCtx<'_>,
) -> ControlFlow<V::Break> {
    visit_ari(&rs.nonce, visitor, ctx)?;
    visit_ari(&rs.reftime, visitor, ctx)?;
    for report in &rs.reports {
        visit_report(report, visitor, ctx)?;
    }
    ControlFlow::Continue(())
}

/// Per-node mappers for [`translate`].
///
/// The defaults copy paths and literals unchanged, which makes a
/// translator with no overrides a structural deep copy.
pub trait Translator {
    /// The error type surfaced by mappers.
    type Error;

    /// Maps a literal node. Container contents of AC, AM, and TBL
    /// literals are rebuilt by recursion afterwards regardless of what
    /// this returns for them.
    fn map_lit(&mut self, lit: &Lit) -> Result<Lit, Self::Error> {
        Ok(lit.clone())
    }

    /// Maps the path of a reference node.
    fn map_objpath(&mut self, path: &ObjPath) -> Result<ObjPath, Self::Error> {
        Ok(path.clone())
    }
}

/// Maps `input` through `translator`, producing a new tree of the same
/// shape.
///
/// # Errors
///
/// The first mapper error aborts the translation and is returned.
pub fn translate<T: Translator>(input: &Ari, translator: &mut T) -> Result<Ari, T::Error> {
    match input {
        Ari::Ref(objref) => {
            let path = translator.map_objpath(&objref.path)?;
            let params = match &objref.params {
                RefParams::None => RefParams::None,
                RefParams::Ac(ac) => RefParams::Ac(translate_ac(ac, translator)?),
                RefParams::Am(am) => RefParams::Am(translate_am(am, translator)?),
            };
            Ok(Ari::Ref(ObjRef::with_params(path, params)))
        }
        Ari::Lit(lit) => {
            let mapped = translator.map_lit(lit)?;
            // AC, AM, and TBL contents are rebuilt through the per-child
            // mapping; EXECSET and RPTSET pass through the literal copy.
            let value = match &lit.value {
                LitValue::Ac(ac) => LitValue::Ac(translate_ac(ac, translator)?),
                LitValue::Am(am) => LitValue::Am(translate_am(am, translator)?),
                LitValue::Tbl(tbl) => LitValue::Tbl(Tbl {
                    ncols: tbl.ncols,
                    items: tbl
                        .items
                        .iter()
                        .map(|item| translate(item, translator))
                        .collect::<Result<_, _>>()?,
                }),
                _ => return Ok(Ari::Lit(mapped)),
            };
            Ok(Ari::Lit(Lit { ari_type: mapped.ari_type, value }))
        }
    }
}

fn translate_ac<T: Translator>(ac: &Ac, translator: &mut T) -> Result<Ac, T::Error> {
    let items = ac
        .items
        .iter()
        .map(|item| translate(item, translator))
        .collect::<Result<_, _>>()?;
    Ok(Ac { items })
}

fn translate_am<T: Translator>(am: &Am, translator: &mut T) -> Result<Am, T::Error> {
    let mut items = std::collections::BTreeMap::new();
    for (key, value) in &am.items {
        let key = translate(key, translator)?;
        let value = translate(value, translator)?;
        items.insert(key, value);
    }
    Ok(Am { items })
}

/// A translator with no overrides: a structural deep copy.
#[derive(Debug, Default)]
pub struct CopyTranslator;

impl Translator for CopyTranslator {
    type Error = std::convert::Infallible;
}
