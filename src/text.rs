//! The canonical ARI text encoder.
//!
//! [`encode`] serializes an ARI tree into the `ari:` URI-scheme form,
//! driven by an [`EncodeOptions`] record threaded through the recursion.
//! Options and nesting depth are explicit encoder state; there is no
//! ambient configuration.

use std::fmt::Write;

use crate::ari::Ari;
use crate::ari_type::AriType;
use crate::constants::{ARI_SAFE, SCHEME};
use crate::containers::{Ac, Am, ExecSet, Report, RptSet, Tbl};
use crate::error::EncodeError;
use crate::escape::slash_escape;
use crate::idseg::IdSeg;
use crate::lit::{Lit, LitValue};
use crate::numeric::{float64_encode, int64_encode, uint64_encode};
use crate::objpath::{ObjRef, RefParams};
use crate::percent::{is_identity, percent_encode};
use crate::timecodec::{decfrac_encode, timeperiod_encode, utctime_encode};

pub use crate::numeric::{FloatForm, IntBase};

/// Where the `ari:` scheme prefix is emitted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SchemePrefix {
    /// Never emit the scheme.
    None,
    /// Emit the scheme only on the outermost value.
    #[default]
    First,
    /// Emit the scheme on every nested value.
    All,
}

/// How resolved ARI types are rendered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AriTypeForm {
    /// Render whatever the original decoding carried, falling back to the
    /// canonical name.
    Orig,
    /// Always render the canonical name.
    #[default]
    Text,
    /// Always render the integer enumeration.
    Int,
}

/// How byte strings are rendered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BstrForm {
    /// Single-quoted text when the bytes are valid UTF-8, base16
    /// otherwise.
    Raw,
    /// Always `h'..'` base16.
    #[default]
    Base16,
    /// Always `b64'..'` base64url.
    Base64Url,
}

/// Options for the text encoder.
///
/// `Default` gives the canonical form: scheme on the outermost value,
/// type names as text, decimal integers, shortest-form floats, unquoted
/// identity text, base16 byte strings, and calendar time forms.
///
/// # Examples
///
/// ```
/// use dtn_ari::text::{EncodeOptions, IntBase, SchemePrefix};
///
/// let opts = EncodeOptions::default()
///     .with_scheme_prefix(SchemePrefix::None)
///     .with_int_base(IntBase::Base16);
/// assert_eq!(opts.int_base, IntBase::Base16);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncodeOptions {
    /// Scheme prefix placement.
    pub scheme_prefix: SchemePrefix,
    /// Type-name rendering policy.
    pub show_ari_type: AriTypeForm,
    /// Integer radix.
    pub int_base: IntBase,
    /// Float rendering form.
    pub float_form: FloatForm,
    /// Leave identifier-shaped text strings unquoted.
    pub text_identity: bool,
    /// Byte-string rendering form.
    pub bstr_form: BstrForm,
    /// Render times as ISO 8601 text rather than decimal fractions.
    pub time_text: bool,
}

impl Default for EncodeOptions {
    fn default() -> Self {
        Self::new()
    }
}

impl EncodeOptions {
    /// Creates the default options.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            scheme_prefix: SchemePrefix::First,
            show_ari_type: AriTypeForm::Text,
            int_base: IntBase::Base10,
            float_form: FloatForm::General,
            text_identity: true,
            bstr_form: BstrForm::Base16,
            time_text: true,
        }
    }

    /// Returns options with the given scheme-prefix placement.
    #[must_use]
    pub const fn with_scheme_prefix(mut self, scheme_prefix: SchemePrefix) -> Self {
        self.scheme_prefix = scheme_prefix;
        self
    }

    /// Returns options with the given type-name policy.
    #[must_use]
    pub const fn with_show_ari_type(mut self, show_ari_type: AriTypeForm) -> Self {
        self.show_ari_type = show_ari_type;
        self
    }

    /// Returns options with the given integer radix.
    #[must_use]
    pub const fn with_int_base(mut self, int_base: IntBase) -> Self {
        self.int_base = int_base;
        self
    }

    /// Returns options with the given float form.
    #[must_use]
    pub const fn with_float_form(mut self, float_form: FloatForm) -> Self {
        self.float_form = float_form;
        self
    }

    /// Returns options with identity-text unquoting switched.
    #[must_use]
    pub const fn with_text_identity(mut self, text_identity: bool) -> Self {
        self.text_identity = text_identity;
        self
    }

    /// Returns options with the given byte-string form.
    #[must_use]
    pub const fn with_bstr_form(mut self, bstr_form: BstrForm) -> Self {
        self.bstr_form = bstr_form;
        self
    }

    /// Returns options with text time forms switched.
    #[must_use]
    pub const fn with_time_text(mut self, time_text: bool) -> Self {
        self.time_text = time_text;
        self
    }
}

/// Encodes an ARI to its canonical text form.
///
/// # Errors
///
/// Returns [`EncodeError`] when a time value falls outside the calendar
/// range or a literal's tag does not match its value. Nothing is returned
/// to the caller on failure; partial output is discarded.
///
/// # Examples
///
/// ```
/// use dtn_ari::text::{encode, EncodeOptions};
/// use dtn_ari::Ari;
///
/// let text = encode(&Ari::NULL, &EncodeOptions::default()).unwrap();
/// assert_eq!(text, "ari:null");
/// ```
pub fn encode(ari: &Ari, opts: &EncodeOptions) -> Result<String, EncodeError> {
    let mut encoder = Encoder { out: String::new(), depth: 0, opts: *opts };
    encoder.encode_ari(ari)?;
    Ok(encoder.out)
}

/// Recursive encoder state: the output buffer, nesting depth, and the
/// effective options.
struct Encoder {
    out: String,
    depth: u32,
    opts: EncodeOptions,
}

impl Encoder {
    fn encode_ari(&mut self, ari: &Ari) -> Result<(), EncodeError> {
        match ari {
            Ari::Ref(objref) => self.encode_objref(objref),
            Ari::Lit(lit) => self.encode_lit(lit),
        }
    }

    fn scheme_prefix(&mut self) {
        match self.opts.scheme_prefix {
            SchemePrefix::None => return,
            SchemePrefix::First => {
                if self.depth > 0 {
                    return;
                }
            }
            SchemePrefix::All => {}
        }
        self.out.push_str(SCHEME);
        self.out.push(':');
    }

    /// Runs `body` with the scheme prefix suppressed, restoring the
    /// configured placement on exit. Used for the set header fields.
    fn with_scheme_none(
        &mut self,
        body: impl FnOnce(&mut Self) -> Result<(), EncodeError>,
    ) -> Result<(), EncodeError> {
        let saved = self.opts.scheme_prefix;
        self.opts.scheme_prefix = SchemePrefix::None;
        let result = body(self);
        self.opts.scheme_prefix = saved;
        result
    }

    fn encode_idseg(&mut self, idseg: &IdSeg) {
        match idseg {
            IdSeg::Null => {}
            IdSeg::Text(s) => self.out.push_str(s),
            IdSeg::Int(v) => {
                let _ = write!(self.out, "{v}");
            }
        }
    }

    /// Renders a resolved type per the type-name policy. `orig` is the
    /// originally decoded segment, available in reference paths.
    fn encode_aritype(&mut self, ari_type: AriType, orig: Option<&IdSeg>) {
        match self.opts.show_ari_type {
            AriTypeForm::Text => self.out.push_str(ari_type.name()),
            AriTypeForm::Int => {
                let _ = write!(self.out, "{}", ari_type.code());
            }
            AriTypeForm::Orig => match orig {
                Some(idseg) => self.encode_idseg(idseg),
                None => self.out.push_str(ari_type.name()),
            },
        }
    }

    fn encode_objref(&mut self, objref: &ObjRef) -> Result<(), EncodeError> {
        self.scheme_prefix();

        self.out.push_str("//");
        self.encode_idseg(&objref.path.ns_id);

        self.out.push('/');
        if objref.path.type_id.is_null() {
            // namespace-only reference
            return Ok(());
        }

        match objref.path.ari_type {
            Some(t) => self.encode_aritype(t, Some(&objref.path.type_id)),
            None => self.encode_idseg(&objref.path.type_id),
        }

        self.out.push('/');
        self.encode_idseg(&objref.path.obj_id);

        match &objref.params {
            RefParams::None => Ok(()),
            RefParams::Ac(ac) => self.encode_ac(ac),
            RefParams::Am(am) => self.encode_am(am),
        }
    }

    fn encode_lit(&mut self, lit: &Lit) -> Result<(), EncodeError> {
        self.scheme_prefix();

        if let Some(ari_type) = lit.ari_type {
            self.out.push('/');
            self.encode_aritype(ari_type, None);
            self.out.push('/');

            // payload forms that consume the whole value
            match (ari_type, &lit.value) {
                (AriType::Tp, LitValue::Timespec(ts)) => {
                    if self.opts.time_text {
                        // calendar form never uses separators
                        utctime_encode(&mut self.out, ts, false)?;
                    } else {
                        decfrac_encode(&mut self.out, ts);
                    }
                    return Ok(());
                }
                (AriType::Td, LitValue::Timespec(ts)) => {
                    if self.opts.time_text {
                        timeperiod_encode(&mut self.out, ts);
                    } else {
                        decfrac_encode(&mut self.out, ts);
                    }
                    return Ok(());
                }
                (AriType::Ac, LitValue::Ac(ac)) => return self.encode_ac(ac),
                (AriType::Am, LitValue::Am(am)) => return self.encode_am(am),
                (AriType::Tbl, LitValue::Tbl(tbl)) => return self.encode_tbl(tbl),
                (AriType::ExecSet, LitValue::ExecSet(es)) => return self.encode_execset(es),
                (AriType::RptSet, LitValue::RptSet(rs)) => return self.encode_rptset(rs),
                (
                    AriType::Tp
                    | AriType::Td
                    | AriType::Ac
                    | AriType::Am
                    | AriType::Tbl
                    | AriType::ExecSet
                    | AriType::RptSet,
                    _,
                ) => {
                    return Err(EncodeError::InvalidLiteral { ari_type: Some(ari_type) });
                }
                _ => {}
            }
        }

        self.encode_prim(lit)
    }

    fn encode_prim(&mut self, lit: &Lit) -> Result<(), EncodeError> {
        match &lit.value {
            LitValue::Undefined => self.out.push_str("undefined"),
            LitValue::Null => self.out.push_str("null"),
            LitValue::Bool(v) => self.out.push_str(if *v { "true" } else { "false" }),
            LitValue::Uint64(v) => uint64_encode(&mut self.out, *v, self.opts.int_base),
            LitValue::Int64(v) => int64_encode(&mut self.out, *v, self.opts.int_base),
            LitValue::Float64(v) => float64_encode(&mut self.out, *v, self.opts.float_form),
            LitValue::Tstr(s) => self.encode_tstr(s),
            LitValue::Bstr(bytes) => self.encode_bstr(bytes),
            LitValue::Timespec(_)
            | LitValue::Ac(_)
            | LitValue::Am(_)
            | LitValue::Tbl(_)
            | LitValue::ExecSet(_)
            | LitValue::RptSet(_) => {
                // these forms require the matching type tag
                return Err(EncodeError::InvalidLiteral { ari_type: lit.ari_type });
            }
        }
        Ok(())
    }

    fn encode_tstr(&mut self, s: &str) {
        if self.opts.text_identity && is_identity(s) {
            self.out.push_str(s);
            return;
        }
        let mut buf = String::with_capacity(s.len() + 2);
        buf.push('"');
        slash_escape(&mut buf, s, '"');
        buf.push('"');
        percent_encode(&mut self.out, buf.as_bytes(), ARI_SAFE);
    }

    fn encode_bstr(&mut self, bytes: &[u8]) {
        match self.opts.bstr_form {
            BstrForm::Raw => {
                // interior NUL bytes disqualify the text form
                match std::str::from_utf8(bytes) {
                    Ok(s) if !bytes.contains(&0) => {
                        let mut buf = String::with_capacity(s.len() + 2);
                        buf.push('\'');
                        slash_escape(&mut buf, s, '\'');
                        buf.push('\'');
                        percent_encode(&mut self.out, buf.as_bytes(), ARI_SAFE);
                    }
                    _ => self.encode_bstr_base16(bytes),
                }
            }
            BstrForm::Base16 => self.encode_bstr_base16(bytes),
            BstrForm::Base64Url => {
                self.out.push_str("b64'");
                crate::base64::base64_encode(&mut self.out, bytes, true);
                self.out.push('\'');
            }
        }
    }

    fn encode_bstr_base16(&mut self, bytes: &[u8]) {
        self.out.push_str("h'");
        crate::base16::base16_encode(&mut self.out, bytes, true);
        self.out.push('\'');
    }

    fn encode_ac(&mut self, ac: &Ac) -> Result<(), EncodeError> {
        self.depth += 1;
        self.out.push('(');
        let result = self.encode_items(&ac.items);
        self.depth -= 1;
        self.out.push(')');
        result
    }

    fn encode_items(&mut self, items: &[Ari]) -> Result<(), EncodeError> {
        for (ix, item) in items.iter().enumerate() {
            if ix > 0 {
                self.out.push(',');
            }
            self.encode_ari(item)?;
        }
        Ok(())
    }

    fn encode_am(&mut self, am: &Am) -> Result<(), EncodeError> {
        self.depth += 1;
        self.out.push('(');
        let mut result = Ok(());
        for (ix, (key, value)) in am.items.iter().enumerate() {
            if ix > 0 {
                self.out.push(',');
            }
            result = self
                .encode_ari(key)
                .and_then(|()| {
                    self.out.push('=');
                    self.encode_ari(value)
                });
            if result.is_err() {
                break;
            }
        }
        self.depth -= 1;
        self.out.push(')');
        result
    }

    fn encode_tbl(&mut self, tbl: &Tbl) -> Result<(), EncodeError> {
        let _ = write!(self.out, "c={};", tbl.ncols);
        if tbl.ncols == 0 {
            return Ok(());
        }

        self.depth += 1;
        let mut result = Ok(());
        for row in tbl.rows() {
            self.out.push('(');
            result = self.encode_items(row);
            self.out.push(')');
            if result.is_err() {
                break;
            }
        }
        self.depth -= 1;
        result
    }

    fn encode_execset(&mut self, es: &ExecSet) -> Result<(), EncodeError> {
        self.with_scheme_none(|enc| {
            enc.out.push_str("n=");
            enc.encode_ari(&es.nonce)?;
            enc.out.push(';');
            Ok(())
        })?;

        self.depth += 1;
        self.out.push('(');
        let result = self.encode_items(&es.targets);
        self.depth -= 1;
        self.out.push(')');
        result
    }

    fn encode_report(&mut self, report: &Report) -> Result<(), EncodeError> {
        self.out.push('(');
        self.with_scheme_none(|enc| {
            enc.out.push_str("t=");
            enc.encode_ari(&report.reltime)?;
            enc.out.push(';');

            enc.out.push_str("s=");
            enc.encode_ari(&report.source)?;
            enc.out.push(';');
            Ok(())
        })?;

        self.out.push('(');
        let result = self.encode_items(&report.items);
        self.out.push(')');
        self.out.push(')');
        result
    }

    fn encode_rptset(&mut self, rs: &RptSet) -> Result<(), EncodeError> {
        self.depth += 1;
        let result = self.encode_rptset_body(rs);
        self.depth -= 1;
        result
    }

    fn encode_rptset_body(&mut self, rs: &RptSet) -> Result<(), EncodeError> {
        self.with_scheme_none(|enc| {
            enc.out.push_str("n=");
            enc.encode_ari(&rs.nonce)?;
            enc.out.push(';');

            enc.out.push_str("r=");
            enc.encode_ari(&rs.reftime)?;
            enc.out.push(';');
            Ok(())
        })?;

        for report in &rs.reports {
            self.encode_report(report)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::objpath::ObjPath;
    use crate::timecodec::Timespec;

    fn enc(ari: &Ari) -> String {
        encode(ari, &EncodeOptions::default()).unwrap()
    }

    #[test]
    fn untagged_primitives() {
        assert_eq!(enc(&Ari::UNDEFINED), "ari:undefined");
        assert_eq!(enc(&Ari::NULL), "ari:null");
        assert_eq!(enc(&Ari::from(true)), "ari:true");
        assert_eq!(enc(&Ari::from(false)), "ari:false");
        assert_eq!(enc(&Ari::from(42u64)), "ari:42");
    }

    #[test]
    fn scheme_prefix_policies() {
        let ari = Ari::from(Ac::from(vec![Ari::from(1u64)]));
        let none = EncodeOptions::default().with_scheme_prefix(SchemePrefix::None);
        let all = EncodeOptions::default().with_scheme_prefix(SchemePrefix::All);
        assert_eq!(encode(&ari, &none).unwrap(), "/AC/(1)");
        assert_eq!(enc(&ari), "ari:/AC/(1)");
        assert_eq!(encode(&ari, &all).unwrap(), "ari:/AC/(ari:1)");
    }

    #[test]
    fn type_name_policies() {
        let ari = Ari::typed(AriType::Int, (-42i64).into()).unwrap();
        let int = EncodeOptions::default().with_show_ari_type(AriTypeForm::Int);
        assert_eq!(enc(&ari), "ari:/INT/-42");
        assert_eq!(encode(&ari, &int).unwrap(), "ari:/-4/-42");
    }

    #[test]
    fn orig_policy_uses_decoded_segment_in_paths() {
        let mut path = ObjPath::typed("ns1", AriType::Ctrl, 7);
        path.type_id = IdSeg::from(i64::from(AriType::Ctrl.code()));
        let ari = Ari::from(path);

        let orig = EncodeOptions::default().with_show_ari_type(AriTypeForm::Orig);
        assert_eq!(encode(&ari, &orig).unwrap(), "ari://ns1/3/7");
        assert_eq!(enc(&ari), "ari://ns1/CTRL/7");
    }

    #[test]
    fn int_bases() {
        let ari = Ari::from(10u64);
        let bin = EncodeOptions::default().with_int_base(IntBase::Base2);
        let hex = EncodeOptions::default().with_int_base(IntBase::Base16);
        assert_eq!(encode(&ari, &bin).unwrap(), "ari:0b1010");
        assert_eq!(encode(&ari, &hex).unwrap(), "ari:0xA");
    }

    #[test]
    fn tstr_identity_and_quoting() {
        assert_eq!(enc(&Ari::from("hello")), "ari:hello");
        assert_eq!(enc(&Ari::from("hi there")), "ari:%22hi%20there%22");

        let quoted = EncodeOptions::default().with_text_identity(false);
        assert_eq!(encode(&Ari::from("hello"), &quoted).unwrap(), "ari:%22hello%22");
    }

    #[test]
    fn tstr_escapes_inner_quote() {
        assert_eq!(enc(&Ari::from("say \"hi\"")), "ari:%22say%20%5C%22hi%5C%22%22");
    }

    #[test]
    fn bstr_forms() {
        let bytes = Ari::from(b"hi".to_vec());
        assert_eq!(enc(&bytes), "ari:h'6869'");

        let raw = EncodeOptions::default().with_bstr_form(BstrForm::Raw);
        assert_eq!(encode(&bytes, &raw).unwrap(), "ari:'hi'");

        let b64 = EncodeOptions::default().with_bstr_form(BstrForm::Base64Url);
        assert_eq!(encode(&bytes, &b64).unwrap(), "ari:b64'aGk='");
    }

    #[test]
    fn bstr_raw_falls_back_to_base16() {
        let raw = EncodeOptions::default().with_bstr_form(BstrForm::Raw);
        let invalid = Ari::from(vec![0xFF, 0x00]);
        assert_eq!(encode(&invalid, &raw).unwrap(), "ari:h'FF00'");

        let interior_nul = Ari::from(vec![b'a', 0x00, b'b']);
        assert_eq!(encode(&interior_nul, &raw).unwrap(), "ari:h'610062'");
    }

    #[test]
    fn time_forms() {
        let tp = Ari::tp(Timespec::new(0, 0));
        let td = Ari::td(Timespec::new(90, 0));
        assert_eq!(enc(&tp), "ari:/TP/20000101T000000Z");
        assert_eq!(enc(&td), "ari:/TD/PT1M30S");

        let numeric = EncodeOptions::default().with_time_text(false);
        assert_eq!(encode(&tp, &numeric).unwrap(), "ari:/TP/0");
        assert_eq!(encode(&td, &numeric).unwrap(), "ari:/TD/90");
    }

    #[test]
    fn am_entries_are_key_ordered() {
        let am: Am = [
            (Ari::from(2u64), Ari::from("b")),
            (Ari::from(1u64), Ari::from("a")),
        ]
        .into_iter()
        .collect();
        assert_eq!(enc(&Ari::from(am)), "ari:/AM/(1=a,2=b)");
    }

    #[test]
    fn tbl_rows() {
        let tbl = Tbl::from_rows(vec![
            vec![Ari::from(1u64), Ari::from(2u64)],
            vec![Ari::from(3u64), Ari::from(4u64)],
        ]);
        assert_eq!(enc(&Ari::from(tbl)), "ari:/TBL/c=2;(1,2)(3,4)");
        assert_eq!(enc(&Ari::from(Tbl::new(0))), "ari:/TBL/c=0;");
    }

    #[test]
    fn execset_header_suppresses_scheme() {
        let es = ExecSet {
            nonce: Ari::from(12_345u64),
            targets: vec![Ari::from(ObjPath::typed("ns1", AriType::Ctrl, 7))],
        };
        assert_eq!(enc(&Ari::from(es)), "ari:/EXECSET/n=12345;(//ns1/CTRL/7)");
    }

    #[test]
    fn rptset_reports() {
        let rs = RptSet {
            nonce: Ari::NULL,
            reftime: Ari::tp(Timespec::new(0, 0)),
            reports: vec![Report {
                reltime: Ari::td(Timespec::new(0, 0)),
                source: Ari::from(ObjPath::typed("ns1", AriType::Ctrl, 1)),
                items: vec![Ari::from(4u64), Ari::from(5u64)],
            }],
        };
        assert_eq!(
            enc(&Ari::from(rs)),
            "ari:/RPTSET/n=null;r=/TP/20000101T000000Z;(t=/TD/PT0S;s=//ns1/CTRL/1;(4,5))"
        );
    }

    #[test]
    fn reference_forms() {
        let plain = Ari::from(ObjPath::typed("ns1", AriType::Ctrl, 7));
        assert_eq!(enc(&plain), "ari://ns1/CTRL/7");

        let ns_only = Ari::from(ObjPath::new("ns1", IdSeg::Null, IdSeg::Null));
        assert_eq!(enc(&ns_only), "ari://ns1/");

        let with_params = Ari::from(ObjRef::with_params(
            ObjPath::typed("ns1", AriType::Ctrl, 7),
            RefParams::Ac(Ac::from(vec![Ari::from(1u64), Ari::from(2u64)])),
        ));
        assert_eq!(enc(&with_params), "ari://ns1/CTRL/7(1,2)");
    }

    #[test]
    fn untagged_container_value_is_rejected() {
        let bad = Ari::Lit(Lit { ari_type: None, value: LitValue::Ac(Ac::new()) });
        assert!(matches!(
            encode(&bad, &EncodeOptions::default()),
            Err(EncodeError::InvalidLiteral { ari_type: None })
        ));
    }

    #[test]
    fn mismatched_tag_is_rejected() {
        let bad = Ari::Lit(Lit { ari_type: Some(AriType::Tp), value: LitValue::Uint64(1) });
        assert!(matches!(
            encode(&bad, &EncodeOptions::default()),
            Err(EncodeError::InvalidLiteral { ari_type: Some(AriType::Tp) })
        ));
    }

    #[test]
    fn nested_first_prefix_only_at_top() {
        let inner: Am = [(Ari::from("k"), Ari::from(Ac::from(vec![Ari::from(1u64)])))]
            .into_iter()
            .collect();
        assert_eq!(enc(&Ari::from(inner)), "ari:/AM/(k=/AC/(1))");
    }
}
