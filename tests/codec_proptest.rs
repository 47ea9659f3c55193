//! Property-based tests for the codec invariants: round-trips of every
//! primitive codec and the equality/hash/determinism guarantees of the
//! value model.

use proptest::prelude::*;

use dtn_ari::prelude::*;
use dtn_ari::{base16, base64, escape, numeric, percent, timecodec};

/// Strategies for generating values and well-formed ARI trees.
mod strategies {
    use super::*;

    /// Time spans within the duration codec's documented range.
    pub fn timespec_span() -> impl Strategy<Value = Timespec> {
        let bound = 1i64 << 62;
        ((-bound + 1..bound), 0u32..1_000_000_000)
            .prop_map(|(seconds, nanos)| Timespec::new(seconds, nanos))
    }

    /// Time points within the calendar codec's range (years 2000-9999).
    pub fn timespec_calendar() -> impl Strategy<Value = Timespec> {
        (0i64..250_000_000_000, 0u32..1_000_000_000)
            .prop_map(|(seconds, nanos)| Timespec::new(seconds, nanos))
    }

    /// Safe-set strings drawn from the characters the encoder uses.
    pub fn safe_set() -> impl Strategy<Value = String> {
        prop::sample::select(vec!["", "!'+:@", ":@", "!", "'+"]).prop_map(str::to_string)
    }

    fn leaf_ari() -> impl Strategy<Value = Ari> {
        prop_oneof![
            Just(Ari::UNDEFINED),
            Just(Ari::NULL),
            any::<bool>().prop_map(Ari::from),
            any::<u64>().prop_map(Ari::from),
            any::<i64>().prop_map(Ari::from),
            any::<f64>().prop_map(Ari::from),
            Just(Ari::from(f64::NAN)),
            ".*".prop_map(Ari::from),
            prop::collection::vec(any::<u8>(), 0..24).prop_map(Ari::from),
            timespec_calendar().prop_map(Ari::tp),
            timespec_span().prop_map(Ari::td),
        ]
    }

    fn idseg() -> impl Strategy<Value = IdSeg> {
        prop_oneof![
            "[a-z][a-z0-9_.-]{0,8}".prop_map(|s| IdSeg::from(s.as_str())),
            any::<i64>().prop_map(IdSeg::from),
        ]
    }

    fn objref(params: impl Strategy<Value = RefParams>) -> impl Strategy<Value = Ari> {
        (idseg(), idseg(), prop::option::of(prop::sample::select(AriType::ALL.to_vec())), params)
            .prop_map(|(ns_id, obj_id, ari_type, params)| {
                let path = match ari_type {
                    Some(t) => ObjPath::typed(ns_id, t, obj_id),
                    None => ObjPath { ns_id, type_id: IdSeg::from("thing"), obj_id, ari_type: None },
                };
                Ari::from(ObjRef::with_params(path, params))
            })
    }

    /// Well-formed ARI trees up to a few levels deep.
    pub fn ari() -> impl Strategy<Value = Ari> {
        let leaf = prop_oneof![
            4 => leaf_ari(),
            1 => objref(Just(RefParams::None)),
        ];
        leaf.prop_recursive(3, 24, 4, |inner| {
            let items = prop::collection::vec(inner.clone(), 0..4);
            let pairs = prop::collection::vec((inner.clone(), inner.clone()), 0..4);
            prop_oneof![
                items.clone().prop_map(|v| Ari::from(Ac::from(v))),
                pairs.prop_map(|v| Ari::from(v.into_iter().collect::<Am>())),
                items
                    .clone()
                    .prop_map(|v| { Ari::from(Tbl { ncols: 2, items: v }) }),
                (inner.clone(), items.clone()).prop_map(|(nonce, targets)| {
                    Ari::from(ExecSet { nonce, targets })
                }),
                (inner.clone(), timespec_calendar(), items).prop_map(
                    |(nonce, reftime, items)| {
                        Ari::from(RptSet {
                            nonce,
                            reftime: Ari::tp(reftime),
                            reports: vec![Report {
                                reltime: Ari::td(Timespec::new(1, 0)),
                                source: Ari::NULL,
                                items,
                            }],
                        })
                    }
                ),
                inner.prop_map(|param| {
                    Ari::from(ObjRef::with_params(
                        ObjPath::typed("ns1", AriType::Ctrl, 7),
                        RefParams::Ac(Ac::from(vec![param])),
                    ))
                }),
            ]
        })
    }
}

mod lexical_roundtrips {
    use super::strategies::*;
    use super::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(1000))]

        #[test]
        fn percent_roundtrip(bytes in prop::collection::vec(any::<u8>(), 0..64), safe in safe_set()) {
            let mut encoded = String::new();
            percent::percent_encode(&mut encoded, &bytes, &safe);
            let decoded = percent::percent_decode(encoded.as_bytes()).unwrap();
            prop_assert_eq!(decoded, bytes);
        }

        #[test]
        fn slash_escape_roundtrip(text in ".*", quote in prop::sample::select(vec!['"', '\''])) {
            let mut escaped = String::new();
            escape::slash_escape(&mut escaped, &text, quote);
            let unescaped = escape::slash_unescape(&escaped).unwrap();
            prop_assert_eq!(unescaped, text);
        }

        #[test]
        fn base16_roundtrip(bytes in prop::collection::vec(any::<u8>(), 0..64), upper in any::<bool>()) {
            let mut encoded = String::new();
            base16::base16_encode(&mut encoded, &bytes, upper);
            prop_assert_eq!(base16::base16_decode(&encoded).unwrap(), bytes);
        }

        #[test]
        fn base64_roundtrip(bytes in prop::collection::vec(any::<u8>(), 0..64), url in any::<bool>()) {
            let mut encoded = String::new();
            base64::base64_encode(&mut encoded, &bytes, url);
            prop_assert_eq!(encoded.len() % 4, 0);
            prop_assert_eq!(base64::base64_decode(&encoded).unwrap(), bytes);
        }

        #[test]
        fn uint_radix_roundtrip(value in any::<u64>()) {
            for base in [numeric::IntBase::Base2, numeric::IntBase::Base10, numeric::IntBase::Base16] {
                let mut encoded = String::new();
                numeric::uint64_encode(&mut encoded, value, base);
                prop_assert_eq!(numeric::uint64_decode(&encoded).unwrap(), value);
            }
        }
    }
}

mod time_roundtrips {
    use super::strategies::*;
    use super::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(1000))]

        #[test]
        fn decfrac_roundtrip(value in timespec_span()) {
            let mut encoded = String::new();
            timecodec::decfrac_encode(&mut encoded, &value);
            prop_assert_eq!(timecodec::decfrac_decode(&encoded).unwrap(), value);
        }

        #[test]
        fn timeperiod_roundtrip(value in timespec_span()) {
            let mut encoded = String::new();
            timecodec::timeperiod_encode(&mut encoded, &value);
            prop_assert_eq!(timecodec::timeperiod_decode(&encoded).unwrap(), value);
        }

        #[test]
        fn utctime_roundtrip(value in timespec_calendar(), use_sep in any::<bool>()) {
            let mut encoded = String::new();
            timecodec::utctime_encode(&mut encoded, &value, use_sep).unwrap();
            prop_assert_eq!(timecodec::utctime_decode(&encoded).unwrap(), value);
        }
    }
}

mod tree_invariants {
    use super::strategies::*;
    use super::*;
    use std::collections::hash_map::DefaultHasher;
    use std::hash::{Hash, Hasher};

    fn hash_of(ari: &Ari) -> u64 {
        let mut hasher = DefaultHasher::new();
        ari.hash(&mut hasher);
        hasher.finish()
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(500))]

        #[test]
        fn encoding_is_deterministic(ari in ari()) {
            let opts = EncodeOptions::default();
            let first = encode(&ari, &opts).unwrap();
            let second = encode(&ari, &opts).unwrap();
            prop_assert_eq!(first, second);
        }

        #[test]
        fn every_value_equals_itself(ari in ari()) {
            prop_assert_eq!(&ari, &ari);
        }

        #[test]
        fn clones_are_equal_and_hash_alike(ari in ari()) {
            let copy = ari.clone();
            prop_assert_eq!(&ari, &copy);
            prop_assert_eq!(hash_of(&ari), hash_of(&copy));
        }

        #[test]
        fn translation_copy_preserves_equality_and_hash(ari in ari()) {
            let copy = translate(&ari, &mut dtn_ari::visit::CopyTranslator).unwrap();
            prop_assert_eq!(hash_of(&ari), hash_of(&copy));
            prop_assert_eq!(ari, copy);
        }

        #[test]
        fn ordering_is_consistent_with_equality(left in ari(), right in ari()) {
            let cmp_equal = left.cmp(&right) == std::cmp::Ordering::Equal;
            prop_assert_eq!(cmp_equal, left == right);
        }

        #[test]
        fn equal_trees_hash_alike(left in ari(), right in ari()) {
            if left == right {
                prop_assert_eq!(hash_of(&left), hash_of(&right));
            }
        }
    }
}
