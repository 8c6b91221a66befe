// used for temporal defaults
use chrono::{NaiveDate, NaiveDateTime};
// used for decimal defaults
use bigdecimal::BigDecimal;

// used when parsing a string to a temporal or decimal value
use std::str::FromStr;
// mapping fields
use std::collections::{BTreeMap, HashMap};
use std::hash::{BuildHasher, Hash};

use tracing::trace;

use crate::grammar::{self, Brackets};

/// The declared kind of a field, as far as default coercion is concerned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    String,
    Signed,
    Unsigned,
    Float,
    Bool,
    Temporal,
    Decimal,
    Sequence,
    Mapping,
    Unsupported,
}

impl Kind {
    pub fn is_scalar(self) -> bool {
        !matches!(self, Kind::Sequence | Kind::Mapping | Kind::Unsupported)
    }
}

/// A value that can be parsed from a single literal annotation.
///
/// `Default` supplies the zero value used when an element of a sequence or a
/// key/value of a mapping fails to parse.
pub trait Scalar: Default {
    // static stuff which needs to be implemented downstream
    const KIND: Kind;
    const DATA_TYPE: &'static str;
    fn parse_default(text: &str) -> Option<Self>;
}

/// Result of coercing a collection annotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Coercion {
    /// Every item parsed.
    Applied,
    /// The collection was installed, but `rejected` items were zero-filled or dropped.
    Partial { rejected: usize },
    /// Nothing was written.
    Rejected,
}

impl Coercion {
    fn from_rejected(rejected: usize) -> Self {
        if rejected == 0 {
            Coercion::Applied
        } else {
            Coercion::Partial { rejected }
        }
    }
    pub fn written(self) -> bool {
        !matches!(self, Coercion::Rejected)
    }
}

/// A writable field slot. Types that cannot take a default keep the provided
/// methods and report [`Kind::Unsupported`]; [`crate::record!`] substitutes
/// [`Unsupported`] for field types without an impl.
pub trait FieldValue {
    fn kind(&self) -> Kind {
        Kind::Unsupported
    }
    fn set_scalar(&mut self, _text: &str) -> bool {
        false
    }
    fn set_sequence(&mut self, _text: &str, _brackets: Brackets) -> Coercion {
        Coercion::Rejected
    }
    fn set_mapping(&mut self, _text: &str, _brackets: Brackets) -> Coercion {
        Coercion::Rejected
    }
}

/// Stand-in slot for field types the engine cannot write.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Unsupported;

impl FieldValue for Unsupported {}

/// Wrapper used by [`crate::record!`] to pick a field's [`FieldValue`] impl when
/// there is one and [`Unsupported`] otherwise.
///
/// The choice is made by method resolution: `(&mut Slot::new(field)).as_field_value()`
/// finds [`SupportedSlot`] on `Slot<T>` first when `T: FieldValue`, and falls back
/// to [`UnsupportedSlot`] on `&mut Slot<T>` after one more autoref.
#[doc(hidden)]
pub struct Slot<'a, T> {
    field: &'a mut T,
    fallback: Unsupported,
}

impl<'a, T> Slot<'a, T> {
    pub fn new(field: &'a mut T) -> Self {
        Self { field, fallback: Unsupported }
    }
}

#[doc(hidden)]
pub trait SupportedSlot {
    fn as_field_value(&mut self) -> &mut dyn FieldValue;
}

impl<T: FieldValue> SupportedSlot for Slot<'_, T> {
    fn as_field_value(&mut self) -> &mut dyn FieldValue {
        &mut *self.field
    }
}

#[doc(hidden)]
pub trait UnsupportedSlot {
    fn as_field_value(&mut self) -> &mut dyn FieldValue;
}

impl<T> UnsupportedSlot for &mut Slot<'_, T> {
    fn as_field_value(&mut self) -> &mut dyn FieldValue {
        &mut self.fallback
    }
}

/// Parses `text` into the slot's scalar type and writes it; `false` leaves the slot untouched.
pub fn coerce_scalar(slot: &mut dyn FieldValue, text: &str) -> bool {
    slot.set_scalar(text)
}

/// Builds a sequence from `text` and replaces the slot with it.
pub fn coerce_sequence(slot: &mut dyn FieldValue, text: &str, brackets: Brackets) -> bool {
    slot.set_sequence(text, brackets).written()
}

/// Builds a mapping from `text` and replaces the slot with it.
pub fn coerce_mapping(slot: &mut dyn FieldValue, text: &str, brackets: Brackets) -> bool {
    slot.set_mapping(text, brackets).written()
}

// ------------- Scalars --------------
impl Scalar for String {
    const KIND: Kind = Kind::String;
    const DATA_TYPE: &'static str = "String";
    fn parse_default(text: &str) -> Option<String> {
        Some(text.to_string())
    }
}

// integers are parsed at 64 bits and truncated to the field width
macro_rules! signed_scalar {
    ($($t:ty),*) => {$(
        impl Scalar for $t {
            const KIND: Kind = Kind::Signed;
            const DATA_TYPE: &'static str = stringify!($t);
            fn parse_default(text: &str) -> Option<$t> {
                text.parse::<i64>().ok().map(|v| v as $t)
            }
        }
    )*};
}
signed_scalar!(i8, i16, i32, i64, isize);

macro_rules! unsigned_scalar {
    ($($t:ty),*) => {$(
        impl Scalar for $t {
            const KIND: Kind = Kind::Unsigned;
            const DATA_TYPE: &'static str = stringify!($t);
            fn parse_default(text: &str) -> Option<$t> {
                if text.starts_with('+') {
                    return None;
                }
                text.parse::<u64>().ok().map(|v| v as $t)
            }
        }
    )*};
}
unsigned_scalar!(u8, u16, u32, u64, usize);

macro_rules! float_scalar {
    ($($t:ty),*) => {$(
        impl Scalar for $t {
            const KIND: Kind = Kind::Float;
            const DATA_TYPE: &'static str = stringify!($t);
            fn parse_default(text: &str) -> Option<$t> {
                let value = text.parse::<f64>().ok()? as $t;
                (value.is_finite() || names_non_finite(text)).then_some(value)
            }
        }
    )*};
}
float_scalar!(f32, f64);

// out-of-range literals overflow to infinity; only spelled-out infinities and NaN may be non-finite
fn names_non_finite(text: &str) -> bool {
    let unsigned = text.strip_prefix(['+', '-']).unwrap_or(text);
    ["inf", "infinity", "nan"]
        .iter()
        .any(|literal| unsigned.eq_ignore_ascii_case(literal))
}

impl Scalar for bool {
    const KIND: Kind = Kind::Bool;
    const DATA_TYPE: &'static str = "bool";
    fn parse_default(text: &str) -> Option<bool> {
        const TRUTHY: [&str; 3] = ["true", "t", "1"];
        const FALSY: [&str; 3] = ["false", "f", "0"];
        if TRUTHY.iter().any(|t| text.eq_ignore_ascii_case(t)) {
            Some(true)
        } else if FALSY.iter().any(|f| text.eq_ignore_ascii_case(f)) {
            Some(false)
        } else {
            None
        }
    }
}

impl Scalar for NaiveDate {
    const KIND: Kind = Kind::Temporal;
    const DATA_TYPE: &'static str = "NaiveDate";
    fn parse_default(text: &str) -> Option<NaiveDate> {
        NaiveDate::from_str(text).ok()
    }
}

impl Scalar for NaiveDateTime {
    const KIND: Kind = Kind::Temporal;
    const DATA_TYPE: &'static str = "NaiveDateTime";
    fn parse_default(text: &str) -> Option<NaiveDateTime> {
        NaiveDateTime::from_str(text)
            .or_else(|_| NaiveDateTime::parse_from_str(text, "%Y-%m-%d %H:%M:%S"))
            .ok()
    }
}

impl Scalar for BigDecimal {
    const KIND: Kind = Kind::Decimal;
    const DATA_TYPE: &'static str = "Decimal";
    fn parse_default(text: &str) -> Option<BigDecimal> {
        BigDecimal::from_str(text).ok()
    }
}

fn assign<T: Scalar>(slot: &mut T, text: &str) -> bool {
    match T::parse_default(text) {
        Some(value) => {
            *slot = value;
            true
        }
        None => false,
    }
}

macro_rules! scalar_field {
    ($($t:ty),*) => {$(
        impl FieldValue for $t {
            fn kind(&self) -> Kind {
                <$t as Scalar>::KIND
            }
            fn set_scalar(&mut self, text: &str) -> bool {
                assign(self, text)
            }
        }
    )*};
}
scalar_field!(
    String, i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32, f64, bool,
    NaiveDate, NaiveDateTime, BigDecimal
);

impl<T: Scalar> FieldValue for Option<T> {
    fn kind(&self) -> Kind {
        T::KIND
    }
    fn set_scalar(&mut self, text: &str) -> bool {
        match T::parse_default(text) {
            Some(value) => {
                *self = Some(value);
                true
            }
            None => false,
        }
    }
}

// ------------- Collections --------------
impl<T: Scalar> FieldValue for Vec<T> {
    fn kind(&self) -> Kind {
        Kind::Sequence
    }
    fn set_sequence(&mut self, text: &str, brackets: Brackets) -> Coercion {
        let items = match grammar::sequence_items(text, brackets) {
            Some(items) if !items.is_empty() => items,
            _ => return Coercion::Rejected,
        };
        let mut rejected = 0;
        let sequence: Vec<T> = items
            .into_iter()
            .map(|item| {
                T::parse_default(item).unwrap_or_else(|| {
                    trace!(item, data_type = T::DATA_TYPE, "zero-filling sequence item");
                    rejected += 1;
                    T::default()
                })
            })
            .collect();
        *self = sequence;
        Coercion::from_rejected(rejected)
    }
}

/// Parses mapping entries into pairs, counting dropped entries and zero-filled
/// keys or values as rejected.
fn build_pairs<K: Scalar, V: Scalar>(text: &str, brackets: Brackets) -> Option<(Vec<(K, V)>, usize)> {
    let entries = grammar::mapping_entries(text, brackets)?;
    if entries.is_empty() {
        return None;
    }
    let mut rejected = 0;
    let mut pairs = Vec::with_capacity(entries.len());
    for entry in entries {
        let Some((key_text, value_text)) = grammar::split_pair(entry) else {
            trace!(entry, "dropping mapping entry without a single colon");
            rejected += 1;
            continue;
        };
        let mut key = K::default();
        let mut value = V::default();
        let key_ok = assign(&mut key, key_text);
        let value_ok = assign(&mut value, value_text);
        if !(key_ok && value_ok) {
            trace!(
                entry,
                key_type = K::DATA_TYPE,
                value_type = V::DATA_TYPE,
                "zero-filling mapping entry"
            );
            rejected += 1;
        }
        pairs.push((key, value));
    }
    Some((pairs, rejected))
}

impl<K, V, S> FieldValue for HashMap<K, V, S>
where
    K: Scalar + Eq + Hash,
    V: Scalar,
    S: BuildHasher + Default,
{
    fn kind(&self) -> Kind {
        Kind::Mapping
    }
    fn set_mapping(&mut self, text: &str, brackets: Brackets) -> Coercion {
        let Some((pairs, rejected)) = build_pairs::<K, V>(text, brackets) else {
            return Coercion::Rejected;
        };
        *self = pairs.into_iter().collect();
        Coercion::from_rejected(rejected)
    }
}

impl<K, V> FieldValue for BTreeMap<K, V>
where
    K: Scalar + Ord,
    V: Scalar,
{
    fn kind(&self) -> Kind {
        Kind::Mapping
    }
    fn set_mapping(&mut self, text: &str, brackets: Brackets) -> Coercion {
        let Some((pairs, rejected)) = build_pairs::<K, V>(text, brackets) else {
            return Coercion::Rejected;
        };
        *self = pairs.into_iter().collect();
        Coercion::from_rejected(rejected)
    }
}
