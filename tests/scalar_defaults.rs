use std::str::FromStr;

use bigdecimal::BigDecimal;
use chrono::{NaiveDate, NaiveDateTime};
use defaultbox::{DefaultBox, FieldOutcome, Record};

defaultbox::record! {
    #[derive(Debug, Default)]
    pub struct BasicTypes {
        pub s: String => { default: "string" },
        pub int8: i8 => { default: "-128" },
        pub uint8: u8 => { default: "255" },
        pub int16: i16 => { default: "-32768" },
        pub uint16: u16 => { default: "65535" },
        pub int32: i32 => { default: "-2147483648" },
        pub uint32: u32 => { default: "4294967295" },
        pub int64: i64 => { default: "-9223372036854775808" },
        pub uint64: u64 => { default: "18446744073709551615" },
        pub int: isize => { default: "42" },
        pub uint: usize => { default: "42" },
        pub bool_true1: bool => { default: "true" },
        pub bool_true2: bool => { default: "t" },
        pub bool_true3: bool => { default: "1" },
        pub bool_false1: bool => { default: "false" },
        pub bool_false2: bool => { default: "f" },
        pub bool_false3: bool => { default: "0" },
        pub float32: f32 => { default: "3.14159" },
        pub float64: f64 => { default: "3.14159265358979" },
    }
}

#[test]
fn every_basic_type_takes_its_default() {
    let mut u = BasicTypes::default();
    DefaultBox::new(&mut u).fill();

    assert_eq!(u.s, "string");
    assert_eq!(u.int8, -128);
    assert_eq!(u.uint8, 255);
    assert_eq!(u.int16, -32768);
    assert_eq!(u.uint16, 65535);
    assert_eq!(u.int32, -2147483648);
    assert_eq!(u.uint32, 4294967295);
    assert_eq!(u.int64, i64::MIN);
    assert_eq!(u.uint64, u64::MAX);
    assert_eq!(u.int, 42);
    assert_eq!(u.uint, 42);
    assert!(u.bool_true1 && u.bool_true2 && u.bool_true3);
    assert!(!u.bool_false1 && !u.bool_false2 && !u.bool_false3);
    assert_eq!(u.float32, 3.14159f32);
    assert_eq!(u.float64, 3.14159265358979f64);
}

defaultbox::record! {
    #[derive(Debug)]
    pub struct Edgy {
        pub shouty: bool => { default: "TRUE" },
        pub mixed: bool => { default: "F" },
        pub yes: bool => { default: "yes" },
        pub wrapped: i8 => { default: "300" },
        pub negative_unsigned: u8 => { default: "-1" },
        pub plus_unsigned: u32 => { default: "+7" },
        pub plus_signed: i32 => { default: "+7" },
        pub not_a_number: i32 => { default: "ten" },
        pub not_a_float: f64 => { default: "3,14" },
        pub empty_string: String => { default: "" },
    }
}

impl Default for Edgy {
    fn default() -> Self {
        Self {
            shouty: false,
            mixed: true,
            yes: true,
            wrapped: 0,
            negative_unsigned: 9,
            plus_unsigned: 9,
            plus_signed: 0,
            not_a_number: 9,
            not_a_float: 9.5,
            empty_string: "before".to_string(),
        }
    }
}

#[test]
fn booleans_are_case_insensitive() {
    let mut e = Edgy::default();
    e.fill_defaults();
    assert!(e.shouty);
    assert!(!e.mixed);
}

#[test]
fn malformed_scalars_leave_the_field_untouched() {
    let mut e = Edgy::default();
    let report = DefaultBox::new(&mut e).fill_report();
    assert!(e.yes, "'yes' is not a boolean literal");
    assert_eq!(e.negative_unsigned, 9);
    assert_eq!(e.plus_unsigned, 9, "unsigned literals take no sign");
    assert_eq!(e.not_a_number, 9);
    assert_eq!(e.not_a_float, 9.5);
    assert_eq!(report.outcome("yes"), Some(FieldOutcome::Malformed));
    assert_eq!(report.outcome("not_a_float"), Some(FieldOutcome::Malformed));
}

#[test]
fn integers_are_truncated_to_the_field_width() {
    let mut e = Edgy::default();
    e.fill_defaults();
    assert_eq!(e.wrapped, 300i64 as i8);
    assert_eq!(e.plus_signed, 7);
}

#[test]
fn empty_text_is_a_valid_string_default() {
    let mut e = Edgy::default();
    e.fill_defaults();
    assert_eq!(e.empty_string, "");
}

defaultbox::record! {
    #[derive(Debug, Default)]
    pub struct Extended {
        pub released: NaiveDate => { default: "2024-05-01" },
        pub started: NaiveDateTime => { default: "2024-05-01T08:30:00" },
        pub spaced: NaiveDateTime => { default: "2024-05-01 08:30:00" },
        pub price: BigDecimal => { default: "19.990000000000000000001" },
        pub retries: Option<u8> => { default: "3" },
        pub missing: Option<u8> => { default: "many" },
    }
}

#[test]
fn temporal_decimal_and_optional_scalars() {
    let mut x = Extended::default();
    x.fill_defaults();
    assert_eq!(x.released, NaiveDate::from_ymd_opt(2024, 5, 1).unwrap());
    let expected = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap().and_hms_opt(8, 30, 0).unwrap();
    assert_eq!(x.started, expected);
    assert_eq!(x.spaced, expected);
    assert_eq!(x.price, BigDecimal::from_str("19.990000000000000000001").unwrap());
    assert_eq!(x.retries, Some(3));
    assert_eq!(x.missing, None);
}

#[test]
fn coerce_scalar_reports_success() {
    let mut value = 0u16;
    assert!(defaultbox::coerce_scalar(&mut value, "65535"));
    assert_eq!(value, 65535);
    assert!(!defaultbox::coerce_scalar(&mut value, "nope"));
    assert_eq!(value, 65535);

    let mut list: Vec<u16> = Vec::new();
    assert!(!defaultbox::coerce_scalar(&mut list, "[1, 2]"));
    assert!(list.is_empty());
}

defaultbox::record! {
    #[derive(Debug)]
    pub struct Ranges {
        pub huge: f64 => { default: "1e400" },
        pub tiny: f32 => { default: "-1e39" },
        pub negative_infinity: f64 => { default: "-inf" },
        pub spelled_out: f32 => { default: "+Infinity" },
        pub not_a_number: f64 => { default: "NaN" },
    }
}

impl Default for Ranges {
    fn default() -> Self {
        Self {
            huge: 1.5,
            tiny: 2.5,
            negative_infinity: 0.0,
            spelled_out: 0.0,
            not_a_number: 0.0,
        }
    }
}

#[test]
fn out_of_range_floats_are_malformed() {
    let mut r = Ranges::default();
    let report = DefaultBox::new(&mut r).fill_report();
    assert_eq!(r.huge, 1.5, "1e400 overflows f64");
    assert_eq!(report.outcome("huge"), Some(FieldOutcome::Malformed));
    assert_eq!(r.tiny, 2.5, "-1e39 is finite as f64 but overflows f32");
    assert_eq!(report.outcome("tiny"), Some(FieldOutcome::Malformed));
    assert_eq!(report.outcome("negative_infinity"), Some(FieldOutcome::Filled));
    assert_eq!(r.negative_infinity, f64::NEG_INFINITY);
    assert_eq!(r.spelled_out, f32::INFINITY);
    assert!(r.not_a_number.is_nan());
}
