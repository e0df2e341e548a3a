use std::mem;

use pretty_assertions::assert_eq;

use crate::tag::Tag;
use crate::{compound, from_binary, to_binary, written_size, Compound, Error, List, NbtString, Value};

const ROOT_NAME: &str = "The root name‽";

fn encode(c: &Compound, root_name: &str) -> Vec<u8> {
    let mut buf = Vec::new();
    to_binary(c, &mut buf, root_name).unwrap();
    buf
}

#[test]
fn round_trip() {
    let compound = example_compound();
    let buf = encode(&compound, ROOT_NAME);

    let (decoded, root_name) = from_binary(&mut buf.as_slice()).unwrap();

    assert_eq!(root_name, ROOT_NAME);
    assert_eq!(compound, decoded);
}

#[test]
fn exact_bytes() {
    let c = compound! {
        "a" => 42_i32,
        "list" => List::Int(vec![1, 2, 3]),
    };

    #[rustfmt::skip]
    let expected = [
        0x0a, 0x00, 0x00,
        0x03, 0x00, 0x01, b'a', 0x00, 0x00, 0x00, 0x2a,
        0x09, 0x00, 0x04, b'l', b'i', b's', b't', 0x03, 0x00, 0x00, 0x00, 0x03,
        0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x02, 0x00, 0x00, 0x00, 0x03,
        0x00,
    ];

    assert_eq!(encode(&c, ""), expected);

    let (decoded, root_name) = from_binary(&mut expected.as_slice()).unwrap();
    assert_eq!(decoded, c);
    assert_eq!(root_name, "");
}

#[test]
fn cursor_advances_past_root() {
    let mut buf = encode(&compound! { "x" => 1_i8 }, "");
    let len = buf.len();
    buf.extend([0xde, 0xad]);

    let mut slice = buf.as_slice();
    from_binary(&mut slice).unwrap();

    assert_eq!(slice, [0xde, 0xad]);
    assert_eq!(buf.len() - slice.len(), len);
}

#[test]
fn check_min_sizes() {
    fn check(min_val: Value, expected_size: usize) {
        /// TAG_Compound + root name + field tag + field name + TAG_End
        const COMPOUND_OVERHEAD: usize = 1 + 2 + 1 + 2 + 1;

        let dbg = format!("{min_val:?}");
        let buf = encode(&compound!("" => min_val), "");

        assert_eq!(
            expected_size,
            buf.len() - COMPOUND_OVERHEAD,
            "size mismatch for {dbg}"
        );
    }

    check(Value::Byte(0), 1);
    check(Value::Short(0), 2);
    check(Value::Int(0), 4);
    check(Value::Long(0), 8);
    check(Value::Float(0.0), 4);
    check(Value::Double(0.0), 8);
    check(Value::ByteArray([].into()), 4);
    check(Value::String(NbtString::new()), 2);
    check(Value::List(Vec::<i32>::new().into()), 5);
    check(Value::Compound(compound!()), 1);
    check(Value::IntArray([].into()), 4);
    check(Value::LongArray([].into()), 4);
}

#[test]
fn written_size_matches_output() {
    let c = example_compound();

    assert_eq!(written_size(&c, ROOT_NAME), encode(&c, ROOT_NAME).len());
}

#[test]
fn string_length_boundaries() {
    let longest = NbtString::from(vec![b'z'; usize::from(u16::MAX)]);
    let c = compound! {
        "empty" => "",
        "longest" => longest.clone(),
    };

    let buf = encode(&c, "");
    let (decoded, _) = from_binary(&mut buf.as_slice()).unwrap();

    assert_eq!(decoded["empty"], Value::String(NbtString::new()));
    assert_eq!(decoded["longest"], Value::String(longest));
}

#[test]
fn too_long_string_is_rejected() {
    let c = compound! { "s" => NbtString::from(vec![0_u8; usize::from(u16::MAX) + 1]) };

    assert!(matches!(
        to_binary(&c, &mut Vec::new(), ""),
        Err(Error::StringTooLong(65536))
    ));
}

#[test]
fn invalid_utf8_round_trips() {
    let name = NbtString::from(vec![0xff, 0xfe]);
    let value = NbtString::from(vec![0xc0, 0x80, 0xed, 0xa0, 0x80]);

    let mut c = Compound::new();
    c.insert(name.clone(), value.clone());

    let buf = encode(&c, "");
    let (decoded, _) = from_binary(&mut buf.as_slice()).unwrap();

    assert_eq!(decoded[&name], Value::String(value));
}

#[test]
fn empty_containers() {
    // Root compound with no children is just the end byte.
    let empty = [Tag::Compound as u8, 0, 0, Tag::End as u8];
    let (decoded, _) = from_binary(&mut empty.as_slice()).unwrap();
    assert!(decoded.is_empty());
    assert_eq!(encode(&decoded, ""), empty);

    for tag in Tag::ALL {
        let c = compound! { "l" => List::with_tag(tag) };
        let buf = encode(&c, "");
        let (decoded, _) = from_binary(&mut buf.as_slice()).unwrap();

        assert_eq!(decoded, c, "empty list of {tag}");
    }
}

#[test]
fn negative_counts_are_empty() {
    #[rustfmt::skip]
    let buf = [
        Tag::Compound as u8, 0, 0,
        Tag::IntArray as u8, 0, 1, b'a', 0xff, 0xff, 0xff, 0xff,
        Tag::List as u8, 0, 1, b'l', Tag::Short as u8, 0x80, 0, 0, 0,
        Tag::List as u8, 0, 1, b'c', Tag::Compound as u8, 0xff, 0xff, 0xff, 0xf0,
        Tag::End as u8,
    ];

    let (decoded, _) = from_binary(&mut buf.as_slice()).unwrap();

    assert_eq!(
        decoded,
        compound! {
            "a" => Vec::<i32>::new(),
            "l" => List::Short(vec![]),
            "c" => List::Compound(vec![]),
        }
    );
}

#[test]
fn extreme_values_keep_bit_patterns() {
    let c = compound! {
        "byte_min" => i8::MIN,
        "short_min" => i16::MIN,
        "int_min" => i32::MIN,
        "long_min" => i64::MIN,
        "neg_zero" => -0.0_f64,
        "nan" => f32::from_bits(0x7fc0_0001),
    };

    let buf = encode(&c, "");
    let (decoded, _) = from_binary(&mut buf.as_slice()).unwrap();

    assert_eq!(decoded["int_min"], Value::Int(-2_147_483_648));
    assert_eq!(decoded["long_min"], Value::Long(i64::MIN));
    assert_eq!(decoded["byte_min"], Value::Byte(-128));
    assert_eq!(decoded["short_min"], Value::Short(i16::MIN));
    assert!(matches!(decoded["neg_zero"], Value::Double(d) if d.to_bits() == (-0.0_f64).to_bits()));
    assert!(matches!(decoded["nan"], Value::Float(f) if f.to_bits() == 0x7fc0_0001));
}

#[test]
fn missing_end_is_truncated() {
    let buf = [Tag::Compound as u8, 0, 0, Tag::Byte as u8, 0, 1, b'b', 5];

    assert!(matches!(
        from_binary(&mut buf.as_slice()),
        Err(Error::TruncatedInput { .. })
    ));
}

#[test]
fn unknown_kind_is_rejected() {
    let buf = [Tag::Compound as u8, 0, 0, 0x0d, 0, 0, Tag::End as u8];

    assert!(matches!(
        from_binary(&mut buf.as_slice()),
        Err(Error::UnknownTagKind(0x0d))
    ));

    let list = [Tag::Compound as u8, 0, 0, Tag::List as u8, 0, 0, 0x20, 0, 0, 0, 0, 0];

    assert!(matches!(
        from_binary(&mut list.as_slice()),
        Err(Error::UnknownTagKind(0x20))
    ));
}

#[test]
fn non_compound_root_is_rejected() {
    let buf = [Tag::Int as u8, 0, 0, 0, 0, 0, 1];

    assert!(matches!(
        from_binary(&mut buf.as_slice()),
        Err(Error::InvalidRootKind(Tag::Int))
    ));
}

#[test]
fn overlong_name_is_malformed() {
    let buf = [Tag::Compound as u8, 0, 0, Tag::Byte as u8, 0, 9, b'x'];

    assert!(matches!(
        from_binary(&mut buf.as_slice()),
        Err(Error::MalformedString {
            declared: 9,
            remaining: 1
        })
    ));
}

#[test]
fn list_count_beyond_input_is_truncated() {
    #[rustfmt::skip]
    let buf = [
        Tag::Compound as u8, 0, 0,
        Tag::List as u8, 0, 0, Tag::Compound as u8, 0x7f, 0xff, 0xff, 0xff,
        Tag::End as u8,
        Tag::End as u8,
    ];

    assert!(matches!(
        from_binary(&mut buf.as_slice()),
        Err(Error::TruncatedInput { .. })
    ));
}

#[test]
fn array_count_beyond_input_is_truncated() {
    let buf = [Tag::Compound as u8, 0, 0, Tag::LongArray as u8, 0, 0, 0, 0, 0, 2, 0, 0];

    assert!(matches!(
        from_binary(&mut buf.as_slice()),
        Err(Error::TruncatedInput {
            needed: 16,
            remaining: 2
        })
    ));
}

#[test]
fn end_list_with_elements_is_rejected() {
    let buf = [Tag::Compound as u8, 0, 0, Tag::List as u8, 0, 0, Tag::End as u8, 0, 0, 0, 3, 0];

    assert!(matches!(
        from_binary(&mut buf.as_slice()),
        Err(Error::NonEmptyEndList(3))
    ));
}

#[test]
fn duplicate_names_keep_last() {
    #[rustfmt::skip]
    let buf = [
        Tag::Compound as u8, 0, 0,
        Tag::Byte as u8, 0, 1, b'k', 1,
        Tag::Short as u8, 0, 1, b'k', 0, 2,
        Tag::End as u8,
    ];

    let (decoded, _) = from_binary(&mut buf.as_slice()).unwrap();

    assert_eq!(decoded, compound! { "k" => 2_i16 });
}

#[test]
fn deeply_nested_compound_encode() {
    let mut c = compound!("" => 111_i8);
    for _ in 0..10_000 {
        c = compound!("" => c);
    }

    // Should not overflow the stack
    assert!(matches!(
        to_binary(&c, &mut Vec::new(), ROOT_NAME),
        Err(Error::DepthLimitExceeded)
    ));

    // Don't overflow the stack while dropping.
    mem::forget(c);
}

#[test]
fn deeply_nested_compound_decode() {
    let mut buf = vec![Tag::Compound as u8, 0, 0]; // Root compound
    let n = 10_000;

    for _ in 0..n {
        buf.extend([Tag::Compound as u8, 0, 0]);
    }

    buf.extend((0..n).map(|_| Tag::End as u8));

    buf.push(Tag::End as u8); // End root compound

    // Should not overflow the stack
    assert!(matches!(
        from_binary(&mut buf.as_slice()),
        Err(Error::DepthLimitExceeded)
    ));
}

#[test]
fn deeply_nested_list_encode() {
    let mut l = List::Byte(Vec::new());
    for _ in 0..10_000 {
        l = List::List(vec![l]);
    }

    let c = compound!("" => l);

    // Should not panic
    assert!(matches!(
        to_binary(&c, &mut Vec::new(), ROOT_NAME),
        Err(Error::DepthLimitExceeded)
    ));

    // Don't overflow the stack while dropping.
    mem::forget(c);
}

#[test]
fn deeply_nested_list_decode() {
    // Root compound with one field.
    let mut buf = vec![Tag::Compound as u8, 0, 0, Tag::List as u8, 0, 0];
    let n = 10_000;

    for _ in 0..n - 1 {
        buf.extend([Tag::List as u8, 0, 0, 0, 1]); // List of list
    }

    // Last list is an empty list of bytes.
    buf.extend([Tag::Byte as u8, 0, 0, 0, 0]);

    buf.push(Tag::End as u8); // End root compound

    // Should not overflow the stack
    assert!(matches!(
        from_binary(&mut buf.as_slice()),
        Err(Error::DepthLimitExceeded)
    ));
}

/// A root compound holding `n` compounds nested inside each other.
fn nested_compound(n: usize) -> Compound {
    let mut c = compound!("" => 1_i8);
    for _ in 0..n {
        c = compound!("" => c);
    }
    c
}

fn nested_compound_bytes(n: usize) -> Vec<u8> {
    let mut buf = vec![Tag::Compound as u8, 0, 0]; // Root compound

    for _ in 0..n {
        buf.extend([Tag::Compound as u8, 0, 0]);
    }

    buf.extend((0..=n).map(|_| Tag::End as u8));
    buf
}

#[test]
fn nesting_at_limit_is_accepted() {
    let c = nested_compound(crate::MAX_DEPTH);

    let buf = encode(&c, "");
    let (decoded, _) = from_binary(&mut buf.as_slice()).unwrap();
    assert_eq!(decoded, c);

    let buf = nested_compound_bytes(crate::MAX_DEPTH);
    assert!(from_binary(&mut buf.as_slice()).is_ok());
}

#[test]
fn nesting_past_limit_is_rejected() {
    let c = nested_compound(crate::MAX_DEPTH + 1);

    assert!(matches!(
        to_binary(&c, &mut Vec::new(), ""),
        Err(Error::DepthLimitExceeded)
    ));

    let buf = nested_compound_bytes(crate::MAX_DEPTH + 1);
    assert!(matches!(
        from_binary(&mut buf.as_slice()),
        Err(Error::DepthLimitExceeded)
    ));
}

#[cfg(feature = "preserve_order")]
#[test]
fn re_encoding_is_byte_stable() {
    #[rustfmt::skip]
    let buf = [
        Tag::Compound as u8, 0, 0,
        Tag::Byte as u8, 0, 1, b'z', 1,
        Tag::Byte as u8, 0, 1, b'a', 2,
        Tag::End as u8,
    ];

    let (decoded, _) = from_binary(&mut buf.as_slice()).unwrap();

    assert_eq!(encode(&decoded, ""), buf);
}

fn example_compound() -> Compound {
    fn inner() -> Compound {
        compound! {
            "int" => i32::MIN,
            "long" => i64::MAX,
            "float" => 1e10_f32,
            "double" => f64::INFINITY,
        }
    }

    compound! {
        "byte" => 123_i8,
        "short" => -1234_i16,
        "list_of_int" => List::Int(vec![3, -7, 5]),
        "list_of_string" => List::from(vec!["foo", "bar", "baz"]),
        "list_of_list" => List::List(vec![List::Byte(vec![1, 2]), List::Byte(vec![])]),
        "list_of_long_array" => List::LongArray(vec![vec![1, 2], vec![]]),
        "string" => "aé日",
        "compound" => inner(),
        "list_of_compound" => List::Compound(vec![
            inner(),
            inner(),
            inner(),
        ]),
        "int_array" => vec![5, -9, i32::MIN, 0, i32::MAX],
        "byte_array" => vec![0_i8, 2, 3],
        "long_array" => vec![123_i64, 456, 789],
    }
}
