use std::any::TypeId;

use product_messaging_core::{
    InboundDelivery, MessageSerDes, ProductInfo, ProductInfoSerDes, PRODUCT_QUEUE,
};

fn delivery(body: &[u8]) -> InboundDelivery {
    InboundDelivery::new("", PRODUCT_QUEUE, body)
}

fn decode(body: &str) -> Option<ProductInfo> {
    ProductInfoSerDes.deserialize(&delivery(body.as_bytes())).unwrap()
}

#[test]
fn serializes_fields_in_order() {
    let bytes = ProductInfoSerDes
        .serialize(&ProductInfo::new(Some("small"), 5, true))
        .unwrap();
    assert_eq!(bytes, b"small|5|true");
}

#[test]
fn absent_size_serializes_as_null() {
    let bytes = ProductInfoSerDes
        .serialize(&ProductInfo::new(None, -3, false))
        .unwrap();
    assert_eq!(bytes, b"null|-3|false");
}

#[test]
fn null_size_deserializes_as_absent() {
    assert_eq!(decode("null|10|false"), Some(ProductInfo::new(None, 10, false)));
}

#[test]
fn round_trips_records() {
    let records = [
        ProductInfo::new(Some("small"), 5, true),
        ProductInfo::new(Some("XL"), i64::MAX, false),
        ProductInfo::new(Some(""), 0, true),
        ProductInfo::new(None, i64::MIN, true),
    ];
    for record in records {
        let bytes = ProductInfoSerDes.serialize(&record).unwrap();
        assert_eq!(decode(std::str::from_utf8(&bytes).unwrap()), Some(record));
    }
}

#[test]
fn round_trips_generated_records() {
    // no '|' and never the literal "null"
    let alphabet: Vec<char> = "abcXYZ019 -_.,;:/\\éß€\u{1F4E6}nul".chars().collect();
    let counts = [i64::MIN, i64::MIN + 1, -1, 0, 1, 42, i64::MAX - 1, i64::MAX];

    // xorshift, fixed seed so failures reproduce
    let mut state: u64 = 0x9E37_79B9_7F4A_7C15;
    let mut next = move || {
        state ^= state << 13;
        state ^= state >> 7;
        state ^= state << 17;
        state
    };

    for i in 0..2_000 {
        let size = match next() % 5 {
            0 => None,
            _ => {
                let len = (next() % 12) as usize;
                let s: String = (0..len)
                    .map(|_| alphabet[(next() % alphabet.len() as u64) as usize])
                    .collect();
                (s != "null").then_some(s)
            }
        };
        let count = if i % 3 == 0 {
            counts[(next() % counts.len() as u64) as usize]
        } else {
            next() as i64
        };
        let record = ProductInfo {
            size,
            count,
            sealed: next() % 2 == 0,
        };

        let bytes = ProductInfoSerDes.serialize(&record).unwrap();
        assert_eq!(
            ProductInfoSerDes.deserialize(&delivery(&bytes)).unwrap(),
            Some(record)
        );
    }
}

#[test]
fn wrong_part_count_yields_nothing() {
    for body in ["", "small", "small|5", "small|5|true|extra", "||||"] {
        assert_eq!(decode(body), None, "body {body:?}");
    }
}

#[test]
fn bad_count_or_sealed_yields_nothing() {
    for body in [
        "small|five|true",
        "small|5.0|true",
        "small|99999999999999999999|true",
        "small|5|yes",
        "small|5|TRUE",
        "small||true",
        "small|5|",
    ] {
        assert_eq!(decode(body), None, "body {body:?}");
    }
}

#[test]
fn invalid_utf8_yields_nothing() {
    let body = [0xff, b'|', b'1', b'|', b't', b'r', b'u', b'e'];
    assert_eq!(ProductInfoSerDes.deserialize(&delivery(&body)).unwrap(), None);
}

#[test]
fn literal_null_size_does_not_survive() {
    let record = ProductInfo::new(Some("null"), 1, true);
    let bytes = ProductInfoSerDes.serialize(&record).unwrap();
    assert_eq!(
        ProductInfoSerDes::decode(&bytes),
        Some(ProductInfo::new(None, 1, true))
    );
}

#[test]
fn delimiter_in_size_is_not_escaped() {
    let record = ProductInfo::new(Some("a|b"), 1, true);
    let bytes = ProductInfoSerDes.serialize(&record).unwrap();
    assert_eq!(bytes, b"a|b|1|true");
    assert_eq!(ProductInfoSerDes::decode(&bytes), None);
}

#[test]
fn supports_only_product_info() {
    assert!(ProductInfoSerDes.supports(TypeId::of::<ProductInfo>()));
    assert!(!ProductInfoSerDes.supports(TypeId::of::<String>()));
    assert!(!ProductInfoSerDes.supports(TypeId::of::<Vec<u8>>()));
}
