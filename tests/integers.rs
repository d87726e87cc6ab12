mod common;

use qdb_delta::encoding::delta_bitpacked::{self, Decoder};
use qdb_delta::{decode_int32, decode_int64, BufferPools, DeltaErrorCause, PoolConfig};

use common::{generate_i32, generate_i64, ALL_PATTERNS, COUNTS};

#[test]
fn test_int32_round_trip() {
    for pattern in ALL_PATTERNS {
        for count in COUNTS {
            let values = generate_i32(count, pattern);
            let mut encoded = vec![];
            delta_bitpacked::encode(values.iter().copied(), &mut encoded);

            let mut decoded = vec![];
            let rest = decode_int32(&mut decoded, &encoded).unwrap();
            assert!(rest.is_empty(), "{:?} x {}", pattern, count);
            assert_eq!(decoded, values, "{:?} x {}", pattern, count);
        }
    }
}

#[test]
fn test_int64_round_trip() {
    for pattern in ALL_PATTERNS {
        for count in COUNTS {
            let values = generate_i64(count, pattern);
            let mut encoded = vec![];
            delta_bitpacked::encode(values.iter().copied(), &mut encoded);

            let mut decoded = vec![];
            let rest = decode_int64(&mut decoded, &encoded).unwrap();
            assert!(rest.is_empty(), "{:?} x {}", pattern, count);
            assert_eq!(decoded, values, "{:?} x {}", pattern, count);
        }
    }
}

#[test]
fn test_streaming_matches_bulk() {
    for pattern in ALL_PATTERNS {
        for count in COUNTS {
            let values = generate_i64(count, pattern);
            let mut encoded = vec![];
            delta_bitpacked::encode(values.iter().copied(), &mut encoded);

            let mut decoder = Decoder::try_new(&encoded).unwrap();
            assert_eq!(decoder.size_hint(), (count, Some(count)));
            let streamed = decoder.by_ref().collect::<Result<Vec<_>, _>>().unwrap();
            assert_eq!(streamed, values, "{:?} x {}", pattern, count);
            assert_eq!(decoder.consumed_bytes(), encoded.len());
        }
    }
}

#[test]
fn test_streaming_batches() {
    let values = generate_i64(1000, common::Pattern::Random);
    let mut encoded = vec![];
    delta_bitpacked::encode(values.iter().copied(), &mut encoded);

    let mut decoder = Decoder::try_new(&encoded).unwrap();
    let mut out = [0i64; 77];
    let mut decoded = vec![];
    loop {
        let written = decoder.decode_batch(&mut out).unwrap();
        decoded.extend_from_slice(&out[..written]);
        if written < out.len() {
            break;
        }
    }
    assert_eq!(decoded, values);
}

#[test]
fn test_pages_back_to_back() {
    let pages: Vec<Vec<i32>> = COUNTS
        .iter()
        .map(|&count| generate_i32(count, common::Pattern::Alternating))
        .collect();
    let mut encoded = vec![];
    for page in &pages {
        delta_bitpacked::encode(page.iter().copied(), &mut encoded);
    }

    let mut src = encoded.as_slice();
    let mut decoded = vec![];
    for _ in &pages {
        src = decode_int32(&mut decoded, src).unwrap();
    }
    assert!(src.is_empty());
    assert_eq!(decoded, pages.concat());
}

#[test]
fn test_decode_into_pooled_buffer() {
    let pools = BufferPools::with_config(PoolConfig::default().with_initial_capacity(16));
    let values = generate_i64(COUNT_SMALL, common::Pattern::Sequential);
    let mut encoded = vec![];
    delta_bitpacked::encode(values.iter().copied(), &mut encoded);

    for _ in 0..3 {
        let mut dst = pools.int64.checkout();
        decode_int64(&mut dst, &encoded).unwrap();
        assert_eq!(*dst, values);
    }
    assert_eq!(pools.int64.idle(), 1);
    assert!(pools.int64.checkout().capacity() >= COUNT_SMALL);
}

const COUNT_SMALL: usize = 300;

#[test]
fn test_int32_rejects_wide_bit_width() {
    let mut encoded = vec![];
    delta_bitpacked::encode([0i64, 1 << 40, 0].into_iter(), &mut encoded);

    let mut wide = vec![];
    decode_int64(&mut wide, &encoded).unwrap();
    assert_eq!(wide, vec![0, 1 << 40, 0]);

    let err = decode_int32(&mut vec![], &encoded).unwrap_err();
    assert_eq!(err.cause(), DeltaErrorCause::InvalidBitWidth);
}

#[test]
fn test_truncated_page() {
    let values = generate_i32(500, common::Pattern::Random);
    let mut encoded = vec![];
    delta_bitpacked::encode(values.iter().copied(), &mut encoded);

    for len in [0, 3, 10, encoded.len() / 2, encoded.len() - 1] {
        let err = decode_int32(&mut vec![], &encoded[..len]).unwrap_err();
        assert_eq!(err.cause(), DeltaErrorCause::UnexpectedEof, "len {}", len);
    }
}

#[test]
fn test_oversized_block_size_is_malformed() {
    let mut page = vec![];
    let mut container = [0u8; 10];
    for value in [1u64 << 63, 1, 2] {
        let used = qdb_delta::encoding::uleb128::encode(value, &mut container);
        page.extend_from_slice(&container[..used]);
    }
    // first value 0, then min delta 0, bit width 2 and a short payload
    page.extend_from_slice(&[0x00, 0x00, 2]);
    page.extend_from_slice(&[0xff; 8]);

    let err = decode_int64(&mut vec![], &page).unwrap_err();
    assert_eq!(err.cause(), DeltaErrorCause::MalformedHeader);
    let err = decode_int32(&mut vec![], &page).unwrap_err();
    assert_eq!(err.cause(), DeltaErrorCause::MalformedHeader);
    let err = Decoder::try_new(&page).unwrap_err();
    assert_eq!(err.cause(), DeltaErrorCause::MalformedHeader);
}
