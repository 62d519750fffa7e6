//! Binary encoding and decoding of multihashes

use cryypt_multihash::{HashAlgorithm, Multihash, MultihashError};
use proptest::prelude::*;
use std::io::Cursor;

fn encoded_entry(code: u8, len: usize, fill: u8) -> Vec<u8> {
    let mut entry = vec![code];
    entry.extend(std::iter::repeat_n(fill, len));
    entry
}

fn header(size: u64, count: u8) -> Vec<u8> {
    let mut bytes = size.to_be_bytes().to_vec();
    bytes.push(count);
    bytes
}

#[test]
fn test_layout() {
    let multihash = Multihash::from_parts(
        0x0102_0304,
        vec![
            (HashAlgorithm::Sha512, vec![0xaa; 64]),
            (HashAlgorithm::Ripemd160, vec![0xbb; 20]),
        ],
    )
    .expect("valid parts");

    let mut expected = header(0x0102_0304, 2);
    expected.extend(encoded_entry(0x00, 20, 0xbb));
    expected.extend(encoded_entry(0x01, 64, 0xaa));

    let encoded = multihash.to_bytes();
    assert_eq!(encoded, expected);
    assert_eq!(encoded.len(), 9 + (1 + 20) + (1 + 64));
    assert_eq!(multihash.encoded_len(), encoded.len());

    let mut written = Vec::new();
    multihash.write(&mut written).expect("write to vec");
    assert_eq!(written, expected);
}

#[test]
fn test_encoding_ignores_insertion_order() {
    let data = b"order independent";
    let forward = Multihash::create_for(
        [HashAlgorithm::Whirlpool, HashAlgorithm::Sha3_512, HashAlgorithm::Ripemd160],
        data,
    )
    .expect("create");
    let mut backward = Multihash::create_for([HashAlgorithm::Ripemd160], data).expect("create");
    backward
        .add_hash(HashAlgorithm::Sha3_512, data)
        .expect("add");
    backward
        .add_hash(HashAlgorithm::Whirlpool, data)
        .expect("add");

    assert_eq!(forward.to_bytes(), backward.to_bytes());
}

#[test]
fn test_round_trip_all_algorithms() {
    let data = vec![0x5au8; 4096];
    let multihash = Multihash::create(&data).expect("create");
    let decoded = Multihash::from_bytes(&multihash.to_bytes()).expect("decode");

    assert_eq!(decoded, multihash);
    assert_eq!(decoded.size(), 4096);
    assert!(decoded.verify(&data).expect("verify"));
}

#[test]
fn test_read_consumes_exactly_one_encoding() {
    let first = Multihash::create_for([HashAlgorithm::Sha512], b"one").expect("create");
    let second = Multihash::create_for([HashAlgorithm::Blake2b512], b"two").expect("create");

    let mut stream = Vec::new();
    first.write(&mut stream).expect("write");
    second.write(&mut stream).expect("write");

    let mut cursor = Cursor::new(stream);
    assert_eq!(Multihash::read(&mut cursor).expect("read first"), first);
    assert_eq!(Multihash::read(&mut cursor).expect("read second"), second);
}

#[test]
fn test_zero_entry_count_is_rejected() {
    let bytes = header(3, 0);
    assert!(matches!(
        Multihash::from_bytes(&bytes),
        Err(MultihashError::InvalidEncoding(_))
    ));
}

#[test]
fn test_unknown_code_is_rejected() {
    let mut bytes = header(3, 1);
    bytes.extend(encoded_entry(0xff, 64, 0));
    assert!(matches!(
        Multihash::from_bytes(&bytes),
        Err(MultihashError::UnknownAlgorithm(0xff))
    ));
}

#[test]
fn test_truncated_digest_is_rejected() {
    let mut bytes = header(3, 1);
    bytes.extend(encoded_entry(0x01, 40, 0));
    match Multihash::from_bytes(&bytes) {
        Err(MultihashError::TruncatedInput { expected, actual }) => {
            assert_eq!(expected, 64);
            assert_eq!(actual, 40);
        }
        other => panic!("expected TruncatedInput, got {other:?}"),
    }
}

#[test]
fn test_truncated_header_and_missing_entries_are_rejected() {
    assert!(matches!(
        Multihash::from_bytes(&[0, 0, 0]),
        Err(MultihashError::TruncatedInput { expected: 9, actual: 3 })
    ));

    // Count promises two entries, only one follows.
    let mut bytes = header(3, 2);
    bytes.extend(encoded_entry(0x00, 20, 0));
    assert!(matches!(
        Multihash::from_bytes(&bytes),
        Err(MultihashError::TruncatedInput { expected: 1, actual: 0 })
    ));
}

#[test]
fn test_duplicate_entry_is_rejected() {
    let mut bytes = header(3, 2);
    bytes.extend(encoded_entry(0x00, 20, 1));
    bytes.extend(encoded_entry(0x00, 20, 2));
    assert!(matches!(
        Multihash::from_bytes(&bytes),
        Err(MultihashError::InvalidEncoding(_))
    ));
}

#[test]
fn test_trailing_bytes_are_rejected() {
    let mut bytes = Multihash::create_for([HashAlgorithm::Ripemd160], b"abc")
        .expect("create")
        .to_bytes();
    bytes.push(0);
    assert!(matches!(
        Multihash::from_bytes(&bytes),
        Err(MultihashError::InvalidEncoding(_))
    ));
}

#[tokio::test]
async fn test_async_round_trip() {
    let multihash = Multihash::create(b"async data").expect("create");

    let (mut writer, mut reader) = tokio::io::duplex(64);
    let expected = multihash.clone();
    let write = tokio::spawn(async move { expected.write_async(&mut writer).await });

    let decoded = Multihash::read_async(&mut reader).await.expect("read");
    write
        .await
        .expect("writer task should not panic")
        .expect("write should succeed");

    assert_eq!(decoded, multihash);
    assert!(decoded.verify(b"async data").expect("verify"));
}

#[tokio::test]
async fn test_async_truncated_input() {
    let bytes = Multihash::create_for([HashAlgorithm::Whirlpool], b"abc")
        .expect("create")
        .to_bytes();
    let mut reader = &bytes[..bytes.len() - 1];
    assert!(matches!(
        Multihash::read_async(&mut reader).await,
        Err(MultihashError::TruncatedInput { expected: 64, actual: 63 })
    ));

    let zero = header(0, 0);
    let mut reader = zero.as_slice();
    assert!(matches!(
        Multihash::read_async(&mut reader).await,
        Err(MultihashError::InvalidEncoding(_))
    ));
}

#[tokio::test]
async fn test_async_duplicate_entry_is_rejected() {
    let mut bytes = header(3, 2);
    bytes.extend(encoded_entry(0x03, 64, 1));
    bytes.extend(encoded_entry(0x03, 64, 2));
    let mut reader = bytes.as_slice();
    assert!(matches!(
        Multihash::read_async(&mut reader).await,
        Err(MultihashError::InvalidEncoding(_))
    ));
}

fn algorithm_subset() -> impl Strategy<Value = Vec<HashAlgorithm>> {
    prop::sample::subsequence(HashAlgorithm::ALL.to_vec(), 1..=HashAlgorithm::ALL.len())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn prop_round_trip(data in prop::collection::vec(any::<u8>(), 0..512), algos in algorithm_subset()) {
        let multihash = Multihash::create_for(algos.clone(), &data).expect("create");
        let encoded = multihash.to_bytes();
        prop_assert_eq!(encoded.len(), multihash.encoded_len());

        let decoded = Multihash::from_bytes(&encoded).expect("decode");
        prop_assert_eq!(decoded.size(), data.len() as u64);
        prop_assert_eq!(decoded.algorithms().collect::<Vec<_>>(), algos);
        prop_assert_eq!(&decoded, &multihash);
    }

    #[test]
    fn prop_bit_flip_fails_verification(
        data in prop::collection::vec(any::<u8>(), 1..256),
        index in any::<prop::sample::Index>(),
        bit in 0u8..8,
    ) {
        let multihash = Multihash::create_for([HashAlgorithm::Sha512, HashAlgorithm::Ripemd160], &data)
            .expect("create");
        prop_assert!(multihash.verify(&data).expect("verify"));

        let mut tampered = data.clone();
        tampered[index.index(data.len())] ^= 1 << bit;
        prop_assert!(!multihash.verify(&tampered).expect("verify"));
    }
}
