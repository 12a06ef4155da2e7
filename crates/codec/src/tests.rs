use super::*;

#[test]
fn u64_round_trip() {
    let mut enc = Encoder::new();
    enc.u64(0x0102_0304_0506_0708);
    let bytes = enc.into_bytes();
    let mut dec = Decoder::new(&bytes);
    assert_eq!(dec.u64().unwrap(), 0x0102_0304_0506_0708);
    assert_eq!(dec.remaining(), 0);
}

#[test]
fn u32_round_trip() {
    let mut enc = Encoder::new();
    enc.u32(0xdead_beef);
    let bytes = enc.into_bytes();
    let mut dec = Decoder::new(&bytes);
    assert_eq!(dec.u32().unwrap(), 0xdead_beef);
    assert_eq!(dec.remaining(), 0);
}

#[test]
fn u16_round_trip() {
    let mut enc = Encoder::new();
    enc.u16(0xbeef);
    let bytes = enc.into_bytes();
    let mut dec = Decoder::new(&bytes);
    assert_eq!(dec.u16().unwrap(), 0xbeef);
    assert_eq!(dec.remaining(), 0);
}

#[test]
fn array16_round_trip() {
    let mut enc = Encoder::new();
    enc.array16(b"hello world").unwrap();
    let bytes = enc.into_bytes();
    let mut dec = Decoder::new(&bytes);
    assert_eq!(dec.array16().unwrap(), b"hello world");
    assert_eq!(dec.remaining(), 0);
}

#[test]
fn array16_rejects_oversized_input() {
    let mut enc = Encoder::new();
    let huge = vec![0u8; 1 << 16];
    assert!(matches!(enc.array16(&huge), Err(CodecError::TooLarge(_))));
}

#[test]
fn varint_round_trip_small_and_large() {
    for v in [0u64, 1, 127, 128, 300, u32::MAX as u64, u64::MAX] {
        let mut enc = Encoder::new();
        enc.varint(v);
        let bytes = enc.into_bytes();
        assert!(bytes.len() <= 10);
        let mut dec = Decoder::new(&bytes);
        assert_eq!(dec.varint().unwrap(), v);
        assert_eq!(dec.remaining(), 0);
    }
}

#[test]
fn key_update_put_round_trip() {
    let u = KeyUpdate::put(42, b"some value".to_vec());
    let mut enc = Encoder::new();
    u.encode(&mut enc).unwrap();
    let bytes = enc.into_bytes();
    let mut dec = Decoder::new(&bytes);
    let back = KeyUpdate::decode(&mut dec).unwrap();
    assert_eq!(back, u);
    assert_eq!(dec.remaining(), 0);
}

#[test]
fn key_update_delete_round_trip() {
    let u = KeyUpdate::delete(7);
    let mut enc = Encoder::new();
    u.encode(&mut enc).unwrap();
    let bytes = enc.into_bytes();
    let mut dec = Decoder::new(&bytes);
    let back = KeyUpdate::decode(&mut dec).unwrap();
    assert_eq!(back, u);
    assert_eq!(dec.remaining(), 0);
}

#[test]
fn key_update_rejects_value_colliding_with_tombstone_length() {
    let value = vec![0u8; MAX_VALUE_LEN + 1];
    let u = KeyUpdate::put(1, value);
    let mut enc = Encoder::new();
    assert!(matches!(u.encode(&mut enc), Err(CodecError::TooLarge(_))));
}

#[test]
fn index_entry_round_trip() {
    let e = IndexEntry::new(SliceHandle::new(1000, 250), KeyRange::new(5, 99));
    let mut enc = Encoder::new();
    e.encode(&mut enc);
    let bytes = enc.into_bytes();
    let mut dec = Decoder::new(&bytes);
    let back = IndexEntry::decode(&mut dec).unwrap();
    assert_eq!(back, e);
    assert_eq!(dec.remaining(), 0);
}

#[test]
fn fixed_handle_round_trip() {
    let h = SliceHandle::new(u64::MAX - 1, 12345);
    let mut enc = Encoder::new();
    h.encode_fixed(&mut enc);
    let bytes = enc.into_bytes();
    assert_eq!(bytes.len(), 12);
    let mut dec = Decoder::new(&bytes);
    let back = SliceHandle::decode_fixed(&mut dec).unwrap();
    assert_eq!(back, h);
}

#[test]
fn decoding_past_end_of_buffer_fails_loudly() {
    let bytes = [1u8, 2, 3];
    let mut dec = Decoder::new(&bytes);
    assert!(matches!(dec.u64(), Err(CodecError::UnexpectedEof)));
}

#[test]
fn key_range_contains() {
    let r = KeyRange::new(10, 20);
    assert!(r.contains(10));
    assert!(r.contains(20));
    assert!(r.contains(15));
    assert!(!r.contains(9));
    assert!(!r.contains(21));
}

#[test]
fn slice_handle_validity() {
    assert!(!SliceHandle::default().is_valid());
    assert!(SliceHandle::new(0, 1).is_valid());
}
