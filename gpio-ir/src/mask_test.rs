use super::*;

#[test]
fn zero_mask() {
    assert_eq!(NormalizedMask::new(0), None);
}

#[test]
fn normalize_contiguous() {
    let m = NormalizedMask::new(0x1f00).unwrap();
    assert_eq!(m.pre_shift(), 8);
    assert_eq!(m.code_length(), 5);
    assert_eq!(m.mask(), 0x1f);
    assert_eq!(m.gpio_mask(), 0x1f00);
}

#[test]
fn normalize_sparse() {
    // bits 15, 19, 20, 21, 22 and 23
    let m = NormalizedMask::new(0x0f88000).unwrap();
    assert_eq!(m.pre_shift(), 15);
    assert_eq!(m.code_length(), 6);
    assert_eq!(m.mask(), 0x1f1);
    assert_eq!(m.gpio_mask(), 0x0f88000);
}

#[test]
fn normalize_edges() {
    let m = NormalizedMask::new(1).unwrap();
    assert_eq!((m.pre_shift(), m.code_length(), m.mask()), (0, 1, 1));

    let m = NormalizedMask::new(0x8000_0000).unwrap();
    assert_eq!((m.pre_shift(), m.code_length(), m.mask()), (31, 1, 1));

    let m = NormalizedMask::new(u32::MAX).unwrap();
    assert_eq!((m.pre_shift(), m.code_length(), m.mask()), (0, 32, u32::MAX));
}

#[test]
fn normalize_matches_lowest_bit_and_popcount() {
    let mut mask = 0x9e37_79b9u32;
    for _ in 0..200 {
        mask = mask.rotate_left(5) ^ mask.wrapping_mul(0x0101_0101);
        if mask == 0 {
            continue;
        }
        let m = NormalizedMask::new(mask).unwrap();
        let lowest = (0..32u32).find(|i| mask & (1 << i) != 0).unwrap();
        assert_eq!(m.pre_shift() as u32, lowest, "mask {mask:#x}");
        assert_eq!(m.code_length() as u32, (mask >> lowest).count_ones(), "mask {mask:#x}");
    }
}

#[test]
fn extract_contiguous() {
    let m = NormalizedMask::new(0x1f00).unwrap();
    assert_eq!(m.extract(0x1500), 21);
    assert_eq!(m.extract(0x1f00), 0x1f);
    assert_eq!(m.extract(0xe0ff), 0);
}

#[test]
fn extract_packs_sparse_bits() {
    let m = NormalizedMask::new(0x0f88000).unwrap();

    assert_eq!(m.extract(1 << 15), 0b000001);
    assert_eq!(m.extract(1 << 19), 0b000010);
    assert_eq!(m.extract(1 << 23), 0b100000);
    assert_eq!(m.extract((1 << 15) | (1 << 21)), 0b001001);
    // unselected bits 16..=18 and 24.. are dropped
    assert_eq!(m.extract(0xfff7_0000), 0b111100);
    assert_eq!(m.extract(!0x0f88000), 0);
}

#[test]
fn extract_never_exceeds_code_length() {
    let masks = [0x0f88000, 0x1f00, 0x8000_0001, 0x5555_5555, 0x00f0_0f00];
    let mut raw = 0x1234_5678u32;
    for mask in masks {
        let m = NormalizedMask::new(mask).unwrap();
        for _ in 0..100 {
            raw = raw.rotate_left(7).wrapping_add(0x9e37_79b9);
            let code = m.extract(raw);
            assert!(
                gpio_ir_common::math::bit_width(code) <= m.code_length() as u32,
                "mask {mask:#x} raw {raw:#x} code {code:#x}"
            );
            assert_eq!(code, m.extract(raw & mask), "bits outside mask leaked");
        }
    }
}

#[test]
fn extract_preserves_bit_order() {
    let m = NormalizedMask::new(0b1010_0100).unwrap();
    assert_eq!(m.extract(0b0000_0100), 0b001);
    assert_eq!(m.extract(0b0010_0000), 0b010);
    assert_eq!(m.extract(0b1000_0000), 0b100);
    assert_eq!(m.extract(0b1010_0000), 0b110);
}

#[test]
fn masked_shift() {
    let m = NormalizedMask::new(0x1f00).unwrap();
    assert_eq!(m.masked_shift(0x1500), 21);

    let m = NormalizedMask::new(0b1010_0100).unwrap();
    assert_eq!(m.masked_shift(0xff), 0b101001);
    assert_eq!(m.masked_shift(0b1000_0000), 0b100000);
}
