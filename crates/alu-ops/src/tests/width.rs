use super::width;
use crate::*;

#[test]
fn mask_positive() {
    assert_eq!(mask_to_width(0x1FF, width(8)), 0xFF);
    assert_eq!(mask_to_width(0x100, width(8)), 0);
    assert_eq!(mask_to_width(5, width(3)), 5);
}

#[test]
fn mask_negative_uses_true_modulo() {
    assert_eq!(mask_to_width(-1, width(8)), 0xFF);
    assert_eq!(mask_to_width(-128, width(8)), 0x80);
    assert_eq!(mask_to_width(-300, width(8)), 212);
    assert_eq!(mask_to_width(-1, width(64)), u64::MAX as u128);
}

#[test]
fn sign_extension() {
    assert_eq!(sign_extend(0xFF, width(8)), -1);
    assert_eq!(sign_extend(0x80, width(8)), -128);
    assert_eq!(sign_extend(0x7F, width(8)), 127);
    assert_eq!(sign_extend(0b1, width(1)), -1);
    assert_eq!(sign_extend(0b0, width(1)), 0);
    assert_eq!(sign_extend(1 << 63, width(64)), i64::MIN as i128);
}

#[test]
fn sign_extension_of_doubled_width() {
    let product_width = width(64).doubled();
    assert_eq!(product_width.bits(), 128);
    assert_eq!(sign_extend(u128::MAX, product_width), -1);
    assert_eq!(sign_extend(1, product_width), 1);
}

#[test]
fn unsigned_encoding() {
    assert_eq!(to_unsigned(-1, width(8)), 0xFF);
    assert_eq!(to_unsigned(-128, width(8)), 0x80);
    assert_eq!(to_unsigned(127, width(8)), 127);
    assert_eq!(to_unsigned(-(1 << 63), width(64)), 1 << 63);
}

#[test]
fn sign_extension_round_trip() {
    for bits in 1..=12 {
        let w = width(bits);
        for raw in 0..=w.mask() {
            assert_eq!(
                mask_to_width(sign_extend(raw, w), w),
                raw,
                "round trip failed for {raw:#x} at {w}"
            );
            assert_eq!(to_unsigned(sign_extend(raw, w), w), raw);
        }
    }
}

#[test]
fn width_bounds() {
    assert_eq!(Width::new(0), Err(Error::UnsupportedWidth { bits: 0 }));
    assert_eq!(Width::new(65), Err(Error::UnsupportedWidth { bits: 65 }));
    assert!(Width::new(1).is_ok());
    assert!(Width::new(64).is_ok());
    assert_eq!(Width::try_from(16u32), Width::new(16));
}

#[test]
fn value_ranges() {
    let w = width(8);
    assert_eq!(w.min_value(Signedness::Signed), -128);
    assert_eq!(w.max_value(Signedness::Signed), 127);
    assert_eq!(w.min_value(Signedness::Unsigned), 0);
    assert_eq!(w.max_value(Signedness::Unsigned), 255);

    let w = width(1);
    assert_eq!(w.min_value(Signedness::Signed), -1);
    assert_eq!(w.max_value(Signedness::Signed), 0);
}

#[test]
fn interpretation() {
    let w = width(4);
    assert_eq!(Signedness::Signed.interpret(0xF, w), -1);
    assert_eq!(Signedness::Unsigned.interpret(0xF, w), 15);
    assert_eq!(Signedness::from(true), Signedness::Signed);
    assert_eq!(Signedness::from(false), Signedness::Unsigned);
}
