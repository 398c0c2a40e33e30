use crate::Width;

/// Shift a raw value right while replicating its sign bit into the vacated positions. Shifting
/// by the full width (or more) produces all ones for negative values and zero otherwise.
pub fn arithmetic_right_shift(raw: u128, shift: u32, width: Width) -> u128 {
    if shift == 0 {
        return raw;
    }

    let raw = width.truncate(raw);
    let shift = shift.min(width.bits());
    let shifted = raw.checked_shr(shift).unwrap_or(0);

    if width.is_negative(raw) {
        // [ 1 0 1 1 0 1 ] >> 2
        // [ 1 1 1 0 1 1 ]
        let fill = low_bits(shift) << (width.bits() - shift);
        (shifted | fill) & width.mask()
    } else {
        shifted
    }
}

fn low_bits(count: u32) -> u128 {
    u128::MAX.checked_shr(u128::BITS - count).unwrap_or(0)
}
