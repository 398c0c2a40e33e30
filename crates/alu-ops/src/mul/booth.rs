use crate::{arithmetic_right_shift, mask_to_width, sign_extend, to_unsigned, Width};

/// Booth radix-2 multiplication of signed operands.
///
/// The multiplier bits are scanned in pairs `(q0, q-1)`. A `10` pair marks the start of a run of
/// ones and subtracts the multiplicand from the accumulator, a `01` pair marks the end of a run
/// and adds it. The registers `A:Q:q-1` are then shifted right arithmetically.
///
/// The accumulator is one bit wider than the operands so that subtracting the most negative
/// multiplicand cannot overflow it.
pub(super) fn radix2(a: i128, b: i128, width: Width) -> u128 {
    let n = width.bits();
    let multiplicand = sign_extend(mask_to_width(a, width), width);

    let accumulator_width = width.extended(1);
    let add_multiplicand = to_unsigned(multiplicand, accumulator_width);
    let sub_multiplicand = to_unsigned(-multiplicand, accumulator_width);

    let mut accumulator = 0u128;
    let mut multiplier = mask_to_width(b, width);
    let mut previous_bit = false;

    for _ in 0..n {
        let current_bit = multiplier & 1 == 1;
        match (current_bit, previous_bit) {
            (true, false) => {
                accumulator = accumulator_width.truncate(accumulator + sub_multiplicand);
            }
            (false, true) => {
                accumulator = accumulator_width.truncate(accumulator + add_multiplicand);
            }
            _ => (),
        }

        previous_bit = current_bit;
        multiplier = (multiplier >> 1) | ((accumulator & 1) << (n - 1));
        accumulator = arithmetic_right_shift(accumulator, 1, accumulator_width);
    }

    width
        .doubled()
        .truncate((accumulator << n) | multiplier)
}

/// Modified Booth (bit-pair) radix-4 multiplication of signed operands.
///
/// The multiplier is scanned in overlapping triplets `(q1, q0, q-1)`, each of which recodes to a
/// digit in `{-2, -1, 0, 1, 2}`. The digit multiple of the multiplicand is added into the
/// accumulator before `A:Q:q-1` is shifted right arithmetically by two.
///
/// The multiplier is sign-extended to an even number of bits so that it splits evenly into
/// pairs. The accumulator is two bits wider than the operands to hold twice the most negative
/// multiplicand.
pub(super) fn radix4(a: i128, b: i128, width: Width) -> u128 {
    let multiplicand = sign_extend(mask_to_width(a, width), width);

    let multiplier_width = width.extended(width.bits() % 2);
    let multiplier_bits = multiplier_width.bits();
    let accumulator_width = width.extended(2);

    let mut accumulator = 0u128;
    let mut multiplier = to_unsigned(sign_extend(mask_to_width(b, width), width), multiplier_width);
    let mut previous_bit = false;

    for _ in 0..multiplier_bits / 2 {
        let digit = recode(multiplier & 0b10 != 0, multiplier & 0b01 != 0, previous_bit);
        if digit != 0 {
            let multiple = to_unsigned(digit * multiplicand, accumulator_width);
            accumulator = accumulator_width.truncate(accumulator + multiple);
        }

        previous_bit = multiplier & 0b10 != 0;
        multiplier = (multiplier >> 2) | ((accumulator & 0b11) << (multiplier_bits - 2));
        accumulator = arithmetic_right_shift(accumulator, 2, accumulator_width);
    }

    width
        .doubled()
        .truncate((accumulator << multiplier_bits) | multiplier)
}

/// Radix-4 Booth digit for the bit triplet `(q1, q0, q-1)`.
fn recode(high: bool, low: bool, previous: bool) -> i128 {
    match (high, low, previous) {
        (false, false, false) | (true, true, true) => 0,
        (false, false, true) | (false, true, false) => 1,
        (false, true, true) => 2,
        (true, false, false) => -2,
        (true, false, true) | (true, true, false) => -1,
    }
}
