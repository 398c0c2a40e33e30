use super::Division;
use crate::Width;

/// Non-restoring division of unsigned values.
///
/// A negative partial remainder is not restored. Instead the next step adds the divisor rather
/// than subtracting it, which has the same effect after the shift. The quotient bit is 1 whenever
/// the partial remainder is non-negative. A final correction restores a negative remainder.
pub(super) fn divide(dividend: u128, divisor: u128, width: Width) -> Division {
    let n = width.bits();
    let divisor = divisor as i128;
    let mut remainder = 0i128;
    let mut quotient = dividend;

    for _ in 0..n {
        let next_bit = ((quotient >> (n - 1)) & 1) as i128;
        quotient = width.truncate(quotient << 1);

        remainder = if remainder >= 0 {
            2 * remainder + next_bit - divisor
        } else {
            2 * remainder + next_bit + divisor
        };

        if remainder >= 0 {
            quotient |= 1;
        }
    }

    if remainder < 0 {
        remainder += divisor;
    }

    Division {
        quotient,
        remainder: remainder as u128,
    }
}
