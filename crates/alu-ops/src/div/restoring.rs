use super::Division;
use crate::Width;

/// Restoring division of unsigned values.
///
/// The partial remainder `A` and the quotient register `Q` (initially the dividend) are shifted
/// left together. The divisor is then subtracted from `A` on trial. If the difference is negative
/// `A` is restored and the new quotient bit is 0, otherwise the difference is kept and the
/// quotient bit is 1.
pub(super) fn divide(dividend: u128, divisor: u128, width: Width) -> Division {
    let n = width.bits();
    let mut remainder = 0u128;
    let mut quotient = dividend;

    for _ in 0..n {
        remainder = width.truncate((remainder << 1) | ((quotient >> (n - 1)) & 1));
        quotient = width.truncate(quotient << 1);

        if let Some(difference) = remainder.checked_sub(divisor) {
            remainder = difference;
            quotient |= 1;
        }
    }

    Division {
        quotient,
        remainder,
    }
}
