//! Division of two N-bit values into an N-bit quotient and remainder.
//!
//! Both dividers produce identical results. For signed operands the quotient truncates toward
//! zero and the remainder takes the sign of the dividend, so that
//! `dividend == quotient * divisor + remainder` under the signed interpretation.

mod non_restoring;
mod restoring;

use crate::{mask_to_width, sign_extend, to_unsigned, Error, Result, Signedness, Width};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Division {
    pub quotient: u128,
    pub remainder: u128,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Divider {
    /// Shift-subtract division that undoes a subtraction whenever it goes negative.
    Restoring,

    /// Shift-subtract division that carries a negative partial remainder into the next step and
    /// corrects it once at the end.
    NonRestoring,
}

impl Divider {
    pub const ALL: [Divider; 2] = [Self::Restoring, Self::NonRestoring];

    /// Divide `dividend` by `divisor`. Fails with [Error::DivisionByZero] if the divisor is zero.
    /// The check is made on the divisor as given, before it is reduced to the width.
    pub fn divide(
        self,
        dividend: i128,
        divisor: i128,
        width: Width,
        signedness: Signedness,
    ) -> Result<Division> {
        if divisor == 0 {
            return Err(Error::DivisionByZero);
        }

        let unsigned_divide: fn(u128, u128, Width) -> Division = match self {
            Self::Restoring => restoring::divide,
            Self::NonRestoring => non_restoring::divide,
        };

        let division = match signedness {
            Signedness::Unsigned => unsigned_divide(
                mask_to_width(dividend, width),
                mask_to_width(divisor, width),
                width,
            ),
            Signedness::Signed => {
                let dividend = sign_extend(mask_to_width(dividend, width), width);
                let divisor = sign_extend(mask_to_width(divisor, width), width);
                let quotient_negative = (dividend < 0) != (divisor < 0);
                let remainder_negative = dividend < 0;

                let magnitudes =
                    unsigned_divide(dividend.unsigned_abs(), divisor.unsigned_abs(), width);
                Division {
                    quotient: negate_if(magnitudes.quotient, quotient_negative, width),
                    remainder: negate_if(magnitudes.remainder, remainder_negative, width),
                }
            }
        };

        Ok(division)
    }

    /// The name used to select this divider.
    pub fn name(self) -> &'static str {
        match self {
            Self::Restoring => "div_restoring",
            Self::NonRestoring => "div_nonrestoring",
        }
    }
}

impl std::fmt::Display for Divider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

fn negate_if(magnitude: u128, negate: bool, width: Width) -> u128 {
    if negate && magnitude != 0 {
        to_unsigned(-(magnitude as i128), width)
    } else {
        magnitude
    }
}
