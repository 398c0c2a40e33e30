//! Multiplication of two N-bit values into a 2N-bit product.
//!
//! Each [Multiplier] arrives at the product through a different recurrence, but all of them
//! produce the same product for the same inputs. The product of signed operands is the two's
//! complement encoding of the signed product in 2N bits.

mod booth;
mod shift_add;

use crate::{Signedness, Width};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Multiplier {
    /// Shift-add multiplication with an accumulator, multiplier register, and carry bit.
    Sequential,

    /// Booth's radix-2 recoding of the multiplier for signed operands.
    Booth,

    /// Accumulation of one shifted copy of the multiplicand per set multiplier bit.
    PartialProducts,

    /// Modified Booth (bit-pair) radix-4 recoding of the multiplier for signed operands.
    BitPairBooth,
}

impl Multiplier {
    pub const ALL: [Multiplier; 4] = [
        Self::Sequential,
        Self::Booth,
        Self::PartialProducts,
        Self::BitPairBooth,
    ];

    /// Multiply `a` by `b`. The operands are reduced to the width before multiplication. The
    /// product occupies `2 * width` bits.
    ///
    /// Booth recoding only benefits signed operands. Unsigned products for both Booth variants
    /// are computed by [Multiplier::Sequential].
    pub fn multiply(self, a: i128, b: i128, width: Width, signedness: Signedness) -> u128 {
        match (self, signedness) {
            (Self::Sequential, _) => shift_add::sequential(a, b, width, signedness),
            (Self::PartialProducts, _) => shift_add::partial_products(a, b, width, signedness),
            (Self::Booth | Self::BitPairBooth, Signedness::Unsigned) => {
                shift_add::sequential(a, b, width, signedness)
            }
            (Self::Booth, Signedness::Signed) => booth::radix2(a, b, width),
            (Self::BitPairBooth, Signedness::Signed) => booth::radix4(a, b, width),
        }
    }

    /// The name used to select this multiplier.
    pub fn name(self) -> &'static str {
        match self {
            Self::Sequential => "mul_seq",
            Self::Booth => "mul_booth",
            Self::PartialProducts => "mul_bit",
            Self::BitPairBooth => "mul_bitpair",
        }
    }
}

impl std::fmt::Display for Multiplier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
