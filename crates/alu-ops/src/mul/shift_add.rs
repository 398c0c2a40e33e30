use crate::{mask_to_width, sign_extend, Signedness, Width};

/// Operand magnitudes and whether the product must be negated afterwards.
struct Magnitudes {
    multiplicand: u128,
    multiplier: u128,
    negative: bool,
}

impl Magnitudes {
    fn new(a: i128, b: i128, width: Width, signedness: Signedness) -> Self {
        match signedness {
            Signedness::Unsigned => Self {
                multiplicand: mask_to_width(a, width),
                multiplier: mask_to_width(b, width),
                negative: false,
            },
            Signedness::Signed => {
                let a = sign_extend(mask_to_width(a, width), width);
                let b = sign_extend(mask_to_width(b, width), width);
                Self {
                    multiplicand: a.unsigned_abs(),
                    multiplier: b.unsigned_abs(),
                    negative: (a < 0) != (b < 0),
                }
            }
        }
    }

    /// Apply the sign to the product of the magnitudes and encode it in 2N bits.
    fn signed_product(&self, product: u128, width: Width) -> u128 {
        let product = if self.negative {
            product.wrapping_neg()
        } else {
            product
        };

        width.doubled().truncate(product)
    }
}

/// Sequential shift-add multiplication.
///
/// ```text
///  C | A (accumulator) | Q (multiplier)
///  0 | 0 0 0 0         | q3 q2 q1 q0
/// ```
///
/// On each step the multiplicand is added into `A` if `q0` is set, the carry out of that addition
/// is captured in `C`, and then `C:A:Q` is shifted right by one. After N steps `A:Q` holds the
/// product.
pub(super) fn sequential(a: i128, b: i128, width: Width, signedness: Signedness) -> u128 {
    let operands = Magnitudes::new(a, b, width, signedness);
    let n = width.bits();

    let mut accumulator = 0u128;
    let mut multiplier = operands.multiplier;
    for _ in 0..n {
        let mut carry = 0;
        if multiplier & 1 == 1 {
            let sum = accumulator + operands.multiplicand;
            carry = sum >> n;
            accumulator = width.truncate(sum);
        }

        multiplier = (multiplier >> 1) | ((accumulator & 1) << (n - 1));
        accumulator = (accumulator >> 1) | (carry << (n - 1));
    }

    operands.signed_product((accumulator << n) | multiplier, width)
}

/// Sum of the multiplicand shifted by the position of each set bit of the multiplier.
///
/// ```text
///           a3 a2 a1 a0
///         x b3 b2 b1 b0
/// ---------------------
///           a3 a2 a1 a0   [b0]
///        a3 a2 a1 a0      [b1]
///     a3 a2 a1 a0         [b2]
///  a3 a2 a1 a0            [b3]
/// ```
pub(super) fn partial_products(a: i128, b: i128, width: Width, signedness: Signedness) -> u128 {
    let operands = Magnitudes::new(a, b, width, signedness);
    let product = (0..width.bits())
        .filter(|i| (operands.multiplier >> i) & 1 == 1)
        .map(|i| operands.multiplicand << i)
        .sum();

    operands.signed_product(product, width)
}
