//! Addition and subtraction with the condition flags an ALU reports alongside the result.

use crate::{mask_to_width, Signedness, Width};

/// Condition flags produced by [add] and [sub]. Exactly one flag is populated for any result:
///
/// * Unsigned addition reports `carry_out`
/// * Unsigned subtraction reports `borrow`
/// * Signed addition and subtraction report `overflow`
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Flags {
    /// The unbounded unsigned sum required a bit beyond the width.
    pub carry_out: Option<bool>,

    /// The unsigned subtraction needed more than the minuend had available.
    pub borrow: Option<bool>,

    /// The signed result is outside the range representable by the width.
    pub overflow: Option<bool>,
}

impl Flags {
    pub fn with_carry(carry_out: bool) -> Self {
        Self {
            carry_out: Some(carry_out),
            ..Default::default()
        }
    }

    pub fn with_borrow(borrow: bool) -> Self {
        Self {
            borrow: Some(borrow),
            ..Default::default()
        }
    }

    pub fn with_overflow(overflow: bool) -> Self {
        Self {
            overflow: Some(overflow),
            ..Default::default()
        }
    }

    /// Iterate over the populated flags by name.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, bool)> {
        [
            ("carry_out", self.carry_out),
            ("borrow", self.borrow),
            ("overflow", self.overflow),
        ]
        .into_iter()
        .filter_map(|(name, flag)| flag.map(|flag| (name, flag)))
    }
}

/// Renders the populated flags as a map, e.g. `{carry_out: true}`.
impl std::fmt::Display for Flags {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{{")?;
        for (i, (name, flag)) in self.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{name}: {flag}")?;
        }
        write!(f, "}}")
    }
}

/// Add two values of the given width. Both operands are first reduced to the width. The result
/// is the sum modulo 2<sup>N</sup>.
///
/// Signed overflow is only possible when both operands share a sign and the sign of the result
/// differs from it.
pub fn add(a: i128, b: i128, width: Width, signedness: Signedness) -> (u128, Flags) {
    let a = mask_to_width(a, width);
    let b = mask_to_width(b, width);
    let (sum, carry_out) = addition_with_carry(a, b, width);

    let flags = match signedness {
        Signedness::Signed => Flags::with_overflow(signed_overflow(a, b, sum, width)),
        Signedness::Unsigned => Flags::with_carry(carry_out),
    };

    (sum, flags)
}

/// Subtract `b` from `a` by adding the two's complement of `b`.
///
/// The unsigned borrow is the complement of the carry produced by that addition. Since the two's
/// complement of zero is zero, subtracting zero reports a borrow. The signed overflow flag is the
/// one reported by the addition.
pub fn sub(a: i128, b: i128, width: Width, signedness: Signedness) -> (u128, Flags) {
    let a = mask_to_width(a, width);
    let b = twos_complement(b, width);
    let (difference, carry_out) = addition_with_carry(a, b, width);

    let flags = match signedness {
        Signedness::Signed => Flags::with_overflow(signed_overflow(a, b, difference, width)),
        Signedness::Unsigned => Flags::with_borrow(!carry_out),
    };

    (difference, flags)
}

/// The arithmetic negation of `value` encoded in the given width: the bitwise complement plus
/// one, reduced to the width.
pub fn twos_complement(value: i128, width: Width) -> u128 {
    width.truncate((!mask_to_width(value, width)).wrapping_add(1))
}

/// Sum of two raw values along with bit N of the unbounded sum.
fn addition_with_carry(a: u128, b: u128, width: Width) -> (u128, bool) {
    let (sum, wrapped) = a.overflowing_add(b);
    let carry_out = if width.bits() == u128::BITS {
        wrapped
    } else {
        (sum >> width.bits()) & 1 == 1
    };

    (width.truncate(sum), carry_out)
}

fn signed_overflow(a: u128, b: u128, result: u128, width: Width) -> bool {
    let a_negative = width.is_negative(a);
    a_negative == width.is_negative(b) && a_negative != width.is_negative(result)
}
