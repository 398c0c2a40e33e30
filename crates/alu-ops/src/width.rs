use crate::{Error, Result};

/// The number of bits in a fixed-width value. Every raw value is reduced modulo 2<sup>N</sup>
/// before it is interpreted.
///
/// Widths obtained from [Width::new] describe operands and are at most [Width::MAX_BITS] bits.
/// The [doubled](Width::doubled) width of an operand describes the full product of two operands
/// and is therefore at most 128 bits.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Width(u32);

impl Width {
    /// Widest supported operand.
    pub const MAX_BITS: u32 = u64::BITS;

    /// Create an operand width. Fails if the width is zero or exceeds [Width::MAX_BITS].
    pub fn new(bits: u32) -> Result<Self> {
        if bits == 0 || bits > Self::MAX_BITS {
            return Err(Error::UnsupportedWidth { bits });
        }

        Ok(Self(bits))
    }

    pub const fn bits(self) -> u32 {
        self.0
    }

    /// The width of a product of two values of this width.
    pub const fn doubled(self) -> Self {
        self.extended(self.0)
    }

    /// A working register wider than this width by `extra_bits`.
    pub(crate) const fn extended(self, extra_bits: u32) -> Self {
        assert!(self.0 + extra_bits <= u128::BITS);
        Self(self.0 + extra_bits)
    }

    /// All ones in the bits covered by this width.
    pub const fn mask(self) -> u128 {
        u128::MAX >> (u128::BITS - self.0)
    }

    /// The most significant bit covered by this width.
    pub const fn sign_bit(self) -> u128 {
        1 << (self.0 - 1)
    }

    /// Discard every bit above this width.
    pub const fn truncate(self, value: u128) -> u128 {
        value & self.mask()
    }

    pub const fn is_negative(self, raw: u128) -> bool {
        raw & self.sign_bit() != 0
    }

    /// Smallest value representable with this width under the given interpretation.
    pub fn min_value(self, signedness: Signedness) -> i128 {
        match signedness {
            Signedness::Signed => sign_extend(self.sign_bit(), self),
            Signedness::Unsigned => 0,
        }
    }

    /// Largest value representable with this width under the given interpretation. Unsigned
    /// values are only representable for operand widths.
    pub fn max_value(self, signedness: Signedness) -> i128 {
        match signedness {
            Signedness::Signed => (self.sign_bit() - 1) as i128,
            Signedness::Unsigned => self.mask() as i128,
        }
    }
}

impl TryFrom<u32> for Width {
    type Error = Error;

    fn try_from(bits: u32) -> Result<Self> {
        Self::new(bits)
    }
}

impl std::fmt::Display for Width {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-bit", self.0)
    }
}

/// How a raw bit pattern is interpreted as an integer.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Signedness {
    /// The most significant bit is the sign bit and negative values use the two's complement
    /// encoding.
    Signed,

    /// The bit pattern is a non-negative integer.
    #[default]
    Unsigned,
}

impl Signedness {
    pub fn is_signed(self) -> bool {
        matches!(self, Self::Signed)
    }

    /// Interpret a raw value of the given width.
    pub fn interpret(self, raw: u128, width: Width) -> i128 {
        match self {
            Self::Signed => sign_extend(raw, width),
            Self::Unsigned => width.truncate(raw) as i128,
        }
    }
}

impl From<bool> for Signedness {
    fn from(signed: bool) -> Self {
        if signed {
            Self::Signed
        } else {
            Self::Unsigned
        }
    }
}

impl std::fmt::Display for Signedness {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Signed => write!(f, "signed"),
            Self::Unsigned => write!(f, "unsigned"),
        }
    }
}

/// Reduce any integer modulo 2<sup>N</sup>. Negative values wrap to their two's complement
/// encoding, so the result is always in `[0, 2^N)`.
pub fn mask_to_width(value: i128, width: Width) -> u128 {
    width.truncate(value as u128)
}

/// Interpret a raw value as a two's complement integer. Bits above the width are ignored.
pub fn sign_extend(raw: u128, width: Width) -> i128 {
    let raw = width.truncate(raw);
    if width.bits() == u128::BITS || !width.is_negative(raw) {
        raw as i128
    } else {
        (raw | !width.mask()) as i128
    }
}

/// Encode a signed value as the bit pattern of the given width. This is the inverse of
/// [sign_extend] for every value representable in the width.
pub fn to_unsigned(signed: i128, width: Width) -> u128 {
    mask_to_width(signed, width)
}
