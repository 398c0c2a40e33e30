use crate::{add, sub, Divider, Division, Error, Flags, Multiplier, Result, Signedness, Width};

/// The binary operations that can be selected by name.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Operation {
    Add,
    Sub,
    Multiply(Multiplier),
    Divide(Divider),
}

/// Result of evaluating an [Operation].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Outcome {
    /// Result of an addition or subtraction along with its flags.
    Sum { value: u128, flags: Flags },

    /// A product along with the width of the product.
    Product { value: u128, width: Width },

    /// Quotient and remainder of a division.
    Division(Division),
}

impl Operation {
    pub const ALL: [Operation; 8] = [
        Self::Add,
        Self::Sub,
        Self::Multiply(Multiplier::Sequential),
        Self::Multiply(Multiplier::Booth),
        Self::Multiply(Multiplier::PartialProducts),
        Self::Multiply(Multiplier::BitPairBooth),
        Self::Divide(Divider::Restoring),
        Self::Divide(Divider::NonRestoring),
    ];

    /// Evaluate this operation on the two operands. Fails only for division by zero.
    pub fn evaluate(
        self,
        a: i128,
        b: i128,
        width: Width,
        signedness: Signedness,
    ) -> Result<Outcome> {
        let outcome = match self {
            Self::Add => {
                let (value, flags) = add(a, b, width, signedness);
                Outcome::Sum { value, flags }
            }
            Self::Sub => {
                let (value, flags) = sub(a, b, width, signedness);
                Outcome::Sum { value, flags }
            }
            Self::Multiply(multiplier) => Outcome::Product {
                value: multiplier.multiply(a, b, width, signedness),
                width: width.doubled(),
            },
            Self::Divide(divider) => Outcome::Division(divider.divide(a, b, width, signedness)?),
        };

        Ok(outcome)
    }

    /// The name used to select this operation.
    pub fn name(self) -> &'static str {
        match self {
            Self::Add => "add",
            Self::Sub => "sub",
            Self::Multiply(multiplier) => multiplier.name(),
            Self::Divide(divider) => divider.name(),
        }
    }

    /// The infix symbol used when describing this operation applied to two operands.
    pub fn symbol(self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Multiply(_) => "*",
            Self::Divide(_) => "÷",
        }
    }
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for Operation {
    type Err = Error;

    fn from_str(name: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|operation| operation.name() == name)
            .ok_or_else(|| Error::UnknownOperation(name.to_owned()))
    }
}

impl From<Multiplier> for Operation {
    fn from(multiplier: Multiplier) -> Self {
        Self::Multiply(multiplier)
    }
}

impl From<Divider> for Operation {
    fn from(divider: Divider) -> Self {
        Self::Divide(divider)
    }
}
