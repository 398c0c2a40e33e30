//! Randomized differential verification of every [Operation] against an arbitrary precision
//! reference.
//!
//! Operand pairs are drawn from a seeded [ChaCha8Rng] so a run is reproducible given the width,
//! signedness, trial count, and seed.

use num_bigint::BigInt;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
#[cfg(feature = "rayon")]
use rayon::prelude::*;

use crate::{
    mask_to_width, Division, Error, Flags, Operation, Outcome, Result, Signedness, Width,
};

pub const DEFAULT_SEED: u64 = 42;
pub const DEFAULT_TRIALS: usize = 400;

/// Number of operand pairs drawn and checked together. Memory use is bounded by this rather than
/// by the number of trials.
pub(crate) const CHUNK_TRIALS: usize = 4096;

/// How the result of an operation disagreed with the reference.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Discrepancy {
    /// The result differs from the reference value.
    IncorrectValue { actual: u128, expected: u128 },

    /// The result of an addition or subtraction is correct but its flags are not.
    IncorrectFlags { actual: Flags, expected: Flags },

    /// The quotient and remainder do not reconstruct the dividend, or the remainder is not
    /// smaller in magnitude than the divisor.
    IncorrectDivision { quotient: u128, remainder: u128 },

    /// The operation produced a kind of result it never should, such as a sum from a divider or a
    /// product that is not twice the operand width.
    UnexpectedOutcome(Outcome),

    /// The operation failed for operands it is required to accept.
    UnexpectedError(Error),
}

/// A single failed check.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Mismatch {
    /// Index of the trial that produced the operands.
    pub trial: usize,
    pub operation: Operation,
    pub a: i128,
    pub b: i128,
    pub discrepancy: Discrepancy,
}

impl std::fmt::Display for Mismatch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = self.operation.name().to_uppercase();
        let symbol = self.operation.symbol();
        let (a, b) = (self.a, self.b);
        match &self.discrepancy {
            Discrepancy::IncorrectValue { actual, expected } => {
                write!(f, "{name} FAIL: {a} {symbol} {b} = {actual}, expected {expected}")
            }
            Discrepancy::IncorrectDivision {
                quotient,
                remainder,
            } => write!(
                f,
                "{name} FAIL: {a} {symbol} {b} = {quotient} R {remainder}, \
                 but {quotient} * {b} + {remainder} ≠ {a}"
            ),
            Discrepancy::IncorrectFlags { actual, expected } => {
                write!(f, "{name} FAIL: {a} {symbol} {b} flags {actual}, expected {expected}")
            }
            Discrepancy::UnexpectedOutcome(outcome) => {
                write!(f, "{name} FAIL: {a} {symbol} {b} produced {outcome:?}")
            }
            Discrepancy::UnexpectedError(err) => {
                write!(f, "{name} ERROR: {a} {symbol} {b}: {err}")
            }
        }
    }
}

/// Outcome of a verification run. Mismatches are ordered by trial and then by operation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VerifyReport {
    pub width: Width,
    pub trials: usize,
    pub signedness: Signedness,
    pub seed: u64,
    pub mismatches: Vec<Mismatch>,
}

impl VerifyReport {
    pub fn passed(&self) -> bool {
        self.mismatches.is_empty()
    }

    pub fn failures(&self) -> usize {
        self.mismatches.len()
    }
}

/// Check every operation against the reference for `trials` random operand pairs. Division is
/// skipped for pairs with a zero divisor.
pub fn verify(width: Width, trials: usize, signedness: Signedness, seed: u64) -> VerifyReport {
    verify_with(width, trials, signedness, seed, Operation::evaluate)
}

/// Same as [verify] but each operation is evaluated by `evaluate`.
pub(crate) fn verify_with<F>(
    width: Width,
    trials: usize,
    signedness: Signedness,
    seed: u64,
    evaluate: F,
) -> VerifyReport
where
    F: Fn(Operation, i128, i128, Width, Signedness) -> Result<Outcome> + Sync,
{
    let _span =
        tracing::debug_span!("verify", width = width.bits(), trials, %signedness, seed).entered();

    let mut pairs = operand_pairs(width, signedness, seed).take(trials).enumerate();
    let mut mismatches = Vec::new();

    loop {
        let chunk: Vec<(usize, (i128, i128))> = pairs.by_ref().take(CHUNK_TRIALS).collect();
        if chunk.is_empty() {
            break;
        }

        // Parallel collection preserves trial order
        #[cfg(feature = "rayon")]
        let chunk_mismatches: Vec<Mismatch> = chunk
            .par_iter()
            .flat_map_iter(|&(trial, (a, b))| {
                check_trial(trial, a, b, width, signedness, &evaluate)
            })
            .collect();

        #[cfg(not(feature = "rayon"))]
        let chunk_mismatches: Vec<Mismatch> = chunk
            .iter()
            .flat_map(|&(trial, (a, b))| check_trial(trial, a, b, width, signedness, &evaluate))
            .collect();

        mismatches.extend(chunk_mismatches);
    }

    for mismatch in &mismatches {
        tracing::debug!(%mismatch, "verification mismatch");
    }

    tracing::debug!(failures = mismatches.len(), "verification complete");

    VerifyReport {
        width,
        trials,
        signedness,
        seed,
        mismatches,
    }
}

/// The endless stream of operand pairs behind [verify], drawn uniformly from the range of the
/// width under the given signedness. Each pair draws `a` before `b`.
pub fn operand_pairs(
    width: Width,
    signedness: Signedness,
    seed: u64,
) -> impl Iterator<Item = (i128, i128)> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let range = width.min_value(signedness)..=width.max_value(signedness);
    std::iter::repeat_with(move || {
        let a = rng.gen_range(range.clone());
        let b = rng.gen_range(range.clone());
        (a, b)
    })
}

/// The first `trials` pairs of [operand_pairs].
pub fn trial_operands(
    width: Width,
    trials: usize,
    signedness: Signedness,
    seed: u64,
) -> Vec<(i128, i128)> {
    operand_pairs(width, signedness, seed).take(trials).collect()
}

fn check_trial<F>(
    trial: usize,
    a: i128,
    b: i128,
    width: Width,
    signedness: Signedness,
    evaluate: &F,
) -> Vec<Mismatch>
where
    F: Fn(Operation, i128, i128, Width, Signedness) -> Result<Outcome>,
{
    let reference = Reference::new(a, b, width, signedness);
    Operation::ALL
        .into_iter()
        .filter(|operation| !(matches!(operation, Operation::Divide(_)) && b == 0))
        .filter_map(|operation| {
            let discrepancy = match evaluate(operation, a, b, width, signedness) {
                Ok(outcome) => reference.compare(operation, outcome),
                Err(err) => Some(Discrepancy::UnexpectedError(err)),
            };

            discrepancy.map(|discrepancy| Mismatch {
                trial,
                operation,
                a,
                b,
                discrepancy,
            })
        })
        .collect()
}

/// Arbitrary precision reference values for a single operand pair.
pub(crate) struct Reference {
    width: Width,
    signedness: Signedness,
    lhs: BigInt,
    rhs: BigInt,
}

impl Reference {
    pub(crate) fn new(a: i128, b: i128, width: Width, signedness: Signedness) -> Self {
        let interpret = |value| signedness.interpret(mask_to_width(value, width), width);
        Self {
            width,
            signedness,
            lhs: BigInt::from(interpret(a)),
            rhs: BigInt::from(interpret(b)),
        }
    }

    /// How `outcome` disagrees with the reference result of `operation`, if at all.
    pub(crate) fn compare(&self, operation: Operation, outcome: Outcome) -> Option<Discrepancy> {
        let n = self.width.bits();
        match (operation, outcome) {
            (Operation::Add, Outcome::Sum { value, flags }) => {
                sum_discrepancy(value, flags, self.expected_sum())
            }
            (Operation::Sub, Outcome::Sum { value, flags }) => {
                sum_discrepancy(value, flags, self.expected_difference())
            }
            (Operation::Multiply(_), Outcome::Product { value, width })
                if width == self.width.doubled() =>
            {
                let expected = modulo(&(&self.lhs * &self.rhs), 2 * n);
                (value != expected).then_some(Discrepancy::IncorrectValue {
                    actual: value,
                    expected,
                })
            }
            (Operation::Divide(_), Outcome::Division(division)) => {
                (!self.division_holds(division)).then_some(Discrepancy::IncorrectDivision {
                    quotient: division.quotient,
                    remainder: division.remainder,
                })
            }
            (_, outcome) => Some(Discrepancy::UnexpectedOutcome(outcome)),
        }
    }

    fn expected_sum(&self) -> (u128, Flags) {
        let sum = &self.lhs + &self.rhs;
        let out_of_range = !self.in_range(&sum);
        let flags = match self.signedness {
            Signedness::Signed => Flags::with_overflow(out_of_range),
            Signedness::Unsigned => Flags::with_carry(out_of_range),
        };

        (modulo(&sum, self.width.bits()), flags)
    }

    /// Flags follow the adder that computes `lhs + -rhs` within the width.
    fn expected_difference(&self) -> (u128, Flags) {
        let difference = &self.lhs - &self.rhs;
        let flags = match self.signedness {
            Signedness::Signed => {
                // Negating the most negative value yields itself
                let min = BigInt::from(self.width.min_value(self.signedness));
                let negated = if self.rhs == min { min } else { -&self.rhs };
                Flags::with_overflow(!self.in_range(&(&self.lhs + negated)))
            }
            // The two's complement of zero is zero, which never carries
            Signedness::Unsigned => {
                Flags::with_borrow(self.rhs == BigInt::from(0) || self.lhs < self.rhs)
            }
        };

        (modulo(&difference, self.width.bits()), flags)
    }

    fn in_range(&self, value: &BigInt) -> bool {
        *value >= BigInt::from(self.width.min_value(self.signedness))
            && *value <= BigInt::from(self.width.max_value(self.signedness))
    }

    /// Whether `dividend == quotient * divisor + remainder` with `|remainder| < |divisor|`.
    ///
    /// The quotient of the most negative signed value by -1 is not representable and wraps to the
    /// most negative value, so for that pair the identity is checked modulo 2<sup>N</sup>.
    fn division_holds(&self, division: Division) -> bool {
        let quotient = BigInt::from(self.signedness.interpret(division.quotient, self.width));
        let remainder = BigInt::from(self.signedness.interpret(division.remainder, self.width));

        if remainder.magnitude() >= self.rhs.magnitude() {
            return false;
        }

        let reconstructed = quotient * &self.rhs + remainder;
        if reconstructed == self.lhs {
            return true;
        }

        let n = self.width.bits();
        self.quotient_overflows() && modulo(&reconstructed, n) == modulo(&self.lhs, n)
    }

    fn quotient_overflows(&self) -> bool {
        self.signedness.is_signed()
            && self.lhs == BigInt::from(self.width.min_value(self.signedness))
            && self.rhs == BigInt::from(-1)
    }
}

fn sum_discrepancy(actual: u128, flags: Flags, expected: (u128, Flags)) -> Option<Discrepancy> {
    let (expected, expected_flags) = expected;
    if actual != expected {
        Some(Discrepancy::IncorrectValue { actual, expected })
    } else if flags != expected_flags {
        Some(Discrepancy::IncorrectFlags {
            actual: flags,
            expected: expected_flags,
        })
    } else {
        None
    }
}

/// Reduce a value modulo 2<sup>bits</sup>, always producing a non-negative result.
fn modulo(value: &BigInt, bits: u32) -> u128 {
    let modulus = BigInt::from(1u8) << bits;
    let reduced = ((value % &modulus) + &modulus) % &modulus;
    let (_, digits) = reduced.to_u64_digits();
    digits
        .iter()
        .rev()
        .fold(0, |value, &digit| (value << u64::BITS) | u128::from(digit))
}
