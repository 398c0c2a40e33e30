use std::process::ExitCode;

use alu_ops::verify::{DEFAULT_SEED, DEFAULT_TRIALS};
use alu_ops::{verify, Divider, Multiplier, Operation, Signedness, Width};
use clap::{value_parser, Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

mod render;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// Arithmetic operations take exactly two operands.
    #[error("need exactly {expected} operands for arithmetic operations, got {actual}")]
    InvalidOperandCount { expected: usize, actual: usize },
}

#[derive(Debug, Parser)]
#[command(name = "alu", version, about = "N-bit arithmetic algorithms")]
struct Args {
    /// Bit width of the operands
    #[arg(long, default_value_t = 8, value_parser = value_parser!(u32).range(1..=Width::MAX_BITS as i64))]
    width: u32,

    /// Use signed (two's complement) arithmetic
    #[arg(long)]
    signed: bool,

    /// Algorithm to run
    #[arg(long, value_enum)]
    algo: Algorithm,

    /// Number of trials for verify
    #[arg(long, default_value_t = DEFAULT_TRIALS)]
    trials: usize,

    /// Seed of the operand generator used by verify
    #[arg(long, default_value_t = DEFAULT_SEED)]
    seed: u64,

    /// Log verification details to stderr. RUST_LOG takes precedence when set.
    #[arg(short, long)]
    verbose: bool,

    /// Operands a and b (not needed for verify)
    #[arg(allow_negative_numbers = true)]
    operands: Vec<i128>,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "snake_case")]
enum Algorithm {
    Add,
    Sub,
    MulSeq,
    MulBooth,
    MulBit,
    MulBitpair,
    DivRestoring,
    DivNonrestoring,
    Verify,
}

impl Algorithm {
    /// The arithmetic operation selected by this algorithm, if any.
    fn operation(self) -> Option<Operation> {
        let operation = match self {
            Self::Add => Operation::Add,
            Self::Sub => Operation::Sub,
            Self::MulSeq => Multiplier::Sequential.into(),
            Self::MulBooth => Multiplier::Booth.into(),
            Self::MulBit => Multiplier::PartialProducts.into(),
            Self::MulBitpair => Multiplier::BitPairBooth.into(),
            Self::DivRestoring => Divider::Restoring.into(),
            Self::DivNonrestoring => Divider::NonRestoring.into(),
            Self::Verify => return None,
        };

        Some(operation)
    }
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing(args.verbose);

    match run(&args) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(err) => {
            eprintln!("Error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

/// Run the selected algorithm and print its result. Returns whether the run succeeded.
fn run(args: &Args) -> anyhow::Result<bool> {
    let width = Width::new(args.width)?;
    let signedness = Signedness::from(args.signed);

    let Some(operation) = args.algo.operation() else {
        tracing::info!(%width, %signedness, trials = args.trials, seed = args.seed, "verifying");
        let report = verify(width, args.trials, signedness, args.seed);
        print!("{}", render::report(&report));
        return Ok(report.passed());
    };

    let (a, b) = match *args.operands.as_slice() {
        [a, b] => (a, b),
        _ => {
            return Err(Error::InvalidOperandCount {
                expected: 2,
                actual: args.operands.len(),
            }
            .into())
        }
    };

    tracing::debug!(%operation, a, b, %width, %signedness, "evaluating");
    let outcome = operation.evaluate(a, b, width, signedness)?;
    println!("{}", render::outcome(&outcome));
    Ok(true)
}

fn init_tracing(verbose: bool) {
    let default_directive = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let args = Args::try_parse_from(["alu", "--algo", "verify"]).expect("valid arguments");
        assert_eq!(args.width, 8);
        assert!(!args.signed);
        assert_eq!(args.algo, Algorithm::Verify);
        assert_eq!(args.trials, 400);
        assert_eq!(args.seed, 42);
        assert!(args.operands.is_empty());
    }

    #[test]
    fn negative_operands() {
        let args = Args::try_parse_from(["alu", "--signed", "--algo", "mul_booth", "-5", "6"])
            .expect("valid arguments");
        assert_eq!(args.algo, Algorithm::MulBooth);
        assert_eq!(args.operands, [-5, 6]);
    }

    #[test]
    fn algorithm_names() {
        let names = Algorithm::value_variants()
            .iter()
            .filter_map(|algo| algo.to_possible_value())
            .map(|value| value.get_name().to_owned())
            .collect::<Vec<_>>();
        assert_eq!(
            names,
            [
                "add",
                "sub",
                "mul_seq",
                "mul_booth",
                "mul_bit",
                "mul_bitpair",
                "div_restoring",
                "div_nonrestoring",
                "verify"
            ]
        );
    }

    #[test]
    fn algorithms_match_operation_names() {
        for algo in Algorithm::value_variants() {
            let name = algo.to_possible_value().expect("visible value");
            match algo.operation() {
                Some(operation) => assert_eq!(operation.name(), name.get_name()),
                None => assert_eq!(*algo, Algorithm::Verify),
            }
        }
    }

    #[test]
    fn width_out_of_range() {
        assert!(Args::try_parse_from(["alu", "--width", "0", "--algo", "add"]).is_err());
        assert!(Args::try_parse_from(["alu", "--width", "65", "--algo", "add"]).is_err());
    }

    #[test]
    fn unknown_algorithm() {
        assert!(Args::try_parse_from(["alu", "--algo", "mul_karatsuba"]).is_err());
    }

    #[test]
    fn wrong_operand_count() {
        let args = Args::try_parse_from(["alu", "--algo", "add", "1"]).expect("valid arguments");
        let err = run(&args).expect_err("one operand");
        assert!(matches!(
            err.downcast_ref::<Error>(),
            Some(Error::InvalidOperandCount {
                expected: 2,
                actual: 1
            })
        ));
    }

    #[test]
    fn division_by_zero() {
        let args = Args::try_parse_from(["alu", "--algo", "div_restoring", "1", "0"])
            .expect("valid arguments");
        let err = run(&args).expect_err("zero divisor");
        assert_eq!(
            err.downcast_ref::<alu_ops::Error>(),
            Some(&alu_ops::Error::DivisionByZero)
        );
    }
}
