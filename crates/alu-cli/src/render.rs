//! Human readable rendering of results.

use alu_ops::{Division, Outcome, VerifyReport};

pub fn outcome(outcome: &Outcome) -> String {
    match outcome {
        Outcome::Sum { value, flags } => format!("Result: {value}\nFlags: {flags}"),
        Outcome::Product { value, width } => format!("Product: {value} ({width})"),
        Outcome::Division(Division {
            quotient,
            remainder,
        }) => format!("Quotient: {quotient}, Remainder: {remainder}"),
    }
}

/// Header line, one line per mismatch, and a summary line.
pub fn report(report: &VerifyReport) -> String {
    let mut lines = vec![format!(
        "Verifying {} trials for {} {} arithmetic...",
        report.trials, report.width, report.signedness
    )];

    lines.extend(report.mismatches.iter().map(ToString::to_string));

    if report.passed() {
        lines.push("Verification: PASS".to_owned());
    } else {
        lines.push(format!("Verification: FAIL ({} failures)", report.failures()));
    }

    lines.join("\n") + "\n"
}
