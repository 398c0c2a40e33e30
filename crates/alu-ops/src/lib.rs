pub mod addsub;
pub mod div;
pub mod mul;
pub mod operation;
pub mod shift;
pub mod verify;
pub mod width;

mod error;

pub use addsub::{add, sub, twos_complement, Flags};
pub use div::{Divider, Division};
pub use error::*;
pub use mul::Multiplier;
pub use operation::{Operation, Outcome};
pub use shift::arithmetic_right_shift;
pub use verify::{verify, Discrepancy, Mismatch, VerifyReport};
pub use width::{mask_to_width, sign_extend, to_unsigned, Signedness, Width};

#[cfg(test)]
mod tests;
