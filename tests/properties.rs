use alu_ops::{
    add, arithmetic_right_shift, mask_to_width, sign_extend, sub, twos_complement, verify, Divider,
    Division, Flags, Multiplier, Signedness, Width,
};
use proptest::prelude::*;

/// A width with two operands drawn from its range under the given interpretation.
fn operands() -> impl Strategy<Value = (Width, Signedness, i128, i128)> {
    (1..=Width::MAX_BITS, any::<bool>(), any::<u64>(), any::<u64>()).prop_map(
        |(bits, signed, a, b)| {
            let width = Width::new(bits).expect("valid width");
            let signedness = Signedness::from(signed);
            let interpret = |raw: u64| signedness.interpret(width.truncate(raw.into()), width);
            (width, signedness, interpret(a), interpret(b))
        },
    )
}

/// A width with two operands reinterpreted under `signedness`, regardless of how they were drawn.
fn operands_as(signedness: Signedness) -> impl Strategy<Value = (Width, i128, i128)> {
    operands().prop_map(move |(width, _, a, b)| {
        let reinterpret = |value| signedness.interpret(mask_to_width(value, width), width);
        (width, reinterpret(a), reinterpret(b))
    })
}

proptest! {
    #[test]
    fn add_matches_native((width, signedness, a, b) in operands()) {
        let (sum, flags) = add(a, b, width, signedness);
        let exact = a + b;
        prop_assert_eq!(sum, mask_to_width(exact, width));

        let in_range = (width.min_value(signedness)..=width.max_value(signedness)).contains(&exact);
        match signedness {
            Signedness::Signed => prop_assert_eq!(flags, Flags::with_overflow(!in_range)),
            Signedness::Unsigned => prop_assert_eq!(flags, Flags::with_carry(!in_range)),
        }
    }

    #[test]
    fn sub_matches_native((width, signedness, a, b) in operands()) {
        let (difference, _) = sub(a, b, width, signedness);
        prop_assert_eq!(difference, mask_to_width(a - b, width));
    }

    #[test]
    fn signed_sub_overflow_is_adder_overflow((width, a, b) in operands_as(Signedness::Signed)) {
        let (_, sub_flags) = sub(a, b, width, Signedness::Signed);
        let negated = sign_extend(twos_complement(b, width), width);
        let (_, add_flags) = add(a, negated, width, Signedness::Signed);
        prop_assert_eq!(sub_flags, add_flags);
    }

    #[test]
    fn unsigned_borrow((width, a, b) in operands_as(Signedness::Unsigned)) {
        let (_, flags) = sub(a, b, width, Signedness::Unsigned);
        // Subtracting zero adds a two's complement of zero, which never carries
        let borrow = b == 0 || a < b;
        prop_assert_eq!(flags, Flags::with_borrow(borrow));
    }

    #[test]
    fn multipliers_match_native((width, signedness, a, b) in operands()) {
        let expected = width.doubled().truncate(a.wrapping_mul(b) as u128);
        for multiplier in Multiplier::ALL {
            prop_assert_eq!(
                multiplier.multiply(a, b, width, signedness),
                expected,
                "{} {} * {}",
                multiplier,
                a,
                b
            );
        }
    }

    #[test]
    fn dividers_match_native((width, signedness, a, b) in operands()) {
        prop_assume!(b != 0);
        let expected = Division {
            quotient: mask_to_width(a / b, width),
            remainder: mask_to_width(a % b, width),
        };

        for divider in Divider::ALL {
            prop_assert_eq!(divider.divide(a, b, width, signedness), Ok(expected), "{}", divider);
        }
    }

    #[test]
    fn sign_extend_inverts_mask((width, a) in operands().prop_map(|(width, _, a, _)| (width, a))) {
        let raw = mask_to_width(a, width);
        prop_assert_eq!(mask_to_width(sign_extend(raw, width), width), raw);
    }

    #[test]
    fn shift_matches_native((width, _, a, _) in operands(), shift in 0..=Width::MAX_BITS) {
        let value = sign_extend(mask_to_width(a, width), width);
        let expected = mask_to_width(value >> shift.min(width.bits()), width);
        prop_assert_eq!(arithmetic_right_shift(mask_to_width(a, width), shift, width), expected);
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    #[test]
    fn verification_passes(
        (width, signedness, _, _) in operands(),
        seed in any::<u64>(),
    ) {
        let report = verify(width, 50, signedness, seed);
        prop_assert!(report.passed(), "{:?}", report.mismatches);
    }
}
