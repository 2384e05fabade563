use fixed_q64::{integers::U256, FixedPointError, SQ64x64};
use proptest::prelude::*;

const EXP2_MIN: i128 = -64 << 64;
const EXP2_END: i128 = 63 << 64;

fn raw() -> impl Strategy<Value = SQ64x64> {
    any::<i128>().prop_map(SQ64x64::new)
}

fn non_negative() -> impl Strategy<Value = SQ64x64> {
    (0..=i128::MAX).prop_map(SQ64x64::new)
}

// Integers survive the trip through the fixed-point representation
proptest! {
    #[test]
    fn prop_int_roundtrip(n in any::<i64>()) {
        let x = SQ64x64::from_int(n as i128).unwrap();
        prop_assert_eq!(x.to_int(), n);
        prop_assert_eq!(x.frac_bits(), 0);
    }

    #[test]
    fn prop_to_int_floors(x in raw()) {
        let back = SQ64x64::from_int(x.to_int() as i128).unwrap();
        prop_assert!(back <= x);
        prop_assert!(x.checked_sub(back).unwrap() < SQ64x64::ONE);
    }
}

// Addition and subtraction are exact inverses whenever they succeed
proptest! {
    #[test]
    fn prop_add_sub_inverse(x in raw(), y in raw()) {
        if let Ok(sum) = x.checked_add(y) {
            prop_assert_eq!(sum.checked_sub(y).unwrap(), x);
            prop_assert_eq!(y.checked_add(x).unwrap(), sum);
        } else {
            prop_assert_eq!(x.checked_add(y), Err(FixedPointError::Overflow("add")));
        }
    }

    #[test]
    fn prop_double_negation(x in raw()) {
        prop_assume!(x != SQ64x64::MIN);
        prop_assert_eq!(x.checked_neg().unwrap().checked_neg().unwrap(), x);
    }
}

// Integer products divide back exactly; quotients never overshoot
proptest! {
    #[test]
    fn prop_mul_div_integers(a in any::<i32>(), b in any::<i32>()) {
        prop_assume!(b != 0);
        let (x, y) = (SQ64x64::from(a), SQ64x64::from(b));
        let product = x.checked_mul(y).unwrap();
        prop_assert_eq!(product.to_int(), a as i64 * b as i64);
        prop_assert_eq!(product.checked_div(y).unwrap(), x);
    }

    #[test]
    fn prop_div_rounds_down(x in raw(), y in 1..=i128::MAX) {
        let y = SQ64x64::new(y);
        if let Ok(quotient) = x.checked_div(y) {
            // the product can only fall below MIN, never above x
            prop_assert!(quotient.checked_mul(y).map_or(x.is_negative(), |back| back <= x));
        }
    }

    #[test]
    fn prop_div_by_zero(x in raw()) {
        prop_assert_eq!(x.checked_div(SQ64x64::ZERO), Err(FixedPointError::DivisionByZero("div")));
    }
}

// sqrt returns exactly floor(sqrt(raw * 2^64))
proptest! {
    #[test]
    fn prop_sqrt_is_floor(x in non_negative()) {
        let root = x.sqrt().unwrap().into_raw() as u128;
        let scaled = U256::from(x.into_raw() as u128) << 64usize;
        let r = U256::from(root);
        let next = r + U256::one();
        prop_assert!(r * r <= scaled);
        prop_assert!(next * next > scaled);
    }

    #[test]
    fn prop_sqrt_rejects_negative(x in i128::MIN..0) {
        prop_assert_eq!(SQ64x64::new(x).sqrt(), Err(FixedPointError::DomainError("sqrt")));
    }
}

// pow agrees with repeated multiplication for small exponents
proptest! {
    #[test]
    fn prop_pow_small_exponents(x in raw()) {
        prop_assert_eq!(x.pow(0).unwrap(), SQ64x64::ONE);
        prop_assert_eq!(x.pow(1).unwrap(), x);
        match x.checked_mul(x) {
            Ok(square) => prop_assert_eq!(x.pow(2).unwrap(), square),
            Err(_) => prop_assert_eq!(x.pow(2), Err(FixedPointError::Overflow("pow"))),
        }
    }
}

// Means stay between their arguments
proptest! {
    #[test]
    fn prop_avg_bounded(x in raw(), y in raw()) {
        let mean = x.avg(y);
        prop_assert!(x.min(y) <= mean && mean <= x.max(y));
        prop_assert_eq!(mean, y.avg(x));
        prop_assert_eq!(x.avg(x), x);
    }

    #[test]
    fn prop_gavg_bounded(x in non_negative(), y in non_negative()) {
        let mean = x.gavg(y).unwrap();
        prop_assert!(x.min(y) <= mean && mean <= x.max(y));
        prop_assert!(mean <= x.avg(y));
        prop_assert_eq!(mean, y.gavg(x).unwrap());
    }
}

// Shifts left are undone by the same shift right
proptest! {
    #[test]
    fn prop_shift_roundtrip(x in raw(), bits in 0i32..128) {
        if let Ok(shifted) = x.shift(bits) {
            prop_assert_eq!(shifted.shift(-bits).unwrap(), x);
        }
        prop_assert_eq!(x.shift(-bits).unwrap().into_raw(), x.into_raw() >> bits);
    }
}

// Logarithm and exponential are monotone and roughly inverse
proptest! {
    #[test]
    fn prop_log_2_monotone(a in 1..=i128::MAX, b in 1..=i128::MAX) {
        let (lo, hi) = (SQ64x64::new(a.min(b)), SQ64x64::new(a.max(b)));
        prop_assert!(lo.log_2().unwrap() <= hi.log_2().unwrap());
    }

    #[test]
    fn prop_exp_2_monotone(a in EXP2_MIN..EXP2_END, b in EXP2_MIN..EXP2_END) {
        let (lo, hi) = (SQ64x64::new(a.min(b)), SQ64x64::new(a.max(b)));
        prop_assert!(lo.exp_2().unwrap() <= hi.exp_2().unwrap());
    }

    #[test]
    fn prop_exp_2_of_log_2(x in (1i128 << 32)..(1i128 << 126)) {
        let back = SQ64x64::new(x).log_2().unwrap().exp_2().unwrap().into_raw();
        // relative error below 2^-62 plus a few ULPs of flooring
        let tolerance = (x >> 62) + 4;
        prop_assert!((back - x).abs() <= tolerance, "{:#x} -> {:#x}", x, back);
    }

    #[test]
    fn prop_exp_positive_in_range(x in (-44i128 << 64)..(43i128 << 64)) {
        prop_assert!(SQ64x64::new(x).exp().unwrap().is_positive());
    }
}
