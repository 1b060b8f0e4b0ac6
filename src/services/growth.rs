// src/services/growth.rs

use rust_decimal::Decimal;

use crate::common::money::{round_percentage, Money, Percentage};

/// Crescimento percentual do período atual sobre o anterior.
///
/// - anterior > 0: (atual - anterior) / anterior * 100, 1 casa, meio para cima
/// - anterior == 0 e atual > 0: 100 (primeira atividade)
/// - caso contrário: 0
///
/// Função pura: cada métrica usa o SEU par atual/anterior.
pub fn growth(current: Money, previous: Money) -> Percentage {
    if previous > Decimal::ZERO {
        return round_percentage((current - previous) / previous * Decimal::ONE_HUNDRED);
    }
    if current > Decimal::ZERO {
        Decimal::ONE_HUNDRED
    } else {
        Decimal::ZERO
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn d(v: i64) -> Decimal {
        Decimal::from(v)
    }

    #[test]
    fn network_example() {
        assert_eq!(growth(d(1300), d(500)), Decimal::new(1600, 1));
        assert_eq!(growth(d(1000), d(500)), Decimal::new(1000, 1));
    }

    #[test]
    fn zero_baseline() {
        assert_eq!(growth(d(300), d(0)), d(100));
        assert_eq!(growth(Decimal::new(1, 2), d(0)), d(100));
        assert_eq!(growth(d(0), d(0)), d(0));
    }

    #[test]
    fn decline_and_rounding() {
        assert_eq!(growth(d(0), d(500)), d(-100));
        // 1/3 = 33.333.. -> 33.3
        assert_eq!(growth(d(400), d(300)), Decimal::new(333, 1));
        // 0.25% exato -> 0.3 (meio para cima)
        assert_eq!(growth(d(401), d(400)), Decimal::new(3, 1));
    }

    fn money() -> impl Strategy<Value = Decimal> {
        (0i64..100_000_000).prop_map(|cents| Decimal::new(cents, 2))
    }

    proptest! {
        #[test]
        fn any_positive_over_zero_is_one_hundred(cents in 1i64..100_000_000) {
            prop_assert_eq!(growth(Decimal::new(cents, 2), Decimal::ZERO), Decimal::ONE_HUNDRED);
        }

        #[test]
        fn sign_follows_difference(current in money(), previous in money()) {
            prop_assume!(previous > Decimal::ZERO);
            let g = growth(current, previous);
            let diff = current - previous;
            if diff.is_zero() {
                prop_assert!(g.is_zero());
            } else if !g.is_zero() {
                prop_assert_eq!(g.is_sign_positive(), diff.is_sign_positive());
            }
        }

        #[test]
        fn monotonic_in_current(a in money(), b in money(), previous in money()) {
            prop_assume!(previous > Decimal::ZERO);
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(growth(lo, previous) <= growth(hi, previous));
        }

        #[test]
        fn at_most_one_decimal_place(current in money(), previous in money()) {
            prop_assert!(growth(current, previous).scale() <= 1);
        }
    }
}
