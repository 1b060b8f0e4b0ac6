// src/common/money.rs

use rust_decimal::{Decimal, RoundingStrategy};

// Valores monetários são sempre Decimal (ponto fixo).
// O arredondamento só acontece na montagem final do snapshot.
pub type Money = Decimal;

// Percentual (ex: 160.0 significa 160%)
pub type Percentage = Decimal;

pub const MONEY_DP: u32 = 2;
pub const PERCENT_DP: u32 = 1;

/// Arredonda para 2 casas, meio para cima (0.005 -> 0.01).
pub fn round_money(value: Money) -> Money {
    value.round_dp_with_strategy(MONEY_DP, RoundingStrategy::MidpointAwayFromZero)
}

/// Arredonda para 1 casa, meio para cima.
pub fn round_percentage(value: Percentage) -> Percentage {
    value.round_dp_with_strategy(PERCENT_DP, RoundingStrategy::MidpointAwayFromZero)
}
