// src/services/inventory_valuation.rs

use rust_decimal::Decimal;

use crate::{common::money::Money, models::inventory::StockPosition};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InventoryValuation {
    pub total_value: Money,
    pub low_stock_count: i64,
    // Saldos que violam reserved_qty <= quantity; ficam fora do alerta
    pub invalid_levels: i64,
}

// Estado ATUAL do estoque; não depende do período.
pub struct InventoryValuationEngine;

impl InventoryValuationEngine {
    /// total = Σ(quantidade * preço unitário)
    /// estoque baixo = disponível <= mínimo, só quando mínimo > 0
    pub fn value(positions: &[StockPosition]) -> InventoryValuation {
        let mut valuation = InventoryValuation::default();

        for position in positions {
            let level = &position.level;

            if level.quantity > 0 {
                valuation.total_value += Decimal::from(level.quantity) * position.unit_price;
            }

            let Some(available) = level.available() else {
                tracing::warn!(
                    "Saldo inconsistente ignorado no alerta: produto {} depósito {} (qtd {}, reservado {})",
                    level.product_id,
                    level.warehouse_id,
                    level.quantity,
                    level.reserved_qty
                );
                valuation.invalid_levels += 1;
                continue;
            };

            // mínimo zero = sem mínimo definido, nunca é alerta
            if position.min_stock > 0 && available <= position.min_stock {
                valuation.low_stock_count += 1;
            }
        }

        valuation
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    use crate::models::inventory::StockLevel;

    fn position(quantity: i64, reserved: i64, price_cents: i64, min_stock: i64) -> StockPosition {
        StockPosition {
            level: StockLevel {
                product_id: Uuid::new_v4(),
                warehouse_id: Uuid::new_v4(),
                quantity,
                reserved_qty: reserved,
            },
            franchise_id: None,
            unit_price: Decimal::new(price_cents, 2),
            min_stock,
        }
    }

    #[test]
    fn values_physical_quantity() {
        let v = InventoryValuationEngine::value(&[position(10, 4, 250, 0), position(3, 0, 1999, 0)]);
        // 10 * 2.50 + 3 * 19.99
        assert_eq!(v.total_value, Decimal::new(8497, 2));
        assert_eq!(v.low_stock_count, 0);
    }

    #[test]
    fn low_stock_uses_available_quantity() {
        let v = InventoryValuationEngine::value(&[
            position(10, 6, 100, 5), // disponível 4 <= 5
            position(10, 5, 100, 5), // disponível 5 <= 5
            position(10, 4, 100, 5), // disponível 6
        ]);
        assert_eq!(v.low_stock_count, 2);
    }

    #[test]
    fn zero_minimum_is_never_low_stock() {
        let v = InventoryValuationEngine::value(&[position(0, 0, 100, 0), position(5, 5, 100, 0)]);
        assert_eq!(v.low_stock_count, 0);
    }

    #[test]
    fn inconsistent_levels_are_skipped_from_alerts() {
        let v = InventoryValuationEngine::value(&[position(2, 3, 100, 10)]);
        assert_eq!(v.low_stock_count, 0);
        assert_eq!(v.invalid_levels, 1);
        assert_eq!(v.total_value, Decimal::from(2));
    }

    #[test]
    fn empty_inventory_is_zero() {
        assert_eq!(InventoryValuationEngine::value(&[]), InventoryValuation::default());
    }
}
