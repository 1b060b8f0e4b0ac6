// src/models/inventory.rs

use serde::{Serialize, Deserialize};
use rust_decimal::Decimal;
use sqlx::FromRow;
use uuid::Uuid;
use utoipa::ToSchema;

// --- Nível de Estoque ---
// Liga um Produto a um Depósito. Invariante: reserved_qty <= quantity.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StockLevel {
    pub product_id: Uuid,
    pub warehouse_id: Uuid,
    pub quantity: i64,     // Quantidade FÍSICA total
    pub reserved_qty: i64, // Quantidade Reservada
}

impl StockLevel {
    /// Disponível = físico - reservado. `None` quando o registro viola o invariante.
    pub fn available(&self) -> Option<i64> {
        if self.quantity < 0 || self.reserved_qty < 0 || self.reserved_qty > self.quantity {
            return None;
        }
        Some(self.quantity - self.reserved_qty)
    }
}

// Saldo já unido (JOIN) com o catálogo: preço unitário e estoque mínimo.
// `franchise_id` é o dono do depósito (None = depósito central).
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct StockPosition {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub level: StockLevel,
    pub franchise_id: Option<Uuid>,
    pub unit_price: Decimal,
    pub min_stock: i64,
}
