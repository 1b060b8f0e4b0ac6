// src/models/aggregates.rs

use serde::{Deserialize, Serialize};
use rust_decimal::Decimal;
use sqlx::FromRow;
use uuid::Uuid;

use crate::models::{
    finance::Invoice,
    franchise::Franchise,
    inventory::StockPosition,
    operations::OrderStatus,
};

// Vendas somadas de UMA franquia dentro de um intervalo.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct FranchiseSales {
    pub franchise_id: Uuid,
    pub gross_sales: Decimal,
    pub royalty_amount: Decimal,
    pub transaction_count: i64,
    pub record_count: i64, // Quantos lançamentos diários entraram na soma
}

// Totais da rede (ou da franquia filtrada) num intervalo.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SalesTotals {
    pub gross_sales: Decimal,
    pub royalty_amount: Decimal,
    pub transaction_count: i64,
}

impl SalesTotals {
    pub fn from_rows(rows: &[FranchiseSales]) -> Self {
        rows.iter().fold(Self::default(), |mut acc, row| {
            acc.gross_sales += row.gross_sales;
            acc.royalty_amount += row.royalty_amount;
            acc.transaction_count += row.transaction_count;
            acc
        })
    }

    /// Ticket médio sem arredondamento. Zero transações -> zero.
    pub fn average_ticket(&self) -> Decimal {
        if self.transaction_count <= 0 {
            return Decimal::ZERO;
        }
        self.gross_sales / Decimal::from(self.transaction_count)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct OrderStatusCount {
    pub status: OrderStatus,
    pub order_count: i64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct VehicleStats {
    pub total_vehicles: i64,
    pub maintenance_alerts: i64,
}

// Resultado tipado de cada sub-consulta, unido na barreira do AggregationEngine.
// Sub-consultas zeradas pela política "degrade" aparecem em `degraded`.
#[derive(Debug, Clone, Default)]
pub struct PeriodTotals {
    pub current_sales: Vec<FranchiseSales>,
    pub previous_sales: Vec<FranchiseSales>,
    pub invoices: Vec<Invoice>,
    pub order_counts: Vec<OrderStatusCount>,
    pub stock: Vec<StockPosition>,
    pub vehicles: VehicleStats,
    pub franchises: Vec<Franchise>,
    pub degraded: Vec<String>,
}

impl PeriodTotals {
    pub fn current_totals(&self) -> SalesTotals {
        SalesTotals::from_rows(&self.current_sales)
    }

    pub fn previous_totals(&self) -> SalesTotals {
        SalesTotals::from_rows(&self.previous_sales)
    }

    pub fn orders_with(&self, predicate: impl Fn(OrderStatus) -> bool) -> i64 {
        self.order_counts
            .iter()
            .filter(|c| predicate(c.status))
            .map(|c| c.order_count)
            .sum()
    }
}
