// src/models/finance.rs

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use sqlx::FromRow;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use utoipa::ToSchema;

// --- Enums (Mapeando o Postgres) ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "payment_status", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentStatus {
    Pending,   // Aberto
    Paid,      // Quitado
    Overdue,   // Vencido
    Cancelled, // Cancelado
}

// --- Structs ---

// Um registro por franquia por dia.
// `royalty_amount` é derivado: round(gross_sales * taxa, 2) no momento do lançamento.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SalesRecord {
    pub franchise_id: Uuid,

    #[schema(value_type = String, format = Date, example = "2024-03-15")]
    pub date: NaiveDate,

    #[schema(example = "1520.40")]
    pub gross_sales: Decimal,

    #[schema(example = 38)]
    pub transaction_count: i64,

    #[schema(example = "98.83")]
    pub royalty_amount: Decimal,

    pub payment_status: PaymentStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Invoice {
    pub id: Uuid,
    pub franchise_id: Uuid,

    #[schema(value_type = String, format = Date, example = "2024-03-01")]
    pub issue_date: NaiveDate,
    #[schema(value_type = String, format = Date, example = "2024-03-31")]
    pub due_date: NaiveDate,
    #[schema(value_type = Option<String>, format = Date, example = "2024-03-12")]
    pub paid_date: Option<NaiveDate>,

    #[schema(example = "500.00")]
    pub amount: Decimal,

    pub status: PaymentStatus,
}
