// src/models/franchise.rs

use serde::{Deserialize, Serialize};
use rust_decimal::Decimal;
use sqlx::FromRow;
use uuid::Uuid;
use utoipa::ToSchema;

// ---
// Franquia (a raiz de agregação de todos os números por franqueado)
// ---
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Franchise {
    pub id: Uuid,

    #[schema(example = "Franquia Centro")]
    pub name: String,

    // Percentual de royalty (ex: 6.5 = 6,5% das vendas brutas)
    #[schema(example = "6.5")]
    pub royalty_rate: Decimal,

    pub is_active: bool,
}

impl Franchise {
    /// Taxa como fração (6.5% -> 0.065).
    pub fn royalty_fraction(&self) -> Decimal {
        self.royalty_rate / Decimal::ONE_HUNDRED
    }
}
