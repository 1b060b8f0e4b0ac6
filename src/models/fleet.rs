// src/models/fleet.rs

use serde::{Deserialize, Serialize};
use chrono::NaiveDate;
use sqlx::FromRow;
use uuid::Uuid;
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "vehicle_status", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VehicleStatus {
    Active,
    Maintenance,
    Retired, // Fora da frota, não conta em nada
}

// Veículos de entrega das franquias
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Vehicle {
    pub id: Uuid,
    pub franchise_id: Uuid,
    pub status: VehicleStatus,
    #[schema(value_type = Option<String>, format = Date)]
    pub next_maintenance_date: Option<NaiveDate>,
}

impl Vehicle {
    /// Em manutenção agora, ou com revisão vencendo até `horizon` (inclusive).
    pub fn needs_maintenance(&self, horizon: NaiveDate) -> bool {
        match self.status {
            VehicleStatus::Retired => false,
            VehicleStatus::Maintenance => true,
            VehicleStatus::Active => self
                .next_maintenance_date
                .is_some_and(|date| date <= horizon),
        }
    }
}
