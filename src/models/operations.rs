// src/models/operations.rs

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use sqlx::FromRow;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use utoipa::ToSchema;

// --- Enums ---

// Ciclo de vida linear do pedido:
// DRAFT -> PENDING -> CONFIRMED -> IN_PREPARATION -> SHIPPED -> DELIVERED
// CANCELLED é alcançável a partir de qualquer estado não terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "order_status", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    Draft,
    Pending,
    Confirmed,
    InPreparation,
    Shipped,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    /// Posição na sequência linear. CANCELLED fica fora da sequência.
    fn stage(self) -> Option<u8> {
        match self {
            OrderStatus::Draft => Some(0),
            OrderStatus::Pending => Some(1),
            OrderStatus::Confirmed => Some(2),
            OrderStatus::InPreparation => Some(3),
            OrderStatus::Shipped => Some(4),
            OrderStatus::Delivered => Some(5),
            OrderStatus::Cancelled => None,
        }
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, OrderStatus::Delivered | OrderStatus::Cancelled)
    }

    /// Pedidos "em andamento" para os alertas operacionais.
    pub fn is_in_flight(self) -> bool {
        matches!(
            self,
            OrderStatus::Pending | OrderStatus::Confirmed | OrderStatus::InPreparation
        )
    }

    /// Só avança um passo por vez; nunca volta.
    pub fn can_transition_to(self, next: OrderStatus) -> bool {
        if self.is_terminal() {
            return false;
        }
        if next == OrderStatus::Cancelled {
            return true;
        }
        match (self.stage(), next.stage()) {
            (Some(from), Some(to)) => to == from + 1,
            _ => false,
        }
    }
}

// --- Structs ---

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: Uuid,
    pub franchise_id: Uuid,
    pub order_date: DateTime<Utc>,
    pub status: OrderStatus,
    #[schema(example = "150.50")]
    pub total_amount: Decimal,
}

#[cfg(test)]
mod tests {
    use super::*;
    use OrderStatus::*;

    const ALL: [OrderStatus; 7] = [Draft, Pending, Confirmed, InPreparation, Shipped, Delivered, Cancelled];

    #[test]
    fn lifecycle_only_moves_forward_one_step() {
        assert!(Draft.can_transition_to(Pending));
        assert!(Pending.can_transition_to(Confirmed));
        assert!(Confirmed.can_transition_to(InPreparation));
        assert!(InPreparation.can_transition_to(Shipped));
        assert!(Shipped.can_transition_to(Delivered));

        assert!(!Draft.can_transition_to(Confirmed));
        assert!(!Shipped.can_transition_to(Pending));
        assert!(!Pending.can_transition_to(Pending));
    }

    #[test]
    fn cancel_reachable_from_every_non_terminal_state() {
        for status in ALL {
            assert_eq!(status.can_transition_to(Cancelled), !status.is_terminal(), "{status:?}");
        }
    }

    #[test]
    fn terminal_states_have_no_exit() {
        for next in ALL {
            assert!(!Delivered.can_transition_to(next));
            assert!(!Cancelled.can_transition_to(next));
        }
    }

    #[test]
    fn in_flight_states() {
        let in_flight: Vec<_> = ALL.into_iter().filter(|s| s.is_in_flight()).collect();
        assert_eq!(in_flight, vec![Pending, Confirmed, InPreparation]);
    }
}
