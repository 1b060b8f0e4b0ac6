pub mod aggregates;
pub mod dashboard;
pub mod finance;
pub mod fleet;
pub mod franchise;
pub mod inventory;
pub mod operations;
pub mod period;
