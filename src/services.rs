pub mod aggregation_service;
pub mod dashboard_service;
pub mod growth;
pub mod inventory_valuation;
pub mod period_resolver;
pub mod ranking;
pub mod report_assembler;
pub mod royalty_ledger;
