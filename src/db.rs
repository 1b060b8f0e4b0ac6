pub mod store;
pub use store::{FranchiseDirectory, MetricsStore, StoreError};
pub mod dashboard_repo;
pub use dashboard_repo::DashboardRepository;
pub mod finance_repo;
pub use finance_repo::FinanceRepository;
pub mod inventory_repo;
pub use inventory_repo::InventoryRepository;
pub mod operations_repo;
pub use operations_repo::OperationsRepository;
pub mod franchise_repo;
pub use franchise_repo::FranchiseRepository;
pub mod pg_store;
pub use pg_store::PgMetricsStore;
pub mod memory_store;
pub use memory_store::{InMemoryStore, StoreQuery};
