// src/db/memory_store.rs

use std::collections::{BTreeMap, HashMap, VecDeque};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;
use uuid::Uuid;

use crate::{
    db::store::{FranchiseDirectory, MetricsStore, StoreError},
    models::{
        aggregates::{FranchiseSales, OrderStatusCount, VehicleStats},
        finance::{Invoice, SalesRecord},
        fleet::{Vehicle, VehicleStatus},
        franchise::Franchise,
        inventory::StockPosition,
        operations::Order,
        period::DateRange,
    },
};

// Identifica cada leitura, para injetar falhas e contar chamadas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoreQuery {
    Ping,
    Sales,
    Invoices,
    OrderCounts,
    Stock,
    Vehicles,
    Franchises,
}

// Falhas programadas: `None` em `remaining` = falha para sempre
struct PlannedFailure {
    error: StoreError,
    remaining: Option<u32>,
}

/// Banco em memória com a mesma semântica das consultas SQL.
/// Usado nos testes e em demonstrações locais.
#[derive(Default)]
pub struct InMemoryStore {
    franchises: Vec<Franchise>,
    sales: Vec<SalesRecord>,
    invoices: Vec<Invoice>,
    orders: Vec<Order>,
    stock: Vec<StockPosition>,
    vehicles: Vec<Vehicle>,
    latency: Option<Duration>,
    failures: Mutex<HashMap<StoreQuery, VecDeque<PlannedFailure>>>,
    calls: Mutex<HashMap<StoreQuery, u32>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_franchises(mut self, franchises: impl IntoIterator<Item = Franchise>) -> Self {
        self.franchises.extend(franchises);
        self
    }

    pub fn with_sales(mut self, records: impl IntoIterator<Item = SalesRecord>) -> Self {
        self.sales.extend(records);
        self
    }

    pub fn with_invoices(mut self, invoices: impl IntoIterator<Item = Invoice>) -> Self {
        self.invoices.extend(invoices);
        self
    }

    pub fn with_orders(mut self, orders: impl IntoIterator<Item = Order>) -> Self {
        self.orders.extend(orders);
        self
    }

    pub fn with_stock(mut self, positions: impl IntoIterator<Item = StockPosition>) -> Self {
        self.stock.extend(positions);
        self
    }

    pub fn with_vehicles(mut self, vehicles: impl IntoIterator<Item = Vehicle>) -> Self {
        self.vehicles.extend(vehicles);
        self
    }

    /// Atraso artificial em cada leitura.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    /// A consulta falha `times` vezes e depois volta ao normal.
    pub fn fail_times(&self, query: StoreQuery, error: StoreError, times: u32) {
        self.plan(query, PlannedFailure { error, remaining: Some(times) });
    }

    pub fn fail_always(&self, query: StoreQuery, error: StoreError) {
        self.plan(query, PlannedFailure { error, remaining: None });
    }

    pub fn calls(&self, query: StoreQuery) -> u32 {
        let calls = self.calls.lock().unwrap_or_else(|e| e.into_inner());
        calls.get(&query).copied().unwrap_or(0)
    }

    fn plan(&self, query: StoreQuery, failure: PlannedFailure) {
        let mut failures = self.failures.lock().unwrap_or_else(|e| e.into_inner());
        failures.entry(query).or_default().push_back(failure);
    }

    // Registra a chamada, aplica latência e devolve a falha programada (se houver)
    async fn enter(&self, query: StoreQuery) -> Result<(), StoreError> {
        {
            let mut calls = self.calls.lock().unwrap_or_else(|e| e.into_inner());
            *calls.entry(query).or_insert(0) += 1;
        }

        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }

        let mut failures = self.failures.lock().unwrap_or_else(|e| e.into_inner());
        let Some(queue) = failures.get_mut(&query) else {
            return Ok(());
        };
        let Some(next) = queue.front_mut() else {
            return Ok(());
        };

        let error = next.error.clone();
        match next.remaining.as_mut() {
            None => return Err(error),
            Some(0) => {
                queue.pop_front();
                return Ok(());
            }
            Some(remaining) => {
                *remaining -= 1;
                if *remaining == 0 {
                    queue.pop_front();
                }
            }
        }
        Err(error)
    }
}

fn in_scope(franchise_id: Uuid, scope: Option<Uuid>) -> bool {
    scope.is_none_or(|id| id == franchise_id)
}

#[async_trait]
impl MetricsStore for InMemoryStore {
    async fn ping(&self) -> Result<(), StoreError> {
        self.enter(StoreQuery::Ping).await
    }

    async fn sales_by_franchise(
        &self,
        range: DateRange,
        franchise_id: Option<Uuid>,
    ) -> Result<Vec<FranchiseSales>, StoreError> {
        self.enter(StoreQuery::Sales).await?;

        // BTreeMap mantém a ordem por franchise_id, igual ao ORDER BY
        let mut grouped: BTreeMap<Uuid, FranchiseSales> = BTreeMap::new();
        for record in self
            .sales
            .iter()
            .filter(|r| in_scope(r.franchise_id, franchise_id) && range.contains_date(r.date))
        {
            let entry = grouped.entry(record.franchise_id).or_insert_with(|| FranchiseSales {
                franchise_id: record.franchise_id,
                gross_sales: Default::default(),
                royalty_amount: Default::default(),
                transaction_count: 0,
                record_count: 0,
            });
            entry.gross_sales += record.gross_sales;
            entry.royalty_amount += record.royalty_amount;
            entry.transaction_count += record.transaction_count;
            entry.record_count += 1;
        }

        Ok(grouped.into_values().collect())
    }

    async fn invoices(
        &self,
        range: DateRange,
        franchise_id: Option<Uuid>,
    ) -> Result<Vec<Invoice>, StoreError> {
        self.enter(StoreQuery::Invoices).await?;

        let mut invoices: Vec<Invoice> = self
            .invoices
            .iter()
            .filter(|i| in_scope(i.franchise_id, franchise_id))
            .filter(|i| {
                range.contains_date(i.issue_date)
                    || i.paid_date.is_some_and(|paid| range.contains_date(paid))
            })
            .cloned()
            .collect();
        invoices.sort_by_key(|i| (i.issue_date, i.id));

        Ok(invoices)
    }

    async fn order_status_counts(
        &self,
        range: DateRange,
        franchise_id: Option<Uuid>,
    ) -> Result<Vec<OrderStatusCount>, StoreError> {
        self.enter(StoreQuery::OrderCounts).await?;

        let mut grouped = BTreeMap::new();
        for order in self
            .orders
            .iter()
            .filter(|o| in_scope(o.franchise_id, franchise_id) && range.contains(o.order_date))
        {
            *grouped.entry(order.status).or_insert(0i64) += 1;
        }

        Ok(grouped
            .into_iter()
            .map(|(status, order_count)| OrderStatusCount { status, order_count })
            .collect())
    }

    async fn stock_positions(
        &self,
        franchise_id: Option<Uuid>,
    ) -> Result<Vec<StockPosition>, StoreError> {
        self.enter(StoreQuery::Stock).await?;

        let mut positions: Vec<StockPosition> = self
            .stock
            .iter()
            .filter(|p| match franchise_id {
                None => true,
                Some(id) => p.franchise_id == Some(id),
            })
            .cloned()
            .collect();
        positions.sort_by_key(|p| (p.level.product_id, p.level.warehouse_id));

        Ok(positions)
    }

    async fn vehicle_stats(
        &self,
        horizon: NaiveDate,
        franchise_id: Option<Uuid>,
    ) -> Result<VehicleStats, StoreError> {
        self.enter(StoreQuery::Vehicles).await?;

        let fleet = self
            .vehicles
            .iter()
            .filter(|v| in_scope(v.franchise_id, franchise_id));

        let mut stats = VehicleStats::default();
        for vehicle in fleet {
            if vehicle.status != VehicleStatus::Retired {
                stats.total_vehicles += 1;
            }
            if vehicle.needs_maintenance(horizon) {
                stats.maintenance_alerts += 1;
            }
        }
        Ok(stats)
    }
}

#[async_trait]
impl FranchiseDirectory for InMemoryStore {
    async fn franchises(&self, franchise_id: Option<Uuid>) -> Result<Vec<Franchise>, StoreError> {
        self.enter(StoreQuery::Franchises).await?;

        let mut franchises: Vec<Franchise> = self
            .franchises
            .iter()
            .filter(|f| in_scope(f.id, franchise_id))
            .cloned()
            .collect();
        franchises.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));

        Ok(franchises)
    }
}
