// src/services/report_assembler.rs

use chrono::{DateTime, Utc};

use crate::{
    common::money::{round_money, Percentage},
    models::{
        aggregates::{PeriodTotals, SalesTotals},
        dashboard::{
            FinancialMetrics, MetricsSnapshot, NetworkOverview, OperationsMetrics, Performance,
            RankedEntry, SnapshotPeriod,
        },
        finance::PaymentStatus,
        operations::OrderStatus,
        period::ResolvedPeriod,
    },
    services::{
        inventory_valuation::InventoryValuation,
        ranking::Rankings,
        royalty_ledger::InvoiceReconciliation,
    },
};

pub struct AssemblyInput<'a> {
    pub period: &'a ResolvedPeriod,
    pub totals: &'a PeriodTotals,
    pub current_sales: &'a SalesTotals,
    pub growth_rate: Percentage,
    pub rankings: Rankings,
    pub ledger: InvoiceReconciliation,
    pub inventory: InventoryValuation,
    pub generated_at: DateTime<Utc>,
}

// Composição pura, sem I/O.
// É o ÚNICO lugar onde valores monetários são arredondados (2 casas).
pub struct ReportAssembler;

impl ReportAssembler {
    pub fn assemble(input: AssemblyInput<'_>) -> MetricsSnapshot {
        let AssemblyInput {
            period,
            totals,
            current_sales,
            growth_rate,
            rankings,
            ledger,
            inventory,
            generated_at,
        } = input;

        let network_overview = NetworkOverview {
            total_franchises: totals.franchises.len() as i64,
            active_franchises: totals.franchises.iter().filter(|f| f.is_active).count() as i64,
            total_vehicles: totals.vehicles.total_vehicles,
            total_sales: round_money(current_sales.gross_sales),
            total_royalties: round_money(current_sales.royalty_amount),
            average_ticket: round_money(current_sales.average_ticket()),
            growth_rate,
        };

        let performance = Performance {
            top_performers: rankings.top.into_iter().map(round_entry).collect(),
            bottom_performers: rankings.bottom.into_iter().map(round_entry).collect(),
        };

        let operations = OperationsMetrics {
            total_orders: totals.orders_with(|_| true),
            pending_orders: totals.orders_with(OrderStatus::is_in_flight),
            delivered_orders: totals.orders_with(|s| s == OrderStatus::Delivered),
            inventory_value: round_money(inventory.total_value),
            low_stock_alerts: inventory.low_stock_count,
            maintenance_alerts: totals.vehicles.maintenance_alerts,
        };

        let financial = FinancialMetrics {
            total_revenue: round_money(ledger.collected_amount),
            pending_invoices: ledger.count(PaymentStatus::Pending),
            overdue_invoices: ledger.count(PaymentStatus::Overdue),
            average_payment_delay: ledger.average_payment_delay_days,
            outstanding_amount: round_money(ledger.outstanding_amount),
        };

        MetricsSnapshot {
            network_overview,
            performance,
            operations,
            financial,
            period: SnapshotPeriod {
                start: period.current.start,
                end: period.current.end,
                previous_start: period.previous.start,
                previous_end: period.previous.end,
            },
            generated_at,
            degraded_aggregates: totals.degraded.clone(),
        }
    }
}

fn round_entry(entry: RankedEntry) -> RankedEntry {
    RankedEntry {
        sales: round_money(entry.sales),
        ..entry
    }
}
