// src/services/royalty_ledger.rs

use std::collections::{BTreeMap, HashMap};

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::{
    common::money::{round_money, Money},
    models::{
        aggregates::FranchiseSales,
        finance::{Invoice, PaymentStatus, SalesRecord},
        franchise::Franchise,
        period::DateRange,
    },
};

// Meio centavo de tolerância por lançamento diário (cada um foi arredondado)
const DRIFT_TOLERANCE_PER_RECORD: Decimal = Decimal::from_parts(5, 0, 0, false, 3);

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatusBucket {
    pub count: i64,
    pub amount: Money,
}

// Resultado da conciliação das faturas de um período.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InvoiceReconciliation {
    /// Faturas EMITIDAS no período, pelo status efetivo em `now`.
    pub by_status: BTreeMap<PaymentStatus, StatusBucket>,
    /// PENDING + OVERDUE das faturas emitidas no período.
    pub outstanding_amount: Money,
    /// Valor das faturas PAGAS dentro do período.
    pub collected_amount: Money,
    pub paid_in_period: i64,
    /// Média de (paid_date - issue_date) em dias, arredondada ao dia mais próximo.
    pub average_payment_delay_days: i64,
}

impl InvoiceReconciliation {
    pub fn count(&self, status: PaymentStatus) -> i64 {
        self.by_status.get(&status).map_or(0, |b| b.count)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RoyaltyDrift {
    pub franchise_id: Uuid,
    pub stored: Money,
    pub expected: Money,
}

pub struct RoyaltyLedgerEngine;

impl RoyaltyLedgerEngine {
    /// royalty = round(vendas brutas * taxa%, 2)
    pub fn expected_royalty(gross_sales: Money, royalty_rate: Decimal) -> Money {
        round_money(gross_sales * royalty_rate / Decimal::ONE_HUNDRED)
    }

    pub fn validate_record(record: &SalesRecord, franchise: &Franchise) -> bool {
        record.royalty_amount == Self::expected_royalty(record.gross_sales, franchise.royalty_rate)
    }

    /// Compara o royalty gravado com o recalculado pela taxa ATUAL.
    /// Só serve para diagnóstico: o valor gravado continua sendo o oficial
    /// (uma troca de taxa no meio do período também aparece aqui).
    pub fn detect_drift(rows: &[FranchiseSales], franchises: &[Franchise]) -> Vec<RoyaltyDrift> {
        let fractions: HashMap<Uuid, Decimal> =
            franchises.iter().map(|f| (f.id, f.royalty_fraction())).collect();

        rows.iter()
            .filter_map(|row| {
                let fraction = fractions.get(&row.franchise_id)?;
                let expected = row.gross_sales * *fraction;
                let tolerance = DRIFT_TOLERANCE_PER_RECORD * Decimal::from(row.record_count.max(1));
                ((row.royalty_amount - expected).abs() > tolerance).then(|| RoyaltyDrift {
                    franchise_id: row.franchise_id,
                    stored: row.royalty_amount,
                    expected,
                })
            })
            .collect()
    }

    /// Status conciliado em `now`, derivado dos fatos (datas), não do campo gravado.
    pub fn effective_status(invoice: &Invoice, now: DateTime<Utc>) -> PaymentStatus {
        if invoice.status == PaymentStatus::Cancelled {
            return PaymentStatus::Cancelled;
        }
        if invoice.paid_date.is_some() {
            return PaymentStatus::Paid;
        }
        if invoice.status == PaymentStatus::Paid {
            tracing::warn!(
                "Fatura {} marcada como PAID sem data de pagamento; tratada como em aberto",
                invoice.id
            );
        }
        if now.date_naive() > invoice.due_date {
            PaymentStatus::Overdue
        } else {
            PaymentStatus::Pending
        }
    }

    pub fn reconcile(invoices: &[Invoice], period: &DateRange, now: DateTime<Utc>) -> InvoiceReconciliation {
        let mut result = InvoiceReconciliation::default();
        let mut delay_days_sum: i64 = 0;

        for invoice in invoices {
            let status = Self::effective_status(invoice, now);

            if period.contains_date(invoice.issue_date) {
                let bucket = result.by_status.entry(status).or_default();
                bucket.count += 1;
                bucket.amount += invoice.amount;

                if matches!(status, PaymentStatus::Pending | PaymentStatus::Overdue) {
                    result.outstanding_amount += invoice.amount;
                }
            }

            // Atraso só conta para faturas que viraram PAID dentro do período
            if let (PaymentStatus::Paid, Some(paid_date)) = (status, invoice.paid_date) {
                if period.contains_date(paid_date) {
                    result.paid_in_period += 1;
                    result.collected_amount += invoice.amount;
                    delay_days_sum += (paid_date - invoice.issue_date).num_days().max(0);
                }
            }
        }

        if result.paid_in_period > 0 {
            // média arredondada, meio para cima (valores nunca negativos)
            let n = result.paid_in_period;
            result.average_payment_delay_days = (delay_days_sum * 2 + n) / (n * 2);
        }

        result
    }
}
