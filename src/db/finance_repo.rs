// src/db/finance_repo.rs

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    db::store::StoreError,
    models::{finance::Invoice, period::DateRange},
};

#[derive(Clone)]
pub struct FinanceRepository {
    pool: PgPool,
}

impl FinanceRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // =========================================================================
    //  FATURAS (royalties cobrados das franquias)
    // =========================================================================

    /// Traz as linhas cruas: a conciliação de status acontece no RoyaltyLedger,
    /// com o "agora" da requisição.
    pub async fn invoices(
        &self,
        range: DateRange,
        franchise_id: Option<Uuid>,
    ) -> Result<Vec<Invoice>, StoreError> {
        let invoices = sqlx::query_as::<_, Invoice>(
            r#"
            SELECT id, franchise_id, issue_date, due_date, paid_date, amount, status
            FROM invoices
            WHERE ($3::uuid IS NULL OR franchise_id = $3)
              AND (
                    (    (issue_date::timestamp AT TIME ZONE 'UTC') >= $1
                     AND (issue_date::timestamp AT TIME ZONE 'UTC') < $2)
                 OR (    (paid_date::timestamp AT TIME ZONE 'UTC') >= $1
                     AND (paid_date::timestamp AT TIME ZONE 'UTC') < $2)
              )
            ORDER BY issue_date, id
            "#,
        )
            .bind(range.start)
            .bind(range.end)
            .bind(franchise_id)
            .fetch_all(&self.pool)
            .await?;

        Ok(invoices)
    }
}
