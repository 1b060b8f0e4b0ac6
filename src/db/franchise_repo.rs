// src/db/franchise_repo.rs

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    db::store::{FranchiseDirectory, StoreError},
    models::franchise::Franchise,
};

// O diretório de franquias (nomes e taxas de royalty)
#[derive(Clone)]
pub struct FranchiseRepository {
    pool: PgPool,
}

impl FranchiseRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl FranchiseDirectory for FranchiseRepository {
    async fn franchises(&self, franchise_id: Option<Uuid>) -> Result<Vec<Franchise>, StoreError> {
        let franchises = sqlx::query_as::<_, Franchise>(
            r#"
            SELECT id, name, royalty_rate, is_active
            FROM franchises
            WHERE ($1::uuid IS NULL OR id = $1)
            ORDER BY name ASC, id ASC
            "#,
        )
            .bind(franchise_id)
            .fetch_all(&self.pool)
            .await?;

        Ok(franchises)
    }
}
