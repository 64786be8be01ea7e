//! Postgres-backed document store (JSONB bodies in a single table)

use async_trait::async_trait;
use serde_json::Value;
use sqlx::{types::Json, Pool, Postgres, Row};
use uuid::Uuid;

use super::{Document, DocumentStore, Filter};
use crate::error::StoreResult;

#[derive(Clone)]
pub struct PgDocumentStore {
    pool: Pool<Postgres>,
}

impl PgDocumentStore {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

/// WHERE fragment for a filter; parameters start at `$2` (`$1` is the collection)
fn filter_clause(filter: &Filter) -> (&'static str, Option<(&'static str, Value)>) {
    match filter {
        Filter::All => ("", None),
        Filter::Eq(field, value) => (" AND body -> $2 = $3", Some((*field, value.clone()))),
        Filter::Contains(field, value) => (
            " AND body -> $2 @> $3",
            Some((*field, Value::Array(vec![value.clone()]))),
        ),
    }
}

fn row_to_document(row: &sqlx::postgres::PgRow) -> Document {
    let Json(body): Json<Value> = row.get("body");
    Document {
        id: row.get("id"),
        body,
    }
}

#[async_trait]
impl DocumentStore for PgDocumentStore {
    async fn find_by_id(&self, collection: &str, id: Uuid) -> StoreResult<Option<Document>> {
        let row = sqlx::query("SELECT id, body FROM documents WHERE collection = $1 AND id = $2")
            .bind(collection)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.as_ref().map(row_to_document))
    }

    async fn find_many(&self, collection: &str, filter: &Filter) -> StoreResult<Vec<Document>> {
        let (clause, param) = filter_clause(filter);
        let query = format!(
            "SELECT id, body FROM documents WHERE collection = $1{} ORDER BY created_at, id",
            clause
        );

        let mut builder = sqlx::query(&query).bind(collection);
        if let Some((field, value)) = param {
            builder = builder.bind(field).bind(Json(value));
        }

        let rows = builder.fetch_all(&self.pool).await?;
        Ok(rows.iter().map(row_to_document).collect())
    }

    async fn count_matching(&self, collection: &str, filter: &Filter) -> StoreResult<u64> {
        let (clause, param) = filter_clause(filter);
        let query = format!(
            "SELECT COUNT(*) FROM documents WHERE collection = $1{}",
            clause
        );

        let mut builder = sqlx::query_scalar::<_, i64>(&query).bind(collection);
        if let Some((field, value)) = param {
            builder = builder.bind(field).bind(Json(value));
        }

        let count = builder.fetch_one(&self.pool).await?;
        Ok(count.max(0) as u64)
    }

    async fn insert(&self, collection: &str, body: Value) -> StoreResult<Document> {
        let row = sqlx::query(
            r#"
            INSERT INTO documents (collection, id, body)
            VALUES ($1, $2, $3)
            RETURNING id, body
            "#,
        )
        .bind(collection)
        .bind(Uuid::new_v4())
        .bind(Json(body))
        .fetch_one(&self.pool)
        .await?;
        Ok(row_to_document(&row))
    }

    async fn update_by_id(&self, collection: &str, id: Uuid, body: Value) -> StoreResult<Option<Document>> {
        let row = sqlx::query(
            r#"
            UPDATE documents SET body = $3, updated_at = NOW()
            WHERE collection = $1 AND id = $2
            RETURNING id, body
            "#,
        )
        .bind(collection)
        .bind(id)
        .bind(Json(body))
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.as_ref().map(row_to_document))
    }

    async fn delete_by_id(&self, collection: &str, id: Uuid) -> StoreResult<bool> {
        let result = sqlx::query("DELETE FROM documents WHERE collection = $1 AND id = $2")
            .bind(collection)
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
