//! `PostgreSQL` backend for [`ListStore`].
//!
//! Member and item arrays are updated with single statements so that
//! add-to-set, pull and push are atomic per list.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use sqlx::types::Json;

use shopping_list_core::ListId;

use super::{ListStore, StoreError};
use crate::models::{Item, Member, NewShoppingList, ShoppingList};

const COLUMNS: &str = "id, title, description, owner_id, members, items, is_archived, created_at";

/// Store backed by the `shopping.list` table.
#[derive(Clone)]
pub struct PgListStore {
    pool: PgPool,
}

impl PgListStore {
    /// Create a store over an existing pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Raw row as stored.
#[derive(sqlx::FromRow)]
struct ListRow {
    id: ListId,
    title: String,
    description: String,
    owner_id: String,
    members: Json<serde_json::Value>,
    items: Json<serde_json::Value>,
    is_archived: bool,
    created_at: DateTime<Utc>,
}

impl TryFrom<ListRow> for ShoppingList {
    type Error = StoreError;

    fn try_from(row: ListRow) -> Result<Self, Self::Error> {
        let members: Vec<Member> = serde_json::from_value(row.members.0).map_err(|e| {
            StoreError::DataCorruption(format!("invalid members in list {}: {e}", row.id))
        })?;
        let items: Vec<Item> = serde_json::from_value(row.items.0).map_err(|e| {
            StoreError::DataCorruption(format!("invalid items in list {}: {e}", row.id))
        })?;

        Ok(Self {
            id: row.id,
            title: row.title,
            description: row.description,
            owner_id: row.owner_id,
            members,
            items,
            is_archived: row.is_archived,
            created_at: row.created_at,
        })
    }
}

fn into_list(row: Option<ListRow>) -> Result<Option<ShoppingList>, StoreError> {
    row.map(ShoppingList::try_from).transpose()
}

#[async_trait]
impl ListStore for PgListStore {
    async fn insert(&self, list: NewShoppingList) -> Result<ShoppingList, StoreError> {
        let row = sqlx::query_as::<_, ListRow>(&format!(
            r"
            INSERT INTO shopping.list (id, title, description, owner_id)
            VALUES ($1, $2, $3, $4)
            RETURNING {COLUMNS}
            "
        ))
        .bind(ListId::generate())
        .bind(&list.title)
        .bind(&list.description)
        .bind(&list.owner_id)
        .fetch_one(&self.pool)
        .await?;

        ShoppingList::try_from(row)
    }

    async fn find_by_id(&self, id: ListId) -> Result<Option<ShoppingList>, StoreError> {
        let row = sqlx::query_as::<_, ListRow>(&format!(
            "SELECT {COLUMNS} FROM shopping.list WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        into_list(row)
    }

    async fn find_for_user(
        &self,
        user_id: &str,
        include_archived: bool,
    ) -> Result<Vec<ShoppingList>, StoreError> {
        let rows = sqlx::query_as::<_, ListRow>(&format!(
            r"
            SELECT {COLUMNS}
            FROM shopping.list
            WHERE (owner_id = $1
                   OR members @> jsonb_build_array(jsonb_build_object('userId', $1::text)))
              AND ($2 OR NOT is_archived)
            ORDER BY created_at DESC
            "
        ))
        .bind(user_id)
        .bind(include_archived)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(ShoppingList::try_from).collect()
    }

    async fn set_archived(
        &self,
        id: ListId,
        archived: bool,
    ) -> Result<Option<ShoppingList>, StoreError> {
        let row = sqlx::query_as::<_, ListRow>(&format!(
            "UPDATE shopping.list SET is_archived = $2 WHERE id = $1 RETURNING {COLUMNS}"
        ))
        .bind(id)
        .bind(archived)
        .fetch_optional(&self.pool)
        .await?;

        into_list(row)
    }

    async fn delete(&self, id: ListId) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM shopping.list WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn save(&self, list: &ShoppingList) -> Result<bool, StoreError> {
        let result = sqlx::query(
            r"
            UPDATE shopping.list
            SET title = $2, description = $3, members = $4, items = $5, is_archived = $6
            WHERE id = $1
            ",
        )
        .bind(list.id)
        .bind(&list.title)
        .bind(&list.description)
        .bind(Json(serde_json::to_value(&list.members)?))
        .bind(Json(serde_json::to_value(&list.items)?))
        .bind(list.is_archived)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn add_member(
        &self,
        id: ListId,
        user_id: &str,
    ) -> Result<Option<ShoppingList>, StoreError> {
        let row = sqlx::query_as::<_, ListRow>(&format!(
            r"
            UPDATE shopping.list
            SET members = CASE
                WHEN members @> jsonb_build_array(jsonb_build_object('userId', $2::text))
                    THEN members
                ELSE members || jsonb_build_array(jsonb_build_object('userId', $2::text))
            END
            WHERE id = $1
            RETURNING {COLUMNS}
            "
        ))
        .bind(id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        into_list(row)
    }

    async fn remove_member(
        &self,
        id: ListId,
        user_id: &str,
    ) -> Result<Option<ShoppingList>, StoreError> {
        let row = sqlx::query_as::<_, ListRow>(&format!(
            r"
            UPDATE shopping.list
            SET members = COALESCE(
                (SELECT jsonb_agg(m ORDER BY ord)
                 FROM jsonb_array_elements(members) WITH ORDINALITY AS t(m, ord)
                 WHERE m->>'userId' IS DISTINCT FROM $2),
                '[]'::jsonb)
            WHERE id = $1
            RETURNING {COLUMNS}
            "
        ))
        .bind(id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        into_list(row)
    }

    async fn push_item(&self, id: ListId, item: &Item) -> Result<bool, StoreError> {
        let result = sqlx::query(
            "UPDATE shopping.list SET items = items || jsonb_build_array($2::jsonb) WHERE id = $1",
        )
        .bind(id)
        .bind(Json(serde_json::to_value(item)?))
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
