use std::collections::HashMap;

use async_trait::async_trait;
use rust_decimal::Decimal;
use sqlx::{PgPool, Row, postgres::PgRow};

use crate::{
    Item, ItemId, NewOrder, OrderId, OrderLine, OrderQuery, OrderRecord, OrderStatus, Result,
    StoreError,
    repository::{ItemCatalog, OrderRepository, validate_item_price, validate_new_order},
};

/// PostgreSQL-backed store implementation.
#[derive(Clone)]
pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    /// Creates a new PostgreSQL store.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Gets a reference to the underlying connection pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Runs the database migrations.
    pub async fn run_migrations(&self) -> std::result::Result<(), sqlx::migrate::MigrateError> {
        sqlx::migrate!("../../migrations").run(&self.pool).await
    }

    /// Adds an item to the catalog and returns it with its assigned id.
    ///
    /// Fails with `InvalidItem` if the price is not positive.
    pub async fn insert_item(&self, title: &str, price: Decimal) -> Result<Item> {
        validate_item_price(title, price)?;

        let row = sqlx::query(
            r#"
            INSERT INTO items (title, price)
            VALUES ($1, $2)
            RETURNING id, title, price
            "#,
        )
        .bind(title)
        .bind(crate::model::normalize_price(price))
        .fetch_one(&self.pool)
        .await?;

        Self::row_to_item(&row)
    }

    fn row_to_item(row: &PgRow) -> Result<Item> {
        Ok(Item::new(
            row.try_get::<i64, _>("id")?,
            row.try_get::<String, _>("title")?,
            row.try_get::<Decimal, _>("price")?,
        ))
    }

    fn row_to_order(row: &PgRow, lines: Vec<OrderLine>) -> Result<OrderRecord> {
        let id = OrderId::new(row.try_get("id")?);
        let label: String = row.try_get("status")?;
        let status = label
            .parse::<OrderStatus>()
            .map_err(|_| StoreError::InvalidStatus {
                order_id: id,
                status: label.clone(),
            })?;

        Ok(OrderRecord {
            id,
            table_number: row.try_get("table_number")?,
            status,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
            lines,
        })
    }

    /// Loads the lines of the given orders, grouped by order id.
    async fn load_lines(&self, order_ids: &[i64]) -> Result<HashMap<i64, Vec<OrderLine>>> {
        let rows = sqlx::query(
            r#"
            SELECT oi.order_id, oi.count, i.id, i.title, i.price
            FROM order_items oi
            JOIN items i ON i.id = oi.item_id
            WHERE oi.order_id = ANY($1)
            ORDER BY oi.id ASC
            "#,
        )
        .bind(order_ids)
        .fetch_all(&self.pool)
        .await?;

        let mut lines: HashMap<i64, Vec<OrderLine>> = HashMap::new();
        for row in rows {
            let order_id: i64 = row.try_get("order_id")?;
            let count: i32 = row.try_get("count")?;
            let count = u32::try_from(count).map_err(|_| {
                StoreError::InvalidOrder(format!("Negative count stored for order {order_id}"))
            })?;
            lines
                .entry(order_id)
                .or_default()
                .push(OrderLine::new(Self::row_to_item(&row)?, count));
        }

        Ok(lines)
    }
}

#[async_trait]
impl ItemCatalog for PostgresStore {
    async fn list_items(&self) -> Result<Vec<Item>> {
        let rows = sqlx::query("SELECT id, title, price FROM items ORDER BY id ASC")
            .fetch_all(&self.pool)
            .await?;

        rows.iter().map(Self::row_to_item).collect()
    }

    async fn get_items(&self, ids: &[ItemId]) -> Result<Vec<Item>> {
        let raw_ids: Vec<i64> = ids.iter().map(ItemId::as_i64).collect();
        let rows = sqlx::query(
            r#"
            SELECT id, title, price
            FROM items
            WHERE id = ANY($1)
            ORDER BY id ASC
            "#,
        )
        .bind(&raw_ids[..])
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(Self::row_to_item).collect()
    }
}

#[async_trait]
impl OrderRepository for PostgresStore {
    async fn create(&self, order: NewOrder) -> Result<OrderRecord> {
        validate_new_order(&order)?;

        // Start a transaction
        let mut tx = self.pool.begin().await?;

        let row = sqlx::query(
            r#"
            INSERT INTO orders (table_number, status)
            VALUES ($1, $2)
            RETURNING id, table_number, status, created_at, updated_at
            "#,
        )
        .bind(order.table_number)
        .bind(OrderStatus::Pending.as_str())
        .fetch_one(&mut *tx)
        .await?;

        let order_id: i64 = row.try_get("id")?;

        for line in &order.lines {
            let count = i32::try_from(line.count).map_err(|_| {
                StoreError::InvalidOrder(format!("Count {} is out of range", line.count))
            })?;

            sqlx::query(
                r#"
                INSERT INTO order_items (order_id, item_id, count)
                VALUES ($1, $2, $3)
                "#,
            )
            .bind(order_id)
            .bind(line.item.id.as_i64())
            .bind(count)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        tracing::debug!(order_id, lines = order.lines.len(), "order stored");
        Self::row_to_order(&row, order.lines)
    }

    async fn get_by_id(&self, id: OrderId) -> Result<Option<OrderRecord>> {
        let row: Option<PgRow> = sqlx::query(
            r#"
            SELECT id, table_number, status, created_at, updated_at
            FROM orders
            WHERE id = $1
            "#,
        )
        .bind(id.as_i64())
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(row) => {
                let mut lines = self.load_lines(&[id.as_i64()]).await?;
                let lines = lines.remove(&id.as_i64()).unwrap_or_default();
                Ok(Some(Self::row_to_order(&row, lines)?))
            }
            None => Ok(None),
        }
    }

    async fn list_filtered(&self, query: OrderQuery) -> Result<Vec<OrderRecord>> {
        let rows = sqlx::query(
            r#"
            SELECT id, table_number, status, created_at, updated_at
            FROM orders
            WHERE $1::TEXT IS NULL OR status = $1
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .bind(query.status.map(|status| status.as_str()))
        .fetch_all(&self.pool)
        .await?;

        // The text filter only reads table number and status, so it runs
        // before any lines are fetched
        let mut orders = Vec::with_capacity(rows.len());
        for row in &rows {
            let order = Self::row_to_order(row, Vec::new())?;
            if query.matches(&order) {
                orders.push(order);
            }
        }

        let order_ids: Vec<i64> = orders.iter().map(|order| order.id.as_i64()).collect();
        let mut lines = self.load_lines(&order_ids).await?;
        for order in &mut orders {
            order.lines = lines.remove(&order.id.as_i64()).unwrap_or_default();
        }

        Ok(orders)
    }

    async fn update_status(&self, id: OrderId, status: OrderStatus) -> Result<()> {
        let result = sqlx::query(
            r#"
            UPDATE orders
            SET status = $2, updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(id.as_i64())
        .bind(status.as_str())
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::OrderNotFound(id));
        }
        Ok(())
    }

    async fn delete(&self, id: OrderId) -> Result<()> {
        // order_items rows go with the order through ON DELETE CASCADE
        let result = sqlx::query("DELETE FROM orders WHERE id = $1")
            .bind(id.as_i64())
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::OrderNotFound(id));
        }
        Ok(())
    }
}
