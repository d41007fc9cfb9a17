//! PostgreSQL integration tests
//!
//! These tests use a shared PostgreSQL container for efficiency.
//! Run with:
//!
//! ```bash
//! cargo test -p order-store --test postgres_integration -- --test-threads=1
//! ```

use std::sync::Arc;

use order_store::{
    Item, ItemCatalog, ItemId, NewOrder, OrderId, OrderLine, OrderQuery, OrderRepository,
    OrderRepositoryExt, OrderStatus, PostgresStore, StoreError,
};
use rust_decimal::Decimal;
use sqlx::PgPool;
use testcontainers::{ContainerAsync, runners::AsyncRunner};
use testcontainers_modules::postgres::Postgres;
use tokio::sync::OnceCell;

/// Shared container info - container stays alive for all tests
struct ContainerInfo {
    #[allow(dead_code)] // Container must stay alive for tests
    container: ContainerAsync<Postgres>,
    connection_string: String,
}

/// Global shared container
static CONTAINER: OnceCell<Arc<ContainerInfo>> = OnceCell::const_new();

async fn get_container_info() -> Arc<ContainerInfo> {
    CONTAINER
        .get_or_init(|| async {
            let container = Postgres::default().start().await.unwrap();

            let host = container.get_host().await.unwrap();
            let port = container.get_host_port_ipv4(5432).await.unwrap();

            let connection_string =
                format!("postgres://postgres:postgres@{}:{}/postgres", host, port);

            // Create a temporary pool just for migrations
            let temp_pool = PgPool::connect(&connection_string).await.unwrap();

            // Run migrations using raw_sql to execute multiple statements
            sqlx::raw_sql(include_str!("../../../migrations/001_create_cafe_tables.sql"))
                .execute(&temp_pool)
                .await
                .unwrap();

            temp_pool.close().await;

            Arc::new(ContainerInfo {
                container,
                connection_string,
            })
        })
        .await
        .clone()
}

/// Get a fresh store with its own pool and cleared tables
async fn get_test_store() -> PostgresStore {
    let info = get_container_info().await;

    // Create a fresh pool for each test to avoid connection issues
    let pool = sqlx::postgres::PgPoolOptions::new()
        .max_connections(5)
        .connect(&info.connection_string)
        .await
        .unwrap();

    // Clear tables for test isolation
    sqlx::query("TRUNCATE TABLE order_items, orders, items RESTART IDENTITY")
        .execute(&pool)
        .await
        .unwrap();

    PostgresStore::new(pool)
}

async fn seed_menu(store: &PostgresStore) -> (Item, Item) {
    let coffee = store
        .insert_item("Кофе", Decimal::new(150, 0))
        .await
        .unwrap();
    let cake = store
        .insert_item("Торт", Decimal::new(250, 0))
        .await
        .unwrap();
    (coffee, cake)
}

fn new_order(table_number: i32, lines: &[(&Item, u32)]) -> NewOrder {
    NewOrder::new(
        table_number,
        lines
            .iter()
            .map(|(item, count)| OrderLine::new((*item).clone(), *count))
            .collect(),
    )
}

#[tokio::test]
async fn catalog_lists_and_resolves_items() {
    let store = get_test_store().await;
    let (coffee, cake) = seed_menu(&store).await;

    assert_eq!(coffee.price.to_string(), "150.00");

    let items = store.list_items().await.unwrap();
    assert_eq!(items, vec![coffee.clone(), cake]);

    let found = store
        .get_items(&[coffee.id, ItemId::new(999)])
        .await
        .unwrap();
    assert_eq!(found, vec![coffee]);
}

#[tokio::test]
async fn create_and_load_order() {
    let store = get_test_store().await;
    let (coffee, cake) = seed_menu(&store).await;

    let created = store
        .create(new_order(1, &[(&coffee, 1), (&cake, 2)]))
        .await
        .unwrap();

    assert_eq!(created.status, OrderStatus::Pending);
    assert_eq!(created.table_number, 1);
    assert_eq!(created.total_price().to_string(), "650.00");

    let loaded = store.get_by_id(created.id).await.unwrap().unwrap();
    assert_eq!(loaded.lines, created.lines);
    assert_eq!(loaded.total_price(), created.total_price());
}

#[tokio::test]
async fn create_is_atomic_when_a_line_fails() {
    let store = get_test_store().await;
    let (coffee, _) = seed_menu(&store).await;
    let ghost = Item::new(999, "Призрак", Decimal::new(10, 0));

    let result = store
        .create(new_order(1, &[(&coffee, 1), (&ghost, 1)]))
        .await;

    assert!(matches!(result, Err(StoreError::Database(_))));
    assert_eq!(store.order_count().await.unwrap(), 0);
}

#[tokio::test]
async fn list_orders_newest_first_with_filters() {
    let store = get_test_store().await;
    let (coffee, cake) = seed_menu(&store).await;

    let first = store
        .create(new_order(1, &[(&coffee, 1), (&cake, 2)]))
        .await
        .unwrap();
    let second = store
        .create(new_order(2, &[(&coffee, 2)]))
        .await
        .unwrap();
    store
        .update_status(second.id, OrderStatus::Ready)
        .await
        .unwrap();

    let all = store.list_filtered(OrderQuery::new()).await.unwrap();
    let ids: Vec<_> = all.iter().map(|o| o.id).collect();
    assert_eq!(ids, vec![second.id, first.id]);

    let ready = store
        .list_filtered(OrderQuery::for_status(OrderStatus::Ready))
        .await
        .unwrap();
    assert_eq!(ready.len(), 1);
    assert_eq!(ready[0].total_price().to_string(), "300.00");

    let searched = store
        .list_filtered(OrderQuery::new().search("Готово 2"))
        .await
        .unwrap();
    assert_eq!(searched.len(), 1);
    assert_eq!(searched[0].id, second.id);

    let by_table = store
        .list_filtered(OrderQuery::new().search("1"))
        .await
        .unwrap();
    assert_eq!(by_table.len(), 1);
    assert_eq!(by_table[0].id, first.id);
}

#[tokio::test]
async fn searched_orders_keep_their_lines() {
    let store = get_test_store().await;
    let (coffee, cake) = seed_menu(&store).await;

    let matching = store
        .create(new_order(7, &[(&coffee, 1), (&cake, 2)]))
        .await
        .unwrap();
    for table_number in 8..12 {
        store
            .create(new_order(table_number, &[(&cake, 1)]))
            .await
            .unwrap();
    }

    let found = store
        .list_filtered(OrderQuery::new().search("7 ожидании"))
        .await
        .unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].id, matching.id);
    assert_eq!(found[0].lines, matching.lines);
    assert_eq!(found[0].total_price().to_string(), "650.00");

    let none = store
        .list_filtered(OrderQuery::new().search("99"))
        .await
        .unwrap();
    assert!(none.is_empty());
}

#[tokio::test]
async fn insert_item_rejects_non_positive_price() {
    let store = get_test_store().await;

    let result = store.insert_item("Вода", Decimal::ZERO).await;
    assert!(matches!(result, Err(StoreError::InvalidItem(_))));
    assert!(store.list_items().await.unwrap().is_empty());
}

#[tokio::test]
async fn update_status_round_trips_every_label() {
    let store = get_test_store().await;
    let (coffee, _) = seed_menu(&store).await;
    let order = store.create(new_order(5, &[(&coffee, 1)])).await.unwrap();

    for status in [OrderStatus::Paid, OrderStatus::Pending, OrderStatus::Ready] {
        store.update_status(order.id, status).await.unwrap();
        let loaded = store.get_by_id(order.id).await.unwrap().unwrap();
        assert_eq!(loaded.status, status);
    }
}

#[tokio::test]
async fn update_missing_order_fails() {
    let store = get_test_store().await;

    let result = store
        .update_status(OrderId::new(12345), OrderStatus::Ready)
        .await;

    assert!(matches!(result, Err(StoreError::OrderNotFound(_))));
}

#[tokio::test]
async fn delete_cascades_to_lines() {
    let store = get_test_store().await;
    let (coffee, cake) = seed_menu(&store).await;
    let order = store
        .create(new_order(3, &[(&coffee, 1), (&cake, 1)]))
        .await
        .unwrap();

    store.delete(order.id).await.unwrap();

    assert!(!store.order_exists(order.id).await.unwrap());
    let remaining: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM order_items")
        .fetch_one(store.pool())
        .await
        .unwrap();
    assert_eq!(remaining, 0);

    assert!(matches!(
        store.delete(order.id).await,
        Err(StoreError::OrderNotFound(_))
    ));
}
