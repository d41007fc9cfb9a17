use criterion::{Criterion, criterion_group, criterion_main};
use domain::order::validate;
use domain::{CreateOrder, Item, LineInput, OrderService};
use order_store::InMemoryStore;
use rust_decimal::Decimal;

fn menu() -> Vec<Item> {
    (1..=20)
        .map(|id| Item::new(id, format!("Позиция {id}"), Decimal::new(100 + id * 10, 0)))
        .collect()
}

fn full_order() -> CreateOrder {
    CreateOrder::new(
        12,
        (1..=10).map(|id| LineInput::new(id * 2, id)).collect(),
    )
}

fn bench_validate_and_price(c: &mut Criterion) {
    let catalog = menu();
    let cmd = full_order();

    c.bench_function("domain/validate_and_price_10_lines", |b| {
        b.iter(|| {
            let validated = validate(&cmd).unwrap();
            validated.price(&catalog).unwrap()
        });
    });
}

fn bench_create_order(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let service = rt.block_on(async {
        let store = InMemoryStore::new();
        for item in menu() {
            store.insert_item(item.title, item.price).await.unwrap();
        }
        OrderService::new(store)
    });

    c.bench_function("domain/create_order_10_lines", |b| {
        b.iter(|| {
            rt.block_on(async { service.create_order(full_order()).await.unwrap() });
        });
    });
}

fn bench_revenue(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let service = rt.block_on(async {
        let store = InMemoryStore::new();
        for item in menu() {
            store.insert_item(item.title, item.price).await.unwrap();
        }
        let service = OrderService::new(store);
        for _ in 0..500 {
            let order = service.create_order(full_order()).await.unwrap();
            service
                .update_status(domain::UpdateOrderStatus::new(order.id, "Готово"))
                .await
                .unwrap();
        }
        service
    });

    c.bench_function("domain/revenue_500_orders", |b| {
        b.iter(|| rt.block_on(async { service.revenue().await.unwrap() }));
    });
}

criterion_group!(
    benches,
    bench_validate_and_price,
    bench_create_order,
    bench_revenue,
);
criterion_main!(benches);
