use std::collections::HashMap;

use criterion::{Criterion, criterion_group, criterion_main};
use domain::{Address, Grade, Member, Money, Order, OrderItem, Pay, PayMethod, Product, ProductId};

fn fixture() -> (Member, HashMap<ProductId, Product>) {
    let member = Member::new("Bench", Grade::Gold).unwrap();
    let mut catalog = HashMap::new();
    for i in 0..10 {
        let product = Product::register(
            format!("SKU-{i:03}"),
            format!("Product {i}"),
            Money::new(10_000),
            u32::MAX,
        )
        .unwrap();
        catalog.insert(product.id().clone(), product);
    }
    (member, catalog)
}

fn create_order(member: &Member, catalog: &mut HashMap<ProductId, Product>) -> Order {
    let items: Vec<OrderItem> = (0..10)
        .map(|i| {
            let product = catalog.get_mut(&ProductId::new(format!("SKU-{i:03}"))).unwrap();
            OrderItem::create(product, 2).unwrap()
        })
        .collect();
    Order::create(member, items).unwrap()
}

fn bench_create_order(c: &mut Criterion) {
    let (member, mut catalog) = fixture();

    c.bench_function("order/create_with_ten_items", |b| {
        b.iter(|| create_order(&member, &mut catalog));
    });
}

fn bench_full_lifecycle(c: &mut Criterion) {
    let (member, mut catalog) = fixture();
    let address = Address::new("04524", "Seoul", "Jung-gu", "100 Sejong-daero", None).unwrap();

    c.bench_function("order/full_lifecycle", |b| {
        b.iter(|| {
            let mut order = create_order(&member, &mut catalog);
            let amount = order.amount().final_amount();
            order.process_payment(Pay::new(PayMethod::Card, amount)).unwrap();
            order
                .prepare_delivery(&member, Some(address.clone()))
                .unwrap();
            order.start_delivery("TRACK-1", None).unwrap();
            order.complete_delivery(None).unwrap();
            order
        });
    });
}

fn bench_cancel(c: &mut Criterion) {
    let (member, mut catalog) = fixture();

    c.bench_function("order/cancel_restores_stock", |b| {
        b.iter(|| {
            let mut order = create_order(&member, &mut catalog);
            order.cancel(&mut catalog).unwrap();
            order
        });
    });
}

criterion_group!(
    benches,
    bench_create_order,
    bench_full_lifecycle,
    bench_cancel
);
criterion_main!(benches);
