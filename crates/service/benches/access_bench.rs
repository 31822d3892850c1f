use criterion::{criterion_group, criterion_main, Criterion};
use rust_decimal::Decimal;
use std::sync::Arc;
use uuid::Uuid;

use models::product;
use service::access::repository::mock::MockBindingRepository;
use service::access::{visible_scope, AccessService, Identity, Principal};

fn products(companies: &[Uuid], n: usize) -> Vec<product::Model> {
    (0..n)
        .map(|i| product::Model {
            id: Uuid::new_v4(),
            name: format!("p{i}"),
            company_id: companies[i % companies.len()],
            category_id: Uuid::nil(),
            description: String::new(),
            price: Decimal::ZERO,
            image_url: None,
            active: true,
        })
        .collect()
}

fn bench_scope_filter(c: &mut Criterion) {
    let companies: Vec<Uuid> = (0..50).map(|_| Uuid::new_v4()).collect();
    let rows = products(&companies, 10_000);
    let principal = Principal::CompanyUser { user_id: Uuid::new_v4(), company_id: companies[7] };

    c.bench_function("scope_filter_10k_products", |b| {
        b.iter(|| visible_scope(&principal).filter(rows.iter().cloned()).len());
    });
}

fn bench_resolve(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let svc = AccessService::new(Arc::new(MockBindingRepository::default()));
    let admin = Principal::Superuser { user_id: Uuid::new_v4() };
    let who = Identity { user_id: Uuid::new_v4(), is_active: true, is_superuser: false };
    rt.block_on(svc.bind(&admin, who.user_id, Uuid::new_v4())).unwrap();

    c.bench_function("resolve_bound_principal", |b| {
        b.iter(|| rt.block_on(svc.resolve(Some(&who))).unwrap());
    });
}

criterion_group!(benches, bench_scope_filter, bench_resolve);
criterion_main!(benches);
