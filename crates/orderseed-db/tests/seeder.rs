//! End-to-end seeding runs against the in-memory store.

use std::collections::HashMap;

use bson::oid::ObjectId;
use orderseed_core::generator::fake_customer;
use orderseed_core::{
    CoreError, Customer, Order, OrderStatus, Product, SeedPlan, ShippingStatus,
    MAX_DETAIL_QUANTITY, MAX_ORDER_DETAILS,
};
use orderseed_db::{Database, DbError, FindQuery, Seeder};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn small_plan() -> SeedPlan {
    SeedPlan {
        customers: 20,
        products: 15,
        stores: 5,
        orders_per_batch: 40,
        order_batches: 3,
        insert_chunk_size: 7,
        ..SeedPlan::default()
    }
}

async fn seeded(plan: SeedPlan) -> (Database, Seeder) {
    let db = Database::in_memory();
    let mut seeder = Seeder::with_seed(db.clone(), plan, 7);
    seeder.run().await.unwrap();
    (db, seeder)
}

#[tokio::test]
async fn test_run_writes_planned_counts() {
    let db = Database::in_memory();
    let mut seeder = Seeder::with_seed(db.clone(), small_plan(), 1);
    let summary = seeder.run().await.unwrap();

    assert_eq!(summary.customers, 20);
    assert_eq!(summary.products, 15);
    assert_eq!(summary.stores, 5);
    assert_eq!(summary.orders, 120);
    assert_eq!(summary.indexes.len(), 2);

    assert_eq!(db.customers().estimated_count().await.unwrap(), 20);
    assert_eq!(db.products().estimated_count().await.unwrap(), 15);
    assert_eq!(db.stores().estimated_count().await.unwrap(), 5);
    assert_eq!(db.orders().estimated_count().await.unwrap(), 120);
}

#[tokio::test]
async fn test_reports_follow_each_batch() {
    let db = Database::in_memory();
    let mut seeder = Seeder::with_seed(db, small_plan(), 3);
    let summary = seeder.run().await.unwrap();

    let totals: Vec<u64> = summary.batches.iter().map(|r| r.total_documents).collect();
    assert_eq!(totals, vec![40, 80, 120]);
    let batches: Vec<usize> = summary.batches.iter().map(|r| r.batch).collect();
    assert_eq!(batches, vec![1, 2, 3]);
    assert!(summary.batches.iter().all(|r| r.query1_returned <= 10 && r.query2_returned <= 10));
}

#[tokio::test]
async fn test_second_run_keeps_cardinalities() {
    let db = Database::in_memory();
    let mut seeder = Seeder::with_seed(db.clone(), small_plan(), 2);
    seeder.run().await.unwrap();
    seeder.run().await.unwrap();

    assert_eq!(db.customers().estimated_count().await.unwrap(), 20);
    assert_eq!(db.orders().estimated_count().await.unwrap(), 120);

    let indexes = db.orders().index_names().await.unwrap();
    assert_eq!(indexes.len(), 3);
}

#[tokio::test]
async fn test_order_details_stay_in_range() {
    let (db, _) = seeded(small_plan()).await;
    let orders = db.orders().find(FindQuery::all()).await.unwrap();

    assert_eq!(orders.len(), 120);
    for order in &orders {
        assert!((1..=MAX_ORDER_DETAILS).contains(&order.details.len()));
        for detail in &order.details {
            assert!((1..=MAX_DETAIL_QUANTITY).contains(&detail.quantity));
        }
    }
}

#[tokio::test]
async fn test_embedded_entities_match_inserted_ones() {
    let (db, _) = seeded(small_plan()).await;

    let customers: HashMap<ObjectId, Customer> = db
        .customers()
        .find(FindQuery::all())
        .await
        .unwrap()
        .into_iter()
        .map(|c| (c.id, c))
        .collect();
    let products: HashMap<ObjectId, Product> = db
        .products()
        .find(FindQuery::all())
        .await
        .unwrap()
        .into_iter()
        .map(|p| (p.id, p))
        .collect();
    let stores: HashMap<_, _> = db
        .stores()
        .find(FindQuery::all())
        .await
        .unwrap()
        .into_iter()
        .map(|s| (s.id, s))
        .collect();

    for order in db.orders().find(FindQuery::all()).await.unwrap() {
        let customer = &customers[&order.customer.id];
        assert_eq!(order.customer, customer.snapshot());
        assert_eq!(order.shipping_address, customer.address);
        assert_eq!(order.store, stores[&order.store.id].snapshot());
        for detail in &order.details {
            assert_eq!(detail.product, products[&detail.product.id]);
        }
    }
}

#[tokio::test]
async fn test_last_orders_by_email_sorted_and_limited() {
    let plan = SeedPlan {
        customers: 2,
        products: 3,
        stores: 1,
        orders_per_batch: 30,
        order_batches: 1,
        ..SeedPlan::default()
    };
    let (db, _) = seeded(plan).await;

    let sample = db.orders().sample(1).await.unwrap();
    let email = sample[0].customer.emails[0].email.clone();

    let found = db.orders().last_orders_by_email(&email, 10).await.unwrap();
    assert!(!found.is_empty());
    assert!(found.len() <= 10);
    assert!(found
        .iter()
        .all(|o| o.customer.emails.iter().any(|e| e.email == email)));
    assert!(found.windows(2).all(|w| w[0].order_date >= w[1].order_date));
}

fn delivered_with_any(order: &Order, names: &[String]) -> bool {
    order.order_status == OrderStatus::Shipped
        && order.shipping_status == ShippingStatus::Delivered
        && order.details.iter().any(|d| names.contains(&d.product.name))
}

fn assert_latest_delivered(found: &[Order], all: &[Order], names: &[String], limit: usize) {
    let expected: Vec<&Order> = all.iter().filter(|o| delivered_with_any(o, names)).collect();
    assert_eq!(found.len(), expected.len().min(limit));
    assert!(found.iter().all(|o| delivered_with_any(o, names)));
    assert!(found.windows(2).all(|w| w[0].delivery_date >= w[1].delivery_date));

    if let Some(oldest) = found.last() {
        let skipped = expected
            .iter()
            .filter(|o| !found.iter().any(|f| f.id == o.id));
        assert!(skipped.into_iter().all(|o| o.delivery_date <= oldest.delivery_date));
    }
}

#[tokio::test]
async fn test_delivered_orders_for_products_filters_and_sorts() {
    let plan = SeedPlan {
        customers: 50,
        products: 400,
        stores: 10,
        orders_per_batch: 2_000,
        order_batches: 1,
        insert_chunk_size: 500,
        ..SeedPlan::default()
    };
    let (db, seeder) = seeded(plan).await;
    let all = db.orders().find(FindQuery::all()).await.unwrap();

    let pies = seeder.plan().probe_products.clone();
    let found = db.orders().delivered_orders_for_products(&pies, 10).await.unwrap();
    assert_latest_delivered(&found, &all, &pies, 10);

    let delivered = all
        .iter()
        .find(|o| {
            o.order_status == OrderStatus::Shipped
                && o.shipping_status == ShippingStatus::Delivered
        })
        .unwrap();
    let names = vec![delivered.details[0].product.name.clone()];
    let found = db.orders().delivered_orders_for_products(&names, 10).await.unwrap();
    assert!(!found.is_empty());
    assert_latest_delivered(&found, &all, &names, 10);

    let none = db
        .orders()
        .delivered_orders_for_products(&["No Such Product".to_string()], 10)
        .await
        .unwrap();
    assert!(none.is_empty());
}

#[tokio::test]
async fn test_verify_passes_after_run() {
    let (_, seeder) = seeded(small_plan()).await;
    let report = seeder.verify().await.unwrap();

    assert_eq!(report.customers, 20);
    assert_eq!(report.orders, 120);
    assert_eq!(report.orders_checked, 120);
}

#[tokio::test]
async fn test_verify_detects_extra_documents() {
    let (db, seeder) = seeded(small_plan()).await;
    let extra = fake_customer(&mut StdRng::seed_from_u64(99));
    db.customers().insert_all(&[extra], 10).await.unwrap();

    let err = seeder.verify().await.unwrap_err();
    assert!(matches!(
        err,
        DbError::CountMismatch { expected: 20, actual: 21, .. }
    ));
}

#[tokio::test]
async fn test_orders_without_stores_fail() {
    let plan = SeedPlan {
        stores: 0,
        orders_per_batch: 5,
        order_batches: 1,
        ..small_plan()
    };
    let mut seeder = Seeder::with_seed(Database::in_memory(), plan, 4);

    let err = seeder.run().await.unwrap_err();
    assert!(matches!(err, DbError::Core(CoreError::EmptyPool { .. })));
}

#[tokio::test]
async fn test_same_seed_same_values() {
    let (a, _) = seeded(small_plan()).await;
    let (b, _) = seeded(small_plan()).await;

    let names = |products: Vec<Product>| -> Vec<String> {
        products.into_iter().map(|p| p.name).collect()
    };
    assert_eq!(
        names(a.products().find(FindQuery::all()).await.unwrap()),
        names(b.products().find(FindQuery::all()).await.unwrap())
    );
}
