// tests/inventory_tests.rs
mod common;
use common::*;
use rust_decimal_macros::dec;
use serial_test::serial;
use std::sync::Arc;
use storefront::{InventoryLedger, LedgerError};
use uuid::Uuid;

#[tokio::test]
#[serial]
async fn test_reserve_decrements_and_captures_price() {
  setup_tracing();
  let shop = Storefront::new();
  let tv = shop.add_product("OLED TV", dec!(1499.00), 5).await;

  let reservation = shop.products.reserve(tv.id, 3).await.unwrap();

  assert_eq!(reservation.quantity, 3);
  assert_eq!(reservation.unit_price, dec!(1499.00));
  assert_eq!(reservation.remaining, 2);
  assert_eq!(shop.stock_of(tv.id).await, 2);
}

#[tokio::test]
#[serial]
async fn test_reserve_refuses_more_than_available() {
  setup_tracing();
  let shop = Storefront::new();
  let cable = shop.add_product("HDMI cable", dec!(9.99), 2).await;

  match shop.products.reserve(cable.id, 3).await {
    Err(LedgerError::InsufficientStock {
      product_id,
      requested,
      available,
    }) => {
      assert_eq!(product_id, cable.id);
      assert_eq!(requested, 3);
      assert_eq!(available, 2);
    }
    other => panic!("Expected InsufficientStock, got {:?}", other),
  }
  assert_eq!(shop.stock_of(cable.id).await, 2);
}

#[tokio::test]
#[serial]
async fn test_reserve_exact_stock_reaches_zero() {
  setup_tracing();
  let shop = Storefront::new();
  let mouse = shop.add_product("Wireless mouse", dec!(25.00), 4).await;

  shop.products.reserve(mouse.id, 4).await.unwrap();
  assert_eq!(shop.products.available(mouse.id).await.unwrap(), 0);
  assert!(matches!(
    shop.products.reserve(mouse.id, 1).await,
    Err(LedgerError::InsufficientStock { available: 0, .. })
  ));
}

#[tokio::test]
#[serial]
async fn test_unknown_product_is_reported() {
  setup_tracing();
  let shop = Storefront::new();
  let ghost = Uuid::new_v4();
  assert!(matches!(
    shop.products.reserve(ghost, 1).await,
    Err(LedgerError::UnknownProduct(id)) if id == ghost
  ));
  assert!(matches!(
    shop.products.release(ghost, 1).await,
    Err(LedgerError::UnknownProduct(_))
  ));
}

#[tokio::test]
#[serial]
async fn test_release_restores_stock() {
  setup_tracing();
  let shop = Storefront::new();
  let ssd = shop.add_product("1TB NVMe SSD", dec!(89.90), 10).await;

  let reservation = shop.products.reserve(ssd.id, 7).await.unwrap();
  assert_eq!(shop.stock_of(ssd.id).await, 3);
  storefront::inventory::release_reservation(shop.products.as_ref(), &reservation)
    .await
    .unwrap();
  assert_eq!(shop.stock_of(ssd.id).await, 10);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
#[serial]
async fn test_concurrent_reservations_never_oversell() {
  setup_tracing();
  let shop = Storefront::new();
  let gpu = shop.add_product("Graphics card", dec!(699.00), 10).await;
  let gpu_id = gpu.id;
  let ledger: Arc<dyn InventoryLedger> = shop.products.clone();

  let mut tasks = Vec::new();
  for _ in 0..64 {
    let ledger = ledger.clone();
    tasks.push(tokio::spawn(async move { ledger.reserve(gpu_id, 1).await }));
  }

  let mut granted = 0;
  let mut refused = 0;
  for task in tasks {
    match task.await.unwrap() {
      Ok(_) => granted += 1,
      Err(LedgerError::InsufficientStock { .. }) => refused += 1,
      Err(other) => panic!("unexpected ledger error: {other}"),
    }
  }

  assert_eq!(granted, 10);
  assert_eq!(refused, 54);
  assert_eq!(shop.stock_of(gpu.id).await, 0);
}
