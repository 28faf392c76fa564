//! Loading the order file into a snapshot

mod common;

use std::sync::Arc;

use common::{Fixture, LEGACY_ORDERS};
use orderbook::traits::MockOrderStore;
use orderbook::{DatasetLoader, OrderbookError, mask_phone_number};
use shared::RowId;

#[tokio::test]
async fn test_legacy_file_gets_positional_ids() {
    let fixture = Fixture::with_contents(LEGACY_ORDERS);
    let table = fixture.loader.load().await;

    assert_eq!(table.len(), 4);
    let ids: Vec<RowId> = table.iter().map(|o| o.row_id).collect();
    // date order; the unreadable date sorts last
    assert_eq!(ids, vec![RowId(1), RowId(3), RowId(0), RowId(2)]);
    assert_eq!(table.get(RowId(2)).unwrap().customer_name, "Bala");
}

#[tokio::test]
async fn test_invalid_date_row_is_kept_last() {
    let fixture = Fixture::with_contents(LEGACY_ORDERS);
    let table = fixture.loader.load().await;

    assert_eq!(table.valid().count(), 3);
    let invalid: Vec<_> = table.invalid().collect();
    assert_eq!(invalid.len(), 1);
    assert_eq!(invalid[0].customer_name, "Bala");
    assert_eq!(table.orders().last().unwrap().customer_name, "Bala");
}

#[tokio::test]
async fn test_revenue_is_backfilled_but_not_persisted() {
    let fixture = Fixture::with_contents(LEGACY_ORDERS);
    let before = fixture.bytes();
    let table = fixture.loader.load().await;

    let tahlil = table.get(RowId(1)).unwrap();
    assert_eq!(tahlil.revenue, 1200.0);
    assert!(tahlil.revenue_estimated);

    let packet = table.get(RowId(3)).unwrap();
    assert_eq!(packet.revenue, 2000.0);

    let wedding = table.get(RowId(0)).unwrap();
    assert_eq!(wedding.revenue, 5400.0);
    assert!(!wedding.revenue_estimated);

    assert_eq!(fixture.bytes(), before, "loading must not write");
}

#[tokio::test]
async fn test_counts_are_never_missing() {
    let fixture = Fixture::with_contents(LEGACY_ORDERS);
    let table = fixture.loader.load().await;
    assert!(table.iter().all(|o| o.pax >= 0 && o.staff_count >= 0));
    assert!(table.iter().all(|o| o.revenue >= 0.0));
}

#[tokio::test]
async fn test_extra_columns_are_carried() {
    let fixture = Fixture::with_contents(LEGACY_ORDERS);
    let table = fixture.loader.load().await;
    let order = table.get(RowId(0)).unwrap();
    assert_eq!(order.extra.get("Deposit_Paid").map(String::as_str), Some("yes"));
    assert_eq!(order.dishes(), vec!["Nasi Minyak", "Ayam Masak Merah"]);
}

#[tokio::test]
async fn test_missing_file_loads_empty() {
    let fixture = Fixture::missing();
    let table = fixture.loader.load().await;
    assert!(table.is_empty());
}

#[tokio::test]
async fn test_header_only_file_loads_empty() {
    let fixture = Fixture::with_contents("Date,Customer_Name,Pax\n");
    let table = fixture.loader.load().await;
    assert!(table.is_empty());
}

#[tokio::test]
async fn test_store_failure_loads_empty() {
    let mut store = MockOrderStore::new();
    store.expect_read_table().returning(|| {
        Err(OrderbookError::StoreRead {
            path: "orders.csv".to_string(),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        })
    });
    store.expect_location().returning(|| "orders.csv".to_string());

    let loader = DatasetLoader::new(Arc::new(store));
    assert!(loader.load().await.is_empty());
}

#[test]
fn test_phone_masking() {
    assert_eq!(mask_phone_number("0123456789"), "******6789");
    assert_eq!(mask_phone_number("6789"), "6789");
    assert_eq!(mask_phone_number(""), "");
}

#[tokio::test]
async fn test_out_of_range_ids_are_renumbered() {
    let fixture = Fixture::with_contents(
        "Date,Customer_Name,Order_ID\n\
         2025-01-01,a,18446744073709551615\n\
         2025-01-02,b,\n\
         2025-01-03,c,1e30\n\
         2025-01-04,d,2\n",
    );
    let table = fixture.loader.load().await;

    let ids: Vec<RowId> = table.iter().map(|o| o.row_id).collect();
    assert_eq!(ids, vec![RowId(3), RowId(4), RowId(5), RowId(2)]);
}

#[tokio::test]
async fn test_create_after_out_of_range_id() {
    let fixture = Fixture::with_contents("Date,Customer_Name,Order_ID\n2025-01-01,a,18446744073709551615\n");
    let draft = shared::OrderDraft::blank(chrono::NaiveDate::from_ymd_opt(2025, 2, 1).unwrap());
    let outcome = fixture.gateway.create(&draft).await;
    assert!(outcome.success);
    assert_eq!(outcome.row_id, Some(RowId(1)));

    let table = fixture.loader.load().await;
    assert_eq!(table.get(RowId(0)).unwrap().customer_name, "a");
}
