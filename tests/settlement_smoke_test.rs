#[macro_use]
extern crate assert_float_eq;

use split_bill_rs::models::{BillStatus, PaymentInfo};
use split_bill_rs::splitter::{collection_progress, summarize_bill};
use split_bill_rs::state::{load_store, save_store, BillStore, MemoryBillStore};
use split_bill_rs::SplitError;

/// Host opens a bill with five items; two participants claim some of them.
fn warung_bill(store: &mut MemoryBillStore) -> (String, Vec<String>) {
    let bill_id = store
        .create_bill("Adzi Bilal", Some("Warung Makan Sederhana"))
        .unwrap();

    let items = vec![
        store.add_item(&bill_id, "Nasi Goreng Spesial", 25000.0, 1).unwrap(),
        store.add_item(&bill_id, "Ayam Bakar", 30000.0, 1).unwrap(),
        store.add_item(&bill_id, "Es Teh Manis", 5000.0, 3).unwrap(),
        store.add_item(&bill_id, "Soto Ayam", 20000.0, 1).unwrap(),
        store.add_item(&bill_id, "Tempe Goreng", 8000.0, 2).unwrap(),
    ];
    store.set_status(&bill_id, BillStatus::Open).unwrap();

    store.assign_item(&items[0], "user-host-1", "Adzi Bilal").unwrap();
    store.assign_item(&items[1], "user-1", "Rina").unwrap();
    store.assign_item(&items[2], "user-host-1", "Adzi Bilal").unwrap();
    store.assign_item(&items[2], "user-1", "Rina").unwrap();
    store.assign_item(&items[4], "user-host-1", "Adzi Bilal").unwrap();
    store.assign_item(&items[4], "user-1", "Rina").unwrap();

    (bill_id, items)
}

fn payment_info() -> PaymentInfo {
    PaymentInfo {
        bank: "BCA".to_string(),
        account: "1234567890".to_string(),
        name: "Adzi Bilal".to_string(),
    }
}

#[test]
fn test_summary_before_everything_is_claimed() {
    let mut store = MemoryBillStore::new();
    let (bill_id, _) = warung_bill(&mut store);

    let details = store.bill_details(&bill_id).unwrap();
    let summary = summarize_bill(&details);

    // 25000 + 30000 + 15000 + 20000 + 16000
    assert_eq!(summary.bill_totals.subtotal, 106000.0);
    assert_float_absolute_eq!(summary.bill_totals.total, 116600.0, 1e-6);

    let adzi = summary.participant("user-host-1").unwrap();
    // 25000 + 15000/2 + 16000/2
    assert_eq!(adzi.totals.subtotal, 40500.0);
    let rina = summary.participant("user-1").unwrap();
    // 30000 + 7500 + 8000
    assert_eq!(rina.totals.subtotal, 45500.0);

    // Soto Ayam is unclaimed.
    assert_eq!(summary.unassigned.len(), 1);
    assert_eq!(summary.unassigned[0].name, "Soto Ayam");
    assert_float_absolute_eq!(
        summary.bill_totals.total - summary.participants_total,
        20000.0 * 1.1,
        1e-6
    );
}

#[test]
fn test_claiming_last_item_balances_the_bill() {
    let mut store = MemoryBillStore::new();
    let (bill_id, items) = warung_bill(&mut store);
    store.assign_item(&items[3], "user-1", "Rina").unwrap();

    let summary = summarize_bill(&store.bill_details(&bill_id).unwrap());
    assert!(summary.is_fully_assigned());
    assert_float_absolute_eq!(summary.participants_total, summary.bill_totals.total, 1e-6);
}

#[test]
fn test_unassign_updates_split() {
    let mut store = MemoryBillStore::new();
    let (bill_id, items) = warung_bill(&mut store);

    store.unassign_item(&items[2], "user-1").unwrap();
    let summary = summarize_bill(&store.bill_details(&bill_id).unwrap());

    let adzi = summary.participant("user-host-1").unwrap();
    // Adzi now carries all three teas.
    assert_eq!(adzi.totals.subtotal, 25000.0 + 15000.0 + 8000.0);
}

#[test]
fn test_full_lifecycle_and_collection() {
    let mut store = MemoryBillStore::new();
    let (bill_id, items) = warung_bill(&mut store);
    store.assign_item(&items[3], "user-1", "Rina").unwrap();

    store.set_status(&bill_id, BillStatus::Review).unwrap();
    assert!(matches!(
        store.unassign_item(&items[0], "user-host-1"),
        Err(SplitError::BillLocked(BillStatus::Review))
    ));

    store.finalize(&bill_id, payment_info()).unwrap();

    let progress = collection_progress(&store.bill_details(&bill_id).unwrap());
    assert_eq!(progress.collected, 0.0);
    assert_eq!(progress.pending_count, 2);

    store.set_paid(&bill_id, "user-1", true).unwrap();
    let progress = collection_progress(&store.bill_details(&bill_id).unwrap());
    // Rina: (30000 + 7500 + 8000 + 20000) * 1.1
    assert_float_absolute_eq!(progress.collected, 72050.0, 1e-6);
    assert_eq!(progress.paid_count, 1);

    store.set_paid(&bill_id, "user-host-1", true).unwrap();
    let progress = collection_progress(&store.bill_details(&bill_id).unwrap());
    assert_float_absolute_eq!(progress.percent, 100.0, 1e-9);
}

#[test]
fn test_state_survives_save_and_load() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("bill_state.json");

    let mut store = MemoryBillStore::new();
    let (bill_id, _) = warung_bill(&mut store);
    store.update_rate(&bill_id, 15.0).unwrap();
    save_store(&path, &store).unwrap();

    let reloaded = load_store(&path).unwrap();
    let before = summarize_bill(&store.bill_details(&bill_id).unwrap());
    let after = summarize_bill(&reloaded.bill_details(&bill_id).unwrap());

    assert_eq!(after.bill_totals, before.bill_totals);
    assert_eq!(after.participants.len(), before.participants.len());
    for (a, b) in after.participants.iter().zip(&before.participants) {
        assert_eq!(a.user_id, b.user_id);
        assert_eq!(a.totals, b.totals);
    }
}

#[test]
fn test_paying_one_bill_leaves_another_pending() {
    let mut store = MemoryBillStore::new();
    let (first, _) = warung_bill(&mut store);
    let (second, _) = warung_bill(&mut store);

    store.set_paid(&first, "user-1", true).unwrap();

    let paid = collection_progress(&store.bill_details(&first).unwrap());
    assert_eq!(paid.paid_count, 1);
    // Rina on the first bill: (30000 + 7500 + 8000) * 1.1
    assert_float_absolute_eq!(paid.collected, 50050.0, 1e-6);

    let other = collection_progress(&store.bill_details(&second).unwrap());
    assert_eq!(other.collected, 0.0);
    assert_eq!(other.paid_count, 0);
    assert_eq!(other.pending_count, 2);

    let summary = summarize_bill(&store.bill_details(&second).unwrap());
    assert!(!summary.participant("user-1").unwrap().has_paid);
}

#[test]
fn test_paid_marks_survive_save_and_load() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("bill_state.json");

    let mut store = MemoryBillStore::new();
    let (first, _) = warung_bill(&mut store);
    let (second, _) = warung_bill(&mut store);
    store.set_paid(&first, "user-1", true).unwrap();
    save_store(&path, &store).unwrap();

    let reloaded = load_store(&path).unwrap();
    assert_eq!(collection_progress(&reloaded.bill_details(&first).unwrap()).paid_count, 1);
    assert_eq!(collection_progress(&reloaded.bill_details(&second).unwrap()).paid_count, 0);
}
