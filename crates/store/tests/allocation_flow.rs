//! End-to-end allocation flow over the in-memory stores.

use std::sync::Arc;
use std::thread;

use chrono::{Duration, Utc};

use stockbill_allocation::{
    AvailabilityStatus, BillStore, BillingService, BillLineRequest, CommitRequest, Fulfillment,
    RequestedItem,
};
use stockbill_catalog::PriceType;
use stockbill_directory::{Customer, Warehouse};
use stockbill_ledger::StockUnit;
use stockbill_store::{InMemoryBillStore, InMemoryDirectory, InMemoryStockLedger};

struct World {
    ledger: Arc<InMemoryStockLedger>,
    bills: Arc<InMemoryBillStore>,
    service: BillingService,
    customer: Customer,
    main: Warehouse,
    other: Warehouse,
}

fn world() -> World {
    let ledger = Arc::new(InMemoryStockLedger::new());
    let directory = Arc::new(InMemoryDirectory::new());
    let bills = Arc::new(InMemoryBillStore::new());

    let customer = Customer::new("Acme", "12 Lane", "Pune", "MH", None, None, Utc::now()).unwrap();
    directory.insert_customer(customer.clone());

    let main = Warehouse::new("Main", "addr", "Pune", "MH", Utc::now()).unwrap();
    let other = Warehouse::new("Remote", "addr", "Delhi", "DL", Utc::now()).unwrap();
    directory.insert_warehouse(main.clone());
    directory.insert_warehouse(other.clone());

    // Staggered intake times so allocation order is fixed: 1111 oldest.
    let base = Utc::now() - Duration::minutes(30);
    for (i, code) in ["1111", "1112", "1113"].iter().enumerate() {
        let at = base + Duration::minutes(i as i64);
        ledger.add(StockUnit::new(*code, main.id, &main.name, at).unwrap());
    }
    ledger.add(StockUnit::new("1119", other.id, &other.name, base).unwrap());

    let service = BillingService::new(
        ledger.clone(),
        directory.clone(),
        directory.clone(),
        bills.clone(),
    );

    World { ledger, bills, service, customer, main, other }
}

fn line(code: &str, quantity: u32, price: f64) -> BillLineRequest {
    BillLineRequest {
        code: code.to_string(),
        quantity,
        price,
        master_price: price / 2.0,
    }
}

#[test]
fn availability_reports_counts_and_alternatives() {
    let w = world();
    let results = w
        .service
        .check_availability(
            w.main.id,
            &[RequestedItem { code: "111".to_string(), quantity: 2 }],
        )
        .unwrap();

    assert_eq!(results.len(), 1);
    let r = &results[0];
    assert_eq!(r.available_quantity, 3);
    assert!(r.is_available);
    assert_eq!(r.status, AvailabilityStatus::Available);
    assert_eq!(r.alternatives.len(), 1);
    assert_eq!(r.alternatives[0].warehouse_name, "Remote");
    assert_eq!(r.alternatives[0].available_quantity, 1);

    // Read-only: the ledger is untouched.
    assert_eq!(w.ledger.len(), 4);
}

#[test]
fn full_commit_consumes_exactly_the_requested_quantity() {
    let w = world();
    let outcome = w
        .service
        .commit_bill(CommitRequest {
            customer_id: w.customer.id,
            warehouse_id: w.main.id,
            lines: vec![line("111", 2, 10.0)],
            price_type: PriceType::Regular,
        })
        .unwrap();

    assert_eq!(outcome.fulfillment, Fulfillment::Full);
    assert_eq!(outcome.bill.bill_number.as_str(), "BILL-000001");
    assert_eq!(outcome.bill.total_amount, 20.0);
    assert_eq!(outcome.report.lines[0].deleted_codes, ["1111", "1112"]);

    // Conservation: 2 consumed from Main, Remote untouched.
    assert_eq!(w.ledger.list(Some(w.main.id)).len(), 1);
    assert_eq!(w.ledger.list(Some(w.main.id))[0].code, "1113");
    assert_eq!(w.ledger.list(Some(w.other.id)).len(), 1);

    assert_eq!(w.bills.bills_for_customer(w.customer.id).len(), 1);
}

#[test]
fn short_commit_still_creates_the_bill() {
    let w = world();
    let outcome = w
        .service
        .commit_bill(CommitRequest {
            customer_id: w.customer.id,
            warehouse_id: w.main.id,
            lines: vec![line("111", 5, 10.0)],
            price_type: PriceType::Regular,
        })
        .unwrap();

    assert_eq!(outcome.fulfillment, Fulfillment::Partial);
    assert_eq!(outcome.report.lines[0].requested, 5);
    assert_eq!(outcome.report.lines[0].deleted, 3);
    // The bill still carries requested quantities and pricing.
    assert_eq!(outcome.bill.lines[0].quantity, 5);
    assert_eq!(outcome.bill.total_amount, 50.0);
    assert!(w.ledger.list(Some(w.main.id)).is_empty());
}

#[test]
fn concurrent_commits_never_allocate_the_same_unit() {
    let w = world();
    // 3 matching units in Main; 8 committers ask for 2 each.
    let handles: Vec<_> = (0..8)
        .map(|_| {
            let service = w.service.clone();
            let customer_id = w.customer.id;
            let warehouse_id = w.main.id;
            thread::spawn(move || {
                service
                    .commit_bill(CommitRequest {
                        customer_id,
                        warehouse_id,
                        lines: vec![line("111", 2, 10.0)],
                        price_type: PriceType::Regular,
                    })
                    .unwrap()
            })
        })
        .collect();

    let outcomes: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();

    let total_deleted: u32 = outcomes.iter().map(|o| o.report.total_deleted()).sum();
    assert_eq!(total_deleted, 3);
    assert!(w.ledger.list(Some(w.main.id)).is_empty());

    // No unit appears in two bills.
    let mut consumed: Vec<String> = outcomes
        .iter()
        .flat_map(|o| o.report.lines.iter().flat_map(|l| l.deleted_codes.clone()))
        .collect();
    consumed.sort();
    consumed.dedup();
    assert_eq!(consumed.len(), 3);

    // Every commit produced a bill with a distinct number.
    let mut numbers: Vec<String> = outcomes
        .iter()
        .map(|o| o.bill.bill_number.as_str().to_string())
        .collect();
    numbers.sort();
    numbers.dedup();
    assert_eq!(numbers.len(), 8);
    assert_eq!(w.bills.bills().len(), 8);
}

#[test]
fn warehouses_sorted_partitions_by_customer_location() {
    let w = world();
    let (customer, partition) = w.service.warehouses_sorted(w.customer.id).unwrap();
    assert_eq!(customer.id, w.customer.id);
    assert_eq!(partition.matching.len(), 1);
    assert_eq!(partition.matching[0].name, "Main");
    assert_eq!(partition.non_matching.len(), 1);
    assert_eq!(partition.non_matching[0].name, "Remote");
}
