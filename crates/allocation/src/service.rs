//! `BillingService` — the facade the HTTP layer calls.

use std::sync::Arc;

use chrono::Utc;

use stockbill_core::{CustomerId, DomainError, DomainResult, WarehouseId};
use stockbill_directory::{partition_by_location, Customer, LocationPartition};

use crate::availability::{check_availability, AllocationResult, RequestedItem};
use crate::commit::{commit_bill, CommitOutcome, CommitRequest};
use crate::ports::{BillStore, CustomerLookup, StockLedger, WarehouseLookup};

/// Wires the engine's ports together behind the three public operations.
#[derive(Clone)]
pub struct BillingService {
    ledger: Arc<dyn StockLedger>,
    customers: Arc<dyn CustomerLookup>,
    warehouses: Arc<dyn WarehouseLookup>,
    bills: Arc<dyn BillStore>,
}

impl BillingService {
    pub fn new(
        ledger: Arc<dyn StockLedger>,
        customers: Arc<dyn CustomerLookup>,
        warehouses: Arc<dyn WarehouseLookup>,
        bills: Arc<dyn BillStore>,
    ) -> Self {
        Self { ledger, customers, warehouses, bills }
    }

    /// Read-only availability check. Safe to retry and to run concurrently
    /// with itself.
    pub fn check_availability(
        &self,
        warehouse_id: WarehouseId,
        items: &[RequestedItem],
    ) -> DomainResult<Vec<AllocationResult>> {
        check_availability(self.ledger.as_ref(), self.warehouses.as_ref(), warehouse_id, items)
    }

    /// Consume stock and persist a bill.
    pub fn commit_bill(&self, request: CommitRequest) -> DomainResult<CommitOutcome> {
        commit_bill(
            self.ledger.as_ref(),
            self.customers.as_ref(),
            self.warehouses.as_ref(),
            self.bills.as_ref(),
            request,
            Utc::now(),
        )
    }

    /// Warehouses partitioned by location affinity with the customer.
    pub fn warehouses_sorted(
        &self,
        customer_id: CustomerId,
    ) -> DomainResult<(Customer, LocationPartition)> {
        let customer = self
            .customers
            .customer(customer_id)
            .ok_or_else(DomainError::not_found)?;
        let partition = partition_by_location(&customer, self.warehouses.warehouses());
        Ok((customer, partition))
    }

    pub fn bills(&self) -> &Arc<dyn BillStore> {
        &self.bills
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    use stockbill_catalog::{Prefix, PriceType};
    use stockbill_directory::Warehouse;
    use stockbill_ledger::{select_for_allocation, StockUnit};

    use crate::availability::AvailabilityStatus;
    use crate::bill::{Bill, BillNumber};
    use crate::commit::{BillLineRequest, Fulfillment, LineConsumption};
    use crate::ports::{AlternativeStock, LineDemand};

    // Minimal in-process fakes; the production implementations live in
    // stockbill-store and are covered by that crate's integration tests.
    struct FakeWorld {
        customers: Vec<Customer>,
        warehouses: Vec<Warehouse>,
        units: Mutex<Vec<StockUnit>>,
        bills: Mutex<Vec<Bill>>,
        seq: Mutex<u64>,
    }

    impl FakeWorld {
        fn unit_count(&self) -> usize {
            self.units.lock().unwrap().len()
        }
    }

    impl CustomerLookup for FakeWorld {
        fn customer(&self, id: CustomerId) -> Option<Customer> {
            self.customers.iter().find(|c| c.id == id).cloned()
        }
    }

    impl WarehouseLookup for FakeWorld {
        fn warehouse(&self, id: WarehouseId) -> Option<Warehouse> {
            self.warehouses.iter().find(|w| w.id == id).cloned()
        }

        fn warehouses(&self) -> Vec<Warehouse> {
            self.warehouses.clone()
        }
    }

    impl StockLedger for FakeWorld {
        fn matching_units(&self, warehouse_id: WarehouseId, prefix: &Prefix) -> Vec<StockUnit> {
            let units = self.units.lock().unwrap();
            let in_warehouse: Vec<StockUnit> = units
                .iter()
                .filter(|u| u.warehouse_id == warehouse_id)
                .cloned()
                .collect();
            select_for_allocation(prefix, &in_warehouse, usize::MAX)
                .into_iter()
                .cloned()
                .collect()
        }

        fn matching_elsewhere(&self, exclude: WarehouseId, prefix: &Prefix) -> Vec<AlternativeStock> {
            let units = self.units.lock().unwrap();
            let mut grouped: Vec<AlternativeStock> = Vec::new();
            for unit in units.iter() {
                if unit.warehouse_id == exclude || !prefix.matches(&unit.code) {
                    continue;
                }
                match grouped.iter_mut().find(|g| g.warehouse_id == unit.warehouse_id) {
                    Some(g) => g.available_quantity += 1,
                    None => grouped.push(AlternativeStock {
                        warehouse_id: unit.warehouse_id,
                        warehouse_name: unit.warehouse_name.clone(),
                        available_quantity: 1,
                    }),
                }
            }
            grouped
        }

        fn consume(&self, warehouse_id: WarehouseId, demands: &[LineDemand]) -> Vec<LineConsumption> {
            let mut units = self.units.lock().unwrap();
            let mut report = Vec::with_capacity(demands.len());
            for demand in demands {
                let in_warehouse: Vec<StockUnit> = units
                    .iter()
                    .filter(|u| u.warehouse_id == warehouse_id)
                    .cloned()
                    .collect();
                let selected: Vec<StockUnit> =
                    select_for_allocation(&demand.prefix, &in_warehouse, demand.quantity as usize)
                        .into_iter()
                        .cloned()
                        .collect();
                units.retain(|u| !selected.iter().any(|s| s.id == u.id));
                report.push(LineConsumption {
                    code: demand.code.clone(),
                    prefix: demand.prefix.clone(),
                    requested: demand.quantity,
                    found: selected.len() as u32,
                    deleted: selected.len() as u32,
                    deleted_codes: selected.into_iter().map(|u| u.code).collect(),
                });
            }
            report
        }
    }

    impl BillStore for FakeWorld {
        fn next_bill_number(&self) -> BillNumber {
            let mut seq = self.seq.lock().unwrap();
            *seq += 1;
            BillNumber::from_seq(*seq)
        }

        fn insert(&self, bill: Bill) {
            self.bills.lock().unwrap().push(bill);
        }

        fn bill(&self, id: stockbill_core::BillId) -> Option<Bill> {
            self.bills.lock().unwrap().iter().find(|b| b.id == id).cloned()
        }

        fn bills(&self) -> Vec<Bill> {
            self.bills.lock().unwrap().clone()
        }

        fn bills_for_customer(&self, customer_id: CustomerId) -> Vec<Bill> {
            self.bills
                .lock()
                .unwrap()
                .iter()
                .filter(|b| b.customer_id == customer_id)
                .cloned()
                .collect()
        }
    }

    fn world() -> (Arc<FakeWorld>, BillingService, CustomerId, WarehouseId, WarehouseId) {
        let customer = Customer::new("Cust", "addr", "Pune", "MH", None, None, Utc::now()).unwrap();
        let w1 = Warehouse::new("W1", "addr", "Pune", "MH", Utc::now()).unwrap();
        let w2 = Warehouse::new("W2", "addr", "Delhi", "DL", Utc::now()).unwrap();
        let customer_id = customer.id;
        let (w1_id, w2_id) = (w1.id, w2.id);

        let mut units = Vec::new();
        for (i, code) in ["1111", "1112", "1113"].iter().enumerate() {
            units.push(
                StockUnit::new(
                    *code,
                    w1_id,
                    "W1",
                    Utc::now() - chrono::Duration::seconds(100 - i as i64),
                )
                .unwrap(),
            );
        }
        units.push(StockUnit::new("1119", w2_id, "W2", Utc::now()).unwrap());

        let world = Arc::new(FakeWorld {
            customers: vec![customer],
            warehouses: vec![w1, w2],
            units: Mutex::new(units),
            bills: Mutex::new(Vec::new()),
            seq: Mutex::new(0),
        });
        let service = BillingService::new(
            world.clone(),
            world.clone(),
            world.clone(),
            world.clone(),
        );
        (world, service, customer_id, w1_id, w2_id)
    }

    fn request(items: &[(u32, f64)], customer_id: CustomerId, warehouse_id: WarehouseId) -> CommitRequest {
        CommitRequest {
            customer_id,
            warehouse_id,
            lines: items
                .iter()
                .map(|(qty, price)| BillLineRequest {
                    code: "111".to_string(),
                    quantity: *qty,
                    price: *price,
                    master_price: *price / 2.0,
                })
                .collect(),
            price_type: PriceType::Regular,
        }
    }

    #[test]
    fn availability_reports_count_and_alternatives() {
        let (_world, service, _c, w1, w2) = world();
        let results = service
            .check_availability(w1, &[RequestedItem { code: "111".into(), quantity: 2 }])
            .unwrap();
        assert_eq!(results.len(), 1);
        let r = &results[0];
        assert_eq!(r.available_quantity, 3);
        assert!(r.is_available);
        assert_eq!(r.status, AvailabilityStatus::Available);
        assert_eq!(r.matching_codes.len(), 3);
        assert_eq!(r.alternatives.len(), 1);
        assert_eq!(r.alternatives[0].warehouse_id, w2);
        assert_eq!(r.alternatives[0].available_quantity, 1);
    }

    #[test]
    fn availability_shortfall_is_not_an_error() {
        let (_world, service, _c, w1, _w2) = world();
        let results = service
            .check_availability(w1, &[RequestedItem { code: "111".into(), quantity: 5 }])
            .unwrap();
        assert!(!results[0].is_available);
        assert_eq!(results[0].status, AvailabilityStatus::NotAvailable);
        assert_eq!(results[0].available_quantity, 3);
    }

    #[test]
    fn availability_is_idempotent() {
        let (_world, service, _c, w1, _w2) = world();
        let items = [RequestedItem { code: "111".into(), quantity: 2 }];
        let first = service.check_availability(w1, &items).unwrap();
        let second = service.check_availability(w1, &items).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn availability_rejects_unknown_warehouse_and_bad_input() {
        let (_world, service, _c, w1, _w2) = world();
        let err = service
            .check_availability(WarehouseId::new(), &[RequestedItem { code: "111".into(), quantity: 1 }])
            .unwrap_err();
        assert_eq!(err, DomainError::NotFound);

        let err = service.check_availability(w1, &[]).unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));

        let err = service
            .check_availability(w1, &[RequestedItem { code: " ".into(), quantity: 1 }])
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));

        let err = service
            .check_availability(w1, &[RequestedItem { code: "111".into(), quantity: 0 }])
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn full_commit_deletes_exactly_the_requested_count() {
        let (world, service, customer, w1, _w2) = world();
        let before = world.unit_count();

        let outcome = service.commit_bill(request(&[(2, 10.0)], customer, w1)).unwrap();

        assert_eq!(outcome.fulfillment, Fulfillment::Full);
        assert_eq!(outcome.report.total_deleted(), 2);
        assert_eq!(world.unit_count(), before - 2);
        assert_eq!(outcome.bill.bill_number.as_str(), "BILL-000001");
        assert_eq!(outcome.bill.total_amount, 20.0);
        // Oldest units go first.
        assert_eq!(outcome.report.lines[0].deleted_codes, ["1111", "1112"]);
    }

    #[test]
    fn partial_commit_still_creates_bill_and_surfaces_discrepancy() {
        let (world, service, customer, w1, _w2) = world();

        let outcome = service.commit_bill(request(&[(5, 10.0)], customer, w1)).unwrap();

        assert_eq!(outcome.fulfillment, Fulfillment::Partial);
        let line = &outcome.report.lines[0];
        assert_eq!(line.requested, 5);
        assert_eq!(line.deleted, 3);
        assert!(line.is_short());
        // The bill carries requested quantities and prices, not deducted.
        assert_eq!(outcome.bill.lines[0].quantity, 5);
        assert_eq!(outcome.bill.total_amount, 50.0);
        assert_eq!(world.unit_count(), 1); // only the W2 unit remains
        assert_eq!(world.bills().len(), 1);
    }

    #[test]
    fn lines_are_processed_in_caller_order() {
        let (_world, service, customer, w1, _w2) = world();

        // Two lines over the same prefix: the first takes 2 of 3 units,
        // the second finds only the remaining one.
        let outcome = service
            .commit_bill(request(&[(2, 10.0), (2, 10.0)], customer, w1))
            .unwrap();

        assert_eq!(outcome.report.lines[0].deleted, 2);
        assert_eq!(outcome.report.lines[1].deleted, 1);
        assert_eq!(outcome.fulfillment, Fulfillment::Partial);
    }

    #[test]
    fn commit_validates_input_before_touching_stock() {
        let (world, service, customer, w1, _w2) = world();
        let before = world.unit_count();

        let mut req = request(&[(2, 10.0)], customer, w1);
        req.lines.clear();
        assert!(matches!(service.commit_bill(req).unwrap_err(), DomainError::Validation(_)));

        let req = request(&[(0, 10.0)], customer, w1);
        assert!(matches!(service.commit_bill(req).unwrap_err(), DomainError::Validation(_)));

        let req = request(&[(2, -1.0)], customer, w1);
        assert!(matches!(service.commit_bill(req).unwrap_err(), DomainError::Validation(_)));

        let req = request(&[(2, 10.0)], CustomerId::new(), w1);
        assert_eq!(service.commit_bill(req).unwrap_err(), DomainError::NotFound);

        assert_eq!(world.unit_count(), before);
        assert!(world.bills().is_empty());
    }

    #[test]
    fn master_price_type_selects_master_price() {
        let (_world, service, customer, w1, _w2) = world();
        let mut req = request(&[(2, 10.0)], customer, w1);
        req.price_type = PriceType::Master;

        let outcome = service.commit_bill(req).unwrap();
        assert_eq!(outcome.bill.lines[0].selected_price, 5.0);
        assert_eq!(outcome.bill.total_amount, 10.0);
    }

    #[test]
    fn bill_numbers_are_sequential() {
        let (_world, service, customer, w1, _w2) = world();
        let first = service.commit_bill(request(&[(1, 10.0)], customer, w1)).unwrap();
        let second = service.commit_bill(request(&[(1, 10.0)], customer, w1)).unwrap();
        assert_eq!(first.bill.bill_number.as_str(), "BILL-000001");
        assert_eq!(second.bill.bill_number.as_str(), "BILL-000002");
    }

    #[test]
    fn warehouses_sorted_partitions_by_customer_location() {
        let (_world, service, customer, w1, w2) = world();
        let (found, partition) = service.warehouses_sorted(customer).unwrap();
        assert_eq!(found.city, "Pune");
        assert_eq!(partition.matching.iter().map(|w| w.id).collect::<Vec<_>>(), [w1]);
        assert_eq!(partition.non_matching.iter().map(|w| w.id).collect::<Vec<_>>(), [w2]);

        let err = service.warehouses_sorted(CustomerId::new()).unwrap_err();
        assert_eq!(err, DomainError::NotFound);
    }
}
