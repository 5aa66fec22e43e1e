use chrono::NaiveDate;
use stockroom_core::{
    report_and_continue, ElectronicItem, Entity, GroceryItem, InMemoryRepository,
    InventoryService, RepoError, Repository, Stocked,
};

fn electronics_service() -> InventoryService<ElectronicItem, InMemoryRepository<ElectronicItem>> {
    let mut service = InventoryService::new(InMemoryRepository::<ElectronicItem>::new());
    let added = service.seed([
        ElectronicItem::new(1, "Laptop", 10, "Dell", 24),
        ElectronicItem::new(2, "Smartphone", 25, "Samsung", 12),
        ElectronicItem::new(3, "Router", 15, "TP-Link", 18),
    ]);
    assert_eq!(added, 3);
    service
}

fn expiry(days: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 11, 1).unwrap() + chrono::Duration::days(i64::from(days))
}

#[test]
fn seed_reports_failures_and_keeps_going() {
    let mut service = electronics_service();

    let added = service.seed([
        ElectronicItem::new(1, "Duplicate Laptop", 5, "Dell", 24),
        ElectronicItem::new(4, "Monitor", -1, "LG", 36),
        ElectronicItem::new(5, "Keyboard", 40, "Logitech", 12),
    ]);

    assert_eq!(added, 1);
    let ids: Vec<_> = service.items().iter().map(Entity::id).collect();
    assert_eq!(ids, vec![1, 2, 3, 5]);
    assert_eq!(service.get_item(1).unwrap().name(), "Laptop");
}

#[test]
fn increase_stock_adds_to_current_quantity() {
    let mut service = electronics_service();

    let quantity = service.increase_stock(2, 5).unwrap();

    assert_eq!(quantity, 30);
    assert_eq!(service.get_item(2).unwrap().quantity(), 30);
}

#[test]
fn increase_stock_below_zero_is_invalid_value() {
    let mut service = electronics_service();

    let err = service.increase_stock(3, -16).unwrap_err();

    assert!(matches!(err, RepoError::InvalidValue(_)));
    assert_eq!(service.get_item(3).unwrap().quantity(), 15);
}

#[test]
fn increase_stock_overflow_is_invalid_value() {
    let mut service = electronics_service();
    service.set_quantity(1, i64::MAX).unwrap();

    let err = service.increase_stock(1, 1).unwrap_err();

    assert!(matches!(err, RepoError::InvalidValue(ref violation) if violation.field == "quantity"));
}

#[test]
fn increase_stock_on_missing_item_is_not_found() {
    let mut service = electronics_service();
    assert_eq!(
        service.increase_stock(999, 1).unwrap_err(),
        RepoError::NotFound(999)
    );
}

#[test]
fn remove_item_reports_missing_ids_without_side_effects() {
    let mut service = InventoryService::new(InMemoryRepository::<GroceryItem>::new());
    service.seed([
        GroceryItem::new(101, "Rice 5kg", 50, expiry(365)),
        GroceryItem::new(102, "Milk 1L", 80, expiry(30)),
    ]);

    assert_eq!(
        report_and_continue("remove", service.remove_item(999)),
        None
    );
    let removed = report_and_continue("remove", service.remove_item(101)).unwrap();

    assert_eq!(removed.name(), "Rice 5kg");
    assert_eq!(service.repository().len(), 1);
}

#[test]
fn low_stock_lists_items_at_or_under_threshold() {
    let mut service = InventoryService::new(InMemoryRepository::<GroceryItem>::new());
    service.seed([
        GroceryItem::new(101, "Rice 5kg", 50, expiry(365)),
        GroceryItem::new(102, "Milk 1L", 80, expiry(30)),
        GroceryItem::new(103, "Eggs (tray)", 40, expiry(14)),
    ]);

    let low: Vec<_> = service.low_stock(50).iter().map(Entity::id).collect();

    assert_eq!(low, vec![101, 103]);
}

#[test]
fn grocery_expiry_is_compared_by_date() {
    let eggs = GroceryItem::new(103, "Eggs (tray)", 40, expiry(14));

    assert!(!eggs.is_expired_on(expiry(14)));
    assert!(eggs.is_expired_on(expiry(15)));
}

#[test]
fn into_repository_hands_back_the_mutated_store() {
    let mut service = electronics_service();
    service.remove_item(2).unwrap();

    let repo = service.into_repository();

    assert_eq!(repo.ids(), vec![1, 3]);
}
