//! Stockroom demo entry point.
//!
//! # Responsibility
//! - Run the save/reload session against the configured snapshot path.
//! - Show how each repository error kind is reported without stopping.
//!
//! Usage: `stockroom [STORE_PATH]`. Settings otherwise come from the
//! `STOCKROOM_*` environment variables.

use chrono::{Duration, Utc};
use std::process::ExitCode;
use stockroom_core::{
    init_logging_from, report_and_continue, run_round_trip, sample_inventory, ElectronicItem,
    Entity, GroceryItem, InMemoryRepository, InventoryItem, InventoryService, SnapshotStore,
    Stocked, StockroomConfig,
};

fn main() -> ExitCode {
    let mut config = match StockroomConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("stockroom: invalid configuration: {err}");
            return ExitCode::FAILURE;
        }
    };
    if let Some(path) = std::env::args_os().nth(1) {
        config.store.path = path.into();
    }

    if let Err(err) = init_logging_from(&config.logging) {
        eprintln!("stockroom: logging disabled: {err}");
    }

    println!("stockroom_core version={}", stockroom_core::core_version());

    let store = SnapshotStore::<InventoryItem>::new(config.store);
    match run_round_trip(&store, sample_inventory(Utc::now())) {
        Ok(report) => {
            println!(
                "saved {} items to {}; reloaded:",
                report.saved,
                report.path.display()
            );
            for item in &report.reloaded {
                println!(
                    "  #{} {} qty={} added={}",
                    item.id(),
                    item.name(),
                    item.quantity(),
                    item.date_added().to_rfc3339()
                );
            }
        }
        Err(err) => {
            eprintln!("stockroom: session failed: {err}");
            return ExitCode::FAILURE;
        }
    }

    demo_error_reporting();
    ExitCode::SUCCESS
}

/// Each call below fails on purpose; the failures are printed and skipped.
fn demo_error_reporting() {
    println!("error reporting:");

    let mut electronics = InventoryService::new(InMemoryRepository::<ElectronicItem>::new());
    electronics.seed([
        ElectronicItem::new(1, "Laptop", 10, "Dell", 24),
        ElectronicItem::new(2, "Smartphone", 25, "Samsung", 12),
        ElectronicItem::new(3, "Router", 15, "TP-Link", 18),
    ]);
    show(
        "add duplicate id 1",
        electronics.add_item(ElectronicItem::new(1, "Duplicate Laptop", 5, "Dell", 24)),
    );
    show("update id 2 to -5", electronics.set_quantity(2, -5));

    let today = Utc::now().date_naive();
    let mut groceries = InventoryService::new(InMemoryRepository::<GroceryItem>::new());
    groceries.seed([
        GroceryItem::new(101, "Rice 5kg", 50, today + Duration::days(365)),
        GroceryItem::new(102, "Milk 1L", 80, today + Duration::days(7)),
        GroceryItem::new(103, "Bread", 30, today - Duration::days(1)),
    ]);
    show("remove id 999", groceries.remove_item(999));

    if let Some(quantity) = report_and_continue("increase_stock", groceries.increase_stock(102, 20))
    {
        println!("  increase id 102 by 20 -> qty={quantity}");
    }
    for item in groceries.items() {
        println!(
            "  #{} {} qty={} expired={}",
            item.id(),
            item.name(),
            item.quantity(),
            item.is_expired_on(today)
        );
    }
}

fn show<T, E: std::fmt::Display>(label: &str, result: Result<T, E>) {
    match result {
        Ok(_) => println!("  {label}: ok"),
        Err(err) => println!("  {label}: {err}"),
    }
}
