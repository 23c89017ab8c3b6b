//! Integration tests for state surviving a restart through directory storage.

use std::sync::Arc;

use tempfile::tempdir;
use testresult::TestResult;

use storefront::{
    Storefront, StorefrontSettings,
    checkout::{PaymentInfo, ShippingInfo},
    fixtures,
    products::ProductId,
    storage::{FileStorage, Storage, StorageKey},
};

fn open(storage: &FileStorage) -> Result<Storefront, fixtures::FixtureError> {
    let catalog = fixtures::default_catalog()?;
    let settings = StorefrontSettings::immediate(&catalog);

    Ok(Storefront::new(catalog, Arc::new(storage.clone()), settings))
}

#[test]
fn cart_and_wishlist_survive_restart() -> TestResult {
    let dir = tempdir()?;
    let storage = FileStorage::open(dir.path())?;

    {
        let mut store = open(&storage)?;
        let keyboard = store.catalog.get("prod-005").ok_or("missing prod-005")?;

        store.cart.add_to_cart(&keyboard, 2);
        store.wishlist.add("prod-007")?;
    }

    let store = open(&FileStorage::open(dir.path())?)?;

    assert_eq!(store.cart.quantity_of(&ProductId::new("prod-005")), 2);
    assert!(store.wishlist.contains("prod-007"));

    Ok(())
}

#[test]
fn orders_survive_restart() -> TestResult {
    let dir = tempdir()?;
    let storage = FileStorage::open(dir.path())?;

    let id = {
        let mut store = open(&storage)?;
        let mouse = store.catalog.get("prod-006").ok_or("missing prod-006")?;
        store.cart.add_to_cart(&mouse, 1);

        let mut checkout = store.checkout();
        checkout.begin(&store.cart)?;
        checkout.submit_shipping(ShippingInfo {
            full_name: "Grace Hopper".to_string(),
            address_line1: "1 Compiler Street".to_string(),
            address_line2: None,
            city: "Arlington".to_string(),
            state: "VA".to_string(),
            postal_code: "22201".to_string(),
            country: "US".to_string(),
            phone: "7035550100".to_string(),
        })?;
        checkout.submit_payment(PaymentInfo::new(
            "Grace Hopper",
            "5555555555554444",
            "01/30",
            "999",
            "1 Compiler Street",
        ))?;

        checkout.place_order(&mut store.cart, &mut store.orders)?
    };

    let store = open(&storage)?;
    let order = store.orders.get(id.as_str()).ok_or("order not reloaded")?;

    assert!(store.cart.is_empty());
    assert_eq!(order.shipping().full_name, "Grace Hopper");
    assert_eq!(order.payment().card_number, "**** **** **** 4444");
    assert_eq!(order.lines().len(), 1);

    Ok(())
}

#[test]
fn corrupt_files_start_empty() -> TestResult {
    let dir = tempdir()?;
    let storage = FileStorage::open(dir.path())?;

    for key in StorageKey::ALL {
        storage.set(key, "{{{ not json".to_string())?;
    }

    let store = open(&storage)?;

    assert!(store.cart.is_empty());
    assert!(store.orders.is_empty());
    assert!(store.wishlist.is_empty());
    assert!(store.auth.current_user().is_none());

    Ok(())
}

#[test]
fn cart_lines_for_removed_products_are_dropped() -> TestResult {
    let dir = tempdir()?;
    let storage = FileStorage::open(dir.path())?;

    storage.set(
        StorageKey::Cart,
        r#"[{"product_id":"prod-999","quantity":1},{"product_id":"prod-001","quantity":2}]"#
            .to_string(),
    )?;

    let store = open(&storage)?;

    assert_eq!(store.cart.lines().len(), 1);
    assert_eq!(store.cart.cart_count(), 2);

    Ok(())
}
