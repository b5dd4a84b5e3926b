//! Cart to order confirmation: pricing, validation, and the cleared cart.

use rust_decimal::Decimal;

use cubed_core::cart::{NewCartItem, Specifications};
use cubed_core::types::{ItemId, ServiceCategory};
use cubed_storefront::checkout::{self, CheckoutError, CheckoutForm, PaymentMethod};
use cubed_storefront::stores::{BufferedNotifier, CartStore, MemoryStorage};

fn catalog_line(id: &str, price_cents: i64, weight: u32) -> NewCartItem {
    NewCartItem {
        id: ItemId::new(id),
        name: format!("Product {id}"),
        price: Decimal::new(price_cents, 2),
        image: None,
        category: ServiceCategory::ReadyPrint,
        description: None,
        specifications: Some(Specifications {
            material: Some("PLA".to_owned()),
            color: None,
            size: None,
            weight_grams: Some(weight),
        }),
    }
}

fn valid_form(payment_method: PaymentMethod) -> CheckoutForm {
    CheckoutForm {
        name: "Maria Silva".to_owned(),
        email: "maria@example.com".to_owned(),
        phone: "+55 11 91234-5678".to_owned(),
        cep: "01310-100".to_owned(),
        street: "Avenida Paulista".to_owned(),
        number: "1000".to_owned(),
        complement: Some("Apt 42".to_owned()),
        neighborhood: "Bela Vista".to_owned(),
        city: "Sao Paulo".to_owned(),
        state: "SP".to_owned(),
        payment_method,
        card_number: None,
        card_name: None,
        card_expiry: None,
        card_cvv: None,
        installments: 1,
    }
}

#[test]
fn test_cart_to_confirmed_order() {
    let mut store = CartStore::restore(MemoryStorage::new(), BufferedNotifier::new());
    store.add_to_cart(catalog_line("1", 2590, 45));
    store.add_to_cart(catalog_line("1", 2590, 45));
    store.add_to_cart(catalog_line("3", 1990, 60));

    // Two lines, light cart: base shipping only.
    let priced = checkout::quote(store.state(), Some(PaymentMethod::Boleto));
    assert_eq!(priced.subtotal, Decimal::new(7170, 2));
    assert_eq!(priced.shipping, Decimal::new(1590, 2));
    assert_eq!(priced.total, Decimal::new(8760, 2));

    let confirmation = checkout::place_order(store.state(), &valid_form(PaymentMethod::Boleto))
        .expect("valid order");
    assert_eq!(confirmation.total, priced.total);
    assert_eq!(confirmation.items.len(), 2);

    // Checkout ends with an empty, persisted-empty cart.
    store.clear_cart();
    assert!(store.state().is_empty());
}

#[test]
fn test_pix_gets_the_discount() {
    let mut store = CartStore::restore(MemoryStorage::new(), BufferedNotifier::new());
    store.add_to_cart(catalog_line("2", 10000, 100));

    let confirmation = checkout::place_order(store.state(), &valid_form(PaymentMethod::Pix))
        .expect("valid order");

    // (100.00 + 15.90) * 5% = 5.80 off
    assert_eq!(confirmation.discount, Decimal::new(580, 2));
    assert_eq!(confirmation.total, Decimal::new(11010, 2));
}

#[test]
fn test_heavy_cart_pays_the_surcharge() {
    let mut store = CartStore::restore(MemoryStorage::new(), BufferedNotifier::new());
    store.add_to_cart(catalog_line("4", 3500, 400));
    store.add_to_cart(catalog_line("2", 4500, 200));

    let priced = checkout::quote(store.state(), None);
    assert_eq!(priced.shipping, Decimal::new(2090, 2));
}

#[test]
fn test_empty_cart_cannot_check_out() {
    let store = CartStore::restore(MemoryStorage::new(), BufferedNotifier::new());
    let err = checkout::place_order(store.state(), &valid_form(PaymentMethod::Pix)).unwrap_err();
    assert!(matches!(err, CheckoutError::EmptyCart));
}
