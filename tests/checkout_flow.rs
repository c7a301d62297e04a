#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
//! Store Checkout Harness
//!
//! Cart survives a reload, is posted to `/ventas/checkout` and handed off to
//! WhatsApp with the order number the backend assigned.
//!
//! Run with: cargo test --test checkout_flow

use std::cell::RefCell;
use std::rc::Rc;
use std::str::FromStr;

use async_trait::async_trait;
use rust_decimal::Decimal;

use club_ciclismo_web::auth::Session;
use club_ciclismo_web::cart::{Cart, Product};
use club_ciclismo_web::error::ApiResult;
use club_ciclismo_web::services::{self, ApiClient, HttpRequest, HttpResponse, RequestBody, Transport};
use club_ciclismo_web::storage::{KeyValueStore, MemoryStore, CART_KEY};
use club_ciclismo_web::whatsapp;

/// Accepts any order and answers with a fixed order id.
#[derive(Default)]
struct StoreBackend {
    orders: RefCell<Vec<HttpRequest>>,
}

#[async_trait(?Send)]
impl Transport for StoreBackend {
    async fn send(&self, request: HttpRequest) -> ApiResult<HttpResponse> {
        self.orders.borrow_mut().push(request);
        Ok(HttpResponse {
            status: 201,
            body: br#"{"order_id":58,"message":"Pedido registrado"}"#.to_vec(),
        })
    }
}

fn product(id: i64, name: &str, price: &str, stock: Option<u32>) -> Product {
    Product {
        id_recurso: id,
        nombre: name.to_string(),
        precio_venta: Decimal::from_str(price).unwrap(),
        imagen_url: None,
        stock,
    }
}

#[test]
fn cart_survives_reload() {
    let store = MemoryStore::new();
    let jersey = product(1, "Jersey EPN", "35.00", Some(10));
    let bottle = product(2, "Caramañola", "8.50", None);

    let mut cart = Cart::new();
    cart.add(&jersey, "M");
    cart.add(&jersey, "M");
    cart.add(&jersey, "L");
    cart.add(&bottle, "");
    cart.save(&store);

    let reloaded = Cart::load(&store);
    assert_eq!(reloaded, cart);
    assert_eq!(reloaded.count(), 4);
    assert_eq!(reloaded.total(), Decimal::from_str("113.50").unwrap());
}

#[test]
fn corrupt_storage_starts_empty() {
    let store = MemoryStore::new();
    store.set(CART_KEY, "{not json");

    assert!(Cart::load(&store).is_empty());
}

#[test]
fn emptied_cart_leaves_no_key_behind() {
    let store = MemoryStore::new();
    let mut cart = Cart::new();
    cart.add(&product(1, "Jersey EPN", "35.00", None), "S");
    cart.save(&store);
    assert!(store.get(CART_KEY).is_some());

    cart.clear();
    cart.save(&store);
    assert_eq!(store.get(CART_KEY), None);
}

#[test]
fn checkout_posts_order_and_builds_whatsapp_link() {
    let backend = Rc::new(StoreBackend::default());
    let api = ApiClient::new(
        "http://api.test",
        backend.clone(),
        Session::new(Rc::new(MemoryStore::new())),
    );

    let mut cart = Cart::new();
    cart.add(&product(1, "Jersey EPN", "35.00", None), "M");
    cart.add(&product(1, "Jersey EPN", "35.00", None), "M");

    let order = cart.checkout_request("  Ana Pérez ", "");
    let resp = tokio_test::block_on(services::finances::checkout(&api, &order)).unwrap();
    assert_eq!(resp.order_id, Some(58));

    let sent = backend.orders.borrow()[0].clone();
    assert!(sent.url.ends_with("/ventas/checkout"));
    // Anonymous checkout: no bearer header without a session
    assert_eq!(sent.header("Authorization"), None);
    let body: serde_json::Value = match sent.body {
        RequestBody::Json(raw) => serde_json::from_str(&raw).unwrap(),
        other => panic!("expected JSON body, got {:?}", other),
    };
    assert_eq!(body["customer_name"], "Ana Pérez");
    assert_eq!(body["customer_phone"], "N/A");
    assert_eq!(body["items"][0]["quantity"], 2);
    assert_eq!(body["items"][0]["nombre"], "Jersey EPN (Talla M)");

    let text = whatsapp::order_message("Club de Ciclismo EPN", &cart, "Ana Pérez", resp.order_id);
    assert!(text.contains("(Orden #58)"));
    assert!(text.contains("*Total:* $70.00"));

    let phone = whatsapp::normalize_phone("099 123 4567").unwrap();
    let link = whatsapp::deep_link(&phone, &text);
    assert!(link.starts_with("https://api.whatsapp.com/send?phone=593991234567&text="));
    assert!(!link.contains(' '));
}
