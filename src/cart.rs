//! Store cart persisted in local storage.
//!
//! A line is identified by product id plus selected size; adding the same
//! pair again bumps its quantity instead of creating a second line. Totals
//! are always derived from the lines, never stored.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::finance::{CheckoutItem, CheckoutRequest};
use crate::models::resource::CommercialResource;
use crate::storage::{load_json, save_json, KeyValueStore, CART_KEY};

/// Product snapshot taken when it is added to the cart.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Product {
    pub id_recurso: i64,
    pub nombre: String,
    pub precio_venta: Decimal,
    #[serde(default)]
    pub imagen_url: Option<String>,
    /// Units available; `None` when the catalog does not report stock.
    #[serde(default)]
    pub stock: Option<u32>,
}

impl From<&CommercialResource> for Product {
    fn from(r: &CommercialResource) -> Self {
        Self {
            id_recurso: r.id_recurso,
            nombre: r.base.nombre.clone(),
            precio_venta: r.precio_venta,
            imagen_url: r.base.imagen_url.clone(),
            stock: Some(u32::try_from(r.stock_actual.max(0)).unwrap_or(u32::MAX)),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct CartLine {
    #[serde(rename = "uniqueId")]
    pub line_id: String,
    #[serde(flatten)]
    pub product: Product,
    #[serde(rename = "selectedTalla", default)]
    pub size: String,
    pub quantity: u32,
}

impl CartLine {
    pub fn subtotal(&self) -> Decimal {
        self.product.precio_venta * Decimal::from(self.quantity)
    }
}

/// Line key for a product/size pair.
pub fn line_id(resource_id: i64, size: &str) -> String {
    format!("{}-{}", resource_id, size.trim())
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum CartError {
    #[error("No hay más stock disponible de {product} (máximo {available})")]
    OutOfStock { product: String, available: u32 },
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Merge into the matching (id, size) line or append a new one.
    pub fn add(&mut self, product: &Product, size: &str) {
        let id = line_id(product.id_recurso, size);
        if let Some(line) = self.lines.iter_mut().find(|l| l.line_id == id) {
            line.quantity += 1;
            return;
        }
        self.lines.push(CartLine {
            line_id: id,
            product: product.clone(),
            size: size.trim().to_string(),
            quantity: 1,
        });
    }

    /// [`Cart::add`] that refuses once every available unit is in the cart.
    pub fn add_checked(&mut self, product: &Product, size: &str) -> Result<(), CartError> {
        if let Some(available) = product.stock {
            if self.quantity_in_cart(product.id_recurso) >= available {
                return Err(CartError::OutOfStock {
                    product: product.nombre.clone(),
                    available,
                });
            }
        }
        self.add(product, size);
        Ok(())
    }

    /// Delete the line (`remove_all`) or take one unit off, dropping it at zero.
    pub fn remove(&mut self, line_id: &str, remove_all: bool) {
        if remove_all {
            self.lines.retain(|l| l.line_id != line_id);
            return;
        }
        if let Some(line) = self.lines.iter_mut().find(|l| l.line_id == line_id) {
            line.quantity = line.quantity.saturating_sub(1);
        }
        self.lines.retain(|l| l.quantity > 0);
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    pub fn total(&self) -> Decimal {
        self.lines.iter().map(CartLine::subtotal).sum()
    }

    /// Number of units across all lines.
    pub fn count(&self) -> u32 {
        self.lines.iter().map(|l| l.quantity).sum()
    }

    /// Units of one product across all of its sizes.
    pub fn quantity_in_cart(&self, resource_id: i64) -> u32 {
        self.lines
            .iter()
            .filter(|l| l.product.id_recurso == resource_id)
            .map(|l| l.quantity)
            .sum()
    }

    /// Rehydrate from storage. Corrupt or invalid data yields an empty cart.
    pub fn load(store: &dyn KeyValueStore) -> Self {
        let lines: Vec<CartLine> = load_json(store, CART_KEY).unwrap_or_default();
        let mut cart = Self::new();
        for line in lines.into_iter().filter(|l| l.quantity > 0) {
            let id = line_id(line.product.id_recurso, &line.size);
            match cart.lines.iter_mut().find(|l| l.line_id == id) {
                Some(existing) => existing.quantity += line.quantity,
                None => cart.lines.push(CartLine { line_id: id, ..line }),
            }
        }
        cart
    }

    /// Persist every line; an empty cart removes the key.
    pub fn save(&self, store: &dyn KeyValueStore) {
        if self.lines.is_empty() {
            store.remove(CART_KEY);
        } else {
            save_json(store, CART_KEY, &self.lines);
        }
    }

    /// Payload for `POST /ventas/checkout`.
    pub fn checkout_request(&self, customer_name: &str, customer_phone: &str) -> CheckoutRequest {
        let phone = customer_phone.trim();
        CheckoutRequest {
            customer_name: customer_name.trim().to_string(),
            customer_phone: if phone.is_empty() {
                "N/A".to_string()
            } else {
                phone.to_string()
            },
            items: self
                .lines
                .iter()
                .map(|l| CheckoutItem {
                    id_recurso: l.product.id_recurso,
                    quantity: l.quantity,
                    precio_venta: l.product.precio_venta,
                    nombre: if l.size.is_empty() {
                        l.product.nombre.clone()
                    } else {
                        format!("{} (Talla {})", l.product.nombre, l.size)
                    },
                })
                .collect(),
            total: self.total(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;
    use std::str::FromStr;

    fn product(id: i64, price: &str) -> Product {
        Product {
            id_recurso: id,
            nombre: format!("Producto {}", id),
            precio_venta: Decimal::from_str(price).unwrap(),
            imagen_url: None,
            stock: None,
        }
    }

    #[test]
    fn repeated_adds_merge_into_one_line() {
        let mut cart = Cart::new();
        let jersey = product(1, "25.50");
        for n in 1..=5 {
            cart.add(&jersey, "M");
            assert_eq!(cart.lines().len(), 1);
            assert_eq!(cart.lines()[0].quantity, n);
        }
    }

    #[test]
    fn size_is_normalized_before_matching() {
        let mut cart = Cart::new();
        let jersey = product(1, "25.50");
        cart.add(&jersey, "M");
        cart.add(&jersey, " M ");
        assert_eq!(cart.lines().len(), 1);
        assert_eq!(cart.lines()[0].line_id, "1-M");
    }

    #[test]
    fn different_size_is_a_separate_line() {
        let mut cart = Cart::new();
        let jersey = product(1, "25.50");
        cart.add(&jersey, "M");
        cart.add(&jersey, "L");
        assert_eq!(cart.lines().len(), 2);
        assert_eq!(cart.quantity_in_cart(1), 2);
    }

    #[test]
    fn remove_one_decrements_and_prunes_at_zero() {
        let mut cart = Cart::new();
        let jersey = product(1, "25.50");
        cart.add(&jersey, "M");
        cart.add(&jersey, "M");

        cart.remove("1-M", false);
        assert_eq!(cart.lines()[0].quantity, 1);

        cart.remove("1-M", false);
        assert!(cart.is_empty());
    }

    #[test]
    fn remove_all_deletes_line_regardless_of_quantity() {
        let mut cart = Cart::new();
        let jersey = product(1, "25.50");
        let buff = product(2, "8");
        for _ in 0..4 {
            cart.add(&jersey, "M");
        }
        cart.add(&buff, "");

        cart.remove("1-M", true);
        assert_eq!(cart.lines().len(), 1);
        assert_eq!(cart.lines()[0].line_id, "2-");
    }

    #[test]
    fn remove_unknown_line_is_noop() {
        let mut cart = Cart::new();
        cart.add(&product(1, "1"), "S");
        cart.remove("9-S", false);
        cart.remove("9-S", true);
        assert_eq!(cart.count(), 1);
    }

    #[test]
    fn total_and_count_are_sums_over_lines() {
        let mut cart = Cart::new();
        let jersey = product(1, "25.50");
        let socks = product(2, "4.25");
        cart.add(&jersey, "M");
        cart.add(&jersey, "M");
        cart.add(&jersey, "L");
        cart.add(&socks, "");

        assert_eq!(cart.count(), 4);
        assert_eq!(cart.total(), Decimal::from_str("80.75").unwrap());

        cart.clear();
        assert_eq!(cart.count(), 0);
        assert_eq!(cart.total(), Decimal::ZERO);
    }

    #[test]
    fn checked_add_respects_stock_across_sizes() {
        let mut cart = Cart::new();
        let mut jersey = product(1, "25.50");
        jersey.stock = Some(2);

        cart.add_checked(&jersey, "M").unwrap();
        cart.add_checked(&jersey, "L").unwrap();
        let err = cart.add_checked(&jersey, "M").unwrap_err();
        assert_eq!(
            err,
            CartError::OutOfStock {
                product: "Producto 1".to_string(),
                available: 2
            }
        );
        assert_eq!(cart.count(), 2);
    }

    #[test]
    fn reload_reproduces_lines() {
        let store = MemoryStore::new();
        let mut cart = Cart::new();
        cart.add(&product(1, "25.50"), "M");
        cart.add(&product(1, "25.50"), "M");
        cart.add(&product(3, "12"), "XL");
        cart.save(&store);

        let reloaded = Cart::load(&store);
        assert_eq!(reloaded, cart);
    }

    #[test]
    fn saving_empty_cart_removes_key() {
        let store = MemoryStore::new();
        let mut cart = Cart::new();
        cart.add(&product(1, "1"), "");
        cart.save(&store);
        assert!(store.get(CART_KEY).is_some());

        cart.clear();
        cart.save(&store);
        assert!(store.get(CART_KEY).is_none());
    }

    #[test]
    fn load_accepts_stored_string_prices_and_drops_bad_lines() {
        let store = MemoryStore::new();
        store.set(
            CART_KEY,
            r#"[
                {"uniqueId":"4-S","id_recurso":4,"nombre":"Buff","precio_venta":"8.00","selectedTalla":"S","quantity":2},
                {"uniqueId":"4-S","id_recurso":4,"nombre":"Buff","precio_venta":"8.00","selectedTalla":"S","quantity":1},
                {"uniqueId":"5-","id_recurso":5,"nombre":"Medias","precio_venta":"3.00","selectedTalla":"","quantity":0}
            ]"#,
        );
        let cart = Cart::load(&store);
        assert_eq!(cart.lines().len(), 1);
        assert_eq!(cart.count(), 3);

        store.set(CART_KEY, "garbage");
        assert!(Cart::load(&store).is_empty());
    }

    #[test]
    fn checkout_payload_lists_lines_and_total() {
        let mut cart = Cart::new();
        cart.add(&product(1, "25.50"), "M");
        cart.add(&product(2, "8"), "");

        let request = cart.checkout_request(" Ana ", "");
        assert_eq!(request.customer_name, "Ana");
        assert_eq!(request.customer_phone, "N/A");
        assert_eq!(request.items.len(), 2);
        assert_eq!(request.items[0].nombre, "Producto 1 (Talla M)");
        assert_eq!(request.items[1].nombre, "Producto 2");
        assert_eq!(request.total, Decimal::from_str("33.50").unwrap());
    }
}
