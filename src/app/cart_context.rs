//! Shopping cart shared via context and mirrored to local storage.

use dioxus::prelude::*;

use crate::cart::{Cart, CartError, Product};
use crate::storage::BrowserStore;

#[derive(Clone, Copy)]
pub struct CartContext {
    cart: Signal<Cart>,
}

impl CartContext {
    pub fn snapshot(&self) -> Cart {
        self.cart.read().clone()
    }

    pub fn count(&self) -> u32 {
        self.cart.read().count()
    }

    pub fn quantity_in_cart(&self, resource_id: i64) -> u32 {
        self.cart.read().quantity_in_cart(resource_id)
    }

    /// Stock-aware add; the cart is untouched on refusal.
    pub fn add(&self, product: &Product, size: &str) -> Result<(), CartError> {
        self.update(|cart| cart.add_checked(product, size))
    }

    pub fn remove(&self, line_id: &str, remove_all: bool) {
        self.update(|cart| cart.remove(line_id, remove_all));
    }

    pub fn clear(&self) {
        self.update(Cart::clear);
    }

    fn update<T>(&self, f: impl FnOnce(&mut Cart) -> T) -> T {
        let mut cart = self.cart;
        let out = f(&mut cart.write());
        cart.read().save(&BrowserStore::local());
        out
    }
}

/// Initialize cart context provider - call once at app root
pub fn use_cart_provider() {
    let cart = use_signal(|| Cart::load(&BrowserStore::local()));
    use_context_provider(|| CartContext { cart });
}

pub fn use_cart() -> CartContext {
    use_context::<CartContext>()
}
