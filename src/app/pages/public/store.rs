//! Club store: product catalog and the cart checkout.

use dioxus::prelude::*;

use crate::app::api_context::{use_api, use_config};
use crate::app::browser;
use crate::app::cart_context::use_cart;
use crate::app::components::{ErrorAlert, Loading, SelectField, TextField, plain_options};
use crate::app::feedback::use_feedback;
use crate::app::pages::format;
use crate::app::Route;
use crate::cart::{CartLine, Product};
use crate::models::resource::CommercialResource;
use crate::services;
use crate::validation::{digits_only, validate_customer, PHONE_MAX};
use crate::whatsapp;

#[component]
pub fn Products() -> Element {
    let api = use_api();

    let mut catalog = use_resource(move || {
        let api = api.clone();
        async move { services::resources::fetch_catalog(&api).await }
    });

    let content = match catalog.read().clone() {
        None => rsx! { Loading { label: "Cargando productos..." } },
        Some(Err(e)) => rsx! {
            ErrorAlert { error: e, on_retry: move |_| catalog.restart() }
        },
        Some(Ok(products)) if products.is_empty() => rsx! {
            p { class: "text-muted", "Pronto tendremos productos disponibles." }
        },
        Some(Ok(products)) => rsx! {
            div { class: "grid",
                for product in products {
                    ProductCard { key: "{product.id_recurso}", product }
                }
            }
        },
    };

    rsx! {
        h1 { "Productos oficiales" }
        p { "Lleva los colores del club. Agrega tus productos al carrito y finaliza tu pedido por WhatsApp." }
        {content}
    }
}

#[component]
fn ProductCard(product: CommercialResource) -> Element {
    let cart = use_cart();
    let feedback = use_feedback();
    let mut size = use_signal(String::new);

    let sizes = product.base.sizes();
    let needs_size = !sizes.is_empty();
    let price = format::money(product.precio_venta);
    let in_cart = cart.quantity_in_cart(product.id_recurso);
    let sold_out = product.stock_actual <= 0;
    let item = Product::from(&product);

    let add = move |_| {
        if needs_size && size.read().is_empty() {
            feedback.toast.warning("Selecciona una talla.");
            return;
        }
        match cart.add(&item, &size.read()) {
            Ok(()) => feedback.success(format!("{} agregado al carrito", item.nombre)),
            Err(e) => feedback.error(e.to_string()),
        }
    };

    rsx! {
        div { class: "card product-card",
            if let Some(src) = product.base.imagen_url.as_ref() {
                img { src: "{src}", alt: "{product.base.nombre}" }
            }
            h3 { "{product.base.nombre}" }
            if let Some(description) = product.base.descripcion.as_ref() {
                p { "{description}" }
            }
            p { strong { "{price}" } }
            small { class: "text-muted",
                if sold_out { "Agotado" } else { "Disponibles: {product.stock_actual}" }
            }
            if needs_size {
                SelectField {
                    label: "Talla",
                    value: size(),
                    options: plain_options(&sizes.iter().map(String::as_str).collect::<Vec<_>>()),
                    on_change: move |v| size.set(v),
                }
            }
            button {
                class: "btn btn-primary",
                disabled: sold_out,
                onclick: add,
                "Agregar al carrito"
            }
            if in_cart > 0 {
                small { "En tu carrito: {in_cart}" }
            }
        }
    }
}

#[component]
pub fn CartPage() -> Element {
    let cart = use_cart();
    let api = use_api();
    let config = use_config();
    let feedback = use_feedback();
    let mut name = use_signal(String::new);
    let mut phone = use_signal(String::new);
    let mut sending = use_signal(|| false);

    let snapshot = cart.snapshot();
    if snapshot.is_empty() {
        return rsx! {
            h1 { "Tu carrito" }
            div { class: "card",
                p { "Tu carrito está vacío." }
                Link { to: Route::Products {}, class: "btn btn-primary", "Ver productos" }
            }
        };
    }
    let total = format::money(snapshot.total());
    let lines = snapshot.lines().to_vec();

    let checkout = move |_| {
        let api = api.clone();
        let config = config.clone();
        async move {
            let (customer, customer_phone) = match validate_customer(&name.read(), &phone.read()) {
                Ok(customer) => customer,
                Err(e) => {
                    feedback.invalid(&e);
                    return;
                }
            };
            sending.set(true);
            let current = cart.snapshot();
            let order = current.checkout_request(&customer, &customer_phone);
            match services::finances::checkout(&api, &order).await {
                Ok(response) => {
                    tracing::info!("Checkout registered as order {:?}", response.order_id);
                    let text = whatsapp::order_message(
                        &config.club_name,
                        &current,
                        &customer,
                        response.order_id,
                    );
                    match config.whatsapp_phone.as_deref().and_then(whatsapp::normalize_phone) {
                        Some(club_phone) => {
                            browser::open_in_new_tab(&whatsapp::deep_link(&club_phone, &text))
                        }
                        None => tracing::warn!("No club WhatsApp number configured"),
                    }
                    cart.clear();
                    name.set(String::new());
                    phone.set(String::new());
                    feedback.success("¡Pedido registrado! Completa tu compra por WhatsApp.");
                }
                Err(e) => feedback.api(&e),
            }
            sending.set(false);
        }
    };

    rsx! {
        h1 { "Tu carrito" }
        table { class: "table",
            thead {
                tr {
                    th { "Producto" }
                    th { "Talla" }
                    th { "Cantidad" }
                    th { "Subtotal" }
                    th {}
                }
            }
            tbody {
                for line in lines {
                    CartRow { key: "{line.line_id}", line }
                }
            }
        }
        p { class: "cart-total", strong { "Total: {total}" } }
        button { class: "btn btn-link", onclick: move |_| cart.clear(), "Vaciar carrito" }

        div { class: "card",
            h3 { "Datos para el pedido" }
            div { class: "form-grid",
                TextField {
                    label: "Nombre completo *",
                    value: name(),
                    on_input: move |v| name.set(v),
                }
                TextField {
                    label: "Teléfono *",
                    kind: "tel",
                    value: phone(),
                    on_input: move |v: String| phone.set(digits_only(&v, PHONE_MAX)),
                }
            }
            button {
                class: "btn btn-primary",
                disabled: sending(),
                onclick: checkout,
                if sending() { "Enviando pedido..." } else { "Finalizar pedido por WhatsApp" }
            }
        }
    }
}

#[component]
fn CartRow(line: CartLine) -> Element {
    let cart = use_cart();
    let feedback = use_feedback();
    let subtotal = format::money(line.subtotal());
    let size = if line.size.is_empty() { "Única".to_string() } else { line.size.clone() };
    let minus_id = line.line_id.clone();
    let remove_id = line.line_id.clone();
    let product = line.product.clone();
    let line_size = line.size.clone();

    rsx! {
        tr {
            td { "{line.product.nombre}" }
            td { "{size}" }
            td {
                button { class: "btn", onclick: move |_| cart.remove(&minus_id, false), "−" }
                span { style: "margin:0 0.5rem;", "{line.quantity}" }
                button {
                    class: "btn",
                    onclick: move |_| {
                        if let Err(e) = cart.add(&product, &line_size) {
                            feedback.error(e.to_string());
                        }
                    },
                    "+"
                }
            }
            td { "{subtotal}" }
            td {
                button { class: "btn btn-danger", onclick: move |_| cart.remove(&remove_id, true), "Quitar" }
            }
        }
    }
}
