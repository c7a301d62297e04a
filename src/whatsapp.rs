//! WhatsApp chat hand-off links for store orders.

use rust_decimal::Decimal;

use crate::cart::Cart;

/// Ecuador's country code; local mobiles are `09XXXXXXXX`.
const COUNTRY_CODE: &str = "593";
const MIN_DIGITS: usize = 9;

/// Digits only, with a local mobile rewritten to international form.
/// Anything shorter than nine digits is unusable.
pub fn normalize_phone(raw: &str) -> Option<String> {
    let digits: String = raw.chars().filter(char::is_ascii_digit).collect();
    let digits = if digits.starts_with("09") && digits.len() == 10 {
        format!("{}{}", COUNTRY_CODE, &digits[1..])
    } else {
        digits
    };
    (digits.len() >= MIN_DIGITS).then_some(digits)
}

pub fn deep_link(phone: &str, text: &str) -> String {
    format!(
        "https://api.whatsapp.com/send?phone={}&text={}",
        phone,
        urlencoding::encode(text)
    )
}

fn money(amount: Decimal) -> String {
    format!("${:.2}", amount)
}

/// Order summary the customer sends to the club.
pub fn order_message(
    club_name: &str,
    cart: &Cart,
    customer_name: &str,
    order_id: Option<i64>,
) -> String {
    let mut msg = format!("Hola *{}* 🚴, quiero realizar el siguiente pedido", club_name);
    if let Some(id) = order_id {
        msg.push_str(&format!(" (Orden #{})", id));
    }
    msg.push_str(":\n\n");

    for line in cart.lines() {
        msg.push_str(&format!("• {} x{}", line.product.nombre, line.quantity));
        if !line.size.is_empty() {
            msg.push_str(&format!(" (Talla {})", line.size));
        }
        msg.push_str(&format!(" = {}\n", money(line.subtotal())));
    }

    msg.push_str(&format!("\n*Total:* {}\n", money(cart.total())));
    msg.push_str(&format!("*Cliente:* {}", customer_name.trim()));
    msg
}

/// Sent by an admin once an order's payment is verified.
pub fn payment_confirmed_message(
    club_name: &str,
    customer_name: &str,
    order_id: i64,
    invoice_url: Option<&str>,
) -> String {
    let mut msg = format!(
        "Hola *{}*, le saludamos del {} 🚴‍♂️.\n\n✅ *PAGO VERIFICADO* para la Orden #{}.\n",
        customer_name, club_name, order_id
    );
    if let Some(url) = invoice_url.filter(|u| !u.is_empty()) {
        msg.push_str(&format!("📄 *Factura:* {}\n\n", url));
    }
    msg.push_str("Gracias por su compra!");
    msg
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cart::Product;
    use std::str::FromStr;

    #[test]
    fn local_mobile_gets_country_code() {
        assert_eq!(normalize_phone("099 123 4567").as_deref(), Some("593991234567"));
        assert_eq!(normalize_phone("+593 99 123 4567").as_deref(), Some("593991234567"));
        assert_eq!(normalize_phone("2345678"), None);
        assert_eq!(normalize_phone("N/A"), None);
    }

    #[test]
    fn link_is_percent_encoded() {
        let link = deep_link("593991234567", "Hola *Ana*\nTotal: $5");
        assert_eq!(
            link,
            "https://api.whatsapp.com/send?phone=593991234567&text=Hola%20%2AAna%2A%0ATotal%3A%20%245"
        );
    }

    #[test]
    fn order_lists_lines_and_total() {
        let mut cart = Cart::new();
        let jersey = Product {
            id_recurso: 1,
            nombre: "Jersey".to_string(),
            precio_venta: Decimal::from_str("25.5").unwrap(),
            imagen_url: None,
            stock: None,
        };
        cart.add(&jersey, "M");
        cart.add(&jersey, "M");

        let msg = order_message("Club de Ciclismo EPN", &cart, "Ana", Some(7));
        assert!(msg.contains("(Orden #7)"));
        assert!(msg.contains("• Jersey x2 (Talla M) = $51.00"));
        assert!(msg.contains("*Total:* $51.00"));
        assert!(msg.ends_with("*Cliente:* Ana"));
    }

    #[test]
    fn payment_message_with_and_without_invoice() {
        let with = payment_confirmed_message("Club", "Ana", 3, Some("https://f/1.pdf"));
        assert!(with.contains("📄 *Factura:* https://f/1.pdf"));
        let without = payment_confirmed_message("Club", "Ana", 3, None);
        assert!(!without.contains("Factura"));
        assert!(without.ends_with("Gracias por su compra!"));
    }
}
