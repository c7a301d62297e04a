//! Store orders (`/ventas`) and the financial ledger (`/finanzas`).

use super::ApiClient;
use crate::error::ApiResult;
use crate::models::{
    BalancePeriod, BalanceReport, CheckoutRequest, CheckoutResponse, SaleConfirmation, SaleFilter,
    SaleOrder, TransactionForm,
};

pub async fn fetch_sales(api: &ApiClient, filter: SaleFilter) -> ApiResult<Vec<SaleOrder>> {
    let query: Vec<(&str, String)> = filter
        .map(|status| vec![("status", status.as_str().to_string())])
        .unwrap_or_default();
    api.get("ventas/", "Error cargando ventas")
        .bearer_if_present()
        .query(&query)
        .fetch()
        .await
}

/// Mark an order paid; the answer may carry an invoice link.
pub async fn confirm_sale(api: &ApiClient, sale_id: i64) -> ApiResult<SaleConfirmation> {
    api.put(
        &format!("ventas/{}/confirmar", sale_id),
        "No se pudo confirmar",
    )
    .bearer_if_present()
    .fetch()
    .await
}

pub async fn cancel_sale(api: &ApiClient, sale_id: i64) -> ApiResult<()> {
    api.put(&format!("ventas/{}/cancelar", sale_id), "Error al cancelar venta")
        .bearer_if_present()
        .execute()
        .await
}

/// Register a store order from the cart.
pub async fn checkout(api: &ApiClient, order: &CheckoutRequest) -> ApiResult<CheckoutResponse> {
    api.post("ventas/checkout", "Error al registrar el pedido")
        .bearer_if_present()
        .json(order)?
        .fetch()
        .await
}

pub async fn create_transaction(api: &ApiClient, movement: &TransactionForm) -> ApiResult<()> {
    api.post("finanzas/", "Error al registrar movimiento")
        .bearer_if_present()
        .json(movement)?
        .execute()
        .await
}

pub async fn fetch_balance(api: &ApiClient, period: BalancePeriod) -> ApiResult<BalanceReport> {
    api.get("finanzas/balance", "Error cargando datos")
        .bearer_if_present()
        .query(&period.query())
        .fetch()
        .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{SaleStatus, TransactionKind};
    use crate::services::mock::{client, client_with_token, last_json, MockTransport};
    use crate::services::Method;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;
    use std::rc::Rc;

    #[test]
    fn all_sales_has_no_status_param() {
        let mock = Rc::new(MockTransport::new());
        mock.respond(200, "[]");
        mock.respond(200, "[]");
        let api = client(&mock);

        tokio_test::block_on(fetch_sales(&api, None)).unwrap();
        assert_eq!(mock.last_request().url, "http://api.test/ventas/");

        tokio_test::block_on(fetch_sales(&api, Some(SaleStatus::Pending))).unwrap();
        assert_eq!(mock.last_request().url, "http://api.test/ventas/?status=PENDING");
    }

    #[test]
    fn confirm_returns_invoice() {
        let mock = Rc::new(MockTransport::new());
        mock.respond(200, r#"{"message":"ok","invoice_url":"https://f.ec/1.pdf"}"#);
        let api = client_with_token(&mock, "tok");

        let confirmation = tokio_test::block_on(confirm_sale(&api, 9)).unwrap();
        assert_eq!(confirmation.invoice_url.as_deref(), Some("https://f.ec/1.pdf"));
        let request = mock.last_request();
        assert_eq!(request.method, Method::Put);
        assert_eq!(request.url, "http://api.test/ventas/9/confirmar");
        assert_eq!(request.header("Authorization"), Some("Bearer tok"));
    }

    #[test]
    fn balance_query_per_period() {
        let mock = Rc::new(MockTransport::new());
        mock.respond(200, "{}");
        mock.respond(200, "{}");
        let api = client(&mock);

        tokio_test::block_on(fetch_balance(&api, BalancePeriod::Quarterly(2024, 1))).unwrap();
        assert_eq!(
            mock.last_request().url,
            "http://api.test/finanzas/balance?start_date=2024-01-01&end_date=2024-03-31"
        );

        tokio_test::block_on(fetch_balance(&api, BalancePeriod::Historic)).unwrap();
        assert_eq!(mock.last_request().url, "http://api.test/finanzas/balance");
    }

    #[test]
    fn daily_balance_uses_same_start_and_end() {
        let mock = Rc::new(MockTransport::new());
        mock.respond(200, "{}");
        let api = client(&mock);
        let day = NaiveDate::from_ymd_opt(2025, 2, 3).unwrap();

        tokio_test::block_on(fetch_balance(&api, BalancePeriod::Daily(day))).unwrap();
        assert!(mock
            .last_request()
            .url
            .ends_with("?start_date=2025-02-03&end_date=2025-02-03"));
    }

    #[test]
    fn manual_movement_body() {
        let mock = Rc::new(MockTransport::new());
        mock.respond(201, "{}");
        let api = client(&mock);
        let movement = TransactionForm {
            tipo: TransactionKind::Egreso,
            categoria: "OPERATIVO".to_string(),
            monto: Decimal::new(1250, 2),
            descripcion: Some("Parches".to_string()),
        };

        tokio_test::block_on(create_transaction(&api, &movement)).unwrap();
        let body = last_json(&mock);
        assert_eq!(body["tipo"], "EGRESO");
        assert_eq!(body["categoria"], "OPERATIVO");
    }
}
