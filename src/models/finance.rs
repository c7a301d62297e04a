use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Store order status as stored by `/ventas`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SaleStatus {
    Pending,
    Paid,
    Cancelled,
}

impl SaleStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SaleStatus::Pending => "PENDING",
            SaleStatus::Paid => "PAID",
            SaleStatus::Cancelled => "CANCELLED",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SaleStatus::Pending => "Pendiente",
            SaleStatus::Paid => "Pagado",
            SaleStatus::Cancelled => "Cancelado",
        }
    }
}

/// Status filter of the sales list; `None` means all orders.
pub type SaleFilter = Option<SaleStatus>;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct SaleItem {
    pub id_item: i64,
    pub resource_id: i64,
    pub quantity: u32,
    pub unit_price: Decimal,
    pub subtotal: Decimal,
    #[serde(default)]
    pub product_name: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct SaleOrder {
    pub id_sale: i64,
    pub customer_name: String,
    #[serde(default)]
    pub customer_phone: Option<String>,
    pub total_amount: Decimal,
    pub status: SaleStatus,
    pub created_at: String,
    #[serde(default)]
    pub items: Vec<SaleItem>,
}

/// Response of `PUT /ventas/{id}/confirmar`.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct SaleConfirmation {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub invoice_url: Option<String>,
}

#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct CheckoutItem {
    pub id_recurso: i64,
    pub quantity: u32,
    pub precio_venta: Decimal,
    pub nombre: String,
}

/// Body of `POST /ventas/checkout`.
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct CheckoutRequest {
    pub customer_name: String,
    pub customer_phone: String,
    pub items: Vec<CheckoutItem>,
    pub total: Decimal,
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct CheckoutResponse {
    #[serde(default)]
    pub order_id: Option<i64>,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TransactionKind {
    Ingreso,
    Egreso,
}

impl TransactionKind {
    pub fn label(&self) -> &'static str {
        match self {
            TransactionKind::Ingreso => "Ingreso",
            TransactionKind::Egreso => "Egreso",
        }
    }
}

/// Manual ledger movement for `POST /finanzas/`.
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct TransactionForm {
    pub tipo: TransactionKind,
    pub categoria: String,
    pub monto: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub descripcion: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Transaction {
    pub id_transaccion: i64,
    pub tipo: TransactionKind,
    pub categoria: String,
    pub monto: Decimal,
    #[serde(default)]
    pub descripcion: Option<String>,
    pub fecha_registro: String,
}

/// Date window of the balance report.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BalancePeriod {
    Annual(i32),
    /// Year and quarter `1..=4`.
    Quarterly(i32, u32),
    Daily(NaiveDate),
    Historic,
}

impl BalancePeriod {
    /// Inclusive start/end dates, `None` for the whole history.
    pub fn range(&self) -> Option<(NaiveDate, NaiveDate)> {
        match *self {
            BalancePeriod::Annual(year) => Some((
                NaiveDate::from_ymd_opt(year, 1, 1)?,
                NaiveDate::from_ymd_opt(year, 12, 31)?,
            )),
            BalancePeriod::Quarterly(year, quarter) => {
                let quarter = quarter.clamp(1, 4);
                let start_month = (quarter - 1) * 3 + 1;
                let end_month = start_month + 2;
                let start = NaiveDate::from_ymd_opt(year, start_month, 1)?;
                Some((start, last_day_of_month(year, end_month)?))
            }
            BalancePeriod::Daily(date) => Some((date, date)),
            BalancePeriod::Historic => None,
        }
    }

    /// Query pairs for `GET /finanzas/balance`.
    pub fn query(&self) -> Vec<(&'static str, String)> {
        match self.range() {
            Some((start, end)) => vec![
                ("start_date", start.format("%Y-%m-%d").to_string()),
                ("end_date", end.format("%Y-%m-%d").to_string()),
            ],
            None => Vec::new(),
        }
    }

    pub fn label(&self) -> String {
        match self {
            BalancePeriod::Annual(year) => format!("Año {}", year),
            BalancePeriod::Quarterly(year, q) => format!("Trim. {} - {}", q, year),
            BalancePeriod::Daily(date) => date.format("%Y-%m-%d").to_string(),
            BalancePeriod::Historic => "Histórico Total".to_string(),
        }
    }
}

fn last_day_of_month(year: i32, month: u32) -> Option<NaiveDate> {
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)?.pred_opt()
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct BalanceSummary {
    #[serde(default)]
    pub ingresos_totales: f64,
    #[serde(default)]
    pub egresos_totales: f64,
    #[serde(default)]
    pub balance: f64,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct Kpi {
    #[serde(default)]
    pub trend_percent: Option<f64>,
    #[serde(default)]
    pub count: Option<u32>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct BalanceKpis {
    #[serde(default)]
    pub ingresos: Kpi,
    #[serde(default)]
    pub egresos: Kpi,
    #[serde(default)]
    pub auspicios: Kpi,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct ChartPoint {
    pub name: String,
    pub ingresos: f64,
    pub egresos: f64,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct TopProduct {
    pub nombre: String,
    pub cantidad_vendida: u32,
    pub ingresos_generados: f64,
}

/// Response of `GET /finanzas/balance`.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct BalanceReport {
    #[serde(default)]
    pub resumen: BalanceSummary,
    #[serde(default)]
    pub kpis_calculados: BalanceKpis,
    #[serde(default)]
    pub grafico: Vec<ChartPoint>,
    #[serde(default)]
    pub top_productos: Vec<TopProduct>,
}

/// Spending above this share of income is flagged on the dashboard.
pub const CRITICAL_EXPENSE_RATIO: f64 = 70.0;

impl BalanceReport {
    /// Expenses as a percentage of income.
    pub fn expense_ratio(&self) -> f64 {
        if self.resumen.ingresos_totales > 0.0 {
            self.resumen.egresos_totales / self.resumen.ingresos_totales * 100.0
        } else {
            0.0
        }
    }

    pub fn is_critical(&self) -> bool {
        self.expense_ratio() > CRITICAL_EXPENSE_RATIO
    }
}

/// Current year and quarter for the default dashboard filter.
pub fn current_quarter(today: NaiveDate) -> (i32, u32) {
    (today.year(), (today.month() - 1) / 3 + 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn annual_period_spans_year() {
        let q = BalancePeriod::Annual(2025).query();
        assert_eq!(
            q,
            vec![
                ("start_date", "2025-01-01".to_string()),
                ("end_date", "2025-12-31".to_string())
            ]
        );
    }

    #[test]
    fn quarterly_period_ends_on_last_day_of_month() {
        assert_eq!(
            BalancePeriod::Quarterly(2024, 1).range(),
            Some((date("2024-01-01"), date("2024-03-31")))
        );
        assert_eq!(
            BalancePeriod::Quarterly(2025, 2).range(),
            Some((date("2025-04-01"), date("2025-06-30")))
        );
        assert_eq!(
            BalancePeriod::Quarterly(2025, 4).range(),
            Some((date("2025-10-01"), date("2025-12-31")))
        );
    }

    #[test]
    fn daily_and_historic_periods() {
        let d = date("2025-07-15");
        assert_eq!(BalancePeriod::Daily(d).range(), Some((d, d)));
        assert!(BalancePeriod::Historic.query().is_empty());
        assert_eq!(BalancePeriod::Historic.label(), "Histórico Total");
    }

    #[test]
    fn expense_ratio_flags_critical_spending() {
        let mut report = BalanceReport::default();
        assert_eq!(report.expense_ratio(), 0.0);

        report.resumen.ingresos_totales = 100.0;
        report.resumen.egresos_totales = 75.0;
        assert!(report.is_critical());

        report.resumen.egresos_totales = 50.0;
        assert!(!report.is_critical());
    }

    #[test]
    fn sale_order_reads_backend_shape() {
        let order: SaleOrder = serde_json::from_value(serde_json::json!({
            "id_sale": 12,
            "customer_name": "Ana",
            "customer_phone": "0991234567",
            "total_amount": 51.0,
            "status": "PENDING",
            "created_at": "2025-06-01T10:00:00",
            "items": [{
                "id_item": 1, "resource_id": 4, "quantity": 2,
                "unit_price": 25.5, "subtotal": 51.0, "product_name": "Jersey"
            }]
        }))
        .unwrap();
        assert_eq!(order.status, SaleStatus::Pending);
        assert_eq!(order.items[0].quantity, 2);
        assert_eq!(order.total_amount, Decimal::new(51, 0));
    }

    #[test]
    fn quarter_of_date() {
        assert_eq!(current_quarter(date("2025-08-09")), (2025, 3));
    }
}
