//! CSV downloads of the sales list and the balance report.

use thiserror::Error;

use crate::models::{BalancePeriod, BalanceReport, SaleOrder};

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("No se pudo generar el archivo: {0}")]
    Csv(#[from] csv::Error),
    #[error("No se pudo generar el archivo: {0}")]
    Buffer(String),
}

fn finish(writer: csv::Writer<Vec<u8>>) -> Result<String, ExportError> {
    let bytes = writer
        .into_inner()
        .map_err(|e| ExportError::Buffer(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| ExportError::Buffer(e.to_string()))
}

pub fn sales_csv(orders: &[SaleOrder]) -> Result<String, ExportError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(["Orden", "Fecha", "Cliente", "Teléfono", "Estado", "Productos", "Total"])?;
    for order in orders {
        let products: Vec<String> = order
            .items
            .iter()
            .map(|item| {
                format!(
                    "{} x{}",
                    item.product_name
                        .clone()
                        .unwrap_or_else(|| format!("Recurso #{}", item.resource_id)),
                    item.quantity
                )
            })
            .collect();
        writer.write_record([
            order.id_sale.to_string(),
            order.created_at.clone(),
            order.customer_name.clone(),
            order.customer_phone.clone().unwrap_or_default(),
            order.status.label().to_string(),
            products.join("; "),
            format!("{:.2}", order.total_amount),
        ])?;
    }
    finish(writer)
}

/// Chart rows followed by a totals row.
pub fn balance_csv(period: &BalancePeriod, report: &BalanceReport) -> Result<String, ExportError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(["Periodo", "Ingresos", "Egresos", "Balance"])?;
    for point in &report.grafico {
        writer.write_record([
            point.name.clone(),
            format!("{:.2}", point.ingresos),
            format!("{:.2}", point.egresos),
            format!("{:.2}", point.ingresos - point.egresos),
        ])?;
    }
    let summary = &report.resumen;
    writer.write_record([
        format!("Total ({})", period.label()),
        format!("{:.2}", summary.ingresos_totales),
        format!("{:.2}", summary.egresos_totales),
        format!("{:.2}", summary.ingresos_totales - summary.egresos_totales),
    ])?;
    finish(writer)
}

/// `href` for an `<a download>` link.
pub fn data_url(csv: &str) -> String {
    format!("data:text/csv;charset=utf-8,{}", urlencoding::encode(csv))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::finance::{BalanceSummary, ChartPoint, SaleItem};
    use crate::models::SaleStatus;
    use rust_decimal::Decimal;

    fn order() -> SaleOrder {
        SaleOrder {
            id_sale: 12,
            customer_name: "Ana, Pérez".to_string(),
            customer_phone: None,
            total_amount: Decimal::new(3350, 2),
            status: SaleStatus::Paid,
            created_at: "2025-06-01T10:00:00".to_string(),
            items: vec![SaleItem {
                id_item: 1,
                resource_id: 4,
                quantity: 2,
                unit_price: Decimal::new(1675, 2),
                subtotal: Decimal::new(3350, 2),
                product_name: Some("Jersey".to_string()),
            }],
        }
    }

    #[test]
    fn sales_rows_are_quoted_when_needed() {
        let csv = sales_csv(&[order()]).unwrap();
        let mut lines = csv.lines();
        assert_eq!(
            lines.next(),
            Some("Orden,Fecha,Cliente,Teléfono,Estado,Productos,Total")
        );
        assert_eq!(
            lines.next(),
            Some("12,2025-06-01T10:00:00,\"Ana, Pérez\",,Pagado,Jersey x2,33.50")
        );
    }

    #[test]
    fn balance_has_totals_row() {
        let report = BalanceReport {
            resumen: BalanceSummary {
                ingresos_totales: 300.0,
                egresos_totales: 120.5,
                balance: 179.5,
            },
            grafico: vec![ChartPoint {
                name: "Ene".to_string(),
                ingresos: 300.0,
                egresos: 120.5,
            }],
            ..Default::default()
        };
        let csv = balance_csv(&BalancePeriod::Annual(2025), &report).unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines[1], "Ene,300.00,120.50,179.50");
        assert_eq!(lines[2], "Total (Año 2025),300.00,120.50,179.50");
    }

    #[test]
    fn data_url_escapes_content() {
        assert_eq!(data_url("a,b\n"), "data:text/csv;charset=utf-8,a%2Cb%0A");
    }
}
