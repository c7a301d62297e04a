//! Store orders, manual ledger movements and the balance dashboard.

use chrono::NaiveDate;
use dioxus::prelude::*;

use crate::app::api_context::{use_api, use_config};
use crate::app::browser;
use crate::app::components::{ErrorAlert, Loading, SelectField, TextArea, TextField};
use crate::app::feedback::use_feedback;
use crate::app::pages::format;
use crate::export;
use crate::models::finance::current_quarter;
use crate::models::{
    BalancePeriod, BalanceReport, MembershipStats, SaleFilter, SaleOrder, SaleStatus,
    TransactionKind,
};
use crate::services;
use crate::validation::TransactionDraft;
use crate::whatsapp;

fn parse_filter(value: &str) -> SaleFilter {
    match value {
        "PENDING" => Some(SaleStatus::Pending),
        "PAID" => Some(SaleStatus::Paid),
        "CANCELLED" => Some(SaleStatus::Cancelled),
        _ => None,
    }
}

fn products_summary(order: &SaleOrder) -> String {
    order
        .items
        .iter()
        .map(|item| {
            format!(
                "{} x{}",
                item.product_name.as_deref().unwrap_or("Producto"),
                item.quantity
            )
        })
        .collect::<Vec<_>>()
        .join(", ")
}

/// Store orders. Pending orders can be confirmed or cancelled.
#[component]
pub fn Records() -> Element {
    let api = use_api();
    let config = use_config();
    let feedback = use_feedback();
    let mut filter = use_signal(|| "PENDING".to_string());

    let mut sales = use_resource({
        let api = api.clone();
        move || {
            let api = api.clone();
            let status = parse_filter(&filter());
            async move { services::finances::fetch_sales(&api, status).await }
        }
    });

    let confirm_payment = {
        let api = api.clone();
        move |order: SaleOrder| {
            let api = api.clone();
            let club = config.club_name.clone();
            spawn(async move {
                let id = order.id_sale;
                if !browser::confirm(&format!("¿Confirmar pago de la Orden #{}?", id)) {
                    return;
                }
                match services::finances::confirm_sale(&api, id).await {
                    Ok(confirmation) => {
                        feedback.success(format!("Orden #{} procesada", id));
                        sales.restart();
                        let phone = order
                            .customer_phone
                            .as_deref()
                            .and_then(whatsapp::normalize_phone);
                        match phone {
                            Some(phone) => {
                                let text = whatsapp::payment_confirmed_message(
                                    &club,
                                    &order.customer_name,
                                    id,
                                    confirmation.invoice_url.as_deref(),
                                );
                                browser::open_in_new_tab(&whatsapp::deep_link(&phone, &text));
                            }
                            None => feedback.info("El cliente no registró un teléfono válido para WhatsApp."),
                        }
                    }
                    Err(e) => feedback.api(&e),
                }
            });
        }
    };

    let cancel = move |id: i64| {
        let api = api.clone();
        spawn(async move {
            if !browser::confirm(&format!("¿Cancelar Orden #{}?", id)) {
                return;
            }
            match services::finances::cancel_sale(&api, id).await {
                Ok(()) => {
                    feedback.success(format!("Orden #{} cancelada", id));
                    sales.restart();
                }
                Err(e) => feedback.api(&e),
            }
        });
    };

    let content = match sales.read().clone() {
        None => rsx! { Loading { label: "Cargando ventas..." } },
        Some(Err(e)) => rsx! {
            ErrorAlert { error: e, on_retry: move |_| sales.restart() }
        },
        Some(Ok(orders)) if orders.is_empty() => rsx! {
            p { class: "text-muted", "No hay órdenes para este filtro." }
        },
        Some(Ok(orders)) => {
            let csv = match export::sales_csv(&orders) {
                Ok(csv) => Some(export::data_url(&csv)),
                Err(e) => {
                    tracing::warn!("Sales export failed: {}", e);
                    None
                }
            };
            rsx! {
                if let Some(href) = csv {
                    a { class: "btn", href: "{href}", download: "ventas.csv", "Exportar CSV" }
                }
                table { class: "table",
                    thead {
                        tr {
                            th { "Orden" }
                            th { "Fecha" }
                            th { "Cliente" }
                            th { "Productos" }
                            th { "Total" }
                            th { "Estado" }
                            th { "Acciones" }
                        }
                    }
                    tbody {
                        for order in orders {
                            {
                                let id = order.id_sale;
                                let pending = order.status == SaleStatus::Pending;
                                let target = order.clone();
                                let confirm_payment = confirm_payment.clone();
                                let cancel = cancel.clone();
                                rsx! {
                                    tr { key: "{id}",
                                        td { "#{id}" }
                                        td { "{format::short_date(&order.created_at)}" }
                                        td {
                                            "{order.customer_name}"
                                            if let Some(phone) = order.customer_phone.clone() {
                                                br {}
                                                small { class: "text-muted", "{phone}" }
                                            }
                                        }
                                        td { "{products_summary(&order)}" }
                                        td { "{format::money(order.total_amount)}" }
                                        td { "{order.status.label()}" }
                                        td {
                                            if pending {
                                                button {
                                                    class: "btn btn-primary",
                                                    onclick: move |_| confirm_payment(target.clone()),
                                                    "Confirmar pago"
                                                }
                                                button { class: "btn btn-danger", onclick: move |_| cancel(id), "Cancelar" }
                                            }
                                        }
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    };

    rsx! {
        h2 { "Registros de Ventas" }
        div { class: "filters",
            select {
                value: "{filter}",
                onchange: move |e| filter.set(e.value()),
                option { value: "PENDING", "Pendientes" }
                option { value: "PAID", "Pagadas" }
                option { value: "CANCELLED", "Canceladas" }
                option { value: "ALL", "Todas" }
            }
        }
        {content}
    }
}

const MOVEMENT_CATEGORIES: &[(&str, &str)] = &[
    ("OPERATIVO", "Operativo"),
    ("MANTENIMIENTO", "Mantenimiento"),
    ("EVENTOS", "Eventos"),
    ("AUSPICIO", "Auspicio"),
    ("MEMBRESIA", "Membresía"),
    ("OTRO", "Otro"),
];

/// Manual income or expense entry.
#[component]
pub fn CreateRecord() -> Element {
    let api = use_api();
    let feedback = use_feedback();
    let mut draft = use_signal(TransactionDraft::default);
    let mut saving = use_signal(|| false);

    let submit = move |_| {
        let api = api.clone();
        async move {
            let form = match draft.read().validate() {
                Ok(form) => form,
                Err(e) => {
                    feedback.invalid(&e);
                    return;
                }
            };
            saving.set(true);
            match services::finances::create_transaction(&api, &form).await {
                Ok(()) => {
                    feedback.success("Movimiento registrado");
                    draft.set(TransactionDraft::default());
                }
                Err(e) => feedback.api(&e),
            }
            saving.set(false);
        }
    };

    let d = draft();
    let kind = match d.tipo {
        TransactionKind::Ingreso => "INGRESO",
        TransactionKind::Egreso => "EGRESO",
    };
    let kinds = [TransactionKind::Ingreso, TransactionKind::Egreso]
        .iter()
        .map(|k| (k.label().to_uppercase(), k.label().to_string()))
        .collect::<Vec<_>>();
    let categories = MOVEMENT_CATEGORIES
        .iter()
        .map(|(v, l)| (v.to_string(), l.to_string()))
        .collect::<Vec<_>>();

    rsx! {
        h2 { "Registrar Movimiento" }
        div { class: "card",
            div { class: "form-grid",
                SelectField {
                    label: "Tipo *",
                    value: kind.to_string(),
                    options: kinds,
                    on_change: move |v: String| {
                        draft.write().tipo = if v == "INGRESO" {
                            TransactionKind::Ingreso
                        } else {
                            TransactionKind::Egreso
                        };
                    },
                }
                SelectField {
                    label: "Categoría *",
                    value: d.categoria,
                    options: categories,
                    on_change: move |v| draft.write().categoria = v,
                }
                TextField {
                    label: "Monto *",
                    kind: "number",
                    value: d.monto,
                    placeholder: "0.00",
                    on_input: move |v| draft.write().monto = v,
                }
            }
            TextArea {
                label: "Descripción",
                value: d.descripcion,
                on_input: move |v| draft.write().descripcion = v,
            }
            div { class: "form-buttons",
                button { class: "btn btn-primary", disabled: saving(), onclick: submit, "Registrar" }
            }
        }
    }
}

/// Which control drives the balance period.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum PeriodMode {
    Historic,
    Annual,
    Quarterly,
    Daily,
}

impl PeriodMode {
    fn parse(value: &str) -> Self {
        match value {
            "ANUAL" => PeriodMode::Annual,
            "TRIMESTRAL" => PeriodMode::Quarterly,
            "DIARIO" => PeriodMode::Daily,
            _ => PeriodMode::Historic,
        }
    }

    fn as_str(&self) -> &'static str {
        match self {
            PeriodMode::Historic => "HISTORICO",
            PeriodMode::Annual => "ANUAL",
            PeriodMode::Quarterly => "TRIMESTRAL",
            PeriodMode::Daily => "DIARIO",
        }
    }
}

/// Period built from the selector controls; invalid input falls back to
/// the whole history.
fn selected_period(mode: PeriodMode, year: &str, quarter: &str, day: &str) -> BalancePeriod {
    let year = year.trim().parse::<i32>().ok();
    match mode {
        PeriodMode::Historic => BalancePeriod::Historic,
        PeriodMode::Annual => year.map(BalancePeriod::Annual).unwrap_or(BalancePeriod::Historic),
        PeriodMode::Quarterly => match (year, quarter.parse::<u32>().ok()) {
            (Some(y), Some(q)) if (1..=4).contains(&q) => BalancePeriod::Quarterly(y, q),
            _ => BalancePeriod::Historic,
        },
        PeriodMode::Daily => NaiveDate::parse_from_str(day, "%Y-%m-%d")
            .map(BalancePeriod::Daily)
            .unwrap_or(BalancePeriod::Historic),
    }
}

const MEMBERSHIP_LEGEND: [(&str, &str); 3] = [
    ("ACTIVE", "Activas"),
    ("PENDING", "Pendientes"),
    ("INACTIVE", "Inactivas"),
];

fn trend(percent: Option<f64>) -> String {
    match percent {
        Some(p) if p >= 0.0 => format!("▲ {:.1}%", p),
        Some(p) => format!("▼ {:.1}%", p.abs()),
        None => String::new(),
    }
}

#[component]
pub fn FinancePanel() -> Element {
    let api = use_api();
    let today = chrono::Local::now().date_naive();
    let (this_year, this_quarter) = current_quarter(today);

    let mut mode = use_signal(|| PeriodMode::Quarterly);
    let mut year = use_signal(move || this_year.to_string());
    let mut quarter = use_signal(move || this_quarter.to_string());
    let mut day = use_signal(move || today.format("%Y-%m-%d").to_string());

    let period = use_memo(move || selected_period(mode(), &year(), &quarter(), &day()));

    let mut report = use_resource({
        let api = api.clone();
        move || {
            let api = api.clone();
            let period = period();
            async move { services::finances::fetch_balance(&api, period).await }
        }
    });

    // Membership counters are optional decoration; a failure only hides them
    let stats = use_resource(move || {
        let api = api.clone();
        async move { services::memberships::membership_stats(&api).await }
    });
    let stats = match &*stats.read() {
        Some(Ok(stats)) => Some(stats.clone()),
        Some(Err(e)) => {
            tracing::warn!("Membership stats unavailable: {}", e);
            None
        }
        None => None,
    };

    let content = match report.read().clone() {
        None => rsx! { Loading { label: "Calculando balance..." } },
        Some(Err(e)) => rsx! {
            ErrorAlert {
                error: e,
                context: "Error cargando datos",
                on_retry: move |_| report.restart(),
            }
        },
        Some(Ok(data)) => rsx! {
            BalanceView { period: period(), report: data, stats }
        },
    };

    let max_day = today.format("%Y-%m-%d").to_string();
    let years: Vec<(String, String)> = (this_year - 4..=this_year)
        .rev()
        .map(|y| (y.to_string(), y.to_string()))
        .collect();

    rsx! {
        h2 { "Panel Financiero" }
        div { class: "filters",
            select {
                value: "{mode().as_str()}",
                onchange: move |e| mode.set(PeriodMode::parse(&e.value())),
                option { value: "HISTORICO", "Histórico" }
                option { value: "ANUAL", "Por Año" }
                option { value: "TRIMESTRAL", "Por Trimestre" }
                option { value: "DIARIO", "Por Día" }
            }
            if matches!(mode(), PeriodMode::Annual | PeriodMode::Quarterly) {
                select {
                    value: "{year}",
                    onchange: move |e| year.set(e.value()),
                    for (value, label) in years {
                        option { key: "{value}", value: "{value}", selected: value == year(), "{label}" }
                    }
                }
            }
            if mode() == PeriodMode::Quarterly {
                select {
                    value: "{quarter}",
                    onchange: move |e| quarter.set(e.value()),
                    for q in 1..=4u32 {
                        option { key: "{q}", value: "{q}", selected: q.to_string() == quarter(), "Q{q}" }
                    }
                }
            }
            if mode() == PeriodMode::Daily {
                input {
                    r#type: "date",
                    value: "{day}",
                    max: "{max_day}",
                    onchange: move |e| day.set(e.value()),
                }
            }
        }
        {content}
    }
}

#[component]
fn BalanceView(period: BalancePeriod, report: BalanceReport, stats: Option<MembershipStats>) -> Element {
    let summary = report.resumen.clone();
    let ratio = format!("{:.1}%", report.expense_ratio());
    let critical = report.is_critical();
    let kpis = report.kpis_calculados.clone();
    let csv = match export::balance_csv(&period, &report) {
        Ok(csv) => Some(export::data_url(&csv)),
        Err(e) => {
            tracing::warn!("Balance export failed: {}", e);
            None
        }
    };
    let file_name = format!("balance-{}.csv", period.label().replace(' ', "-").to_lowercase());

    rsx! {
        p { class: "text-muted",
            "Periodo: {period.label()}"
            if let Some(href) = csv {
                " · "
                a { href: "{href}", download: "{file_name}", "Exportar CSV" }
            }
        }
        div { class: "grid",
            div { class: "card",
                h4 { "Ingresos Totales" }
                p { class: "kpi", "{format::money_f64(summary.ingresos_totales)}" }
                small { "{trend(kpis.ingresos.trend_percent)}" }
            }
            div { class: "card",
                h4 { "Egresos Totales" }
                p { class: "kpi", "{format::money_f64(summary.egresos_totales)}" }
                small {
                    "Ratio de Gasto: {ratio} "
                    if critical {
                        span { class: "badge badge-danger", "Crítico" }
                    } else {
                        span { class: "badge badge-success", "Sano" }
                    }
                }
            }
            div { class: "card",
                h4 { "Balance" }
                p { class: "kpi", "{format::money_f64(summary.balance)}" }
            }
            div { class: "card",
                h4 { "Membresías" }
                if let Some(stats) = stats.clone() {
                    p { class: "kpi", "{stats.total_memberships}" }
                    ul { class: "legend",
                        for (status, label) in MEMBERSHIP_LEGEND {
                            li { key: "{status}", "{label}: {stats.count(status)} ({stats.percent(status)}%)" }
                        }
                    }
                } else {
                    p { class: "text-muted", "Sin datos" }
                }
            }
            div { class: "card",
                h4 { "Auspicios" }
                p { class: "kpi", {kpis.auspicios.count.unwrap_or(0).to_string()} }
                small { "{trend(kpis.auspicios.trend_percent)}" }
            }
        }
        div { class: "grid",
            div { class: "card",
                h3 { "Productos Top Ventas" }
                if report.top_productos.is_empty() {
                    p { class: "text-muted", "Sin ventas en el periodo." }
                } else {
                    table { class: "table",
                        thead {
                            tr {
                                th { "Producto" }
                                th { "Cantidad" }
                                th { "Ingresos" }
                            }
                        }
                        tbody {
                            for product in report.top_productos.clone() {
                                tr { key: "{product.nombre}",
                                    td { "{product.nombre}" }
                                    td { "{product.cantidad_vendida}" }
                                    td { "{format::money_f64(product.ingresos_generados)}" }
                                }
                            }
                        }
                    }
                }
            }
            div { class: "card",
                h3 { "Evolución Ingresos (12 Meses)" }
                table { class: "table",
                    thead {
                        tr {
                            th { "Mes" }
                            th { "Ingresos" }
                            th { "Egresos" }
                        }
                    }
                    tbody {
                        for point in report.grafico.clone() {
                            tr { key: "{point.name}",
                                td { "{point.name}" }
                                td { "{format::money_f64(point.ingresos)}" }
                                td { "{format::money_f64(point.egresos)}" }
                            }
                        }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn period_selector_builds_quarter() {
        assert_eq!(
            selected_period(PeriodMode::Quarterly, "2025", "3", ""),
            BalancePeriod::Quarterly(2025, 3)
        );
    }

    #[test]
    fn bad_selector_input_means_whole_history() {
        assert_eq!(
            selected_period(PeriodMode::Annual, "dos mil", "", ""),
            BalancePeriod::Historic
        );
        assert_eq!(
            selected_period(PeriodMode::Quarterly, "2025", "5", ""),
            BalancePeriod::Historic
        );
        assert_eq!(
            selected_period(PeriodMode::Daily, "", "", "2025-02-30"),
            BalancePeriod::Historic
        );
    }

    #[test]
    fn daily_selector_parses_date() {
        assert_eq!(
            selected_period(PeriodMode::Daily, "", "", "2025-06-14"),
            BalancePeriod::Daily(NaiveDate::from_ymd_opt(2025, 6, 14).unwrap())
        );
    }

    #[test]
    fn trend_shows_direction() {
        assert_eq!(trend(Some(12.34)), "▲ 12.3%");
        assert_eq!(trend(Some(-5.0)), "▼ 5.0%");
        assert_eq!(trend(None), "");
    }

    #[test]
    fn unknown_filter_lists_everything() {
        assert_eq!(parse_filter("ALL"), None);
        assert_eq!(parse_filter("PAID"), Some(SaleStatus::Paid));
    }
}
