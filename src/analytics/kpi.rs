use crate::analytics::aggregations::{argmax, sum_by};
use crate::analytics::format::{format_inr, group_integer, rupees};
use crate::models::dashboard::{KpiCard, Kpis};
use crate::models::sale::SaleRecord;
use std::collections::HashSet;

pub const NOT_AVAILABLE: &str = "N/A";

/// Headline numbers for the filtered rows
pub fn compute_kpis(sales: &[&SaleRecord]) -> Kpis {
    let total_revenue: f64 = sales.iter().map(|s| s.revenue).sum();
    let total_quantity: u64 = sales.iter().map(|s| s.quantity).sum();

    let average_order_value = if sales.is_empty() {
        0.0
    } else {
        total_revenue / sales.len() as f64
    };

    let by_product = sum_by(sales, |s| s.product.as_str(), |s| s.quantity as f64);
    let best_selling_product = argmax(&by_product).unwrap_or(NOT_AVAILABLE).to_string();

    Kpis {
        total_revenue,
        total_quantity,
        average_order_value,
        best_selling_product,
        retention_rate: retention_rate(sales),
    }
}

/// Repeat orders as a percentage of distinct order ids.
///
/// A row counts as a repeat when its `Order_ID` already appeared earlier in
/// the filtered rows.
pub fn retention_rate(sales: &[&SaleRecord]) -> f64 {
    let mut seen: HashSet<&str> = HashSet::with_capacity(sales.len());
    let mut repeats = 0usize;
    for sale in sales {
        if !seen.insert(sale.order_id.as_str()) {
            repeats += 1;
        }
    }

    if seen.is_empty() {
        0.0
    } else {
        repeats as f64 / seen.len() as f64 * 100.0
    }
}

fn card(label: &str, value: String, compact: Option<String>) -> KpiCard {
    KpiCard {
        label: label.to_string(),
        value,
        compact,
    }
}

/// Display cards in dashboard order. Currency cards also carry a lakh/crore
/// rendering for narrow layouts.
pub fn kpi_cards(kpis: &Kpis) -> Vec<KpiCard> {
    vec![
        card(
            "Total Revenue",
            rupees(kpis.total_revenue),
            Some(format_inr(kpis.total_revenue)),
        ),
        card("Total Quantity Sold", group_integer(kpis.total_quantity), None),
        card(
            "Avg. Order Value (AOV)",
            rupees(kpis.average_order_value),
            Some(format_inr(kpis.average_order_value)),
        ),
        card("Best Selling Product", kpis.best_selling_product.clone(), None),
        card("Customer Retention Rate", format!("{:.2}%", kpis.retention_rate), None),
    ]
}
