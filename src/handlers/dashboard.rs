use crate::analytics::aggregations::{
    argmax, date_bounds, filter_by_range, product_options, revenue_trend, sum_by, top_n,
};
use crate::analytics::format::plain_amount;
use crate::analytics::kpi::{compute_kpis, kpi_cards};
use crate::auth::gate::require_dashboard_access;
use crate::core::error::DashboardError;
use crate::core::state::AppState;
use crate::models::dashboard::{ChartSection, DashboardQuery, DashboardResponse, DateRange, ALL_PRODUCTS};
use crate::models::sale::SaleRecord;
use crate::utils::cookie::session_token;
use crate::utils::time::today;
use axum::{
    extract::{Query, State},
    http::HeaderMap,
    response::Json,
};
use chrono::NaiveDate;
use std::sync::Arc;
use tracing::debug;

const TOP_LOCATIONS: usize = 10;

/// Protected sales dashboard
///
/// GET /dashboard?start=<YYYY-MM-DD>&end=<YYYY-MM-DD>&product=<name|All>
pub async fn dashboard_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Query(query): Query<DashboardQuery>,
) -> Result<Json<DashboardResponse>, DashboardError> {
    let token = session_token(&headers);
    let session = state.sessions.get(token.as_deref());

    let user = require_dashboard_access(&session, &state.credentials, state.config.auth.gate_mode())
        .inspect_err(|_| state.metrics.increment_gate_rejections())?;

    let sales = state.sales.load_sales()?;
    let response = build_dashboard(&sales, &query, &user.username)?;

    state.metrics.increment_dashboard_views();
    debug!(
        username = %user.username,
        start = %response.date_range.start,
        end = %response.date_range.end,
        product = %response.selected_product,
        "Dashboard rendered"
    );

    Ok(Json(response))
}

fn parse_query_date(name: &str, raw: Option<&str>) -> Result<Option<NaiveDate>, DashboardError> {
    match raw.map(str::trim).filter(|s| !s.is_empty()) {
        None => Ok(None),
        Some(value) => NaiveDate::parse_from_str(value, "%Y-%m-%d")
            .map(Some)
            .map_err(|_| DashboardError::InvalidParameter(format!("{} must be a YYYY-MM-DD date, got '{}'", name, value))),
    }
}

/// Resolve the requested range, defaulting each end to the data's bounds
fn resolve_range(query: &DashboardQuery, bounds: Option<DateRange>) -> Result<DateRange, DashboardError> {
    let start = parse_query_date("start", query.start.as_deref())?;
    let end = parse_query_date("end", query.end.as_deref())?;

    let fallback = today();
    let range = DateRange {
        start: start.or(bounds.map(|b| b.start)).unwrap_or(fallback),
        end: end.or(bounds.map(|b| b.end)).unwrap_or(fallback),
    };

    if range.start > range.end {
        return Err(DashboardError::InvalidParameter(format!(
            "start ({}) must not be after end ({})",
            range.start, range.end
        )));
    }

    Ok(range)
}

/// Compute every chart and KPI for one dashboard request
pub fn build_dashboard(
    sales: &[SaleRecord],
    query: &DashboardQuery,
    username: &str,
) -> Result<DashboardResponse, DashboardError> {
    let available_range = date_bounds(sales);
    let date_range = resolve_range(query, available_range)?;
    let selected_product = query
        .product
        .as_deref()
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .unwrap_or(ALL_PRODUCTS)
        .to_string();

    let filtered: Vec<&SaleRecord> = filter_by_range(sales, &date_range);

    let trend = revenue_trend(&filtered, &selected_product);
    let (trend_insight, trend_warning) = if trend.is_empty() {
        (None, Some("No data available for the selected product in this date range.".to_string()))
    } else {
        let max = trend.iter().map(|p| p.revenue).fold(f64::MIN, f64::max);
        let min = trend.iter().map(|p| p.revenue).fold(f64::MAX, f64::min);
        (
            Some(format!(
                "Between {} and {}, the highest revenue recorded was {}, and the lowest was {}.",
                date_range.start,
                date_range.end,
                plain_amount(max),
                plain_amount(min)
            )),
            None,
        )
    };

    let product_sales = sum_by(&filtered, |s| s.product.as_str(), |s| s.quantity as f64);
    let product_insight = argmax(&product_sales)
        .map(|top| format!("The {} product had the highest sales in this period.", top));

    let season_revenue = sum_by(&filtered, |s| s.season.as_str(), |s| s.revenue);
    let season_insight = argmax(&season_revenue)
        .map(|top| format!("The {} season generated the most revenue.", top));

    let fabric_profit = sum_by(&filtered, |s| s.fabric.as_str(), |s| s.profit);
    let fabric_insight = argmax(&fabric_profit)
        .map(|top| format!("The {} fabric was the most profitable overall.", top));

    let top_locations = top_n(sum_by(&filtered, |s| s.location.as_str(), |s| s.revenue), TOP_LOCATIONS);
    let location_insight = top_locations
        .first()
        .map(|top| format!("The city with the highest revenue is {}.", top.key));

    let kpis = compute_kpis(&filtered);
    let cards = kpi_cards(&kpis);

    Ok(DashboardResponse {
        username: username.to_string(),
        date_range,
        available_range,
        products: product_options(sales),
        revenue_trend: ChartSection {
            title: format!("Revenue Trend Over Time ({})", selected_product),
            data: trend,
            insight: trend_insight,
            warning: trend_warning,
        },
        selected_product,
        product_sales: ChartSection {
            title: "Product-wise Sales (Quantity)".to_string(),
            data: product_sales,
            insight: product_insight,
            warning: None,
        },
        season_revenue: ChartSection {
            title: "Revenue Contribution by Season".to_string(),
            data: season_revenue,
            insight: season_insight,
            warning: None,
        },
        fabric_profit: ChartSection {
            title: "Fabric-wise Profit".to_string(),
            data: fabric_profit,
            insight: fabric_insight,
            warning: None,
        },
        top_locations: ChartSection {
            title: "Top 10 Locations by Revenue".to_string(),
            data: top_locations,
            insight: location_insight,
            warning: None,
        },
        kpis,
        kpi_cards: cards,
    })
}
