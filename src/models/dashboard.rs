use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Product filter value meaning "no filter"
pub const ALL_PRODUCTS: &str = "All";

#[derive(Debug, Deserialize, Serialize)]
pub struct LoginForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    pub success: bool,
    pub message: String,
    pub username: String,
    pub user_type: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SessionResponse {
    pub logged_in: bool,
    pub username: Option<String>,
    pub user_type: Option<String>,
}

/// Query string of `GET /dashboard`
#[derive(Debug, Default, Deserialize)]
pub struct DashboardQuery {
    pub start: Option<String>,
    pub end: Option<String>,
    pub product: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RevenuePoint {
    pub date: NaiveDate,
    pub revenue: f64,
}

/// One bar/slice of a grouped chart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupTotal {
    pub key: String,
    pub value: f64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ChartSection<T> {
    pub title: String,
    pub data: Vec<T>,
    pub insight: Option<String>,
    pub warning: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Kpis {
    pub total_revenue: f64,
    pub total_quantity: u64,
    pub average_order_value: f64,
    pub best_selling_product: String,
    pub retention_rate: f64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct KpiCard {
    pub label: String,
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub compact: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DashboardResponse {
    pub username: String,
    pub date_range: DateRange,
    /// Bounds of the whole data set, for the range selector
    pub available_range: Option<DateRange>,
    pub products: Vec<String>,
    pub selected_product: String,
    pub revenue_trend: ChartSection<RevenuePoint>,
    pub product_sales: ChartSection<GroupTotal>,
    pub season_revenue: ChartSection<GroupTotal>,
    pub fabric_profit: ChartSection<GroupTotal>,
    pub top_locations: ChartSection<GroupTotal>,
    pub kpis: Kpis,
    pub kpi_cards: Vec<KpiCard>,
}
