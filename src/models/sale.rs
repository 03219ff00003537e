use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer};

/// One order line from the sales data set
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct SaleRecord {
    #[serde(rename = "Order_ID")]
    pub order_id: String,
    /// Calendar date of the order, time-of-day discarded
    #[serde(rename = "Order_Date", deserialize_with = "deserialize_order_date")]
    pub order_date: NaiveDate,
    #[serde(rename = "Product")]
    pub product: String,
    #[serde(rename = "Quantity")]
    pub quantity: u64,
    #[serde(rename = "Revenue")]
    pub revenue: f64,
    #[serde(rename = "Profit")]
    pub profit: f64,
    #[serde(rename = "Season")]
    pub season: String,
    #[serde(rename = "Fabric")]
    pub fabric: String,
    #[serde(rename = "Location")]
    pub location: String,
}

/// Columns the sales source must provide
pub const SALES_COLUMNS: [&str; 9] = [
    "Order_ID",
    "Order_Date",
    "Product",
    "Quantity",
    "Revenue",
    "Profit",
    "Season",
    "Fabric",
    "Location",
];

// Year-last layouts are month-first; day-first only when the leading field
// cannot be a month
const DATE_FORMATS: [&str; 6] = ["%Y-%m-%d", "%Y/%m/%d", "%m-%d-%Y", "%m/%d/%Y", "%d-%m-%Y", "%d/%m/%Y"];

const DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y/%m/%d %H:%M:%S",
];

/// Parse an order date, keeping only the calendar date
pub fn parse_order_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();

    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(raw, fmt).ok())
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
                .map(|dt| dt.date())
        })
}

fn deserialize_order_date<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_order_date(&raw)
        .ok_or_else(|| serde::de::Error::custom(format!("unrecognised Order_Date '{}'", raw)))
}
