use crate::models::dashboard::{DateRange, GroupTotal, RevenuePoint, ALL_PRODUCTS};
use crate::models::sale::SaleRecord;
use chrono::NaiveDate;
use std::collections::{BTreeMap, BTreeSet};

/// Earliest and latest order dates, `None` for an empty data set
pub fn date_bounds(sales: &[SaleRecord]) -> Option<DateRange> {
    let start = sales.iter().map(|s| s.order_date).min()?;
    let end = sales.iter().map(|s| s.order_date).max()?;
    Some(DateRange { start, end })
}

pub fn filter_by_range<'a>(sales: &'a [SaleRecord], range: &DateRange) -> Vec<&'a SaleRecord> {
    sales.iter().filter(|s| range.contains(s.order_date)).collect()
}

/// "All" followed by every distinct product, sorted
pub fn product_options(sales: &[SaleRecord]) -> Vec<String> {
    let distinct: BTreeSet<&str> = sales.iter().map(|s| s.product.as_str()).collect();
    std::iter::once(ALL_PRODUCTS.to_string())
        .chain(distinct.into_iter().map(str::to_string))
        .collect()
}

/// Daily revenue, ascending by date, optionally restricted to one product
pub fn revenue_trend(sales: &[&SaleRecord], product: &str) -> Vec<RevenuePoint> {
    let mut by_date: BTreeMap<NaiveDate, f64> = BTreeMap::new();
    for sale in sales.iter().filter(|s| product == ALL_PRODUCTS || s.product == product) {
        *by_date.entry(sale.order_date).or_insert(0.0) += sale.revenue;
    }
    by_date
        .into_iter()
        .map(|(date, revenue)| RevenuePoint { date, revenue })
        .collect()
}

/// Sum `value` per `key`, ordered by key
pub fn sum_by<K, V>(sales: &[&SaleRecord], key: K, value: V) -> Vec<GroupTotal>
where
    K: Fn(&SaleRecord) -> &str,
    V: Fn(&SaleRecord) -> f64,
{
    let mut totals: BTreeMap<&str, f64> = BTreeMap::new();
    for &sale in sales {
        *totals.entry(key(sale)).or_insert(0.0) += value(sale);
    }
    totals
        .into_iter()
        .map(|(key, value)| GroupTotal { key: key.to_string(), value })
        .collect()
}

/// Largest groups first, keeping key order among equal values
pub fn top_n(mut groups: Vec<GroupTotal>, n: usize) -> Vec<GroupTotal> {
    groups.sort_by(|a, b| b.value.total_cmp(&a.value));
    groups.truncate(n);
    groups
}

/// Key of the largest group; the first one wins ties
pub fn argmax(groups: &[GroupTotal]) -> Option<&str> {
    groups
        .iter()
        .fold(None::<&GroupTotal>, |best, g| match best {
            Some(b) if b.value >= g.value => Some(b),
            _ => Some(g),
        })
        .map(|g| g.key.as_str())
}
