//! Number formatting for KPI cards and insight text.

const CRORE: f64 = 1e7;
const LAKH: f64 = 1e5;

/// Format an amount with lakh (L) and crore (Cr) suffixes above 1e5.
///
/// Smaller values are rounded to whole units and comma-grouped.
pub fn format_inr(value: f64) -> String {
    if value >= CRORE {
        format!("{:.2} Cr", value / CRORE)
    } else if value >= LAKH {
        format!("{:.2} L", value / LAKH)
    } else {
        group_thousands(value)
    }
}

/// Round to a whole number, halves to even, and insert a comma every three digits
pub fn group_thousands(value: f64) -> String {
    let rounded = value.round_ties_even();
    if !rounded.is_finite() {
        return rounded.to_string();
    }
    let negative = rounded < 0.0;
    group_digits(rounded.abs() as u64, negative)
}

pub fn group_integer(value: u64) -> String {
    group_digits(value, false)
}

fn group_digits(value: u64, negative: bool) -> String {
    let mut buf = itoa::Buffer::new();
    let digits = buf.format(value);

    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if negative && value != 0 {
        out.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Amount as recorded, without grouping or rounding. Whole values drop the
/// fractional part: `3000`, `1234.56`.
pub fn plain_amount(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        value.to_string()
    }
}

/// Currency label as shown on the KPI cards
pub fn rupees(value: f64) -> String {
    format!("₹ {}", group_thousands(value))
}
