use chrono::{DateTime, Local, Utc};

pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Brazilian currency formatting, e.g. `R$ 1.234,50`.
pub fn format_currency(value: f64) -> String {
    let cents = (value * 100.0).round() as i64;
    let sign = if cents < 0 { "-" } else { "" };
    let cents = cents.abs();
    format!(
        "{sign}R$ {},{:02}",
        group_thousands(cents / 100),
        cents % 100
    )
}

/// Quantities print without trailing zeros and with a decimal comma.
pub fn format_quantity(value: f64) -> String {
    value.to_string().replace('.', ",")
}

pub fn format_datetime(value: &DateTime<Utc>) -> String {
    value
        .with_timezone(&Local)
        .format("%d/%m/%Y %H:%M")
        .to_string()
}

fn group_thousands(n: i64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push('.');
        }
        out.push(c);
    }
    out
}
