//! Display helpers shared by the table and detail views.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

pub const NOT_AVAILABLE: &str = "N/A";

/// `$1.23B` from a billion upwards, `$456.78M` below. Missing or zero caps
/// render as `N/A`.
pub fn market_cap(value: Option<f64>) -> String {
    match value {
        Some(cap) if cap != 0.0 => {
            let billions = cap / 1e9;
            if billions >= 1.0 {
                format!("${billions:.2}B")
            } else {
                format!("${:.2}M", cap / 1e6)
            }
        }
        _ => NOT_AVAILABLE.to_string(),
    }
}

/// Always in billions; used by the detail view.
pub fn market_cap_billions(value: Option<f64>) -> String {
    match value {
        Some(cap) if cap != 0.0 => format!("${:.2}B", cap / 1e9),
        _ => NOT_AVAILABLE.to_string(),
    }
}

pub fn price(value: Option<f64>) -> String {
    match value {
        Some(p) if p != 0.0 => format!("${p:.2}"),
        _ => NOT_AVAILABLE.to_string(),
    }
}

pub fn ratio(value: Option<f64>) -> String {
    match value {
        Some(r) if r != 0.0 => format!("{r:.2}"),
        _ => NOT_AVAILABLE.to_string(),
    }
}

/// `+1.25` / `-0.40`; zero is positive.
pub fn signed(value: f64) -> String {
    if value >= 0.0 {
        format!("+{value:.2}")
    } else {
        format!("{value:.2}")
    }
}

/// Whole number with `,` thousands separators.
/// ```rust
/// use trend_common::format::grouped;
///
/// assert_eq!(grouped(Some(73563082.0)), "73,563,082");
/// ```
pub fn grouped(value: Option<f64>) -> String {
    let Some(value) = value else {
        return NOT_AVAILABLE.to_string();
    };

    let rounded = value.round() as i64;
    let digits = rounded.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if rounded < 0 {
        out.push('-');
    }
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// `M/D/YYYY`, accepting plain dates, RFC 3339 timestamps and naive
/// timestamps. Anything unparseable is shown as received.
pub fn date(value: Option<&str>) -> String {
    let Some(raw) = value else {
        return NOT_AVAILABLE.to_string();
    };

    let parsed = NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.date_naive()))
        .or_else(|| {
            NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
                .ok()
                .map(|dt| dt.date())
        });

    match parsed {
        Some(day) => day.format("%-m/%-d/%Y").to_string(),
        None => raw.to_string(),
    }
}
