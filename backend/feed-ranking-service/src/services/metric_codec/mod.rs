// ============================================
// Metric Codec (views / age labels)
// ============================================
//
// Two lossy label codecs shared by the feed presenter and the scorer:
//
// 1. View counts  <-> magnitude labels   ("1.2 Juta", "850.0 Ribu", "999")
// 2. Timestamps   <-> relative-age labels ("5 hari lalu", "2 minggu lalu")
//
// Precision loss:
// - format_views keeps one decimal of the magnitude unit, so decoding is exact
//   below 1,000 and off by at most half a display step above (50 views in the
//   Ribu range, 50,000 in the Juta range).
// - age_in_days cannot see below one day; minutes and hours decode to 0, and
//   weeks/months decode to 7/30 days per unit.

use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;

pub const MILLIONS_LABEL: &str = "Juta";
pub const THOUSANDS_LABEL: &str = "Ribu";
pub const JUST_NOW_LABEL: &str = "Baru saja";

/// Age assumed for labels that carry no recognizable unit (absolute dates,
/// garbage). Keeps the recency component at zero.
pub const UNKNOWN_AGE_DAYS: u32 = 365;

static NON_NUMERIC: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^0-9.]").expect("Invalid non-numeric regex"));

/// Longest prefix with at most one dot.
static LEADING_NUMBER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d*(?:\.\d*)?").expect("Invalid leading number regex"));

static MAGNITUDE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)(juta|ribu)").expect("Invalid magnitude regex"));

static AGE_LABEL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)([0-9]+)\s*(menit|jam|hari|minggu|bulan)").expect("Invalid age label regex")
});

/// Render a raw view count as a magnitude label.
pub fn format_views(views: u64) -> String {
    if views >= 1_000_000 {
        format!("{:.1} {}", views as f64 / 1_000_000.0, MILLIONS_LABEL)
    } else if views >= 1_000 {
        format!("{:.1} {}", views as f64 / 1_000.0, THOUSANDS_LABEL)
    } else {
        views.to_string()
    }
}

/// Decode a magnitude label back into a view count. Never NaN, never negative.
/// Digit strings too long for `f64` saturate to `f64::MAX`, so more digits
/// never rank lower.
pub fn parse_views(label: &str) -> f64 {
    let value = leading_number(label);
    let scale = match MAGNITUDE.captures(label) {
        Some(caps) if caps[1].eq_ignore_ascii_case("juta") => 1_000_000.0,
        Some(_) => 1_000.0,
        None => 1.0,
    };

    (value * scale).min(f64::MAX)
}

/// Keep digits and dots, then parse the leading number.
fn leading_number(label: &str) -> f64 {
    let cleaned = NON_NUMERIC.replace_all(label, "");

    LEADING_NUMBER
        .find(&cleaned)
        .and_then(|m| m.as_str().parse::<f64>().ok())
        .map(|v| v.min(f64::MAX))
        .unwrap_or(0.0)
}

/// Bucket the time since `timestamp` into a relative-age label.
/// Timestamps in the future read as "just now".
pub fn to_relative_age(timestamp: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let elapsed = now - timestamp;
    let minutes = elapsed.num_minutes();
    let hours = elapsed.num_hours();
    let days = elapsed.num_days();
    let weeks = days / 7;
    // 28-29 days would otherwise read "0 bulan lalu"
    let months = (days / 30).max(1);

    if minutes < 1 {
        JUST_NOW_LABEL.to_string()
    } else if minutes < 60 {
        format!("{} menit lalu", minutes)
    } else if hours < 24 {
        format!("{} jam lalu", hours)
    } else if days < 7 {
        format!("{} hari lalu", days)
    } else if weeks < 4 {
        format!("{} minggu lalu", weeks)
    } else if months < 12 {
        format!("{} bulan lalu", months)
    } else {
        // id-ID short date
        timestamp.format("%-d/%-m/%Y").to_string()
    }
}

/// Coarse inverse of `to_relative_age`, in whole days.
pub fn age_in_days(label: &str) -> u32 {
    let label = label.trim();
    if label.eq_ignore_ascii_case(JUST_NOW_LABEL) {
        return 0;
    }

    let Some(caps) = AGE_LABEL.captures(label) else {
        return UNKNOWN_AGE_DAYS;
    };
    let n: u32 = caps[1].parse().unwrap_or(u32::MAX);

    match caps[2].to_lowercase().as_str() {
        "menit" | "jam" => 0,
        "hari" => n,
        "minggu" => n.saturating_mul(7),
        "bulan" => n.saturating_mul(30),
        _ => UNKNOWN_AGE_DAYS,
    }
}
