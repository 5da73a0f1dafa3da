use chrono::{DateTime, Utc};

/// Format a timestamp relative to now, e.g. `5m ago`.
pub fn relative_time(dt: &DateTime<Utc>) -> String {
    relative_time_from(dt, &Utc::now())
}

pub fn relative_time_from(dt: &DateTime<Utc>, now: &DateTime<Utc>) -> String {
    let seconds = now.signed_duration_since(dt).num_seconds();
    if seconds < 60 {
        // also covers timestamps slightly in the future
        return "just now".to_string();
    }

    let (value, unit) = match seconds {
        s if s < 3_600 => (s / 60, "m"),
        s if s < 86_400 => (s / 3_600, "h"),
        s if s < 30 * 86_400 => (s / 86_400, "d"),
        s if s < 365 * 86_400 => (s / (30 * 86_400), "mo"),
        s => (s / (365 * 86_400), "y"),
    };
    format!("{value}{unit} ago")
}
