use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

use crate::monitor::models::PullRequestRecord;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn flipped(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SortDirection::Ascending => "Ascending",
            SortDirection::Descending => "Descending",
        }
    }
}

const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Parse a record date. Naive values are taken as UTC, plain dates as midnight.
pub fn parse_date(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    for fmt in NAIVE_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Some(dt.and_utc());
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
}

/// Return `records` stably ordered by date in `direction`.
///
/// Records whose date is missing or unparseable stay in the slot they
/// occupied; the dated records are sorted among the remaining slots.
pub fn sort_by_date(
    records: &[PullRequestRecord],
    direction: SortDirection,
) -> Vec<PullRequestRecord> {
    let keyed: Vec<(usize, Option<DateTime<Utc>>)> = records
        .iter()
        .enumerate()
        .map(|(i, r)| (i, r.date.as_deref().and_then(parse_date)))
        .collect();

    let mut dated: Vec<(usize, DateTime<Utc>)> = keyed
        .iter()
        .filter_map(|(i, d)| d.map(|d| (*i, d)))
        .collect();
    // sort_by is stable, so equal dates keep their relative order in both directions
    match direction {
        SortDirection::Ascending => dated.sort_by(|a, b| a.1.cmp(&b.1)),
        SortDirection::Descending => dated.sort_by(|a, b| b.1.cmp(&a.1)),
    }

    let mut dated = dated.into_iter();
    keyed
        .iter()
        .map(|(i, d)| {
            let source = match d {
                Some(_) => dated.next().map(|(j, _)| j).unwrap_or(*i),
                None => *i,
            };
            records[source].clone()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_supported_formats() {
        let expected = "2024-01-05T10:30:00Z".parse::<DateTime<Utc>>().unwrap();
        assert_eq!(parse_date("2024-01-05T10:30:00Z"), Some(expected));
        assert_eq!(parse_date("2024-01-05T12:30:00+02:00"), Some(expected));
        assert_eq!(parse_date("2024-01-05T10:30:00"), Some(expected));
        assert_eq!(parse_date("2024-01-05 10:30:00.000"), Some(expected));
        assert_eq!(parse_date("2024-01-05 10:30"), Some(expected));
        assert!(parse_date("2024-01-05").is_some());
    }

    #[test]
    fn rejects_garbage() {
        assert_eq!(parse_date("yesterday"), None);
        assert_eq!(parse_date(""), None);
        assert_eq!(parse_date("2024-13-45"), None);
    }

    #[test]
    fn direction_flips() {
        assert_eq!(SortDirection::Ascending.flipped(), SortDirection::Descending);
        assert_eq!(SortDirection::Descending.flipped(), SortDirection::Ascending);
    }
}
