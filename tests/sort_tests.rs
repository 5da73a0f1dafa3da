use prmon::app::sort::{SortDirection, sort_by_date};
use prmon::monitor::models::{PullRequestRecord, RecordId};

fn record(id: i64, date: Option<&str>) -> PullRequestRecord {
    PullRequestRecord {
        id: RecordId::Number(id),
        title: String::new(),
        user: None,
        date: date.map(Into::into),
        screenshot_path: None,
    }
}

fn ids(records: &[PullRequestRecord]) -> Vec<i64> {
    records
        .iter()
        .map(|r| match r.id {
            RecordId::Number(n) => n,
            RecordId::Text(_) => unreachable!(),
        })
        .collect()
}

#[test]
fn test_ascending_and_descending() {
    let records = vec![
        record(1, Some("2024-01-05")),
        record(2, Some("2024-01-01")),
        record(3, Some("2024-01-03")),
    ];
    assert_eq!(
        ids(&sort_by_date(&records, SortDirection::Ascending)),
        vec![2, 3, 1]
    );
    assert_eq!(
        ids(&sort_by_date(&records, SortDirection::Descending)),
        vec![1, 3, 2]
    );
}

#[test]
fn test_equal_dates_keep_relative_order() {
    let records = vec![
        record(1, Some("2024-01-02")),
        record(2, Some("2024-01-01")),
        record(3, Some("2024-01-02")),
        record(4, Some("2024-01-01")),
    ];
    assert_eq!(
        ids(&sort_by_date(&records, SortDirection::Ascending)),
        vec![2, 4, 1, 3]
    );
    assert_eq!(
        ids(&sort_by_date(&records, SortDirection::Descending)),
        vec![1, 3, 2, 4]
    );
}

#[test]
fn test_sort_is_idempotent_for_fixed_direction() {
    let records = vec![
        record(1, Some("2024-03-01")),
        record(2, None),
        record(3, Some("2024-01-01T10:00:00Z")),
        record(4, Some("garbage")),
        record(5, Some("2024-01-01 10:00:00")),
        record(6, Some("2023-12-31")),
    ];
    for direction in [SortDirection::Ascending, SortDirection::Descending] {
        let once = sort_by_date(&records, direction);
        let twice = sort_by_date(&once, direction);
        assert_eq!(once, twice);
    }
}

#[test]
fn test_undated_records_keep_their_slots() {
    let records = vec![
        record(1, Some("2024-03-01")),
        record(2, Some("soon")),
        record(3, Some("2024-01-01")),
        record(4, None),
        record(5, Some("2024-02-01")),
    ];
    assert_eq!(
        ids(&sort_by_date(&records, SortDirection::Ascending)),
        vec![3, 2, 5, 4, 1]
    );
}

#[test]
fn test_all_unparseable_is_a_no_op() {
    let records = vec![record(1, Some("a")), record(2, None), record(3, Some("b"))];
    assert_eq!(
        ids(&sort_by_date(&records, SortDirection::Descending)),
        vec![1, 2, 3]
    );
}

#[test]
fn test_mixed_timezones_compare_chronologically() {
    let records = vec![
        record(1, Some("2024-01-01T10:00:00+05:00")), // 05:00Z
        record(2, Some("2024-01-01T06:00:00Z")),
        record(3, Some("2024-01-01T04:00:00")), // naive, taken as UTC
    ];
    assert_eq!(
        ids(&sort_by_date(&records, SortDirection::Ascending)),
        vec![3, 1, 2]
    );
}

#[test]
fn test_empty_input() {
    assert!(sort_by_date(&[], SortDirection::Ascending).is_empty());
}
