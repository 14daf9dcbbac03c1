use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};
use chrono_tz::America::{New_York, Sao_Paulo};
use zospend_core::{day_span, local_day, DuplicateService, SummaryService};
use zospend_domain::{Category, Expense, ExpenseDraft, ExpenseId};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn new_york(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
    New_York
        .with_ymd_and_hms(y, m, d, h, min, 0)
        .earliest()
        .expect("local time exists")
        .with_timezone(&Utc)
}

fn record(title: &str, amount: i64, created_at: DateTime<Utc>) -> Expense {
    Expense::from_draft(
        ExpenseId::new(),
        ExpenseDraft::new(title, amount, Category::Travel, created_at),
    )
}

#[test]
fn spring_forward_day_lasts_23_hours() {
    let (start, end) = day_span(date(2024, 3, 10), &New_York);
    assert_eq!(end - start, Duration::hours(23));
    assert_eq!(start, Utc.with_ymd_and_hms(2024, 3, 10, 5, 0, 0).unwrap());
    assert_eq!(end, Utc.with_ymd_and_hms(2024, 3, 11, 4, 0, 0).unwrap());
}

#[test]
fn fall_back_day_lasts_25_hours() {
    let (start, end) = day_span(date(2024, 11, 3), &New_York);
    assert_eq!(end - start, Duration::hours(25));
}

#[test]
fn missing_midnight_starts_at_first_valid_instant() {
    // Clocks in São Paulo jumped from 00:00 to 01:00 on 2018-11-04.
    let (start, end) = day_span(date(2018, 11, 4), &Sao_Paulo);
    assert_eq!(start, Utc.with_ymd_and_hms(2018, 11, 4, 3, 0, 0).unwrap());
    assert_eq!(end - start, Duration::hours(23));
}

#[test]
fn window_across_spring_forward_buckets_by_local_midnight() {
    // 23:30 EDT on the 10th is 03:30 UTC on the 11th; a fixed 24h step from
    // the previous midnight would misplace it.
    let late_on_tenth = new_york(2024, 3, 10, 23, 30);
    let early_on_eleventh = new_york(2024, 3, 11, 0, 15);
    let before_change = new_york(2024, 3, 9, 23, 59);
    let records = vec![
        record("Late cab", 3_000, late_on_tenth),
        record("Night bus", 700, early_on_eleventh),
        record("Train", 1_200, before_change),
    ];
    assert_eq!(local_day(late_on_tenth, &New_York), date(2024, 3, 10));

    let now = new_york(2024, 3, 12, 9, 0);
    let report = SummaryService::window_report(&records, 7, now, &New_York);
    assert_eq!(report.daily_totals.len(), 7);
    let by_day = |d: NaiveDate| {
        report
            .daily_totals
            .iter()
            .find(|day| day.date == d)
            .map(|day| day.total_minor)
    };
    assert_eq!(by_day(date(2024, 3, 9)), Some(1_200));
    assert_eq!(by_day(date(2024, 3, 10)), Some(3_000));
    assert_eq!(by_day(date(2024, 3, 11)), Some(700));
    assert_eq!(report.first_day(), Some(date(2024, 3, 6)));
    assert_eq!(report.window_total, 4_900);
}

#[test]
fn window_across_fall_back_keeps_seven_distinct_days() {
    let now = new_york(2024, 11, 6, 12, 0);
    let report = SummaryService::window_report(&[], 7, now, &New_York);
    let dates: Vec<_> = report.daily_totals.iter().map(|day| day.date).collect();
    assert_eq!(dates.first(), Some(&date(2024, 10, 31)));
    assert_eq!(dates.last(), Some(&date(2024, 11, 6)));
    assert!(dates.windows(2).all(|pair| pair[1] - pair[0] == Duration::days(1)));
}

#[test]
fn repeated_hour_does_not_hide_duplicates() {
    // 01:30 EDT and 01:32 EST are 62 minutes apart despite similar wall clocks.
    let first = New_York
        .with_ymd_and_hms(2024, 11, 3, 1, 30, 0)
        .earliest()
        .unwrap()
        .with_timezone(&Utc);
    let second = first + Duration::minutes(62);
    let existing = vec![record("Parking", 1_500, first)];
    let repeat = ExpenseDraft::new("Parking", 1_500, Category::Travel, second);
    assert!(!DuplicateService::is_duplicate(&repeat, &existing, &New_York));
    let quick = ExpenseDraft::new("Parking", 1_500, Category::Travel, first + Duration::minutes(2));
    assert!(DuplicateService::is_duplicate(&quick, &existing, &New_York));
}
