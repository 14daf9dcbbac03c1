use chrono::{Duration, FixedOffset, TimeZone, Utc};
use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use zospend_core::{ChartService, DuplicateService, SummaryService, REPORT_WINDOW_DAYS};
use zospend_domain::{Category, Expense, ExpenseDraft, ExpenseId};

fn build_sample_records(count: usize) -> Vec<Expense> {
    let start = Utc.with_ymd_and_hms(2025, 1, 1, 3, 0, 0).unwrap();
    (0..count)
        .map(|idx| {
            let created_at = start + Duration::minutes(idx as i64 * 37);
            let category = Category::ALL[idx % Category::ALL.len()];
            let draft = ExpenseDraft::new(
                format!("Expense {}", idx % 250),
                10_000 + (idx % 5_000) as i64 * 50,
                category,
                created_at,
            );
            Expense::from_draft(ExpenseId::new(), draft)
        })
        .collect()
}

fn bench_aggregation(c: &mut Criterion) {
    let records = build_sample_records(black_box(10_000));
    let zone = FixedOffset::east_opt(5 * 3600 + 1800).unwrap();
    let now = records.last().map(|record| record.created_at).unwrap();

    c.bench_function("window_report_10k", |b| {
        b.iter(|| {
            let report = SummaryService::window_report(&records, REPORT_WINDOW_DAYS, now, &zone);
            black_box(ChartService::compute_axis(&report.daily_series()));
        })
    });

    c.bench_function("group_today_10k", |b| {
        b.iter_batched(
            || SummaryService::records_on(&records, now.with_timezone(&zone).date_naive(), &zone),
            |today| black_box(SummaryService::group_by_category(&today, Default::default())),
            BatchSize::SmallInput,
        );
    });
}

fn bench_duplicate_check(c: &mut Criterion) {
    let records = build_sample_records(black_box(10_000));
    let zone = FixedOffset::east_opt(5 * 3600 + 1800).unwrap();
    let candidate = records[records.len() / 2].to_draft();

    c.bench_function("duplicate_scan_10k", |b| {
        b.iter(|| black_box(DuplicateService::is_duplicate(&candidate, &records, &zone)))
    });
}

criterion_group!(benches, bench_aggregation, bench_duplicate_check);
criterion_main!(benches);
