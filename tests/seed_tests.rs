mod common;

use common::{at, day, ledger_at};
use zospend::{seed::SAMPLE_DAYS, SampleSeeder};
use zospend_core::local_day;

#[test]
fn seeding_fills_the_days_before_today() {
    let (ledger, _) = ledger_at(at(12, 9, 0));
    let report = SampleSeeder::with_seed(11)
        .seed(&ledger, SAMPLE_DAYS)
        .expect("seed");

    let snapshot = ledger.snapshot();
    assert_eq!(report.inserted, snapshot.len());
    assert!(report.inserted >= SAMPLE_DAYS as usize);
    for record in snapshot.records() {
        let date = local_day(record.created_at, ledger.zone());
        assert!(date >= day(6) && date <= day(11), "unexpected day {date}");
        assert!(record.is_synthetic);
    }
    assert_eq!(ledger.total_on(day(12)), 0);
    assert_eq!(
        ledger.report().window_total,
        snapshot.records().iter().map(|r| r.amount_minor).sum::<i64>()
    );
}

#[test]
fn reseeding_with_the_same_seed_only_produces_duplicates() {
    let (ledger, _) = ledger_at(at(12, 9, 0));
    let first = SampleSeeder::with_seed(5).seed(&ledger, 3).expect("seed");
    let second = SampleSeeder::with_seed(5).seed(&ledger, 3).expect("reseed");

    assert_eq!(second.inserted, 0);
    assert_eq!(second.skipped_duplicates, first.inserted + first.skipped_duplicates);
    assert_eq!(ledger.snapshot().len(), first.inserted);
}
