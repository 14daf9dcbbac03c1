//! Generated sample expenses for demos and first launches.

use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};
use rand::{rngs::StdRng, seq::SliceRandom, Rng, SeedableRng};
use tracing::{debug, info};
use zospend_core::{day_span, CoreError, RecordStore};
use zospend_domain::{Category, ExpenseDraft};

use crate::ledger::ExpenseLedger;

/// How many days before today get sample data by default.
pub const SAMPLE_DAYS: u32 = 6;
const MAX_PER_DAY: usize = 4;

const VENDORS: &[&str] = &[
    "Amazon",
    "Flipkart",
    "Metro Cash & Carry",
    "Office Depot",
    "Swiggy",
    "Zomato",
    "IRCTC",
    "Uber",
    "Rapido",
    "BlueDart",
    "Vistara",
    "IndiGo",
    "DHL",
    "DMart",
    "Croma",
    "Apple Reseller",
];
const TITLE_PREFIXES: &[&str] = &[
    "Office Supplies",
    "Team Lunch",
    "Local Travel",
    "Subscription",
    "Courier Charges",
];
const CITIES: &[&str] = &["Bengaluru", "Mumbai", "Pune", "Hyderabad", "Chennai", "Delhi"];
const PURPOSES: &[&str] = &["Travel", "Meals", "Supplies", "Software", "Logistics", "Events"];
const PAYMENT_METHODS: &[&str] = &["UPI", "Credit Card", "Debit Card", "NetBanking", "Cash"];
const RECEIPT_WIDTHS: &[u32] = &[480, 600, 720];
const RECEIPT_HEIGHTS: &[u32] = &[720, 800, 960];

/// Outcome of a seeding run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedReport {
    pub inserted: usize,
    pub skipped_duplicates: usize,
}

/// Produces synthetic expenses; deterministic when built with [`SampleSeeder::with_seed`].
#[derive(Debug)]
pub struct SampleSeeder {
    rng: StdRng,
}

impl Default for SampleSeeder {
    fn default() -> Self {
        Self::new()
    }
}

impl SampleSeeder {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// One synthetic draft stamped at `created_at`.
    pub fn sample(&mut self, created_at: DateTime<Utc>) -> ExpenseDraft {
        let vendor = pick(&mut self.rng, VENDORS);
        let title = format!("{} - {}", pick(&mut self.rng, TITLE_PREFIXES), vendor);
        let note = format!(
            "{} in {} • Paid via {} • Ref #{}",
            pick(&mut self.rng, PURPOSES),
            pick(&mut self.rng, CITIES),
            pick(&mut self.rng, PAYMENT_METHODS),
            self.rng.gen_range(100_000..999_999),
        );
        let rupees: i64 = self.rng.gen_range(100..25_000);
        let paise = if self.rng.gen_bool(0.5) { 0 } else { 50 };
        let category = Category::ALL
            .choose(&mut self.rng)
            .copied()
            .unwrap_or_default();
        let receipt = format!(
            "https://placehold.co/{}x{}?text={}",
            pick(&mut self.rng, RECEIPT_WIDTHS),
            pick(&mut self.rng, RECEIPT_HEIGHTS),
            title.replace(' ', "+"),
        );

        ExpenseDraft::new(title, rupees * 100 + paise, category, created_at)
            .with_note(note)
            .with_receipt(receipt)
            .synthetic()
    }

    /// One to four drafts at random instants inside the local day `date`.
    pub fn drafts_for_day<Z: TimeZone>(&mut self, date: NaiveDate, zone: &Z) -> Vec<ExpenseDraft> {
        let (start, end) = day_span(date, zone);
        let day_seconds = (end - start).num_seconds().max(1);
        let count = self.rng.gen_range(1..=MAX_PER_DAY);
        (0..count)
            .map(|_| {
                let offset = Duration::seconds(self.rng.gen_range(0..day_seconds));
                self.sample(start + offset)
            })
            .collect()
    }

    /// Fills the `days` days before today through the ledger's write path.
    /// Drafts rejected as duplicates are skipped; any other error aborts.
    pub fn seed<S, Z>(&mut self, ledger: &ExpenseLedger<S, Z>, days: u32) -> Result<SeedReport, CoreError>
    where
        S: RecordStore,
        Z: TimeZone,
    {
        let today = ledger.today();
        let mut report = SeedReport::default();
        for back in (1..=i64::from(days)).rev() {
            let date = today - Duration::days(back);
            for draft in self.drafts_for_day(date, ledger.zone()) {
                match ledger.submit(draft) {
                    Ok(_) => report.inserted += 1,
                    Err(CoreError::DuplicateRecord { title }) => {
                        debug!(%title, "skipped duplicate sample expense");
                        report.skipped_duplicates += 1;
                    }
                    Err(err) => return Err(err),
                }
            }
        }
        info!(
            inserted = report.inserted,
            skipped = report.skipped_duplicates,
            days,
            "seeded sample expenses"
        );
        Ok(report)
    }
}

fn pick<T: Copy>(rng: &mut StdRng, items: &[T]) -> T {
    items[rng.gen_range(0..items.len())]
}
