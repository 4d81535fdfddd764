mod metrics;

use crate::observability::labels::Labels;
use crate::record::CompanyRecord;
use ahash::AHashSet;
use serde::{Deserialize, Serialize};

use self::metrics::DedupMetrics;

/// Identity used to collapse duplicate records.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum DedupKey {
    /// Uppercased, trimmed tax id
    TaxId(String),
    /// Lowercased, trimmed legal name
    Name(String),
}

/// Outcome of a [dedupe_with_summary] run
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DedupSummary {
    pub records_in: usize,
    pub accepted: usize,
    pub tax_id_duplicates: usize,
    pub name_duplicates: usize,
    pub empty_names: usize,
}

impl DedupSummary {
    pub fn dropped(&self) -> usize {
        self.tax_id_duplicates + self.name_duplicates + self.empty_names
    }
}

/// Removes duplicate records.
///
/// Records carrying a tax id are considered first and are keyed by it, the others are keyed by
/// their legal name. Within each group records are ordered by legal name, and the first record
/// seen for a key wins. Accepted records are returned in acceptance order.
pub fn dedupe(records: Vec<CompanyRecord>) -> Vec<CompanyRecord> {
    dedupe_with_summary(records, &Labels::empty()).0
}

/// Concatenates the record lists of several sources (in the given order) and dedupes them.
pub fn dedupe_sources(
    per_source: impl IntoIterator<Item = Vec<CompanyRecord>>,
) -> Vec<CompanyRecord> {
    dedupe(per_source.into_iter().flatten().collect())
}

/// Same as [dedupe], also returning what was dropped and why. Each run is counted in the
/// `dedup.*` metrics, tagged with `labels`.
pub fn dedupe_with_summary(
    mut records: Vec<CompanyRecord>,
    labels: &Labels,
) -> (Vec<CompanyRecord>, DedupSummary) {
    let metrics = DedupMetrics::new(labels);
    let mut summary = DedupSummary {
        records_in: records.len(),
        ..DedupSummary::default()
    };

    // `sort_by` is stable, equal keys keep their input order
    records.sort_by(|a, b| {
        b.has_tax_id()
            .cmp(&a.has_tax_id())
            .then_with(|| a.legal_name.cmp(&b.legal_name))
    });

    let mut seen_tax_ids = AHashSet::new();
    let mut seen_names = AHashSet::new();
    let mut accepted = Vec::with_capacity(records.len());

    for record in records {
        let is_new = match record.dedup_key() {
            Some(DedupKey::TaxId(id)) => {
                let is_new = seen_tax_ids.insert(id);
                if !is_new {
                    summary.tax_id_duplicates += 1;
                }
                is_new
            }
            Some(DedupKey::Name(name)) => {
                let is_new = seen_names.insert(name);
                if !is_new {
                    summary.name_duplicates += 1;
                }
                is_new
            }
            None => {
                summary.empty_names += 1;
                false
            }
        };

        if is_new {
            accepted.push(record);
        }
    }
    summary.accepted = accepted.len();

    metrics.runs.increment(1);
    metrics.records_in.increment(summary.records_in as u64);
    metrics.records_accepted.increment(summary.accepted as u64);
    metrics
        .tax_id_duplicates
        .increment(summary.tax_id_duplicates as u64);
    metrics.name_duplicates.increment(summary.name_duplicates as u64);
    metrics.empty_names.increment(summary.empty_names as u64);

    (accepted, summary)
}
