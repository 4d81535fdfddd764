use crate::observability::labels::Labels;
use metrics::{counter, Counter};

pub struct DedupMetrics {
    pub runs: Counter,
    pub records_in: Counter,
    pub records_accepted: Counter,
    pub tax_id_duplicates: Counter,
    pub name_duplicates: Counter,
    pub empty_names: Counter,
}

const KEY: &str = "key";

impl DedupMetrics {
    pub fn new(labels: &Labels) -> Self {
        DedupMetrics {
            runs: counter!("dedup.runs", labels.clone()),
            records_in: counter!("dedup.records_in", labels.clone()),
            records_accepted: counter!("dedup.records_accepted", labels.clone()),
            tax_id_duplicates: counter!(
                "dedup.duplicates_dropped",
                labels.clone_with_labels(&[(KEY, "tax_id")])
            ),
            name_duplicates: counter!(
                "dedup.duplicates_dropped",
                labels.clone_with_labels(&[(KEY, "name")])
            ),
            empty_names: counter!(
                "dedup.duplicates_dropped",
                labels.clone_with_labels(&[(KEY, "empty_name")])
            ),
        }
    }
}
