use crate::observability::labels::Labels;
use crate::record::FieldKind;
use crate::tax_id::TaxIdError;
use ahash::AHashMap;
use metrics::{counter, Counter};
use strum::IntoEnumIterator;

pub struct ExtractionMetrics {
    labels: Labels,
    pub fields_found: AHashMap<FieldKind, Counter>,
    pub valid_tax_ids: Counter,
    pub completed_tax_ids: Counter,
}

const FIELD: &str = "field";
const RESULT: &str = "result";
const REASON: &str = "reason";

impl ExtractionMetrics {
    pub fn new(labels: &Labels) -> Self {
        let fields_found = FieldKind::iter()
            .map(|kind| {
                let counter = counter!(
                    "extraction.fields_found",
                    labels.clone_with_labels(&[(FIELD, kind.name())])
                );
                (kind, counter)
            })
            .collect();

        ExtractionMetrics {
            labels: labels.clone(),
            fields_found,
            valid_tax_ids: counter!(
                "tax_id.validations",
                labels.clone_with_labels(&[(RESULT, "valid")])
            ),
            completed_tax_ids: counter!("tax_id.completions", labels.clone()),
        }
    }

    pub fn record_field_found(&self, kind: FieldKind) {
        if let Some(counter) = self.fields_found.get(&kind) {
            counter.increment(1);
        }
    }

    pub fn record_invalid_tax_id(&self, err: &TaxIdError) {
        counter!(
            "tax_id.validations",
            self.labels
                .clone_with_labels(&[(RESULT, "invalid"), (REASON, err.reason())])
        )
        .increment(1);
    }
}
