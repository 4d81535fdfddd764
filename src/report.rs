use crate::record::{CompanyRecord, FieldKind};
use crate::tax_id::{self, EntityType, SHORT_TAX_ID_LENGTH};
use serde::Serialize;
use std::collections::BTreeMap;
use strum::IntoEnumIterator;

/// One tax id of a batch after cleaning, validation and completion.
#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
pub struct ProcessedTaxId {
    pub original: String,
    pub cleaned: Option<String>,
    pub valid: bool,
    /// The cleaned id, with its control digit appended when it had 8 characters
    pub completed: Option<String>,
    pub entity_type: Option<EntityType>,
    /// Why validation failed
    pub reason: Option<&'static str>,
}

impl ProcessedTaxId {
    pub fn new(original: &str) -> Self {
        let cleaned = tax_id::normalize(original);
        let result = tax_id::validate_full(original);

        let completed = match cleaned.as_deref() {
            Some(id) if id.len() == SHORT_TAX_ID_LENGTH => tax_id::complete(id),
            other => other.map(str::to_string),
        };

        Self {
            original: original.to_string(),
            entity_type: tax_id::entity_type(original),
            valid: result.is_ok(),
            reason: result.err().map(|err| err.reason()),
            cleaned,
            completed,
        }
    }

    /// Whether a control digit was appended
    pub fn was_completed(&self) -> bool {
        self.completed.is_some() && self.completed != self.cleaned
    }
}

/// Statistics over a batch of tax ids
#[derive(Serialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct TaxIdReport {
    pub total: usize,
    pub valid: usize,
    pub invalid: usize,
    pub completed: usize,
    pub entity_types: BTreeMap<EntityType, usize>,
    pub failure_reasons: BTreeMap<&'static str, usize>,
}

impl TaxIdReport {
    pub fn from_rows(rows: &[ProcessedTaxId]) -> Self {
        let mut report = TaxIdReport {
            total: rows.len(),
            ..TaxIdReport::default()
        };

        for row in rows {
            if row.valid {
                report.valid += 1;
            } else {
                report.invalid += 1;
            }
            if row.was_completed() {
                report.completed += 1;
            }
            if let Some(entity_type) = row.entity_type {
                *report.entity_types.entry(entity_type).or_default() += 1;
            }
            if let Some(reason) = row.reason {
                *report.failure_reasons.entry(reason).or_default() += 1;
            }
        }
        report
    }
}

/// Cleans, validates and completes every id of a batch.
pub fn process_tax_ids<S: AsRef<str>>(
    ids: impl IntoIterator<Item = S>,
) -> (Vec<ProcessedTaxId>, TaxIdReport) {
    let rows: Vec<ProcessedTaxId> = ids
        .into_iter()
        .map(|id| ProcessedTaxId::new(id.as_ref()))
        .collect();
    let report = TaxIdReport::from_rows(&rows);
    (rows, report)
}

/// How complete a set of records is
#[derive(Serialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct RecordReport {
    pub total: usize,
    /// Number of records where each optional field is filled
    pub fields: BTreeMap<FieldKind, usize>,
    pub entity_types: BTreeMap<EntityType, usize>,
    pub sources: BTreeMap<String, usize>,
}

impl RecordReport {
    pub fn from_records(records: &[CompanyRecord]) -> Self {
        let mut report = RecordReport {
            total: records.len(),
            fields: FieldKind::iter().map(|kind| (kind, 0)).collect(),
            ..RecordReport::default()
        };

        for record in records {
            for kind in FieldKind::iter() {
                if record.field(kind).is_some() {
                    *report.fields.entry(kind).or_default() += 1;
                }
            }
            if let Some(entity_type) = record.entity_type() {
                *report.entity_types.entry(entity_type).or_default() += 1;
            }
            *report.sources.entry(record.source.clone()).or_default() += 1;
        }
        report
    }
}
