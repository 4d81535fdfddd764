pub mod config;
pub mod error;
mod metrics;

use crate::extraction::config::ExtractionConfig;
use crate::extraction::error::CreateExtractorError;
use crate::extraction::metrics::ExtractionMetrics;
use crate::observability::labels::Labels;
use crate::record::{normalize_phone, CompanyRecord, FieldKind};
use crate::stats::GLOBAL_STATS;
use crate::tax_id::{self, TaxIdError, SHORT_TAX_ID_LENGTH};
use ahash::AHashSet;
use rayon::prelude::*;
use regex::{Captures, Regex, RegexBuilder};
use strum::IntoEnumIterator;

const REGEX_SIZE_LIMIT: usize = 1 << 20;

/// A tax id found in text, with the outcome of its validation
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TaxIdCandidate {
    pub raw: String,
    /// The cleaned id if it is valid
    pub result: Result<String, TaxIdError>,
}

impl TaxIdCandidate {
    fn new(raw: &str) -> Self {
        Self {
            raw: raw.to_string(),
            result: tax_id::validate_and_normalize(raw),
        }
    }

    pub fn is_valid(&self) -> bool {
        self.result.is_ok()
    }
}

struct FieldPatterns {
    kind: FieldKind,
    regexes: Vec<Regex>,
}

/// Pulls company fields out of page text with the patterns of an [ExtractionConfig].
pub struct RecordExtractor {
    fields: Vec<FieldPatterns>,
    complete_short_ids: bool,
    metrics: ExtractionMetrics,
}

pub struct RecordExtractorBuilder<'a> {
    config: &'a ExtractionConfig,
    labels: Labels,
}

impl RecordExtractorBuilder<'_> {
    pub fn new(config: &ExtractionConfig) -> RecordExtractorBuilder<'_> {
        RecordExtractorBuilder {
            config,
            labels: Labels::empty(),
        }
    }

    pub fn labels(mut self, labels: Labels) -> Self {
        self.labels = labels;
        self
    }

    pub fn build(self) -> Result<RecordExtractor, CreateExtractorError> {
        let fields = FieldKind::iter()
            .map(|kind| -> Result<FieldPatterns, CreateExtractorError> {
                let regexes = self
                    .config
                    .patterns(kind)
                    .iter()
                    .map(|pattern| compile_pattern(kind, pattern))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(FieldPatterns { kind, regexes })
            })
            .collect::<Result<Vec<_>, _>>()?;

        GLOBAL_STATS.extractor_creations.increment(1);
        GLOBAL_STATS.increment_total_extractors();

        Ok(RecordExtractor {
            fields,
            complete_short_ids: self.config.complete_short_ids,
            metrics: ExtractionMetrics::new(&self.labels),
        })
    }
}

fn compile_pattern(kind: FieldKind, pattern: &str) -> Result<Regex, CreateExtractorError> {
    let regex = RegexBuilder::new(pattern)
        .case_insensitive(true)
        .size_limit(REGEX_SIZE_LIMIT)
        .build()
        .map_err(|_| CreateExtractorError::InvalidPattern {
            field: kind.name(),
            pattern: pattern.to_string(),
        })?;

    if regex.is_match("") {
        return Err(CreateExtractorError::MatchesEmptyString {
            field: kind.name(),
            pattern: pattern.to_string(),
        });
    }
    Ok(regex)
}

/// First capture group if the pattern has one, otherwise the whole match
fn extracted_value<'t>(captures: &Captures<'t>) -> Option<&'t str> {
    captures
        .get(1)
        .or_else(|| captures.get(0))
        .map(|m| m.as_str())
}

impl RecordExtractor {
    pub fn builder(config: &ExtractionConfig) -> RecordExtractorBuilder<'_> {
        RecordExtractorBuilder::new(config)
    }

    fn regexes(&self, kind: FieldKind) -> &[Regex] {
        self.fields
            .iter()
            .find(|field| field.kind == kind)
            .map(|field| field.regexes.as_slice())
            .unwrap_or_default()
    }

    fn raw_matches<'t>(&'t self, kind: FieldKind, text: &'t str) -> impl Iterator<Item = &'t str> {
        self.regexes(kind)
            .iter()
            .flat_map(move |regex| regex.captures_iter(text))
            .filter_map(|captures| extracted_value(&captures))
            .map(str::trim)
            .filter(|value| !value.is_empty())
    }

    /// Every distinct tax id candidate of the text, in pattern order, valid or not.
    pub fn tax_id_candidates(&self, text: &str) -> Vec<TaxIdCandidate> {
        let mut seen = AHashSet::new();
        self.raw_matches(FieldKind::TaxId, text)
            .filter(|raw| seen.insert(*raw))
            .map(TaxIdCandidate::new)
            .collect()
    }

    /// The first candidate passing full validation, cleaned.
    pub fn extract_tax_id(&self, text: &str) -> Option<String> {
        for raw in self.raw_matches(FieldKind::TaxId, text) {
            match tax_id::validate_and_normalize(raw) {
                Ok(id) => {
                    self.metrics.valid_tax_ids.increment(1);
                    return Some(self.maybe_complete(id));
                }
                Err(err) => self.metrics.record_invalid_tax_id(&err),
            }
        }
        None
    }

    fn maybe_complete(&self, id: String) -> String {
        if self.complete_short_ids && id.len() == SHORT_TAX_ID_LENGTH {
            if let Some(completed) = tax_id::complete(&id) {
                self.metrics.completed_tax_ids.increment(1);
                return completed;
            }
        }
        id
    }

    pub fn extract_email(&self, text: &str) -> Option<String> {
        self.extract(FieldKind::Email, text)
    }

    /// Digits of the first phone number found
    pub fn extract_phone(&self, text: &str) -> Option<String> {
        self.extract(FieldKind::Phone, text)
    }

    pub fn extract_activity_code(&self, text: &str) -> Option<String> {
        self.extract(FieldKind::EconomicActivityCode, text)
    }

    pub fn extract_incorporation_date(&self, text: &str) -> Option<String> {
        self.extract(FieldKind::IncorporationDate, text)
    }

    pub fn extract_postal_code(&self, text: &str) -> Option<String> {
        self.extract(FieldKind::PostalCode, text)
    }

    pub fn extract_website(&self, text: &str) -> Option<String> {
        self.extract(FieldKind::Website, text)
    }

    pub fn extract_business_purpose(&self, text: &str) -> Option<String> {
        self.extract(FieldKind::BusinessPurpose, text)
    }

    /// First value of `kind` found in the text.
    pub fn extract(&self, kind: FieldKind, text: &str) -> Option<String> {
        let value = match kind {
            FieldKind::TaxId => self.extract_tax_id(text),
            FieldKind::Phone => self.raw_matches(kind, text).find_map(normalize_phone),
            _ => self.raw_matches(kind, text).next().map(str::to_string),
        };

        if value.is_some() {
            self.metrics.record_field_found(kind);
        }
        value
    }

    /// Fills the missing fields of `record` from the text. Populated fields are left untouched.
    pub fn enrich(&self, record: CompanyRecord, text: &str) -> CompanyRecord {
        FieldKind::iter().fold(record, |record, kind| {
            if record.field(kind).is_some() {
                return record;
            }

            // A postal code is more reliable when read from the address
            let from_address = match (kind, record.address.as_deref()) {
                (FieldKind::PostalCode, Some(address)) => self.extract(kind, address),
                _ => None,
            };

            match from_address.or_else(|| self.extract(kind, text)) {
                Some(value) => record.with_field(kind, &value),
                None => record,
            }
        })
    }

    /// Enriches every record with its page text. Pages are processed in parallel,
    /// the output keeps the input order.
    pub fn enrich_all(&self, pages: Vec<(CompanyRecord, String)>) -> Vec<CompanyRecord> {
        pages
            .into_par_iter()
            .map(|(record, text)| self.enrich(record, &text))
            .collect()
    }
}

impl Drop for RecordExtractor {
    fn drop(&mut self) {
        GLOBAL_STATS.extractor_deletions.increment(1);
        GLOBAL_STATS.decrement_total_extractors();
    }
}
