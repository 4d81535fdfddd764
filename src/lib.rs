// This blocks accidental use of `println`. If one is actually needed, you can
// override with `#[allow(clippy::print_stdout)]`.
#![deny(clippy::print_stdout)]

mod dedup;
mod extraction;
mod observability;
mod record;
mod report;
mod stats;
pub mod tax_id;

// This is the public API of the core library
pub use dedup::{dedupe, dedupe_sources, dedupe_with_summary, DedupKey, DedupSummary};
pub use extraction::config::ExtractionConfig;
pub use extraction::error::CreateExtractorError;
pub use extraction::{RecordExtractor, RecordExtractorBuilder, TaxIdCandidate};
pub use observability::labels::Labels;
pub use record::{normalize_phone, CompanyRecord, FieldKind};
pub use report::{process_tax_ids, ProcessedTaxId, RecordReport, TaxIdReport};
pub use tax_id::{EntityType, TaxIdError};
