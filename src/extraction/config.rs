use crate::extraction::error::CreateExtractorError;
use crate::record::FieldKind;
use serde::{Deserialize, Serialize};
use serde_with::serde_as;
use serde_with::DefaultOnNull;

// Separator between a label and its value: colons, blanks and markup tags.
macro_rules! sep {
    () => {
        r"(?:[:\s]|</?[a-z][^>]*>)*"
    };
}

const DEFAULT_TAX_ID_PATTERNS: &[&str] = &[
    concat!(r"(?:CIF|NIF)", sep!(), r"([A-Z]-?[0-9]{7,8}[A-Z]?)\b"),
    concat!(r"Fiscal", sep!(), r"([A-Z]-?[0-9]{7,8}[A-Z]?)\b"),
    concat!(r"Identificaci[oó]n", sep!(), r"([A-Z]-?[0-9]{7,8}[A-Z]?)\b"),
    r"\b([A-Z][0-9]{7,8}[A-Z]?)\s*\(?CIF",
    r"\b[A-Z][0-9]{8}\b",
    r"\b[A-Z][0-9]{7}[A-Z]\b",
];

const DEFAULT_EMAIL_PATTERNS: &[&str] = &[r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}\b"];

const DEFAULT_PHONE_PATTERNS: &[&str] =
    &[r"(?:^|[^0-9])((?:\+34[\s-]?)?[6-9](?:[\s.-]?[0-9]){8})(?:$|[^0-9])"];

const DEFAULT_ACTIVITY_CODE_PATTERNS: &[&str] = &[
    concat!(r"CNAE", sep!(), r"([0-9]{4})\b"),
    concat!(r"Actividad", sep!(), r"([0-9]{4})\b"),
];

const DEFAULT_INCORPORATION_DATE_PATTERNS: &[&str] =
    &[r"constituci[oó]n.*?([0-9]{2}/[0-9]{2}/[0-9]{4})"];

const DEFAULT_POSTAL_CODE_PATTERNS: &[&str] = &[r"\b((?:0[1-9]|[1-4][0-9]|5[0-2])[0-9]{3})\b"];

const DEFAULT_WEBSITE_PATTERNS: &[&str] = &[concat!(
    r"(?:Web|Sitio web)",
    sep!(),
    r#"((?:https?://)?(?:www\.)?[A-Za-z0-9-]+(?:\.[A-Za-z0-9-]+)*\.[A-Za-z]{2,}(?:/[^\s"<>]*)?)"#
)];

const DEFAULT_BUSINESS_PURPOSE_PATTERNS: &[&str] = &[
    concat!(r"Objeto social", sep!(), r"([^\n<]{3,})"),
    concat!(r"Objeto", sep!(), r"([^\n<]{3,})"),
];

/// Regex patterns used to pull company fields out of page text.
///
/// Every pattern is matched case-insensitively. When a pattern has a capture group,
/// the first group is the extracted value, otherwise the whole match is.
#[serde_as]
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct ExtractionConfig {
    #[serde_as(deserialize_as = "DefaultOnNull")]
    pub tax_id_patterns: Vec<String>,

    #[serde_as(deserialize_as = "DefaultOnNull")]
    pub email_patterns: Vec<String>,

    #[serde_as(deserialize_as = "DefaultOnNull")]
    pub phone_patterns: Vec<String>,

    #[serde_as(deserialize_as = "DefaultOnNull")]
    pub activity_code_patterns: Vec<String>,

    #[serde_as(deserialize_as = "DefaultOnNull")]
    pub incorporation_date_patterns: Vec<String>,

    #[serde_as(deserialize_as = "DefaultOnNull")]
    pub postal_code_patterns: Vec<String>,

    #[serde_as(deserialize_as = "DefaultOnNull")]
    pub website_patterns: Vec<String>,

    #[serde_as(deserialize_as = "DefaultOnNull")]
    pub business_purpose_patterns: Vec<String>,

    /// Append the control digit to 8 character tax ids
    pub complete_short_ids: bool,
}

fn to_owned_patterns(patterns: &[&str]) -> Vec<String> {
    patterns.iter().map(|p| p.to_string()).collect()
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            tax_id_patterns: to_owned_patterns(DEFAULT_TAX_ID_PATTERNS),
            email_patterns: to_owned_patterns(DEFAULT_EMAIL_PATTERNS),
            phone_patterns: to_owned_patterns(DEFAULT_PHONE_PATTERNS),
            activity_code_patterns: to_owned_patterns(DEFAULT_ACTIVITY_CODE_PATTERNS),
            incorporation_date_patterns: to_owned_patterns(DEFAULT_INCORPORATION_DATE_PATTERNS),
            postal_code_patterns: to_owned_patterns(DEFAULT_POSTAL_CODE_PATTERNS),
            website_patterns: to_owned_patterns(DEFAULT_WEBSITE_PATTERNS),
            business_purpose_patterns: to_owned_patterns(DEFAULT_BUSINESS_PURPOSE_PATTERNS),
            complete_short_ids: false,
        }
    }
}

impl ExtractionConfig {
    pub fn from_json(json: &str) -> Result<Self, CreateExtractorError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Patterns configured for a field. Fields that are never read from free text have none.
    pub fn patterns(&self, kind: FieldKind) -> &[String] {
        match kind {
            FieldKind::TaxId => &self.tax_id_patterns,
            FieldKind::Email => &self.email_patterns,
            FieldKind::Phone => &self.phone_patterns,
            FieldKind::EconomicActivityCode => &self.activity_code_patterns,
            FieldKind::IncorporationDate => &self.incorporation_date_patterns,
            FieldKind::PostalCode => &self.postal_code_patterns,
            FieldKind::Website => &self.website_patterns,
            FieldKind::BusinessPurpose => &self.business_purpose_patterns,
            FieldKind::Address | FieldKind::Municipality | FieldKind::DetailUrl => &[],
        }
    }

    pub fn tax_id_patterns(&self, patterns: Vec<String>) -> Self {
        self.mutate_clone(|x| x.tax_id_patterns = patterns)
    }

    pub fn email_patterns(&self, patterns: Vec<String>) -> Self {
        self.mutate_clone(|x| x.email_patterns = patterns)
    }

    pub fn phone_patterns(&self, patterns: Vec<String>) -> Self {
        self.mutate_clone(|x| x.phone_patterns = patterns)
    }

    pub fn activity_code_patterns(&self, patterns: Vec<String>) -> Self {
        self.mutate_clone(|x| x.activity_code_patterns = patterns)
    }

    pub fn incorporation_date_patterns(&self, patterns: Vec<String>) -> Self {
        self.mutate_clone(|x| x.incorporation_date_patterns = patterns)
    }

    pub fn postal_code_patterns(&self, patterns: Vec<String>) -> Self {
        self.mutate_clone(|x| x.postal_code_patterns = patterns)
    }

    pub fn website_patterns(&self, patterns: Vec<String>) -> Self {
        self.mutate_clone(|x| x.website_patterns = patterns)
    }

    pub fn business_purpose_patterns(&self, patterns: Vec<String>) -> Self {
        self.mutate_clone(|x| x.business_purpose_patterns = patterns)
    }

    pub fn complete_short_ids(&self, complete_short_ids: bool) -> Self {
        self.mutate_clone(|x| x.complete_short_ids = complete_short_ids)
    }

    fn mutate_clone(&self, modify: impl FnOnce(&mut Self)) -> Self {
        let mut clone = self.clone();
        modify(&mut clone);
        clone
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn should_override_patterns() {
        let config = ExtractionConfig::default()
            .email_patterns(vec!["mail: (\\S+)".to_string()])
            .complete_short_ids(true);
        assert_eq!(config.email_patterns, vec!["mail: (\\S+)".to_string()]);
        assert!(config.complete_short_ids);
        assert_eq!(
            config.tax_id_patterns,
            ExtractionConfig::default().tax_id_patterns
        );
    }

    #[test]
    fn missing_and_null_fields_use_defaults() {
        let config = ExtractionConfig::from_json(
            r#"{"email_patterns": null, "phone_patterns": ["tel ([0-9]{9})"], "complete_short_ids": true}"#,
        )
        .unwrap();

        let default = ExtractionConfig::default();
        assert_eq!(config.tax_id_patterns, default.tax_id_patterns);
        assert_eq!(config.phone_patterns, vec!["tel ([0-9]{9})".to_string()]);
        assert!(config.complete_short_ids);
        // `null` is read as an empty list
        assert!(config.email_patterns.is_empty());
    }

    #[test]
    fn empty_object_is_the_default_config() {
        assert_eq!(
            ExtractionConfig::from_json("{}").unwrap(),
            ExtractionConfig::default()
        );
    }

    #[test]
    fn malformed_json_is_an_invalid_config() {
        assert!(matches!(
            ExtractionConfig::from_json(r#"{"tax_id_patterns": 3}"#),
            Err(CreateExtractorError::InvalidConfig(_))
        ));
    }

    #[test]
    fn fields_without_free_text_source_have_no_patterns() {
        let config = ExtractionConfig::default();
        assert!(config.patterns(FieldKind::Address).is_empty());
        assert!(config.patterns(FieldKind::DetailUrl).is_empty());
        assert!(!config.patterns(FieldKind::TaxId).is_empty());
    }
}
