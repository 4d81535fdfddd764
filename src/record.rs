use crate::dedup::DedupKey;
use crate::tax_id::{self, EntityType, TaxIdError};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;
use strum::{EnumIter, IntoStaticStr};

const INCORPORATION_DATE_FORMATS: &[&str] = &["%d/%m/%Y", "%d-%m-%Y", "%Y-%m-%d", "%d.%m.%Y"];
const SPANISH_PHONE_PREFIX: &str = "34";
const PHONE_LENGTH: usize = 9;
const ACTIVITY_CODE_LENGTH: usize = 4;

/// One company as seen by one source.
#[skip_serializing_none]
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct CompanyRecord {
    pub legal_name: String,
    pub tax_id: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub economic_activity_code: Option<String>,
    pub incorporation_date: Option<String>,
    pub business_purpose: Option<String>,
    pub postal_code: Option<String>,
    pub municipality: Option<String>,
    pub website: Option<String>,
    pub source: String,
    pub detail_url: Option<String>,
}

/// Optional fields of a [CompanyRecord]
#[derive(
    Serialize,
    Deserialize,
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    EnumIter,
    IntoStaticStr,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    TaxId,
    Address,
    Phone,
    Email,
    EconomicActivityCode,
    IncorporationDate,
    BusinessPurpose,
    PostalCode,
    Municipality,
    Website,
    DetailUrl,
}

impl FieldKind {
    pub fn name(&self) -> &'static str {
        self.into()
    }
}

impl CompanyRecord {
    /// Records without a name are never created.
    pub fn new(legal_name: &str, source: &str) -> Option<Self> {
        let legal_name = legal_name.trim();
        if legal_name.is_empty() {
            return None;
        }

        Some(Self {
            legal_name: legal_name.to_string(),
            tax_id: None,
            address: None,
            phone: None,
            email: None,
            economic_activity_code: None,
            incorporation_date: None,
            business_purpose: None,
            postal_code: None,
            municipality: None,
            website: None,
            source: source.to_string(),
            detail_url: None,
        })
    }

    /// Attaches the cleaned tax id, or returns why it was rejected.
    pub fn try_tax_id(mut self, raw: &str) -> Result<Self, TaxIdError> {
        self.tax_id = Some(tax_id::validate_and_normalize(raw)?);
        Ok(self)
    }

    /// Attaches the tax id only if it passes full validation.
    pub fn tax_id(self, raw: &str) -> Self {
        match tax_id::validate_and_normalize(raw) {
            Ok(id) => Self {
                tax_id: Some(id),
                ..self
            },
            Err(_) => self,
        }
    }

    pub fn address(self, address: impl Into<String>) -> Self {
        self.mutate(|x| x.address = non_empty(address))
    }

    /// Stores the digits of the number; ignored if it has none.
    pub fn phone(self, phone: &str) -> Self {
        self.mutate(|x| {
            if let Some(phone) = normalize_phone(phone) {
                x.phone = Some(phone)
            }
        })
    }

    pub fn email(self, email: impl Into<String>) -> Self {
        self.mutate(|x| x.email = non_empty(email))
    }

    /// Only 4 digit codes are kept.
    pub fn economic_activity_code(self, code: impl Into<String>) -> Self {
        let code = non_empty(code).filter(|code| {
            code.len() == ACTIVITY_CODE_LENGTH && code.bytes().all(|b| b.is_ascii_digit())
        });
        self.mutate(|x| x.economic_activity_code = code)
    }

    pub fn incorporation_date(self, date: impl Into<String>) -> Self {
        self.mutate(|x| x.incorporation_date = non_empty(date))
    }

    pub fn business_purpose(self, purpose: impl Into<String>) -> Self {
        self.mutate(|x| x.business_purpose = non_empty(purpose))
    }

    pub fn postal_code(self, postal_code: impl Into<String>) -> Self {
        self.mutate(|x| x.postal_code = non_empty(postal_code))
    }

    pub fn municipality(self, municipality: impl Into<String>) -> Self {
        self.mutate(|x| x.municipality = non_empty(municipality))
    }

    pub fn website(self, website: impl Into<String>) -> Self {
        self.mutate(|x| x.website = non_empty(website))
    }

    pub fn detail_url(self, url: impl Into<String>) -> Self {
        self.mutate(|x| x.detail_url = non_empty(url))
    }

    /// Routes a value to the setter of `kind`, with the same cleaning rules.
    pub fn with_field(self, kind: FieldKind, value: &str) -> Self {
        match kind {
            FieldKind::TaxId => self.tax_id(value),
            FieldKind::Address => self.address(value),
            FieldKind::Phone => self.phone(value),
            FieldKind::Email => self.email(value),
            FieldKind::EconomicActivityCode => self.economic_activity_code(value),
            FieldKind::IncorporationDate => self.incorporation_date(value),
            FieldKind::BusinessPurpose => self.business_purpose(value),
            FieldKind::PostalCode => self.postal_code(value),
            FieldKind::Municipality => self.municipality(value),
            FieldKind::Website => self.website(value),
            FieldKind::DetailUrl => self.detail_url(value),
        }
    }

    fn mutate(mut self, modify: impl FnOnce(&mut Self)) -> Self {
        modify(&mut self);
        self
    }

    pub fn field(&self, kind: FieldKind) -> Option<&str> {
        let value = match kind {
            FieldKind::TaxId => &self.tax_id,
            FieldKind::Address => &self.address,
            FieldKind::Phone => &self.phone,
            FieldKind::Email => &self.email,
            FieldKind::EconomicActivityCode => &self.economic_activity_code,
            FieldKind::IncorporationDate => &self.incorporation_date,
            FieldKind::BusinessPurpose => &self.business_purpose,
            FieldKind::PostalCode => &self.postal_code,
            FieldKind::Municipality => &self.municipality,
            FieldKind::Website => &self.website,
            FieldKind::DetailUrl => &self.detail_url,
        };
        value.as_deref()
    }

    /// Whether the record carries a tax id usable as a dedup key
    pub fn has_tax_id(&self) -> bool {
        self.tax_id
            .as_deref()
            .is_some_and(|id| !id.trim().is_empty())
    }

    pub fn entity_type(&self) -> Option<EntityType> {
        self.tax_id.as_deref().and_then(tax_id::entity_type)
    }

    /// Tax id when present, legal name otherwise. `None` if both are blank.
    pub fn dedup_key(&self) -> Option<DedupKey> {
        if let Some(id) = self.tax_id.as_deref() {
            let id = id.trim();
            if !id.is_empty() {
                return Some(DedupKey::TaxId(id.to_uppercase()));
            }
        }

        let name = self.legal_name.trim();
        if name.is_empty() {
            None
        } else {
            Some(DedupKey::Name(name.to_lowercase()))
        }
    }

    /// The incorporation date, if it is written in one of the usual day-first or ISO formats.
    pub fn parsed_incorporation_date(&self) -> Option<NaiveDate> {
        let raw = self.incorporation_date.as_deref()?.trim();
        INCORPORATION_DATE_FORMATS
            .iter()
            .find_map(|format| NaiveDate::parse_from_str(raw, format).ok())
    }
}

fn non_empty(value: impl Into<String>) -> Option<String> {
    let value = value.into();
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Keeps only the digits of a phone number, dropping the Spanish country prefix.
pub fn normalize_phone(raw: &str) -> Option<String> {
    let digits: String = raw.chars().filter(char::is_ascii_digit).collect();

    let digits = match digits.strip_prefix("00") {
        Some(international) => international.to_string(),
        None => digits,
    };

    let local = match digits.strip_prefix(SPANISH_PHONE_PREFIX) {
        Some(local) if local.len() == PHONE_LENGTH => local.to_string(),
        _ => digits,
    };

    if local.is_empty() {
        None
    } else {
        Some(local)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use strum::IntoEnumIterator;

    fn acme() -> CompanyRecord {
        CompanyRecord::new("  Acme SL ", "einforma").unwrap()
    }

    #[test]
    fn blank_names_are_rejected() {
        assert!(CompanyRecord::new("", "einforma").is_none());
        assert!(CompanyRecord::new(" \t\n", "einforma").is_none());
    }

    #[test]
    fn new_record_has_no_optional_field() {
        let record = acme();
        assert_eq!(record.legal_name, "Acme SL");
        assert_eq!(record.source, "einforma");
        for kind in FieldKind::iter() {
            assert_eq!(record.field(kind), None);
        }
    }

    #[test]
    fn only_valid_tax_ids_are_attached() {
        let record = acme().tax_id("b-1234567-4");
        assert_eq!(record.tax_id.as_deref(), Some("B12345674"));

        let record = acme().tax_id("B12345678");
        assert_eq!(record.tax_id, None);

        assert_eq!(
            acme().try_tax_id("X1234567").unwrap_err(),
            TaxIdError::InvalidLeadingLetter('X')
        );
        assert_eq!(
            acme().try_tax_id("a5881850").unwrap().tax_id.as_deref(),
            Some("A5881850")
        );
    }

    #[test]
    fn setters_ignore_blank_values() {
        let record = acme()
            .address("  Calle Mayor 1 ")
            .email("   ")
            .municipality("Murcia")
            .phone("sin teléfono");
        assert_eq!(record.field(FieldKind::Address), Some("Calle Mayor 1"));
        assert_eq!(record.field(FieldKind::Email), None);
        assert_eq!(record.field(FieldKind::Municipality), Some("Murcia"));
        assert_eq!(record.field(FieldKind::Phone), None);
    }

    #[test]
    fn activity_codes_must_have_four_digits() {
        assert_eq!(
            acme().economic_activity_code(" 4121 ").economic_activity_code.as_deref(),
            Some("4121")
        );
        assert_eq!(acme().economic_activity_code("abc12").economic_activity_code, None);
        assert_eq!(acme().economic_activity_code("412").economic_activity_code, None);
        assert_eq!(acme().economic_activity_code("41210").economic_activity_code, None);
        assert_eq!(
            acme()
                .with_field(FieldKind::EconomicActivityCode, "４１２１")
                .economic_activity_code,
            None
        );
    }

    #[test]
    fn phone_numbers_keep_digits_only() {
        assert_eq!(normalize_phone("968 12 34 56"), Some("968123456".to_string()));
        assert_eq!(normalize_phone("+34 612-345-678"), Some("612345678".to_string()));
        assert_eq!(normalize_phone("0034612345678"), Some("612345678".to_string()));
        assert_eq!(normalize_phone("(34) 968"), Some("34968".to_string()));
        assert_eq!(normalize_phone("n/a"), None);
    }

    #[test]
    fn entity_type_comes_from_the_tax_id() {
        assert_eq!(acme().entity_type(), None);
        assert_eq!(
            acme().tax_id("B12345674").entity_type(),
            Some(EntityType::SociedadLimitada)
        );
    }

    #[test]
    fn dedup_key_prefers_tax_id() {
        let record = acme();
        assert_eq!(record.dedup_key(), Some(DedupKey::Name("acme sl".to_string())));

        let record = record.tax_id("B12345674");
        assert_eq!(
            record.dedup_key(),
            Some(DedupKey::TaxId("B12345674".to_string()))
        );

        let blank_id = CompanyRecord {
            tax_id: Some("  ".to_string()),
            ..acme()
        };
        assert!(!blank_id.has_tax_id());
        assert_eq!(blank_id.dedup_key(), Some(DedupKey::Name("acme sl".to_string())));

        let nameless = CompanyRecord {
            legal_name: " ".to_string(),
            ..acme()
        };
        assert_eq!(nameless.dedup_key(), None);
    }

    #[test]
    fn incorporation_date_parsing() {
        let record = acme().incorporation_date("15/03/2004");
        assert_eq!(
            record.parsed_incorporation_date(),
            NaiveDate::from_ymd_opt(2004, 3, 15)
        );
        let record = acme().incorporation_date("2004-03-15");
        assert_eq!(
            record.parsed_incorporation_date(),
            NaiveDate::from_ymd_opt(2004, 3, 15)
        );
        let record = acme().incorporation_date("marzo de 2004");
        assert_eq!(record.incorporation_date.as_deref(), Some("marzo de 2004"));
        assert_eq!(record.parsed_incorporation_date(), None);
    }

    #[test]
    fn serialization_skips_missing_fields() {
        let record = acme().tax_id("B12345674").phone("968123456");
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "legal_name": "Acme SL",
                "tax_id": "B12345674",
                "phone": "968123456",
                "source": "einforma",
            })
        );

        let back: CompanyRecord = serde_json::from_value(json).unwrap();
        assert_eq!(back, record);
    }
}
