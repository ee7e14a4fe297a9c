use super::observation::{Rect, TextObservation};
use super::schema::{Alignment, DocumentElement};
use crate::validation::ExpiryValidator;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// An observation that passed the MRZ shape filter.
#[derive(Debug, Clone, PartialEq)]
pub struct MrzLine {
    pub text: String,
    pub bounding_box: Rect,
}

impl From<&TextObservation> for MrzLine {
    fn from(obs: &TextObservation) -> Self {
        MrzLine {
            text: obs.text.clone(),
            bounding_box: obs.bounding_box,
        }
    }
}

/// Fields decoded from a TD3 machine-readable zone. Dates are kept in their
/// raw YYMMDD form; use `birth_date()` / `expiration_date_naive()` for calendar values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsedMrz {
    pub document_type: String,
    pub country_code: String,
    pub surname: String,
    pub given_names: String,
    pub passport_number: String,
    pub nationality: String,
    pub date_of_birth: String,
    pub sex: String,
    pub expiration_date: String,
    pub raw_lines: Vec<String>,
}

impl ParsedMrz {
    /// Key/value pairs in display order. MRZ pairs carry no observations.
    pub fn to_key_values(&self) -> Vec<RecognizedKeyValue> {
        [
            (DocumentElement::Surname, &self.surname),
            (DocumentElement::GivenNames, &self.given_names),
            (DocumentElement::DocumentNo, &self.passport_number),
            (DocumentElement::DateOfBirth, &self.date_of_birth),
            (DocumentElement::Nationality, &self.nationality),
            (DocumentElement::Sex, &self.sex),
            (DocumentElement::DateOfExpiry, &self.expiration_date),
        ]
        .iter()
        .map(|(key, value)| RecognizedKeyValue::synthesized(*key, value.as_str()))
        .collect()
    }

    pub fn birth_date(&self) -> Option<NaiveDate> {
        ExpiryValidator::birth_date(&self.date_of_birth, chrono::Local::now().date_naive())
    }

    pub fn expiration_date_naive(&self) -> Option<NaiveDate> {
        ExpiryValidator::expiry_date(&self.expiration_date)
    }
}

/// A field label paired with the value found for it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecognizedKeyValue {
    pub key: DocumentElement,
    pub key_observation: Option<TextObservation>,
    pub value: Option<String>,
    pub value_observation: Option<TextObservation>,
}

impl RecognizedKeyValue {
    pub fn paired(key: DocumentElement, key_observation: &TextObservation, value_observation: &TextObservation) -> Self {
        RecognizedKeyValue {
            key,
            key_observation: Some(key_observation.clone()),
            value: Some(value_observation.text.clone()),
            value_observation: Some(value_observation.clone()),
        }
    }

    pub fn synthesized(key: DocumentElement, value: &str) -> Self {
        RecognizedKeyValue {
            key,
            key_observation: None,
            value: Some(value.to_string()),
            value_observation: None,
        }
    }

    pub fn alignment(&self) -> Alignment {
        self.key.alignment()
    }

    pub fn has_value(&self) -> bool {
        self.value.as_deref().map_or(false, |v| !v.is_empty())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DocumentType {
    #[serde(rename = "Passport (MRZ)")]
    PassportMrz,
    #[serde(rename = "ID Card")]
    IdCard,
    Unknown,
}

impl fmt::Display for DocumentType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            DocumentType::PassportMrz => write!(f, "Passport (MRZ)"),
            DocumentType::IdCard => write!(f, "ID Card"),
            DocumentType::Unknown => write!(f, "Unknown"),
        }
    }
}

/// Output of one extraction call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractionResult {
    pub document_type: DocumentType,
    pub fields: Vec<RecognizedKeyValue>,
    pub mrz: Option<ParsedMrz>,
}

impl ExtractionResult {
    pub fn unknown() -> Self {
        ExtractionResult {
            document_type: DocumentType::Unknown,
            fields: Vec::new(),
            mrz: None,
        }
    }

    /// First value found for `key`, if any.
    pub fn value_of(&self, key: DocumentElement) -> Option<&str> {
        self.fields
            .iter()
            .find(|field| field.key == key)
            .and_then(|field| field.value.as_deref())
    }
}
