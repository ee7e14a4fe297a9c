use crate::processing::fuzzy;
use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Canonical identity-document fields. The labels returned by `label()` are the
/// strings shown to the presentation layer and must not change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DocumentElement {
    #[serde(rename = "SURNAME")]
    Surname,
    #[serde(rename = "GIVEN NAMES")]
    GivenNames,
    #[serde(rename = "DATE OF BIRTH")]
    DateOfBirth,
    #[serde(rename = "DOCUMENT NO.")]
    DocumentNo,
    #[serde(rename = "PLACE OF BIRTH")]
    PlaceOfBirth,
    #[serde(rename = "NATIONALITY")]
    Nationality,
    #[serde(rename = "DATE OF ISSUE")]
    DateOfIssue,
    #[serde(rename = "DATE OF EXPIRY")]
    DateOfExpiry,
    #[serde(rename = "SEX")]
    Sex,
}

/// How a key and its value are laid out when displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Alignment {
    Horizontal,
    Vertical,
}

lazy_static! {
    // Union of every synonym; used to keep labels out of value candidate pools
    static ref ALL_KEYWORDS: Vec<&'static str> = {
        let mut keywords: Vec<&'static str> = DocumentElement::ALL
            .iter()
            .flat_map(|element| element.synonyms().iter().copied())
            .collect();
        keywords.sort_unstable();
        keywords.dedup();
        keywords
    };
}

impl DocumentElement {
    /// Declaration order; key lookup returns the first match in this order.
    pub const ALL: [DocumentElement; 9] = [
        DocumentElement::Surname,
        DocumentElement::GivenNames,
        DocumentElement::DateOfBirth,
        DocumentElement::DocumentNo,
        DocumentElement::PlaceOfBirth,
        DocumentElement::Nationality,
        DocumentElement::DateOfIssue,
        DocumentElement::DateOfExpiry,
        DocumentElement::Sex,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            DocumentElement::Surname => "SURNAME",
            DocumentElement::GivenNames => "GIVEN NAMES",
            DocumentElement::DateOfBirth => "DATE OF BIRTH",
            DocumentElement::DocumentNo => "DOCUMENT NO.",
            DocumentElement::PlaceOfBirth => "PLACE OF BIRTH",
            DocumentElement::Nationality => "NATIONALITY",
            DocumentElement::DateOfIssue => "DATE OF ISSUE",
            DocumentElement::DateOfExpiry => "DATE OF EXPIRY",
            DocumentElement::Sex => "SEX",
        }
    }

    pub fn synonyms(&self) -> &'static [&'static str] {
        match self {
            DocumentElement::Surname => &["SURNAME", "FAMILY NAME", "LAST NAME"],
            DocumentElement::GivenNames => &["GIVEN NAME", "GIVEN NAMES", "FIRST NAME"],
            DocumentElement::DateOfBirth => &["DATE OF BIRTH", "BIRTHDATE", "DOB"],
            DocumentElement::DocumentNo => &[
                "DOCUMENT NO.",
                "DOCUMENT NUMBER",
                "DOC NO",
                "PASSPORT NO",
                "PASSPORT NUMBER",
            ],
            DocumentElement::PlaceOfBirth => &["PLACE OF BIRTH", "BIRTHPLACE"],
            DocumentElement::Nationality => &["NATIONALITY", "CITIZENSHIP"],
            DocumentElement::DateOfIssue => &["DATE OF ISSUE", "ISSUE DATE"],
            DocumentElement::DateOfExpiry => &[
                "DATE OF EXPIRY",
                "EXPIRATION DATE",
                "EXPIRY DATE",
                "DATE OF EXP",
            ],
            DocumentElement::Sex => &["SEX", "GENDER"],
        }
    }

    pub fn alignment(&self) -> Alignment {
        match self {
            DocumentElement::Surname | DocumentElement::GivenNames | DocumentElement::DocumentNo => {
                Alignment::Horizontal
            }
            _ => Alignment::Vertical,
        }
    }

    pub fn is_date(&self) -> bool {
        matches!(
            self,
            DocumentElement::DateOfBirth | DocumentElement::DateOfIssue | DocumentElement::DateOfExpiry
        )
    }

    pub fn is_name(&self) -> bool {
        matches!(self, DocumentElement::Surname | DocumentElement::GivenNames)
    }

    pub fn all_keywords() -> &'static [&'static str] {
        &ALL_KEYWORDS
    }

    /// Resolves an OCR line to a field label. Bilingual labels such as
    /// `PRIJMENI / SURNAME` are split on `/` and each part is tried.
    pub fn match_key(text: &str, threshold: f64) -> Option<DocumentElement> {
        let parts = label_parts(text);

        Self::ALL.iter().copied().find(|element| {
            parts
                .iter()
                .any(|part| fuzzy::matches_any_synonym(part, element.synonyms(), threshold))
        })
    }

    /// True if any `/`-separated part of the text reads like a field label.
    pub fn is_likely_key(text: &str, threshold: f64) -> bool {
        label_parts(text)
            .iter()
            .any(|part| fuzzy::matches_any_synonym(part, Self::all_keywords(), threshold))
    }
}

fn label_parts(text: &str) -> Vec<&str> {
    text.split('/')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .collect()
}

impl fmt::Display for DocumentElement {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for DocumentElement {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_uppercase();
        // MRZ-derived pairs were historically labelled PASSPORT NO
        if wanted == "PASSPORT NO" {
            return Ok(DocumentElement::DocumentNo);
        }
        Self::ALL
            .iter()
            .copied()
            .find(|element| element.label() == wanted)
            .ok_or_else(|| format!("Unknown document element: {}", s))
    }
}
