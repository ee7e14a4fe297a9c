use crate::models::DocumentElement;
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // A day/month/year date anywhere in the value, e.g. 13/04/1990 or 04.1990
    static ref DATE_VALUE: Regex = Regex::new(r"(\d{1,2}[/\-.])?\d{1,2}[/\-.]\d{2,4}").unwrap();
    static ref SEX_VALUE: Regex = Regex::new(r"(?i)^(M|F|MALE|FEMALE)$").unwrap();
    // Upper-case words separated by single spaces
    static ref NAME_VALUE: Regex = Regex::new(r"^[A-Z]+(?: [A-Z]+)*$").unwrap();
}

/// Value-shape checks that reject spatially close but semantically wrong values.
pub struct FormatValidator;

impl FormatValidator {
    pub fn is_valid_value(element: DocumentElement, value: &str) -> bool {
        let trimmed = value.trim();

        if element.is_date() {
            DATE_VALUE.is_match(trimmed)
        } else if element.is_name() {
            NAME_VALUE.is_match(trimmed)
        } else if element == DocumentElement::Sex {
            SEX_VALUE.is_match(trimmed)
        } else {
            true
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_date_values() {
        assert!(FormatValidator::is_valid_value(DocumentElement::DateOfBirth, "13/04/1990"));
        assert!(FormatValidator::is_valid_value(DocumentElement::DateOfIssue, "01.02.2020"));
        assert!(FormatValidator::is_valid_value(DocumentElement::DateOfExpiry, " 3-4-30 "));
        assert!(!FormatValidator::is_valid_value(DocumentElement::DateOfBirth, "DOE"));
        assert!(!FormatValidator::is_valid_value(DocumentElement::DateOfBirth, "19900413"));
    }

    #[test]
    fn test_sex_values() {
        assert!(FormatValidator::is_valid_value(DocumentElement::Sex, "F"));
        assert!(FormatValidator::is_valid_value(DocumentElement::Sex, "male"));
        assert!(!FormatValidator::is_valid_value(DocumentElement::Sex, "X"));
        assert!(!FormatValidator::is_valid_value(DocumentElement::Sex, "M/F"));
    }

    #[test]
    fn test_name_values() {
        assert!(FormatValidator::is_valid_value(DocumentElement::Surname, "DOE"));
        assert!(FormatValidator::is_valid_value(DocumentElement::GivenNames, "JANE MARIE"));
        assert!(!FormatValidator::is_valid_value(DocumentElement::GivenNames, "JANE  MARIE"));
        assert!(!FormatValidator::is_valid_value(DocumentElement::Surname, "13/04/1990"));
        assert!(!FormatValidator::is_valid_value(DocumentElement::Surname, "doe"));
    }

    #[test]
    fn test_other_fields_accept_anything() {
        assert!(FormatValidator::is_valid_value(DocumentElement::DocumentNo, "X1234567"));
        assert!(FormatValidator::is_valid_value(DocumentElement::PlaceOfBirth, "PRAHA 4"));
        assert!(FormatValidator::is_valid_value(DocumentElement::Nationality, ""));
    }
}
