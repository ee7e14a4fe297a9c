use chrono::NaiveDate;
use crate::models::ParsedMrz;

/// Interprets the raw YYMMDD dates of an MRZ.
pub struct ExpiryValidator;

impl ExpiryValidator {
    /// Reads a YYMMDD string. Two-digit years strictly below `pivot_yy` land
    /// in the 2000s, the rest in the 1900s.
    pub fn parse_mrz_date(raw: &str, pivot_yy: u32) -> Option<NaiveDate> {
        if raw.len() != 6 || !raw.chars().all(|c| c.is_ascii_digit()) {
            return None;
        }

        let yy = raw[0..2].parse::<u32>().ok()?;
        let month = raw[2..4].parse::<u32>().ok()?;
        let day = raw[4..6].parse::<u32>().ok()?;
        let century = if yy < pivot_yy { 2000 } else { 1900 };

        NaiveDate::from_ymd_opt((century + yy) as i32, month, day)
    }

    /// Birth dates cannot lie in the future: 20YY unless that is after `today`.
    pub fn birth_date(raw: &str, today: NaiveDate) -> Option<NaiveDate> {
        match Self::parse_mrz_date(raw, 100)? {
            date if date <= today => Some(date),
            _ => Self::parse_mrz_date(raw, 0),
        }
    }

    /// Passport expiry dates are always in the 2000s.
    pub fn expiry_date(raw: &str) -> Option<NaiveDate> {
        Self::parse_mrz_date(raw, 100)
    }

    /// `None` when the expiry date cannot be read.
    pub fn is_expired(mrz: &ParsedMrz, today: NaiveDate) -> Option<bool> {
        Self::expiry_date(&mrz.expiration_date).map(|expiry| expiry < today)
    }
}
