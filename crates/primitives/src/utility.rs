use crate::models::entities::enum_types::UserRole;
use chrono::{DateTime, NaiveDate, Utc};
use once_cell::sync::Lazy;
use rand::Rng;
use regex::Regex;
use validator::ValidationError;

const BASE36_DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
const CODE_SUFFIX_LEN: usize = 5;
const NATIONAL_ID_LEN: usize = 12;

static QUANTITY_NUMBER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\d+(?:\.\d+)?)").expect("quantity pattern is valid"));

/// Extracts the first integer or decimal token of a free-text quantity
/// ("100 kg" -> 100.0). Quantities without a number count as zero.
pub fn numeric_quantity(quantity: &str) -> f64 {
    QUANTITY_NUMBER
        .captures(quantity)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse::<f64>().ok())
        .unwrap_or(0.0)
}

pub fn to_base36(mut value: u64) -> String {
    if value == 0 {
        return "0".into();
    }

    let mut digits = Vec::new();
    while value > 0 {
        digits.push(BASE36_DIGITS[(value % 36) as usize]);
        value /= 36;
    }
    digits.reverse();
    String::from_utf8(digits).unwrap_or_default()
}

fn random_base36(len: usize) -> String {
    let mut rng = rand::thread_rng();
    (0..len)
        .map(|_| BASE36_DIGITS[rng.gen_range(0..BASE36_DIGITS.len())] as char)
        .collect()
}

fn epoch_millis(at: DateTime<Utc>) -> u64 {
    u64::try_from(at.timestamp_millis()).unwrap_or_default()
}

/// Human-readable transaction code: `TXN_<ROLE>_<base36 millis>_<5 random base36>`.
pub fn generate_transaction_code(role: UserRole, at: DateTime<Utc>) -> String {
    format!(
        "TXN_{}_{}_{}",
        role.to_string().to_uppercase(),
        to_base36(epoch_millis(at)),
        random_base36(CODE_SUFFIX_LEN)
    )
}

/// Wallet id assigned at registration when the user does not supply one.
pub fn default_wallet_id(role: UserRole, at: DateTime<Utc>) -> String {
    format!("wallet_{}_{}", role, epoch_millis(at))
}

/// Accepts RFC 3339 timestamps and plain `YYYY-MM-DD` dates (midnight UTC).
pub fn parse_flexible_date(input: &str) -> Option<DateTime<Utc>> {
    let input = input.trim();
    if let Ok(ts) = DateTime::parse_from_rfc3339(input) {
        return Some(ts.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
}

pub fn validate_national_id(national_id: &str) -> Result<(), ValidationError> {
    if national_id.len() == NATIONAL_ID_LEN && national_id.bytes().all(|b| b.is_ascii_digit()) {
        Ok(())
    } else {
        let mut err = ValidationError::new("national_id_format");
        err.message = Some("Please enter a valid 12-digit Aadhar number".into());
        Err(err)
    }
}

pub fn validate_role(role: &str) -> Result<(), ValidationError> {
    UserRole::parse(role).map(|_| ()).map_err(|_| {
        let mut err = ValidationError::new("role");
        err.message = Some("Role must be one of farmer, distributor, retailer".into());
        err
    })
}

pub fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}

/// Serde helpers for dates sent either as RFC 3339 or `YYYY-MM-DD`.
pub mod flexible_date {
    use super::parse_flexible_date;
    use chrono::{DateTime, Utc};
    use serde::{de::Error, Deserialize, Deserializer};

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        parse_flexible_date(&raw).ok_or_else(|| D::Error::custom(format!("invalid date: {raw}")))
    }

    pub fn option<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Option::<String>::deserialize(deserializer)? {
            None => Ok(None),
            Some(raw) if raw.trim().is_empty() => Ok(None),
            Some(raw) => parse_flexible_date(&raw)
                .map(Some)
                .ok_or_else(|| D::Error::custom(format!("invalid date: {raw}"))),
        }
    }
}

/// Prices arrive from form inputs as either JSON numbers or numeric strings.
pub mod price {
    use serde::{de::Error, Deserialize, Deserializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawPrice {
        Number(f64),
        Text(String),
    }

    /// Only finite values are prices; `"NaN"` and `"inf"` parse as f64 but are rejected.
    fn to_f64<E: Error>(raw: RawPrice) -> Result<f64, E> {
        let value = match raw {
            RawPrice::Number(n) => n,
            RawPrice::Text(s) => s
                .trim()
                .parse::<f64>()
                .map_err(|_| E::custom(format!("invalid price: {s}")))?,
        };
        if value.is_finite() {
            Ok(value)
        } else {
            Err(E::custom(format!("invalid price: {value}")))
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<f64, D::Error>
    where
        D: Deserializer<'de>,
    {
        to_f64(RawPrice::deserialize(deserializer)?)
    }

    pub fn option<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Option::<RawPrice>::deserialize(deserializer)?
            .map(to_f64)
            .transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn quantity_takes_first_number() {
        assert_eq!(numeric_quantity("100 kg"), 100.0);
        assert_eq!(numeric_quantity("about 12.5 tonnes, 3 crates"), 12.5);
        assert_eq!(numeric_quantity("no number"), 0.0);
        assert_eq!(numeric_quantity(""), 0.0);
    }

    #[test]
    fn base36_matches_known_values() {
        assert_eq!(to_base36(0), "0");
        assert_eq!(to_base36(35), "z");
        assert_eq!(to_base36(36), "10");
        assert_eq!(to_base36(1_700_000_000_000), "loyw3v28");
    }

    #[test]
    fn transaction_code_has_role_timestamp_and_suffix() {
        let at = Utc.timestamp_millis_opt(1_700_000_000_000).unwrap();
        let code = generate_transaction_code(UserRole::Distributor, at);
        let parts: Vec<&str> = code.split('_').collect();

        assert_eq!(parts.len(), 4);
        assert_eq!(parts[0], "TXN");
        assert_eq!(parts[1], "DISTRIBUTOR");
        assert_eq!(parts[2], "loyw3v28");
        assert_eq!(parts[3].len(), 5);
        assert!(parts[3]
            .chars()
            .all(|c| c.is_ascii_digit() || c.is_ascii_lowercase()));
    }

    #[test]
    fn wallet_id_uses_role_and_millis() {
        let at = Utc.timestamp_millis_opt(1_700_000_000_123).unwrap();
        assert_eq!(
            default_wallet_id(UserRole::Farmer, at),
            "wallet_farmer_1700000000123"
        );
    }

    #[test]
    fn flexible_dates() {
        let plain = parse_flexible_date("2024-03-15").unwrap();
        assert_eq!(plain, Utc.with_ymd_and_hms(2024, 3, 15, 0, 0, 0).unwrap());

        let full = parse_flexible_date("2024-03-15T10:30:00+02:00").unwrap();
        assert_eq!(full, Utc.with_ymd_and_hms(2024, 3, 15, 8, 30, 0).unwrap());

        assert!(parse_flexible_date("15/03/2024").is_none());
    }

    #[derive(Debug, serde::Deserialize)]
    struct Priced {
        #[serde(deserialize_with = "price::deserialize")]
        price: f64,
    }

    #[test]
    fn price_accepts_numbers_and_numeric_strings_only_when_finite() {
        let parse = |v: serde_json::Value| serde_json::from_value::<Priced>(v).map(|p| p.price);
        assert_eq!(parse(serde_json::json!({ "price": 12.5 })).unwrap(), 12.5);
        assert_eq!(parse(serde_json::json!({ "price": " 40 " })).unwrap(), 40.0);
        for bad in ["NaN", "inf", "-inf", "infinity", "abc"] {
            assert!(parse(serde_json::json!({ "price": bad })).is_err(), "{bad}");
        }
    }

    #[test]
    fn national_id_must_be_twelve_digits() {
        assert!(validate_national_id("123456789012").is_ok());
        assert!(validate_national_id("12345678901").is_err());
        assert!(validate_national_id("12345678901a").is_err());
        assert!(validate_national_id("1234567890123").is_err());
    }
}
