//! Serde helpers shared by the v1 resources.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{de, Deserialize, Deserializer, Serializer};

/// Naive layouts the vendor uses besides RFC 3339, read as UTC.
const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Parses a vendor timestamp.
///
/// RFC 3339 values keep their offset and are converted to UTC; values
/// without an offset are taken to be UTC already.
///
/// # Errors
///
/// Returns the RFC 3339 parse error if no layout matches.
pub fn parse_vendor_datetime(raw: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .or_else(|rfc_error| {
            NAIVE_FORMATS
                .iter()
                .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
                .map(|naive| naive.and_utc())
                .ok_or(rfc_error)
        })
}

/// `#[serde(with = "vendor_datetime")]` for required timestamps.
pub mod vendor_datetime {
    use super::{de, parse_vendor_datetime, DateTime, Deserialize, Deserializer, Serializer, Utc};

    pub fn serialize<S: Serializer>(
        value: &DateTime<Utc>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.to_rfc3339())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse_vendor_datetime(&raw).map_err(de::Error::custom)
    }

    /// `#[serde(default, with = "vendor_datetime::option")]` for nullable timestamps.
    pub mod option {
        use super::{
            de, parse_vendor_datetime, DateTime, Deserialize, Deserializer, Serializer, Utc,
        };

        #[allow(clippy::ref_option)]
        pub fn serialize<S: Serializer>(
            value: &Option<DateTime<Utc>>,
            serializer: S,
        ) -> Result<S::Ok, S::Error> {
            match value {
                Some(value) => serializer.serialize_some(&value.to_rfc3339()),
                None => serializer.serialize_none(),
            }
        }

        pub fn deserialize<'de, D: Deserializer<'de>>(
            deserializer: D,
        ) -> Result<Option<DateTime<Utc>>, D::Error> {
            Option::<String>::deserialize(deserializer)?
                .filter(|raw| !raw.trim().is_empty())
                .map(|raw| parse_vendor_datetime(&raw).map_err(de::Error::custom))
                .transpose()
        }
    }
}

/// Reads an identifier the vendor sends either as a string or a number.
pub fn string_or_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Int(i64),
        Float(f64),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Text(text) => text,
        Raw::Int(number) => number.to_string(),
        Raw::Float(number) => number.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn test_parse_vendor_datetime_accepts_rfc3339_with_offset() {
        let parsed = parse_vendor_datetime("2024-03-10T14:30:00+03:30").unwrap();
        assert_eq!(parsed.hour(), 11);
        assert_eq!(parsed.minute(), 0);
    }

    #[test]
    fn test_parse_vendor_datetime_reads_naive_values_as_utc() {
        let parsed = parse_vendor_datetime("2024-03-10T14:30:00.123456").unwrap();
        assert_eq!(parsed.day(), 10);
        assert_eq!(parsed.hour(), 14);

        let spaced = parse_vendor_datetime("2024-03-10 14:30:00").unwrap();
        assert_eq!(spaced.hour(), 14);
    }

    #[test]
    fn test_parse_vendor_datetime_rejects_garbage() {
        assert!(parse_vendor_datetime("yesterday").is_err());
    }
}
