//! Row type for the churn CSV and the coercions applied while reading it.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Senior-citizen status, normalized from the raw `0`/`1` flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SeniorCitizen {
    No,
    Yes,
}

impl SeniorCitizen {
    /// Normalizes a raw cell. `1` (or an already cleaned `yes`) maps to
    /// [`SeniorCitizen::Yes`], every other value maps to [`SeniorCitizen::No`].
    pub fn normalize(raw: &str) -> Self {
        let raw = raw.trim();
        if raw.eq_ignore_ascii_case("yes") {
            return SeniorCitizen::Yes;
        }
        match raw.parse::<f64>() {
            Ok(v) if v == 1.0 => SeniorCitizen::Yes,
            _ => SeniorCitizen::No,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SeniorCitizen::Yes => "yes",
            SeniorCitizen::No => "no",
        }
    }
}

impl fmt::Display for SeniorCitizen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for SeniorCitizen {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for SeniorCitizen {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(SeniorCitizen::normalize(&raw))
    }
}

/// Coerces a raw `TotalCharges` cell. Blank cells become `0.0`.
pub fn coerce_total_charges(raw: &str) -> Result<f64, std::num::ParseFloatError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(0.0);
    }
    raw.parse()
}

fn de_total_charges<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    let raw = String::deserialize(deserializer)?;
    coerce_total_charges(&raw)
        .map_err(|e| serde::de::Error::custom(format!("invalid TotalCharges {raw:?}: {e}")))
}

fn de_churn<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    let raw = String::deserialize(deserializer)?;
    Ok(raw == "Yes")
}

fn ser_churn<S: Serializer>(churned: &bool, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(if *churned { "Yes" } else { "No" })
}

/// A single cleaned customer row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomerRecord {
    #[serde(rename = "customerID")]
    pub customer_id: String,
    pub gender: String,
    #[serde(rename = "SeniorCitizen")]
    pub senior_citizen: SeniorCitizen,
    #[serde(rename = "Partner")]
    pub partner: String,
    #[serde(rename = "Dependents")]
    pub dependents: String,
    pub tenure: u32,
    #[serde(rename = "PhoneService")]
    pub phone_service: String,
    #[serde(rename = "MultipleLines")]
    pub multiple_lines: String,
    #[serde(rename = "InternetService")]
    pub internet_service: String,
    #[serde(rename = "OnlineSecurity")]
    pub online_security: String,
    #[serde(rename = "OnlineBackup")]
    pub online_backup: String,
    #[serde(rename = "DeviceProtection")]
    pub device_protection: String,
    #[serde(rename = "TechSupport")]
    pub tech_support: String,
    #[serde(rename = "StreamingTV")]
    pub streaming_tv: String,
    #[serde(rename = "StreamingMovies")]
    pub streaming_movies: String,
    #[serde(rename = "Contract")]
    pub contract: String,
    #[serde(rename = "PaperlessBilling")]
    pub paperless_billing: String,
    #[serde(rename = "PaymentMethod")]
    pub payment_method: String,
    #[serde(rename = "MonthlyCharges")]
    pub monthly_charges: f64,
    #[serde(rename = "TotalCharges", deserialize_with = "de_total_charges")]
    pub total_charges: f64,
    #[serde(
        rename = "Churn",
        deserialize_with = "de_churn",
        serialize_with = "ser_churn"
    )]
    pub churned: bool,
}

/// Number of columns in the CSV schema.
pub const COLUMN_COUNT: usize = 21;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_senior_citizen_from_flag() {
        assert_eq!(SeniorCitizen::normalize("1"), SeniorCitizen::Yes);
        assert_eq!(SeniorCitizen::normalize("0"), SeniorCitizen::No);
        assert_eq!(SeniorCitizen::normalize(" 1 "), SeniorCitizen::Yes);
        assert_eq!(SeniorCitizen::normalize("2"), SeniorCitizen::No);
    }

    #[test]
    fn test_senior_citizen_accepts_clean_labels() {
        assert_eq!(SeniorCitizen::normalize("yes"), SeniorCitizen::Yes);
        assert_eq!(SeniorCitizen::normalize("Yes"), SeniorCitizen::Yes);
        assert_eq!(SeniorCitizen::normalize("no"), SeniorCitizen::No);
    }

    #[test]
    fn test_total_charges_blank_is_zero() {
        assert_eq!(coerce_total_charges(" ").unwrap(), 0.0);
        assert_eq!(coerce_total_charges("").unwrap(), 0.0);
        assert_eq!(coerce_total_charges("29.85").unwrap(), 29.85);
    }

    #[test]
    fn test_total_charges_rejects_text() {
        assert!(coerce_total_charges("abc").is_err());
    }
}
