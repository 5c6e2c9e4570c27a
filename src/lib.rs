pub mod client;
pub mod config;
pub mod form;
pub mod present;
pub mod samples;
pub mod session;

pub use client::{PredictError, PredictionClient, PredictionResult};
pub use config::ClientConfig;
pub use form::{FormState, FormVariant};
pub use present::{Assessment, Verdict};
pub use session::Session;

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

/// One transaction as entered by the user, ready for the wire.
///
/// The two shapes mirror the two form variants and are deliberately kept
/// separate; the backend accepts either as a flat JSON object.
#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum TransactionInput {
    RawFeatures(RawFeatures),
    BusinessFields(BusinessFields),
}

/// Anonymized benchmark-dataset shape: amount, time offset, and the 28
/// PCA components `v1..v28`.
#[derive(Debug, Clone, PartialEq)]
pub struct RawFeatures {
    pub amount: f64,
    pub time: f64,
    pub v: [f64; 28],
}

// Serialized flat as {amount, time, v1..v28}, not as a nested array.
impl Serialize for RawFeatures {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(30))?;
        map.serialize_entry("amount", &self.amount)?;
        map.serialize_entry("time", &self.time)?;
        for (i, value) in self.v.iter().enumerate() {
            map.serialize_entry(&format!("v{}", i + 1), value)?;
        }
        map.end()
    }
}

/// Human-meaningful shape used by the simplified form.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct BusinessFields {
    pub amount: f64,
    pub transaction_type: String,
    pub merchant_category: String,
    pub card_type: String,
    pub transaction_location: String,
    pub customer_age: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raw_features_serialize_flat() {
        let input = TransactionInput::RawFeatures(RawFeatures {
            amount: 149.62,
            time: 0.0,
            v: [0.5; 28],
        });
        let value = serde_json::to_value(&input).unwrap();
        let obj = value.as_object().unwrap();
        assert_eq!(obj.len(), 30);
        assert_eq!(obj["amount"], serde_json::json!(149.62));
        assert_eq!(obj["v1"], serde_json::json!(0.5));
        assert_eq!(obj["v28"], serde_json::json!(0.5));
        assert!(!obj.contains_key("v"));
    }

    #[test]
    fn business_fields_serialize_numbers_as_numbers() {
        let input = TransactionInput::BusinessFields(BusinessFields {
            amount: 42.5,
            transaction_type: "online".into(),
            merchant_category: "electronics".into(),
            card_type: "credit".into(),
            transaction_location: "domestic".into(),
            customer_age: 34,
        });
        let value = serde_json::to_value(&input).unwrap();
        assert_eq!(value["amount"], serde_json::json!(42.5));
        assert_eq!(value["customer_age"], serde_json::json!(34));
        assert_eq!(value["transaction_type"], serde_json::json!("online"));
    }
}
