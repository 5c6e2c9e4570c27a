use std::collections::BTreeMap;

use thiserror::Error;

use crate::{BusinessFields, RawFeatures, TransactionInput};

pub const TRANSACTION_TYPES: &[&str] = &["online", "in-store", "atm", "international"];
pub const MERCHANT_CATEGORIES: &[&str] = &[
    "retail",
    "electronics",
    "travel",
    "entertainment",
    "grocery",
    "dining",
];
pub const CARD_TYPES: &[&str] = &["credit", "debit", "prepaid"];
pub const TRANSACTION_LOCATIONS: &[&str] = &["domestic", "international", "online"];

const MIN_CUSTOMER_AGE: u32 = 18;
const MAX_CUSTOMER_AGE: u32 = 120;

#[derive(Error, Debug)]
pub enum FormError {
    #[error("unknown field '{0}'")]
    UnknownField(String),
    #[error("{} field(s) failed validation", .0.len())]
    Invalid(BTreeMap<String, String>),
}

#[derive(Debug, Clone, PartialEq)]
pub enum FieldKind {
    Number,
    Integer,
    Select(&'static [&'static str]),
}

/// UI description of one form field.
#[derive(Debug, Clone)]
pub struct FieldSpec {
    pub name: String,
    pub label: String,
    pub kind: FieldKind,
}

/// The two form shapes shipped by the demo. Never unified.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormVariant {
    RawFeatures,
    BusinessFields,
}

impl FormVariant {
    pub fn fields(&self) -> Vec<FieldSpec> {
        match self {
            FormVariant::RawFeatures => {
                let mut fields = vec![
                    field("amount", "Amount", FieldKind::Number),
                    field("time", "Time", FieldKind::Number),
                ];
                for i in 1..=28 {
                    fields.push(field(&format!("v{i}"), &format!("V{i}"), FieldKind::Number));
                }
                fields
            }
            FormVariant::BusinessFields => vec![
                field("amount", "Amount", FieldKind::Number),
                field(
                    "transaction_type",
                    "Transaction type",
                    FieldKind::Select(TRANSACTION_TYPES),
                ),
                field(
                    "merchant_category",
                    "Merchant category",
                    FieldKind::Select(MERCHANT_CATEGORIES),
                ),
                field("card_type", "Card type", FieldKind::Select(CARD_TYPES)),
                field(
                    "transaction_location",
                    "Transaction location",
                    FieldKind::Select(TRANSACTION_LOCATIONS),
                ),
                field("customer_age", "Customer age", FieldKind::Integer),
            ],
        }
    }
}

fn field(name: &str, label: &str, kind: FieldKind) -> FieldSpec {
    FieldSpec {
        name: name.to_string(),
        label: label.to_string(),
        kind,
    }
}

/// Captures raw text per field and validates it into a [`TransactionInput`]
/// on submit. Editing a field clears only that field's error.
#[derive(Debug, Clone)]
pub struct FormState {
    variant: FormVariant,
    values: BTreeMap<String, String>,
    errors: BTreeMap<String, String>,
}

impl FormState {
    pub fn new(variant: FormVariant) -> Self {
        let values = variant
            .fields()
            .into_iter()
            .map(|f| (f.name, String::new()))
            .collect();
        Self {
            variant,
            values,
            errors: BTreeMap::new(),
        }
    }

    pub fn variant(&self) -> FormVariant {
        self.variant
    }

    pub fn set(&mut self, name: &str, value: impl Into<String>) -> Result<(), FormError> {
        if !self.values.contains_key(name) {
            return Err(FormError::UnknownField(name.to_string()));
        }
        self.values.insert(name.to_string(), value.into());
        self.errors.remove(name);
        Ok(())
    }

    pub fn get(&self, name: &str) -> &str {
        self.values.get(name).map(String::as_str).unwrap_or("")
    }

    pub fn errors(&self) -> &BTreeMap<String, String> {
        &self.errors
    }

    /// Clears every field back to its default and drops any errors.
    pub fn reset(&mut self) {
        for value in self.values.values_mut() {
            value.clear();
        }
        self.errors.clear();
    }

    /// Validates the captured text and produces the typed input, or records
    /// one error message per offending field.
    pub fn validate(&mut self) -> Result<TransactionInput, FormError> {
        let result = match self.variant {
            FormVariant::RawFeatures => self.validate_raw(),
            FormVariant::BusinessFields => self.validate_business(),
        };
        match result {
            Ok(input) => {
                self.errors.clear();
                Ok(input)
            }
            Err(errors) => {
                self.errors = errors.clone();
                Err(FormError::Invalid(errors))
            }
        }
    }

    // All 30 fields required and float-parseable; no semantic checks.
    fn validate_raw(&self) -> Result<TransactionInput, BTreeMap<String, String>> {
        let mut errors = BTreeMap::new();
        let mut parsed = BTreeMap::new();
        for field in self.variant.fields() {
            match parse_number(self.get(&field.name)) {
                Ok(n) => {
                    parsed.insert(field.name, n);
                }
                Err(msg) => {
                    errors.insert(field.name, format!("{} {}", field.label, msg));
                }
            }
        }
        if !errors.is_empty() {
            return Err(errors);
        }

        let mut v = [0.0; 28];
        for (i, slot) in v.iter_mut().enumerate() {
            *slot = parsed[&format!("v{}", i + 1)];
        }
        Ok(TransactionInput::RawFeatures(RawFeatures {
            amount: parsed["amount"],
            time: parsed["time"],
            v,
        }))
    }

    fn validate_business(&self) -> Result<TransactionInput, BTreeMap<String, String>> {
        let mut errors = BTreeMap::new();

        let amount = match parse_number(self.get("amount")) {
            Ok(n) if n > 0.0 => Some(n),
            Ok(_) => {
                errors.insert(
                    "amount".into(),
                    "Amount must be greater than zero".to_string(),
                );
                None
            }
            Err(msg) => {
                errors.insert("amount".into(), format!("Amount {msg}"));
                None
            }
        };

        let customer_age = match self.get("customer_age").trim() {
            "" => {
                errors.insert("customer_age".into(), "Customer age is required".to_string());
                None
            }
            text => match text.parse::<u32>() {
                Ok(age) if (MIN_CUSTOMER_AGE..=MAX_CUSTOMER_AGE).contains(&age) => Some(age),
                Ok(_) => {
                    errors.insert(
                        "customer_age".into(),
                        format!(
                            "Customer age must be between {MIN_CUSTOMER_AGE} and {MAX_CUSTOMER_AGE}"
                        ),
                    );
                    None
                }
                Err(_) => {
                    errors.insert(
                        "customer_age".into(),
                        "Customer age must be a whole number".to_string(),
                    );
                    None
                }
            },
        };

        for field in self.variant.fields() {
            if let FieldKind::Select(options) = field.kind {
                let value = self.get(&field.name).trim();
                if value.is_empty() {
                    errors.insert(field.name, format!("{} is required", field.label));
                } else if !options.contains(&value) {
                    errors.insert(
                        field.name,
                        format!("{} must be one of: {}", field.label, options.join(", ")),
                    );
                }
            }
        }

        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(TransactionInput::BusinessFields(BusinessFields {
            amount: amount.unwrap_or_default(),
            transaction_type: self.get("transaction_type").trim().to_string(),
            merchant_category: self.get("merchant_category").trim().to_string(),
            card_type: self.get("card_type").trim().to_string(),
            transaction_location: self.get("transaction_location").trim().to_string(),
            customer_age: customer_age.unwrap_or_default(),
        }))
    }
}

fn parse_number(text: &str) -> Result<f64, &'static str> {
    let text = text.trim();
    if text.is_empty() {
        return Err("is required");
    }
    match text.parse::<f64>() {
        Ok(n) if n.is_finite() => Ok(n),
        _ => Err("must be a number"),
    }
}
