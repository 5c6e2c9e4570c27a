use std::time::Duration;

use log::{debug, error, info};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{ClientConfig, TransactionInput};

#[derive(Error, Debug)]
pub enum PredictError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("prediction service returned HTTP {0}")]
    Status(u16),
    #[error("prediction service error: {0}")]
    Backend(String),
    #[error("malformed prediction response: {0}")]
    Shape(String),
}

/// What the `/predict` endpoint answers on success.
///
/// `probability` is per-class, indexed by the predicted label; the backend
/// may omit it, and may attach extra fields (`threshold`, `confidence_score`)
/// which are ignored here.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct PredictionResult {
    pub prediction: u8,
    #[serde(default)]
    pub probability: Option<Vec<f64>>,
}

/// Issues exactly one HTTP POST per [`predict`](PredictionClient::predict)
/// call. No retries, no caching, no deduplication.
pub struct PredictionClient {
    http: reqwest::Client,
    endpoint: String,
    contract: jsonschema::Validator,
}

impl PredictionClient {
    pub fn new(config: &ClientConfig) -> Result<Self, PredictError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        let contract = jsonschema::validator_for(&response_schema())
            .map_err(|e| PredictError::Shape(e.to_string()))?;
        Ok(Self {
            http,
            endpoint: config.endpoint.clone(),
            contract,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Sends the transaction for scoring and returns the verdict payload.
    ///
    /// Failure taxonomy: non-2xx status, an `error` field in the body (even
    /// on HTTP 200), a network/timeout fault, or a body that violates the
    /// response contract. All are terminal for this attempt.
    pub async fn predict(
        &self,
        input: &TransactionInput,
    ) -> Result<PredictionResult, PredictError> {
        info!("submitting prediction request to {}", self.endpoint);
        let response = self
            .http
            .post(self.endpoint.as_str())
            .json(input)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            error!("prediction service answered HTTP {status}");
            return Err(PredictError::Status(status.as_u16()));
        }

        let body: serde_json::Value = response.json().await?;
        debug!("prediction response: {body}");

        // A 200 can still carry a logical failure.
        if let Some(message) = body.get("error") {
            let message = message
                .as_str()
                .map(str::to_string)
                .unwrap_or_else(|| message.to_string());
            error!("prediction service reported: {message}");
            return Err(PredictError::Backend(message));
        }

        // Check the payload against the contract before trusting it.
        if !self.contract.is_valid(&body) {
            return Err(PredictError::Shape(
                "response violated the prediction contract".to_string(),
            ));
        }

        let result: PredictionResult =
            serde_json::from_value(body).map_err(|e| PredictError::Shape(e.to_string()))?;
        check_result(&result)?;
        info!("prediction={} probability={:?}", result.prediction, result.probability);
        Ok(result)
    }
}

// The probability vector, when present, must cover the predicted index;
// indexing an unchecked response is how the old UI ended up showing NaN.
fn check_result(result: &PredictionResult) -> Result<(), PredictError> {
    if result.prediction > 1 {
        return Err(PredictError::Shape(format!(
            "prediction must be 0 or 1, got {}",
            result.prediction
        )));
    }
    if let Some(probability) = &result.probability {
        let index = result.prediction as usize;
        if probability.len() <= index {
            return Err(PredictError::Shape(format!(
                "probability has {} entries, cannot cover class {index}",
                probability.len()
            )));
        }
    }
    Ok(())
}

fn response_schema() -> serde_json::Value {
    serde_json::json!({
        "type": "object",
        "required": ["prediction"],
        "properties": {
            "prediction": { "type": "integer", "minimum": 0 },
            "probability": {
                "type": "array",
                "items": { "type": "number" }
            }
        }
    })
}
