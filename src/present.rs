use std::fmt;

use serde::Serialize;

use crate::PredictionResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Verdict {
    Legitimate,
    Fraudulent,
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verdict::Legitimate => write!(f, "legitimate"),
            Verdict::Fraudulent => write!(f, "fraudulent"),
        }
    }
}

/// Presenter output: the binary verdict plus an optional rounded
/// confidence percentage.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Assessment {
    pub verdict: Verdict,
    pub confidence: Option<u32>,
}

/// Pure mapping from a scored response to what the user sees.
/// Confidence is `round(probability[prediction] * 100)`, omitted when the
/// backend sent no probability vector.
pub fn assess(result: &PredictionResult) -> Assessment {
    let verdict = if result.prediction == 1 {
        Verdict::Fraudulent
    } else {
        Verdict::Legitimate
    };
    let confidence = result
        .probability
        .as_deref()
        .and_then(|p| p.get(result.prediction as usize))
        .map(|p| (p * 100.0).round() as u32);
    Assessment { verdict, confidence }
}

pub fn render(assessment: &Assessment) -> String {
    let mut out = String::new();
    match assessment.verdict {
        Verdict::Fraudulent => {
            out.push_str("!! Fraudulent transaction detected\n");
            out.push_str("High risk: review the details and consider blocking this transaction.\n");
        }
        Verdict::Legitimate => {
            out.push_str("OK Legitimate transaction\n");
            out.push_str("This transaction follows normal patterns. No action is required.\n");
        }
    }
    if let Some(confidence) = assessment.confidence {
        out.push_str(&format!("Confidence score: {confidence}%\n"));
    }
    out
}
