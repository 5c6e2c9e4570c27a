use thiserror::Error;

use crate::form::{FormError, FormState, FormVariant};
use crate::{PredictError, PredictionClient, PredictionResult};

#[derive(Error, Debug)]
pub enum SubmitError {
    #[error("a prediction request is already in flight")]
    InFlight,
    #[error(transparent)]
    Form(#[from] FormError),
    #[error(transparent)]
    Predict(#[from] PredictError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Submitting,
    Resolved,
}

/// One analysis flow: fill the form, submit once, show the verdict, reset.
///
/// Only a single request is ever outstanding; a second submit while one is
/// in flight is refused rather than queued.
pub struct Session {
    client: PredictionClient,
    form: FormState,
    phase: Phase,
    result: Option<PredictionResult>,
}

impl Session {
    pub fn new(client: PredictionClient, variant: FormVariant) -> Self {
        Self {
            client,
            form: FormState::new(variant),
            phase: Phase::Idle,
            result: None,
        }
    }

    pub fn form(&self) -> &FormState {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut FormState {
        &mut self.form
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn result(&self) -> Option<&PredictionResult> {
        self.result.as_ref()
    }

    /// Validates the form and, only if it passes, issues the single
    /// prediction request. Validation failures never touch the network.
    pub async fn submit(&mut self) -> Result<&PredictionResult, SubmitError> {
        if self.phase == Phase::Submitting {
            return Err(SubmitError::InFlight);
        }
        let input = self.form.validate()?;

        self.phase = Phase::Submitting;
        match self.client.predict(&input).await {
            Ok(result) => {
                self.phase = Phase::Resolved;
                Ok(self.result.insert(result))
            }
            Err(e) => {
                self.phase = Phase::Idle;
                self.result = None;
                Err(e.into())
            }
        }
    }

    /// Clears the displayed result and every form field back to defaults.
    pub fn reset(&mut self) {
        self.result = None;
        self.phase = Phase::Idle;
        self.form.reset();
    }
}
