//! The activity request pipeline.
//!
//! Checks the credential, builds the prompt and output contract, calls the
//! completion service once, validates the response, and assigns ids.
//! There is no retry; the caller resubmits.

pub mod state;

use std::collections::HashSet;
use std::fmt;

use thiserror::Error;
use tracing::{error, info};

use crate::activity::{Activity, ActivityRequest, assign_ids};
use crate::completion::{CompletionRequest, CompletionService, Credential};
use crate::generate::{self, ResponseParseError};

/// Message shown when no credential is configured.
pub const MISSING_CREDENTIAL_MESSAGE: &str = "API Key is missing. Please check your configuration.";

/// Message shown for every generation failure.
pub const GENERATION_FAILED_MESSAGE: &str = "Failed to generate activities. Please try again.";

/// Errors surfaced to the caller of [`ActivityPipeline::generate`].
#[derive(Debug, Error)]
pub enum GenerateError {
    /// No credential is available. Detected before any network call.
    #[error("{0}")]
    Configuration(String),

    /// The call, or interpretation of its result, failed. The display
    /// message is fixed; the cause is logged and kept for inspection only.
    #[error("Failed to generate activities. Please try again.")]
    Generation(GenerationFailure),
}

impl GenerateError {
    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::Configuration(_))
    }
}

/// Underlying reason for a [`GenerateError::Generation`].
#[derive(Debug)]
pub enum GenerationFailure {
    /// The completion service returned an error.
    Transport(anyhow::Error),
    /// The service returned no content.
    EmptyResponse,
    /// The content could not be turned into a valid plan.
    Malformed(ResponseParseError),
}

impl fmt::Display for GenerationFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Transport(e) => write!(f, "completion service error: {e:#}"),
            Self::EmptyResponse => f.write_str("no content generated"),
            Self::Malformed(e) => write!(f, "malformed response: {e}"),
        }
    }
}

/// Settings for an [`ActivityPipeline`].
#[derive(Debug, Clone)]
pub struct PipelineSettings {
    /// Credential for the completion service, if one is configured.
    pub credential: Option<Credential>,
    /// Model identifier passed through to the service.
    pub model: String,
}

impl PipelineSettings {
    pub fn new(credential: Option<Credential>) -> Self {
        Self {
            credential,
            model: generate::DEFAULT_MODEL.to_owned(),
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }
}

/// Turns an [`ActivityRequest`] into a validated, id-stamped plan.
pub struct ActivityPipeline {
    service: Box<dyn CompletionService>,
    settings: PipelineSettings,
}

impl ActivityPipeline {
    pub fn new(service: Box<dyn CompletionService>, settings: PipelineSettings) -> Self {
        Self { service, settings }
    }

    pub fn settings(&self) -> &PipelineSettings {
        &self.settings
    }

    /// Build the request the service will receive for `request`.
    pub fn completion_request(&self, request: &ActivityRequest) -> CompletionRequest {
        CompletionRequest {
            model: self.settings.model.clone(),
            prompt: generate::build_prompt(request),
            system_instruction: generate::SYSTEM_INSTRUCTION.to_owned(),
            response_schema: generate::response_schema(),
        }
    }

    /// Generate a plan.
    ///
    /// `taken` holds ids already in use (e.g. favorites); new ids never
    /// collide with them. The returned order is the service's order.
    pub async fn generate(
        &self,
        request: &ActivityRequest,
        taken: &HashSet<String>,
    ) -> Result<Vec<Activity>, GenerateError> {
        let credential = self
            .settings
            .credential
            .as_ref()
            .ok_or_else(|| GenerateError::Configuration(MISSING_CREDENTIAL_MESSAGE.to_owned()))?;

        let completion = self.completion_request(request);
        info!(
            service = self.service.name(),
            model = %completion.model,
            age_group = %request.age_group,
            "requesting activity plan"
        );

        let raw = self
            .service
            .complete(credential, &completion)
            .await
            .map_err(|e| fail(GenerationFailure::Transport(e)))?;

        if raw.trim().is_empty() {
            return Err(fail(GenerationFailure::EmptyResponse));
        }

        let drafts = generate::parse_activities(&raw)
            .and_then(|drafts| generate::validate_plan_shape(&drafts).map(|()| drafts))
            .map_err(|e| fail(GenerationFailure::Malformed(e)))?;

        let activities = assign_ids(drafts, taken);
        info!(count = activities.len(), "activity plan generated");
        Ok(activities)
    }
}

fn fail(failure: GenerationFailure) -> GenerateError {
    error!(cause = %failure, "error generating activities");
    GenerateError::Generation(failure)
}
