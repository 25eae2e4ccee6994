//! Build a `PlaySession` from resolved configuration.

use std::time::Duration;

use anyhow::Result;
use tracing::debug;

use tinysparks_core::{
    ActivityPipeline, Credential, FileStore, GeminiClient, PipelineSettings, PlaySession,
};

use crate::config::SparksConfig;

/// Upper bound on a single generation request.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Open a session backed by files under the configured data dir.
///
/// Opening never contacts the service; a missing API key only surfaces
/// when a plan is generated.
pub fn open_session(config: &SparksConfig) -> Result<PlaySession<FileStore>> {
    let client = GeminiClient::new(config.base_url.clone(), Some(REQUEST_TIMEOUT))?;
    let credential = config.api_key.clone().and_then(Credential::new);
    let settings = PipelineSettings::new(credential).with_model(config.model.clone());
    let pipeline = ActivityPipeline::new(Box::new(client), settings);

    debug!(data_dir = %config.data_dir.display(), model = %config.model, "opening session");
    let storage = FileStore::new(config.data_dir.clone());
    Ok(PlaySession::open(pipeline, storage.clone(), storage))
}
