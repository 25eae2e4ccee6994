//! A play-planning session: pipeline, request tracking, current plan, and
//! favorites behind one owned object.

use thiserror::Error;
use tracing::warn;

use crate::activity::{Activity, ActivityRequest};
use crate::favorites::{FavoritesStore, Toggled};
use crate::pipeline::state::{RequestState, RequestStateError, RequestTracker};
use crate::pipeline::{ActivityPipeline, GenerateError};
use crate::storage::{KeyValueStore, StorageError};

/// Storage key holding the most recently generated plan.
pub const LAST_PLAN_KEY: &str = "tinySparksLastPlan";

/// Which list a view shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    Plan,
    Favorites,
}

#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    State(#[from] RequestStateError),

    #[error(transparent)]
    Generate(#[from] GenerateError),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error("no activity with id {0:?} in the current plan or favorites")]
    UnknownActivity(String),
}

pub struct PlaySession<S: KeyValueStore> {
    pipeline: ActivityPipeline,
    tracker: RequestTracker,
    favorites: FavoritesStore<S>,
    plan_store: S,
    plan: Option<Vec<Activity>>,
}

impl<S: KeyValueStore> PlaySession<S> {
    /// Open a session, loading favorites from `favorites_storage` and the
    /// last plan from `plan_storage`. Neither load can fail.
    pub fn open(pipeline: ActivityPipeline, favorites_storage: S, plan_storage: S) -> Self {
        let favorites = FavoritesStore::load(favorites_storage);
        let plan = load_last_plan(&plan_storage);
        Self {
            pipeline,
            tracker: RequestTracker::new(),
            favorites,
            plan_store: plan_storage,
            plan,
        }
    }

    pub fn state(&self) -> RequestState {
        self.tracker.state()
    }

    pub fn last_error(&self) -> Option<&str> {
        self.tracker.last_error()
    }

    pub fn plan(&self) -> Option<&[Activity]> {
        self.plan.as_deref()
    }

    pub fn favorites(&self) -> &FavoritesStore<S> {
        &self.favorites
    }

    pub fn activities(&self, tab: Tab) -> &[Activity] {
        match tab {
            Tab::Plan => self.plan().unwrap_or_default(),
            Tab::Favorites => self.favorites.activities(),
        }
    }

    /// Generate a new plan. Rejected while another request is in flight.
    ///
    /// On failure the previous plan is kept and the error message is
    /// available from [`Self::last_error`].
    pub async fn submit(&mut self, request: &ActivityRequest) -> Result<&[Activity], SessionError> {
        self.tracker.begin()?;

        let taken = self.favorites.ids();
        match self.pipeline.generate(request, &taken).await {
            Ok(activities) => {
                self.tracker.succeed()?;
                self.save_plan(&activities);
                Ok(self.plan.insert(activities).as_slice())
            }
            Err(e) => {
                self.tracker.fail(e.to_string())?;
                Err(e.into())
            }
        }
    }

    /// Toggle the favorite status of the activity with `id`, looked up in
    /// the current plan first and then among favorites.
    pub fn toggle_favorite(&mut self, id: &str) -> Result<(Toggled, Activity), SessionError> {
        let activity = self
            .plan
            .iter()
            .flatten()
            .find(|a| a.id == id)
            .or_else(|| self.favorites.get(id))
            .cloned()
            .ok_or_else(|| SessionError::UnknownActivity(id.to_owned()))?;
        let outcome = self.favorites.toggle(&activity)?;
        Ok((outcome, activity))
    }

    pub fn is_favorite(&self, id: &str) -> bool {
        self.favorites.is_favorite(id)
    }

    /// Look an activity up by id in the current plan or favorites.
    pub fn find(&self, id: &str) -> Option<&Activity> {
        self.plan
            .iter()
            .flatten()
            .find(|a| a.id == id)
            .or_else(|| self.favorites.get(id))
    }

    fn save_plan(&mut self, activities: &[Activity]) {
        let result = serde_json::to_string(activities)
            .map_err(|e| e.to_string())
            .and_then(|json| {
                self.plan_store
                    .set(LAST_PLAN_KEY, &json)
                    .map_err(|e| e.to_string())
            });
        if let Err(e) = result {
            warn!(error = %e, "failed to store last plan");
        }
    }
}

fn load_last_plan(storage: &impl KeyValueStore) -> Option<Vec<Activity>> {
    match storage.get(LAST_PLAN_KEY) {
        Ok(Some(raw)) => match serde_json::from_str(&raw) {
            Ok(plan) => Some(plan),
            Err(e) => {
                warn!(error = %e, "stored plan is malformed, ignoring");
                None
            }
        },
        Ok(None) => None,
        Err(e) => {
            warn!(error = %e, "failed to read stored plan, ignoring");
            None
        }
    }
}
