//! Core library for tinysparks.
//!
//! Turns a child profile into a nine-activity play plan by prompting an
//! external completion service, and keeps a persisted favorites list.
//!
//! ```text
//! ActivityRequest
//!     |
//!     v
//! ActivityPipeline --complete()--> dyn CompletionService (Gemini)
//!     |
//!     v
//! Vec<Activity> --> PlanSections (developmental / sensory)
//!     |
//!     v
//! FavoritesStore --set()--> dyn KeyValueStore
//! ```

pub mod activity;
pub mod completion;
pub mod favorites;
pub mod generate;
pub mod pipeline;
pub mod session;
pub mod storage;

pub use activity::{Activity, ActivityDraft, ActivityRequest, AgeGroup, Category, PlanSections};
pub use completion::{CompletionRequest, CompletionService, Credential, GeminiClient};
pub use favorites::{FAVORITES_KEY, FavoritesStore, Toggled};
pub use pipeline::{ActivityPipeline, GenerateError, GenerationFailure, PipelineSettings};
pub use pipeline::state::{RequestState, RequestStateError, RequestTracker};
pub use session::{LAST_PLAN_KEY, PlaySession, SessionError, Tab};
pub use storage::{FileStore, KeyValueStore, MemoryStore, StorageError};
