//! Completion service interface for the external model provider.
//!
//! ```text
//! ActivityPipeline
//!     |
//!     |  complete(credential, CompletionRequest)
//!     v
//! &dyn CompletionService ---> GeminiClient (HTTP)
//!                        \--> test doubles
//!     |
//!     v
//! raw response text
//! ```

pub mod gemini;
pub mod trait_def;

pub use gemini::GeminiClient;
pub use trait_def::{CompletionRequest, CompletionService, Credential};
