//! The `CompletionService` trait -- the adapter interface for model providers.
//!
//! The trait is object-safe so the pipeline can hold a
//! `Box<dyn CompletionService>` and tests can swap in a mock.

use std::fmt;

use anyhow::Result;
use async_trait::async_trait;
use serde_json::Value;

/// Access credential for the completion service.
///
/// `Debug` never prints the key.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    /// Wrap a key. Returns `None` for an empty or whitespace-only key.
    pub fn new(key: impl Into<String>) -> Option<Self> {
        let key = key.into().trim().to_owned();
        if key.is_empty() { None } else { Some(Self(key)) }
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(***)")
    }
}

/// Everything the provider needs to produce one structured completion.
#[derive(Debug, Clone)]
pub struct CompletionRequest {
    /// Provider model identifier (e.g. `gemini-2.5-flash`).
    pub model: String,
    /// User prompt text.
    pub prompt: String,
    /// System instruction text.
    pub system_instruction: String,
    /// Declared output schema the provider must honor.
    pub response_schema: Value,
}

/// Adapter interface for a structured text completion provider.
///
/// Implementors return the raw response text. An empty string means the
/// provider produced no content; interpreting it is the caller's job.
#[async_trait]
pub trait CompletionService: Send + Sync {
    /// Human-readable name for this provider (e.g. "gemini").
    fn name(&self) -> &str;

    /// Send one request and return the raw response text.
    async fn complete(&self, credential: &Credential, request: &CompletionRequest)
    -> Result<String>;
}

// Compile-time assertion: CompletionService must be object-safe.
const _: () = {
    fn _assert_object_safe(_: &dyn CompletionService) {}
};

#[cfg(test)]
mod tests {
    use super::*;

    struct EchoService;

    #[async_trait]
    impl CompletionService for EchoService {
        fn name(&self) -> &str {
            "echo"
        }

        async fn complete(
            &self,
            _credential: &Credential,
            request: &CompletionRequest,
        ) -> Result<String> {
            Ok(request.prompt.clone())
        }
    }

    #[tokio::test]
    async fn service_is_usable_as_trait_object() {
        let service: Box<dyn CompletionService> = Box::new(EchoService);
        let credential = Credential::new("k").unwrap();
        let request = CompletionRequest {
            model: "m".to_string(),
            prompt: "hello".to_string(),
            system_instruction: String::new(),
            response_schema: Value::Null,
        };
        assert_eq!(service.name(), "echo");
        assert_eq!(service.complete(&credential, &request).await.unwrap(), "hello");
    }

    #[test]
    fn blank_credential_is_rejected() {
        assert!(Credential::new("").is_none());
        assert!(Credential::new("   ").is_none());
        assert_eq!(Credential::new(" abc ").unwrap().expose(), "abc");
    }

    #[test]
    fn credential_debug_is_redacted() {
        let c = Credential::new("super-secret").unwrap();
        assert_eq!(format!("{c:?}"), "Credential(***)");
    }
}
