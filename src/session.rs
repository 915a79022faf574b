//! Session management for the remote assistant
//!
//! A session pairs a credential-bound client with the conversation context
//! the remote API expects to see replayed on every call. Sessions are
//! constructed lazily and cached for the application lifetime; saving a new
//! credential explicitly invalidates the cache so the next call
//! re-authenticates with the new value.
//!
//! Construction failures are logged and reported as an absent session, never
//! propagated: the dispatcher's fallback path must run regardless of cause.

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Mutex, RwLock};

use crate::config::GeminiConfig;
use crate::credentials::CredentialResolver;
use crate::error::ChatError;
use crate::gemini::types::{Content, ROLE_MODEL, ROLE_USER};
use crate::gemini::GeminiClient;
use crate::persona;

/// A live remote session that can answer user messages
///
/// Implementations manage conversation context internally; callers only
/// supply the new user text.
#[async_trait]
pub trait AssistantSession: Send + Sync {
    /// Send one user message and return the reply text
    ///
    /// The reply may be empty; the caller treats that as an unhelpful
    /// result, not an error.
    async fn send(&self, text: &str) -> Result<String, ChatError>;
}

/// Builds sessions from a resolved credential
///
/// A trait seam so tests can substitute a factory that records construction
/// calls or fails on demand.
pub trait SessionFactory: Send + Sync {
    /// Construct a session authenticated with `credential`
    fn create(&self, credential: &str) -> Result<Arc<dyn AssistantSession>, ChatError>;
}

/// Gemini-backed session holding the running conversation context
pub struct GeminiSession {
    client: GeminiClient,
    system_instruction: Content,
    history: Mutex<Vec<Content>>,
}

impl GeminiSession {
    /// Create a session with empty history
    pub fn new(client: GeminiClient) -> Self {
        Self {
            client,
            system_instruction: Content::system(persona::SYSTEM_INSTRUCTION),
            history: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl AssistantSession for GeminiSession {
    async fn send(&self, text: &str) -> Result<String, ChatError> {
        // Snapshot the context before the network await so a concurrent send
        // works from a consistent turn list.
        let mut contents = self.history.lock().await.clone();
        contents.push(Content::text(ROLE_USER, text));

        let reply = self
            .client
            .generate(contents, Some(self.system_instruction.clone()))
            .await?;

        // Context grows only on a useful reply; failed or empty calls leave
        // it untouched so the next attempt is not polluted.
        if !reply.trim().is_empty() {
            let mut history = self.history.lock().await;
            history.push(Content::text(ROLE_USER, text));
            history.push(Content::text(ROLE_MODEL, reply.clone()));
        }

        Ok(reply)
    }
}

/// Production factory building [`GeminiSession`]s
#[derive(Debug, Clone)]
pub struct GeminiSessionFactory {
    config: GeminiConfig,
}

impl GeminiSessionFactory {
    /// Create a factory from the remote assistant configuration
    pub fn new(config: GeminiConfig) -> Self {
        Self { config }
    }
}

impl SessionFactory for GeminiSessionFactory {
    fn create(&self, credential: &str) -> Result<Arc<dyn AssistantSession>, ChatError> {
        // Building the HTTP client can fail (TLS backend init); that failure
        // is the construction error the manager swallows into fallback mode.
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(self.config.timeout_secs))
            .build()?;

        let client = GeminiClient::new(
            http,
            credential,
            self.config.model.clone(),
            self.config.api_base_url.clone(),
        );
        Ok(Arc::new(GeminiSession::new(client)))
    }
}

/// Application-lifetime owner of the credential resolver and cached session
pub struct SessionManager {
    resolver: RwLock<CredentialResolver>,
    factory: Box<dyn SessionFactory>,
    cached: Mutex<Option<Arc<dyn AssistantSession>>>,
}

impl SessionManager {
    /// Create a manager; no session is constructed until first use
    pub fn new(resolver: CredentialResolver, factory: Box<dyn SessionFactory>) -> Self {
        Self {
            resolver: RwLock::new(resolver),
            factory,
            cached: Mutex::new(None),
        }
    }

    /// Get the cached session, constructing it on first use
    ///
    /// Returns `None` when no valid credential resolves or when construction
    /// fails; both conditions put the pipeline in fallback mode.
    pub async fn session(&self) -> Option<Arc<dyn AssistantSession>> {
        let mut cached = self.cached.lock().await;
        if let Some(session) = cached.as_ref() {
            return Some(Arc::clone(session));
        }

        let resolver = self.resolver.read().await;
        let credential = resolver.resolve()?.to_string();
        drop(resolver);

        match self.factory.create(&credential) {
            Ok(session) => {
                tracing::info!("Remote assistant session established");
                *cached = Some(Arc::clone(&session));
                Some(session)
            }
            Err(e) => {
                tracing::warn!(error = %e, "Session construction failed, staying in fallback mode");
                None
            }
        }
    }

    /// Save a new credential and drop any cached session
    ///
    /// The next send re-authenticates with the new value.
    pub async fn set_credential(&self, value: impl Into<String>) {
        self.resolver.write().await.set_credential(value);
        self.invalidate().await;
    }

    /// Discard the cached session, forcing re-construction on next use
    pub async fn invalidate(&self) {
        *self.cached.lock().await = None;
    }

    /// Whether a usable credential is currently configured
    pub async fn is_online(&self) -> bool {
        self.resolver.read().await.has_valid_credential()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::credentials::CredentialStore;
    use std::sync::Mutex as StdMutex;
    use tempfile::TempDir;

    struct EchoSession;

    #[async_trait]
    impl AssistantSession for EchoSession {
        async fn send(&self, text: &str) -> Result<String, ChatError> {
            Ok(format!("echo: {text}"))
        }
    }

    /// Factory double recording every credential it was asked to build with
    struct RecordingFactory {
        created_with: StdMutex<Vec<String>>,
        fail: bool,
    }

    impl RecordingFactory {
        fn new(fail: bool) -> Self {
            Self {
                created_with: StdMutex::new(Vec::new()),
                fail,
            }
        }
    }

    impl SessionFactory for RecordingFactory {
        fn create(&self, credential: &str) -> Result<Arc<dyn AssistantSession>, ChatError> {
            self.created_with
                .lock()
                .unwrap()
                .push(credential.to_string());
            if self.fail {
                Err(ChatError::MalformedResponse("construction exploded".into()))
            } else {
                Ok(Arc::new(EchoSession))
            }
        }
    }

    fn resolver_with_deploy(dir: &TempDir, deploy: Option<&str>) -> CredentialResolver {
        CredentialResolver::new(
            CredentialStore::new(dir.path().join("credential.json")),
            deploy.map(String::from),
        )
    }

    #[tokio::test]
    async fn no_credential_means_no_session_and_no_construction() {
        let dir = TempDir::new().unwrap();
        let factory = Arc::new(RecordingFactory::new(false));
        let manager = SessionManager::new(
            resolver_with_deploy(&dir, None),
            Box::new(SharedFactory(Arc::clone(&factory))),
        );

        assert!(manager.session().await.is_none());
        assert!(!manager.is_online().await);
        assert!(factory.created_with.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn session_is_constructed_once_and_cached() {
        let dir = TempDir::new().unwrap();
        let factory = Arc::new(RecordingFactory::new(false));
        let manager = SessionManager::new(
            resolver_with_deploy(&dir, Some("deploy-key-123")),
            Box::new(SharedFactory(Arc::clone(&factory))),
        );

        assert!(manager.session().await.is_some());
        assert!(manager.session().await.is_some());
        assert_eq!(
            *factory.created_with.lock().unwrap(),
            vec!["deploy-key-123".to_string()]
        );
    }

    #[tokio::test]
    async fn new_credential_invalidates_cached_session() {
        let dir = TempDir::new().unwrap();
        let factory = Arc::new(RecordingFactory::new(false));
        let manager = SessionManager::new(
            resolver_with_deploy(&dir, Some("deploy-key-123")),
            Box::new(SharedFactory(Arc::clone(&factory))),
        );

        assert!(manager.session().await.is_some());
        manager.set_credential("fresh-key-456").await;
        assert!(manager.session().await.is_some());

        assert_eq!(
            *factory.created_with.lock().unwrap(),
            vec!["deploy-key-123".to_string(), "fresh-key-456".to_string()]
        );
    }

    #[tokio::test]
    async fn construction_failure_is_swallowed_into_absence() {
        let dir = TempDir::new().unwrap();
        let factory = Arc::new(RecordingFactory::new(true));
        let manager = SessionManager::new(
            resolver_with_deploy(&dir, Some("deploy-key-123")),
            Box::new(SharedFactory(Arc::clone(&factory))),
        );

        assert!(manager.session().await.is_none());
        // The credential itself is still valid, so the widget reports online.
        assert!(manager.is_online().await);
    }

    #[tokio::test]
    async fn short_dynamic_credential_turns_sessions_off() {
        let dir = TempDir::new().unwrap();
        let factory = Arc::new(RecordingFactory::new(false));
        let manager = SessionManager::new(
            resolver_with_deploy(&dir, Some("deploy-key-123")),
            Box::new(SharedFactory(Arc::clone(&factory))),
        );

        assert!(manager.session().await.is_some());
        manager.set_credential("oops").await;
        assert!(manager.session().await.is_none());
        assert!(!manager.is_online().await);
    }

    /// Adapter so one recording factory can be shared with the manager
    struct SharedFactory(Arc<RecordingFactory>);

    impl SessionFactory for SharedFactory {
        fn create(&self, credential: &str) -> Result<Arc<dyn AssistantSession>, ChatError> {
            self.0.create(credential)
        }
    }
}
