//! Message dispatcher
//!
//! Orchestrates one user message end to end: append it to the conversation,
//! try the remote session, and substitute the rule-based fallback reply on
//! any failure path. Every completion is a normal conversational reply; a
//! consumer of the conversation cannot tell a remote answer from a fallback
//! one, and nothing here can crash or lock the widget.

use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::Instrument;
use uuid::Uuid;

use crate::conversation::{ChatMessage, Conversation, Role};
use crate::fallback::FallbackResponder;
use crate::session::SessionManager;

/// Single-conversation message pipeline
///
/// Methods take `&self`; the conversation sits behind a lock that is never
/// held across the network await, so concurrent dispatches interleave with
/// append-on-arrival ordering. There is no cancellation: a late reply still
/// lands in the conversation when it resolves.
pub struct Dispatcher {
    sessions: Arc<SessionManager>,
    responder: FallbackResponder,
    conversation: Mutex<Conversation>,
}

impl Dispatcher {
    /// Create a dispatcher over a fresh, greeting-seeded conversation
    pub fn new(sessions: Arc<SessionManager>, responder: FallbackResponder) -> Self {
        Self {
            sessions,
            responder,
            conversation: Mutex::new(Conversation::new()),
        }
    }

    /// Handle one user message and return the appended reply text
    ///
    /// Blank input produces no dispatch at all and returns `None`. Otherwise
    /// exactly two messages are appended (the user's and a reply), and the
    /// reply text is returned. This never fails: any remote problem resolves
    /// to a fallback reply.
    pub async fn handle_user_message(&self, text: &str) -> Option<String> {
        if text.trim().is_empty() {
            return None;
        }

        let request_id = Uuid::new_v4();
        let span = tracing::info_span!("dispatch", request_id = %request_id);

        async {
            self.conversation
                .lock()
                .await
                .push(ChatMessage::new(Role::User, text));

            let reply = match self.sessions.session().await {
                None => {
                    // Fallback mode is terminal for this message; no remote
                    // attempt is made.
                    tracing::debug!("No session available, answering from rule table");
                    self.responder.respond(text)
                }
                Some(session) => match session.send(text).await {
                    Ok(remote) if !remote.trim().is_empty() => {
                        tracing::debug!(response_len = remote.len(), "Remote reply accepted");
                        remote
                    }
                    Ok(_) => {
                        // An empty success is unhelpful, not an error.
                        tracing::debug!("Remote reply was empty, answering from rule table");
                        self.responder.respond(text)
                    }
                    Err(e) => {
                        tracing::warn!(error = %e, "Remote send failed, answering from rule table");
                        self.responder.respond(text)
                    }
                },
            };

            self.conversation
                .lock()
                .await
                .push(ChatMessage::new(Role::Model, reply.clone()));

            Some(reply)
        }
        .instrument(span)
        .await
    }

    /// Number of messages in the conversation, including the seeded greeting
    pub async fn conversation_len(&self) -> usize {
        self.conversation.lock().await.len()
    }

    /// Snapshot of the conversation in insertion order
    pub async fn conversation_snapshot(&self) -> Vec<ChatMessage> {
        self.conversation.lock().await.messages().to_vec()
    }

    /// The session manager this dispatcher routes through
    pub fn sessions(&self) -> &SessionManager {
        &self.sessions
    }
}
