//! SSE session tracking.
//!
//! Each `GET` on the MCP root opens a session. JSON-RPC replies for requests
//! posted with that session id are pushed onto the session's SSE stream.

use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

struct McpSession {
    sender: mpsc::UnboundedSender<String>,
    cancel: CancellationToken,
}

/// Open SSE sessions keyed by session id
#[derive(Default)]
pub struct SessionManager {
    sessions: DashMap<String, McpSession>,
}

impl SessionManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new session.
    ///
    /// The session is closed when the returned guard is dropped.
    pub fn open(self: &Arc<Self>) -> (SessionGuard, mpsc::UnboundedReceiver<String>) {
        let id = uuid::Uuid::new_v4().simple().to_string();
        let (sender, receiver) = mpsc::unbounded_channel();

        self.sessions.insert(
            id.clone(),
            McpSession {
                sender,
                cancel: CancellationToken::new(),
            },
        );
        info!(session_id = %id, active = self.len(), "MCP session opened");

        let guard = SessionGuard {
            sessions: Arc::clone(self),
            id,
        };
        (guard, receiver)
    }

    /// Token for one request on `session_id`, cancelled when the session closes.
    pub fn request_token(&self, session_id: &str) -> Option<CancellationToken> {
        self.sessions
            .get(session_id)
            .map(|session| session.cancel.child_token())
    }

    /// Queue a JSON-RPC message for the session's stream.
    ///
    /// Returns false if the session is gone.
    pub fn send(&self, session_id: &str, message: String) -> bool {
        match self.sessions.get(session_id) {
            Some(session) => session.sender.send(message).is_ok(),
            None => false,
        }
    }

    pub fn close(&self, session_id: &str) {
        if let Some((_, session)) = self.sessions.remove(session_id) {
            session.cancel.cancel();
            info!(session_id = %session_id, active = self.len(), "MCP session closed");
        }
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }
}

/// Keeps a session registered for as long as its SSE stream lives.
pub struct SessionGuard {
    sessions: Arc<SessionManager>,
    id: String,
}

impl SessionGuard {
    pub fn id(&self) -> &str {
        &self.id
    }
}

impl Drop for SessionGuard {
    fn drop(&mut self) {
        debug!(session_id = %self.id, "SSE stream dropped");
        self.sessions.close(&self.id);
    }
}
