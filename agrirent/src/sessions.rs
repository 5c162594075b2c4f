// agrirent/src/sessions.rs

//! Bearer-token sessions. A token maps to the uid it was opened for; there is
//! no process-wide "current user".

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use std::collections::HashMap;
use tracing::{event, Level};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
  pub uid: String,
  pub opened_at: DateTime<Utc>,
}

#[derive(Debug, Default)]
pub struct SessionStore {
  sessions: RwLock<HashMap<String, Session>>,
}

impl SessionStore {
  pub fn new() -> Self {
    Self::default()
  }

  /// Opens a session for `uid` and returns its token.
  pub fn open(&self, uid: &str) -> String {
    let token = Uuid::new_v4().simple().to_string();
    self.sessions.write().insert(
      token.clone(),
      Session {
        uid: uid.to_string(),
        opened_at: Utc::now(),
      },
    );
    event!(Level::DEBUG, uid, "Session opened.");
    token
  }

  pub fn resolve(&self, token: &str) -> Option<Session> {
    self.sessions.read().get(token).cloned()
  }

  /// Returns whether the token was live.
  pub fn revoke(&self, token: &str) -> bool {
    self.sessions.write().remove(token).is_some()
  }

  /// Ends every session of `uid`; used when the account is deleted.
  pub fn revoke_all_for(&self, uid: &str) -> usize {
    let mut sessions = self.sessions.write();
    let before = sessions.len();
    sessions.retain(|_, s| s.uid != uid);
    before - sessions.len()
  }
}
