// agrirent/src/models/user.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Stored account document. The document id is the uid.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserAccount {
  pub id: String,
  pub email: String,
  pub display_name: String,
  pub photo_url: String,
  pub password_hash: String,
  pub created_at: Option<DateTime<Utc>>,
}

/// Public projection of an account. Never carries the password hash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
  pub uid: String,
  pub email: String,
  pub display_name: String,
  pub photo_url: String,
}

impl From<&UserAccount> for UserProfile {
  fn from(account: &UserAccount) -> Self {
    UserProfile {
      uid: account.id.clone(),
      email: account.email.clone(),
      display_name: account.display_name.clone(),
      photo_url: account.photo_url.clone(),
    }
  }
}
