// agrirent/src/services/identity.rs

//! Account records in the `users` collection. Emails are stored lower-cased
//! so lookups are case-insensitive.

use chrono::Utc;
use serde_json::{json, Value};
use tracing::{info, instrument};

use crate::errors::{AppError, Result};
use crate::models::UserAccount;
use crate::store::{collections::USERS, encode, DocumentStore, Fields};

pub fn normalize_email(email: &str) -> String {
  email.trim().to_lowercase()
}

#[instrument(name = "identity::find_by_email", skip(store), err(Display))]
pub async fn find_by_email(store: &dyn DocumentStore, email: &str) -> Result<Option<UserAccount>> {
  let matches = store
    .fetch_where_eq(USERS, "email", &Value::String(normalize_email(email)))
    .await?;
  match matches.into_iter().next() {
    Some(doc) => Ok(Some(doc.decode()?)),
    None => Ok(None),
  }
}

#[instrument(name = "identity::load_account", skip(store), err(Display))]
pub async fn load_account(store: &dyn DocumentStore, uid: &str) -> Result<UserAccount> {
  let doc = store
    .fetch_by_id(USERS, uid)
    .await?
    .ok_or_else(|| AppError::Auth("No account exists for this session.".to_string()))?;
  Ok(doc.decode()?)
}

#[instrument(name = "identity::create_account", skip(store, password_hash), err(Display))]
pub async fn create_account(
  store: &dyn DocumentStore,
  email: &str,
  display_name: &str,
  password_hash: String,
) -> Result<UserAccount> {
  let mut account = UserAccount {
    id: String::new(),
    email: normalize_email(email),
    display_name: display_name.trim().to_string(),
    photo_url: String::new(),
    password_hash,
    created_at: Some(Utc::now()),
  };
  account.id = store.create(USERS, encode(&account)?).await?;
  info!(uid = %account.id, "Account created.");
  Ok(account)
}

#[instrument(name = "identity::update_profile", skip(store), err(Display))]
pub async fn update_profile(
  store: &dyn DocumentStore,
  uid: &str,
  display_name: &str,
  email: &str,
  photo_url: &str,
) -> Result<()> {
  let fields = fields_of(json!({
    "displayName": display_name.trim(),
    "email": normalize_email(email),
    "photoUrl": photo_url.trim(),
  }));
  store.update(USERS, uid, fields).await?;
  Ok(())
}

#[instrument(name = "identity::update_password_hash", skip(store, password_hash), err(Display))]
pub async fn update_password_hash(store: &dyn DocumentStore, uid: &str, password_hash: String) -> Result<()> {
  store
    .update(USERS, uid, fields_of(json!({ "passwordHash": password_hash })))
    .await?;
  Ok(())
}

#[instrument(name = "identity::delete_account", skip(store), err(Display))]
pub async fn delete_account(store: &dyn DocumentStore, uid: &str) -> Result<()> {
  store.delete(USERS, uid).await?;
  info!(uid, "Account deleted.");
  Ok(())
}

fn fields_of(value: Value) -> Fields {
  match value {
    Value::Object(map) => map,
    _ => Fields::new(),
  }
}
