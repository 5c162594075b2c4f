// agrirent/src/seed.rs

//! Demo data for local runs (`SEED_DB=true`).

use anyhow::Context;
use tracing::info;

use crate::errors::Result;
use crate::forms::{EquipmentForm, LabourerForm};
use crate::models::{Equipment, Labourer};
use crate::services::{auth_service, identity};
use crate::state::AppState;
use crate::store::{collections, encode, DocumentStore};

pub const DEMO_EMAIL: &str = "demo@agrirent.app";
pub const DEMO_PASSWORD: &str = "agrirent-demo";

const DEMO_EQUIPMENT: &[(&str, &str, &str, &str, &str)] = &[
  ("John Deere 5075E", "75hp utility tractor, well maintained.", "350", "Kumasi", "Tractor"),
  ("Kubota DC-70 Harvester", "Combine harvester for rice and maize.", "900", "Tamale", "Harvester"),
  ("Round Baler", "Bales hay and straw.", "200", "Techiman", "Baler"),
  ("Disc Plow", "Three-disc plow, tractor mounted.", "120", "Accra", "Plow"),
  ("Boom Sprayer", "600L boom sprayer.", "150", "Ho", "Sprayer"),
];

const DEMO_LABOURERS: &[(&str, &str, &str, &str, &str, &[&str])] = &[
  ("Kwame Mensah", "Tractor operator", "0241234567", "Kumasi", "80", &["Tractor", "Plow"]),
  ("Akosua Boateng", "Harvest crew lead", "0207654321", "Tamale", "100", &["Harvester"]),
];

/// Inserts demo listings when the equipment collection is empty. Returns the
/// number of equipment documents written.
pub async fn seed_if_empty(state: &AppState) -> Result<usize> {
  Ok(seed_demo_data(state.documents.as_ref()).await?)
}

async fn seed_demo_data(store: &dyn DocumentStore) -> anyhow::Result<usize> {
  if !store.fetch_all(collections::EQUIPMENT).await?.is_empty() {
    info!("Equipment collection already populated; skipping demo seed.");
    return Ok(0);
  }

  let owner = match identity::find_by_email(store, DEMO_EMAIL).await? {
    Some(existing) => existing,
    None => {
      let hash = auth_service::hash_password(DEMO_PASSWORD)?;
      identity::create_account(store, DEMO_EMAIL, "AgriRent Demo", hash).await?
    }
  };

  for (name, description, price, location, category) in DEMO_EQUIPMENT {
    let form = EquipmentForm {
      name: name.to_string(),
      description: description.to_string(),
      price: price.to_string(),
      location: location.to_string(),
      category: category.to_string(),
      hirer_name: owner.display_name.clone(),
      hirer_email: owner.email.clone(),
      ..Default::default()
    };
    let listing = Equipment::from_form(&form, &owner.id, None);
    store
      .create(collections::EQUIPMENT, encode(&listing)?)
      .await
      .with_context(|| format!("seeding equipment '{}'", name))?;
  }

  for (name, skill, contact, location, price, tags) in DEMO_LABOURERS {
    let form = LabourerForm {
      name: name.to_string(),
      skill: skill.to_string(),
      contact: contact.to_string(),
      location: location.to_string(),
      price: price.to_string(),
      equipment: tags.iter().map(|t| t.to_string()).collect(),
    };
    store
      .create(collections::LABOURERS, encode(&Labourer::from_form(&form))?)
      .await
      .with_context(|| format!("seeding labourer '{}'", name))?;
  }

  info!(
    equipment = DEMO_EQUIPMENT.len(),
    labourers = DEMO_LABOURERS.len(),
    owner = %owner.id,
    "Demo data seeded."
  );
  Ok(DEMO_EQUIPMENT.len())
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::config::AppConfig;
  use serde_json::Value;

  #[tokio::test]
  async fn seeds_once() {
    let state = AppState::in_memory(AppConfig::default());
    assert_eq!(seed_if_empty(&state).await.unwrap(), DEMO_EQUIPMENT.len());
    assert_eq!(seed_if_empty(&state).await.unwrap(), 0);

    let owner = identity::find_by_email(state.documents.as_ref(), "DEMO@agrirent.app")
      .await
      .unwrap()
      .unwrap();
    let owned = state
      .documents
      .fetch_where_eq(collections::EQUIPMENT, "userId", &Value::String(owner.id))
      .await
      .unwrap();
    assert_eq!(owned.len(), DEMO_EQUIPMENT.len());
  }
}
