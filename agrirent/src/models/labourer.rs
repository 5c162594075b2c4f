// agrirent/src/models/labourer.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::forms::LabourerForm;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Labourer {
  pub id: String,
  pub name: String,
  pub skill: String,
  pub contact: String,
  pub location: String,
  pub price: String,
  /// Equipment types the labourer can operate. Free-form tags.
  pub equipment: Vec<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub created_at: Option<DateTime<Utc>>,
}

impl Labourer {
  pub fn from_form(form: &LabourerForm) -> Self {
    Labourer {
      id: String::new(),
      name: form.name.trim().to_string(),
      skill: form.skill.trim().to_string(),
      contact: form.contact.trim().to_string(),
      location: form.location.trim().to_string(),
      price: form.price.trim().to_string(),
      equipment: form
        .equipment
        .iter()
        .map(|tag| tag.trim().to_string())
        .filter(|tag| !tag.is_empty())
        .collect(),
      created_at: Some(Utc::now()),
    }
  }
}
