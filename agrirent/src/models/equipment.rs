// agrirent/src/models/equipment.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::forms::{parse_price, EquipmentForm};

/// Categories offered as filter chips on the browse screen.
pub const EQUIPMENT_CATEGORIES: &[&str] = &["Tractor", "Harvester", "Baler", "Plow", "Sprayer"];

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Equipment {
  pub id: String,
  pub name: String,
  pub description: String,
  /// Daily rate in GHS, kept as entered.
  pub price: String,
  pub location: String,
  pub category: String,
  pub hirer_name: String,
  pub hirer_phone: String,
  pub hirer_email: String,
  /// Empty when the listing has no image.
  pub image_url: String,
  pub user_id: String,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
  pub hirer_name: String,
  pub hirer_phone: String,
  pub hirer_email: String,
}

impl Equipment {
  pub fn from_form(form: &EquipmentForm, owner_uid: &str, image_url: Option<String>) -> Self {
    let mut equipment = Equipment {
      user_id: owner_uid.to_string(),
      image_url: image_url.unwrap_or_default(),
      created_at: Some(Utc::now()),
      ..Default::default()
    };
    equipment.apply_form(form);
    equipment
  }

  /// Overwrites the user-editable fields. Owner, image and timestamps stay.
  pub fn apply_form(&mut self, form: &EquipmentForm) {
    self.name = form.name.trim().to_string();
    self.description = form.description.trim().to_string();
    self.price = form.price.trim().to_string();
    self.location = form.location.trim().to_string();
    self.category = form.category.trim().to_string();
    self.hirer_name = form.hirer_name.trim().to_string();
    self.hirer_phone = form.hirer_phone.trim().to_string();
    self.hirer_email = form.hirer_email.trim().to_string();
  }

  pub fn is_owned_by(&self, uid: &str) -> bool {
    self.user_id == uid
  }

  pub fn price_per_day(&self) -> Option<f64> {
    parse_price(&self.price)
  }

  pub fn contact(&self) -> Contact {
    Contact {
      hirer_name: self.hirer_name.clone(),
      hirer_phone: self.hirer_phone.clone(),
      hirer_email: self.hirer_email.clone(),
    }
  }
}

/// What the order screen shows for a rental of `days` days.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderQuote {
  pub equipment_id: String,
  pub equipment_name: String,
  pub base_cost_per_day: String,
  pub location: String,
  pub days: u32,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub total_cost: Option<f64>,
}

impl OrderQuote {
  pub fn for_equipment(equipment: &Equipment, days: u32) -> Self {
    let total_cost = equipment
      .price_per_day()
      .map(|per_day| (per_day * f64::from(days) * 100.0).round() / 100.0)
      .filter(|total| total.is_finite());
    Self {
      equipment_id: equipment.id.clone(),
      equipment_name: equipment.name.clone(),
      base_cost_per_day: equipment.price.clone(),
      location: equipment.location.clone(),
      days,
      total_cost,
    }
  }
}
