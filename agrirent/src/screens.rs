// agrirent/src/screens.rs

//! List-and-filter state shared by the browse, labour and manage-posts views.
//!
//! The list is fetched once, unfiltered; what the view shows is derived from
//! it by the current search term and category selection.

use crate::models::{Equipment, Labourer};

pub trait Listing {
  fn listing_id(&self) -> &str;

  /// `needle` is already lower-cased and non-empty.
  fn matches_search(&self, needle: &str) -> bool;

  fn category(&self) -> Option<&str> {
    None
  }
}

impl Listing for Equipment {
  fn listing_id(&self) -> &str {
    &self.id
  }

  fn matches_search(&self, needle: &str) -> bool {
    self.name.to_lowercase().contains(needle)
  }

  fn category(&self) -> Option<&str> {
    Some(&self.category)
  }
}

impl Listing for Labourer {
  fn listing_id(&self) -> &str {
    &self.id
  }

  fn matches_search(&self, needle: &str) -> bool {
    self.name.to_lowercase().contains(needle) || self.skill.to_lowercase().contains(needle)
  }
}

#[derive(Debug, Clone)]
pub struct BrowseState<T> {
  items: Vec<T>,
  search: String,
  selected_category: Option<String>,
}

impl<T: Listing> BrowseState<T> {
  pub fn new(items: Vec<T>) -> Self {
    Self {
      items,
      search: String::new(),
      selected_category: None,
    }
  }

  pub fn set_search(&mut self, term: impl Into<String>) {
    self.search = term.into();
  }

  pub fn search(&self) -> &str {
    &self.search
  }

  pub fn select_category(&mut self, category: Option<String>) {
    self.selected_category = category.filter(|c| !c.trim().is_empty());
  }

  /// Tapping the selected category clears it; any other selects it.
  pub fn toggle_category(&mut self, category: &str) -> Option<&str> {
    if self.selected_category.as_deref() == Some(category) {
      self.selected_category = None;
    } else {
      self.selected_category = Some(category.to_string());
    }
    self.selected_category.as_deref()
  }

  pub fn selected_category(&self) -> Option<&str> {
    self.selected_category.as_deref()
  }

  pub fn visible(&self) -> Vec<&T> {
    let needle = self.search.trim().to_lowercase();
    self
      .items
      .iter()
      .filter(|item| needle.is_empty() || item.matches_search(&needle))
      .filter(|item| match &self.selected_category {
        Some(selected) => item.category() == Some(selected.as_str()),
        None => true,
      })
      .collect()
  }

  /// Drops a deleted item locally. Returns whether anything was removed.
  pub fn remove(&mut self, id: &str) -> bool {
    let before = self.items.len();
    self.items.retain(|item| item.listing_id() != id);
    self.items.len() != before
  }

  pub fn items(&self) -> &[T] {
    &self.items
  }

  pub fn into_items(self) -> Vec<T> {
    self.items
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn equipment(id: &str, name: &str, category: &str) -> Equipment {
    Equipment {
      id: id.to_string(),
      name: name.to_string(),
      category: category.to_string(),
      ..Default::default()
    }
  }

  fn home() -> BrowseState<Equipment> {
    BrowseState::new(vec![
      equipment("1", "John Deere Tractor", "Tractor"),
      equipment("2", "Disc Plow", "Plow"),
      equipment("3", "Mini tractor", "Tractor"),
    ])
  }

  fn ids(items: Vec<&Equipment>) -> Vec<&str> {
    items.into_iter().map(|e| e.id.as_str()).collect()
  }

  #[test]
  fn search_is_case_insensitive_substring() {
    let mut state = home();
    state.set_search("TRACT");
    assert_eq!(ids(state.visible()), vec!["1", "3"]);
  }

  #[test]
  fn blank_search_shows_everything() {
    let mut state = home();
    state.set_search("   ");
    assert_eq!(state.visible().len(), 3);
  }

  #[test]
  fn toggling_the_selected_category_clears_it() {
    let mut state = home();
    assert_eq!(state.toggle_category("Plow"), Some("Plow"));
    assert_eq!(ids(state.visible()), vec!["2"]);
    assert_eq!(state.toggle_category("Plow"), None);
    assert_eq!(state.visible().len(), 3);
    state.toggle_category("Plow");
    assert_eq!(state.toggle_category("Tractor"), Some("Tractor"));
  }

  #[test]
  fn search_and_category_combine() {
    let mut state = home();
    state.select_category(Some("Tractor".to_string()));
    state.set_search("mini");
    assert_eq!(ids(state.visible()), vec!["3"]);
  }

  #[test]
  fn remove_prunes_without_refetch() {
    let mut state = home();
    assert!(state.remove("2"));
    assert!(!state.remove("2"));
    assert!(state.items().iter().all(|e| e.id != "2"));
  }

  #[test]
  fn labourers_match_on_skill_too() {
    let mut state = BrowseState::new(vec![
      Labourer {
        id: "L1".to_string(),
        name: "Kwame".to_string(),
        skill: "Tractor operator".to_string(),
        ..Default::default()
      },
      Labourer {
        id: "L2".to_string(),
        name: "Esi".to_string(),
        skill: "Irrigation".to_string(),
        ..Default::default()
      },
    ]);
    state.set_search("operator");
    assert_eq!(state.visible()[0].id, "L1");
    state.set_search("esi");
    assert_eq!(state.visible()[0].id, "L2");
    state.toggle_category("Tractor");
    assert!(state.visible().is_empty());
  }
}
