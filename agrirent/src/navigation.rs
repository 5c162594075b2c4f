// agrirent/src/navigation.rs

//! Named screens and the intents a response uses to tell the client where to
//! go next.

use serde::Serialize;
use serde_json::{json, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Screen {
  Splash,
  Login,
  Signup,
  AppNavigator,
  Home,
  Post,
  Labour,
  Settings,
  EquipmentDetails,
  OrderDetails,
  EditPost,
  ManagePosts,
  ChangePassword,
  EditProfile,
  PrivacyPolicy,
  TermsOfService,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Tab {
  Home,
  Post,
  Labour,
  Settings,
}

impl Tab {
  pub const ALL: [Tab; 4] = [Tab::Home, Tab::Post, Tab::Labour, Tab::Settings];

  pub fn screen(self) -> Screen {
    match self {
      Tab::Home => Screen::Home,
      Tab::Post => Screen::Post,
      Tab::Labour => Screen::Labour,
      Tab::Settings => Screen::Settings,
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum NavAction {
  Navigate,
  /// Clears the back stack, e.g. after sign-in or sign-out.
  Reset,
  Back,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NavigationIntent {
  pub action: NavAction,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub screen: Option<Screen>,
  #[serde(skip_serializing_if = "Value::is_null")]
  pub params: Value,
}

impl NavigationIntent {
  pub fn navigate(screen: Screen) -> Self {
    Self {
      action: NavAction::Navigate,
      screen: Some(screen),
      params: Value::Null,
    }
  }

  pub fn reset(screen: Screen) -> Self {
    Self {
      action: NavAction::Reset,
      screen: Some(screen),
      params: Value::Null,
    }
  }

  pub fn back() -> Self {
    Self {
      action: NavAction::Back,
      screen: None,
      params: Value::Null,
    }
  }

  pub fn with_params(mut self, params: Value) -> Self {
    self.params = params;
    self
  }

  /// Where the splash screen sends the user.
  pub fn after_splash(signed_in: bool) -> Self {
    if signed_in {
      Self::reset(Screen::AppNavigator)
    } else {
      Self::reset(Screen::Login)
    }
  }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScreenEntry {
  pub screen: Screen,
  pub title: &'static str,
  /// Keys of the parameter object the screen expects.
  pub params: &'static [&'static str],
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NavigationManifest {
  pub initial: Screen,
  pub auth: Vec<ScreenEntry>,
  pub tabs: Vec<ScreenEntry>,
  pub modals: Vec<ScreenEntry>,
  pub categories: &'static [&'static str],
}

const fn entry(screen: Screen, title: &'static str, params: &'static [&'static str]) -> ScreenEntry {
  ScreenEntry { screen, title, params }
}

pub fn manifest() -> NavigationManifest {
  NavigationManifest {
    initial: Screen::Splash,
    auth: vec![entry(Screen::Login, "Login", &[]), entry(Screen::Signup, "Sign Up", &[])],
    tabs: Tab::ALL
      .iter()
      .map(|tab| {
        let title = match tab {
          Tab::Home => "Home",
          Tab::Post => "Post",
          Tab::Labour => "Labour",
          Tab::Settings => "Settings",
        };
        entry(tab.screen(), title, &[])
      })
      .collect(),
    modals: vec![
      entry(Screen::EquipmentDetails, "Equipment Details", &["equipment"]),
      entry(
        Screen::OrderDetails,
        "Order Details",
        &["equipmentId", "baseCostPerDay", "location"],
      ),
      entry(Screen::EditPost, "Edit Post", &["postId"]),
      entry(Screen::ManagePosts, "Manage Posts", &[]),
      entry(Screen::ChangePassword, "Change Password", &[]),
      entry(Screen::EditProfile, "Edit Profile", &[]),
      entry(Screen::PrivacyPolicy, "Privacy Policy", &[]),
      entry(Screen::TermsOfService, "Terms of Service", &[]),
    ],
    categories: crate::models::EQUIPMENT_CATEGORIES,
  }
}

/// Intent the detail view's "Book" button follows.
pub fn book_intent(equipment_id: &str, base_cost_per_day: &str, location: &str) -> NavigationIntent {
  NavigationIntent::navigate(Screen::OrderDetails).with_params(json!({
    "equipmentId": equipment_id,
    "baseCostPerDay": base_cost_per_day,
    "location": location,
  }))
}
