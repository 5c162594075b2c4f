// agrirent/src/forms.rs

//! Typed forms and the declarative rule table they are validated against.
//!
//! Every submit flow runs `validate` as its first stage; a failure lists every
//! failing field and stops the flow before any backend call.

use serde::{Deserialize, Serialize};

use crate::services::media::ImageUpload;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldFormat {
  Email,
  Phone,
  /// A non-negative decimal amount, e.g. `50` or `120.50`.
  Price,
  MinLength(usize),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldRule {
  pub field: &'static str,
  pub required: bool,
  /// Checked only when the field has a non-blank value.
  pub format: Option<FieldFormat>,
}

impl FieldRule {
  pub const fn required(field: &'static str) -> Self {
    Self {
      field,
      required: true,
      format: None,
    }
  }

  pub const fn optional(field: &'static str, format: FieldFormat) -> Self {
    Self {
      field,
      required: false,
      format: Some(format),
    }
  }

  pub const fn with_format(mut self, format: FieldFormat) -> Self {
    self.format = Some(format);
    self
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
  pub field: String,
  pub message: String,
}

impl FieldError {
  pub fn new(field: &str, message: impl Into<String>) -> Self {
    Self {
      field: field.to_string(),
      message: message.into(),
    }
  }
}

/// Exposes form fields to the rule table by their wire (camelCase) names.
pub trait FormFields {
  fn field_value(&self, field: &str) -> Option<&str>;
}

pub fn validate<F: FormFields>(form: &F, rules: &[FieldRule]) -> Result<(), Vec<FieldError>> {
  let errors: Vec<FieldError> = rules.iter().filter_map(|rule| check_rule(form, rule)).collect();
  if errors.is_empty() {
    Ok(())
  } else {
    Err(errors)
  }
}

fn check_rule<F: FormFields>(form: &F, rule: &FieldRule) -> Option<FieldError> {
  let value = form.field_value(rule.field).map(str::trim).unwrap_or("");
  if value.is_empty() {
    return rule
      .required
      .then(|| FieldError::new(rule.field, format!("{} is required.", label(rule.field))));
  }
  let format = rule.format?;
  if format_ok(format, value) {
    return None;
  }
  let message = match format {
    FieldFormat::Email => format!("{} must be a valid email address.", label(rule.field)),
    FieldFormat::Phone => format!("{} must be a valid phone number.", label(rule.field)),
    FieldFormat::Price => format!("{} must be a number.", label(rule.field)),
    FieldFormat::MinLength(n) => format!("{} must be at least {} characters.", label(rule.field), n),
  };
  Some(FieldError::new(rule.field, message))
}

fn format_ok(format: FieldFormat, value: &str) -> bool {
  match format {
    FieldFormat::Email => is_email(value),
    FieldFormat::Phone => is_phone(value),
    FieldFormat::Price => parse_price(value).is_some(),
    FieldFormat::MinLength(n) => value.chars().count() >= n,
  }
}

/// Parses a stored price string. `None` for anything that is not a finite,
/// non-negative decimal.
pub fn parse_price(value: &str) -> Option<f64> {
  value
    .trim()
    .parse::<f64>()
    .ok()
    .filter(|p| p.is_finite() && *p >= 0.0)
}

fn is_email(value: &str) -> bool {
  let Some((local, domain)) = value.split_once('@') else {
    return false;
  };
  !local.is_empty()
    && !domain.contains('@')
    && !value.chars().any(char::is_whitespace)
    && domain.contains('.')
    && !domain.starts_with('.')
    && !domain.ends_with('.')
}

fn is_phone(value: &str) -> bool {
  let body = value.strip_prefix('+').unwrap_or(value);
  let allowed = body
    .chars()
    .all(|c| c.is_ascii_digit() || matches!(c, ' ' | '-' | '(' | ')'));
  let digits = body.chars().filter(char::is_ascii_digit).count();
  allowed && (7..=15).contains(&digits)
}

/// `hirerPhone` -> `Hirer phone`.
fn label(field: &str) -> String {
  let mut out = String::with_capacity(field.len() + 4);
  for (i, c) in field.chars().enumerate() {
    if i == 0 {
      out.extend(c.to_uppercase());
    } else if c.is_uppercase() {
      out.push(' ');
      out.extend(c.to_lowercase());
    } else {
      out.push(c);
    }
  }
  out
}

// --- Rule tables ---

pub const EQUIPMENT_RULES: &[FieldRule] = &[
  FieldRule::required("name"),
  FieldRule::required("price").with_format(FieldFormat::Price),
  FieldRule::required("location"),
  FieldRule::optional("hirerPhone", FieldFormat::Phone),
  FieldRule::optional("hirerEmail", FieldFormat::Email),
];

pub const LABOURER_RULES: &[FieldRule] = &[
  FieldRule::required("name"),
  FieldRule::required("skill"),
  FieldRule::required("contact"),
  FieldRule::required("location"),
  FieldRule::optional("price", FieldFormat::Price),
];

pub const SIGNIN_RULES: &[FieldRule] = &[
  FieldRule::required("email").with_format(FieldFormat::Email),
  FieldRule::required("password"),
];

pub const PROFILE_RULES: &[FieldRule] = &[
  FieldRule::required("displayName"),
  FieldRule::required("email").with_format(FieldFormat::Email),
];

pub const DELETE_ACCOUNT_RULES: &[FieldRule] = &[FieldRule::required("password")];

pub fn signup_rules(password_min_length: usize) -> [FieldRule; 2] {
  [
    FieldRule::required("email").with_format(FieldFormat::Email),
    FieldRule::required("password").with_format(FieldFormat::MinLength(password_min_length)),
  ]
}

pub fn password_change_rules(password_min_length: usize) -> [FieldRule; 3] {
  [
    FieldRule::required("currentPassword"),
    FieldRule::required("newPassword").with_format(FieldFormat::MinLength(password_min_length)),
    FieldRule::required("confirmPassword"),
  ]
}

// --- Forms ---

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EquipmentForm {
  pub name: String,
  pub description: String,
  pub price: String,
  pub location: String,
  pub category: String,
  pub hirer_name: String,
  pub hirer_phone: String,
  pub hirer_email: String,
  pub image: Option<ImageUpload>,
}

impl FormFields for EquipmentForm {
  fn field_value(&self, field: &str) -> Option<&str> {
    Some(match field {
      "name" => &self.name,
      "description" => &self.description,
      "price" => &self.price,
      "location" => &self.location,
      "category" => &self.category,
      "hirerName" => &self.hirer_name,
      "hirerPhone" => &self.hirer_phone,
      "hirerEmail" => &self.hirer_email,
      _ => return None,
    })
  }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LabourerForm {
  pub name: String,
  pub skill: String,
  pub contact: String,
  pub location: String,
  pub price: String,
  pub equipment: Vec<String>,
}

impl FormFields for LabourerForm {
  fn field_value(&self, field: &str) -> Option<&str> {
    Some(match field {
      "name" => &self.name,
      "skill" => &self.skill,
      "contact" => &self.contact,
      "location" => &self.location,
      "price" => &self.price,
      _ => return None,
    })
  }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SignupForm {
  pub email: String,
  pub password: String,
  pub display_name: String,
}

impl FormFields for SignupForm {
  fn field_value(&self, field: &str) -> Option<&str> {
    match field {
      "email" => Some(&self.email),
      "password" => Some(&self.password),
      "displayName" => Some(&self.display_name),
      _ => None,
    }
  }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SigninForm {
  pub email: String,
  pub password: String,
}

impl FormFields for SigninForm {
  fn field_value(&self, field: &str) -> Option<&str> {
    match field {
      "email" => Some(&self.email),
      "password" => Some(&self.password),
      _ => None,
    }
  }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProfileForm {
  pub display_name: String,
  pub email: String,
  pub photo_url: String,
}

impl FormFields for ProfileForm {
  fn field_value(&self, field: &str) -> Option<&str> {
    match field {
      "displayName" => Some(&self.display_name),
      "email" => Some(&self.email),
      "photoUrl" => Some(&self.photo_url),
      _ => None,
    }
  }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PasswordForm {
  pub current_password: String,
  pub new_password: String,
  pub confirm_password: String,
}

impl FormFields for PasswordForm {
  fn field_value(&self, field: &str) -> Option<&str> {
    match field {
      "currentPassword" => Some(&self.current_password),
      "newPassword" => Some(&self.new_password),
      "confirmPassword" => Some(&self.confirm_password),
      _ => None,
    }
  }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DeleteAccountForm {
  pub password: String,
}

impl FormFields for DeleteAccountForm {
  fn field_value(&self, field: &str) -> Option<&str> {
    (field == "password").then_some(self.password.as_str())
  }
}
