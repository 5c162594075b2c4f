// agrirent/src/flows/contexts.rs

//! Data carried through each form flow. Handlers receive these wrapped in
//! `FlowContext`; the HTTP handler reads the results back after the run.

use crate::forms::{
  DeleteAccountForm, EquipmentForm, LabourerForm, PasswordForm, ProfileForm, SigninForm, SignupForm,
};
use crate::models::{Equipment, Labourer, UserAccount, UserProfile};
use crate::state::AppState;

#[derive(Clone)]
pub struct SignupCtx {
  pub app_state: AppState,
  pub form: SignupForm,
  pub account: Option<UserAccount>,
  pub token: Option<String>,
}

#[derive(Clone)]
pub struct SigninCtx {
  pub app_state: AppState,
  pub form: SigninForm,
  pub account: Option<UserAccount>,
  pub token: Option<String>,
}

#[derive(Clone)]
pub struct PostEquipmentCtx {
  pub app_state: AppState,
  pub uid: String,
  pub form: EquipmentForm,
  pub image_url: Option<String>,
  pub created: Option<Equipment>,
}

#[derive(Clone)]
pub struct EditEquipmentCtx {
  pub app_state: AppState,
  pub uid: String,
  pub equipment_id: String,
  pub form: EquipmentForm,
  pub existing: Option<Equipment>,
  pub image_url: Option<String>,
  pub updated: Option<Equipment>,
}

#[derive(Clone)]
pub struct DeleteEquipmentCtx {
  pub app_state: AppState,
  pub uid: String,
  pub equipment_id: String,
  pub existing: Option<Equipment>,
}

#[derive(Clone)]
pub struct PostLabourerCtx {
  pub app_state: AppState,
  pub form: LabourerForm,
  pub created: Option<Labourer>,
}

#[derive(Clone)]
pub struct ChangePasswordCtx {
  pub app_state: AppState,
  pub uid: String,
  pub form: PasswordForm,
}

#[derive(Clone)]
pub struct EditProfileCtx {
  pub app_state: AppState,
  pub uid: String,
  pub form: ProfileForm,
  pub account: Option<UserAccount>,
  pub profile: Option<UserProfile>,
}

#[derive(Clone)]
pub struct DeleteAccountCtx {
  pub app_state: AppState,
  pub uid: String,
  pub form: DeleteAccountForm,
  pub sessions_revoked: usize,
}
