//! Account entities returned by the backend.
//!
//! # Design
//! Field names follow the backend wire format (`$id`, camelCase). Only the
//! fields that identify an entity are required; everything else defaults
//! when absent so that minor backend differences do not break decoding.
//! A response missing a required field is rejected at the service boundary
//! as a validation failure.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Free-form user preferences.
pub type Preferences = Map<String, Value>;

/// An account as returned by the account endpoints.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(rename = "$id")]
    pub id: String,
    #[serde(rename = "$createdAt", default)]
    pub created_at: String,
    #[serde(rename = "$updatedAt", default)]
    pub updated_at: String,
    #[serde(default)]
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub email_verification: bool,
    #[serde(default)]
    pub status: bool,
    #[serde(default)]
    pub prefs: Preferences,
}

/// A login session.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    #[serde(rename = "$id")]
    pub id: String,
    #[serde(rename = "$createdAt", default)]
    pub created_at: String,
    #[serde(rename = "$updatedAt", default)]
    pub updated_at: String,
    pub user_id: String,
    #[serde(default)]
    pub expire: String,
    #[serde(default)]
    pub provider: String,
    #[serde(default)]
    pub ip: String,
    #[serde(default)]
    pub os_code: String,
    #[serde(default)]
    pub os_name: String,
    #[serde(default)]
    pub os_version: String,
    #[serde(default)]
    pub client_type: String,
    #[serde(default)]
    pub client_code: String,
    #[serde(default)]
    pub client_name: String,
    #[serde(default)]
    pub client_version: String,
    #[serde(default)]
    pub device_name: String,
    #[serde(default)]
    pub device_brand: String,
    #[serde(default)]
    pub device_model: String,
    #[serde(default)]
    pub country_code: String,
    #[serde(default)]
    pub country_name: String,
    #[serde(default)]
    pub current: bool,
}

/// Sessions belonging to the calling account.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SessionList {
    pub total: u64,
    pub sessions: Vec<Session>,
}

/// A short-lived token minted from the current session.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Jwt {
    pub jwt: String,
}
