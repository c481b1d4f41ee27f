//! Wire records returned by the cluster API
//!
//! Missing fields and explicit `null`s decode to their defaults so partial
//! payloads from older cluster versions still parse.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// `GET /v1/users` element
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct User {
    #[serde(deserialize_with = "null_as_default")]
    pub uid: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub email: String,
    #[serde(deserialize_with = "null_as_default")]
    pub auth_method: String,
    /// Upstream account status (`active`, `locked`, ...)
    #[serde(deserialize_with = "null_as_default")]
    pub status: String,
    /// Cluster management role of the user
    #[serde(deserialize_with = "null_as_default")]
    pub role: String,
    #[serde(deserialize_with = "null_as_default")]
    pub role_uids: Vec<u64>,
    #[serde(deserialize_with = "null_as_default")]
    pub email_alerts: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub cluster_email_alerts: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub bdbs_email_alerts: Vec<serde_json::Value>,
    #[serde(deserialize_with = "null_as_default")]
    pub certificate_subject_line: String,
    pub password_issue_date: Option<DateTime<Utc>>,
}

/// `GET /v1/roles` element and `GET /v1/roles/{uid}` body
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Role {
    #[serde(deserialize_with = "null_as_default")]
    pub uid: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    /// Management level, e.g. `admin`, `db_viewer`
    #[serde(deserialize_with = "null_as_default")]
    pub management: String,
}

/// `GET /v1/cluster` body
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Cluster {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,

    /// Remaining cluster settings, kept opaque
    #[serde(flatten)]
    pub settings: serde_json::Map<String, serde_json::Value>,
}

/// Decode `null` as the type's default value
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    let value = Option::<T>::deserialize(deserializer)?;
    Ok(value.unwrap_or_default())
}
