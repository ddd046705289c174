//! # Pool Rows
//!
//! The persisted shape of a credential record. Column names are those of
//! the provisioning spreadsheet the pool is exported from.
//!
//! | Column | Field |
//! |--------|-------|
//! | `nome` | network name |
//! | `senha` | secret |
//! | `documento` | identity document (empty = unassigned) |
//! | `dispositivos` | device class |
//! | `status` | delivery status label |
//! | `user_id` | requester reference |
//! | `usuario` | requester display name |
//!
//! Cells may be strings, numbers, booleans or null; everything is read as
//! text. Columns this crate does not know are kept as-is.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Status label written for delivered rows.
pub const DELIVERED_LABEL: &str = "entregue";

/// One row of the pool file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PoolRow {
    #[serde(rename = "nome", default, deserialize_with = "text_cell")]
    pub network_name: String,
    #[serde(rename = "senha", default, deserialize_with = "text_cell")]
    pub secret: String,
    #[serde(rename = "documento", default, deserialize_with = "text_cell")]
    pub identity: String,
    #[serde(rename = "dispositivos", default, deserialize_with = "text_cell")]
    pub device_class: String,
    #[serde(default, deserialize_with = "text_cell")]
    pub status: String,
    #[serde(rename = "user_id", default, deserialize_with = "text_cell")]
    pub user_ref: String,
    #[serde(rename = "usuario", default, deserialize_with = "text_cell")]
    pub user_name: String,
    /// Columns not modelled above.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl PoolRow {
    /// A freshly provisioned row.
    pub fn provisioned(network_name: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            network_name: network_name.into(),
            secret: secret.into(),
            ..Default::default()
        }
    }
}

fn text_cell<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(String::new()),
        Some(Value::String(s)) => Ok(s),
        Some(Value::Number(n)) => Ok(n.to_string()),
        Some(Value::Bool(b)) => Ok(b.to_string()),
        Some(other) => Err(D::Error::custom(format!(
            "expected a text cell, found {other}"
        ))),
    }
}
