use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::app_response::AppResponse;

/// Where the three collection files live.
///
/// Any key missing from a config file falls back to the default layout:
/// `data/users.json`, `data/products.json` and `data/orders.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    pub data_dir: PathBuf,
    pub people_file: String,
    pub items_file: String,
    pub orders_file: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            people_file: "users.json".to_string(),
            items_file: "products.json".to_string(),
            orders_file: "orders.json".to_string(),
        }
    }
}

impl StoreConfig {
    pub fn with_data_dir(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            ..Self::default()
        }
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, AppResponse> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|e| {
            AppResponse::StorageError(format!("Error reading config {}: {e}", path.display()))
        })?;
        serde_json::from_str(&contents).map_err(|e| {
            AppResponse::ValidationError(format!("Invalid config {}: {e}", path.display()))
        })
    }

    pub fn people_path(&self) -> PathBuf {
        self.data_dir.join(&self.people_file)
    }

    pub fn items_path(&self) -> PathBuf {
        self.data_dir.join(&self.items_file)
    }

    pub fn orders_path(&self) -> PathBuf {
        self.data_dir.join(&self.orders_file)
    }
}
