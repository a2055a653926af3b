use std::fs;

use log::info;

use crate::app_response::AppResponse;
use crate::items::Items;
use crate::orders::Orders;
use crate::people::People;
use crate::store_config::StoreConfig;

/// Handles to the three collections, opened together at process start.
#[derive(Debug, Clone)]
pub struct AppStoreState {
    pub people: People,
    pub items: Items,
    pub orders: Orders,
}

impl AppStoreState {
    /// Opens the file-backed collections described by `config`.
    ///
    /// Creates the data directory when it does not exist. Collection files
    /// themselves are not created until the first write; reading a missing
    /// file yields an empty collection.
    pub fn open(config: &StoreConfig) -> Result<Self, AppResponse> {
        fs::create_dir_all(&config.data_dir).map_err(|e| {
            AppResponse::StorageError(format!(
                "Error creating data directory {}: {e}",
                config.data_dir.display()
            ))
        })?;

        info!("Opening collections in {}", config.data_dir.display());
        Ok(Self {
            people: People::open_file(config.people_path()),
            items: Items::open_file(config.items_path()),
            orders: Orders::open_file(config.orders_path()),
        })
    }

    pub fn in_memory() -> Self {
        Self {
            people: People::in_memory(),
            items: Items::in_memory(),
            orders: Orders::in_memory(),
        }
    }

    /// Releases the collection handles.
    ///
    /// Every mutation is already on disk when it returns, so there is nothing
    /// to flush.
    pub fn close(self) {
        info!(
            "Closing collections ({}, {}, {})",
            self.people.storage().location(),
            self.items.storage().location(),
            self.orders.storage().location()
        );
    }
}
